use crate::gc::ChunkReport;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};

/// The header of the single record written by `--merge`.
pub const MERGED_HEADER: &[u8] = b">Sequences_Merged";

/// Creates a `BufWriter` for the given output option. This allows for an output file to be passed
/// or otherwise will default to using standard output.
///
/// # Arguments
///
/// * `output` - An `Option` containing the path to the output file.
///
/// # Returns
///
/// A `Result` containing a `BufWriter` that implements `Write`.
pub fn get_writer(output: &Option<PathBuf>) -> Result<BufWriter<Box<dyn Write>>> {
    // get output as a BufWriter - equal to stdout if None
    let writer = BufWriter::new(match output {
        Some(ref x) => {
            let file = File::create(x)
                .with_context(|| format!("Unable to create output file {}", x.display()))?;
            Box::new(file) as Box<dyn Write>
        }
        None => Box::new(stdout()) as Box<dyn Write>,
    });
    Ok(writer)
}

/// Creates the `--merge` output file and writes its synthetic header.
pub fn merge_writer(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("Unable to create merge file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(MERGED_HEADER)?;
    writer.write_all(b"\n")?;
    Ok(writer)
}

/// Formats a GC percentage with six decimal places, or `undefined` for a window without
/// any counted bases.
fn format_gc(pct: Option<f64>) -> String {
    match pct {
        Some(v) => format!("{v:.6}"),
        None => String::from("undefined"),
    }
}

fn write_gc_line(writer: &mut impl Write, report: &ChunkReport) -> std::io::Result<()> {
    writeln!(
        writer,
        "Chunk: {} GC content: {}\n",
        report.index,
        format_gc(report.gc_percent())
    )
}

/// Writes the report for a window closed at the chunk size.
pub fn write_chunk_report(writer: &mut impl Write, report: &ChunkReport) -> std::io::Result<()> {
    let c = &report.counts;
    writeln!(
        writer,
        "Chunk number: {} A: {} T: {} C: {} G:{}",
        report.index, c.a, c.t, c.c, c.g
    )?;
    write_gc_line(writer, report)
}

/// Writes the report for the window left open at the end of the file. Unlike a chunk
/// report, it leads with the number of bases the window holds, since it may be partial.
pub fn write_final_report(writer: &mut impl Write, report: &ChunkReport) -> std::io::Result<()> {
    let c = &report.counts;
    writeln!(
        writer,
        "Total size of final chunk: {}. Chunk num: {} A: {} T: {} C: {} G:{}",
        c.total, report.index, c.a, c.t, c.c, c.g
    )?;
    write_gc_line(writer, report)
}

pub fn write_match_report(writer: &mut impl Write, query: &[u8], count: u64) -> std::io::Result<()> {
    writeln!(
        writer,
        "Total number of occurences of {} in the file was {}\n",
        String::from_utf8_lossy(query),
        count
    )
}

/// Writes one raw token on its own line, as used by `--print` and `--merge`.
pub fn write_line(writer: &mut impl Write, line: &[u8]) -> std::io::Result<()> {
    writer.write_all(line)?;
    writer.write_all(b"\n")
}
