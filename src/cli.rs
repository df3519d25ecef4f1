use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::Parser;
use std::path::PathBuf;

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
🧬 fastascan version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   single-pass GC content, motif matching and record selection for .fasta files";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser, Debug)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    styles = STYLES
)]
pub struct Cli {
    /// the input .fasta file, with one sequence line per record
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// report GC content. on its own, one global window covers the whole file;
    /// with a value (--gc=<N>) the content is reported for every N counted bases.
    #[arg(
        short = 'c',
        long = "gc",
        value_name = "N",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "0",
        verbatim_doc_comment
    )]
    pub gc: Option<usize>,

    /// count every occurrence of this string, including occurrences that run across
    /// the break between two sequence lines of the same record. case-insensitive.
    #[arg(short = 'm', long = "match", value_name = "QUERY")]
    pub query: Option<String>,

    /// merge the selected sequences into one record, written to this file
    #[arg(short = 'g', long, value_name = "PATH")]
    pub merge: Option<PathBuf>,

    /// print the selected records as they are read
    #[arg(short, long, action)]
    pub print: bool,

    /// only process the records with these names, separated by commas.
    /// `--seq chr1,chr2` selects the records with headers `>chr1` and `>chr2`.
    #[arg(short, long = "seq", value_name = "NAMES", verbatim_doc_comment)]
    pub selectors: Option<String>,

    /// write the report to this file instead of standard output
    #[arg(short, long = "out", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// write a JSON summary of the run to this file
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,
}
