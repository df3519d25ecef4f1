use crate::config::RunConfig;
use crate::gc::{ChunkReport, GcWindow};
use crate::io::{write_chunk_report, write_final_report, write_line, write_match_report};
use crate::matcher::MatchState;
use crate::reader::TokenReader;
use crate::select::SelectorSet;
use crate::seq::normalize;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{BufRead, Write};

/// Where the driver is relative to the records of the file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScanState {
    /// No header seen yet
    AwaitHeader,
    InSelectedBody,
    InSkippedBody,
}

/// Counters describing one pass over a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub tokens: u64,
    pub headers: u64,
    pub selected_records: u64,
    pub body_lines: u64,
    pub bases: u64,
}

/// Everything reported at the end of a scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// The window left open at the end of the file, if GC content was requested
    pub final_window: Option<ChunkReport>,
    /// The number of chunks closed before the final window
    pub chunks: u64,
    pub query: Option<String>,
    pub occurrences: Option<u64>,
    pub stats: ScanStats,
}

/// Single-pass driver over the tokens of a FASTA file.
///
/// Each header decides, once, whether the body lines that follow it are analysed; the
/// decision holds until the next header. Chunk reports are written to `report` as soon
/// as a window closes.
pub struct RecordScanner<W: Write, M: Write> {
    state: ScanState,
    selectors: Option<SelectorSet>,
    gc: Option<GcWindow>,
    matcher: Option<MatchState>,
    print: bool,
    report: W,
    merge: Option<M>,
    chunks: u64,
    stats: ScanStats,
}

impl<W: Write, M: Write> RecordScanner<W, M> {
    /// `merge` should already carry its header (see `io::merge_writer`).
    pub fn new(config: &RunConfig, report: W, merge: Option<M>) -> Self {
        Self {
            state: ScanState::AwaitHeader,
            selectors: config.selectors.clone(),
            gc: config.gc_window.map(GcWindow::new),
            matcher: config.query.clone().map(MatchState::new),
            print: config.print,
            report,
            merge,
            chunks: 0,
            stats: ScanStats::default(),
        }
    }

    /// Reads every token of `tokens`, then writes the end-of-run reports and flushes the
    /// outputs.
    pub fn scan<R: BufRead>(mut self, tokens: &mut TokenReader<R>) -> Result<RunReport> {
        let mut buf = Vec::new();

        while tokens
            .next_token(&mut buf)
            .context("Unable to read from the input file")?
        {
            self.handle_token(&mut buf)?;

            if self.stats.tokens % 1_000_000 == 0 {
                info!("Processed: {} lines", self.stats.tokens)
            }
        }

        self.finish()
    }

    /// Processes one header or sequence line.
    pub fn handle_token(&mut self, token: &mut [u8]) -> Result<()> {
        self.stats.tokens += 1;

        if token.first() == Some(&b'>') {
            return self.start_record(token);
        }

        let selected = match self.state {
            ScanState::InSelectedBody => true,
            ScanState::InSkippedBody => false,
            // a body line before any header is only analysed when nothing is filtered
            ScanState::AwaitHeader => self.selectors.is_none(),
        };

        if selected {
            self.analyse_body(token)?;
        }
        Ok(())
    }

    fn start_record(&mut self, header: &[u8]) -> Result<()> {
        self.stats.headers += 1;

        let selected = match &self.selectors {
            Some(s) => s.matches(header),
            None => true,
        };

        // occurrences never span two records
        if let Some(m) = self.matcher.as_mut() {
            m.reset();
        }

        if selected {
            self.state = ScanState::InSelectedBody;
            self.stats.selected_records += 1;
            if self.print {
                write_line(&mut self.report, header).context("Unable to write report")?;
            }
        } else {
            self.state = ScanState::InSkippedBody;
        }
        Ok(())
    }

    fn analyse_body(&mut self, line: &mut [u8]) -> Result<()> {
        self.stats.body_lines += 1;
        self.stats.bases += line.len() as u64;

        // echoed as read, before case normalization
        if self.print {
            write_line(&mut self.report, line).context("Unable to write report")?;
        }
        if let Some(merge) = self.merge.as_mut() {
            write_line(merge, line).context("Unable to write merge file")?;
        }

        normalize(line);

        if let Some(gc) = self.gc.as_mut() {
            for chunk in gc.observe(line) {
                write_chunk_report(&mut self.report, &chunk).context("Unable to write report")?;
                self.chunks += 1;
            }
        }

        if let Some(m) = self.matcher.as_mut() {
            m.observe(line);
        }
        Ok(())
    }

    /// Writes the final window and the match total, flushes every output and returns what
    /// was reported.
    pub fn finish(mut self) -> Result<RunReport> {
        let mut run = RunReport {
            chunks: self.chunks,
            stats: self.stats.clone(),
            ..RunReport::default()
        };

        if let Some(gc) = &self.gc {
            let last = gc.finish();
            if last.counts.total == 0 {
                warn!("No A, T, C or G bases in the final GC window; its GC content is undefined");
            }
            write_final_report(&mut self.report, &last).context("Unable to write report")?;
            run.final_window = Some(last);
        }

        if let Some(m) = &self.matcher {
            write_match_report(&mut self.report, m.query(), m.occurrences())
                .context("Unable to write report")?;
            run.query = Some(String::from_utf8_lossy(m.query()).into_owned());
            run.occurrences = Some(m.occurrences());
        }

        self.report.flush().context("Unable to write report")?;
        if let Some(merge) = self.merge.as_mut() {
            merge.flush().context("Unable to write merge file")?;
        }

        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MERGED_HEADER;
    use indoc::indoc;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn base_config() -> RunConfig {
        RunConfig {
            input: PathBuf::from("in.fa"),
            gc_window: None,
            query: None,
            merge: None,
            output: None,
            selectors: None,
            print: false,
            summary: None,
        }
    }

    /// Runs a scan over `fasta`, returning the report text, the merge output and the
    /// run report.
    fn scan_str(config: &RunConfig, fasta: &str, merge: bool) -> (String, String, RunReport) {
        let mut report = Vec::new();
        let mut merged = MERGED_HEADER.to_vec();
        merged.push(b'\n');

        let mut tokens = TokenReader::new(Cursor::new(fasta.as_bytes().to_vec()));
        let scanner = RecordScanner::new(config, &mut report, merge.then_some(&mut merged));
        let run = scanner.scan(&mut tokens).unwrap();

        (
            String::from_utf8(report).unwrap(),
            String::from_utf8(merged).unwrap(),
            run,
        )
    }

    #[test]
    fn gc_chunks_over_two_records() {
        let config = RunConfig {
            gc_window: Some(4),
            ..base_config()
        };
        let (report, _, run) = scan_str(&config, ">a\nAATT\n>b\nCCGG\n", false);

        assert_eq!(
            report,
            indoc! {"
                Chunk number: 1 A: 2 T: 2 C: 0 G:0
                Chunk: 1 GC content: 0.000000

                Total size of final chunk: 4. Chunk num: 2 A: 0 T: 0 C: 2 G:2
                Chunk: 2 GC content: 100.000000

            "}
        );
        assert_eq!(run.chunks, 1);
        assert_eq!(run.final_window.unwrap().gc_percent(), Some(100.0));
    }

    #[test]
    fn match_spans_lines_once() {
        let config = RunConfig {
            query: Some(b"TTT".to_vec()),
            ..base_config()
        };
        let (report, _, run) = scan_str(&config, "AATT\nTCCA\n", false);

        assert_eq!(report, "Total number of occurences of TTT in the file was 1\n\n");
        assert_eq!(run.occurrences, Some(1));
    }

    #[test]
    fn match_is_case_insensitive() {
        let config = RunConfig {
            query: Some(b"GATC".to_vec()),
            ..base_config()
        };
        let (_, _, run) = scan_str(&config, ">a\ngatcGATCgAtC\n", false);
        assert_eq!(run.occurrences, Some(3));
    }

    #[test]
    fn header_resets_match() {
        let config = RunConfig {
            query: Some(b"GGAA".to_vec()),
            ..base_config()
        };
        let (_, _, run) = scan_str(&config, ">a\nTTGG\n>b\nAATT\n", false);
        assert_eq!(run.occurrences, Some(0));
    }

    #[test]
    fn selection_is_sticky() {
        let config = RunConfig {
            gc_window: Some(0),
            query: Some(b"T".to_vec()),
            selectors: Some(SelectorSet::parse("foo")),
            ..base_config()
        };
        let (report, _, run) = scan_str(&config, ">foo\nACGT\n>bar\nTTTT\n", false);

        let last = run.final_window.unwrap();
        assert_eq!(last.counts.total, 4);
        assert_eq!(last.counts.t, 1);
        assert_eq!(run.occurrences, Some(1));
        assert_eq!(run.stats.headers, 2);
        assert_eq!(run.stats.selected_records, 1);
        assert_eq!(run.stats.body_lines, 1);
        assert!(report.starts_with("Total size of final chunk: 4. Chunk num: 1 A: 1 T: 1 C: 1 G:1\n"));
    }

    #[test]
    fn states() {
        let config = RunConfig {
            selectors: Some(SelectorSet::parse("keep")),
            print: true,
            ..base_config()
        };
        let mut out = Vec::new();
        let mut scanner: RecordScanner<_, Vec<u8>> = RecordScanner::new(&config, &mut out, None);
        assert_eq!(scanner.state, ScanState::AwaitHeader);

        scanner.handle_token(&mut b">keep".to_vec()).unwrap();
        assert_eq!(scanner.state, ScanState::InSelectedBody);

        scanner.handle_token(&mut b"ACGT".to_vec()).unwrap();
        assert_eq!(scanner.state, ScanState::InSelectedBody);

        scanner.handle_token(&mut b">drop".to_vec()).unwrap();
        assert_eq!(scanner.state, ScanState::InSkippedBody);

        scanner.handle_token(&mut b"ACGT".to_vec()).unwrap();
        assert_eq!(scanner.state, ScanState::InSkippedBody);
    }

    #[test]
    fn empty_selector_skips_everything() {
        let config = RunConfig {
            gc_window: Some(0),
            selectors: Some(SelectorSet::parse("")),
            ..base_config()
        };
        let (report, _, run) = scan_str(&config, ">a\nACGT\n>b\nGGCC\n", false);
        assert_eq!(
            report,
            indoc! {"
                Total size of final chunk: 0. Chunk num: 1 A: 0 T: 0 C: 0 G:0
                Chunk: 1 GC content: undefined

            "}
        );
        assert_eq!(run.final_window.unwrap().counts.total, 0);
        assert_eq!(run.stats.selected_records, 0);
    }

    #[test]
    fn body_before_first_header() {
        let config = RunConfig {
            gc_window: Some(0),
            ..base_config()
        };
        let (_, _, run) = scan_str(&config, "GG\n>a\nAA\n", false);
        assert_eq!(run.final_window.unwrap().counts.total, 4);

        let config = RunConfig {
            gc_window: Some(0),
            selectors: Some(SelectorSet::parse("a")),
            ..base_config()
        };
        let (_, _, run) = scan_str(&config, "GG\n>a\nAA\n", false);
        assert_eq!(run.final_window.unwrap().counts.total, 2);
    }

    #[test]
    fn merge_keeps_raw_lines_without_headers() {
        let config = RunConfig {
            merge: Some(PathBuf::from("merged.fa")),
            selectors: Some(SelectorSet::parse("a,c")),
            ..base_config()
        };
        let (report, merged, _) = scan_str(&config, ">a\nacgt\n>b\nTTTT\n>c\nGGnn\n", true);

        assert_eq!(report, "");
        assert_eq!(merged, ">Sequences_Merged\nacgt\nGGnn\n");
    }

    #[test]
    fn print_echoes_selected_records() {
        let config = RunConfig {
            print: true,
            query: Some(b"AC".to_vec()),
            selectors: Some(SelectorSet::parse("b")),
            ..base_config()
        };
        let (report, _, _) = scan_str(&config, ">a\nACAC\n>b\nacgt\n", false);

        assert_eq!(
            report,
            indoc! {"
                >b
                acgt
                Total number of occurences of AC in the file was 1

            "}
        );
    }

    #[test]
    fn all_ambiguous_final_window_is_undefined() {
        let config = RunConfig {
            gc_window: Some(2),
            ..base_config()
        };
        let (report, _, run) = scan_str(&config, ">a\nNNNN\n", false);
        assert_eq!(
            report,
            indoc! {"
                Total size of final chunk: 0. Chunk num: 1 A: 0 T: 0 C: 0 G:0
                Chunk: 1 GC content: undefined

            "}
        );
        let last = run.final_window.unwrap();
        assert_eq!(last.index, 1);
        assert_eq!(last.gc_percent(), None);
        assert_eq!(run.stats.bases, 4);
    }

    #[test]
    fn empty_file() {
        let config = RunConfig {
            query: Some(b"A".to_vec()),
            ..base_config()
        };
        let (report, _, run) = scan_str(&config, "", false);
        assert_eq!(report, "Total number of occurences of A in the file was 0\n\n");
        assert_eq!(run.stats, ScanStats::default());
    }
}
