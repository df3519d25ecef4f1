use crate::cli::Cli;
use crate::select::SelectorSet;
use crate::seq::normalize;
use std::path::PathBuf;
use thiserror::Error;

/// A validated set of options for one scan.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    /// GC window size; 0 is one global window
    pub gc_window: Option<usize>,
    /// normalized match query, never empty
    pub query: Option<Vec<u8>>,
    pub merge: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub selectors: Option<SelectorSet>,
    pub print: bool,
    pub summary: Option<PathBuf>,
}

impl RunConfig {
    /// Whether anything would be produced for the input. Selection and output
    /// redirection only shape what the other options do.
    fn has_analysis(&self) -> bool {
        self.gc_window.is_some() || self.query.is_some() || self.merge.is_some() || self.print
    }

    pub fn query_str(&self) -> Option<String> {
        self.query
            .as_ref()
            .map(|q| String::from_utf8_lossy(q).into_owned())
    }

    /// Logs what the run is going to do.
    pub fn log_plan(&self) {
        info!("File {} passed in", self.input.display());

        match self.gc_window {
            Some(0) => info!("Calculating global GC content"),
            Some(n) => info!("Calculating GC content per {n} nucleotides"),
            None => (),
        }
        if let Some(q) = self.query_str() {
            info!("Searching for all instances of {q} in file");
        }
        if let Some(path) = &self.merge {
            info!("Merging sequences into file {}", path.display());
        }
        if self.print {
            info!("Printing selected records");
        }
        match &self.selectors {
            Some(s) if s.is_empty() => warn!("The --seq selector is empty; no record will be selected"),
            Some(s) => info!("Carrying out operations only on selected sequences: {s}"),
            None => (),
        }
        if let Some(path) = &self.output {
            info!("Writing output into file {}", path.display());
        }
    }
}

impl TryFrom<&Cli> for RunConfig {
    type Error = ConfigErr;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let input = cli.file.clone().ok_or(ConfigErr::NoInputFile)?;

        let query = match &cli.query {
            Some(q) if q.is_empty() => return Err(ConfigErr::EmptyQuery),
            Some(q) => {
                let mut q = q.clone().into_bytes();
                normalize(&mut q);
                Some(q)
            }
            None => None,
        };

        let config = RunConfig {
            input,
            gc_window: cli.gc,
            query,
            merge: cli.merge.clone(),
            output: cli.output.clone(),
            selectors: cli.selectors.as_deref().map(SelectorSet::parse),
            print: cli.print,
            summary: cli.summary.clone(),
        };

        if !config.has_analysis() {
            return Err(ConfigErr::NoAnalysisSelected);
        }
        Ok(config)
    }
}

#[derive(Error, Debug)]
pub enum ConfigErr {
    #[error("a fasta file must be passed in with --file. see --help for usage")]
    NoInputFile,

    #[error("the fasta file {path:?} could not be opened")]
    MissingInputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "no process selected: pass at least one of
    --gc, --match, --merge, --print
--seq and --out only shape the output of those. see --help for usage"
    )]
    NoAnalysisSelected,

    #[error("the --match query must not be empty")]
    EmptyQuery,
}
