use crate::config::ConfigErr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub mod bytes;

pub use self::bytes::{GenericBufReader, TokenReader};

pub type FastaTokens = TokenReader<GenericBufReader>;

/// Opens a FASTA file for token-by-token reading.
///
/// # Errors
///
/// Returns `ConfigErr::MissingInputFile` if the file cannot be opened. This is checked
/// before any output file is created, so a bad input path never truncates an output.
pub fn open(path: &Path) -> Result<FastaTokens, ConfigErr> {
    let file = File::open(path).map_err(|source| ConfigErr::MissingInputFile {
        path: path.to_path_buf(),
        source,
    })?;

    let reader: GenericBufReader = BufReader::new(Box::new(file) as Box<dyn Read>);
    Ok(TokenReader::new(reader))
}
