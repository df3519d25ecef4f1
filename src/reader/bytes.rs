use std::io::{BufRead, BufReader, Read};

pub type GenericBufReader = BufReader<Box<dyn Read>>;

/// Splits a buffered byte stream into whitespace-delimited tokens, the way the records of
/// a single-line FASTA file are consumed: each header and each sequence line is one token.
pub struct TokenReader<R: BufRead> {
    reader: R,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Hands `f` every slice of the buffer up to (but not including) the first byte for
    /// which `stop` is true. The stop byte is left in the buffer.
    ///
    /// Returns `Some(n)` with the number of bytes consumed if a stop byte was found, or
    /// `None` if the end of the stream was reached first.
    fn apply_on_slice_until<P, F>(&mut self, mut stop: P, mut f: F) -> std::io::Result<Option<usize>>
    where
        P: FnMut(u8) -> bool,
        F: FnMut(&[u8]),
    {
        let mut read = 0;
        loop {
            let (done, used) = {
                let available = self.reader.fill_buf()?;
                if available.is_empty() {
                    return Ok(None);
                }

                match available.iter().position(|b| stop(*b)) {
                    Some(i) => {
                        f(&available[..i]);
                        (true, i)
                    }
                    None => {
                        f(available);
                        (false, available.len())
                    }
                }
            };

            self.reader.consume(used);
            read += used;

            if done {
                return Ok(Some(read));
            }
        }
    }

    /// Reads the next token into `buf`, replacing its contents.
    ///
    /// Returns `Ok(false)` once the stream holds no further tokens. A token that runs up
    /// to the end of the stream without trailing whitespace is still returned.
    pub fn next_token(&mut self, buf: &mut Vec<u8>) -> std::io::Result<bool> {
        buf.clear();

        // skip leading whitespace, including blank lines
        if self
            .apply_on_slice_until(|b| !b.is_ascii_whitespace(), |_| ())?
            .is_none()
        {
            return Ok(false);
        }

        self.apply_on_slice_until(|b| b.is_ascii_whitespace(), |x| buf.extend_from_slice(x))?;
        Ok(!buf.is_empty())
    }
}
