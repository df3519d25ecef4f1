use crate::seq::Base;
use serde::Serialize;

/// Per-window nucleotide counts. `total` is always `a + t + c + g`; bytes that are not
/// one of the four bases are never counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BaseCounts {
    pub a: u64,
    pub t: u64,
    pub c: u64,
    pub g: u64,
    pub total: u64,
}

impl BaseCounts {
    #[inline(always)]
    fn add(&mut self, base: Base) {
        match base {
            Base::A => self.a += 1,
            Base::T => self.t += 1,
            Base::C => self.c += 1,
            Base::G => self.g += 1,
        }
        self.total += 1;
    }

    /// GC content as a percentage of the counted bases, or `None` for a window with no
    /// counted bases (where the ratio is undefined).
    ///
    /// The ratio is taken in single precision, so repeating fractions print as
    /// `33.333336` rather than `33.333333`.
    pub fn gc_percent(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        let pct = ((self.c + self.g) as f32) / (self.total as f32) * 100.0;
        Some(pct as f64)
    }
}

/// Counts for one window, tagged with its 1-based chunk number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkReport {
    pub index: usize,
    pub counts: BaseCounts,
}

impl ChunkReport {
    pub fn gc_percent(&self) -> Option<f64> {
        self.counts.gc_percent()
    }
}

/// Running GC window over the normalized sequence lines of a run.
///
/// A `chunk_size` of 0 means one global window covering the whole file: no chunk is ever
/// closed and the only report is the one produced by [`GcWindow::finish`].
#[derive(Debug, Clone)]
pub struct GcWindow {
    counts: BaseCounts,
    chunk_size: u64,
    index: usize,
}

impl GcWindow {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            counts: BaseCounts::default(),
            chunk_size: chunk_size as u64,
            index: 1,
        }
    }

    /// Consumes one byte. A full chunk is closed lazily, when the byte after its last
    /// counted base arrives, so a chunk that ends exactly at the end of the file is left
    /// for [`GcWindow::finish`].
    pub fn push(&mut self, b: u8) -> Option<ChunkReport> {
        let mut closed = None;

        if self.chunk_size != 0 && self.counts.total == self.chunk_size {
            closed = Some(ChunkReport {
                index: self.index,
                counts: std::mem::take(&mut self.counts),
            });
            self.index += 1;
        }

        if let Some(base) = Base::from_ascii(b) {
            self.counts.add(base);
        }

        closed
    }

    /// Feeds a normalized line through the window, yielding each chunk closed on the way.
    ///
    /// The returned iterator is lazy: bytes are only consumed as it is advanced, so it
    /// must be run to completion for the whole line to be counted.
    #[must_use = "the line is only consumed as the iterator is advanced"]
    pub fn observe<'a>(&'a mut self, line: &'a [u8]) -> Observe<'a> {
        Observe {
            window: self,
            bytes: line.iter(),
        }
    }

    /// The report for the window still open at the end of the stream. It may be partial,
    /// or hold no counted bases at all.
    pub fn finish(&self) -> ChunkReport {
        ChunkReport {
            index: self.index,
            counts: self.counts.clone(),
        }
    }
}

/// Iterator returned by [`GcWindow::observe`].
pub struct Observe<'a> {
    window: &'a mut GcWindow,
    bytes: std::slice::Iter<'a, u8>,
}

impl Iterator for Observe<'_> {
    type Item = ChunkReport;

    fn next(&mut self) -> Option<ChunkReport> {
        for &b in self.bytes.by_ref() {
            if let Some(report) = self.window.push(b) {
                return Some(report);
            }
        }
        None
    }
}
