/// Counts occurrences of a query across consecutive sequence lines of a record.
///
/// Every occurrence is counted once, at the line holding its last byte. An occurrence may
/// start in the previous line of the same record, but never in an earlier record: the
/// previous line is cleared on every header.
#[derive(Debug, Clone)]
pub struct MatchState {
    query: Vec<u8>,
    prev: Vec<u8>,
    occurrences: u64,
}

impl MatchState {
    /// `query` must already be normalized. An empty query never matches.
    pub fn new(query: Vec<u8>) -> Self {
        Self {
            query,
            prev: Vec::new(),
            occurrences: 0,
        }
    }

    /// Forget the previous line; called at every header.
    pub fn reset(&mut self) {
        self.prev.clear();
    }

    /// Counts the occurrences ending in `curr`, adds them to the running total and makes
    /// `curr` the previous line for the next call.
    pub fn observe(&mut self, curr: &[u8]) -> u64 {
        let n = self.count(curr);
        self.occurrences += n;
        self.prev.clear();
        self.prev.extend_from_slice(curr);
        n
    }

    /// Counts the occurrences ending in `curr` without changing any state.
    ///
    /// With no previous line, only end positions from `len(query) - 1` onwards can hold a
    /// full occurrence; otherwise every position of `curr` is a candidate.
    pub fn count(&self, curr: &[u8]) -> u64 {
        let Some(last) = self.query.len().checked_sub(1) else {
            return 0;
        };
        let first_end = if self.prev.is_empty() { last } else { 0 };

        (first_end..curr.len())
            .filter(|&end| self.ends_at(curr, end))
            .count() as u64
    }

    /// Walks the query backward from `end`, stepping from `curr` into the tail of the
    /// previous line once `end` is passed.
    fn ends_at(&self, curr: &[u8], end: usize) -> bool {
        self.query
            .iter()
            .rev()
            .enumerate()
            .all(|(back, &want)| self.byte_before(curr, end, back) == Some(want))
    }

    /// The byte `back` positions before `end`, or `None` if that runs off the start of the
    /// previous line.
    #[inline(always)]
    fn byte_before(&self, curr: &[u8], end: usize, back: usize) -> Option<u8> {
        match end.checked_sub(back) {
            Some(i) => curr.get(i).copied(),
            None => {
                // an overhang of 1 maps to prev[len - 1], its last byte
                let overhang = back - end;
                self.prev
                    .len()
                    .checked_sub(overhang)
                    .map(|i| self.prev[i])
            }
        }
    }

    pub fn query(&self) -> &[u8] {
        &self.query
    }

    pub fn occurrences(&self) -> u64 {
        self.occurrences
    }
}
