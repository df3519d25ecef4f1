/// One of the four nucleotides counted by the GC accumulator. Anything else (N, IUPAC
/// ambiguity codes, gaps) has no `Base` and is skipped when counting.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Base {
    A,
    T,
    C,
    G,
}

impl Base {
    /// Classifies an already-uppercased byte.
    #[inline(always)]
    pub fn from_ascii(b: u8) -> Option<Self> {
        match b {
            b'A' => Some(Base::A),
            b'T' => Some(Base::T),
            b'C' => Some(Base::C),
            b'G' => Some(Base::G),
            _ => None,
        }
    }
}

/// Uppercases every ASCII lowercase letter of `seq` in place. Other bytes are untouched.
#[inline(always)]
pub fn normalize(seq: &mut [u8]) {
    seq.make_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_mixed_case() {
        let mut v = b"atCGnN-acgt".to_vec();
        normalize(&mut v);
        assert_eq!(v, b"ATCGNN-ACGT".to_vec());
    }

    #[test]
    fn normalize_leaves_non_letters() {
        let mut v = b">seq_1 0.5|x".to_vec();
        normalize(&mut v);
        assert_eq!(v, b">SEQ_1 0.5|X".to_vec());
    }

    #[test]
    fn classify() {
        assert_eq!(Base::from_ascii(b'A'), Some(Base::A));
        assert_eq!(Base::from_ascii(b'G'), Some(Base::G));
        assert_eq!(Base::from_ascii(b'N'), None);
        // classification expects normalized input
        assert_eq!(Base::from_ascii(b'c'), None);
    }
}
