/// The comma-separated selector tokens passed with `--seq`.
///
/// Each token is compared against the literal header text with a leading `>`, so the
/// token `seq1` selects only the header `>seq1`. Numeric tokens are not record indices
/// in any positional sense: `3` selects a header that reads exactly `>3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorSet {
    tokens: Vec<String>,
}

impl SelectorSet {
    /// Parses a selector string. Empty tokens (`a,,b`, a trailing `,`) are dropped, and an
    /// empty string gives an empty set which selects nothing.
    pub fn parse(selectors: &str) -> Self {
        Self {
            tokens: selectors
                .split(',')
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// Whether `header` (including its `>`) equals `>` followed by one of the tokens.
    pub fn matches(&self, header: &[u8]) -> bool {
        match header.strip_prefix(b">") {
            Some(name) => self.tokens.iter().any(|t| t.as_bytes() == name),
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl std::fmt::Display for SelectorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.tokens.join(","))
    }
}
