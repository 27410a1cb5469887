//! Recognition of text tokens which mean "no value present".

use std::fmt::Debug;

use ahash::AHashSet;

/// The tokens treated as missing when no custom set is configured.
pub const DEFAULT_MISSING_TOKENS: &[&str] = &["NaN", "*", "NA", "null"];

/// Decides whether a raw cell should be treated as a missing value.
///
/// Ingestion calls this before attempting to parse the cell, the empty
/// string is always treated as missing and never reaches the indicator.
pub trait MissingIndicator: Debug + Send + Sync {
    fn is_missing_token(&self, text: &str) -> bool;
}

#[derive(Debug, Clone)]
/// A fixed set of exact-match missing value tokens.
pub struct MissingTokens {
    tokens: AHashSet<Box<str>>,
}

impl MissingTokens {
    /// Creates a new token set from the given tokens.
    ///
    /// Tokens are matched exactly, including case and surrounding whitespace.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Box<str>>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the number of distinct tokens in the set.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if no tokens are registered.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for MissingTokens {
    fn default() -> Self {
        Self::new(DEFAULT_MISSING_TOKENS.iter().copied())
    }
}

impl MissingIndicator for MissingTokens {
    #[inline]
    fn is_missing_token(&self, text: &str) -> bool {
        self.tokens.contains(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case("NaN", true)]
    #[case("*", true)]
    #[case("NA", true)]
    #[case("null", true)]
    #[case("NULL", false)]
    #[case(" NA", false)]
    #[case("12", false)]
    fn test_default_tokens(#[case] text: &str, #[case] expected: bool) {
        let tokens = MissingTokens::default();
        assert_eq!(tokens.is_missing_token(text), expected);
    }

    #[test]
    fn test_custom_tokens_replace_defaults() {
        let tokens = MissingTokens::new(["missing", "-"]);
        assert_eq!(tokens.len(), 2);
        assert!(tokens.is_missing_token("missing"));
        assert!(tokens.is_missing_token("-"));
        assert!(!tokens.is_missing_token("NaN"));
    }
}
