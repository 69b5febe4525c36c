//! Pattern compilation for body-composition and metadata searches.

use crate::store::error::{StoreError, StoreResult};
use crate::utils::is_body_symbol;
use regex::{Regex, RegexBuilder};

/// Sub-pattern substituted for each `*` wildcard: zero or more letters
const WILDCARD_EXPANSION: &str = "[A-Za-z]*";

/// A compiled body-composition pattern
#[derive(Debug, Clone)]
pub struct CompositionPattern {
    source: String,
    regex: Regex,
}

impl CompositionPattern {
    /// Compile a composition pattern.
    ///
    /// Without `wildcard`, every character must be a body symbol and the pattern
    /// matches as a literal substring. With `wildcard`, each `*` matches any run of
    /// letters (including none) and the remaining text is matched literally.
    pub fn compile(pattern: &str, wildcard: bool) -> StoreResult<Self> {
        let expr = if wildcard {
            pattern
                .split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(WILDCARD_EXPANSION)
        } else {
            if let Some(symbol) = pattern.chars().find(|&c| !is_body_symbol(c)) {
                return Err(StoreError::BadNucleobase { symbol });
            }
            pattern.to_string()
        };

        // Escaped input can only fail on the compiled size limit
        let regex = Regex::new(&expr)?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Test a body line
    pub fn is_match(&self, body: &str) -> bool {
        self.regex.is_match(body)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Build a case-insensitive whole-word matcher for metadata text
pub fn metadata_matcher(text: &str) -> StoreResult<Regex> {
    let regex = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(text)))
        .case_insensitive(true)
        .build()?;
    Ok(regex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::error::ErrorKind;

    #[test]
    fn test_literal_pattern() {
        let p = CompositionPattern::compile("ACGT", false).unwrap();
        assert!(p.is_match("TTACGTTT"));
        assert!(!p.is_match("ACGGT"));
        assert_eq!(p.as_str(), "ACGT");
    }

    #[test]
    fn test_literal_rejects_non_symbol() {
        let err = CompositionPattern::compile("AC*GT", false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadNucleobase);
        assert!(matches!(err, StoreError::BadNucleobase { symbol: '*' }));

        let err = CompositionPattern::compile("AC1G-", false).unwrap_err();
        assert!(matches!(err, StoreError::BadNucleobase { symbol: '1' }));
    }

    #[test]
    fn test_wildcard_pattern() {
        let p = CompositionPattern::compile("AC*GT", true).unwrap();
        assert!(p.is_match("ACGT"));
        assert!(p.is_match("TTACTTTTGTAA"));
        assert!(!p.is_match("GTAC"));
        assert!(!p.is_match("ACAAA"));
    }

    #[test]
    fn test_wildcard_escapes_literals() {
        let p = CompositionPattern::compile("A.*C", true).unwrap();
        assert!(!p.is_match("AXC"));
        assert!(p.is_match("A.GGC"));
    }

    #[test]
    fn test_metadata_matcher_word_boundary() {
        let re = metadata_matcher("kingdom").unwrap();
        assert!(re.is_match(">NR_1.1 Bacteria KINGDOM sample"));
        assert!(re.is_match(">NR_1.1 kingdom"));
        assert!(!re.is_match(">NR_1.1 Kingdom2 sample"));
        assert!(!re.is_match(">NR_1.1 subkingdom sample"));
    }

    #[test]
    fn test_metadata_matcher_escapes_text() {
        let re = metadata_matcher("sp.").unwrap();
        assert!(!re.is_match(">NR_1.1 spx"));
    }
}
