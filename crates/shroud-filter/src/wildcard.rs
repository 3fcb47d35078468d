//! Name normalisation and the general wildcard matcher.
//!
//! A pattern is compiled once, when the rule set is built, into an anchored
//! case-insensitive regex where `*` matches any run of characters and every
//! other character is literal.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// The wildcard marker.
pub const WILDCARD: char = '*';

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new("<[^>]*>").unwrap());

/// Normalise a display name for matching: strip markup tags, turn
/// non-breaking spaces into spaces, trim, lower-case.
pub fn standardize(name: &str) -> String {
    TAG.replace_all(name, "")
        .replace('\u{00A0}', " ")
        .trim()
        .to_lowercase()
}

/// Translate a wildcard pattern into an anchored regex source string.
fn wildcard_to_regex(pattern: &str) -> String {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push('^');
    for (i, literal) in pattern.split(WILDCARD).enumerate() {
        if i > 0 {
            source.push_str(".*");
        }
        source.push_str(&regex::escape(literal));
    }
    source.push('$');
    source
}

/// A compiled, case-insensitive wildcard pattern.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    raw: String,
    regex: Regex,
}

impl WildcardPattern {
    /// Compile `pattern`. The raw text is kept as given.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(&wildcard_to_regex(pattern))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            raw: pattern.to_string(),
            regex,
        })
    }

    /// The pattern text this matcher was compiled from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns `true` if the pattern contains at least one wildcard.
    pub fn has_wildcard(&self) -> bool {
        self.raw.contains(WILDCARD)
    }

    /// Whole-string match against `text`.
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for WildcardPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(p: &str) -> WildcardPattern {
        WildcardPattern::new(p).unwrap()
    }

    #[test]
    fn test_plain_pattern_is_exact() {
        let p = pattern("goblin");
        assert!(p.matches("goblin"));
        assert!(p.matches("GOBLIN"));
        assert!(!p.matches("goblins"));
        assert!(!p.has_wildcard());
    }

    #[test]
    fn test_trailing_wildcard_is_prefix() {
        let p = pattern("drag*");
        assert!(p.matches("dragon"));
        assert!(p.matches("dragon champion"));
        assert!(!p.matches("black dragon"));
    }

    #[test]
    fn test_surrounding_wildcards_are_contains() {
        let p = pattern("*imp*");
        assert!(p.matches("imp"));
        assert!(p.matches("deformed imp"));
        assert!(p.matches("important"));
        assert!(!p.matches("goblin"));
    }

    #[test]
    fn test_inner_wildcard_anchors_both_ends() {
        let p = pattern("a*b");
        assert!(p.matches("ab"));
        assert!(p.matches("a long b"));
        assert!(!p.matches("abc"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let p = pattern("k'ril (tsutsaroth)");
        assert!(p.matches("k'ril (tsutsaroth)"));
        assert!(!p.matches("k'ril tsutsaroth"));
        assert!(!pattern("a.c").matches("abc"));
    }

    #[test]
    fn test_standardize() {
        assert_eq!(standardize("<col=ff0000>Dragon</col>"), "dragon");
        assert_eq!(standardize("  Black\u{00A0}Demon "), "black demon");
        assert_eq!(standardize(""), "");
    }
}
