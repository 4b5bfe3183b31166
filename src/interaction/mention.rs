//! Text scanning for mention tokens and forwarded-message attribution.

use once_cell::sync::Lazy;
use regex::Regex;

static MENTION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").expect("valid mention regex"));

static AUTHOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"by (\w+ \w+)").expect("valid author regex"));

/// Every `@word` token in `text`, left to right. Duplicates are preserved;
/// tokens are raw slices and are not guaranteed to resolve to anyone.
pub fn extract_mentions(text: &str) -> Vec<&str> {
    MENTION_REGEX.find_iter(text).map(|m| m.as_str()).collect()
}

/// The two-word name following the first `by ` in the pretext of a forwarded
/// message, e.g. `"Posted by Jane Doe"` yields `"Jane Doe"`.
pub fn extract_author(pretext: Option<&str>) -> Option<String> {
    pretext.and_then(|p| AUTHOR_REGEX.captures(p)).map(|captures| captures[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_mentions_in_order() {
        assert_eq!(extract_mentions("@alice please sync with @bob_smith re @alice"), vec!["@alice", "@bob_smith", "@alice"]);
    }

    #[test]
    fn returns_no_mentions_for_plain_text() {
        assert!(extract_mentions("nothing at all").is_empty());
    }

    #[test]
    fn matches_at_sign_inside_words() {
        // The token pattern does not anchor on word boundaries, so an email
        // address contributes its domain as a (usually unresolvable) token.
        assert_eq!(extract_mentions("mail me at a@b.com"), vec!["@b"]);
    }

    #[test]
    fn mention_stops_at_non_word_characters() {
        assert_eq!(extract_mentions("ping @jane.doe now"), vec!["@jane"]);
    }

    #[test]
    fn extracts_author_from_pretext() {
        assert_eq!(extract_author(Some("Shared by Jane Doe in #ops")), Some("Jane Doe".to_string()));
    }

    #[test]
    fn uses_first_author_match_only() {
        assert_eq!(extract_author(Some("by Jane Doe and later by Al Bo")), Some("Jane Doe".to_string()));
    }

    #[test]
    fn author_requires_two_words() {
        assert_eq!(extract_author(Some("posted by Jane")), None);
    }

    #[test]
    fn missing_pretext_yields_no_author() {
        assert_eq!(extract_author(None), None);
    }
}
