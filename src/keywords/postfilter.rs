// src/keywords/postfilter.rs
// =============================================================================
// Second pass over the whole crawl's vocabulary.
//
// The per-page extractor only trims the ends of a token, so compound tokens
// like "well-known/path" survive it. This pass splits those apart:
// - emails are kept untouched
// - a token containing anything outside [a-zA-Z0-9äüö] goes to the ignored
//   set as a whole, and its pieces are kept if they are long enough
// - empty pieces are recorded as ignored, short pieces are dropped
//
// Running it again on its own output changes nothing.
// =============================================================================

use std::collections::{BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use super::classify::is_email;

// Runs of characters that split a compound keyword
static SEPARATOR_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9äüö]+").expect("separator pattern is valid"));

/// Output of the post-filter pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PostFiltered {
    pub keywords: BTreeSet<String>,
    pub ignored: HashSet<String>,
}

// Splits and cleans the collected keywords
//
// Parameters:
//   keywords: every keyword gathered during the crawl (duplicates are fine)
//   min_length: minimum length in characters for a split piece
pub fn post_filter<I, S>(keywords: I, min_length: usize) -> PostFiltered
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result = PostFiltered::default();

    for keyword in keywords {
        let keyword = keyword.as_ref();

        if is_email(keyword) {
            result.keywords.insert(keyword.to_string());
            continue;
        }

        if !SEPARATOR_RUN.is_match(keyword) {
            result.keywords.insert(keyword.to_string());
            continue;
        }

        result.ignored.insert(keyword.to_string());

        for piece in SEPARATOR_RUN.split(keyword) {
            if piece.is_empty() {
                result.ignored.insert(String::new());
            } else if piece.chars().count() >= min_length {
                result.keywords.insert(piece.to_string());
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_compound_tokens() {
        let result = post_filter(["well-known/path"], 4);

        assert!(result.keywords.contains("well"));
        assert!(result.keywords.contains("known"));
        assert!(result.keywords.contains("path"));
        assert!(!result.keywords.contains("well-known/path"));
        assert!(result.ignored.contains("well-known/path"));
    }

    #[test]
    fn test_short_pieces_are_dropped_silently() {
        let result = post_filter(["e-commerce"], 4);

        assert_eq!(result.keywords.len(), 1);
        assert!(result.keywords.contains("commerce"));
        assert!(!result.ignored.contains("e"));
    }

    #[test]
    fn test_emails_are_kept_whole() {
        let result = post_filter(["first.last@example.com"], 4);

        assert!(result.keywords.contains("first.last@example.com"));
        assert!(result.ignored.is_empty());
    }

    #[test]
    fn test_umlauts_are_allowed() {
        let result = post_filter(["Grüße", "Müller"], 3);

        // ß is not in the allowed set, ü is
        assert!(result.keywords.contains("Grü"));
        assert!(result.keywords.contains("Müller"));
        assert!(result.ignored.contains("Grüße"));
    }

    #[test]
    fn test_empty_piece_is_ignored() {
        // Split on a trailing separator leaves an empty last piece
        let result = post_filter(["café"], 3);

        assert!(result.keywords.contains("caf"));
        assert!(result.ignored.contains(""));
        assert!(result.ignored.contains("café"));
    }

    #[test]
    fn test_clean_keywords_pass_through() {
        let result = post_filter(["alpha", "Beta42"], 4);

        assert_eq!(result.keywords.len(), 2);
        assert!(result.ignored.is_empty());
    }

    #[test]
    fn test_fixed_point() {
        let input = ["well-known/path", "admin@corp.example", "Müller", "e-mail"];
        let first = post_filter(input, 4);
        let second = post_filter(first.keywords.iter(), 4);

        assert_eq!(second.keywords, first.keywords);
        assert!(second.ignored.is_empty());
    }
}
