// src/keywords/extract.rs
// =============================================================================
// Turns the visible text of one page into a set of keyword candidates.
//
// How it works:
// 1. Split every text node on whitespace
// 2. Strip leading/trailing characters that are not ASCII letters or digits
// 3. Classify what is left; URLs (and emails, unless included) are ignored
// 4. Keep tokens that are at least `min_length` characters long
//
// Rejected URLs/emails are returned alongside the keywords instead of being
// pushed into some global list, so this stays a pure function.
// =============================================================================

use std::collections::HashSet;

use super::classify::{classify, TokenKind};

/// Options shared by the extractor and the post-filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Minimum keyword length, counted in characters
    pub min_length: usize,
    /// Fold keywords to lowercase before collecting them
    pub lowercase: bool,
    /// Keep email addresses as keywords instead of ignoring them
    pub include_emails: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_length: 4,
            lowercase: false,
            include_emails: false,
        }
    }
}

/// Keywords found on one page, plus the tokens the classifier rejected.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub keywords: HashSet<String>,
    pub ignored: HashSet<String>,
}

// Extracts keywords from a page's text nodes
//
// Parameters:
//   text_nodes: every visible text node of the page (order does not matter)
//   options: length limit, case folding, email handling
//
// Returns: the deduplicated keyword set and the ignored tokens
pub fn extract_keywords<I, S>(text_nodes: I, options: &ExtractOptions) -> Extraction
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut extraction = Extraction::default();

    for node in text_nodes {
        for raw in node.as_ref().split_whitespace() {
            let token = strip_token(raw);

            let rejected = match classify(token) {
                TokenKind::Url => true,
                TokenKind::Email => !options.include_emails,
                TokenKind::Ordinary => false,
            };
            if rejected {
                extraction.ignored.insert(raw.to_string());
                continue;
            }

            // Too short is dropped silently, it is not "ignored" noise
            if token.chars().count() < options.min_length {
                continue;
            }

            let keyword = if options.lowercase {
                token.to_lowercase()
            } else {
                token.to_string()
            };
            extraction.keywords.insert(keyword);
        }
    }

    extraction
}

// Strips leading and trailing characters outside [a-zA-Z0-9]
//
// Examples:
//   "World!"     -> "World"
//   "(foo-bar)," -> "foo-bar"
//   "!!!"        -> ""
pub fn strip_token(raw: &str) -> &str {
    raw.trim_matches(|c: char| !c.is_ascii_alphanumeric())
}
