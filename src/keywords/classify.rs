// src/keywords/classify.rs
// =============================================================================
// Decides what kind of thing a single token is.
//
// A token is one of:
// - Url:      starts with a known scheme prefix (http://, https://, ...)
// - Email:    looks like local-part@domain.tld
// - Ordinary: anything else, i.e. a keyword candidate
//
// This is a pure function with no state. Callers decide what to do with
// each kind (the extractor drops URLs, and drops emails unless told not to).
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;

// Scheme prefixes that mark a token as a URL.
// The match is case-sensitive and protocol-relative ("//host") is not a URL.
const URL_PREFIXES: &[&str] = &[
    "http://",
    "https://",
    "ftp://",
    "ftps://",
    "mailto://",
    "unix://",
];

// Local part: alphanumeric segments joined by '.', '-' or '_'.
// Domain: any number of labels, but only the final 2+ letter label is checked.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9]+(?:[._-][a-zA-Z0-9]+)*@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*\.[a-zA-Z]{2,}$")
        .expect("email pattern is valid")
});

/// What a token turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ordinary,
    Url,
    Email,
}

/// Classifies a single (already stripped) token.
///
/// URL detection wins over email detection, so `mailto://a@b.com` is a URL.
pub fn classify(token: &str) -> TokenKind {
    if is_url(token) {
        TokenKind::Url
    } else if is_email(token) {
        TokenKind::Email
    } else {
        TokenKind::Ordinary
    }
}

// True if the token starts with one of the URL scheme prefixes
pub fn is_url(token: &str) -> bool {
    URL_PREFIXES.iter().any(|prefix| token.starts_with(prefix))
}

// True if the whole token matches the email pattern
pub fn is_email(token: &str) -> bool {
    EMAIL_PATTERN.is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scheme_prefix_is_a_url() {
        for prefix in URL_PREFIXES {
            let token = format!("{}example.com/path", prefix);
            assert_eq!(classify(&token), TokenKind::Url, "{}", token);
        }
    }

    #[test]
    fn test_scheme_match_is_case_sensitive() {
        assert_eq!(classify("HTTPS://example.com"), TokenKind::Ordinary);
    }

    #[test]
    fn test_protocol_relative_is_not_a_url() {
        assert_eq!(classify("//cdn.example.com/app.js"), TokenKind::Ordinary);
    }

    #[test]
    fn test_simple_email() {
        assert_eq!(classify("foo@bar.com"), TokenKind::Email);
        assert_eq!(classify("first.last-name_x@example.org"), TokenKind::Email);
    }

    #[test]
    fn test_multi_label_domain_email() {
        assert_eq!(classify("admin@mail.example.co.uk"), TokenKind::Email);
    }

    #[test]
    fn test_not_an_email() {
        assert_eq!(classify("foo@bar"), TokenKind::Ordinary);
        assert_eq!(classify("@bar.com"), TokenKind::Ordinary);
        assert_eq!(classify("foo@bar.c"), TokenKind::Ordinary);
        assert_eq!(classify("foo@bar.com/extra"), TokenKind::Ordinary);
    }

    #[test]
    fn test_url_wins_over_email() {
        assert_eq!(classify("mailto://foo@bar.com"), TokenKind::Url);
    }

    #[test]
    fn test_plain_word() {
        assert_eq!(classify("keyword"), TokenKind::Ordinary);
        assert_eq!(classify("2024"), TokenKind::Ordinary);
    }
}
