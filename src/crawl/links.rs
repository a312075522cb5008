// src/crawl/links.rs
// =============================================================================
// Turns the raw href values of a page into absolute same-origin URLs.
//
// "Same origin" here means the same authority: userinfo, host and port.
// The scheme is not compared, so http://example.com/a is followed from
// https://example.com/. The url crate drops a port that is the default for
// the scheme, so http://example.com:80/ counts as the same origin too.
// No normalisation happens: a trailing slash, a query string or a fragment
// all make a distinct URL.
// =============================================================================

use std::collections::HashSet;

use url::Url;

// Resolves hrefs against the page URL and keeps the same-origin ones
//
// Parameters:
//   hrefs: raw href attribute values, possibly relative
//   base: the URL of the page they were found on
//
// Returns: distinct absolute URLs, in the order they first appear
pub fn resolve_links<I, S>(hrefs: I, base: &Url) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for href in hrefs {
        let Some(resolved) = resolve_link(base, href.as_ref()) else {
            continue;
        };

        if !same_origin(&resolved, base) {
            continue;
        }

        let absolute = resolved.to_string();
        if seen.insert(absolute.clone()) {
            links.push(absolute);
        }
    }

    links
}

// Resolves a link (possibly relative) to an absolute URL
fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    base.join(href).ok()
}

// True if both URLs share userinfo, host and port; the scheme is ignored
pub fn same_origin(url: &Url, base: &Url) -> bool {
    url.host_str().is_some()
        && url.host_str() == base.host_str()
        && url.port() == base.port()
        && url.username() == base.username()
        && url.password() == base.password()
}
