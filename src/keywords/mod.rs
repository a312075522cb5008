// src/keywords/mod.rs
// =============================================================================
// Keyword logic: everything that looks at words rather than pages.
//
// Submodules:
// - classify: URL / email / ordinary token classification
// - extract: per-page keyword extraction
// - postfilter: whole-crawl splitting and cleanup
// =============================================================================

mod classify;
mod extract;
mod postfilter;

pub use extract::{extract_keywords, ExtractOptions};
pub use postfilter::post_filter;
