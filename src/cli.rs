// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the struct below *is* the argument list, and
// clap generates the parser, --help and --version from it.
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] writes the parser for us
// - Option<T>: flags that may be absent
// =============================================================================

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;

use crate::crawl::CrawlOptions;
use crate::keywords::ExtractOptions;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "keyword-spider",
    version,
    about = "Spider a website and build a keyword wordlist from its rendered text",
    long_about = "keyword-spider crawls a website from a seed URL through a headless browser, \
                  follows same-host links up to a given depth, and writes every distinct \
                  word it finds to results/<host>_<timestamp>.txt."
)]
pub struct Cli {
    /// URL of the website to crawl (e.g., https://example.com)
    #[arg(long)]
    pub url: String,

    /// Number of link hops to follow beyond the seed page
    ///
    /// Depth 0 = just the seed page
    /// Depth 1 = seed page + all same-host pages it links to
    /// etc.
    #[arg(long, default_value_t = 1)]
    pub depth: usize,

    /// Minimum keyword length in characters
    #[arg(long, default_value_t = 4)]
    pub min_length: usize,

    /// Lowercase every keyword before deduplication
    #[arg(long)]
    pub lowercase: bool,

    /// Keep email addresses as keywords instead of ignoring them
    #[arg(long)]
    pub include_emails: bool,

    /// Also write the ignored words to a *_ignored_words.txt file
    #[arg(long)]
    pub track_ignored: bool,

    /// Directory the wordlists are written to
    #[arg(long, default_value = "results")]
    pub output_dir: PathBuf,

    /// Stop after this many fetch attempts (failed fetches count too)
    #[arg(long)]
    pub max_pages: Option<NonZeroUsize>,

    /// Fetch raw HTML over HTTP instead of rendering pages in a browser
    #[arg(long)]
    pub no_browser: bool,

    /// Path to the Chrome/Chromium executable (auto-detected by default)
    #[arg(long)]
    pub chrome_path: Option<PathBuf>,

    /// Per-page timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Show debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            min_length: self.min_length,
            lowercase: self.lowercase,
            include_emails: self.include_emails,
        }
    }

    // --depth counts hops; the walker counts page levels, seed included
    pub fn crawl_options(&self) -> CrawlOptions {
        CrawlOptions {
            levels: self.depth + 1,
            max_pages: self.max_pages.map(NonZeroUsize::get),
            extract: self.extract_options(),
        }
    }
}
