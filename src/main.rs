// src/main.rs
// =============================================================================
// This is the entry point of keyword-spider.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Validate the seed URL and prepare the output directory
// 3. Start a fetcher (headless browser, or plain HTTP with --no-browser)
// 4. Crawl, post-filter the collected keywords, write the wordlists
// 5. Exit with a proper code:
//      0 = success
//      1 = output directory could not be created (permission denied)
//      2 = any other error, including "not a single page could be fetched"
//
// Rust concepts:
// - async/await: the crawl waits on the browser without blocking the runtime
// - Result<T, E> and `?`: errors travel up to run() and become exit codes
// - Generics: spider() works with any PageFetcher
// =============================================================================

mod cli;
mod crawl;
mod keywords;
mod logging;
mod output;

use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use clap::Parser;
use serde::Serialize;
use url::Url;

use cli::Cli;
use crawl::{
    crawl, BrowserConfig, BrowserFetcher, CrawlReport, FetchFailure, HttpFetcher, PageFetcher,
};
use keywords::post_filter;
use output::OutputError;

// Final numbers for one run, printed as text or JSON
#[derive(Debug, Serialize)]
struct RunSummary {
    seed: String,
    pages_fetched: usize,
    keywords: usize,
    ignored: usize,
    failures: Vec<FetchFailure>,
    keywords_file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    ignored_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[!] Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// The main application logic
//
// Returns Ok(exit code) for handled outcomes, Err for unexpected errors.
// Everything holding the browser is dropped before this returns, so the
// browser never outlives the crawl.
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let seed = parse_seed(&cli.url)?;
    let domain = output::split_domain(&seed)
        .ok_or_else(|| anyhow!("URL has no host: {}", cli.url))?;

    // Nothing is crawled if the results cannot be written
    match output::prepare_output_dir(&cli.output_dir) {
        Err(OutputError::PermissionDenied(dir)) => {
            eprintln!(
                "[!] Permission denied: cannot create output directory {}",
                dir.display()
            );
            return Ok(1);
        }
        other => other?,
    }

    let timeout = Duration::from_secs(cli.timeout);
    let report = if cli.no_browser {
        let fetcher = HttpFetcher::new(timeout)?;
        spider(&fetcher, &cli, &seed).await
    } else {
        let config = BrowserConfig {
            chrome_path: cli.chrome_path.clone(),
            timeout,
        };
        let fetcher = BrowserFetcher::launch(&config)
            .context("is Chrome or Chromium installed? try --chrome-path or --no-browser")?;
        spider(&fetcher, &cli, &seed).await
    };

    if report.pages_fetched == 0 {
        for failure in &report.failures {
            eprintln!("[!] {}", failure.reason);
        }
        eprintln!("[!] No page could be fetched, nothing written");
        return Ok(2);
    }

    let filtered = post_filter(&report.keywords, cli.min_length);
    let ignored: BTreeSet<String> = report
        .ignored
        .into_iter()
        .chain(filtered.ignored)
        .collect();

    let paths = output::output_paths(&cli.output_dir, &domain, Local::now());
    output::write_wordlist(&paths.keywords, &filtered.keywords)?;

    let ignored_file = if cli.track_ignored {
        output::write_wordlist(&paths.ignored, &ignored)?;
        Some(paths.ignored)
    } else {
        None
    };

    let summary = RunSummary {
        seed: seed.to_string(),
        pages_fetched: report.pages_fetched,
        keywords: filtered.keywords.len(),
        ignored: ignored.len(),
        failures: report.failures,
        keywords_file: paths.keywords,
        ignored_file,
    };
    print_summary(&summary, cli.json)?;

    Ok(0)
}

// Validates the seed URL before any browser is started
fn parse_seed(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| anyhow!("Invalid URL '{}': {}", raw, e))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        bail!("Unsupported scheme '{}' in {}", url.scheme(), raw);
    }
    if url.host_str().is_none() {
        bail!("URL has no host: {}", raw);
    }

    Ok(url)
}

// Runs the crawl with whichever fetcher was started
async fn spider<F: PageFetcher>(fetcher: &F, cli: &Cli, seed: &Url) -> CrawlReport {
    if !cli.json {
        println!("[i] Spidering {} (depth {})", seed, cli.depth);
    }

    let mut visited = HashSet::new();
    crawl(fetcher, seed.as_str(), &cli.crawl_options(), &mut visited).await
}

// Prints the summary either as text lines or JSON
fn print_summary(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!();
    println!("[i] Spidered {} page(s)", summary.pages_fetched);
    for failure in &summary.failures {
        println!("[!] Skipped {}: {}", failure.url, failure.reason);
    }
    println!("[i] Collected {} keywords", summary.keywords);
    println!(
        "[i] Keywords have been written to {}. Enjoy!",
        summary.keywords_file.display()
    );
    if let Some(ignored_file) = &summary.ignored_file {
        println!(
            "[i] {} ignored words have been written to {}",
            summary.ignored,
            ignored_file.display()
        );
    }

    Ok(())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does run() return Result<i32> instead of calling exit itself?
//    - std::process::exit() skips destructors
//    - Returning first lets the browser be dropped (and closed) before exit
//
// 2. Why are there two `spider(&fetcher, ...)` calls?
//    - BrowserFetcher and HttpFetcher are different types
//    - spider() is generic, so each branch gets its own compiled copy
//
// 3. What does `other => other?` do in the match?
//    - The permission case is handled explicitly with exit code 1
//    - Every other outcome is either Ok(()) or an error passed up with ?
//
// 4. Why is stdout kept free of logs?
//    - tracing writes to stderr, so `--json` output can be piped to jq
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed_accepts_http_and_https() {
        assert!(parse_seed("https://example.com").is_ok());
        assert!(parse_seed("http://example.com:8080/start").is_ok());
    }

    #[test]
    fn test_parse_seed_rejects_garbage() {
        assert!(parse_seed("not a url").is_err());
        assert!(parse_seed("ftp://example.com/").is_err());
        assert!(parse_seed("file:///etc/passwd").is_err());
    }

    #[test]
    fn test_summary_json_shape() {
        let summary = RunSummary {
            seed: "https://example.com/".to_string(),
            pages_fetched: 3,
            keywords: 42,
            ignored: 5,
            failures: vec![],
            keywords_file: PathBuf::from("results/example.com_20240101000000.txt"),
            ignored_file: None,
        };
        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(value["pages_fetched"], 3);
        assert_eq!(value["keywords"], 42);
        assert!(value.get("ignored_file").is_none());
    }
}
