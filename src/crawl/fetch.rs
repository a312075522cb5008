// src/crawl/fetch.rs
// =============================================================================
// Fetches pages for the crawler.
//
// Two fetchers share one trait:
// - BrowserFetcher: drives a headless Chrome/Chromium and returns the HTML
//   after JavaScript has run (the default)
// - HttpFetcher: a plain HTTP GET with reqwest, for machines without a
//   browser (loses any text that only JavaScript renders)
//
// headless_chrome is synchronous, so navigation runs on tokio's blocking
// thread pool instead of stalling the async executor.
//
// Rust concepts:
// - Traits: one PageFetcher interface, two implementations
// - Arc: shares the browser tab with the blocking thread
// - Drop: closing the browser is tied to the value going out of scope
// =============================================================================

use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions, Tab};
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

// Fixed viewport so layout-dependent rendering is repeatable
const WINDOW_SIZE: (u32, u32) = (1920, 1080);

// Chrome exits on its own after this long without a command
const IDLE_BROWSER_TIMEOUT: Duration = Duration::from_secs(300);

const BROWSER_ARGS: &[&str] = &["--disable-gpu", "--no-first-run", "--mute-audio"];

/// Errors that can occur while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to launch browser: {0}")]
    Launch(String),
    #[error("failed to load {url}: {reason}")]
    Navigation { url: String, reason: String },
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("fetch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Anything that can turn a URL into page HTML.
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Settings for launching the browser
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Explicit Chrome/Chromium executable; auto-detected when None
    pub chrome_path: Option<PathBuf>,
    /// Navigation timeout per page
    pub timeout: Duration,
}

/// One headless browser session with a single tab, reused for every page.
///
/// The Chrome process is shut down when this value is dropped, so it is
/// released exactly once whichever way the run ends.
pub struct BrowserFetcher {
    tab: Arc<Tab>,
    _browser: Browser,
}

impl BrowserFetcher {
    // Starts Chrome headless with a fixed window size.
    //
    // The sandbox is disabled so the browser also starts inside containers
    // and as root. Rendered pages therefore run without Chrome's sandbox.
    pub fn launch(config: &BrowserConfig) -> Result<Self, FetchError> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .window_size(Some(WINDOW_SIZE))
            .idle_browser_timeout(IDLE_BROWSER_TIMEOUT)
            .path(config.chrome_path.clone())
            .args(BROWSER_ARGS.iter().map(OsStr::new).collect())
            .build()
            .map_err(|e| FetchError::Launch(e.to_string()))?;

        let browser = Browser::new(options).map_err(|e| FetchError::Launch(format!("{e:#}")))?;
        let tab = browser
            .new_tab()
            .map_err(|e| FetchError::Launch(format!("{e:#}")))?;
        tab.set_default_timeout(config.timeout);

        debug!(?config, "browser launched");

        Ok(Self {
            tab,
            _browser: browser,
        })
    }
}

impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let tab = Arc::clone(&self.tab);
        let target = url.to_string();

        let rendered = tokio::task::spawn_blocking(move || -> anyhow::Result<String> {
            tab.navigate_to(&target)?;
            tab.wait_until_navigated()?;
            tab.get_content()
        })
        .await?;

        rendered.map_err(|e| FetchError::Navigation {
            url: url.to_string(),
            reason: format!("{e:#}"),
        })
    }
}

/// Plain HTTP fetcher; returns the HTML exactly as the server sent it.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is spawn_blocking?
//    - Runs a closure on a thread pool meant for blocking work
//    - headless_chrome waits synchronously for Chrome, which would otherwise
//      freeze the async executor
//
// 2. Why clone the Arc<Tab> before spawning?
//    - The closure must own everything it uses ('static)
//    - Cloning an Arc only bumps a reference count, the tab is shared
//
// 3. Why `format!("{e:#}")` for browser errors?
//    - headless_chrome returns anyhow errors
//    - The alternate format prints the whole cause chain on one line
//
// 4. What is #[from] in the error enum?
//    - thiserror generates From impls, so `?` converts reqwest and
//      JoinError values into FetchError automatically
// -----------------------------------------------------------------------------
