//! The crawl frontier and the breadth-first crawl loop.
//!
//! A [`CrawlSession`] owns all mutable crawl state for the lifetime of one
//! run: the frontier queue, the visited set, and the growing [`Corpus`]. No
//! other component reads or writes that state until the loop terminates,
//! normally or via cancellation, at which point [`CrawlSession::into_corpus`]
//! transfers the corpus read-only to the categorizer.
//!
//! Traversal is strict breadth-first so shallow, structurally important pages
//! are captured first even when a run is interrupted. One fetch per canonical
//! URL, a flat courtesy delay between fetches, and per-page failures
//! downgraded to diagnostic events rather than aborting the crawl.

use crate::crawl::extract::{discover_links, extract_page};
use crate::crawl::scope::UrlScope;
use crate::error::PageError;
use crate::models::Corpus;
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Browser-like user agent; some documentation hosts refuse the default
/// library agent outright.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// How a processed URL turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    Success,
    Error,
}

/// One diagnostic event per processed URL, consumed by whatever renders
/// crawl progress.
#[derive(Debug, Clone)]
pub struct CrawlEvent {
    pub url: String,
    pub outcome: CrawlOutcome,
    pub message: String,
}

/// Tunables for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Where the crawl starts; its host defines the crawl boundary.
    pub start_url: Url,
    /// Flat courtesy delay between consecutive fetches. Not a backoff.
    pub request_delay: Duration,
    /// Per-request timeout handed to the HTTP client.
    pub request_timeout: Duration,
}

/// All mutable state for one crawl run.
pub struct CrawlSession {
    scope: UrlScope,
    frontier: VecDeque<Url>,
    /// Canonical URLs currently sitting in the frontier. Mirrors `frontier`
    /// so the enqueue check is a set lookup, and keeps the invariant
    /// frontier ∩ visited = ∅.
    queued: HashSet<String>,
    visited: HashSet<String>,
    corpus: Corpus,
    config: CrawlConfig,
    events: UnboundedSender<CrawlEvent>,
    cancel: Arc<AtomicBool>,
}

impl CrawlSession {
    /// Build a session seeded with the start URL.
    ///
    /// Fails when the start URL carries no host to pin the crawl scope to.
    pub fn new(
        config: CrawlConfig,
        events: UnboundedSender<CrawlEvent>,
        cancel: Arc<AtomicBool>,
    ) -> Result<Self, Box<dyn Error>> {
        let scope = UrlScope::for_site(&config.start_url)
            .ok_or_else(|| format!("start URL has no host: {}", config.start_url))?;

        let mut start = config.start_url.clone();
        start.set_fragment(None);

        let mut queued = HashSet::new();
        queued.insert(start.to_string());

        Ok(Self {
            scope,
            frontier: VecDeque::from([start]),
            queued,
            visited: HashSet::new(),
            corpus: Corpus::new(),
            config,
            events,
            cancel,
        })
    }

    /// Drive the crawl until the frontier is empty or cancellation is
    /// signaled. A partial run still leaves a valid, categorizable corpus.
    #[instrument(level = "info", skip_all, fields(start = %self.config.start_url))]
    pub async fn run(&mut self) -> Result<(), Box<dyn Error>> {
        let client = Client::builder()
            .timeout(self.config.request_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        info!(host = self.scope.host(), "Crawl starting");

        loop {
            if self.cancel.load(Ordering::Relaxed) {
                info!(
                    crawled = self.corpus.len(),
                    pending = self.frontier.len(),
                    "Cancellation requested; stopping crawl"
                );
                break;
            }

            let Some(url) = self.frontier.pop_front() else {
                break;
            };
            let key = url.to_string();
            self.queued.remove(&key);

            // The enqueue check keeps visited URLs out of the frontier, so
            // this only guards against future bookkeeping mistakes.
            if self.visited.contains(&key) {
                continue;
            }
            self.visited.insert(key.clone());

            match self.process_page(&client, &url).await {
                Ok(discovered) => {
                    for link in discovered {
                        self.enqueue(link);
                    }
                    let message = format!(
                        "crawled ({} collected, {} pending)",
                        self.corpus.len(),
                        self.frontier.len()
                    );
                    debug!(url = %key, %message, "Page crawled");
                    self.emit(&key, CrawlOutcome::Success, message);
                }
                Err(e) => {
                    // Non-fatal: record the diagnostic and move on. The URL
                    // stays in visited so it is never retried this run.
                    warn!(url = %key, error = %e, "Page failed; continuing");
                    self.emit(&key, CrawlOutcome::Error, e.to_string());
                }
            }

            if !self.frontier.is_empty() {
                sleep(self.config.request_delay).await;
            }
        }

        info!(
            crawled = self.corpus.len(),
            visited = self.visited.len(),
            "Crawl finished"
        );
        Ok(())
    }

    /// Fetch one page, insert its record into the corpus, and return its
    /// in-scope outbound links.
    async fn process_page(&mut self, client: &Client, url: &Url) -> Result<Vec<Url>, PageError> {
        debug!(%url, "Fetching page");
        let response = client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        let record = extract_page(url, status, &body)?;

        // extract_page validated the body as UTF-8 already.
        let html = String::from_utf8_lossy(&body);
        let links = discover_links(&html, url)
            .into_iter()
            .filter(|link| self.scope.in_scope(link))
            .collect();

        self.corpus.insert(record);
        Ok(links)
    }

    /// Enqueue a discovered URL unless it was already fetched or is already
    /// waiting in the frontier.
    fn enqueue(&mut self, url: Url) {
        let key = url.to_string();
        if self.visited.contains(&key) || self.queued.contains(&key) {
            return;
        }
        self.queued.insert(key);
        self.frontier.push_back(url);
    }

    fn emit(&self, url: &str, outcome: CrawlOutcome, message: String) {
        // A dropped receiver just means nobody is rendering progress.
        let _ = self.events.send(CrawlEvent {
            url: url.to_string(),
            outcome,
            message,
        });
    }

    /// The corpus accumulated so far.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Every canonical URL a fetch was attempted for, successful or not.
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// Transfer the corpus out, read-only from the caller's perspective;
    /// the session and its remaining state are consumed.
    pub fn into_corpus(self) -> Corpus {
        self.corpus
    }
}
