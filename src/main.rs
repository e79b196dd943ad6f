//! # Docs Harvest
//!
//! A documentation-site harvester that crawls a docs website breadth-first,
//! extracts a normalized record per page, groups the records into topic
//! buckets, and writes the result as a set of reference documents.
//!
//! ## Features
//!
//! - Single-host breadth-first crawl with strict URL dedup and a flat
//!   courtesy delay between fetches
//! - Per-page extraction of title, noise-stripped body text, and code blocks
//! - Keyword-based topic categorization with a catch-all bucket
//! - Outputs one Markdown document per topic, a master index, and a lossless
//!   JSON backup of the whole corpus
//! - Graceful interruption: Ctrl-C stops the crawl and bundles whatever was
//!   collected so far
//!
//! ## Usage
//!
//! ```sh
//! docs_harvest -s https://developer.example.com -o ./bundle
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Crawl**: Walk the site from the start URL, one fetch per URL
//! 2. **Categorize**: Assign every extracted page to a topic bucket
//! 3. **Bundle**: Render buckets, index, and backup into named documents
//! 4. **Output**: Write each document into the output directory

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use url::Url;

mod cli;
mod crawl;
mod error;
mod models;
mod organize;
mod outputs;
mod utils;

use cli::Cli;
use crawl::{CrawlConfig, CrawlEvent, CrawlOutcome, CrawlSession};
use utils::{ensure_writable_dir, truncate_for_log};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("docs_harvest starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.start_url, ?args.output_dir, "Parsed CLI arguments");

    let start_url = Url::parse(&args.start_url).map_err(|e| {
        error!(url = %args.start_url, error = %e, "Start URL is not a valid absolute URL");
        e
    })?;

    // Early check: ensure the output dir is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // --- Cancellation: Ctrl-C flips a flag the crawl loop polls ---
    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = Arc::clone(&cancel);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received; finishing current page, then bundling partial results");
                cancel.store(true, Ordering::Relaxed);
            }
        });
    }

    // --- Progress events: consumed here, rendered as log lines ---
    let (events_tx, mut events_rx) = mpsc::unbounded_channel::<CrawlEvent>();
    let progress = tokio::spawn(async move {
        let mut succeeded = 0usize;
        let mut failed = 0usize;
        while let Some(event) = events_rx.recv().await {
            match event.outcome {
                CrawlOutcome::Success => {
                    succeeded += 1;
                    info!(url = %event.url, status = %event.message, "Page crawled");
                }
                CrawlOutcome::Error => {
                    failed += 1;
                    warn!(
                        url = %event.url,
                        error = %truncate_for_log(&event.message, 300),
                        "Page failed"
                    );
                }
            }
        }
        (succeeded, failed)
    });

    // ---- Crawl ----
    let config = CrawlConfig {
        start_url,
        request_delay: Duration::from_millis(args.delay_ms),
        request_timeout: Duration::from_secs(args.timeout_secs),
    };
    let mut session = CrawlSession::new(config, events_tx, cancel)?;
    session.run().await?;

    let visited = session.visited().len();
    let corpus = session.into_corpus();

    // Dropping the session closed the event channel; collect the tallies.
    let (succeeded, failed) = progress.await?;
    info!(
        visited,
        succeeded,
        failed,
        collected = corpus.len(),
        "Crawl summary"
    );

    if corpus.is_empty() {
        error!("Every page failed; nothing to bundle");
        return Err("crawl produced no pages".into());
    }

    // ---- Categorize and bundle ----
    let buckets = organize::categorize(&corpus);
    let documents = outputs::build_bundle(&buckets, &corpus)?;

    // ---- Write documents ----
    let mut written = 0usize;
    for document in &documents {
        let path = format!("{}/{}", args.output_dir.trim_end_matches('/'), document.name);
        if let Err(e) = tokio::fs::write(&path, &document.content).await {
            error!(path = %path, error = %e, "Failed writing document");
        } else {
            info!(path = %path, mime = document.kind.mime(), "Wrote document");
            written += 1;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        pages = corpus.len(),
        documents = documents.len(),
        written,
        "Execution complete"
    );

    Ok(())
}
