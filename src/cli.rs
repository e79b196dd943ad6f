//! Command-line interface definitions for the documentation harvester.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the documentation harvester.
///
/// # Examples
///
/// ```sh
/// # Crawl a documentation site and write the bundle to ./bundle
/// docs_harvest -s https://developer.example.com -o ./bundle
///
/// # Slower, more patient crawl
/// docs_harvest -s https://developer.example.com -o ./bundle --delay-ms 1000 --timeout-secs 30
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Root URL of the documentation site to crawl
    #[arg(short, long, env = "DOCS_START_URL")]
    pub start_url: String,

    /// Directory the generated documents are written to
    #[arg(short, long)]
    pub output_dir: String,

    /// Fixed courtesy delay between consecutive fetches, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}
