//! The crawl engine: scope classification, page extraction, and the
//! breadth-first crawl loop.
//!
//! # Submodules
//!
//! - [`scope`]: Decides whether a discovered URL is in scope for crawling
//! - [`extract`]: Turns fetched bytes into a normalized `PageRecord`
//! - [`session`]: Owns the frontier, visited set, and corpus for one run
//!
//! # Data Flow
//!
//! The session pops the earliest-discovered URL, fetches it, hands the bytes
//! to the extractor, stores the record in the corpus, then resolves the
//! page's outbound links and pushes the ones the classifier accepts onto the
//! frontier. When the frontier drains (or cancellation is signaled) the
//! corpus is handed off for categorization.

pub mod extract;
pub mod scope;
pub mod session;

pub use session::{CrawlConfig, CrawlEvent, CrawlOutcome, CrawlSession};
