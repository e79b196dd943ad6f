//! Error taxonomy for per-page crawl failures.
//!
//! A failed page never aborts the crawl: the crawl loop catches the
//! [`PageError`], records it as a diagnostic event, and moves on to the next
//! frontier entry. The failed URL stays in the visited set so it is never
//! retried within the same run.
//!
//! The URL classifier has no error type on purpose: it is a pure, total
//! function over already-parsed URLs and always returns a boolean.

use thiserror::Error;

/// Why a single page could not be turned into a `PageRecord`.
#[derive(Debug, Error)]
pub enum PageError {
    /// Network failure, timeout, or a non-success HTTP status.
    #[error("transport failure: {0}")]
    Transport(String),
    /// Response bytes that could not be decoded and parsed as markup.
    #[error("unparseable markup: {0}")]
    Parse(String),
}

impl PageError {
    /// Transport failure for a response that arrived with a non-success status.
    pub fn status(status: reqwest::StatusCode) -> Self {
        Self::Transport(format!("HTTP {status}"))
    }
}

impl From<reqwest::Error> for PageError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
