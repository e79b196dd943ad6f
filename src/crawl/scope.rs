//! URL classification: decides whether a discovered link is worth crawling.
//!
//! The check is pure string and structure inspection over an already-parsed
//! [`Url`]; no network access happens here. A URL is in scope only when every
//! rule passes:
//!
//! 1. The scheme is plain HTTP(S) — `mailto:`, `tel:`, and `javascript:`
//!    links fail this immediately.
//! 2. The host equals the configured documentation host exactly, with no
//!    subdomain wildcarding.
//! 3. The path does not end in a known non-document extension.
//! 4. The URL does not reference a known external-service domain anywhere in
//!    its text (covers redirect and share links that smuggle an external
//!    target into the query string).

use url::Url;

/// File extensions that never hold documentation text.
const SKIPPED_EXTENSIONS: &[&str] = &[".pdf", ".jpg", ".png", ".css", ".js", ".svg", ".ico"];

/// Domains of external services that documentation sites commonly link out to.
const EXTERNAL_SERVICES: &[&str] = &["github.com", "twitter.com", "linkedin.com"];

/// The crawl boundary for one documentation site.
#[derive(Debug, Clone)]
pub struct UrlScope {
    host: String,
}

impl UrlScope {
    /// Build a scope pinned to the host of the crawl's start URL.
    ///
    /// Returns `None` when the URL carries no host (e.g. `mailto:` or
    /// `file:` URLs), which is a configuration error surfaced by the caller.
    pub fn for_site(start_url: &Url) -> Option<Self> {
        start_url.host_str().map(|host| Self {
            host: host.to_string(),
        })
    }

    /// The host every in-scope URL must match.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Whether a resolved URL should be crawled.
    ///
    /// Total over every parseable URL: never panics, never touches the
    /// network, always answers with a boolean.
    pub fn in_scope(&self, url: &Url) -> bool {
        if url.scheme() != "http" && url.scheme() != "https" {
            return false;
        }

        if url.host_str() != Some(self.host.as_str()) {
            return false;
        }

        let path = url.path().to_ascii_lowercase();
        if SKIPPED_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
            return false;
        }

        let text = url.as_str();
        if EXTERNAL_SERVICES.iter().any(|domain| text.contains(domain)) {
            return false;
        }

        true
    }
}
