//! Data models for crawled pages and the generated output documents.
//!
//! This module defines the core data structures used throughout the application:
//! - [`PageRecord`]: The normalized, extracted representation of one crawled page
//! - [`CodeBlock`]: A code sample lifted out of a page, inline or preformatted
//! - [`Corpus`]: The insertion-ordered collection of every page a crawl produced
//! - [`OutputDocument`]: A single named document emitted by the bundle builder
//!
//! `PageRecord` and `CodeBlock` derive both `Serialize` and `Deserialize` so the
//! JSON backup document is a lossless, machine-parseable copy of the corpus.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a code sample came from an inline `<code>` element or a
/// preformatted `<pre>` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeBlockKind {
    /// Inline code appearing inside running text.
    Inline,
    /// A preformatted block, typically a multi-line example.
    Block,
}

/// A code sample extracted from a documentation page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Inline snippet or preformatted block.
    pub kind: CodeBlockKind,
    /// Language declared on the element's `class` attribute, empty if absent.
    pub language_hint: String,
    /// The trimmed text content of the code element.
    pub content: String,
}

/// The normalized, extracted representation of one crawled page.
///
/// Records are owned by the crawl session while the crawl runs and are
/// immutable once the corpus is handed off for categorization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Canonical absolute URL the page was fetched from.
    pub url: String,
    /// The page title, or the last URL path segment when the page has none.
    pub title: String,
    /// Body text with structural chrome stripped and whitespace collapsed
    /// into a single dense stream.
    pub body_text: String,
    /// Code samples in document order.
    pub code_blocks: Vec<CodeBlock>,
    /// When the page was fetched.
    pub fetched_at: DateTime<Utc>,
}

/// Every page a crawl produced, keyed by canonical URL, in fetch order.
///
/// URL uniqueness is guaranteed upstream by the crawl session's visited set,
/// so insertion never has to handle duplicates. The corpus is read-only once
/// the crawl has terminated.
#[derive(Debug, Default)]
pub struct Corpus {
    records: Vec<PageRecord>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. The caller guarantees the URL has not been inserted
    /// before; the crawl session enforces this via its visited set.
    pub fn insert(&mut self, record: PageRecord) {
        self.records.push(record);
    }

    /// Look up a record by its canonical URL.
    pub fn get(&self, url: &str) -> Option<&PageRecord> {
        self.records.iter().find(|r| r.url == url)
    }

    /// All records in fetch order.
    pub fn records(&self) -> &[PageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The rendered form of an output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Markdown,
    Json,
}

impl DocKind {
    /// MIME type for delivery to the output consumer.
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Markdown => "text/markdown",
            Self::Json => "application/json",
        }
    }
}

/// One named document produced by the bundle builder.
///
/// Documents are created once from the final corpus and buckets and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    /// File name the consumer should store the document under.
    pub name: String,
    pub kind: DocKind,
    pub content: String,
}
