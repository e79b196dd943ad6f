//! Bundle generation: renders the categorized corpus into named documents.
//!
//! # Submodules
//!
//! - [`bundles`]: One Markdown document per non-empty topic bucket
//! - [`indexes`]: The master index document
//! - [`json`]: The full-fidelity JSON backup of the corpus
//!
//! # Output Set
//!
//! ```text
//! api-overview.md        # one per non-empty bucket
//! resources.md
//! ...
//! additional.md
//! master-index.md        # generated document names + all pages by title
//! corpus-backup.json     # lossless serialization of every PageRecord
//! ```
//!
//! Everything here is a pure function over the final corpus and buckets: no
//! network, no parsing, and no document is mutated after it is added to the
//! output set. Failures at this stage are programming invariant violations
//! (e.g. an empty corpus) and propagate instead of being downgraded.

pub mod bundles;
pub mod indexes;
pub mod json;

use crate::models::{Corpus, OutputDocument};
use crate::organize::Bucket;
use std::error::Error;
use tracing::{info, instrument};

/// Render the full document set: one document per non-empty bucket, then the
/// master index, then the JSON backup, in that order.
#[instrument(level = "info", skip_all, fields(pages = corpus.len()))]
pub fn build_bundle(
    buckets: &[Bucket<'_>],
    corpus: &Corpus,
) -> Result<Vec<OutputDocument>, Box<dyn Error>> {
    if corpus.is_empty() {
        return Err("refusing to bundle an empty corpus".into());
    }

    let mut documents: Vec<OutputDocument> = buckets
        .iter()
        .filter(|bucket| !bucket.pages.is_empty())
        .map(bundles::bucket_document)
        .collect();

    let bucket_doc_names: Vec<String> = documents.iter().map(|d| d.name.clone()).collect();
    documents.push(indexes::master_index(&bucket_doc_names, corpus));
    documents.push(json::backup_document(corpus)?);

    info!(documents = documents.len(), "Bundle built");
    Ok(documents)
}
