//! Full-fidelity JSON backup of the corpus.
//!
//! Serializes every [`PageRecord`] losslessly so downstream consumers can
//! reprocess the crawl without re-fetching anything. The backup is the only
//! non-Markdown document in the bundle.
//!
//! [`PageRecord`]: crate::models::PageRecord

use crate::models::{Corpus, DocKind, OutputDocument};

/// File name of the backup document.
pub const BACKUP_NAME: &str = "corpus-backup.json";

/// Serialize the corpus records, in fetch order, as pretty-printed JSON.
pub fn backup_document(corpus: &Corpus) -> Result<OutputDocument, serde_json::Error> {
    let content = serde_json::to_string_pretty(corpus.records())?;
    Ok(OutputDocument {
        name: BACKUP_NAME.to_string(),
        kind: DocKind::Json,
        content,
    })
}
