//! The master index document.
//!
//! Lists the generated bucket documents for navigation, then every crawled
//! page (title and URL) sorted by title so the index doubles as an
//! alphabetical table of contents over the whole corpus.

use crate::models::{Corpus, DocKind, OutputDocument};
use itertools::Itertools;
use std::fmt::Write;

/// File name of the master index document.
pub const MASTER_INDEX_NAME: &str = "master-index.md";

/// Render the master index from the generated bucket document names and the
/// final corpus.
pub fn master_index(document_names: &[String], corpus: &Corpus) -> OutputDocument {
    let mut md = String::new();

    writeln!(md, "# Documentation Master Index\n").unwrap();
    writeln!(md, "**Total pages:** {}\n", corpus.len()).unwrap();
    writeln!(md, "---\n").unwrap();

    writeln!(md, "## Generated Documents\n").unwrap();
    for name in document_names {
        writeln!(md, "- **{name}**").unwrap();
    }

    writeln!(md, "\n## Complete Page Index\n").unwrap();
    for record in corpus
        .records()
        .iter()
        .sorted_by(|a, b| a.title.cmp(&b.title))
    {
        writeln!(md, "- **{}** - {}", record.title, record.url).unwrap();
    }

    OutputDocument {
        name: MASTER_INDEX_NAME.to_string(),
        kind: DocKind::Markdown,
        content: md,
    }
}
