//! Per-bucket Markdown documents.
//!
//! Each non-empty bucket renders to one document containing, per record in
//! bucket order: the title, the source URL, the normalized body text, and a
//! fenced rendering of each code block tagged with its language hint.

use crate::models::{DocKind, OutputDocument};
use crate::organize::Bucket;
use crate::utils::slugify;
use std::fmt::Write;

/// Render one bucket into its Markdown document.
pub fn bucket_document(bucket: &Bucket<'_>) -> OutputDocument {
    let mut md = String::new();

    writeln!(md, "# {} Documentation\n", bucket.name).unwrap();
    writeln!(md, "**Purpose:** {} reference documentation\n", bucket.name).unwrap();
    writeln!(md, "---\n").unwrap();

    for page in &bucket.pages {
        writeln!(md, "## {}\n", page.title).unwrap();
        writeln!(md, "**URL:** {}\n", page.url).unwrap();
        writeln!(md, "{}\n", page.body_text).unwrap();

        if !page.code_blocks.is_empty() {
            writeln!(md, "### Code Examples\n").unwrap();
            for code in &page.code_blocks {
                writeln!(md, "```{}", code.language_hint).unwrap();
                writeln!(md, "{}", code.content).unwrap();
                writeln!(md, "```\n").unwrap();
            }
        }

        writeln!(md, "---\n").unwrap();
    }

    OutputDocument {
        name: format!("{}.md", slugify(&bucket.name)),
        kind: DocKind::Markdown,
        content: md,
    }
}
