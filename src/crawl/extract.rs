//! Page extraction: turns fetched bytes into a normalized [`PageRecord`].
//!
//! Extraction is a pure transformation. The markup is parsed once into a node
//! tree, scope is narrowed to the page's designated main-content region when
//! one exists, structural chrome (script, style, nav, footer, header) is
//! skipped during the text walk, and the remaining text is collapsed into a
//! single dense stream suitable for text search rather than layout fidelity.
//!
//! Link discovery lives here too since it operates on the same fetched
//! markup, but it is a separate concern driven by the crawl loop: resolved
//! outbound links are returned raw and the loop filters them through the
//! URL classifier.

use crate::error::PageError;
use crate::models::{CodeBlock, CodeBlockKind, PageRecord};
use chrono::Utc;
use once_cell::sync::Lazy;
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Elements that are structural chrome, not documentation content.
const NOISE_TAGS: &[&str] = &["script", "style", "nav", "footer", "header"];

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static MAIN_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("main").unwrap());
static CONTENT_DIV_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div.content").unwrap());
static CODE_LIKE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("pre, code").unwrap());
static CODE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("code").unwrap());
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// Extract a [`PageRecord`] from a fetched page.
///
/// Fails with [`PageError::Transport`] when the transport layer reported a
/// non-success status, and with [`PageError::Parse`] when the body cannot be
/// decoded as text. Successful extraction has no side effects; the record is
/// the only output.
pub fn extract_page(url: &Url, status: StatusCode, body: &[u8]) -> Result<PageRecord, PageError> {
    if !status.is_success() {
        return Err(PageError::status(status));
    }

    let html = std::str::from_utf8(body)
        .map_err(|e| PageError::Parse(format!("body is not valid UTF-8: {e}")))?;
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|t| collapse_whitespace(&t.text().collect::<String>()))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| title_from_url(url));

    let content_root = main_content(&document);

    Ok(PageRecord {
        url: url.to_string(),
        title,
        body_text: visible_text(content_root),
        code_blocks: code_blocks(content_root),
        fetched_at: Utc::now(),
    })
}

/// Resolve every outbound link on the page against its own URL.
///
/// Relative hrefs become absolute, unresolvable hrefs are dropped, and
/// fragments are stripped so a `#section` link collapses onto the page it
/// points into and the frontier's dedup absorbs it.
pub fn discover_links(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| base.join(href).ok())
        .map(|mut url| {
            url.set_fragment(None);
            url
        })
        .collect()
}

/// The region text and code are extracted from: the page's `<main>` element,
/// else a `div.content`, else the whole document.
fn main_content(document: &Html) -> ElementRef<'_> {
    document
        .select(&MAIN_SELECTOR)
        .next()
        .or_else(|| document.select(&CONTENT_DIV_SELECTOR).next())
        .unwrap_or_else(|| document.root_element())
}

/// Depth-first text extraction that skips noise subtrees entirely.
fn visible_text(root: ElementRef<'_>) -> String {
    let mut raw = String::new();
    push_visible_text(root, &mut raw);
    collapse_whitespace(&raw)
}

fn push_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(el) if NOISE_TAGS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    push_visible_text(child_element, out);
                }
            }
            _ => {}
        }
    }
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Every code-like node with non-empty trimmed text, in document order.
///
/// A `<pre>` yields one block; `<code>` nested inside a `<pre>` is part of
/// that block and is not emitted a second time.
fn code_blocks(root: ElementRef<'_>) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    for element in root.select(&CODE_LIKE_SELECTOR) {
        let name = element.value().name();
        let kind = match name {
            "pre" => CodeBlockKind::Block,
            "code" if inside_pre(element) => continue,
            _ => CodeBlockKind::Inline,
        };

        let content = element.text().collect::<String>().trim().to_string();
        if content.is_empty() {
            continue;
        }

        let mut language_hint = first_class(element);
        if language_hint.is_empty() && kind == CodeBlockKind::Block {
            // Highlighters usually declare the language on the inner <code>.
            if let Some(inner) = element.select(&CODE_SELECTOR).next() {
                language_hint = first_class(inner);
            }
        }

        blocks.push(CodeBlock {
            kind,
            language_hint,
            content,
        });
    }
    blocks
}

fn inside_pre(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| ancestor.value().name() == "pre")
}

fn first_class(element: ElementRef<'_>) -> String {
    element
        .value()
        .attr("class")
        .and_then(|classes| classes.split_whitespace().next())
        .unwrap_or_default()
        .to_string()
}

/// Fallback title: the last non-empty path segment, else the host.
fn title_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.rev().find(|s| !s.is_empty()))
        .map(|s| s.to_string())
        .unwrap_or_else(|| url.host_str().unwrap_or("untitled").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://docs.example.com/guides/webhooks").unwrap()
    }

    fn extract(html: &str) -> PageRecord {
        extract_page(&page_url(), StatusCode::OK, html.as_bytes()).unwrap()
    }

    #[test]
    fn test_title_from_title_element() {
        let record = extract("<html><head><title>  Webhooks   Guide </title></head><body>x</body></html>");
        assert_eq!(record.title, "Webhooks Guide");
    }

    #[test]
    fn test_title_falls_back_to_path_segment() {
        let record = extract("<html><body>No title here</body></html>");
        assert_eq!(record.title, "webhooks");
    }

    #[test]
    fn test_title_falls_back_to_host_at_site_root() {
        let url = Url::parse("https://docs.example.com/").unwrap();
        let record = extract_page(&url, StatusCode::OK, b"<html><body>x</body></html>").unwrap();
        assert_eq!(record.title, "docs.example.com");
    }

    #[test]
    fn test_noise_elements_are_excised() {
        let html = r#"<html><body>
            <nav>Home Guides API</nav>
            <header>Site header</header>
            <p>Real documentation text.</p>
            <script>var tracking = true;</script>
            <style>.hidden { display: none; }</style>
            <footer>Copyright notice</footer>
        </body></html>"#;
        let record = extract(html);
        assert_eq!(record.body_text, "Real documentation text.");
    }

    #[test]
    fn test_main_region_preferred_over_whole_document() {
        let html = r#"<html><body>
            <div>Sidebar junk</div>
            <main><p>Only this matters.</p></main>
        </body></html>"#;
        let record = extract(html);
        assert_eq!(record.body_text, "Only this matters.");
    }

    #[test]
    fn test_content_div_used_when_no_main() {
        let html = r#"<html><body>
            <div>Sidebar junk</div>
            <div class="content"><p>Inner content.</p></div>
        </body></html>"#;
        let record = extract(html);
        assert_eq!(record.body_text, "Inner content.");
    }

    #[test]
    fn test_whitespace_collapsed_into_dense_stream() {
        let html = "<html><body><p>one\n   two</p>\n\n<p>three</p></body></html>";
        let record = extract(html);
        assert_eq!(record.body_text, "one two three");
    }

    #[test]
    fn test_pre_block_and_inline_code() {
        let html = r#"<html><body><main>
            <p>Use <code>lead_id</code> in the path.</p>
            <pre class="language-python">import requests
requests.get(url)</pre>
        </main></body></html>"#;
        let record = extract(html);

        assert_eq!(record.code_blocks.len(), 2);
        assert_eq!(record.code_blocks[0].kind, CodeBlockKind::Inline);
        assert_eq!(record.code_blocks[0].content, "lead_id");
        assert_eq!(record.code_blocks[0].language_hint, "");
        assert_eq!(record.code_blocks[1].kind, CodeBlockKind::Block);
        assert_eq!(record.code_blocks[1].language_hint, "language-python");
        assert!(record.code_blocks[1].content.contains("import requests"));
    }

    #[test]
    fn test_code_nested_in_pre_not_duplicated() {
        let html = r#"<html><body>
            <pre><code class="language-rust">fn main() {}</code></pre>
        </body></html>"#;
        let record = extract(html);

        assert_eq!(record.code_blocks.len(), 1);
        assert_eq!(record.code_blocks[0].kind, CodeBlockKind::Block);
        // Hint lifted from the inner <code> when the <pre> declares none.
        assert_eq!(record.code_blocks[0].language_hint, "language-rust");
        assert_eq!(record.code_blocks[0].content, "fn main() {}");
    }

    #[test]
    fn test_empty_code_nodes_skipped() {
        let html = "<html><body><code>   </code><pre></pre></body></html>";
        let record = extract(html);
        assert!(record.code_blocks.is_empty());
    }

    #[test]
    fn test_non_success_status_is_transport_error() {
        let err = extract_page(&page_url(), StatusCode::NOT_FOUND, b"irrelevant").unwrap_err();
        assert!(matches!(err, PageError::Transport(_)));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let err = extract_page(&page_url(), StatusCode::OK, &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, PageError::Parse(_)));
    }

    #[test]
    fn test_discover_links_resolves_and_strips_fragments() {
        let base = Url::parse("https://docs.example.com/guides/webhooks").unwrap();
        let html = r##"<html><body>
            <a href="/api/leads">Leads</a>
            <a href="errors">Errors</a>
            <a href="#retries">Retries</a>
            <a href="https://github.com/example/sdk">SDK</a>
        </body></html>"##;

        let links = discover_links(html, &base);
        let raw: Vec<&str> = links.iter().map(|u| u.as_str()).collect();

        assert_eq!(
            raw,
            vec![
                "https://docs.example.com/api/leads",
                "https://docs.example.com/guides/errors",
                // The fragment link resolves back to the page itself.
                "https://docs.example.com/guides/webhooks",
                // External links resolve fine; the classifier rejects them later.
                "https://github.com/example/sdk",
            ]
        );
    }
}
