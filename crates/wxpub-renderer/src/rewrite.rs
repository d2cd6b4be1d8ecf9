//! Post-processing passes over rendered HTML fragments.
//!
//! These work around how the WeChat editor treats pasted markup and are kept
//! apart from the block renderer so that list-item and top-level rendering
//! stay the same code path.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Opening paragraph tag, with or without attributes.
static PARAGRAPH_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<p(?:\s[^>]*)?>").unwrap());

/// Closing paragraph tag.
static PARAGRAPH_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</p\s*>").unwrap());

/// Opening paragraph tag carrying an inline style.
static STYLED_PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<p style="[^"]*">"#).unwrap());

/// Remove paragraph wrappers from rendered list item content.
///
/// With the native marker hidden, the item starts with a literal prefix; a
/// `<p>` after it would push the text onto its own line.
pub(crate) fn strip_paragraph_wrappers(html: &str) -> String {
    let without_open = PARAGRAPH_OPEN_RE.replace_all(html, "");
    let without_close = PARAGRAPH_CLOSE_RE.replace_all(&without_open, "");
    without_close.trim().to_owned()
}

/// Give every styled paragraph in a blockquote body the quote paragraph style.
pub(crate) fn restamp_paragraphs<'a>(html: &'a str, style: &str) -> Cow<'a, str> {
    let replacement = format!(r#"<p style="{style}">"#);
    STYLED_PARAGRAPH_RE.replace_all(html, regex::NoExpand(replacement.as_str()))
}
