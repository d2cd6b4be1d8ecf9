//! Markdown renderer for WeChat Official Account articles.
//!
//! The WeChat editor discards `<style>` blocks and `class` attributes when
//! content is pasted into it, so every element this crate emits carries its
//! own inline `style` attribute taken from a fixed [`Element`] table.
//!
//! # Architecture
//!
//! Rendering happens in three steps:
//! - [`Document::parse`] folds `pulldown-cmark` events into an owned block/inline tree
//! - [`ArticleRenderer`] walks the tree and writes inline-styled HTML
//! - The rewrite passes adjust list items and blockquotes so they survive
//!   class stripping (paragraph wrappers removed, quote paragraphs re-styled)
//!
//! [`count_approx_length`] provides the word count shown in the article footer.
//!
//! # Example
//!
//! ```
//! use wxpub_renderer::{RenderOptions, Stats, render};
//!
//! let options = RenderOptions {
//!     stats: Some(Stats {
//!         word_count: Some(42),
//!         ..Stats::default()
//!     }),
//!     ..RenderOptions::default()
//! };
//! let html = render("# Hello\n\n**Bold** text", &options);
//! assert!(html.contains(r#"<div id="article">"#));
//! ```

mod count;
mod document;
mod options;
mod renderer;
mod rewrite;
mod style;
mod util;

pub use count::count_approx_length;
pub use document::{Block, Document, Inline, ListItem, TableCell};
pub use options::{RenderOptions, Stats};
pub use renderer::{ARTICLE_CONTAINER_ID, ArticleRenderer, render};
pub use style::Element;
pub use util::escape_html;
