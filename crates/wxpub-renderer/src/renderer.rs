//! Inline-styled HTML renderer.

use std::fmt::Write;

use crate::document::{Block, Document, Inline, ListItem, TableCell};
use crate::options::{RenderOptions, Stats};
use crate::rewrite::{restamp_paragraphs, strip_paragraph_wrappers};
use crate::style::{COVER_IMAGE_EXTRA, Element, PAGE_STYLESHEET};
use crate::util::{escape_angle_brackets, escape_html, quote_attribute};

/// `id` of the element wrapping the article content.
///
/// The browser collaborator selects this element's subtree for the clipboard.
pub const ARTICLE_CONTAINER_ID: &str = "article";

/// Visible marker for unordered list items.
const BULLET: &str = "· ";

/// Alt text of the leading cover image.
const COVER_ALT: &str = "封面图";

/// Preview document title.
const PREVIEW_TITLE: &str = "文章预览";

/// Render Markdown into a complete WeChat-ready HTML document.
///
/// Never fails; syntax the parser does not recognize is kept as text.
///
/// # Example
///
/// ```
/// use wxpub_renderer::{RenderOptions, render};
///
/// let html = render("- a\n- b\n", &RenderOptions::default());
/// assert_eq!(html.matches("<li ").count(), 2);
/// ```
#[must_use]
pub fn render(markdown: &str, options: &RenderOptions) -> String {
    let document = Document::parse(markdown);
    let body = render_body(&document);
    let html = assemble(&body, options);
    tracing::debug!(
        markdown_bytes = markdown.len(),
        html_bytes = html.len(),
        "Rendered article"
    );
    html
}

/// Article renderer with builder-style options.
///
/// # Example
///
/// ```
/// use wxpub_renderer::{ArticleRenderer, Stats};
///
/// let html = ArticleRenderer::new()
///     .with_cover_image("cover.jpg")
///     .with_stats(Stats {
///         duration: Some("2h".to_owned()),
///         ..Stats::default()
///     })
///     .render("Hello");
/// assert!(html.contains(r#"src="cover.jpg""#));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ArticleRenderer {
    options: RenderOptions,
}

impl ArticleRenderer {
    /// Create a renderer without cover image or footer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer from existing options.
    #[must_use]
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Insert a cover image before the body.
    #[must_use]
    pub fn with_cover_image(mut self, path: impl Into<String>) -> Self {
        self.options.cover_image_path = Some(path.into());
        self
    }

    /// Append a statistics footer.
    #[must_use]
    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.options.stats = Some(stats);
        self
    }

    /// Configured options.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a complete HTML document.
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        render(markdown, &self.options)
    }

    /// Render only the article body, without cover, footer or page shell.
    #[must_use]
    pub fn render_body(&self, markdown: &str) -> String {
        render_body(&Document::parse(markdown))
    }
}

/// Wrap the rendered body into the preview page.
fn assemble(body: &str, options: &RenderOptions) -> String {
    let cover = options.cover_image().map(cover_image).unwrap_or_default();
    let footer = footer(&options.footer_lines());

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{PREVIEW_TITLE}</title>
<style>
{PAGE_STYLESHEET}
</style>
</head>
<body>
<div id="{ARTICLE_CONTAINER_ID}">
{cover}{body}{footer}
</div>
</body>
</html>"#
    )
}

fn cover_image(path: &str) -> String {
    let src = path.replace('\\', "/");
    format!(
        r#"<img style="{} {COVER_IMAGE_EXTRA}" src="{}" alt="{COVER_ALT}" />
"#,
        Element::Image.style(),
        quote_attribute(&src)
    )
}

fn footer(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let line_style = Element::FooterLine.style();
    let lines = lines
        .iter()
        .map(|line| format!(r#"<p style="{line_style}">{}</p>"#, escape_html(line)))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"
<hr style="{}" />
<section style="{}">
  <p style="{}">Changelog</p>
  {lines}
</section>"#,
        Element::Rule.style(),
        Element::FooterSection.style(),
        Element::FooterLabel.style(),
    )
}

fn render_body(document: &Document) -> String {
    let mut out = String::with_capacity(4096);
    write_blocks(&document.blocks, &mut out);
    out
}

fn write_blocks(blocks: &[Block], out: &mut String) {
    for block in blocks {
        write_block(block, out);
    }
}

fn write_block(block: &Block, out: &mut String) {
    match block {
        Block::Heading { level, inlines } => {
            let level = (*level).clamp(1, 6);
            write!(
                out,
                r#"<h{level} style="{}">"#,
                Element::heading(level).style()
            )
            .unwrap();
            write_inlines(inlines, out);
            writeln!(out, "</h{level}>").unwrap();
        }
        Block::Paragraph(inlines) => {
            if let Some(image) = sole_image(inlines) {
                // Pasted images nested in <p> get dropped by the editor's cleanup
                write_inline(image, out);
                out.push('\n');
            } else {
                write!(out, r#"<p style="{}">"#, Element::Paragraph.style()).unwrap();
                write_inlines(inlines, out);
                out.push_str("</p>\n");
            }
        }
        Block::BlockQuote(children) => {
            let mut inner = String::new();
            write_blocks(children, &mut inner);
            let inner = restamp_paragraphs(&inner, Element::BlockQuoteParagraph.style());
            writeln!(
                out,
                r#"<section style="{}">{inner}</section>"#,
                Element::BlockQuote.style()
            )
            .unwrap();
        }
        Block::CodeBlock { text, .. } => {
            let text = text.strip_suffix('\n').unwrap_or(text);
            writeln!(
                out,
                r#"<section style="{}">{}</section>"#,
                Element::CodeBlock.style(),
                escape_angle_brackets(text)
            )
            .unwrap();
        }
        Block::List { ordered, items } => write_list(*ordered, items, out),
        Block::Table { head, rows } => write_table(head, rows, out),
        Block::Rule => {
            writeln!(out, r#"<hr style="{}" />"#, Element::Rule.style()).unwrap();
        }
        Block::Html(html) => out.push_str(html),
    }
}

fn write_list(ordered: bool, items: &[ListItem], out: &mut String) {
    let (tag, element) = if ordered {
        ("ol", Element::OrderedList)
    } else {
        ("ul", Element::UnorderedList)
    };
    write!(out, r#"<{tag} style="{}">"#, element.style()).unwrap();
    for (index, item) in items.iter().enumerate() {
        let prefix = if ordered {
            format!("{}. ", index + 1)
        } else {
            BULLET.to_owned()
        };
        let mut content = String::new();
        write_blocks(&item.blocks, &mut content);
        let content = strip_paragraph_wrappers(&content);
        writeln!(
            out,
            r#"<li style="{}">{prefix}{content}</li>"#,
            Element::ListItem.style()
        )
        .unwrap();
    }
    writeln!(out, "</{tag}>").unwrap();
}

fn write_table(head: &[TableCell], rows: &[Vec<TableCell>], out: &mut String) {
    write!(out, r#"<table style="{}"><thead><tr>"#, Element::Table.style()).unwrap();
    for cell in head {
        write!(out, r#"<th style="{}">"#, Element::TableHeaderCell.style()).unwrap();
        write_inlines(&cell.inlines, out);
        out.push_str("</th>");
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            write!(out, r#"<td style="{}">"#, Element::TableCell.style()).unwrap();
            write_inlines(&cell.inlines, out);
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>\n");
}

fn write_inlines(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        write_inline(inline, out);
    }
}

fn write_inline(inline: &Inline, out: &mut String) {
    match inline {
        Inline::Text(text) => out.push_str(&escape_html(text)),
        Inline::Emphasis(children) => {
            write!(out, r#"<em style="{}">"#, Element::Emphasis.style()).unwrap();
            write_inlines(children, out);
            out.push_str("</em>");
        }
        Inline::Strong(children) => {
            write!(out, r#"<strong style="{}">"#, Element::Strong.style()).unwrap();
            write_inlines(children, out);
            out.push_str("</strong>");
        }
        Inline::Code(code) => {
            write!(
                out,
                r#"<code style="{}">{}</code>"#,
                Element::InlineCode.style(),
                escape_html(code)
            )
            .unwrap();
        }
        Inline::Link { dest, children } => {
            write!(
                out,
                r#"<a style="{}" href="{}">"#,
                Element::Link.style(),
                quote_attribute(dest)
            )
            .unwrap();
            write_inlines(children, out);
            out.push_str("</a>");
        }
        Inline::Image { src, title, alt } => {
            let alt = if alt.is_empty() { title } else { alt };
            write!(
                out,
                r#"<img style="{}" src="{}" alt="{}" />"#,
                Element::Image.style(),
                quote_attribute(src),
                escape_html(alt)
            )
            .unwrap();
        }
        Inline::SoftBreak => out.push('\n'),
        Inline::HardBreak => out.push_str("<br />"),
        Inline::Html(html) => out.push_str(html),
    }
}

/// The image, if it is the only non-blank inline of a paragraph.
fn sole_image(inlines: &[Inline]) -> Option<&Inline> {
    let mut meaningful = inlines.iter().filter(|inline| !inline.is_blank());
    match (meaningful.next(), meaningful.next()) {
        (Some(image @ Inline::Image { .. }), None) => Some(image),
        _ => None,
    }
}
