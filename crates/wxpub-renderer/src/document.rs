//! Owned Markdown document tree.
//!
//! `pulldown-cmark` produces a flat event stream; the renderer needs to look
//! at a whole paragraph (is it a lone image?) or a whole list item (strip its
//! paragraph wrappers) before writing anything, so events are folded into a
//! tree first.
//!
//! Only tables are enabled on top of CommonMark. Strikethrough, task lists and
//! footnotes have no WeChat styling, so their syntax stays literal text.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::util::heading_level_to_num;

/// Parsed Markdown document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    /// Top-level blocks in source order.
    pub blocks: Vec<Block>,
}

/// Block-level node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Heading {
        /// Heading level, 1 through 6.
        level: u8,
        inlines: Vec<Inline>,
    },
    Paragraph(Vec<Inline>),
    BlockQuote(Vec<Block>),
    CodeBlock {
        /// Fence info string's first word, if any. Not used for highlighting.
        lang: Option<String>,
        text: String,
    },
    List {
        ordered: bool,
        items: Vec<ListItem>,
    },
    Table {
        head: Vec<TableCell>,
        rows: Vec<Vec<TableCell>>,
    },
    Rule,
    /// Raw HTML block, passed through unchanged.
    Html(String),
}

/// List item content.
///
/// Text of tight list items is wrapped in an implicit [`Block::Paragraph`],
/// so an item is always a block sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListItem {
    pub blocks: Vec<Block>,
}

/// Table cell content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableCell {
    pub inlines: Vec<Inline>,
}

/// Inline node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Code(String),
    Link {
        dest: String,
        children: Vec<Inline>,
    },
    Image {
        src: String,
        title: String,
        alt: String,
    },
    SoftBreak,
    HardBreak,
    /// Inline raw HTML, passed through unchanged.
    Html(String),
}

impl Inline {
    /// Plain text of this node, without markup.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) | Self::Code(text) => out.push_str(text),
            Self::Emphasis(children) | Self::Strong(children) | Self::Link { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
            Self::Image { alt, .. } => out.push_str(alt),
            Self::SoftBreak | Self::HardBreak => out.push(' '),
            Self::Html(_) => {}
        }
    }

    /// Whether this node renders as nothing but whitespace.
    pub(crate) fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::SoftBreak => true,
            _ => false,
        }
    }
}

impl Document {
    /// Parse Markdown into a document tree.
    ///
    /// Never fails: constructs the parser does not recognize end up as text.
    #[must_use]
    pub fn parse(markdown: &str) -> Self {
        let parser = Parser::new_ext(markdown, Self::parser_options());
        let mut builder = TreeBuilder::new();
        for event in parser {
            builder.event(event);
        }
        builder.finish()
    }

    /// Parser options used for article Markdown.
    #[must_use]
    pub fn parser_options() -> Options {
        Options::ENABLE_TABLES
    }
}

/// Node under construction.
enum Frame {
    Root(Vec<Block>),
    BlockQuote(Vec<Block>),
    List {
        ordered: bool,
        items: Vec<ListItem>,
    },
    Item(Vec<Block>),
    /// Block containers without their own node (footnote definitions and the like).
    BlockGroup(Vec<Block>),
    Paragraph {
        inlines: Vec<Inline>,
        /// Opened for bare text in a tight list item.
        implicit: bool,
    },
    Heading {
        level: u8,
        inlines: Vec<Inline>,
    },
    CodeBlock {
        lang: Option<String>,
        text: String,
    },
    HtmlBlock(String),
    Table {
        head: Vec<TableCell>,
        rows: Vec<Vec<TableCell>>,
    },
    Row {
        head: bool,
        cells: Vec<TableCell>,
    },
    Cell(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Link {
        dest: String,
        children: Vec<Inline>,
    },
    Image {
        src: String,
        title: String,
        alt: String,
    },
    /// Inline containers without their own node; children are spliced into the parent.
    InlineGroup(Vec<Inline>),
}

impl Frame {
    fn holds_blocks(&self) -> bool {
        matches!(
            self,
            Self::Root(_) | Self::BlockQuote(_) | Self::Item(_) | Self::BlockGroup(_)
        )
    }
}

/// Folds `pulldown-cmark` events into a [`Document`].
struct TreeBuilder {
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame::Root(Vec::new())],
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.push_inline(Inline::Code(code.into_string())),
            Event::Html(html) => self.html(&html),
            Event::InlineHtml(html) => self.push_inline(Inline::Html(html.into_string())),
            Event::SoftBreak => self.push_inline(Inline::SoftBreak),
            Event::HardBreak => self.push_inline(Inline::HardBreak),
            Event::Rule => {
                self.close_implicit();
                self.push_block(Block::Rule);
            }
            Event::TaskListMarker(_)
            | Event::FootnoteReference(_)
            | Event::InlineMath(_)
            | Event::DisplayMath(_) => {
                // Extensions are not enabled
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => {
                self.close_implicit();
                Frame::Paragraph {
                    inlines: Vec::new(),
                    implicit: false,
                }
            }
            Tag::Heading { level, .. } => {
                self.close_implicit();
                Frame::Heading {
                    level: heading_level_to_num(level),
                    inlines: Vec::new(),
                }
            }
            Tag::BlockQuote(_) => {
                self.close_implicit();
                Frame::BlockQuote(Vec::new())
            }
            Tag::CodeBlock(kind) => {
                self.close_implicit();
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(ToOwned::to_owned),
                    CodeBlockKind::Indented => None,
                };
                Frame::CodeBlock {
                    lang,
                    text: String::new(),
                }
            }
            Tag::HtmlBlock => {
                self.close_implicit();
                Frame::HtmlBlock(String::new())
            }
            Tag::List(start) => {
                self.close_implicit();
                Frame::List {
                    ordered: start.is_some(),
                    items: Vec::new(),
                }
            }
            Tag::Item => Frame::Item(Vec::new()),
            Tag::Table(_) => {
                self.close_implicit();
                Frame::Table {
                    head: Vec::new(),
                    rows: Vec::new(),
                }
            }
            Tag::TableHead => Frame::Row {
                head: true,
                cells: Vec::new(),
            },
            Tag::TableRow => Frame::Row {
                head: false,
                cells: Vec::new(),
            },
            Tag::TableCell => Frame::Cell(Vec::new()),
            Tag::FootnoteDefinition(_)
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition => {
                self.close_implicit();
                Frame::BlockGroup(Vec::new())
            }
            Tag::Emphasis => {
                self.open_implicit();
                Frame::Emphasis(Vec::new())
            }
            Tag::Strong => {
                self.open_implicit();
                Frame::Strong(Vec::new())
            }
            Tag::Link { dest_url, .. } => {
                self.open_implicit();
                Frame::Link {
                    dest: dest_url.into_string(),
                    children: Vec::new(),
                }
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.open_implicit();
                Frame::Image {
                    src: dest_url.into_string(),
                    title: title.into_string(),
                    alt: String::new(),
                }
            }
            Tag::Strikethrough | Tag::Superscript | Tag::Subscript => {
                self.open_implicit();
                Frame::InlineGroup(Vec::new())
            }
        };
        self.stack.push(frame);
    }

    fn end_tag(&mut self, _tag: TagEnd) {
        // Events are balanced, so the frame to close is always on top
        // (after any implicit paragraph opened inside it).
        self.close_implicit();
        if self.stack.len() > 1
            && let Some(frame) = self.stack.pop()
        {
            self.attach(frame);
        }
    }

    fn text(&mut self, text: &str) {
        match self.stack.last_mut() {
            Some(Frame::CodeBlock { text: buffer, .. } | Frame::HtmlBlock(buffer)) => {
                buffer.push_str(text);
            }
            _ => self.push_inline(Inline::Text(text.to_owned())),
        }
    }

    fn html(&mut self, html: &str) {
        if let Some(Frame::HtmlBlock(buffer)) = self.stack.last_mut() {
            buffer.push_str(html);
        } else {
            self.push_inline(Inline::Html(html.to_owned()));
        }
    }

    /// Open an implicit paragraph if inline content arrives directly in a block container.
    fn open_implicit(&mut self) {
        if self.stack.last().is_some_and(Frame::holds_blocks) {
            self.stack.push(Frame::Paragraph {
                inlines: Vec::new(),
                implicit: true,
            });
        }
    }

    fn close_implicit(&mut self) {
        if matches!(
            self.stack.last(),
            Some(Frame::Paragraph { implicit: true, .. })
        ) && let Some(frame) = self.stack.pop()
        {
            self.attach(frame);
        }
    }

    fn push_block(&mut self, block: Block) {
        if let Some(
            Frame::Root(blocks)
            | Frame::BlockQuote(blocks)
            | Frame::Item(blocks)
            | Frame::BlockGroup(blocks),
        ) = self.stack.last_mut()
        {
            blocks.push(block);
        }
    }

    fn push_inline(&mut self, inline: Inline) {
        self.open_implicit();
        match self.stack.last_mut() {
            Some(
                Frame::Paragraph { inlines, .. }
                | Frame::Heading { inlines, .. }
                | Frame::Cell(inlines)
                | Frame::Emphasis(inlines)
                | Frame::Strong(inlines)
                | Frame::Link {
                    children: inlines, ..
                }
                | Frame::InlineGroup(inlines),
            ) => inlines.push(inline),
            Some(Frame::Image { alt, .. }) => alt.push_str(&inline.plain_text()),
            _ => {}
        }
    }

    /// Attach a finished frame to its parent.
    fn attach(&mut self, frame: Frame) {
        match frame {
            Frame::Paragraph { inlines, .. } => self.push_block(Block::Paragraph(inlines)),
            Frame::Heading { level, inlines } => self.push_block(Block::Heading { level, inlines }),
            Frame::BlockQuote(blocks) => self.push_block(Block::BlockQuote(blocks)),
            Frame::CodeBlock { lang, text } => self.push_block(Block::CodeBlock { lang, text }),
            Frame::HtmlBlock(html) => self.push_block(Block::Html(html)),
            Frame::List { ordered, items } => self.push_block(Block::List { ordered, items }),
            Frame::Table { head, rows } => self.push_block(Block::Table { head, rows }),
            Frame::BlockGroup(blocks) => {
                for block in blocks {
                    self.push_block(block);
                }
            }
            Frame::Item(blocks) => {
                if let Some(Frame::List { items, .. }) = self.stack.last_mut() {
                    items.push(ListItem { blocks });
                }
            }
            Frame::Row { head, cells } => {
                if let Some(Frame::Table { head: table_head, rows }) = self.stack.last_mut() {
                    if head {
                        *table_head = cells;
                    } else {
                        rows.push(cells);
                    }
                }
            }
            Frame::Cell(inlines) => {
                if let Some(Frame::Row { cells, .. }) = self.stack.last_mut() {
                    cells.push(TableCell { inlines });
                }
            }
            Frame::Emphasis(children) => self.push_inline(Inline::Emphasis(children)),
            Frame::Strong(children) => self.push_inline(Inline::Strong(children)),
            Frame::Link { dest, children } => self.push_inline(Inline::Link { dest, children }),
            Frame::Image { src, title, alt } => self.push_inline(Inline::Image { src, title, alt }),
            Frame::InlineGroup(children) => {
                for child in children {
                    self.push_inline(child);
                }
            }
            Frame::Root(blocks) => {
                // Only reachable if the root was popped; put it back.
                self.stack.insert(0, Frame::Root(blocks));
            }
        }
    }

    fn finish(mut self) -> Document {
        while self.stack.len() > 1 {
            if let Some(frame) = self.stack.pop() {
                self.attach(frame);
            }
        }
        match self.stack.pop() {
            Some(Frame::Root(blocks)) => Document { blocks },
            _ => Document::default(),
        }
    }
}
