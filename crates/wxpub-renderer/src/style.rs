//! Inline style table.
//!
//! Every element the renderer emits maps to exactly one [`Element`] variant,
//! and every variant maps to exactly one declaration string. The exhaustive
//! `match` in [`Element::style`] keeps the two in lockstep.

/// Kind of styled element produced by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    BlockQuote,
    BlockQuoteParagraph,
    InlineCode,
    CodeBlock,
    UnorderedList,
    OrderedList,
    ListItem,
    Strong,
    Emphasis,
    Link,
    Rule,
    Image,
    Table,
    TableHeaderCell,
    TableCell,
    FooterSection,
    FooterLabel,
    FooterLine,
}

impl Element {
    /// All element kinds, in table order.
    pub const ALL: [Self; 22] = [
        Self::Heading1,
        Self::Heading2,
        Self::Heading3,
        Self::Paragraph,
        Self::BlockQuote,
        Self::BlockQuoteParagraph,
        Self::InlineCode,
        Self::CodeBlock,
        Self::UnorderedList,
        Self::OrderedList,
        Self::ListItem,
        Self::Strong,
        Self::Emphasis,
        Self::Link,
        Self::Rule,
        Self::Image,
        Self::Table,
        Self::TableHeaderCell,
        Self::TableCell,
        Self::FooterSection,
        Self::FooterLabel,
        Self::FooterLine,
    ];

    /// Heading style for a Markdown heading level.
    ///
    /// Levels past 3 share the level-3 style.
    #[must_use]
    pub fn heading(level: u8) -> Self {
        match level {
            1 => Self::Heading1,
            2 => Self::Heading2,
            _ => Self::Heading3,
        }
    }

    /// Inline style declarations for this element.
    #[must_use]
    pub const fn style(self) -> &'static str {
        match self {
            Self::Heading1 => {
                "font-size: 20px; font-weight: 700; color: #1a1a2e; text-align: center; margin: 36px 0 24px; line-height: 1.5; letter-spacing: 0.5px;"
            }
            Self::Heading2 => {
                "font-size: 16px; font-weight: 700; color: #1a1a2e; border-left: 3px solid #2b5cd9; padding-left: 12px; margin: 40px 0 16px; line-height: 1.5; letter-spacing: 0.3px;"
            }
            Self::Heading3 => {
                "font-size: 15px; font-weight: 700; color: #333; margin: 28px 0 12px; line-height: 1.5;"
            }
            // 14px with line height 2 reads best on the WeChat mobile client
            Self::Paragraph => {
                "margin: 8px 0 18px; font-size: 14px; line-height: 2; color: #333; letter-spacing: 0.3px;"
            }
            Self::BlockQuote => {
                "border-left: 3px solid #e0e0e0; padding: 10px 16px; margin: 20px 0; background: #fafbfc; color: #666; border-radius: 0 6px 6px 0;"
            }
            Self::BlockQuoteParagraph => {
                "margin: 4px 0; font-size: 13px; line-height: 1.8; color: #777;"
            }
            Self::InlineCode => {
                "background: #f4f5f7; padding: 2px 5px; border-radius: 3px; font-size: 13px; color: #c7254e; font-family: 'Courier New', Consolas, monospace;"
            }
            Self::CodeBlock => {
                "background: #282c34; color: #abb2bf; border-radius: 6px; padding: 14px 16px; font-family: 'Courier New', Consolas, monospace; font-size: 12px; margin: 20px 0; white-space: pre-wrap; line-height: 1.7; overflow-x: auto;"
            }
            Self::UnorderedList | Self::OrderedList => {
                "margin: 8px 0 20px; padding-left: 0; list-style: none;"
            }
            Self::ListItem => {
                "margin: 6px 0; font-size: 14px; line-height: 2; color: #333; padding-left: 0;"
            }
            Self::Strong => "color: #1a1a2e; font-weight: 700;",
            Self::Emphasis => "font-style: italic; color: #666;",
            Self::Link => {
                "color: #2b5cd9; text-decoration: none; border-bottom: 1px solid rgba(43,92,217,0.3);"
            }
            Self::Rule => "border: none; border-top: 1px solid #eaeaea; margin: 40px 0;",
            Self::Image => "max-width: 100%; border-radius: 6px; margin: 20px 0; display: block;",
            Self::Table => "width: 100%; border-collapse: collapse; margin: 20px 0; font-size: 13px;",
            Self::TableHeaderCell => {
                "background: #f4f5f7; padding: 8px 10px; text-align: left; border: 1px solid #e5e5e5; font-weight: 600; font-size: 13px;"
            }
            Self::TableCell => "padding: 8px 10px; border: 1px solid #e5e5e5; font-size: 13px;",
            Self::FooterSection => {
                "background: #f8f9fa; border-radius: 10px; padding: 16px 20px; margin: 20px 0; border: 1px solid #eee;"
            }
            Self::FooterLabel => "font-size: 14px; font-weight: bold; color: #999; margin: 0 0 10px;",
            Self::FooterLine => "font-size: 13px; color: #888; margin: 4px 0; line-height: 1.8;",
        }
    }
}

/// Extra declarations appended to the image style for the leading cover image.
pub(crate) const COVER_IMAGE_EXTRA: &str = "margin-bottom: 24px;";

/// Page-level stylesheet for the preview document.
///
/// Only affects the local preview; WeChat drops it on paste.
pub(crate) const PAGE_STYLESHEET: &str = "  body {
    max-width: 680px;
    margin: 40px auto;
    font-family: -apple-system, BlinkMacSystemFont, 'Helvetica Neue', 'PingFang SC', 'Microsoft YaHei', sans-serif;
    font-size: 14px;
    line-height: 2;
    color: #2c2c2c;
    padding: 0 20px;
  }";
