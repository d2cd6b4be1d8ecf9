//! Shared utility functions for markdown rendering.

use std::borrow::Cow;

use pulldown_cmark::HeadingLevel;

/// Escape text for use in HTML element content and attribute values.
///
/// # Examples
///
/// ```
/// use wxpub_renderer::escape_html;
///
/// assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

/// Escape only angle brackets, leaving entities and quotes alone.
///
/// Code block content goes through this so the editor never interprets
/// embedded markup.
pub(crate) fn escape_angle_brackets(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

/// Make a URL safe to place inside a double-quoted attribute.
///
/// The URL is otherwise kept verbatim.
pub(crate) fn quote_attribute(url: &str) -> Cow<'_, str> {
    if url.contains('"') {
        Cow::Owned(url.replace('"', "&quot;"))
    } else {
        Cow::Borrowed(url)
    }
}

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_borrows_when_clean() {
        assert!(matches!(escape_html("你好 world"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_html_all_specials() {
        assert_eq!(escape_html(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn test_escape_angle_brackets_keeps_ampersand() {
        assert_eq!(
            escape_angle_brackets("if a < b && c > d"),
            "if a &lt; b && c &gt; d"
        );
    }

    #[test]
    fn test_quote_attribute() {
        assert_eq!(
            quote_attribute("https://example.com/?a=1&b=2"),
            "https://example.com/?a=1&b=2"
        );
        assert_eq!(quote_attribute(r#"x"y"#), "x&quot;y");
    }

    #[test]
    fn test_heading_level_to_num() {
        assert_eq!(heading_level_to_num(HeadingLevel::H1), 1);
        assert_eq!(heading_level_to_num(HeadingLevel::H4), 4);
        assert_eq!(heading_level_to_num(HeadingLevel::H6), 6);
    }
}
