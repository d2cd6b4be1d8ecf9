//! Approximate article length.

use std::sync::LazyLock;

use regex::Regex;

static FENCED_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());

static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]+`").unwrap());

static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[.*?\]\(.*?\)").unwrap());

/// Link syntax; group 1 is the visible text.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(.*?\)").unwrap());

static MARKUP_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[#*>\-_|=~]").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Approximate character count of a Markdown article.
///
/// Code, images, link targets, common markup characters and whitespace are
/// stripped; every remaining character counts once. This matches how Chinese
/// articles are usually measured. Latin text counts one per letter rather than
/// one per word.
///
/// # Example
///
/// ```
/// use wxpub_renderer::count_approx_length;
///
/// assert_eq!(count_approx_length("# 你好\n\n[世界](https://example.com)"), 4);
/// ```
#[must_use]
pub fn count_approx_length(markdown: &str) -> usize {
    strip_markup(markdown).chars().count()
}

fn strip_markup(markdown: &str) -> String {
    let text = FENCED_CODE_RE.replace_all(markdown, "");
    let text = INLINE_CODE_RE.replace_all(&text, "");
    let text = IMAGE_RE.replace_all(&text, "");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = MARKUP_CHARS_RE.replace_all(&text, "");
    WHITESPACE_RE.replace_all(&text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_counts_letters() {
        assert_eq!(count_approx_length("hello"), 5);
        assert_eq!(count_approx_length("hello world"), 10);
    }

    #[test]
    fn test_cjk() {
        assert_eq!(count_approx_length("你好，世界"), 5);
    }

    #[test]
    fn test_markup_removed() {
        assert_eq!(count_approx_length("# 标题\n\n正文 **加粗** _斜体_"), 8);
        assert_eq!(count_approx_length("> 引用\n\n- 一\n- 二\n\n---\n"), 4);
        assert_eq!(count_approx_length("| 表 | 格 |"), 2);
    }

    #[test]
    fn test_code_removed() {
        let markdown = "开始\n\n```rust\nfn main() {\n    println!(\"hi\");\n}\n```\n\n结束 `inline` 了";
        assert_eq!(count_approx_length(markdown), 5);
    }

    #[test]
    fn test_image_removed_link_text_kept() {
        assert_eq!(count_approx_length("![封面](cover.jpg)看[文档](https://example.com)"), 3);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(count_approx_length(""), 0);
        assert_eq!(count_approx_length(" \n\t\u{3000}"), 0);
    }

    #[test]
    fn test_strip_is_stable() {
        let markdown = "# 周报\n\n本周完成了 **三件事**：\n\n1. 写代码\n2. [看文档](https://example.com)\n";
        let stripped = strip_markup(markdown);
        assert_eq!(strip_markup(&stripped), stripped);
        assert_eq!(count_approx_length(&stripped), count_approx_length(markdown));
    }
}
