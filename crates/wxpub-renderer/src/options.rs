//! Rendering options.

/// Options for article rendering.
///
/// Everything is optional; an absent value omits the matching output
/// fragment instead of rendering it empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct RenderOptions {
    /// Local cover image reference, inserted before the body.
    pub cover_image_path: Option<String>,
    /// Footer statistics.
    pub stats: Option<Stats>,
}

/// Footer statistics.
///
/// Display strings are pre-formatted by the caller; the renderer never
/// computes times itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct Stats {
    /// Completion time.
    pub completed_at: Option<String>,
    /// Approximate character count.
    pub word_count: Option<usize>,
    /// Time spent writing.
    pub duration: Option<String>,
    /// Cover image attribution.
    pub cover_source: Option<String>,
    /// Additional lines, rendered after the fixed fields in order.
    pub extra: Vec<String>,
}

impl RenderOptions {
    /// Cover image reference, if set and non-empty.
    pub(crate) fn cover_image(&self) -> Option<&str> {
        self.cover_image_path
            .as_deref()
            .filter(|path| !path.is_empty())
    }

    /// Footer lines, empty when nothing is set.
    pub(crate) fn footer_lines(&self) -> Vec<String> {
        self.stats.as_ref().map(Stats::lines).unwrap_or_default()
    }
}

impl Stats {
    /// Footer lines in fixed field order.
    ///
    /// Empty strings and a zero word count count as absent.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(completed_at) = present(self.completed_at.as_deref()) {
            lines.push(format!("📅 完成时间：{completed_at}"));
        }
        if let Some(word_count) = self.word_count.filter(|&count| count > 0) {
            lines.push(format!("📝 全文字数：约 {word_count} 字"));
        }
        if let Some(duration) = present(self.duration.as_deref()) {
            lines.push(format!("⏱️ 撰写耗时：{duration}"));
        }
        if let Some(cover_source) = present(self.cover_source.as_deref()) {
            lines.push(format!("🖼️ 封面来源：{cover_source}"));
        }
        lines.extend(self.extra.iter().cloned());
        lines
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_lines_empty_by_default() {
        assert!(Stats::default().lines().is_empty());
        assert!(RenderOptions::default().footer_lines().is_empty());
    }

    #[test]
    fn test_lines_fixed_order() {
        let stats = Stats {
            completed_at: Some("2026-10-17 09:30".to_owned()),
            word_count: Some(1200),
            duration: Some("2 小时".to_owned()),
            cover_source: Some("Unsplash / Jane Doe".to_owned()),
            extra: vec!["✍️ 初稿".to_owned(), "🔁 二稿".to_owned()],
        };
        assert_eq!(
            stats.lines(),
            vec![
                "📅 完成时间：2026-10-17 09:30",
                "📝 全文字数：约 1200 字",
                "⏱️ 撰写耗时：2 小时",
                "🖼️ 封面来源：Unsplash / Jane Doe",
                "✍️ 初稿",
                "🔁 二稿",
            ]
        );
    }

    #[test]
    fn test_lines_skip_empty_and_zero() {
        let stats = Stats {
            completed_at: Some(String::new()),
            word_count: Some(0),
            duration: Some("1h".to_owned()),
            ..Stats::default()
        };
        assert_eq!(stats.lines(), vec!["⏱️ 撰写耗时：1h"]);
    }

    #[test]
    fn test_cover_image_ignores_empty() {
        let options = RenderOptions {
            cover_image_path: Some(String::new()),
            ..RenderOptions::default()
        };
        assert_eq!(options.cover_image(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_camel_case() {
        let options: RenderOptions = serde_json::from_str(
            r#"{"coverImagePath": "cover.jpg", "stats": {"wordCount": 42, "extra": ["x"]}}"#,
        )
        .unwrap();
        assert_eq!(options.cover_image_path.as_deref(), Some("cover.jpg"));
        let stats = options.stats.unwrap();
        assert_eq!(stats.word_count, Some(42));
        assert_eq!(stats.extra, vec!["x"]);
        assert_eq!(stats.duration, None);
    }
}
