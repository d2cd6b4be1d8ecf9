//! Article file helpers shared by commands.

use std::path::Path;

use chrono::Local;

use crate::error::CliError;

/// Format of the footer's completion time.
const COMPLETION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Suggested article title: the first level-1 ATX heading.
pub(crate) fn extract_title(markdown: &str) -> Option<String> {
    markdown
        .lines()
        .filter_map(|line| line.strip_prefix("# "))
        .map(str::trim)
        .find(|title| !title.is_empty())
        .map(ToOwned::to_owned)
}

/// Current local time for the footer.
pub(crate) fn completion_time() -> String {
    Local::now().format(COMPLETION_TIME_FORMAT).to_string()
}

/// Read a Markdown source file.
pub(crate) fn read_markdown(path: &Path) -> Result<String, CliError> {
    if !path.exists() {
        return Err(CliError::Validation(format!(
            "Markdown file not found: {}",
            path.display()
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Write an output file, creating parent directories as needed.
pub(crate) fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), CliError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}

/// Reference to a local cover image from the preview document.
///
/// Relative to the preview's directory when the cover lives under it, so the
/// preview keeps working when the folder is moved.
pub(crate) fn cover_reference(cover: &Path, preview: &Path) -> String {
    let base = preview.parent().unwrap_or(Path::new(""));
    let reference = if base.as_os_str().is_empty() {
        cover
    } else {
        cover.strip_prefix(base).unwrap_or(cover)
    };
    reference.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_extract_title() {
        assert_eq!(
            extract_title("# 我的第一篇文章 \n\n正文"),
            Some("我的第一篇文章".to_owned())
        );
    }

    #[test]
    fn test_extract_title_skips_subheadings() {
        assert_eq!(
            extract_title("intro\n## Sub\n# Main\n# Later"),
            Some("Main".to_owned())
        );
    }

    #[test]
    fn test_extract_title_none() {
        assert_eq!(extract_title("#NoSpace\n## Sub\n    # code"), None);
        assert_eq!(extract_title("# \n"), None);
        assert_eq!(extract_title(""), None);
    }

    #[test]
    fn test_completion_time_format() {
        let time = completion_time();
        assert_eq!(time.len(), "2026-10-17 09:30".len());
        assert_eq!(&time[4..5], "-");
        assert_eq!(&time[10..11], " ");
        assert_eq!(&time[13..14], ":");
    }

    #[test]
    fn test_read_markdown_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_markdown(&dir.path().join("missing.md")).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[test]
    fn test_write_file_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested/preview.html");
        write_file(&path, "<html></html>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_cover_reference_relative() {
        assert_eq!(
            cover_reference(
                &PathBuf::from("/work/cover_temp.jpg"),
                &PathBuf::from("/work/article_preview.html")
            ),
            "cover_temp.jpg"
        );
        assert_eq!(
            cover_reference(
                &PathBuf::from("/work/img/cover.jpg"),
                &PathBuf::from("/work/article_preview.html")
            ),
            "img/cover.jpg"
        );
    }

    #[test]
    fn test_cover_reference_outside_preview_dir() {
        assert_eq!(
            cover_reference(
                &PathBuf::from("/tmp/cover.jpg"),
                &PathBuf::from("/work/out/preview.html")
            ),
            "/tmp/cover.jpg"
        );
        assert_eq!(
            cover_reference(&PathBuf::from("cover.jpg"), &PathBuf::from("preview.html")),
            "cover.jpg"
        );
    }
}
