//! `wxpub publish` command implementation.
//!
//! Prepares everything for a manual paste into the WeChat editor: cover
//! photo, optional hosted cover URL, and the preview document with footer.

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::warn;
use wxpub_config::{CliSettings, Config};
use wxpub_cover::Photo;
use wxpub_renderer::{ARTICLE_CONTAINER_ID, RenderOptions, Stats, count_approx_length, render};

use super::cover::{download_cover, upload_cover};
use super::render::print_summary;
use crate::article::{completion_time, cover_reference, extract_title, read_markdown, write_file};
use crate::error::CliError;
use crate::output::Output;

/// WeChat Official Account platform.
const WECHAT_PLATFORM_URL: &str = "https://mp.weixin.qq.com/";

/// Arguments for the publish command.
#[derive(Args)]
pub(crate) struct PublishArgs {
    /// Path to the markdown file.
    markdown_file: PathBuf,

    /// Unsplash search query (overrides config).
    #[arg(short, long)]
    query: Option<String>,

    /// Output HTML path (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Time spent writing, shown in the footer.
    #[arg(long)]
    duration: Option<String>,

    /// Additional footer line (repeatable).
    #[arg(long = "extra", value_name = "LINE")]
    extra: Vec<String>,

    /// Skip fetching a cover photo.
    #[arg(long)]
    no_cover: bool,
}

/// Cover prepared for the article.
struct PreparedCover {
    photo: Photo,
    path: PathBuf,
    hosted_url: Option<String>,
}

impl PublishArgs {
    /// Execute the publish command.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output: self.output.clone(),
            unsplash_query: self.query.clone(),
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        let markdown = read_markdown(&self.markdown_file)?;

        output.highlight("wxpub - WeChat article publisher");
        output.separator();

        let cover = if self.no_cover {
            None
        } else {
            prepare_cover(&config, &output)
        };

        let preview = &config.article_resolved.output;
        let word_count = count_approx_length(&markdown);
        let options = RenderOptions {
            cover_image_path: cover.as_ref().map(|cover| match &cover.hosted_url {
                Some(url) => url.clone(),
                None => cover_reference(&cover.path, preview),
            }),
            stats: Some(Stats {
                completed_at: Some(completion_time()),
                word_count: Some(word_count),
                duration: self.duration.clone(),
                cover_source: cover.as_ref().map(|cover| cover.photo.attribution()),
                extra: self.extra.clone(),
            }),
        };

        output.info(&format!("Rendering {}...", self.markdown_file.display()));
        let html = render(&markdown, &options);
        write_file(preview, &html)?;
        output.success(&format!("Preview written to {}", preview.display()));

        let title = extract_title(&markdown);
        print_summary(&output, title.as_deref(), word_count);
        print_manual_steps(&output, preview, title.as_deref(), cover.as_ref());
        Ok(())
    }
}

/// Fetch and optionally host the cover; failures only cost the cover.
fn prepare_cover(config: &Config, output: &Output) -> Option<PreparedCover> {
    let Some(unsplash) = &config.unsplash else {
        output.warning("No [unsplash] section in wxpub.toml, skipping cover");
        return None;
    };

    let path = config.article_resolved.cover_path.clone();
    let photo = match download_cover(unsplash, &path, output) {
        Ok(photo) => photo,
        Err(err) => {
            warn!("cover fetch failed: {err}");
            output.warning(&format!("  Cover failed: {err} (continuing without cover)"));
            return None;
        }
    };

    let hosted_url = config
        .qiniu
        .as_ref()
        .and_then(|qiniu| match upload_cover(qiniu, &path, output) {
            Ok(url) => Some(url),
            Err(err) => {
                warn!("cover upload failed: {err}");
                output.warning(&format!("  Upload failed: {err} (using local cover)"));
                None
            }
        });

    Some(PreparedCover {
        photo,
        path,
        hosted_url,
    })
}

fn print_manual_steps(
    output: &Output,
    preview: &Path,
    title: Option<&str>,
    cover: Option<&PreparedCover>,
) {
    output.separator();
    output.success("Article is ready. In the browser:");
    output.info(&format!("  1. Open {}", preview.display()));
    output.info(&format!(
        "  2. Select everything inside #{ARTICLE_CONTAINER_ID} and copy it"
    ));
    output.info(&format!(
        "  3. Log in to {WECHAT_PLATFORM_URL} and create a new article"
    ));
    match title {
        Some(title) => output.info(&format!("  4. Fill in the title: {title}")),
        None => output.info("  4. Fill in the title"),
    }
    output.info("  5. Paste the body into the editor");
    match cover {
        Some(cover) => output.info(&format!(
            "  6. Upload {} as the cover image",
            cover.path.display()
        )),
        None => output.info("  6. Pick a cover image"),
    }
    output.info("  7. Review the draft, then save or publish it");

    if let Some(url) = cover.and_then(|cover| cover.hosted_url.as_deref()) {
        output.info(&format!("\nCover URL: {url}"));
    }
    output.separator();
}
