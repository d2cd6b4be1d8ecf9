//! `wxpub render` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use wxpub_config::{CliSettings, Config};
use wxpub_renderer::{RenderOptions, Stats, count_approx_length, render};

use crate::article::{completion_time, extract_title, read_markdown, write_file};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the markdown file.
    markdown_file: PathBuf,

    /// Output HTML path (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Cover image path or URL shown above the article.
    #[arg(long)]
    cover: Option<String>,

    /// Cover attribution shown in the footer.
    #[arg(long)]
    cover_source: Option<String>,

    /// Completion time shown in the footer (default: now).
    #[arg(long)]
    completed_at: Option<String>,

    /// Time spent writing, shown in the footer.
    #[arg(long)]
    duration: Option<String>,

    /// Additional footer line (repeatable).
    #[arg(long = "extra", value_name = "LINE")]
    extra: Vec<String>,

    /// Do not append the statistics footer.
    #[arg(long)]
    no_stats: bool,
}

impl RenderArgs {
    /// Execute the render command.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output: self.output.clone(),
            ..Default::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let markdown = read_markdown(&self.markdown_file)?;
        output.info(&format!("Rendering {}...", self.markdown_file.display()));

        let word_count = count_approx_length(&markdown);
        let options = RenderOptions {
            cover_image_path: self.cover.clone(),
            stats: (!self.no_stats).then(|| self.stats(word_count)),
        };
        let html = render(&markdown, &options);

        let preview = &config.article_resolved.output;
        write_file(preview, &html)?;

        output.success(&format!("Preview written to {}", preview.display()));
        print_summary(&output, extract_title(&markdown).as_deref(), word_count);
        Ok(())
    }

    fn stats(&self, word_count: usize) -> Stats {
        Stats {
            completed_at: Some(self.completed_at.clone().unwrap_or_else(completion_time)),
            word_count: Some(word_count),
            duration: self.duration.clone(),
            cover_source: self.cover_source.clone(),
            extra: self.extra.clone(),
        }
    }
}

pub(crate) fn print_summary(output: &Output, title: Option<&str>, word_count: usize) {
    match title {
        Some(title) => output.info(&format!("Title: {title}")),
        None => output.warning("No '# ' heading found, enter the title manually"),
    }
    output.info(&format!("Length: about {word_count} characters"));
}
