//! `wxpub cover` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use wxpub_config::{CliSettings, Config, QiniuConfig, UnsplashConfig};
use wxpub_cover::{Photo, QiniuUploader, UnsplashClient};

use crate::article::write_file;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the cover command.
#[derive(Args)]
pub(crate) struct CoverArgs {
    /// Unsplash search query (overrides config).
    #[arg(short, long)]
    query: Option<String>,

    /// Where to save the image (default: `article.cover_path` from config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep the image local even when Qiniu is configured.
    #[arg(long)]
    no_upload: bool,
}

impl CoverArgs {
    /// Execute the cover command.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            unsplash_query: self.query.clone(),
            ..Default::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;
        let unsplash = require_unsplash_config(&config, &output)?;

        let path = self
            .output
            .clone()
            .unwrap_or_else(|| config.article_resolved.cover_path.clone());
        let photo = download_cover(unsplash, &path, &output)?;

        if !self.no_upload
            && let Some(qiniu) = &config.qiniu
        {
            let url = upload_cover(qiniu, &path, &output)?;
            output.value(&url);
        }

        output.info(&format!("Attribution: {}", photo.attribution()));
        if let Some(profile) = &photo.profile_url {
            output.info(&format!("Photographer: {profile}"));
        }
        Ok(())
    }
}

fn require_unsplash_config<'a>(
    config: &'a Config,
    output: &Output,
) -> Result<&'a UnsplashConfig, CliError> {
    if config.unsplash.is_none() {
        output.error("Error: unsplash configuration required in wxpub.toml");
        output.info("\nAdd the following to your wxpub.toml:");
        output.info("\n[unsplash]");
        output.info(r#"access_key = "${UNSPLASH_ACCESS_KEY}""#);
    }
    Ok(config.require_unsplash()?)
}

/// Fetch a random photo for the configured query and save it to `path`.
pub(crate) fn download_cover(
    unsplash: &UnsplashConfig,
    path: &Path,
    output: &Output,
) -> Result<Photo, CliError> {
    output.info(&format!("Searching Unsplash for \"{}\"...", unsplash.query));
    let client = UnsplashClient::from_config(unsplash);
    let photo = client.random_photo(&unsplash.query)?;
    output.info(&format!("  Photographer: {}", photo.photographer));

    let bytes = client.download(&photo)?;
    write_file(path, &bytes)?;
    output.success(&format!("  Saved cover to {}", path.display()));
    Ok(photo)
}

/// Upload a saved cover to Qiniu and return its public URL.
pub(crate) fn upload_cover(
    qiniu: &QiniuConfig,
    path: &Path,
    output: &Output,
) -> Result<String, CliError> {
    output.info("Uploading cover to Qiniu...");
    let url = QiniuUploader::from_config(qiniu).upload_file(path)?;
    output.success(&format!("  {url}"));
    Ok(url)
}
