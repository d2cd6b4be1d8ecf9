//! `wxpub count` command implementation.

use std::path::PathBuf;

use clap::Args;
use wxpub_renderer::count_approx_length;

use crate::article::read_markdown;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the count command.
#[derive(Args)]
pub(crate) struct CountArgs {
    /// Path to the markdown file.
    markdown_file: PathBuf,
}

impl CountArgs {
    /// Execute the count command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let markdown = read_markdown(&self.markdown_file)?;
        output.value(&count_approx_length(&markdown).to_string());
        Ok(())
    }
}
