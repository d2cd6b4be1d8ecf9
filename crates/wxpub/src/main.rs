//! wxpub CLI - WeChat Official Account article publisher.
//!
//! Provides commands for:
//! - `render`: Convert Markdown into the inline-styled preview document
//! - `count`: Print the approximate article length
//! - `cover`: Fetch a cover photo from Unsplash and host it on Qiniu
//! - `publish`: Cover, render and print the steps for pasting into WeChat

mod article;
mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CountArgs, CoverArgs, PublishArgs, RenderArgs};
use output::Output;

/// wxpub - WeChat Official Account article publisher.
#[derive(Parser)]
#[command(name = "wxpub", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover wxpub.toml).
    #[arg(short, long, global = true, env = "WXPUB_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render Markdown into the article preview document.
    Render(RenderArgs),
    /// Print the approximate length of a Markdown article.
    Count(CountArgs),
    /// Fetch a cover photo and upload it to Qiniu.
    Cover(CoverArgs),
    /// Prepare an article for pasting into the WeChat editor.
    Publish(PublishArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Render(args) => args.execute(config),
        Commands::Count(args) => args.execute(),
        Commands::Cover(args) => args.execute(config),
        Commands::Publish(args) => args.execute(config),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
