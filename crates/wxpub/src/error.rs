//! CLI error types.

use wxpub_config::ConfigError;
use wxpub_cover::CoverError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Cover(#[from] CoverError),

    #[error("{0}")]
    Validation(String),
}
