//! Configuration management for wxpub.
//!
//! Parses `wxpub.toml` with serde and discovers it in the current directory
//! or its parents. CLI settings are applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Credentials are usually kept out of the file:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `unsplash.access_key`
//! - `qiniu.access_key`
//! - `qiniu.secret_key`
//! - `qiniu.bucket`
//! - `qiniu.domain`
//!
//! ## Example
//!
//! ```toml
//! [article]
//! output = "preview/article.html"
//!
//! [unsplash]
//! access_key = "${UNSPLASH_ACCESS_KEY}"
//! query = "coffee desk"
//!
//! [qiniu]
//! access_key = "${QINIU_ACCESS_KEY}"
//! secret_key = "${QINIU_SECRET_KEY}"
//! bucket = "covers"
//! domain = "cdn.example.com"
//! region = "z2"
//! ```

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// Only `Some` values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the preview output path.
    pub output: Option<PathBuf>,
    /// Override the Unsplash search query.
    pub unsplash_query: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wxpub.toml";

/// Qiniu regions with a known upload endpoint.
pub const QINIU_REGIONS: [&str; 5] = ["z0", "z1", "z2", "na0", "as0"];

/// Photo orientations accepted by the Unsplash random endpoint.
const UNSPLASH_ORIENTATIONS: [&str; 3] = ["landscape", "portrait", "squarish"];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Article paths as written in TOML.
    article: ArticleConfigRaw,
    /// Unsplash cover search (optional section).
    pub unsplash: Option<UnsplashConfig>,
    /// Qiniu cover hosting (optional section).
    pub qiniu: Option<QiniuConfig>,

    /// Resolved article configuration (set after loading).
    #[serde(skip)]
    pub article_resolved: ArticleConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ArticleConfigRaw {
    output: Option<String>,
    cover_path: Option<String>,
}

/// Article output locations.
#[derive(Debug, Default)]
pub struct ArticleConfig {
    /// Preview HTML document.
    pub output: PathBuf,
    /// Downloaded cover image. Kept after the run since the preview links it.
    pub cover_path: PathBuf,
}

/// Unsplash configuration.
#[derive(Debug, Deserialize)]
pub struct UnsplashConfig {
    /// API access key, sent as `Client-ID`.
    pub access_key: String,
    /// Search query for random cover photos.
    #[serde(default = "default_unsplash_query")]
    pub query: String,
    /// Photo orientation.
    #[serde(default = "default_unsplash_orientation")]
    pub orientation: String,
}

impl UnsplashConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the key is empty or the orientation is unknown.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.access_key, "unsplash.access_key")?;
        require_non_empty(&self.query, "unsplash.query")?;
        require_one_of(
            &self.orientation,
            &UNSPLASH_ORIENTATIONS,
            "unsplash.orientation",
        )
    }
}

fn default_unsplash_query() -> String {
    "productivity workspace minimal".to_owned()
}

fn default_unsplash_orientation() -> String {
    "landscape".to_owned()
}

/// Qiniu object storage configuration.
#[derive(Debug, Deserialize)]
pub struct QiniuConfig {
    /// Access key.
    pub access_key: String,
    /// Secret key used to sign upload tokens.
    pub secret_key: String,
    /// Target bucket.
    pub bucket: String,
    /// Public domain bound to the bucket, with or without scheme.
    pub domain: String,
    /// Storage region, selects the upload endpoint.
    #[serde(default = "default_qiniu_region")]
    pub region: String,
    /// Prefix of uploaded object keys.
    #[serde(default = "default_qiniu_key_prefix")]
    pub key_prefix: String,
}

impl QiniuConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or the region is unknown.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.access_key, "qiniu.access_key")?;
        require_non_empty(&self.secret_key, "qiniu.secret_key")?;
        require_non_empty(&self.bucket, "qiniu.bucket")?;
        require_non_empty(&self.domain, "qiniu.domain")?;
        require_one_of(&self.region, &QINIU_REGIONS, "qiniu.region")
    }
}

fn default_qiniu_region() -> String {
    "z0".to_owned()
}

fn default_qiniu_key_prefix() -> String {
    "wx_cover_".to_owned()
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`qiniu.secret_key`").
        field: String,
        /// Error message (e.g., "${`QINIU_SECRET_KEY`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_one_of(value: &str, allowed: &[&str], field: &str) -> Result<(), ConfigError> {
    if !allowed.contains(&value) {
        return Err(ConfigError::Validation(format!(
            "{field} must be one of {}, got '{value}'",
            allowed.join(", ")
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise, searches
    /// for `wxpub.toml` in the current directory and parents, falling back to
    /// defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// an environment variable is missing, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output) = &settings.output {
            self.article_resolved.output.clone_from(output);
        }
        if let Some(query) = &settings.unsplash_query
            && let Some(unsplash) = &mut self.unsplash
        {
            unsplash.query.clone_from(query);
        }
    }

    /// Get validated Unsplash configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_unsplash(&self) -> Result<&UnsplashConfig, ConfigError> {
        let unsplash = self.unsplash.as_ref().ok_or_else(|| {
            ConfigError::Validation("[unsplash] section required in config".into())
        })?;
        unsplash.validate()?;
        Ok(unsplash)
    }

    /// Get validated Qiniu configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_qiniu(&self) -> Result<&QiniuConfig, ConfigError> {
        let qiniu = self
            .qiniu
            .as_ref()
            .ok_or_else(|| ConfigError::Validation("[qiniu] section required in config".into()))?;
        qiniu.validate()?;
        Ok(qiniu)
    }

    /// Search for the config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            article: ArticleConfigRaw::default(),
            unsplash: None,
            qiniu: None,
            article_resolved: ArticleConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate the sections that are present.
    ///
    /// A missing `[unsplash]` or `[qiniu]` section is valid; commands that
    /// need one call [`Config::require_unsplash`] or [`Config::require_qiniu`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(unsplash) = &self.unsplash {
            unsplash.validate()?;
        }
        if let Some(qiniu) = &self.qiniu {
            qiniu.validate()?;
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref mut unsplash) = self.unsplash {
            unsplash.access_key = expand::expand_env(&unsplash.access_key, "unsplash.access_key")?;
        }

        if let Some(ref mut qiniu) = self.qiniu {
            qiniu.access_key = expand::expand_env(&qiniu.access_key, "qiniu.access_key")?;
            qiniu.secret_key = expand::expand_env(&qiniu.secret_key, "qiniu.secret_key")?;
            qiniu.bucket = expand::expand_env(&qiniu.bucket, "qiniu.bucket")?;
            qiniu.domain = expand::expand_env(&qiniu.domain, "qiniu.domain")?;
        }

        Ok(())
    }

    /// Resolve article paths relative to the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.article_resolved = ArticleConfig {
            output: resolve(self.article.output.as_deref(), "article_preview.html"),
            cover_path: resolve(self.article.cover_path.as_deref(), "cover_temp.jpg"),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn valid_qiniu_config() -> QiniuConfig {
        QiniuConfig {
            access_key: "ak".to_owned(),
            secret_key: "sk".to_owned(),
            bucket: "covers".to_owned(),
            domain: "cdn.example.com".to_owned(),
            region: "z0".to_owned(),
            key_prefix: "wx_cover_".to_owned(),
        }
    }

    fn assert_validation_error(result: Result<(), ConfigError>, expected_substrings: &[&str]) {
        let err = result.expect_err("expected validation to fail");
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(msg.contains(s), "Expected error to contain '{s}', got: {msg}");
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/work"));
        assert_eq!(
            config.article_resolved.output,
            PathBuf::from("/work/article_preview.html")
        );
        assert_eq!(
            config.article_resolved.cover_path,
            PathBuf::from("/work/cover_temp.jpg")
        );
        assert!(config.unsplash.is_none());
        assert!(config.qiniu.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.unsplash.is_none());
        assert!(config.qiniu.is_none());
    }

    #[test]
    fn test_parse_unsplash_defaults() {
        let toml = r#"
[unsplash]
access_key = "key"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let unsplash = config.unsplash.unwrap();
        assert_eq!(unsplash.access_key, "key");
        assert_eq!(unsplash.query, "productivity workspace minimal");
        assert_eq!(unsplash.orientation, "landscape");
    }

    #[test]
    fn test_parse_qiniu_defaults() {
        let toml = r#"
[qiniu]
access_key = "ak"
secret_key = "sk"
bucket = "covers"
domain = "cdn.example.com"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let qiniu = config.qiniu.unwrap();
        assert_eq!(qiniu.region, "z0");
        assert_eq!(qiniu.key_prefix, "wx_cover_");
    }

    #[test]
    fn test_qiniu_section_missing_field_fails_parse() {
        let toml = r#"
[qiniu]
access_key = "ak"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[article]
output = "out/preview.html"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.article_resolved.output,
            PathBuf::from("/project/out/preview.html")
        );
        assert_eq!(
            config.article_resolved.cover_path,
            PathBuf::from("/project/cover_temp.jpg")
        );
    }

    #[test]
    fn test_validate_qiniu_region() {
        let mut qiniu = valid_qiniu_config();
        assert!(qiniu.validate().is_ok());
        qiniu.region = "cn-east-1".to_owned();
        assert_validation_error(qiniu.validate(), &["qiniu.region", "z0", "cn-east-1"]);
    }

    #[test]
    fn test_validate_qiniu_empty_secret() {
        let mut qiniu = valid_qiniu_config();
        qiniu.secret_key = String::new();
        assert_validation_error(qiniu.validate(), &["qiniu.secret_key", "empty"]);
    }

    #[test]
    fn test_validate_unsplash_orientation() {
        let unsplash = UnsplashConfig {
            access_key: "key".to_owned(),
            query: "desk".to_owned(),
            orientation: "wide".to_owned(),
        };
        assert_validation_error(unsplash.validate(), &["unsplash.orientation"]);
    }

    #[test]
    fn test_require_sections_missing() {
        let config = Config::default_with_base(Path::new("/work"));
        assert_validation_error(config.require_unsplash().map(|_| ()), &["[unsplash]"]);
        assert_validation_error(config.require_qiniu().map(|_| ()), &["[qiniu]"]);
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config: Config = toml::from_str(
            r#"
[unsplash]
access_key = "key"
"#,
        )
        .unwrap();
        config.resolve_paths(Path::new("/work"));
        config.apply_cli_settings(&CliSettings {
            output: Some(PathBuf::from("/tmp/out.html")),
            unsplash_query: Some("mountains".to_owned()),
        });
        assert_eq!(config.article_resolved.output, PathBuf::from("/tmp/out.html"));
        assert_eq!(config.unsplash.unwrap().query, "mountains");
    }

    #[test]
    fn test_apply_cli_query_without_section() {
        let mut config = Config::default_with_base(Path::new("/work"));
        config.apply_cli_settings(&CliSettings {
            unsplash_query: Some("mountains".to_owned()),
            ..CliSettings::default()
        });
        assert!(config.unsplash.is_none());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
[article]
output = "draft.html"

[qiniu]
access_key = "ak"
secret_key = "sk"
bucket = "covers"
domain = "https://cdn.example.com"
region = "as0"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.article_resolved.output, dir.path().join("draft.html"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.require_qiniu().unwrap().region, "as0");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_region_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wxpub.toml");
        std::fs::write(
            &path,
            r#"
[qiniu]
access_key = "ak"
secret_key = "sk"
bucket = "covers"
domain = "cdn.example.com"
region = "mars"
"#,
        )
        .unwrap();
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_expands_env() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("WXPUB_TEST_LOAD_KEY", "from-env");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wxpub.toml");
        std::fs::write(
            &path,
            r#"
[unsplash]
access_key = "${WXPUB_TEST_LOAD_KEY}"
"#,
        )
        .unwrap();
        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.require_unsplash().unwrap().access_key, "from-env");
        unsafe {
            std::env::remove_var("WXPUB_TEST_LOAD_KEY");
        }
    }

    #[test]
    fn test_load_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wxpub.toml");
        std::fs::write(&path, "[article\noutput = ").unwrap();
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("posts/2026");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        let found = Config::discover_config(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILENAME));
    }
}
