//! `${VAR}` expansion for secrets kept out of `wxpub.toml`.

use crate::ConfigError;

/// Expand environment variable references in a config value.
///
/// `${VAR}` fails when VAR is unset, `${VAR:-default}` falls back to the
/// default. Values without `${` are returned as is, so a literal `$` in a key
/// or URL survives.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that is not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_whole_value() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("WXPUB_TEST_UNSPLASH_KEY", "abc123");
        }
        let result = expand_env("${WXPUB_TEST_UNSPLASH_KEY}", "unsplash.access_key").unwrap();
        assert_eq!(result, "abc123");
        unsafe {
            std::env::remove_var("WXPUB_TEST_UNSPLASH_KEY");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("WXPUB_TEST_UNSET_REGION");
        }
        let result = expand_env("${WXPUB_TEST_UNSET_REGION:-z2}", "qiniu.region").unwrap();
        assert_eq!(result, "z2");
    }

    #[test]
    fn test_expand_embedded() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("WXPUB_TEST_CDN_HOST", "cdn.example.com");
        }
        let result = expand_env("https://${WXPUB_TEST_CDN_HOST}/", "qiniu.domain").unwrap();
        assert_eq!(result, "https://cdn.example.com/");
        unsafe {
            std::env::remove_var("WXPUB_TEST_CDN_HOST");
        }
    }

    #[test]
    fn test_expand_missing_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("WXPUB_TEST_MISSING_SECRET");
        }
        let err = expand_env("${WXPUB_TEST_MISSING_SECRET}", "qiniu.secret_key").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("WXPUB_TEST_MISSING_SECRET"));
        assert!(msg.contains("qiniu.secret_key"));
    }

    #[test]
    fn test_literal_dollar_unchanged() {
        assert_eq!(expand_env("pa$$word", "qiniu.secret_key").unwrap(), "pa$$word");
    }
}
