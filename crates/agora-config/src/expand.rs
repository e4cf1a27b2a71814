//! `${VAR}` and `${VAR:-default}` expansion for URL settings.

use crate::ConfigError;

/// Name of the variable that was referenced but not set.
struct UnsetVar(String);

/// Expand environment variable references in a configuration value.
///
/// Values without `${` are returned as-is, so a literal `$` in an upload
/// path survives untouched.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let lookup = |name: &str| -> Result<Option<String>, UnsetVar> {
        std::env::var(name)
            .map(Some)
            .map_err(|_| UnsetVar(name.to_owned()))
    };

    match shellexpand::env_with_context(value, lookup) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(e) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.cause.0),
        }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_expand_cdn_host() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TEST_EXPAND_CDN_HOST", "cdn.example.com");
        }
        let result = expand_env("https://${TEST_EXPAND_CDN_HOST}/forum", "storage.base_url");
        assert_eq!(result.unwrap(), "https://cdn.example.com/forum");
        unsafe {
            std::env::remove_var("TEST_EXPAND_CDN_HOST");
        }
    }

    #[test]
    fn test_expand_falls_back_to_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TEST_EXPAND_UNSET_UPLOADS");
        }
        let result = expand_env("${TEST_EXPAND_UNSET_UPLOADS:-/content/uploads}", "x").unwrap();
        assert_eq!(result, "/content/uploads");
    }

    #[test]
    fn test_expand_reports_missing_var_and_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TEST_EXPAND_MISSING");
        }
        let err = expand_env("${TEST_EXPAND_MISSING}", "images.gravatar_url").unwrap_err();

        assert_eq!(
            err.to_string(),
            "Environment variable error in images.gravatar_url: ${TEST_EXPAND_MISSING} not set"
        );
    }

    #[test]
    fn test_literal_values_unchanged() {
        for value in ["/content/uploads", "/files/$archive", "https://gravatar.com"] {
            assert_eq!(expand_env(value, "x").unwrap(), value);
        }
    }
}
