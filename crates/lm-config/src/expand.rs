//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// Values without `${` are returned unchanged, so a bare `$` is kept.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("LM_UNSET_PLACEHOLDER");
        }
        let result = expand_env("${LM_UNSET_PLACEHOLDER:-Start typing}", "preview.placeholder")
            .unwrap();
        assert_eq!(result, "Start typing");
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("LM_TEST_NAME", "Livemark");
        }
        let result = expand_env("Welcome to ${LM_TEST_NAME}", "preview.placeholder").unwrap();
        assert_eq!(result, "Welcome to Livemark");
        unsafe {
            std::env::remove_var("LM_TEST_NAME");
        }
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("LM_MISSING_HOST");
        }
        let err = expand_env("${LM_MISSING_HOST}", "server.host").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in server.host: ${LM_MISSING_HOST} not set"
        );
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        assert_eq!(expand_env("costs $5", "preview.placeholder").unwrap(), "costs $5");
    }
}
