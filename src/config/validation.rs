//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject blank default scheme names
//! - Reject unknown log levels
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AuthConfig → Result<(), Vec<ValidationError>>
//! - Default names are not checked against registered schemes; schemes are
//!   registered in code after the config is loaded

use thiserror::Error;

use crate::config::schema::AuthConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("defaults.{0} must not be blank")]
    BlankSchemeName(&'static str),

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),
}

/// Check a parsed config, collecting every error.
pub fn validate_config(config: &AuthConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let d = &config.defaults;
    let names = [
        ("scheme", &d.scheme),
        ("authenticate", &d.authenticate),
        ("challenge", &d.challenge),
        ("forbid", &d.forbid),
        ("sign_in", &d.sign_in),
        ("sign_out", &d.sign_out),
    ];
    for (field, name) in names {
        if name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            errors.push(ValidationError::BlankSchemeName(field));
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AuthConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AuthConfig::default();
        config.defaults.scheme = Some(String::new());
        config.defaults.sign_out = Some("   ".into());
        config.observability.log_level = "verbose".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BlankSchemeName("scheme"),
                ValidationError::BlankSchemeName("sign_out"),
                ValidationError::UnknownLogLevel("verbose".into()),
            ]
        );
    }

    #[test]
    fn test_log_level_case_insensitive() {
        let mut config = AuthConfig::default();
        config.observability.log_level = "WARN".into();
        assert!(validate_config(&config).is_ok());
    }
}
