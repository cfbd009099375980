//! Environment variable handling.

use std::env;

use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("required environment variable not set: {var}")]
    NotSet { var: String },

    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names.
pub mod vars {
    /// Overrides the configured path template.
    pub const SHOTPATH_TEMPLATE: &str = "SHOTPATH_TEMPLATE";
    /// Overrides the configured style preset.
    pub const SHOTPATH_STYLE: &str = "SHOTPATH_STYLE";
    /// Points at an alternative project directory.
    pub const SHOTPATH_CONFIG_PATH: &str = "SHOTPATH_CONFIG_PATH";
    /// Log level for binaries.
    pub const SHOTPATH_LOG_LEVEL: &str = "SHOTPATH_LOG_LEVEL";

    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Environment configuration.
pub struct Environment {
    _guard: (), // Prevent construction outside module
}

impl Environment {
    /// Initialize environment from .env files.
    pub fn init() -> Result<Self, EnvError> {
        // Load .env files in order (later overrides earlier)
        let _ = dotenvy::from_filename(".env");
        let _ = dotenvy::from_filename(".env.local");
        Ok(Self { _guard: () })
    }

    /// Get a required string variable.
    pub fn require(var: &str) -> Result<String, EnvError> {
        env::var(var).map_err(|_| EnvError::NotSet {
            var: var.to_string(),
        })
    }

    /// Get an optional string variable.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok()
    }

    /// Get a variable with a default value.
    pub fn get_or(var: &str, default: &str) -> String {
        env::var(var).unwrap_or_else(|_| default.to_string())
    }

    /// Get a boolean variable.
    pub fn get_bool(var: &str) -> Option<bool> {
        env::var(var)
            .ok()
            .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_default() {
        let val = Environment::get_or("NONEXISTENT_SHOTPATH_VAR", "default");
        assert_eq!(val, "default");
    }

    #[test]
    fn test_require_missing_is_an_error() {
        let result = Environment::require("NONEXISTENT_SHOTPATH_VAR");
        match result.unwrap_err() {
            EnvError::NotSet { var } => assert_eq!(var, "NONEXISTENT_SHOTPATH_VAR"),
            other => panic!("Expected NotSet, got {other:?}"),
        }
    }

    #[test]
    fn test_bool_parsing() {
        env::set_var("TEST_SHOTPATH_BOOL", "true");
        assert_eq!(Environment::get_bool("TEST_SHOTPATH_BOOL"), Some(true));
        env::set_var("TEST_SHOTPATH_BOOL", "1");
        assert_eq!(Environment::get_bool("TEST_SHOTPATH_BOOL"), Some(true));
        env::set_var("TEST_SHOTPATH_BOOL", "false");
        assert_eq!(Environment::get_bool("TEST_SHOTPATH_BOOL"), Some(false));
        env::remove_var("TEST_SHOTPATH_BOOL");
    }

    #[test]
    fn test_environment_init() {
        // Initialization succeeds even without .env files present.
        assert!(Environment::init().is_ok());
    }

    #[test]
    fn test_all_variable_names_are_defined() {
        assert!(!vars::SHOTPATH_TEMPLATE.is_empty());
        assert!(!vars::SHOTPATH_STYLE.is_empty());
        assert!(!vars::SHOTPATH_CONFIG_PATH.is_empty());
        assert!(!vars::SHOTPATH_LOG_LEVEL.is_empty());
    }
}
