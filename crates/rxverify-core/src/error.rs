//! Core error types for rxverify.
//!
//! This module defines the central error type used across all subsystems.
//! Each subsystem error is represented as a variant for clear error propagation.

use thiserror::Error;

/// Central error type for all rxverify operations.
///
/// Each variant represents an error from a specific subsystem, allowing
/// for clear error propagation and handling across module boundaries.
#[derive(Error, Debug)]
pub enum RxVerifyError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Candidate schema errors (missing or malformed fields)
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Database errors (connection, queries, migrations)
    #[error("database error: {0}")]
    Database(String),

    /// Browser automation errors (launch, navigation, element not found)
    #[error("browser error: {0}")]
    Browser(String),

    /// Strategy registry errors (unknown jurisdiction)
    #[error("registry error: {0}")]
    Registry(String),

    /// Validation errors (invalid input, constraints)
    #[error("validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Errors raised when a raw candidate fails schema validation.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A required field is absent or blank after trimming.
    #[error("missing required field: {field}")]
    MissingField {
        /// Field name as it appears on the wire
        field: &'static str,
    },

    /// The email does not look like an email address.
    #[error("invalid email address: '{value}'")]
    InvalidEmail {
        /// Offending value
        value: String,
    },

    /// The province is not a Canadian two-letter code.
    #[error("unrecognized province code: '{value}'")]
    UnknownProvince {
        /// Offending value
        value: String,
    },

    /// The language is neither English nor French.
    #[error("unsupported language: '{value}'")]
    UnsupportedLanguage {
        /// Offending value
        value: String,
    },
}

/// Result type alias using `RxVerifyError`.
pub type Result<T> = std::result::Result<T, RxVerifyError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RxVerifyError::Validation("invalid provider code".to_string());
        assert_eq!(err.to_string(), "validation error: invalid provider code");

        let err = SchemaError::MissingField { field: "lastName" };
        assert_eq!(err.to_string(), "missing required field: lastName");
    }

    #[test]
    fn test_error_from_config() {
        let config_err = ConfigError::NoConfigDir;
        let core_err: RxVerifyError = config_err.into();
        assert!(matches!(core_err, RxVerifyError::Config(_)));
    }

    #[test]
    fn test_error_from_schema() {
        let schema_err = SchemaError::InvalidEmail {
            value: "not-an-email".to_string(),
        };
        let core_err: RxVerifyError = schema_err.into();
        assert!(matches!(core_err, RxVerifyError::Schema(_)));
    }
}
