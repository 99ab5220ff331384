//! Core types, configuration and errors shared across rxverify.
//!
//! This crate holds everything the other crates agree on: the candidate
//! shapes flowing through the verification pipeline, the schema that guards
//! them, the provider code newtype, TOML + environment configuration, and
//! the central error enum.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod schema;
pub mod types;

// Re-export commonly used types
pub use config::{
    AppConfig, BrowserRunConfig, DatabaseConfig, ExecutionMode, VerificationConfig,
    BROWSER_MODE_ENV,
};
pub use error::{ConfigError, ConfigResult, Result, RxVerifyError, SchemaError};
pub use types::{Candidate, ProviderCode, RawCandidate, VerifiedPrescriber};
