//! Pipeline error types.
//!
//! Only precondition failures live here: anything that goes wrong while
//! processing a single candidate is routed to that candidate's bucket and
//! never surfaces as a `VerifyError`.

use rxverify_browser::BrowserError;
use rxverify_core::ConfigError;
use thiserror::Error;

/// Fatal, whole-batch failures.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Configuration was invalid (unrecognized execution mode and friends).
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The shared browser session could not be launched.
    #[error("browser session error: {0}")]
    Browser(#[from] BrowserError),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, VerifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_browser() {
        let err: VerifyError = BrowserError::Launch("no chrome".to_string()).into();
        assert!(matches!(err, VerifyError::Browser(_)));
        assert!(err.to_string().contains("no chrome"));
    }
}
