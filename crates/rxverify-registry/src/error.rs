use thiserror::Error;

/// Errors from strategy resolution.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The candidate's licensing college has no registered strategy.
    #[error("unrecognized licensing college: '{college}'")]
    UnknownJurisdiction {
        /// The unmatched college display name
        college: String,
    },
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RegistryError::UnknownJurisdiction {
            college: "Unknown Board".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unrecognized licensing college: 'Unknown Board'"
        );
    }
}
