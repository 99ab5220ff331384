//! The verification strategy contract.

use rxverify_browser::{BrowserError, PageScope};
use rxverify_core::Candidate;
use serde::{Deserialize, Serialize};

/// The tri-state result of one verification attempt.
///
/// These are the only values a strategy may resolve to. "Not found" and
/// ambiguous matches are `Unresolved`, never an error; transport-level
/// automation failures surface as `Err(BrowserError)` instead and are
/// treated like `Unresolved` by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationOutcome {
    /// The register confirms the candidate holds a licence in good standing.
    Verified,
    /// The register explicitly shows the licence as not in good standing.
    Invalid,
    /// The register could not confirm either way.
    Unresolved,
}

/// One college's registry-lookup and matching logic.
///
/// Implementations get exclusive use of the supplied page scope for the
/// duration of the call and must not close it; the orchestrator owns the
/// scope's lifecycle.
#[async_trait::async_trait]
pub trait VerificationStrategy: Send + Sync {
    /// Exact display name of the licensing college this strategy covers.
    /// This is the registry key candidates select the strategy with.
    fn college(&self) -> &'static str;

    /// Check one candidate against the college's public register.
    async fn verify(
        &self,
        candidate: &Candidate,
        page: &PageScope,
    ) -> Result<VerificationOutcome, BrowserError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&VerificationOutcome::Unresolved)
            .expect("serialize outcome");
        assert_eq!(json, "\"Unresolved\"");
    }
}
