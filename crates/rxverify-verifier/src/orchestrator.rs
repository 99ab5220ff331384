//! The batch verification pipeline.
//!
//! Drives each candidate through schema validation, the deduplication gate,
//! strategy resolution, the browser-backed registry check and persistence,
//! then files it into exactly one of the three outcome buckets. Failures
//! while processing one candidate never touch the rest of the batch; only
//! a browser session that cannot launch aborts the run.

use crate::error::Result;
use rxverify_browser::BrowserSession;
use rxverify_core::{schema, AppConfig, Candidate, RawCandidate, VerifiedPrescriber};
use rxverify_db::{prescribers, Database};
use rxverify_registry::{StrategyRegistry, VerificationOutcome};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// The three-bucket aggregate returned for a batch.
///
/// Buckets are disjoint and exhaustive: every input candidate lands in
/// exactly one, in input order within each bucket.
#[derive(Debug, Default, Serialize)]
pub struct BatchOutcome {
    /// Candidates with an assigned provider code (new or reused)
    pub verified: Vec<VerifiedPrescriber>,
    /// Candidates the register explicitly rejected
    pub invalid: Vec<Candidate>,
    /// Candidates that failed schema, jurisdiction, scraping or persistence
    pub error: Vec<RawCandidate>,
}

impl BatchOutcome {
    /// Total number of candidates across all buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.verified.len() + self.invalid.len() + self.error.len()
    }
}

/// Where one candidate ended up.
enum Disposition {
    Verified(VerifiedPrescriber),
    Invalid(Candidate),
    Error,
}

/// The batch verification driver.
pub struct BatchVerifier {
    registry: Arc<StrategyRegistry>,
    db: Arc<Database>,
    config: AppConfig,
}

impl BatchVerifier {
    /// Create a new batch verifier.
    #[must_use]
    pub fn new(registry: Arc<StrategyRegistry>, db: Arc<Database>, config: AppConfig) -> Self {
        Self {
            registry,
            db,
            config,
        }
    }

    /// Verify a batch of raw candidates.
    ///
    /// Candidates are processed strictly sequentially: the browser session
    /// and its single live page are one mutually-exclusive resource.
    ///
    /// # Errors
    /// Returns `VerifyError` only for precondition failures (the browser
    /// session cannot launch). Per-candidate failures land in the `error`
    /// bucket of the returned aggregate instead.
    pub async fn verify_batch(&self, batch: Vec<RawCandidate>) -> Result<BatchOutcome> {
        let session =
            BrowserSession::launch(self.config.browser.mode, &self.config.browser).await?;
        let strategy_timeout =
            Duration::from_secs(self.config.verification.strategy_timeout_secs);

        let mut outcome = BatchOutcome::default();

        for raw in batch {
            match self.verify_single(&session, &raw, strategy_timeout).await {
                Disposition::Verified(prescriber) => outcome.verified.push(prescriber),
                Disposition::Invalid(candidate) => outcome.invalid.push(candidate),
                Disposition::Error => outcome.error.push(raw),
            }
        }

        session.close().await;

        Ok(outcome)
    }

    /// Run one candidate through the pipeline.
    ///
    /// Every failure is caught here and becomes `Disposition::Error`; the
    /// batch loop always proceeds to the next candidate.
    async fn verify_single(
        &self,
        session: &BrowserSession,
        raw: &RawCandidate,
        strategy_timeout: Duration,
    ) -> Disposition {
        let candidate = match schema::cast(raw) {
            Ok(candidate) => candidate,
            Err(e) => {
                error!(error = %e, "candidate does not match schema, skipping");
                return Disposition::Error;
            }
        };

        debug!(candidate = %candidate.display_name(), "verifying candidate");

        // Verification is monotonic: once verified, never re-checked, and a
        // previously rejected candidate is not re-escalated by resubmission.
        match prescribers::find_existing(self.db.pool(), &candidate).await {
            Ok(Some(existing)) => {
                error!(
                    candidate = %candidate.display_name(),
                    provider_code = %existing.provider_code,
                    "candidate already exists in database, skipping"
                );
                return Disposition::Verified(VerifiedPrescriber::new(
                    candidate,
                    existing.provider_code,
                ));
            }
            Ok(None) => {}
            Err(e) => {
                error!(
                    candidate = %candidate.display_name(),
                    error = %e,
                    "deduplication lookup failed"
                );
                return Disposition::Error;
            }
        }

        // Resolve before opening a page: an unknown jurisdiction must not
        // cost a page scope.
        let strategy = match self.registry.resolve(&candidate.licensing_college) {
            Ok(strategy) => strategy,
            Err(e) => {
                error!(candidate = %candidate.display_name(), error = %e, "no strategy");
                return Disposition::Error;
            }
        };

        let page = match session.open_page().await {
            Ok(page) => page,
            Err(e) => {
                error!(
                    candidate = %candidate.display_name(),
                    error = %e,
                    "could not open page scope"
                );
                return Disposition::Error;
            }
        };

        let outcome =
            match tokio::time::timeout(strategy_timeout, strategy.verify(&candidate, &page)).await
            {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(e)) => {
                    warn!(
                        candidate = %candidate.display_name(),
                        college = strategy.college(),
                        error = %e,
                        "strategy failed"
                    );
                    VerificationOutcome::Unresolved
                }
                Err(_) => {
                    warn!(
                        candidate = %candidate.display_name(),
                        college = strategy.college(),
                        timeout = ?strategy_timeout,
                        "strategy timed out"
                    );
                    VerificationOutcome::Unresolved
                }
            };

        // The page scope is released before the outcome is routed, on every
        // path, so a long batch never accumulates pages.
        page.close().await;

        match outcome {
            VerificationOutcome::Verified => {
                match prescribers::create_prescriber(self.db.pool(), &candidate).await {
                    Ok(record) => Disposition::Verified(VerifiedPrescriber::new(
                        candidate,
                        record.provider_code,
                    )),
                    Err(e) => {
                        error!(
                            candidate = %candidate.display_name(),
                            error = %e,
                            "candidate verified but could not be persisted, routing to error"
                        );
                        Disposition::Error
                    }
                }
            }
            VerificationOutcome::Invalid => Disposition::Invalid(candidate),
            VerificationOutcome::Unresolved => Disposition::Error,
        }
    }
}
