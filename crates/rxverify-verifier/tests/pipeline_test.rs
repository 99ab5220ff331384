//! End-to-end pipeline scenarios with stub strategies.
//!
//! These exercise the orchestrator against an in-memory database and canned
//! strategy outcomes; the only real dependency is the shared browser
//! session, so they are gated on a live Chrome.

use rxverify_browser::{BrowserError, PageScope};
use rxverify_core::{
    AppConfig, Candidate, ExecutionMode, RawCandidate, VerificationConfig,
};
use rxverify_db::{prescribers, Database};
use rxverify_registry::{StrategyRegistry, VerificationOutcome, VerificationStrategy};
use rxverify_verifier::BatchVerifier;
use std::sync::Arc;

const STUB_COLLEGE: &str = "Stub College of Medicine";
const FAILING_COLLEGE: &str = "Failing College of Medicine";
const REJECTING_COLLEGE: &str = "Rejecting College of Medicine";
const UNRESOLVED_COLLEGE: &str = "Unresolved College of Medicine";

/// Returns a fixed outcome without touching the page.
struct FixedStrategy {
    college: &'static str,
    outcome: VerificationOutcome,
}

#[async_trait::async_trait]
impl VerificationStrategy for FixedStrategy {
    fn college(&self) -> &'static str {
        self.college
    }

    async fn verify(
        &self,
        _candidate: &Candidate,
        _page: &PageScope,
    ) -> Result<VerificationOutcome, BrowserError> {
        Ok(self.outcome)
    }
}

/// Always surfaces a transport failure.
struct FailingStrategy;

#[async_trait::async_trait]
impl VerificationStrategy for FailingStrategy {
    fn college(&self) -> &'static str {
        FAILING_COLLEGE
    }

    async fn verify(
        &self,
        _candidate: &Candidate,
        _page: &PageScope,
    ) -> Result<VerificationOutcome, BrowserError> {
        Err(BrowserError::Navigation("registry unreachable".to_string()))
    }
}

fn test_registry() -> StrategyRegistry {
    let mut registry = StrategyRegistry::new();
    registry.register(Arc::new(FixedStrategy {
        college: STUB_COLLEGE,
        outcome: VerificationOutcome::Verified,
    }));
    registry.register(Arc::new(FixedStrategy {
        college: REJECTING_COLLEGE,
        outcome: VerificationOutcome::Invalid,
    }));
    registry.register(Arc::new(FixedStrategy {
        college: UNRESOLVED_COLLEGE,
        outcome: VerificationOutcome::Unresolved,
    }));
    registry.register(Arc::new(FailingStrategy));
    registry
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.browser.mode = ExecutionMode::Devcontainer;
    config.verification = VerificationConfig {
        strategy_timeout_secs: 10,
        results_timeout_secs: 2,
    };
    config
}

fn raw_candidate(first: &str, last: &str, college: &str, licence: &str) -> RawCandidate {
    RawCandidate {
        email: Some(format!(
            "{}.{}@clinic.ca",
            first.to_lowercase(),
            last.to_lowercase()
        )),
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        language: Some("en".to_string()),
        city: Some("Toronto".to_string()),
        province: Some("ON".to_string()),
        address: Some("100 Main St".to_string()),
        profession: Some("Physician".to_string()),
        licensing_college: Some(college.to_string()),
        licence_number: Some(licence.to_string()),
    }
}

async fn setup_db() -> Arc<Database> {
    let db = Database::open(":memory:", 1).await.expect("open database");
    db.run_migrations().await.expect("run migrations");
    Arc::new(db)
}

#[tokio::test]
#[ignore = "Requires Chrome browser - run with --ignored"]
async fn test_three_candidate_scenario() {
    let db = setup_db().await;
    let verifier = BatchVerifier::new(Arc::new(test_registry()), db.clone(), test_config());

    // B is already verified; remember the code the pipeline must reuse
    let existing = prescribers::create_prescriber(
        db.pool(),
        &rxverify_core::schema::cast(&raw_candidate("Beth", "Baker", STUB_COLLEGE, "200"))
            .expect("cast candidate B"),
    )
    .await
    .expect("insert existing record");

    let mut candidate_a = raw_candidate("Ann", "Able", STUB_COLLEGE, "100");
    candidate_a.email = Some("not-an-email".to_string());
    let candidate_b = raw_candidate("Beth", "Baker", STUB_COLLEGE, "200");
    let candidate_c = raw_candidate("Cara", "Chan", STUB_COLLEGE, "300");

    let outcome = verifier
        .verify_batch(vec![candidate_a, candidate_b, candidate_c])
        .await
        .expect("run batch");

    assert_eq!(outcome.total(), 3);
    assert_eq!(outcome.verified.len(), 2);
    assert!(outcome.invalid.is_empty());
    assert_eq!(outcome.error.len(), 1);

    // B reuses the existing provider code; it was never re-verified
    assert_eq!(outcome.verified[0].candidate.last_name, "Baker");
    assert_eq!(outcome.verified[0].provider_code, existing.provider_code);

    // C got a fresh, persisted code
    assert_eq!(outcome.verified[1].candidate.last_name, "Chan");
    assert_ne!(outcome.verified[1].provider_code, existing.provider_code);
    let persisted = prescribers::find_existing(
        db.pool(),
        &outcome.verified[1].candidate,
    )
    .await
    .expect("lookup candidate C")
    .expect("candidate C persisted");
    assert_eq!(persisted.provider_code, outcome.verified[1].provider_code);

    // A's raw data comes back untouched
    assert_eq!(outcome.error[0].first_name.as_deref(), Some("Ann"));
}

#[tokio::test]
#[ignore = "Requires Chrome browser - run with --ignored"]
async fn test_unknown_jurisdiction_is_per_candidate_error() {
    let db = setup_db().await;
    let verifier = BatchVerifier::new(Arc::new(test_registry()), db.clone(), test_config());

    let outcome = verifier
        .verify_batch(vec![
            raw_candidate("Ann", "Able", "Unknown Board", "100"),
            raw_candidate("Beth", "Baker", STUB_COLLEGE, "200"),
        ])
        .await
        .expect("run batch");

    assert_eq!(outcome.error.len(), 1);
    assert_eq!(
        outcome.error[0].licensing_college.as_deref(),
        Some("Unknown Board")
    );
    // The rest of the batch was unaffected
    assert_eq!(outcome.verified.len(), 1);
    assert_eq!(outcome.verified[0].candidate.last_name, "Baker");
}

#[tokio::test]
#[ignore = "Requires Chrome browser - run with --ignored"]
async fn test_strategy_failure_does_not_abort_batch() {
    let db = setup_db().await;
    let verifier = BatchVerifier::new(Arc::new(test_registry()), db.clone(), test_config());

    let outcome = verifier
        .verify_batch(vec![
            raw_candidate("Ann", "Able", FAILING_COLLEGE, "100"),
            raw_candidate("Beth", "Baker", UNRESOLVED_COLLEGE, "200"),
            raw_candidate("Cara", "Chan", STUB_COLLEGE, "300"),
        ])
        .await
        .expect("run batch");

    // Transport failure and unresolved both land in error, in input order
    assert_eq!(outcome.error.len(), 2);
    assert_eq!(outcome.error[0].first_name.as_deref(), Some("Ann"));
    assert_eq!(outcome.error[1].first_name.as_deref(), Some("Beth"));

    // The candidate after the failures still verified
    assert_eq!(outcome.verified.len(), 1);
    assert_eq!(outcome.verified[0].candidate.last_name, "Chan");
}

#[tokio::test]
#[ignore = "Requires Chrome browser - run with --ignored"]
async fn test_rejected_candidate_lands_in_invalid() {
    let db = setup_db().await;
    let verifier = BatchVerifier::new(Arc::new(test_registry()), db.clone(), test_config());

    let outcome = verifier
        .verify_batch(vec![raw_candidate(
            "Ann",
            "Able",
            REJECTING_COLLEGE,
            "100",
        )])
        .await
        .expect("run batch");

    assert_eq!(outcome.invalid.len(), 1);
    assert_eq!(outcome.invalid[0].last_name, "Able");
    assert!(outcome.verified.is_empty());
    assert!(outcome.error.is_empty());

    // A rejected candidate is never persisted
    assert!(prescribers::find_existing(db.pool(), &outcome.invalid[0])
        .await
        .expect("lookup rejected candidate")
        .is_none());
}

#[tokio::test]
#[ignore = "Requires Chrome browser - run with --ignored"]
async fn test_persistence_failure_routes_to_error() {
    let db = setup_db().await;

    // Block inserts while leaving the dedup lookup functional
    sqlx::query(
        "CREATE TRIGGER block_inserts BEFORE INSERT ON prescribers
         BEGIN SELECT RAISE(ABORT, 'insert blocked'); END",
    )
    .execute(db.pool())
    .await
    .expect("create blocking trigger");

    let verifier = BatchVerifier::new(Arc::new(test_registry()), db.clone(), test_config());

    let outcome = verifier
        .verify_batch(vec![raw_candidate("Ann", "Able", STUB_COLLEGE, "100")])
        .await
        .expect("run batch");

    // Verified by the register but unpersisted: never reported as a success
    assert!(outcome.verified.is_empty());
    assert_eq!(outcome.error.len(), 1);
}

#[tokio::test]
#[ignore = "Requires Chrome browser - run with --ignored"]
async fn test_partition_is_exhaustive_and_ordered() {
    let db = setup_db().await;
    let verifier = BatchVerifier::new(Arc::new(test_registry()), db.clone(), test_config());

    let batch = vec![
        raw_candidate("Ann", "Able", STUB_COLLEGE, "100"),
        raw_candidate("Beth", "Baker", REJECTING_COLLEGE, "200"),
        RawCandidate::default(),
        raw_candidate("Cara", "Chan", "Unknown Board", "300"),
        raw_candidate("Dana", "Dunn", STUB_COLLEGE, "400"),
        raw_candidate("Elle", "Egan", REJECTING_COLLEGE, "500"),
    ];
    let total = batch.len();

    let outcome = verifier.verify_batch(batch).await.expect("run batch");

    assert_eq!(outcome.total(), total);
    assert_eq!(outcome.verified.len(), 2);
    assert_eq!(outcome.invalid.len(), 2);
    assert_eq!(outcome.error.len(), 2);

    // Insertion order within each bucket matches input order
    assert_eq!(outcome.verified[0].candidate.last_name, "Able");
    assert_eq!(outcome.verified[1].candidate.last_name, "Dunn");
    assert_eq!(outcome.invalid[0].last_name, "Baker");
    assert_eq!(outcome.invalid[1].last_name, "Egan");
}
