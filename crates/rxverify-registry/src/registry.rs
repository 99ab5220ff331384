//! Jurisdiction-keyed strategy registry.
//!
//! Built once at startup and shared immutably for the rest of the process:
//! registration takes `&mut self`, so once the registry is behind an `Arc`
//! its strategy set cannot change.

use crate::error::{RegistryError, Result};
use crate::strategies::{
    AlbertaStrategy, BritishColumbiaStrategy, ManitobaStrategy, NewBrunswickStrategy,
    NewfoundlandLabradorStrategy, NovaScotiaStrategy, OntarioStrategy,
    PrinceEdwardIslandStrategy, QuebecStrategy, SaskatchewanStrategy,
};
use crate::strategy::VerificationStrategy;
use rxverify_core::VerificationConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Maps licensing-college display names to verification strategies.
pub struct StrategyRegistry {
    strategies: HashMap<&'static str, Arc<dyn VerificationStrategy>>,
}

impl StrategyRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Build the registry with every supported provincial college.
    ///
    /// Adding a jurisdiction means adding one strategy module and one
    /// `register` call here; the orchestrator never changes.
    #[must_use]
    pub fn with_default_strategies(config: &VerificationConfig) -> Self {
        let timeout = Duration::from_secs(config.results_timeout_secs);

        let mut registry = Self::new();
        registry.register(Arc::new(AlbertaStrategy::new(timeout)));
        registry.register(Arc::new(BritishColumbiaStrategy::new(timeout)));
        registry.register(Arc::new(ManitobaStrategy::new(timeout)));
        registry.register(Arc::new(NewBrunswickStrategy::new(timeout)));
        registry.register(Arc::new(NewfoundlandLabradorStrategy::new(timeout)));
        registry.register(Arc::new(NovaScotiaStrategy::new(timeout)));
        registry.register(Arc::new(OntarioStrategy::new(timeout)));
        registry.register(Arc::new(PrinceEdwardIslandStrategy::new(timeout)));
        registry.register(Arc::new(QuebecStrategy::new(timeout)));
        registry.register(Arc::new(SaskatchewanStrategy::new(timeout)));

        info!(count = registry.count(), "strategy registry built");

        registry
    }

    /// Register a strategy under its college display name.
    ///
    /// A strategy registered under an already-known college replaces the
    /// previous one; tests use this to substitute stubs.
    pub fn register(&mut self, strategy: Arc<dyn VerificationStrategy>) {
        let college = strategy.college();
        if self.strategies.insert(college, strategy).is_some() {
            debug!(college, "replaced registered strategy");
        } else {
            debug!(college, "registered strategy");
        }
    }

    /// Resolve the strategy for a licensing college.
    ///
    /// # Errors
    /// Returns `RegistryError::UnknownJurisdiction` when no strategy is
    /// registered under the college name. The orchestrator catches this per
    /// candidate; it never aborts a batch.
    pub fn resolve(&self, college: &str) -> Result<Arc<dyn VerificationStrategy>> {
        self.strategies
            .get(college)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownJurisdiction {
                college: college.to_string(),
            })
    }

    /// Check if a college has a registered strategy.
    #[must_use]
    pub fn contains(&self, college: &str) -> bool {
        self.strategies.contains_key(college)
    }

    /// Number of registered strategies.
    #[must_use]
    pub fn count(&self) -> usize {
        self.strategies.len()
    }

    /// All registered college display names.
    #[must_use]
    pub fn colleges(&self) -> Vec<&'static str> {
        self.strategies.keys().copied().collect()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::VerificationOutcome;
    use rxverify_browser::{BrowserError, PageScope};
    use rxverify_core::Candidate;

    const SUPPORTED_COLLEGES: [&str; 10] = [
        "College of Physicians and Surgeons of Alberta",
        "College of Physicians and Surgeons of British Columbia",
        "College of Physicians and Surgeons of Manitoba",
        "College of Physicians and Surgeons of New Brunswick",
        "College of Physicians and Surgeons of Newfoundland and Labrador",
        "College of Physicians and Surgeons of Nova Scotia",
        "College of Physicians and Surgeons of Ontario",
        "College of Physicians & Surgeons of Prince Edward Island",
        "Collège des médecins du Québec",
        "College of Physicians and Surgeons of Saskatchewan",
    ];

    struct StubStrategy;

    #[async_trait::async_trait]
    impl VerificationStrategy for StubStrategy {
        fn college(&self) -> &'static str {
            "Stub College of Medicine"
        }

        async fn verify(
            &self,
            _candidate: &Candidate,
            _page: &PageScope,
        ) -> std::result::Result<VerificationOutcome, BrowserError> {
            Ok(VerificationOutcome::Unresolved)
        }
    }

    #[test]
    fn test_default_registry_covers_all_colleges() {
        let registry = StrategyRegistry::with_default_strategies(&VerificationConfig::default());
        assert_eq!(registry.count(), SUPPORTED_COLLEGES.len());

        for college in SUPPORTED_COLLEGES {
            let strategy = registry.resolve(college).expect("resolve college");
            assert_eq!(strategy.college(), college);
        }
    }

    #[test]
    fn test_resolve_unknown_jurisdiction() {
        let registry = StrategyRegistry::with_default_strategies(&VerificationConfig::default());

        let result = registry.resolve("Unknown Board");
        assert!(matches!(
            result,
            Err(RegistryError::UnknownJurisdiction { ref college }) if college == "Unknown Board"
        ));

        // Near-misses are still misses: keys are exact display names
        assert!(registry
            .resolve("College of Physicians and Surgeons of Prince Edward Island")
            .is_err());
        assert!(registry.resolve("college of physicians and surgeons of alberta").is_err());
    }

    #[test]
    fn test_register_and_replace() {
        let mut registry = StrategyRegistry::new();
        assert_eq!(registry.count(), 0);
        assert!(!registry.contains("Stub College of Medicine"));

        registry.register(Arc::new(StubStrategy));
        assert_eq!(registry.count(), 1);
        assert!(registry.contains("Stub College of Medicine"));

        // Same key replaces, count unchanged
        registry.register(Arc::new(StubStrategy));
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_colleges_listing() {
        let registry = StrategyRegistry::with_default_strategies(&VerificationConfig::default());
        let mut colleges = registry.colleges();
        colleges.sort_unstable();

        let mut expected = SUPPORTED_COLLEGES.to_vec();
        expected.sort_unstable();

        assert_eq!(colleges, expected);
    }
}
