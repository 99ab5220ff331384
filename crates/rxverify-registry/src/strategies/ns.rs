//! College of Physicians and Surgeons of Nova Scotia.

use crate::directory::{DirectoryProbe, ResultSelectors, SearchForm, SearchMethod};
use crate::strategy::{VerificationOutcome, VerificationStrategy};
use rxverify_browser::{BrowserError, PageScope};
use rxverify_core::Candidate;
use std::time::Duration;

/// Looks up registrants in CPSNS's "Search Our Registry" directory.
pub struct NovaScotiaStrategy {
    probe: DirectoryProbe,
}

impl NovaScotiaStrategy {
    /// Create the strategy with the configured results timeout.
    #[must_use]
    pub fn new(results_timeout: Duration) -> Self {
        Self {
            probe: DirectoryProbe {
                search: SearchMethod::Form {
                    url: "https://cpsnspublic.ca/physician-search",
                    form: SearchForm {
                        first_name_input: Some("input#txtFirstName"),
                        last_name_input: Some("input#txtLastName"),
                        licence_input: None,
                        submit_button: "button#btnSearch",
                    },
                },
                results: ResultSelectors {
                    result_row: ".search-results .physician-card",
                    status: ".search-results .physician-card .licence-status",
                    licence_number: Some(".search-results .physician-card .licence-number"),
                    name: None,
                    no_results_indicator: Some(".search-results .none-found"),
                },
                active_terms: &["active", "defined"],
                inactive_terms: &["inactive", "suspended", "surrendered", "revoked"],
                results_timeout,
            },
        }
    }
}

#[async_trait::async_trait]
impl VerificationStrategy for NovaScotiaStrategy {
    fn college(&self) -> &'static str {
        "College of Physicians and Surgeons of Nova Scotia"
    }

    async fn verify(
        &self,
        candidate: &Candidate,
        page: &PageScope,
    ) -> Result<VerificationOutcome, BrowserError> {
        self.probe.run(candidate, page).await
    }
}
