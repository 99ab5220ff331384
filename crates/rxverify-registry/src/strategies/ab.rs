//! College of Physicians and Surgeons of Alberta.

use crate::directory::{DirectoryProbe, ResultSelectors, SearchForm, SearchMethod};
use crate::strategy::{VerificationOutcome, VerificationStrategy};
use rxverify_browser::{BrowserError, PageScope};
use rxverify_core::Candidate;
use std::time::Duration;

/// Looks up registrants in CPSA's "Find a Physician" directory.
pub struct AlbertaStrategy {
    probe: DirectoryProbe,
}

impl AlbertaStrategy {
    /// Create the strategy with the configured results timeout.
    #[must_use]
    pub fn new(results_timeout: Duration) -> Self {
        Self {
            probe: DirectoryProbe {
                search: SearchMethod::Form {
                    url: "https://search.cpsa.ca/",
                    form: SearchForm {
                        first_name_input: Some("input#MainContent_physicianSearchView_txtFirstName"),
                        last_name_input: Some("input#MainContent_physicianSearchView_txtLastName"),
                        licence_input: None,
                        submit_button: "input#MainContent_physicianSearchView_btnSearch",
                    },
                },
                results: ResultSelectors {
                    result_row: ".physician-result",
                    status: ".physician-result .registration-status",
                    licence_number: Some(".physician-result .registration-number"),
                    name: None,
                    no_results_indicator: Some(".no-results-message"),
                },
                active_terms: &["active", "practice permit"],
                inactive_terms: &["inactive", "suspended", "cancelled", "deceased"],
                results_timeout,
            },
        }
    }
}

#[async_trait::async_trait]
impl VerificationStrategy for AlbertaStrategy {
    fn college(&self) -> &'static str {
        "College of Physicians and Surgeons of Alberta"
    }

    async fn verify(
        &self,
        candidate: &Candidate,
        page: &PageScope,
    ) -> Result<VerificationOutcome, BrowserError> {
        self.probe.run(candidate, page).await
    }
}
