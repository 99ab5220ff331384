//! College of Physicians and Surgeons of Newfoundland and Labrador.

use crate::directory::{DirectoryProbe, ResultSelectors, SearchForm, SearchMethod};
use crate::strategy::{VerificationOutcome, VerificationStrategy};
use rxverify_browser::{BrowserError, PageScope};
use rxverify_core::Candidate;
use std::time::Duration;

/// Looks up registrants in the CPSNL physician search.
pub struct NewfoundlandLabradorStrategy {
    probe: DirectoryProbe,
}

impl NewfoundlandLabradorStrategy {
    /// Create the strategy with the configured results timeout.
    #[must_use]
    pub fn new(results_timeout: Duration) -> Self {
        Self {
            probe: DirectoryProbe {
                search: SearchMethod::Form {
                    url: "https://cpsnl.ca/physician-search/",
                    form: SearchForm {
                        first_name_input: Some("input[name='fname']"),
                        last_name_input: Some("input[name='lname']"),
                        licence_input: None,
                        submit_button: "input[type='submit']",
                    },
                },
                results: ResultSelectors {
                    result_row: "table#physician-results tr.result",
                    status: "table#physician-results tr.result td.licensure-status",
                    licence_number: None,
                    name: Some("table#physician-results tr.result td.name"),
                    no_results_indicator: Some("#physician-results .no-match"),
                },
                active_terms: &["practising", "active"],
                inactive_terms: &["non-practising", "inactive", "suspended", "cancelled"],
                results_timeout,
            },
        }
    }
}

#[async_trait::async_trait]
impl VerificationStrategy for NewfoundlandLabradorStrategy {
    fn college(&self) -> &'static str {
        "College of Physicians and Surgeons of Newfoundland and Labrador"
    }

    async fn verify(
        &self,
        candidate: &Candidate,
        page: &PageScope,
    ) -> Result<VerificationOutcome, BrowserError> {
        self.probe.run(candidate, page).await
    }
}
