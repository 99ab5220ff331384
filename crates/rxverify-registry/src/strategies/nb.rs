//! College of Physicians and Surgeons of New Brunswick.

use crate::directory::{DirectoryProbe, ResultSelectors, SearchForm, SearchMethod};
use crate::strategy::{VerificationOutcome, VerificationStrategy};
use rxverify_browser::{BrowserError, PageScope};
use rxverify_core::Candidate;
use std::time::Duration;

/// Looks up registrants in CPSNB's physician search.
pub struct NewBrunswickStrategy {
    probe: DirectoryProbe,
}

impl NewBrunswickStrategy {
    /// Create the strategy with the configured results timeout.
    #[must_use]
    pub fn new(results_timeout: Duration) -> Self {
        Self {
            probe: DirectoryProbe {
                search: SearchMethod::Form {
                    url: "https://cpsnb.org/en/search-for-a-physician",
                    form: SearchForm {
                        first_name_input: None,
                        last_name_input: Some("input#physician-last-name"),
                        licence_input: None,
                        submit_button: "button#physician-search-submit",
                    },
                },
                results: ResultSelectors {
                    result_row: ".physician-listing .entry",
                    status: ".physician-listing .entry .licence-status",
                    licence_number: Some(".physician-listing .entry .licence-no"),
                    name: Some(".physician-listing .entry .physician-name"),
                    no_results_indicator: Some(".physician-listing .empty"),
                },
                active_terms: &["active", "full licence"],
                inactive_terms: &["inactive", "suspended", "revoked", "expired"],
                results_timeout,
            },
        }
    }
}

#[async_trait::async_trait]
impl VerificationStrategy for NewBrunswickStrategy {
    fn college(&self) -> &'static str {
        "College of Physicians and Surgeons of New Brunswick"
    }

    async fn verify(
        &self,
        candidate: &Candidate,
        page: &PageScope,
    ) -> Result<VerificationOutcome, BrowserError> {
        self.probe.run(candidate, page).await
    }
}
