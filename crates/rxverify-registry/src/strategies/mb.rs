//! College of Physicians and Surgeons of Manitoba.

use crate::directory::{DirectoryProbe, ResultSelectors, SearchForm, SearchMethod};
use crate::strategy::{VerificationOutcome, VerificationStrategy};
use rxverify_browser::{BrowserError, PageScope};
use rxverify_core::Candidate;
use std::time::Duration;

/// Looks up registrants in CPSM's physician profiles.
pub struct ManitobaStrategy {
    probe: DirectoryProbe,
}

impl ManitobaStrategy {
    /// Create the strategy with the configured results timeout.
    #[must_use]
    pub fn new(results_timeout: Duration) -> Self {
        Self {
            probe: DirectoryProbe {
                search: SearchMethod::Form {
                    url: "https://member.cpsm.mb.ca/member/profilesearch",
                    form: SearchForm {
                        first_name_input: Some("input#FirstName"),
                        last_name_input: Some("input#LastName"),
                        licence_input: None,
                        submit_button: "button[type='submit']",
                    },
                },
                results: ResultSelectors {
                    result_row: "table.profile-results tbody tr",
                    status: "table.profile-results tbody tr td.status",
                    licence_number: Some("table.profile-results tbody tr td.registration-no"),
                    name: None,
                    no_results_indicator: Some(".no-records"),
                },
                active_terms: &["regulated (active)", "active"],
                inactive_terms: &["inactive", "suspended", "cancelled", "not regulated"],
                results_timeout,
            },
        }
    }
}

#[async_trait::async_trait]
impl VerificationStrategy for ManitobaStrategy {
    fn college(&self) -> &'static str {
        "College of Physicians and Surgeons of Manitoba"
    }

    async fn verify(
        &self,
        candidate: &Candidate,
        page: &PageScope,
    ) -> Result<VerificationOutcome, BrowserError> {
        self.probe.run(candidate, page).await
    }
}
