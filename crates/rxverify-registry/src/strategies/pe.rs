//! College of Physicians & Surgeons of Prince Edward Island.
//!
//! Note the ampersand: the college's display name, and therefore the
//! registry key, spells "&", not "and".

use crate::directory::{DirectoryProbe, ResultSelectors, SearchForm, SearchMethod};
use crate::strategy::{VerificationOutcome, VerificationStrategy};
use rxverify_browser::{BrowserError, PageScope};
use rxverify_core::Candidate;
use std::time::Duration;

/// Looks up registrants in the CPSPEI physician directory.
pub struct PrinceEdwardIslandStrategy {
    probe: DirectoryProbe,
}

impl PrinceEdwardIslandStrategy {
    /// Create the strategy with the configured results timeout.
    #[must_use]
    pub fn new(results_timeout: Duration) -> Self {
        Self {
            probe: DirectoryProbe {
                search: SearchMethod::Form {
                    url: "https://cpspei.ca/physician-directory/",
                    form: SearchForm {
                        first_name_input: None,
                        last_name_input: Some("input#directory-last-name"),
                        licence_input: None,
                        submit_button: "button#directory-search",
                    },
                },
                results: ResultSelectors {
                    result_row: ".directory-results .physician",
                    status: ".directory-results .physician .registration-status",
                    licence_number: None,
                    name: Some(".directory-results .physician .full-name"),
                    no_results_indicator: Some(".directory-results .empty"),
                },
                active_terms: &["active", "registered"],
                inactive_terms: &["inactive", "suspended", "lapsed"],
                results_timeout,
            },
        }
    }
}

#[async_trait::async_trait]
impl VerificationStrategy for PrinceEdwardIslandStrategy {
    fn college(&self) -> &'static str {
        "College of Physicians & Surgeons of Prince Edward Island"
    }

    async fn verify(
        &self,
        candidate: &Candidate,
        page: &PageScope,
    ) -> Result<VerificationOutcome, BrowserError> {
        self.probe.run(candidate, page).await
    }
}
