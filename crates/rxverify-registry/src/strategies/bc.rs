//! College of Physicians and Surgeons of British Columbia.
//!
//! CPSBC's directory matches loosely on names, so the result row's
//! registrant name is cross-checked against the candidate before the
//! status is trusted.

use crate::directory::{DirectoryProbe, ResultSelectors, SearchForm, SearchMethod};
use crate::strategy::{VerificationOutcome, VerificationStrategy};
use rxverify_browser::{BrowserError, PageScope};
use rxverify_core::Candidate;
use std::time::Duration;

/// Looks up registrants in the CPSBC registrant directory.
pub struct BritishColumbiaStrategy {
    probe: DirectoryProbe,
}

impl BritishColumbiaStrategy {
    /// Create the strategy with the configured results timeout.
    #[must_use]
    pub fn new(results_timeout: Duration) -> Self {
        Self {
            probe: DirectoryProbe {
                search: SearchMethod::Form {
                    url: "https://www.cpsbc.ca/public/registrant-directory",
                    form: SearchForm {
                        first_name_input: Some("input[name='firstname']"),
                        last_name_input: Some("input[name='lastname']"),
                        licence_input: None,
                        submit_button: "input[name='search']",
                    },
                },
                results: ResultSelectors {
                    result_row: ".registrant-list .registrant",
                    status: ".registrant-list .registrant .registrant-status",
                    licence_number: None,
                    name: Some(".registrant-list .registrant .registrant-name"),
                    no_results_indicator: Some(".view-empty"),
                },
                active_terms: &["practising", "active"],
                inactive_terms: &[
                    "non-practising",
                    "inactive",
                    "suspended",
                    "cancelled",
                    "deceased",
                ],
                results_timeout,
            },
        }
    }
}

#[async_trait::async_trait]
impl VerificationStrategy for BritishColumbiaStrategy {
    fn college(&self) -> &'static str {
        "College of Physicians and Surgeons of British Columbia"
    }

    async fn verify(
        &self,
        candidate: &Candidate,
        page: &PageScope,
    ) -> Result<VerificationOutcome, BrowserError> {
        self.probe.run(candidate, page).await
    }
}
