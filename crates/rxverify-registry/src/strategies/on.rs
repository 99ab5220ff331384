//! College of Physicians and Surgeons of Ontario.
//!
//! The CPSO register is searched by CPSO number rather than by name, which
//! sidesteps same-name collisions entirely. Stored licence numbers sometimes
//! carry leading zeros the register does not display, so the number is
//! normalized before the search.

use crate::directory::{DirectoryProbe, ResultSelectors, SearchForm, SearchMethod};
use crate::strategy::{VerificationOutcome, VerificationStrategy};
use rxverify_browser::{BrowserError, PageScope};
use rxverify_core::Candidate;
use std::time::Duration;

/// Looks up registrants in the CPSO public register by CPSO number.
pub struct OntarioStrategy {
    probe: DirectoryProbe,
}

impl OntarioStrategy {
    /// Create the strategy with the configured results timeout.
    #[must_use]
    pub fn new(results_timeout: Duration) -> Self {
        Self {
            probe: DirectoryProbe {
                search: SearchMethod::Form {
                    url: "https://register.cpso.on.ca/Search-Results/",
                    form: SearchForm {
                        first_name_input: None,
                        last_name_input: None,
                        licence_input: Some("input#txtCpsoNumber"),
                        submit_button: "input#btnSearch",
                    },
                },
                results: ResultSelectors {
                    result_row: ".doctor-search-results .doctor",
                    status: ".doctor-search-results .doctor .member-status",
                    licence_number: Some(".doctor-search-results .doctor .cpso-number"),
                    name: Some(".doctor-search-results .doctor .doctor-name"),
                    no_results_indicator: Some(".doctor-search-results .no-results"),
                },
                active_terms: &["active member", "active"],
                inactive_terms: &[
                    "inactive",
                    "expired",
                    "suspended",
                    "revoked",
                    "deceased",
                ],
                results_timeout,
            },
        }
    }
}

#[async_trait::async_trait]
impl VerificationStrategy for OntarioStrategy {
    fn college(&self) -> &'static str {
        "College of Physicians and Surgeons of Ontario"
    }

    async fn verify(
        &self,
        candidate: &Candidate,
        page: &PageScope,
    ) -> Result<VerificationOutcome, BrowserError> {
        let mut candidate = candidate.clone();
        candidate.licence_number = candidate
            .licence_number
            .trim_start_matches('0')
            .to_string();

        self.probe.run(&candidate, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_college_key() {
        let strategy = OntarioStrategy::new(Duration::from_secs(5));
        assert_eq!(
            strategy.college(),
            "College of Physicians and Surgeons of Ontario"
        );
    }
}
