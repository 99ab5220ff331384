//! College of Physicians and Surgeons of Saskatchewan.

use crate::directory::{DirectoryProbe, ResultSelectors, SearchForm, SearchMethod};
use crate::strategy::{VerificationOutcome, VerificationStrategy};
use rxverify_browser::{BrowserError, PageScope};
use rxverify_core::Candidate;
use std::time::Duration;

/// Looks up registrants in the CPSS physician search.
pub struct SaskatchewanStrategy {
    probe: DirectoryProbe,
}

impl SaskatchewanStrategy {
    /// Create the strategy with the configured results timeout.
    #[must_use]
    pub fn new(results_timeout: Duration) -> Self {
        Self {
            probe: DirectoryProbe {
                search: SearchMethod::Form {
                    url: "https://www.cps.sk.ca/imis/CPSS/Physician_Search.aspx",
                    form: SearchForm {
                        first_name_input: Some("input#ctl00_TemplateBody_txtFirstName"),
                        last_name_input: Some("input#ctl00_TemplateBody_txtLastName"),
                        licence_input: None,
                        submit_button: "input#ctl00_TemplateBody_btnSearch",
                    },
                },
                results: ResultSelectors {
                    result_row: "table.rgMasterTable tbody tr",
                    status: "table.rgMasterTable tbody tr td.licence-type",
                    licence_number: Some("table.rgMasterTable tbody tr td.registration-no"),
                    name: None,
                    no_results_indicator: Some(".rgNoRecords"),
                },
                active_terms: &["regular", "active", "provisional"],
                inactive_terms: &["inactive", "suspended", "cancelled", "temporarily absent"],
                results_timeout,
            },
        }
    }
}

#[async_trait::async_trait]
impl VerificationStrategy for SaskatchewanStrategy {
    fn college(&self) -> &'static str {
        "College of Physicians and Surgeons of Saskatchewan"
    }

    async fn verify(
        &self,
        candidate: &Candidate,
        page: &PageScope,
    ) -> Result<VerificationOutcome, BrowserError> {
        self.probe.run(candidate, page).await
    }
}
