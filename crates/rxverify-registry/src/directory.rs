//! Declarative driver for college directory searches.
//!
//! Most provincial registers follow the same shape: a search page, a form
//! (or a query URL), a result row, a status cell. [`DirectoryProbe`]
//! captures that shape as data so each province strategy is mostly
//! selectors and vocabulary; the generic run loop lives here once.

use crate::strategy::VerificationOutcome;
use rxverify_browser::{BrowserError, PageScope};
use rxverify_core::Candidate;
use std::time::Duration;
use url::form_urlencoded;

/// How a college's directory is queried.
#[derive(Debug, Clone)]
pub enum SearchMethod {
    /// Fill and submit the directory's search form.
    Form {
        /// Search page URL
        url: &'static str,
        /// Form field selectors
        form: SearchForm,
    },
    /// Interpolate candidate fields into a query URL.
    ///
    /// Placeholders: `{first}`, `{last}`, `{licence}` (percent-encoded).
    UrlTemplate {
        /// URL template
        template: &'static str,
    },
}

/// Selectors for a directory search form.
#[derive(Debug, Clone)]
pub struct SearchForm {
    /// First-name input, if the form has one
    pub first_name_input: Option<&'static str>,
    /// Last-name input, if the form has one
    pub last_name_input: Option<&'static str>,
    /// Licence-number input, if the form has one
    pub licence_input: Option<&'static str>,
    /// Submit control
    pub submit_button: &'static str,
}

/// Selectors for reading a search result.
#[derive(Debug, Clone)]
pub struct ResultSelectors {
    /// A result row; its absence after the timeout means "not found"
    pub result_row: &'static str,
    /// The registration status cell
    pub status: &'static str,
    /// Licence number cell, cross-checked against the candidate when present
    pub licence_number: Option<&'static str>,
    /// Registrant name cell, cross-checked against the candidate when present
    pub name: Option<&'static str>,
    /// Explicit empty-result marker, if the directory renders one
    pub no_results_indicator: Option<&'static str>,
}

/// One college directory described as data, plus the generic run loop.
#[derive(Debug, Clone)]
pub struct DirectoryProbe {
    /// How to reach the results
    pub search: SearchMethod,
    /// How to read them
    pub results: ResultSelectors,
    /// Status vocabulary meaning the licence is in good standing (lowercase)
    pub active_terms: &'static [&'static str],
    /// Status vocabulary meaning it is not (lowercase)
    pub inactive_terms: &'static [&'static str],
    /// How long to wait for the directory to render results
    pub results_timeout: Duration,
}

impl DirectoryProbe {
    /// Run the search and classify what the register shows.
    ///
    /// # Errors
    /// Propagates transport-level failures (navigation, lost elements); the
    /// orchestrator treats those like an unresolved outcome.
    pub async fn run(
        &self,
        candidate: &Candidate,
        page: &PageScope,
    ) -> Result<VerificationOutcome, BrowserError> {
        match &self.search {
            SearchMethod::Form { url, form } => {
                page.navigate(url).await?;
                if let Some(selector) = form.first_name_input {
                    page.fill_field(selector, &candidate.first_name).await?;
                }
                if let Some(selector) = form.last_name_input {
                    page.fill_field(selector, &candidate.last_name).await?;
                }
                if let Some(selector) = form.licence_input {
                    page.fill_field(selector, &candidate.licence_number).await?;
                }
                page.click(form.submit_button).await?;
            }
            SearchMethod::UrlTemplate { template } => {
                let url = render_template(template, candidate);
                page.navigate(&url).await?;
            }
        }

        self.read_outcome(candidate, page).await
    }

    /// Read and classify the rendered result.
    async fn read_outcome(
        &self,
        candidate: &Candidate,
        page: &PageScope,
    ) -> Result<VerificationOutcome, BrowserError> {
        let row_found = page
            .wait_for_selector(self.results.result_row, self.results_timeout)
            .await
            .is_ok();

        if !row_found {
            if let Some(marker) = self.results.no_results_indicator {
                if page.exists(marker).await {
                    tracing::debug!(
                        licence = %candidate.licence_number,
                        "directory reported no matching registrant"
                    );
                }
            }
            return Ok(VerificationOutcome::Unresolved);
        }

        if let Some(selector) = self.results.name {
            let displayed = page.extract_text(selector).await?;
            if !name_matches(&displayed, &candidate.last_name) {
                return Ok(VerificationOutcome::Unresolved);
            }
        }

        if let Some(selector) = self.results.licence_number {
            let displayed = page.extract_text(selector).await?;
            if !licence_matches(&displayed, &candidate.licence_number) {
                return Ok(VerificationOutcome::Unresolved);
            }
        }

        let status = page.extract_text(self.results.status).await?;
        Ok(classify_status(
            &status,
            self.active_terms,
            self.inactive_terms,
        ))
    }
}

/// Classify a status string against the active/inactive vocabularies.
///
/// The inactive vocabulary is checked first: "inactive" contains "active".
#[must_use]
pub fn classify_status(
    status: &str,
    active_terms: &[&str],
    inactive_terms: &[&str],
) -> VerificationOutcome {
    let status = status.to_lowercase();

    if inactive_terms.iter().any(|term| status.contains(term)) {
        return VerificationOutcome::Invalid;
    }
    if active_terms.iter().any(|term| status.contains(term)) {
        return VerificationOutcome::Verified;
    }
    VerificationOutcome::Unresolved
}

/// Compare a displayed licence value against the candidate's, ignoring
/// case, whitespace and punctuation.
#[must_use]
pub fn licence_matches(displayed: &str, expected: &str) -> bool {
    let normalize = |s: &str| {
        s.chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect::<String>()
    };

    let expected = normalize(expected);
    !expected.is_empty() && normalize(displayed).contains(&expected)
}

/// Check that a displayed registrant name covers the candidate's last name.
#[must_use]
pub fn name_matches(displayed: &str, last_name: &str) -> bool {
    !last_name.is_empty() && displayed.to_lowercase().contains(&last_name.to_lowercase())
}

/// Substitute candidate fields into a URL template, percent-encoded.
#[must_use]
pub fn render_template(template: &str, candidate: &Candidate) -> String {
    let encode =
        |s: &str| form_urlencoded::byte_serialize(s.as_bytes()).collect::<String>();

    template
        .replace("{first}", &encode(&candidate.first_name))
        .replace("{last}", &encode(&candidate.last_name))
        .replace("{licence}", &encode(&candidate.licence_number))
}
