//! Collège des médecins du Québec.
//!
//! The CMQ directory is reachable with a plain query URL, and its status
//! vocabulary is French.

use crate::directory::{DirectoryProbe, ResultSelectors, SearchMethod};
use crate::strategy::{VerificationOutcome, VerificationStrategy};
use rxverify_browser::{BrowserError, PageScope};
use rxverify_core::Candidate;
use std::time::Duration;

/// Looks up registrants in the CMQ "Bottin des médecins".
pub struct QuebecStrategy {
    probe: DirectoryProbe,
}

impl QuebecStrategy {
    /// Create the strategy with the configured results timeout.
    #[must_use]
    pub fn new(results_timeout: Duration) -> Self {
        Self {
            probe: DirectoryProbe {
                search: SearchMethod::UrlTemplate {
                    template:
                        "https://www.cmq.org/fr/bottin/medecins?number={licence}&lastName={last}",
                },
                results: ResultSelectors {
                    result_row: ".bottin-resultats .medecin",
                    status: ".bottin-resultats .medecin .statut-inscription",
                    licence_number: Some(".bottin-resultats .medecin .numero-permis"),
                    name: None,
                    no_results_indicator: Some(".bottin-resultats .aucun-resultat"),
                },
                active_terms: &["inscrit", "actif"],
                inactive_terms: &[
                    "non inscrit",
                    "radié",
                    "radiation",
                    "retraité",
                    "retiré",
                    "décédé",
                    "inactif",
                ],
                results_timeout,
            },
        }
    }
}

#[async_trait::async_trait]
impl VerificationStrategy for QuebecStrategy {
    fn college(&self) -> &'static str {
        "Collège des médecins du Québec"
    }

    async fn verify(
        &self,
        candidate: &Candidate,
        page: &PageScope,
    ) -> Result<VerificationOutcome, BrowserError> {
        self.probe.run(candidate, page).await
    }
}
