//! Shared types used across the rxverify application.
//!
//! This module defines the candidate shapes that flow through the
//! verification pipeline and the newtypes that keep identifiers honest.

use crate::error::RxVerifyError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// One inbound candidate as it arrives on the wire.
///
/// Every field is optional: the batch endpoint accepts whatever the caller
/// sends and the schema decides what is usable. Field names mirror the JSON
/// payload (camelCase). A `RawCandidate` that fails validation is returned
/// in the `error` bucket exactly as it came in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCandidate {
    /// Contact email address
    pub email: Option<String>,
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Preferred language (`en` or `fr`)
    pub language: Option<String>,
    /// City of practice
    pub city: Option<String>,
    /// Two-letter Canadian province code
    pub province: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// Professional designation (e.g. "Physician")
    pub profession: Option<String>,
    /// Display name of the licensing college; selects the strategy
    pub licensing_college: Option<String>,
    /// Licence number as issued by the college
    pub licence_number: Option<String>,
}

/// A candidate that passed schema validation and was cast to canonical form.
///
/// All fields are trimmed; email and language are lowercased, the province
/// is uppercased. Only `schema::cast` produces values of this type, so a
/// `Candidate` reaching a strategy is known to be well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Contact email address, lowercased
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Preferred language, `en` or `fr`
    pub language: String,
    /// City of practice
    pub city: String,
    /// Two-letter Canadian province code, uppercased
    pub province: String,
    /// Street address
    pub address: String,
    /// Professional designation
    pub profession: String,
    /// Display name of the licensing college
    pub licensing_college: String,
    /// Licence number as issued by the college
    pub licence_number: String,
}

impl Candidate {
    /// Full display name, used in log lines.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<Candidate> for RawCandidate {
    fn from(c: Candidate) -> Self {
        Self {
            email: Some(c.email),
            first_name: Some(c.first_name),
            last_name: Some(c.last_name),
            language: Some(c.language),
            city: Some(c.city),
            province: Some(c.province),
            address: Some(c.address),
            profession: Some(c.profession),
            licensing_college: Some(c.licensing_college),
            licence_number: Some(c.licence_number),
        }
    }
}

/// A verified candidate carrying its assigned provider code.
///
/// Serializes as the candidate fields plus `providerCode`, so the output
/// shape is the input shape with one extra field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedPrescriber {
    /// The canonical candidate data
    #[serde(flatten)]
    pub candidate: Candidate,
    /// Assigned provider code, newly created or reused from an existing record
    pub provider_code: ProviderCode,
}

impl VerifiedPrescriber {
    /// Attach a provider code to a candidate.
    #[must_use]
    pub fn new(candidate: Candidate, provider_code: ProviderCode) -> Self {
        Self {
            candidate,
            provider_code,
        }
    }
}

/// Newtype for prescriber provider codes with validation.
///
/// Provider codes are two uppercase letters followed by six digits,
/// e.g. `JD045173`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderCode(String);

impl ProviderCode {
    /// Create a new `ProviderCode` from a string.
    ///
    /// # Errors
    /// Returns error if the code doesn't match the required format.
    pub fn new(code: impl Into<String>) -> Result<Self, RxVerifyError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate provider code format: two uppercase letters, six digits.
    fn validate(code: &str) -> Result<(), RxVerifyError> {
        static CODE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex =
            CODE_REGEX.get_or_init(|| Regex::new(r"^[A-Z]{2}[0-9]{6}$").expect("valid regex"));

        if regex.is_match(code) {
            Ok(())
        } else {
            Err(RxVerifyError::Validation(format!(
                "invalid provider code: expected two uppercase letters and six digits, got '{code}'"
            )))
        }
    }
}

impl fmt::Display for ProviderCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
