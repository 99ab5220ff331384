//! Candidate schema validation and casting.
//!
//! Raw candidates arrive with every field optional. `cast` checks the whole
//! shape and normalizes it into a [`Candidate`]; `is_valid` answers the
//! yes/no question without producing one. A candidate that fails here never
//! reaches a verification strategy.

use crate::error::SchemaError;
use crate::types::{Candidate, RawCandidate};
use regex::Regex;
use std::sync::OnceLock;

/// Canadian province and territory codes accepted on the wire.
const PROVINCE_CODES: [&str; 13] = [
    "AB", "BC", "MB", "NB", "NL", "NS", "NT", "NU", "ON", "PE", "QC", "SK", "YT",
];

/// Check whether a raw candidate would survive casting.
#[must_use]
pub fn is_valid(raw: &RawCandidate) -> bool {
    cast(raw).is_ok()
}

/// Validate a raw candidate and cast it to canonical form.
///
/// Normalization: all fields trimmed, email and language lowercased,
/// province uppercased.
///
/// # Errors
/// Returns the first [`SchemaError`] encountered, in field order.
pub fn cast(raw: &RawCandidate) -> Result<Candidate, SchemaError> {
    let email = required(&raw.email, "email")?.to_lowercase();
    if !email_regex().is_match(&email) {
        return Err(SchemaError::InvalidEmail { value: email });
    }

    let first_name = required(&raw.first_name, "firstName")?;
    let last_name = required(&raw.last_name, "lastName")?;

    let language = required(&raw.language, "language")?.to_lowercase();
    if language != "en" && language != "fr" {
        return Err(SchemaError::UnsupportedLanguage { value: language });
    }

    let city = required(&raw.city, "city")?;

    let province = required(&raw.province, "province")?.to_uppercase();
    if !PROVINCE_CODES.contains(&province.as_str()) {
        return Err(SchemaError::UnknownProvince { value: province });
    }

    let address = required(&raw.address, "address")?;
    let profession = required(&raw.profession, "profession")?;
    let licensing_college = required(&raw.licensing_college, "licensingCollege")?;
    let licence_number = required(&raw.licence_number, "licenceNumber")?;

    Ok(Candidate {
        email,
        first_name,
        last_name,
        language,
        city,
        province,
        address,
        profession,
        licensing_college,
        licence_number,
    })
}

/// Extract a required field, trimmed; absent or blank is an error.
fn required(value: &Option<String>, field: &'static str) -> Result<String, SchemaError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(SchemaError::MissingField { field }),
    }
}

/// Pragmatic email shape check; deliverability is not our problem.
fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex")
    })
}
