//! Prescriber record operations.
//!
//! This module implements the two persistence contracts the verification
//! pipeline relies on: the deduplication lookup by natural identity and the
//! creation of new prescriber stubs with a bounded-retry insert.

use crate::error::{DatabaseError, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use rxverify_core::{Candidate, ProviderCode};
use serde::{Deserialize, Serialize};
use sqlx::{Pool, Row, Sqlite};
use std::time::Duration;

/// Maximum number of insert attempts before giving up.
const MAX_INSERT_ATTEMPTS: u32 = 3;

/// Delay between insert attempts.
const RETRY_DELAY_MS: u64 = 500;

/// A persisted prescriber row.
///
/// Rows created by the pipeline are stubs: `registered` stays false until
/// the prescriber completes signup through the account flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriberRecord {
    /// Unique record identifier (UUID v4)
    pub id: String,
    /// Assigned provider code
    pub provider_code: ProviderCode,
    /// Contact email address
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Preferred language
    pub language: String,
    /// City of practice
    pub city: String,
    /// Province code
    pub province: String,
    /// Street address
    pub address: String,
    /// Professional designation
    pub profession: String,
    /// Licensing college display name
    pub licensing_college: String,
    /// Licence number
    pub licence_number: String,
    /// Whether the prescriber has completed signup
    pub registered: bool,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

/// Look up an already-verified prescriber by natural identity.
///
/// Identity is first/last name (case-insensitive) plus licensing college and
/// licence number; this is the deduplication gate, queried before any
/// network verification is attempted.
///
/// # Errors
/// Returns `DatabaseError` if the query fails.
pub async fn find_existing(
    pool: &Pool<Sqlite>,
    candidate: &Candidate,
) -> Result<Option<PrescriberRecord>> {
    let row = sqlx::query(
        "SELECT id, provider_code, email, first_name, last_name, language, city,
                province, address, profession, licensing_college, licence_number,
                registered, created_at
         FROM prescribers
         WHERE first_name = ? COLLATE NOCASE
           AND last_name = ? COLLATE NOCASE
           AND licensing_college = ?
           AND licence_number = ?",
    )
    .bind(&candidate.first_name)
    .bind(&candidate.last_name)
    .bind(&candidate.licensing_college)
    .bind(&candidate.licence_number)
    .fetch_optional(pool)
    .await?;

    row.map(parse_prescriber_row).transpose()
}

/// Create a new prescriber stub for a verified candidate.
///
/// Generates a provider code from the candidate's initials and inserts with
/// a bounded retry: a provider-code collision regenerates the code, a
/// transient failure backs off and retries, and an identity collision aborts
/// immediately (the record already exists).
///
/// # Errors
/// Returns `DatabaseError::InsertRetriesExhausted` once the retry budget is
/// spent; the caller must not report the candidate as verified in that case.
pub async fn create_prescriber(
    pool: &Pool<Sqlite>,
    candidate: &Candidate,
) -> Result<PrescriberRecord> {
    let mut last_error = String::new();

    for attempt in 1..=MAX_INSERT_ATTEMPTS {
        let provider_code = generate_provider_code(candidate);

        match try_insert(pool, candidate, &provider_code).await {
            Ok(record) => return Ok(record),
            Err(DatabaseError::Sqlx(sqlx::Error::Database(db_err)))
                if db_err.is_unique_violation() =>
            {
                let message = db_err.message().to_string();
                if message.contains("provider_code") {
                    tracing::warn!(
                        code = %provider_code,
                        attempt,
                        "provider code collision, regenerating"
                    );
                    last_error = message;
                    continue;
                }
                // Identity collision: the record exists, retrying cannot help.
                return Err(DatabaseError::Sqlx(sqlx::Error::Database(db_err)));
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    attempt,
                    max_attempts = MAX_INSERT_ATTEMPTS,
                    "prescriber insert failed, retrying"
                );
                last_error = e.to_string();

                if attempt < MAX_INSERT_ATTEMPTS {
                    tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS)).await;
                }
            }
        }
    }

    Err(DatabaseError::InsertRetriesExhausted {
        attempts: MAX_INSERT_ATTEMPTS,
        reason: last_error,
    })
}

/// Mark a prescriber as registered once they complete signup.
///
/// # Errors
/// Returns `DatabaseError::NotFound` if no row carries the provider code.
pub async fn mark_registered(pool: &Pool<Sqlite>, provider_code: &ProviderCode) -> Result<()> {
    let result = sqlx::query("UPDATE prescribers SET registered = 1 WHERE provider_code = ?")
        .bind(provider_code.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound);
    }

    Ok(())
}

/// Single insert attempt; unique violations bubble up for the retry loop.
async fn try_insert(
    pool: &Pool<Sqlite>,
    candidate: &Candidate,
    provider_code: &str,
) -> Result<PrescriberRecord> {
    let id = uuid::Uuid::new_v4().to_string();
    let created_at = Utc::now();

    sqlx::query(
        "INSERT INTO prescribers (id, provider_code, email, first_name, last_name,
                                  language, city, province, address, profession,
                                  licensing_college, licence_number, registered, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?)",
    )
    .bind(&id)
    .bind(provider_code)
    .bind(&candidate.email)
    .bind(&candidate.first_name)
    .bind(&candidate.last_name)
    .bind(&candidate.language)
    .bind(&candidate.city)
    .bind(&candidate.province)
    .bind(&candidate.address)
    .bind(&candidate.profession)
    .bind(&candidate.licensing_college)
    .bind(&candidate.licence_number)
    .bind(created_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(PrescriberRecord {
        id,
        provider_code: ProviderCode::new(provider_code)
            .map_err(|e| DatabaseError::Decode(e.to_string()))?,
        email: candidate.email.clone(),
        first_name: candidate.first_name.clone(),
        last_name: candidate.last_name.clone(),
        language: candidate.language.clone(),
        city: candidate.city.clone(),
        province: candidate.province.clone(),
        address: candidate.address.clone(),
        profession: candidate.profession.clone(),
        licensing_college: candidate.licensing_college.clone(),
        licence_number: candidate.licence_number.clone(),
        registered: false,
        created_at,
    })
}

/// Derive a fresh provider code: candidate initials plus six random digits.
fn generate_provider_code(candidate: &Candidate) -> String {
    let initial = |name: &str| {
        name.chars()
            .find(char::is_ascii_alphabetic)
            .map_or('X', |c| c.to_ascii_uppercase())
    };

    let digits: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!(
        "{}{}{digits:06}",
        initial(&candidate.first_name),
        initial(&candidate.last_name)
    )
}

/// Helper to parse a prescriber row.
fn parse_prescriber_row(row: sqlx::sqlite::SqliteRow) -> Result<PrescriberRecord> {
    let provider_code_str: String = row.try_get("provider_code")?;
    let provider_code = ProviderCode::new(provider_code_str)
        .map_err(|e| DatabaseError::Decode(e.to_string()))?;

    let created_at_str: String = row.try_get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| DatabaseError::Decode(format!("invalid created_at: {e}")))?
        .with_timezone(&Utc);

    let registered: i64 = row.try_get("registered")?;

    Ok(PrescriberRecord {
        id: row.try_get("id")?,
        provider_code,
        email: row.try_get("email")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        language: row.try_get("language")?,
        city: row.try_get("city")?,
        province: row.try_get("province")?,
        address: row.try_get("address")?,
        profession: row.try_get("profession")?,
        licensing_college: row.try_get("licensing_college")?,
        licence_number: row.try_get("licence_number")?,
        registered: registered != 0,
        created_at,
    })
}
