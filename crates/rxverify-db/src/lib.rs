//! rxverify persistence layer.
//!
//! Provides `SQLite` access through `SQLx` with embedded migrations. The two
//! operations the verification pipeline depends on live in [`prescribers`]:
//! the deduplication lookup and the bounded-retry prescriber insert.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod migrations;
pub mod prescribers;

// Re-export commonly used types
pub use error::{DatabaseError, Result};
pub use prescribers::PrescriberRecord;

use rxverify_core::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

/// High-level database interface with pooling and migrations.
#[derive(Debug)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (or create) a database at the given path.
    ///
    /// Use `:memory:` for an in-memory database; tests should pair that with
    /// a single pooled connection.
    ///
    /// # Errors
    /// Returns `DatabaseError::Open` if the path is invalid or the database
    /// cannot be opened.
    pub async fn open(path: &str, max_connections: u32) -> Result<Self> {
        let connect_options = SqliteConnectOptions::from_str(path)
            .map_err(|e| DatabaseError::Open(format!("invalid connection string: {e}")))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_options)
            .await
            .map_err(|e| DatabaseError::Open(format!("failed to connect: {e}")))?;

        tracing::info!("Database pool created at {}", path);

        Ok(Self { pool })
    }

    /// Open a database from the application configuration.
    ///
    /// # Errors
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::open(&config.path, config.max_connections).await
    }

    /// Run all pending database migrations.
    ///
    /// # Errors
    /// Returns `DatabaseError::Migration` if any migration fails.
    pub async fn run_migrations(&self) -> Result<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Get a reference to the underlying `SQLx` pool.
    #[must_use]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Close the connection pool gracefully.
    pub async fn close(self) {
        self.pool.close().await;
        tracing::info!("Database pool closed");
    }
}
