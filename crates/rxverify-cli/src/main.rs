//! Batch runner for the verification pipeline.
//!
//! Reads a JSON array of raw candidates, runs them through the pipeline and
//! prints the three-bucket aggregate as JSON. Fatal preconditions (bad
//! configuration, browser launch failure) exit non-zero before any
//! candidate is processed.

use anyhow::Context;
use clap::Parser;
use rxverify_core::{AppConfig, RawCandidate};
use rxverify_db::Database;
use rxverify_registry::StrategyRegistry;
use rxverify_verifier::BatchVerifier;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rxverify",
    about = "Verify prescriber credentials against provincial college registries",
    version
)]
struct Cli {
    /// JSON file containing an array of candidates
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Configuration file (defaults to the XDG config path)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// SQLite database path (overrides configuration)
    #[arg(long)]
    database: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path).context("load configuration")?,
        None => AppConfig::load().context("load configuration")?,
    };
    config.apply_env().context("apply environment overrides")?;
    if let Some(path) = cli.database {
        config.database.path = path;
    }

    let contents = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("read {}", cli.input.display()))?;
    let batch: Vec<RawCandidate> =
        serde_json::from_str(&contents).context("parse candidate batch")?;
    tracing::info!(candidates = batch.len(), "starting verification batch");

    let db = Database::from_config(&config.database)
        .await
        .context("open database")?;
    db.run_migrations().await.context("run migrations")?;

    let registry = Arc::new(StrategyRegistry::with_default_strategies(
        &config.verification,
    ));

    let verifier = BatchVerifier::new(registry, Arc::new(db), config);
    let outcome = verifier
        .verify_batch(batch)
        .await
        .context("verification run failed")?;

    tracing::info!(
        verified = outcome.verified.len(),
        invalid = outcome.invalid.len(),
        error = outcome.error.len(),
        "batch complete"
    );

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
