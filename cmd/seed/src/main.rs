//! Loads policy reference data into the database.
//!
//! Usage: `seed [policies.json]`. The file is a JSON array of
//! `{region, field, policyName, description}` objects. Policies are
//! read-only at runtime, so this is the only write path they have.

use plaza_config::AppConfig;
use plaza_core::models::Policy;
use plaza_db_sqlite::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "policies.json".to_string());

    let cfg = AppConfig::load()?;
    let raw = tokio::fs::read_to_string(&path).await?;
    let policies: Vec<Policy> = serde_json::from_str(&raw)?;

    let store = SqliteStore::new(&cfg.database.url).await?;
    let loaded = store.seed_policies(&policies).await?;

    tracing::info!(%path, loaded, "policy reference data loaded");
    Ok(())
}
