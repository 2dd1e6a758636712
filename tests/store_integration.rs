use std::env;
use uuid::Uuid;

use rust_leadscore_api::db::Database;
use rust_leadscore_api::store::{SettingsStore, SignalStore};

/// Integration smoke test for the signal and settings stores.
/// Marked ignored to avoid running against production by accident; set
/// TEST_DATABASE_URL to run.
#[tokio::test]
#[ignore]
async fn signal_store_smoke_test() -> anyhow::Result<()> {
    let db_url = env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .map_err(|_| anyhow::anyhow!("Set TEST_DATABASE_URL or DATABASE_URL to run this test"))?;

    let db = Database::new(&db_url).await?;

    // An unknown company yields an empty list, not an error.
    let signals = SignalStore::new(db.pool.clone())
        .company_signals(Uuid::new_v4(), Some("no-such-company"))
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    assert!(signals.is_empty());

    // Settings load degrades to defaults when no rows are configured.
    let overrides = SettingsStore::new(db.pool.clone()).scoring_overrides().await;
    let _ = overrides;

    Ok(())
}
