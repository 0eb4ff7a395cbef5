use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

use configs::DatabaseConfig;

/// Connect with pool settings taken from configuration.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    tracing::debug!(max = cfg.max_connections, min = cfg.min_connections, "connecting database pool");
    let db = Database::connect(opts).await?;
    Ok(db)
}

/// Single-connection in-memory SQLite database, for local runs and tests.
/// One connection only: every pooled connection would otherwise see its own empty database.
pub async fn connect_in_memory() -> anyhow::Result<DatabaseConnection> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    connect_with_config(&cfg).await
}
