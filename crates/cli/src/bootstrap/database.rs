use iterdns_domain::config::DatabaseConfig;
use iterdns_infrastructure::database::create_pool;
use sqlx::SqlitePool;
use tracing::{error, info};

pub async fn init_database(cfg: &DatabaseConfig) -> anyhow::Result<SqlitePool> {
    info!("Initializing record cache database: {}", cfg.path);

    let pool = create_pool(cfg).await.map_err(|e| {
        error!("Failed to initialize record cache database: {}", e);
        anyhow::anyhow!(e)
    })?;

    info!(
        "Database initialized successfully (in_memory={}, max_connections={})",
        cfg.is_in_memory(),
        if cfg.is_in_memory() { 1 } else { cfg.max_connections },
    );

    Ok(pool)
}
