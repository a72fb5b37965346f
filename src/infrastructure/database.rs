use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;

/// Opens the PostgreSQL pool described by `config`
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    tracing::info!(
        max_connections = config.database_max_connections,
        "Connecting to database..."
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(8))
        .connect(&config.database_url)
        .await?;

    tracing::info!("Database connected successfully");
    Ok(pool)
}

/// Applies the embedded migrations under `migrations/`
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
