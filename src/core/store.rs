use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::core::error::ConfigError;

pub(crate) async fn connect(database_url: &str) -> Result<PgPool, ConfigError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .map_err(ConfigError::DatabaseConnectionFailure)?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(ConfigError::DatabaseMigration)?;

    Ok(pool)
}
