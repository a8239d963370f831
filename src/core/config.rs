use config::{Config, Environment};
use serde::Deserialize;

use crate::core::error::ConfigError;

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct Args {
    pub(crate) database_host: String,
    pub(crate) database_port: u16,
    pub(crate) database_name: String,
    pub(crate) database_user: String,
    pub(crate) database_password: String,
    pub(crate) log_level: String,
    pub(crate) port: u16,
    pub(crate) secret: String,
    pub(crate) algorithm: String,
    pub(crate) access_token_expire_minutes: i64,
    pub(crate) bcrypt_cost: u32,
}

impl Args {
    /// Reads `SHOP_*` environment variables once at startup.
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("log_level", "info")?
            .set_default("port", 8000_i64)?
            .set_default("algorithm", "HS256")?
            .set_default("access_token_expire_minutes", 30_i64)?
            .set_default("bcrypt_cost", i64::from(bcrypt::DEFAULT_COST))?
            .add_source(Environment::with_prefix("SHOP"))
            .build()?;

        Ok(config.try_deserialize::<Args>()?)
    }

    pub(crate) fn database_url(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.database_user,
            self.database_password,
            self.database_host,
            self.database_port,
            self.database_name
        )
    }
}
