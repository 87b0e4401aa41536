//! Configuration loading from environment.

use std::env;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub rate_api_url: String,
    pub rate_refresh_secs: u64,
    pub rate_limit_per_minute: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let rate_api_url = env::var("RATE_API_URL")
            .map_err(|_| anyhow::anyhow!("RATE_API_URL environment variable is required"))?;

        let rate_refresh_secs = env::var("RATE_REFRESH_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()?;

        let rate_limit_per_minute = env::var("RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|_| "100".to_string())
            .parse()?;

        Ok(Self {
            port,
            database_url,
            rate_api_url,
            rate_refresh_secs,
            rate_limit_per_minute,
        })
    }
}
