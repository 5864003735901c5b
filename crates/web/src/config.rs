use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth_secret: String,
    pub matching_url: String,
    pub matching_timeout_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            auth_secret: std::env::var("AUTH_SECRET")
                .context("Cannot load AUTH_SECRET env variable")?,
            matching_url: std::env::var("MATCHING_URL")
                .unwrap_or_else(|_| "http://localhost:8001".to_string()),
            matching_timeout_ms: std::env::var("MATCHING_TIMEOUT_MS")
                .ok()
                .map(|v| v.parse())
                .transpose()
                .context("MATCHING_TIMEOUT_MS must be a number")?
                .unwrap_or(5000),
        })
    }
}
