// src/config.rs
use anyhow::{Context, Result};
use log::{info, warn};
use std::env;
use std::time::Duration;

pub const DEFAULT_EMISSIONS_URL: &str =
    "https://greenhouse-gas-emissions-back.onrender.com/api/emissions/";
pub const DEFAULT_PORT: u16 = 3030;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub emissions_url: String,
    pub port: u16,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            emissions_url: DEFAULT_EMISSIONS_URL.to_string(),
            port: DEFAULT_PORT,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Reads configuration from the environment. Call `dotenv().ok()` first
    /// if a `.env` file should be honored.
    pub fn from_env() -> Result<Self> {
        let emissions_url = env::var("EMISSIONS_API_URL").unwrap_or_else(|_| {
            info!("EMISSIONS_API_URL not set, using {}", DEFAULT_EMISSIONS_URL);
            DEFAULT_EMISSIONS_URL.to_string()
        });

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a number, got {:?}", raw))?,
            Err(_) => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        let timeout_secs = match env::var("EMISSIONS_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .with_context(|| {
                    format!("EMISSIONS_TIMEOUT_SECS must be a number, got {:?}", raw)
                })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(AppConfig {
            emissions_url,
            port,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn with_emissions_url(mut self, url: impl Into<String>) -> Self {
        self.emissions_url = url.into();
        self
    }
}
