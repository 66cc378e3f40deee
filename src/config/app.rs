//! Environment-backed runtime configuration.
//!
//! All values are loaded from environment variables (a `.env` file is read
//! when present). The CDN settings are separate from [`AppConfig`] because
//! only the upload path needs them; everything else runs without a CDN
//! configured.

use crate::errors::{Error, Result};
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/storefront_admin.sqlite";
const DEFAULT_SESSION_TTL_MINUTES: i64 = 10_080; // 7 days
const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 30;

/// Application-level settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection URL
    pub database_url: String,
    /// How long a minted session stays valid, in minutes
    pub session_ttl_minutes: i64,
}

impl AppConfig {
    /// Loads settings from the environment, falling back to defaults.
    ///
    /// # Errors
    /// Returns a configuration error if `SESSION_TTL_MINUTES` is set but not
    /// a positive integer.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let session_ttl_minutes = match std::env::var("SESSION_TTL_MINUTES") {
            Ok(raw) => parse_positive_minutes(&raw)?,
            Err(_) => DEFAULT_SESSION_TTL_MINUTES,
        };

        Ok(Self {
            database_url,
            session_ttl_minutes,
        })
    }

    /// The session TTL as a duration, ready for `core::auth::login`.
    #[must_use]
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_ttl_minutes)
    }
}

/// Settings for the external image CDN.
#[derive(Debug, Clone)]
pub struct CdnConfig {
    /// Upload endpoint URL
    pub endpoint: String,
    /// Unsigned upload preset name (folder restrictions are enforced
    /// server-side by the CDN)
    pub upload_preset: String,
    /// Request timeout for uploads
    pub timeout: Duration,
}

impl CdnConfig {
    /// Loads CDN settings from the environment.
    ///
    /// # Errors
    /// Returns a configuration error if `CDN_UPLOAD_URL` or
    /// `CDN_UPLOAD_PRESET` is missing, or the timeout is not a positive
    /// integer.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let endpoint = std::env::var("CDN_UPLOAD_URL").map_err(|_| Error::Config {
            message: "CDN_UPLOAD_URL is not set".to_string(),
        })?;
        let upload_preset = std::env::var("CDN_UPLOAD_PRESET").map_err(|_| Error::Config {
            message: "CDN_UPLOAD_PRESET is not set".to_string(),
        })?;
        let timeout = match std::env::var("CDN_UPLOAD_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout_secs(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS),
        };

        Ok(Self {
            endpoint,
            upload_preset,
            timeout,
        })
    }
}

fn parse_positive_minutes(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|minutes| *minutes > 0)
        .ok_or_else(|| Error::Config {
            message: format!("SESSION_TTL_MINUTES must be a positive integer, got \"{raw}\""),
        })
}

fn parse_timeout_secs(raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| Error::Config {
            message: format!("CDN_UPLOAD_TIMEOUT_SECS must be a positive integer, got \"{raw}\""),
        })
}
