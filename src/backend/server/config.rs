/**
 * Server Configuration
 *
 * Configuration is read from environment variables (after `.env` is loaded
 * by the binary). Only the token signing key is required; everything else
 * has a development default.
 *
 * | Variable         | Default          | Notes                                   |
 * |------------------|------------------|-----------------------------------------|
 * | `JWT_KEY`        | (required)       | HS256 signing key                       |
 * | `PORT`           | `5000`           |                                         |
 * | `DATABASE_URL`   | unset            | unset → in-memory store                 |
 * | `UPLOAD_DIR`     | `uploads/images` | served at `/uploads/images`             |
 * | `GOOGLE_API_KEY` | unset            | unset → fixed-coordinate geocoder       |
 * | `BCRYPT_COST`    | `12`             | 4..=31                                  |
 */

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::backend::auth::credentials::BcryptVerifier;

/// Configuration errors; all of them stop the server from starting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingValue(&'static str),
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Server configuration
#[derive(Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub jwt_key: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub upload_dir: PathBuf,
    pub google_api_key: Option<String>,
    pub bcrypt_cost: u32,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("jwt_key", &"<redacted>")
            .field("port", &self.port)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("upload_dir", &self.upload_dir)
            .field("google_api_key", &self.google_api_key.as_ref().map(|_| "<redacted>"))
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 5000;
    pub const DEFAULT_UPLOAD_DIR: &'static str = "uploads/images";

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let jwt_key = get("JWT_KEY").ok_or(ConfigError::MissingValue("JWT_KEY"))?;

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value: raw })?,
            None => Self::DEFAULT_PORT,
        };

        let bcrypt_cost = match get("BCRYPT_COST") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(cost) if (4..=31).contains(&cost) => cost,
                _ => return Err(ConfigError::InvalidValue { key: "BCRYPT_COST", value: raw }),
            },
            None => BcryptVerifier::DEFAULT_COST,
        };

        Ok(Self {
            jwt_key,
            port,
            database_url: get("DATABASE_URL"),
            upload_dir: get("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_UPLOAD_DIR)),
            google_api_key: get("GOOGLE_API_KEY"),
            bcrypt_cost,
        })
    }
}
