//! # Service Configuration
//!
//! Configuration is read once at startup from the environment (optionally
//! seeded from a `.env` file). Anything required that is missing or unusable
//! is reported as a [`ConfigError`] and the process refuses to start.
//!
//! ## Environment Variables
//!
//! - `DATABASE_URL` - PostgreSQL connection string (required)
//! - `DB_NAME` - Database name, overrides the one in `DATABASE_URL` (required)
//! - `JWT_SECRET` / `JWT_SECRET_FILE` - HS256 secret, at least 32 characters (required)
//! - `CORS_ORIGINS` - Comma-separated allowed origins (required)
//! - `BIND_ADDRESS` - Listen address (default `0.0.0.0:8090`)
//! - `DATABASE_MAX_CONNECTIONS` - Pool size (default 10)

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

use crate::utils::constant::*;
use crate::utils::secret::get_secret;

/// Reasons the service cannot start
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable `{0}` should be set")]
    Missing(&'static str),
    #[error("JWT secret must be at least {MIN_JWT_SECRET_LENGTH} characters long")]
    SecretTooShort,
    #[error("`CORS_ORIGINS` does not list any origin")]
    NoCorsOrigins,
    #[error("invalid value for `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Validated service configuration
#[derive(Debug)]
pub struct Config {
    pub database_url: SecretString,
    pub database_name: String,
    pub jwt_secret: SecretString,
    pub cors_origins: Vec<HeaderValue>,
    pub bind_address: SocketAddr,
    pub max_connections: u32,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let database_url = required("DATABASE_URL")?;
        if !(database_url.starts_with("postgres://") || database_url.starts_with("postgresql://"))
        {
            return Err(ConfigError::Invalid {
                name: "DATABASE_URL",
                reason: "expected a postgres:// connection string".to_string(),
            });
        }
        PgConnectOptions::from_str(&database_url).map_err(|e| ConfigError::Invalid {
            name: "DATABASE_URL",
            reason: e.to_string(),
        })?;

        let database_name = required("DB_NAME")?.trim().to_string();

        let jwt_secret = get_secret(&lookup, "JWT_SECRET_FILE", "JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.chars().count() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::SecretTooShort);
        }

        let cors_origins = parse_origins(&required("CORS_ORIGINS")?)?;

        let bind_address = lookup("BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string())
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDRESS",
                reason: e.to_string(),
            })?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    name: "DATABASE_MAX_CONNECTIONS",
                    reason: format!("expected a positive integer, got {value:?}"),
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url: SecretString::from(database_url),
            database_name,
            jwt_secret: SecretString::from(jwt_secret),
            cors_origins,
            bind_address,
            max_connections,
        })
    }

    /// Connection options for the store, pointing at `DB_NAME`.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        Ok(PgConnectOptions::from_str(self.database_url.expose_secret())?
            .database(&self.database_name))
    }
}

/// Splits a comma-separated origin list, dropping blank entries.
fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            if origin == "*" {
                return Err(ConfigError::Invalid {
                    name: "CORS_ORIGINS",
                    reason: "wildcard origin is not allowed".to_string(),
                });
            }
            HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                name: "CORS_ORIGINS",
                reason: format!("{origin:?}: {e}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if origins.is_empty() {
        return Err(ConfigError::NoCorsOrigins);
    }

    Ok(origins)
}
