use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::common::{BCRYPT_COST, JWT_EXPIRATION_SECONDS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageMode {
    InMemory,
    Postgres { database_url: String },
}

/// Secrets and costs used to hash passwords and issue session tokens.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    pub token_ttl_seconds: usize,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        AuthConfig {
            jwt_secret: jwt_secret.into(),
            bcrypt_cost: BCRYPT_COST,
            token_ttl_seconds: JWT_EXPIRATION_SECONDS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageMode,
    pub auth: AuthConfig,
}

pub struct Env;

impl Env {
    pub fn jwt_secret() -> Result<String, ConfigError> {
        required("JWT_SECRET")
    }

    pub fn database_url() -> Result<String, ConfigError> {
        required("DATABASE_URL")
    }

    /// `STORAGE_MODE`: `postgres` (default) or `in_memory`.
    pub fn storage_mode() -> Result<StorageMode, ConfigError> {
        match env::var("STORAGE_MODE").ok().as_deref().map(str::trim) {
            None | Some("") | Some("postgres") => Ok(StorageMode::Postgres {
                database_url: Env::database_url()?,
            }),
            Some("in_memory") => Ok(StorageMode::InMemory),
            Some(other) => Err(ConfigError::Invalid {
                name: "STORAGE_MODE",
                value: other.to_string(),
            }),
        }
    }

    pub fn bcrypt_cost() -> Result<u32, ConfigError> {
        optional("BCRYPT_COST", BCRYPT_COST)
    }

    pub fn jwt_ttl_seconds() -> Result<usize, ConfigError> {
        optional("JWT_TTL_SECONDS", JWT_EXPIRATION_SECONDS)
    }

    pub fn load() -> Result<AppConfig, ConfigError> {
        Ok(AppConfig {
            storage: Env::storage_mode()?,
            auth: AuthConfig {
                jwt_secret: Env::jwt_secret()?,
                bcrypt_cost: Env::bcrypt_cost()?,
                token_ttl_seconds: Env::jwt_ttl_seconds()?,
            },
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn optional<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => {
            value.trim().parse().map_err(|_| ConfigError::Invalid { name, value })
        }
        _ => Ok(default),
    }
}
