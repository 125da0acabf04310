use std::env;

use thiserror::Error;

use crate::infrastructure::statements::CatalogScope;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub scope: CatalogScope,
    pub pool_size: u32,
    pub apply_reference_schema: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`, so tests need not touch the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or("PORT", lookup("PORT"), 3000, "a valid port number")?;
        let pool_size = parse_or("DB_POOL_SIZE", lookup("DB_POOL_SIZE"), 10, "a positive integer")?;
        if pool_size == 0 {
            return Err(ConfigError::Invalid {
                name: "DB_POOL_SIZE",
                expected: "a positive integer",
                value: "0".to_string(),
            });
        }
        let apply_reference_schema = parse_or(
            "APPLY_REFERENCE_SCHEMA",
            lookup("APPLY_REFERENCE_SCHEMA"),
            false,
            "true or false",
        )?;

        let scope = CatalogScope {
            schema: lookup("DB_SCHEMA")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "public".to_string()),
            catalog: lookup("DB_CATALOG").filter(|s| !s.is_empty()),
        };

        Ok(Self {
            database_url,
            host,
            port,
            scope,
            pool_size,
            apply_reference_schema,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}
