//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database path, server bind address, the algod/indexer/kmd endpoints and
//! their API tokens, and the location of the sandbox checkout.
//!
//! Values are resolved in three layers: built-in defaults matching the developer
//! sandbox, an optional TOML file named by `ALGODESK_CONFIG`, and finally
//! environment variable overrides.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE_ENV: &str = "ALGODESK_CONFIG";

const SANDBOX_TOKEN: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

/// Initial funding sent to new standalone accounts, in microAlgos.
pub const DEFAULT_INITIAL_FUNDS: u64 = 1_000_000_000;
/// Rounds to wait for a submitted transaction before giving up.
pub const DEFAULT_CONFIRMATION_ROUNDS: u64 = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceEndpoint {
    pub url: String,
    pub token: String,
}

impl ServiceEndpoint {
    fn sandbox(url: &str) -> Self {
        Self {
            url: url.to_string(),
            token: SANDBOX_TOKEN.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_path: PathBuf,
    pub algod: ServiceEndpoint,
    pub indexer: ServiceEndpoint,
    pub kmd: ServiceEndpoint,
    pub sandbox_dir: PathBuf,
    pub confirmation_rounds: u64,
    pub initial_funds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            database_path: PathBuf::from("algodesk.sqlite3"),
            algod: ServiceEndpoint::sandbox("http://localhost:4001"),
            indexer: ServiceEndpoint::sandbox("http://localhost:8980"),
            kmd: ServiceEndpoint::sandbox("http://localhost:4002"),
            sandbox_dir: PathBuf::from("..").join("sandbox"),
            confirmation_rounds: DEFAULT_CONFIRMATION_ROUNDS,
            initial_funds: DEFAULT_INITIAL_FUNDS,
        }
    }
}

fn parse_number(key: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

impl Config {
    /// Loads defaults, then the file named by `ALGODESK_CONFIG`, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) if !path.is_empty() => Self::from_file(Path::new(&path))?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Overrides fields from environment-style lookups.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("ALGODESK_BIND") {
            self.bind_address = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "ALGODESK_BIND",
                value,
            })?;
        }
        if let Some(value) = lookup("ALGODESK_DATABASE") {
            self.database_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("ALGODESK_ALGOD_URL") {
            self.algod.url = value;
        }
        if let Some(value) = lookup("ALGODESK_ALGOD_TOKEN") {
            self.algod.token = value;
        }
        if let Some(value) = lookup("ALGODESK_INDEXER_URL") {
            self.indexer.url = value;
        }
        if let Some(value) = lookup("ALGODESK_INDEXER_TOKEN") {
            self.indexer.token = value;
        }
        if let Some(value) = lookup("ALGODESK_KMD_URL") {
            self.kmd.url = value;
        }
        if let Some(value) = lookup("ALGODESK_KMD_TOKEN") {
            self.kmd.token = value;
        }
        if let Some(value) = lookup("SANDBOX_DIR").filter(|v| !v.is_empty()) {
            self.sandbox_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("ALGODESK_CONFIRMATION_ROUNDS") {
            self.confirmation_rounds = parse_number("ALGODESK_CONFIRMATION_ROUNDS", value)?;
        }
        if let Some(value) = lookup("ALGODESK_INITIAL_FUNDS") {
            self.initial_funds = parse_number("ALGODESK_INITIAL_FUNDS", value)?;
        }
        Ok(())
    }
}
