use std::path::PathBuf;

use thiserror::Error;

use crate::db::DbConfig;

/// Application-level constants
pub const APP_NAME: &str = "clinicdb-admin";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE: &str = "clinicdb.sqlite3";
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,clinicdb_admin=debug"
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Required environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Startup configuration, read once from the environment and passed down
/// explicitly.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: PathBuf,
    pub db_key: Option<String>,
    pub secret_key: String,
    pub static_dir: PathBuf,
    pub seed_on_start: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match var("CLINICDB_PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "CLINICDB_PORT",
                value: raw,
            })?,
        };

        let seed_on_start = match var("CLINICDB_SEED_ON_START") {
            None => false,
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid {
                name: "CLINICDB_SEED_ON_START",
                value: raw,
            })?,
        };

        Ok(Self {
            host: var("CLINICDB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database: var("CLINICDB_DATABASE")
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string())
                .into(),
            db_key: var("CLINICDB_DB_KEY"),
            secret_key: var("CLINICDB_SECRET_KEY")
                .ok_or(ConfigError::MissingVar("CLINICDB_SECRET_KEY"))?,
            static_dir: var("CLINICDB_STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
            seed_on_start,
        })
    }

    /// `host:port` for the listener; host names are resolved at bind time.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn db_config(&self) -> DbConfig {
        let config = DbConfig::new(&self.database);
        match &self.db_key {
            Some(key) => config.with_key(key.clone()),
            None => config,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("db_key", &self.db_key.as_ref().map(|_| "<redacted>"))
            .field("secret_key", &"<redacted>")
            .field("static_dir", &self.static_dir)
            .field("seed_on_start", &self.seed_on_start)
            .finish()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}
