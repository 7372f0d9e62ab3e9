//! Process settings loaded via OrthoConfig and shared by the server and
//! migration binaries.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CATALOG_BASE_URL: &str = "https://pokeapi.co";
const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 10;
const FALLBACK_DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Errors raised while resolving settings into usable values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("database URL is not configured; set POKEDEX_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid catalog base URL {value:?}: {source}")]
    InvalidCatalogUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Values controlling the HTTP server, persistence, and catalog client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "POKEDEX")]
pub struct ServerSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// Base URL of the external pokemon catalog.
    pub catalog_base_url: Option<String>,
    /// Per-request timeout for catalog lookups, in seconds.
    pub catalog_timeout_secs: Option<u64>,
    /// Skip applying embedded migrations before serving.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

impl ServerSettings {
    /// Configured database URL, falling back to `DATABASE_URL`.
    pub fn database_url(&self) -> Result<String, SettingsError> {
        self.database_url
            .clone()
            .or_else(|| std::env::var(FALLBACK_DATABASE_URL_VAR).ok())
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    pub fn catalog_base_url(&self) -> Result<Url, SettingsError> {
        let value = self
            .catalog_base_url
            .as_deref()
            .unwrap_or(DEFAULT_CATALOG_BASE_URL);
        Url::parse(value).map_err(|source| SettingsError::InvalidCatalogUrl {
            value: value.to_owned(),
            source,
        })
    }

    /// Catalog timeout, never shorter than one second.
    pub fn catalog_timeout(&self) -> Duration {
        let secs = self
            .catalog_timeout_secs
            .unwrap_or(DEFAULT_CATALOG_TIMEOUT_SECS)
            .max(1);
        Duration::from_secs(secs)
    }

    /// Migrations run at startup unless explicitly skipped.
    pub fn run_migrations(&self) -> bool {
        !self.skip_migrations
    }
}
