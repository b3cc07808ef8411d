//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `GSS_*` environment variables or a configuration file.
//! Command-line flags are applied on top by the binary.

use std::env;
use std::ffi::OsString;
use std::net::{SocketAddr, ToSocketAddrs};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Variable consulted when `GSS_DATABASE_URL` is unset.
pub const DATABASE_URL_FALLBACK: &str = "DATABASE_URL";

/// Errors raised while resolving the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("failed to load configuration: {message}")]
    Load { message: String },
    #[error(
        "no database URL configured; pass --database-url or set GSS_DATABASE_URL or DATABASE_URL"
    )]
    MissingDatabaseUrl,
    #[error("cannot resolve bind address {host}:{port}")]
    BindAddress { host: String, port: u16 },
}

/// Runtime settings for every subcommand.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GSS")]
pub struct Settings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Interface the HTTP server listens on.
    #[ortho_config(default = "127.0.0.1".to_owned())]
    pub host: String,
    /// Port the HTTP server listens on.
    #[ortho_config(default = 5000)]
    pub port: u16,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Settings {
    /// Load settings from the environment and configuration files.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a source holds malformed values.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from_iter([OsString::from(env!("CARGO_PKG_NAME"))]).map_err(|err| {
            SettingsError::Load {
                message: err.to_string(),
            }
        })
    }

    /// Replace the database URL when a flag supplied one.
    #[must_use]
    pub fn with_database_url(mut self, database_url: Option<String>) -> Self {
        if let Some(url) = non_empty(database_url) {
            self.database_url = Some(url);
        }
        self
    }

    /// Replace the listen host and port when flags supplied them.
    #[must_use]
    pub fn with_listen(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = non_empty(host) {
            self.host = host;
        }
        self.port = port.unwrap_or(self.port);
        self
    }

    /// Configured database URL, falling back to `DATABASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when neither source is
    /// set.
    pub fn database_url(&self) -> Result<String, SettingsError> {
        non_empty(self.database_url.clone())
            .or_else(|| non_empty(env::var(DATABASE_URL_FALLBACK).ok()))
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub const fn port(&self) -> u16 {
        self.port
    }

    pub const fn pool_max_size(&self) -> u32 {
        self.pool_max_size
    }

    /// Socket address to bind, resolving host names.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddress`] when the host does not resolve.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        (self.host(), self.port())
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| SettingsError::BindAddress {
                host: self.host().to_owned(),
                port: self.port(),
            })
    }
}
