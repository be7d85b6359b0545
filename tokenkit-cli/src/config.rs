//! Optional `tokenkit.toml`.
//!
//! ```toml
//! [log]
//! level = "debug"
//! json = false
//!
//! [store]
//! dir = ".tokenkit"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [package]
//! name = "@acme/ui"
//! version = "2.0.0"
//! license = "MIT"
//! ```
//!
//! Values from flags and environment variables take precedence over the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tokenkit_export::PackageConfig;
use tokenkit_server::ServerConfig;
use tokenkit_telemetry::TelemetryConfig;

pub const DEFAULT_STORE_DIR: &str = ".tokenkit";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub log: LogSection,
    pub store: StoreSection,
    pub server: ServerSection,
    pub package: PackageSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogSection {
    pub level: Option<String>,
    pub json: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub api_key: Option<String>,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PackageSection {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub license: Option<String>,
}

impl FileConfig {
    /// Load the file when it exists; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Environment settings with file values filling the gaps.
    pub fn telemetry(&self, level_override: Option<&str>) -> TelemetryConfig {
        let mut config = TelemetryConfig::from_env();
        if config.default_level.is_none() {
            config.default_level = self.log.level.clone();
        }
        if let Some(level) = level_override {
            config = config.with_log_level(level);
        }
        if let Some(json) = self.log.json {
            config.json = config.json || json;
        }
        config
    }

    pub fn store_dir(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.store.dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR))
    }

    pub fn server(&self, host: Option<IpAddr>, port: Option<u16>, api_key: Option<String>) -> ServerConfig {
        let mut config = ServerConfig::new().with_api_key(api_key.or_else(|| self.server.api_key.clone()));
        if let Some(host) = host.or(self.server.host) {
            config = config.with_host(host);
        }
        if let Some(port) = port.or(self.server.port) {
            config = config.with_port(port);
        }
        for origin in &self.server.allowed_origins {
            config = config.with_allowed_origin(origin.clone());
        }
        config
    }

    pub fn package(&self, name: Option<String>, version: Option<String>) -> PackageConfig {
        let defaults = PackageConfig::default();
        let mut config = PackageConfig::new(
            name.or_else(|| self.package.name.clone()).unwrap_or(defaults.package_name),
            version.or_else(|| self.package.version.clone()).unwrap_or(defaults.version),
        );
        if let Some(description) = &self.package.description {
            config = config.with_description(description.clone());
        }
        if let Some(license) = &self.package.license {
            config = config.with_license(license.clone());
        }
        config
    }
}
