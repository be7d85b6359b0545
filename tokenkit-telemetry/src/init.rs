//! Telemetry initialization and configuration

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{directive}': {reason}")]
    InvalidFilter { directive: String, reason: String },
}

/// Configuration for the telemetry system
#[derive(Debug, Clone, Default)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub default_level: Option<String>,
    pub log_directives: Vec<String>,
    /// Emit newline-delimited JSON instead of human-readable lines.
    pub json: bool,
}

impl TelemetryConfig {
    /// Create a new configuration with the given service name.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into(), ..Default::default() }
    }

    /// Set the default log level (e.g., "debug", "info").
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.default_level = Some(level.into());
        self
    }

    /// Add a custom tracing directive (e.g., "tokenkit_sync=debug").
    pub fn with_log_directive(mut self, directive: impl Into<String>) -> Self {
        self.log_directives.push(directive.into());
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Supported variables:
    /// - `SERVICE_NAME`: The name of the service (default: "tokenkit")
    /// - `LOG_LEVEL`: Default log level (default: "info")
    /// - `LOG_FORMAT`: Set to "json" for structured output
    pub fn from_env() -> Self {
        let service_name =
            std::env::var("SERVICE_NAME").unwrap_or_else(|_| "tokenkit".to_string());
        let default_level = std::env::var("LOG_LEVEL").ok();
        let json = std::env::var("LOG_FORMAT").map(|v| v.eq_ignore_ascii_case("json")).unwrap_or(false);

        Self { service_name, default_level, log_directives: Vec::new(), json }
    }

    /// Build the filter: `RUST_LOG` wins, then the configured level, then "info".
    pub fn env_filter(&self) -> Result<EnvFilter, TelemetryError> {
        let level = self.default_level.as_deref().unwrap_or("info");
        let mut filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(level).map_err(|e| TelemetryError::InvalidFilter {
                directive: level.to_string(),
                reason: e.to_string(),
            })?,
        };

        for directive in &self.log_directives {
            let parsed = directive.parse().map_err(|e: tracing_subscriber::filter::ParseError| {
                TelemetryError::InvalidFilter { directive: directive.clone(), reason: e.to_string() }
            })?;
            filter = filter.add_directive(parsed);
        }
        Ok(filter)
    }
}

/// Initialize telemetry with basic console logging
pub fn init_telemetry(service_name: &str) -> Result<(), TelemetryError> {
    init_with_config(TelemetryConfig::new(service_name))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_with_config(config: TelemetryConfig) -> Result<(), TelemetryError> {
    use tracing_subscriber::fmt;

    let filter = config.env_filter()?;

    INIT.call_once(|| {
        // stdout carries command output
        let json_layer = config.json.then(|| fmt::layer().json().with_target(true).with_writer(std::io::stderr));
        let text_layer = (!config.json)
            .then(|| fmt::layer().with_target(true).with_line_number(true).with_writer(std::io::stderr));

        let installed =
            tracing_subscriber::registry().with(filter).with(json_layer).with(text_layer).try_init();

        if installed.is_ok() {
            tracing::info!(
                service.name = %config.service_name,
                log.level = config.default_level.as_deref().unwrap_or("env"),
                log.json = config.json,
                "Telemetry system initialized"
            );
        }
    });

    Ok(())
}
