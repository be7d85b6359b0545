//! # tokenkit-telemetry
//!
//! Process-wide `tracing` setup shared by the server and the CLI.
//!
//! ```rust,no_run
//! use tokenkit_telemetry::{TelemetryConfig, init_with_config};
//!
//! init_with_config(TelemetryConfig::new("tokenkit-server").with_log_level("debug")).ok();
//! tracing::info!("ready");
//! ```

pub mod init;

pub use init::{TelemetryConfig, TelemetryError, init_telemetry, init_with_config};
