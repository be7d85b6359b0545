//! # tokenkit-cli
//!
//! The `tokenkit` binary: bulk migration of legacy token files, format
//! exports, npm packaging, the HTTP server, and Figma variable conversion.

pub mod cli;
pub mod commands;
pub mod config;

use anyhow::Result;

use cli::{Cli, Command};
use config::FileConfig;

/// Execute a parsed command line against a loaded configuration.
pub async fn run(cli: Cli, config: FileConfig) -> Result<()> {
    match cli.command {
        Command::Migrate(args) => {
            let store_dir = config.store_dir(args.store.as_deref());
            commands::migrate::run(args, store_dir).await
        }
        Command::Export(args) => commands::export::run(args, config.package(None, None)),
        Command::Package(args) => {
            let package = config.package(args.name.clone(), args.pkg_version.clone());
            commands::package::run(args, package)
        }
        Command::Serve(args) => {
            let store_dir = config.store_dir(args.store.as_deref());
            let server = config.server(args.host, args.port, args.api_key);
            commands::serve::run(&store_dir, server, config.package(None, None)).await
        }
        Command::FigmaExport(args) => commands::figma::run(args),
    }
}
