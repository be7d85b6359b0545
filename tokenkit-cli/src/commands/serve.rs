use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tokenkit_export::PackageConfig;
use tokenkit_server::{AppState, ServerConfig, serve};
use tokenkit_sync::FileTokenStore;

pub async fn state(store_dir: &Path, config: ServerConfig, package: PackageConfig) -> Result<AppState> {
    let store = Arc::new(FileTokenStore::open(store_dir).await?);
    tracing::info!(store = %store_dir.display(), "using file token store");
    Ok(AppState::with_store(store, config).with_package_config(package))
}

pub async fn run(store_dir: &Path, config: ServerConfig, package: PackageConfig) -> Result<()> {
    serve(state(store_dir, config, package).await?).await?;
    Ok(())
}
