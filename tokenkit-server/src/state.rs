use std::sync::Arc;
use tokenkit_export::PackageConfig;
use tokenkit_sync::{ComponentStore, SyncConfig, TokenStore};

use crate::config::ServerConfig;

/// Shared handler state. Stores are injected at construction.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<dyn TokenStore>,
    pub components: Arc<dyn ComponentStore>,
    pub config: Arc<ServerConfig>,
    pub sync: Arc<SyncConfig>,
    /// Package name and version stamped into exports.
    pub package: Arc<PackageConfig>,
}

impl AppState {
    pub fn new(tokens: Arc<dyn TokenStore>, components: Arc<dyn ComponentStore>, config: ServerConfig) -> Self {
        Self {
            tokens,
            components,
            config: Arc::new(config),
            sync: Arc::new(SyncConfig::default()),
            package: Arc::new(PackageConfig::default()),
        }
    }

    /// One backend serving both tokens and components.
    pub fn with_store<S>(store: Arc<S>, config: ServerConfig) -> Self
    where
        S: TokenStore + ComponentStore + 'static,
    {
        Self::new(store.clone(), store, config)
    }

    pub fn with_sync_config(mut self, sync: SyncConfig) -> Self {
        self.sync = Arc::new(sync);
        self
    }

    pub fn with_package_config(mut self, package: PackageConfig) -> Self {
        self.package = Arc::new(package);
        self
    }
}
