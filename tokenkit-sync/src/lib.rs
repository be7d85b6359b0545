//! # tokenkit-sync
//!
//! Theme and token persistence for tokenkit, plus replace-on-sync ingestion.
//!
//! Stores implement the primitive [`TokenStore`] operations; replacing a
//! theme's tokens is composed from them by [`replace_tokens`]. Two backends
//! ship with the crate:
//!
//! - [`InMemoryTokenStore`]: process-local maps, for tests and previews.
//! - [`FileTokenStore`]: one JSON document per theme slug under a directory.
//!
//! ```rust
//! use serde_json::json;
//! use tokenkit_sync::{InMemoryTokenStore, SyncConfig, SyncRequest, TokenFile, sync_files};
//!
//! # async fn demo() {
//! let store = InMemoryTokenStore::new();
//! let request = SyncRequest::new(vec![TokenFile::tree(
//!     "light_tokens.json",
//!     json!({ "spacing": { "sm": { "$type": "number", "$value": 4 } } }),
//! )]);
//! let summary = sync_files(&store, &request, &SyncConfig::default()).await.unwrap();
//! assert_eq!(summary.total_tokens, 1);
//! # }
//! ```

pub mod error;
pub mod file;
pub mod ingest;
pub mod memory;
pub mod store;

pub use error::{Result, StoreError};
pub use file::FileTokenStore;
pub use ingest::{
    DEFAULT_BATCH_SIZE, FileContent, FileSyncResult, Ingestor, SyncConfig, SyncRequest, SyncStatus,
    SyncSummary, TokenFile, replace_tokens, sync_files, theme_name_from_file,
};
pub use memory::InMemoryTokenStore;
pub use store::{ComponentStore, FigmaComponent, ThemeUpsert, TokenStore};
