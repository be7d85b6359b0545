//! Replace-on-sync ingestion of exported token files.
//!
//! Each file becomes one theme. Files are processed independently: a parse
//! failure is reported for that file and the run continues. Token
//! replacement is not transactional; concurrent syncs of the same slug race
//! and the last writer wins.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokenkit_core::{Normalizer, Slug, ThemeId, Token, TokenError, figma::TOKEN_FILE_SUFFIX};

use crate::error::Result;
use crate::store::{ThemeUpsert, TokenStore};

pub const DEFAULT_BATCH_SIZE: usize = 100;
pub const DEFAULT_SOURCE: &str = "figma-plugin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub batch_size: usize,
    /// Source tag recorded on themes when the request carries none.
    pub source: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { batch_size: DEFAULT_BATCH_SIZE, source: DEFAULT_SOURCE.to_string() }
    }
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// File content as pushed by the plugin: JSON text or an already-parsed tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileContent {
    Text(String),
    Tree(Value),
}

impl FileContent {
    fn parse(&self) -> std::result::Result<Value, TokenError> {
        match self {
            FileContent::Text(text) => Ok(serde_json::from_str(text)?),
            FileContent::Tree(tree) => Ok(tree.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenFile {
    pub name: String,
    pub content: FileContent,
}

impl TokenFile {
    pub fn text(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self { name: name.into(), content: FileContent::Text(content.into()) }
    }

    pub fn tree(name: impl Into<String>, content: Value) -> Self {
        Self { name: name.into(), content: FileContent::Tree(content) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRequest {
    pub tokens: Vec<TokenFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl SyncRequest {
    pub fn new(tokens: Vec<TokenFile>) -> Self {
        Self { tokens, timestamp: None, source: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Success,
    Skipped,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSyncResult {
    pub name: String,
    pub slug: String,
    pub status: SyncStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileSyncResult {
    fn success(name: &str, slug: &Slug, count: usize) -> Self {
        Self {
            name: name.to_string(),
            slug: slug.to_string(),
            status: SyncStatus::Success,
            token_count: Some(count),
            error: None,
        }
    }

    fn skipped(name: &str, slug: &Slug) -> Self {
        Self {
            name: name.to_string(),
            slug: slug.to_string(),
            status: SyncStatus::Skipped,
            token_count: Some(0),
            error: None,
        }
    }

    fn error(name: &str, slug: &str, error: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            slug: slug.to_string(),
            status: SyncStatus::Error,
            token_count: None,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub success: bool,
    pub results: Vec<FileSyncResult>,
    pub synced_themes: usize,
    pub total_tokens: usize,
}

impl SyncSummary {
    fn from_results(results: Vec<FileSyncResult>) -> Self {
        let success = results.iter().all(|r| r.status != SyncStatus::Error);
        let synced = results.iter().filter(|r| r.status == SyncStatus::Success);
        let synced_themes = synced.clone().count();
        let total_tokens = synced.filter_map(|r| r.token_count).sum();
        Self { success, results, synced_themes, total_tokens }
    }

    pub fn count(&self, status: SyncStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

/// `dark_mode_tokens.json` → `dark mode`; `brand.json` → `brand`.
pub fn theme_name_from_file(file_name: &str) -> String {
    let stem = file_name
        .strip_suffix(TOKEN_FILE_SUFFIX)
        .or_else(|| file_name.strip_suffix(".json"))
        .unwrap_or(file_name);
    stem.replace('_', " ").trim().to_string()
}

/// Replace every token of a theme, inserting sequentially in batches.
///
/// A failed batch is logged and skipped. Returns the number of tokens
/// actually inserted.
pub async fn replace_tokens(
    store: &dyn TokenStore,
    theme_id: &ThemeId,
    tokens: &[Token],
    batch_size: usize,
) -> Result<usize> {
    let removed = store.delete_tokens(theme_id).await?;
    tracing::debug!(theme_id = %theme_id, removed, "cleared theme tokens");

    let mut inserted = 0;
    for (index, batch) in tokens.chunks(batch_size.max(1)).enumerate() {
        match store.insert_tokens(theme_id, batch).await {
            Ok(n) => inserted += n,
            Err(e) => {
                tracing::warn!(theme_id = %theme_id, batch = index, size = batch.len(), error = %e, "token batch insert failed, skipping");
            }
        }
    }
    Ok(inserted)
}

/// Runs sync requests against a store.
pub struct Ingestor<'a> {
    store: &'a dyn TokenStore,
    config: SyncConfig,
    normalizer: Normalizer,
}

impl<'a> Ingestor<'a> {
    pub fn new(store: &'a dyn TokenStore, config: SyncConfig) -> Self {
        Self { store, config, normalizer: Normalizer::default() }
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Sync every file in the request.
    ///
    /// Per-file problems are reported in the summary. A failed theme upsert
    /// means the store itself is unavailable and aborts the run.
    pub async fn sync(&self, request: &SyncRequest) -> Result<SyncSummary> {
        let source = request.source.as_deref().unwrap_or(&self.config.source);
        tracing::info!(files = request.tokens.len(), source, "starting token sync");

        let mut results = Vec::with_capacity(request.tokens.len());
        for file in &request.tokens {
            results.push(self.sync_file(file, source).await?);
        }

        let summary = SyncSummary::from_results(results);
        tracing::info!(
            themes = summary.synced_themes,
            tokens = summary.total_tokens,
            success = summary.success,
            "token sync finished"
        );
        Ok(summary)
    }

    async fn sync_file(&self, file: &TokenFile, source: &str) -> Result<FileSyncResult> {
        let theme_name = theme_name_from_file(&file.name);
        let Some(slug) = Slug::from_name(&theme_name) else {
            tracing::warn!(file = %file.name, "file name yields an empty slug");
            return Ok(FileSyncResult::error(&file.name, "", "file name does not produce a usable slug"));
        };

        let tree = match file.content.parse() {
            Ok(tree) => tree,
            Err(e) => {
                tracing::warn!(file = %file.name, error = %e, "skipping malformed token file");
                return Ok(FileSyncResult::error(&file.name, slug.as_str(), e));
            }
        };

        let tokens = self.normalizer.normalize(&tree);
        if tokens.is_empty() {
            tracing::info!(file = %file.name, theme = %slug, "no tokens found, store untouched");
            return Ok(FileSyncResult::skipped(&file.name, &slug));
        }

        let upsert = ThemeUpsert::new(theme_name, slug.clone())
            .with_source_file(file.name.clone())
            .with_source(source);
        let theme = self.store.upsert_theme(upsert).await?;

        match replace_tokens(self.store, &theme.id, &tokens, self.config.batch_size).await {
            Ok(inserted) => {
                tracing::info!(theme = %slug, tokens = inserted, "synced theme");
                Ok(FileSyncResult::success(&file.name, &slug, inserted))
            }
            Err(e) => {
                tracing::warn!(theme = %slug, error = %e, "could not replace theme tokens");
                Ok(FileSyncResult::error(&file.name, slug.as_str(), e))
            }
        }
    }
}

/// Sync with a default normalizer.
pub async fn sync_files(store: &dyn TokenStore, request: &SyncRequest, config: &SyncConfig) -> Result<SyncSummary> {
    Ingestor::new(store, config.clone()).sync(request).await
}
