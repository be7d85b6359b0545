//! Directory-backed store.
//!
//! Layout under the root directory:
//!
//! ```text
//! themes/<slug>.json    one document per theme: { "theme": ..., "tokens": [...] }
//! components.json       every synced component, keyed by figma id
//! ```

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokenkit_core::{Theme, ThemeId, Token, slugify};
use tokio::sync::Mutex;

use crate::error::{Result, StoreError};
use crate::store::{ComponentStore, FigmaComponent, ThemeUpsert, TokenStore};

const THEMES_DIR: &str = "themes";
const COMPONENTS_FILE: &str = "components.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ThemeDocument {
    theme: Theme,
    #[serde(default)]
    tokens: Vec<Token>,
}

pub struct FileTokenStore {
    root: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    /// Open a store rooted at `root`, creating the directory layout.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(root.join(THEMES_DIR)).await?;
        tracing::debug!(root = %root.display(), "opened file token store");
        Ok(Self { root, write_lock: Mutex::new(()) })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn theme_path(&self, slug: &str) -> PathBuf {
        self.root.join(THEMES_DIR).join(format!("{slug}.json"))
    }

    /// Only canonical slugs name a document; anything else (`../x`, `A B`) has none.
    async fn read_document(&self, slug: &str) -> Result<Option<ThemeDocument>> {
        if slug.is_empty() || slugify(slug) != slug {
            tracing::debug!(slug, "ignoring non-canonical theme slug");
            return Ok(None);
        }
        match tokio::fs::read(self.theme_path(slug)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_document(&self, document: &ThemeDocument) -> Result<()> {
        let path = self.theme_path(document.theme.slug.as_str());
        write_atomic(&path, &serde_json::to_vec_pretty(document)?).await
    }

    async fn read_documents(&self) -> Result<Vec<ThemeDocument>> {
        let mut entries = tokio::fs::read_dir(self.root.join(THEMES_DIR)).await?;
        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let bytes = tokio::fs::read(&path).await?;
            documents.push(serde_json::from_slice::<ThemeDocument>(&bytes)?);
        }
        documents.sort_by(|a, b| a.theme.slug.cmp(&b.theme.slug));
        Ok(documents)
    }

    async fn document_by_id(&self, theme_id: &ThemeId) -> Result<ThemeDocument> {
        self.read_documents()
            .await?
            .into_iter()
            .find(|d| &d.theme.id == theme_id)
            .ok_or_else(|| StoreError::theme_not_found(theme_id.as_str()))
    }

    async fn read_components(&self) -> Result<BTreeMap<String, FigmaComponent>> {
        match tokio::fs::read(self.root.join(COMPONENTS_FILE)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn upsert_theme(&self, upsert: ThemeUpsert) -> Result<Theme> {
        let _guard = self.write_lock.lock().await;
        let existing = self.read_document(upsert.slug.as_str()).await?;
        let (previous, tokens) = match existing {
            Some(doc) => (Some(doc.theme), doc.tokens),
            None => (None, Vec::new()),
        };
        let theme = upsert.apply(previous);
        self.write_document(&ThemeDocument { theme: theme.clone(), tokens }).await?;
        Ok(theme)
    }

    async fn delete_tokens(&self, theme_id: &ThemeId) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.document_by_id(theme_id).await?;
        let removed = document.tokens.len();
        document.tokens.clear();
        document.theme.token_count = 0;
        document.theme.updated_at = Utc::now();
        self.write_document(&document).await?;
        Ok(removed)
    }

    async fn insert_tokens(&self, theme_id: &ThemeId, batch: &[Token]) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.document_by_id(theme_id).await?;
        document.tokens.extend_from_slice(batch);
        document.theme.token_count = document.tokens.len();
        document.theme.updated_at = Utc::now();
        self.write_document(&document).await?;
        Ok(batch.len())
    }

    async fn list_themes(&self) -> Result<Vec<Theme>> {
        Ok(self.read_documents().await?.into_iter().map(|d| d.theme).collect())
    }

    async fn get_theme(&self, slug: &str) -> Result<Option<Theme>> {
        Ok(self.read_document(slug).await?.map(|d| d.theme))
    }

    async fn list_tokens(&self, theme_id: &ThemeId) -> Result<Vec<Token>> {
        let mut tokens = self.document_by_id(theme_id).await?.tokens;
        tokens.sort_by_key(|t| t.sort_order);
        Ok(tokens)
    }
}

#[async_trait]
impl ComponentStore for FileTokenStore {
    async fn upsert_component(&self, mut component: FigmaComponent) -> Result<FigmaComponent> {
        let _guard = self.write_lock.lock().await;
        let mut components = self.read_components().await?;
        component.updated_at = Utc::now();
        components.insert(component.figma_id.clone(), component.clone());
        write_atomic(&self.root.join(COMPONENTS_FILE), &serde_json::to_vec_pretty(&components)?).await?;
        Ok(component)
    }

    async fn list_components(&self) -> Result<Vec<FigmaComponent>> {
        let mut list: Vec<FigmaComponent> = self.read_components().await?.into_values().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }
}
