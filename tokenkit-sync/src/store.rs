use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokenkit_core::{Slug, Theme, ThemeId, Token};

use crate::error::Result;

/// Fields written by a theme upsert. Status is never part of an upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeUpsert {
    pub name: String,
    pub slug: Slug,
    pub source_file_name: Option<String>,
    pub source: Option<String>,
}

impl ThemeUpsert {
    pub fn new(name: impl Into<String>, slug: Slug) -> Self {
        Self { name: name.into(), slug, source_file_name: None, source: None }
    }

    pub fn with_source_file(mut self, file_name: impl Into<String>) -> Self {
        self.source_file_name = Some(file_name.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Apply onto an existing theme, or create a new draft theme.
    pub fn apply(self, existing: Option<Theme>) -> Theme {
        match existing {
            Some(mut theme) => {
                theme.name = self.name;
                theme.source_file_name = self.source_file_name.or(theme.source_file_name);
                theme.source = self.source.or(theme.source);
                theme.updated_at = Utc::now();
                theme
            }
            None => {
                let mut theme = Theme::new(self.name, self.slug);
                theme.source_file_name = self.source_file_name;
                theme.source = self.source;
                theme
            }
        }
    }
}

/// Theme and token persistence.
///
/// Only primitive operations live here; replace-on-sync is composed from
/// them in [`crate::ingest::replace_tokens`].
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Insert a theme keyed by slug, or update it in place.
    async fn upsert_theme(&self, theme: ThemeUpsert) -> Result<Theme>;

    /// Remove every token of a theme; returns how many were removed.
    async fn delete_tokens(&self, theme_id: &ThemeId) -> Result<usize>;

    /// Insert one batch of tokens for a theme.
    async fn insert_tokens(&self, theme_id: &ThemeId, tokens: &[Token]) -> Result<usize>;

    async fn list_themes(&self) -> Result<Vec<Theme>>;

    async fn get_theme(&self, slug: &str) -> Result<Option<Theme>>;

    /// Tokens of a theme in sort order.
    async fn list_tokens(&self, theme_id: &ThemeId) -> Result<Vec<Token>>;
}

/// Component record pushed by the design-tool plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigmaComponent {
    pub figma_id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub variants: Value,
    #[serde(default)]
    pub prop_types: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait ComponentStore: Send + Sync {
    /// Insert or replace a component keyed by `figma_id`.
    async fn upsert_component(&self, component: FigmaComponent) -> Result<FigmaComponent>;

    async fn list_components(&self) -> Result<Vec<FigmaComponent>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenkit_core::ThemeStatus;

    #[test]
    fn test_upsert_keeps_identity_and_status() {
        let slug = Slug::from_name("Dark").unwrap();
        let mut existing = ThemeUpsert::new("Dark", slug.clone()).with_source_file("dark_tokens.json").apply(None);
        existing.status = ThemeStatus::Published;
        let id = existing.id.clone();

        let updated = ThemeUpsert::new("Dark", slug).with_source("figma-plugin").apply(Some(existing));
        assert_eq!(updated.id, id);
        assert_eq!(updated.status, ThemeStatus::Published);
        assert_eq!(updated.source_file_name.as_deref(), Some("dark_tokens.json"));
        assert_eq!(updated.source.as_deref(), Some("figma-plugin"));
    }
}
