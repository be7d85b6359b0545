use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tokenkit_core::{Slug, Theme, ThemeId, Token};

use crate::error::{Result, StoreError};
use crate::store::{ComponentStore, FigmaComponent, ThemeUpsert, TokenStore};

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::backend("in-memory store lock poisoned")
}

/// Process-local store; contents are lost on drop.
#[derive(Clone, Default)]
pub struct InMemoryTokenStore {
    themes: Arc<RwLock<HashMap<Slug, Theme>>>,
    tokens: Arc<RwLock<HashMap<ThemeId, Vec<Token>>>>,
    components: Arc<RwLock<HashMap<String, FigmaComponent>>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_token_count(&self, theme_id: &ThemeId, count: usize) -> Result<()> {
        let mut themes = self.themes.write().map_err(poisoned)?;
        if let Some(theme) = themes.values_mut().find(|t| &t.id == theme_id) {
            theme.token_count = count;
            theme.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn upsert_theme(&self, upsert: ThemeUpsert) -> Result<Theme> {
        let mut themes = self.themes.write().map_err(poisoned)?;
        let slug = upsert.slug.clone();
        let theme = upsert.apply(themes.remove(&slug));
        themes.insert(slug, theme.clone());
        Ok(theme)
    }

    async fn delete_tokens(&self, theme_id: &ThemeId) -> Result<usize> {
        let removed = {
            let mut tokens = self.tokens.write().map_err(poisoned)?;
            tokens.remove(theme_id).map(|t| t.len()).unwrap_or(0)
        };
        self.set_token_count(theme_id, 0)?;
        Ok(removed)
    }

    async fn insert_tokens(&self, theme_id: &ThemeId, batch: &[Token]) -> Result<usize> {
        let count = {
            let mut tokens = self.tokens.write().map_err(poisoned)?;
            let stored = tokens.entry(theme_id.clone()).or_default();
            stored.extend_from_slice(batch);
            stored.len()
        };
        self.set_token_count(theme_id, count)?;
        Ok(batch.len())
    }

    async fn list_themes(&self) -> Result<Vec<Theme>> {
        let themes = self.themes.read().map_err(poisoned)?;
        let mut list: Vec<Theme> = themes.values().cloned().collect();
        list.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(list)
    }

    async fn get_theme(&self, slug: &str) -> Result<Option<Theme>> {
        let themes = self.themes.read().map_err(poisoned)?;
        Ok(themes.values().find(|t| t.slug.as_str() == slug).cloned())
    }

    async fn list_tokens(&self, theme_id: &ThemeId) -> Result<Vec<Token>> {
        let tokens = self.tokens.read().map_err(poisoned)?;
        let mut list = tokens.get(theme_id).cloned().unwrap_or_default();
        list.sort_by_key(|t| t.sort_order);
        Ok(list)
    }
}

#[async_trait]
impl ComponentStore for InMemoryTokenStore {
    async fn upsert_component(&self, mut component: FigmaComponent) -> Result<FigmaComponent> {
        component.updated_at = Utc::now();
        let mut components = self.components.write().map_err(poisoned)?;
        components.insert(component.figma_id.clone(), component.clone());
        Ok(component)
    }

    async fn list_components(&self) -> Result<Vec<FigmaComponent>> {
        let components = self.components.read().map_err(poisoned)?;
        let mut list: Vec<FigmaComponent> = components.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokenkit_core::normalize_token_tree;

    fn slug(name: &str) -> Slug {
        Slug::from_name(name).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_is_keyed_by_slug() {
        let store = InMemoryTokenStore::new();
        let first = store.upsert_theme(ThemeUpsert::new("Light", slug("Light"))).await.unwrap();
        let second = store.upsert_theme(ThemeUpsert::new("Light", slug("Light"))).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.list_themes().await.unwrap().len(), 1);
        assert!(store.get_theme("light").await.unwrap().is_some());
        assert!(store.get_theme("dark").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_token_count_follows_inserts_and_deletes() {
        let store = InMemoryTokenStore::new();
        let theme = store.upsert_theme(ThemeUpsert::new("Light", slug("Light"))).await.unwrap();
        let tokens = normalize_token_tree(&json!({
            "spacing": { "sm": { "$type": "number", "$value": 4 }, "md": { "$type": "number", "$value": 8 } }
        }));

        store.insert_tokens(&theme.id, &tokens).await.unwrap();
        assert_eq!(store.get_theme("light").await.unwrap().unwrap().token_count, 2);

        assert_eq!(store.delete_tokens(&theme.id).await.unwrap(), 2);
        assert_eq!(store.get_theme("light").await.unwrap().unwrap().token_count, 0);
        assert!(store.list_tokens(&theme.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_component_upsert_replaces_by_figma_id() {
        let store = InMemoryTokenStore::new();
        let component = |name: &str| FigmaComponent {
            figma_id: "1:23".into(),
            name: name.into(),
            slug: String::new(),
            description: None,
            variants: json!([]),
            prop_types: json!({}),
            category: None,
            updated_at: Utc::now(),
        };
        store.upsert_component(component("Button")).await.unwrap();
        store.upsert_component(component("Primary Button")).await.unwrap();

        let listed = store.list_components().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Primary Button");
    }
}
