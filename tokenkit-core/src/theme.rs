use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Slug, ThemeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// A named, slugged collection of tokens. One theme per exported mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: ThemeId,
    pub name: String,
    pub slug: Slug,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub status: ThemeStatus,
    #[serde(default)]
    pub token_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Theme {
    pub fn new(name: impl Into<String>, slug: Slug) -> Self {
        let now = Utc::now();
        Self {
            id: ThemeId::generate(),
            name: name.into(),
            slug,
            source_file_name: None,
            source: None,
            status: ThemeStatus::Draft,
            token_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
