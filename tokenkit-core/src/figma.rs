//! Figma variable export.
//!
//! Produces one DTCG token file per collection mode. Variable names use `/`
//! for grouping (`color/btn/primary-bg`), which becomes the nesting of the
//! exported tree. Every file is also run through the shared [`Normalizer`] so
//! the plugin can preview token counts before syncing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::HashMap;

use crate::error::ResolveError;
use crate::normalize::Normalizer;
use crate::resolve::{Variable, VariableCollection, VariableMode, VariableSource, resolve_variable};
use crate::token::Token;
use crate::tree::insert_at_path;

/// Suffix every exported token file carries; sync ingestion strips it again.
pub const TOKEN_FILE_SUFFIX: &str = "_tokens.json";

/// A full variables dump as read from the design tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaDocument {
    pub collections: Vec<VariableCollection>,
    pub variables: Vec<Variable>,
}

impl FigmaDocument {
    /// Index variables by id for alias lookups.
    pub fn variable_index(&self) -> HashMap<String, Variable> {
        self.variables.iter().map(|v| (v.id.clone(), v.clone())).collect()
    }

    /// Export every mode of every collection.
    pub fn export(&self) -> Vec<ModeExport> {
        let index = self.variable_index();
        FigmaExporter::new(&index).export(&self.collections)
    }
}

/// A variable left out of an export, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedVariable {
    pub id: String,
    pub name: Option<String>,
    pub reason: String,
}

/// One exported token file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeExport {
    pub collection: String,
    pub mode: String,
    pub mode_id: String,
    pub file_name: String,
    pub tree: Value,
    pub tokens: Vec<Token>,
    pub skipped: Vec<SkippedVariable>,
}

impl ModeExport {
    /// Pretty-printed file content.
    pub fn content(&self) -> String {
        serde_json::to_string_pretty(&self.tree).unwrap_or_else(|_| "{}".to_string())
    }
}

pub struct FigmaExporter<'a, S: VariableSource + ?Sized> {
    source: &'a S,
    normalizer: Normalizer,
}

impl<'a, S: VariableSource + ?Sized> FigmaExporter<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source, normalizer: Normalizer::default() }
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn export(&self, collections: &[VariableCollection]) -> Vec<ModeExport> {
        let prefix_collection = collections.len() > 1;
        collections
            .iter()
            .flat_map(|collection| {
                collection
                    .modes
                    .iter()
                    .map(move |mode| self.export_mode(collection, mode, prefix_collection))
            })
            .collect()
    }

    pub fn export_mode(
        &self,
        collection: &VariableCollection,
        mode: &VariableMode,
        prefix_collection: bool,
    ) -> ModeExport {
        let mut root = Map::new();
        let mut skipped = Vec::new();

        for id in &collection.variable_ids {
            let Some(variable) = self.source.variable(id) else {
                skipped.push(SkippedVariable {
                    id: id.clone(),
                    name: None,
                    reason: "variable not found".to_string(),
                });
                continue;
            };

            let segments: Vec<&str> =
                variable.name.split('/').map(str::trim).filter(|s| !s.is_empty()).collect();
            if segments.is_empty() {
                continue;
            }

            match resolve_variable(variable, &mode.mode_id, self.source) {
                Ok(resolved) => {
                    let mut leaf = Map::new();
                    leaf.insert("$type".to_string(), json!(resolved.kind.dtcg_type()));
                    leaf.insert("$value".to_string(), resolved.value.to_dtcg());
                    if let Some(description) =
                        variable.description.as_deref().filter(|d| !d.trim().is_empty())
                    {
                        leaf.insert("$description".to_string(), json!(description));
                    }
                    leaf.insert(
                        "$extensions".to_string(),
                        json!({ "com.figma": { "variableId": variable.id, "collection": collection.name } }),
                    );
                    insert_at_path(&mut root, &segments, Value::Object(leaf));
                }
                Err(err) => {
                    if matches!(err, ResolveError::AliasDepthExceeded { .. }) {
                        tracing::warn!(variable = %variable.name, error = %err, "alias chain too deep");
                    } else {
                        tracing::debug!(variable = %variable.name, error = %err, "skipping unresolved variable");
                    }
                    skipped.push(SkippedVariable {
                        id: variable.id.clone(),
                        name: Some(variable.name.clone()),
                        reason: err.to_string(),
                    });
                }
            }
        }

        let tree = Value::Object(root);
        let tokens = self
            .normalizer
            .normalize(&tree)
            .into_iter()
            .map(|token| token.with_theme(mode.name.clone()))
            .collect();

        ModeExport {
            collection: collection.name.clone(),
            mode: mode.name.clone(),
            mode_id: mode.mode_id.clone(),
            file_name: token_file_name(&collection.name, &mode.name, prefix_collection),
            tree,
            tokens,
            skipped,
        }
    }
}

/// `Light Mode` → `Light_Mode_tokens.json`; collection-prefixed when several
/// collections are exported together.
pub fn token_file_name(collection: &str, mode: &str, prefix_collection: bool) -> String {
    let stem = if prefix_collection {
        format!("{}_{}", file_stem(collection), file_stem(mode))
    } else {
        file_stem(mode)
    };
    format!("{stem}{TOKEN_FILE_SUFFIX}")
}

fn file_stem(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            word.chars().filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_').collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
