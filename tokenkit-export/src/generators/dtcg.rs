use serde_json::{Map, Value, json};
use std::collections::BTreeSet;
use tokenkit_core::normalize::is_dtcg_leaf;
use tokenkit_core::tree::insert_at_path;
use tokenkit_core::{Classifier, Normalizer, Token};

use super::{ExportFormat, Generator};
use crate::error::Result;
use crate::model::{ExportBundle, GenerateOptions};

/// Extension namespace written when `include_extensions` is set.
pub const EXTENSION_NAMESPACE: &str = "com.tokenkit";

/// Re-nests flat tokens into a DTCG tree.
///
/// When the bundle mixes tokens of several themes, each theme becomes a
/// top-level group so paths cannot collide.
#[derive(Debug, Clone, Copy, Default)]
pub struct DtcgGenerator;

impl DtcgGenerator {
    pub fn tree(tokens: &[Token], include_extensions: bool) -> Value {
        let themes: BTreeSet<&str> = tokens.iter().filter_map(|t| t.theme.as_deref()).collect();
        let scope_by_theme = themes.len() > 1;

        let mut root = Map::new();
        for token in tokens {
            let mut segments: Vec<&str> = Vec::new();
            if scope_by_theme {
                segments.push(token.theme.as_deref().unwrap_or("default"));
            }
            segments.extend(token.segments());
            insert_at_path(&mut root, &segments, leaf(token, include_extensions));
        }
        Value::Object(root)
    }
}

fn leaf(token: &Token, include_extensions: bool) -> Value {
    let mut leaf = Map::new();
    leaf.insert("$type".to_string(), json!(token.dtcg_type_name()));
    leaf.insert("$value".to_string(), token.dtcg_value());
    if let Some(description) = token.description.as_deref() {
        leaf.insert("$description".to_string(), json!(description));
    }
    if include_extensions {
        leaf.insert(
            "$extensions".to_string(),
            json!({
                EXTENSION_NAMESPACE: {
                    "category": token.category,
                    "cssVar": token.css_var,
                    "sortOrder": token.sort_order,
                }
            }),
        );
    }
    Value::Object(leaf)
}

impl Generator for DtcgGenerator {
    fn format(&self) -> ExportFormat {
        ExportFormat::Dtcg
    }

    fn generate(&self, bundle: &ExportBundle, options: &GenerateOptions) -> String {
        let tree = Self::tree(&bundle.tokens, options.include_extensions);
        serde_json::to_string_pretty(&tree).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Decode DTCG text back into tokens. Only `$type`/`$value` leaves count.
pub fn parse_dtcg(text: &str) -> Result<Vec<Token>> {
    let tree: Value = serde_json::from_str(text)?;
    Ok(Normalizer::new(is_dtcg_leaf, Classifier::default()).normalize(&tree))
}
