use serde_json::{Map, Value, json};

use super::{ExportFormat, Generator};
use crate::model::{ExportBundle, GenerateOptions};
use crate::sections::grouped;

/// `design-system.json`: machine-readable manifest for MCP servers.
#[derive(Debug, Clone, Copy, Default)]
pub struct McpJsonGenerator;

impl McpJsonGenerator {
    pub fn manifest(bundle: &ExportBundle) -> Value {
        let mut tokens = Map::new();
        for (category, group) in grouped(&bundle.tokens) {
            let entries: Vec<Value> = group
                .iter()
                .map(|t| {
                    json!({
                        "name": t.name,
                        "path": t.path,
                        "cssVar": t.css_var,
                        "type": t.token_type,
                        "value": t.value.display(),
                    })
                })
                .collect();
            tokens.insert(category.as_str().to_string(), Value::Array(entries));
        }

        json!({
            "name": bundle.metadata.package_name,
            "version": bundle.metadata.version,
            "exportedAt": bundle.metadata.exported_at.to_rfc3339(),
            "themes": bundle.themes,
            "tokens": tokens,
            "components": bundle.components.iter().map(|c| json!({
                "name": c.name,
                "slug": c.slug,
                "description": c.description,
                "category": c.category,
                "props": c.props,
                "linkedTokens": c.linked_tokens,
            })).collect::<Vec<_>>(),
        })
    }
}

impl Generator for McpJsonGenerator {
    fn format(&self) -> ExportFormat {
        ExportFormat::McpJson
    }

    fn generate(&self, bundle: &ExportBundle, _options: &GenerateOptions) -> String {
        serde_json::to_string_pretty(&Self::manifest(bundle)).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenkit_core::normalize_token_tree;

    #[test]
    fn test_manifest_groups_tokens() {
        let tokens = normalize_token_tree(&json!({
            "color": { "bg": { "base": { "$type": "color", "$value": "#FFFFFF" } } },
            "shadow": { "sm": { "$type": "string", "$value": "0 1px 2px #000" } }
        }));
        let bundle = ExportBundle::new(tokens).with_themes(vec!["Light".into()]);
        let manifest: Value =
            serde_json::from_str(&McpJsonGenerator.generate(&bundle, &GenerateOptions::default())).unwrap();
        assert_eq!(manifest["name"], "@yourorg/design-system");
        assert_eq!(manifest["themes"], json!(["Light"]));
        assert_eq!(manifest["tokens"]["color"][0]["cssVar"], "--color-bg-base");
        assert_eq!(manifest["tokens"]["shadow"][0]["type"], "string");
        assert_eq!(manifest["exportedAt"], "1970-01-01T00:00:00+00:00");
        assert!(manifest["tokens"].get("spacing").is_none());
    }

    #[test]
    fn test_output_is_stable() {
        let bundle = ExportBundle::default();
        let options = GenerateOptions::default();
        assert_eq!(McpJsonGenerator.generate(&bundle, &options), McpJsonGenerator.generate(&bundle, &options));
    }
}
