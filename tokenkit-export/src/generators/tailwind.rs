use std::collections::HashSet;
use tokenkit_core::{Category, Token};

use super::{ExportFormat, Generator};
use crate::model::{ExportBundle, GenerateOptions};

/// Tailwind `theme.extend` mapping every token to its `var(--...)` reference.
/// References are theme independent, so each CSS variable appears once.
#[derive(Debug, Clone, Copy, Default)]
pub struct TailwindGenerator;

/// Tailwind theme key a token extends, if any.
fn theme_key(token: &Token) -> Option<&'static str> {
    let path = token.path.to_lowercase();
    match token.category {
        Category::Color => Some("colors"),
        Category::Spacing => Some("spacing"),
        Category::Border if path.contains("radius") || path.contains("corner") => Some("borderRadius"),
        Category::Border => Some("borderWidth"),
        Category::Shadow => Some("boxShadow"),
        Category::Typography if path.contains("family") => Some("fontFamily"),
        Category::Typography if path.contains("weight") => Some("fontWeight"),
        Category::Typography if path.contains("line") => Some("lineHeight"),
        Category::Typography if path.contains("letter") => Some("letterSpacing"),
        Category::Typography if path.contains("size") => Some("fontSize"),
        _ => None,
    }
}

/// Tailwind utility suffix: the CSS name minus `--` and the category prefix.
fn utility_name(token: &Token) -> String {
    let bare = token.css_var.trim_start_matches('-');
    bare.strip_prefix(token.category.as_str())
        .map(|rest| rest.trim_start_matches('-'))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(bare)
        .to_string()
}

const ALWAYS_PRESENT: [&str; 4] = ["colors", "spacing", "borderRadius", "boxShadow"];
const OPTIONAL: [&str; 6] =
    ["borderWidth", "fontFamily", "fontSize", "fontWeight", "lineHeight", "letterSpacing"];

impl Generator for TailwindGenerator {
    fn format(&self) -> ExportFormat {
        ExportFormat::Tailwind
    }

    fn generate(&self, bundle: &ExportBundle, _options: &GenerateOptions) -> String {
        let mut js = String::new();
        js.push_str(&format!(
            "// Tailwind theme for {} v{}. Values resolve through tokens.css.\n",
            bundle.metadata.package_name, bundle.metadata.version
        ));
        js.push_str("/** @type {import('tailwindcss').Config} */\n");
        js.push_str("module.exports = {\n  theme: {\n    extend: {\n");

        for key in ALWAYS_PRESENT.iter().chain(OPTIONAL.iter()) {
            let mut seen: HashSet<String> = HashSet::new();
            let entries: Vec<&Token> = bundle
                .tokens
                .iter()
                .filter(|t| theme_key(t) == Some(*key) && seen.insert(t.css_var.clone()))
                .collect();
            if entries.is_empty() && OPTIONAL.contains(key) {
                continue;
            }
            js.push_str(&format!("      {key}: {{\n"));
            for token in entries {
                js.push_str(&format!("        '{}': '{}',\n", utility_name(token), token.css_reference()));
            }
            js.push_str("      },\n");
        }

        js.push_str("    },\n  },\n};\n");
        js
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokenkit_core::normalize_token_tree;

    #[test]
    fn test_maps_to_var_references() {
        let tokens = normalize_token_tree(&json!({
            "color": { "btn": { "primary-bg": { "$type": "color", "$value": "#FF5633" } } },
            "spacing": { "sm": { "$type": "number", "$value": 8 } },
            "radius": { "md": { "$type": "number", "$value": 6 } },
            "shadow": { "card": { "$type": "string", "$value": "0 1px 2px #0000001A" } }
        }));
        let js = TailwindGenerator.generate(&ExportBundle::new(tokens), &GenerateOptions::default());

        assert!(js.contains("module.exports = {\n  theme: {\n    extend: {\n"));
        assert!(js.contains("      colors: {\n        'btn-primary-bg': 'var(--color-btn-primary-bg)',\n      },"));
        assert!(js.contains("'sm': 'var(--spacing-sm)'"));
        assert!(js.contains("borderRadius: {\n        'radius-md': 'var(--border-radius-md)',"));
        assert!(js.contains("'card': 'var(--shadow-card)'"));
        assert!(!js.contains("#FF5633"));
        assert!(!js.contains("fontFamily"));
    }

    #[test]
    fn test_mixed_themes_list_each_variable_once() {
        let tree = json!({ "spacing": { "sm": { "$type": "number", "$value": 8 } } });
        let tokens = normalize_token_tree(&tree)
            .into_iter()
            .map(|t| t.with_theme("Light"))
            .chain(normalize_token_tree(&tree).into_iter().map(|t| t.with_theme("Dark")))
            .collect();
        let js = TailwindGenerator.generate(&ExportBundle::new(tokens), &GenerateOptions::default());
        assert_eq!(js.matches("'sm': 'var(--spacing-sm)'").count(), 1);
    }

    #[test]
    fn test_empty_bundle_keeps_core_sections() {
        let js = TailwindGenerator.generate(&ExportBundle::default(), &GenerateOptions::default());
        for key in ALWAYS_PRESENT {
            assert!(js.contains(&format!("      {key}: {{\n      }},\n")));
        }
        assert!(js.ends_with("};\n"));
    }
}
