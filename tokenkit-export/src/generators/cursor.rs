use tokenkit_core::Category;

use super::{ExportFormat, Generator};
use crate::model::{ExportBundle, GenerateOptions};
use crate::sections::{
    CURSOR_TOKEN_LIMIT, ColorBucket, EMPTY_SECTION, bucket, by_category, first_n, inline_vars,
    or_missing, or_none,
};

/// `.cursor/rules/design-system.mdc`
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorRulesGenerator;

impl Generator for CursorRulesGenerator {
    fn format(&self) -> ExportFormat {
        ExportFormat::CursorRules
    }

    fn generate(&self, bundle: &ExportBundle, _options: &GenerateOptions) -> String {
        let meta = &bundle.metadata;
        let mut out = String::new();
        out.push_str("---\n");
        out.push_str(&format!("description: {} design system rules\n", meta.package_name));
        out.push_str("globs: [\"**/*.tsx\", \"**/*.jsx\", \"**/*.css\"]\n");
        out.push_str("alwaysApply: true\n");
        out.push_str("---\n\n");

        out.push_str(&format!("# {} v{}\n\n", meta.package_name, meta.version));
        out.push_str("- Style with CSS variables from `tokens.css`; never hardcode colors, spacing or radii.\n");
        out.push_str("- Reuse the components below before writing new markup.\n\n");

        out.push_str(&format!("## Themes\n\n{}\n\n", or_none(&bundle.themes)));

        out.push_str("## Colors\n\n");
        for b in ColorBucket::ALL {
            out.push_str(&format!(
                "**{}:** {}\n",
                b.label(),
                inline_vars(&bucket(&bundle.tokens, b), CURSOR_TOKEN_LIMIT)
            ));
        }

        for category in [Category::Typography, Category::Spacing, Category::Border, Category::Shadow] {
            out.push_str(&format!(
                "\n## {}\n\n{}\n",
                category.label(),
                inline_vars(&by_category(&bundle.tokens, category), CURSOR_TOKEN_LIMIT)
            ));
        }

        out.push_str("\n## Components\n\n");
        if bundle.components.is_empty() {
            out.push_str(EMPTY_SECTION);
            out.push('\n');
        }
        for component in &bundle.components {
            out.push_str(&format!(
                "- **{}**: {}\n",
                component.name,
                or_missing(component.description.as_deref())
            ));
            let props: Vec<String> = first_n(&component.props, CURSOR_TOKEN_LIMIT)
                .iter()
                .map(|p| format!("`{}`", p.name))
                .collect();
            out.push_str(&format!("  Props: {}\n", or_none(&props)));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value, json};
    use tokenkit_core::normalize_token_tree;

    fn many_backgrounds(n: usize) -> Value {
        let mut bg = Map::new();
        for i in 0..n {
            bg.insert(format!("b{i}"), json!({ "$type": "color", "$value": "#000000" }));
        }
        json!({ "color": { "bg": bg } })
    }

    #[test]
    fn test_truncates_to_five_in_order() {
        let tokens = normalize_token_tree(&many_backgrounds(9));
        let out = CursorRulesGenerator.generate(&ExportBundle::new(tokens), &GenerateOptions::default());
        assert!(out.contains("**Backgrounds:** `--color-bg-b0`, `--color-bg-b1`, `--color-bg-b2`, `--color-bg-b3`, `--color-bg-b4`\n"));
        assert!(!out.contains("--color-bg-b5"));
        assert!(out.contains("**Buttons:** None\n"));
    }

    #[test]
    fn test_front_matter_and_empty_components() {
        let out = CursorRulesGenerator.generate(&ExportBundle::default(), &GenerateOptions::default());
        assert!(out.starts_with("---\ndescription: @yourorg/design-system design system rules\n"));
        assert!(out.contains("## Themes\n\nNone\n"));
        assert!(out.ends_with("## Components\n\nNone\n"));
    }
}
