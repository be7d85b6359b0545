use tokenkit_core::Token;

use super::{ExportFormat, Generator};
use crate::model::{ComponentData, ExportBundle, GenerateOptions};
use crate::sections::{
    CLAUDE_TOKEN_LIMIT, ColorBucket, EMPTY_SECTION, bucket, bullet_vars, first_n, grouped,
    linked_tokens, or_missing, or_none,
};

/// `CLAUDE.md`: project memory describing the design system.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaudeMdGenerator;

/// `.claude/rules/tokens.md`: token reference, eight per section.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaudeTokensGenerator;

fn props_table(component: &ComponentData) -> String {
    if component.props.is_empty() {
        return format!("{EMPTY_SECTION}\n");
    }
    let mut table = String::from("| Prop | Type | Required | Default | Description |\n");
    table.push_str("|------|------|----------|---------|-------------|\n");
    for prop in &component.props {
        table.push_str(&format!(
            "| `{}` | `{}` | {} | {} | {} |\n",
            prop.name,
            prop.prop_type,
            if prop.required { "yes" } else { "no" },
            or_missing(prop.default_value.as_deref()),
            or_missing(prop.description.as_deref()),
        ));
    }
    table
}

impl Generator for ClaudeMdGenerator {
    fn format(&self) -> ExportFormat {
        ExportFormat::ClaudeMd
    }

    fn generate(&self, bundle: &ExportBundle, _options: &GenerateOptions) -> String {
        let meta = &bundle.metadata;
        let mut out = format!("# {} Design System\n\n", meta.package_name);
        out.push_str(&format!("Version {}. Token reference: `.claude/rules/tokens.md`.\n\n", meta.version));

        out.push_str("## Rules\n\n");
        out.push_str("- Use `var(--token)` references from `tokens.css` for every color, spacing, radius and shadow.\n");
        out.push_str("- Prefer the documented components; match their props exactly.\n");
        out.push_str("- Theme switching is done with a class on a wrapper element.\n\n");

        out.push_str(&format!("## Themes\n\n{}\n\n", or_none(&bundle.themes)));

        out.push_str("## Token Overview\n\n");
        let groups = grouped(&bundle.tokens);
        if groups.is_empty() {
            out.push_str(EMPTY_SECTION);
            out.push('\n');
        }
        for (category, tokens) in &groups {
            out.push_str(&format!("- {}: {} tokens\n", category.label(), tokens.len()));
        }

        out.push_str("\n## Components\n\n");
        if bundle.components.is_empty() {
            out.push_str(EMPTY_SECTION);
            out.push('\n');
        }
        for component in &bundle.components {
            out.push_str(&format!("### {}\n\n", component.name));
            out.push_str(&format!("{}\n\n", or_missing(component.description.as_deref())));
            out.push_str(&props_table(component));
            out.push_str(&format!("\nTokens: {}\n\n", linked_tokens(&component.linked_tokens)));
        }
        out
    }
}

impl Generator for ClaudeTokensGenerator {
    fn format(&self) -> ExportFormat {
        ExportFormat::ClaudeTokens
    }

    fn generate(&self, bundle: &ExportBundle, _options: &GenerateOptions) -> String {
        let mut out = String::from("# Design Tokens\n\n");
        out.push_str("Always reference tokens through `var(--name)`.\n\n");

        out.push_str("## Colors\n\n");
        for b in ColorBucket::ALL {
            out.push_str(&format!(
                "### {}\n\n{}\n\n",
                b.label(),
                bullet_vars(&bucket(&bundle.tokens, b), CLAUDE_TOKEN_LIMIT)
            ));
        }

        for (category, tokens) in grouped(&bundle.tokens) {
            if category == tokenkit_core::Category::Color {
                continue;
            }
            out.push_str(&format!("## {}\n\n{}\n\n", category.label(), reference(&tokens)));
        }
        out.trim_end().to_string() + "\n"
    }
}

fn reference(tokens: &[&Token]) -> String {
    let shown = first_n(tokens, CLAUDE_TOKEN_LIMIT);
    let mut list = bullet_vars(shown, CLAUDE_TOKEN_LIMIT);
    if tokens.len() > shown.len() {
        list.push_str(&format!("\n- ...and {} more in `tokens.css`", tokens.len() - shown.len()));
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentProp;
    use serde_json::{Map, json};
    use tokenkit_core::normalize_token_tree;

    fn spacing_scale(n: usize) -> Vec<Token> {
        let mut scale = Map::new();
        for i in 0..n {
            scale.insert(format!("s{i}"), json!({ "$type": "number", "$value": i * 4 }));
        }
        normalize_token_tree(&json!({ "spacing": scale }))
    }

    #[test]
    fn test_token_rules_truncate_to_eight() {
        let out = ClaudeTokensGenerator
            .generate(&ExportBundle::new(spacing_scale(12)), &GenerateOptions::default());
        assert_eq!(out.matches("`--spacing-s").count(), 8);
        assert!(out.contains("- `--spacing-s7`: 28"));
        assert!(!out.contains("--spacing-s8"));
        assert!(out.contains("...and 4 more"));
        assert!(out.contains("### Backgrounds\n\nNone"));
    }

    #[test]
    fn test_claude_md_components() {
        let mut prop = ComponentProp::new("variant", "'primary' | 'ghost'");
        prop.required = true;
        let component = ComponentData {
            name: "Button".into(),
            slug: "button".into(),
            description: None,
            category: None,
            props: vec![prop],
            linked_tokens: vec![],
            code: None,
        };
        let bundle = ExportBundle::new(spacing_scale(2)).with_components(vec![component]);
        let out = ClaudeMdGenerator.generate(&bundle, &GenerateOptions::default());
        assert!(out.contains("### Button\n\n-\n\n"));
        assert!(out.contains("| `variant` | `'primary' | 'ghost'` | yes | - | - |"));
        assert!(out.contains("Tokens: None specified"));
        assert!(out.contains("- Spacing: 2 tokens"));
    }

    #[test]
    fn test_claude_md_empty() {
        let out = ClaudeMdGenerator.generate(&ExportBundle::default(), &GenerateOptions::default());
        assert!(out.contains("## Themes\n\nNone"));
        assert!(out.contains("## Components\n\nNone"));
    }
}
