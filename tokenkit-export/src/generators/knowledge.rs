use tokenkit_core::Category;

use super::{ExportFormat, Generator};
use crate::model::{ExportBundle, GenerateOptions};
use crate::sections::{
    ColorBucket, EMPTY_SECTION, KNOWLEDGE_COMPONENT_LIMIT, KNOWLEDGE_TOKEN_LIMIT, bucket, by_category, first_n, inline_vars,
    or_missing, or_none, theme_class,
};

/// Compact `project-knowledge.txt` for chat assistants. Size is bounded by
/// listing at most three tokens per section and ten components.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectKnowledgeGenerator;

impl Generator for ProjectKnowledgeGenerator {
    fn format(&self) -> ExportFormat {
        ExportFormat::ProjectKnowledge
    }

    fn generate(&self, bundle: &ExportBundle, _options: &GenerateOptions) -> String {
        let meta = &bundle.metadata;
        let theme_class = theme_class(bundle.themes.first().map(String::as_str));

        let mut out = format!("{} v{} design system\n\n", meta.package_name, meta.version);
        out.push_str(&format!("**Themes:** {}\n\n", or_none(&bundle.themes)));

        for b in ColorBucket::ALL {
            out.push_str(&format!(
                "**{}:** {}\n",
                b.label(),
                inline_vars(&bucket(&bundle.tokens, b), KNOWLEDGE_TOKEN_LIMIT)
            ));
        }
        for category in [Category::Typography, Category::Spacing, Category::Border] {
            out.push_str(&format!(
                "**{}:** {}\n",
                category.label(),
                inline_vars(&by_category(&bundle.tokens, category), KNOWLEDGE_TOKEN_LIMIT)
            ));
        }

        out.push_str("\n**Components:**");
        if bundle.components.is_empty() {
            out.push_str(&format!(" {EMPTY_SECTION}\n"));
        } else {
            out.push('\n');
            for component in first_n(&bundle.components, KNOWLEDGE_COMPONENT_LIMIT) {
                let props: Vec<String> = first_n(&component.props, KNOWLEDGE_TOKEN_LIMIT)
                    .iter()
                    .map(|p| p.name.clone())
                    .collect();
                out.push_str(&format!(
                    "- {}: {} (props: {})\n",
                    component.name,
                    or_missing(component.description.as_deref()),
                    or_none(&props)
                ));
            }
            let hidden = bundle.components.len().saturating_sub(KNOWLEDGE_COMPONENT_LIMIT);
            if hidden > 0 {
                out.push_str(&format!("- and {hidden} more\n"));
            }
        }

        out.push_str("\n**Usage:**\n");
        out.push_str(&format!("<div className=\"{theme_class}\">\n"));
        out.push_str("  <button style={{ background: 'var(--color-btn-primary-bg)' }}>Save</button>\n");
        out.push_str("</div>\n");
        out
    }
}
