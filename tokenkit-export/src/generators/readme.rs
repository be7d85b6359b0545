use serde_json::json;

use super::{ExportFormat, Generator};
use crate::model::{ExportBundle, GenerateOptions};
use crate::sections::or_none;
use crate::templates::{AI_README, render_or_placeholder};

/// `README.md` of the AI context pack.
#[derive(Debug, Clone, Copy, Default)]
pub struct AiReadmeGenerator;

impl Generator for AiReadmeGenerator {
    fn format(&self) -> ExportFormat {
        ExportFormat::AiReadme
    }

    fn generate(&self, bundle: &ExportBundle, _options: &GenerateOptions) -> String {
        let data = json!({
            "package_name": bundle.metadata.package_name,
            "version": bundle.metadata.version,
            "exported_at": bundle.metadata.exported_at.format("%Y-%m-%d").to_string(),
            "themes": or_none(&bundle.themes),
            "token_count": bundle.tokens.len(),
            "component_count": bundle.components.len(),
        });
        render_or_placeholder("README.md", AI_README, &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readme_summarizes_pack() {
        let bundle = ExportBundle::default().with_themes(vec!["Light".into(), "Dark".into()]);
        let out = AiReadmeGenerator.generate(&bundle, &GenerateOptions::default());
        assert!(out.starts_with("# @yourorg/design-system AI Context Pack"));
        assert!(out.contains("exported 1970-01-01"));
        assert!(out.contains("- Themes: Light, Dark"));
        assert!(out.contains("- Tokens: 0"));
        assert!(out.contains("`.cursor/rules/design-system.mdc`"));
    }
}
