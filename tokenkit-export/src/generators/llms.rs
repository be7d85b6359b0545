use serde::Serialize;

use super::{ExportFormat, Generator};
use crate::model::{ExportBundle, GenerateOptions};
use crate::sections::{grouped, linked_tokens, or_missing, or_none};
use crate::templates::{LLMS_TXT, render_or_placeholder};

/// `LLMS.txt`: every token and component, for LLM crawlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct LlmsGenerator;

#[derive(Serialize)]
struct LlmsToken {
    css_var: String,
    value: String,
    description: Option<String>,
}

#[derive(Serialize)]
struct LlmsCategory {
    label: &'static str,
    tokens: Vec<LlmsToken>,
}

#[derive(Serialize)]
struct LlmsComponent {
    name: String,
    description: String,
    props: String,
    linked_tokens: String,
}

#[derive(Serialize)]
struct LlmsData {
    package_name: String,
    version: String,
    themes: String,
    categories: Vec<LlmsCategory>,
    components: Vec<LlmsComponent>,
}

impl Generator for LlmsGenerator {
    fn format(&self) -> ExportFormat {
        ExportFormat::Llms
    }

    fn generate(&self, bundle: &ExportBundle, _options: &GenerateOptions) -> String {
        let data = LlmsData {
            package_name: bundle.metadata.package_name.clone(),
            version: bundle.metadata.version.clone(),
            themes: or_none(&bundle.themes),
            categories: grouped(&bundle.tokens)
                .into_iter()
                .map(|(category, tokens)| LlmsCategory {
                    label: category.label(),
                    tokens: tokens
                        .into_iter()
                        .map(|t| LlmsToken {
                            css_var: t.css_var.clone(),
                            value: t.value.display(),
                            description: t.description.clone(),
                        })
                        .collect(),
                })
                .collect(),
            components: bundle
                .components
                .iter()
                .map(|c| LlmsComponent {
                    name: c.name.clone(),
                    description: or_missing(c.description.as_deref()).to_string(),
                    props: or_none(&c.props.iter().map(|p| format!("{}: {}", p.name, p.prop_type)).collect::<Vec<_>>()),
                    linked_tokens: linked_tokens(&c.linked_tokens),
                })
                .collect(),
        };
        render_or_placeholder("LLMS.txt", LLMS_TXT, &data)
    }
}
