use super::{ExportFormat, Generator};
use crate::model::{ExportBundle, GenerateOptions};
use crate::sections::{by_theme, grouped, theme_class};

/// SCSS variables plus a `$tokens` lookup map.
///
/// Mixed themes would redeclare the same variables, so they are emitted as
/// one `$tokens-{theme}` map each plus a `$themes` index instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScssGenerator;

fn scss_name(css_var: &str) -> &str {
    css_var.trim_start_matches('-')
}

impl Generator for ScssGenerator {
    fn format(&self) -> ExportFormat {
        ExportFormat::Scss
    }

    fn generate(&self, bundle: &ExportBundle, options: &GenerateOptions) -> String {
        let mut scss = format!(
            "// Design tokens for {} v{}. Generated {}\n",
            bundle.metadata.package_name,
            bundle.metadata.version,
            options.timestamp().to_rfc3339()
        );

        let themes = by_theme(&bundle.tokens);
        if themes.len() > 1 {
            for (theme, tokens) in &themes {
                scss.push_str(&format!("\n// Theme: {}\n", theme.unwrap_or("default")));
                scss.push_str(&format!("$tokens-{}: (\n", theme_class(*theme)));
                for token in grouped(tokens).iter().flat_map(|(_, tokens)| tokens) {
                    scss.push_str(&format!("  \"{}\": ({}),\n", scss_name(&token.css_var), token.css_value()));
                }
                scss.push_str(");\n");
            }
            scss.push_str("\n$themes: (\n");
            for (theme, _) in &themes {
                let class = theme_class(*theme);
                scss.push_str(&format!("  \"{class}\": $tokens-{class},\n"));
            }
            scss.push_str(");\n");
            return scss;
        }

        let groups = grouped(&bundle.tokens);
        for (category, tokens) in &groups {
            scss.push_str(&format!("\n// {}\n", category.label()));
            for token in tokens {
                scss.push_str(&format!("${}: {};\n", scss_name(&token.css_var), token.css_value()));
            }
        }

        scss.push_str("\n$tokens: (\n");
        for token in groups.iter().flat_map(|(_, tokens)| tokens) {
            let name = scss_name(&token.css_var);
            scss.push_str(&format!("  \"{name}\": ${name},\n"));
        }
        scss.push_str(");\n");
        scss
    }
}
