use tokenkit_core::Token;

use super::{ExportFormat, Generator};
use crate::model::{ExportBundle, GenerateOptions};
use crate::sections::{by_theme, grouped, theme_class};

/// CSS custom properties, one rule block per theme.
///
/// Tokens of a single theme go under `:root` (or `.{theme_class}`). Mixed
/// themes get a `.{theme-slug}` block each; the first theme also claims `:root`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssGenerator;

impl CssGenerator {
    fn selector(options: &GenerateOptions) -> String {
        match options.theme_class.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            Some(class) => format!(".{}", class.trim_start_matches('.')),
            None => ":root".to_string(),
        }
    }

    fn push_block(css: &mut String, selector: &str, tokens: &[Token]) {
        css.push_str(&format!("{selector} {{\n"));
        for (i, (category, tokens)) in grouped(tokens).into_iter().enumerate() {
            if i > 0 {
                css.push('\n');
            }
            css.push_str(&format!("  /* {} */\n", category.label()));
            for token in tokens {
                css.push_str(&format!("  {}: {};\n", token.css_var, token.css_value()));
            }
        }
        css.push_str("}\n");
    }
}

impl Generator for CssGenerator {
    fn format(&self) -> ExportFormat {
        ExportFormat::Css
    }

    fn generate(&self, bundle: &ExportBundle, options: &GenerateOptions) -> String {
        let mut css = String::new();
        css.push_str(&format!(
            "/* Design tokens for {} v{}. Generated {} */\n\n",
            bundle.metadata.package_name,
            bundle.metadata.version,
            options.timestamp().to_rfc3339()
        ));
        let themes = by_theme(&bundle.tokens);
        if let [(_, tokens)] = themes.as_slice() {
            Self::push_block(&mut css, &Self::selector(options), tokens);
            return css;
        }
        for (i, (theme, tokens)) in themes.iter().enumerate() {
            let class = format!(".{}", theme_class(*theme));
            if i == 0 {
                Self::push_block(&mut css, &format!(":root, {class}"), tokens);
            } else {
                css.push('\n');
                Self::push_block(&mut css, &class, tokens);
            }
        }
        css
    }
}
