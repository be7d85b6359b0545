use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tokenkit_export::{
    Assembled, BundleWriter, ExportBundle, ExportFormat, GenerateOptions, PackageConfig, ZipBundleWriter,
    assemble, assemble_ai_export,
};

use super::{LoadedThemes, load_themes};
use crate::cli::ExportArgs;

pub const AI_BUNDLE: &str = "ai-bundle";

/// What an export run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutput {
    Text(String),
    Archive { name: String, bytes: Vec<u8> },
}

fn options(args: &ExportArgs) -> GenerateOptions {
    let mut options = GenerateOptions::at(chrono::Utc::now());
    if let Some(class) = &args.theme_class {
        options = options.with_theme_class(class.clone());
    }
    if args.extensions {
        options = options.with_extensions();
    }
    options
}

/// Format names from repeated and comma-separated `--format` values.
fn format_names(values: &[String]) -> Vec<&str> {
    values.iter().flat_map(|v| v.split(',')).map(str::trim).filter(|n| !n.is_empty()).collect()
}

pub fn parse_formats(values: &[String]) -> Result<Vec<ExportFormat>> {
    format_names(values)
        .into_iter()
        .map(|name| {
            ExportFormat::from_name(name).with_context(|| {
                let known: Vec<&str> = ExportFormat::ALL.iter().map(|f| f.as_str()).collect();
                format!("unknown format '{name}' (expected {AI_BUNDLE} or one of: {})", known.join(", "))
            })
        })
        .collect()
}

pub fn render(loaded: LoadedThemes, args: &ExportArgs, package: &PackageConfig) -> Result<ExportOutput> {
    let options = options(args);
    let bundle = ExportBundle::for_package(package, loaded.tokens, options.timestamp()).with_themes(loaded.themes);

    let names = format_names(&args.format);
    if names.iter().any(|n| n.eq_ignore_ascii_case(AI_BUNDLE)) {
        if names.len() > 1 {
            bail!("{AI_BUNDLE} is a complete archive and cannot be combined with other formats");
        }
        let archive = assemble_ai_export(&bundle, &options);
        let bytes = ZipBundleWriter.write(&archive)?;
        return Ok(ExportOutput::Archive { name: archive.name, bytes });
    }

    match assemble(&bundle, &parse_formats(&args.format)?, &options) {
        Assembled::Single { content, .. } => Ok(ExportOutput::Text(content)),
        Assembled::Archive(archive) => {
            let bytes = ZipBundleWriter.write(&archive)?;
            Ok(ExportOutput::Archive { name: archive.name, bytes })
        }
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

pub fn run(args: ExportArgs, package: PackageConfig) -> Result<()> {
    let loaded = load_themes(&args.files)?;
    match render(loaded, &args, &package)? {
        ExportOutput::Text(content) => match &args.out {
            Some(path) => {
                write_file(path, content.as_bytes())?;
                tracing::info!(path = %path.display(), "wrote export");
            }
            None => print!("{content}"),
        },
        ExportOutput::Archive { name, bytes } => {
            let path = args.out.clone().unwrap_or_else(|| PathBuf::from(&name));
            write_file(&path, &bytes)?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokenkit_core::normalize_token_tree;

    fn args(formats: &[&str]) -> ExportArgs {
        ExportArgs {
            files: vec![],
            format: formats.iter().map(|f| f.to_string()).collect(),
            out: None,
            theme_class: None,
            extensions: false,
        }
    }

    fn loaded() -> LoadedThemes {
        let tokens = normalize_token_tree(&json!({
            "color": { "bg": { "base": { "$type": "color", "$value": "#FFFFFF" } } }
        }));
        LoadedThemes { themes: vec!["Light".into()], tokens }
    }

    #[test]
    fn test_single_format_is_text() {
        let ExportOutput::Text(css) = render(loaded(), &args(&["css"]), &PackageConfig::default()).unwrap() else { panic!("expected text") };
        assert!(css.contains(":root {"));
        assert!(css.contains("--color-bg-base: #FFFFFF;"));
    }

    #[test]
    fn test_theme_class_scopes_css() {
        let mut args = args(&["css"]);
        args.theme_class = Some("dark".into());
        let ExportOutput::Text(css) = render(loaded(), &args, &PackageConfig::default()).unwrap() else { panic!("expected text") };
        assert!(css.contains(".dark {"));
    }

    #[test]
    fn test_several_formats_make_an_archive() {
        let output = render(loaded(), &args(&["css,scss", "dtcg"]), &PackageConfig::default()).unwrap();
        assert!(matches!(output, ExportOutput::Archive { ref name, .. } if name == "yourorg-design-system-1.0.0.zip"));
    }

    #[test]
    fn test_ai_bundle() {
        let output = render(loaded(), &args(&["ai-bundle"]), &PackageConfig::default()).unwrap();
        assert!(matches!(output, ExportOutput::Archive { ref name, .. } if name == "yourorg-design-system-ai-1.0.0.zip"));
        assert!(render(loaded(), &args(&["ai-bundle", "css"]), &PackageConfig::default()).is_err());

        let error = render(loaded(), &args(&["ai-bundle,css"]), &PackageConfig::default()).unwrap_err().to_string();
        assert!(error.contains("cannot be combined"), "{error}");
    }

    #[test]
    fn test_configured_package_names_the_archive() {
        let package = PackageConfig::new("@acme/ui", "2.0.0");
        let output = render(loaded(), &args(&["AI-Bundle"]), &package).unwrap();
        assert!(matches!(output, ExportOutput::Archive { ref name, .. } if name == "acme-ui-ai-2.0.0.zip"));
    }

    #[test]
    fn test_unknown_format() {
        let error = render(loaded(), &args(&["pdf"]), &PackageConfig::default()).unwrap_err().to_string();
        assert!(error.contains("unknown format 'pdf'"));
    }
}
