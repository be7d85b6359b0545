//! Bundle assembly and writers.
//!
//! An assembled [`Bundle`] is a named, ordered file set. Writers turn it into
//! zip bytes or a directory tree. Zip entries carry a fixed timestamp, so an
//! identical bundle always produces identical archive bytes.

use serde::Serialize;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::{Component, Path, PathBuf};
use tokenkit_core::Token;
use zip::write::SimpleFileOptions;

use crate::error::{ExportError, Result};
use crate::generators::package::{COMPONENTS_DIR, barrel, component_files, package_json, package_readme};
use crate::generators::{CssGenerator, ExportFormat, Generator, LlmsGenerator};
use crate::model::{ExportBundle, ExportableComponent, GenerateOptions, PackageConfig, publishable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleFile {
    pub path: String,
    pub content: String,
}

impl BundleFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self { path: path.into(), content: content.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bundle {
    /// Archive file name, e.g. `yourorg-design-system-1.0.0.zip`.
    pub name: String,
    pub files: Vec<BundleFile>,
}

impl Bundle {
    pub fn file(&self, path: &str) -> Option<&BundleFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }
}

/// Result of assembling a format set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assembled {
    Single { format: ExportFormat, path: String, content: String },
    Archive(Bundle),
}

/// `@acme/ui` + `2.0.0` → `acme-ui-2.0.0.zip`; with a label, `acme-ui-ai-2.0.0.zip`.
pub fn archive_name(package_name: &str, version: &str, label: Option<&str>) -> String {
    let stem = package_name.replace('@', "").replace('/', "-");
    match label {
        Some(label) => format!("{stem}-{label}-{version}.zip"),
        None => format!("{stem}-{version}.zip"),
    }
}

/// One format yields its text; several yield an archive named after the package.
pub fn assemble(bundle: &ExportBundle, formats: &[ExportFormat], options: &GenerateOptions) -> Assembled {
    if let [format] = formats {
        let generator = format.generator();
        return Assembled::Single {
            format: *format,
            path: generator.default_path().to_string(),
            content: generator.generate(bundle, options),
        };
    }

    let files = formats
        .iter()
        .map(|format| {
            let generator = format.generator();
            BundleFile::new(generator.default_path(), generator.generate(bundle, options))
        })
        .collect();
    let meta = &bundle.metadata;
    Assembled::Archive(Bundle { name: archive_name(&meta.package_name, &meta.version, None), files })
}

/// The AI context pack with its fixed layout.
pub fn assemble_ai_export(bundle: &ExportBundle, options: &GenerateOptions) -> Bundle {
    let files = ExportFormat::AI_EXPORT
        .iter()
        .map(|format| {
            let generator = format.generator();
            BundleFile::new(generator.default_path(), generator.generate(bundle, options))
        })
        .collect();
    let meta = &bundle.metadata;
    Bundle { name: archive_name(&meta.package_name, &meta.version, Some("ai")), files }
}

/// Reject publishable components whose export names collide; each one owns a
/// `dist/components/<ExportName>/` directory.
fn check_export_names(components: &[&ExportableComponent]) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for component in components {
        let export_name = component.export_name();
        if let Some(first) = seen.get(&export_name) {
            return Err(ExportError::DuplicateComponent {
                export_name,
                first: first.to_string(),
                second: component.name.clone(),
            });
        }
        seen.insert(export_name, component.name.as_str());
    }
    Ok(())
}

/// The npm component package. Unpublishable components are dropped.
pub fn assemble_package(
    config: &PackageConfig,
    tokens: &[Token],
    components: &[ExportableComponent],
    options: &GenerateOptions,
) -> Result<Bundle> {
    let publishable = publishable(components);
    check_export_names(&publishable)?;
    tracing::debug!(
        package = %config.package_name,
        total = components.len(),
        publishable = publishable.len(),
        "assembling npm package"
    );

    let bundle = ExportBundle::for_package(config, tokens.to_vec(), options.timestamp())
        .with_components(publishable.iter().map(|c| c.to_component_data()).collect());

    let mut files = vec![
        BundleFile::new("package.json", package_json(config)),
        BundleFile::new("README.md", package_readme(config, &publishable)),
        BundleFile::new("LLMS.txt", LlmsGenerator.generate(&bundle, options)),
        BundleFile::new("dist/tokens.css", CssGenerator.generate(&bundle, options)),
    ];
    for component in &publishable {
        files.extend(component_files(component).into_iter().map(|(path, content)| BundleFile::new(path, content)));
    }
    files.push(BundleFile::new(format!("{COMPONENTS_DIR}/index.js"), barrel(&publishable)));

    Ok(Bundle { name: archive_name(&config.package_name, &config.version, None), files })
}

/// Capability that persists an assembled bundle.
pub trait BundleWriter {
    type Output;

    fn write(&self, bundle: &Bundle) -> Result<Self::Output>;
}

/// Writes a bundle into an in-memory zip archive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipBundleWriter;

impl ZipBundleWriter {
    fn options() -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default())
            .unix_permissions(0o644)
    }
}

impl BundleWriter for ZipBundleWriter {
    type Output = Vec<u8>;

    fn write(&self, bundle: &Bundle) -> Result<Vec<u8>> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for file in &bundle.files {
            zip.start_file(file.path.as_str(), Self::options())?;
            zip.write_all(file.content.as_bytes())?;
        }
        let cursor = zip.finish()?;
        tracing::debug!(archive = %bundle.name, files = bundle.files.len(), "wrote zip archive");
        Ok(cursor.into_inner())
    }
}

/// Writes bundle files under a root directory, creating parents as needed.
#[derive(Debug, Clone)]
pub struct DirectoryBundleWriter {
    root: PathBuf,
}

impl DirectoryBundleWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn target(&self, relative: &str) -> Result<PathBuf> {
        let path = Path::new(relative);
        if path.components().any(|c| !matches!(c, Component::Normal(_))) {
            return Err(ExportError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("refusing to write outside the output directory: {relative}"),
            )));
        }
        Ok(self.root.join(path))
    }
}

impl BundleWriter for DirectoryBundleWriter {
    type Output = Vec<PathBuf>;

    fn write(&self, bundle: &Bundle) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(bundle.files.len());
        for file in &bundle.files {
            let target = self.target(&file.path)?;
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&target, &file.content)?;
            written.push(target);
        }
        tracing::info!(root = %self.root.display(), files = written.len(), "wrote bundle directory");
        Ok(written)
    }
}
