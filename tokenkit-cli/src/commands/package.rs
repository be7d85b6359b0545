use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokenkit_export::{
    Bundle, BundleWriter, DirectoryBundleWriter, ExportableComponent, GenerateOptions, PackageConfig,
    ZipBundleWriter, assemble_package,
};

use super::load_themes;
use crate::cli::PackageArgs;

pub fn read_components(path: &Path) -> Result<Vec<ExportableComponent>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing components in {}", path.display()))
}

pub fn build(args: &PackageArgs, config: &PackageConfig) -> Result<Bundle> {
    let loaded = load_themes(&args.files)?;
    let components = read_components(&args.components)?;
    Ok(assemble_package(config, &loaded.tokens, &components, &GenerateOptions::at(chrono::Utc::now()))?)
}

/// Write the package and return the archive path or the package directory.
pub fn write(bundle: &Bundle, out_dir: &Path, unpacked: bool) -> Result<PathBuf> {
    if unpacked {
        let root = out_dir.join(bundle.name.trim_end_matches(".zip"));
        DirectoryBundleWriter::new(&root).write(bundle)?;
        return Ok(root);
    }
    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join(&bundle.name);
    std::fs::write(&path, ZipBundleWriter.write(bundle)?).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

pub fn run(args: PackageArgs, config: PackageConfig) -> Result<()> {
    let bundle = build(&args, &config)?;
    let path = write(&bundle, &args.out_dir, args.unpacked)?;
    tracing::info!(package = %config.package_name, files = bundle.files.len(), "built npm package");
    println!("{}", path.display());
    Ok(())
}
