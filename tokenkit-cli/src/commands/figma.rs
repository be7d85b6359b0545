use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokenkit_core::{FigmaDocument, ModeExport};

use crate::cli::FigmaExportArgs;

pub fn read_document(path: &Path) -> Result<FigmaDocument> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing variables document {}", path.display()))
}

/// Write one `*_tokens.json` per mode and return the written paths.
pub fn write_modes(exports: &[ModeExport], out_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;
    let mut written = Vec::with_capacity(exports.len());
    for export in exports {
        for skipped in &export.skipped {
            tracing::warn!(
                variable = %skipped.id,
                name = skipped.name.as_deref().unwrap_or("-"),
                mode = %export.mode,
                reason = %skipped.reason,
                "variable skipped"
            );
        }
        let path = out_dir.join(&export.file_name);
        std::fs::write(&path, export.content()).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(file = %export.file_name, tokens = export.tokens.len(), "wrote mode tokens");
        written.push(path);
    }
    Ok(written)
}

pub fn run(args: FigmaExportArgs) -> Result<()> {
    let document = read_document(&args.document)?;
    for path in write_modes(&document.export(), &args.out_dir)? {
        println!("{}", path.display());
    }
    Ok(())
}
