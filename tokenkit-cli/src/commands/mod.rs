pub mod export;
pub mod figma;
pub mod migrate;
pub mod package;
pub mod serve;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokenkit_core::{Token, parse_token_json};
use tokenkit_sync::theme_name_from_file;

/// Tokens of one or more theme files, each token tagged with its theme.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedThemes {
    pub themes: Vec<String>,
    pub tokens: Vec<Token>,
}

pub fn file_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}

pub fn load_themes(paths: &[PathBuf]) -> Result<LoadedThemes> {
    let mut loaded = LoadedThemes::default();
    for path in paths {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let theme = theme_name_from_file(&file_name(path));
        let tokens = parse_token_json(&text).with_context(|| format!("parsing {}", path.display()))?;
        tracing::debug!(file = %path.display(), theme = %theme, tokens = tokens.len(), "loaded token file");
        loaded.tokens.extend(tokens.into_iter().map(|t| t.with_theme(theme.clone())));
        loaded.themes.push(theme);
    }
    Ok(loaded)
}
