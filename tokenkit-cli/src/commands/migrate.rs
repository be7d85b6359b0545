//! `tokenkit migrate`: bulk import of legacy theme files.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokenkit_core::{Category, Normalizer, Token, TokenError};
use tokenkit_sync::{FileTokenStore, SyncConfig, SyncRequest, SyncStatus, TokenFile, sync_files};

use super::file_name;
use crate::cli::MigrateArgs;

pub const MIGRATION_SOURCE: &str = "cli-migrate";

#[derive(Debug, Clone, PartialEq)]
pub struct MigrationEntry {
    pub file: String,
    pub status: SyncStatus,
    pub tokens: usize,
    pub categories: BTreeMap<Category, usize>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationReport {
    pub entries: Vec<MigrationEntry>,
}

impl MigrationReport {
    pub fn count(&self, status: SyncStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }
}

/// `*.json` files directly under `dir`, sorted by name.
pub fn token_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    files.sort();
    Ok(files)
}

fn category_counts(tokens: &[Token]) -> BTreeMap<Category, usize> {
    let mut counts = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.category).or_insert(0) += 1;
    }
    counts
}

fn analyze(file: &str, text: &str) -> MigrationEntry {
    let parsed: std::result::Result<serde_json::Value, TokenError> =
        serde_json::from_str(text).map_err(TokenError::from);
    match parsed {
        Ok(tree) => {
            let tokens = Normalizer::default().normalize(&tree);
            let status = if tokens.is_empty() { SyncStatus::Skipped } else { SyncStatus::Success };
            MigrationEntry {
                file: file.to_string(),
                status,
                tokens: tokens.len(),
                categories: category_counts(&tokens),
                error: None,
            }
        }
        Err(e) => MigrationEntry {
            file: file.to_string(),
            status: SyncStatus::Error,
            tokens: 0,
            categories: BTreeMap::new(),
            error: Some(e.to_string()),
        },
    }
}

/// Analyze every file and, unless `dry_run`, sync them into the store at `store_dir`.
pub async fn migrate(dir: &Path, store_dir: &Path, dry_run: bool) -> Result<MigrationReport> {
    let files = token_files(dir)?;
    tracing::info!(dir = %dir.display(), files = files.len(), dry_run, "starting migration");

    let mut report = MigrationReport::default();
    let mut request = SyncRequest::new(Vec::new());
    request.source = Some(MIGRATION_SOURCE.to_string());

    for path in &files {
        let name = file_name(path);
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        report.entries.push(analyze(&name, &text));
        request.tokens.push(TokenFile::text(name, text));
    }

    if dry_run || request.tokens.is_empty() {
        return Ok(report);
    }

    let store = FileTokenStore::open(store_dir).await?;
    let summary = sync_files(&store, &request, &SyncConfig::default().with_source(MIGRATION_SOURCE)).await?;
    for (entry, result) in report.entries.iter_mut().zip(&summary.results) {
        entry.status = result.status;
        if let Some(count) = result.token_count {
            entry.tokens = count;
        }
        if result.error.is_some() {
            entry.error = result.error.clone();
        }
    }
    tracing::info!(themes = summary.synced_themes, tokens = summary.total_tokens, "migration synced");
    Ok(report)
}

fn status_label(status: SyncStatus) -> &'static str {
    match status {
        SyncStatus::Success => "ok",
        SyncStatus::Skipped => "skip",
        SyncStatus::Error => "error",
    }
}

pub fn print_report(out: &mut impl Write, report: &MigrationReport, verbose: bool, dry_run: bool) -> std::io::Result<()> {
    if dry_run {
        writeln!(out, "Dry run: nothing was written.")?;
    }
    for entry in &report.entries {
        match &entry.error {
            Some(error) => writeln!(out, "[{:>5}] {}: {}", status_label(entry.status), entry.file, error)?,
            None => writeln!(out, "[{:>5}] {} ({} tokens)", status_label(entry.status), entry.file, entry.tokens)?,
        }
        if verbose {
            for (category, count) in &entry.categories {
                writeln!(out, "          {:<12} {}", category.as_str(), count)?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "{:<10} {:>6}", "status", "files")?;
    writeln!(out, "{:-<10} {:->6}", "", "")?;
    for status in [SyncStatus::Success, SyncStatus::Skipped, SyncStatus::Error] {
        writeln!(out, "{:<10} {:>6}", format!("{status:?}").to_lowercase(), report.count(status))?;
    }
    writeln!(out, "{:<10} {:>6}", "total", report.entries.len())?;
    Ok(())
}

pub async fn run(args: MigrateArgs, store_dir: PathBuf) -> Result<()> {
    let report = migrate(&args.dir, &store_dir, args.dry_run).await?;
    print_report(&mut std::io::stdout().lock(), &report, args.verbose, args.dry_run)?;
    Ok(())
}
