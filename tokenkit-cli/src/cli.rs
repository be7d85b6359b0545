use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "tokenkit")]
#[command(about = "Design token pipeline: migrate, export, package and serve tokens")]
#[command(version)]
pub struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = "tokenkit.toml")]
    pub config: PathBuf,

    /// Log level (overrides LOG_LEVEL and the config file)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import legacy token JSON files into the theme store
    Migrate(MigrateArgs),

    /// Render token files in one or more export formats
    Export(ExportArgs),

    /// Build the npm component package archive
    Package(PackageArgs),

    /// Run the HTTP API
    Serve(ServeArgs),

    /// Convert a Figma variables document into per-mode token files
    FigmaExport(FigmaExportArgs),
}

#[derive(Debug, Clone, Args)]
pub struct MigrateArgs {
    /// Directory containing `*.json` token files
    pub dir: PathBuf,

    /// Parse and report without writing to the store
    #[arg(long)]
    pub dry_run: bool,

    /// Print per-category token counts for each file
    #[arg(long, short)]
    pub verbose: bool,

    /// Store directory
    #[arg(long, env = "TOKENKIT_STORE_DIR")]
    pub store: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Token files; each file is one theme
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format; repeat for an archive, or `ai-bundle` for the AI context pack
    #[arg(long, short, required = true)]
    pub format: Vec<String>,

    /// Output path (stdout when omitted for text formats)
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Scope CSS custom properties to `.CLASS` instead of `:root`
    #[arg(long)]
    pub theme_class: Option<String>,

    /// Attach `$extensions` metadata to DTCG output
    #[arg(long)]
    pub extensions: bool,
}

#[derive(Debug, Clone, Args)]
pub struct PackageArgs {
    /// Token files; each file is one theme
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// JSON array of exportable components
    #[arg(long)]
    pub components: PathBuf,

    /// Directory the archive is written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Package name (overrides the config file)
    #[arg(long)]
    pub name: Option<String>,

    /// Package version (overrides the config file)
    #[arg(long)]
    pub pkg_version: Option<String>,

    /// Write the package as a directory tree instead of a zip archive
    #[arg(long)]
    pub unpacked: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub host: Option<IpAddr>,

    #[arg(long, short)]
    pub port: Option<u16>,

    /// Store directory
    #[arg(long, env = "TOKENKIT_STORE_DIR")]
    pub store: Option<PathBuf>,

    /// Bearer key required by write endpoints
    #[arg(long, env = "TOKENKIT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct FigmaExportArgs {
    /// JSON document with `collections` and `variables`
    pub document: PathBuf,

    /// Directory the `*_tokens.json` files are written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}
