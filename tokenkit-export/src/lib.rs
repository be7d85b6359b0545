//! # tokenkit-export
//!
//! Turns normalized tokens (plus optional component and theme metadata) into
//! the artifacts a design system ships:
//!
//! - stylesheets: CSS custom properties, SCSS variables, a Tailwind theme;
//! - DTCG JSON, with a companion parser;
//! - AI-assistant context files (Cursor rules, `CLAUDE.md`, token rules,
//!   project knowledge, an MCP manifest, `LLMS.txt`);
//! - an npm component package.
//!
//! Single formats are produced through the [`Generator`] trait; file sets are
//! assembled into a [`Bundle`] and written with a [`BundleWriter`].
//!
//! ```rust
//! use serde_json::json;
//! use tokenkit_core::normalize_token_tree;
//! use tokenkit_export::{ExportBundle, ExportFormat, GenerateOptions};
//!
//! let tokens = normalize_token_tree(&json!({
//!     "spacing": { "sm": { "$type": "dimension", "$value": "8px" } }
//! }));
//! let css = ExportFormat::Css.generate(&ExportBundle::new(tokens), &GenerateOptions::default());
//! assert!(css.contains("--spacing-sm: 8px;"));
//! ```

pub mod bundle;
pub mod error;
pub mod generators;
pub mod model;
pub mod sections;
pub mod templates;

pub use bundle::{
    Assembled, Bundle, BundleFile, BundleWriter, DirectoryBundleWriter, ZipBundleWriter,
    archive_name, assemble, assemble_ai_export, assemble_package,
};
pub use error::{ExportError, Result};
pub use generators::{ExportFormat, Generator, parse_dtcg};
pub use model::{
    ComponentData, ComponentProp, ComponentStatus, ExportBundle, ExportMetadata,
    ExportableComponent, GenerateOptions, PackageConfig, publishable,
};
