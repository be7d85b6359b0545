//! # tokenkit-core
//!
//! Core types and transforms for the tokenkit design-token pipeline.
//!
//! ## Overview
//!
//! Design tools export tokens as nested JSON trees (DTCG-style `$type`/`$value`
//! leaves grouped by category). This crate turns those trees into a flat,
//! normalized [`Token`] list that every exporter and store in the workspace
//! consumes.
//!
//! - **Classification**: [`classify`] maps a token path to a [`Category`] with an
//!   ordered, first-match-wins rule table.
//! - **Normalization**: [`Normalizer`] walks a token tree depth-first and emits
//!   tokens with a stable CSS custom-property name and sort order.
//! - **Resolution**: [`resolve`] turns design-tool variables (RGBA components,
//!   aliases, floats, strings) into concrete token values.
//! - **Figma export**: [`figma`] builds per-mode DTCG files from variable
//!   collections.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use tokenkit_core::{Category, normalize_token_tree};
//!
//! let tree = json!({
//!     "color": {
//!         "btn": {
//!             "primary-bg": { "$type": "color", "$value": "#FF5633" }
//!         }
//!     }
//! });
//!
//! let tokens = normalize_token_tree(&tree);
//! assert_eq!(tokens[0].css_var, "--color-btn-primary-bg");
//! assert_eq!(tokens[0].category, Category::Color);
//! ```

pub mod classify;
pub mod error;
pub mod figma;
pub mod naming;
pub mod normalize;
pub mod resolve;
pub mod theme;
pub mod token;
pub mod tree;
pub mod types;

pub use classify::{CATEGORY_RULES, CategoryRule, Classifier, classify};
pub use error::{ResolveError, Result, TokenError};
pub use figma::{FigmaDocument, FigmaExporter, ModeExport, SkippedVariable, token_file_name};
pub use naming::{css_var_name, normalize_segment, slugify};
pub use normalize::{LeafPredicate, Normalizer, normalize_token_tree, parse_token_json};
pub use resolve::{
    ResolvedKind, ResolvedType, ResolvedValue, Rgba, Variable, VariableCollection,
    VariableSource, VariableValue, resolve_variable,
};
pub use theme::{Theme, ThemeStatus};
pub use token::{Category, ColorValue, Token, TokenType, TokenValue, format_number};
pub use types::{ComponentId, Slug, ThemeId};
