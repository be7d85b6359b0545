use thiserror::Error;

/// Errors produced while parsing or resolving design tokens.
///
/// Parse failures are always local to one file or one leaf: callers record
/// them and continue with the remaining input.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token document is not valid JSON.
    #[error("invalid token JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A color leaf carries neither a hex string nor color components.
    #[error("invalid color value at '{path}': {reason}")]
    InvalidColor { path: String, reason: String },

    /// A design-tool variable could not be resolved to a concrete value.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl TokenError {
    pub fn invalid_color(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidColor { path: path.into(), reason: reason.into() }
    }
}

/// Failures while following a variable's value for a given mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("variable '{variable}' has no value for mode '{mode}'")]
    MissingMode { variable: String, mode: String },

    #[error("alias target '{id}' not found")]
    MissingAlias { id: String },

    /// The alias chain is longer than the resolver follows. Design tools are
    /// expected to guarantee acyclic aliases; hitting this usually means a cycle.
    #[error("alias chain starting at '{variable}' exceeds {depth} hops")]
    AliasDepthExceeded { variable: String, depth: usize },
}

pub type Result<T> = std::result::Result<T, TokenError>;
