//! Design-tool variable resolution.
//!
//! Figma variables store one raw value per mode. A raw value is either a
//! concrete payload (RGBA components, float, string, boolean) or an alias to
//! another variable. [`resolve_variable`] follows aliases with the same mode id
//! and converts the final payload into a [`TokenValue`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::ResolveError;
use crate::token::{ColorValue, TokenType, TokenValue, format_number};

/// Maximum alias hops followed before giving up.
pub const MAX_ALIAS_DEPTH: usize = 32;

/// Declared type of a design-tool variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResolvedType {
    Color,
    Float,
    String,
    Boolean,
}

/// RGBA color with 0–1 float channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

/// Reference to another variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAlias {
    #[serde(rename = "type", default = "alias_kind")]
    pub kind: String,
    pub id: String,
}

fn alias_kind() -> String {
    "VARIABLE_ALIAS".to_string()
}

/// Raw per-mode value as stored by the design tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Alias(VariableAlias),
    Color(Rgba),
    Boolean(bool),
    Float(f64),
    String(String),
}

impl VariableValue {
    pub fn alias(id: impl Into<String>) -> Self {
        VariableValue::Alias(VariableAlias { kind: alias_kind(), id: id.into() })
    }
}

impl std::fmt::Display for VariableValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableValue::Alias(alias) => write!(f, "{{{}}}", alias.id),
            VariableValue::Color(c) => f.write_str(&ColorValue::from_rgba(c.r, c.g, c.b, c.a).to_css()),
            VariableValue::Boolean(b) => write!(f, "{b}"),
            VariableValue::Float(n) => f.write_str(&format_number(*n)),
            VariableValue::String(s) => f.write_str(s),
        }
    }
}

/// A design-tool variable with its values for every mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: String,
    /// Slash-separated name, e.g. `color/btn/primary-bg`.
    pub name: String,
    pub resolved_type: ResolvedType,
    #[serde(default)]
    pub values_by_mode: BTreeMap<String, VariableValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableMode {
    pub mode_id: String,
    pub name: String,
}

/// A named collection of variables exported together, one file per mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableCollection {
    pub id: String,
    pub name: String,
    pub modes: Vec<VariableMode>,
    #[serde(default)]
    pub variable_ids: Vec<String>,
}

/// Lookup of variables by id, the only capability the resolver needs.
pub trait VariableSource {
    fn variable(&self, id: &str) -> Option<&Variable>;
}

impl VariableSource for HashMap<String, Variable> {
    fn variable(&self, id: &str) -> Option<&Variable> {
        self.get(id)
    }
}

impl VariableSource for [Variable] {
    fn variable(&self, id: &str) -> Option<&Variable> {
        self.iter().find(|v| v.id == id)
    }
}

/// Kind of a resolved value. `Unknown` covers booleans and payloads that
/// disagree with the declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvedKind {
    Color,
    Number,
    String,
    Unknown,
}

impl ResolvedKind {
    /// DTCG `$type` written for this kind.
    pub fn dtcg_type(&self) -> &'static str {
        match self {
            ResolvedKind::Color => "color",
            ResolvedKind::Number => "number",
            ResolvedKind::String | ResolvedKind::Unknown => "string",
        }
    }

    pub fn token_type(&self) -> TokenType {
        match self {
            ResolvedKind::Color => TokenType::Color,
            ResolvedKind::Number => TokenType::Number,
            ResolvedKind::String | ResolvedKind::Unknown => TokenType::String,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedValue {
    pub kind: ResolvedKind,
    pub value: TokenValue,
}

/// Resolve `variable` for `mode_id`, following aliases.
///
/// Alias targets are read with the same mode id; when the target does not
/// define that mode (it lives in a collection with different modes) its
/// first mode is used instead.
pub fn resolve_variable<S: VariableSource + ?Sized>(
    variable: &Variable,
    mode_id: &str,
    source: &S,
) -> Result<ResolvedValue, ResolveError> {
    let raw = variable.values_by_mode.get(mode_id).ok_or_else(|| ResolveError::MissingMode {
        variable: variable.id.clone(),
        mode: mode_id.to_string(),
    })?;
    resolve_raw(variable, raw, mode_id, source, 0)
}

fn resolve_raw<S: VariableSource + ?Sized>(
    origin: &Variable,
    raw: &VariableValue,
    mode_id: &str,
    source: &S,
    depth: usize,
) -> Result<ResolvedValue, ResolveError> {
    let value = match (origin.resolved_type, raw) {
        (_, VariableValue::Alias(alias)) => {
            if depth >= MAX_ALIAS_DEPTH {
                return Err(ResolveError::AliasDepthExceeded {
                    variable: origin.id.clone(),
                    depth: MAX_ALIAS_DEPTH,
                });
            }
            let target = source
                .variable(&alias.id)
                .ok_or_else(|| ResolveError::MissingAlias { id: alias.id.clone() })?;
            let target_raw = target
                .values_by_mode
                .get(mode_id)
                .or_else(|| target.values_by_mode.values().next())
                .ok_or_else(|| ResolveError::MissingMode {
                    variable: target.id.clone(),
                    mode: mode_id.to_string(),
                })?;
            return resolve_raw(target, target_raw, mode_id, source, depth + 1);
        }
        (ResolvedType::Color, VariableValue::Color(c)) => ResolvedValue {
            kind: ResolvedKind::Color,
            value: TokenValue::Color(ColorValue::from_rgba(c.r, c.g, c.b, c.a)),
        },
        (ResolvedType::Float, VariableValue::Float(n)) => {
            ResolvedValue { kind: ResolvedKind::Number, value: TokenValue::Number(*n) }
        }
        (ResolvedType::String, VariableValue::String(s)) => {
            ResolvedValue { kind: ResolvedKind::String, value: TokenValue::text(s.as_str()) }
        }
        (_, other) => {
            ResolvedValue { kind: ResolvedKind::Unknown, value: TokenValue::text(other.to_string()) }
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variable(id: &str, resolved_type: ResolvedType, modes: &[(&str, VariableValue)]) -> Variable {
        Variable {
            id: id.to_string(),
            name: format!("test/{id}"),
            resolved_type,
            values_by_mode: modes.iter().map(|(m, v)| (m.to_string(), v.clone())).collect(),
            description: None,
        }
    }

    fn source(vars: Vec<Variable>) -> HashMap<String, Variable> {
        vars.into_iter().map(|v| (v.id.clone(), v)).collect()
    }

    #[test]
    fn test_color_resolution_rounds_channels() {
        let v = variable(
            "c",
            ResolvedType::Color,
            &[("m1", VariableValue::Color(Rgba { r: 1.0, g: 0.337, b: 0.2, a: 1.0 }))],
        );
        let resolved = resolve_variable(&v, "m1", &source(vec![])).unwrap();
        assert_eq!(resolved.kind, ResolvedKind::Color);
        assert_eq!(resolved.value, TokenValue::color("#FF5633"));
    }

    #[test]
    fn test_alias_chain_uses_same_mode() {
        let base = variable(
            "base",
            ResolvedType::Color,
            &[
                ("light", VariableValue::Color(Rgba { r: 1.0, g: 1.0, b: 1.0, a: 1.0 })),
                ("dark", VariableValue::Color(Rgba { r: 0.0, g: 0.0, b: 0.0, a: 1.0 })),
            ],
        );
        let mid = variable(
            "mid",
            ResolvedType::Color,
            &[("light", VariableValue::alias("base")), ("dark", VariableValue::alias("base"))],
        );
        let top = variable(
            "top",
            ResolvedType::Color,
            &[("light", VariableValue::alias("mid")), ("dark", VariableValue::alias("mid"))],
        );
        let src = source(vec![base, mid, top.clone()]);

        assert_eq!(resolve_variable(&top, "light", &src).unwrap().value, TokenValue::color("#FFFFFF"));
        assert_eq!(resolve_variable(&top, "dark", &src).unwrap().value, TokenValue::color("#000000"));
    }

    #[test]
    fn test_alias_into_single_mode_collection_uses_its_mode() {
        let primitive = variable("p", ResolvedType::Float, &[("default", VariableValue::Float(16.0))]);
        let semantic = variable("s", ResolvedType::Float, &[("compact", VariableValue::alias("p"))]);
        let src = source(vec![primitive, semantic.clone()]);
        let resolved = resolve_variable(&semantic, "compact", &src).unwrap();
        assert_eq!(resolved.value, TokenValue::Number(16.0));
    }

    #[test]
    fn test_missing_alias_target() {
        let v = variable("v", ResolvedType::Color, &[("m", VariableValue::alias("gone"))]);
        let err = resolve_variable(&v, "m", &source(vec![])).unwrap_err();
        assert_eq!(err, ResolveError::MissingAlias { id: "gone".to_string() });
    }

    #[test]
    fn test_alias_cycle_reports_depth_error() {
        let a = variable("a", ResolvedType::Float, &[("m", VariableValue::alias("b"))]);
        let b = variable("b", ResolvedType::Float, &[("m", VariableValue::alias("a"))]);
        let src = source(vec![a.clone(), b]);
        assert!(matches!(
            resolve_variable(&a, "m", &src),
            Err(ResolveError::AliasDepthExceeded { .. })
        ));
    }

    #[test]
    fn test_unsupported_types_fall_back_to_unknown() {
        let flag = variable("f", ResolvedType::Boolean, &[("m", VariableValue::Boolean(true))]);
        let resolved = resolve_variable(&flag, "m", &source(vec![])).unwrap();
        assert_eq!(resolved.kind, ResolvedKind::Unknown);
        assert_eq!(resolved.value, TokenValue::text("true"));

        let mismatched = variable("x", ResolvedType::Color, &[("m", VariableValue::Float(2.5))]);
        let resolved = resolve_variable(&mismatched, "m", &source(vec![])).unwrap();
        assert_eq!(resolved.kind, ResolvedKind::Unknown);
        assert_eq!(resolved.value, TokenValue::text("2.5"));
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let v = variable("n", ResolvedType::String, &[("m", VariableValue::String("Inter".into()))]);
        let src = source(vec![]);
        assert_eq!(resolve_variable(&v, "m", &src).unwrap(), resolve_variable(&v, "m", &src).unwrap());
    }

    #[test]
    fn test_variable_value_deserializes_figma_payloads() {
        let values: Vec<VariableValue> = serde_json::from_str(
            r#"[{"type": "VARIABLE_ALIAS", "id": "VariableID:1:2"}, {"r": 0.5, "g": 0.5, "b": 0.5}, 12, "Inter", false]"#,
        )
        .unwrap();
        assert_eq!(values[0], VariableValue::alias("VariableID:1:2"));
        assert!(matches!(values[1], VariableValue::Color(Rgba { a, .. }) if a == 1.0));
        assert_eq!(values[2], VariableValue::Float(12.0));
        assert_eq!(values[3], VariableValue::String("Inter".into()));
        assert_eq!(values[4], VariableValue::Boolean(false));
    }
}
