//! Token tree normalization.
//!
//! Walks a nested token document depth-first and flattens every leaf into a
//! [`Token`]. A node is a leaf when the leaf predicate accepts it (by default:
//! it carries both a type and a value field). Keys starting with `$` are
//! metadata and are never traversed. Emission order is document order, which
//! relies on `serde_json`'s `preserve_order` feature.

use serde_json::{Map, Value};

use crate::classify::Classifier;
use crate::error::{Result, TokenError};
use crate::naming::css_var_name;
use crate::token::{ColorValue, Token, TokenType, TokenValue, format_number};

/// Decides whether an object node is a token leaf rather than a group.
pub type LeafPredicate = fn(&Map<String, Value>) -> bool;

/// DTCG leaf: `$type` and `$value` both present.
pub fn is_dtcg_leaf(node: &Map<String, Value>) -> bool {
    node.contains_key("$type") && node.contains_key("$value")
}

/// DTCG leaf, or a legacy `{ "type": "...", "value": ... }` leaf.
pub fn is_token_leaf(node: &Map<String, Value>) -> bool {
    is_dtcg_leaf(node)
        || (node.get("type").is_some_and(Value::is_string) && node.contains_key("value"))
}

fn leaf_field<'a>(leaf: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    leaf.get(&format!("${name}")).or_else(|| leaf.get(name))
}

/// Shared tree normalizer used by both the sync importer and the Figma exporter.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    is_leaf: LeafPredicate,
    classifier: Classifier,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(is_token_leaf, Classifier::default())
    }
}

impl Normalizer {
    pub fn new(is_leaf: LeafPredicate, classifier: Classifier) -> Self {
        Self { is_leaf, classifier }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Flatten a token tree. Non-object roots produce no tokens.
    pub fn normalize(&self, tree: &Value) -> Vec<Token> {
        let mut tokens = Vec::new();
        if let Value::Object(root) = tree {
            let mut path = Vec::new();
            self.walk(root, &mut path, &mut tokens);
        }
        tokens
    }

    fn walk(&self, node: &Map<String, Value>, path: &mut Vec<String>, out: &mut Vec<Token>) {
        for (key, child) in node {
            if key.starts_with('$') {
                continue;
            }
            let Value::Object(child) = child else {
                continue;
            };

            path.push(key.clone());
            if (self.is_leaf)(child) {
                match self.build_token(path, child, out.len()) {
                    Ok(token) => out.push(token),
                    Err(e) => {
                        tracing::warn!(path = %path.join("."), error = %e, "skipping token leaf");
                    }
                }
            } else {
                self.walk(child, path, out);
            }
            path.pop();
        }
    }

    /// Build one token from a leaf found at `segments`.
    pub fn build_token(
        &self,
        segments: &[String],
        leaf: &Map<String, Value>,
        sort_order: usize,
    ) -> Result<Token> {
        let path = segments.join(".");
        let raw_type = leaf_field(leaf, "type").and_then(Value::as_str).unwrap_or("string");
        let raw_value = leaf_field(leaf, "value").unwrap_or(&Value::Null);
        let (token_type, value) = parse_leaf_value(&path, raw_type, raw_value)?;
        let dtcg_type = (raw_type != token_type.as_str()).then(|| raw_type.to_string());
        let dtcg_value = (value.to_dtcg() != *raw_value).then(|| raw_value.clone());

        let category = self.classifier.classify(segments);
        Ok(Token {
            name: segments.last().cloned().unwrap_or_default(),
            category,
            subcategory: (segments.len() > 2).then(|| segments[1].clone()),
            group_name: (segments.len() > 1).then(|| segments[0].clone()),
            token_type,
            value,
            dtcg_type,
            dtcg_value,
            css_var: css_var_name(category, segments),
            sort_order,
            description: leaf_field(leaf, "description").and_then(Value::as_str).map(String::from),
            theme: None,
            path,
        })
    }
}

/// Normalize with the default leaf predicate and classifier.
pub fn normalize_token_tree(tree: &Value) -> Vec<Token> {
    Normalizer::default().normalize(tree)
}

/// Parse a JSON token document and normalize it.
pub fn parse_token_json(text: &str) -> Result<Vec<Token>> {
    let tree: Value = serde_json::from_str(text)?;
    Ok(normalize_token_tree(&tree))
}

fn parse_leaf_value(path: &str, raw_type: &str, raw: &Value) -> Result<(TokenType, TokenValue)> {
    let declared = TokenType::from_dtcg(raw_type);
    match (declared, raw) {
        (_, Value::Null) => Ok((declared, TokenValue::Null)),
        (TokenType::Color, value) => Ok((TokenType::Color, parse_color(path, value)?)),
        (_, Value::Number(n)) => Ok((TokenType::Number, TokenValue::Number(n.as_f64().unwrap_or(0.0)))),
        (_, Value::String(s)) => Ok((TokenType::String, TokenValue::text(s.as_str()))),
        (_, Value::Bool(b)) => Ok((TokenType::String, TokenValue::text(b.to_string()))),
        (_, composite) => Ok((TokenType::String, TokenValue::Text(composite_to_string(composite)))),
    }
}

fn parse_color(path: &str, raw: &Value) -> Result<TokenValue> {
    match raw {
        Value::String(s) => Ok(TokenValue::color(s)),
        Value::Object(obj) => {
            let alpha = obj.get("alpha").and_then(Value::as_f64);
            if let Some(hex) = obj.get("hex").and_then(Value::as_str) {
                let mut color = ColorValue::parse_hex(hex)
                    .ok_or_else(|| TokenError::invalid_color(path, format!("bad hex '{hex}'")))?;
                if let Some(alpha) = alpha {
                    color.alpha = alpha.clamp(0.0, 1.0);
                }
                return Ok(TokenValue::Color(color));
            }
            if let Some(components) = obj.get("components").and_then(Value::as_array) {
                let channels: Vec<f64> = components.iter().filter_map(Value::as_f64).collect();
                if channels.len() >= 3 {
                    let a = alpha.or(channels.get(3).copied()).unwrap_or(1.0);
                    return Ok(TokenValue::Color(ColorValue::from_rgba(
                        channels[0],
                        channels[1],
                        channels[2],
                        a,
                    )));
                }
            }
            let channel = |k: &str| obj.get(k).and_then(Value::as_f64);
            if let (Some(r), Some(g), Some(b)) = (channel("r"), channel("g"), channel("b")) {
                let a = channel("a").or(alpha).unwrap_or(1.0);
                return Ok(TokenValue::Color(ColorValue::from_rgba(r, g, b, a)));
            }
            Err(TokenError::invalid_color(path, "missing both hex and components"))
        }
        other => Err(TokenError::invalid_color(path, format!("unsupported color payload {other}"))),
    }
}

/// Render composite values (dimensions, shadows) as CSS text; anything else
/// falls back to compact JSON.
fn composite_to_string(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let shadows: Option<Vec<String>> = items.iter().map(shadow_to_css).collect();
            shadows.map(|s| s.join(", ")).unwrap_or_else(|| value.to_string())
        }
        Value::Object(obj) => {
            if let (Some(n), Some(unit)) =
                (obj.get("value").and_then(Value::as_f64), obj.get("unit").and_then(Value::as_str))
            {
                return format!("{}{unit}", format_number(n));
            }
            shadow_to_css(value).unwrap_or_else(|| value.to_string())
        }
        other => other.to_string(),
    }
}

fn shadow_to_css(value: &Value) -> Option<String> {
    let obj = value.as_object()?;
    let offset_x = obj.get("offsetX")?;
    let dimension = |v: Option<&Value>| match v {
        Some(Value::Number(n)) => {
            let n = n.as_f64().unwrap_or(0.0);
            if n == 0.0 { "0".to_string() } else { format!("{}px", format_number(n)) }
        }
        Some(Value::String(s)) => s.clone(),
        Some(other) => composite_to_string(other),
        None => "0".to_string(),
    };
    let color = match obj.get("color") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => parse_color("shadow", other).map(|c| c.display()).unwrap_or_default(),
        None => String::new(),
    };
    let parts = [
        dimension(Some(offset_x)),
        dimension(obj.get("offsetY")),
        dimension(obj.get("blur")),
        dimension(obj.get("spread")),
        color,
    ];
    Some(parts.iter().filter(|p| !p.is_empty()).cloned().collect::<Vec<_>>().join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Category;
    use serde_json::json;

    #[test]
    fn test_flattens_nested_groups() {
        let tree = json!({
            "color": {
                "btn": {
                    "primary-bg": { "$type": "color", "$value": "#ff5633" }
                }
            },
            "spacing": {
                "sm": { "$type": "dimension", "$value": "8px" }
            }
        });
        let tokens = normalize_token_tree(&tree);
        assert_eq!(tokens.len(), 2);

        let btn = &tokens[0];
        assert_eq!(btn.path, "color.btn.primary-bg");
        assert_eq!(btn.name, "primary-bg");
        assert_eq!(btn.category, Category::Color);
        assert_eq!(btn.subcategory.as_deref(), Some("btn"));
        assert_eq!(btn.group_name.as_deref(), Some("color"));
        assert_eq!(btn.css_var, "--color-btn-primary-bg");
        assert_eq!(btn.value, TokenValue::color("#FF5633"));
        assert_eq!(btn.sort_order, 0);

        let sm = &tokens[1];
        assert_eq!(sm.css_var, "--spacing-sm");
        assert_eq!(sm.subcategory, None);
        assert_eq!(sm.token_type, TokenType::String);
        assert_eq!(sm.dtcg_type.as_deref(), Some("dimension"));
        assert_eq!(sm.dtcg_value, None);
        assert_eq!(sm.sort_order, 1);
        assert_eq!(btn.dtcg_type, None);
        assert_eq!(btn.dtcg_value, Some(json!("#ff5633")));
    }

    #[test]
    fn test_declared_type_and_source_value_are_kept() {
        let tree = json!({
            "font": { "weight": { "$type": "fontWeight", "$value": 700 } },
            "color": { "short": { "$type": "color", "$value": "#fff" }, "full": { "$type": "color", "$value": "#FFFFFF" } },
            "shadow": {
                "md": { "$type": "shadow", "$value": { "offsetX": 0, "offsetY": 4, "blur": 8, "color": "#00000033" } }
            }
        });
        let tokens = normalize_token_tree(&tree);

        assert_eq!(tokens[0].token_type, TokenType::Number);
        assert_eq!(tokens[0].dtcg_type_name(), "fontWeight");
        assert_eq!(tokens[0].dtcg_value, None);

        assert_eq!(tokens[1].value, TokenValue::color("#FFFFFF"));
        assert_eq!(tokens[1].dtcg_value(), json!("#fff"));
        assert_eq!(tokens[2].dtcg_value, None);

        assert_eq!(tokens[3].value.display(), "0 4px 8px 0 #00000033");
        assert_eq!(tokens[3].dtcg_type_name(), "shadow");
        assert_eq!(tokens[3].dtcg_value(), tree["shadow"]["md"]["$value"]);
    }

    #[test]
    fn test_skips_metadata_keys() {
        let tree = json!({
            "$extensions": { "com.figma": { "fake": { "$type": "color", "$value": "#000" } } },
            "color": {
                "$description": "brand colors",
                "base": {
                    "$type": "color",
                    "$value": "#000000",
                    "$extensions": { "com.figma": { "variableId": "1:2" } }
                }
            }
        });
        let tokens = normalize_token_tree(&tree);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].path, "color.base");
    }

    #[test]
    fn test_null_value_still_emits_token() {
        let tree = json!({ "spacing": { "xl": { "$type": "number", "$value": null } } });
        let tokens = normalize_token_tree(&tree);
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].value.is_null());
        assert_eq!(tokens[0].token_type, TokenType::Number);
    }

    #[test]
    fn test_invalid_color_is_skipped_and_traversal_continues() {
        let tree = json!({
            "color": {
                "broken": { "$type": "color", "$value": { "space": "srgb" } },
                "ok": { "$type": "color", "$value": { "components": [1, 0.337, 0.2], "alpha": 1 } }
            }
        });
        let tokens = normalize_token_tree(&tree);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].name, "ok");
        assert_eq!(tokens[0].value, TokenValue::color("#FF5633"));
        // sort order is the emission index, so the skipped leaf leaves no gap
        assert_eq!(tokens[0].sort_order, 0);
    }

    #[test]
    fn test_empty_groups_and_non_object_roots() {
        assert!(normalize_token_tree(&json!({ "color": {} })).is_empty());
        assert!(normalize_token_tree(&json!([1, 2, 3])).is_empty());
        assert!(normalize_token_tree(&json!("x")).is_empty());
    }

    #[test]
    fn test_legacy_type_value_leaves() {
        let tree = json!({ "radius": { "md": { "type": "number", "value": 8, "description": "cards" } } });
        let tokens = normalize_token_tree(&tree);
        assert_eq!(tokens[0].value, TokenValue::Number(8.0));
        assert_eq!(tokens[0].category, Category::Border);
        assert_eq!(tokens[0].description.as_deref(), Some("cards"));
        assert_eq!(tokens[0].css_value(), "8px");
    }

    #[test]
    fn test_dtcg_only_predicate_ignores_legacy_leaves() {
        let normalizer = Normalizer::new(is_dtcg_leaf, Classifier::default());
        let tree = json!({ "radius": { "md": { "type": "number", "value": 8 } } });
        assert!(normalizer.normalize(&tree).is_empty());
    }

    #[test]
    fn test_color_object_variants() {
        let tree = json!({
            "color": {
                "hex": { "$type": "color", "$value": { "hex": "#000000", "alpha": 0.4 } },
                "rgb": { "$type": "color", "$value": { "r": 0, "g": 0, "b": 1 } },
                "named": { "$type": "color", "$value": "transparent" }
            }
        });
        let tokens = normalize_token_tree(&tree);
        assert_eq!(tokens[0].css_value(), "rgba(0, 0, 0, 0.4)");
        assert_eq!(tokens[1].css_value(), "#0000FF");
        assert_eq!(tokens[2].value, TokenValue::text("transparent"));
        assert_eq!(tokens[2].token_type, TokenType::Color);
    }

    #[test]
    fn test_composite_values() {
        let tree = json!({
            "shadow": {
                "md": {
                    "$type": "shadow",
                    "$value": { "offsetX": 0, "offsetY": 4, "blur": 8, "spread": 0, "color": "#00000033" }
                }
            },
            "spacing": { "lg": { "$type": "dimension", "$value": { "value": 24, "unit": "px" } } }
        });
        let tokens = normalize_token_tree(&tree);
        assert_eq!(tokens[0].value.display(), "0 4px 8px 0 #00000033");
        assert_eq!(tokens[1].value.display(), "24px");
    }

    #[test]
    fn test_parse_token_json_rejects_malformed() {
        assert!(matches!(parse_token_json("{ not json"), Err(TokenError::Parse(_))));
        assert_eq!(parse_token_json("{}").unwrap().len(), 0);
    }
}
