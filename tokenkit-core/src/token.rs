use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Semantic category a token belongs to.
///
/// Grid and breakpoint tokens are always [`Category::Layout`]; spacing scale
/// tokens (gap, margin, padding) are [`Category::Spacing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Color,
    Typography,
    Spacing,
    Layout,
    Border,
    Shadow,
    Other,
}

impl Category {
    /// Canonical presentation order used by every generator.
    pub const ALL: [Category; 7] = [
        Category::Color,
        Category::Typography,
        Category::Spacing,
        Category::Layout,
        Category::Border,
        Category::Shadow,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Color => "color",
            Category::Typography => "typography",
            Category::Spacing => "spacing",
            Category::Layout => "layout",
            Category::Border => "border",
            Category::Shadow => "shadow",
            Category::Other => "other",
        }
    }

    /// Title-cased label used in generated comments and headings.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Color => "Color",
            Category::Typography => "Typography",
            Category::Spacing => "Spacing",
            Category::Layout => "Layout",
            Category::Border => "Border",
            Category::Shadow => "Shadow",
            Category::Other => "Other",
        }
    }

    /// Parse a category name case-insensitively. Unknown names map to `Other`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "color" | "colors" => Category::Color,
            "typography" => Category::Typography,
            "spacing" => Category::Spacing,
            "layout" | "grid" | "breakpoint" => Category::Layout,
            "border" | "radius" => Category::Border,
            "shadow" | "shadows" => Category::Shadow,
            _ => Category::Other,
        }
    }

    /// Whether a normalized path segment merely names this category
    /// (`color`, `colors`, `shadows`, ...).
    pub(crate) fn is_restated_by(&self, segment: &str) -> bool {
        let name = self.as_str();
        segment == name || segment.strip_suffix('s') == Some(name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive kind of a resolved token value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Color,
    Number,
    String,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Color => "color",
            TokenType::Number => "number",
            TokenType::String => "string",
        }
    }

    /// Map a DTCG or legacy `$type` name onto a primitive kind.
    pub fn from_dtcg(type_name: &str) -> Self {
        match type_name.trim().to_lowercase().as_str() {
            "color" => TokenType::Color,
            "number" | "float" | "dimension" | "fontweight" | "duration" | "integer" => {
                TokenType::Number
            }
            _ => TokenType::String,
        }
    }
}

/// A color as uppercase `#RRGGBB` plus a separate alpha channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorValue {
    pub hex: String,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_alpha() -> f64 {
    1.0
}

impl ColorValue {
    /// Convert 0–1 float channels to 8-bit hex (`round(c * 255)` per channel).
    pub fn from_rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            hex: format!("#{:02X}{:02X}{:02X}", channel(r), channel(g), channel(b)),
            alpha: a.clamp(0.0, 1.0),
        }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`. Returns `None` for anything else.
    pub fn parse_hex(input: &str) -> Option<Self> {
        let digits = input.trim().strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 | 8 => digits.to_string(),
            _ => return None,
        };
        let expanded = expanded.to_uppercase();
        let alpha = if expanded.len() == 8 {
            let a = u8::from_str_radix(&expanded[6..8], 16).ok()?;
            (f64::from(a) / 255.0 * 1000.0).round() / 1000.0
        } else {
            1.0
        };
        Some(Self { hex: format!("#{}", &expanded[..6]), alpha })
    }

    pub fn is_opaque(&self) -> bool {
        (self.alpha - 1.0).abs() < f64::EPSILON
    }

    /// CSS representation: the hex string when opaque, otherwise `rgba(...)`.
    pub fn to_css(&self) -> String {
        if self.is_opaque() {
            return self.hex.clone();
        }
        let (r, g, b) = self.rgb();
        format!("rgba({r}, {g}, {b}, {})", self.alpha)
    }

    fn rgb(&self) -> (u8, u8, u8) {
        let byte = |range: std::ops::Range<usize>| {
            self.hex.get(range).and_then(|h| u8::from_str_radix(h, 16).ok()).unwrap_or(0)
        };
        (byte(1..3), byte(3..5), byte(5..7))
    }
}

fn channel(component: f64) -> u8 {
    (component.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A resolved token value. `Null` is a legitimate placeholder that every
/// generator renders without failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Null,
    Number(f64),
    Text(String),
    Color(ColorValue),
}

impl TokenValue {
    pub fn color(hex: &str) -> Self {
        ColorValue::parse_hex(hex).map(TokenValue::Color).unwrap_or_else(|| Self::text(hex))
    }

    pub fn text(value: impl Into<String>) -> Self {
        TokenValue::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, TokenValue::Null)
    }

    /// Human-readable rendering for documentation output; `-` for null.
    pub fn display(&self) -> String {
        match self {
            TokenValue::Null => "-".to_string(),
            TokenValue::Number(n) => format_number(*n),
            TokenValue::Text(s) => s.clone(),
            TokenValue::Color(c) => c.to_css(),
        }
    }

    /// DTCG `$value` payload. Opaque colors are plain hex strings and integral
    /// numbers are written without a fraction.
    pub fn to_dtcg(&self) -> Value {
        match self {
            TokenValue::Null => Value::Null,
            TokenValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => json!(*n as i64),
            TokenValue::Number(n) => json!(n),
            TokenValue::Text(s) => json!(s),
            TokenValue::Color(c) if c.is_opaque() => json!(c.hex),
            TokenValue::Color(c) => json!({ "hex": c.hex, "alpha": c.alpha }),
        }
    }
}

/// Integral values print without a fractional part (`16`, not `16.0`).
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 { format!("{}", n as i64) } else { format!("{n}") }
}

/// The normalized unit every generator and store works with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Dot-delimited original nesting, e.g. `color.btn.primary-bg`.
    pub path: String,
    /// Last path segment.
    pub name: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub value: TokenValue,
    /// Declared `$type` when it is not the primitive name (`dimension`, `fontWeight`, `shadow`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtcg_type: Option<String>,
    /// Source `$value` when the resolved value no longer serializes to it
    /// (short hex, composites, unit objects).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dtcg_value: Option<Value>,
    pub css_var: String,
    /// Emission index of the traversal that produced this token.
    #[serde(default)]
    pub sort_order: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning theme when tokens of several themes share one collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl Token {
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.')
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// `$type` as written in a DTCG document.
    pub fn dtcg_type_name(&self) -> &str {
        self.dtcg_type.as_deref().unwrap_or(self.token_type.as_str())
    }

    /// `$value` as written in a DTCG document.
    pub fn dtcg_value(&self) -> Value {
        self.dtcg_value.clone().unwrap_or_else(|| self.value.to_dtcg())
    }

    /// `var(--name)` reference to this token.
    pub fn css_reference(&self) -> String {
        format!("var({})", self.css_var)
    }

    /// Value as it appears in a CSS declaration.
    ///
    /// Bare numbers get a `px` unit for dimensional categories (spacing,
    /// layout, border, and typography sizes); null renders as `initial`.
    pub fn css_value(&self) -> String {
        match &self.value {
            TokenValue::Null => "initial".to_string(),
            TokenValue::Number(n) if *n != 0.0 && self.is_dimensional() => {
                format!("{}px", format_number(*n))
            }
            other => other.display(),
        }
    }

    fn is_dimensional(&self) -> bool {
        match self.category {
            Category::Spacing | Category::Layout | Category::Border => true,
            Category::Typography => {
                let path = self.path.to_lowercase();
                path.contains("size") || path.contains("letter")
            }
            _ => false,
        }
    }
}
