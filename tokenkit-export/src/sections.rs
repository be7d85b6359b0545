//! Grouping, bucketing and truncation shared by the document generators.

use tokenkit_core::{Category, Token, slugify};

/// Tokens listed per section in the Claude token rules file.
pub const CLAUDE_TOKEN_LIMIT: usize = 8;
/// Tokens listed per section in Cursor rules.
pub const CURSOR_TOKEN_LIMIT: usize = 5;
/// Tokens listed per section in the compact project knowledge file.
pub const KNOWLEDGE_TOKEN_LIMIT: usize = 3;
/// Components listed in the compact project knowledge file.
pub const KNOWLEDGE_COMPONENT_LIMIT: usize = 10;

pub const EMPTY_SECTION: &str = "None";
pub const EMPTY_LINKED_TOKENS: &str = "None specified";
pub const MISSING_TEXT: &str = "-";
/// Class used for tokens that carry no theme name.
pub const DEFAULT_THEME_CLASS: &str = "default";

/// Presentation-only split of color tokens by CSS variable naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBucket {
    Backgrounds,
    Text,
    Buttons,
}

impl ColorBucket {
    pub const ALL: [ColorBucket; 3] = [ColorBucket::Backgrounds, ColorBucket::Text, ColorBucket::Buttons];

    pub fn label(&self) -> &'static str {
        match self {
            ColorBucket::Backgrounds => "Backgrounds",
            ColorBucket::Text => "Text",
            ColorBucket::Buttons => "Buttons",
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            ColorBucket::Backgrounds => "bg-",
            ColorBucket::Text => "fg-",
            ColorBucket::Buttons => "btn-",
        }
    }

    pub fn contains(&self, token: &Token) -> bool {
        token.category == Category::Color && token.css_var.contains(self.marker())
    }
}

/// Tokens of one category, input order preserved.
pub fn by_category(tokens: &[Token], category: Category) -> Vec<&Token> {
    tokens.iter().filter(|t| t.category == category).collect()
}

/// Non-empty categories in canonical order, each with its tokens.
pub fn grouped(tokens: &[Token]) -> Vec<(Category, Vec<&Token>)> {
    Category::ALL
        .iter()
        .map(|category| (*category, by_category(tokens, *category)))
        .filter(|(_, tokens)| !tokens.is_empty())
        .collect()
}

/// Tokens split by owning theme in first-seen order. Fewer than two distinct
/// themes yield a single untagged group.
pub fn by_theme(tokens: &[Token]) -> Vec<(Option<&str>, Vec<Token>)> {
    let mut groups: Vec<(Option<&str>, Vec<Token>)> = Vec::new();
    for token in tokens {
        let theme = token.theme.as_deref();
        match groups.iter_mut().find(|(t, _)| *t == theme) {
            Some((_, members)) => members.push(token.clone()),
            None => groups.push((theme, vec![token.clone()])),
        }
    }
    if groups.len() < 2 {
        return vec![(None, tokens.to_vec())];
    }
    groups
}

/// CSS class naming a theme (`Dark Mode` → `dark-mode`).
pub fn theme_class(theme: Option<&str>) -> String {
    theme.map(slugify).filter(|s| !s.is_empty()).unwrap_or_else(|| DEFAULT_THEME_CLASS.to_string())
}

pub fn bucket(tokens: &[Token], bucket: ColorBucket) -> Vec<&Token> {
    tokens.iter().filter(|t| bucket.contains(t)).collect()
}

/// First `limit` items, never a sample.
pub fn first_n<T>(items: &[T], limit: usize) -> &[T] {
    &items[..items.len().min(limit)]
}

/// Inline list of `` `--var` `` references, truncated; [`EMPTY_SECTION`] when empty.
pub fn inline_vars(tokens: &[&Token], limit: usize) -> String {
    if tokens.is_empty() {
        return EMPTY_SECTION.to_string();
    }
    first_n(tokens, limit).iter().map(|t| format!("`{}`", t.css_var)).collect::<Vec<_>>().join(", ")
}

/// Bulleted `- `--var`: value` lines, truncated; [`EMPTY_SECTION`] when empty.
pub fn bullet_vars(tokens: &[&Token], limit: usize) -> String {
    if tokens.is_empty() {
        return EMPTY_SECTION.to_string();
    }
    first_n(tokens, limit)
        .iter()
        .map(|t| format!("- `{}`: {}", t.css_var, t.value.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn linked_tokens(linked: &[String]) -> String {
    if linked.is_empty() {
        return EMPTY_LINKED_TOKENS.to_string();
    }
    linked.iter().map(|t| format!("`{t}`")).collect::<Vec<_>>().join(", ")
}

pub fn or_missing(text: Option<&str>) -> &str {
    text.filter(|t| !t.trim().is_empty()).unwrap_or(MISSING_TEXT)
}

pub fn or_none(items: &[String]) -> String {
    if items.is_empty() { EMPTY_SECTION.to_string() } else { items.join(", ") }
}
