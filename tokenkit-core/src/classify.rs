//! Path-based category classification.
//!
//! Classification is an ordered rule table: the lowercased, `/`-joined path is
//! tested against each rule's substrings in turn and the first hit wins. A path
//! containing both `color` and `spacing` is therefore a color token.

use crate::token::Category;

/// One entry of the ordered classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: Category,
    pub patterns: &'static [&'static str],
}

impl CategoryRule {
    pub fn matches(&self, haystack: &str) -> bool {
        self.patterns.iter().any(|p| haystack.contains(p))
    }
}

/// Default rule table, highest priority first.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Color,
        patterns: &["color", "bg", "fg", "button", "btn", "background", "foreground"],
    },
    CategoryRule {
        category: Category::Typography,
        patterns: &["font", "text", "line-height", "lineheight", "letter", "typography"],
    },
    CategoryRule {
        category: Category::Spacing,
        patterns: &["spacing", "space", "gap", "margin", "padding"],
    },
    CategoryRule { category: Category::Layout, patterns: &["breakpoint", "grid", "column", "gutter"] },
    CategoryRule { category: Category::Shadow, patterns: &["shadow", "elevation"] },
    CategoryRule {
        category: Category::Border,
        patterns: &["radius", "corner", "border-radius", "border"],
    },
];

/// Ordered classifier. Cheap to clone; holds only a rule slice.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    rules: &'static [CategoryRule],
}

impl Classifier {
    pub const fn new(rules: &'static [CategoryRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [CategoryRule] {
        self.rules
    }

    /// Classify a path given as segments.
    pub fn classify<S: AsRef<str>>(&self, segments: &[S]) -> Category {
        let joined =
            segments.iter().map(|s| s.as_ref().to_lowercase()).collect::<Vec<_>>().join("/");
        self.classify_str(&joined)
    }

    /// Classify an already-joined path (any separator).
    pub fn classify_str(&self, path: &str) -> Category {
        let haystack = path.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&haystack))
            .map(|rule| rule.category)
            .unwrap_or(Category::Other)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(CATEGORY_RULES)
    }
}

/// Classify a path with the default rule table.
pub fn classify<S: AsRef<str>>(segments: &[S]) -> Category {
    Classifier::default().classify(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_categories() {
        assert_eq!(classify(&["color", "primary"]), Category::Color);
        assert_eq!(classify(&["font", "size", "lg"]), Category::Typography);
        assert_eq!(classify(&["spacing", "sm"]), Category::Spacing);
        assert_eq!(classify(&["breakpoint", "md"]), Category::Layout);
        assert_eq!(classify(&["grid", "columns"]), Category::Layout);
        assert_eq!(classify(&["elevation", "2"]), Category::Shadow);
        assert_eq!(classify(&["radius", "lg"]), Category::Border);
        assert_eq!(classify(&["z-index", "modal"]), Category::Other);
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(classify(&["color", "spacing"]), Category::Color);
        assert_eq!(classify(&["btn", "padding"]), Category::Color);
        assert_eq!(classify(&["text", "shadow"]), Category::Typography);
        assert_eq!(classify(&["gap", "grid"]), Category::Spacing);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify(&["Colors", "Brand"]), Category::Color);
        assert_eq!(Classifier::default().classify_str("Shadow.LG"), Category::Shadow);
    }

    #[test]
    fn test_custom_rules() {
        const RULES: &[CategoryRule] =
            &[CategoryRule { category: Category::Shadow, patterns: &["depth"] }];
        let classifier = Classifier::new(RULES);
        assert_eq!(classifier.classify(&["depth", "1"]), Category::Shadow);
        assert_eq!(classifier.classify(&["color", "1"]), Category::Other);
    }
}
