//! Name normalization shared by CSS variable names and slugs.

use regex::Regex;
use std::sync::LazyLock;

use crate::token::Category;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]+").expect("static regex is valid"));

/// Lowercase a segment and collapse every run of non-alphanumeric characters
/// into a single `-`, trimming leading and trailing hyphens.
pub fn normalize_segment(segment: &str) -> String {
    let lower = segment.to_lowercase();
    NON_ALPHANUMERIC.replace_all(&lower, "-").trim_matches('-').to_string()
}

/// Slug for a human-readable name (`"Dark Mode"` → `"dark-mode"`).
pub fn slugify(name: &str) -> String {
    normalize_segment(name)
}

/// Build the CSS custom-property name for a token path.
///
/// The result is `--{category}-{subpath...}-{name}`. A leading path segment
/// that only restates the category (`color`, `colors`, ...) is dropped so
/// `color.btn.primary-bg` becomes `--color-btn-primary-bg` rather than
/// `--color-color-btn-primary-bg`. Segments that normalize to nothing are
/// skipped.
pub fn css_var_name<S: AsRef<str>>(category: Category, segments: &[S]) -> String {
    let mut parts = vec![category.as_str().to_string()];

    let normalized: Vec<String> = segments.iter().map(|s| normalize_segment(s.as_ref())).collect();
    let skip = usize::from(normalized.len() > 1 && category.is_restated_by(&normalized[0]));
    parts.extend(normalized.into_iter().skip(skip).filter(|s| !s.is_empty()));

    format!("--{}", parts.join("-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_segment() {
        assert_eq!(normalize_segment("Primary BG"), "primary-bg");
        assert_eq!(normalize_segment("--Weird__Name--"), "weird-name");
        assert_eq!(normalize_segment("100"), "100");
        assert_eq!(normalize_segment("!!!"), "");
    }

    #[test]
    fn test_css_var_drops_restated_category() {
        assert_eq!(
            css_var_name(Category::Color, &["color", "btn", "primary-bg"]),
            "--color-btn-primary-bg"
        );
        assert_eq!(css_var_name(Category::Color, &["colors", "bg", "base"]), "--color-bg-base");
        assert_eq!(
            css_var_name(Category::Color, &["brand", "primary"]),
            "--color-brand-primary"
        );
    }

    #[test]
    fn test_css_var_single_segment_keeps_name() {
        assert_eq!(css_var_name(Category::Spacing, &["spacing"]), "--spacing-spacing");
        assert_eq!(css_var_name(Category::Other, &["z index"]), "--other-z-index");
    }

    #[test]
    fn test_css_var_skips_empty_segments() {
        assert_eq!(css_var_name(Category::Spacing, &["spacing", "$$", "Sm"]), "--spacing-sm");
    }
}
