use proptest::prelude::*;
use tokenkit_core::Slug;
use tokenkit_sync::theme_name_from_file;

proptest! {
    #[test]
    fn derived_slugs_are_url_safe(stem in "[A-Za-z0-9 _.-]{0,24}") {
        let name = theme_name_from_file(&format!("{stem}_tokens.json"));
        prop_assert!(!name.contains('_'));
        if let Some(slug) = Slug::from_name(&name) {
            let slug = slug.as_str();
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
            prop_assert!(!slug.is_empty());
        }
    }

    #[test]
    fn suffix_is_stripped_once(stem in "[a-z]{1,12}") {
        prop_assert_eq!(theme_name_from_file(&format!("{stem}_tokens.json")), stem.clone());
        prop_assert_eq!(theme_name_from_file(&format!("{stem}.json")), stem);
    }
}
