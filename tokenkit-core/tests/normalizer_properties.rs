use proptest::prelude::*;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use tokenkit_core::{Category, css_var_name, classify, normalize_segment, normalize_token_tree};

fn segment() -> impl Strategy<Value = String> {
    prop_oneof!["[a-z]{1,8}", "[A-Za-z0-9 _-]{1,10}", Just("color".to_string()), Just("btn".to_string())]
}

fn path() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(segment(), 1..5)
}

fn nested_tree() -> impl Strategy<Value = Value> {
    prop::collection::vec((path(), 0u32..100), 0..12).prop_map(|entries| {
        let mut root = Map::new();
        for (path, n) in entries {
            tokenkit_core::tree::insert_at_path(&mut root, &path, json!({ "$type": "number", "$value": n }));
        }
        Value::Object(root)
    })
}

proptest! {
    #[test]
    fn normalization_is_idempotent(tree in nested_tree()) {
        let first = normalize_token_tree(&tree);
        let second = normalize_token_tree(&tree);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn css_var_is_deterministic(path in path()) {
        let category = classify(&path);
        prop_assert_eq!(css_var_name(category, &path), css_var_name(category, &path));
    }

    #[test]
    fn distinct_normalized_paths_never_collide(
        paths in prop::collection::vec(prop::collection::vec("[a-z0-9]{1,6}", 1..4), 1..20)
    ) {
        let mut seen: HashMap<String, Vec<String>> = HashMap::new();
        for path in &paths {
            let category = classify(path);
            let mut key: Vec<String> = path.iter().map(|s| normalize_segment(s)).collect();
            let restated = key[0] == category.as_str() || key[0] == format!("{}s", category.as_str());
            if key.len() > 1 && restated {
                key.remove(0);
            }
            key.insert(0, category.as_str().to_string());

            let name = css_var_name(category, path);
            match seen.get(&name) {
                Some(previous) => prop_assert_eq!(previous, &key),
                None => {
                    prop_assert!(!seen.values().any(|k| k == &key));
                    seen.insert(name, key);
                }
            }
        }
    }

    #[test]
    fn color_patterns_win_over_later_categories(
        prefix in "[a-z]{0,4}",
        later in prop::sample::select(vec!["spacing", "font", "shadow", "radius", "grid", "border"]),
    ) {
        let path = vec![format!("{prefix}color"), later.to_string()];
        prop_assert_eq!(classify(&path), Category::Color);
    }
}

#[test]
fn category_priority_examples() {
    assert_eq!(classify(&["spacing", "color-gap"]), Category::Color);
    assert_eq!(classify(&["font", "spacing"]), Category::Typography);
    assert_eq!(classify(&["grid", "gutter"]), Category::Layout);
    assert_eq!(classify(&["gap", "breakpoint"]), Category::Spacing);
    assert_eq!(classify(&["shadow", "border"]), Category::Shadow);
    assert_eq!(classify(&["border", "radius"]), Category::Border);
    assert_eq!(classify(&["opacity", "muted"]), Category::Other);
}
