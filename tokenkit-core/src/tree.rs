//! Helpers for building nested token trees.

use serde_json::{Map, Value};

/// Insert `leaf` into `root` at the nested location named by `segments`,
/// creating intermediate groups as needed.
///
/// A non-object value sitting where a group is needed is replaced by an
/// empty group. An empty `segments` slice is a no-op.
pub fn insert_at_path<S: AsRef<str>>(root: &mut Map<String, Value>, segments: &[S], leaf: Value) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut node = root;
    for segment in parents {
        let entry =
            node.entry(segment.as_ref().to_string()).or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        let Value::Object(map) = entry else {
            return;
        };
        node = map;
    }
    node.insert(last.as_ref().to_string(), leaf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_creates_groups() {
        let mut root = Map::new();
        insert_at_path(&mut root, &["color", "bg", "base"], json!({"$value": "#FFFFFF"}));
        insert_at_path(&mut root, &["color", "fg", "base"], json!({"$value": "#000000"}));
        assert_eq!(
            Value::Object(root),
            json!({
                "color": {
                    "bg": { "base": { "$value": "#FFFFFF" } },
                    "fg": { "base": { "$value": "#000000" } }
                }
            })
        );
    }

    #[test]
    fn test_insert_empty_path_is_noop() {
        let mut root = Map::new();
        insert_at_path::<&str>(&mut root, &[], json!(1));
        assert!(root.is_empty());
    }
}
