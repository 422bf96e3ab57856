//! Dot-path request trees.
//!
//! Requests are gathered as a flat `path -> value` map and nested into a JSON
//! object just before submission. Paths are split on `.` with no escaping, so
//! a key containing a literal dot cannot be addressed.

use serde_json::{Map, Value};
use tracing::trace;

/// Nested request body, serialized verbatim as the JSON payload.
pub type RequestTree = Map<String, Value>;

/// Insertion-ordered `path -> value` map. Writing an existing path replaces
/// its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatFieldMap {
    entries: Vec<(String, String)>,
}

impl FlatFieldMap {
    pub fn new() -> FlatFieldMap {
        FlatFieldMap::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<String>) {
        let path = path.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == path) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((path, value)),
        }
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, v)| v.as_str())
    }

    /// True when the path is present with a non-empty value.
    pub fn has_value(&self, path: &str) -> bool {
        self.get(path).map(|v| !v.is_empty()).unwrap_or(false)
    }

    pub fn remove(&mut self, path: &str) -> Option<String> {
        let index = self.entries.iter().position(|(p, _)| p == path)?;
        Some(self.entries.remove(index).1)
    }

    /// Copy every entry of `other` over this map.
    pub fn extend_from(&mut self, other: &FlatFieldMap) {
        for (path, value) in other.iter() {
            self.insert(path, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlatFieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FlatFieldMap::new();
        for (path, value) in iter {
            map.insert(path, value);
        }
        map
    }
}

/// Nest a flat map into a request tree.
///
/// Paths are applied in insertion order and the last one wins on structural
/// conflicts: a string leaf standing where a later path needs an object is
/// replaced by an object, and a later shorter path replaces the whole subtree
/// it lands on.
pub fn build_nested_map(flat: &FlatFieldMap) -> RequestTree {
    let mut tree = RequestTree::new();
    for (path, value) in flat.iter() {
        insert_path(&mut tree, path, Value::String(value.to_string()));
    }
    tree
}

/// Set `value` at a dot path, creating intermediate objects as needed.
pub fn insert_path(tree: &mut RequestTree, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    let (last, parents) = match segments.split_last() {
        Some(split) => split,
        None => return,
    };

    let mut node = tree;
    for segment in parents {
        let slot = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            trace!("Replacing leaf at '{}' while inserting '{}'", segment, path);
            *slot = Value::Object(Map::new());
        }
        node = match slot {
            Value::Object(map) => map,
            _ => unreachable!("slot was just made an object"),
        };
    }
    node.insert(last.to_string(), value);
}

/// Read the value at a dot path, if any.
pub fn get_path<'a>(tree: &'a RequestTree, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = tree.get(first)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Deep-merge `overlay` onto `base`.
///
/// Objects on both sides merge key by key; in every other case the overlay
/// value replaces the base value wholesale. Arrays are never merged.
pub fn merge_request(base: RequestTree, overlay: RequestTree) -> RequestTree {
    let mut merged = base;
    for (key, value) in overlay {
        let both_objects = matches!(
            (merged.get(&key), &value),
            (Some(Value::Object(_)), Value::Object(_))
        );
        if !both_objects {
            merged.insert(key, value);
            continue;
        }
        if let (Some(Value::Object(left)), Value::Object(right)) = (merged.get_mut(&key), value) {
            let existing = std::mem::take(left);
            *left = merge_request(existing, right);
        }
    }
    merged
}

/// Flatten a tree back into dot paths.
///
/// Strings are kept as-is, other scalars are rendered as JSON text and arrays
/// are rendered as compact JSON at their own path.
pub fn flatten(tree: &RequestTree) -> FlatFieldMap {
    let mut flat = FlatFieldMap::new();
    flatten_into(&mut flat, "", tree);
    flat
}

fn flatten_into(flat: &mut FlatFieldMap, prefix: &str, tree: &RequestTree) {
    for (key, value) in tree {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(map) => flatten_into(flat, &path, map),
            Value::String(s) => flat.insert(path, s.clone()),
            Value::Null => flat.insert(path, ""),
            other => flat.insert(path, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flat(pairs: &[(&str, &str)]) -> FlatFieldMap {
        pairs.iter().map(|(p, v)| (*p, *v)).collect()
    }

    #[test]
    fn test_build_nested_map() {
        let tree = build_nested_map(&flat(&[
            ("beneficiary.bank_details.account_routing_value1", "021000021"),
            ("beneficiary.bank_details.account_name", "John Doe"),
            ("nickname", "jd"),
        ]));

        assert_eq!(
            Value::Object(tree),
            json!({
                "beneficiary": {"bank_details": {
                    "account_routing_value1": "021000021",
                    "account_name": "John Doe"
                }},
                "nickname": "jd"
            })
        );
    }

    #[test]
    fn test_build_nested_map_deeper_path_replaces_leaf() {
        let tree = build_nested_map(&flat(&[("a.b", "leaf"), ("a.b.c", "deep")]));
        assert_eq!(Value::Object(tree), json!({"a": {"b": {"c": "deep"}}}));
    }

    #[test]
    fn test_build_nested_map_shorter_path_replaces_subtree() {
        let tree = build_nested_map(&flat(&[("a.b.c", "deep"), ("a.b", "leaf")]));
        assert_eq!(Value::Object(tree), json!({"a": {"b": "leaf"}}));
    }

    #[test]
    fn test_flat_map_overwrites_in_place() {
        let mut map = flat(&[("a", "1"), ("b", "2")]);
        map.insert("a", "3");
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("a", "3"), ("b", "2")]);
        assert!(map.has_value("a"));
        map.insert("b", "");
        assert!(!map.has_value("b"));
    }

    #[test]
    fn test_round_trip() {
        let original = flat(&[
            ("beneficiary.entity_type", "PERSONAL"),
            ("beneficiary.bank_details.account_currency", "CAD"),
            ("beneficiary.bank_details.account_routing_type1", "institution_number"),
            ("beneficiary.address.city", "Toronto"),
            ("nickname", "jd"),
        ]);
        let tree = build_nested_map(&original);
        let rebuilt = build_nested_map(&flatten(&tree));
        assert_eq!(tree, rebuilt);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let tree = json!({
            "beneficiary": {"bank_details": {"swift_code": "X"}, "entity_type": "COMPANY"},
            "transfer_methods": ["LOCAL"]
        });
        let tree = tree.as_object().unwrap().clone();
        assert_eq!(merge_request(tree.clone(), tree.clone()), tree);
    }

    #[test]
    fn test_merge_overlay_wins() {
        let base = json!({
            "beneficiary": {"bank_details": {"account_routing_value1": "001", "swift_code": "X"}},
            "transfer_methods": ["LOCAL", "SWIFT"]
        });
        let overlay = json!({
            "beneficiary": {"bank_details": {"account_routing_value1": "OVERRIDE"}},
            "transfer_methods": ["SWIFT"]
        });
        let merged = merge_request(
            base.as_object().unwrap().clone(),
            overlay.as_object().unwrap().clone(),
        );
        assert_eq!(
            Value::Object(merged),
            json!({
                "beneficiary": {"bank_details": {"account_routing_value1": "OVERRIDE", "swift_code": "X"}},
                "transfer_methods": ["SWIFT"]
            })
        );
    }

    #[test]
    fn test_merge_type_mismatch_replaces_subtree() {
        let base = json!({"a": {"b": "1", "c": "2"}});
        let overlay = json!({"a": "flat"});
        let merged = merge_request(
            base.as_object().unwrap().clone(),
            overlay.as_object().unwrap().clone(),
        );
        assert_eq!(Value::Object(merged), json!({"a": "flat"}));
    }

    #[test]
    fn test_get_path() {
        let tree = build_nested_map(&flat(&[("a.b.c", "x")]));
        assert_eq!(get_path(&tree, "a.b.c"), Some(&json!("x")));
        assert!(get_path(&tree, "a.b.d").is_none());
        assert!(get_path(&tree, "a.b.c.d").is_none());
    }
}
