//! Changed-fields differ backing every edit form.
//!
//! Edit flows load a record, let the admin change some fields, then send only
//! the fields that actually changed. Comparing is structural: two values are
//! equal when their JSON representations are equal, so a nested array rebuilt
//! with identical contents is correctly treated as unchanged.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::CoreError;

/// A minimal patch: only the keys whose values differ, carrying the new values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch(Map<String, Value>);

impl Patch {
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Removes a key from the patch, returning its value if present.
    ///
    /// Used by the product-save flow to strip the `videos` key after the
    /// video sub-flow has handled it.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Patch {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Compares two flat JSON objects and returns the keys of `current` whose
/// values differ from `initial`, with their new values.
///
/// Iteration is driven by `current`: a key present only in `initial` is not
/// reported (the form can only submit fields it renders). `diff(r, r)` is
/// always empty.
#[must_use]
pub fn diff(initial: &Map<String, Value>, current: &Map<String, Value>) -> Patch {
    let mut changed = Map::new();
    for (key, value) in current {
        if initial.get(key) != Some(value) {
            changed.insert(key.clone(), value.clone());
        }
    }
    Patch(changed)
}

/// Serializes both records to JSON objects and diffs them.
///
/// # Errors
///
/// - [`CoreError::Serialize`] if either record fails to serialize.
/// - [`CoreError::NonObjectRecord`] if either record serializes to something
///   other than a JSON object (e.g. a bare array or scalar).
pub fn diff_records<T: Serialize>(initial: &T, current: &T) -> Result<Patch, CoreError> {
    let initial = to_object(initial)?;
    let current = to_object(current)?;
    Ok(diff(&initial, &current))
}

fn to_object<T: Serialize>(record: &T) -> Result<Map<String, Value>, CoreError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        _ => Err(CoreError::NonObjectRecord),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn identical_records_produce_empty_patch() {
        let record = obj(json!({"status": "active", "stock": 4}));
        assert!(diff(&record, &record).is_empty());
    }

    #[test]
    fn only_changed_keys_are_reported_with_new_values() {
        let initial = obj(json!({"status": "active", "stock": 4, "price": 120_000}));
        let current = obj(json!({"status": "archived", "stock": 4, "price": 120_000}));
        let patch = diff(&initial, &current);
        assert_eq!(patch.len(), 1);
        assert_eq!(patch.get("status"), Some(&json!("archived")));
    }

    #[test]
    fn key_missing_from_initial_counts_as_changed() {
        let initial = obj(json!({"status": "active"}));
        let current = obj(json!({"status": "active", "videos": ["intro.mp4"]}));
        let patch = diff(&initial, &current);
        assert_eq!(patch.len(), 1);
        assert_eq!(patch.get("videos"), Some(&json!(["intro.mp4"])));
    }

    #[test]
    fn nested_values_are_compared_structurally() {
        // A rebuilt array with identical contents must not be reported.
        let initial = obj(json!({"images": ["a.webp", "b.webp"], "name": {"vi": "Hoa", "en": "Flower"}}));
        let current = obj(json!({"images": ["a.webp", "b.webp"], "name": {"vi": "Hoa", "en": "Flower"}}));
        assert!(diff(&initial, &current).is_empty());

        let edited = obj(json!({"images": ["a.webp"], "name": {"vi": "Hoa", "en": "Flower"}}));
        let patch = diff(&initial, &edited);
        assert_eq!(patch.len(), 1);
        assert!(patch.contains("images"));
    }

    #[test]
    fn rediffing_after_apply_is_stable() {
        let initial = obj(json!({"status": "active", "stock": 4}));
        let current = obj(json!({"status": "archived", "stock": 9}));

        let patch = diff(&initial, &current);

        // Apply the patch to the initial record, then diff against the same
        // current record again: nothing further should change.
        let mut applied = initial.clone();
        for (k, v) in patch.as_map() {
            applied.insert(k.clone(), v.clone());
        }
        assert!(diff(&applied, &current).is_empty());
    }

    #[test]
    fn diff_records_rejects_non_object() {
        let result = diff_records(&vec![1, 2], &vec![1, 2, 3]);
        assert!(matches!(result, Err(CoreError::NonObjectRecord)));
    }

    #[test]
    fn diff_records_serializes_structs() {
        #[derive(Serialize)]
        struct Form {
            status: String,
            stock: i64,
        }

        let initial = Form {
            status: "active".into(),
            stock: 4,
        };
        let current = Form {
            status: "active".into(),
            stock: 12,
        };
        let patch = diff_records(&initial, &current).expect("structs serialize to objects");
        assert_eq!(patch.len(), 1);
        assert_eq!(patch.get("stock"), Some(&json!(12)));
    }
}
