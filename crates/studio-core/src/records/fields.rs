//! Typed field access over an untyped payload
//!
//! Each accessor accepts a value only when it has the right JSON shape and
//! otherwise returns the caller's default. Nested objects are read through
//! another `Fields` view, so their sub-fields get the same treatment.

use serde_json::{Map, Value};

/// Read-only, type-checking view over an optional JSON object
#[derive(Debug, Clone, Copy, Default)]
pub struct Fields<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Fields<'a> {
    /// View over an object, or over nothing
    #[inline]
    #[must_use]
    pub fn new(map: Option<&'a Map<String, Value>>) -> Self {
        Self { map }
    }

    /// View over a value that may or may not be an object
    #[inline]
    #[must_use]
    pub fn of(value: &'a Value) -> Self {
        Self::new(value.as_object())
    }

    /// Check if the view has an underlying object
    #[inline]
    #[must_use]
    pub fn is_object(&self) -> bool {
        self.map.is_some()
    }

    /// Raw value of a field
    #[inline]
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.map.and_then(|map| map.get(key))
    }

    /// String field, or `default`
    #[must_use]
    pub fn text(&self, key: &str, default: &str) -> String {
        self.raw(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    /// Non-negative count, or `default`
    ///
    /// Fractional values are rounded; negative or non-numeric values are
    /// rejected.
    #[must_use]
    pub fn count(&self, key: &str, default: u32) -> u32 {
        self.raw(key).and_then(as_count).unwrap_or(default)
    }

    /// Signed score, or `default`
    ///
    /// Fractional values are rounded; no range is enforced.
    #[must_use]
    pub fn score(&self, key: &str, default: i64) -> i64 {
        self.raw(key).and_then(as_score).unwrap_or(default)
    }

    /// List of strings, empty unless the field is an array
    ///
    /// Elements that are not strings are skipped.
    #[must_use]
    pub fn strings(&self, key: &str) -> Vec<String> {
        self.raw(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Nested object view; empty view if the field is missing or not an object
    #[inline]
    #[must_use]
    pub fn nested(&self, key: &str) -> Fields<'a> {
        Fields::new(self.raw(key).and_then(Value::as_object))
    }

    /// Object elements of a list field, each as its own view
    ///
    /// Non-object elements are skipped.
    pub fn objects(&self, key: &str) -> impl Iterator<Item = Fields<'a>> + 'a {
        self.raw(key)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_object)
            .map(|map| Fields::new(Some(map)))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn as_count(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    let f = value.as_f64()?;
    if f.is_finite() && f >= 0.0 && f.round() <= f64::from(u32::MAX) {
        Some(f.round() as u32)
    } else {
        None
    }
}

#[allow(clippy::cast_possible_truncation)]
fn as_score(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.abs() < 9.0e15 {
        Some(f.round() as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_accepts_only_strings() {
        let value = json!({"a": "x", "b": 5, "c": null});
        let fields = Fields::of(&value);

        assert_eq!(fields.text("a", "d"), "x");
        assert_eq!(fields.text("b", "d"), "d");
        assert_eq!(fields.text("c", "d"), "d");
        assert_eq!(fields.text("missing", ""), "");
    }

    #[test]
    fn count_rejects_non_numeric() {
        let value = json!({"n": 450, "s": "bad", "neg": -3, "f": 812.6, "b": true});
        let fields = Fields::of(&value);

        assert_eq!(fields.count("n", 800), 450);
        assert_eq!(fields.count("s", 800), 800);
        assert_eq!(fields.count("neg", 800), 800);
        assert_eq!(fields.count("f", 800), 813);
        assert_eq!(fields.count("b", 800), 800);
    }

    #[test]
    fn score_keeps_out_of_range_values() {
        let value = json!({"high": 140, "low": -5, "f": 73.4, "s": "74"});
        let fields = Fields::of(&value);

        assert_eq!(fields.score("high", 0), 140);
        assert_eq!(fields.score("low", 0), -5);
        assert_eq!(fields.score("f", 0), 73);
        assert_eq!(fields.score("s", 0), 0);
    }

    #[test]
    fn extreme_numbers_fall_back_or_pass_through() {
        let value = json!({
            "max": i64::MAX,
            "min": i64::MIN,
            "huge": 1e300,
            "u64": u64::MAX,
            "neg_frac": -0.4,
            "wide": 4_294_967_296_u64,
        });
        let fields = Fields::of(&value);

        assert_eq!(fields.count("max", 800), 800);
        assert_eq!(fields.count("min", 800), 800);
        assert_eq!(fields.count("huge", 800), 800);
        assert_eq!(fields.count("u64", 800), 800);
        assert_eq!(fields.count("neg_frac", 800), 800);
        assert_eq!(fields.count("wide", 800), 800);

        assert_eq!(fields.score("max", 0), i64::MAX);
        assert_eq!(fields.score("min", 0), i64::MIN);
        assert_eq!(fields.score("huge", 0), 0);
        assert_eq!(fields.score("u64", 0), 0);
        assert_eq!(fields.score("neg_frac", 0), 0);
    }

    #[test]
    fn strings_require_array() {
        let value = json!({"list": ["a", 1, "b"], "scalar": "a,b"});
        let fields = Fields::of(&value);

        assert_eq!(fields.strings("list"), vec!["a", "b"]);
        assert!(fields.strings("scalar").is_empty());
        assert!(fields.strings("missing").is_empty());
    }

    #[test]
    fn nested_of_non_object_is_empty() {
        let value = json!({"block": "not an object"});
        let fields = Fields::of(&value);

        let nested = fields.nested("block");
        assert!(!nested.is_object());
        assert_eq!(nested.score("score", 0), 0);
    }

    #[test]
    fn objects_skip_non_objects() {
        let value = json!({"items": [{"k": "a"}, "b", {"k": "c"}, 4]});
        let fields = Fields::of(&value);

        let keys: Vec<String> = fields.objects("items").map(|f| f.text("k", "")).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn empty_view_defaults_everything() {
        let fields = Fields::default();
        assert_eq!(fields.text("t", "fallback"), "fallback");
        assert_eq!(fields.count("c", 9), 9);
        assert_eq!(fields.objects("x").count(), 0);
    }
}
