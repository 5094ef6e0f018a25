//! Dynamic prop values
//!
//! Components, theme overrides, and configuration files all describe props
//! with the same small value vocabulary. [`PropMap`] is an ordered map of
//! those values with the layering rule the prop pipeline relies on:
//! a later layer replaces a key only when it actually carries a value.
//!
//! [`PropValue::Unset`] marks a key that a caller mentioned without giving it
//! a value. It is treated exactly like an absent key: merging skips it and
//! lookups never return it.

use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::Deserialize;

/// A single prop value
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawPropValue")]
pub enum PropValue {
    /// Mentioned but not provided; never overrides a lower layer
    Unset,
    Bool(bool),
    Number(f64),
    Str(String),
    List(Vec<PropValue>),
    /// Nested map, used for responsive values such as `{ base = 1, sm = 2 }`
    Map(IndexMap<String, PropValue>),
}

impl PropValue {
    /// Whether this value carries something
    pub fn is_set(&self) -> bool {
        !matches!(self, PropValue::Unset)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric value, also accepting number-like strings such as `"12"`
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            PropValue::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PropValue]> {
        match self {
            PropValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, PropValue>> {
        match self {
            PropValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Whether the value is a number or a string that parses as one
    pub fn is_number_like(&self) -> bool {
        self.as_number().is_some()
    }

    /// Render as an attribute value, if the value has a scalar form.
    ///
    /// `false` and `Unset` have no attribute form.
    pub fn to_attribute(&self) -> Option<String> {
        match self {
            PropValue::Bool(true) => Some("true".to_string()),
            PropValue::Number(n) => Some(format_number(*n)),
            PropValue::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Format a number without a trailing `.0` for integral values
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl Hash for PropValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            PropValue::Unset => {}
            PropValue::Bool(b) => b.hash(state),
            PropValue::Number(n) => n.to_bits().hash(state),
            PropValue::Str(s) => s.hash(state),
            PropValue::List(items) => items.hash(state),
            PropValue::Map(map) => hash_unordered(map.iter(), state),
        }
    }
}

/// Hash map entries independently of insertion order, so maps that compare
/// equal also hash equal.
fn hash_unordered<'a, H: Hasher>(
    entries: impl Iterator<Item = (&'a String, &'a PropValue)>,
    state: &mut H,
) {
    let mut entries: Vec<_> = entries.collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries.len().hash(state);
    for (key, value) in entries {
        key.hash(state);
        value.hash(state);
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPropValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<PropValue>),
    Map(IndexMap<String, PropValue>),
}

impl From<RawPropValue> for PropValue {
    fn from(raw: RawPropValue) -> Self {
        match raw {
            RawPropValue::Bool(b) => PropValue::Bool(b),
            RawPropValue::Int(i) => PropValue::Number(i as f64),
            RawPropValue::Float(f) => PropValue::Number(f),
            RawPropValue::Str(s) => PropValue::Str(s),
            RawPropValue::List(items) => PropValue::List(items),
            RawPropValue::Map(map) => PropValue::Map(map),
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<f32> for PropValue {
    fn from(value: f32) -> Self {
        PropValue::Number(value as f64)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Number(value as f64)
    }
}

impl From<u32> for PropValue {
    fn from(value: u32) -> Self {
        PropValue::Number(value as f64)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}

impl<T: Into<PropValue>> From<Vec<T>> for PropValue {
    fn from(items: Vec<T>) -> Self {
        PropValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(PropValue::Unset)
    }
}

impl From<IndexMap<String, PropValue>> for PropValue {
    fn from(map: IndexMap<String, PropValue>) -> Self {
        PropValue::Map(map)
    }
}

/// Ordered map of prop name to value
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct PropMap(IndexMap<String, PropValue>);

impl PropMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Mention a key without giving it a value
    pub fn unset(mut self, key: impl Into<String>) -> Self {
        self.0.insert(key.into(), PropValue::Unset);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.0.shift_remove(key)
    }

    /// Look up a key; `Unset` entries read as absent
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key).filter(|v| v.is_set())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropValue::as_str)
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(PropValue::as_bool)
    }

    /// Boolean flag that defaults to `false`
    pub fn flag(&self, key: &str) -> bool {
        self.bool(key).unwrap_or(false)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(PropValue::as_number)
    }

    /// Iterate over entries that carry a value
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0
            .iter()
            .filter(|(_, v)| v.is_set())
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Layer `other` on top of `self`: keys `other` sets win, keys it leaves
    /// absent or `Unset` keep their value from `self`.
    pub fn merge(&self, other: &PropMap) -> PropMap {
        let mut merged = self.clone();
        merged.merge_from(other);
        merged
    }

    /// In-place form of [`PropMap::merge`]
    pub fn merge_from(&mut self, other: &PropMap) {
        for (key, value) in other.iter() {
            self.0.insert(key.to_string(), value.clone());
        }
    }

    /// Merge a stack of layers, lowest precedence first
    pub fn layered<'a>(layers: impl IntoIterator<Item = &'a PropMap>) -> PropMap {
        let mut merged = PropMap::new();
        for layer in layers {
            merged.merge_from(layer);
        }
        merged
    }
}

impl Hash for PropMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_unordered(self.0.iter().filter(|(_, v)| v.is_set()), state);
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for PropMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PropMap::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

/// Build a [`PropMap`] from `key => value` pairs
///
/// ```rust
/// use tessera_core::props;
///
/// let p = props! { "size" => "md", "disabled" => true };
/// assert_eq!(p.str("size"), Some("md"));
/// ```
#[macro_export]
macro_rules! props {
    () => { $crate::PropMap::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::PropMap::new();
        $( map.set($key, $value); )+
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_later_layer_wins() {
        let base = props! { "size" => "sm", "color" => "blue" };
        let top = props! { "size" => "lg" };
        let merged = base.merge(&top);

        assert_eq!(merged.str("size"), Some("lg"));
        assert_eq!(merged.str("color"), Some("blue"));
    }

    #[test]
    fn test_unset_never_erases() {
        let base = props! { "size" => "md" };
        let top = PropMap::new().unset("size");

        assert_eq!(base.merge(&top).str("size"), Some("md"));
        assert!(!top.contains("size"));
        assert!(top.is_empty());
    }

    #[test]
    fn test_layered_drops_unset_leftovers() {
        let only_unset = PropMap::new().unset("radius");
        let merged = PropMap::layered([&PropMap::new(), &only_unset]);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_hash_ignores_insertion_order() {
        let a = props! { "a" => 1, "b" => 2 };
        let b = props! { "b" => 2, "a" => 1 };
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_option_into_prop_value() {
        let none: Option<&str> = None;
        let map = props! { "x" => none, "y" => Some("set") };
        assert!(map.get("x").is_none());
        assert_eq!(map.str("y"), Some("set"));
    }

    #[test]
    fn test_number_like_strings() {
        assert_eq!(PropValue::from("12").as_number(), Some(12.0));
        assert!(!PropValue::from("sm").is_number_like());
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(0.5), "0.5");
    }

    #[test]
    fn test_deserialize_from_toml() {
        let map: PropMap = toml::from_str(
            r#"
            size = "md"
            radius = 4
            block = true
            cols = { base = 1, sm = 2 }
            "#,
        )
        .unwrap();

        assert_eq!(map.str("size"), Some("md"));
        assert_eq!(map.number("radius"), Some(4.0));
        assert_eq!(map.bool("block"), Some(true));
        let cols = map.get("cols").and_then(PropValue::as_map).unwrap();
        assert_eq!(cols.get("sm"), Some(&PropValue::Number(2.0)));
    }
}
