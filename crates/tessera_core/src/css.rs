//! CSS helpers shared by the theme and the styles engine

use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::value::format_number;

/// Inline style map: CSS property (or custom property) to value.
///
/// Merging is shallow and left to right; later keys win.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct InlineStyle(IndexMap<String, String>);

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.0.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.0.contains_key(property)
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        self.0.shift_remove(property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shallow-merge `other` into `self`; keys in `other` win
    pub fn extend(&mut self, other: &InlineStyle) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Shallow-merge a sequence of styles left to right
    pub fn merged<'a>(layers: impl IntoIterator<Item = &'a InlineStyle>) -> InlineStyle {
        let mut out = InlineStyle::new();
        for layer in layers {
            out.extend(layer);
        }
        out
    }

    /// Render as declarations: `a: b; c: d`
    pub fn to_declarations(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Hash for InlineStyle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort();
        entries.hash(state);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InlineStyle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = InlineStyle::new();
        for (k, v) in iter {
            style.set(k, v);
        }
        style
    }
}

/// Convert a pixel length to a scale-aware `rem` expression
///
/// ```rust
/// assert_eq!(tessera_core::rem(16.0), "calc(1rem * var(--tessera-scale))");
/// ```
pub fn rem(px: f64) -> String {
    format!("calc({}rem * var(--tessera-scale))", format_number(px / 16.0))
}

/// Normalize a length: bare numbers and `px` values become [`rem`]
/// expressions; anything else (`2em`, `50%`, `calc(...)`) is kept verbatim.
pub fn length(value: &str) -> String {
    let trimmed = value.trim();
    if let Ok(px) = trimmed.parse::<f64>() {
        return rem(px);
    }
    if let Some(px) = trimmed.strip_suffix("px").and_then(|n| n.trim().parse::<f64>().ok()) {
        return rem(px);
    }
    trimmed.to_string()
}

/// Join class tokens with single spaces, skipping absent and blank parts
pub fn join_classes<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `ScrollArea` -> `scroll-area`
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '_' || ch == ' ' {
            out.push('-');
        } else {
            out.push(ch);
        }
    }
    out
}
