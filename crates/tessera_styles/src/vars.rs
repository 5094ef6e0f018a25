//! CSS variable maps and the vars resolver protocol
//!
//! A vars resolver is a pure function `(theme, resolved props) -> CssVars`.
//! Entries may be `None`, meaning "this resolver has no value here". `None`
//! entries are dropped before rendering and never replace a value set by an
//! earlier layer.
//!
//! ```rust
//! use tessera_styles::{get_size, CssVars, VarsResolver};
//!
//! let resolver = VarsResolver::new(|_theme, props| {
//!     CssVars::new()
//!         .with("root", "--badge-height", get_size(props.get("size"), "badge-height"))
//!         .with("root", "--badge-color", props.str("color").map(str::to_string))
//! });
//! # let _ = resolver;
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use tessera_core::{format_number, length, rem, InlineStyle, PropValue};
use tessera_theme::{ScaleKind, SizeToken, Theme};

use crate::props::ResolvedProps;

/// `selector -> (variable -> value)`; `None` values are "unset"
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CssVars(IndexMap<String, IndexMap<String, Option<String>>>);

impl CssVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`CssVars::set`]
    pub fn with<V: Into<String>>(
        mut self,
        selector: impl Into<String>,
        name: impl Into<String>,
        value: Option<V>,
    ) -> Self {
        self.set(selector, name, value);
        self
    }

    pub fn set<V: Into<String>>(
        &mut self,
        selector: impl Into<String>,
        name: impl Into<String>,
        value: Option<V>,
    ) {
        self.0
            .entry(selector.into())
            .or_default()
            .insert(name.into(), value.map(Into::into));
    }

    /// Defined value of one variable
    pub fn get(&self, selector: &str, name: &str) -> Option<&str> {
        self.0.get(selector)?.get(name)?.as_deref()
    }

    /// Layer `other` on top; its `None` entries leave existing values alone
    pub fn merge(&mut self, other: &CssVars) {
        for (selector, vars) in &other.0 {
            let target = self.0.entry(selector.clone()).or_default();
            for (name, value) in vars {
                match value {
                    Some(value) => {
                        target.insert(name.clone(), Some(value.clone()));
                    }
                    None => {
                        target.entry(name.clone()).or_insert(None);
                    }
                }
            }
        }
    }

    /// Defined variables of one selector as an inline style
    pub fn for_selector(&self, selector: &str) -> InlineStyle {
        self.0
            .get(selector)
            .into_iter()
            .flatten()
            .filter_map(|(name, value)| value.as_ref().map(|v| (name.clone(), v.clone())))
            .collect()
    }

    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Hash for CssVars {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut entries: Vec<_> = self
            .0
            .iter()
            .flat_map(|(selector, vars)| vars.iter().map(move |(name, value)| (selector, name, value)))
            .collect();
        entries.sort();
        entries.hash(state);
    }
}

type ResolverFn = dyn Fn(&Theme, &ResolvedProps) -> CssVars + Send + Sync;

/// Shareable vars resolver
#[derive(Clone)]
pub struct VarsResolver(Arc<ResolverFn>);

impl VarsResolver {
    pub fn new<F>(resolver: F) -> Self
    where
        F: Fn(&Theme, &ResolvedProps) -> CssVars + Send + Sync + 'static,
    {
        Self(Arc::new(resolver))
    }

    /// Resolver that always returns `vars`, used for configuration files
    pub fn constant(vars: CssVars) -> Self {
        Self::new(move |_, _| vars.clone())
    }

    pub fn resolve(&self, theme: &Theme, props: &ResolvedProps) -> CssVars {
        (self.0)(theme, props)
    }
}

impl fmt::Debug for VarsResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VarsResolver(..)")
    }
}

// ============================================================================
// Size helpers
// ============================================================================

/// Resolve a size prop against a variable prefix.
///
/// - scale keys (`"sm"`) become `var(--{prefix}-sm)`
/// - numbers and number-like strings become scale-aware rem lengths
/// - anything else (`"2em"`, `"calc(...)"`) passes through verbatim
pub fn get_size(value: Option<&PropValue>, prefix: &str) -> Option<String> {
    match value? {
        PropValue::Number(n) => Some(rem(*n)),
        PropValue::Str(s) if SizeToken::parse(s).is_some() => Some(format!("var(--{prefix}-{s})")),
        PropValue::Str(s) => Some(length(s)),
        _ => None,
    }
}

fn theme_scale(value: Option<&PropValue>, kind: ScaleKind) -> Option<String> {
    match value? {
        PropValue::Str(s) => match SizeToken::parse(s) {
            Some(token) => Some(format!("var({})", kind.var_name(token))),
            None => Some(length(s)),
        },
        PropValue::Number(n) => Some(rem(*n)),
        _ => None,
    }
}

/// `"md"` -> `var(--tessera-spacing-md)`
pub fn get_spacing(value: Option<&PropValue>) -> Option<String> {
    theme_scale(value, ScaleKind::Spacing)
}

/// `"md"` -> `var(--tessera-radius-md)`
pub fn get_radius(value: Option<&PropValue>) -> Option<String> {
    theme_scale(value, ScaleKind::Radius)
}

/// `"md"` -> `var(--tessera-font-size-md)`
pub fn get_font_size(value: Option<&PropValue>) -> Option<String> {
    theme_scale(value, ScaleKind::FontSize)
}

/// Line heights are unitless: numbers pass through instead of becoming rem
pub fn get_line_height(value: Option<&PropValue>) -> Option<String> {
    match value? {
        PropValue::Number(n) => Some(format_number(*n)),
        PropValue::Str(s) => match SizeToken::parse(s) {
            Some(token) => Some(format!("var({})", ScaleKind::LineHeight.var_name(token))),
            None => Some(s.clone()),
        },
        _ => None,
    }
}
