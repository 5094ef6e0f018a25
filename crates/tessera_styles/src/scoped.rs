//! Scoped responsive variables
//!
//! Components whose CSS variables depend on the viewport or container width
//! cannot express them as inline styles. Instead they mint a
//! [`ScopedSelector`] (a random class token), build [`ResponsiveRules`] for
//! it and inject them into the provider's [`StyleSheet`]. The returned
//! [`ScopedStyle`] guard keeps the rule registered; dropping it removes the
//! rule and frees the token.
//!
//! ```rust
//! use std::sync::Arc;
//! use tessera_styles::{BreakpointQuery, ResponsiveRules, StyleSheet};
//!
//! let sheet = Arc::new(StyleSheet::new());
//! let selector = sheet.mint_scoped_selector();
//!
//! let rules = ResponsiveRules::new(BreakpointQuery::Media)
//!     .base("--cols", "1")
//!     .at(768.0, "--cols", "3");
//!
//! let guard = sheet.inject_rule(&selector, &rules);
//! assert!(sheet.to_css().contains("@media (min-width: 48em)"));
//!
//! drop(guard);
//! assert!(sheet.is_empty());
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tessera_core::{format_number, PropValue};
use tessera_theme::Theme;

const TOKEN_PREFIX: &str = "tsr-";

/// Process-unique class token, e.g. `tsr-9f3c27a1d04b5e86`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopedSelector(String);

impl ScopedSelector {
    /// Class token without the leading dot
    pub fn class_name(&self) -> &str {
        &self.0
    }

    /// `.tsr-...`
    pub fn css_selector(&self) -> String {
        format!(".{}", self.0)
    }
}

impl fmt::Display for ScopedSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which width the breakpoints compare against
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BreakpointQuery {
    /// Viewport width, `@media (min-width: ...)`
    #[default]
    Media,
    /// Container width, `@container [name] (min-width: ...)`
    Container(Option<String>),
}

/// Breakpoint-conditional custom property assignments
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResponsiveRules {
    query: BreakpointQuery,
    base: IndexMap<String, String>,
    /// Sorted by min width
    breakpoints: Vec<(f64, IndexMap<String, String>)>,
}

impl ResponsiveRules {
    pub fn new(query: BreakpointQuery) -> Self {
        Self {
            query,
            ..Default::default()
        }
    }

    /// Unconditional assignment
    pub fn base(mut self, var: impl Into<String>, value: impl Into<String>) -> Self {
        self.base.insert(var.into(), value.into());
        self
    }

    /// Assignment applied from `min_width_px` up
    pub fn at(mut self, min_width_px: f64, var: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_at(min_width_px, var.into(), value.into());
        self
    }

    fn insert_at(&mut self, min_width_px: f64, var: String, value: String) {
        let pos = self
            .breakpoints
            .iter()
            .position(|(px, _)| *px >= min_width_px);
        match pos {
            Some(i) if self.breakpoints[i].0 == min_width_px => {
                self.breakpoints[i].1.insert(var, value);
            }
            Some(i) => {
                self.breakpoints
                    .insert(i, (min_width_px, IndexMap::from([(var, value)])));
            }
            None => {
                self.breakpoints
                    .push((min_width_px, IndexMap::from([(var, value)])));
            }
        }
    }

    /// Add a possibly responsive prop.
    ///
    /// A map value (`{ base = 1, sm = 2, "900px" = 3 }`) contributes its
    /// `base` entry unconditionally and every other key at that breakpoint;
    /// keys that are not breakpoints are skipped. A scalar value is a base
    /// assignment. `convert` turns each value into CSS; `None` skips it.
    pub fn add_prop(
        &mut self,
        theme: &Theme,
        var: &str,
        value: &PropValue,
        convert: impl Fn(&PropValue) -> Option<String>,
    ) {
        match value {
            PropValue::Map(entries) => {
                for (key, value) in entries {
                    let Some(css) = convert(value) else { continue };
                    if key == "base" {
                        self.base.insert(var.to_string(), css);
                    } else if let Some(px) = theme.breakpoint_px(key) {
                        self.insert_at(px, var.to_string(), css);
                    } else {
                        tracing::debug!("ResponsiveRules::add_prop - unknown breakpoint {key:?} for {var}");
                    }
                }
            }
            other => {
                if let Some(css) = convert(other) {
                    self.base.insert(var.to_string(), css);
                }
            }
        }
    }

    /// Whether any assignment depends on a breakpoint
    pub fn is_responsive(&self) -> bool {
        !self.breakpoints.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.breakpoints.is_empty()
    }

    /// Unconditional assignments
    pub fn base_vars(&self) -> &IndexMap<String, String> {
        &self.base
    }

    /// Rule block scoped to `selector`
    pub fn to_css(&self, selector: &ScopedSelector) -> String {
        let scope = selector.css_selector();
        let mut blocks = Vec::new();

        if !self.base.is_empty() {
            blocks.push(format!("{scope} {{ {} }}", declarations(&self.base)));
        }
        for (px, vars) in &self.breakpoints {
            let width = format!("(min-width: {}em)", format_number(px / 16.0));
            let query = match &self.query {
                BreakpointQuery::Media => format!("@media {width}"),
                BreakpointQuery::Container(Some(name)) => format!("@container {name} {width}"),
                BreakpointQuery::Container(None) => format!("@container {width}"),
            };
            blocks.push(format!("{query} {{ {scope} {{ {} }} }}", declarations(vars)));
        }
        blocks.join("\n")
    }
}

fn declarations(vars: &IndexMap<String, String>) -> String {
    vars.iter()
        .map(|(k, v)| format!("{k}: {v};"))
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// StyleSheet
// ============================================================================

#[derive(Debug)]
struct RuleEntry {
    css: String,
    refs: usize,
}

#[derive(Debug, Default)]
struct SheetState {
    minted: FxHashSet<String>,
    rules: IndexMap<String, RuleEntry>,
}

/// Shared stylesheet holding scoped rule blocks
#[derive(Debug, Default)]
pub struct StyleSheet {
    state: Mutex<SheetState>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a token no live instance is using (64 random bits)
    pub fn mint_scoped_selector(&self) -> ScopedSelector {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            let token = format!("{TOKEN_PREFIX}{:016x}", rand::random::<u64>());
            if state.minted.insert(token.clone()) {
                return ScopedSelector(token);
            }
            tracing::debug!("StyleSheet::mint_scoped_selector - token collision, re-rolling");
        }
    }

    /// Register `rules` under `selector`. Injecting the same selector again
    /// replaces its CSS and adds a reference; the rule is removed once every
    /// returned guard is dropped.
    pub fn inject_rule(self: &Arc<Self>, selector: &ScopedSelector, rules: &ResponsiveRules) -> ScopedStyle {
        let css = rules.to_css(selector);
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.minted.insert(selector.0.clone());
        let entry = state
            .rules
            .entry(selector.0.clone())
            .or_insert(RuleEntry { css: String::new(), refs: 0 });
        entry.css = css;
        entry.refs += 1;
        tracing::debug!(
            "StyleSheet::inject_rule - {} ({} refs)",
            selector,
            entry.refs
        );

        ScopedStyle {
            sheet: Arc::downgrade(self),
            selector: selector.clone(),
        }
    }

    /// Drop one reference to `selector`'s rule. Returns whether a rule was
    /// registered; removing an unknown selector is a no-op.
    pub fn remove_rule(&self, selector: &ScopedSelector) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(entry) = state.rules.get_mut(&selector.0) else {
            return false;
        };
        entry.refs = entry.refs.saturating_sub(1);
        if entry.refs == 0 {
            state.rules.shift_remove(&selector.0);
            state.minted.remove(&selector.0);
            tracing::debug!("StyleSheet::remove_rule - {selector} removed");
        }
        true
    }

    /// Free a minted token that never had a rule injected
    pub fn release_selector(&self, selector: &ScopedSelector) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !state.rules.contains_key(&selector.0) {
            state.minted.remove(&selector.0);
        }
    }

    pub fn contains(&self, selector: &ScopedSelector) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .rules
            .contains_key(&selector.0)
    }

    /// Number of registered rule blocks
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .rules
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every registered rule block, in injection order
    pub fn to_css(&self) -> String {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state
            .rules
            .values()
            .map(|entry| entry.css.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Registration guard for one injected rule
#[derive(Debug)]
pub struct ScopedStyle {
    sheet: Weak<StyleSheet>,
    selector: ScopedSelector,
}

impl ScopedStyle {
    pub fn selector(&self) -> &ScopedSelector {
        &self.selector
    }

    pub fn class_name(&self) -> &str {
        self.selector.class_name()
    }
}

impl Drop for ScopedStyle {
    fn drop(&mut self) {
        if let Some(sheet) = self.sheet.upgrade() {
            sheet.remove_rule(&self.selector);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_token_format() {
        let sheet = StyleSheet::new();
        let token = sheet.mint_scoped_selector();
        assert!(token.class_name().starts_with("tsr-"));
        assert_eq!(token.class_name().len(), 4 + 16);
        assert_eq!(token.css_selector(), format!(".{}", token));
    }

    #[test]
    fn test_rules_css() {
        let selector = ScopedSelector("tsr-test".into());
        let rules = ResponsiveRules::new(BreakpointQuery::Media)
            .base("--cols", "1")
            .at(1200.0, "--cols", "4")
            .at(768.0, "--cols", "2")
            .at(768.0, "--gap", "8px");

        assert_eq!(
            rules.to_css(&selector),
            ".tsr-test { --cols: 1; }\n\
             @media (min-width: 48em) { .tsr-test { --cols: 2; --gap: 8px; } }\n\
             @media (min-width: 75em) { .tsr-test { --cols: 4; } }"
        );
    }

    #[test]
    fn test_container_query() {
        let selector = ScopedSelector("tsr-c".into());
        let rules = ResponsiveRules::new(BreakpointQuery::Container(Some("grid".into())))
            .at(480.0, "--cols", "2");
        assert_eq!(
            rules.to_css(&selector),
            "@container grid (min-width: 30em) { .tsr-c { --cols: 2; } }"
        );
    }

    #[test]
    fn test_add_prop_responsive_map() {
        let theme = Theme::default();
        let value: PropValue = indexmap::IndexMap::from([
            ("base".to_string(), PropValue::from(1)),
            ("sm".to_string(), PropValue::from(2)),
            ("nope".to_string(), PropValue::from(9)),
        ])
        .into();

        let mut rules = ResponsiveRules::new(BreakpointQuery::Media);
        rules.add_prop(&theme, "--cols", &value, |v| v.to_attribute());

        assert!(rules.is_responsive());
        assert_eq!(rules.base_vars().get("--cols").map(String::as_str), Some("1"));
        let css = rules.to_css(&ScopedSelector("tsr-x".into()));
        assert!(css.contains("@media (min-width: 48em) { .tsr-x { --cols: 2; } }"));
        assert!(!css.contains("9"));
    }

    #[test]
    fn test_inject_and_release() {
        let sheet = Arc::new(StyleSheet::new());
        let selector = sheet.mint_scoped_selector();
        let rules = ResponsiveRules::new(BreakpointQuery::Media).base("--a", "1");

        let first = sheet.inject_rule(&selector, &rules);
        let second = sheet.inject_rule(&selector, &rules);
        assert_eq!(sheet.len(), 1);

        drop(first);
        assert!(sheet.contains(&selector));
        drop(second);
        assert!(!sheet.contains(&selector));

        // Idempotent removal
        assert!(!sheet.remove_rule(&selector));
    }

    #[test]
    fn test_guard_outliving_sheet() {
        let sheet = Arc::new(StyleSheet::new());
        let selector = sheet.mint_scoped_selector();
        let guard = sheet.inject_rule(&selector, &ResponsiveRules::default().base("--a", "1"));
        drop(sheet);
        drop(guard);
    }
}
