//! Styles API resolver
//!
//! [`create_style_resolver`] folds everything that styles one component
//! instance into a [`StyleResolver`], whose [`StyleResolver::get_styles`]
//! is called once per rendered sub-element (`root`, `icon`, `label`, ...).
//!
//! Class tokens are joined in a fixed order:
//!
//! 1. the component's static class (dropped when the instance or the call's
//!    overrides are `unstyled`)
//! 2. theme `class_names[selector]`
//! 3. instance `class_names[selector]`
//! 4. instance `class_name` (root only)
//! 5. the call's `overrides.class_name`
//!
//! Inline styles are shallow-merged in the same order, starting from the CSS
//! variables for the selector: resolver vars, theme vars, instance vars, then
//! theme `styles`, instance `styles`, instance `style` (root only) and the
//! call's `overrides.style`.
//!
//! ```rust
//! use tessera_core::PropMap;
//! use tessera_styles::{create_style_resolver, ClassNames, ResolvedProps, StyleOverrides, StyleProps, StylesInput};
//! use tessera_theme::Theme;
//!
//! let theme = Theme::default();
//! let classes = ClassNames::new().with("root", "btn-root");
//! let props = ResolvedProps::new(PropMap::new());
//! let style_props = StyleProps::new().class_names("root", "user-root");
//!
//! let resolver = create_style_resolver(StylesInput {
//!     component: "Button",
//!     classes: &classes,
//!     props: &props,
//!     theme: &theme,
//!     theme_override: None,
//!     style_props: &style_props,
//!     vars_resolver: None,
//!     root_selector: None,
//! });
//!
//! let root = resolver.get_styles("root", Some(&StyleOverrides::new().class_name("extra")));
//! assert_eq!(root.class_name, "btn-root user-root extra");
//! ```

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use smallvec::SmallVec;
use tessera_core::{join_classes, InlineStyle};
use tessera_theme::Theme;

use crate::props::{ResolvedProps, StyleProps};
use crate::registry::ThemeOverride;
use crate::vars::{CssVars, VarsResolver};

/// Public selector of every component's root element
pub const ROOT: &str = "root";

/// Ordered `selector -> T` map
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SelectorMap<T>(IndexMap<String, T>);

impl<T> Default for SelectorMap<T> {
    fn default() -> Self {
        Self(IndexMap::new())
    }
}

impl<T> SelectorMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, selector: impl Into<String>, value: impl Into<T>) -> Self {
        self.insert(selector, value);
        self
    }

    pub fn insert(&mut self, selector: impl Into<String>, value: impl Into<T>) {
        self.0.insert(selector.into(), value.into());
    }

    pub fn get(&self, selector: &str) -> Option<&T> {
        self.0.get(selector)
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.0.contains_key(selector)
    }

    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Hash> Hash for SelectorMap<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.hash(state);
    }
}

impl<K: Into<String>, V: Into<T>, T> FromIterator<(K, V)> for SelectorMap<T> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = SelectorMap::new();
        for (selector, value) in iter {
            map.insert(selector, value);
        }
        map
    }
}

/// `selector -> class tokens`
pub type ClassNames = SelectorMap<String>;

/// `selector -> inline style`
pub type Styles = SelectorMap<InlineStyle>;

/// Per-call overrides passed to [`StyleResolver::get_styles`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StyleOverrides {
    pub class_name: Option<String>,
    pub style: InlineStyle,
    /// Drop the static class of this selector only
    pub unstyled: bool,
}

impl StyleOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn style(mut self, style: InlineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn unstyled(mut self, unstyled: bool) -> Self {
        self.unstyled = unstyled;
        self
    }
}

/// Class/style pair for one rendered element
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SelectorStyle {
    pub class_name: String,
    pub style: InlineStyle,
}

/// Everything [`create_style_resolver`] needs for one instance
#[derive(Clone, Copy, Debug)]
pub struct StylesInput<'a> {
    pub component: &'a str,
    /// Static class tokens, keyed by selector
    pub classes: &'a ClassNames,
    pub props: &'a ResolvedProps,
    pub theme: &'a Theme,
    /// Registry entry for `component` in the active theme
    pub theme_override: Option<&'a ThemeOverride>,
    pub style_props: &'a StyleProps,
    pub vars_resolver: Option<&'a VarsResolver>,
    /// Internal name of the public `root` selector, if it differs
    pub root_selector: Option<&'a str>,
}

/// Resolved styles API of one component instance
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleResolver {
    component: String,
    classes: ClassNames,
    theme_class_names: ClassNames,
    theme_styles: Styles,
    class_names: ClassNames,
    styles: Styles,
    vars: CssVars,
    unstyled: bool,
    root_selector: String,
    root_class_name: Option<String>,
    root_style: InlineStyle,
}

/// Shared handle to a [`StyleResolver`], as published to compound parts
pub type GetStyles = Arc<StyleResolver>;

/// Build the styles API for one instance
pub fn create_style_resolver(input: StylesInput<'_>) -> StyleResolver {
    let mut vars = input
        .vars_resolver
        .map(|resolver| resolver.resolve(input.theme, input.props))
        .unwrap_or_default();

    if let Some(theme_vars) = input.theme_override.and_then(|entry| entry.vars.as_ref()) {
        vars.merge(&theme_vars.resolve(input.theme, input.props));
    }
    vars.merge(&input.style_props.vars);

    let (theme_class_names, theme_styles) = input
        .theme_override
        .map(|entry| (entry.class_names.clone(), entry.styles.clone()))
        .unwrap_or_default();

    tracing::trace!(
        "create_style_resolver - {} (unstyled: {})",
        input.component,
        input.style_props.unstyled
    );

    StyleResolver {
        component: input.component.to_string(),
        classes: input.classes.clone(),
        theme_class_names,
        theme_styles,
        class_names: input.style_props.class_names.clone(),
        styles: input.style_props.styles.clone(),
        vars,
        unstyled: input.style_props.unstyled,
        root_selector: input.root_selector.unwrap_or(ROOT).to_string(),
        root_class_name: input.style_props.class_name.clone(),
        root_style: input.style_props.style.clone(),
    }
}

impl StyleResolver {
    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn is_unstyled(&self) -> bool {
        self.unstyled
    }

    /// Internal name of the root element
    pub fn root_selector(&self) -> &str {
        &self.root_selector
    }

    /// Merged CSS variables, before `None` entries are dropped
    pub fn vars(&self) -> &CssVars {
        &self.vars
    }

    /// Class token and inline style for `selector`.
    ///
    /// Unknown selectors are not an error: they only carry override-derived
    /// classes and styles.
    pub fn get_styles(&self, selector: &str, overrides: Option<&StyleOverrides>) -> SelectorStyle {
        let selector = if selector == ROOT {
            self.root_selector.as_str()
        } else {
            selector
        };
        let is_root = selector == self.root_selector;

        // The aliased root answers to both its internal name and `root`
        let mut keys: SmallVec<[&str; 2]> = SmallVec::new();
        if is_root && selector != ROOT {
            keys.push(ROOT);
        }
        keys.push(selector);

        let mut classes: SmallVec<[Option<&str>; 8]> = SmallVec::new();
        let unstyled = self.unstyled || overrides.is_some_and(|o| o.unstyled);
        if !unstyled {
            classes.extend(keys.iter().map(|k| self.classes.get(k).map(String::as_str)));
        }
        classes.extend(keys.iter().map(|k| self.theme_class_names.get(k).map(String::as_str)));
        classes.extend(keys.iter().map(|k| self.class_names.get(k).map(String::as_str)));
        if is_root {
            classes.push(self.root_class_name.as_deref());
        }
        classes.push(overrides.and_then(|o| o.class_name.as_deref()));

        let mut style = InlineStyle::new();
        for key in &keys {
            style.extend(&self.vars.for_selector(key));
        }
        for layer in [&self.theme_styles, &self.styles] {
            for key in &keys {
                if let Some(s) = layer.get(key) {
                    style.extend(s);
                }
            }
        }
        if is_root {
            style.extend(&self.root_style);
        }
        if let Some(overrides) = overrides {
            style.extend(&overrides.style);
        }

        SelectorStyle {
            class_name: join_classes(classes),
            style,
        }
    }

    /// [`StyleResolver::get_styles`] without overrides
    pub fn styles(&self, selector: &str) -> SelectorStyle {
        self.get_styles(selector, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::ResolvedProps;
    use pretty_assertions::assert_eq;
    use tessera_core::{props, PropMap};

    fn resolver(style_props: &StyleProps, theme_override: Option<&ThemeOverride>) -> StyleResolver {
        let theme = Theme::default();
        let classes = ClassNames::new()
            .with("root", "btn-root")
            .with("label", "btn-label");
        let props = ResolvedProps::new(props! { "size" => "sm" });
        let vars = VarsResolver::new(|_, props| {
            CssVars::new()
                .with("root", "--btn-size", props.str("size").map(str::to_string))
                .with("root", "--btn-color", None::<String>)
        });

        create_style_resolver(StylesInput {
            component: "Button",
            classes: &classes,
            props: &props,
            theme: &theme,
            theme_override,
            style_props,
            vars_resolver: Some(&vars),
            root_selector: None,
        })
    }

    #[test]
    fn test_class_order() {
        let theme_entry = ThemeOverride::new().class_name("root", "theme-root");
        let style_props = StyleProps::new()
            .class_names("root", "user-root")
            .class_name("outer");

        let r = resolver(&style_props, Some(&theme_entry));
        let root = r.get_styles("root", Some(&StyleOverrides::new().class_name("extra")));
        assert_eq!(root.class_name, "btn-root theme-root user-root outer extra");

        // Root-level class_name is not applied to other selectors
        assert_eq!(r.styles("label").class_name, "btn-label");
    }

    #[test]
    fn test_unstyled_keeps_overrides() {
        let theme_entry = ThemeOverride::new().class_name("root", "theme-root");
        let style_props = StyleProps::new()
            .class_names("root", "user-root")
            .unstyled(true);

        let r = resolver(&style_props, Some(&theme_entry));
        let root = r.get_styles("root", Some(&StyleOverrides::new().class_name("extra")));
        assert_eq!(root.class_name, "theme-root user-root extra");
        assert_eq!(r.styles("label").class_name, "");
    }

    #[test]
    fn test_unstyled_override_drops_static_class_for_call() {
        let theme_entry = ThemeOverride::new().class_name("label", "theme-label");
        let style_props = StyleProps::new();

        let r = resolver(&style_props, Some(&theme_entry));
        let label = r.get_styles("label", Some(&StyleOverrides::new().unstyled(true)));
        assert_eq!(label.class_name, "theme-label");
        assert!(!r.is_unstyled());
        assert_eq!(r.styles("label").class_name, "btn-label theme-label");
    }

    #[test]
    fn test_style_order() {
        let theme_entry = ThemeOverride::new()
            .style("root", InlineStyle::new().with("color", "red").with("margin", "1px"));
        let style_props = StyleProps::new()
            .styles("root", InlineStyle::new().with("color", "blue"))
            .vars("root", "--btn-size", "xl")
            .style(InlineStyle::new().with("padding", "0"));

        let r = resolver(&style_props, Some(&theme_entry));
        let root = r.get_styles(
            "root",
            Some(&StyleOverrides::new().style(InlineStyle::new().with("margin", "2px"))),
        );

        assert_eq!(
            root.style.to_declarations(),
            "--btn-size: xl; color: blue; margin: 2px; padding: 0"
        );
        assert!(!root.style.contains("--btn-color"));
    }

    #[test]
    fn test_theme_vars_between_resolver_and_instance() {
        let theme_entry = ThemeOverride::new().vars(VarsResolver::new(|_, _| {
            CssVars::new()
                .with("root", "--btn-size", Some("theme"))
                .with("root", "--btn-color", Some("pink"))
        }));
        let r = resolver(&StyleProps::new(), Some(&theme_entry));
        let root = r.styles("root");

        assert_eq!(root.style.get("--btn-size"), Some("theme"));
        assert_eq!(root.style.get("--btn-color"), Some("pink"));
    }

    #[test]
    fn test_unknown_selector_degrades() {
        let style_props = StyleProps::new().class_names("badge", "user-badge");
        let r = resolver(&style_props, None);

        assert_eq!(r.styles("badge").class_name, "user-badge");
        assert_eq!(r.styles("nothing"), SelectorStyle::default());
    }

    #[test]
    fn test_deterministic() {
        let style_props = StyleProps::new().class_names("root", "user-root");
        let r = resolver(&style_props, None);
        let overrides = StyleOverrides::new().class_name("x");
        assert_eq!(
            r.get_styles("root", Some(&overrides)),
            r.get_styles("root", Some(&overrides))
        );
    }

    #[test]
    fn test_root_alias() {
        let theme = Theme::default();
        let classes = ClassNames::new()
            .with("scrollContainer", "sa-container")
            .with("viewport", "sa-viewport");
        let props = ResolvedProps::new(PropMap::new());
        let style_props = StyleProps::new()
            .class_names("root", "user-root")
            .vars("root", "--sa-size", "8px")
            .class_name("outer");

        let r = create_style_resolver(StylesInput {
            component: "ScrollArea",
            classes: &classes,
            props: &props,
            theme: &theme,
            theme_override: None,
            style_props: &style_props,
            vars_resolver: None,
            root_selector: Some("scrollContainer"),
        });

        let via_public = r.styles("root");
        let via_internal = r.styles("scrollContainer");
        assert_eq!(via_public, via_internal);
        assert_eq!(via_public.class_name, "sa-container user-root outer");
        assert_eq!(via_public.style.get("--sa-size"), Some("8px"));
        assert_eq!(r.styles("viewport").class_name, "sa-viewport");
    }
}
