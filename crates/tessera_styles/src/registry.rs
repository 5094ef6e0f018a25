//! Theme override registry
//!
//! Maps component names to application-level overrides ("extend"):
//! default props, class names, inline styles and a vars resolver. A registry
//! belongs to one theme-provider boundary; nested boundaries chain to their
//! parent, and a lookup falls back to the parent for names the inner
//! registry does not override.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tessera_core::{InlineStyle, PropMap};

use crate::styles_api::{ClassNames, Styles};
use crate::vars::VarsResolver;

/// Overrides registered for one component name
#[derive(Clone, Default)]
pub struct ThemeOverride {
    pub default_props: PropMap,
    pub class_names: ClassNames,
    pub styles: Styles,
    pub vars: Option<VarsResolver>,
}

impl ThemeOverride {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_props(mut self, props: PropMap) -> Self {
        self.default_props = props;
        self
    }

    pub fn class_name(mut self, selector: impl Into<String>, class: impl Into<String>) -> Self {
        self.class_names.insert(selector, class.into());
        self
    }

    pub fn style(mut self, selector: impl Into<String>, style: InlineStyle) -> Self {
        self.styles.insert(selector, style);
        self
    }

    pub fn vars(mut self, resolver: VarsResolver) -> Self {
        self.vars = Some(resolver);
        self
    }
}

impl fmt::Debug for ThemeOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeOverride")
            .field("default_props", &self.default_props)
            .field("class_names", &self.class_names)
            .field("styles", &self.styles)
            .field("vars", &self.vars.is_some())
            .finish()
    }
}

/// Component name -> [`ThemeOverride`] table
#[derive(Clone, Debug, Default)]
pub struct OverrideRegistry {
    entries: FxHashMap<String, Arc<ThemeOverride>>,
    parent: Option<Arc<OverrideRegistry>>,
}

impl OverrideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`OverrideRegistry::register`]
    pub fn with(mut self, component: impl Into<String>, entry: ThemeOverride) -> Self {
        self.register(component, entry);
        self
    }

    /// Register (or replace) the overrides for `component`
    pub fn register(&mut self, component: impl Into<String>, entry: ThemeOverride) {
        let component = component.into();
        tracing::debug!("OverrideRegistry::register - {component}");
        self.entries.insert(component, Arc::new(entry));
    }

    /// Chain this registry to an enclosing one
    pub fn with_parent(mut self, parent: Arc<OverrideRegistry>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn parent(&self) -> Option<&Arc<OverrideRegistry>> {
        self.parent.as_ref()
    }

    /// Overrides for `component`, falling back to enclosing registries
    pub fn lookup(&self, component: &str) -> Option<&ThemeOverride> {
        match self.entries.get(component) {
            Some(entry) => Some(entry.as_ref()),
            None => self.parent.as_ref()?.lookup(component),
        }
    }

    /// Whether this registry itself (not a parent) has an entry
    pub fn contains_own(&self, component: &str) -> bool {
        self.entries.contains_key(component)
    }

    /// Number of entries in this registry, not counting parents
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::props;

    #[test]
    fn test_lookup_missing_is_none() {
        let registry = OverrideRegistry::new();
        assert!(registry.lookup("Button").is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = OverrideRegistry::new();
        registry.register("Button", ThemeOverride::new().class_name("root", "a"));
        registry.register("Button", ThemeOverride::new().class_name("root", "b"));

        let entry = registry.lookup("Button").unwrap();
        assert_eq!(entry.class_names.get("root").map(String::as_str), Some("b"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_nested_falls_back_per_component() {
        let outer = Arc::new(
            OverrideRegistry::new()
                .with(
                    "Button",
                    ThemeOverride::new().default_props(props! { "size" => "lg" }),
                )
                .with(
                    "Badge",
                    ThemeOverride::new().default_props(props! { "variant" => "dot" }),
                ),
        );
        let inner = OverrideRegistry::new()
            .with(
                "Button",
                ThemeOverride::new().class_name("root", "inner-button"),
            )
            .with_parent(outer);

        // Inner entry wins for Button as a whole; no field-level merge
        let button = inner.lookup("Button").unwrap();
        assert!(button.default_props.is_empty());
        assert!(inner.contains_own("Button"));

        let badge = inner.lookup("Badge").unwrap();
        assert_eq!(badge.default_props.str("variant"), Some("dot"));
        assert!(!inner.contains_own("Badge"));
    }
}
