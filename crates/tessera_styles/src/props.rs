//! Prop resolution pipeline
//!
//! Plain props are layered lowest to highest:
//!
//! 1. the component's built-in defaults
//! 2. the theme registry's `default_props` for that component name
//! 3. fixed props from [`Component::with_props`](crate::Component::with_props)
//! 4. instance props
//!
//! A key that a later layer leaves absent, or sets to [`PropValue::Unset`],
//! keeps its value from the layer below.

use std::ops::Deref;

use tessera_core::{InlineStyle, PropMap, PropValue};

use crate::modifiers::Mod;
use crate::node::{Child, NodeRef, RenderTarget};
use crate::registry::OverrideRegistry;
use crate::styles_api::{ClassNames, Styles};
use crate::vars::CssVars;

/// Result of the prop pipeline for one render
#[derive(Clone, Debug, Default, PartialEq, Hash)]
pub struct ResolvedProps(PropMap);

impl ResolvedProps {
    pub fn new(props: PropMap) -> Self {
        Self(props)
    }

    pub fn variant(&self) -> Option<&str> {
        self.0.str("variant")
    }

    pub fn size(&self) -> Option<&PropValue> {
        self.0.get("size")
    }

    pub fn color(&self) -> Option<&str> {
        self.0.str("color")
    }

    pub fn into_inner(self) -> PropMap {
        self.0
    }
}

impl Deref for ResolvedProps {
    type Target = PropMap;

    fn deref(&self) -> &PropMap {
        &self.0
    }
}

/// Resolve props for `component` against the active registry
pub fn resolve_props(
    registry: &OverrideRegistry,
    component: &str,
    defaults: &PropMap,
    instance: &PropMap,
) -> ResolvedProps {
    resolve_props_with_fixed(registry, component, defaults, &PropMap::new(), instance)
}

/// [`resolve_props`] with a layer of fixed props between theme defaults and
/// instance props
pub fn resolve_props_with_fixed(
    registry: &OverrideRegistry,
    component: &str,
    defaults: &PropMap,
    fixed: &PropMap,
    instance: &PropMap,
) -> ResolvedProps {
    let empty = PropMap::new();
    let theme_defaults = registry
        .lookup(component)
        .map(|entry| &entry.default_props)
        .unwrap_or(&empty);

    ResolvedProps(PropMap::layered([defaults, theme_defaults, fixed, instance]))
}

/// Styling configuration every component accepts
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StyleProps {
    /// Per-selector class overrides
    pub class_names: ClassNames,
    /// Per-selector inline style overrides
    pub styles: Styles,
    /// Per-selector CSS variable overrides, applied after every vars resolver
    pub vars: CssVars,
    /// Drop the component's static classes
    pub unstyled: bool,
    /// Extra class on the root element
    pub class_name: Option<String>,
    /// Extra inline style on the root element
    pub style: InlineStyle,
    /// Modifiers rendered as `data-*` attributes on the root
    pub mods: Vec<Mod>,
}

impl StyleProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class_names(mut self, selector: impl Into<String>, class: impl Into<String>) -> Self {
        self.class_names.insert(selector, class.into());
        self
    }

    pub fn styles(mut self, selector: impl Into<String>, style: InlineStyle) -> Self {
        self.styles.insert(selector, style);
        self
    }

    pub fn vars(
        mut self,
        selector: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.vars.set(selector, name, Some(value));
        self
    }

    pub fn unstyled(mut self, unstyled: bool) -> Self {
        self.unstyled = unstyled;
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn style(mut self, style: InlineStyle) -> Self {
        self.style = style;
        self
    }

    pub fn modifier(mut self, m: Mod) -> Self {
        self.mods.push(m);
        self
    }
}

/// Everything an instance passes to a component
#[derive(Clone, Debug, Default)]
pub struct ComponentProps {
    pub props: PropMap,
    pub style_props: StyleProps,
    /// Polymorphic host override
    pub component: Option<RenderTarget>,
    pub node_ref: Option<NodeRef>,
    pub children: Vec<Child>,
}

impl ComponentProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.set(key, value);
        self
    }

    /// Layer `props` on top of the current plain props
    pub fn props(mut self, props: PropMap) -> Self {
        self.props.merge_from(&props);
        self
    }

    pub fn style_props(mut self, style_props: StyleProps) -> Self {
        self.style_props = style_props;
        self
    }

    pub fn class_names(mut self, selector: impl Into<String>, class: impl Into<String>) -> Self {
        self.style_props = self.style_props.class_names(selector, class);
        self
    }

    pub fn styles(mut self, selector: impl Into<String>, style: InlineStyle) -> Self {
        self.style_props = self.style_props.styles(selector, style);
        self
    }

    pub fn vars(
        mut self,
        selector: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.style_props = self.style_props.vars(selector, name, value);
        self
    }

    pub fn unstyled(mut self, unstyled: bool) -> Self {
        self.style_props.unstyled = unstyled;
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.style_props.class_name = Some(class_name.into());
        self
    }

    pub fn style(mut self, style: InlineStyle) -> Self {
        self.style_props.style = style;
        self
    }

    pub fn modifier(mut self, m: Mod) -> Self {
        self.style_props.mods.push(m);
        self
    }

    pub fn component(mut self, target: impl Into<RenderTarget>) -> Self {
        self.component = Some(target.into());
        self
    }

    pub fn node_ref(mut self, node_ref: &NodeRef) -> Self {
        self.node_ref = Some(node_ref.clone());
        self
    }

    pub fn child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, C>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Child>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ThemeOverride;
    use pretty_assertions::assert_eq;
    use tessera_core::props;

    fn registry() -> OverrideRegistry {
        OverrideRegistry::new().with(
            "Button",
            ThemeOverride::new().default_props(props! { "size" => "md" }),
        )
    }

    #[test]
    fn test_theme_default_beats_builtin() {
        let resolved = resolve_props(
            &registry(),
            "Button",
            &props! { "size" => "sm" },
            &PropMap::new(),
        );
        assert_eq!(resolved.str("size"), Some("md"));
    }

    #[test]
    fn test_instance_beats_theme() {
        let resolved = resolve_props(
            &registry(),
            "Button",
            &props! { "size" => "sm" },
            &props! { "size" => "lg" },
        );
        assert_eq!(resolved.str("size"), Some("lg"));
    }

    #[test]
    fn test_unset_instance_prop_keeps_lower_layer() {
        let resolved = resolve_props(
            &registry(),
            "Button",
            &props! { "size" => "sm" },
            &PropMap::new().unset("size"),
        );
        assert_eq!(resolved.str("size"), Some("md"));
    }

    #[test]
    fn test_unregistered_component_uses_builtin() {
        let resolved = resolve_props(
            &registry(),
            "Badge",
            &props! { "size" => "sm", "variant" => "light" },
            &PropMap::new(),
        );
        assert_eq!(resolved.str("size"), Some("sm"));
        assert_eq!(resolved.variant(), Some("light"));
    }

    #[test]
    fn test_fixed_props_between_theme_and_instance() {
        let fixed = props! { "size" => "xl", "variant" => "outline" };
        let resolved = resolve_props_with_fixed(
            &registry(),
            "Button",
            &props! { "size" => "sm" },
            &fixed,
            &props! { "variant" => "filled" },
        );
        assert_eq!(resolved.str("size"), Some("xl"));
        assert_eq!(resolved.variant(), Some("filled"));
    }
}
