//! Component factory
//!
//! [`factory`] and [`polymorphic_factory`] wrap a render function into a
//! [`Component`]. Rendering a component runs the whole pipeline:
//!
//! 1. resolve props (built-in defaults, theme defaults, fixed props,
//!    instance props)
//! 2. build (or reuse) the memoized [`StyleResolver`](crate::StyleResolver)
//! 3. pick the render target (`component` prop for polymorphic components)
//! 4. call the render function with a [`ComponentCx`]
//!
//! ```rust
//! use tessera_core::props;
//! use tessera_styles::{factory, ComponentDescriptor, ComponentProps, ThemeProvider};
//!
//! let badge = factory(
//!     ComponentDescriptor::new("Badge")
//!         .tag("span")
//!         .default_props(props! { "variant" => "filled" })
//!         .selectors(&["root", "label"]),
//!     |cx| {
//!         let label = cx.element("span", "label").text("New");
//!         cx.render_root(vec![label.into()])
//!     },
//! );
//!
//! let provider = ThemeProvider::default();
//! let el = provider.render(&badge, ComponentProps::new()).unwrap();
//! assert_eq!(
//!     el.to_html(),
//!     r#"<span class="tessera-Badge-root" data-variant="filled"><span class="tessera-Badge-label">New</span></span>"#
//! );
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use tessera_core::{join_classes, InlineStyle, PropMap};
use tessera_theme::Theme;

use crate::context::{CompoundContext, OptionalContext, RenderCx, SafeContext};
use crate::error::Result;
use crate::modifiers::{mod_attributes, Mod};
use crate::node::{
    is_attribute_name, render_target, Child, Element, HostComponent, HostProps, Node, NodeRef,
    RenderTarget,
};
use crate::props::{resolve_props_with_fixed, ComponentProps, ResolvedProps, StyleProps};
use crate::registry::ThemeOverride;
use crate::scoped::{ResponsiveRules, ScopedStyle};
use crate::styles_api::{
    create_style_resolver, ClassNames, GetStyles, SelectorStyle, StyleOverrides, StylesInput, ROOT,
};
use crate::vars::VarsResolver;

static NEXT_DESCRIPTOR_ID: AtomicU64 = AtomicU64::new(1);

/// Props every component consumes itself
const RESERVED_PROPS: &[&str] = &["variant", "size"];

// ============================================================================
// Descriptor
// ============================================================================

/// Static description of a component
pub struct ComponentDescriptor {
    id: u64,
    name: String,
    tag: String,
    default_props: PropMap,
    classes: ClassNames,
    vars_resolver: Option<VarsResolver>,
    root_selector: Option<String>,
    consumed: Vec<String>,
}

impl ComponentDescriptor {
    /// `name` is the join key with theme overrides and must be unique
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NEXT_DESCRIPTOR_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            tag: "div".to_string(),
            default_props: PropMap::new(),
            classes: ClassNames::new(),
            vars_resolver: None,
            root_selector: None,
            consumed: Vec::new(),
        }
    }

    /// Host tag of the root element (default target of polymorphic components)
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn default_props(mut self, props: PropMap) -> Self {
        self.default_props = props;
        self
    }

    pub fn classes(mut self, classes: ClassNames) -> Self {
        self.classes = classes;
        self
    }

    /// Static classes `tessera-{Name}-{selector}` for each selector
    pub fn selectors(mut self, selectors: &[&str]) -> Self {
        for selector in selectors {
            let class = format!("tessera-{}-{}", self.name, selector);
            self.classes.insert(*selector, class);
        }
        self
    }

    pub fn vars(mut self, resolver: VarsResolver) -> Self {
        self.vars_resolver = Some(resolver);
        self
    }

    /// Internal name of the public `root` selector
    pub fn root_selector(mut self, selector: impl Into<String>) -> Self {
        self.root_selector = Some(selector.into());
        self
    }

    /// Props the component reads without giving them a default; they are
    /// not forwarded to the root element
    pub fn consumes(mut self, props: &[&str]) -> Self {
        self.consumed.extend(props.iter().map(|p| p.to_string()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root_tag(&self) -> &str {
        &self.tag
    }

    pub fn builtin_defaults(&self) -> &PropMap {
        &self.default_props
    }

    pub fn static_classes(&self) -> &ClassNames {
        &self.classes
    }

    pub fn vars_resolver(&self) -> Option<&VarsResolver> {
        self.vars_resolver.as_ref()
    }

    /// Whether `prop` is read by the component rather than forwarded
    pub fn is_consumed(&self, prop: &str) -> bool {
        RESERVED_PROPS.contains(&prop)
            || self.default_props.contains(prop)
            || self.consumed.iter().any(|c| c == prop)
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("default_props", &self.default_props)
            .field("classes", &self.classes)
            .field("root_selector", &self.root_selector)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Component
// ============================================================================

type RenderFn = dyn Fn(&ComponentCx<'_>) -> Result<Element> + Send + Sync;

/// Renderable component with its static metadata
#[derive(Clone)]
pub struct Component {
    descriptor: Arc<ComponentDescriptor>,
    fixed_props: PropMap,
    render: Arc<RenderFn>,
    polymorphic: bool,
    parts: Arc<IndexMap<String, Component>>,
    display_name: String,
}

/// Wrap a render function into a component with a fixed root tag
pub fn factory<F>(descriptor: ComponentDescriptor, render: F) -> Component
where
    F: Fn(&ComponentCx<'_>) -> Result<Element> + Send + Sync + 'static,
{
    Component::build(descriptor, render, false)
}

/// Wrap a render function into a component whose root can be swapped with
/// the `component` prop
pub fn polymorphic_factory<F>(descriptor: ComponentDescriptor, render: F) -> Component
where
    F: Fn(&ComponentCx<'_>) -> Result<Element> + Send + Sync + 'static,
{
    Component::build(descriptor, render, true)
}

impl Component {
    fn build<F>(descriptor: ComponentDescriptor, render: F, polymorphic: bool) -> Self
    where
        F: Fn(&ComponentCx<'_>) -> Result<Element> + Send + Sync + 'static,
    {
        let display_name = format!("tessera/{}", descriptor.name);
        Self {
            descriptor: Arc::new(descriptor),
            fixed_props: PropMap::new(),
            render: Arc::new(render),
            polymorphic,
            parts: Arc::new(IndexMap::new()),
            display_name,
        }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn descriptor(&self) -> &ComponentDescriptor {
        &self.descriptor
    }

    /// Static class tokens, keyed by selector
    pub fn classes(&self) -> &ClassNames {
        &self.descriptor.classes
    }

    pub fn is_polymorphic(&self) -> bool {
        self.polymorphic
    }

    /// Typed constructor for this component's theme override entry
    pub fn extend(&self, entry: ThemeOverride) -> ThemeOverride {
        entry
    }

    /// New component with `props` fixed above theme defaults and below
    /// instance props. Later calls win on overlapping keys.
    pub fn with_props(&self, props: PropMap) -> Component {
        let mut component = self.clone();
        component.fixed_props.merge_from(&props);
        component
    }

    pub fn fixed_props(&self) -> &PropMap {
        &self.fixed_props
    }

    /// Attach a static sub-component (`Dialog.Title`, ...)
    pub fn with_part(mut self, name: impl Into<String>, part: Component) -> Self {
        Arc::make_mut(&mut self.parts).insert(name.into(), part);
        self
    }

    pub fn part(&self, name: &str) -> Option<&Component> {
        self.parts.get(name)
    }

    pub fn parts(&self) -> impl Iterator<Item = (&str, &Component)> {
        self.parts.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve props and styles, then run the render function
    pub fn render(&self, cx: &RenderCx<'_>, props: ComponentProps) -> Result<Element> {
        let ComponentProps {
            props: instance,
            style_props,
            component,
            node_ref,
            children,
        } = props;
        let descriptor = &self.descriptor;

        let resolved = resolve_props_with_fixed(
            cx.registry(),
            &descriptor.name,
            &descriptor.default_props,
            &self.fixed_props,
            &instance,
        );

        let get_styles: GetStyles = cx.cache().get_or_insert_with(
            &(descriptor.id, &resolved, &style_props),
            || {
                create_style_resolver(StylesInput {
                    component: &descriptor.name,
                    classes: &descriptor.classes,
                    props: &resolved,
                    theme: cx.theme(),
                    theme_override: cx.registry().lookup(&descriptor.name),
                    style_props: &style_props,
                    vars_resolver: descriptor.vars_resolver.as_ref(),
                    root_selector: descriptor.root_selector.as_deref(),
                })
            },
        );

        let target = match component {
            Some(target) if self.polymorphic => target,
            Some(target) => {
                tracing::warn!(
                    "{} is not polymorphic, ignoring component override {:?}",
                    self.display_name,
                    target.name()
                );
                RenderTarget::Host(descriptor.tag.clone())
            }
            None => RenderTarget::Host(descriptor.tag.clone()),
        };

        let ccx = ComponentCx {
            cx: cx.clone(),
            component: self,
            props: resolved,
            get_styles,
            style_props,
            target,
            node_ref,
            children,
        };
        (self.render)(&ccx)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("display_name", &self.display_name)
            .field("fixed_props", &self.fixed_props)
            .field("polymorphic", &self.polymorphic)
            .field("parts", &self.parts.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A component can be the render target of a polymorphic component.
/// Forwarded attributes become its props, the class and style land on its
/// root.
impl HostComponent for Component {
    fn name(&self) -> &str {
        &self.display_name
    }

    fn render_host(&self, cx: &RenderCx<'_>, host: HostProps) -> Result<Element> {
        let mut props = ComponentProps::new();
        for (name, value) in host.attributes {
            props.props.set(name, value);
        }
        if !host.class_name.is_empty() {
            props.style_props.class_name = Some(host.class_name);
        }
        props.style_props.style = host.style;
        props.node_ref = host.node_ref;
        props.children = host.children;
        self.render(cx, props)
    }
}

impl From<Component> for RenderTarget {
    fn from(component: Component) -> Self {
        RenderTarget::Component(Arc::new(component))
    }
}

impl From<&Component> for RenderTarget {
    fn from(component: &Component) -> Self {
        RenderTarget::Component(Arc::new(component.clone()))
    }
}

// ============================================================================
// ComponentCx
// ============================================================================

/// What a render function sees
#[derive(Clone)]
pub struct ComponentCx<'a> {
    cx: RenderCx<'a>,
    component: &'a Component,
    props: ResolvedProps,
    get_styles: GetStyles,
    style_props: StyleProps,
    target: RenderTarget,
    node_ref: Option<NodeRef>,
    children: Vec<Child>,
}

impl<'a> ComponentCx<'a> {
    pub fn render_cx(&self) -> &RenderCx<'a> {
        &self.cx
    }

    pub fn theme(&self) -> &Theme {
        self.cx.theme()
    }

    pub fn component(&self) -> &Component {
        self.component
    }

    pub fn display_name(&self) -> &str {
        self.component.display_name()
    }

    pub fn props(&self) -> &ResolvedProps {
        &self.props
    }

    pub fn style_props(&self) -> &StyleProps {
        &self.style_props
    }

    /// The memoized styles API of this instance
    pub fn get_styles(&self) -> &GetStyles {
        &self.get_styles
    }

    pub fn styles(&self, selector: &str) -> SelectorStyle {
        self.get_styles.get_styles(selector, None)
    }

    pub fn styles_with(&self, selector: &str, overrides: &StyleOverrides) -> SelectorStyle {
        self.get_styles.get_styles(selector, Some(overrides))
    }

    /// Host element styled for `selector`
    pub fn element(&self, tag: &str, selector: &str) -> Element {
        Element::new(tag).styled(self.styles(selector))
    }

    /// Instance children
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn render_child(&self, child: Child) -> Result<Node> {
        self.cx.render_child(child)
    }

    /// Same instance, with `value` visible through `context` to everything
    /// rendered from it
    pub fn provide<T: Send + Sync + 'static>(
        &self,
        context: &OptionalContext<T>,
        value: T,
    ) -> ComponentCx<'a> {
        ComponentCx {
            cx: context.provide(&self.cx, value),
            ..self.clone()
        }
    }

    /// Publish this instance's styles API to compound parts
    pub fn provide_compound<I: Send + Sync + 'static>(
        &self,
        context: &SafeContext<CompoundContext<I>>,
        internal: I,
    ) -> ComponentCx<'a> {
        ComponentCx {
            cx: context.provide(
                &self.cx,
                CompoundContext {
                    get_styles: self.get_styles.clone(),
                    internal,
                },
            ),
            ..self.clone()
        }
    }

    /// Same instance with component-computed modifiers on the root. They
    /// come before the instance's own `mod` entries, which win on conflict.
    pub fn with_mods(&self, mods: impl IntoIterator<Item = Mod>) -> ComponentCx<'a> {
        let mut all: Vec<Mod> = mods.into_iter().collect();
        all.extend(self.style_props.mods.iter().cloned());
        let mut next = self.clone();
        next.style_props.mods = all;
        next
    }

    /// Instance styling folded into overrides for a parent's styles API.
    /// Compound parts style themselves through their root's resolver and
    /// pass these as the call's overrides.
    pub fn part_overrides(&self, selector: &str) -> StyleOverrides {
        let sp = &self.style_props;
        let class_name = join_classes([
            sp.class_names.get(ROOT).map(String::as_str),
            sp.class_names.get(selector).map(String::as_str),
            sp.class_name.as_deref(),
        ]);

        let mut style = InlineStyle::new();
        style.extend(&sp.vars.for_selector(ROOT));
        style.extend(&sp.vars.for_selector(selector));
        for s in [sp.styles.get(ROOT), sp.styles.get(selector), Some(&sp.style)]
            .into_iter()
            .flatten()
        {
            style.extend(s);
        }

        StyleOverrides {
            class_name: (!class_name.is_empty()).then_some(class_name),
            style,
            unstyled: sp.unstyled,
        }
    }

    /// Register breakpoint-dependent rules for this instance. Keep the
    /// returned guard alive with [`Element::retain_scoped`].
    pub fn inject_scoped(&self, rules: &ResponsiveRules) -> ScopedStyle {
        let sheet = self.cx.stylesheet();
        let selector = sheet.mint_scoped_selector();
        sheet.inject_rule(&selector, rules)
    }

    /// Render the root with its own styles
    pub fn render_root(&self, children: Vec<Child>) -> Result<Element> {
        self.render_root_as(self.styles(ROOT), children)
    }

    /// Render the root with extra per-call overrides
    pub fn render_root_with(&self, overrides: &StyleOverrides, children: Vec<Child>) -> Result<Element> {
        self.render_root_as(self.styles_with(ROOT, overrides), children)
    }

    /// Render the root through the render target with the given styles.
    ///
    /// The root receives unconsumed props as attributes, `data-variant`,
    /// `data-size` (for non-numeric sizes), modifier attributes and the
    /// forwarded ref.
    pub fn render_root_as(&self, styles: SelectorStyle, children: Vec<Child>) -> Result<Element> {
        let descriptor = self.component.descriptor();
        let mut attributes = IndexMap::new();

        for (name, value) in self.props.iter() {
            if descriptor.is_consumed(name) {
                continue;
            }
            if let Some(value) = value.to_attribute() {
                attributes.insert(name.to_string(), value);
            }
        }
        if let Some(variant) = self.props.variant() {
            attributes.insert("data-variant".to_string(), variant.to_string());
        }
        if let Some(size) = self.props.size().filter(|s| !s.is_number_like()) {
            if let Some(size) = size.as_str() {
                attributes.insert("data-size".to_string(), size.to_string());
            }
        }
        attributes.extend(mod_attributes(&self.style_props.mods));
        attributes.retain(|name, _| {
            let valid = is_attribute_name(name);
            if !valid {
                tracing::debug!(
                    "{} dropping attribute with malformed name {:?}",
                    descriptor.name,
                    name
                );
            }
            valid
        });

        render_target(
            &self.cx,
            &self.target,
            HostProps {
                class_name: styles.class_name,
                style: styles.style,
                attributes,
                node_ref: self.node_ref.clone(),
                children,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ThemeProvider;
    use crate::registry::OverrideRegistry;
    use crate::vars::CssVars;
    use pretty_assertions::assert_eq;
    use tessera_core::props;

    fn chip() -> Component {
        polymorphic_factory(
            ComponentDescriptor::new("Chip")
                .tag("button")
                .default_props(props! { "variant" => "light", "size" => "sm" })
                .selectors(&["root", "label"])
                .vars(VarsResolver::new(|_, props| {
                    CssVars::new().with("root", "--chip-size", props.str("size").map(str::to_string))
                })),
            |cx| {
                let label = cx.element("span", "label").text("chip");
                cx.render_root(vec![label.into()])
            },
        )
    }

    #[test]
    fn test_render_host_default() {
        let provider = ThemeProvider::default();
        let el = provider.render(&chip(), ComponentProps::new()).unwrap();

        assert_eq!(el.tag, "button");
        assert_eq!(el.class_name, "tessera-Chip-root");
        assert_eq!(el.style.get("--chip-size"), Some("sm"));
        assert_eq!(el.attribute("data-variant"), Some("light"));
        assert_eq!(el.attribute("data-size"), Some("sm"));
    }

    #[test]
    fn test_malformed_prop_names_not_forwarded() {
        let provider = ThemeProvider::default();
        let el = provider
            .render(
                &chip(),
                ComponentProps::new()
                    .prop("title", "ok")
                    .prop("bad name", "x")
                    .prop("x\"onclick=\"alert(1)", "y"),
            )
            .unwrap();

        assert_eq!(el.attribute("title"), Some("ok"));
        assert_eq!(el.attribute("bad name"), None);
        assert!(!el.to_html().contains("onclick"));
        assert!(el.attributes.keys().all(|name| is_attribute_name(name)));
    }

    #[test]
    fn test_polymorphic_host_swap_keeps_styles() {
        let provider = ThemeProvider::default();
        let el = provider
            .render(
                &chip(),
                ComponentProps::new()
                    .component("a")
                    .prop("href", "/docs")
                    .class_name("mine"),
            )
            .unwrap();

        assert_eq!(el.tag, "a");
        assert_eq!(el.class_name, "tessera-Chip-root mine");
        assert_eq!(el.attribute("href"), Some("/docs"));
    }

    #[test]
    fn test_plain_component_ignores_component_prop() {
        let plain = factory(ComponentDescriptor::new("Plain").tag("section"), |cx| {
            cx.render_root(Vec::new())
        });
        let provider = ThemeProvider::default();
        let el = provider
            .render(&plain, ComponentProps::new().component("a"))
            .unwrap();
        assert_eq!(el.tag, "section");
    }

    #[test]
    fn test_ref_attached_to_host() {
        let provider = ThemeProvider::default();
        let node_ref = NodeRef::new();
        provider
            .render(&chip(), ComponentProps::new().node_ref(&node_ref))
            .unwrap();

        let handle = node_ref.get().unwrap();
        assert_eq!(handle.tag, "button");
        assert_eq!(handle.class_name, "tessera-Chip-root");
    }

    #[test]
    fn test_memoized_resolver_reused() {
        let provider = ThemeProvider::default();
        let chip = chip();

        provider.render(&chip, ComponentProps::new()).unwrap();
        provider.render(&chip, ComponentProps::new()).unwrap();
        assert_eq!(provider.cache().stats().misses, 1);
        assert_eq!(provider.cache().stats().hits, 1);

        provider
            .render(&chip, ComponentProps::new().prop("size", "lg"))
            .unwrap();
        assert_eq!(provider.cache().stats().misses, 2);

        provider.set_registry(OverrideRegistry::new());
        provider.render(&chip, ComponentProps::new()).unwrap();
        assert_eq!(provider.cache().stats().misses, 3);
    }

    #[test]
    fn test_with_props_metadata() {
        let chip = chip();
        let large = chip.with_props(props! { "size" => "lg" });

        assert_eq!(large.classes(), chip.classes());
        assert_eq!(large.display_name(), "tessera/Chip");
        assert_eq!(large.fixed_props().str("size"), Some("lg"));
        assert!(chip.fixed_props().is_empty());
    }

    #[test]
    fn test_parts() {
        let label = factory(ComponentDescriptor::new("ChipLabel"), |cx| cx.render_root(Vec::new()));
        let chip = chip().with_part("Label", label);

        assert_eq!(chip.part("Label").map(Component::name), Some("ChipLabel"));
        assert!(chip.part("Icon").is_none());
    }

    #[test]
    fn test_component_as_render_target() {
        let link = factory(ComponentDescriptor::new("Link").tag("a").consumes(&["to"]), |cx| {
            let href = cx.props().str("to").unwrap_or("#").to_string();
            let mut el = cx.render_root(cx.children().to_vec())?;
            el.attributes.insert("href".into(), href);
            Ok(el)
        });

        let provider = ThemeProvider::default();
        let el = provider
            .render(&chip(), ComponentProps::new().component(&link).prop("to", "/home"))
            .unwrap();

        assert_eq!(el.tag, "a");
        assert!(el.has_class("tessera-Chip-root"));
        assert_eq!(el.attribute("href"), Some("/home"));
        assert_eq!(el.attribute("data-variant"), Some("light"));
        assert_eq!(el.text_content(), "chip");
    }
}
