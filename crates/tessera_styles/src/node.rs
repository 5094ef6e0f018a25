//! Host element model and polymorphic render dispatch
//!
//! Components render to [`Element`] trees: a tag, a class token string, an
//! inline style map, attributes, children and an optional forwarded
//! [`NodeRef`]. The host decides what to do with them; [`Element::to_html`]
//! is the textual form used by tests and the showcase.
//!
//! A component's root is rendered through a [`RenderTarget`]: either a host
//! tag or another component. [`render_target`] is the single dispatch point.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use indexmap::IndexMap;
use tessera_core::InlineStyle;

use crate::context::RenderCx;
use crate::error::Result;
use crate::factory::Component;
use crate::props::ComponentProps;
use crate::scoped::ScopedStyle;
use crate::styles_api::SelectorStyle;

const VOID_TAGS: &[&str] = &["area", "br", "col", "hr", "img", "input", "link", "meta", "source"];

// ============================================================================
// Elements
// ============================================================================

/// Rendered node
#[derive(Clone, Debug)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }
}

/// Rendered host element
#[derive(Clone, Debug, Default)]
pub struct Element {
    pub tag: String,
    pub class_name: String,
    pub style: InlineStyle,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
    pub node_ref: Option<NodeRef>,
    /// Scoped stylesheet rules that live as long as this element
    scoped: Vec<Arc<ScopedStyle>>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Apply a styles API result
    pub fn styled(mut self, styles: SelectorStyle) -> Self {
        self.class_name = styles.class_name;
        self.style = styles.style;
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Keep a scoped rule registered while this element (or a clone) lives
    pub fn retain_scoped(&mut self, scoped: ScopedStyle) {
        self.scoped.push(Arc::new(scoped));
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_name.split_whitespace().any(|c| c == class)
    }

    /// Depth-first search, including `self`
    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.children
            .iter()
            .filter_map(Node::as_element)
            .find_map(|child| child.find(predicate))
    }

    /// First descendant (or self) carrying `class`
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.find(&|el| el.has_class(class))
    }

    /// Concatenated text of the subtree
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => out.push_str(&el.text_content()),
            }
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.class_name.is_empty() {
            write_attr(out, "class", &self.class_name);
        }
        if !self.style.is_empty() {
            write_attr(out, "style", &self.style.to_declarations());
        }
        for (name, value) in &self.attributes {
            if is_attribute_name(name) {
                write_attr(out, name, value);
            } else {
                tracing::debug!(
                    "Element::to_html - skipping attribute {:?} on <{}>",
                    name,
                    self.tag
                );
            }
        }

        if VOID_TAGS.contains(&self.tag.as_str()) {
            out.push_str(" />");
            return;
        }

        out.push('>');
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(&escape(text)),
                Node::Element(el) => el.write_html(out),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

/// Whether `name` can be written as an HTML attribute name as is
pub fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|ch| {
            ch.is_whitespace() || ch.is_control() || matches!(ch, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

fn write_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

// ============================================================================
// Refs
// ============================================================================

/// What a [`NodeRef`] points at once attached
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeHandle {
    pub tag: String,
    pub class_name: String,
}

/// Forwardable handle to a rendered host element
#[derive(Clone, Default)]
pub struct NodeRef(Arc<Mutex<Option<NodeHandle>>>);

impl NodeRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<NodeHandle> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_attached(&self) -> bool {
        self.get().is_some()
    }

    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn attach(&self, element: &Element) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = Some(NodeHandle {
            tag: element.tag.clone(),
            class_name: element.class_name.clone(),
        });
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeRef").field(&self.get()).finish()
    }
}

// ============================================================================
// Render targets
// ============================================================================

/// Props a polymorphic root forwards to its render target
#[derive(Clone, Debug, Default)]
pub struct HostProps {
    pub class_name: String,
    pub style: InlineStyle,
    pub attributes: IndexMap<String, String>,
    pub node_ref: Option<NodeRef>,
    pub children: Vec<Child>,
}

/// A component that can stand in for a host element
pub trait HostComponent: Send + Sync {
    fn name(&self) -> &str;

    /// Whether a forwarded [`NodeRef`] can be attached to this component
    fn accepts_ref(&self) -> bool {
        true
    }

    fn render_host(&self, cx: &RenderCx<'_>, props: HostProps) -> Result<Element>;
}

/// What a polymorphic root renders as
#[derive(Clone)]
pub enum RenderTarget {
    /// Host element tag
    Host(String),
    /// Another component
    Component(Arc<dyn HostComponent>),
}

impl RenderTarget {
    pub fn host(tag: impl Into<String>) -> Self {
        Self::Host(tag.into())
    }

    pub fn component(component: impl HostComponent + 'static) -> Self {
        Self::Component(Arc::new(component))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Host(tag) => tag,
            Self::Component(component) => component.name(),
        }
    }
}

impl fmt::Debug for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host(tag) => f.debug_tuple("Host").field(tag).finish(),
            Self::Component(c) => f.debug_tuple("Component").field(&c.name()).finish(),
        }
    }
}

impl From<&str> for RenderTarget {
    fn from(tag: &str) -> Self {
        Self::host(tag)
    }
}

impl From<String> for RenderTarget {
    fn from(tag: String) -> Self {
        Self::Host(tag)
    }
}

/// Render `props` through `target`.
///
/// A ref passed to a component target that does not accept refs is dropped;
/// the element still renders.
pub fn render_target(cx: &RenderCx<'_>, target: &RenderTarget, mut props: HostProps) -> Result<Element> {
    match target {
        RenderTarget::Host(tag) => {
            let mut element = Element::new(tag.clone());
            element.class_name = props.class_name;
            element.style = props.style;
            element.attributes = props.attributes;
            element.children = cx.render_children(props.children)?;
            if let Some(node_ref) = props.node_ref {
                node_ref.attach(&element);
                element.node_ref = Some(node_ref);
            }
            Ok(element)
        }
        RenderTarget::Component(component) => {
            if props.node_ref.is_some() && !component.accepts_ref() {
                tracing::warn!(
                    "render_target - {} does not accept refs, dropping forwarded ref",
                    component.name()
                );
                props.node_ref = None;
            }
            component.render_host(cx, props)
        }
    }
}

// ============================================================================
// Children
// ============================================================================

type RenderFn = dyn Fn(&RenderCx<'_>) -> Result<Element> + Send + Sync;

/// Deferred child, rendered inside its parent's context scope
#[derive(Clone)]
pub enum Child {
    Element(Element),
    Text(String),
    Component(Component, Box<ComponentProps>),
    Render(Arc<RenderFn>),
}

impl Child {
    pub fn component(component: &Component, props: ComponentProps) -> Self {
        Self::Component(component.clone(), Box::new(props))
    }

    pub fn render<F>(render: F) -> Self
    where
        F: Fn(&RenderCx<'_>) -> Result<Element> + Send + Sync + 'static,
    {
        Self::Render(Arc::new(render))
    }
}

impl fmt::Debug for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(el) => f.debug_tuple("Element").field(&el.tag).finish(),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Component(c, _) => f.debug_tuple("Component").field(&c.display_name()).finish(),
            Self::Render(_) => f.write_str("Render(..)"),
        }
    }
}

impl From<Element> for Child {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_to_html() {
        let el = Element::new("button")
            .styled(SelectorStyle {
                class_name: "btn".into(),
                style: InlineStyle::new().with("--h", "10px"),
            })
            .attr("data-variant", "filled")
            .text("Save <now>");

        assert_eq!(
            el.to_html(),
            r#"<button class="btn" style="--h: 10px" data-variant="filled">Save &lt;now&gt;</button>"#
        );
    }

    #[test]
    fn test_to_html_skips_malformed_attribute_names() {
        let el = Element::new("div")
            .attr("data-ok", "1")
            .attr("bad name", "x")
            .attr("x\"onclick=\"y", "z")
            .attr("", "empty")
            .attr("a>b", "c");

        assert_eq!(el.to_html(), r#"<div data-ok="1"></div>"#);
        assert!(is_attribute_name("aria-label"));
        assert!(!is_attribute_name("on/load"));
    }

    #[test]
    fn test_void_tags_self_close() {
        let el = Element::new("input").attr("type", "checkbox");
        assert_eq!(el.to_html(), r#"<input type="checkbox" />"#);
    }

    #[test]
    fn test_find_and_text() {
        let el = Element::new("div")
            .child(Element::new("span").styled(SelectorStyle {
                class_name: "a label".into(),
                ..Default::default()
            }).text("Hi"))
            .text("!");

        assert_eq!(el.find_by_class("label").map(|e| e.tag.as_str()), Some("span"));
        assert!(el.find_by_class("missing").is_none());
        assert_eq!(el.text_content(), "Hi!");
    }

    #[test]
    fn test_node_ref_starts_detached() {
        let node_ref = NodeRef::new();
        assert!(!node_ref.is_attached());
        assert!(node_ref.ptr_eq(&node_ref.clone()));
        assert!(!node_ref.ptr_eq(&NodeRef::new()));
    }
}
