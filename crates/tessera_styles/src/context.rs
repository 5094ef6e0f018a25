//! Render context and compound context propagation
//!
//! [`RenderCx`] is the ambient scope of one render pass: the provider's theme
//! and registry snapshot plus a stack of context values pushed by ancestors.
//! Values are shared by `Arc` and looked up by the identity of the context
//! that provided them, so two contexts carrying the same value type never
//! see each other's values.
//!
//! Two disciplines sit on top of it:
//!
//! - [`SafeContext`]: required by compound parts. Reading it outside of its
//!   root fails with [`StylesError::MissingContext`] naming the root.
//! - [`OptionalContext`]: group contexts. Reading it outside a group yields
//!   `None`, which callers branch on.
//!
//! ```rust
//! use tessera_styles::{OptionalContext, SafeContext, ThemeProvider};
//! use tessera_theme::Theme;
//!
//! #[derive(Debug)]
//! struct TabsContext { active: String }
//!
//! static TABS: SafeContext<TabsContext> = SafeContext::new("Tabs");
//!
//! let provider = ThemeProvider::new(Theme::default());
//! let cx = provider.cx();
//!
//! let err = TABS.use_context(&cx, "Tabs.Panel").unwrap_err();
//! assert!(err.to_string().contains("Tabs"));
//!
//! let inner = TABS.provide(&cx, TabsContext { active: "first".into() });
//! assert_eq!(TABS.use_context(&inner, "Tabs.Panel").unwrap().active, "first");
//! ```

use std::any::Any;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use tessera_core::MemoCache;
use tessera_theme::Theme;

use crate::error::{Result, StylesError};
use crate::node::{Child, Node};
use crate::provider::ThemeProvider;
use crate::registry::OverrideRegistry;
use crate::scoped::StyleSheet;
use crate::styles_api::GetStyles;

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one context definition, drawn on first use
struct ContextId(OnceLock<u64>);

impl ContextId {
    const fn new() -> Self {
        Self(OnceLock::new())
    }

    fn get(&self) -> u64 {
        *self
            .0
            .get_or_init(|| NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

struct ContextFrame {
    id: u64,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<ContextFrame>>,
}

/// Ambient scope of one render pass
#[derive(Clone)]
pub struct RenderCx<'a> {
    provider: &'a ThemeProvider,
    theme: Arc<Theme>,
    registry: Arc<OverrideRegistry>,
    frame: Option<Arc<ContextFrame>>,
}

impl<'a> RenderCx<'a> {
    pub(crate) fn new(
        provider: &'a ThemeProvider,
        theme: Arc<Theme>,
        registry: Arc<OverrideRegistry>,
    ) -> Self {
        Self {
            provider,
            theme,
            registry,
            frame: None,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn registry(&self) -> &OverrideRegistry {
        &self.registry
    }

    pub fn provider(&self) -> &'a ThemeProvider {
        self.provider
    }

    pub fn cache(&self) -> &'a MemoCache {
        self.provider.cache()
    }

    pub fn stylesheet(&self) -> &'a Arc<StyleSheet> {
        self.provider.stylesheet()
    }

    /// New scope with `value` visible to every descendant that reads context `id`
    fn provide_as<T: Send + Sync + 'static>(&self, id: u64, value: Arc<T>) -> RenderCx<'a> {
        let frame = ContextFrame {
            id,
            value,
            parent: self.frame.clone(),
        };
        RenderCx {
            frame: Some(Arc::new(frame)),
            ..self.clone()
        }
    }

    /// Nearest value provided by an ancestor under context `id`
    fn lookup_as<T: Send + Sync + 'static>(&self, id: u64) -> Option<Arc<T>> {
        let mut frame = self.frame.as_ref();
        while let Some(current) = frame {
            if current.id == id {
                return current.value.clone().downcast::<T>().ok();
            }
            frame = current.parent.as_ref();
        }
        None
    }

    /// Render one deferred child in this scope
    pub fn render_child(&self, child: Child) -> Result<Node> {
        match child {
            Child::Element(el) => Ok(Node::Element(el)),
            Child::Text(text) => Ok(Node::Text(text)),
            Child::Component(component, props) => component.render(self, *props).map(Node::Element),
            Child::Render(render) => render(self).map(Node::Element),
        }
    }

    pub fn render_children(&self, children: Vec<Child>) -> Result<Vec<Node>> {
        children.into_iter().map(|child| self.render_child(child)).collect()
    }
}

/// Required context: reading it outside of `root` is an integration error
pub struct SafeContext<T> {
    id: ContextId,
    root: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> SafeContext<T> {
    pub const fn new(root: &'static str) -> Self {
        Self {
            id: ContextId::new(),
            root,
            _marker: PhantomData,
        }
    }

    /// Name of the component that provides this context
    pub fn root(&self) -> &'static str {
        self.root
    }

    pub fn provide<'a>(&self, cx: &RenderCx<'a>, value: T) -> RenderCx<'a> {
        cx.provide_as(self.id.get(), Arc::new(value))
    }

    /// The root's value, or [`StylesError::MissingContext`] naming the root
    pub fn use_context(&self, cx: &RenderCx<'_>, component: &str) -> Result<Arc<T>> {
        cx.lookup_as::<T>(self.id.get()).ok_or_else(|| StylesError::MissingContext {
            root: self.root,
            component: component.to_string(),
        })
    }
}

/// Optional context: absence is a normal state
pub struct OptionalContext<T> {
    id: ContextId,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> OptionalContext<T> {
    pub const fn new() -> Self {
        Self {
            id: ContextId::new(),
            _marker: PhantomData,
        }
    }

    pub fn provide<'a>(&self, cx: &RenderCx<'a>, value: T) -> RenderCx<'a> {
        cx.provide_as(self.id.get(), Arc::new(value))
    }

    pub fn use_context(&self, cx: &RenderCx<'_>) -> Option<Arc<T>> {
        cx.lookup_as::<T>(self.id.get())
    }
}

impl<T: Send + Sync + 'static> Default for OptionalContext<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Value a compound root publishes to its parts: its resolved styles API
/// plus root-only configuration the parts need
#[derive(Clone, Debug)]
pub struct CompoundContext<I = ()> {
    pub get_styles: GetStyles,
    pub internal: I,
}
