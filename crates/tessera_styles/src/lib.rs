//! Tessera Styling Engine
//!
//! Turns component definitions plus a theme into fully resolved class names,
//! inline styles and CSS variables for every rendered sub-element.
//!
//! # Overview
//!
//! - **Prop resolution**: built-in defaults, theme defaults, fixed props and
//!   instance props layered into [`ResolvedProps`]
//! - **Styles API**: [`create_style_resolver`] merges static classes, theme
//!   overrides and instance overrides per selector
//! - **CSS variables**: [`VarsResolver`] hooks and the [`get_size`] family
//! - **Component factory**: [`factory`] / [`polymorphic_factory`] wrap a
//!   render function into a [`Component`]
//! - **Context**: [`SafeContext`] for compound parts, [`OptionalContext`]
//!   for groups
//! - **Scoped rules**: breakpoint-dependent variables injected into a
//!   [`StyleSheet`] under a random [`ScopedSelector`]
//! - **Provider**: [`ThemeProvider`] owns the theme, the override registry
//!   and the memoized resolvers
//!
//! # Quick Start
//!
//! ```rust
//! use tessera_core::props;
//! use tessera_styles::{
//!     factory, ComponentDescriptor, ComponentProps, CssVars, OverrideRegistry, ThemeOverride,
//!     ThemeProvider, VarsResolver,
//! };
//!
//! let card = factory(
//!     ComponentDescriptor::new("Card")
//!         .default_props(props! { "padding" => "md" })
//!         .selectors(&["root"])
//!         .vars(VarsResolver::new(|_, props| {
//!             CssVars::new().with(
//!                 "root",
//!                 "--card-padding",
//!                 tessera_styles::get_spacing(props.get("padding")),
//!             )
//!         })),
//!     |cx| cx.render_root(cx.children().to_vec()),
//! );
//!
//! let provider = ThemeProvider::default().with_registry(OverrideRegistry::new().with(
//!     "Card",
//!     ThemeOverride::new().class_name("root", "app-card"),
//! ));
//!
//! let el = provider
//!     .render(&card, ComponentProps::new().prop("padding", "xl").child("hello"))
//!     .unwrap();
//!
//! assert_eq!(el.class_name, "tessera-Card-root app-card");
//! assert_eq!(el.style.get("--card-padding"), Some("var(--tessera-spacing-xl)"));
//! ```

pub mod context;
pub mod error;
pub mod factory;
pub mod modifiers;
pub mod node;
pub mod props;
pub mod provider;
pub mod registry;
pub mod scoped;
pub mod styles_api;
pub mod vars;

pub use context::{CompoundContext, OptionalContext, RenderCx, SafeContext};
pub use error::{Result, StylesError};
pub use factory::{factory, polymorphic_factory, Component, ComponentCx, ComponentDescriptor};
pub use modifiers::{data_attribute, mod_attributes, Mod};
pub use node::{
    is_attribute_name, render_target, Child, Element, HostComponent, HostProps, Node, NodeHandle,
    NodeRef, RenderTarget,
};
pub use props::{resolve_props, resolve_props_with_fixed, ComponentProps, ResolvedProps, StyleProps};
pub use provider::{ComponentConfig, ProviderConfig, ThemeProvider};
pub use registry::{OverrideRegistry, ThemeOverride};
pub use scoped::{BreakpointQuery, ResponsiveRules, ScopedSelector, ScopedStyle, StyleSheet};
pub use styles_api::{
    create_style_resolver, ClassNames, GetStyles, SelectorMap, SelectorStyle, StyleOverrides,
    StyleResolver, Styles, StylesInput, ROOT,
};
pub use vars::{get_font_size, get_line_height, get_radius, get_size, get_spacing, CssVars, VarsResolver};
