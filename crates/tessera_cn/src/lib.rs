//! Tessera Component Library
//!
//! Components built on `tessera_styles`. Each one is a lazily built static
//! [`Component`](tessera_styles::Component) returned by an accessor:
//!
//! - [`button`]: polymorphic button with variant colors
//! - [`dialog`] with [`dialog_header`], [`dialog_title`], [`dialog_body`] and
//!   [`dialog_close_button`] parts sharing the root's styles
//! - [`checkbox`] and [`checkbox_group`] coordinated through an optional
//!   group context
//! - [`simple_grid`]: responsive column grid backed by scoped stylesheet rules
//! - [`scroll_area`]: scroll container whose root selector is aliased
//!
//! # Quick Start
//!
//! ```rust
//! use tessera_cn::{button, BUTTON};
//! use tessera_core::props;
//! use tessera_styles::{ComponentProps, OverrideRegistry, ThemeOverride, ThemeProvider};
//!
//! let provider = ThemeProvider::default().with_registry(OverrideRegistry::new().with(
//!     BUTTON,
//!     button().extend(ThemeOverride::new().default_props(props! { "variant" => "outline" })),
//! ));
//!
//! let el = provider.render(button(), ComponentProps::new().child("Go")).unwrap();
//! assert_eq!(el.attribute("data-variant"), Some("outline"));
//! ```

pub mod components;

pub use components::*;
