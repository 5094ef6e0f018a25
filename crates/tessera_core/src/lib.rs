//! Tessera Core
//!
//! Foundational primitives shared by the Tessera styling engine:
//!
//! - **Colors**: [`Color`] with CSS parsing, luminance, and CSS output
//! - **Prop values**: [`PropValue`] and [`PropMap`], the dynamic prop vocabulary
//!   every component and theme override speaks
//! - **CSS helpers**: [`InlineStyle`], [`rem`], [`join_classes`], [`kebab_case`]
//! - **Memoization**: [`MemoCache`], a dependency-keyed cache used to avoid
//!   recomputing styles when nothing they depend on changed
//!
//! # Example
//!
//! ```rust
//! use tessera_core::{props, PropValue};
//!
//! let defaults = props! { "size" => "sm", "radius" => 4 };
//! let instance = props! { "size" => "lg" };
//!
//! let merged = defaults.merge(&instance);
//! assert_eq!(merged.str("size"), Some("lg"));
//! assert_eq!(merged.get("radius"), Some(&PropValue::Number(4.0)));
//! ```

pub mod color;
pub mod css;
pub mod memo;
pub mod value;

pub use color::Color;
pub use css::{join_classes, kebab_case, length, rem, InlineStyle};
pub use memo::{MemoCache, MemoKey, MemoStats, DEFAULT_MEMO_CAPACITY};
pub use value::{format_number, PropMap, PropValue};
