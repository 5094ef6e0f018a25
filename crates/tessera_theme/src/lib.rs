//! Tessera Theme System
//!
//! Design tokens and color resolution consumed by component vars resolvers.
//!
//! # Overview
//!
//! The theme system provides:
//! - **Color palettes**: named colors with ten shades each, plus a primary
//!   color and a per-scheme primary shade
//! - **Size scales**: spacing, radius, font sizes, line heights, breakpoints
//! - **Variant colors**: a replaceable hook turning `{color, variant}` into
//!   background/text/border/hover colors
//! - **Auto contrast**: black or white text picked by luminance
//! - **CSS variables**: every token exported as `--tessera-*` custom properties
//!
//! # Quick Start
//!
//! ```rust
//! use tessera_theme::{ColorScheme, SizeToken, Theme, VariantColorsInput};
//!
//! let theme = Theme::default().with_primary_color("teal");
//!
//! assert_eq!(theme.resolve_color("teal"), "#12b886");
//! assert_eq!(theme.breakpoints.get(SizeToken::Sm), "48em");
//!
//! let colors = theme.variant_colors(&VariantColorsInput::new("filled"));
//! assert_eq!(colors.background.as_deref(), Some("#12b886"));
//!
//! let dark = theme.with_color_scheme(ColorScheme::Dark);
//! assert_eq!(dark.resolve_color("teal"), "#099268");
//! ```
//!
//! # Presets
//!
//! - [`ThemePreset::Default`]: blue primary on the Open Color palette
//! - [`ThemePreset::Violet`], [`ThemePreset::Teal`], [`ThemePreset::Slate`]
//!
//! # Configuration
//!
//! [`ThemeConfig`] loads a theme description from TOML and applies it onto a
//! preset.

pub mod config;
pub mod error;
pub mod presets;
pub mod theme;
pub mod tokens;
pub mod variant;

pub use config::ThemeConfig;
pub use error::{Result, ThemeError};
pub use presets::{preset_theme, ThemePreset};
pub use theme::{ColorScheme, PrimaryShade, Theme, ThemeColor};
pub use tokens::*;
pub use variant::{
    default_variant_color_resolver, VariantColorResolver, VariantColors, VariantColorsInput,
};
