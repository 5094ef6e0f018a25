//! Design tokens for theming
//!
//! Tokens are the atomic values that make up a design system:
//! - Color palettes (ten shades per named color)
//! - Size scales (spacing, radius, font sizes, line heights, breakpoints)

mod palette;
mod scale;

pub use palette::*;
pub use scale::*;
