//! Variant color resolution
//!
//! Turns `{color, variant}` into the concrete background, text, border and
//! hover colors a component paints with. Themes carry the resolver as a hook,
//! so applications can replace it wholesale:
//!
//! ```rust
//! use tessera_theme::{Theme, VariantColorResolver, VariantColors, VariantColorsInput};
//!
//! let theme = Theme::default().with_variant_color_resolver(VariantColorResolver::new(
//!     |input, theme| match input.variant {
//!         "danger" => VariantColors {
//!             background: Some(theme.resolve_color("red.7")),
//!             color: Some("#fff".into()),
//!             ..Default::default()
//!         },
//!         _ => tessera_theme::default_variant_color_resolver(input, theme),
//!     },
//! ));
//!
//! let colors = theme.variant_colors(&VariantColorsInput::new("danger"));
//! assert_eq!(colors.background.as_deref(), Some("#f03e3e"));
//! ```

use std::fmt;
use std::sync::Arc;

use tessera_core::{rem, Color};

use crate::theme::{ColorScheme, Theme, ThemeColor};

/// Input to a variant color resolver
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VariantColorsInput<'a> {
    /// Color prop; `None` means the theme's primary color
    pub color: Option<&'a str>,
    pub variant: &'a str,
    /// Per-call auto-contrast; `None` defers to the theme
    pub auto_contrast: Option<bool>,
}

impl<'a> VariantColorsInput<'a> {
    pub fn new(variant: &'a str) -> Self {
        Self {
            variant,
            ..Default::default()
        }
    }

    pub fn color(mut self, color: Option<&'a str>) -> Self {
        self.color = color;
        self
    }

    pub fn auto_contrast(mut self, auto_contrast: Option<bool>) -> Self {
        self.auto_contrast = auto_contrast;
        self
    }
}

/// Resolved colors; `None` means "not set by this variant"
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct VariantColors {
    pub background: Option<String>,
    pub hover: Option<String>,
    pub color: Option<String>,
    pub hover_color: Option<String>,
    pub border: Option<String>,
}

type ResolverFn = dyn Fn(&VariantColorsInput<'_>, &Theme) -> VariantColors + Send + Sync;

/// Shareable variant color resolver hook
#[derive(Clone)]
pub struct VariantColorResolver(Arc<ResolverFn>);

impl VariantColorResolver {
    pub fn new<F>(resolver: F) -> Self
    where
        F: Fn(&VariantColorsInput<'_>, &Theme) -> VariantColors + Send + Sync + 'static,
    {
        Self(Arc::new(resolver))
    }

    pub fn resolve(&self, input: &VariantColorsInput<'_>, theme: &Theme) -> VariantColors {
        (self.0)(input, theme)
    }
}

impl Default for VariantColorResolver {
    fn default() -> Self {
        Self::new(default_variant_color_resolver)
    }
}

impl fmt::Debug for VariantColorResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VariantColorResolver(..)")
    }
}

fn border(color: &str) -> String {
    format!("{} solid {color}", rem(1.0))
}

/// Color with alpha applied, or the raw value when the color is not concrete
fn alpha(parsed: &ThemeColor, alpha: f32) -> String {
    match parsed.color() {
        Some(color) => color.with_alpha(alpha).to_css(),
        None => parsed.to_css(),
    }
}

/// Built-in resolver for `filled`, `light`, `outline`, `subtle`,
/// `transparent`, `white` and `default`. Unknown variants resolve to all
/// `None`.
pub fn default_variant_color_resolver(input: &VariantColorsInput<'_>, theme: &Theme) -> VariantColors {
    let color_key = input.color.unwrap_or(&theme.primary_color);
    let parsed = theme.parse_color(color_key);
    let css = parsed.to_css();
    let transparent = || Some("transparent".to_string());

    match input.variant {
        "filled" => {
            let hover = match &parsed {
                ThemeColor::Palette { name, shade, .. } => {
                    let next = if *shade == 9 { 8 } else { shade + 1 };
                    theme
                        .shade(name, next)
                        .map(|c| c.to_css())
                        .unwrap_or_else(|| css.clone())
                }
                ThemeColor::Literal(color) => color.darken(0.1).to_css(),
                ThemeColor::Raw(raw) => raw.clone(),
            };
            let text = if input.auto_contrast.unwrap_or(theme.auto_contrast) {
                theme.contrast_color(&css)
            } else {
                theme.white
            }
            .to_css();

            VariantColors {
                background: Some(css),
                hover: Some(hover),
                color: Some(text.clone()),
                hover_color: Some(text),
                border: Some(border("transparent")),
            }
        }
        "light" => VariantColors {
            background: Some(alpha(&parsed, 0.1)),
            hover: Some(alpha(&parsed, 0.12)),
            color: Some(css.clone()),
            hover_color: Some(css),
            border: Some(border("transparent")),
        },
        "outline" => VariantColors {
            background: transparent(),
            hover: Some(alpha(&parsed, 0.05)),
            color: Some(css.clone()),
            hover_color: Some(css.clone()),
            border: Some(border(&css)),
        },
        "subtle" => VariantColors {
            background: transparent(),
            hover: Some(alpha(&parsed, 0.12)),
            color: Some(css.clone()),
            hover_color: Some(css),
            border: Some(border("transparent")),
        },
        "transparent" => VariantColors {
            background: transparent(),
            hover: transparent(),
            color: Some(css.clone()),
            hover_color: Some(css),
            border: Some(border("transparent")),
        },
        "white" => VariantColors {
            background: Some(theme.white.to_css()),
            hover: Some(theme.white.darken(0.01).to_css()),
            color: Some(css.clone()),
            hover_color: Some(css),
            border: Some(border("transparent")),
        },
        "default" => {
            let shade = |name: &str, index: u8, fallback: Color| {
                theme.shade(name, index).unwrap_or(fallback).to_css()
            };
            match theme.color_scheme {
                ColorScheme::Light => VariantColors {
                    background: Some(theme.white.to_css()),
                    hover: Some(shade("gray", 0, theme.white)),
                    color: Some(theme.black.to_css()),
                    hover_color: Some(theme.black.to_css()),
                    border: Some(border(&shade("gray", 4, theme.black))),
                },
                ColorScheme::Dark => VariantColors {
                    background: Some(shade("dark", 6, theme.black)),
                    hover: Some(shade("dark", 5, theme.black)),
                    color: Some(theme.white.to_css()),
                    hover_color: Some(theme.white.to_css()),
                    border: Some(border(&shade("dark", 4, theme.white))),
                },
            }
        }
        other => {
            tracing::trace!("no variant colors for variant {other:?}");
            VariantColors::default()
        }
    }
}
