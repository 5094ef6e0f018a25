//! Theme object consumed by vars resolvers

use indexmap::IndexMap;
use serde::Deserialize;
use tessera_core::Color;

use crate::tokens::{default_palette, ColorShades, Scale, ScaleKind, SizeToken};
use crate::variant::{VariantColorResolver, VariantColors, VariantColorsInput};

/// Color scheme (light or dark mode)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// Toggle between light and dark
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Which shade of a palette a bare color name resolves to, per scheme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct PrimaryShade {
    pub light: u8,
    pub dark: u8,
}

impl Default for PrimaryShade {
    fn default() -> Self {
        Self { light: 6, dark: 8 }
    }
}

/// Result of parsing a color prop against the theme
#[derive(Clone, Debug, PartialEq)]
pub enum ThemeColor {
    /// A palette entry (`"blue"` or `"blue.3"`)
    Palette { name: String, shade: u8, color: Color },
    /// A literal CSS color (`"#fff"`, `"rgba(...)"`, `"white"`)
    Literal(Color),
    /// Anything else, passed through verbatim (`"var(--x)"`, `"currentColor"`)
    Raw(String),
}

impl ThemeColor {
    /// Concrete color, when one is known
    pub fn color(&self) -> Option<Color> {
        match self {
            Self::Palette { color, .. } | Self::Literal(color) => Some(*color),
            Self::Raw(_) => None,
        }
    }

    pub fn is_theme_color(&self) -> bool {
        matches!(self, Self::Palette { .. })
    }

    pub fn to_css(&self) -> String {
        match self {
            Self::Palette { color, .. } | Self::Literal(color) => color.to_css(),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

/// Global design tokens
#[derive(Clone, Debug)]
pub struct Theme {
    pub name: String,
    pub color_scheme: ColorScheme,
    /// Named palettes, ten shades each
    pub colors: IndexMap<String, ColorShades>,
    /// Palette key used when a component does not name a color
    pub primary_color: String,
    pub primary_shade: PrimaryShade,
    pub white: Color,
    pub black: Color,
    pub spacing: Scale,
    pub radius: Scale,
    pub font_sizes: Scale,
    pub line_heights: Scale,
    pub breakpoints: Scale,
    pub default_radius: SizeToken,
    /// Multiplier applied to every rem value through `--tessera-scale`
    pub scale: f64,
    pub font_family: String,
    /// Pick black/white text on filled backgrounds by luminance
    pub auto_contrast: bool,
    pub luminance_threshold: f32,
    pub variant_color_resolver: VariantColorResolver,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Tessera".to_string(),
            color_scheme: ColorScheme::Light,
            colors: default_palette(),
            primary_color: "blue".to_string(),
            primary_shade: PrimaryShade::default(),
            white: Color::WHITE,
            black: Color::BLACK,
            spacing: Scale::spacing(),
            radius: Scale::radius(),
            font_sizes: Scale::font_sizes(),
            line_heights: Scale::line_heights(),
            breakpoints: Scale::breakpoints(),
            default_radius: SizeToken::Sm,
            scale: 1.0,
            font_family: "-apple-system, BlinkMacSystemFont, Segoe UI, Roboto, Helvetica, Arial, sans-serif"
                .to_string(),
            auto_contrast: false,
            luminance_threshold: 0.3,
            variant_color_resolver: VariantColorResolver::default(),
        }
    }
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Builder ==========

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.color_scheme = scheme;
        self
    }

    pub fn with_primary_color(mut self, key: impl Into<String>) -> Self {
        self.primary_color = key.into();
        self
    }

    pub fn with_primary_shade(mut self, shade: PrimaryShade) -> Self {
        self.primary_shade = shade;
        self
    }

    /// Add or replace a named palette
    pub fn with_palette(mut self, name: impl Into<String>, shades: ColorShades) -> Self {
        self.colors.insert(name.into(), shades);
        self
    }

    pub fn with_auto_contrast(mut self, enabled: bool) -> Self {
        self.auto_contrast = enabled;
        self
    }

    pub fn with_luminance_threshold(mut self, threshold: f32) -> Self {
        self.luminance_threshold = threshold;
        self
    }

    pub fn with_default_radius(mut self, token: SizeToken) -> Self {
        self.default_radius = token;
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_variant_color_resolver(mut self, resolver: VariantColorResolver) -> Self {
        self.variant_color_resolver = resolver;
        self
    }

    // ========== Scales ==========

    pub fn scale(&self, kind: ScaleKind) -> &Scale {
        match kind {
            ScaleKind::Spacing => &self.spacing,
            ScaleKind::Radius => &self.radius,
            ScaleKind::FontSize => &self.font_sizes,
            ScaleKind::LineHeight => &self.line_heights,
            ScaleKind::Breakpoint => &self.breakpoints,
        }
    }

    pub fn scale_mut(&mut self, kind: ScaleKind) -> &mut Scale {
        match kind {
            ScaleKind::Spacing => &mut self.spacing,
            ScaleKind::Radius => &mut self.radius,
            ScaleKind::FontSize => &mut self.font_sizes,
            ScaleKind::LineHeight => &mut self.line_heights,
            ScaleKind::Breakpoint => &mut self.breakpoints,
        }
    }

    /// Breakpoint in pixels. Accepts a scale key (`"sm"`), a bare number
    /// (pixels), or a `px`/`em`/`rem` length.
    pub fn breakpoint_px(&self, value: &str) -> Option<f64> {
        let value = match SizeToken::parse(value) {
            Some(token) => self.breakpoints.get(token),
            None => value,
        }
        .trim();

        if let Ok(px) = value.parse::<f64>() {
            return Some(px);
        }
        if let Some(px) = value.strip_suffix("px") {
            return px.trim().parse().ok();
        }
        let em = value
            .strip_suffix("rem")
            .or_else(|| value.strip_suffix("em"))?;
        em.trim().parse::<f64>().ok().map(|em| em * 16.0)
    }

    // ========== Colors ==========

    /// Shade index a bare palette name resolves to in the current scheme
    pub fn primary_shade_index(&self) -> u8 {
        match self.color_scheme {
            ColorScheme::Light => self.primary_shade.light,
            ColorScheme::Dark => self.primary_shade.dark,
        }
    }

    pub fn palette(&self, name: &str) -> Option<&ColorShades> {
        self.colors.get(name)
    }

    pub fn shade(&self, name: &str, index: u8) -> Option<Color> {
        self.palette(name).map(|shades| shades.shade(index))
    }

    /// Primary color at the current scheme's primary shade
    pub fn primary(&self) -> Color {
        self.shade(&self.primary_color, self.primary_shade_index())
            .unwrap_or(self.black)
    }

    /// Parse a color prop: `"blue"`, `"blue.3"`, a CSS color literal, or a
    /// raw CSS value that is passed through
    pub fn parse_color(&self, value: &str) -> ThemeColor {
        let value = value.trim();
        match value {
            "white" => return ThemeColor::Literal(self.white),
            "black" => return ThemeColor::Literal(self.black),
            _ => {}
        }

        if let Some(shades) = self.colors.get(value) {
            let shade = self.primary_shade_index();
            return ThemeColor::Palette {
                name: value.to_string(),
                shade,
                color: shades.shade(shade),
            };
        }

        if let Some((name, shade)) = value.split_once('.') {
            if let (Some(shades), Ok(shade)) = (self.colors.get(name), shade.parse::<u8>()) {
                if shade <= 9 {
                    return ThemeColor::Palette {
                        name: name.to_string(),
                        shade,
                        color: shades.shade(shade),
                    };
                }
            }
        }

        match Color::parse(value) {
            Some(color) => ThemeColor::Literal(color),
            None => ThemeColor::Raw(value.to_string()),
        }
    }

    /// CSS value for a color prop
    pub fn resolve_color(&self, value: &str) -> String {
        self.parse_color(value).to_css()
    }

    /// Readable text color (black or white) on top of `background`.
    /// Unknown backgrounds get white text.
    pub fn contrast_color(&self, background: &str) -> Color {
        match self.parse_color(background).color() {
            Some(bg) if bg.is_light(self.luminance_threshold) => self.black,
            _ => self.white,
        }
    }

    /// Run the theme's variant color resolver
    pub fn variant_colors(&self, input: &VariantColorsInput<'_>) -> VariantColors {
        self.variant_color_resolver.resolve(input, self)
    }

    // ========== CSS variables ==========

    /// Global custom properties, in emission order
    pub fn css_variables(&self) -> IndexMap<String, String> {
        let mut vars = IndexMap::new();
        vars.insert(
            "--tessera-scale".to_string(),
            tessera_core::format_number(self.scale),
        );
        vars.insert("--tessera-font-family".to_string(), self.font_family.clone());

        for kind in ScaleKind::ALL {
            for (token, value) in self.scale(kind).iter() {
                vars.insert(kind.var_name(token), value.to_string());
            }
        }

        for (name, shades) in &self.colors {
            for (index, color) in shades.0.iter().enumerate() {
                vars.insert(format!("--tessera-color-{name}-{index}"), color.to_css());
            }
        }

        vars.insert(
            "--tessera-primary-color-filled".to_string(),
            self.primary().to_css(),
        );
        vars
    }

    /// `:root { ... }` block carrying [`Theme::css_variables`]
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in self.css_variables() {
            css.push_str(&format!("  {name}: {value};\n"));
        }
        css.push('}');
        css
    }
}
