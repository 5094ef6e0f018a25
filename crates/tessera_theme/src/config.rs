//! TOML theme configuration
//!
//! ```toml
//! preset = "violet"
//! color_scheme = "dark"
//! primary_color = "brand"
//! auto_contrast = true
//!
//! [colors]
//! brand = ["#e6f7ff", "#bae7ff", "#91d5ff", "#69c0ff", "#40a9ff",
//!          "#1890ff", "#096dd9", "#0050b3", "#003a8c", "#002766"]
//!
//! [spacing]
//! md = "1.125rem"
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Result, ThemeError};
use crate::presets::ThemePreset;
use crate::theme::{ColorScheme, PrimaryShade, Theme};
use crate::tokens::{ColorShades, ScaleKind, ScaleOverrides, SizeToken};

/// Theme description loaded from configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Base preset id; defaults to `"default"`
    pub preset: Option<String>,
    pub name: Option<String>,
    pub color_scheme: Option<ColorScheme>,
    pub primary_color: Option<String>,
    pub primary_shade: Option<PrimaryShade>,
    /// Extra or replacement palettes, ten CSS colors each
    pub colors: IndexMap<String, Vec<String>>,
    pub spacing: ScaleOverrides,
    pub radius: ScaleOverrides,
    pub font_sizes: ScaleOverrides,
    pub line_heights: ScaleOverrides,
    pub breakpoints: ScaleOverrides,
    pub default_radius: Option<SizeToken>,
    pub scale: Option<f64>,
    pub font_family: Option<String>,
    pub auto_contrast: Option<bool>,
    pub luminance_threshold: Option<f32>,
}

impl ThemeConfig {
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Build a theme: preset first, then every configured field on top
    pub fn build(&self) -> Result<Theme> {
        let preset = match self.preset.as_deref() {
            Some(id) => {
                ThemePreset::from_id(id).ok_or_else(|| ThemeError::UnknownPreset(id.to_string()))?
            }
            None => ThemePreset::Default,
        };

        let mut theme = preset.theme();
        self.apply(&mut theme)?;
        Ok(theme)
    }

    /// Apply configured fields onto an existing theme
    pub fn apply(&self, theme: &mut Theme) -> Result<()> {
        for (name, values) in &self.colors {
            let shades = ColorShades::parse(values).ok_or_else(|| ThemeError::InvalidPalette {
                name: name.clone(),
                reason: format!("expected 10 CSS colors, got {:?}", values),
            })?;
            theme.colors.insert(name.clone(), shades);
        }

        if let Some(name) = &self.name {
            theme.name = name.clone();
        }
        if let Some(scheme) = self.color_scheme {
            theme.color_scheme = scheme;
        }
        if let Some(primary) = &self.primary_color {
            theme.primary_color = primary.clone();
        }
        if !theme.colors.contains_key(&theme.primary_color) {
            return Err(ThemeError::UnknownColor(theme.primary_color.clone()));
        }
        if let Some(shade) = self.primary_shade {
            for index in [shade.light, shade.dark] {
                if index > 9 {
                    return Err(ThemeError::InvalidShade(index));
                }
            }
            theme.primary_shade = shade;
        }

        let scales = [
            (ScaleKind::Spacing, &self.spacing),
            (ScaleKind::Radius, &self.radius),
            (ScaleKind::FontSize, &self.font_sizes),
            (ScaleKind::LineHeight, &self.line_heights),
            (ScaleKind::Breakpoint, &self.breakpoints),
        ];
        for (kind, overrides) in scales {
            overrides.apply(theme.scale_mut(kind));
        }

        if let Some(token) = self.default_radius {
            theme.default_radius = token;
        }
        if let Some(scale) = self.scale {
            if scale <= 0.0 || !scale.is_finite() {
                return Err(ThemeError::OutOfRange {
                    field: "scale",
                    expected: "a positive number",
                    value: scale,
                });
            }
            theme.scale = scale;
        }
        if let Some(family) = &self.font_family {
            theme.font_family = family.clone();
        }
        if let Some(auto_contrast) = self.auto_contrast {
            theme.auto_contrast = auto_contrast;
        }
        if let Some(threshold) = self.luminance_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ThemeError::OutOfRange {
                    field: "luminance_threshold",
                    expected: "between 0 and 1",
                    value: f64::from(threshold),
                });
            }
            theme.luminance_threshold = threshold;
        }

        tracing::debug!(
            "ThemeConfig::apply - theme {:?}, scheme {:?}, primary {:?}",
            theme.name,
            theme.color_scheme,
            theme.primary_color
        );
        Ok(())
    }
}
