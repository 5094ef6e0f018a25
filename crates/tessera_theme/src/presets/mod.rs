//! Built-in theme presets.

use std::fmt::{Display, Formatter};

use crate::theme::{ColorScheme, PrimaryShade, Theme};
use crate::tokens::{ColorShades, SizeToken};

/// Built-in theme preset catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    /// Blue primary on the Open Color palette.
    Default,
    /// Violet primary.
    Violet,
    /// Teal primary with larger radii.
    Teal,
    /// Slate palette primary with auto-contrast enabled.
    Slate,
}

impl ThemePreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Violet => "violet",
            Self::Teal => "teal",
            Self::Slate => "slate",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Default => "Tessera",
            Self::Violet => "Violet",
            Self::Teal => "Teal",
            Self::Slate => "Slate",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 4] = [
            ThemePreset::Default,
            ThemePreset::Violet,
            ThemePreset::Teal,
            ThemePreset::Slate,
        ];
        &PRESETS
    }

    /// Look a preset up by [`ThemePreset::id`].
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.id() == id)
    }

    /// Build the light theme for this preset.
    pub fn theme(self) -> Theme {
        self.theme_for(ColorScheme::Light)
    }

    /// Build the theme for this preset in the given scheme.
    pub fn theme_for(self, scheme: ColorScheme) -> Theme {
        let base = Theme::default()
            .with_name(self.display_name())
            .with_color_scheme(scheme);

        match self {
            Self::Default => base,
            Self::Violet => base.with_primary_color("violet"),
            Self::Teal => {
                let mut theme = base
                    .with_primary_color("teal")
                    .with_default_radius(SizeToken::Md);
                theme.radius = crate::tokens::Scale::from_px([4.0, 6.0, 10.0, 14.0, 20.0]);
                theme
            }
            Self::Slate => base
                .with_palette("slate", ColorShades::from_hex(SLATE))
                .with_primary_color("slate")
                .with_primary_shade(PrimaryShade { light: 7, dark: 4 })
                .with_auto_contrast(true),
        }
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Convenience free function for ergonomic imports.
pub fn preset_theme(preset: ThemePreset) -> Theme {
    preset.theme()
}

const SLATE: [u32; 10] = [
    0xF8FAFC, 0xF1F5F9, 0xE2E8F0, 0xCBD5E1, 0x94A3B8, 0x64748B, 0x475569, 0x334155, 0x1E293B,
    0x0F172A,
];
