//! Color palettes

use indexmap::IndexMap;
use tessera_core::Color;

/// Ten shades of one named color, lightest (0) to darkest (9)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorShades(pub [Color; 10]);

impl ColorShades {
    pub fn from_hex(hexes: [u32; 10]) -> Self {
        Self(hexes.map(Color::from_hex))
    }

    /// Parse ten CSS color literals
    pub fn parse<S: AsRef<str>>(values: &[S]) -> Option<Self> {
        if values.len() != 10 {
            return None;
        }
        let mut shades = [Color::BLACK; 10];
        for (slot, value) in shades.iter_mut().zip(values) {
            *slot = Color::parse(value.as_ref())?;
        }
        Some(Self(shades))
    }

    /// Shade by index; indices past 9 clamp to the darkest shade
    pub fn shade(&self, index: u8) -> Color {
        self.0[usize::from(index.min(9))]
    }
}

/// Open Color based default palette
pub mod open_color {
    pub const DARK: [u32; 10] = [
        0xC9C9C9, 0xB8B8B8, 0x828282, 0x696969, 0x424242, 0x3B3B3B, 0x2E2E2E, 0x242424, 0x1F1F1F,
        0x141414,
    ];
    pub const GRAY: [u32; 10] = [
        0xF8F9FA, 0xF1F3F5, 0xE9ECEF, 0xDEE2E6, 0xCED4DA, 0xADB5BD, 0x868E96, 0x495057, 0x343A40,
        0x212529,
    ];
    pub const RED: [u32; 10] = [
        0xFFF5F5, 0xFFE3E3, 0xFFC9C9, 0xFFA8A8, 0xFF8787, 0xFF6B6B, 0xFA5252, 0xF03E3E, 0xE03131,
        0xC92A2A,
    ];
    pub const PINK: [u32; 10] = [
        0xFFF0F6, 0xFFDEEB, 0xFCC2D7, 0xFAA2C1, 0xF783AC, 0xF06595, 0xE64980, 0xD6336C, 0xC2255C,
        0xA61E4D,
    ];
    pub const GRAPE: [u32; 10] = [
        0xF8F0FC, 0xF3D9FA, 0xEEBEFA, 0xE599F7, 0xDA77F2, 0xCC5DE8, 0xBE4BDB, 0xAE3EC9, 0x9C36B5,
        0x862E9C,
    ];
    pub const VIOLET: [u32; 10] = [
        0xF3F0FF, 0xE5DBFF, 0xD0BFFF, 0xB197FC, 0x9775FA, 0x845EF7, 0x7950F2, 0x7048E8, 0x6741D9,
        0x5F3DC4,
    ];
    pub const INDIGO: [u32; 10] = [
        0xEDF2FF, 0xDBE4FF, 0xBAC8FF, 0x91A7FF, 0x748FFC, 0x5C7CFA, 0x4C6EF5, 0x4263EB, 0x3B5BDB,
        0x364FC7,
    ];
    pub const BLUE: [u32; 10] = [
        0xE7F5FF, 0xD0EBFF, 0xA5D8FF, 0x74C0FC, 0x4DABF7, 0x339AF0, 0x228BE6, 0x1C7ED6, 0x1971C2,
        0x1864AB,
    ];
    pub const CYAN: [u32; 10] = [
        0xE3FAFC, 0xC5F6FA, 0x99E9F2, 0x66D9E8, 0x3BC9DB, 0x22B8CF, 0x15AABF, 0x1098AD, 0x0C8599,
        0x0B7285,
    ];
    pub const TEAL: [u32; 10] = [
        0xE6FCF5, 0xC3FAE8, 0x96F2D7, 0x63E6BE, 0x38D9A9, 0x20C997, 0x12B886, 0x0CA678, 0x099268,
        0x087F5B,
    ];
    pub const GREEN: [u32; 10] = [
        0xEBFBEE, 0xD3F9D8, 0xB2F2BB, 0x8CE99A, 0x69DB7C, 0x51CF66, 0x40C057, 0x37B24D, 0x2F9E44,
        0x2B8A3E,
    ];
    pub const LIME: [u32; 10] = [
        0xF4FCE3, 0xE9FAC8, 0xD8F5A2, 0xC0EB75, 0xA9E34B, 0x94D82D, 0x82C91E, 0x74B816, 0x66A80F,
        0x5C940D,
    ];
    pub const YELLOW: [u32; 10] = [
        0xFFF9DB, 0xFFF3BF, 0xFFEC99, 0xFFE066, 0xFFD43B, 0xFCC419, 0xFAB005, 0xF59F00, 0xF08C00,
        0xE67700,
    ];
    pub const ORANGE: [u32; 10] = [
        0xFFF4E6, 0xFFE8CC, 0xFFD8A8, 0xFFC078, 0xFFA94D, 0xFF922B, 0xFD7E14, 0xF76707, 0xE8590C,
        0xD9480F,
    ];
}

/// Default named palettes, in the order they are emitted as CSS variables
pub fn default_palette() -> IndexMap<String, ColorShades> {
    use open_color::*;

    [
        ("dark", DARK),
        ("gray", GRAY),
        ("red", RED),
        ("pink", PINK),
        ("grape", GRAPE),
        ("violet", VIOLET),
        ("indigo", INDIGO),
        ("blue", BLUE),
        ("cyan", CYAN),
        ("teal", TEAL),
        ("green", GREEN),
        ("lime", LIME),
        ("yellow", YELLOW),
        ("orange", ORANGE),
    ]
    .into_iter()
    .map(|(name, hexes)| (name.to_string(), ColorShades::from_hex(hexes)))
    .collect()
}
