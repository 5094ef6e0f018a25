//! Size scales (spacing, radius, font sizes, line heights, breakpoints)

use serde::Deserialize;
use tessera_core::rem;

/// Named scale key
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeToken {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl SizeToken {
    pub const ALL: [SizeToken; 5] = [
        SizeToken::Xs,
        SizeToken::Sm,
        SizeToken::Md,
        SizeToken::Lg,
        SizeToken::Xl,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "xs" => Some(Self::Xs),
            "sm" => Some(Self::Sm),
            "md" => Some(Self::Md),
            "lg" => Some(Self::Lg),
            "xl" => Some(Self::Xl),
            _ => None,
        }
    }
}

/// Which theme scale a lookup targets
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ScaleKind {
    Spacing,
    Radius,
    FontSize,
    LineHeight,
    Breakpoint,
}

impl ScaleKind {
    pub const ALL: [ScaleKind; 5] = [
        ScaleKind::Spacing,
        ScaleKind::Radius,
        ScaleKind::FontSize,
        ScaleKind::LineHeight,
        ScaleKind::Breakpoint,
    ];

    /// Variable name segment: `--tessera-{segment}-{key}`
    pub fn segment(self) -> &'static str {
        match self {
            Self::Spacing => "spacing",
            Self::Radius => "radius",
            Self::FontSize => "font-size",
            Self::LineHeight => "line-height",
            Self::Breakpoint => "breakpoint",
        }
    }

    /// `--tessera-spacing-md`
    pub fn var_name(self, token: SizeToken) -> String {
        format!("--tessera-{}-{}", self.segment(), token.key())
    }
}

/// Five-step scale of CSS values
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scale {
    pub xs: String,
    pub sm: String,
    pub md: String,
    pub lg: String,
    pub xl: String,
}

impl Scale {
    pub fn new(values: [&str; 5]) -> Self {
        let [xs, sm, md, lg, xl] = values.map(str::to_string);
        Self { xs, sm, md, lg, xl }
    }

    /// Pixel values, emitted as scale-aware rem expressions
    pub fn from_px(px: [f64; 5]) -> Self {
        let [xs, sm, md, lg, xl] = px.map(rem);
        Self { xs, sm, md, lg, xl }
    }

    pub fn get(&self, token: SizeToken) -> &str {
        match token {
            SizeToken::Xs => &self.xs,
            SizeToken::Sm => &self.sm,
            SizeToken::Md => &self.md,
            SizeToken::Lg => &self.lg,
            SizeToken::Xl => &self.xl,
        }
    }

    pub fn set(&mut self, token: SizeToken, value: impl Into<String>) {
        let slot = match token {
            SizeToken::Xs => &mut self.xs,
            SizeToken::Sm => &mut self.sm,
            SizeToken::Md => &mut self.md,
            SizeToken::Lg => &mut self.lg,
            SizeToken::Xl => &mut self.xl,
        };
        *slot = value.into();
    }

    pub fn iter(&self) -> impl Iterator<Item = (SizeToken, &str)> {
        SizeToken::ALL.into_iter().map(move |t| (t, self.get(t)))
    }

    pub fn spacing() -> Self {
        Self::from_px([10.0, 12.0, 16.0, 20.0, 32.0])
    }

    pub fn radius() -> Self {
        Self::from_px([2.0, 4.0, 8.0, 16.0, 32.0])
    }

    pub fn font_sizes() -> Self {
        Self::from_px([12.0, 14.0, 16.0, 18.0, 20.0])
    }

    pub fn line_heights() -> Self {
        Self::new(["1.4", "1.45", "1.55", "1.6", "1.65"])
    }

    pub fn breakpoints() -> Self {
        Self::new(["36em", "48em", "62em", "75em", "88em"])
    }
}

/// Partial scale used by configuration files
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleOverrides {
    pub xs: Option<String>,
    pub sm: Option<String>,
    pub md: Option<String>,
    pub lg: Option<String>,
    pub xl: Option<String>,
}

impl ScaleOverrides {
    pub fn apply(&self, scale: &mut Scale) {
        let entries = [
            (SizeToken::Xs, &self.xs),
            (SizeToken::Sm, &self.sm),
            (SizeToken::Md, &self.md),
            (SizeToken::Lg, &self.lg),
            (SizeToken::Xl, &self.xl),
        ];
        for (token, value) in entries {
            if let Some(value) = value {
                scale.set(token, value.clone());
            }
        }
    }
}
