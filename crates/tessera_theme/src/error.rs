//! Theme error types

use thiserror::Error;

/// Errors raised while building a theme from configuration
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("failed to parse theme config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown theme preset: {0}")]
    UnknownPreset(String),

    #[error("unknown palette color: {0}")]
    UnknownColor(String),

    #[error("palette {name:?} is invalid: {reason}")]
    InvalidPalette { name: String, reason: String },

    #[error("shade index {0} is out of range (0-9)")]
    InvalidShade(u8),

    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f64,
    },
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
