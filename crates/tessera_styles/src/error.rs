//! Styles engine error types

use tessera_theme::ThemeError;
use thiserror::Error;

/// Errors raised while rendering components
#[derive(Error, Debug)]
pub enum StylesError {
    /// A compound part was rendered outside of its root component
    #[error("{component} must be rendered inside <{root}>: {root} context was not found in the tree")]
    MissingContext {
        root: &'static str,
        component: String,
    },

    /// Theme configuration could not be built
    #[error(transparent)]
    Theme(#[from] ThemeError),

    /// Provider configuration could not be parsed
    #[error("failed to parse provider config: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for styles engine operations
pub type Result<T> = std::result::Result<T, StylesError>;
