//! Error types for typer-core.

use thiserror::Error;

/// Result type alias using ValueError.
pub type Result<T> = std::result::Result<T, ValueError>;

/// Errors raised when a setting value cannot be parsed or is out of range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    #[error("unknown model {model} for {provider}")]
    UnknownModel { provider: String, model: String },

    #[error("font size {size} out of range ({min}-{max})")]
    InvalidFontSize { size: u32, min: u32, max: u32 },
}
