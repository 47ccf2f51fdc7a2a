//! Commands exposed to the front-end.

pub mod fix;
pub mod settings;
pub mod stats;

pub use fix::{fix_text, FixResponse};
pub use settings::{
    get_api_key_status, get_launch_at_login, get_settings, save_settings, set_api_key,
    set_default_provider, set_font_size, set_launch_at_login, set_model, set_prompt, set_theme,
    ApiKeyStatus,
};
pub use stats::{get_usage_stats, reset_usage_stats};

/// Error returned to the front-end as a displayable message.
#[derive(Debug, serde::Serialize, serde::Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<crate::db::DbError> for CommandError {
    fn from(e: crate::db::DbError) -> Self {
        Self::new(format!("Database error: {}", e))
    }
}

impl From<crate::providers::ProviderError> for CommandError {
    fn from(e: crate::providers::ProviderError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<crate::secrets::SecretError> for CommandError {
    fn from(e: crate::secrets::SecretError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<crate::login_item::LoginItemError> for CommandError {
    fn from(e: crate::login_item::LoginItemError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<typer_core::ValueError> for CommandError {
    fn from(e: typer_core::ValueError) -> Self {
        Self::new(e.to_string())
    }
}
