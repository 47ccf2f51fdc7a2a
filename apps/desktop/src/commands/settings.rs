//! Settings commands. Every mutation is saved before returning.

use crate::db::SettingsRepository;
use crate::state::AppState;
use typer_core::types::{ProviderKind, Settings, Theme, DEFAULT_PROMPT};
use typer_core::ValueError;

use super::CommandError;

/// Whether an API key is stored for a provider. The key itself is never returned.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiKeyStatus {
    pub provider: ProviderKind,
    pub configured: bool,
}

/// Load current settings.
pub fn get_settings(state: &AppState) -> Result<Settings, CommandError> {
    let repo = state.repository.lock().expect("repository lock");
    repo.get_settings().map_err(Into::into)
}

/// Replace all settings.
pub fn save_settings(settings: &Settings, state: &AppState) -> Result<(), CommandError> {
    let repo = state.repository.lock().expect("repository lock");
    repo.save_settings(settings).map_err(Into::into)
}

/// Load, apply `change`, and save under a single lock.
fn update_settings<F>(state: &AppState, change: F) -> Result<Settings, CommandError>
where
    F: FnOnce(&mut Settings) -> Result<(), ValueError>,
{
    let repo = state.repository.lock().expect("repository lock");
    let mut settings = repo.get_settings()?;
    change(&mut settings)?;
    repo.save_settings(&settings)?;
    Ok(settings)
}

pub fn set_default_provider(
    provider: ProviderKind,
    state: &AppState,
) -> Result<Settings, CommandError> {
    let settings = update_settings(state, |s| {
        s.default_provider = provider;
        Ok(())
    })?;
    tracing::info!(provider = provider.as_str(), "default provider changed");
    Ok(settings)
}

pub fn set_model(
    provider: ProviderKind,
    model: &str,
    state: &AppState,
) -> Result<Settings, CommandError> {
    update_settings(state, |s| s.set_model(provider, model))
}

/// Set the instruction prompt. A blank prompt restores the default.
pub fn set_prompt(prompt: &str, state: &AppState) -> Result<Settings, CommandError> {
    let prompt = prompt.trim();
    update_settings(state, |s| {
        s.custom_prompt = if prompt.is_empty() {
            DEFAULT_PROMPT.to_string()
        } else {
            prompt.to_string()
        };
        Ok(())
    })
}

pub fn set_theme(theme: Theme, state: &AppState) -> Result<Settings, CommandError> {
    update_settings(state, |s| {
        s.theme = theme;
        Ok(())
    })
}

pub fn set_font_size(size: u32, state: &AppState) -> Result<Settings, CommandError> {
    update_settings(state, |s| s.set_font_size(size))
}

pub fn get_api_key_status(state: &AppState) -> Result<Vec<ApiKeyStatus>, CommandError> {
    ProviderKind::ALL
        .iter()
        .map(|&provider| -> Result<ApiKeyStatus, CommandError> {
            let configured = state.secrets.get(provider.api_key_name())?.is_some();
            Ok(ApiKeyStatus {
                provider,
                configured,
            })
        })
        .collect()
}

/// Store an API key. An empty key removes it.
pub fn set_api_key(provider: ProviderKind, key: &str, state: &AppState) -> Result<(), CommandError> {
    let key = key.trim();
    state.secrets.set(provider.api_key_name(), key)?;
    tracing::info!(
        provider = provider.as_str(),
        cleared = key.is_empty(),
        "api key updated"
    );
    Ok(())
}

pub fn get_launch_at_login(state: &AppState) -> bool {
    state.login_item.is_enabled()
}

/// Returns the state after the change.
pub fn set_launch_at_login(enabled: bool, state: &AppState) -> Result<bool, CommandError> {
    state.login_item.set_enabled(enabled)?;
    Ok(state.login_item.is_enabled())
}
