//! Settings, secrets and login item persistence tests.

mod common;

use std::sync::Arc;

use common::{test_config, test_state};
use pretty_assertions::assert_eq;
use typer_core::types::{ProviderKind, Settings, Theme, DEFAULT_PROMPT};
use typer_desktop::commands;
use typer_desktop::db::SqliteRepository;
use typer_desktop::login_item::{LoginItemController, LoginItemError};
use typer_desktop::secrets::MemorySecretStore;
use typer_desktop::state::AppState;

const UNUSED_URL: &str = "http://127.0.0.1:9";

/// Settings written through commands survive reopening the database file.
#[test]
fn test_settings_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(UNUSED_URL, dir.path());

    {
        let state = AppState::open(config.clone()).unwrap();
        commands::set_default_provider(ProviderKind::Gemini, &state).unwrap();
        commands::set_model(ProviderKind::Grok, "grok-3-mini", &state).unwrap();
        commands::set_prompt("Make it formal:", &state).unwrap();
        commands::set_theme(Theme::Light, &state).unwrap();
        commands::set_font_size(16, &state).unwrap();
        commands::set_launch_at_login(true, &state).unwrap();
    }

    let state = AppState::open(config).unwrap();
    let settings = commands::get_settings(&state).unwrap();
    assert_eq!(
        settings,
        Settings {
            default_provider: ProviderKind::Gemini,
            grok_model: "grok-3-mini".to_string(),
            gemini_model: "gemini-2.5-flash".to_string(),
            custom_prompt: "Make it formal:".to_string(),
            theme: Theme::Light,
            font_size: 16,
        }
    );
    assert!(commands::get_launch_at_login(&state));
    assert!(dir.path().join("typer.db").exists());
}

#[test]
fn test_invalid_values_are_rejected_and_not_saved() {
    let state = test_state(UNUSED_URL);

    let err = commands::set_model(ProviderKind::Gemini, "gpt-4", &state).unwrap_err();
    assert_eq!(err.message, "unknown model gpt-4 for gemini");

    let err = commands::set_font_size(99, &state).unwrap_err();
    assert_eq!(err.message, "font size 99 out of range (9-32)");

    assert_eq!(commands::get_settings(&state).unwrap(), Settings::default());
}

#[test]
fn test_blank_prompt_restores_default() {
    let state = test_state(UNUSED_URL);
    commands::set_prompt("Shorter please:", &state).unwrap();
    let settings = commands::set_prompt("   ", &state).unwrap();
    assert_eq!(settings.custom_prompt, DEFAULT_PROMPT);
}

#[test]
fn test_save_settings_replaces_everything() {
    let state = test_state(UNUSED_URL);
    let mut settings = Settings::default();
    settings.theme = Theme::Dark;
    settings.default_provider = ProviderKind::Gemini;

    commands::save_settings(&settings, &state).unwrap();
    assert_eq!(commands::get_settings(&state).unwrap(), settings);
}

#[test]
fn test_api_keys_are_stored_and_cleared() {
    let state = test_state(UNUSED_URL);

    let status = commands::get_api_key_status(&state).unwrap();
    assert!(status.iter().all(|s| !s.configured));

    commands::set_api_key(ProviderKind::Gemini, "  gm-key \n", &state).unwrap();
    assert_eq!(
        state.secrets.get("gemini_api_key").unwrap().as_deref(),
        Some("gm-key")
    );
    let status = commands::get_api_key_status(&state).unwrap();
    assert_eq!(
        status
            .iter()
            .map(|s| (s.provider, s.configured))
            .collect::<Vec<_>>(),
        vec![(ProviderKind::Grok, false), (ProviderKind::Gemini, true)]
    );

    commands::set_api_key(ProviderKind::Gemini, "", &state).unwrap();
    assert_eq!(state.secrets.get("gemini_api_key").unwrap(), None);
}

/// The memory backend starts from keys given in the environment, so each
/// fresh process sees them.
#[test]
fn test_memory_backend_is_seeded_from_env_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(UNUSED_URL, dir.path());
    config
        .env_api_keys
        .insert(ProviderKind::Grok.api_key_name().to_string(), "xai-env".to_string());

    for _ in 0..2 {
        let state = AppState::open(config.clone()).unwrap();
        let status = commands::get_api_key_status(&state).unwrap();
        assert_eq!(
            status
                .iter()
                .map(|s| (s.provider, s.configured))
                .collect::<Vec<_>>(),
            vec![(ProviderKind::Grok, true), (ProviderKind::Gemini, false)]
        );
    }
}

#[test]
fn test_reset_usage_stats() {
    let state = test_state(UNUSED_URL);
    {
        use typer_desktop::db::StatsRepository;
        let repo = state.repository.lock().unwrap();
        repo.record_fix(42, 5).unwrap();
    }
    assert_eq!(commands::get_usage_stats(&state).unwrap().total_fixes, 1);

    commands::reset_usage_stats(&state).unwrap();
    let stats = commands::get_usage_stats(&state).unwrap();
    assert_eq!(stats.total_fixes, 0);
    assert_eq!(stats.characters_fixed, 0);
    assert_eq!(stats.last_fixed_at, None);
}

/// A controller that refuses changes, like a denied OS registration.
struct DeniedLoginItem;

impl LoginItemController for DeniedLoginItem {
    fn is_enabled(&self) -> bool {
        false
    }

    fn set_enabled(&self, _enabled: bool) -> Result<(), LoginItemError> {
        Err(LoginItemError::Db(typer_desktop::db::DbError::InvalidData(
            "registration denied".to_string(),
        )))
    }
}

#[test]
fn test_login_item_failure_is_reported() {
    let state = AppState::new(
        test_config(UNUSED_URL, &std::env::temp_dir()),
        SqliteRepository::open_in_memory().unwrap(),
        Arc::new(MemorySecretStore::default()),
    )
    .with_login_item(Box::new(DeniedLoginItem));

    let err = commands::set_launch_at_login(true, &state).unwrap_err();
    assert!(err.message.contains("registration denied"));
    assert!(!commands::get_launch_at_login(&state));
}
