//! Common test utilities for integration tests.
//!
//! Provides:
//! - `test_state` wiring an in-memory database and secret store to a mock server
//! - Canned provider response bodies

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use typer_core::ProviderKind;
use typer_desktop::config::{AppConfig, SecretBackend};
use typer_desktop::db::SqliteRepository;
use typer_desktop::secrets::MemorySecretStore;
use typer_desktop::state::AppState;

/// Config pointing both providers at `base_url`.
pub fn test_config(base_url: &str, data_dir: &Path) -> AppConfig {
    AppConfig {
        data_dir: data_dir.to_path_buf(),
        grok_base_url: base_url.to_string(),
        gemini_base_url: base_url.to_string(),
        request_timeout: Duration::from_secs(5),
        secret_backend: SecretBackend::Memory,
        env_api_keys: HashMap::new(),
    }
}

/// State with an in-memory database and no API keys.
pub fn test_state(base_url: &str) -> AppState {
    AppState::new(
        test_config(base_url, &std::env::temp_dir()),
        SqliteRepository::open_in_memory().expect("in-memory database"),
        Arc::new(MemorySecretStore::default()),
    )
}

/// State with an API key stored for `provider`.
pub fn test_state_with_key(base_url: &str, provider: ProviderKind, key: &str) -> AppState {
    let state = test_state(base_url);
    state
        .secrets
        .set(provider.api_key_name(), key)
        .expect("store api key");
    state
}

/// Grok chat completion body returning `content`.
pub fn grok_reply(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// Gemini generateContent body returning `text`.
pub fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}
