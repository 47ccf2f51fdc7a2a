//! Runtime configuration from the environment.
//!
//! Values are read after loading an optional `.env` file:
//! - `TYPER_DATA_DIR`: directory holding `typer.db`
//! - `TYPER_GROK_BASE_URL` / `TYPER_GEMINI_BASE_URL`: provider endpoints
//! - `TYPER_REQUEST_TIMEOUT_SECS`: per-request timeout for provider calls
//! - `TYPER_SECRET_BACKEND`: `keyring` (default) or `memory`
//! - `TYPER_GROK_API_KEY` / `TYPER_GEMINI_API_KEY`: seed keys for the `memory` backend

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use typer_core::ProviderKind;

pub const DEFAULT_GROK_BASE_URL: &str = "https://api.x.ai";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const APP_DIR: &str = "typer";
const DB_FILE: &str = "typer.db";

/// Where API keys are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretBackend {
    /// OS credential store (Keychain, Credential Manager, kernel keyring).
    Keyring,
    /// Process memory only, seeded from `TYPER_*_API_KEY`. Keys set at
    /// runtime are lost on exit, so one-shot CLI use needs the variables.
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub grok_base_url: String,
    pub gemini_base_url: String,
    pub request_timeout: Duration,
    pub secret_backend: SecretBackend,
    /// API keys from the environment, by secret name. Only the memory backend reads these.
    pub env_api_keys: HashMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            grok_base_url: DEFAULT_GROK_BASE_URL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            secret_backend: SecretBackend::Keyring,
            env_api_keys: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load from process environment, honouring a `.env` file if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unset or invalid values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("TYPER_DATA_DIR").filter(|s| !s.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup("TYPER_GROK_BASE_URL").filter(|s| !s.is_empty()) {
            config.grok_base_url = url;
        }
        if let Some(url) = lookup("TYPER_GEMINI_BASE_URL").filter(|s| !s.is_empty()) {
            config.gemini_base_url = url;
        }
        if let Some(raw) = lookup("TYPER_REQUEST_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %raw, "invalid TYPER_REQUEST_TIMEOUT_SECS, using default"),
            }
        }
        if let Some(raw) = lookup("TYPER_SECRET_BACKEND") {
            match raw.as_str() {
                "keyring" => config.secret_backend = SecretBackend::Keyring,
                "memory" => config.secret_backend = SecretBackend::Memory,
                _ => tracing::warn!(value = %raw, "unknown TYPER_SECRET_BACKEND, using keyring"),
            }
        }

        for kind in ProviderKind::ALL {
            let name = kind.api_key_name();
            let var = format!("TYPER_{}", name.to_uppercase());
            if let Some(key) = lookup(&var).map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
                config.env_api_keys.insert(name.to_string(), key);
            }
        }

        config
    }

    /// Path of the SQLite database.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }
}

fn default_data_dir() -> PathBuf {
    // Fall back to the working directory when no platform data dir exists
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
