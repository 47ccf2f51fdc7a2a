//! LLM providers that rewrite text.

pub mod gemini;
pub mod grok;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use typer_core::ProviderKind;

use crate::config::AppConfig;

pub use gemini::GeminiProvider;
pub use grok::GrokProvider;

/// Provider errors.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("No {0} API key set. Open Settings.")]
    MissingApiKey(&'static str),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{provider} error: {status} - {message}")]
    Backend {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("Unexpected response from {0}.")]
    BadResponse(&'static str),
}

/// A service that returns a corrected version of `text`.
#[async_trait]
pub trait CorrectionProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    fn model(&self) -> &str;

    /// Send `text` with the instruction `prompt` and return the rewrite as received.
    async fn correct(&self, text: &str, prompt: &str) -> Result<String, ProviderError>;
}

/// Construct the provider for `kind`, failing if no API key is configured.
pub fn build_provider(
    kind: ProviderKind,
    api_key: Option<String>,
    model: &str,
    config: &AppConfig,
) -> Result<Box<dyn CorrectionProvider>, ProviderError> {
    let api_key = api_key
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or(ProviderError::MissingApiKey(kind.name()))?;
    let client = http_client(config.request_timeout)?;

    let provider: Box<dyn CorrectionProvider> = match kind {
        ProviderKind::Grok => Box::new(GrokProvider::with_client(
            client,
            &config.grok_base_url,
            api_key,
            model,
        )),
        ProviderKind::Gemini => Box::new(GeminiProvider::with_client(
            client,
            &config.gemini_base_url,
            api_key,
            model,
        )),
    };
    Ok(provider)
}

pub(crate) fn http_client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Network(e.to_string()))
}

/// Send a request and decode a JSON body, mapping failures per provider.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    kind: ProviderKind,
) -> Result<T, ProviderError> {
    let resp = request
        .send()
        .await
        .map_err(|e| ProviderError::Network(e.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let message = resp.text().await.unwrap_or_default();
        return Err(ProviderError::Backend {
            provider: kind.name(),
            status,
            message,
        });
    }

    resp.json().await.map_err(|e| {
        tracing::debug!(provider = kind.as_str(), error = %e, "undecodable provider response");
        ProviderError::BadResponse(kind.name())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_reported_per_provider() {
        let config = AppConfig::default();

        let err = build_provider(ProviderKind::Grok, None, "grok-3-mini", &config)
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "No Grok API key set. Open Settings.");

        let err = build_provider(
            ProviderKind::Gemini,
            Some("   ".to_string()),
            "gemini-2.5-flash",
            &config,
        )
        .err()
        .unwrap();
        assert_eq!(err.to_string(), "No Gemini API key set. Open Settings.");
    }

    #[test]
    fn test_build_provider_selects_backend() {
        let config = AppConfig::default();
        let provider =
            build_provider(ProviderKind::Gemini, Some("k".into()), "gemini-2.0-flash", &config)
                .unwrap();
        assert_eq!(provider.kind(), ProviderKind::Gemini);
        assert_eq!(provider.model(), "gemini-2.0-flash");
    }

    #[test]
    fn test_bad_response_message() {
        let err = ProviderError::BadResponse(ProviderKind::Grok.name());
        assert_eq!(err.to_string(), "Unexpected response from Grok.");
    }
}
