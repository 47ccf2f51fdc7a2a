//! Google Gemini generateContent.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use typer_core::ProviderKind;

use super::{send_json, CorrectionProvider, ProviderError};

// === API Request/Response Types ===

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn with_client(
        client: Client,
        base_url: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl CorrectionProvider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn correct(&self, text: &str, prompt: &str) -> Result<String, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        // Gemini has no system role here; the prompt is prepended to the text
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(format!("{prompt}\n\n{text}")),
                }],
            }],
        };

        tracing::debug!(%url, model = %self.model, "requesting gemini correction");

        let builder = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request);
        let response: GenerateResponse = send_json(builder, ProviderKind::Gemini).await?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or(ProviderError::BadResponse(ProviderKind::Gemini.name()))
    }
}
