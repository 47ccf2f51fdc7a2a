//! xAI Grok chat completions.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use typer_core::ProviderKind;

use super::{send_json, CorrectionProvider, ProviderError};

// === API Request/Response Types ===

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub struct GrokProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GrokProvider {
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
impl CorrectionProvider for GrokProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Grok
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn correct(&self, text: &str, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: prompt,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
        };

        tracing::debug!(%url, model = %self.model, "requesting grok correction");

        let builder = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request);
        let response: ChatResponse = send_json(builder, ProviderKind::Grok).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or(ProviderError::BadResponse(ProviderKind::Grok.name()))
    }
}
