//! OpenAI chat-completions client.
//!
//! The credential is supplied by the caller on every call; the client is
//! configured once with the endpoint and sampling parameters and holds no
//! secret of its own.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::constants::openai;
use super::{CompletionProvider, LlmError};

/// Gateway configuration. Every field is a tunable; the defaults preserve
/// the service's original behavior.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: openai::API_BASE.to_string(),
            model: openai::DEFAULT_MODEL.to_string(),
            temperature: openai::DEFAULT_TEMPERATURE,
            max_tokens: openai::DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(openai::DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl OpenAiConfig {
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }
}

pub struct OpenAiClient {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let user_agent = format!("levelforge/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                LlmError::Configuration(format!("failed to build reqwest client: {e}"))
            })?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    #[tracing::instrument(name = "openai_complete", skip_all, err)]
    async fn complete(
        &self,
        credential: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, LlmError> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!("{}{}", self.config.base_url, openai::CHAT_COMPLETIONS_ENDPOINT);
        let res = self
            .client
            .post(&url)
            .bearer_auth(credential)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(status = %status, "upstream returned error status");
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Value = serde_json::from_str(&res.text().await?)?;
        let content = extract_message_content(&envelope).unwrap_or_default();
        if content.is_empty() {
            debug!("upstream envelope had no message content");
        }
        Ok(content.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Pull the first choice's message text out of the response envelope.
/// A missing or misshapen path yields `None`, which the caller degrades
/// to empty content rather than an error.
fn extract_message_content(envelope: &Value) -> Option<&str> {
    envelope
        .get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?
        .as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_first_choice_content() {
        let envelope = json!({
            "choices": [
                { "message": { "role": "assistant", "content": "## 1. Level Name" } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        });
        assert_eq!(
            extract_message_content(&envelope),
            Some("## 1. Level Name")
        );
    }

    #[test]
    fn missing_path_degrades_to_none() {
        for envelope in [
            json!({}),
            json!({ "choices": [] }),
            json!({ "choices": [{}] }),
            json!({ "choices": [{ "message": {} }] }),
            json!({ "choices": [{ "message": { "content": 42 } }] }),
            json!({ "choices": "not an array" }),
        ] {
            assert_eq!(extract_message_content(&envelope), None);
        }
    }

    #[test]
    fn request_body_serializes_to_the_wire_shape() {
        let body = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "system",
                content: "contract",
            }],
            temperature: 0.7,
            max_tokens: 2800,
        };
        let wire = serde_json::to_value(&body).unwrap();
        assert_eq!(wire["model"], "gpt-4o-mini");
        assert_eq!(wire["messages"][0]["role"], "system");
        let temperature = wire["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
        assert_eq!(wire["max_tokens"], 2800);
    }
}
