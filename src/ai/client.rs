//! LLM (`OpenAI`) API client module
//!
//! Encapsulates the chat-completion call used to rewrite drafts.

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::errors::BotError;

const COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

/// Anything that can turn a chat prompt into a single text completion.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// # Errors
    ///
    /// Returns `ConfigurationError` when the client lacks credentials and
    /// `CompletionError` when the upstream call fails.
    async fn complete(&self, prompt: Vec<ChatCompletionMessage>) -> Result<String, BotError>;
}

/// LLM API client for the `OpenAI` chat completions endpoint
pub struct OpenAiClient {
    api_key: Option<String>,
    org_id: Option<String>,
    model_name: String,
    temperature: f64,
    base_url: String,
    http: Client,
}

impl OpenAiClient {
    #[must_use]
    pub fn new(
        api_key: Option<String>,
        org_id: Option<String>,
        model_name: String,
        temperature: f64,
        base_url: String,
    ) -> Self {
        let http = Client::builder()
            .timeout(COMPLETION_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_key,
            org_id,
            model_name,
            temperature,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.openai_api_key.clone(),
            config.openai_org_id.clone(),
            config.openai_model.clone(),
            config.openai_temperature,
            config.openai_base_url.clone(),
        )
    }

    fn request_body(&self, prompt: &[ChatCompletionMessage]) -> Value {
        json!({
            "model": self.model_name,
            "messages": build_chat_messages(prompt),
            "temperature": self.temperature
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, prompt: Vec<ChatCompletionMessage>) -> Result<String, BotError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(BotError::ConfigurationError(
                "OPENAI_API_KEY is not set".to_string(),
            ));
        };

        #[cfg(feature = "debug-logs")]
        debug!("Using completion prompt:\n{:?}", prompt);

        info!(
            model = %self.model_name,
            messages = prompt.len(),
            "Requesting chat completion"
        );

        let mut request = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&self.request_body(&prompt));

        if let Some(org) = &self.org_id {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BotError::CompletionError(format!("OpenAI API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(BotError::CompletionError(format!(
                "OpenAI API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            BotError::CompletionError(format!("Failed to parse OpenAI response: {e}"))
        })?;

        debug!("Completion usage: {:?}", response_json.get("usage"));

        extract_completion_text(&response_json)
    }
}

/// Chat-completions `messages` array from a prompt. Only text parts are sent.
pub(crate) fn build_chat_messages(prompt: &[ChatCompletionMessage]) -> Vec<Value> {
    prompt
        .iter()
        .filter_map(|m| {
            let role_str = match m.role {
                MessageRole::system => "system",
                MessageRole::assistant => "assistant",
                MessageRole::user | MessageRole::function | MessageRole::tool => "user",
            };

            match &m.content {
                Content::Text(t) => Some(json!({ "role": role_str, "content": t })),
                Content::ImageUrl(_) => None,
            }
        })
        .collect()
}

/// Pull `choices[0].message.content` out of a chat-completions response.
///
/// # Errors
///
/// Returns `CompletionError` when the response has no text content.
pub fn extract_completion_text(response_json: &Value) -> Result<String, BotError> {
    response_json
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| BotError::CompletionError("No text in response".to_string()))
}
