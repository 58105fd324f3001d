//! Slack API client module
//!
//! Encapsulates the Slack Web API calls the bot makes. Handlers and the
//! worker only see the [`SlackApi`] trait so tests can swap in a fake.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::SlackApiChatPostMessageRequest;
use slack_morphism::{SlackApiToken, SlackApiTokenValue, SlackChannelId, SlackMessageContent};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

use crate::core::models::UserIdentity;
use crate::errors::BotError;

const SLACK_API_BASE: &str = "https://slack.com/api";
const SLACK_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// The Slack surface used by the dispatcher, worker and interactive handlers.
#[async_trait]
pub trait SlackApi: Send + Sync {
    /// Open a modal with `views.open` and return its view id.
    async fn open_view(&self, trigger_id: &str, view: &Value) -> Result<String, BotError>;

    /// Replace an open modal with `views.update`.
    async fn update_view(&self, view_id: &str, view: &Value) -> Result<(), BotError>;

    /// POST a message payload to a slash command or interaction `response_url`.
    async fn respond(&self, response_url: &str, payload: &Value) -> Result<(), BotError>;

    /// Look up the display name and avatar of a user.
    async fn user_identity(&self, user_id: &str) -> Result<UserIdentity, BotError>;

    /// Post `text` to a channel under the given display identity.
    async fn post_as_user(
        &self,
        channel_id: &str,
        text: &str,
        identity: &UserIdentity,
    ) -> Result<(), BotError>;
}

/// Slack Web API client backed by `reqwest` and slack-morphism
pub struct SlackClient {
    token: SlackApiToken,
    http: Client,
    morphism: SlackHyperClient,
}

impl SlackClient {
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the HTTPS connector cannot be built.
    pub fn new(token: String) -> Result<Self, BotError> {
        let connector = SlackClientHyperConnector::new().map_err(|e| {
            BotError::ConfigurationError(format!("Failed to create Slack HTTP connector: {e}"))
        })?;
        let http = Client::builder()
            .timeout(SLACK_HTTP_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
            http,
            morphism: SlackHyperClient::new(connector),
        })
    }

    /// Call a JSON Web API method and return the body once `ok` is true.
    async fn call_api(&self, method: &str, payload: &Value) -> Result<Value, BotError> {
        let resp = self
            .http
            .post(format!("{SLACK_API_BASE}/{method}"))
            .bearer_auth(&self.token.token_value.0)
            .json(payload)
            .send()
            .await
            .map_err(|e| BotError::RenderError(format!("{method} request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(BotError::RenderError(format!(
                "{method} HTTP {}",
                resp.status()
            )));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| BotError::RenderError(format!("{method} JSON parse error: {e}")))?;

        if body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
            Ok(body)
        } else {
            Err(BotError::RenderError(format!(
                "{method} error: {}",
                body.get("error").and_then(Value::as_str).unwrap_or("unknown")
            )))
        }
    }
}

#[async_trait]
impl SlackApi for SlackClient {
    async fn open_view(&self, trigger_id: &str, view: &Value) -> Result<String, BotError> {
        let body = self
            .call_api(
                "views.open",
                &json!({
                    "trigger_id": trigger_id,
                    "view": view
                }),
            )
            .await?;

        body.get("view")
            .and_then(|v| v.get("id"))
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .ok_or_else(|| BotError::RenderError("views.open response has no view id".to_string()))
    }

    async fn update_view(&self, view_id: &str, view: &Value) -> Result<(), BotError> {
        self.call_api(
            "views.update",
            &json!({
                "view_id": view_id,
                "view": view
            }),
        )
        .await
        .map(|_| ())
    }

    async fn respond(&self, response_url: &str, payload: &Value) -> Result<(), BotError> {
        let url = validate_response_url(response_url)?;
        let resp = self.http.post(url).json(payload).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(BotError::RenderError(format!(
                "response_url POST failed: status={status} body={body_text}"
            )));
        }
        Ok(())
    }

    async fn user_identity(&self, user_id: &str) -> Result<UserIdentity, BotError> {
        let resp = self
            .http
            .get(format!("{SLACK_API_BASE}/users.info"))
            .bearer_auth(&self.token.token_value.0)
            .query(&[("user", user_id)])
            .send()
            .await?;

        let body: Value = resp.json().await?;
        if !body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
            return Err(BotError::RenderError(format!(
                "users.info error: {}",
                body.get("error").and_then(Value::as_str).unwrap_or("unknown")
            )));
        }

        body.get("user")
            .map(|user| identity_from_user(user, user_id))
            .ok_or_else(|| BotError::RenderError("users.info response has no user".to_string()))
    }

    async fn post_as_user(
        &self,
        channel_id: &str,
        text: &str,
        identity: &UserIdentity,
    ) -> Result<(), BotError> {
        let session = self.morphism.open_session(&self.token);

        let mut request = SlackApiChatPostMessageRequest::new(
            SlackChannelId(channel_id.to_string()),
            SlackMessageContent::new().with_text(text.to_string()),
        )
        .with_username(identity.name.clone());

        if let Some(icon_url) = &identity.avatar_url {
            request = request.with_icon_url(icon_url.clone());
        } else {
            warn!("No avatar for {}, posting with the bot icon", identity.name);
        }

        session.chat_post_message(&request).await?;
        info!("Posted message to {} as {}", channel_id, identity.name);
        Ok(())
    }
}

/// Slack only hands out https `response_url`s; anything else is refused.
///
/// # Errors
///
/// Returns `RenderError` for unparsable or non-https URLs.
pub fn validate_response_url(response_url: &str) -> Result<Url, BotError> {
    let url = Url::parse(response_url)
        .map_err(|e| BotError::RenderError(format!("Invalid response_url: {e}")))?;
    if url.scheme() != "https" {
        return Err(BotError::RenderError(format!(
            "Refusing non-https response_url: {url}"
        )));
    }
    Ok(url)
}

/// Prefer the display name, then the real name, then the user id.
#[must_use]
pub fn identity_from_user(user: &Value, fallback_id: &str) -> UserIdentity {
    let profile = user.get("profile");
    let non_empty = |key: &str| {
        profile
            .and_then(|p| p.get(key))
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(ToString::to_string)
    };

    let name = non_empty("display_name")
        .or_else(|| non_empty("real_name"))
        .or_else(|| {
            user.get("real_name")
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| fallback_id.to_string());

    let avatar_url = non_empty("image_72")
        .or_else(|| non_empty("image_48"))
        .or_else(|| non_empty("image_192"));

    UserIdentity { name, avatar_url }
}
