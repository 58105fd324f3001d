use std::env;
use std::str::FromStr;

use crate::errors::BotError;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_PORT: u16 = 3000;

/// Which Slack surface carries the rewrite result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Placeholder modal updated in place, with an original/suggestion toggle.
    #[default]
    Modal,
    /// Ephemeral message with `send` / `cancel` buttons.
    Ephemeral,
}

impl FromStr for UiMode {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modal" => Ok(UiMode::Modal),
            "ephemeral" | "buttons" => Ok(UiMode::Ephemeral),
            other => Err(BotError::ConfigurationError(format!(
                "REWRITE_UI_MODE: expected `modal` or `ephemeral`, got `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_bot_token: String,
    pub slack_signing_secret: String,
    /// Checked lazily: a missing key only fails the first rewrite.
    pub openai_api_key: Option<String>,
    pub openai_org_id: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub openai_temperature: f64,
    /// Set by the Lambda runtime; enables self re-invocation for the worker.
    pub worker_function_name: Option<String>,
    pub ui_mode: UiMode,
    pub post_channel_id: Option<String>,
    pub port: u16,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `ConfigurationError` naming the variable when a required value
    /// is missing or an optional one cannot be parsed.
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            non_empty(key).ok_or_else(|| BotError::ConfigurationError(format!("{key} is not set")))
        };

        let openai_temperature = match non_empty("OPENAI_TEMPERATURE") {
            Some(raw) => raw.trim().parse::<f64>().map_err(|e| {
                BotError::ConfigurationError(format!("OPENAI_TEMPERATURE: {e}"))
            })?,
            None => DEFAULT_TEMPERATURE,
        };

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| BotError::ConfigurationError(format!("PORT: {e}")))?,
            None => DEFAULT_PORT,
        };

        let ui_mode = match non_empty("REWRITE_UI_MODE") {
            Some(raw) => raw.parse::<UiMode>()?,
            None => UiMode::default(),
        };

        Ok(Self {
            slack_bot_token: required("SLACK_BOT_TOKEN")?,
            slack_signing_secret: required("SLACK_SIGNING_SECRET")?,
            openai_api_key: non_empty("OPENAI_API_KEY"),
            openai_org_id: non_empty("OPENAI_ORG_ID"),
            openai_model: non_empty("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_base_url: non_empty("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_temperature,
            worker_function_name: non_empty("AWS_LAMBDA_FUNCTION_NAME"),
            ui_mode,
            post_channel_id: non_empty("POST_CHANNEL_ID"),
            port,
        })
    }
}
