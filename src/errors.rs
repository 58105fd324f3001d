use slack_morphism::errors::SlackClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Slack request was not acknowledged: {0}")]
    AckTimeoutError(String),

    #[error("Failed to rewrite draft: {0}")]
    CompletionError(String),

    #[error("Failed to render Slack UI: {0}")]
    RenderError(String),

    #[error("Missing or invalid configuration: {0}")]
    ConfigurationError(String),

    #[error("Failed to parse Slack event: {0}")]
    ParseError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to interact with AWS services: {0}")]
    AwsError(String),
}

impl From<SlackClientError> for BotError {
    fn from(error: SlackClientError) -> Self {
        BotError::RenderError(error.to_string())
    }
}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        BotError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(error: serde_json::Error) -> Self {
        BotError::ParseError(error.to_string())
    }
}
