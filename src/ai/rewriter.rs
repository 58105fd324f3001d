use std::sync::Arc;

use tracing::info;

use super::client::CompletionClient;
use super::prompt_builder::build_rewrite_prompt;
use crate::errors::BotError;

/// Turns a draft into a suggestion through an injected completion client.
#[derive(Clone)]
pub struct Rewriter {
    client: Arc<dyn CompletionClient>,
}

impl Rewriter {
    #[must_use]
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Rewrite `draft`. Output varies between calls; nothing is cached.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` when no API key is configured, `CompletionError`
    /// when the call fails or yields no text.
    pub async fn rewrite(&self, draft: &str) -> Result<String, BotError> {
        let prompt = build_rewrite_prompt(draft);
        let completion = self.client.complete(prompt).await?;

        let suggestion = completion.trim();
        if suggestion.is_empty() {
            return Err(BotError::CompletionError(
                "Completion returned no content".to_string(),
            ));
        }

        info!(
            draft_chars = draft.chars().count(),
            suggestion_chars = suggestion.chars().count(),
            "Draft rewritten"
        );
        Ok(suggestion.to_string())
    }
}
