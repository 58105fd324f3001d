//! The slow half of a rewrite: completion call plus a single render.

pub mod deliver;
pub mod handler;

use std::sync::Arc;
use tracing::{error, info};

use crate::ai::Rewriter;
use crate::core::models::DispatchPayload;
use crate::slack::SlackApi;

pub use handler::handle_worker_event;

pub struct Worker {
    rewriter: Rewriter,
    slack: Arc<dyn SlackApi>,
}

impl Worker {
    #[must_use]
    pub fn new(rewriter: Rewriter, slack: Arc<dyn SlackApi>) -> Self {
        Self { rewriter, slack }
    }

    /// Rewrite the draft and render exactly one result or error view on the
    /// payload's target. Never fails; problems are logged.
    #[tracing::instrument(level = "info", skip_all)]
    pub async fn run(&self, payload: &DispatchPayload) {
        let rendering = match self
            .rewriter
            .rewrite(&payload.text)
            .await
            .and_then(|suggestion| {
                deliver::render_suggestion(&payload.target, &payload.text, &suggestion)
            }) {
            Ok(rendering) => rendering,
            Err(e) => {
                error!("Rewrite failed: {}", e);
                deliver::render_error(&payload.target)
            }
        };

        match deliver::send(self.slack.as_ref(), &rendering).await {
            Ok(()) => info!("Rendered rewrite result"),
            Err(e) => error!("Failed to render rewrite result: {}", e),
        }
    }
}
