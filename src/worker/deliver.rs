//! Rendering of worker outcomes onto their delivery target.
//!
//! Building a rendering is pure; [`send`] is the single Slack call a worker
//! run makes.

use serde_json::Value;

use crate::core::models::DeliveryTarget;
use crate::core::session::ToggleState;
use crate::errors::BotError;
use crate::slack::SlackApi;
use crate::slack::modal_builder::{build_error_modal, build_result_modal};
use crate::slack::response_builder::{
    ERROR_MESSAGE, create_replace_original_payload, create_suggestion_payload,
};

/// A fully built Slack update, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendering {
    ViewUpdate { view_id: String, view: Value },
    Response { response_url: String, payload: Value },
}

/// # Errors
///
/// Returns `RenderError` when the modal state cannot be encoded.
pub fn render_suggestion(
    target: &DeliveryTarget,
    original: &str,
    suggestion: &str,
) -> Result<Rendering, BotError> {
    match target {
        DeliveryTarget::View { view_id } => Ok(Rendering::ViewUpdate {
            view_id: view_id.clone(),
            view: build_result_modal(&ToggleState::new(original, suggestion))?,
        }),
        DeliveryTarget::ResponseUrl { response_url } => Ok(Rendering::Response {
            response_url: response_url.clone(),
            payload: create_suggestion_payload(original, suggestion),
        }),
    }
}

#[must_use]
pub fn render_error(target: &DeliveryTarget) -> Rendering {
    match target {
        DeliveryTarget::View { view_id } => Rendering::ViewUpdate {
            view_id: view_id.clone(),
            view: build_error_modal(),
        },
        DeliveryTarget::ResponseUrl { response_url } => Rendering::Response {
            response_url: response_url.clone(),
            payload: create_replace_original_payload(ERROR_MESSAGE),
        },
    }
}

/// # Errors
///
/// Propagates the Slack client error.
pub async fn send(slack: &dyn SlackApi, rendering: &Rendering) -> Result<(), BotError> {
    match rendering {
        Rendering::ViewUpdate { view_id, view } => slack.update_view(view_id, view).await,
        Rendering::Response {
            response_url,
            payload,
        } => slack.respond(response_url, payload).await,
    }
}
