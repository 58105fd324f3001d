//! Handler for Slack interactive components.
//!
//! This module processes interactive payloads including:
//! - `block_actions` - the modal toggle and the ephemeral send/cancel buttons
//! - `view_submission` - closing the result modal

use serde_json::Value;
use tracing::{error, info, warn};

use super::ack::Acknowledge;
use super::helpers::ok_empty;
use super::parsing::v_str;
use crate::app::App;
use crate::core::models::UserIdentity;
use crate::core::session::ToggleState;
use crate::errors::BotError;
use crate::slack::SlackApi;
use crate::slack::modal_builder::{RESULT_CALLBACK_ID, TOGGLE_ACTION_ID, toggle_view};
use crate::slack::response_builder::{
    CANCEL_ACTION_ID, SEND_ACTION_ID, create_delete_original_payload,
};

/// Route an interactive payload. Every branch acknowledges before doing any
/// Slack calls.
///
/// # Errors
///
/// Only an acknowledgement failure is returned.
#[tracing::instrument(level = "info", skip_all)]
pub async fn handle_interactive<A: Acknowledge>(
    app: &App,
    payload: &Value,
    ack: A,
) -> Result<(), BotError> {
    let kind = v_str(payload, &["type"]).unwrap_or("");

    match kind {
        "block_actions" => handle_block_actions(app, payload, ack).await,
        "view_submission" => {
            let callback_id = v_str(payload, &["view", "callback_id"]).unwrap_or("");
            if callback_id != RESULT_CALLBACK_ID {
                warn!("Unexpected view_submission callback_id: {}", callback_id);
            }
            ack.ack(ok_empty())
        }
        other => {
            info!("Ignoring interactive payload type: {}", other);
            ack.ack(ok_empty())
        }
    }
}

async fn handle_block_actions<A: Acknowledge>(
    app: &App,
    payload: &Value,
    ack: A,
) -> Result<(), BotError> {
    let Some(action) = payload
        .get("actions")
        .and_then(Value::as_array)
        .and_then(|actions| actions.first())
    else {
        warn!("block_actions payload without actions");
        return ack.ack(ok_empty());
    };

    let action_id = action.get("action_id").and_then(Value::as_str).unwrap_or("");
    ack.ack(ok_empty())?;

    match action_id {
        TOGGLE_ACTION_ID => {
            if let Err(e) = handle_toggle(app.slack.as_ref(), payload).await {
                error!("Failed to toggle view: {}", e);
            }
        }
        SEND_ACTION_ID | CANCEL_ACTION_ID => {
            let text = action.get("value").and_then(Value::as_str).unwrap_or("");
            let channel_id = app
                .config
                .post_channel_id
                .as_deref()
                .or_else(|| v_str(payload, &["channel", "id"]))
                .or_else(|| v_str(payload, &["container", "channel_id"]));

            let user_id = v_str(payload, &["user", "id"]);
            let response_url = v_str(payload, &["response_url"]);

            match (channel_id, user_id, response_url) {
                _ if text.trim().is_empty() => error!("{} action carried no text", action_id),
                (Some(channel_id), Some(user_id), Some(response_url)) => {
                    let fallback_name = v_str(payload, &["user", "name"]).unwrap_or(user_id);
                    if let Err(e) = post_as_user_and_clear(
                        app.slack.as_ref(),
                        text,
                        channel_id,
                        user_id,
                        fallback_name,
                        response_url,
                    )
                    .await
                    {
                        error!("Failed to post {} choice: {}", action_id, e);
                    }
                }
                _ => error!(
                    "{} action is missing channel, user or response_url",
                    action_id
                ),
            }
        }
        other => info!("Ignoring block action: {}", other),
    }

    Ok(())
}

/// Flip the modal between suggestion and original in place.
///
/// # Errors
///
/// `ParseError` for missing view fields or bad metadata, `RenderError` when
/// the update fails.
pub async fn handle_toggle(slack: &dyn SlackApi, payload: &Value) -> Result<(), BotError> {
    let view_id = v_str(payload, &["view", "id"])
        .ok_or_else(|| BotError::ParseError("block_actions payload has no view id".to_string()))?;
    let metadata = v_str(payload, &["view", "private_metadata"]).ok_or_else(|| {
        BotError::ParseError("block_actions payload has no private_metadata".to_string())
    })?;

    let state = ToggleState::from_metadata(metadata)?;
    let (next, view) = toggle_view(&state)?;
    info!(mode = next.mode().as_str(), "Toggling rewrite view");

    slack.update_view(view_id, &view).await
}

/// Post `text` into `channel_id` under the user's identity, then delete the
/// ephemeral message. The message is only deleted after the post succeeded.
///
/// # Errors
///
/// Returns the first failing Slack call.
pub async fn post_as_user_and_clear(
    slack: &dyn SlackApi,
    text: &str,
    channel_id: &str,
    user_id: &str,
    fallback_name: &str,
    response_url: &str,
) -> Result<(), BotError> {
    let identity = match slack.user_identity(user_id).await {
        Ok(identity) => identity,
        Err(e) => {
            warn!("users.info failed for {}: {}", user_id, e);
            UserIdentity {
                name: fallback_name.to_string(),
                avatar_url: None,
            }
        }
    };

    slack.post_as_user(channel_id, text, &identity).await?;
    slack
        .respond(response_url, &create_delete_original_payload())
        .await
}
