//! Handler for the `/rewrite` slash command.
//!
//! Acknowledges first, then sets up the delivery target and hands the draft
//! to the configured dispatcher. Nothing here waits on the completion call.

use tracing::{error, info, warn};

use super::ack::Acknowledge;
use super::helpers::{err_response, ok_ephemeral, ok_silent};
use super::parsing::parse_slash_command;
use crate::app::App;
use crate::core::config::UiMode;
use crate::core::models::{DeliveryTarget, DispatchPayload};
use crate::errors::BotError;
use crate::slack::modal_builder::build_loading_modal;
use crate::slack::response_builder::{REWRITING_NOTICE, USAGE_HINT};

/// Handle a slash command from Slack.
///
/// # Errors
///
/// Only an acknowledgement failure is returned; everything after the ack is
/// logged.
#[tracing::instrument(level = "info", skip_all)]
pub async fn handle_slash_command<A: Acknowledge>(
    app: &App,
    body: &str,
    ack: A,
) -> Result<(), BotError> {
    let command = match parse_slash_command(body) {
        Ok(command) => command,
        Err(e) => {
            error!("Failed to parse slash command: {}", e);
            return ack.ack(err_response(400, &format!("Parse Error: {e}")));
        }
    };

    let Some(draft) = command.draft().map(ToString::to_string) else {
        info!("Empty draft from {}, replying with usage", command.user_id);
        return ack.ack(ok_ephemeral(USAGE_HINT));
    };

    let target = match app.config.ui_mode {
        UiMode::Modal => {
            ack.ack(ok_silent())?;
            match app
                .slack
                .open_view(&command.trigger_id, &build_loading_modal())
                .await
            {
                Ok(view_id) => DeliveryTarget::View { view_id },
                Err(e) => {
                    error!("Failed to open loading modal: {}", e);
                    return Ok(());
                }
            }
        }
        UiMode::Ephemeral => {
            ack.ack(ok_ephemeral(REWRITING_NOTICE))?;
            if command.response_url.is_empty() {
                warn!("Slash command carried no response_url");
                return Ok(());
            }
            DeliveryTarget::ResponseUrl {
                response_url: command.response_url.clone(),
            }
        }
    };

    if let Err(e) = app
        .dispatcher
        .dispatch(DispatchPayload {
            text: draft,
            target,
        })
        .await
    {
        error!("Failed to dispatch rewrite: {}", e);
    }

    Ok(())
}
