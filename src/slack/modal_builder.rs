use serde_json::{Value, json};

use crate::core::session::{DisplayMode, ToggleState};
use crate::errors::BotError;

/// `callback_id` of the result modal; its submit button just closes it.
pub const RESULT_CALLBACK_ID: &str = "view_copy_done";
/// `action_id` of the original/suggestion toggle button.
pub const TOGGLE_ACTION_ID: &str = "toggle_text_view";
pub const COPY_INPUT_ACTION_ID: &str = "copy_input";
pub const TOGGLE_BLOCK_ID: &str = "toggle_actions";

const COPY_HINT: &str = "Select all (⌘+A or Ctrl+A) and copy to clipboard.";

fn plain_text(text: &str) -> Value {
    json!({ "type": "plain_text", "text": text })
}

/// Placeholder opened right after the slash command is acknowledged.
#[must_use]
pub fn build_loading_modal() -> Value {
    json!({
        "type": "modal",
        "title": plain_text("Rewriting..."),
        "blocks": [
            {
                "type": "section",
                "text": { "type": "mrkdwn", "text": ":hourglass_flowing_sand: AI is thinking..." }
            }
        ]
    })
}

/// Render the result modal for `state`. The view depends on nothing but the
/// state, so toggling twice reproduces the first render exactly.
///
/// # Errors
///
/// Returns `RenderError` if the state does not fit in `private_metadata`.
pub fn build_result_modal(state: &ToggleState) -> Result<Value, BotError> {
    let mode = state.mode();
    let (title, label, button_label) = match mode {
        DisplayMode::Ai => (
            "Suggestion Ready",
            ":sparkles: Here is the *AI suggestion*. Copy it below:",
            "🔄 Show Original Draft",
        ),
        DisplayMode::Original => (
            "Original Draft",
            ":rewind: Here is your *original text* in case you want to revert:",
            "✨ Show AI Suggestion",
        ),
    };

    Ok(json!({
        "type": "modal",
        "callback_id": RESULT_CALLBACK_ID,
        "private_metadata": state.to_metadata()?,
        "title": plain_text(title),
        "submit": plain_text("Thanks!"),
        "blocks": [
            {
                "type": "input",
                // A new block_id per mode forces Slack to drop the old input value.
                "block_id": format!("content_block_{}", mode.as_str()),
                "element": {
                    "type": "plain_text_input",
                    "action_id": COPY_INPUT_ACTION_ID,
                    "multiline": true,
                    "initial_value": state.visible_text()
                },
                "label": plain_text(label),
                "hint": plain_text(COPY_HINT)
            },
            {
                "type": "actions",
                "block_id": TOGGLE_BLOCK_ID,
                "elements": [
                    {
                        "type": "button",
                        "text": plain_text(button_label),
                        "action_id": TOGGLE_ACTION_ID,
                        "value": mode.flipped().as_str()
                    }
                ]
            }
        ]
    }))
}

/// Flip the displayed text and return the new state with its view.
///
/// # Errors
///
/// Returns `RenderError` if the new state cannot be rendered.
pub fn toggle_view(state: &ToggleState) -> Result<(ToggleState, Value), BotError> {
    let next = state.flipped();
    let view = build_result_modal(&next)?;
    Ok((next, view))
}

/// Shown in place of the result when the rewrite fails.
#[must_use]
pub fn build_error_modal() -> Value {
    json!({
        "type": "modal",
        "title": plain_text("Error"),
        "close": plain_text("Close"),
        "blocks": [
            {
                "type": "section",
                "text": {
                    "type": "mrkdwn",
                    "text": ":x: Sorry, something went wrong processing your request."
                }
            }
        ]
    })
}
