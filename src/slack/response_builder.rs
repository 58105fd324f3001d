//! Response-related utilities for Slack interactions.
//!
//! This module provides standardized ways to create and format
//! responses sent to Slack through a `response_url`.

use serde_json::{Value, json};

/// `action_id` of the button that posts the AI suggestion.
pub const SEND_ACTION_ID: &str = "send";
/// `action_id` of the button that posts the original draft instead.
pub const CANCEL_ACTION_ID: &str = "cancel";

/// Slack caps a button `value` at this many characters.
pub const BUTTON_VALUE_LIMIT: usize = 2000;

/// Slack rejects a section whose text is longer than this.
pub const SECTION_TEXT_LIMIT: usize = 3000;

const ORIGINAL_PREFIX: &str = "*Original:* ";
const SUGGESTION_PREFIX: &str = ":sparkles: *Suggestion:* ";

pub const ERROR_MESSAGE: &str = ":x: Sorry, something went wrong processing your request.";
pub const TOO_LONG_MESSAGE: &str =
    ":warning: This text is too long to send with a button. Copy it from above instead.";
pub const USAGE_HINT: &str = "Usage: /rewrite <your draft text>";
pub const REWRITING_NOTICE: &str = ":hourglass_flowing_sand: Rewriting your draft...";

/// Create a JSON payload for an ephemeral response
///
/// Ephemeral messages are only visible to the user who triggered the command.
///
/// # Examples
///
/// ```
/// use redraft::slack::response_builder::create_ephemeral_payload;
///
/// let payload = create_ephemeral_payload("This message is only visible to you");
/// assert_eq!(payload["response_type"], "ephemeral");
/// ```
#[must_use]
pub fn create_ephemeral_payload(text: &str) -> Value {
    json!({
        "text": text,
        "response_type": "ephemeral"
    })
}

/// Replace the pending ephemeral notice with `text`.
#[must_use]
pub fn create_replace_original_payload(text: &str) -> Value {
    json!({
        "text": text,
        "response_type": "ephemeral",
        "replace_original": true
    })
}

/// Instructs Slack to remove the ephemeral message the action came from.
#[must_use]
pub fn create_delete_original_payload() -> Value {
    json!({ "delete_original": true })
}

/// Plain-text rendering of the suggestion, also used as the notification text.
#[must_use]
pub fn format_suggestion_text(original: &str, suggestion: &str) -> String {
    format!("Original: {original}\nSuggestion: {suggestion}")
}

/// Whether both texts fit in a button `value`.
#[must_use]
pub fn fits_in_buttons(original: &str, suggestion: &str) -> bool {
    original.chars().count() <= BUTTON_VALUE_LIMIT
        && suggestion.chars().count() <= BUTTON_VALUE_LIMIT
}

/// Section text of `prefix` followed by `body`, cut to fit `SECTION_TEXT_LIMIT`
/// characters with a trailing ellipsis.
#[must_use]
pub fn section_text(prefix: &str, body: &str) -> String {
    let room = SECTION_TEXT_LIMIT.saturating_sub(prefix.chars().count());
    if body.chars().count() <= room {
        return format!("{prefix}{body}");
    }

    let kept: String = body.chars().take(room.saturating_sub(1)).collect();
    format!("{prefix}{kept}…")
}

/// Ephemeral result with `send` (suggestion) and `cancel` (original) buttons.
/// Each button carries the text it will post as its `value`. When either text
/// is too long for a button the choice is replaced by a warning.
#[must_use]
pub fn create_suggestion_payload(original: &str, suggestion: &str) -> Value {
    let mut blocks = vec![
        json!({
            "type": "section",
            "text": { "type": "mrkdwn", "text": section_text(ORIGINAL_PREFIX, original) }
        }),
        json!({
            "type": "section",
            "text": { "type": "mrkdwn", "text": section_text(SUGGESTION_PREFIX, suggestion) }
        }),
    ];

    if fits_in_buttons(original, suggestion) {
        blocks.push(json!({
            "type": "actions",
            "block_id": "rewrite_choice",
            "elements": [
                {
                    "type": "button",
                    "text": { "type": "plain_text", "text": "Send suggestion" },
                    "style": "primary",
                    "action_id": SEND_ACTION_ID,
                    "value": suggestion
                },
                {
                    "type": "button",
                    "text": { "type": "plain_text", "text": "Send original" },
                    "action_id": CANCEL_ACTION_ID,
                    "value": original
                }
            ]
        }));
    } else {
        blocks.push(json!({
            "type": "context",
            "elements": [ { "type": "mrkdwn", "text": TOO_LONG_MESSAGE } ]
        }));
    }

    json!({
        "response_type": "ephemeral",
        "replace_original": true,
        "text": format_suggestion_text(original, suggestion),
        "blocks": blocks
    })
}
