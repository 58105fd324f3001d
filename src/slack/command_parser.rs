use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fields Slack sends when a user invokes `/rewrite`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SlashCommand {
    pub team_id: String,
    pub channel_id: String,
    pub user_id: String,
    pub user_name: String,
    pub command: String,
    pub text: String,
    pub response_url: String,
    pub trigger_id: String,
}

impl SlashCommand {
    /// The draft with surrounding whitespace removed, or `None` when empty.
    #[must_use]
    pub fn draft(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Decodes one `application/x-www-form-urlencoded` component.
///
/// `+` is turned into a space before percent-decoding so an encoded `%2B`
/// survives as a literal plus.
///
/// # Errors
///
/// Returns an error message if the decoded bytes are not valid UTF-8.
///
/// # Examples
///
/// ```
/// use redraft::slack::command_parser::decode_url_component;
///
/// assert_eq!(decode_url_component("hello%20world").unwrap(), "hello world");
/// assert_eq!(decode_url_component("hello+world").unwrap(), "hello world");
/// assert_eq!(decode_url_component("1%2B1").unwrap(), "1+1");
/// ```
pub fn decode_url_component(input: &str) -> Result<String, String> {
    let spaced = input.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.to_string())
        .map_err(|e| format!("Failed to decode URL component: {e}"))
}

/// Split a form body into decoded key/value pairs. Later keys win.
///
/// # Errors
///
/// Returns an error message if any key or value fails to decode.
pub fn parse_form_pairs(form_data: &str) -> Result<HashMap<String, String>, String> {
    let mut map: HashMap<String, String> = HashMap::new();

    for pair in form_data.split('&').filter(|p| !p.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let key =
            decode_url_component(raw_key).map_err(|e| format!("Failed to decode key: {e}"))?;
        let value =
            decode_url_component(raw_value).map_err(|e| format!("Failed to decode value: {e}"))?;
        map.insert(key, value);
    }

    Ok(map)
}

/// Parses a slash command body. Missing fields default to empty strings.
///
/// # Errors
///
/// Returns an error message if the form data cannot be decoded.
///
/// # Examples
///
/// ```
/// use redraft::slack::command_parser::parse_form_data;
///
/// let form_data = "team_id=T123&channel_id=C123&user_id=U123&\
///                  user_name=username&command=%2Frewrite&text=see+you+later&\
///                  response_url=https%3A%2F%2Fhooks.slack.com%2F&\
///                  trigger_id=123.456";
///
/// let command = parse_form_data(form_data).unwrap();
/// assert_eq!(command.command, "/rewrite");
/// assert_eq!(command.text, "see you later");
/// ```
pub fn parse_form_data(form_data: &str) -> Result<SlashCommand, String> {
    let map = parse_form_pairs(form_data)?;
    let field = |name: &str| map.get(name).cloned().unwrap_or_default();

    Ok(SlashCommand {
        team_id: field("team_id"),
        channel_id: field("channel_id"),
        user_id: field("user_id"),
        user_name: field("user_name"),
        command: field("command"),
        text: field("text"),
        response_url: field("response_url"),
        trigger_id: field("trigger_id"),
    })
}
