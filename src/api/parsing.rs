use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::errors::BotError;
use crate::slack::command_parser::{SlashCommand, decode_url_component, parse_form_data};

pub fn is_interactive_body(body: &str) -> bool {
    body.starts_with("payload=") || body.contains("&payload=")
}

/// Extract and decode the JSON `payload=` field of an interactive request.
///
/// # Errors
///
/// Returns `ParseError` if the field is missing, cannot be decoded, or is not
/// valid JSON.
pub fn parse_interactive_payload(form_body: &str) -> Result<Value, BotError> {
    for pair in form_body.split('&') {
        if let Some((key, raw_val)) = pair.split_once('=') {
            if key == "payload" {
                let decoded = decode_url_component(raw_val)
                    .map_err(|e| BotError::ParseError(format!("Failed to decode payload: {e}")))?;
                let v: Value = serde_json::from_str(&decoded)
                    .map_err(|e| BotError::ParseError(format!("Invalid JSON payload: {e}")))?;
                return Ok(v);
            }
        }
    }
    Err(BotError::ParseError("Missing payload field".to_string()))
}

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

/// # Errors
///
/// Returns `ParseError` if the form body cannot be decoded.
pub fn parse_slash_command(payload: &str) -> Result<SlashCommand, BotError> {
    parse_form_data(payload)
        .map_err(|e| BotError::ParseError(format!("Failed to parse form data: {e}")))
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// Raw request body of an API Gateway proxy event, base64-decoded when the
/// gateway flagged it so.
///
/// # Errors
///
/// Returns `ParseError` when the body is missing, not a string, or not valid
/// base64/UTF-8.
pub fn extract_body(event: &Value) -> Result<String, BotError> {
    let body = event
        .get("body")
        .ok_or_else(|| BotError::ParseError("Missing body".to_string()))?
        .as_str()
        .ok_or_else(|| BotError::ParseError("Invalid body format".to_string()))?;

    let encoded = event
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !encoded {
        return Ok(body.to_string());
    }

    let bytes = STANDARD
        .decode(body)
        .map_err(|e| BotError::ParseError(format!("Invalid base64 body: {e}")))?;
    String::from_utf8(bytes).map_err(|e| BotError::ParseError(format!("Body is not UTF-8: {e}")))
}
