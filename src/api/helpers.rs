//! Common helper functions for API handlers.
//!
//! Responses are built in the API Gateway proxy shape
//! (`{"statusCode": .., "body": ..}`) so the Lambda entrypoint can return them
//! as-is and the local server can unpack them.

use serde_json::{Value, json};

/// Returns a 200 OK response with an empty JSON body.
#[must_use]
pub fn ok_empty() -> Value {
    json!({ "statusCode": 200, "body": "{}" })
}

/// Returns a 200 OK response with no body, which Slack shows as nothing.
#[must_use]
pub fn ok_silent() -> Value {
    json!({ "statusCode": 200, "body": "" })
}

/// Returns a 200 OK response with an ephemeral Slack message.
#[must_use]
pub fn ok_ephemeral(text: &str) -> Value {
    json!({
        "statusCode": 200,
        "body": json!({ "response_type": "ephemeral", "text": text }).to_string()
    })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "body": json!({ "error": message }).to_string()
    })
}

/// Split a proxy-shaped response into its status code and body.
#[must_use]
pub fn response_parts(response: &Value) -> (u16, String) {
    let status = response
        .get("statusCode")
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
        .unwrap_or(500);
    let body = match response.get("body") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    (status, body)
}
