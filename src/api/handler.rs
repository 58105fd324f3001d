//! Lambda entrypoint - thin router in front of the Slack handlers.
//!
//! One function serves two kinds of invocations:
//! - worker wake-ups sent by the re-invoke dispatcher (`{"type": "rewrite_worker"}`)
//! - API Gateway proxy events carrying Slack requests

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::{error, info};

use super::{helpers, parsing, router, signature};
use crate::app::App;
use crate::core::models::WorkerEvent;
use crate::worker::handle_worker_event;

/// Lambda handler for the single function entrypoint.
///
/// # Errors
///
/// Never fails for bad input; malformed or unsigned requests get an error
/// response payload instead.
#[tracing::instrument(level = "info", skip_all)]
pub async fn function_handler(app: &App, event: LambdaEvent<Value>) -> Result<Value, Error> {
    let (payload, _context) = event.into_parts();

    if WorkerEvent::is_worker_event(&payload) {
        info!("Worker invocation received");
        return Ok(handle_worker_event(&app.worker, payload).await);
    }

    let Some(headers) = payload.get("headers") else {
        error!("Request missing headers");
        return Ok(helpers::err_response(400, "Missing headers"));
    };

    let body = match parsing::extract_body(&payload) {
        Ok(b) => b,
        Err(e) => {
            error!("Invalid request body: {}", e);
            return Ok(helpers::err_response(400, &e.to_string()));
        }
    };

    if let Err(response) = verify_signature(&body, headers, &app.config.slack_signing_secret) {
        return Ok(response);
    }

    info!("Slack signature verified successfully");

    // The response is whatever the handler acknowledged with; the handler
    // finishes its post-ack Slack calls before the invocation returns.
    let (tx, rx) = oneshot::channel();
    if let Err(e) = router::route_slack_request(app, &body, tx).await {
        error!("Request handling failed: {}", e);
    }

    match rx.await {
        Ok(response) => Ok(response),
        Err(_) => {
            error!("Handler finished without acknowledging");
            Ok(helpers::err_response(500, "Request was not acknowledged"))
        }
    }
}

/// Check the Slack signature headers of a proxy event.
///
/// # Errors
///
/// Returns a ready 401 response when a header is missing or the signature
/// does not match.
pub fn verify_signature(body: &str, headers: &Value, signing_secret: &str) -> Result<(), Value> {
    let Some(sig) = parsing::get_header_value(headers, "X-Slack-Signature") else {
        error!("Missing X-Slack-Signature header");
        return Err(helpers::err_response(
            401,
            "Missing X-Slack-Signature header",
        ));
    };

    let Some(timestamp) = parsing::get_header_value(headers, "X-Slack-Request-Timestamp") else {
        error!("Missing X-Slack-Request-Timestamp header");
        return Err(helpers::err_response(
            401,
            "Missing X-Slack-Request-Timestamp header",
        ));
    };

    if !signature::verify_slack_signature(body, timestamp, sig, signing_secret) {
        error!("Slack signature verification failed");
        return Err(helpers::err_response(401, "Invalid Slack signature"));
    }

    Ok(())
}
