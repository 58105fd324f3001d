//! Long-lived HTTP server for running the bot outside Lambda.
//!
//! Slack posts every request to `POST /slack/events`. The handler runs in its
//! own task; the HTTP response is sent as soon as it acknowledges, and the
//! rest of its work continues in the background.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::api::{helpers, route_slack_request, signature};
use crate::app::App;

pub fn router(app: Arc<App>) -> Router {
    Router::new()
        .route("/slack/events", post(slack_events))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}

/// Bind to `0.0.0.0:{PORT}` and serve until the process is stopped.
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails.
pub async fn serve(app: Arc<App>) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], app.config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening for Slack requests");

    axum::serve(listener, router(app)).await?;
    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn slack_events(State(app): State<Arc<App>>, headers: HeaderMap, body: String) -> Response {
    let header_str = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    let verified = match (
        header_str("x-slack-request-timestamp"),
        header_str("x-slack-signature"),
    ) {
        (Some(timestamp), Some(sig)) => signature::verify_slack_signature(
            &body,
            timestamp,
            sig,
            &app.config.slack_signing_secret,
        ),
        _ => false,
    };
    if !verified {
        return gateway_response(&helpers::err_response(401, "Invalid Slack signature"));
    }

    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        if let Err(e) = route_slack_request(&app, &body, tx).await {
            error!("Request handling failed: {}", e);
        }
    });

    match rx.await {
        Ok(response) => gateway_response(&response),
        Err(_) => {
            error!("Handler finished without acknowledging");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn gateway_response(response: &Value) -> Response {
    let (status, body) = helpers::response_parts(response);
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
