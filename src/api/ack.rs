//! The acknowledgement seam between inbound handlers and the HTTP layer.
//!
//! Slack wants an HTTP response within three seconds. Handlers receive an
//! [`Acknowledge`] and consume it with the response body before they start any
//! slow work; the transport (Lambda or axum) waits on the other end.

use serde_json::Value;
use tokio::sync::oneshot;

use crate::errors::BotError;

pub trait Acknowledge: Send {
    /// Hand the HTTP response for the current request back to Slack.
    ///
    /// # Errors
    ///
    /// Returns `AckTimeoutError` when nobody is waiting for the response
    /// anymore.
    fn ack(self, response: Value) -> Result<(), BotError>;
}

impl Acknowledge for oneshot::Sender<Value> {
    fn ack(self, response: Value) -> Result<(), BotError> {
        self.send(response).map_err(|_| {
            BotError::AckTimeoutError("response receiver was dropped".to_string())
        })
    }
}
