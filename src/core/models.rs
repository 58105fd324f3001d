use serde::{Deserialize, Serialize};

/// Discriminator carried by self re-invocations of the Lambda function.
pub const WORKER_EVENT_TYPE: &str = "rewrite_worker";

/// Where the worker renders its result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeliveryTarget {
    /// A modal opened by the dispatcher, updated through `views.update`.
    View { view_id: String },
    /// The slash command's `response_url`, used for ephemeral replies.
    ResponseUrl { response_url: String },
}

/// Unit of work handed from the dispatcher to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchPayload {
    pub text: String,
    pub target: DeliveryTarget,
}

/// Body of an asynchronous worker invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub payload: DispatchPayload,
}

impl WorkerEvent {
    #[must_use]
    pub fn new(payload: DispatchPayload) -> Self {
        Self {
            event_type: WORKER_EVENT_TYPE.to_string(),
            payload,
        }
    }

    /// Returns true when a raw invocation payload is a worker wake-up rather
    /// than an inbound HTTP request.
    #[must_use]
    pub fn is_worker_event(raw: &serde_json::Value) -> bool {
        raw.get("type").and_then(serde_json::Value::as_str) == Some(WORKER_EVENT_TYPE)
    }
}

/// Display identity used when posting on behalf of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub name: String,
    pub avatar_url: Option<String>,
}
