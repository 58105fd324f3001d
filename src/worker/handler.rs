use serde_json::{Value, json};
use tracing::{error, info};

use super::Worker;
use crate::core::models::WorkerEvent;

/// Run the worker for a raw `rewrite_worker` invocation payload.
///
/// Always reports success to the runtime: an error here would make Lambda
/// retry the async invocation.
pub async fn handle_worker_event(worker: &Worker, raw: Value) -> Value {
    let event: WorkerEvent = match serde_json::from_value(raw) {
        Ok(event) => event,
        Err(e) => {
            error!("Failed to decode worker event: {}", e);
            return json!({ "ok": false, "error": "invalid worker event" });
        }
    };

    info!("Worker invocation for {} chars", event.payload.text.chars().count());
    worker.run(&event.payload).await;
    json!({ "ok": true })
}
