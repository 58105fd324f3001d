//! Hand-off of a rewrite from the acknowledging request to the worker.
//!
//! The strategy is picked once at startup: a self re-invocation of the Lambda
//! function when one is configured, otherwise a detached tokio task.

pub mod background;
pub mod reinvoke;

use async_trait::async_trait;

use crate::core::models::DispatchPayload;
use crate::errors::BotError;

pub use background::BackgroundDispatcher;
pub use reinvoke::{ReinvokeDispatcher, WorkerInvoker};

#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Start the worker for `payload` without waiting for it to finish.
    async fn dispatch(&self, payload: DispatchPayload) -> Result<(), BotError>;
}
