use async_trait::async_trait;
use aws_sdk_lambda::error::DisplayErrorContext;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use std::sync::Arc;
use tracing::{error, info};

use super::Dispatcher;
use crate::core::models::{DispatchPayload, WorkerEvent};
use crate::errors::BotError;

/// Fire-and-forget invocation of a Lambda function.
#[async_trait]
pub trait WorkerInvoker: Send + Sync {
    async fn invoke_event(&self, function_name: &str, payload: Vec<u8>) -> Result<(), BotError>;
}

#[async_trait]
impl WorkerInvoker for aws_sdk_lambda::Client {
    async fn invoke_event(&self, function_name: &str, payload: Vec<u8>) -> Result<(), BotError> {
        let output = self
            .invoke()
            .function_name(function_name)
            .invocation_type(InvocationType::Event)
            .payload(Blob::new(payload))
            .send()
            .await
            .map_err(|e| {
                BotError::AwsError(format!(
                    "Lambda invoke failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        info!(
            status_code = output.status_code(),
            "Queued async worker invocation"
        );
        Ok(())
    }
}

/// Hands the rewrite to an asynchronous invocation of the same function,
/// tagged as a worker event. Failures are not retried.
pub struct ReinvokeDispatcher {
    invoker: Arc<dyn WorkerInvoker>,
    function_name: String,
}

impl ReinvokeDispatcher {
    #[must_use]
    pub fn new(invoker: Arc<dyn WorkerInvoker>, function_name: impl Into<String>) -> Self {
        Self {
            invoker,
            function_name: function_name.into(),
        }
    }
}

#[async_trait]
impl Dispatcher for ReinvokeDispatcher {
    async fn dispatch(&self, payload: DispatchPayload) -> Result<(), BotError> {
        let bytes = serde_json::to_vec(&WorkerEvent::new(payload))?;

        self.invoker
            .invoke_event(&self.function_name, bytes)
            .await
            .inspect_err(|e| error!("Failed to re-invoke {}: {}", self.function_name, e))
    }
}
