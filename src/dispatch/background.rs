use async_trait::async_trait;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info};

use super::Dispatcher;
use crate::core::models::DispatchPayload;
use crate::errors::BotError;
use crate::worker::Worker;

/// Runs the worker as a detached task on the current runtime.
pub struct BackgroundDispatcher {
    worker: Arc<Worker>,
}

impl BackgroundDispatcher {
    #[must_use]
    pub fn new(worker: Arc<Worker>) -> Self {
        Self { worker }
    }
}

#[async_trait]
impl Dispatcher for BackgroundDispatcher {
    async fn dispatch(&self, payload: DispatchPayload) -> Result<(), BotError> {
        let worker = Arc::clone(&self.worker);
        info!("Spawning background rewrite");

        tokio::spawn(async move {
            // Detached: a panic is logged here and goes no further.
            if AssertUnwindSafe(worker.run(&payload))
                .catch_unwind()
                .await
                .is_err()
            {
                error!("Background rewrite panicked");
            }
        });

        Ok(())
    }
}
