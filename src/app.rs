//! Wiring of the long-lived components shared by every request.

use std::sync::Arc;
use tracing::info;

use crate::ai::{CompletionClient, OpenAiClient, Rewriter};
use crate::core::config::AppConfig;
use crate::dispatch::{BackgroundDispatcher, Dispatcher, ReinvokeDispatcher, WorkerInvoker};
use crate::errors::BotError;
use crate::slack::{SlackApi, SlackClient};
use crate::worker::Worker;

/// Where the process runs; decides the dispatch strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    Lambda,
    Server,
}

/// How dispatched rewrites reach the worker.
pub enum Topology {
    Background,
    Reinvoke {
        invoker: Arc<dyn WorkerInvoker>,
        function_name: String,
    },
}

pub struct App {
    pub config: AppConfig,
    pub slack: Arc<dyn SlackApi>,
    pub worker: Arc<Worker>,
    pub dispatcher: Arc<dyn Dispatcher>,
}

impl App {
    #[must_use]
    pub fn new(
        config: AppConfig,
        slack: Arc<dyn SlackApi>,
        completion: Arc<dyn CompletionClient>,
        topology: Topology,
    ) -> Self {
        let worker = Arc::new(Worker::new(Rewriter::new(completion), Arc::clone(&slack)));
        let dispatcher: Arc<dyn Dispatcher> = match topology {
            Topology::Background => Arc::new(BackgroundDispatcher::new(Arc::clone(&worker))),
            Topology::Reinvoke {
                invoker,
                function_name,
            } => Arc::new(ReinvokeDispatcher::new(invoker, function_name)),
        };

        Self {
            config,
            slack,
            worker,
            dispatcher,
        }
    }

    /// Build the production app from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for missing or invalid settings.
    pub async fn from_env(deployment: Deployment) -> Result<Self, BotError> {
        let config = AppConfig::from_env()?;
        let slack: Arc<dyn SlackApi> = Arc::new(SlackClient::new(config.slack_bot_token.clone())?);
        let completion: Arc<dyn CompletionClient> = Arc::new(OpenAiClient::from_config(&config));

        let topology = match (deployment, config.worker_function_name.clone()) {
            (Deployment::Lambda, Some(function_name)) => {
                let aws_config = aws_config::from_env().load().await;
                info!(function = %function_name, "Dispatching rewrites by re-invocation");
                Topology::Reinvoke {
                    invoker: Arc::new(aws_sdk_lambda::Client::new(&aws_config)),
                    function_name,
                }
            }
            _ => {
                info!("Dispatching rewrites to background tasks");
                Topology::Background
            }
        };

        Ok(Self::new(config, slack, completion, topology))
    }
}
