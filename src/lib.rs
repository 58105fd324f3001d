/// Redraft - a Slack `/rewrite` bot that polishes draft messages with an OpenAI model.
///
/// A user types `/rewrite <draft>`; the bot acknowledges immediately, sends the
/// draft to a chat-completion model, and lets the user pick between the
/// original and the suggestion.
///
/// # Architecture
///
/// - Two result surfaces: a modal with an original/suggestion toggle, or an
///   ephemeral message with `send` / `cancel` buttons that post as the user
/// - Two dispatch strategies: an async self re-invocation of the AWS Lambda
///   function, or a detached tokio task in the local axum server
/// - Slack Web API calls go through the [`slack::SlackApi`] trait and the
///   completion call through [`ai::CompletionClient`], both injected via
///   [`app::App`]
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use redraft::app::{App, Deployment};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     redraft::setup_local_logging();
///
///     let app = Arc::new(App::from_env(Deployment::Server).await?);
///     redraft::server::serve(app).await?;
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod api;
pub mod app;
pub mod core;
pub mod dispatch;
pub mod errors;
pub mod server;
pub mod slack;
pub mod worker;

pub use errors::BotError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// redraft::setup_logging();
/// redraft::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(default_filter())
        .with(fmt_layer)
        .try_init();
}

/// Human-readable logging for the local server, filtered by `RUST_LOG`.
pub fn setup_local_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().compact().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(default_filter())
        .with(fmt_layer)
        .try_init();
}

fn default_filter() -> tracing_subscriber::EnvFilter {
    let fallback = if cfg!(feature = "debug-logs") {
        "redraft=debug,info"
    } else {
        "info"
    };
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback))
}
