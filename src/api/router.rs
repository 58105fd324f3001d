use tracing::error;

use super::ack::Acknowledge;
use super::helpers::err_response;
use super::{interactive_handler, parsing, slash_handler};
use crate::app::App;
use crate::errors::BotError;

/// Route a verified Slack request body to the slash or interactive handler.
/// `ack` is consumed exactly once on every path.
///
/// # Errors
///
/// Returns `AckTimeoutError` if the response could not be handed back.
pub async fn route_slack_request<A: Acknowledge>(
    app: &App,
    body: &str,
    ack: A,
) -> Result<(), BotError> {
    if parsing::is_interactive_body(body) {
        return match parsing::parse_interactive_payload(body) {
            Ok(payload) => interactive_handler::handle_interactive(app, &payload, ack).await,
            Err(e) => {
                error!("Interactive payload parse error: {}", e);
                ack.ack(err_response(400, &format!("Parse Error: {e}")))
            }
        };
    }

    slash_handler::handle_slash_command(app, body, ack).await
}
