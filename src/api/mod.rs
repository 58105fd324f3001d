//! Inbound Slack request handling shared by the Lambda and local server

pub mod ack;
pub mod handler;
pub mod helpers;
pub mod interactive_handler;
pub mod parsing;
pub mod router;
pub mod signature;
pub mod slash_handler;

// Re-export the main handler for convenience
pub use ack::Acknowledge;
pub use handler::function_handler;
pub use router::route_slack_request;
