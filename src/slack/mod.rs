//! All Slack-specific functionality

pub mod client;
pub mod command_parser;
pub mod modal_builder;
pub mod response_builder;

// Re-export main types for convenience
pub use client::{SlackApi, SlackClient};
pub use command_parser::SlashCommand;
