//! All AI/LLM functionality

pub mod client;
pub mod prompt_builder;
pub mod rewriter;

// Re-export main types for convenience
pub use client::{CompletionClient, OpenAiClient};
pub use rewriter::Rewriter;
