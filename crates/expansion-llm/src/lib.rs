pub mod advisor;
pub mod client;
pub mod prompt;

pub use advisor::ClaudeAdvisor;
pub use client::{ClaudeClient, Completion, LlmClient};
