//! Generative language API connector
//!
//! Used by the `ai ping` console command to check that the configured key and
//! model answer a prompt. One request, no retry, no streaming.

use super::ConnectorError;
use async_trait::async_trait;

pub mod client;

pub use client::GeminiClient;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a single free-text prompt and return the text of the first candidate
    async fn generate(&self, prompt: &str) -> Result<String, ConnectorError>;
}
