mod gemini;

use async_trait::async_trait;

use crate::error::Result;

pub use gemini::GeminiClient;

/// A single-turn prompt for a chat model.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub prompt: String,
    /// Sampling temperature; provider default when `None`.
    pub temperature: Option<f32>,
}

impl ChatRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// What an embedding will be used for. Providers may tune vectors per task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingTask {
    /// Text that will be stored and searched over.
    Document,
    /// Text used to search.
    Query,
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a completion for `request` and return its text.
    async fn complete(&self, request: ChatRequest) -> Result<String>;
}

#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Embed every text, returning one vector per input in input order.
    async fn embed(&self, texts: Vec<String>, task: EmbeddingTask) -> Result<Vec<Vec<f32>>>;
}
