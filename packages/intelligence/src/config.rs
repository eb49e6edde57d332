use serde::Deserialize;

/// LLM provider and retrieval settings.
#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// Provider API key. Missing keys fail on first use, not at startup.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Default: "https://generativelanguage.googleapis.com".
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Default: "gemini-1.5-pro".
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    /// Default: "models/embedding-001".
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    /// Maximum characters per chunk. Default: 3000.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Characters shared between neighbouring chunks. Default: 400.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
    /// Chunks handed to the model as context. Default: 4.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn default_chat_model() -> String {
    "gemini-1.5-pro".into()
}
fn default_embedding_model() -> String {
    "models/embedding-001".into()
}
fn default_chunk_size() -> usize {
    3000
}
fn default_chunk_overlap() -> usize {
    400
}
fn default_top_k() -> usize {
    4
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            chat_model: default_chat_model(),
            embedding_model: default_embedding_model(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            top_k: default_top_k(),
        }
    }
}
