use thiserror::Error;

/// Errors raised while talking to the LLM provider or preparing a document for it.
#[derive(Debug, Error)]
pub enum IntelligenceError {
    /// No API key was configured for the provider.
    #[error("LLM provider API key is not configured")]
    MissingApiKey,
    /// The provider was unreachable or answered with an error status.
    #[error("LLM provider request failed: {0}")]
    Provider(String),
    /// The provider answered, but not with something we can use.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
    /// The document bytes could not be fetched from their reference.
    #[error("Failed to load document from {reference}: {message}")]
    Load { reference: String, message: String },
    /// The bytes were fetched but are not a readable PDF.
    #[error("Failed to extract text from PDF: {0}")]
    Extraction(String),
    /// The PDF parsed, but none of its pages carry text.
    #[error("Document contains no extractable text")]
    EmptyDocument,
    /// A prompt template failed to compile or render.
    #[error("Prompt template error: {0}")]
    Template(String),
    /// Chunk size / overlap combination is unusable.
    #[error("Invalid text splitter settings: {0}")]
    InvalidSplitter(String),
}

pub type Result<T> = std::result::Result<T, IntelligenceError>;

impl From<reqwest::Error> for IntelligenceError {
    fn from(err: reqwest::Error) -> Self {
        IntelligenceError::Provider(err.to_string())
    }
}
