use std::sync::Arc;

use crate::config::LlmConfig;
use crate::error::{IntelligenceError, Result};
use crate::index::VectorIndex;
use crate::loader::DocumentLoader;
use crate::prompt::Prompts;
use crate::provider::{ChatModel, ChatRequest, EmbeddingModel, EmbeddingTask, GeminiClient};
use crate::splitter::TextSplitter;

/// Summarization and retrieval-augmented question answering over stored PDFs.
pub struct DocumentIntelligence {
    chat: Arc<dyn ChatModel>,
    embedder: Arc<dyn EmbeddingModel>,
    loader: DocumentLoader,
    splitter: TextSplitter,
    top_k: usize,
    prompts: Prompts,
}

impl DocumentIntelligence {
    pub fn new(
        chat: Arc<dyn ChatModel>,
        embedder: Arc<dyn EmbeddingModel>,
        loader: DocumentLoader,
        splitter: TextSplitter,
        top_k: usize,
    ) -> Result<Self> {
        Ok(Self {
            chat,
            embedder,
            loader,
            splitter,
            top_k: top_k.max(1),
            prompts: Prompts::new()?,
        })
    }

    /// Wire a Gemini client for both chat and embeddings.
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let gemini = Arc::new(GeminiClient::new(config)?);
        Self::new(
            gemini.clone(),
            gemini,
            DocumentLoader::new()?,
            TextSplitter::new(config.chunk_size, config.chunk_overlap)?,
            config.top_k,
        )
    }

    /// Summarize arbitrary text with a deterministic (temperature 0) completion.
    #[tracing::instrument(skip_all, fields(chars = text.len()))]
    pub async fn summarize(&self, text: &str) -> Result<String> {
        let prompt = self.prompts.summarize(text)?;
        self.chat
            .complete(ChatRequest::new(prompt).with_temperature(0.0))
            .await
    }

    /// Answer `question` from the PDF at `reference`.
    ///
    /// The document is loaded, chunked and embedded for this call only; the
    /// `top_k` most similar chunks are stuffed into a single prompt.
    #[tracing::instrument(skip(self, question))]
    pub async fn answer_question(&self, reference: &str, question: &str) -> Result<String> {
        let pages = self.loader.load(reference).await?;
        let chunks = self.splitter.split_pages(&pages);
        if chunks.is_empty() {
            return Err(IntelligenceError::EmptyDocument);
        }

        let texts = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embedder.embed(texts, EmbeddingTask::Document).await?;
        let index = VectorIndex::build(chunks, vectors)?;

        let query = self
            .embedder
            .embed(vec![question.to_string()], EmbeddingTask::Query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| IntelligenceError::InvalidResponse("no query embedding".into()))?;

        let hits = index.search(&query, self.top_k)?;
        tracing::debug!(
            chunks = index.len(),
            selected = hits.len(),
            pages = ?hits.iter().map(|h| h.chunk.page).collect::<Vec<_>>(),
            "Retrieved context"
        );

        let context = hits
            .iter()
            .map(|hit| hit.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let prompt = self.prompts.question_answer(&context, question)?;

        self.chat.complete(ChatRequest::new(prompt)).await
    }
}
