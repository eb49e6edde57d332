//! Google Gemini REST client covering text generation and batch embeddings.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ChatModel, ChatRequest, EmbeddingModel, EmbeddingTask};
use crate::config::LlmConfig;
use crate::error::{IntelligenceError, Result};

/// Upper bound on texts per `batchEmbedContents` call.
const MAX_EMBED_BATCH: usize = 100;

pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    chat_model: String,
    embedding_model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BatchEmbedResponse {
    #[serde(default)]
    embeddings: Vec<Embedding>,
}

#[derive(Debug, Deserialize)]
struct Embedding {
    values: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent("pdfshelf/intelligence")
            .build()
            .map_err(|e| IntelligenceError::Provider(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            chat_model: config.chat_model.clone(),
            embedding_model: config.embedding_model.clone(),
        })
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or(IntelligenceError::MissingApiKey)
    }

    /// Gemini accepts both `gemini-1.5-pro` and `models/gemini-1.5-pro`.
    fn qualified(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/v1beta/{}:{method}", self.base_url, Self::qualified(model))
    }

    async fn post(&self, url: String, payload: &Value) -> Result<reqwest::Response> {
        let api_key = self.api_key()?;
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(payload)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        Err(IntelligenceError::Provider(format!(
            "Gemini returned {status}: {message}"
        )))
    }

    fn task_type(task: EmbeddingTask) -> &'static str {
        match task {
            EmbeddingTask::Document => "RETRIEVAL_DOCUMENT",
            EmbeddingTask::Query => "RETRIEVAL_QUERY",
        }
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        let mut payload = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }],
            }],
        });
        if let Some(temperature) = request.temperature {
            payload["generationConfig"] = json!({ "temperature": temperature });
        }

        let url = self.endpoint(&self.chat_model, "generateContent");
        let body: GenerateResponse = self
            .post(url, &payload)
            .await?
            .json()
            .await
            .map_err(|e| IntelligenceError::InvalidResponse(e.to_string()))?;

        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(IntelligenceError::InvalidResponse(
                "Gemini returned no candidate text".into(),
            ));
        }
        Ok(text)
    }
}

#[async_trait]
impl EmbeddingModel for GeminiClient {
    #[tracing::instrument(skip(self, texts), fields(count = texts.len(), task = ?task))]
    async fn embed(&self, texts: Vec<String>, task: EmbeddingTask) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = Self::qualified(&self.embedding_model);
        let url = self.endpoint(&self.embedding_model, "batchEmbedContents");
        let mut vectors = Vec::with_capacity(texts.len());

        for batch in texts.chunks(MAX_EMBED_BATCH) {
            let requests: Vec<Value> = batch
                .iter()
                .map(|text| {
                    json!({
                        "model": model,
                        "content": { "parts": [{ "text": text }] },
                        "taskType": Self::task_type(task),
                    })
                })
                .collect();

            let body: BatchEmbedResponse = self
                .post(url.clone(), &json!({ "requests": requests }))
                .await?
                .json()
                .await
                .map_err(|e| IntelligenceError::InvalidResponse(e.to_string()))?;

            if body.embeddings.len() != batch.len() {
                return Err(IntelligenceError::InvalidResponse(format!(
                    "expected {} embeddings, got {}",
                    batch.len(),
                    body.embeddings.len()
                )));
            }
            vectors.extend(body.embeddings.into_iter().map(|e| e.values));
        }

        Ok(vectors)
    }
}
