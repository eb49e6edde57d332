use std::cmp::Ordering;

use crate::error::{IntelligenceError, Result};
use crate::splitter::Chunk;

/// A chunk together with its similarity to a query.
#[derive(Debug, Clone)]
pub struct ScoredChunk<'a> {
    pub chunk: &'a Chunk,
    pub score: f32,
}

/// In-memory, per-request vector index. Lives only as long as one question.
#[derive(Debug)]
pub struct VectorIndex {
    entries: Vec<(Chunk, Vec<f32>)>,
    dimensions: usize,
}

impl VectorIndex {
    /// Pair chunks with their embeddings. Counts and dimensions must agree.
    pub fn build(chunks: Vec<Chunk>, vectors: Vec<Vec<f32>>) -> Result<Self> {
        if chunks.len() != vectors.len() {
            return Err(IntelligenceError::InvalidResponse(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                vectors.len()
            )));
        }

        let dimensions = vectors.first().map(Vec::len).unwrap_or(0);
        if vectors.iter().any(|v| v.len() != dimensions) {
            return Err(IntelligenceError::InvalidResponse(
                "embeddings have inconsistent dimensions".into(),
            ));
        }

        Ok(Self {
            entries: chunks.into_iter().zip(vectors).collect(),
            dimensions,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// The `k` chunks most similar to `query` by cosine similarity, best first.
    /// Ties keep document order.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<ScoredChunk<'_>>> {
        if !self.entries.is_empty() && query.len() != self.dimensions {
            return Err(IntelligenceError::InvalidResponse(format!(
                "query embedding has {} dimensions, index has {}",
                query.len(),
                self.dimensions
            )));
        }

        let mut scored: Vec<ScoredChunk<'_>> = self
            .entries
            .iter()
            .map(|(chunk, vector)| ScoredChunk {
                chunk,
                score: cosine_similarity(query, vector),
            })
            .collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(k);
        Ok(scored)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
