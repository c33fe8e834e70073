//! Pick the PDF chunk most relevant to a question.
//!
//! The document is split into fixed-size word chunks, each chunk is embedded
//! once per index build, and questions are matched by cosine similarity.

use anyhow::{Context, Result};

use crate::traits::{EmbeddingRequest, LlmProvider};

/// Words per chunk.
pub const DEFAULT_CHUNK_WORDS: usize = 500;

/// Split on whitespace and rejoin into chunks of `chunk_words` words.
pub fn chunk_text(text: &str, chunk_words: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(chunk_words.max(1))
        .map(|chunk| chunk.join(" "))
        .collect()
}

/// Cosine similarity; 0.0 for zero vectors or mismatched lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Embedded chunks of one document.
#[derive(Debug, Clone)]
pub struct ContextIndex {
    embedding_model: String,
    chunks: Vec<(String, Vec<f32>)>,
}

impl ContextIndex {
    /// Chunk `text` and embed every chunk sequentially.
    pub async fn build(
        provider: &dyn LlmProvider,
        embedding_model: &str,
        text: &str,
        chunk_words: usize,
    ) -> Result<Self> {
        let mut chunks = Vec::new();
        for (i, chunk) in chunk_text(text, chunk_words).into_iter().enumerate() {
            let embedding = provider
                .embed(&EmbeddingRequest {
                    model: embedding_model.to_string(),
                    input: chunk.clone(),
                })
                .await
                .with_context(|| format!("failed to embed chunk {i}"))?;
            chunks.push((chunk, embedding));
        }
        tracing::info!(chunks = chunks.len(), "context index built");
        Ok(Self {
            embedding_model: embedding_model.to_string(),
            chunks,
        })
    }

    /// Build from precomputed embeddings.
    pub fn from_embedded(embedding_model: &str, chunks: Vec<(String, Vec<f32>)>) -> Self {
        Self {
            embedding_model: embedding_model.to_string(),
            chunks,
        }
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Highest-similarity chunk; the first one wins ties.
    pub fn best_match(&self, query: &[f32]) -> Option<&str> {
        let mut best: Option<(f32, &str)> = None;
        for (chunk, embedding) in &self.chunks {
            let score = cosine_similarity(query, embedding);
            let score = if score.is_nan() { f32::NEG_INFINITY } else { score };
            if best.is_none_or(|(top, _)| score > top) {
                best = Some((score, chunk.as_str()));
            }
        }
        best.map(|(_, chunk)| chunk)
    }

    /// Embed `question` and return the closest chunk.
    pub async fn retrieve(&self, provider: &dyn LlmProvider, question: &str) -> Result<Option<&str>> {
        let query = provider
            .embed(&EmbeddingRequest {
                model: self.embedding_model.clone(),
                input: question.to_string(),
            })
            .await
            .context("failed to embed question")?;
        Ok(self.best_match(&query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_by_word_count() {
        let text = "one two  three\nfour five";
        assert_eq!(chunk_text(text, 2), vec!["one two", "three four", "five"]);
        assert!(chunk_text("   ", 500).is_empty());
    }

    #[test]
    fn cosine_basics() {
        assert!((cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 3.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn best_match_picks_closest_and_first_on_ties() {
        let index = ContextIndex::from_embedded(
            "m",
            vec![
                ("fever".into(), vec![1.0, 0.0]),
                ("feeding".into(), vec![0.0, 1.0]),
                ("feeding again".into(), vec![0.0, 2.0]),
            ],
        );
        assert_eq!(index.best_match(&[0.1, 0.9]), Some("feeding"));
        assert_eq!(index.best_match(&[1.0, 0.0]), Some("fever"));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn empty_index_has_no_match() {
        let index = ContextIndex::from_embedded("m", vec![]);
        assert!(index.is_empty());
        assert_eq!(index.best_match(&[1.0]), None);
    }
}
