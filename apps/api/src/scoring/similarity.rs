//! Text similarity: 0.7 × embedding cosine + 0.3 × TF-IDF cosine.
//!
//! The embedding backend is an `Embedder` trait object loaded once at startup,
//! so tests can substitute deterministic vectors.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::scoring::tfidf::tfidf_similarity;

pub const SEMANTIC_WEIGHT: f64 = 0.7;
pub const LEXICAL_WEIGHT: f64 = 0.3;

#[derive(Debug, Error)]
pub enum SimilarityError {
    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Embedding dimensions differ: {0} vs {1}")]
    DimensionMismatch(usize, usize),

    #[error("Empty vocabulary; documents contain only stop words")]
    EmptyVocabulary,
}

/// Sentence-embedding backend.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, SimilarityError>;
}

/// Model2Vec static embedding model.
pub struct StaticModelEmbedder {
    model: model2vec_rs::model::StaticModel,
    model_name: String,
}

impl StaticModelEmbedder {
    /// Loads from a Hugging Face repo id or a local model folder. Blocking.
    pub fn load(repo_or_path: &str, token: Option<&str>) -> anyhow::Result<Self> {
        let model = model2vec_rs::model::StaticModel::from_pretrained(
            Path::new(repo_or_path),
            token,
            None, // normalize: use the model's config
            None, // subfolder
        )?;
        Ok(Self {
            model,
            model_name: repo_or_path.to_string(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl Embedder for StaticModelEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, SimilarityError> {
        let embedding = self.model.encode_single(text);
        if embedding.is_empty() {
            return Err(SimilarityError::Embedding(format!(
                "{} produced an empty embedding",
                self.model_name
            )));
        }
        Ok(embedding)
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch(a.len(), b.len()));
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| (*x as f64) * (*y as f64)).sum();
    let norm_a = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a * norm_b))
}

/// Sub-scores and their weighted blend.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Similarity {
    pub semantic: f64,
    pub lexical: f64,
    pub combined: f64,
}

pub fn score_similarity(
    embedder: &dyn Embedder,
    resume_text: &str,
    jd_text: &str,
) -> Result<Similarity, SimilarityError> {
    info!("Calculating semantic similarity");
    let resume_embed = embedder.embed(resume_text)?;
    let jd_embed = embedder.embed(jd_text)?;
    let semantic = cosine_similarity(&resume_embed, &jd_embed)?;
    info!("Semantic similarity: {semantic}");

    info!("Calculating TF-IDF similarity");
    let lexical = tfidf_similarity(resume_text, jd_text)?;
    info!("TF-IDF similarity: {lexical}");

    let combined = SEMANTIC_WEIGHT * semantic + LEXICAL_WEIGHT * lexical;
    info!("Combined similarity score: {combined}");

    Ok(Similarity {
        semantic,
        lexical,
        combined,
    })
}
