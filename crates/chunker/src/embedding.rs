use crate::error::ProviderError;
use async_trait::async_trait;

/// Batched text embedding backend used by semantic chunking.
///
/// Implementations return one vector per input text, in input order, with a
/// fixed dimensionality. Retries and timeouts belong to the implementation
/// or its caller.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed all `texts` in one request
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError>;

    /// Provider name used in logs
    fn name(&self) -> &str {
        "embedding"
    }
}

/// Cosine similarity of two vectors; `0.0` for mismatched lengths or zero vectors.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum();
    let norm_a: f64 = a.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
