use crate::types::Chunk;
use serde::{Deserialize, Serialize};

/// Size statistics over a chunk list; sizes are character counts of chunk text
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetrics {
    pub total_chunks: usize,
    pub avg_size: f64,
    pub min_size: usize,
    pub max_size: usize,
}

impl ChunkMetrics {
    /// Compute metrics for `chunks`; all zero for an empty list
    #[must_use]
    pub fn calculate(chunks: &[Chunk]) -> Self {
        let sizes: Vec<usize> = chunks.iter().map(Chunk::char_len).collect();
        let total: usize = sizes.iter().sum();

        Self {
            total_chunks: chunks.len(),
            avg_size: if sizes.is_empty() {
                0.0
            } else {
                total as f64 / sizes.len() as f64
            },
            min_size: sizes.iter().copied().min().unwrap_or(0),
            max_size: sizes.iter().copied().max().unwrap_or(0),
        }
    }
}

impl std::fmt::Display for ChunkMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunks: {} | Avg: {:.1} | Range: {}-{}",
            self.total_chunks, self.avg_size, self.min_size, self.max_size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChunkMetadata;

    fn chunk(text: &str) -> Chunk {
        Chunk::new(text, 0, text.len(), ChunkMetadata::default())
    }

    #[test]
    fn test_metrics_over_chunks() {
        let chunks = vec![chunk("ab"), chunk("abcd"), chunk("abcdef")];
        let metrics = ChunkMetrics::calculate(&chunks);

        assert_eq!(metrics.total_chunks, 3);
        assert_eq!(metrics.avg_size, 4.0);
        assert_eq!(metrics.min_size, 2);
        assert_eq!(metrics.max_size, 6);
        assert_eq!(metrics.to_string(), "Chunks: 3 | Avg: 4.0 | Range: 2-6");
    }

    #[test]
    fn test_empty_list_is_all_zero() {
        assert_eq!(ChunkMetrics::calculate(&[]), ChunkMetrics::default());
    }

    #[test]
    fn test_sizes_count_characters() {
        let metrics = ChunkMetrics::calculate(&[chunk("日本語")]);
        assert_eq!(metrics.max_size, 3);
    }

    #[test]
    fn test_calculation_is_repeatable() {
        let chunks = vec![chunk("one"), chunk("three")];
        assert_eq!(
            ChunkMetrics::calculate(&chunks),
            ChunkMetrics::calculate(&chunks)
        );
    }
}
