use crate::config::{SemanticConfig, StrategyConfig};
use crate::embedding::{cosine_similarity, EmbeddingProvider};
use crate::error::{ProviderError, Result};
use crate::page_map::PageOffsetMap;
use crate::strategy::sentence::{split_sentences, Sentence};
use crate::types::{Chunk, ChunkMetadata, Page};
use std::fmt;
use std::sync::Arc;

/// Starts a new chunk wherever adjacent sentences fall below a similarity threshold
#[derive(Clone)]
pub struct SemanticChunker {
    config: SemanticConfig,
    provider: Arc<dyn EmbeddingProvider>,
}

impl fmt::Debug for SemanticChunker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SemanticChunker")
            .field("config", &self.config)
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl SemanticChunker {
    pub const NAME: &'static str = "semantic";

    pub fn new(config: SemanticConfig, provider: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, provider })
    }

    #[must_use]
    pub const fn config(&self) -> &SemanticConfig {
        &self.config
    }

    /// Chunk `text`, embedding all sentences in a single batch request.
    ///
    /// A failed embedding request fails the whole call.
    pub async fn chunk(&self, text: &str, pages: Option<&[Page]>) -> Result<Vec<Chunk>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let page_map = PageOffsetMap::from_pages(pages);
        let sentences = split_sentences(text);

        if sentences.len() < 2 {
            let (start, end) = sentences
                .first()
                .map_or((0, text.len()), |sentence| (sentence.start, sentence.end));
            return Ok(vec![Chunk::new(
                text,
                start,
                end,
                ChunkMetadata::with_pages(page_map.pages_for(start, end)),
            )]);
        }

        let inputs: Vec<String> = sentences.iter().map(|s| s.text.to_string()).collect();
        let embeddings = self.provider.embed_batch(&inputs).await?;
        if embeddings.len() != sentences.len() {
            log::warn!(
                "{} returned {} embeddings for {} sentences",
                self.provider.name(),
                embeddings.len(),
                sentences.len()
            );
            return Err(ProviderError::new(format!(
                "expected {} embeddings, got {}",
                sentences.len(),
                embeddings.len()
            ))
            .with_provider(self.provider.name())
            .into());
        }

        let dimension = embeddings[0].len();
        if let Some(idx) = embeddings.iter().position(|v| v.len() != dimension) {
            log::warn!(
                "{} returned a {}-dimensional vector after {}-dimensional ones",
                self.provider.name(),
                embeddings[idx].len(),
                dimension
            );
            return Err(ProviderError::new(format!(
                "embedding {idx} has dimension {}, expected {dimension}",
                embeddings[idx].len()
            ))
            .with_provider(self.provider.name())
            .into());
        }

        let mut chunks = Vec::new();
        let mut group_start = 0;

        for idx in 1..sentences.len() {
            let similarity = cosine_similarity(&embeddings[idx - 1], &embeddings[idx]);
            if similarity < self.config.threshold {
                chunks.push(group_chunk(&sentences[group_start..idx], &page_map));
                group_start = idx;
            }
        }
        chunks.push(group_chunk(&sentences[group_start..], &page_map));

        log::debug!(
            "semantic: {} sentences -> {} chunks (threshold={})",
            sentences.len(),
            chunks.len(),
            self.config.threshold
        );
        Ok(chunks)
    }
}

/// Join a run of sentences with single spaces; span runs from first start to last end
fn group_chunk(group: &[Sentence<'_>], page_map: &PageOffsetMap) -> Chunk {
    let start = group.first().map_or(0, |s| s.start);
    let end = group.last().map_or(start, |s| s.end);
    let text = group
        .iter()
        .map(|sentence| sentence.text)
        .collect::<Vec<_>>()
        .join(" ");

    Chunk::new(
        text,
        start,
        end,
        ChunkMetadata::with_pages(page_map.pages_for(start, end)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChunkerError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Embeds sentences mentioning "cat" and everything else on orthogonal axes
    #[derive(Default)]
    struct TopicProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EmbeddingProvider for TopicProvider {
        async fn embed_batch(
            &self,
            texts: &[String],
        ) -> std::result::Result<Vec<Vec<f32>>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(texts
                .iter()
                .map(|t| {
                    if t.contains("cat") {
                        vec![1.0, 0.0]
                    } else {
                        vec![0.0, 1.0]
                    }
                })
                .collect())
        }

        fn name(&self) -> &str {
            "topic"
        }
    }

    struct ShortProvider;

    #[async_trait]
    impl EmbeddingProvider for ShortProvider {
        async fn embed_batch(
            &self,
            _texts: &[String],
        ) -> std::result::Result<Vec<Vec<f32>>, ProviderError> {
            Ok(vec![vec![1.0]])
        }
    }

    /// Returns one more dimension for the last text than for the others
    struct RaggedProvider;

    #[async_trait]
    impl EmbeddingProvider for RaggedProvider {
        async fn embed_batch(
            &self,
            texts: &[String],
        ) -> std::result::Result<Vec<Vec<f32>>, ProviderError> {
            let mut vectors = vec![vec![1.0, 0.0]; texts.len()];
            if let Some(last) = vectors.last_mut() {
                last.push(0.0);
            }
            Ok(vectors)
        }

        fn name(&self) -> &str {
            "ragged"
        }
    }

    fn chunker(threshold: f64, provider: Arc<dyn EmbeddingProvider>) -> SemanticChunker {
        SemanticChunker::new(SemanticConfig { threshold }, provider).unwrap()
    }

    #[tokio::test]
    async fn test_breaks_on_topic_change_with_one_batch() {
        let provider = Arc::new(TopicProvider::default());
        let chunker = chunker(0.8, provider.clone());

        let text = "The cat sat. The cat slept. Stocks fell today. Markets were down.";
        let chunks = chunker.chunk(text, None).await.unwrap();
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "The cat sat. The cat slept.",
                "Stocks fell today. Markets were down."
            ]
        );
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_single_sentence_skips_embedding() {
        let provider = Arc::new(TopicProvider::default());
        let chunker = chunker(0.8, provider.clone());

        let chunks = chunker.chunk("  Just one sentence.  ", None).await.unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "  Just one sentence.  ");
        assert_eq!((chunks[0].start, chunks[0].end), (2, 20));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_wrong_embedding_count_is_provider_error() {
        let chunker = chunker(0.5, Arc::new(ShortProvider));
        let result = chunker.chunk("One. Two. Three.", None).await;
        assert!(matches!(result, Err(ChunkerError::Provider(_))));
    }

    #[tokio::test]
    async fn test_mixed_dimensions_are_provider_error() {
        let chunker = chunker(0.5, Arc::new(RaggedProvider));
        match chunker.chunk("One. Two. Three.", None).await {
            Err(ChunkerError::Provider(err)) => {
                assert_eq!(err.provider.as_deref(), Some("ragged"));
                assert!(err.message.contains("dimension 3, expected 2"));
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_page_numbers_from_sentence_spans() {
        let pages = vec![
            Page::new(1, "The cat sat. The cat slept."),
            Page::new(2, "Stocks fell today."),
        ];
        let text = crate::page_map::join_pages(&pages);
        let chunker = chunker(0.8, Arc::new(TopicProvider::default()));

        let chunks = chunker.chunk(&text, Some(&pages)).await.unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].page_numbers(), &[1]);
        assert_eq!(chunks[1].page_numbers(), &[2]);
    }
}
