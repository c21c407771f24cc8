use crate::config::StrategyOptions;
use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::metrics::ChunkMetrics;
use crate::page_map::join_pages;
use crate::strategy::{get_strategy, Strategy};
use crate::types::{Chunk, Page};
use serde::Serialize;
use std::sync::Arc;

/// Main entry point: a configured strategy plus reporting helpers
#[derive(Debug, Clone)]
pub struct Chunker {
    strategy: Strategy,
}

/// Chunks produced by one call together with their size metrics
#[derive(Debug, Clone, Serialize)]
pub struct ChunkingReport {
    pub strategy: &'static str,
    pub chunks: Vec<Chunk>,
    pub metrics: ChunkMetrics,
}

impl Chunker {
    #[must_use]
    pub const fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    /// Build a chunker from a strategy name and option mapping
    pub fn from_options(
        name: &str,
        options: &StrategyOptions,
        provider: Option<Arc<dyn EmbeddingProvider>>,
    ) -> Result<Self> {
        get_strategy(name, options, provider).map(Self::new)
    }

    #[must_use]
    pub const fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Chunk text, optionally mapping chunks back to the pages it was joined from
    pub async fn chunk(&self, text: &str, pages: Option<&[Page]>) -> Result<Vec<Chunk>> {
        self.strategy.chunk(text, pages).await
    }

    /// Join `pages` and chunk the result with page provenance
    pub async fn chunk_pages(&self, pages: &[Page]) -> Result<Vec<Chunk>> {
        let text = join_pages(pages);
        self.chunk(&text, Some(pages)).await
    }

    /// Chunk and compute metrics in one step
    pub async fn run(&self, text: &str, pages: Option<&[Page]>) -> Result<ChunkingReport> {
        let chunks = self.chunk(text, pages).await?;
        let metrics = ChunkMetrics::calculate(&chunks);
        log::info!("{} chunking: {metrics}", self.strategy.name());

        Ok(ChunkingReport {
            strategy: self.strategy.name(),
            chunks,
            metrics,
        })
    }

    /// Get statistics about chunking
    #[must_use]
    pub fn get_stats(chunks: &[Chunk]) -> ChunkMetrics {
        ChunkMetrics::calculate(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "This is sentence one. This is sentence two. This is sentence three.\n\nThis is a new paragraph. It has some more text.";

    #[tokio::test]
    async fn test_run_reports_metrics() {
        let chunker = Chunker::from_options("paragraph", &StrategyOptions::new(), None).unwrap();
        let report = chunker.run(TEXT, None).await.unwrap();

        assert_eq!(report.strategy, "paragraph");
        assert_eq!(report.metrics.total_chunks, report.chunks.len());
        assert_eq!(report.metrics, Chunker::get_stats(&report.chunks));
    }

    #[tokio::test]
    async fn test_chunk_pages_attaches_page_numbers() {
        let chunker = Chunker::from_options("paragraph", &StrategyOptions::new(), None).unwrap();
        let pages = vec![
            Page::new(1, "First page paragraph that is long enough to stand alone as its own chunk of text here."),
            Page::new(2, "Second page paragraph."),
        ];

        let chunks = chunker.chunk_pages(&pages).await.unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].page_numbers(), &[1]);
        assert_eq!(chunks[1].page_numbers(), &[2]);
    }

    #[tokio::test]
    async fn test_report_serializes_chunks_and_metrics() {
        let chunker = Chunker::from_options("character", &StrategyOptions::new(), None).unwrap();
        let report = chunker.run("abc", None).await.unwrap();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["strategy"], "character");
        assert_eq!(value["chunks"][0]["text"], "abc");
        assert_eq!(value["metrics"]["total_chunks"], 1);
    }
}
