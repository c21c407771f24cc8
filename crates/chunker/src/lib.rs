//! # RAG Studio Chunker
//!
//! Multi-strategy text chunking with page provenance, for embedding and retrieval.
//!
//! ## Strategies
//!
//! | name           | splits on                                   | options                                   |
//! |----------------|---------------------------------------------|-------------------------------------------|
//! | `character`    | fixed-size character windows                | `chunk_size`, `chunk_overlap`             |
//! | `paragraph`    | blank lines, merged below a minimum size    | `min_chunk_size`                          |
//! | `sentence`     | `.`/`!`/`?` + whitespace, grouped in windows | `sentences_per_chunk`, `overlap`          |
//! | `recursive`    | coarsest separator first, finer on overflow | `chunk_size`, `chunk_overlap`, `separators` |
//! | `hierarchical` | markdown headers up to a level              | `split_level`, `default_section`          |
//! | `semantic`     | drops in adjacent-sentence similarity       | `threshold` (needs an embedding provider) |
//!
//! ## Architecture
//!
//! ```text
//! text (+ pages joined with "\n\n")
//!     │
//!     ├──> get_strategy(name, options, provider?)
//!     │
//!     ├──> PageOffsetMap (byte span → page numbers)
//!     │
//!     ├──> Strategy::chunk
//!     │    └─> semantic only: one embed_batch request
//!     │
//!     └──> Chunk[] { text, start, end, metadata { page_numbers, section? } }
//!          └─> ChunkMetrics
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rag_studio_chunker::{Chunker, Page, StrategyOptions};
//!
//! # async fn demo() -> rag_studio_chunker::Result<()> {
//! let mut options = StrategyOptions::new();
//! options.insert("chunk_size".into(), 200.into());
//! options.insert("chunk_overlap".into(), 20.into());
//!
//! let chunker = Chunker::from_options("recursive", &options, None)?;
//! let pages = vec![Page::new(1, "First page."), Page::new(2, "Second page.")];
//!
//! for chunk in chunker.chunk_pages(&pages).await? {
//!     println!("{:?}: {}", chunk.page_numbers(), chunk.text);
//! }
//! # Ok(())
//! # }
//! ```

mod chunker;
mod config;
mod embedding;
mod error;
mod metrics;
mod page_map;
pub mod strategy;
mod types;

pub use chunker::{Chunker, ChunkingReport};
pub use config::{
    CharacterConfig, HierarchicalConfig, ParagraphConfig, RecursiveConfig, SemanticConfig,
    SentenceConfig, StrategyConfig, StrategyOptions, DEFAULT_SECTION,
};
pub use embedding::{cosine_similarity, EmbeddingProvider};
pub use error::{ChunkerError, ProviderError, Result};
pub use metrics::ChunkMetrics;
pub use page_map::{join_pages, PageOffsetMap, PageSpan, PAGE_SEPARATOR};
pub use strategy::{get_strategy, Strategy, StrategyKind};
pub use types::{Chunk, ChunkMetadata, Page};
