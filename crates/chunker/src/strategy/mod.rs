//! The six chunking strategies and the selector that builds them by name.

mod character;
mod hierarchical;
mod paragraph;
mod recursive;
mod semantic;
mod sentence;

pub use character::CharacterChunker;
pub use hierarchical::HierarchicalChunker;
pub use paragraph::ParagraphChunker;
pub use recursive::RecursiveChunker;
pub use semantic::SemanticChunker;
pub use sentence::SentenceChunker;

use crate::config::{
    CharacterConfig, HierarchicalConfig, ParagraphConfig, RecursiveConfig, SemanticConfig,
    SentenceConfig, StrategyConfig, StrategyOptions,
};
use crate::embedding::EmbeddingProvider;
use crate::error::{ChunkerError, Result};
use crate::types::{Chunk, Page};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Name of a chunking strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Fixed-size character windows
    Character,
    /// Blank-line paragraphs, merged up to a minimum size
    Paragraph,
    /// Fixed-count sentence windows
    Sentence,
    /// Separator fallback packing
    Recursive,
    /// Markdown header sections
    Hierarchical,
    /// Embedding similarity breaks
    Semantic,
}

impl StrategyKind {
    pub const ALL: [Self; 6] = [
        Self::Character,
        Self::Paragraph,
        Self::Sentence,
        Self::Recursive,
        Self::Hierarchical,
        Self::Semantic,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Character => CharacterChunker::NAME,
            Self::Paragraph => ParagraphChunker::NAME,
            Self::Sentence => SentenceChunker::NAME,
            Self::Recursive => RecursiveChunker::NAME,
            Self::Hierarchical => HierarchicalChunker::NAME,
            Self::Semantic => SemanticChunker::NAME,
        }
    }

    /// Whether building this strategy needs an embedding provider
    #[must_use]
    pub const fn requires_embeddings(self) -> bool {
        matches!(self, Self::Semantic)
    }

    /// Default options for this strategy
    #[must_use]
    pub fn default_config(self) -> StrategyOptions {
        match self {
            Self::Character => CharacterConfig::default_options(),
            Self::Paragraph => ParagraphConfig::default_options(),
            Self::Sentence => SentenceConfig::default_options(),
            Self::Recursive => RecursiveConfig::default_options(),
            Self::Hierarchical => HierarchicalConfig::default_options(),
            Self::Semantic => SemanticConfig::default_options(),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = ChunkerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ChunkerError::configuration(format!("Unknown strategy type: {s}")))
    }
}

/// A configured chunking strategy
#[derive(Debug, Clone)]
pub enum Strategy {
    Character(CharacterChunker),
    Paragraph(ParagraphChunker),
    Sentence(SentenceChunker),
    Recursive(RecursiveChunker),
    Hierarchical(HierarchicalChunker),
    Semantic(SemanticChunker),
}

impl Strategy {
    #[must_use]
    pub const fn kind(&self) -> StrategyKind {
        match self {
            Self::Character(_) => StrategyKind::Character,
            Self::Paragraph(_) => StrategyKind::Paragraph,
            Self::Sentence(_) => StrategyKind::Sentence,
            Self::Recursive(_) => StrategyKind::Recursive,
            Self::Hierarchical(_) => StrategyKind::Hierarchical,
            Self::Semantic(_) => StrategyKind::Semantic,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    #[must_use]
    pub fn default_config(&self) -> StrategyOptions {
        self.kind().default_config()
    }

    /// Split `text` into chunks; `pages`, when given, must be the pages `text` was joined from.
    ///
    /// Only the semantic strategy suspends (on its embedding request); the
    /// others complete synchronously.
    pub async fn chunk(&self, text: &str, pages: Option<&[Page]>) -> Result<Vec<Chunk>> {
        match self {
            Self::Character(chunker) => Ok(chunker.chunk(text, pages)),
            Self::Paragraph(chunker) => Ok(chunker.chunk(text, pages)),
            Self::Sentence(chunker) => Ok(chunker.chunk(text, pages)),
            Self::Recursive(chunker) => Ok(chunker.chunk(text, pages)),
            Self::Hierarchical(chunker) => Ok(chunker.chunk(text, pages)),
            Self::Semantic(chunker) => chunker.chunk(text, pages).await,
        }
    }
}

/// Build a strategy from its name and option mapping.
///
/// Unspecified options take their defaults. `provider` is required for
/// `semantic` and ignored otherwise.
pub fn get_strategy(
    name: &str,
    options: &StrategyOptions,
    provider: Option<Arc<dyn EmbeddingProvider>>,
) -> Result<Strategy> {
    let kind: StrategyKind = name.parse()?;

    let strategy = match kind {
        StrategyKind::Character => {
            Strategy::Character(CharacterChunker::new(CharacterConfig::from_options(options)?)?)
        }
        StrategyKind::Paragraph => {
            Strategy::Paragraph(ParagraphChunker::new(ParagraphConfig::from_options(options)?)?)
        }
        StrategyKind::Sentence => {
            Strategy::Sentence(SentenceChunker::new(SentenceConfig::from_options(options)?)?)
        }
        StrategyKind::Recursive => {
            Strategy::Recursive(RecursiveChunker::new(RecursiveConfig::from_options(options)?)?)
        }
        StrategyKind::Hierarchical => Strategy::Hierarchical(HierarchicalChunker::new(
            HierarchicalConfig::from_options(options)?,
        )?),
        StrategyKind::Semantic => {
            let provider = provider.ok_or_else(|| {
                ChunkerError::configuration("Embedding provider required for semantic chunking")
            })?;
            Strategy::Semantic(SemanticChunker::new(
                SemanticConfig::from_options(options)?,
                provider,
            )?)
        }
    };

    log::debug!("built {kind} strategy");
    Ok(strategy)
}
