use crate::config::{SentenceConfig, StrategyConfig};
use crate::error::Result;
use crate::page_map::PageOffsetMap;
use crate::types::{Chunk, ChunkMetadata, Page};
use once_cell::sync::Lazy;
use regex::Regex;

/// Terminal punctuation followed by whitespace; group 1 is the gap between sentences
static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?](\s+)").expect("sentence boundary pattern is valid"));

/// A trimmed sentence and its exact byte span in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Sentence<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Split `text` at terminal punctuation followed by whitespace.
///
/// The whitespace gaps are dropped, each piece is trimmed, and blank pieces
/// are skipped. Spans point at the trimmed text.
pub(crate) fn split_sentences(text: &str) -> Vec<Sentence<'_>> {
    let mut sentences = Vec::new();
    let mut piece_start = 0;

    for caps in SENTENCE_BOUNDARY.captures_iter(text) {
        let Some(gap) = caps.get(1) else {
            continue;
        };
        push_trimmed(text, piece_start, gap.start(), &mut sentences);
        piece_start = gap.end();
    }
    push_trimmed(text, piece_start, text.len(), &mut sentences);

    sentences
}

fn push_trimmed<'a>(text: &'a str, start: usize, end: usize, out: &mut Vec<Sentence<'a>>) {
    let piece = &text[start..end];
    let trimmed = piece.trim();
    if trimmed.is_empty() {
        return;
    }

    let start = start + (piece.len() - piece.trim_start().len());
    out.push(Sentence {
        text: trimmed,
        start,
        end: start + trimmed.len(),
    });
}

/// Groups sentences into overlapping fixed-count windows
#[derive(Debug, Clone)]
pub struct SentenceChunker {
    config: SentenceConfig,
}

impl SentenceChunker {
    pub const NAME: &'static str = "sentence";

    pub fn new(config: SentenceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &SentenceConfig {
        &self.config
    }

    /// Sentences between consecutive window starts; never below one
    #[must_use]
    pub fn stride(&self) -> usize {
        self.config
            .sentences_per_chunk
            .saturating_sub(self.config.overlap)
            .max(1)
    }

    pub fn chunk(&self, text: &str, pages: Option<&[Page]>) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        let sentences = split_sentences(text);
        let (Some(first), Some(last)) = (sentences.first(), sentences.last()) else {
            return Vec::new();
        };

        let page_map = PageOffsetMap::from_pages(pages);

        // Few enough sentences: keep the original text and its formatting
        if sentences.len() <= self.config.sentences_per_chunk {
            let pages = page_map.pages_for(first.start, last.end);
            return vec![Chunk::new(
                text,
                first.start,
                last.end,
                ChunkMetadata::with_pages(pages),
            )];
        }

        let chunks: Vec<Chunk> = (0..sentences.len())
            .step_by(self.stride())
            .map(|idx| {
                let window_end = (idx + self.config.sentences_per_chunk).min(sentences.len());
                let window = &sentences[idx..window_end];
                let start = window[0].start;
                let end = window[window.len() - 1].end;
                let text = window
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
            })
            .collect();

        log::debug!(
            "sentence: {} sentences -> {} chunks",
            sentences.len(),
            chunks.len()
        );
        chunks
    }
}
