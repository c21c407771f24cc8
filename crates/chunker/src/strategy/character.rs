use crate::config::{CharacterConfig, StrategyConfig};
use crate::error::Result;
use crate::page_map::PageOffsetMap;
use crate::types::{Chunk, ChunkMetadata, Page};

/// Fixed-size character windows with overlap
#[derive(Debug, Clone)]
pub struct CharacterChunker {
    config: CharacterConfig,
}

impl CharacterChunker {
    pub const NAME: &'static str = "character";

    pub fn new(config: CharacterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &CharacterConfig {
        &self.config
    }

    /// Distance between consecutive window starts; never below one character
    #[must_use]
    pub fn stride(&self) -> usize {
        self.config
            .chunk_size
            .saturating_sub(self.config.chunk_overlap)
            .max(1)
    }

    pub fn chunk(&self, text: &str, pages: Option<&[Page]>) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        let page_map = PageOffsetMap::from_pages(pages);

        // Byte offset of every char boundary, plus the end of text
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(idx, _)| idx)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = boundaries.len() - 1;
        let stride = self.stride();

        let mut chunks = Vec::with_capacity(char_count / stride + 1);
        let mut start = 0;

        loop {
            let end = (start + self.config.chunk_size).min(char_count);
            let (byte_start, byte_end) = (boundaries[start], boundaries[end]);

            chunks.push(Chunk::new(
                &text[byte_start..byte_end],
                byte_start,
                byte_end,
                ChunkMetadata::with_pages(page_map.pages_for(byte_start, byte_end)),
            ));

            if end >= char_count {
                break;
            }
            start += stride;
        }

        log::debug!(
            "character: {} chunks (size={}, stride={stride})",
            chunks.len(),
            self.config.chunk_size
        );
        chunks
    }
}
