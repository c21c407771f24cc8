use crate::config::{ParagraphConfig, StrategyConfig};
use crate::error::Result;
use crate::page_map::PageOffsetMap;
use crate::types::{Chunk, ChunkMetadata, Page};

/// Paragraph delimiter; also used to join merged paragraphs
const PARAGRAPH_DELIMITER: &str = "\n\n";

/// Groups blank-line separated paragraphs into chunks
#[derive(Debug, Clone)]
pub struct ParagraphChunker {
    config: ParagraphConfig,
}

/// Chunk being accumulated, with its exact byte span
struct PendingChunk {
    text: String,
    start: usize,
    end: usize,
    chars: usize,
}

impl PendingChunk {
    fn finish(self, page_map: &PageOffsetMap) -> Chunk {
        let pages = page_map.pages_for(self.start, self.end);
        Chunk::new(
            self.text,
            self.start,
            self.end,
            ChunkMetadata::with_pages(pages),
        )
    }
}

impl ParagraphChunker {
    pub const NAME: &'static str = "paragraph";

    pub fn new(config: ParagraphConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &ParagraphConfig {
        &self.config
    }

    pub fn chunk(&self, text: &str, pages: Option<&[Page]>) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        let page_map = PageOffsetMap::from_pages(pages);
        let delimiter_chars = PARAGRAPH_DELIMITER.chars().count();

        let mut chunks = Vec::new();
        let mut current: Option<PendingChunk> = None;
        let mut cursor = 0;

        for paragraph in text.split(PARAGRAPH_DELIMITER) {
            let start = cursor;
            let end = cursor + paragraph.len();
            cursor = end + PARAGRAPH_DELIMITER.len();

            // Runs of delimiters leave blank pieces behind; they only move the cursor
            if paragraph.trim().is_empty() {
                continue;
            }

            let paragraph_chars = paragraph.chars().count();
            match current.take() {
                Some(mut pending)
                    if pending.chars + delimiter_chars + paragraph_chars
                        < self.config.min_chunk_size =>
                {
                    pending.text.push_str(PARAGRAPH_DELIMITER);
                    pending.text.push_str(paragraph);
                    pending.end = end;
                    pending.chars += delimiter_chars + paragraph_chars;
                    current = Some(pending);
                }
                previous => {
                    if let Some(done) = previous {
                        chunks.push(done.finish(&page_map));
                    }
                    current = Some(PendingChunk {
                        text: paragraph.to_string(),
                        start,
                        end,
                        chars: paragraph_chars,
                    });
                }
            }
        }

        if let Some(done) = current {
            chunks.push(done.finish(&page_map));
        }

        log::debug!(
            "paragraph: {} chunks (min_chunk_size={})",
            chunks.len(),
            self.config.min_chunk_size
        );
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chunker(min_chunk_size: usize) -> ParagraphChunker {
        ParagraphChunker::new(ParagraphConfig { min_chunk_size }).unwrap()
    }

    #[test]
    fn test_small_paragraphs_are_merged() {
        let chunks = chunker(100).chunk("one\n\ntwo\n\nthree", None);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "one\n\ntwo\n\nthree");
        assert_eq!((chunks[0].start, chunks[0].end), (0, 15));
    }

    #[test]
    fn test_flush_when_combined_length_reaches_minimum() {
        // "aaaa" + "\n\n" + "bbbb" = 10 characters, not below 10
        let chunks = chunker(10).chunk("aaaa\n\nbbbb", None);
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["aaaa", "bbbb"]);

        let merged = chunker(11).chunk("aaaa\n\nbbbb", None);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_delimiter_runs_only_advance_offsets() {
        let text = "first\n\n\n\n\n\nsecond";
        let chunks = chunker(0).chunk(text, None);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].text, "second");
        assert_eq!(&text[chunks[1].start..chunks[1].end], "second");
    }

    #[test]
    fn test_final_short_chunk_is_kept() {
        let long = "x".repeat(50);
        let text = format!("{long}\n\n{long}\n\ntail");
        let chunks = chunker(55).chunk(&text, None);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].text, "tail");
    }

    #[test]
    fn test_page_numbers_use_tracked_span() {
        let pages = vec![
            Page::new(1, "Intro paragraph."),
            Page::new(2, "Second page paragraph."),
        ];
        let text = crate::page_map::join_pages(&pages);

        let separate = chunker(0).chunk(&text, Some(&pages));
        assert_eq!(separate.len(), 2);
        assert_eq!(separate[0].page_numbers(), &[1]);
        assert_eq!(separate[1].page_numbers(), &[2]);

        let merged = chunker(1000).chunk(&text, Some(&pages));
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].page_numbers(), &[1, 2]);
    }

    #[test]
    fn test_whitespace_only_text_yields_nothing() {
        assert!(chunker(100).chunk("\n\n  \n\n", None).is_empty());
    }
}
