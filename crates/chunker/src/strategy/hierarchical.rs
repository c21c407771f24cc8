use crate::config::{HierarchicalConfig, StrategyConfig};
use crate::error::{ChunkerError, Result};
use crate::page_map::PageOffsetMap;
use crate::types::{Chunk, ChunkMetadata, Page};
use regex::Regex;

const HEADER_MARKER: char = '#';

/// One chunk per markdown header section up to `split_level`
#[derive(Debug, Clone)]
pub struct HierarchicalChunker {
    config: HierarchicalConfig,
    header_pattern: Regex,
}

/// Section being folded over the header matches
struct Section<'a> {
    label: String,
    header: &'a str,
    header_start: usize,
    header_end: usize,
}

impl HierarchicalChunker {
    pub const NAME: &'static str = "hierarchical";

    pub fn new(config: HierarchicalConfig) -> Result<Self> {
        config.validate()?;
        let pattern = format!(r"(?m)^#{{1,{}}}[ \t]+.+$", config.split_level);
        let header_pattern = Regex::new(&pattern)
            .map_err(|e| ChunkerError::validation(format!("header pattern: {e}")))?;
        Ok(Self {
            config,
            header_pattern,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &HierarchicalConfig {
        &self.config
    }

    pub fn chunk(&self, text: &str, pages: Option<&[Page]>) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        let page_map = PageOffsetMap::from_pages(pages);
        let headers: Vec<_> = self.header_pattern.find_iter(text).collect();
        let mut chunks = Vec::with_capacity(headers.len() + 1);

        let preamble_end = headers.first().map_or(text.len(), |m| m.start());
        if let Some((start, end)) = trimmed_span(text, 0, preamble_end) {
            chunks.push(Chunk::new(
                &text[start..end],
                start,
                end,
                ChunkMetadata::with_pages(page_map.pages_for(start, end))
                    .section(self.config.default_section.as_str()),
            ));
        }

        for (idx, header) in headers.iter().enumerate() {
            let content_end = headers.get(idx + 1).map_or(text.len(), |next| next.start());
            let raw_header = header.as_str().trim();
            let section = Section {
                label: raw_header
                    .trim_start_matches(HEADER_MARKER)
                    .trim()
                    .to_string(),
                header: raw_header,
                header_start: header.start(),
                header_end: header.start() + header.as_str().trim_end().len(),
            };
            chunks.push(section.into_chunk(text, header.end(), content_end, &page_map));
        }

        log::debug!(
            "hierarchical: {} headers -> {} chunks (split_level={})",
            headers.len(),
            chunks.len(),
            self.config.split_level
        );
        chunks
    }
}

impl Section<'_> {
    fn into_chunk(
        self,
        text: &str,
        content_start: usize,
        content_end: usize,
        page_map: &PageOffsetMap,
    ) -> Chunk {
        let (content, end) = match trimmed_span(text, content_start, content_end) {
            Some((start, end)) => (&text[start..end], end),
            None => ("", self.header_end),
        };

        Chunk::new(
            format!("{}\n{content}", self.header),
            self.header_start,
            end,
            ChunkMetadata::with_pages(page_map.pages_for(self.header_start, end))
                .section(self.label),
        )
    }
}

/// Byte span of `text[start..end]` with surrounding whitespace removed; `None` if blank
fn trimmed_span(text: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let region = &text[start..end];
    let trimmed = region.trim();
    if trimmed.is_empty() {
        return None;
    }
    let start = start + (region.len() - region.trim_start().len());
    Some((start, start + trimmed.len()))
}
