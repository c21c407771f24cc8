use serde::{Deserialize, Serialize};

/// One page of extracted document text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    /// Page number (1-indexed, as reported by the extractor)
    #[serde(alias = "page_number")]
    pub number: u32,

    /// Page text
    pub text: String,
}

impl Page {
    #[must_use]
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// A text chunk with provenance metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk content
    pub text: String,

    /// Byte offset in the source text where the chunk's span starts.
    ///
    /// When a strategy returns its whole input verbatim as a single chunk
    /// (sentence and semantic chunking of short texts), the span covers only
    /// the non-blank content, so it can be narrower than `text`.
    pub start: usize,

    /// Byte offset in the source text where the chunk's span ends (exclusive)
    pub end: usize,

    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Create a new chunk
    #[must_use]
    pub fn new(text: impl Into<String>, start: usize, end: usize, metadata: ChunkMetadata) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            metadata,
        }
    }

    /// Length of the chunk text in characters
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Page numbers the chunk touches
    #[must_use]
    pub fn page_numbers(&self) -> &[u32] {
        &self.metadata.page_numbers
    }

    /// Section label, when the producing strategy tracks sections
    #[must_use]
    pub fn section(&self) -> Option<&str> {
        self.metadata.section.as_deref()
    }
}

/// Metadata attached to every chunk
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkMetadata {
    /// Pages whose interval intersects the chunk span, in page order.
    /// Empty when no page list was supplied.
    #[serde(default)]
    pub page_numbers: Vec<u32>,

    /// Nearest preceding header (hierarchical chunking only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl ChunkMetadata {
    /// Create metadata with page numbers only
    #[must_use]
    pub fn with_pages(page_numbers: Vec<u32>) -> Self {
        Self {
            page_numbers,
            ..Default::default()
        }
    }

    /// Builder: set section label
    #[must_use]
    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_accepts_page_number_key() {
        let page: Page = serde_json::from_str(r#"{"page_number": 3, "text": "abc"}"#).unwrap();
        assert_eq!(page, Page::new(3, "abc"));

        let page: Page = serde_json::from_str(r#"{"number": 4, "text": ""}"#).unwrap();
        assert_eq!(page.number, 4);
    }

    #[test]
    fn test_chunk_char_len_counts_characters() {
        let chunk = Chunk::new("héllo", 0, 6, ChunkMetadata::default());
        assert_eq!(chunk.char_len(), 5);
        assert_eq!(chunk.text.len(), 6);
    }

    #[test]
    fn test_metadata_serialization_omits_missing_section() {
        let plain = serde_json::to_value(ChunkMetadata::with_pages(vec![1, 2])).unwrap();
        assert_eq!(plain, serde_json::json!({ "page_numbers": [1, 2] }));

        let sectioned =
            serde_json::to_value(ChunkMetadata::with_pages(vec![]).section("Intro")).unwrap();
        assert_eq!(
            sectioned,
            serde_json::json!({ "page_numbers": [], "section": "Intro" })
        );
    }
}
