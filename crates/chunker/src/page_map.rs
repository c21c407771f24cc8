use crate::types::Page;

/// Separator placed between consecutive pages when they are joined into one text
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Byte interval one page occupies in the joined text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpan {
    pub start: usize,
    pub end: usize,
    pub page_number: u32,
}

/// Offset table mapping byte spans of the joined text back to page numbers.
///
/// Intervals are contiguous apart from the separator gaps, never overlap,
/// and each has exactly the byte length of its page text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOffsetMap {
    spans: Vec<PageSpan>,
}

impl PageOffsetMap {
    /// Build the table for `pages` joined with [`PAGE_SEPARATOR`].
    #[must_use]
    pub fn build(pages: &[Page]) -> Self {
        let mut spans = Vec::with_capacity(pages.len());
        let mut offset = 0;

        for (idx, page) in pages.iter().enumerate() {
            let end = offset + page.text.len();
            spans.push(PageSpan {
                start: offset,
                end,
                page_number: page.number,
            });
            offset = if idx + 1 < pages.len() {
                end + PAGE_SEPARATOR.len()
            } else {
                end
            };
        }

        Self { spans }
    }

    /// Build the table from an optional page list; `None` yields an empty map.
    #[must_use]
    pub fn from_pages(pages: Option<&[Page]>) -> Self {
        pages.map(Self::build).unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    #[must_use]
    pub fn spans(&self) -> &[PageSpan] {
        &self.spans
    }

    /// Page numbers whose interval intersects the half-open span `[start, end)`,
    /// in page order and without repeats.
    #[must_use]
    pub fn pages_for(&self, start: usize, end: usize) -> Vec<u32> {
        let mut out: Vec<u32> = Vec::new();
        for span in &self.spans {
            if start < span.end && end > span.start && !out.contains(&span.page_number) {
                out.push(span.page_number);
            }
        }
        out
    }
}

/// Concatenate page texts the way [`PageOffsetMap::build`] expects them laid out.
#[must_use]
pub fn join_pages(pages: &[Page]) -> String {
    pages
        .iter()
        .map(|page| page.text.as_str())
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
}
