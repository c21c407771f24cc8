use crate::config::{RecursiveConfig, StrategyConfig};
use crate::error::Result;
use crate::page_map::PageOffsetMap;
use crate::types::{Chunk, ChunkMetadata, Page};

/// Splits on the coarsest separator present, packs parts up to `chunk_size`,
/// and recurses with finer separators into parts that are still too large.
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    config: RecursiveConfig,
}

/// A split part: byte span in the source text plus its length in characters
#[derive(Debug, Clone, Copy)]
struct Part {
    start: usize,
    end: usize,
    chars: usize,
}

impl RecursiveChunker {
    pub const NAME: &'static str = "recursive";

    pub fn new(config: RecursiveConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &RecursiveConfig {
        &self.config
    }

    pub fn chunk(&self, text: &str, pages: Option<&[Page]>) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        let page_map = PageOffsetMap::from_pages(pages);
        let mut spans = Vec::new();
        self.split_segment(text, 0, text.len(), &self.config.separators, &mut spans);

        let chunks: Vec<Chunk> = spans
            .into_iter()
            .map(|(start, end)| {
                Chunk::new(
                    &text[start..end],
                    start,
                    end,
                    ChunkMetadata::with_pages(page_map.pages_for(start, end)),
                )
            })
            .collect();

        log::debug!(
            "recursive: {} chunks (size={}, overlap={})",
            chunks.len(),
            self.config.chunk_size,
            self.config.chunk_overlap
        );
        chunks
    }

    /// Chunk `text[start..end]`, appending the byte spans of emitted chunks to `out`.
    ///
    /// Packed parts are always consecutive in the source, so joining them with
    /// the separator reproduces `text[first.start..last.end]` exactly.
    fn split_segment(
        &self,
        text: &str,
        start: usize,
        end: usize,
        separators: &[String],
        out: &mut Vec<(usize, usize)>,
    ) {
        let segment = &text[start..end];
        let (separator, finer) = pick_separator(segment, separators);
        let separator_chars = separator.chars().count();
        let chunk_size = self.config.chunk_size;

        let mut current: Vec<Part> = Vec::new();
        let mut current_len = 0;

        for part in split_parts(segment, start, separator) {
            let joiner = if current.is_empty() { 0 } else { separator_chars };

            if current_len + joiner + part.chars <= chunk_size {
                current_len += joiner + part.chars;
                current.push(part);
                continue;
            }

            if !current.is_empty() {
                emit(text, &current, out);
                (current, current_len) = self.carry_overlap(&current, separator_chars);
            }

            if part.chars > chunk_size && !finer.is_empty() {
                // The oversized part takes the whole slot; nothing carries past it
                self.split_segment(text, part.start, part.end, finer, out);
                current.clear();
                current_len = 0;
            } else {
                // Carried parts give way, oldest first, until the new part fits
                let mut keep_from = 0;
                while keep_from < current.len() && current_len + part.chars > chunk_size {
                    current_len -= current[keep_from].chars + separator_chars;
                    keep_from += 1;
                }
                current.drain(..keep_from);
                current.push(part);
                current_len += part.chars;
            }
        }

        if !current.is_empty() {
            emit(text, &current, out);
        }
    }

    /// Trailing parts of a flushed chunk that fit in the overlap budget
    fn carry_overlap(&self, flushed: &[Part], separator_chars: usize) -> (Vec<Part>, usize) {
        let mut carried = Vec::new();
        let mut carried_len = 0;

        for part in flushed.iter().rev() {
            if carried_len + part.chars >= self.config.chunk_overlap {
                break;
            }
            carried.push(*part);
            carried_len += part.chars + separator_chars;
        }

        carried.reverse();
        (carried, carried_len)
    }
}

/// First separator occurring in `segment`, with the finer separators after it.
///
/// The empty separator always matches and ends the fallback chain. When
/// nothing matches, the last separator is used with no finer ones left.
fn pick_separator<'s>(segment: &str, separators: &'s [String]) -> (&'s str, &'s [String]) {
    for (idx, separator) in separators.iter().enumerate() {
        if separator.is_empty() {
            return ("", &[]);
        }
        if segment.contains(separator.as_str()) {
            return (separator.as_str(), &separators[idx + 1..]);
        }
    }

    let last = separators.last().map_or("", String::as_str);
    (last, &[])
}

/// Split `segment` (starting at byte `base` of the source) into parts
fn split_parts(segment: &str, base: usize, separator: &str) -> Vec<Part> {
    if separator.is_empty() {
        return segment
            .char_indices()
            .map(|(idx, ch)| Part {
                start: base + idx,
                end: base + idx + ch.len_utf8(),
                chars: 1,
            })
            .collect();
    }

    let mut parts = Vec::new();
    let mut offset = base;
    for piece in segment.split(separator) {
        parts.push(Part {
            start: offset,
            end: offset + piece.len(),
            chars: piece.chars().count(),
        });
        offset += piece.len() + separator.len();
    }
    parts
}

/// Record the span covered by `parts`, unless it is only whitespace
fn emit(text: &str, parts: &[Part], out: &mut Vec<(usize, usize)>) {
    let (Some(first), Some(last)) = (parts.first(), parts.last()) else {
        return;
    };
    if text[first.start..last.end].trim().is_empty() {
        return;
    }
    out.push((first.start, last.end));
}
