//! Character-budgeted chunking with overlap between neighbouring chunks.

use semchunk_rs::Chunker;

use crate::error::{IntelligenceError, Result};
use crate::loader::PageText;

/// A piece of a document small enough to embed, tagged with its source page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub page: u32,
    pub text: String,
}

#[derive(Debug, Clone, Copy)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(IntelligenceError::InvalidSplitter(
                "chunk_size must be positive".into(),
            ));
        }
        if chunk_overlap >= chunk_size {
            return Err(IntelligenceError::InvalidSplitter(format!(
                "chunk_overlap ({chunk_overlap}) must be smaller than chunk_size ({chunk_size})"
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Split every page independently. Chunks never span pages.
    pub fn split_pages(&self, pages: &[PageText]) -> Vec<Chunk> {
        pages
            .iter()
            .flat_map(|page| {
                self.split_text(&page.text)
                    .into_iter()
                    .map(move |text| Chunk {
                        page: page.page,
                        text,
                    })
            })
            .collect()
    }

    /// Split `text` into chunks of at most `chunk_size` characters.
    ///
    /// Base chunks are cut at semantic boundaries with room left for the
    /// overlap; each chunk after the first is then prefixed with whole words
    /// from the end of its predecessor. Pieces the chunker leaves over budget
    /// (long tokens such as URLs) are re-split by words, then by characters.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let base_size = self.chunk_size - self.chunk_overlap;
        let chunker = Chunker::new(
            base_size,
            Box::new(|segment: &str| segment.chars().count()),
        );
        let mut base = Vec::new();
        for piece in chunker.chunk(text) {
            enforce_budget(piece, base_size, &mut base);
        }

        let mut chunks = Vec::with_capacity(base.len());
        let mut previous: Option<&str> = None;
        for current in &base {
            let chunk = match previous {
                Some(prev) => self.with_overlap(prev, current),
                None => current.clone(),
            };
            chunks.push(chunk);
            previous = Some(current);
        }
        chunks
    }

    fn with_overlap(&self, previous: &str, current: &str) -> String {
        let current_len = current.chars().count();
        // One character is reserved for the joining space.
        let budget = self
            .chunk_overlap
            .min(self.chunk_size.saturating_sub(current_len + 1));
        let tail = word_tail(previous, budget);
        if tail.is_empty() {
            return current.to_string();
        }
        format!("{tail} {current}")
    }
}

/// Push `piece` onto `out`, re-split if it has more than `budget` characters.
fn enforce_budget(piece: String, budget: usize, out: &mut Vec<String>) {
    if piece.chars().count() <= budget {
        out.push(piece);
        return;
    }

    let mut current = String::new();
    let mut current_len = 0;
    for word in piece.split_whitespace() {
        let word_len = word.chars().count();
        let joined_len = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if joined_len <= budget {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_len = joined_len;
            continue;
        }

        if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        current_len = 0;
        if word_len <= budget {
            current.push_str(word);
            current_len = word_len;
            continue;
        }

        let chars: Vec<char> = word.chars().collect();
        for window in chars.chunks(budget) {
            if window.len() == budget {
                out.push(window.iter().collect());
            } else {
                current = window.iter().collect();
                current_len = window.len();
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
}

/// Longest suffix of `text` that has at most `limit` characters and starts
/// on a word boundary.
fn word_tail(text: &str, limit: usize) -> &str {
    if limit == 0 {
        return "";
    }
    let text = text.trim_end();
    let count = text.chars().count();
    if count <= limit {
        return text.trim_start();
    }

    let start = text
        .char_indices()
        .nth(count - limit)
        .map(|(index, _)| index)
        .unwrap_or(text.len());
    let on_boundary = text[..start].ends_with(char::is_whitespace);
    let tail = &text[start..];
    if on_boundary {
        return tail.trim_start();
    }
    match tail.find(char::is_whitespace) {
        Some(index) => tail[index..].trim_start(),
        None => "",
    }
}
