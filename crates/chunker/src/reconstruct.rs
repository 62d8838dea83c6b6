//! Original-content reconstruction.
//!
//! The inverse of the sliding-window contract: given one retrieved chunk,
//! fetch its siblings from the storage collaborator and stitch the source
//! text back together by removing the fixed overlap between consecutive
//! chunks.
//!
//! This is a best-effort approximation. It assumes the fixed-overlap
//! sliding-window contract; boundary-aware and CST-based chunks do not share
//! a single overlap value, so for those the overlap probe can miss and the
//! chunks are joined with a newline instead. Storage failures are logged and
//! the caller gets the retrieved chunk's own content back.

use crate::error::Result;
use crate::types::StoredChunk;

/// Overlap assumed between consecutive chunks when none is recorded.
pub const DEFAULT_RECONSTRUCTION_OVERLAP: usize = 200;

/// A search result carrying enough metadata to locate its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Identifier of the source item the chunk came from.
    pub source_id: String,
    /// Position of the retrieved chunk within the source item.
    pub chunk_index: usize,
    /// The retrieved chunk's own content; the fallback result when lookup
    /// fails or returns nothing.
    pub content: String,
}

/// Lookup capability provided by the storage collaborator.
pub trait ChunkStore {
    /// All persisted chunks sharing one `source_id`, in any order.
    ///
    /// # Errors
    ///
    /// Implementations surface their storage failures here; the
    /// reconstructor logs and degrades rather than propagating them.
    fn chunks_by_source(&self, source_id: &str) -> Result<Vec<StoredChunk>>;
}

/// Reconstruct the original content behind a search hit.
///
/// Short-circuits on a cached `original_content` carried by chunk 0;
/// otherwise sorts the chunks by index and concatenates them, dropping the
/// `overlap`-character prefix of each chunk that literally repeats the tail
/// of the accumulated text. Chunks whose overlap probe misses are appended
/// after a newline separator. Lookup failures and empty results fall back to
/// the hit's own content.
pub fn reconstruct_content(hit: &SearchHit, store: &dyn ChunkStore, overlap: usize) -> String {
    let mut chunks = match store.chunks_by_source(&hit.source_id) {
        Ok(chunks) => chunks,
        Err(e) => {
            log::warn!("chunk lookup failed for source {}: {e}", hit.source_id);
            return hit.content.clone();
        }
    };

    if chunks.is_empty() {
        return hit.content.clone();
    }

    chunks.sort_by_key(|chunk| chunk.chunk_index);

    if let Some(first) = chunks.first() {
        if first.chunk_index == 0 {
            if let Some(original) = &first.original_content {
                return original.clone();
            }
        }
    }

    let mut assembled = String::new();
    for chunk in &chunks {
        if assembled.is_empty() {
            assembled.push_str(&chunk.content);
            continue;
        }

        // A zero-length tail trivially matches, which makes overlap == 0 a
        // plain concatenation.
        let tail = trailing_chars(&assembled, overlap).to_string();
        match chunk.content.strip_prefix(tail.as_str()) {
            Some(remainder) => assembled.push_str(remainder),
            None => {
                assembled.push('\n');
                assembled.push_str(&chunk.content);
            }
        }
    }

    assembled
}

/// Last `count` characters of `text` as a sub-slice.
fn trailing_chars(text: &str, count: usize) -> &str {
    let char_count = text.chars().count();
    if char_count <= count {
        return text;
    }
    let skip = char_count - count;
    match text.char_indices().nth(skip) {
        Some((byte, _)) => &text[byte..],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChunkerError;
    use crate::types::ChunkOptions;
    use crate::window;

    struct MemoryStore {
        chunks: Vec<StoredChunk>,
    }

    impl ChunkStore for MemoryStore {
        fn chunks_by_source(&self, source_id: &str) -> Result<Vec<StoredChunk>> {
            Ok(self
                .chunks
                .iter()
                .filter(|c| c.source_id == source_id)
                .cloned()
                .collect())
        }
    }

    struct FailingStore;

    impl ChunkStore for FailingStore {
        fn chunks_by_source(&self, _source_id: &str) -> Result<Vec<StoredChunk>> {
            Err(ChunkerError::storage("connection refused"))
        }
    }

    fn store_chunks(source_id: &str, contents: &[&str]) -> MemoryStore {
        let total = contents.len();
        MemoryStore {
            chunks: contents
                .iter()
                .enumerate()
                .map(|(i, content)| StoredChunk {
                    source_id: source_id.to_string(),
                    chunk_index: i,
                    total_chunks: total,
                    content: (*content).to_string(),
                    original_content: None,
                })
                .collect(),
        }
    }

    fn hit(source_id: &str, content: &str) -> SearchHit {
        SearchHit {
            source_id: source_id.to_string(),
            chunk_index: 0,
            content: content.to_string(),
        }
    }

    #[test]
    fn cached_original_content_short_circuits() {
        let mut store = store_chunks("doc", &["partial"]);
        store.chunks[0].original_content = Some("the full original".to_string());
        let result = reconstruct_content(&hit("doc", "partial"), &store, 200);
        assert_eq!(result, "the full original");
    }

    #[test]
    fn sliding_window_chunks_reconstruct_exactly() {
        let original: String = (0..2500)
            .map(|i| char::from(b'a' + (i % 23) as u8))
            .collect();
        let options = ChunkOptions {
            size: 400,
            overlap: 80,
            preserve_words: false,
            ..Default::default()
        };
        let chunks = window::chunk_text(&original, &options).unwrap();
        let total = chunks.len();
        let store = MemoryStore {
            chunks: chunks
                .iter()
                .map(|c| StoredChunk {
                    source_id: "doc".to_string(),
                    chunk_index: c.index,
                    total_chunks: total,
                    content: c.content.clone(),
                    original_content: None,
                })
                .collect(),
        };

        let result = reconstruct_content(&hit("doc", &chunks[0].content), &store, 80);
        assert_eq!(result, original);
    }

    #[test]
    fn missed_overlap_probe_joins_with_newline() {
        let store = store_chunks("doc", &["first chunk", "second chunk"]);
        let result = reconstruct_content(&hit("doc", "first chunk"), &store, 5);
        assert_eq!(result, "first chunk\nsecond chunk");
    }

    #[test]
    fn unsorted_chunks_are_ordered_by_index() {
        let mut store = store_chunks("doc", &["AAA", "BBB", "CCC"]);
        store.chunks.reverse();
        let result = reconstruct_content(&hit("doc", "AAA"), &store, 2);
        assert_eq!(result, "AAA\nBBB\nCCC");
    }

    #[test]
    fn empty_lookup_falls_back_to_hit_content() {
        let store = store_chunks("other", &["x"]);
        let result = reconstruct_content(&hit("doc", "only this"), &store, 200);
        assert_eq!(result, "only this");
    }

    #[test]
    fn storage_failure_falls_back_to_hit_content() {
        let result = reconstruct_content(&hit("doc", "kept"), &FailingStore, 200);
        assert_eq!(result, "kept");
    }
}
