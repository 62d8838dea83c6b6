use retrieval_chunker::{
    chunk_once, estimate_chunk_count, optimal_chunk_settings, reconstruct_content, BoundaryKind,
    ChunkEngine, ChunkOptions, ChunkStore, ChunkerError, Result, SearchHit, StoredChunk,
};

fn options_for(path: &str) -> ChunkOptions {
    let settings = optimal_chunk_settings(path);
    ChunkOptions {
        size: settings.size,
        overlap: settings.overlap,
        preserve_boundaries: true,
        file_path: Some(path.to_string()),
        ..Default::default()
    }
}

#[test]
fn markdown_document_round_trip_through_engine() {
    let doc = "\
# Setup Guide

Install the toolchain before anything else.

## Steps

- download the installer
- run it
- verify the version

```sh
tool --version
```

A closing note on upgrades.
";

    let mut engine = ChunkEngine::new();
    let chunks = engine.chunk(doc, &options_for("guide.md")).unwrap();
    engine.dispose();

    assert!(!chunks.is_empty());
    let kinds: Vec<BoundaryKind> = chunks
        .iter()
        .filter_map(|c| c.boundary.as_ref().map(|b| b.kind))
        .collect();
    assert!(kinds.contains(&BoundaryKind::Heading));
    assert!(kinds.contains(&BoundaryKind::List));
    assert!(kinds.contains(&BoundaryKind::Code));

    // Offsets point back into the source.
    let chars: Vec<char> = doc.chars().collect();
    for chunk in &chunks {
        let span: String = chars[chunk.start..chunk.end].iter().collect();
        assert_eq!(chunk.content, span);
    }
}

#[test]
fn rust_file_produces_named_function_chunks() {
    let code = "\
use std::collections::HashMap;

pub fn build_index() -> HashMap<String, usize> {
    HashMap::new()
}

pub struct Entry {
    pub key: String,
}
";

    let chunks = chunk_once(code, &options_for("index.rs")).unwrap();

    assert!(chunks.iter().any(|c| c
        .boundary
        .as_ref()
        .is_some_and(|b| b.kind == BoundaryKind::Function
            && b.name.as_deref() == Some("build_index"))));
    assert!(chunks.iter().any(|c| c
        .boundary
        .as_ref()
        .is_some_and(|b| b.kind == BoundaryKind::Struct
            && b.name.as_deref() == Some("Entry"))));
}

#[test]
fn estimate_tracks_engine_output_for_plain_text() {
    let text = "one two three four five ".repeat(120);
    let options = ChunkOptions {
        size: 300,
        overlap: 60,
        preserve_boundaries: false,
        ..Default::default()
    };

    let chunks = chunk_once(&text, &options).unwrap();
    let estimate = estimate_chunk_count(text.chars().count(), options.size, options.overlap);
    assert!(estimate.abs_diff(chunks.len()) <= 1);
}

struct MemoryStore(Vec<StoredChunk>);

impl ChunkStore for MemoryStore {
    fn chunks_by_source(&self, source_id: &str) -> Result<Vec<StoredChunk>> {
        Ok(self
            .0
            .iter()
            .filter(|c| c.source_id == source_id)
            .cloned()
            .collect())
    }
}

#[test]
fn chunk_then_reconstruct_recovers_plain_text() {
    let original = "abcdefghij".repeat(300);
    let options = ChunkOptions {
        size: 500,
        overlap: 100,
        preserve_words: false,
        preserve_boundaries: false,
        file_path: None,
    };

    let chunks = chunk_once(&original, &options).unwrap();
    let total = chunks.len();
    let store = MemoryStore(
        chunks
            .iter()
            .map(|c| StoredChunk {
                source_id: "item-1".to_string(),
                chunk_index: c.index,
                total_chunks: total,
                content: c.content.clone(),
                original_content: None,
            })
            .collect(),
    );

    let hit = SearchHit {
        source_id: "item-1".to_string(),
        chunk_index: 0,
        content: chunks[0].content.clone(),
    };
    assert_eq!(reconstruct_content(&hit, &store, 100), original);
}

#[test]
fn invalid_overlap_is_the_only_hard_failure() {
    let options = ChunkOptions {
        size: 100,
        overlap: 150,
        ..options_for("broken.rs")
    };
    let err = chunk_once("fn main() {}", &options).unwrap_err();
    assert!(matches!(err, ChunkerError::InvalidConfig(_)));
    assert!(err.to_string().contains("Overlap must be less than chunk size"));
}
