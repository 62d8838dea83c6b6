//! # Retrieval Chunker
//!
//! Content chunking engine for semantic retrieval: splits plain text,
//! Markdown and source code into bounded, overlapping chunks suitable for
//! embedding, and stitches stored chunks back into their source text at
//! query time.
//!
//! ## Architecture
//!
//! ```text
//! Input text (+ optional file path)
//!     │
//!     ├──> Strategy selection (pure, extension-driven)
//!     │    ├─> Markdown extension  → section segmenter
//!     │    ├─> Grammar available   → CST boundary extractor
//!     │    │                         (failure falls through)
//!     │    ├─> Other code          → pattern-based segmenter
//!     │    └─> No boundaries asked → sliding window
//!     │
//!     ├──> Size policy
//!     │    └─> oversized segments re-split by the sliding window,
//!     │        boundary tag retained
//!     │
//!     └──> Ordered Chunk[] with offsets and boundary metadata
//! ```
//!
//! Only configuration errors (`size == 0`, `overlap >= size`) surface to the
//! caller; every other failure degrades to a weaker strategy so chunking
//! never blocks indexing of otherwise-valid content.
//!
//! ## Example
//!
//! ```rust
//! use retrieval_chunker::{ChunkEngine, ChunkOptions};
//!
//! let mut engine = ChunkEngine::new();
//! let options = ChunkOptions {
//!     preserve_boundaries: true,
//!     file_path: Some("example.rs".to_string()),
//!     ..Default::default()
//! };
//!
//! let code = "fn process(input: &str) -> String {\n    input.to_uppercase()\n}\n";
//! let chunks = engine.chunk(code, &options).unwrap();
//! for chunk in &chunks {
//!     println!("[{}..{}] {:?}", chunk.start, chunk.end, chunk.boundary);
//! }
//! ```

pub mod code_patterns;
pub mod cst;
mod engine;
mod error;
mod grammar;
mod language;
pub mod markdown;
pub mod optimizer;
pub mod reconstruct;
mod types;
pub mod window;

pub use engine::{chunk_once, select_strategy, ChunkEngine, Strategy};
pub use error::{ChunkerError, Result};
pub use grammar::ParserRuntime;
pub use language::Language;
pub use optimizer::{optimal_chunk_settings, ChunkSettings};
pub use reconstruct::{
    reconstruct_content, ChunkStore, SearchHit, DEFAULT_RECONSTRUCTION_OVERLAP,
};
pub use types::{Boundary, BoundaryKind, Chunk, ChunkOptions, Segment, StoredChunk};
pub use window::{chunk_text, estimate_chunk_count};
