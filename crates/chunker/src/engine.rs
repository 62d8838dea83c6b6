//! Chunk orchestrator.
//!
//! Picks one strategy per input and applies the size policy to its output.
//! Strategy selection is a pure decision function and every stage returns
//! plain `Result` data, so the CST → pattern → window degradation is ordinary
//! control flow rather than a chain of caught panics. Only configuration
//! errors ever reach the caller; a failed CST attempt is logged at debug
//! level and execution falls through to the pattern segmenter.

use std::path::Path;

use crate::code_patterns;
use crate::cst;
use crate::error::Result;
use crate::grammar::ParserRuntime;
use crate::language::Language;
use crate::markdown;
use crate::types::{Chunk, ChunkOptions, Segment};
use crate::window;

/// The strategy the orchestrator will run for a given set of options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Plain sliding window; no boundary metadata.
    Window,
    /// Markdown section segmenter.
    Markdown,
    /// CST boundary extraction for a language with a linked grammar.
    Cst(Language),
    /// Pattern-based code segmenter.
    CodePatterns(Language),
}

/// Decide which strategy applies. Pure function over the options: boundary
/// preservation must be requested and the path must carry a usable extension,
/// otherwise everything degrades to the sliding window.
#[must_use]
pub fn select_strategy(options: &ChunkOptions) -> Strategy {
    if !options.preserve_boundaries {
        return Strategy::Window;
    }
    let Some(path) = options.file_path.as_deref() else {
        return Strategy::Window;
    };
    if Path::new(path).extension().is_none() {
        return Strategy::Window;
    }

    match Language::from_path(path) {
        Language::Markdown => Strategy::Markdown,
        language if language.has_grammar() => Strategy::Cst(language),
        language => Strategy::CodePatterns(language),
    }
}

/// The chunking engine: owns a [`ParserRuntime`] and runs the selected
/// strategy per call.
#[derive(Default)]
pub struct ChunkEngine {
    runtime: ParserRuntime,
}

impl ChunkEngine {
    /// Create an engine with a fresh parser runtime.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine around an existing runtime, e.g. one shared across
    /// many indexing calls.
    #[must_use]
    pub fn with_runtime(runtime: ParserRuntime) -> Self {
        Self { runtime }
    }

    /// Chunk `text` according to `options`.
    ///
    /// Boundary-aware strategies emit segments which are then subjected to
    /// the size policy: any segment longer than `options.size` is re-split by
    /// the sliding window while keeping its boundary tag. Indexes are
    /// assigned sequentially over the final chunk list. Empty or
    /// whitespace-only input produces an empty list.
    ///
    /// # Errors
    ///
    /// Only configuration errors (`size == 0`, `overlap >= size`) are
    /// surfaced; grammar and parse failures degrade to weaker strategies.
    pub fn chunk(&mut self, text: &str, options: &ChunkOptions) -> Result<Vec<Chunk>> {
        options.validate()?;
        // A short whitespace-only input would otherwise survive the window
        // chunker's untrimmed single-chunk branch.
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let segments = match select_strategy(options) {
            Strategy::Window => return window::chunk_text(text, options),
            Strategy::Markdown => markdown::segment(text),
            Strategy::Cst(language) => {
                match cst::extract_boundaries(text, language, &mut self.runtime) {
                    Ok(segments) if !segments.is_empty() => segments,
                    Ok(_) => {
                        log::debug!(
                            "CST found no boundaries for {}, using pattern segmenter",
                            language.as_str()
                        );
                        code_patterns::segment(text, language)
                    }
                    Err(e) => {
                        log::debug!(
                            "CST chunking unavailable for {} ({e}), using pattern segmenter",
                            language.as_str()
                        );
                        code_patterns::segment(text, language)
                    }
                }
            }
            Strategy::CodePatterns(language) => code_patterns::segment(text, language),
        };

        apply_size_policy(segments, options)
    }

    /// Release every cached parser held by the engine's runtime.
    pub fn dispose(&mut self) {
        self.runtime.dispose();
    }
}

/// Chunk with a throwaway engine whose runtime is disposed on every path,
/// success or failure.
pub fn chunk_once(text: &str, options: &ChunkOptions) -> Result<Vec<Chunk>> {
    let mut engine = ChunkEngine::new();
    let result = engine.chunk(text, options);
    engine.dispose();
    result
}

/// Convert segments to chunks, re-splitting any segment longer than the size
/// limit while retaining its boundary tag, then index sequentially.
fn apply_size_policy(segments: Vec<Segment>, options: &ChunkOptions) -> Result<Vec<Chunk>> {
    let mut chunks = Vec::new();

    for segment in segments {
        if segment.content.chars().count() > options.size {
            let sub_options = ChunkOptions {
                size: options.size,
                overlap: options.overlap,
                preserve_words: true,
                preserve_boundaries: false,
                file_path: None,
            };
            for mut sub in window::chunk_text(&segment.content, &sub_options)? {
                sub.start += segment.start;
                sub.end += segment.start;
                sub.boundary = Some(segment.boundary.clone());
                chunks.push(sub);
            }
        } else {
            chunks.push(Chunk {
                content: segment.content,
                index: 0,
                start: segment.start,
                end: segment.end,
                boundary: Some(segment.boundary),
            });
        }
    }

    for (index, chunk) in chunks.iter_mut().enumerate() {
        chunk.index = index;
    }
    Ok(chunks)
}
