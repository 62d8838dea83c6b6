use serde::{Deserialize, Serialize};

use crate::error::{ChunkerError, Result};

/// A bounded text segment produced for embedding and indexing.
///
/// Offsets are character positions into the original source. `start < end`
/// holds for every chunk except the degenerate chunk produced for empty
/// input, and offsets are monotonically non-decreasing across the chunk
/// sequence of one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk text.
    pub content: String,

    /// Sequential position within one chunking run (0-based).
    pub index: usize,

    /// Start character offset in the original source (inclusive).
    pub start: usize,

    /// End character offset in the original source (exclusive).
    pub end: usize,

    /// The semantic unit this chunk came from, when a boundary-aware
    /// strategy produced it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<Boundary>,
}

impl Chunk {
    /// Create a plain chunk with no boundary tag.
    #[must_use]
    pub const fn new(content: String, index: usize, start: usize, end: usize) -> Self {
        Self {
            content,
            index,
            start,
            end,
            boundary: None,
        }
    }

    /// Character length of the chunk content.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// Whether the chunk content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// The syntactic or semantic unit a boundary-aware chunk was cut from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Boundary {
    /// Kind of unit (function, heading, code fence, import block, ...).
    #[serde(rename = "type")]
    pub kind: BoundaryKind,

    /// Extracted symbol name, when the unit has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Heading level (1-6), for Markdown headings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,

    /// Heading title text, for Markdown headings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Boundary {
    /// Boundary with only a kind.
    #[must_use]
    pub const fn of_kind(kind: BoundaryKind) -> Self {
        Self {
            kind,
            name: None,
            level: None,
            title: None,
        }
    }

    /// Boundary with a kind and a symbol name.
    #[must_use]
    pub fn named(kind: BoundaryKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            level: None,
            title: None,
        }
    }

    /// Markdown heading boundary.
    #[must_use]
    pub fn heading(level: u8, title: impl Into<String>) -> Self {
        Self {
            kind: BoundaryKind::Heading,
            name: None,
            level: Some(level),
            title: Some(title.into()),
        }
    }
}

/// Kind of semantic unit a boundary chunk was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    Heading,
    List,
    Paragraph,
    Code,
    Imports,
    Function,
    Method,
    Class,
    Struct,
    Enum,
    Interface,
    /// Type alias / `type` declaration.
    #[serde(rename = "type")]
    TypeAlias,
    Module,
    Impl,
    Const,
    Statement,
}

impl BoundaryKind {
    /// Human-readable name, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::List => "list",
            Self::Paragraph => "paragraph",
            Self::Code => "code",
            Self::Imports => "imports",
            Self::Function => "function",
            Self::Method => "method",
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Interface => "interface",
            Self::TypeAlias => "type",
            Self::Module => "module",
            Self::Impl => "impl",
            Self::Const => "const",
            Self::Statement => "statement",
        }
    }
}

/// An intermediate boundary segment emitted by a segmentation strategy.
///
/// Segments carry verbatim text with character offsets into the source;
/// size policy (re-splitting oversized segments) is applied later by the
/// orchestrator, which never changes a segment's boundary tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub content: String,
    pub start: usize,
    pub end: usize,
    pub boundary: Boundary,
}

/// Options controlling one chunking run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkOptions {
    /// Maximum chunk size in characters.
    pub size: usize,

    /// Characters repeated between consecutive sliding-window chunks.
    pub overlap: usize,

    /// Pull window ends back to the nearest word break.
    pub preserve_words: bool,

    /// Prefer boundary-aware strategies when a file path is available.
    pub preserve_boundaries: bool,

    /// Source path, used only to infer the language/extension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            size: 1000,
            overlap: 200,
            preserve_words: true,
            preserve_boundaries: false,
            file_path: None,
        }
    }
}

impl ChunkOptions {
    /// Validate size/overlap constraints.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the violated constraint. These
    /// are the only errors the engine surfaces to callers; they are never
    /// silently clamped.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(ChunkerError::invalid_config(
                "Chunk size must be greater than zero",
            ));
        }
        if self.overlap >= self.size {
            return Err(ChunkerError::invalid_config(
                "Overlap must be less than chunk size",
            ));
        }
        Ok(())
    }

    /// Builder: set the source file path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Builder: enable boundary-aware strategies.
    #[must_use]
    pub const fn with_boundaries(mut self) -> Self {
        self.preserve_boundaries = true;
        self
    }
}

/// Persisted chunk metadata, as produced by the indexing collaborator and
/// consumed back at query time by the reconstructor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredChunk {
    /// Identifier of the source item this chunk belongs to.
    pub source_id: String,

    /// Position of this chunk within the source item.
    pub chunk_index: usize,

    /// Total chunk count for the source item; identical across all chunks
    /// sharing one `source_id`.
    pub total_chunks: usize,

    /// The chunk text as persisted.
    pub content: String,

    /// Full original content, attached only to the chunk with
    /// `chunk_index == 0` as a reconstruction shortcut.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_content: Option<String>,
}
