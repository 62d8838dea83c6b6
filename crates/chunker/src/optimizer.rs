//! Chunk-size presets keyed by file extension.
//!
//! The indexing collaborator uses these as default `ChunkOptions.size` and
//! `overlap` values; explicit caller-supplied values always take priority.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// A recommended size/overlap pair for one class of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSettings {
    pub size: usize,
    pub overlap: usize,
}

/// Dense code: smaller windows keep single symbols together.
const CODE: ChunkSettings = ChunkSettings {
    size: 650,
    overlap: 125,
};

/// Documentation and HTML: mid-sized sections.
const DOCUMENTATION: ChunkSettings = ChunkSettings {
    size: 1250,
    overlap: 250,
};

/// Plain-text prose and articles: the largest windows.
const ARTICLE: ChunkSettings = ChunkSettings {
    size: 1750,
    overlap: 350,
};

/// Everything else, including files without an extension.
const DEFAULT: ChunkSettings = ChunkSettings {
    size: 1000,
    overlap: 200,
};

/// Recommended chunk settings for a file path, matched case-insensitively on
/// the extension.
#[must_use]
pub fn optimal_chunk_settings(path: &str) -> ChunkSettings {
    let Some(ext) = Path::new(path).extension().and_then(|ext| ext.to_str()) else {
        return DEFAULT;
    };

    match ext.to_lowercase().as_str() {
        "rs" | "py" | "pyw" | "js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" | "go" | "java"
        | "c" | "h" | "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" | "cs" | "rb" | "swift"
        | "kt" | "kts" | "php" | "scala" | "sh" | "bash" => CODE,
        "md" | "markdown" | "mdx" | "rst" | "adoc" | "html" | "htm" => DOCUMENTATION,
        "txt" | "text" => ARTICLE,
        _ => DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_extensions_use_the_code_preset() {
        let settings = optimal_chunk_settings("file.js");
        assert_eq!(settings, ChunkSettings { size: 650, overlap: 125 });
        assert_eq!(optimal_chunk_settings("src/lib.rs"), CODE);
        assert_eq!(optimal_chunk_settings("app/main.PY"), CODE);
    }

    #[test]
    fn documentation_extensions_use_the_doc_preset() {
        let settings = optimal_chunk_settings("README.md");
        assert_eq!(settings, ChunkSettings { size: 1250, overlap: 250 });
        assert_eq!(optimal_chunk_settings("index.HTML"), DOCUMENTATION);
    }

    #[test]
    fn plain_text_uses_the_article_preset() {
        assert_eq!(
            optimal_chunk_settings("notes.txt"),
            ChunkSettings { size: 1750, overlap: 350 }
        );
    }

    #[test]
    fn unknown_and_missing_extensions_use_the_default() {
        assert_eq!(
            optimal_chunk_settings("unknown.xyz"),
            ChunkSettings { size: 1000, overlap: 200 }
        );
        assert_eq!(optimal_chunk_settings("Makefile"), DEFAULT);
        assert_eq!(optimal_chunk_settings(""), DEFAULT);
    }

    #[test]
    fn presets_satisfy_the_overlap_invariant() {
        for settings in [CODE, DOCUMENTATION, ARTICLE, DEFAULT] {
            assert!(settings.overlap < settings.size);
        }
    }
}
