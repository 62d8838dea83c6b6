use std::path::Path;

/// Supported input language, detected from the file extension.
///
/// The enum is closed on purpose: grammar dispatch in [`Self::grammar`] is an
/// exhaustive match, so adding or removing a language is a compile-checked
/// change rather than a lookup into a mutable registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Rust,
    Python,
    JavaScript,
    TypeScript,
    Go,
    Java,
    C,
    Cpp,
    CSharp,
    Ruby,
    Swift,
    Kotlin,
    Php,
    Markdown,
    Unknown,
}

impl Language {
    /// Detect language from a file extension (case-insensitive).
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "rs" => Self::Rust,
            "py" | "pyw" => Self::Python,
            "js" | "mjs" | "cjs" | "jsx" => Self::JavaScript,
            "ts" | "tsx" => Self::TypeScript,
            "go" => Self::Go,
            "java" => Self::Java,
            "c" | "h" => Self::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Self::Cpp,
            "cs" => Self::CSharp,
            "rb" => Self::Ruby,
            "swift" => Self::Swift,
            "kt" | "kts" => Self::Kotlin,
            "php" => Self::Php,
            "md" | "markdown" | "mdx" => Self::Markdown,
            _ => Self::Unknown,
        }
    }

    /// Detect language from a file path.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }

    /// Language name as a string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rust => "rust",
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Go => "go",
            Self::Java => "java",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::CSharp => "csharp",
            Self::Ruby => "ruby",
            Self::Swift => "swift",
            Self::Kotlin => "kotlin",
            Self::Php => "php",
            Self::Markdown => "markdown",
            Self::Unknown => "unknown",
        }
    }

    /// Whether a compiled grammar is linked in for this language.
    #[must_use]
    pub const fn has_grammar(self) -> bool {
        matches!(
            self,
            Self::Rust
                | Self::Python
                | Self::JavaScript
                | Self::TypeScript
                | Self::Go
                | Self::Java
        )
    }

    /// The statically linked tree-sitter grammar, when one exists.
    ///
    /// A `None` here is the soft "no parser available" failure that sends the
    /// orchestrator down the fallback chain.
    #[must_use]
    pub fn grammar(self) -> Option<tree_sitter::Language> {
        match self {
            Self::Rust => Some(tree_sitter_rust::LANGUAGE.into()),
            Self::Python => Some(tree_sitter_python::LANGUAGE.into()),
            Self::JavaScript => Some(tree_sitter_javascript::LANGUAGE.into()),
            Self::TypeScript => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
            Self::Go => Some(tree_sitter_go::LANGUAGE.into()),
            Self::Java => Some(tree_sitter_java::LANGUAGE.into()),
            Self::C
            | Self::Cpp
            | Self::CSharp
            | Self::Ruby
            | Self::Swift
            | Self::Kotlin
            | Self::Php
            | Self::Markdown
            | Self::Unknown => None,
        }
    }
}
