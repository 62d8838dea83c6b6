use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur during chunking and reconstruction
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// Invalid chunking configuration (size/overlap constraint violated)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No compiled parser is available for the requested language
    #[error("No parser available for language: {0}")]
    NoParser(String),

    /// The grammar produced no usable syntax tree
    #[error("Parse error: {0}")]
    Parse(String),

    /// Chunk lookup against the storage collaborator failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ChunkerError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a "no parser available" error
    pub fn no_parser(language: impl Into<String>) -> Self {
        Self::NoParser(language.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
