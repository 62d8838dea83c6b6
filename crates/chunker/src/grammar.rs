//! Lazily-initialized parser runtime.
//!
//! `ParserRuntime` is an explicit value rather than a process-wide singleton:
//! each owner gets its own initialization flag and language cache, which keeps
//! test instances independent and disposal deterministic. Grammars are
//! statically linked, so "loading" a language amounts to compiling a parser
//! for it once and caching the result.

use std::collections::HashMap;

use tree_sitter::Parser;

use crate::language::Language;

/// Owns the one-time engine initialization flag and a per-language cache of
/// compiled parsers.
#[derive(Default)]
pub struct ParserRuntime {
    initialized: bool,
    parsers: HashMap<Language, Parser>,
}

impl ParserRuntime {
    /// Create an empty runtime; no parser work happens until first use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// One-time engine initialization. Idempotent; guarded by an internal
    /// flag so repeated calls are free.
    pub fn ensure_initialized(&mut self) {
        if !self.initialized {
            log::debug!("initializing tree-sitter parser runtime");
            self.initialized = true;
        }
    }

    /// Return the cached parser for `language`, compiling and caching one on
    /// first use. Unrecognized languages and grammar failures yield `None`
    /// rather than an error.
    pub fn parser_for(&mut self, language: Language) -> Option<&mut Parser> {
        self.ensure_initialized();

        if !self.parsers.contains_key(&language) {
            let grammar = match language.grammar() {
                Some(grammar) => grammar,
                None => {
                    log::debug!("no grammar linked for language {}", language.as_str());
                    return None;
                }
            };

            let mut parser = Parser::new();
            if let Err(e) = parser.set_language(&grammar) {
                log::debug!(
                    "failed to load grammar for {}: {e}",
                    language.as_str()
                );
                return None;
            }
            self.parsers.insert(language, parser);
        }

        self.parsers.get_mut(&language)
    }

    /// Number of languages with a cached parser.
    #[must_use]
    pub fn cached_count(&self) -> usize {
        self.parsers.len()
    }

    /// Release every cached parser and reset the runtime. Safe to call even
    /// if nothing was ever loaded, and safe to call repeatedly.
    pub fn dispose(&mut self) {
        self.parsers.clear();
        self.initialized = false;
    }
}
