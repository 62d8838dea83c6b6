//! Pattern-based code boundary segmenter.
//!
//! The universal fallback when CST parsing is unavailable or fails: a
//! line-oriented scan with per-language literal patterns for imports,
//! functions, classes and (for TypeScript) interface/type declarations.
//! It never fails; anything unrecognized lands in a `statement` boundary.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::language::Language;
use crate::types::{Boundary, BoundaryKind, Segment};

static FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:export\s+)?(?:default\s+)?(?:pub(?:\([a-z]+\))?\s+)?(?:async\s+)?(?:function|def|fn|func)\s+([A-Za-z_][A-Za-z0-9_]*)",
    )
    .expect("function pattern")
});
static CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+([A-Za-z_][A-Za-z0-9_]*)")
        .expect("class pattern")
});
static INTERFACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:export\s+)?interface\s+([A-Za-z_][A-Za-z0-9_]*)").expect("interface pattern")
});
static TYPE_ALIAS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:export\s+)?type\s+([A-Za-z_][A-Za-z0-9_$]*)\s*=").expect("type pattern")
});

/// Import-line prefixes shared across the ingested languages.
const IMPORT_PREFIXES: &[&str] = &[
    "import ",
    "from ",
    "use ",
    "using ",
    "require ",
    "require(",
    "#include ",
    "extern crate ",
];

/// Segment source code by per-language line patterns. Always succeeds.
#[must_use]
pub fn segment(text: &str, language: Language) -> Vec<Segment> {
    let typescript = language == Language::TypeScript;

    let mut segments = Vec::new();
    let mut current: Option<OpenBoundary> = None;
    let mut offset = 0;

    for raw_line in text.split_inclusive('\n') {
        let line_len = raw_line.chars().count();
        let line = raw_line.trim_end_matches(['\n', '\r']);
        let blank = line.trim().is_empty();

        if is_import_line(line) {
            match &mut current {
                Some(open) if open.boundary.kind == BoundaryKind::Imports => {
                    open.push(raw_line, line_len);
                }
                _ => {
                    flush(&mut segments, current.take());
                    current = Some(OpenBoundary::new(
                        Boundary::of_kind(BoundaryKind::Imports),
                        raw_line,
                        offset,
                        line_len,
                    ));
                }
            }
        } else if blank {
            // Blank lines inside an import run are retained; elsewhere they
            // just extend whatever boundary is open.
            if let Some(open) = &mut current {
                open.push(raw_line, line_len);
            }
        } else if let Some(boundary) = declaration_boundary(line, typescript) {
            flush(&mut segments, current.take());
            current = Some(OpenBoundary::new(boundary, raw_line, offset, line_len));
        } else {
            match &mut current {
                // A non-import line closes an import run.
                Some(open) if open.boundary.kind == BoundaryKind::Imports => {
                    flush(&mut segments, current.take());
                    current = Some(OpenBoundary::new(
                        Boundary::of_kind(BoundaryKind::Statement),
                        raw_line,
                        offset,
                        line_len,
                    ));
                }
                Some(open) => open.push(raw_line, line_len),
                None => {
                    current = Some(OpenBoundary::new(
                        Boundary::of_kind(BoundaryKind::Statement),
                        raw_line,
                        offset,
                        line_len,
                    ));
                }
            }
        }

        offset += line_len;
    }

    flush(&mut segments, current.take());
    segments
}

/// Classify a line that opens a new declaration boundary, capturing its
/// identifier. TypeScript additionally recognizes interface and type-alias
/// declarations.
fn declaration_boundary(line: &str, typescript: bool) -> Option<Boundary> {
    if let Some(caps) = FUNCTION.captures(line) {
        return Some(Boundary::named(BoundaryKind::Function, &caps[1]));
    }
    if let Some(caps) = CLASS.captures(line) {
        return Some(Boundary::named(BoundaryKind::Class, &caps[1]));
    }
    if typescript {
        if let Some(caps) = INTERFACE.captures(line) {
            return Some(Boundary::named(BoundaryKind::Interface, &caps[1]));
        }
        if let Some(caps) = TYPE_ALIAS.captures(line) {
            return Some(Boundary::named(BoundaryKind::TypeAlias, &caps[1]));
        }
    }
    None
}

fn is_import_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    IMPORT_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
}

fn flush(segments: &mut Vec<Segment>, boundary: Option<OpenBoundary>) {
    if let Some(open) = boundary {
        if !open.content.trim().is_empty() {
            segments.push(Segment {
                content: open.content,
                start: open.start,
                end: open.end,
                boundary: open.boundary,
            });
        }
    }
}

struct OpenBoundary {
    boundary: Boundary,
    content: String,
    start: usize,
    end: usize,
}

impl OpenBoundary {
    fn new(boundary: Boundary, raw_line: &str, offset: usize, line_len: usize) -> Self {
        Self {
            boundary,
            content: raw_line.to_string(),
            start: offset,
            end: offset + line_len,
        }
    }

    fn push(&mut self, raw_line: &str, line_len: usize) {
        self.content.push_str(raw_line);
        self.end += line_len;
    }
}
