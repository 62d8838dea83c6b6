//! Markdown boundary segmenter.
//!
//! A single forward line scan maintains one open section tagged `heading`,
//! `list`, `paragraph` or `code`. Fenced code blocks are always cut into
//! their own sections regardless of what surrounds them; blank lines attach
//! to whichever section is open instead of starting a new one.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{Boundary, BoundaryKind, Segment};

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.+?)\s*$").expect("heading pattern"));
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*+]|\d+[.)])\s+").expect("list pattern"));

/// Segment Markdown text into heading/list/paragraph/code sections with
/// character offsets. Always succeeds; size policy is applied by the caller.
#[must_use]
pub fn segment(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current: Option<OpenSection> = None;
    let mut in_code = false;
    let mut offset = 0;

    for raw_line in text.split_inclusive('\n') {
        let line_len = raw_line.chars().count();
        let line = raw_line.trim_end_matches(['\n', '\r']);

        if in_code {
            // Everything inside the fence belongs to the code section,
            // including the closing fence line itself.
            append(&mut current, raw_line, line_len);
            if is_fence(line) {
                flush(&mut segments, current.take());
                in_code = false;
            }
        } else if is_fence(line) {
            flush(&mut segments, current.take());
            current = Some(OpenSection::new(
                Boundary::of_kind(BoundaryKind::Code),
                raw_line,
                offset,
                line_len,
            ));
            in_code = true;
        } else if let Some(caps) = HEADING.captures(line) {
            flush(&mut segments, current.take());
            let level = caps[1].len() as u8;
            let title = caps[2].to_string();
            current = Some(OpenSection::new(
                Boundary::heading(level, title),
                raw_line,
                offset,
                line_len,
            ));
        } else if LIST_ITEM.is_match(line) {
            match &mut current {
                Some(section) if section.boundary.kind == BoundaryKind::List => {
                    section.push(raw_line, line_len);
                }
                _ => {
                    flush(&mut segments, current.take());
                    current = Some(OpenSection::new(
                        Boundary::of_kind(BoundaryKind::List),
                        raw_line,
                        offset,
                        line_len,
                    ));
                }
            }
        } else if line.trim().is_empty() {
            // Blank lines never open a section on their own.
            append(&mut current, raw_line, line_len);
        } else {
            match &mut current {
                Some(section)
                    if matches!(
                        section.boundary.kind,
                        BoundaryKind::Heading | BoundaryKind::Paragraph
                    ) =>
                {
                    section.push(raw_line, line_len);
                }
                _ => {
                    flush(&mut segments, current.take());
                    current = Some(OpenSection::new(
                        Boundary::of_kind(BoundaryKind::Paragraph),
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

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with("```")
}

fn append(current: &mut Option<OpenSection>, raw_line: &str, line_len: usize) {
    // A line with no open section leaves its span unclaimed.
    if let Some(section) = current {
        section.push(raw_line, line_len);
    }
}

fn flush(segments: &mut Vec<Segment>, section: Option<OpenSection>) {
    if let Some(section) = section {
        if !section.content.trim().is_empty() {
            segments.push(Segment {
                content: section.content,
                start: section.start,
                end: section.end,
                boundary: section.boundary,
            });
        }
    }
}

struct OpenSection {
    boundary: Boundary,
    content: String,
    start: usize,
    end: usize,
}

impl OpenSection {
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
