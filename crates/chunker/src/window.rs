//! Sliding-window chunker: fixed-size, overlapping windows over raw text.
//!
//! This is the weakest strategy in the fallback chain and the workhorse the
//! boundary-aware strategies delegate to when a segment exceeds the size
//! limit. It is a pure function over its input; all offsets are character
//! positions.

use crate::error::Result;
use crate::types::{Chunk, ChunkOptions};

/// Split `text` into overlapping windows of at most `options.size` characters.
///
/// Behavior:
/// - input no longer than `size` comes back as a single untrimmed chunk
///   spanning the whole text (including the degenerate empty-input chunk);
/// - otherwise start positions advance by `size - overlap`; with
///   `preserve_words` the window end is pulled back to the nearest preceding
///   space or newline strictly after the window start;
/// - window content is trimmed and whitespace-only windows are dropped,
///   though the scan still advances.
///
/// # Errors
///
/// Fails with a configuration error when `size == 0` or `overlap >= size`.
pub fn chunk_text(text: &str, options: &ChunkOptions) -> Result<Vec<Chunk>> {
    options.validate()?;

    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    if len <= options.size {
        return Ok(vec![Chunk::new(text.to_string(), 0, 0, len)]);
    }

    let step = options.size - options.overlap;
    let mut chunks = Vec::new();
    let mut index = 0;
    let mut start = 0;

    loop {
        let raw_end = (start + options.size).min(len);
        let mut end = raw_end;

        // Avoid cutting a word in half unless the window already reaches the
        // end of the text or contains no break at all.
        if options.preserve_words && raw_end < len {
            if let Some(brk) = nearest_break(&chars, start, raw_end) {
                end = brk;
            }
        }

        if let Some((trim_start, trim_end)) = trimmed_span(&chars, start, end) {
            let content: String = chars[trim_start..trim_end].iter().collect();
            chunks.push(Chunk::new(content, index, trim_start, trim_end));
            index += 1;
        }

        if raw_end >= len {
            break;
        }
        start += step;
    }

    Ok(chunks)
}

/// Predict how many chunks [`chunk_text`] will emit for an input of `len`
/// characters. Exact for the raw window math; trimming and word preservation
/// can shift the real count by at most one in either direction.
///
/// Returns the sentinel `0` for configurations [`chunk_text`] would reject
/// (`size == 0` or `overlap >= size`); no valid configuration estimates to
/// zero.
#[must_use]
pub fn estimate_chunk_count(len: usize, size: usize, overlap: usize) -> usize {
    if size == 0 || overlap >= size {
        return 0;
    }
    if len <= size {
        return 1;
    }
    let step = size - overlap;
    (len - overlap).div_ceil(step)
}

/// Nearest space or newline before `raw_end`, strictly after `start`.
fn nearest_break(chars: &[char], start: usize, raw_end: usize) -> Option<usize> {
    (start + 1..raw_end)
        .rev()
        .find(|&i| chars[i] == ' ' || chars[i] == '\n')
}

/// Shrink `[start, end)` past leading/trailing whitespace; `None` when the
/// window is whitespace-only.
fn trimmed_span(chars: &[char], start: usize, end: usize) -> Option<(usize, usize)> {
    let mut s = start;
    let mut e = end;
    while s < e && chars[s].is_whitespace() {
        s += 1;
    }
    while e > s && chars[e - 1].is_whitespace() {
        e -= 1;
    }
    (s < e).then_some((s, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options(size: usize, overlap: usize, preserve_words: bool) -> ChunkOptions {
        ChunkOptions {
            size,
            overlap,
            preserve_words,
            ..Default::default()
        }
    }

    #[test]
    fn short_input_is_returned_whole_and_untrimmed() {
        let text = "  hello world  ";
        let chunks = chunk_text(text, &options(100, 10, true)).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, text);
        assert_eq!(chunks[0].start, 0);
        assert_eq!(chunks[0].end, text.chars().count());
    }

    #[test]
    fn uniform_text_produces_expected_window_lengths() {
        let text = "a".repeat(2500);
        let chunks = chunk_text(&text, &options(1000, 100, true)).unwrap();
        let lengths: Vec<usize> = chunks.iter().map(Chunk::len).collect();
        assert_eq!(lengths, vec![1000, 1000, 700]);
    }

    #[test]
    fn windows_overlap_without_word_preservation() {
        let chunks = chunk_text("ABCDEFGHIJKLMNOPQRSTUVWXYZ", &options(10, 3, false)).unwrap();
        assert_eq!(chunks[0].content, "ABCDEFGHIJ");
        assert_eq!(chunks[1].content, "HIJKLMNOPQ");
    }

    #[test]
    fn overlap_equal_to_size_fails() {
        let err = chunk_text("test", &options(100, 100, true)).unwrap_err();
        assert!(err.to_string().contains("Overlap must be less than chunk size"));
    }

    #[test]
    fn overlap_above_size_fails() {
        let err = chunk_text("test", &options(100, 150, true)).unwrap_err();
        assert!(err.to_string().contains("Overlap must be less than chunk size"));
    }

    #[test]
    fn word_preservation_pulls_end_back_to_a_break() {
        let text = "alpha beta gamma delta epsilon zeta";
        let chunks = chunk_text(text, &options(12, 2, true)).unwrap();
        for chunk in &chunks {
            assert!(!chunk.content.ends_with(char::is_whitespace));
            // No chunk should end mid-word unless the window had no break.
            let tail = chunk.content.split_whitespace().last().unwrap();
            assert!(text.split_whitespace().any(|w| w == tail), "cut word: {tail}");
        }
    }

    #[test]
    fn no_chunk_is_empty_or_whitespace_after_trimming() {
        let inputs = [
            "word ".repeat(400),
            format!("{}   {}", "x".repeat(50), " ".repeat(300)),
            "\n\n\n".repeat(200) + &"content here ".repeat(100),
        ];
        for text in &inputs {
            let chunks = chunk_text(text, &options(100, 20, true)).unwrap();
            for chunk in &chunks {
                assert!(!chunk.content.trim().is_empty());
            }
        }
    }

    #[test]
    fn chunk_content_matches_source_span() {
        let text = "the quick brown fox jumps over the lazy dog ".repeat(30);
        let chunks = chunk_text(&text, &options(120, 30, true)).unwrap();
        let chars: Vec<char> = text.chars().collect();
        for chunk in &chunks {
            let span: String = chars[chunk.start..chunk.end].iter().collect();
            assert_eq!(chunk.content, span);
        }
    }

    #[test]
    fn offsets_are_monotonically_non_decreasing() {
        let text = "lorem ipsum dolor sit amet ".repeat(100);
        let chunks = chunk_text(&text, &options(200, 50, true)).unwrap();
        for pair in chunks.windows(2) {
            assert!(pair[1].start >= pair[0].start);
            assert!(pair[1].index == pair[0].index + 1);
        }
    }

    #[test]
    fn empty_input_yields_single_degenerate_chunk() {
        let chunks = chunk_text("", &options(100, 10, true)).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].start, 0);
        assert_eq!(chunks[0].end, 0);
    }

    #[test]
    fn estimate_stays_within_one_of_actual_count() {
        let text_base = "word another third fourth fifth ".repeat(100);
        for len in [800usize, 1000, 1500, 1800, 2000] {
            let text: String = text_base.chars().take(len).collect();
            for size in [200usize, 300, 500, 1000] {
                for overlap in [0usize, 50, 100, 150] {
                    if overlap >= size {
                        continue;
                    }
                    let actual = chunk_text(&text, &options(size, overlap, true))
                        .unwrap()
                        .len();
                    let estimate = estimate_chunk_count(len, size, overlap);
                    let diff = estimate.abs_diff(actual);
                    assert!(
                        diff <= 1,
                        "len={len} size={size} overlap={overlap}: estimate {estimate} vs actual {actual}"
                    );
                }
            }
        }
    }

    #[test]
    fn estimate_is_one_for_short_input() {
        assert_eq!(estimate_chunk_count(50, 100, 10), 1);
        assert_eq!(estimate_chunk_count(100, 100, 10), 1);
    }

    #[test]
    fn estimate_is_zero_for_configurations_chunking_rejects() {
        assert_eq!(estimate_chunk_count(500, 0, 0), 0);
        assert_eq!(estimate_chunk_count(500, 100, 100), 0);
        assert_eq!(estimate_chunk_count(500, 100, 150), 0);
    }
}
