// src/splitter/strategies.rs

//! Caller-driven split points that bypass the segmenter.
//!
//! Manual offsets win over inline thread markers, which win over segmenting.

use std::sync::LazyLock;

use regex::Regex;

use crate::char_counter::exceeds_limit;
use crate::error::{Result, SplitError};
use crate::platform::PlatformProfile;
use crate::segment::Attachment;
use crate::splitter::natural::split_at_natural_boundary;

static RE_THREAD_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)/([0-9]+)?").expect("valid thread marker regex"));

/// Slice `text` at caller-supplied character offsets.
///
/// Offsets count `char`s and must be strictly increasing within `1..len`.
/// Slices are returned untrimmed; the caller drops empty ones after
/// preprocessing.
pub fn split_at_offsets<'a>(text: &'a str, offsets: &[usize]) -> Result<Vec<&'a str>> {
    let len = text.chars().count();

    for (index, &offset) in offsets.iter().enumerate() {
        if offset == 0 || offset >= len {
            return Err(SplitError::SplitPointOutOfBounds { offset, len });
        }
        if index > 0 && offset <= offsets[index - 1] {
            return Err(SplitError::SplitPointsNotIncreasing {
                index,
                offset,
                previous: offsets[index - 1],
            });
        }
    }

    let mut bytes = text.char_indices().map(|(i, _)| i);
    let mut slices = Vec::with_capacity(offsets.len() + 1);
    let mut start = 0;
    let mut consumed = 0;

    for &offset in offsets {
        let at = bytes.nth(offset - consumed).unwrap_or(text.len());
        consumed = offset + 1;
        slices.push(&text[start..at]);
        start = at;
    }
    slices.push(&text[start..]);

    Ok(slices)
}

#[derive(Debug, Clone, Copy)]
struct Marker {
    start: usize,
    end: usize,
}

/// Chunks delimited by inline `1/`, `2/`, ... (or `1/3`, `2/3`, ...) markers.
///
/// Markers must stand alone as whitespace-delimited tokens and count up from
/// one; either every marker carries the same denominator (at least its
/// numerator) or none does. Tokens that break the sequence (`50/50`, dates) are
/// left in the text. Returns `None` unless at least two markers are found.
pub fn detect_thread_markers(text: &str) -> Option<Vec<&str>> {
    let mut markers: Vec<Marker> = Vec::new();
    let mut total: Option<usize> = None;

    for caps in RE_THREAD_MARKER.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if !stands_alone(text, whole.start(), whole.end()) {
            continue;
        }

        let Ok(index) = caps[1].parse::<usize>() else { continue };
        if index != markers.len() + 1 {
            continue;
        }

        let of = match caps.get(2) {
            Some(m) => match m.as_str().parse::<usize>() {
                Ok(of) => Some(of),
                Err(_) => continue,
            },
            None => None,
        };
        if of.is_some_and(|of| of < index) || (!markers.is_empty() && of != total) {
            continue;
        }
        total = of;

        markers.push(Marker {
            start: whole.start(),
            end: whole.end(),
        });
    }

    if markers.len() < 2 {
        return None;
    }

    let mut chunks = Vec::with_capacity(markers.len() + 1);
    let lead = text[..markers[0].start].trim();
    if !lead.is_empty() {
        chunks.push(lead);
    }
    for (i, marker) in markers.iter().enumerate() {
        let end = markers.get(i + 1).map_or(text.len(), |next| next.start);
        let chunk = text[marker.end..end].trim();
        if !chunk.is_empty() {
            chunks.push(chunk);
        }
    }

    tracing::debug!(markers = markers.len(), chunks = chunks.len(), "detected inline thread markers");
    Some(chunks)
}

fn stands_alone(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back().map_or(true, char::is_whitespace);
    let after = text[end..].chars().next().map_or(true, char::is_whitespace);
    before && after
}

/// Re-split every chunk over the limit at natural boundaries, in place.
///
/// The first chunk is checked with the attachment overhead. Blank chunks are
/// dropped.
pub fn remediate(
    chunks: Vec<String>,
    platform: &PlatformProfile,
    attachments: &[Attachment],
) -> Vec<String> {
    let mut out = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        let attachments = if out.is_empty() { attachments } else { &[] };
        if exceeds_limit(&chunk, platform, attachments) {
            out.extend(split_at_natural_boundary(&chunk, platform, attachments));
        } else if !chunk.trim().is_empty() {
            out.push(chunk);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;

    #[test]
    fn test_split_at_offsets() {
        let slices = split_at_offsets("Hello world. Bye now.", &[12]).unwrap();
        assert_eq!(slices, vec!["Hello world.", " Bye now."]);

        let slices = split_at_offsets("abcdef", &[1, 3, 5]).unwrap();
        assert_eq!(slices, vec!["a", "bc", "de", "f"]);
    }

    #[test]
    fn test_offsets_count_chars() {
        let slices = split_at_offsets("日本語テキスト", &[3]).unwrap();
        assert_eq!(slices, vec!["日本語", "テキスト"]);
    }

    #[test]
    fn test_offsets_out_of_bounds() {
        assert_eq!(
            split_at_offsets("abc", &[0]),
            Err(SplitError::SplitPointOutOfBounds { offset: 0, len: 3 })
        );
        assert_eq!(
            split_at_offsets("abc", &[1, 3]),
            Err(SplitError::SplitPointOutOfBounds { offset: 3, len: 3 })
        );
        assert!(split_at_offsets("", &[1]).is_err());
    }

    #[test]
    fn test_offsets_not_increasing() {
        assert_eq!(
            split_at_offsets("abcdef", &[2, 4, 4]),
            Err(SplitError::SplitPointsNotIncreasing {
                index: 2,
                offset: 4,
                previous: 4
            })
        );
    }

    #[test]
    fn test_no_offsets_is_whole_text() {
        assert_eq!(split_at_offsets("abc", &[]).unwrap(), vec!["abc"]);
    }

    #[test]
    fn test_detect_markers() {
        let chunks = detect_thread_markers("1/ First part 2/ Second part 3/ Third part").unwrap();
        assert_eq!(chunks, vec!["First part", "Second part", "Third part"]);
    }

    #[test]
    fn test_detect_markers_with_total() {
        let chunks = detect_thread_markers("1/3 One.\n2/3 Two.\n3/3 Three.").unwrap();
        assert_eq!(chunks, vec!["One.", "Two.", "Three."]);
    }

    #[test]
    fn test_lead_text_kept() {
        let chunks = detect_thread_markers("A thread on caching 🧵\n\n1/ Start.\n2/ End.").unwrap();
        assert_eq!(chunks, vec!["A thread on caching 🧵", "Start.", "End."]);
    }

    #[test]
    fn test_out_of_sequence_tokens_stay_in_text() {
        let chunks =
            detect_thread_markers("1/ Odds were 50/50 at best. 2/ Then 3/4 of us left.").unwrap();
        assert_eq!(chunks, vec!["Odds were 50/50 at best.", "Then 3/4 of us left."]);
    }

    #[test]
    fn test_markers_must_start_at_one() {
        assert!(detect_thread_markers("5/ a 6/ b").is_none());
        assert!(detect_thread_markers("1/ a 3/ b").is_none());
        assert!(detect_thread_markers("1/3 a 2/4 b").is_none());
    }

    #[test]
    fn test_single_marker_or_none() {
        assert!(detect_thread_markers("1/ only one marker here").is_none());
        assert!(detect_thread_markers("Plain text with a path a/b and 24/7 support.").is_none());
        assert!(detect_thread_markers("").is_none());
    }

    #[test]
    fn test_glued_markers_ignored() {
        assert!(detect_thread_markers("see v1/ and v2/ for details").is_none());
        assert!(detect_thread_markers("1/2/3 and 2/3/4").is_none());
    }

    #[test]
    fn test_remediate_resplits_in_place() {
        let x = Platform::X.profile();
        let long = "word ".repeat(100).trim_end().to_string();
        let out = remediate(
            vec!["head".to_string(), long, "   ".to_string(), "tail".to_string()],
            &x,
            &[],
        );
        assert_eq!(out.first().map(String::as_str), Some("head"));
        assert_eq!(out.last().map(String::as_str), Some("tail"));
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|c| !exceeds_limit(c, &x, &[])));
    }
}
