// src/splitter/natural.rs

use unicode_segmentation::UnicodeSegmentation;

use crate::char_counter::{attachment_overhead, exceeds_limit, CharCounter};
use crate::platform::PlatformProfile;
use crate::segment::Attachment;

/// Break substrings in descending preference.
pub const BREAK_TIERS: [&str; 13] = [
    ". ", "! ", "? ", "。", "！", "？", "\n", ": ", "; ", ", ", "，", "、", " ",
];

/// A tier's best break must land past this share of the budget.
pub const MIN_BREAK_UTILIZATION: f64 = 0.7;

/// Graphemes kept free below the limit when no break point qualifies.
pub const FORCED_CUT_MARGIN: usize = 10;

/// Split `text` into pieces that each fit the platform limit, cutting at the
/// most natural boundary available.
///
/// Attachments are charged against the first piece only.
pub fn split_at_natural_boundary(
    text: &str,
    platform: &PlatformProfile,
    attachments: &[Attachment],
) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut remaining = text.trim();
    let mut attachments = attachments;

    while !remaining.is_empty() {
        if !exceeds_limit(remaining, platform, attachments) {
            pieces.push(remaining.to_string());
            break;
        }

        let (head, tail) = match find_break(remaining, platform, attachments) {
            Some(at) => remaining.split_at(at),
            None => forced_cut(remaining, platform, attachments),
        };

        let head = head.trim_end();
        if !head.is_empty() {
            pieces.push(head.to_string());
            attachments = &[];
        }
        remaining = tail.trim_start();
    }

    pieces
}

/// Byte offset just past the preferred break token, if any tier yields one
/// past the utilization floor.
fn find_break(text: &str, platform: &PlatformProfile, attachments: &[Attachment]) -> Option<usize> {
    let floor = platform.max_chars as f64 * MIN_BREAK_UTILIZATION;
    let overhead = attachment_overhead(platform, attachments);

    for token in BREAK_TIERS {
        let mut best = None;
        let mut cost = overhead;
        let mut counted_to = 0;

        // Summing piecewise costs never undercounts the whole prefix, so a
        // candidate accepted here really fits.
        for (idx, _) in text.match_indices(token) {
            let end = idx + token.len();
            cost += CharCounter::weighted(&text[counted_to..end], platform.counting);
            counted_to = end;

            if cost > platform.max_chars {
                break;
            }
            best = Some((end, cost));
        }

        if let Some((end, cost)) = best {
            if cost as f64 > floor {
                return Some(end);
            }
        }
    }

    None
}

/// Cut at `max_chars - FORCED_CUT_MARGIN` graphemes (or fewer, until the
/// piece fits), preferring the last space in the back half of the piece.
fn forced_cut<'a>(
    text: &'a str,
    platform: &PlatformProfile,
    attachments: &[Attachment],
) -> (&'a str, &'a str) {
    let target = platform.max_chars.saturating_sub(FORCED_CUT_MARGIN).max(1);
    let ends: Vec<usize> = text
        .grapheme_indices(true)
        .take(target)
        .map(|(i, g)| i + g.len())
        .collect();

    let Some(&first_end) = ends.first() else {
        return (text, "");
    };

    // Largest fitting grapheme count; at least one grapheme always advances.
    let fits = |count: usize| !exceeds_limit(&text[..ends[count - 1]], platform, attachments);
    let (mut lo, mut hi) = (1, ends.len());
    let mut keep = 0;
    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        if fits(mid) {
            keep = mid;
            lo = mid + 1;
        } else {
            hi = mid - 1;
        }
    }

    if keep == 0 {
        tracing::trace!(platform = %platform.platform, "single grapheme exceeds limit; cutting anyway");
        return text.split_at(first_end);
    }

    let cut = ends[keep - 1];
    if let Some(space) = text[..cut].rfind(' ') {
        if CharCounter::graphemes(&text[..space]) > keep / 2 {
            return text.split_at(space);
        }
    }

    tracing::trace!(
        platform = %platform.platform,
        graphemes = keep,
        "no natural break point; forcing cut"
    );
    text.split_at(cut)
}
