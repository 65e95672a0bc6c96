// src/splitter/packer.rs

use crate::char_counter::exceeds_limit;
use crate::platform::PlatformProfile;
use crate::segment::{Attachment, TextSegment};
use crate::splitter::natural::split_at_natural_boundary;

/// Greedily accumulate segments into posts bounded by the platform limit.
///
/// Attachments bind to the first emitted post only. Oversized atomic
/// segments (code, quotes, headings) are emitted whole even when they exceed
/// the limit; the finalizer deals with them. Other oversized segments are
/// split at natural boundaries.
pub fn pack(
    segments: &[TextSegment],
    platform: &PlatformProfile,
    attachments: &[Attachment],
) -> Vec<String> {
    let mut posts = Vec::new();
    let mut current = String::new();
    let mut previous: Option<&TextSegment> = None;
    let mut attachments = attachments;

    for segment in segments {
        let candidate = match previous {
            Some(prev) => join(&current, &segment.text, Gap::between(prev, segment)),
            None => segment.text.clone(),
        };
        previous = Some(segment);

        if !exceeds_limit(&candidate, platform, attachments) {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            posts.push(std::mem::take(&mut current));
            attachments = &[];
        }

        if !exceeds_limit(&segment.text, platform, attachments) {
            current.clone_from(&segment.text);
        } else if segment.is_atomic() {
            posts.push(segment.text.clone());
            attachments = &[];
        } else {
            let mut pieces = split_at_natural_boundary(&segment.text, platform, attachments);
            let last = pieces.pop().unwrap_or_default();
            if !pieces.is_empty() {
                attachments = &[];
            }
            posts.append(&mut pieces);
            current = last;
        }
    }

    if !current.is_empty() {
        posts.push(current);
    }

    posts
}

/// Whitespace placed between two packed segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gap {
    Space,
    Line,
    Paragraph,
}

impl Gap {
    fn between(previous: &TextSegment, next: &TextSegment) -> Self {
        if previous.paragraph_end {
            Gap::Paragraph
        } else if previous.kind.is_line_oriented() || next.kind.is_line_oriented() {
            Gap::Line
        } else {
            Gap::Space
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Gap::Space => " ",
            Gap::Line => "\n",
            Gap::Paragraph => "\n\n",
        }
    }
}

/// Join two segments; a newline already at the seam replaces the gap.
fn join(current: &str, next: &str, gap: Gap) -> String {
    if current.is_empty() {
        return next.to_string();
    }

    let separator = if current.ends_with('\n') || next.starts_with('\n') {
        ""
    } else {
        gap.as_str()
    };

    let mut joined = String::with_capacity(current.len() + separator.len() + next.len());
    joined.push_str(current);
    joined.push_str(separator);
    joined.push_str(next);
    joined
}
