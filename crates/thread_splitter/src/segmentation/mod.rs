// src/segmentation/mod.rs

//! Classify text into typed, priority-ranked segments.
//!
//! Blank lines delimit paragraph blocks (except inside fenced code). Code,
//! list and quote blocks stay whole; everything else is cut into sentence
//! units, with header lines, list runs and fenced code peeled off on their own.

pub mod classify;
pub mod sentences;

use crate::segment::{SegmentKind, TextSegment};
use classify::{
    is_atx_header, is_code_block, is_fence_line, is_heading, is_list, is_list_item, is_quote,
    is_title_line,
};
use sentences::SentenceSegmenter;

/// Segment `text` into an ordered list of classified units.
pub fn segment(text: &str) -> Vec<TextSegment> {
    let mut segments = Vec::new();

    for block in paragraph_blocks(text) {
        let before = segments.len();
        segment_block(block, &mut segments);

        if segments.len() > before {
            if let Some(last) = segments.last_mut() {
                last.paragraph_end = true;
            }
        }
    }

    segments
}

/// Split on blank lines, keeping fenced code blocks in one piece.
///
/// Whitespace-only blocks are dropped.
pub fn paragraph_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut block_start: Option<usize> = None;
    let mut block_end = 0;
    let mut in_fence = false;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches('\n');
        let line_start = offset;
        offset += line.len();

        if !in_fence && content.trim().is_empty() {
            if let Some(start) = block_start.take() {
                blocks.push(&text[start..block_end]);
            }
            continue;
        }

        if is_fence_line(content) {
            in_fence = !in_fence;
        }
        block_start.get_or_insert(line_start);
        block_end = line_start + content.len();
    }

    if let Some(start) = block_start {
        blocks.push(&text[start..block_end]);
    }

    blocks.retain(|b| !b.trim().is_empty());
    blocks
}

fn segment_block(block: &str, out: &mut Vec<TextSegment>) {
    if is_code_block(block) {
        out.push(TextSegment::new(block.trim_end(), SegmentKind::Code));
    } else if is_list(block) {
        out.push(TextSegment::new(block.trim(), SegmentKind::List));
    } else if is_quote(block) {
        out.push(TextSegment::new(block.trim(), SegmentKind::Quote));
    } else {
        segment_prose(block, out);
    }
}

fn segment_prose(block: &str, out: &mut Vec<TextSegment>) {
    let mut prose: Vec<&str> = Vec::new();
    let mut list: Vec<&str> = Vec::new();
    let mut fence: Vec<&str> = Vec::new();

    for line in block.lines() {
        if !fence.is_empty() {
            fence.push(line);
            if is_fence_line(line) {
                flush_code(&mut fence, out);
            }
            continue;
        }
        if is_fence_line(line) {
            flush_list(&mut list, out);
            flush_sentences(&prose.join("\n"), out);
            prose.clear();
            fence.push(line);
            continue;
        }

        // Indented lines continue the open list item
        if is_list_item(line) || (!list.is_empty() && line.starts_with(char::is_whitespace)) {
            flush_sentences(&prose.join("\n"), out);
            prose.clear();
            list.push(line);
            continue;
        }
        flush_list(&mut list, out);

        if is_atx_header(line) || is_title_line(line) {
            flush_sentences(&prose.join("\n"), out);
            prose.clear();
            out.push(TextSegment::new(line.trim(), SegmentKind::Heading));
        } else {
            prose.push(line);
        }
    }

    // Unclosed fence runs to the end of the block
    flush_code(&mut fence, out);
    flush_list(&mut list, out);
    flush_sentences(&prose.join("\n"), out);
}

fn flush_code(lines: &mut Vec<&str>, out: &mut Vec<TextSegment>) {
    if !lines.is_empty() {
        out.push(TextSegment::new(lines.join("\n").trim_end(), SegmentKind::Code));
        lines.clear();
    }
}

fn flush_list(lines: &mut Vec<&str>, out: &mut Vec<TextSegment>) {
    if !lines.is_empty() {
        out.push(TextSegment::new(lines.join("\n").trim(), SegmentKind::List));
        lines.clear();
    }
}

fn flush_sentences(prose: &str, out: &mut Vec<TextSegment>) {
    for unit in SentenceSegmenter::split(prose) {
        let kind = if is_heading(unit) {
            SegmentKind::Heading
        } else if unit.contains('\n') {
            SegmentKind::Paragraph
        } else {
            SegmentKind::Sentence
        };
        out.push(TextSegment::new(unit, kind));
    }
}
