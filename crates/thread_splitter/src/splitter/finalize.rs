// src/splitter/finalize.rs

use unicode_segmentation::UnicodeSegmentation;

use crate::char_counter::{character_cost, exceeds_limit, CharCounter};
use crate::platform::PlatformProfile;
use crate::segment::Attachment;
use crate::splitter::strategies::remediate;

pub const ELLIPSIS: &str = "…";

/// Post-packing validation and numbering.
#[derive(Debug, Clone, Copy)]
pub struct Finalizer {
    /// Prefix `n/total ` on multi-post conversational threads
    pub number_posts: bool,
    /// Re-split posts so numbering markers fit without truncation
    pub reserve_numbering: bool,
}

impl Default for Finalizer {
    fn default() -> Self {
        Self {
            number_posts: true,
            reserve_numbering: true,
        }
    }
}

impl Finalizer {
    pub fn apply(
        &self,
        posts: Vec<String>,
        platform: &PlatformProfile,
        attachments: &[Attachment],
    ) -> Vec<String> {
        let mut posts = remediate(posts, platform, attachments);

        if self.number_posts && platform.conversational && posts.len() > 1 {
            if self.reserve_numbering {
                posts = reserve_marker_space(posts, platform, attachments);
            }
            posts = number(posts, platform, attachments);
        }

        for (i, post) in posts.iter().enumerate() {
            let attachments = if i == 0 { attachments } else { &[] };
            if exceeds_limit(post, platform, attachments) {
                tracing::warn!(
                    platform = %platform.platform,
                    post = i + 1,
                    cost = character_cost(post, platform, attachments),
                    max_chars = platform.max_chars,
                    "post still exceeds platform limit"
                );
            }
        }

        posts
    }
}

/// Validate every post and number conversational threads.
///
/// The first post is checked with the attachment overhead, the rest without.
pub fn finalize(
    posts: Vec<String>,
    platform: &PlatformProfile,
    attachments: &[Attachment],
) -> Vec<String> {
    Finalizer::default().apply(posts, platform, attachments)
}

fn marker(index: usize, total: usize) -> String {
    format!("{index}/{total} ")
}

/// Shrink the budget by the widest marker until the post count settles.
fn reserve_marker_space(
    mut posts: Vec<String>,
    platform: &PlatformProfile,
    attachments: &[Attachment],
) -> Vec<String> {
    loop {
        let total = posts.len();
        let width = CharCounter::graphemes(&marker(total, total));
        let budget = platform.with_max_chars(platform.max_chars.saturating_sub(width));

        posts = remediate(posts, &budget, attachments);
        if posts.len() == total {
            return posts;
        }
    }
}

/// Prefix `n/total `; bodies that no longer fit are truncated with an
/// ellipsis so the marker always survives.
fn number(posts: Vec<String>, platform: &PlatformProfile, attachments: &[Attachment]) -> Vec<String> {
    let total = posts.len();

    posts
        .into_iter()
        .enumerate()
        .map(|(i, body)| {
            let attachments = if i == 0 { attachments } else { &[] };
            let prefix = marker(i + 1, total);
            let numbered = format!("{prefix}{body}");
            if exceeds_limit(&numbered, platform, attachments) {
                truncate_body(&prefix, &body, platform, attachments)
            } else {
                numbered
            }
        })
        .collect()
}

fn truncate_body(
    prefix: &str,
    body: &str,
    platform: &PlatformProfile,
    attachments: &[Attachment],
) -> String {
    let ends: Vec<usize> = body.grapheme_indices(true).map(|(i, g)| i + g.len()).collect();
    let build = |count: usize| {
        let kept = if count == 0 { "" } else { body[..ends[count - 1]].trim_end() };
        format!("{prefix}{kept}{ELLIPSIS}")
    };

    let (mut lo, mut hi) = (1, ends.len());
    let mut keep = 0;
    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        if exceeds_limit(&build(mid), platform, attachments) {
            hi = mid - 1;
        } else {
            keep = mid;
            lo = mid + 1;
        }
    }

    tracing::debug!(
        platform = %platform.platform,
        kept = keep,
        dropped = ends.len() - keep,
        "truncated post body to fit numbering marker"
    );
    build(keep)
}
