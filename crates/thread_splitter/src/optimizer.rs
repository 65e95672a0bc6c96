// src/optimizer.rs

use crate::char_counter::{character_cost, exceeds_limit, CharCounter};
use crate::platform::{Platform, PlatformProfile};
use crate::segment::Attachment;

/// Single posts below this share of the budget get an engagement suffix.
pub const TARGET_UTILIZATION: f64 = 0.85;

/// Closing lines appended to short single posts, per platform.
pub fn engagement_suffixes(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::X => &[
            "What do you think? 👇",
            "Agree or disagree?",
            "Repost if this was useful. 🔁",
        ],
        Platform::Threads => &[
            "What's your take? Let me know below.",
            "Follow for more like this.",
            "Have you run into this too?",
        ],
        Platform::LinkedIn => &[
            "What has your experience been? I'd love to hear your thoughts in the comments.",
            "If this resonated, share it with your network.",
            "#careers #learning #professionaldevelopment",
        ],
        Platform::Reddit => &[
            "Curious what everyone else thinks. Has anyone dealt with this?",
            "What would you have done differently?",
            "Edit: happy to answer questions in the comments.",
        ],
        Platform::Mastodon => &[
            "What do you think? Replies welcome.",
            "Boosts appreciated if this was useful.",
            "#fediverse #discussion",
        ],
        Platform::Facebook => &[
            "What do you think? Let me know in the comments!",
            "Share this with someone who needs to see it.",
            "Tag a friend who would enjoy this.",
        ],
    }
}

/// Append one engagement suffix to a single post that uses less than
/// [`TARGET_UTILIZATION`] of its budget.
///
/// Best effort: the text comes back unchanged when it is already dense
/// enough, already over the limit, or when the suffix would not fit.
pub fn optimize_single(text: &str, platform: &PlatformProfile, attachments: &[Attachment]) -> String {
    let cost = character_cost(text, platform, attachments);
    let floor = platform.max_chars as f64 * TARGET_UTILIZATION;
    if text.trim().is_empty() || cost as f64 >= floor || cost > platform.max_chars {
        return text.to_string();
    }

    let suffixes = engagement_suffixes(platform.platform);
    let suffix = suffixes[CharCounter::graphemes(text) % suffixes.len()];
    let optimized = format!("{text}\n\n{suffix}");

    if exceeds_limit(&optimized, platform, attachments) {
        tracing::debug!(platform = %platform.platform, cost, "engagement suffix does not fit");
        return text.to_string();
    }

    optimized
}
