// src/char_counter.rs

use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::platform::{CountingRule, PlatformProfile};
use crate::segment::Attachment;

static RE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s]+").expect("valid url regex"));

// Group 1 is the `@instance` part of a remote mention.
static RE_REMOTE_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w@])@\w+(@[\w-]+(?:\.[\w-]+)+)").expect("valid mention regex")
});

pub struct CharCounter;

impl CharCounter {
    /// Count user-perceived characters (extended grapheme clusters).
    ///
    /// Performance: O(1) for ASCII without carriage returns, O(n) otherwise
    pub fn graphemes(text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }

        // `\r\n` is a single grapheme, so it is excluded from the fast path
        if text.is_ascii() && !text.contains('\r') {
            return text.len();
        }

        text.graphemes(true).count()
    }

    /// Platform-weighted length of `text`, without attachment overhead.
    pub fn weighted(text: &str, counting: CountingRule) -> usize {
        match counting {
            CountingRule::Literal => Self::graphemes(text),
            CountingRule::WeightedLinks {
                url_weight,
                local_mentions,
            } => {
                let mut total = 0;
                let mut last_end = 0;

                for url in RE_URL.find_iter(text) {
                    total += Self::outside_links(&text[last_end..url.start()], local_mentions);
                    total += url_weight;
                    last_end = url.end();
                }
                total + Self::outside_links(&text[last_end..], local_mentions)
            }
        }
    }

    fn outside_links(text: &str, local_mentions: bool) -> usize {
        let full = Self::graphemes(text);
        if !local_mentions {
            return full;
        }

        let remote: usize = RE_REMOTE_MENTION
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| Self::graphemes(m.as_str()))
            .sum();
        full.saturating_sub(remote)
    }
}

/// Overhead charged once for all attachments of a thread.
pub fn attachment_overhead(platform: &PlatformProfile, attachments: &[Attachment]) -> usize {
    platform.attachment_cost.saturating_mul(attachments.len())
}

/// Platform-aware size of `text` plus the overhead of `attachments`.
///
/// Callers pass attachments only when accounting for the first post of a
/// thread.
pub fn character_cost(text: &str, platform: &PlatformProfile, attachments: &[Attachment]) -> usize {
    CharCounter::weighted(text, platform.counting) + attachment_overhead(platform, attachments)
}

/// The one limit predicate used throughout the crate.
pub fn exceeds_limit(text: &str, platform: &PlatformProfile, attachments: &[Attachment]) -> bool {
    character_cost(text, platform, attachments) > platform.max_chars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;
    use crate::segment::AttachmentKind;

    #[test]
    fn test_ascii_fast_path() {
        assert_eq!(CharCounter::graphemes(""), 0);
        assert_eq!(CharCounter::graphemes("Hello world"), 11);
        assert_eq!(CharCounter::graphemes("a\r\nb"), 3);
    }

    #[test]
    fn test_graphemes_not_bytes() {
        assert_eq!(CharCounter::graphemes("Café"), 4);
        assert_eq!(CharCounter::graphemes("👍🏽"), 1);
        assert_eq!(CharCounter::graphemes("これは日本語です"), 8);
    }

    #[test]
    fn test_url_weight_on_x() {
        let x = Platform::X.profile();
        let url = "https://example.com/a/really/long/path/that/goes/on/and/on";
        assert_eq!(character_cost(url, &x, &[]), 23);
        assert_eq!(character_cost(&format!("see {url}"), &x, &[]), 4 + 23);
    }

    #[test]
    fn test_literal_counts_urls_in_full() {
        let linkedin = Platform::LinkedIn.profile();
        let url = "https://example.com/a/really/long/path";
        assert_eq!(character_cost(url, &linkedin, &[]), url.len());
    }

    #[test]
    fn test_remote_mentions_on_mastodon() {
        let mastodon = Platform::Mastodon.profile();
        assert_eq!(character_cost("hi @alice@example.social", &mastodon, &[]), 9);
        assert_eq!(character_cost("@alice@example.social", &mastodon, &[]), 6);
        // Email addresses are not mentions
        assert_eq!(character_cost("bob@example.com", &mastodon, &[]), 15);
        // Same text on X counts literally
        let x = Platform::X.profile();
        assert_eq!(character_cost("hi @alice@example.social", &x, &[]), 24);
    }

    #[test]
    fn test_attachment_overhead_once() {
        let x = Platform::X.profile();
        let attachments = vec![
            Attachment::new("a", AttachmentKind::Image),
            Attachment::new("b", AttachmentKind::Video),
        ];
        assert_eq!(character_cost("hello", &x, &attachments), 5 + 48);
        assert_eq!(character_cost("hello", &x, &[]), 5);
    }

    #[test]
    fn test_exceeds_limit_boundary() {
        let x = Platform::X.profile();
        assert!(!exceeds_limit(&"a".repeat(280), &x, &[]));
        assert!(exceeds_limit(&"a".repeat(281), &x, &[]));

        let image = [Attachment::new("img", AttachmentKind::Image)];
        assert!(exceeds_limit(&"a".repeat(257), &x, &image));
        assert!(!exceeds_limit(&"a".repeat(256), &x, &image));
    }
}
