// src/lib.rs
//! # Thread Splitter
//!
//! Turns long-form text into an ordered thread of posts that each fit a
//! social platform's character budget, breaking at the most natural points
//! available.
//!
//! ## Features
//!
//! - **Platform-aware accounting**: grapheme counting, weighted links and
//!   per-attachment overhead charged to the first post
//! - **Structure preservation**: code blocks, quotes and headings are never
//!   torn apart by the packer
//! - **Natural breaks**: sentence ends, then clause punctuation, then spaces,
//!   with a forced cut only as a last resort
//! - **Thread numbering**: `1/3` markers on conversational platforms, with
//!   room reserved so bodies are rarely truncated
//! - **Caller control**: manual split offsets or inline `1/`, `2/` markers
//!
//! ## Quick Start
//!
//! ```rust
//! use thread_splitter::generate_thread;
//!
//! let posts = generate_thread("Hello world. This is a test.", "x", &[], &[])?;
//! assert_eq!(posts.len(), 1);
//! assert!(posts[0].starts_with("Hello world. This is a test."));
//! # Ok::<(), thread_splitter::SplitError>(())
//! ```
//!
//! ## Advanced Usage
//!
//! ```rust
//! use thread_splitter::{Platform, SplitStrategy, ThreadSplitter};
//!
//! let splitter = ThreadSplitter::builder()
//!     .platform(Platform::Mastodon)
//!     .optimize_length(false)
//!     .build();
//!
//! let thread = splitter.split(&"lorem ".repeat(100), &[], &[])?;
//! assert_eq!(thread.strategy, SplitStrategy::Segmented);
//! assert!(thread.posts[0].starts_with("1/"));
//! # Ok::<(), thread_splitter::SplitError>(())
//! ```

pub mod char_counter;
pub mod error;
pub mod optimizer;
pub mod platform;
pub mod preprocess;
pub mod segment;
pub mod segmentation;
pub mod splitter;

pub use char_counter::{character_cost, exceeds_limit, CharCounter};
pub use error::{Result, SplitError};
pub use optimizer::optimize_single;
pub use platform::{CountingRule, Platform, PlatformProfile};
pub use preprocess::preprocess;
pub use segment::{Attachment, AttachmentKind, SegmentKind, TextSegment};
pub use segmentation::segment;
pub use splitter::{finalize, pack, split_at_natural_boundary, Finalizer};

use serde::Serialize;

use splitter::{detect_thread_markers, remediate, split_at_offsets};

/// Which entry strategy produced a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Whitespace-only input
    Empty,
    /// The whole input fit one post
    SinglePost,
    ManualSplitPoints,
    ThreadMarkers,
    /// Segment, pack and finalize
    Segmented,
}

/// Finished posts for one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thread {
    pub platform: Platform,
    pub strategy: SplitStrategy,
    pub posts: Vec<String>,
}

impl Thread {
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Main splitter interface.
///
/// Provides both simple default configuration and advanced builder pattern.
#[derive(Debug, Clone, Copy)]
pub struct ThreadSplitter {
    platform: PlatformProfile,
    optimize_length: bool,
    finalizer: Finalizer,
}

impl Default for ThreadSplitter {
    /// X profile with length optimization, numbering and numbering
    /// reservation enabled.
    fn default() -> Self {
        ThreadSplitterBuilder::new().build()
    }
}

impl ThreadSplitter {
    /// Create a splitter for `platform` with default settings.
    pub fn new(platform: impl Into<PlatformProfile>) -> Self {
        Self::builder().platform(platform).build()
    }

    /// Create a builder for custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use thread_splitter::{Platform, ThreadSplitter};
    ///
    /// let splitter = ThreadSplitter::builder()
    ///     .platform(Platform::LinkedIn.profile().with_max_chars(1300))
    ///     .number_posts(false)
    ///     .build();
    /// assert_eq!(splitter.platform().max_chars, 1300);
    /// ```
    pub fn builder() -> ThreadSplitterBuilder {
        ThreadSplitterBuilder::new()
    }

    pub fn platform(&self) -> &PlatformProfile {
        &self.platform
    }

    /// Split `text` into posts.
    ///
    /// Non-empty `split_points` take precedence over inline thread markers,
    /// which take precedence over segmenting. Attachments are charged to the
    /// first post only.
    ///
    /// # Errors
    ///
    /// Returns an error only for malformed `split_points`; every content
    /// shape produces some output.
    ///
    /// # Example
    ///
    /// ```rust
    /// use thread_splitter::{SplitStrategy, ThreadSplitter, Platform};
    ///
    /// let splitter = ThreadSplitter::new(Platform::X);
    /// let thread = splitter.split("1/ First part 2/ Second part 3/ Third part", &[], &[])?;
    ///
    /// assert_eq!(thread.strategy, SplitStrategy::ThreadMarkers);
    /// assert_eq!(thread.posts, vec!["1/3 First part", "2/3 Second part", "3/3 Third part"]);
    /// # Ok::<(), thread_splitter::SplitError>(())
    /// ```
    pub fn split(
        &self,
        text: &str,
        attachments: &[Attachment],
        split_points: &[usize],
    ) -> Result<Thread> {
        let platform = &self.platform;

        if text.trim().is_empty() {
            return Ok(self.thread(SplitStrategy::Empty, Vec::new()));
        }

        if !split_points.is_empty() {
            let chunks: Vec<String> = split_at_offsets(text, split_points)?
                .into_iter()
                .map(|slice| preprocess(slice, platform).trim().to_string())
                .filter(|chunk| !chunk.is_empty())
                .collect();
            tracing::debug!(
                platform = %platform.platform,
                split_points = split_points.len(),
                chunks = chunks.len(),
                "splitting at manual offsets"
            );
            let posts = remediate(chunks, platform, attachments);
            return Ok(self.finish(SplitStrategy::ManualSplitPoints, posts, attachments));
        }

        let cleaned = preprocess(text, platform);
        let body = cleaned.trim();

        if let Some(chunks) = detect_thread_markers(body) {
            let chunks = chunks.into_iter().map(str::to_string).collect();
            let posts = remediate(chunks, platform, attachments);
            return Ok(self.finish(SplitStrategy::ThreadMarkers, posts, attachments));
        }

        if !exceeds_limit(body, platform, attachments) {
            let post = if self.optimize_length {
                optimize_single(body, platform, attachments)
            } else {
                body.to_string()
            };
            tracing::debug!(platform = %platform.platform, "input fits a single post");
            return Ok(self.thread(SplitStrategy::SinglePost, vec![post]));
        }

        let segments = segment(&cleaned);
        let posts = self.pack_reserving(&segments, attachments);
        tracing::debug!(
            platform = %platform.platform,
            segments = segments.len(),
            posts = posts.len(),
            "packed segments"
        );
        Ok(self.finish(SplitStrategy::Segmented, posts, attachments))
    }

    /// Pack against a budget that leaves room for the `n/total ` marker,
    /// repeating until the marker width stops changing. The budget only
    /// ever shrinks, so a post count that crosses a digit boundary settles.
    fn pack_reserving(&self, segments: &[TextSegment], attachments: &[Attachment]) -> Vec<String> {
        let platform = &self.platform;
        let numbered = self.finalizer.number_posts
            && self.finalizer.reserve_numbering
            && platform.conversational;

        let mut budget = *platform;
        loop {
            let posts = pack(segments, &budget, attachments);
            if !numbered || posts.len() <= 1 {
                return posts;
            }

            let total = posts.len();
            let width = CharCounter::graphemes(&format!("{total}/{total} "));
            let reserved = platform.max_chars.saturating_sub(width);
            if reserved >= budget.max_chars {
                return posts;
            }
            budget = platform.with_max_chars(reserved);
        }
    }

    fn finish(
        &self,
        strategy: SplitStrategy,
        posts: Vec<String>,
        attachments: &[Attachment],
    ) -> Thread {
        let posts = self.finalizer.apply(posts, &self.platform, attachments);
        tracing::debug!(
            platform = %self.platform.platform,
            strategy = ?strategy,
            posts = posts.len(),
            "thread finalized"
        );
        self.thread(strategy, posts)
    }

    fn thread(&self, strategy: SplitStrategy, posts: Vec<String>) -> Thread {
        Thread {
            platform: self.platform.platform,
            strategy,
            posts,
        }
    }
}

/// Builder for configuring a ThreadSplitter with custom settings.
#[derive(Debug, Clone, Copy)]
pub struct ThreadSplitterBuilder {
    platform: PlatformProfile,
    optimize_length: bool,
    number_posts: bool,
    reserve_numbering: bool,
}

impl ThreadSplitterBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            platform: Platform::X.profile(),
            optimize_length: true,
            number_posts: true,
            reserve_numbering: true,
        }
    }

    /// Target platform, either a built-in [`Platform`] or an adjusted
    /// [`PlatformProfile`].
    ///
    /// Default: X
    pub fn platform(mut self, platform: impl Into<PlatformProfile>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Append an engagement suffix to short single posts.
    ///
    /// Default: true
    pub fn optimize_length(mut self, optimize: bool) -> Self {
        self.optimize_length = optimize;
        self
    }

    /// Prefix `n/total ` markers on conversational platforms.
    ///
    /// Default: true
    pub fn number_posts(mut self, number: bool) -> Self {
        self.number_posts = number;
        self
    }

    /// Re-split posts so markers fit instead of truncating bodies.
    ///
    /// Default: true
    pub fn reserve_numbering(mut self, reserve: bool) -> Self {
        self.reserve_numbering = reserve;
        self
    }

    /// Build the ThreadSplitter with the configured settings.
    pub fn build(self) -> ThreadSplitter {
        ThreadSplitter {
            platform: self.platform,
            optimize_length: self.optimize_length,
            finalizer: Finalizer {
                number_posts: self.number_posts,
                reserve_numbering: self.reserve_numbering,
            },
        }
    }
}

impl Default for ThreadSplitterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `text` for the platform named by `platform_key` with default
/// settings.
///
/// # Errors
///
/// Fails fast on an unknown platform key or malformed split points.
pub fn generate_thread(
    text: &str,
    platform_key: &str,
    attachments: &[Attachment],
    split_points: &[usize],
) -> Result<Vec<String>> {
    let platform: Platform = platform_key.parse()?;
    let thread = ThreadSplitter::new(platform).split(text, attachments, split_points)?;
    Ok(thread.posts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let thread = ThreadSplitter::default().split("  \n\n ", &[], &[]).unwrap();
        assert_eq!(thread.strategy, SplitStrategy::Empty);
        assert!(thread.is_empty());
    }

    #[test]
    fn test_unknown_platform_fails_fast() {
        assert_eq!(
            generate_thread("hi", "myspace", &[], &[]),
            Err(SplitError::UnknownPlatform("myspace".to_string()))
        );
    }

    #[test]
    fn test_single_post_optimized() {
        let thread = ThreadSplitter::default()
            .split("Hello world. This is a test.", &[], &[])
            .unwrap();
        assert_eq!(thread.strategy, SplitStrategy::SinglePost);
        assert_eq!(thread.posts, vec!["Hello world. This is a test.\n\nAgree or disagree?"]);
    }

    #[test]
    fn test_single_post_without_optimizer() {
        let splitter = ThreadSplitter::builder().optimize_length(false).build();
        let thread = splitter.split("  Hello world.  ", &[], &[]).unwrap();
        assert_eq!(thread.posts, vec!["Hello world."]);
    }

    #[test]
    fn test_manual_split_points_take_precedence() {
        let splitter = ThreadSplitter::new(Platform::LinkedIn);
        let text = "1/ First part 2/ Second part";
        let thread = splitter.split(text, &[], &[13]).unwrap();
        assert_eq!(thread.strategy, SplitStrategy::ManualSplitPoints);
        assert_eq!(thread.posts, vec!["1/ First part", "2/ Second part"]);
    }

    #[test]
    fn test_manual_split_points_validated() {
        let splitter = ThreadSplitter::default();
        assert!(matches!(
            splitter.split("abc", &[], &[5]),
            Err(SplitError::SplitPointOutOfBounds { offset: 5, len: 3 })
        ));
    }

    #[test]
    fn test_markers_not_numbered_on_non_conversational() {
        let splitter = ThreadSplitter::new(Platform::Reddit);
        let thread = splitter
            .split("1/ First part 2/ Second part 3/ Third part", &[], &[])
            .unwrap();
        assert_eq!(thread.posts, vec!["First part", "Second part", "Third part"]);
    }

    #[test]
    fn test_mastodon_run_on_paragraph() {
        let splitter = ThreadSplitter::new(Platform::Mastodon);
        let thread = splitter.split(&"lorem ".repeat(100), &[], &[]).unwrap();
        assert_eq!(thread.strategy, SplitStrategy::Segmented);
        assert_eq!(thread.len(), 2);
        assert!(thread.posts[0].starts_with("1/2 lorem"));
        assert!(thread.posts[1].starts_with("2/2 lorem"));
        let mastodon = Platform::Mastodon.profile();
        assert!(thread.posts.iter().all(|p| !exceeds_limit(p, &mastodon, &[])));
    }

    #[test]
    fn test_post_count_crossing_into_two_digits() {
        // At 280 the tail joins the ninth post. Reserving "9/9 " pushes it
        // out to a tenth, and "10/10 " must still leave room for each body.
        let body = format!("{}.", "x".repeat(273));
        let mut text = vec![body.as_str(); 9].join(" ");
        text.push_str(" Ok.");

        let thread = ThreadSplitter::builder()
            .platform(Platform::X)
            .optimize_length(false)
            .build()
            .split(&text, &[], &[])
            .unwrap();

        assert_eq!(thread.len(), 10);
        assert_eq!(thread.posts[0], format!("1/10 {body}"));
        assert_eq!(thread.posts[9], "10/10 Ok.");
        for post in &thread.posts {
            assert!(!post.contains(splitter::finalize::ELLIPSIS));
            assert!(CharCounter::graphemes(post) <= 280);
        }
    }

    #[test]
    fn test_thread_serializes() {
        let thread = Thread {
            platform: Platform::LinkedIn,
            strategy: SplitStrategy::ThreadMarkers,
            posts: vec!["a".to_string()],
        };
        let json = serde_json::to_string(&thread).unwrap();
        assert_eq!(json, r#"{"platform":"linkedin","strategy":"thread_markers","posts":["a"]}"#);
    }
}
