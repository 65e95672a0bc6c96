// src/platform.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SplitError;

/// Target outlet for a generated thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[serde(alias = "twitter")]
    X,
    Threads,
    #[serde(rename = "linkedin")]
    LinkedIn,
    Reddit,
    Mastodon,
    Facebook,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::X,
        Platform::Threads,
        Platform::LinkedIn,
        Platform::Reddit,
        Platform::Mastodon,
        Platform::Facebook,
    ];

    /// Stable lowercase key, as accepted by `FromStr`.
    pub fn key(self) -> &'static str {
        match self {
            Platform::X => "x",
            Platform::Threads => "threads",
            Platform::LinkedIn => "linkedin",
            Platform::Reddit => "reddit",
            Platform::Mastodon => "mastodon",
            Platform::Facebook => "facebook",
        }
    }

    /// Built-in profile for this platform.
    pub fn profile(self) -> PlatformProfile {
        match self {
            Platform::X => PlatformProfile {
                platform: self,
                name: "X (Twitter)",
                max_chars: 280,
                conversational: true,
                counting: CountingRule::WeightedLinks {
                    url_weight: 23,
                    local_mentions: false,
                },
                attachment_cost: 24,
                tidy_tags: true,
            },
            Platform::Threads => PlatformProfile {
                platform: self,
                name: "Threads",
                max_chars: 500,
                conversational: true,
                counting: CountingRule::Literal,
                attachment_cost: 24,
                tidy_tags: true,
            },
            Platform::LinkedIn => PlatformProfile {
                platform: self,
                name: "LinkedIn",
                max_chars: 3000,
                conversational: false,
                counting: CountingRule::Literal,
                attachment_cost: 50,
                tidy_tags: true,
            },
            Platform::Reddit => PlatformProfile {
                platform: self,
                name: "Reddit",
                max_chars: 40_000,
                conversational: false,
                counting: CountingRule::Literal,
                attachment_cost: 50,
                tidy_tags: false,
            },
            Platform::Mastodon => PlatformProfile {
                platform: self,
                name: "Mastodon",
                max_chars: 500,
                conversational: true,
                counting: CountingRule::WeightedLinks {
                    url_weight: 23,
                    local_mentions: true,
                },
                attachment_cost: 24,
                tidy_tags: true,
            },
            Platform::Facebook => PlatformProfile {
                platform: self,
                name: "Facebook",
                max_chars: 63_206,
                conversational: false,
                counting: CountingRule::Literal,
                attachment_cost: 50,
                tidy_tags: true,
            },
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Platform {
    type Err = SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" | "twitter" => Ok(Platform::X),
            "threads" => Ok(Platform::Threads),
            "linkedin" => Ok(Platform::LinkedIn),
            "reddit" => Ok(Platform::Reddit),
            "mastodon" => Ok(Platform::Mastodon),
            "facebook" => Ok(Platform::Facebook),
            _ => Err(SplitError::UnknownPlatform(s.to_string())),
        }
    }
}

/// How a platform turns text into a character count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountingRule {
    /// One unit per grapheme cluster
    Literal,
    /// URLs cost a fixed `url_weight`; with `local_mentions`, remote
    /// `@user@instance` mentions only count their `@user` part
    WeightedLinks {
        url_weight: usize,
        local_mentions: bool,
    },
}

/// Character budget and counting conventions for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformProfile {
    pub platform: Platform,
    pub name: &'static str,
    pub max_chars: usize,
    /// Readers expect `n/total` markers on multi-post threads
    pub conversational: bool,
    pub counting: CountingRule,
    /// Cost charged per attachment against the first post
    pub attachment_cost: usize,
    /// Normalize spacing around hashtags and mentions
    pub tidy_tags: bool,
}

impl PlatformProfile {
    /// Copy of this profile with a different character budget.
    ///
    /// A zero budget is raised to one so every profile can hold at least a
    /// single character.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars.max(1);
        self
    }
}

impl From<Platform> for PlatformProfile {
    fn from(platform: Platform) -> Self {
        platform.profile()
    }
}
