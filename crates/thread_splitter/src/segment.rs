// src/segment.rs

use serde::{Deserialize, Serialize};

/// A classified unit of text produced by the segmenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    pub text: String,
    pub kind: SegmentKind,
    pub priority: u8,
    /// Last segment of a blank-line-delimited paragraph
    pub paragraph_end: bool,
}

impl TextSegment {
    pub fn new(text: impl Into<String>, kind: SegmentKind) -> Self {
        Self {
            text: text.into(),
            kind,
            priority: kind.priority(),
            paragraph_end: false,
        }
    }

    /// Code, quotes and headings are emitted whole rather than torn apart.
    pub fn is_atomic(&self) -> bool {
        self.priority >= ATOMIC_PRIORITY
    }
}

/// Segments at or above this priority are never split by the packer.
pub const ATOMIC_PRIORITY: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Heading,
    Code,
    Quote,
    List,
    Paragraph,
    Sentence,
}

impl SegmentKind {
    pub fn priority(self) -> u8 {
        match self {
            SegmentKind::Heading => 5,
            SegmentKind::Code => 4,
            SegmentKind::Quote => 3,
            SegmentKind::List => 2,
            SegmentKind::Paragraph => 1,
            SegmentKind::Sentence => 0,
        }
    }

    /// Kinds that occupy whole lines and never share one with prose.
    pub fn is_line_oriented(self) -> bool {
        matches!(
            self,
            SegmentKind::Heading | SegmentKind::Code | SegmentKind::Quote | SegmentKind::List
        )
    }
}

/// Non-text item attached to the first post of a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub kind: AttachmentKind,
}

impl Attachment {
    pub fn new(id: impl Into<String>, kind: AttachmentKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Video,
    Embed,
}
