//! Segment definitions for word tokenization
//!
//! A segment is a zero-copy span of chunk display text. Word segments carry
//! their canonical comparison key; whitespace and punctuation segments are
//! kept verbatim so that highlight markup can be wrapped around word runs
//! only while the rest of the text is re-emitted unchanged.

use core::fmt;

/// Segment produced by the word tokenizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Segment kind discriminant
    pub kind: SegmentKind,

    /// Zero-copy span referencing the tokenized text
    pub text: &'a str,

    /// Byte offset of the span in the tokenized text
    pub offset: usize,

    /// Canonical comparison form, present only for word segments
    pub canonical: Option<String>,
}

impl<'a> Segment<'a> {
    /// Create a word segment with its canonical form
    #[must_use]
    pub const fn word(text: &'a str, offset: usize, canonical: String) -> Self {
        Self {
            kind: SegmentKind::Word,
            text,
            offset,
            canonical: Some(canonical),
        }
    }

    /// Create a non-word segment
    #[must_use]
    pub const fn separator(kind: SegmentKind, text: &'a str, offset: usize) -> Self {
        Self {
            kind,
            text,
            offset,
            canonical: None,
        }
    }

    /// Check if this segment is a word run
    #[must_use]
    pub const fn is_word(&self) -> bool {
        matches!(self.kind, SegmentKind::Word)
    }

    /// Byte range of the segment in the tokenized text
    #[must_use]
    pub const fn range(&self) -> core::ops::Range<usize> {
        self.offset..self.offset + self.text.len()
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{} '{}'", self.kind, self.offset, self.text)
    }
}

/// Segment kind discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentKind {
    /// Letters, digits, combining marks and apostrophe-like marks
    Word,

    /// Run of whitespace
    Whitespace,

    /// Single character that is neither word nor whitespace
    Punctuation,
}
