// UnpackedSpan: half-open char-offset interval over a text buffer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LintError;

/// A half-open interval `[start, end)` of char offsets into a text.
///
/// Offsets count Unicode scalar values, not bytes. A span is only
/// meaningful against the text it was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UnpackedSpan {
    pub start: usize,
    pub end: usize,
}

impl UnpackedSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of chars covered by the span. Zero for inverted spans.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `other` lies entirely within this span.
    pub fn contains_span(&self, other: &UnpackedSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether the two spans share at least one char.
    ///
    /// Empty spans never overlap anything; use [`UnpackedSpan::touches`] when
    /// insertion points matter.
    pub fn overlaps(&self, other: &UnpackedSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether the spans overlap or one of them is an insertion point strictly
    /// inside the other.
    pub fn touches(&self, other: &UnpackedSpan) -> bool {
        self.overlaps(other)
            || (self.is_empty() && other.start < self.start && self.start < other.end)
            || (other.is_empty() && self.start < other.start && other.start < self.end)
    }

    /// Check that `start <= end <= len`.
    pub fn check_within(&self, len: usize) -> Result<(), LintError> {
        if self.start > self.end || self.end > len {
            return Err(LintError::SpanOutOfBounds {
                start: self.start,
                end: self.end,
                len,
            });
        }
        Ok(())
    }
}

impl fmt::Display for UnpackedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<std::ops::Range<usize>> for UnpackedSpan {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}
