// Error type shared by unpacking and suggestion application.

use crate::span::UnpackedSpan;

/// Errors returned by the unpack and apply operations.
///
/// Both operations are all-or-nothing: when an error is returned, no partial
/// record or partially edited text is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LintError {
    /// The diagnostic or suggestion object is missing an accessor or
    /// returned malformed data.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A suggestion kind outside `Remove`, `Replace` and `InsertAfter`.
    #[error("unsupported suggestion kind: {0}")]
    UnsupportedSuggestionKind(String),

    /// The span does not fit inside the text it is applied to.
    #[error("span {start}..{end} is out of bounds for text of length {len}")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },

    /// Two edits in a batch touch the same region of the text.
    #[error("edits at {first} and {second} overlap")]
    OverlappingEdits {
        first: UnpackedSpan,
        second: UnpackedSpan,
    },
}

impl LintError {
    /// Shorthand for an `InvalidInput` error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        LintError::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            LintError::invalid("missing field `message`").to_string(),
            "invalid input: missing field `message`"
        );
        assert_eq!(
            LintError::UnsupportedSuggestionKind("Swap".into()).to_string(),
            "unsupported suggestion kind: Swap"
        );
        assert_eq!(
            LintError::SpanOutOfBounds {
                start: 2,
                end: 9,
                len: 4,
            }
            .to_string(),
            "span 2..9 is out of bounds for text of length 4"
        );
    }

    #[test]
    fn overlap_message_uses_span_display() {
        let err = LintError::OverlappingEdits {
            first: UnpackedSpan::new(0, 4),
            second: UnpackedSpan::new(2, 6),
        };
        assert_eq!(err.to_string(), "edits at 0..4 and 2..6 overlap");
    }
}
