// Suggestion kinds and the flattened suggestion record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LintError;

/// The closed set of edits a suggestion can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuggestionKind {
    /// Delete the spanned text.
    Remove,
    /// Replace the spanned text with the replacement text.
    Replace,
    /// Insert the replacement text right after the end of the span.
    InsertAfter,
}

impl SuggestionKind {
    pub const ALL: [SuggestionKind; 3] = [
        SuggestionKind::Remove,
        SuggestionKind::Replace,
        SuggestionKind::InsertAfter,
    ];

    /// Tag used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionKind::Remove => "Remove",
            SuggestionKind::Replace => "Replace",
            SuggestionKind::InsertAfter => "InsertAfter",
        }
    }

    /// Numeric code used by the C ABI.
    pub fn code(self) -> i32 {
        match self {
            SuggestionKind::Remove => 0,
            SuggestionKind::Replace => 1,
            SuggestionKind::InsertAfter => 2,
        }
    }

    /// Inverse of [`SuggestionKind::code`].
    pub fn from_code(code: i64) -> Result<Self, LintError> {
        match code {
            0 => Ok(SuggestionKind::Remove),
            1 => Ok(SuggestionKind::Replace),
            2 => Ok(SuggestionKind::InsertAfter),
            other => Err(LintError::UnsupportedSuggestionKind(other.to_string())),
        }
    }

    /// Whether suggestions of this kind carry replacement text.
    pub fn takes_text(self) -> bool {
        !matches!(self, SuggestionKind::Remove)
    }
}

impl FromStr for SuggestionKind {
    type Err = LintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Remove" => Ok(SuggestionKind::Remove),
            // Engines built on harper name the variant `ReplaceWith`.
            "Replace" | "ReplaceWith" => Ok(SuggestionKind::Replace),
            "InsertAfter" => Ok(SuggestionKind::InsertAfter),
            other => Err(LintError::UnsupportedSuggestionKind(other.to_string())),
        }
    }
}

impl fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single candidate fix, flattened out of the engine's suggestion object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpackedSuggestion {
    pub kind: SuggestionKind,

    /// Text to splice in. Always empty for [`SuggestionKind::Remove`].
    #[serde(default)]
    pub replacement_text: String,
}

impl UnpackedSuggestion {
    /// Build a suggestion, dropping any text passed along with `Remove`.
    pub fn new(kind: SuggestionKind, replacement_text: impl Into<String>) -> Self {
        let replacement_text = if kind.takes_text() {
            replacement_text.into()
        } else {
            String::new()
        };
        Self {
            kind,
            replacement_text,
        }
    }

    pub fn remove() -> Self {
        Self::new(SuggestionKind::Remove, "")
    }

    pub fn replace(text: impl Into<String>) -> Self {
        Self::new(SuggestionKind::Replace, text)
    }

    pub fn insert_after(text: impl Into<String>) -> Self {
        Self::new(SuggestionKind::InsertAfter, text)
    }

    /// A `Replace` or `InsertAfter` with nothing to insert.
    pub fn is_missing_text(&self) -> bool {
        self.kind.takes_text() && self.replacement_text.is_empty()
    }
}

impl fmt::Display for UnpackedSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = &self.replacement_text;
        match self.kind {
            SuggestionKind::Remove => f.write_str("Remove"),
            SuggestionKind::Replace => write!(f, "Replace with \u{201c}{text}\u{201d}"),
            SuggestionKind::InsertAfter => write!(f, "Insert \u{201c}{text}\u{201d}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_parse_back() {
        for kind in SuggestionKind::ALL {
            assert_eq!(kind.as_str().parse::<SuggestionKind>(), Ok(kind));
            assert_eq!(SuggestionKind::from_code(kind.code().into()), Ok(kind));
        }
    }

    #[test]
    fn replace_with_alias() {
        assert_eq!("ReplaceWith".parse(), Ok(SuggestionKind::Replace));
    }

    #[test]
    fn unknown_kinds_rejected() {
        assert_eq!(
            "Swap".parse::<SuggestionKind>(),
            Err(LintError::UnsupportedSuggestionKind("Swap".into()))
        );
        assert_eq!(
            "remove".parse::<SuggestionKind>(),
            Err(LintError::UnsupportedSuggestionKind("remove".into()))
        );
        assert_eq!(
            SuggestionKind::from_code(7),
            Err(LintError::UnsupportedSuggestionKind("7".into()))
        );
        assert!(SuggestionKind::from_code(-1).is_err());
    }

    #[test]
    fn remove_drops_text() {
        let s = UnpackedSuggestion::new(SuggestionKind::Remove, "ignored");
        assert_eq!(s.replacement_text, "");
        assert!(!s.is_missing_text());
    }

    #[test]
    fn missing_text_detection() {
        assert!(UnpackedSuggestion::replace("").is_missing_text());
        assert!(UnpackedSuggestion::insert_after("").is_missing_text());
        assert!(!UnpackedSuggestion::replace("x").is_missing_text());
    }

    #[test]
    fn display() {
        assert_eq!(UnpackedSuggestion::remove().to_string(), "Remove");
        assert_eq!(
            UnpackedSuggestion::replace("The").to_string(),
            "Replace with \u{201c}The\u{201d}"
        );
    }

    #[test]
    fn wire_shape() {
        let json = serde_json::to_string(&UnpackedSuggestion::insert_after(" now")).unwrap();
        assert_eq!(json, r#"{"kind":"InsertAfter","replacementText":" now"}"#);

        let back: UnpackedSuggestion = serde_json::from_str(r#"{"kind":"Remove"}"#).unwrap();
        assert_eq!(back, UnpackedSuggestion::remove());
    }
}
