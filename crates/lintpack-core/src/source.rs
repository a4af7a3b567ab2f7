// Capability traits an engine's diagnostic objects implement.
//
// The unpack step only ever talks to these traits, so any engine can be
// adapted by implementing them on its own lint and suggestion types (or on a
// thin wrapper around them). Accessors are fallible so that dynamically
// shaped inputs, such as JSON handed over from another process, can report a
// missing or malformed field instead of guessing a value.

use crate::error::LintError;
use crate::span::UnpackedSpan;
use crate::suggestion::SuggestionKind;

/// A diagnostic produced by a checking engine.
pub trait LintSource {
    /// The suggestion type this diagnostic hands out.
    type Suggestion: SuggestionSource;

    fn span(&self) -> Result<UnpackedSpan, LintError>;

    fn message(&self) -> Result<String, LintError>;

    /// The text covered by the span.
    fn problem_text(&self) -> Result<String, LintError>;

    /// Machine-readable category tag.
    fn lint_kind(&self) -> Result<String, LintError>;

    /// Human-readable category label.
    fn lint_kind_pretty(&self) -> Result<String, LintError>;

    /// Candidate fixes, preferred first.
    fn suggestions(&self) -> Result<Vec<Self::Suggestion>, LintError>;
}

/// One candidate fix produced by a checking engine.
pub trait SuggestionSource {
    fn kind(&self) -> Result<SuggestionKind, LintError>;

    /// Text to insert. Engines may return anything for `Remove`; it is
    /// discarded during unpacking.
    fn replacement_text(&self) -> Result<String, LintError>;
}

impl<T: LintSource + ?Sized> LintSource for &T {
    type Suggestion = T::Suggestion;

    fn span(&self) -> Result<UnpackedSpan, LintError> {
        (**self).span()
    }

    fn message(&self) -> Result<String, LintError> {
        (**self).message()
    }

    fn problem_text(&self) -> Result<String, LintError> {
        (**self).problem_text()
    }

    fn lint_kind(&self) -> Result<String, LintError> {
        (**self).lint_kind()
    }

    fn lint_kind_pretty(&self) -> Result<String, LintError> {
        (**self).lint_kind_pretty()
    }

    fn suggestions(&self) -> Result<Vec<Self::Suggestion>, LintError> {
        (**self).suggestions()
    }
}

// Already-unpacked records can be fed back through the same path, e.g. when
// re-validating lints deserialized from disk with stricter options.

impl LintSource for crate::lint::UnpackedLint {
    type Suggestion = crate::suggestion::UnpackedSuggestion;

    fn span(&self) -> Result<UnpackedSpan, LintError> {
        Ok(self.span)
    }

    fn message(&self) -> Result<String, LintError> {
        Ok(self.message.clone())
    }

    fn problem_text(&self) -> Result<String, LintError> {
        Ok(self.problem_text.clone())
    }

    fn lint_kind(&self) -> Result<String, LintError> {
        Ok(self.lint_kind.clone())
    }

    fn lint_kind_pretty(&self) -> Result<String, LintError> {
        Ok(self.lint_kind_pretty.clone())
    }

    fn suggestions(&self) -> Result<Vec<Self::Suggestion>, LintError> {
        Ok(self.suggestions.clone())
    }
}

impl SuggestionSource for crate::suggestion::UnpackedSuggestion {
    fn kind(&self) -> Result<SuggestionKind, LintError> {
        Ok(self.kind)
    }

    fn replacement_text(&self) -> Result<String, LintError> {
        Ok(self.replacement_text.clone())
    }
}
