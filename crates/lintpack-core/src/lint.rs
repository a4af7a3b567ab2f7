// UnpackedLint: the flattened, serializable diagnostic record.

use serde::{Deserialize, Serialize};

use crate::apply::Edit;
use crate::span::UnpackedSpan;
use crate::suggestion::UnpackedSuggestion;

/// A diagnostic copied out of the engine into plain data.
///
/// Suggestions keep the engine's order; the first one is the preferred fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpackedLint {
    pub span: UnpackedSpan,
    pub message: String,
    /// The exact text covered by `span` in the checked document.
    pub problem_text: String,
    /// Machine-readable category tag, e.g. `"Spelling"`.
    pub lint_kind: String,
    /// Human-readable category label, e.g. `"Spelling"` or `"Word Choice"`.
    pub lint_kind_pretty: String,
    #[serde(default)]
    pub suggestions: Vec<UnpackedSuggestion>,
}

impl UnpackedLint {
    /// The preferred suggestion, if the engine offered any.
    pub fn preferred_suggestion(&self) -> Option<&UnpackedSuggestion> {
        self.suggestions.first()
    }

    pub fn suggestion_count(&self) -> usize {
        self.suggestions.len()
    }

    /// Suggestion `index` paired with this lint's span.
    pub fn edit(&self, index: usize) -> Option<Edit> {
        self.suggestions
            .get(index)
            .map(|s| Edit::new(self.span, s.clone()))
    }
}
