// Suggestion application: splice a suggestion into a copy of the text.
//
// Offsets are char offsets. All functions return fresh buffers and leave
// their input untouched, so an edit can be undone by recomputing from the
// original text (or by applying the inverse edit, see `inverse_edit`).

use std::iter;

use serde::{Deserialize, Serialize};

use crate::error::LintError;
use crate::lint::UnpackedLint;
use crate::span::UnpackedSpan;
use crate::suggestion::{SuggestionKind, UnpackedSuggestion};

/// A suggestion paired with the span it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub span: UnpackedSpan,
    pub suggestion: UnpackedSuggestion,
}

impl Edit {
    pub fn new(span: UnpackedSpan, suggestion: UnpackedSuggestion) -> Self {
        Self { span, suggestion }
    }

    /// The part of the original text this edit rewrites. For `InsertAfter`
    /// this is the empty insertion point at `span.end`.
    pub fn region(&self) -> UnpackedSpan {
        match self.suggestion.kind {
            SuggestionKind::Remove | SuggestionKind::Replace => self.span,
            SuggestionKind::InsertAfter => UnpackedSpan::new(self.span.end, self.span.end),
        }
    }
}

/// Apply one suggestion to `text`.
///
/// - `Remove` deletes `[start, end)`.
/// - `Replace` swaps `[start, end)` for the replacement text.
/// - `InsertAfter` inserts the replacement text at `end`; `[start, end)` is
///   kept.
///
/// The span must satisfy `start <= end <= text.chars().count()` for every
/// kind, otherwise `SpanOutOfBounds` is returned.
pub fn apply_suggestion(
    text: &str,
    span: UnpackedSpan,
    suggestion: &UnpackedSuggestion,
) -> Result<String, LintError> {
    let (start, end) = byte_range(text, span)?;
    let insert = suggestion.replacement_text.as_str();

    let mut out = String::with_capacity(text.len() + insert.len());
    match suggestion.kind {
        SuggestionKind::Remove => {
            out.push_str(&text[..start]);
            out.push_str(&text[end..]);
        }
        SuggestionKind::Replace => {
            out.push_str(&text[..start]);
            out.push_str(insert);
            out.push_str(&text[end..]);
        }
        SuggestionKind::InsertAfter => {
            out.push_str(&text[..end]);
            out.push_str(insert);
            out.push_str(&text[end..]);
        }
    }
    Ok(out)
}

/// [`apply_suggestion`] for engines that keep their documents as `&[char]`.
pub fn apply_suggestion_to_chars(
    source: &[char],
    span: UnpackedSpan,
    suggestion: &UnpackedSuggestion,
) -> Result<Vec<char>, LintError> {
    span.check_within(source.len())?;
    let mut out = source.to_vec();
    splice_chars(&mut out, span, suggestion);
    Ok(out)
}

/// Apply several edits computed against the same original text.
///
/// Every span refers to the original offsets. Edits whose regions overlap,
/// an insertion point strictly inside another edit's region, or two
/// insertions at the same point are rejected with `OverlappingEdits` before
/// anything is applied. An insertion at the start of a rewritten region lands
/// before the new text.
pub fn apply_suggestions(text: &str, edits: &[Edit]) -> Result<String, LintError> {
    // Byte offset of every char boundary, including the end of the text.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(b, _)| b)
        .chain(iter::once(text.len()))
        .collect();
    let len = bounds.len() - 1;
    for edit in edits {
        edit.span.check_within(len)?;
    }

    let mut ordered: Vec<&Edit> = edits.iter().collect();
    ordered.sort_by_key(|e| {
        let r = e.region();
        (r.start, r.end)
    });
    // Sorted by region, only neighbours can conflict.
    for pair in ordered.windows(2) {
        if regions_conflict(pair[0].region(), pair[1].region()) {
            return Err(LintError::OverlappingEdits {
                first: pair[0].span,
                second: pair[1].span,
            });
        }
    }

    tracing::debug!(edits = ordered.len(), "applying suggestions");
    let inserted: usize = edits.iter().map(|e| e.suggestion.replacement_text.len()).sum();
    let mut out = String::with_capacity(text.len() + inserted);
    let mut cursor = 0;
    for edit in ordered {
        let region = edit.region();
        out.push_str(&text[bounds[cursor]..bounds[region.start]]);
        if edit.suggestion.kind.takes_text() {
            out.push_str(&edit.suggestion.replacement_text);
        }
        cursor = region.end;
    }
    out.push_str(&text[bounds[cursor]..]);
    Ok(out)
}

/// Pair every lint with its suggestion number `pick` (0 = preferred).
///
/// Lints offering fewer suggestions are skipped.
pub fn pick_edits(lints: &[UnpackedLint], pick: usize) -> Vec<Edit> {
    lints.iter().filter_map(|lint| lint.edit(pick)).collect()
}

/// The span the edited region occupies in the output of [`apply_suggestion`].
///
/// For `Remove` this is the empty point where the text used to be. The span
/// is not checked against any text, so the end saturates at `usize::MAX`.
pub fn applied_span(span: UnpackedSpan, suggestion: &UnpackedSuggestion) -> UnpackedSpan {
    let inserted = suggestion.replacement_text.chars().count();
    match suggestion.kind {
        SuggestionKind::Remove => UnpackedSpan::new(span.start, span.start),
        SuggestionKind::Replace => {
            UnpackedSpan::new(span.start, span.start.saturating_add(inserted))
        }
        SuggestionKind::InsertAfter => {
            UnpackedSpan::new(span.end, span.end.saturating_add(inserted))
        }
    }
}

/// The edit that turns the output of `apply_suggestion(original, span,
/// suggestion)` back into `original`.
pub fn inverse_edit(
    original: &str,
    span: UnpackedSpan,
    suggestion: &UnpackedSuggestion,
) -> Result<Edit, LintError> {
    let (start, end) = byte_range(original, span)?;
    let removed = &original[start..end];
    let target = applied_span(span, suggestion);

    let undo = match suggestion.kind {
        SuggestionKind::Remove => Edit::new(target, UnpackedSuggestion::insert_after(removed)),
        SuggestionKind::Replace => Edit::new(target, UnpackedSuggestion::replace(removed)),
        SuggestionKind::InsertAfter => Edit::new(target, UnpackedSuggestion::remove()),
    };
    Ok(undo)
}

/// `a` must not sort after `b` by `(start, end)`.
fn regions_conflict(a: UnpackedSpan, b: UnpackedSpan) -> bool {
    a.end > b.start || (a.is_empty() && b.is_empty() && a.start == b.start)
}

fn splice_chars(chars: &mut Vec<char>, span: UnpackedSpan, suggestion: &UnpackedSuggestion) {
    let insert = suggestion.replacement_text.chars();
    match suggestion.kind {
        SuggestionKind::Remove => {
            chars.drain(span.start..span.end);
        }
        SuggestionKind::Replace => {
            chars.splice(span.start..span.end, insert);
        }
        SuggestionKind::InsertAfter => {
            chars.splice(span.end..span.end, insert);
        }
    }
}

/// Translate a char span into byte offsets of `text`.
fn byte_range(text: &str, span: UnpackedSpan) -> Result<(usize, usize), LintError> {
    let out_of_bounds = || LintError::SpanOutOfBounds {
        start: span.start,
        end: span.end,
        len: text.chars().count(),
    };
    if span.start > span.end {
        return Err(out_of_bounds());
    }

    let mut boundaries = text
        .char_indices()
        .map(|(b, _)| b)
        .chain(iter::once(text.len()));
    let start = boundaries.nth(span.start).ok_or_else(out_of_bounds)?;
    let end = if span.end == span.start {
        start
    } else {
        boundaries
            .nth(span.end - span.start - 1)
            .ok_or_else(out_of_bounds)?
    };
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize) -> UnpackedSpan {
        UnpackedSpan::new(start, end)
    }

    #[test]
    fn replace_misspelling() {
        let out = apply_suggestion("Teh cat", span(0, 3), &UnpackedSuggestion::replace("The"));
        assert_eq!(out.unwrap(), "The cat");
    }

    #[test]
    fn remove_extra_space() {
        let out = apply_suggestion("a  big house", span(1, 2), &UnpackedSuggestion::remove());
        assert_eq!(out.unwrap(), "a big house");
    }

    #[test]
    fn insert_at_end_of_text() {
        let out = apply_suggestion(
            "I will go",
            span(9, 9),
            &UnpackedSuggestion::insert_after(" now"),
        );
        assert_eq!(out.unwrap(), "I will go now");
    }

    #[test]
    fn insert_after_keeps_span_text() {
        let out = apply_suggestion("big house", span(0, 3), &UnpackedSuggestion::insert_after(","));
        assert_eq!(out.unwrap(), "big, house");
    }

    #[test]
    fn offsets_are_chars_not_bytes() {
        // "ä" and "ö" are two bytes each in UTF-8.
        let text = "pää työ";
        let out = apply_suggestion(text, span(4, 7), &UnpackedSuggestion::replace("yö"));
        assert_eq!(out.unwrap(), "pää yö");

        let out = apply_suggestion(text, span(1, 3), &UnpackedSuggestion::remove());
        assert_eq!(out.unwrap(), "p työ");
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let err = apply_suggestion("short", span(2, 6), &UnpackedSuggestion::remove());
        assert_eq!(
            err,
            Err(LintError::SpanOutOfBounds {
                start: 2,
                end: 6,
                len: 5,
            })
        );

        let err = apply_suggestion("short", span(4, 1), &UnpackedSuggestion::insert_after("x"));
        assert!(matches!(err, Err(LintError::SpanOutOfBounds { .. })));

        let err = apply_suggestion("", span(1, 1), &UnpackedSuggestion::insert_after("x"));
        assert!(err.is_err());
    }

    #[test]
    fn whole_text_and_empty_text() {
        let out = apply_suggestion("abc", span(0, 3), &UnpackedSuggestion::remove());
        assert_eq!(out.unwrap(), "");

        let out = apply_suggestion("", span(0, 0), &UnpackedSuggestion::insert_after("x"));
        assert_eq!(out.unwrap(), "x");
    }

    #[test]
    fn empty_replacement_is_plain_deletion() {
        let out = apply_suggestion("Teh cat", span(0, 4), &UnpackedSuggestion::replace(""));
        assert_eq!(out.unwrap(), "cat");
    }

    #[test]
    fn char_buffer_variant_matches_str() {
        let text = "naïve café";
        let chars: Vec<char> = text.chars().collect();
        for suggestion in [
            UnpackedSuggestion::remove(),
            UnpackedSuggestion::replace("résumé"),
            UnpackedSuggestion::insert_after("!"),
        ] {
            let from_str = apply_suggestion(text, span(2, 5), &suggestion).unwrap();
            let from_chars = apply_suggestion_to_chars(&chars, span(2, 5), &suggestion).unwrap();
            assert_eq!(from_chars.into_iter().collect::<String>(), from_str);
        }
        let remove = UnpackedSuggestion::remove();
        assert!(apply_suggestion_to_chars(&chars, span(9, 11), &remove).is_err());
    }

    #[test]
    fn applied_span_per_kind() {
        let s = span(4, 7);
        assert_eq!(applied_span(s, &UnpackedSuggestion::remove()), span(4, 4));
        assert_eq!(applied_span(s, &UnpackedSuggestion::replace("ab")), span(4, 6));
        assert_eq!(applied_span(s, &UnpackedSuggestion::insert_after("äbc")), span(7, 10));
    }

    #[test]
    fn applied_span_saturates_at_the_top() {
        let top = span(usize::MAX, usize::MAX);
        let after = applied_span(top, &UnpackedSuggestion::insert_after("x"));
        assert_eq!(after, top);

        let near = span(usize::MAX - 1, usize::MAX - 1);
        let after = applied_span(near, &UnpackedSuggestion::replace("abc"));
        assert_eq!(after, span(usize::MAX - 1, usize::MAX));
    }

    #[test]
    fn inverse_restores_original() {
        let original = "a  big house";
        for (s, suggestion) in [
            (span(1, 2), UnpackedSuggestion::remove()),
            (span(2, 5), UnpackedSuggestion::replace("large")),
            (span(2, 5), UnpackedSuggestion::insert_after(" red")),
        ] {
            let edited = apply_suggestion(original, s, &suggestion).unwrap();
            let undo = inverse_edit(original, s, &suggestion).unwrap();
            let restored = apply_suggestion(&edited, undo.span, &undo.suggestion).unwrap();
            assert_eq!(restored, original, "undoing {suggestion} at {s}");
        }
    }

    #[test]
    fn batch_matches_back_to_front_sequence() {
        let text = "Teh cat  sat on teh mat";
        let edits = vec![
            Edit::new(span(0, 3), UnpackedSuggestion::replace("The")),
            Edit::new(span(16, 19), UnpackedSuggestion::replace("the")),
            Edit::new(span(7, 8), UnpackedSuggestion::remove()),
            Edit::new(span(23, 23), UnpackedSuggestion::insert_after(".")),
        ];
        assert_eq!(
            apply_suggestions(text, &edits).unwrap(),
            "The cat sat on the mat."
        );
    }

    #[test]
    fn batch_insertion_at_start_of_replaced_region() {
        let edits = vec![
            Edit::new(span(0, 0), UnpackedSuggestion::insert_after("[")),
            Edit::new(span(0, 3), UnpackedSuggestion::replace("The")),
        ];
        assert_eq!(apply_suggestions("Teh cat", &edits).unwrap(), "[The cat");
    }

    #[test]
    fn batch_forward_pass_on_multibyte_text() {
        // Given out of order; the insertion at 3 follows the replaced "pää".
        let edits = vec![
            Edit::new(span(8, 11), UnpackedSuggestion::remove()),
            Edit::new(span(0, 3), UnpackedSuggestion::insert_after("!")),
            Edit::new(span(0, 3), UnpackedSuggestion::replace("yö")),
            Edit::new(span(4, 7), UnpackedSuggestion::replace("työt")),
        ];
        assert_eq!(apply_suggestions("pää työ äää", &edits).unwrap(), "yö! työt ");
    }

    #[test]
    fn batch_rejects_overlap() {
        let edits = vec![
            Edit::new(span(0, 4), UnpackedSuggestion::remove()),
            Edit::new(span(2, 6), UnpackedSuggestion::replace("x")),
        ];
        assert_eq!(
            apply_suggestions("abcdefgh", &edits),
            Err(LintError::OverlappingEdits {
                first: span(0, 4),
                second: span(2, 6),
            })
        );
    }

    #[test]
    fn batch_rejects_competing_insertions() {
        let edits = vec![
            Edit::new(span(0, 3), UnpackedSuggestion::insert_after("!")),
            Edit::new(span(1, 3), UnpackedSuggestion::insert_after("?")),
        ];
        assert!(matches!(
            apply_suggestions("abc", &edits),
            Err(LintError::OverlappingEdits { .. })
        ));
    }

    #[test]
    fn batch_rejects_insertion_inside_removal() {
        let edits = vec![
            Edit::new(span(0, 4), UnpackedSuggestion::remove()),
            Edit::new(span(0, 2), UnpackedSuggestion::insert_after("x")),
        ];
        assert!(apply_suggestions("abcdef", &edits).is_err());
    }

    #[test]
    fn batch_checks_bounds_first() {
        let edits = vec![
            Edit::new(span(0, 1), UnpackedSuggestion::remove()),
            Edit::new(span(5, 9), UnpackedSuggestion::remove()),
        ];
        assert!(matches!(
            apply_suggestions("abc", &edits),
            Err(LintError::SpanOutOfBounds { .. })
        ));
    }

    #[test]
    fn pick_skips_lints_without_enough_suggestions() {
        let lint = |start, end, suggestions: Vec<UnpackedSuggestion>| UnpackedLint {
            span: span(start, end),
            message: String::new(),
            problem_text: String::new(),
            lint_kind: "Spelling".to_string(),
            lint_kind_pretty: "Spelling".to_string(),
            suggestions,
        };
        let lints = vec![
            lint(
                0,
                3,
                vec![UnpackedSuggestion::replace("The"), UnpackedSuggestion::replace("Tea")],
            ),
            lint(4, 7, vec![UnpackedSuggestion::remove()]),
            lint(8, 9, vec![]),
        ];

        assert_eq!(pick_edits(&lints, 0).len(), 2);
        assert_eq!(
            pick_edits(&lints, 1),
            vec![Edit::new(span(0, 3), UnpackedSuggestion::replace("Tea"))]
        );
        assert!(pick_edits(&lints, 2).is_empty());
    }

    #[test]
    fn empty_batch_is_identity() {
        assert_eq!(apply_suggestions("unchanged", &[]).unwrap(), "unchanged");
    }
}
