// Unpacking: copy an engine diagnostic into an UnpackedLint.

use crate::error::LintError;
use crate::lint::UnpackedLint;
use crate::options::UnpackOptions;
use crate::source::{LintSource, SuggestionSource};
use crate::span::UnpackedSpan;
use crate::suggestion::UnpackedSuggestion;

/// Flatten one diagnostic into plain data.
///
/// Each accessor is called once. Suggestions keep the engine's order and are
/// never deduplicated; `max_suggestions` only truncates the tail. The first
/// accessor error aborts the whole unpack.
pub fn unpack_lint<L: LintSource>(
    lint: &L,
    options: &UnpackOptions,
) -> Result<UnpackedLint, LintError> {
    let span = lint.span()?;
    if span.start > span.end {
        return Err(LintError::invalid(format!(
            "span start {} is after end {}",
            span.start, span.end
        )));
    }
    tracing::debug!(start = span.start, end = span.end, "unpacking lint");

    let message = lint.message()?;
    let problem_text = lint.problem_text()?;
    let lint_kind = lint.lint_kind()?;
    let lint_kind_pretty = lint.lint_kind_pretty()?;

    let sources = lint.suggestions()?;
    let keep = options.max_suggestions.unwrap_or(sources.len());
    let suggestions = sources
        .iter()
        .take(keep)
        .enumerate()
        .map(|(index, s)| unpack_suggestion(s, index, span, options))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(UnpackedLint {
        span,
        message,
        problem_text,
        lint_kind,
        lint_kind_pretty,
        suggestions,
    })
}

/// Unpack every diagnostic in `lints`, failing on the first bad one.
pub fn unpack_lints<I>(lints: I, options: &UnpackOptions) -> Result<Vec<UnpackedLint>, LintError>
where
    I: IntoIterator,
    I::Item: LintSource,
{
    lints
        .into_iter()
        .map(|lint| unpack_lint(&lint, options))
        .collect()
}

fn unpack_suggestion<S: SuggestionSource>(
    source: &S,
    index: usize,
    span: UnpackedSpan,
    options: &UnpackOptions,
) -> Result<UnpackedSuggestion, LintError> {
    let kind = source.kind()?;
    let suggestion = if kind.takes_text() {
        UnpackedSuggestion::new(kind, source.replacement_text()?)
    } else {
        UnpackedSuggestion::remove()
    };

    if suggestion.is_missing_text() {
        if options.require_replacement_text {
            return Err(LintError::invalid(format!(
                "suggestion {index} ({kind}) at {span} has no replacement text"
            )));
        }
        tracing::warn!(index, %kind, %span, "suggestion has empty replacement text");
    }

    Ok(suggestion)
}
