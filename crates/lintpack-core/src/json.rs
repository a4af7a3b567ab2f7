// Capability-trait adapter over dynamically shaped JSON diagnostics.
//
// Engines running in another process (or on the JS side of a WASM boundary)
// hand their diagnostics over as JSON objects. Nothing guarantees those
// objects have the expected fields, so every accessor checks presence and
// type and reports the offending field as `InvalidInput`.
//
// Both snake_case and camelCase field names are accepted:
//
//   {
//     "span": { "start": 0, "end": 3 },
//     "message": "...",
//     "problem_text": "Teh",          // or "problemText"
//     "lint_kind": "Spelling",        // or "lintKind"
//     "lint_kind_pretty": "Spelling", // or "lintKindPretty"
//     "suggestions": [
//       { "kind": "Replace", "replacement_text": "The" }  // or "replacementText"
//     ]
//   }
//
// `kind` may also be the numeric code from `SuggestionKind::code`.
//
// Standalone edits, as passed to batch application, look like
//
//   { "span": { "start": 0, "end": 3 },
//     "suggestion": { "kind": "Replace", "replacementText": "The" } }

use serde_json::Value;

use crate::apply::Edit;
use crate::error::LintError;
use crate::lint::UnpackedLint;
use crate::options::UnpackOptions;
use crate::source::{LintSource, SuggestionSource};
use crate::span::UnpackedSpan;
use crate::suggestion::{SuggestionKind, UnpackedSuggestion};
use crate::unpack::unpack_lints;

/// A borrowed JSON object viewed as a diagnostic.
#[derive(Debug, Clone, Copy)]
pub struct JsonLint<'a>(pub &'a Value);

/// A borrowed JSON object viewed as a suggestion.
#[derive(Debug, Clone, Copy)]
pub struct JsonSuggestion<'a>(pub &'a Value);

/// Unpack a JSON document holding either one diagnostic object or an array
/// of them.
pub fn unpack_json(value: &Value, options: &UnpackOptions) -> Result<Vec<UnpackedLint>, LintError> {
    match value {
        Value::Array(items) => unpack_lints(items.iter().map(JsonLint), options),
        Value::Object(_) => unpack_lints([JsonLint(value)], options),
        other => Err(LintError::invalid(format!(
            "expected a lint object or an array of lints, found {}",
            type_name(other)
        ))),
    }
}

/// Read a `{ "start", "end" }` object.
pub fn span_from_json(value: &Value) -> Result<UnpackedSpan, LintError> {
    let start = offset(field(value, &["start"])?, "span.start")?;
    let end = offset(field(value, &["end"])?, "span.end")?;
    Ok(UnpackedSpan::new(start, end))
}

/// Read a single suggestion object. Unknown kinds are
/// `UnsupportedSuggestionKind`.
pub fn suggestion_from_json(value: &Value) -> Result<UnpackedSuggestion, LintError> {
    let source = JsonSuggestion(value);
    let kind = source.kind()?;
    if kind.takes_text() {
        Ok(UnpackedSuggestion::new(kind, source.replacement_text()?))
    } else {
        Ok(UnpackedSuggestion::remove())
    }
}

/// Read a `{ "span", "suggestion" }` object.
pub fn edit_from_json(value: &Value) -> Result<Edit, LintError> {
    let span = span_from_json(field(value, &["span"])?)?;
    let suggestion = suggestion_from_json(field(value, &["suggestion"])?)?;
    Ok(Edit::new(span, suggestion))
}

/// Read an array of edits.
pub fn edits_from_json(value: &Value) -> Result<Vec<Edit>, LintError> {
    match value {
        Value::Array(items) => items.iter().map(edit_from_json).collect(),
        other => Err(LintError::invalid(format!(
            "expected an array of edits, found {}",
            type_name(other)
        ))),
    }
}

impl<'a> LintSource for JsonLint<'a> {
    type Suggestion = JsonSuggestion<'a>;

    fn span(&self) -> Result<UnpackedSpan, LintError> {
        span_from_json(field(self.0, &["span"])?)
    }

    fn message(&self) -> Result<String, LintError> {
        string_field(self.0, &["message"])
    }

    fn problem_text(&self) -> Result<String, LintError> {
        string_field(self.0, &["problem_text", "problemText"])
    }

    fn lint_kind(&self) -> Result<String, LintError> {
        string_field(self.0, &["lint_kind", "lintKind"])
    }

    fn lint_kind_pretty(&self) -> Result<String, LintError> {
        string_field(self.0, &["lint_kind_pretty", "lintKindPretty"])
    }

    fn suggestions(&self) -> Result<Vec<JsonSuggestion<'a>>, LintError> {
        match field(self.0, &["suggestions"])? {
            Value::Array(items) => Ok(items.iter().map(JsonSuggestion).collect()),
            other => Err(wrong_type("suggestions", "an array", other)),
        }
    }
}

impl SuggestionSource for JsonSuggestion<'_> {
    fn kind(&self) -> Result<SuggestionKind, LintError> {
        match field(self.0, &["kind"])? {
            Value::String(tag) => tag.parse(),
            Value::Number(n) => match n.as_i64() {
                Some(code) => SuggestionKind::from_code(code),
                None => Err(LintError::UnsupportedSuggestionKind(n.to_string())),
            },
            other => Err(wrong_type("kind", "a string or an integer", other)),
        }
    }

    fn replacement_text(&self) -> Result<String, LintError> {
        string_field(self.0, &["replacement_text", "replacementText"])
    }
}

fn field<'v>(object: &'v Value, names: &[&str]) -> Result<&'v Value, LintError> {
    let Value::Object(map) = object else {
        return Err(wrong_type(names[0], "inside an object", object));
    };
    names
        .iter()
        .find_map(|name| map.get(*name))
        .ok_or_else(|| LintError::invalid(format!("missing field `{}`", names[0])))
}

fn string_field(object: &Value, names: &[&str]) -> Result<String, LintError> {
    match field(object, names)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(wrong_type(names[0], "a string", other)),
    }
}

/// Largest integer a JS number holds exactly (`Number.MAX_SAFE_INTEGER`).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn offset(value: &Value, name: &str) -> Result<usize, LintError> {
    // JS hands every number over as a double.
    let whole = value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && (0.0..=MAX_SAFE_INTEGER).contains(f))
        .map(|f| f as u64);
    value
        .as_u64()
        .or(whole)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| wrong_type(name, "a non-negative integer", value))
}

fn wrong_type(name: &str, expected: &str, found: &Value) -> LintError {
    LintError::invalid(format!(
        "field `{name}` must be {expected}, found {}",
        type_name(found)
    ))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::unpack::unpack_lint;

    fn teh() -> Value {
        json!({
            "span": { "start": 0, "end": 3 },
            "message": "Did you mean “The”?",
            "problem_text": "Teh",
            "lint_kind": "Spelling",
            "lint_kind_pretty": "Spelling",
            "suggestions": [
                { "kind": "Replace", "replacement_text": "The" },
                { "kind": "ReplaceWith", "replacementText": "Tea" },
                { "kind": 0 }
            ]
        })
    }

    #[test]
    fn snake_case_object() {
        let lint = unpack_lint(&JsonLint(&teh()), &UnpackOptions::default()).unwrap();
        assert_eq!(lint.span, UnpackedSpan::new(0, 3));
        assert_eq!(lint.problem_text, "Teh");
        assert_eq!(
            lint.suggestions,
            vec![
                UnpackedSuggestion::replace("The"),
                UnpackedSuggestion::replace("Tea"),
                UnpackedSuggestion::remove(),
            ]
        );
    }

    #[test]
    fn camel_case_object_round_trips() {
        let first = unpack_lint(&JsonLint(&teh()), &UnpackOptions::default()).unwrap();
        let camel = serde_json::to_value(&first).unwrap();
        let second = unpack_lint(&JsonLint(&camel), &UnpackOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_field_named() {
        let mut value = teh();
        value.as_object_mut().unwrap().remove("lint_kind_pretty");
        assert_eq!(
            unpack_lint(&JsonLint(&value), &UnpackOptions::default()),
            Err(LintError::invalid("missing field `lint_kind_pretty`"))
        );
    }

    #[test]
    fn non_numeric_span() {
        let mut value = teh();
        value["span"]["end"] = json!("3");
        assert_eq!(
            unpack_lint(&JsonLint(&value), &UnpackOptions::default()),
            Err(LintError::invalid(
                "field `span.end` must be a non-negative integer, found a string"
            ))
        );

        value["span"]["end"] = json!(-1);
        assert!(unpack_lint(&JsonLint(&value), &UnpackOptions::default()).is_err());
    }

    #[test]
    fn whole_floats_accepted_within_safe_range() {
        assert_eq!(
            span_from_json(&json!({ "start": 1.0, "end": 3.0 })),
            Ok(UnpackedSpan::new(1, 3))
        );
        let safe = json!({ "start": 2.0, "end": MAX_SAFE_INTEGER });
        assert_eq!(
            span_from_json(&safe),
            Ok(UnpackedSpan::new(2, 9_007_199_254_740_991))
        );
    }

    #[test]
    fn huge_or_fractional_offsets_rejected() {
        assert_eq!(
            span_from_json(&json!({ "start": 1e20, "end": 1e20 })),
            Err(LintError::invalid(
                "field `span.start` must be a non-negative integer, found a number"
            ))
        );
        assert!(span_from_json(&json!({ "start": 0, "end": 2.5 })).is_err());
        assert!(span_from_json(&json!({ "start": 0, "end": f64::INFINITY })).is_err());
    }

    #[test]
    fn unknown_kind() {
        let mut value = teh();
        value["suggestions"][1]["kind"] = json!("Swap");
        assert_eq!(
            unpack_lint(&JsonLint(&value), &UnpackOptions::default()),
            Err(LintError::UnsupportedSuggestionKind("Swap".into()))
        );

        value["suggestions"][1]["kind"] = json!(9);
        assert_eq!(
            unpack_lint(&JsonLint(&value), &UnpackOptions::default()),
            Err(LintError::UnsupportedSuggestionKind("9".into()))
        );
    }

    #[test]
    fn replace_without_text_is_invalid() {
        let mut value = teh();
        value["suggestions"] = json!([{ "kind": "Replace" }]);
        assert_eq!(
            unpack_lint(&JsonLint(&value), &UnpackOptions::default()),
            Err(LintError::invalid("missing field `replacement_text`"))
        );
    }

    #[test]
    fn single_object_or_array() {
        let opts = UnpackOptions::default();
        assert_eq!(unpack_json(&teh(), &opts).unwrap().len(), 1);
        assert_eq!(unpack_json(&json!([teh(), teh()]), &opts).unwrap().len(), 2);
        assert_eq!(unpack_json(&json!([]), &opts).unwrap().len(), 0);
        assert_eq!(
            unpack_json(&json!("lint"), &opts),
            Err(LintError::invalid(
                "expected a lint object or an array of lints, found a string"
            ))
        );
    }

    #[test]
    fn standalone_edits() {
        let edits = edits_from_json(&json!([
            { "span": { "start": 0, "end": 3 },
              "suggestion": { "kind": "Replace", "replacementText": "The" } },
            { "span": { "start": 9, "end": 9 },
              "suggestion": { "kind": 2, "replacement_text": " now" } },
            { "span": { "start": 4, "end": 5 },
              "suggestion": { "kind": "Remove", "replacementText": "dropped" } }
        ]))
        .unwrap();
        assert_eq!(
            edits,
            vec![
                Edit::new(UnpackedSpan::new(0, 3), UnpackedSuggestion::replace("The")),
                Edit::new(UnpackedSpan::new(9, 9), UnpackedSuggestion::insert_after(" now")),
                Edit::new(UnpackedSpan::new(4, 5), UnpackedSuggestion::remove()),
            ]
        );
    }

    #[test]
    fn edit_errors() {
        assert_eq!(
            edit_from_json(&json!({ "span": { "start": 0, "end": 1 } })),
            Err(LintError::invalid("missing field `suggestion`"))
        );
        assert_eq!(
            suggestion_from_json(&json!({ "kind": "Swap" })),
            Err(LintError::UnsupportedSuggestionKind("Swap".into()))
        );
        assert!(edits_from_json(&json!({})).is_err());
    }

    #[test]
    fn non_object_lint_in_array() {
        let err = unpack_json(&json!([teh(), 42]), &UnpackOptions::default()).unwrap_err();
        assert_eq!(
            err,
            LintError::invalid("field `span` must be inside an object, found a number")
        );
    }
}
