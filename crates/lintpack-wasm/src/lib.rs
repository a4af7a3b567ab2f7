// WASM bindings for lintpack.
//
// Exposes a `Lintpack` class (holding unpack options) and a few free
// functions via wasm-bindgen. Plain objects coming from JavaScript are read
// into `serde_json::Value` first and then go through the same JSON adapter
// the other bindings use, so a missing field or an unknown suggestion kind
// produces the same error everywhere. Results are converted back to
// JavaScript values with serde-wasm-bindgen.
//
// Offsets are char (code point) offsets, not UTF-16 indices. Callers working
// with JS string indices must convert for text outside the BMP.
//
// Usage from JavaScript:
//
//   const lp = new Lintpack();
//   lp.setMaxSuggestions(3);
//   const lint = lp.unpackLint(engineLint);        // => { span, message, ... }
//   const lints = lp.unpackLints([a, b]);          // => [{ ... }, { ... }]
//   applySuggestion("Teh cat", { start: 0, end: 3 },
//                   { kind: "Replace", replacementText: "The" });  // => "The cat"
//   applySuggestions(text, [{ span, suggestion }, ...]);
//   appliedSpan(span, suggestion);                 // => { start, end }
//   getVersion();                                  // => "0.1.0"

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use lintpack_core::{
    Edit, JsonLint, LintError, UnpackOptions, UnpackedLint, UnpackedSpan, UnpackedSuggestion,
    applied_span, apply_suggestion, apply_suggestions, edits_from_json, span_from_json,
    suggestion_from_json, unpack_json, unpack_lint,
};

// ============================================================================
// Conversion helpers
// ============================================================================

fn lint_error_to_js(e: LintError) -> JsError {
    JsError::new(&e.to_string())
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

// ============================================================================
// Value-level operations (no JsValue, testable natively)
// ============================================================================

fn unpack_one(lint: &Value, options: &UnpackOptions) -> Result<UnpackedLint, LintError> {
    unpack_lint(&JsonLint(lint), options)
}

fn unpack_many(lints: &Value, options: &UnpackOptions) -> Result<Vec<UnpackedLint>, LintError> {
    match lints {
        Value::Array(_) => unpack_json(lints, options),
        _ => Err(LintError::invalid("unpackLints expects an array")),
    }
}

fn apply_one(text: &str, span: &Value, suggestion: &Value) -> Result<String, LintError> {
    let span = span_from_json(span)?;
    let suggestion = suggestion_from_json(suggestion)?;
    apply_suggestion(text, span, &suggestion)
}

fn apply_many(text: &str, edits: &Value) -> Result<String, LintError> {
    let edits: Vec<Edit> = edits_from_json(edits)?;
    apply_suggestions(text, &edits)
}

fn span_after(span: &Value, suggestion: &Value) -> Result<UnpackedSpan, LintError> {
    let span = span_from_json(span)?;
    let suggestion: UnpackedSuggestion = suggestion_from_json(suggestion)?;
    Ok(applied_span(span, &suggestion))
}

// ============================================================================
// Lintpack
// ============================================================================

/// Unpacks engine diagnostics into plain objects.
#[wasm_bindgen]
pub struct Lintpack {
    options: UnpackOptions,
}

impl Default for Lintpack {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Lintpack {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Lintpack {
        Lintpack {
            options: UnpackOptions::default(),
        }
    }

    /// Unpack a single diagnostic object.
    ///
    /// Returns `{ span, message, problemText, lintKind, lintKindPretty,
    /// suggestions }`.
    #[wasm_bindgen(js_name = "unpackLint")]
    pub fn unpack_lint(&self, lint: JsValue) -> Result<JsValue, JsError> {
        let lint: Value = from_js(lint)?;
        let unpacked = unpack_one(&lint, &self.options).map_err(lint_error_to_js)?;
        to_js(&unpacked)
    }

    /// Unpack an array of diagnostic objects. Fails on the first bad one.
    #[wasm_bindgen(js_name = "unpackLints")]
    pub fn unpack_lints(&self, lints: JsValue) -> Result<JsValue, JsError> {
        let lints: Value = from_js(lints)?;
        let unpacked = unpack_many(&lints, &self.options).map_err(lint_error_to_js)?;
        to_js(&unpacked)
    }

    /// Reject `Replace`/`InsertAfter` suggestions with empty text.
    #[wasm_bindgen(js_name = "setRequireReplacementText")]
    pub fn set_require_replacement_text(&mut self, value: bool) {
        self.options.set_require_replacement_text(value);
    }

    /// Keep at most `value` suggestions per lint. Pass `undefined` for no limit.
    #[wasm_bindgen(js_name = "setMaxSuggestions")]
    pub fn set_max_suggestions(&mut self, value: Option<usize>) {
        self.options.set_max_suggestions(value);
    }
}

// ============================================================================
// Free functions
// ============================================================================

/// Apply one suggestion to `text` and return the new text.
#[wasm_bindgen(js_name = "applySuggestion")]
pub fn apply_suggestion_js(
    text: &str,
    span: JsValue,
    suggestion: JsValue,
) -> Result<String, JsError> {
    let span: Value = from_js(span)?;
    let suggestion: Value = from_js(suggestion)?;
    apply_one(text, &span, &suggestion).map_err(lint_error_to_js)
}

/// Apply an array of `{ span, suggestion }` edits computed against `text`.
#[wasm_bindgen(js_name = "applySuggestions")]
pub fn apply_suggestions_js(text: &str, edits: JsValue) -> Result<String, JsError> {
    let edits: Value = from_js(edits)?;
    apply_many(text, &edits).map_err(lint_error_to_js)
}

/// Where the edited region ends up after applying `suggestion` at `span`.
#[wasm_bindgen(js_name = "appliedSpan")]
pub fn applied_span_js(span: JsValue, suggestion: JsValue) -> Result<JsValue, JsError> {
    let span: Value = from_js(span)?;
    let suggestion: Value = from_js(suggestion)?;
    let out = span_after(&span, &suggestion).map_err(lint_error_to_js)?;
    to_js(&out)
}

/// Get the library version string.
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    lintpack_core::version().to_string()
}
