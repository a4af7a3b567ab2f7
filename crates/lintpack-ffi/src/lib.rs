// FFI functions are inherently unsafe: callers must ensure pointer validity.
// Safety contracts are documented per-function in the public API comments.
#![allow(clippy::missing_safety_doc)]

// lintpack-ffi: C-compatible FFI layer for lintpack.
//
// This crate exposes a stable C ABI that can be consumed by any language
// with C FFI support (Python/ctypes, C#/P-Invoke, etc.).
//
// Memory management rules:
// - Returned strings: caller must free with `lintpack_free_str`.
// - Error strings written through `error_out`: caller frees with `lintpack_free_str`.
// - All input strings are UTF-8 encoded, null-terminated C strings.
// - Structured data (lints, edits) crosses the boundary as JSON text.
// - A result containing a NUL byte is an error, never a truncated string.
//
// Suggestion kind codes: 0 = Remove, 1 = Replace, 2 = InsertAfter.
// Offsets are char (Unicode scalar value) offsets, not byte offsets.

use std::ffi::{CStr, CString, c_char, c_int};
use std::ptr;

use lintpack_core::{
    LintError, SuggestionKind, UnpackOptions, UnpackedSpan, UnpackedSuggestion, apply_suggestion,
    apply_suggestions, pick_edits, unpack_json,
};
use serde_json::Value;

// ── Suggestion application ─────────────────────────────────────

/// Apply one suggestion to `text`.
///
/// - `start`, `end`: char offsets of the span
/// - `kind`: suggestion kind code
/// - `replacement`: text to insert; ignored (and may be NULL) for Remove
///
/// Returns a heap-allocated C string with the edited text, or NULL on error.
/// On error, if `error_out` is non-NULL, it receives a heap-allocated error
/// message that the caller must free with `lintpack_free_str`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lintpack_apply_suggestion(
    text: *const c_char,
    start: usize,
    end: usize,
    kind: c_int,
    replacement: *const c_char,
    error_out: *mut *mut c_char,
) -> *mut c_char {
    let Some(text) = cstr_to_str(text) else {
        set_error(error_out, "text is null or not valid UTF-8");
        return ptr::null_mut();
    };

    let result = SuggestionKind::from_code(kind.into()).and_then(|kind| {
        let replacement = if kind.takes_text() {
            cstr_to_str(replacement).ok_or_else(|| {
                LintError::invalid("replacement is null or not valid UTF-8")
            })?
        } else {
            ""
        };
        let suggestion = UnpackedSuggestion::new(kind, replacement);
        apply_suggestion(text, UnpackedSpan::new(start, end), &suggestion)
    });

    finish(result, error_out)
}

// ── Unpacking ───────────────────────────────────────────────────

/// Unpack a JSON lint object, or an array of them, into normalized lint JSON.
///
/// - `strict`: non-zero rejects Replace/InsertAfter suggestions without text
///
/// Returns a heap-allocated JSON array (camelCase fields) or NULL on error.
/// Caller must free with `lintpack_free_str`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lintpack_unpack_lint_json(
    lints_json: *const c_char,
    strict: c_int,
    error_out: *mut *mut c_char,
) -> *mut c_char {
    let options = options_from_flag(strict);
    let result = parse_json(lints_json, "lints_json")
        .and_then(|value| unpack_json(&value, &options))
        .and_then(|lints| {
            serde_json::to_string(&lints).map_err(|e| LintError::invalid(e.to_string()))
        });

    finish(result, error_out)
}

/// Apply suggestion number `pick` (0 = preferred) of every lint in
/// `lints_json` to `text` in one batch.
///
/// Lints with fewer than `pick + 1` suggestions are left alone. Overlapping
/// edits fail the whole call.
///
/// Returns a heap-allocated C string with the edited text, or NULL on error.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lintpack_apply_lints_json(
    text: *const c_char,
    lints_json: *const c_char,
    pick: usize,
    error_out: *mut *mut c_char,
) -> *mut c_char {
    let Some(text) = cstr_to_str(text) else {
        set_error(error_out, "text is null or not valid UTF-8");
        return ptr::null_mut();
    };

    let result = parse_json(lints_json, "lints_json")
        .and_then(|value| unpack_json(&value, &UnpackOptions::default()))
        .and_then(|lints| apply_suggestions(text, &pick_edits(&lints, pick)));

    finish(result, error_out)
}

// ── Utility functions ───────────────────────────────────────────

/// Return the library version string.
///
/// The returned pointer is valid for the lifetime of the library (static).
/// Do NOT free this pointer.
#[unsafe(no_mangle)]
pub extern "C" fn lintpack_version() -> *const c_char {
    static VERSION: std::sync::LazyLock<CString> =
        std::sync::LazyLock::new(|| CString::new(lintpack_core::version()).unwrap_or_default());
    VERSION.as_ptr()
}

/// Free a heap-allocated C string returned by lintpack functions.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lintpack_free_str(s: *mut c_char) {
    free_c_str(s);
}

// ── Internal helpers ────────────────────────────────────────────

fn options_from_flag(strict: c_int) -> UnpackOptions {
    if strict != 0 {
        UnpackOptions::strict()
    } else {
        UnpackOptions::default()
    }
}

fn parse_json(s: *const c_char, name: &str) -> Result<Value, LintError> {
    let s = cstr_to_str(s)
        .ok_or_else(|| LintError::invalid(format!("{name} is null or not valid UTF-8")))?;
    serde_json::from_str(s)
        .map_err(|e| LintError::invalid(format!("{name} is not valid JSON: {e}")))
}

fn finish(result: Result<String, LintError>, error_out: *mut *mut c_char) -> *mut c_char {
    let result = result.and_then(|s| {
        CString::new(s).map_err(|_| LintError::invalid("result contains a NUL byte"))
    });
    match result {
        Ok(s) => s.into_raw(),
        Err(e) => {
            set_error(error_out, &e.to_string());
            ptr::null_mut()
        }
    }
}

fn cstr_to_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

fn set_error(out: *mut *mut c_char, msg: &str) {
    if out.is_null() {
        return;
    }
    // Messages may quote input text, which can carry NULs.
    let msg = CString::new(msg.replace('\0', "\\0")).unwrap_or_default();
    unsafe {
        *out = msg.into_raw();
    }
}

fn free_c_str(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}
