//! Plain-data adapter for linter diagnostics.
//!
//! A checking engine reports problems as its own diagnostic objects. This
//! crate copies them into serializable records ([`UnpackedLint`]) and applies
//! the suggestions those records carry to a text buffer.
//!
//! # Architecture
//!
//! - [`span`] -- Half-open char-offset interval
//! - [`suggestion`] -- Closed set of suggestion kinds and the suggestion record
//! - [`lint`] -- The flattened diagnostic record
//! - [`source`] -- Capability traits an engine implements
//! - [`unpack`] -- Engine diagnostic to [`UnpackedLint`]
//! - [`apply`] -- Splice suggestions into text, singly or in batches
//! - [`json`] -- Capability traits over untyped JSON diagnostics
//! - [`options`] -- Unpacking configuration
//! - [`error`] -- [`LintError`]
//!
//! Offsets are counted in `char`s everywhere.

pub mod apply;
pub mod error;
pub mod json;
pub mod lint;
pub mod options;
pub mod source;
pub mod span;
pub mod suggestion;
pub mod unpack;

pub use apply::{
    Edit, applied_span, apply_suggestion, apply_suggestion_to_chars, apply_suggestions,
    inverse_edit, pick_edits,
};
pub use error::LintError;
pub use json::{
    JsonLint, JsonSuggestion, edit_from_json, edits_from_json, span_from_json, suggestion_from_json,
    unpack_json,
};
pub use lint::UnpackedLint;
pub use options::UnpackOptions;
pub use source::{LintSource, SuggestionSource};
pub use span::UnpackedSpan;
pub use suggestion::{SuggestionKind, UnpackedSuggestion};
pub use unpack::{unpack_lint, unpack_lints};

/// Library version, as reported by the bindings.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
