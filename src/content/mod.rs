//! Lesson content validation
//!
//! `ContentSanitizer::validate` checks one string by declared type
//! (`html`, `text`, `code`); `validate_module` runs it over every section
//! body and code example of a lesson module as a pre-publication gate.

mod module;
mod patterns;
mod sanitizer;

pub use sanitizer::{ContentSanitizer, CLEAN_CONTENT_TAGS, DEFAULT_ALLOWED_TAGS};
