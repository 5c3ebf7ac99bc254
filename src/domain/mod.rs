//! Core domain types for studyloop

mod badge;
mod content;
mod module;
mod streak;

pub use badge::{Badge, BadgeId};
pub use content::{
    ContentSummary, ContentType, ContentValidationResult, IssueType, Severity, ValidationIssue,
};
pub use module::{
    CodeExample, LessonModule, ModuleSummary, ModuleValidationResult, Section, SectionValidation,
};
pub use streak::UserStreakRecord;
