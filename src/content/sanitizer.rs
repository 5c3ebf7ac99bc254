//! Content validation and HTML sanitization

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use super::patterns::{matching, Signature, CODE_SIGNATURES, HTML_SIGNATURES, TEXT_SIGNATURES};
use crate::domain::{ContentType, ContentValidationResult, IssueType, Severity, ValidationIssue};

/// Tags that survive HTML sanitization when no allow-list is configured
pub const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "p", "br", "strong", "em", "code", "pre", "ul", "ol", "li", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Tags removed together with everything inside them. These can never be
/// on the allow-list.
pub const CLEAN_CONTENT_TAGS: &[&str] = &["script", "style"];

/// Validates and cleans lesson content before it is rendered or stored.
///
/// Detection and sanitization are independent: HTML input is both cleaned
/// against the allow-list and scanned in its original form, so a payload
/// the sanitizer neutralized is still reported.
#[derive(Debug, Clone)]
pub struct ContentSanitizer {
    allowed_tags: HashSet<String>,
}

impl Default for ContentSanitizer {
    fn default() -> Self {
        Self::with_allowed_tags(DEFAULT_ALLOWED_TAGS.iter().copied())
    }
}

impl ContentSanitizer {
    /// Sanitizer keeping only `tags` (no attributes are ever kept)
    pub fn with_allowed_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_tags: tags
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn allowed_tags(&self) -> impl Iterator<Item = &str> {
        self.allowed_tags.iter().map(String::as_str)
    }

    /// Validate `content` according to its declared type.
    ///
    /// Never fails: an internal fault becomes a HIGH `VALIDATION_ERROR`
    /// issue on an invalid result.
    pub fn validate(&self, content: &str, content_type: ContentType) -> ContentValidationResult {
        let mut result = ContentValidationResult::new(content, content_type);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| match content_type {
            ContentType::Html => self.check_html(content, &mut result),
            ContentType::Text => check_blocking(&TEXT_SIGNATURES, content, &mut result),
            ContentType::Code => check_advisory(&CODE_SIGNATURES, content, &mut result),
        }));

        if let Err(payload) = outcome {
            let reason = panic_message(payload.as_ref());
            warn!(content_type = %content_type, "Content validation failed: {}", reason);
            result.is_valid = false;
            result.push_issue(ValidationIssue::new(
                IssueType::ValidationError,
                Severity::High,
                format!("Validation failed: {}", reason),
            ));
        }

        debug!(
            content_type = %content_type,
            valid = result.is_valid,
            issues = result.issues.len(),
            "Validated content"
        );
        result
    }

    /// Clean `html` against the allow-list
    pub fn sanitize_html(&self, html: &str) -> String {
        let tags: HashSet<&str> = self.allowed_tags.iter().map(String::as_str).collect();
        let clean_content: HashSet<&str> = CLEAN_CONTENT_TAGS.iter().copied().collect();

        ammonia::Builder::empty()
            .tags(tags)
            .clean_content_tags(clean_content)
            .generic_attributes(HashSet::new())
            .url_schemes(HashSet::new())
            .link_rel(None)
            .strip_comments(true)
            .clean(html)
            .to_string()
    }

    fn check_html(&self, content: &str, result: &mut ContentValidationResult) {
        result.sanitized_content = self.sanitize_html(content);

        check_blocking(&HTML_SIGNATURES, content, result);

        if result.sanitized_content != content {
            result.push_issue(ValidationIssue::new(
                IssueType::ContentSanitized,
                Severity::Medium,
                "Content was modified during sanitization",
            ));
        }
    }
}

/// Any match is a HIGH XSS finding and invalidates the content
fn check_blocking(signatures: &[Signature], content: &str, result: &mut ContentValidationResult) {
    for name in matching(signatures, content) {
        result.is_valid = false;
        result.push_issue(ValidationIssue::new(
            IssueType::XssPattern,
            Severity::High,
            format!("Potential XSS pattern detected: {}", name),
        ));
    }
}

/// Matches are recorded but never invalidate: code samples teach these constructs
fn check_advisory(signatures: &[Signature], content: &str, result: &mut ContentValidationResult) {
    for name in matching(signatures, content) {
        result.push_issue(ValidationIssue::new(
            IssueType::CodeInjection,
            Severity::Medium,
            format!("Potential code injection pattern: {}", name),
        ));
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown internal error".to_string()
    }
}
