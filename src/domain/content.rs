use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared type of a piece of lesson content
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Html,
    Text,
    Code,
}

impl ContentType {
    /// Parse a content type (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "html" => Some(Self::Html),
            "text" => Some(Self::Text),
            "code" => Some(Self::Code),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Text => "text",
            Self::Code => "code",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueType {
    /// Markup or URI that can execute script when rendered
    XssPattern,
    /// The HTML sanitizer changed the input
    ContentSanitized,
    /// Dynamic-evaluation construct inside a code sample (advisory)
    CodeInjection,
    /// Validation itself failed
    ValidationError,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::XssPattern => "XSS_PATTERN",
            Self::ContentSanitized => "CONTENT_SANITIZED",
            Self::CodeInjection => "CODE_INJECTION",
            Self::ValidationError => "VALIDATION_ERROR",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity_level: Severity,
    pub detail: String,
}

impl ValidationIssue {
    pub fn new(issue_type: IssueType, severity_level: Severity, detail: impl Into<String>) -> Self {
        Self {
            issue_type,
            severity_level,
            detail: detail.into(),
        }
    }
}

/// Issue counts and input metadata for one validation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    pub total_issues: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Length of the input in characters
    pub input_length: usize,
    pub content_type: ContentType,
}

/// Outcome of validating a single content string.
///
/// Produced fresh by every call; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentValidationResult {
    pub is_valid: bool,
    pub sanitized_content: String,
    pub issues: Vec<ValidationIssue>,
    pub summary: ContentSummary,
}

impl ContentValidationResult {
    /// Start a result for `content`: valid, unchanged, no issues yet.
    pub fn new(content: &str, content_type: ContentType) -> Self {
        Self {
            is_valid: true,
            sanitized_content: content.to_string(),
            issues: Vec::new(),
            summary: ContentSummary {
                total_issues: 0,
                high: 0,
                medium: 0,
                low: 0,
                input_length: content.chars().count(),
                content_type,
            },
        }
    }

    pub fn push_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
        self.refresh_summary();
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity_level == severity)
            .count()
    }

    pub fn has_issue(&self, issue_type: IssueType) -> bool {
        self.issues.iter().any(|i| i.issue_type == issue_type)
    }

    fn refresh_summary(&mut self) {
        self.summary.total_issues = self.issues.len();
        self.summary.high = self.count(Severity::High);
        self.summary.medium = self.count(Severity::Medium);
        self.summary.low = self.count(Severity::Low);
    }
}
