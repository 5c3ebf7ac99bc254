use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::content::{ContentType, ContentValidationResult};

/// A lesson module as stored in a content file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonModule {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub sections: Vec<Section>,
}

/// One section of a lesson module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub code_examples: Vec<CodeExample>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeExample {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub code: String,
}

/// Validation outcome for one section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionValidation {
    pub index: usize,
    pub id: Option<String>,
    pub title: Option<String>,
    pub is_valid: bool,
    /// Result for the section body (validated as text)
    pub content: Option<ContentValidationResult>,
    pub code_examples: Vec<ContentValidationResult>,
    /// Set when the section does not match the expected schema
    pub error: Option<String>,
}

impl SectionValidation {
    pub fn issue_count(&self) -> usize {
        self.content
            .iter()
            .chain(self.code_examples.iter())
            .map(|r| r.issues.len())
            .sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    pub total_sections: usize,
    pub valid_sections: usize,
    pub total_issues: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub content_types: BTreeSet<ContentType>,
}

/// Aggregated validation outcome for a whole module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleValidationResult {
    pub overall_valid: bool,
    pub sections: Vec<SectionValidation>,
    pub summary: ModuleSummary,
    /// Structural problem that prevented section validation
    pub error: Option<String>,
}

impl ModuleValidationResult {
    /// Result for a module that could not be read as a module at all
    pub fn structural_error(message: impl Into<String>) -> Self {
        Self {
            overall_valid: false,
            error: Some(message.into()),
            ..Default::default()
        }
    }
}
