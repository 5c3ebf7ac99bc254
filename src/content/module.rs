//! Module-level validation: every section body and code example

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use super::sanitizer::ContentSanitizer;
use crate::domain::{
    ContentType, ContentValidationResult, ModuleValidationResult, Section, SectionValidation,
    Severity,
};

impl ContentSanitizer {
    /// Validate a parsed module document.
    ///
    /// Read-only: the module is never modified. Structural problems are
    /// reported through `error` instead of being returned as an `Err`.
    pub fn validate_module(&self, module: &Value) -> ModuleValidationResult {
        let Some(sections) = module.get("sections") else {
            return ModuleValidationResult::structural_error(
                "Module is missing the `sections` field",
            );
        };
        let Some(sections) = sections.as_array() else {
            return ModuleValidationResult::structural_error("`sections` must be an array");
        };

        let validations = sections
            .iter()
            .enumerate()
            .map(|(index, raw)| match serde_json::from_value::<Section>(raw.clone()) {
                Ok(section) => self.validate_section(index, &section),
                Err(e) => malformed_section(index, raw, &e),
            })
            .collect();

        aggregate(validations)
    }

    /// Validate already-typed sections
    pub fn validate_sections(&self, sections: &[Section]) -> ModuleValidationResult {
        let validations = sections
            .iter()
            .enumerate()
            .map(|(index, section)| self.validate_section(index, section))
            .collect();
        aggregate(validations)
    }

    /// Validate a module from its JSON source text
    pub fn validate_module_str(&self, json: &str) -> ModuleValidationResult {
        match serde_json::from_str::<Value>(json) {
            Ok(module) => self.validate_module(&module),
            Err(e) => ModuleValidationResult::structural_error(format!("Invalid JSON: {}", e)),
        }
    }

    /// Validate a module file on disk
    pub fn validate_module_file(&self, path: &Path) -> ModuleValidationResult {
        self.validate_module_source(path, std::fs::read_to_string(path))
    }

    /// Validate the result of reading `path`, however it was read.
    ///
    /// A read failure becomes a structural error naming the file.
    pub fn validate_module_source(
        &self,
        path: &Path,
        source: std::io::Result<String>,
    ) -> ModuleValidationResult {
        match source {
            Ok(json) => {
                debug!(path = %path.display(), "Validating module");
                self.validate_module_str(&json)
            }
            Err(e) => ModuleValidationResult::structural_error(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )),
        }
    }

    /// A section is valid only if its body and every code example are valid
    fn validate_section(&self, index: usize, section: &Section) -> SectionValidation {
        let content = self.validate(&section.content, ContentType::Text);
        let code_examples: Vec<ContentValidationResult> = section
            .code_examples
            .iter()
            .map(|example| self.validate(&example.code, ContentType::Code))
            .collect();

        let is_valid = content.is_valid && code_examples.iter().all(|r| r.is_valid);
        debug!(index, valid = is_valid, "Validated section");

        SectionValidation {
            index,
            id: section.id.clone(),
            title: section.title.clone(),
            is_valid,
            content: Some(content),
            code_examples,
            error: None,
        }
    }
}

fn malformed_section(index: usize, raw: &Value, err: &serde_json::Error) -> SectionValidation {
    let field = |name: &str| raw.get(name).and_then(Value::as_str).map(str::to_string);
    SectionValidation {
        index,
        id: field("id"),
        title: field("title"),
        is_valid: false,
        content: None,
        code_examples: Vec::new(),
        error: Some(format!("Section {} does not match the section schema: {}", index, err)),
    }
}

fn aggregate(sections: Vec<SectionValidation>) -> ModuleValidationResult {
    let mut result = ModuleValidationResult {
        overall_valid: true,
        ..Default::default()
    };

    for section in &sections {
        let summary = &mut result.summary;
        summary.total_sections += 1;
        if section.is_valid {
            summary.valid_sections += 1;
        } else {
            result.overall_valid = false;
        }

        for validation in section.content.iter().chain(section.code_examples.iter()) {
            summary.content_types.insert(validation.summary.content_type);
            summary.total_issues += validation.issues.len();
            summary.high += validation.count(Severity::High);
            summary.medium += validation.count(Severity::Medium);
            summary.low += validation.count(Severity::Low);
        }
    }

    info!(
        sections = result.summary.total_sections,
        valid = result.summary.valid_sections,
        issues = result.summary.total_issues,
        "Module validation complete"
    );

    result.sections = sections;
    result
}
