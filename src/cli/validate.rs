//! Validate command implementation

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use futures::future::join_all;
use serde::Serialize;
use tracing::warn;

use studyloop::config::Config;
use studyloop::{ModuleValidationResult, SectionValidation};

#[derive(Serialize)]
struct FileReport<'a> {
    path: &'a Path,
    result: &'a ModuleValidationResult,
}

/// Validate every module file matched by `patterns`.
///
/// A pattern that matches no file is reported as a failed module.
/// Returns false if any module is invalid.
pub async fn validate_command(config: &Config, patterns: &[String], json: bool) -> Result<bool> {
    let expanded = expand_patterns(patterns)?;
    if expanded.files.is_empty() && expanded.unmatched.is_empty() {
        bail!("No module patterns given");
    }

    let sanitizer = config.sanitizer.sanitizer();
    let sources = join_all(
        expanded
            .files
            .iter()
            .map(|path| tokio::fs::read_to_string(path)),
    )
    .await;

    let mut checked: Vec<(PathBuf, ModuleValidationResult)> = expanded
        .unmatched
        .into_iter()
        .map(|pattern| {
            warn!(pattern = %pattern, "Pattern matched no module files");
            let result = ModuleValidationResult::structural_error(format!(
                "No module files matched: {}",
                pattern
            ));
            (PathBuf::from(pattern), result)
        })
        .collect();

    checked.extend(expanded.files.into_iter().zip(sources).map(|(path, source)| {
        let result = sanitizer.validate_module_source(&path, source);
        (path, result)
    }));
    checked.sort_by(|a, b| a.0.cmp(&b.0));

    let all_valid = checked.iter().all(|(_, r)| r.overall_valid);

    if json {
        let reports: Vec<FileReport> = checked
            .iter()
            .map(|(path, result)| FileReport { path, result })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(all_valid);
    }

    for (path, result) in &checked {
        print_module(path, result);
    }

    let failed = checked.iter().filter(|(_, r)| !r.overall_valid).count();
    println!(
        "\n{} module(s) checked, {} passed, {} failed",
        checked.len(),
        checked.len() - failed,
        failed
    );

    Ok(all_valid)
}

/// Files matched by the command-line patterns
struct Expanded {
    files: Vec<PathBuf>,
    /// Patterns that matched no file
    unmatched: Vec<String>,
}

/// Expand files, directories (all `*.json` below them), and glob patterns
fn expand_patterns(patterns: &[String]) -> Result<Expanded> {
    let mut files = Vec::new();
    let mut unmatched = Vec::new();

    for pattern in patterns {
        let pattern = if Path::new(pattern).is_dir() {
            format!("{}/**/*.json", pattern.trim_end_matches('/'))
        } else {
            pattern.clone()
        };

        let entries =
            glob::glob(&pattern).with_context(|| format!("Invalid pattern: {}", pattern))?;
        let before = files.len();
        for entry in entries {
            let path = entry.with_context(|| format!("Failed to read match for {}", pattern))?;
            if path.is_file() {
                files.push(path);
            }
        }

        if files.len() == before {
            unmatched.push(pattern);
        }
    }

    files.sort();
    files.dedup();
    Ok(Expanded { files, unmatched })
}

fn print_module(path: &Path, result: &ModuleValidationResult) {
    let status = if result.overall_valid { "PASS" } else { "FAIL" };

    if let Some(error) = &result.error {
        println!("{} {}: {}", status, path.display(), error);
        return;
    }

    println!(
        "{} {} ({}/{} sections valid, {} issue(s))",
        status,
        path.display(),
        result.summary.valid_sections,
        result.summary.total_sections,
        result.summary.total_issues
    );

    for section in &result.sections {
        print_section(section);
    }
}

fn print_section(section: &SectionValidation) {
    let label = section
        .id
        .as_deref()
        .or(section.title.as_deref())
        .map(|name| format!("section {} ({})", section.index, name))
        .unwrap_or_else(|| format!("section {}", section.index));

    if let Some(error) = &section.error {
        println!("    {}: {}", label, error);
        return;
    }

    let content_issues = section.content.iter().flat_map(|r| r.issues.iter());
    for issue in content_issues {
        println!(
            "    {}: {} {} {}",
            label, issue.severity_level, issue.issue_type, issue.detail
        );
    }

    for (i, example) in section.code_examples.iter().enumerate() {
        for issue in &example.issues {
            println!(
                "    {} code example {}: {} {} {}",
                label, i, issue.severity_level, issue.issue_type, issue.detail
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &Path, name: &str, content: &serde_json::Value) -> String {
        let path = dir.join(name);
        std::fs::write(&path, content.to_string()).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_missing_file_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(
            dir.path(),
            "good.json",
            &json!({ "sections": [{ "content": "Plain text" }] }),
        );
        let typo = dir.path().join("typo.json").to_string_lossy().into_owned();

        let ok = validate_command(&Config::default(), &[good.clone()], false)
            .await
            .unwrap();
        assert!(ok);

        let ok = validate_command(&Config::default(), &[good, typo], false)
            .await
            .unwrap();
        assert!(!ok);
    }

    #[tokio::test]
    async fn test_empty_glob_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.json", dir.path().display());

        let ok = validate_command(&Config::default(), &[pattern], false)
            .await
            .unwrap();
        assert!(!ok);
    }

    #[test]
    fn test_expand_reports_unmatched_patterns() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(dir.path(), "a.json", &json!({ "sections": [] }));
        let missing = dir.path().join("b.json").to_string_lossy().into_owned();

        let expanded = expand_patterns(&[good.clone(), missing.clone()]).unwrap();

        assert_eq!(expanded.files, vec![PathBuf::from(good)]);
        assert_eq!(expanded.unmatched, vec![missing]);
    }

    #[test]
    fn test_directory_expands_to_json_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        write(dir.path(), "a.json", &json!({ "sections": [] }));
        write(&dir.path().join("nested"), "b.json", &json!({ "sections": [] }));
        std::fs::write(dir.path().join("notes.txt"), "skip").unwrap();

        let expanded =
            expand_patterns(&[dir.path().to_string_lossy().into_owned()]).unwrap();

        assert_eq!(expanded.files.len(), 2);
        assert!(expanded.unmatched.is_empty());
    }
}
