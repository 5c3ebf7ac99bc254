//! Check command implementation

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tokio::io::AsyncReadExt;

use studyloop::config::Config;
use studyloop::ContentType;

/// Validate one piece of content read from `file` or stdin.
///
/// Returns the content's validity.
pub async fn check_command(
    config: &Config,
    content_type: &str,
    file: Option<PathBuf>,
    json: bool,
) -> Result<bool> {
    let Some(content_type) = ContentType::from_str(content_type) else {
        bail!("Unknown content type: {} (expected html, text, or code)", content_type);
    };

    let content = match &file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read stdin")?;
            buf
        }
    };

    let result = config.sanitizer.sanitizer().validate(&content, content_type);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(result.is_valid);
    }

    println!(
        "{} ({}, {} characters, {} issue(s): {} high, {} medium, {} low)",
        if result.is_valid { "VALID" } else { "INVALID" },
        result.summary.content_type,
        result.summary.input_length,
        result.summary.total_issues,
        result.summary.high,
        result.summary.medium,
        result.summary.low
    );

    for issue in &result.issues {
        println!("  {} {} {}", issue.severity_level, issue.issue_type, issue.detail);
    }

    if content_type == ContentType::Html && result.sanitized_content != content {
        println!("\nSanitized:\n{}", result.sanitized_content);
    }

    Ok(result.is_valid)
}
