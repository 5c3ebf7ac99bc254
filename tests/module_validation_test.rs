//! Integration tests for lesson module validation from disk

mod common;

use serde_json::json;
use tempfile::TempDir;

use studyloop::config::Config;
use studyloop::content::ContentSanitizer;
use studyloop::{ContentType, IssueType, Severity};

use common::write_module;

#[test]
fn test_clean_module_passes() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_module(
        &dir,
        "react-hooks",
        &json!({
            "id": "react-hooks",
            "title": "React Hooks",
            "sections": [
                {
                    "id": "use-state",
                    "title": "useState",
                    "content": "`useState` returns the current value and a setter.",
                    "codeExamples": [
                        { "language": "jsx", "code": "const [count, setCount] = useState(0);" }
                    ]
                },
                {
                    "id": "use-effect",
                    "content": "Effects run after render.",
                    "codeExamples": [
                        { "language": "jsx", "code": "useEffect(() => { document.title = `Clicked ${count}`; }, [count]);" }
                    ]
                }
            ]
        }),
    );

    let result = ContentSanitizer::default().validate_module_file(&path);

    assert!(result.overall_valid, "module should pass: {:?}", result);
    assert!(result.error.is_none());
    assert_eq!(result.summary.total_sections, 2);
    assert_eq!(result.summary.valid_sections, 2);
    // Template interpolation in the effect example is advisory only
    assert_eq!(result.summary.medium, 1);
    assert_eq!(result.summary.high, 0);
    assert_eq!(
        result.summary.content_types.iter().copied().collect::<Vec<_>>(),
        vec![ContentType::Text, ContentType::Code]
    );
}

#[test]
fn test_single_xss_section_fails_module() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_module(
        &dir,
        "flutter-widgets",
        &json!({
            "sections": [
                { "content": "Widgets are immutable." },
                { "content": "Click [here](javascript:fetch('/steal')) to continue." },
                { "content": "Use setState to rebuild." }
            ]
        }),
    );

    let result = ContentSanitizer::default().validate_module_file(&path);

    assert!(!result.overall_valid);
    assert_eq!(result.summary.total_sections, 3);
    assert_eq!(
        result.summary.valid_sections,
        result.summary.total_sections - 1
    );

    let bad = &result.sections[1];
    assert!(!bad.is_valid);
    let issue = &bad.content.as_ref().unwrap().issues[0];
    assert_eq!(issue.issue_type, IssueType::XssPattern);
    assert_eq!(issue.severity_level, Severity::High);
}

#[test]
fn test_missing_sections_reports_error_without_panicking() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_module(&dir, "empty", &json!({ "title": "Draft" }));

    let result = ContentSanitizer::default().validate_module_file(&path);

    assert!(!result.overall_valid);
    assert!(result.error.is_some());
    assert_eq!(result.summary.total_sections, 0);
}

#[test]
fn test_unreadable_file_reports_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let missing = dir.path().join("missing.json");

    let result = ContentSanitizer::default().validate_module_file(&missing);

    assert!(!result.overall_valid);
    assert!(result.error.unwrap().contains("missing.json"));
}

#[test]
fn test_module_file_is_not_modified() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let module = json!({
        "sections": [{ "content": "<script>alert(1)</script>" }]
    });
    let path = write_module(&dir, "xss", &module);
    let before = std::fs::read_to_string(&path).unwrap();

    let result = ContentSanitizer::default().validate_module_file(&path);

    assert!(!result.overall_valid);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_configured_allow_list_is_used() {
    let mut config = Config::default();
    config.sanitizer.allowed_tags = vec!["p".to_string()];
    let sanitizer = config.sanitizer.sanitizer();

    let result = sanitizer.validate("<p>Keep</p><strong>Drop tag</strong>", ContentType::Html);

    assert!(result.is_valid);
    assert_eq!(result.sanitized_content, "<p>Keep</p>Drop tag");
    assert!(result.has_issue(IssueType::ContentSanitized));
}

#[test]
fn test_result_serializes_with_wire_names() {
    let result = ContentSanitizer::default().validate("eval(x)", ContentType::Code);
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["isValid"], true);
    assert_eq!(value["sanitizedContent"], "eval(x)");
    assert_eq!(value["issues"][0]["type"], "CODE_INJECTION");
    assert_eq!(value["issues"][0]["severityLevel"], "MEDIUM");
    assert_eq!(value["summary"]["contentType"], "code");
}
