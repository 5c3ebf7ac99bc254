//! Fixed detection signatures, compiled once

use once_cell::sync::Lazy;
use regex::Regex;

/// A named regex signature
pub struct Signature {
    pub name: &'static str,
    pub regex: Regex,
}

impl Signature {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).unwrap(),
        }
    }

    pub fn is_match(&self, content: &str) -> bool {
        self.regex.is_match(content)
    }
}

/// High-severity markup checked against raw HTML input
pub static HTML_SIGNATURES: Lazy<Vec<Signature>> = Lazy::new(|| {
    vec![
        Signature::new("script tag", r"(?i)<\s*script\b"),
        Signature::new("javascript: URI", r"(?i)javascript\s*:"),
        Signature::new("inline event handler", r"(?i)\bon\w+\s*="),
        Signature::new("embedded frame or object tag", r"(?i)<\s*(?:iframe|object|embed)\b"),
        Signature::new("form control tag", r"(?i)<\s*(?:form|input)\b"),
        Signature::new("meta or link tag", r"(?i)<\s*(?:meta|link)\b"),
    ]
});

/// XSS vectors that survive markdown rendering of plain text
pub static TEXT_SIGNATURES: Lazy<Vec<Signature>> = Lazy::new(|| {
    vec![
        Signature::new(
            "javascript: markdown link",
            r"(?i)\[[^\]]*\]\(\s*javascript\s*:[^)]*\)",
        ),
        Signature::new(
            "javascript: link reference",
            r"(?im)^\s*\[[^\]]+\]:\s*javascript\s*:",
        ),
        Signature::new("script tag", r"(?i)<\s*script\b"),
        Signature::new("embedded frame or object tag", r"(?i)<\s*(?:iframe|object|embed)\b"),
    ]
});

/// Dynamic-evaluation constructs in code samples
pub static CODE_SIGNATURES: Lazy<Vec<Signature>> = Lazy::new(|| {
    vec![
        Signature::new("template interpolation", r"\$\{[^}]*\}"),
        Signature::new("eval call", r"\beval\s*\("),
        Signature::new("Function constructor", r"\bFunction\s*\("),
        Signature::new(
            "timer with string argument",
            r#"\bset(?:Timeout|Interval)\s*\(\s*["'`]"#,
        ),
    ]
});

/// Names of the signatures in `signatures` that match `content`, in order
pub fn matching<'a>(signatures: &'a [Signature], content: &str) -> Vec<&'a str> {
    signatures
        .iter()
        .filter(|s| s.is_match(content))
        .map(|s| s.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_signatures() {
        assert_eq!(matching(&HTML_SIGNATURES, "<SCRIPT>x</SCRIPT>"), vec!["script tag"]);
        assert_eq!(
            matching(&HTML_SIGNATURES, r#"<a href="javascript:alert(1)">x</a>"#),
            vec!["javascript: URI"]
        );
        assert_eq!(
            matching(&HTML_SIGNATURES, r#"<img src=x onerror="alert(1)">"#),
            vec!["inline event handler"]
        );
        assert_eq!(
            matching(&HTML_SIGNATURES, "<iframe src=x></iframe><input>"),
            vec!["embedded frame or object tag", "form control tag"]
        );
        for tag in ["<object data=x>", "<EMBED src=x>"] {
            assert_eq!(
                matching(&HTML_SIGNATURES, tag),
                vec!["embedded frame or object tag"]
            );
        }
        assert_eq!(
            matching(&HTML_SIGNATURES, r#"<form action="/login">"#),
            vec!["form control tag"]
        );
        for tag in [r#"<meta http-equiv="refresh">"#, r#"<link rel="stylesheet" href="x.css">"#] {
            assert_eq!(matching(&HTML_SIGNATURES, tag), vec!["meta or link tag"]);
        }
        assert!(matching(&HTML_SIGNATURES, "<p>Hello <strong>world</strong></p>").is_empty());
    }

    #[test]
    fn test_text_signatures() {
        assert_eq!(
            matching(&TEXT_SIGNATURES, "[click me](javascript:alert(1))"),
            vec!["javascript: markdown link"]
        );
        assert_eq!(
            matching(&TEXT_SIGNATURES, "Read [the docs][x].\n\n[x]: javascript:alert(1)"),
            vec!["javascript: link reference"]
        );
        for tag in ["<iframe src=x>", "<object data=x>", "<embed src=x>"] {
            assert_eq!(
                matching(&TEXT_SIGNATURES, tag),
                vec!["embedded frame or object tag"]
            );
        }
        assert!(matching(&TEXT_SIGNATURES, "[docs](https://example.com)").is_empty());
        assert!(matching(&TEXT_SIGNATURES, "[docs]: https://example.com").is_empty());
        assert!(matching(&TEXT_SIGNATURES, "Use the <Button> component").is_empty());
    }

    #[test]
    fn test_code_signatures() {
        assert_eq!(matching(&CODE_SIGNATURES, "eval(userInput)"), vec!["eval call"]);
        assert_eq!(
            matching(&CODE_SIGNATURES, "const msg = `Hello ${name}`;"),
            vec!["template interpolation"]
        );
        assert_eq!(
            matching(&CODE_SIGNATURES, "setTimeout('tick()', 100)"),
            vec!["timer with string argument"]
        );
        assert_eq!(
            matching(&CODE_SIGNATURES, r#"setInterval("poll()", 500)"#),
            vec!["timer with string argument"]
        );
        assert_eq!(
            matching(&CODE_SIGNATURES, "const f = new Function('a', 'return a');"),
            vec!["Function constructor"]
        );
        assert!(matching(&CODE_SIGNATURES, "setTimeout(tick, 100)").is_empty());
        assert!(matching(&CODE_SIGNATURES, "fun evaluate(x: Int) = x").is_empty());
    }
}
