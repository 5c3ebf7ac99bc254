use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::content::{ContentSanitizer, CLEAN_CONTENT_TAGS, DEFAULT_ALLOWED_TAGS};

/// HTML sanitizer settings (`[sanitizer]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizerSettings {
    /// Tags kept by HTML sanitization. Attributes are always removed.
    #[serde(default = "default_allowed_tags")]
    pub allowed_tags: Vec<String>,
}

fn default_allowed_tags() -> Vec<String> {
    DEFAULT_ALLOWED_TAGS.iter().map(|t| t.to_string()).collect()
}

impl Default for SanitizerSettings {
    fn default() -> Self {
        Self {
            allowed_tags: default_allowed_tags(),
        }
    }
}

impl SanitizerSettings {
    /// Reject allow-lists naming a tag whose content is always stripped
    pub fn validate(&self) -> Result<()> {
        for tag in &self.allowed_tags {
            let tag = tag.trim().to_lowercase();
            if CLEAN_CONTENT_TAGS.contains(&tag.as_str()) {
                bail!(
                    "sanitizer.allowed_tags cannot contain `{}`: it is always removed with its content",
                    tag
                );
            }
        }
        Ok(())
    }

    pub fn sanitizer(&self) -> ContentSanitizer {
        ContentSanitizer::with_allowed_tags(&self.allowed_tags)
    }
}
