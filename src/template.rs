use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::metadata::Metadata;

pub const DEFAULT_TEMPLATE: &str = "%(id)s.%(ext)s";

const MISSING_FIELD: &str = "NA";

static FIELD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%\(([A-Za-z0-9_]+)\)s").unwrap());

/// Filename pattern with `%(field)s` placeholders filled from metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTemplate {
    pattern: String,
}

impl OutputTemplate {
    pub fn new(pattern: impl Into<String>) -> Self {
        OutputTemplate {
            pattern: pattern.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn render(&self, metadata: &Metadata) -> String {
        FIELD_REGEX
            .replace_all(&self.pattern, |caps: &Captures| {
                let value = match metadata.get(&caps[1]) {
                    None | Some(Value::Null) => MISSING_FIELD.to_string(),
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                };
                sanitize(&value)
            })
            .to_string()
    }
}

impl Default for OutputTemplate {
    fn default() -> Self {
        OutputTemplate::new(DEFAULT_TEMPLATE)
    }
}

// values must not escape the output directory
fn sanitize(value: &str) -> String {
    value.replace(['/', '\\'], "_")
}
