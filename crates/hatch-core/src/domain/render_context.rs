use std::collections::BTreeMap;

use super::AppMetadata;

/// Context for template rendering.
///
/// A **Value Object** containing all data needed to render a parameterized
/// template. Immutable after creation; `with_variable` returns a new instance.
///
/// ## Built-in Variables
///
/// | Variable | Example |
/// |----------|---------|
/// | `APP_NAME` | "HealthTracker 2025" |
/// | `APP_NAME_KEBAB` | "healthtracker-2025" |
/// | `APP_NAME_HYPHEN` | "HealthTracker-2025" |
/// | `APP_VERSION` | "1.0.0" |
/// | `APP_DESCRIPTION` | free text |
/// | `APP_AUTHOR` | "HealthTracker Team" |
/// | `IS_ELECTRON` | "true" |
/// | `BUILD_TIMESTAMP` | "2026-10-19T08:30:00.000Z" |
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn from_metadata(meta: &AppMetadata) -> Self {
        let mut vars = BTreeMap::new();

        vars.insert("APP_NAME".to_string(), meta.name().to_string());
        vars.insert("APP_NAME_KEBAB".to_string(), to_kebab_case(meta.name()));
        vars.insert("APP_NAME_HYPHEN".to_string(), hyphenate(meta.name()));
        vars.insert("APP_VERSION".to_string(), meta.version().to_string());
        vars.insert("APP_DESCRIPTION".to_string(), meta.description().to_string());
        vars.insert("APP_AUTHOR".to_string(), meta.author().to_string());
        vars.insert("IS_ELECTRON".to_string(), meta.is_electron_host().to_string());
        vars.insert("BUILD_TIMESTAMP".to_string(), meta.build_timestamp_iso());

        Self { variables: vars }
    }

    /// Add a custom variable, consuming self and returning a new context.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|s| s.as_str())
    }

    /// Render a template string by replacing `{{VARIABLE}}` placeholders.
    ///
    /// Single left-to-right pass: substituted values are never rescanned, so
    /// a value that itself contains `{{...}}` is emitted verbatim.
    ///
    /// - `{{UNKNOWN}}` stays as literal `{{UNKNOWN}}`
    /// - an unterminated `{{` is copied through unchanged
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];

            match after_open.find("}}") {
                Some(end) => {
                    let key = &after_open[..end];
                    match self.variables.get(key.trim()) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push_str("{{");
                            out.push_str(key);
                            out.push_str("}}");
                        }
                    }
                    rest = &after_open[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// "HealthTracker 2025" -> "healthtracker-2025"
fn to_kebab_case(s: &str) -> String {
    hyphenate(s).to_lowercase()
}

/// "HealthTracker 2025" -> "HealthTracker-2025"
fn hyphenate(s: &str) -> String {
    s.split(|c: char| c.is_whitespace() || c == '_')
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
