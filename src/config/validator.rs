//! Configuration validation rules.
//!
//! - `jobs` must be at least 1
//! - tool programs must be non-empty
//! - tool arguments may only use the placeholders their tool provides
//! - extension and manifest name must be non-empty plain names

use crate::config::schema::{NbreqsConfig, ToolConfig};
use crate::error::{NbreqsError, Result};
use crate::tools::template::{extract_variables, NOTEBOOK, OUTPUT_DIR, WORKSPACE};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
        }
    }
}

/// Validate a configuration and return all errors.
///
/// Collects every problem rather than stopping at the first one.
pub fn validate_config(config: &NbreqsConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.jobs == 0 {
        errors.push(ValidationError::new(
            "invalid-jobs",
            "'jobs' must be at least 1".to_string(),
        ));
    }

    if config.extension.trim().is_empty() {
        errors.push(ValidationError::new(
            "empty-extension",
            "'extension' must not be empty".to_string(),
        ));
    }

    let name = config.manifest_name.trim();
    if name.is_empty() || name.contains('/') || name.contains('\\') || name == "." || name == ".."
    {
        errors.push(ValidationError::new(
            "invalid-manifest-name",
            format!(
                "'manifest_name' must be a plain file name, got '{}'",
                config.manifest_name
            ),
        ));
    }

    errors.extend(validate_tool("converter", &config.converter, &[NOTEBOOK, OUTPUT_DIR]));
    errors.extend(validate_tool("scanner", &config.scanner, &[WORKSPACE]));

    errors
}

fn validate_tool(label: &str, tool: &ToolConfig, allowed: &[&str]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if tool.program.trim().is_empty() {
        errors.push(ValidationError::new(
            "empty-program",
            format!("'{}.program' must not be empty", label),
        ));
    }

    for arg in &tool.args {
        let mut unknown: Vec<_> = extract_variables(arg)
            .into_iter()
            .filter(|v| !allowed.contains(&v.as_str()))
            .collect();
        unknown.sort();
        for var in unknown {
            errors.push(ValidationError::new(
                "unknown-placeholder",
                format!(
                    "'{}.args' uses unknown placeholder '${{{}}}' (allowed: {})",
                    label,
                    var,
                    allowed
                        .iter()
                        .map(|a| format!("${{{}}}", a))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            ));
        }
    }

    errors
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &NbreqsConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(NbreqsError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
