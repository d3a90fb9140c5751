//! Argument templates for external tools.
//!
//! Tool arguments use `${variable}` placeholders which are substituted
//! per invocation. Values are OS strings, so a path that is not valid
//! UTF-8 reaches the tool unchanged.
//!
//! # Syntax
//!
//! - `${variable_name}` - replaced with variable value
//! - `$$` - produces a literal `$`
//!
//! # Example
//!
//! ```
//! use nbreqs::tools::template::{render, TemplateContext};
//!
//! let ctx = TemplateContext::new().with("workspace", "/tmp/nbreqs-x1");
//! assert_eq!(render("${workspace}", &ctx).unwrap(), "/tmp/nbreqs-x1");
//! ```

use crate::error::{NbreqsError, Result};
use std::collections::{HashMap, HashSet};
use std::ffi::{OsStr, OsString};

/// Placeholder for the notebook being converted.
pub const NOTEBOOK: &str = "notebook";

/// Placeholder for the directory converted scripts are written to.
pub const OUTPUT_DIR: &str = "output_dir";

/// Placeholder for the workspace the scanner inspects.
pub const WORKSPACE: &str = "workspace";

/// A segment of a template string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${name}
    Variable(String),
}

/// Parse a template into literal and variable segments.
pub fn parse(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            current_literal.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
                current_literal.push('$');
            }
            Some('{') => {
                chars.next();

                if !current_literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                }

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                segments.push(Segment::Variable(var_name));
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    segments
}

/// Extract all variable names referenced by a template.
pub fn extract_variables(input: &str) -> HashSet<String> {
    parse(input)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Variable(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect()
}

/// Values available to a template.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    values: HashMap<String, OsString>,
}

impl TemplateContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn with(mut self, name: &str, value: impl Into<OsString>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Option<&OsStr> {
        self.values.get(name).map(OsString::as_os_str)
    }
}

/// Substitute every variable in `input`.
///
/// # Errors
///
/// Returns `ConfigValidationError` if a variable is not in the context.
pub fn render(input: &str, context: &TemplateContext) -> Result<OsString> {
    let mut result = OsString::new();

    for segment in parse(input) {
        match segment {
            Segment::Literal(text) => result.push(&text),
            Segment::Variable(name) => {
                let value =
                    context
                        .get(&name)
                        .ok_or_else(|| NbreqsError::ConfigValidationError {
                            message: format!("Unknown placeholder '${{{}}}' in tool arguments", name),
                        })?;
                result.push(value);
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_text() {
        assert_eq!(parse("--force"), vec![Segment::Literal("--force".into())]);
    }

    #[test]
    fn parse_variable_between_literals() {
        assert_eq!(
            parse("--out=${output_dir}/x"),
            vec![
                Segment::Literal("--out=".into()),
                Segment::Variable("output_dir".into()),
                Segment::Literal("/x".into()),
            ]
        );
    }

    #[test]
    fn double_dollar_is_literal() {
        assert_eq!(parse("$${notebook}"), vec![Segment::Literal("${notebook}".into())]);
        assert_eq!(parse("cost$$"), vec![Segment::Literal("cost$".into())]);
    }

    #[test]
    fn lone_dollar_is_literal() {
        assert_eq!(parse("$1"), vec![Segment::Literal("$1".into())]);
    }

    #[test]
    fn extract_variables_is_unique() {
        let vars = extract_variables("${workspace}:${workspace}:${notebook}");
        assert_eq!(vars.len(), 2);
        assert!(vars.contains("workspace"));
        assert!(vars.contains("notebook"));
    }

    #[test]
    fn render_substitutes_values() {
        let ctx = TemplateContext::new()
            .with(NOTEBOOK, "Code/a.ipynb")
            .with(OUTPUT_DIR, "/tmp/ws");
        assert_eq!(
            render("${notebook} -> ${output_dir}", &ctx).unwrap(),
            "Code/a.ipynb -> /tmp/ws"
        );
    }

    #[cfg(unix)]
    #[test]
    fn render_keeps_non_utf8_bytes() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let notebook = OsStr::from_bytes(b"Code/caf\xe9.ipynb");
        let ctx = TemplateContext::new().with(NOTEBOOK, notebook);
        let rendered = render("--in=${notebook}", &ctx).unwrap();
        assert_eq!(rendered.into_vec(), b"--in=Code/caf\xe9.ipynb".to_vec());
    }

    #[test]
    fn render_unknown_variable_fails() {
        let ctx = TemplateContext::new().with(WORKSPACE, "/tmp/ws");
        let err = render("${notebook}", &ctx).unwrap_err();
        assert!(err.to_string().contains("${notebook}"));
    }
}
