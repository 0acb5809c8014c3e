//! `{placeholder}` substitution for agent and task text.
//!
//! A placeholder is `{` + identifier + `}` where the identifier starts with a
//! letter or underscore and continues with letters, digits, `_` or `-`.
//! `{{` and `}}` produce literal braces. Any other brace is copied unchanged,
//! so text such as `{"a": 1}` passes through.

use super::Inputs;

/// Substitute every placeholder in `template` from `inputs`.
///
/// Returns the name of the first placeholder with no matching input as the
/// error.
///
/// ```
/// use cf_core::crew::{interpolate, Inputs};
///
/// let mut inputs = Inputs::new();
/// inputs.insert("sentence_count".into(), 4.into());
///
/// let text = interpolate("Write {sentence_count} sentences {{verbatim}}", &inputs);
/// assert_eq!(text.unwrap(), "Write 4 sentences {verbatim}");
/// ```
pub fn interpolate(template: &str, inputs: &Inputs) -> Result<String, String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
        } else if let Some(name) = placeholder_at(tail) {
            let value = inputs.get(name).ok_or_else(|| name.to_string())?;
            out.push_str(&render_value(value));
            rest = &tail[name.len() + 2..];
        } else {
            out.push_str(&tail[..1]);
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    Ok(out)
}

/// Names of all placeholders in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        let tail = &rest[pos..];
        if tail.starts_with("{{") || tail.starts_with("}}") {
            rest = &tail[2..];
        } else if let Some(name) = placeholder_at(tail) {
            names.push(name.to_string());
            rest = &tail[name.len() + 2..];
        } else {
            rest = &tail[1..];
        }
    }

    names
}

/// If `text` starts with a well-formed placeholder, return its name.
fn placeholder_at(text: &str) -> Option<&str> {
    let body = text.strip_prefix('{')?;
    let end = body.find('}')?;
    let name = &body[..end];

    let mut chars = name.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        Some(name)
    } else {
        None
    }
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
