//! Minimal placeholder rendering for the artifact templates.
//!
//! Templates are literal text with `{{key}}` markers. Rendering replaces
//! every marker from the context and then refuses to return text that
//! still contains an unresolved marker, so a template/context drift
//! surfaces as a generation-time error instead of shipping as a broken
//! artifact. Values are inserted verbatim; escaping for the target
//! syntax is the caller's job (see `emit::escape`).

use crate::error::{Result, StackgenError};

/// Render a template against a list of `(key, value)` pairs.
pub fn render(template: &str, context: &[(&str, &str)]) -> Result<String> {
    let mut out = template.to_string();
    for (key, value) in context {
        out = out.replace(&format!("{{{{{}}}}}", key), value);
    }

    if let Some(start) = out.find("{{") {
        let rest = &out[start..];
        let marker: String = rest.chars().take(40).collect();
        return Err(StackgenError::Schema(format!(
            "unresolved template placeholder near '{}'",
            marker
        )));
    }

    Ok(out)
}
