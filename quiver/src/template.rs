//! URL template rendering.
//!
//! Artifact download URLs are templated with a single `{version}`
//! placeholder, substituted with the resolved release version. Rendering is
//! a pure function with no I/O.

use thiserror::Error;

/// The only placeholder the engine understands.
pub const VERSION_PLACEHOLDER: &str = "version";

/// Errors from rendering a URL template.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// The pattern's brace syntax is malformed.
    #[error("malformed URL template {pattern:?}: {reason}")]
    Syntax { pattern: String, reason: String },

    /// The pattern references a placeholder the engine does not know.
    #[error("unknown placeholder {name:?} in URL template")]
    UnknownPlaceholder { name: String },
}

/// Substitute `{version}` into a URL pattern.
///
/// # Errors
///
/// Returns a syntax error for unbalanced braces and a render error for any
/// placeholder other than `{version}`.
pub fn render(pattern: &str, version: &str) -> Result<String, TemplateError> {
    let syntax = |reason: &str| TemplateError::Syntax {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    };

    let mut out = String::with_capacity(pattern.len() + version.len());
    let mut rest = pattern;

    while let Some(start) = rest.find('{') {
        let literal = &rest[..start];
        if literal.contains('}') {
            return Err(syntax("unmatched '}'"));
        }
        out.push_str(literal);
        let after = &rest[start + 1..];

        let end = after.find('}').ok_or_else(|| syntax("unclosed '{'"))?;
        let name = &after[..end];
        if name.contains('{') {
            return Err(syntax("nested '{'"));
        }

        if name == VERSION_PLACEHOLDER {
            out.push_str(version);
        } else {
            return Err(TemplateError::UnknownPlaceholder {
                name: name.to_string(),
            });
        }

        rest = &after[end + 1..];
    }

    if rest.contains('}') {
        return Err(syntax("unmatched '}'"));
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_version() {
        let url = render("https://x/{version}/f.tar.gz", "1.2.3").unwrap();
        assert_eq!(url, "https://x/1.2.3/f.tar.gz");
    }

    #[test]
    fn test_render_substitutes_repeated_placeholder() {
        let url = render("https://x/v{version}/tool-{version}.tar.gz", "2.0.0").unwrap();
        assert_eq!(url, "https://x/v2.0.0/tool-2.0.0.tar.gz");
    }

    #[test]
    fn test_render_without_placeholder_is_identity() {
        let url = render("https://x/latest/f.tar.gz", "1.2.3").unwrap();
        assert_eq!(url, "https://x/latest/f.tar.gz");
    }

    #[test]
    fn test_render_unknown_placeholder() {
        let err = render("https://x/{arch}/f.tar.gz", "1.2.3").unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnknownPlaceholder {
                name: "arch".to_string()
            }
        );
    }

    #[test]
    fn test_render_unclosed_brace() {
        let err = render("https://x/{version/f.tar.gz", "1.2.3").unwrap_err();
        assert!(matches!(err, TemplateError::Syntax { .. }));
    }

    #[test]
    fn test_render_unmatched_closing_brace() {
        let err = render("https://x/version}/f.tar.gz", "1.2.3").unwrap_err();
        assert!(matches!(err, TemplateError::Syntax { .. }));
    }

    #[test]
    fn test_render_unmatched_closing_brace_before_placeholder() {
        let err = render("https://x}/v{version}/f.tar.gz", "1.2.3").unwrap_err();
        assert!(matches!(err, TemplateError::Syntax { .. }));
    }
}
