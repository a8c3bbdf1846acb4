//! Canonical path string rendering.

use std::borrow::Cow;

use crate::types::PathStep;

/// Separator between a namespace and a path in a namespaced identifier.
pub const NAMESPACE_SEPARATOR: char = ':';

/// Check whether a key has to be written in bracket-quote form.
///
/// Empty keys and keys containing `.`, `[`, `]`, a quote, a backslash or
/// whitespace are not written as a bareword.
pub fn needs_quoting(key: &str) -> bool {
    key.is_empty()
        || key
            .chars()
            .any(|c| matches!(c, '.' | '[' | ']' | '\'' | '"' | '\\') || c.is_whitespace())
}

/// Escapes a key for use inside a path string.
///
/// # Example
///
/// ```
/// use form_path::escape_key;
///
/// assert_eq!(escape_key("plain"), "plain");
/// assert_eq!(escape_key("ding.dong"), "['ding.dong']");
/// assert_eq!(escape_key("it's here"), r"['it\'s here']");
/// ```
pub fn escape_key(key: &str) -> Cow<'_, str> {
    if !needs_quoting(key) {
        return Cow::Borrowed(key);
    }
    let mut out = String::with_capacity(key.len() + 4);
    push_quoted(&mut out, key);
    Cow::Owned(out)
}

fn push_quoted(out: &mut String, key: &str) {
    out.push_str("['");
    for c in key.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push_str("']");
}

/// Render path steps as a canonical path string.
///
/// Keys are joined with `.`, indices are appended as `[N]` to the preceding
/// segment.
///
/// # Example
///
/// ```
/// use form_path::{format_path, path};
///
/// assert_eq!(format_path(path!["todos", 0, "task"].steps()), "todos[0].task");
/// assert_eq!(format_path(&[]), "");
/// ```
pub fn format_path(steps: &[PathStep]) -> String {
    let mut out = String::new();
    for (i, step) in steps.iter().enumerate() {
        match step {
            PathStep::Index(idx) => {
                out.push('[');
                out.push_str(&idx.to_string());
                out.push(']');
            }
            PathStep::Key(key) => {
                if i > 0 {
                    out.push('.');
                }
                out.push_str(&escape_key(key));
            }
        }
    }
    out
}

/// Render path steps as a namespaced identifier: `<namespace>:<path>`.
///
/// ```
/// use form_path::{format_id, path};
///
/// assert_eq!(format_id("signup", path!["ding"].steps()), "signup:ding");
/// ```
pub fn format_id(namespace: &str, steps: &[PathStep]) -> String {
    let name = format_path(steps);
    let mut out = String::with_capacity(namespace.len() + 1 + name.len());
    out.push_str(namespace);
    out.push(NAMESPACE_SEPARATOR);
    out.push_str(&name);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    #[test]
    fn test_needs_quoting() {
        assert!(!needs_quoting("foo"));
        assert!(!needs_quoting("123"));
        assert!(needs_quoting(""));
        assert!(needs_quoting("a.b"));
        assert!(needs_quoting("a[b"));
        assert!(needs_quoting("a]b"));
        assert!(needs_quoting("a b"));
        assert!(needs_quoting("tab\there"));
        assert!(needs_quoting("it's"));
        assert!(needs_quoting("say \"hi\""));
        assert!(needs_quoting(r"a\b"));
    }

    #[test]
    fn test_escape_key() {
        assert_eq!(escape_key("foo"), "foo");
        assert_eq!(escape_key(""), "['']");
        assert_eq!(escape_key("ding dong"), "['ding dong']");
        assert_eq!(escape_key(r"back\slash.x"), r"['back\\slash.x']");
        assert_eq!(escape_key("it's"), r"['it\'s']");
        assert_eq!(escape_key(r"a\b"), r"['a\\b']");
        assert_eq!(escape_key("\"x"), "['\"x']");
    }

    #[test]
    fn test_format_path() {
        assert_eq!(format_path(path!["ding"].steps()), "ding");
        assert_eq!(format_path(path!["ding", "dong"].steps()), "ding.dong");
        assert_eq!(format_path(path!["things", 0usize].steps()), "things[0]");
        assert_eq!(
            format_path(path!["things", 0usize, "ding", 1usize].steps()),
            "things[0].ding[1]"
        );
        assert_eq!(format_path(path![0usize, "a"].steps()), "[0].a");
        assert_eq!(format_path(path!["m", 0usize, 1usize].steps()), "m[0][1]");
    }

    #[test]
    fn test_format_quoted_segments() {
        assert_eq!(format_path(path!["ding.dong"].steps()), "['ding.dong']");
        assert_eq!(format_path(path!["a", "b c"].steps()), "a.['b c']");
        assert_eq!(format_path(path!["a", 2usize, "x.y"].steps()), "a[2].['x.y']");
    }

    #[test]
    fn test_format_id() {
        assert_eq!(format_id("form", path!["ob", "field"].steps()), "form:ob.field");
        assert_eq!(format_id("form", &[]), "form:");
    }
}
