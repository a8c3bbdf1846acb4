//! Navigation paths for form fields.
//!
//! A navigation path is an ordered list of property names and array indices.
//! This crate renders such paths as the dotted/bracketed strings used for
//! input `name` attributes and tokenizes those strings back into paths.
//!
//! # Example
//!
//! ```
//! use form_path::{format_path, parse_path, path};
//!
//! // Render a path as an input name
//! let p = path!["todos", 0, "task"];
//! assert_eq!(format_path(p.steps()), "todos[0].task");
//!
//! // Tokenize the name back into the same path
//! assert_eq!(parse_path("todos[0].task").unwrap(), p);
//!
//! // Keys containing a dot are bracket-quoted
//! let dotted = path!["ding.dong"];
//! assert_eq!(dotted.to_string(), "['ding.dong']");
//! assert_eq!(parse_path("['ding.dong']").unwrap(), dotted);
//! ```

use thiserror::Error;

pub mod types;
pub use types::{Path, PathStep};

pub mod format;
pub use format::{escape_key, format_id, format_path, needs_quoting, NAMESPACE_SEPARATOR};

pub mod parse;
pub use parse::parse_path;

pub mod validate;
pub use validate::{validate_name, validate_path, Limits, ValidationError, INDEX_CEILING};

/// Check if a path points to the root value.
///
/// # Example
///
/// ```
/// use form_path::{is_root, path};
///
/// assert!(is_root(&[]));
/// assert!(!is_root(path!["foo"].steps()));
/// ```
pub fn is_root(path: &[PathStep]) -> bool {
    path.is_empty()
}

/// Check if `parent` is a strict prefix of `child`.
///
/// # Example
///
/// ```
/// use form_path::{is_child, path};
///
/// let parent = path!["pw"];
/// let child = path!["pw", "password1"];
/// assert!(is_child(parent.steps(), child.steps()));
/// assert!(!is_child(child.steps(), parent.steps()));
/// ```
pub fn is_child(parent: &[PathStep], child: &[PathStep]) -> bool {
    if parent.len() >= child.len() {
        return false;
    }
    parent.iter().zip(child).all(|(a, b)| a == b)
}

/// Check if two paths are structurally equal.
///
/// Index steps only match index steps: `["a", 0]` and `["a", "0"]` differ.
pub fn is_path_equal(p1: &[PathStep], p2: &[PathStep]) -> bool {
    if p1.len() != p2.len() {
        return false;
    }
    p1.iter().zip(p2).all(|(a, b)| a == b)
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("unclosed bracket opened at byte {pos}")]
    UnclosedBracket { pos: usize },
    #[error("unterminated quoted key in bracket at byte {pos}")]
    UnterminatedQuote { pos: usize },
    #[error("unexpected character {ch:?} at byte {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("array index at byte {pos} does not fit in usize")]
    IndexOverflow { pos: usize },
}
