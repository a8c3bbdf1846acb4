//! Limits for paths coming from untrusted submissions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Path, PathStep};

/// Default maximum path string length.
pub const MAX_NAME_LENGTH: usize = 1024;

/// Default maximum path depth.
pub const MAX_PATH_DEPTH: usize = 256;

/// Default largest accepted array index.
pub const MAX_ARRAY_INDEX: usize = 10_000;

/// Largest index any [`Limits`] accepts, so `index + 1` always fits a length.
pub const INDEX_CEILING: usize = usize::MAX - 1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name is {len} bytes long, limit is {max}")]
    NameTooLong { len: usize, max: usize },
    #[error("path is {depth} steps deep, limit is {max}")]
    PathTooDeep { depth: usize, max: usize },
    #[error("array index {index} exceeds limit {max}")]
    IndexTooLarge { index: usize, max: usize },
}

/// Size limits applied before a path is used to grow a value tree.
///
/// Array indices are materialized densely, so an unchecked `a[999999999]`
/// would allocate that many slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Limits {
    pub max_name_len: usize,
    pub max_depth: usize,
    pub max_index: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_name_len: MAX_NAME_LENGTH,
            max_depth: MAX_PATH_DEPTH,
            max_index: MAX_ARRAY_INDEX,
        }
    }
}

impl Limits {
    /// No practical limits. Only use with trusted input.
    ///
    /// Indices are still capped at [`INDEX_CEILING`].
    pub fn unbounded() -> Self {
        Self {
            max_name_len: usize::MAX,
            max_depth: usize::MAX,
            max_index: INDEX_CEILING,
        }
    }
}

/// Validate a raw path string before tokenizing it.
///
/// # Example
///
/// ```
/// use form_path::{validate_name, Limits};
///
/// validate_name("todos[0].task", &Limits::default()).unwrap();
/// validate_name(&"a".repeat(2000), &Limits::default()).unwrap_err();
/// ```
pub fn validate_name(name: &str, limits: &Limits) -> Result<(), ValidationError> {
    if name.len() > limits.max_name_len {
        return Err(ValidationError::NameTooLong {
            len: name.len(),
            max: limits.max_name_len,
        });
    }
    Ok(())
}

/// Validate a tokenized path.
pub fn validate_path(path: &Path, limits: &Limits) -> Result<(), ValidationError> {
    if path.len() > limits.max_depth {
        return Err(ValidationError::PathTooDeep {
            depth: path.len(),
            max: limits.max_depth,
        });
    }
    let max_index = limits.max_index.min(INDEX_CEILING);
    for step in path {
        if let PathStep::Index(index) = step {
            if *index > max_index {
                return Err(ValidationError::IndexTooLarge {
                    index: *index,
                    max: max_index,
                });
            }
        }
    }
    Ok(())
}
