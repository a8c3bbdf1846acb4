//! Validation issues and the issue locator chain.

use form_path::{is_path_equal, Path, PathStep};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::chain::{ChainError, Cursor, Navigate};
use crate::shape::Shape;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    TooSmall,
    TooBig,
    InvalidString,
    InvalidEnumValue,
    Custom,
    #[serde(other)]
    Other,
}

/// A schema-reported problem at a specific path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub code: IssueCode,
    pub path: Path,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
}

impl Issue {
    pub fn new(code: IssueCode, path: Path, message: impl Into<String>) -> Self {
        Self {
            code,
            path,
            message: message.into(),
            params: None,
        }
    }

    /// A `custom` issue with an empty parameter map.
    pub fn custom(path: Path, message: impl Into<String>) -> Self {
        Self {
            code: IssueCode::Custom,
            path,
            message: message.into(),
            params: Some(Map::new()),
        }
    }

    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = Some(params);
        self
    }

    /// Exact structural match; parents and children of `path` do not count.
    pub fn is_at(&self, path: &[PathStep]) -> bool {
        is_path_equal(self.path.steps(), path)
    }
}

/// The failure list of one validation pass.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("validation failed with {} issue(s)", .issues.len())]
pub struct ValidationFailure {
    pub issues: Vec<Issue>,
}

impl ValidationFailure {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }
}

/// First issue located exactly at `path`.
pub fn find_issue<'a>(issues: &'a [Issue], path: &[PathStep]) -> Option<&'a Issue> {
    issues.iter().find(|issue| issue.is_at(path))
}

/// Every issue located exactly at `path`, in list order.
pub fn issues_at<'a>(issues: &'a [Issue], path: &'a [PathStep]) -> impl Iterator<Item = &'a Issue> {
    issues.iter().filter(move |issue| issue.is_at(path))
}

/// Looks up issues with the same navigation as [`crate::FieldChain`].
///
/// ```
/// use form_chain::{Issue, IssueChain, IssueCode, Navigate};
/// use form_path::path;
///
/// let issues = vec![Issue::new(IssueCode::TooSmall, path!["todos"], "Add a todo")];
/// let errors = IssueChain::new(&issues);
///
/// assert!(errors.at("todos")?.has());
/// assert!(!errors.at("todos")?.index(0)?.has());
/// assert_eq!(errors.at("todos")?.when("is-invalid"), Some("is-invalid"));
/// # Ok::<(), form_chain::ChainError>(())
/// ```
#[derive(Debug, Clone)]
pub struct IssueChain<'a> {
    issues: &'a [Issue],
    cursor: Cursor<'a>,
}

impl<'a> IssueChain<'a> {
    pub fn new(issues: &'a [Issue]) -> Self {
        Self {
            issues,
            cursor: Cursor::untyped(),
        }
    }

    /// Navigation is checked against `shape`.
    pub fn with_shape(issues: &'a [Issue], shape: &'a Shape) -> Self {
        Self {
            issues,
            cursor: Cursor::typed(shape),
        }
    }

    pub fn path(&self) -> &Path {
        self.cursor.path()
    }

    /// The first issue at this exact path.
    pub fn get(&self) -> Option<&'a Issue> {
        find_issue(self.issues, self.cursor.path().steps())
    }

    pub fn has(&self) -> bool {
        self.get().is_some()
    }

    pub fn all(&self) -> Vec<&'a Issue> {
        let path = self.cursor.path().steps();
        self.issues.iter().filter(|issue| issue.is_at(path)).collect()
    }

    pub fn message(&self) -> Option<&'a str> {
        self.get().map(|issue| issue.message.as_str())
    }

    /// Calls `f` with the first issue, if there is one.
    pub fn map<R>(&self, f: impl FnOnce(&'a Issue) -> R) -> Option<R> {
        self.get().map(f)
    }

    /// Calls `f` with every issue at this path, if there is at least one.
    pub fn map_all<R>(&self, f: impl FnOnce(&[&'a Issue]) -> R) -> Option<R> {
        let all = self.all();
        if all.is_empty() {
            return None;
        }
        Some(f(&all))
    }

    /// Returns `value` only when there is an issue, for conditional class names
    /// and similar tokens.
    pub fn when<T>(&self, value: T) -> Option<T> {
        if self.has() {
            Some(value)
        } else {
            None
        }
    }
}

impl<'a> Navigate for IssueChain<'a> {
    fn step(&self, step: PathStep) -> Result<Self, ChainError> {
        Ok(Self {
            issues: self.issues,
            cursor: self.cursor.step(step)?,
        })
    }
}
