//! Field name chains.
//!
//! A [`FieldChain`] produces input `name` and `id` strings from navigation:
//!
//! ```
//! use form_chain::{FieldChain, Navigate};
//!
//! let fields = FieldChain::new("todo-form");
//! let task = fields.at("todos")?.index(0)?.at("task")?;
//! assert_eq!(task.name(), "todos[0].task");
//! assert_eq!(task.id(), "todo-form:todos[0].task");
//! # Ok::<(), form_chain::ChainError>(())
//! ```

use std::fmt;

use form_path::{format_id, format_path, Path, PathStep};

use crate::chain::{ChainError, Cursor, Navigate};
use crate::issues::Issue;
use crate::shape::Shape;

/// Prefix of the element id that holds a field's error message.
pub const ERROR_ID_PREFIX: &str = "error:";

/// Which string a field chain should terminate in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldAttr {
    #[default]
    Name,
    Id,
}

/// Everything known about one field, handed to render callbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldProps<'a> {
    pub name: String,
    pub id: String,
    pub error_id: String,
    /// Declared shape with its optional/nullable wrappers still in place.
    pub shape: Option<&'a Shape>,
    /// Issues located exactly at this field.
    pub issues: Vec<&'a Issue>,
}

#[derive(Debug, Clone)]
pub struct FieldChain<'a> {
    namespace: &'a str,
    cursor: Cursor<'a>,
    issues: &'a [Issue],
}

impl<'a> FieldChain<'a> {
    pub fn new(namespace: &'a str) -> Self {
        Self {
            namespace,
            cursor: Cursor::untyped(),
            issues: &[],
        }
    }

    /// Navigation is checked against `shape`; mismatches fail with
    /// [`ChainError::SchemaMismatch`].
    pub fn with_shape(namespace: &'a str, shape: &'a Shape) -> Self {
        Self {
            namespace,
            cursor: Cursor::typed(shape),
            issues: &[],
        }
    }

    /// Issues exposed through [`FieldProps::issues`].
    pub fn with_issues(mut self, issues: &'a [Issue]) -> Self {
        self.issues = issues;
        self
    }

    pub fn namespace(&self) -> &'a str {
        self.namespace
    }

    pub fn path(&self) -> &Path {
        self.cursor.path()
    }

    pub fn shape(&self) -> Option<&'a Shape> {
        self.cursor.shape()
    }

    /// The canonical path string, for the `name` attribute.
    pub fn name(&self) -> String {
        format_path(self.cursor.path().steps())
    }

    /// The namespaced identifier, for the `id` attribute.
    pub fn id(&self) -> String {
        format_id(self.namespace, self.cursor.path().steps())
    }

    pub fn attr(&self, attr: FieldAttr) -> String {
        match attr {
            FieldAttr::Name => self.name(),
            FieldAttr::Id => self.id(),
        }
    }

    pub fn props(&self) -> FieldProps<'a> {
        let id = self.id();
        let path = self.cursor.path().steps();
        FieldProps {
            name: self.name(),
            error_id: format!("{ERROR_ID_PREFIX}{id}"),
            id,
            shape: self.cursor.shape(),
            issues: self.issues.iter().filter(|issue| issue.is_at(path)).collect(),
        }
    }

    /// Calls `f` with the field's props and returns its result.
    pub fn render<R>(&self, f: impl FnOnce(&FieldProps<'a>) -> R) -> R {
        f(&self.props())
    }
}

impl<'a> Navigate for FieldChain<'a> {
    fn step(&self, step: PathStep) -> Result<Self, ChainError> {
        Ok(Self {
            namespace: self.namespace,
            cursor: self.cursor.step(step)?,
            issues: self.issues,
        })
    }
}

impl fmt::Display for FieldChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
