//! Shared navigation for field, issue and custom-issue chains.
//!
//! Every chain wraps a [`Cursor`]: an immutable path plus the declared shape
//! at that position, if the chain was built from a schema. Stepping never
//! mutates; it returns a new cursor.

use form_path::{Path, PathStep};
use thiserror::Error;

use crate::shape::Shape;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChainError {
    #[error("schema mismatch at '{path}': step '{step}' needs {expected}, found {found}")]
    SchemaMismatch {
        path: Path,
        step: PathStep,
        expected: &'static str,
        found: &'static str,
    },
}

/// A position reached by navigation.
#[derive(Debug, Clone, Default)]
pub struct Cursor<'s> {
    path: Path,
    shape: Option<&'s Shape>,
}

impl<'s> Cursor<'s> {
    /// A root cursor with no shape; every step is accepted.
    pub fn untyped() -> Self {
        Self {
            path: Path::root(),
            shape: None,
        }
    }

    /// A root cursor checked against `shape`.
    pub fn typed(shape: &'s Shape) -> Self {
        Self {
            path: Path::root(),
            shape: Some(shape),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Declared shape at this position, wrappers included.
    pub fn shape(&self) -> Option<&'s Shape> {
        self.shape
    }

    pub fn step(&self, step: PathStep) -> Result<Self, ChainError> {
        let shape = match self.shape {
            None => None,
            Some(shape) => descend(shape, &step).map_err(|(expected, found)| {
                ChainError::SchemaMismatch {
                    path: self.path.clone(),
                    step: step.clone(),
                    expected,
                    found,
                }
            })?,
        };
        Ok(Self {
            path: self.path.child(step),
            shape,
        })
    }
}

fn descend<'s>(
    shape: &'s Shape,
    step: &PathStep,
) -> Result<Option<&'s Shape>, (&'static str, &'static str)> {
    let target = shape.unwrapped();
    match (target, step) {
        (Shape::Any, _) => Ok(None),
        (Shape::Object { fields }, PathStep::Key(key)) => match fields.get(key) {
            Some(field) => Ok(Some(field)),
            None => Err(("a declared field", "an object without it")),
        },
        (Shape::Array { items }, PathStep::Index(_)) => Ok(Some(items)),
        (other, PathStep::Key(_)) => Err(("an object", other.kind_name())),
        (other, PathStep::Index(_)) => Err(("an array", other.kind_name())),
    }
}

/// Chained navigation shared by every chain type.
pub trait Navigate: Sized {
    /// Append one step, producing a new chain.
    fn step(&self, step: PathStep) -> Result<Self, ChainError>;

    /// Property access.
    fn at(&self, key: impl Into<String>) -> Result<Self, ChainError> {
        self.step(PathStep::Key(key.into()))
    }

    /// Indexed call on an array position.
    fn index(&self, index: usize) -> Result<Self, ChainError> {
        self.step(PathStep::Index(index))
    }

    /// Follow every step of `path`.
    fn walk(&self, path: &Path) -> Result<Self, ChainError>
    where
        Self: Clone,
    {
        path.iter()
            .try_fold(self.clone(), |chain, step| chain.step(step.clone()))
    }
}

impl<'s> Navigate for Cursor<'s> {
    fn step(&self, step: PathStep) -> Result<Self, ChainError> {
        Cursor::step(self, step)
    }
}
