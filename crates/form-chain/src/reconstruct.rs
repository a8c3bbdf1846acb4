//! Flat-to-nested reconstruction of submitted entries.
//!
//! Each entry name is tokenized into a path and the value is written into a
//! tree of maps and lists at that path. Index steps grow lists densely: slots
//! nobody wrote to stay [`FormValue::Empty`], so `things[1]` alone yields a
//! two-element list.

use form_path::{
    parse_path, validate_name, validate_path, Limits, Path, PathError, PathStep, ValidationError,
};
use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, trace};

use crate::value::{FlatEntry, FormValue};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReconstructError {
    #[error("structural conflict for '{name}' at '{path}': needs {expected}, found {found}")]
    StructuralConflict {
        name: String,
        path: Path,
        expected: &'static str,
        found: &'static str,
    },
    #[error("malformed field name '{name}': {source}")]
    MalformedName {
        name: String,
        #[source]
        source: PathError,
    },
    #[error("field name '{name}' rejected: {source}")]
    LimitExceeded {
        name: String,
        #[source]
        source: ValidationError,
    },
}

/// Folds flat entries into one nested value.
///
/// ```
/// use form_chain::{FlatEntry, Reconstructor};
/// use serde_json::json;
///
/// let tree = Reconstructor::default()
///     .reconstruct(vec![FlatEntry::text("todos[0].task", "Buy milk")])
///     .unwrap();
/// assert_eq!(tree.to_json(), json!({"todos": [{"task": "Buy milk"}]}));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Reconstructor {
    limits: Limits,
}

struct Conflict {
    depth: usize,
    expected: &'static str,
    found: &'static str,
}

impl Reconstructor {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Build the tree for one submission.
    ///
    /// Entries with an empty name are skipped. An empty submission yields an
    /// empty map.
    pub fn reconstruct<I>(&self, entries: I) -> Result<FormValue, ReconstructError>
    where
        I: IntoIterator<Item = FlatEntry>,
    {
        let mut root = FormValue::Empty;
        let mut count = 0usize;
        for entry in entries {
            if entry.name.is_empty() {
                trace!("skipping entry without a name");
                continue;
            }
            self.insert(&mut root, entry)?;
            count += 1;
        }
        if root.is_empty_slot() {
            root = FormValue::Map(IndexMap::new());
        }
        debug!(entries = count, "reconstructed submission");
        Ok(root)
    }

    fn insert(&self, root: &mut FormValue, entry: FlatEntry) -> Result<(), ReconstructError> {
        let FlatEntry { name, value } = entry;

        if let Err(source) = validate_name(&name, &self.limits) {
            return Err(ReconstructError::LimitExceeded { name, source });
        }
        let path = match parse_path(&name) {
            Ok(path) => path,
            Err(source) => return Err(ReconstructError::MalformedName { name, source }),
        };
        if let Err(source) = validate_path(&path, &self.limits) {
            return Err(ReconstructError::LimitExceeded { name, source });
        }

        set_in(root, path.steps(), value).map_err(|conflict| {
            ReconstructError::StructuralConflict {
                path: Path::new(path.steps()[..conflict.depth].to_vec()),
                name,
                expected: conflict.expected,
                found: conflict.found,
            }
        })
    }
}

fn set_in(root: &mut FormValue, steps: &[PathStep], value: FormValue) -> Result<(), Conflict> {
    let mut current = root;
    for (depth, step) in steps.iter().enumerate() {
        current = match step {
            PathStep::Key(key) => {
                if current.is_empty_slot() {
                    *current = FormValue::Map(IndexMap::new());
                }
                match current {
                    FormValue::Map(map) => map.entry(key.clone()).or_default(),
                    other => {
                        return Err(Conflict {
                            depth,
                            expected: "an object",
                            found: other.kind_name(),
                        })
                    }
                }
            }
            PathStep::Index(idx) => {
                if current.is_empty_slot() {
                    *current = FormValue::List(Vec::new());
                }
                match current {
                    FormValue::List(items) => {
                        // indices are capped at INDEX_CEILING, so the length fits
                        if items.len() <= *idx {
                            items.resize(*idx + 1, FormValue::Empty);
                        }
                        &mut items[*idx]
                    }
                    other => {
                        return Err(Conflict {
                            depth,
                            expected: "an array",
                            found: other.kind_name(),
                        })
                    }
                }
            }
        };
    }

    if matches!(current, FormValue::List(_) | FormValue::Map(_)) {
        return Err(Conflict {
            depth: steps.len(),
            expected: "a leaf value",
            found: current.kind_name(),
        });
    }
    if !current.is_empty_slot() {
        trace!("duplicate entry, last value wins");
    }
    *current = value;
    Ok(())
}

/// Reconstruct with default limits.
pub fn parse_form_any<I>(entries: I) -> Result<FormValue, ReconstructError>
where
    I: IntoIterator<Item = FlatEntry>,
{
    Reconstructor::default().reconstruct(entries)
}
