//! Form-state binding: field name chains, issue lookup and submission
//! parsing.
//!
//! Field names are rendered from navigation paths, submissions are rebuilt
//! from their flat `(name, value)` entries into nested trees, and validation
//! issues are looked up by the same navigation that named the field.
//!
//! # Example
//!
//! ```
//! use form_chain::{parse_form_any, FieldChain, FlatEntry, Issue, IssueChain, IssueCode, Navigate};
//! use form_path::path;
//! use serde_json::json;
//!
//! // Name an input
//! let fields = FieldChain::new("todos");
//! let task = fields.at("todos")?.index(0)?.at("task")?;
//! assert_eq!(task.name(), "todos[0].task");
//!
//! // Rebuild the submission
//! let tree = parse_form_any(vec![FlatEntry::text(task.name(), "Buy milk")]).unwrap();
//! assert_eq!(tree.to_json(), json!({"todos": [{"task": "Buy milk"}]}));
//!
//! // Find the issue reported for that input
//! let issues = vec![Issue::new(IssueCode::TooSmall, path!["todos", 0, "task"], "Too short")];
//! let errors = IssueChain::new(&issues);
//! assert_eq!(errors.walk(task.path())?.message(), Some("Too short"));
//! # Ok::<(), form_chain::ChainError>(())
//! ```

pub mod chain;
pub use chain::{ChainError, Cursor, Navigate};

pub mod custom;
pub use custom::{CustomIssues, IssueBuilder};

pub mod error;
pub use error::FormError;

pub mod fields;
pub use fields::{FieldAttr, FieldChain, FieldProps, ERROR_ID_PREFIX};

pub mod form;
pub use form::{EventOutcome, Form, FormEvent, FormOptions, SubmissionSource, DEFAULT_NAMESPACE};

pub mod input_props;
pub use input_props::{input_props, AttrValue, InputProps};

pub mod issues;
pub use issues::{find_issue, issues_at, Issue, IssueChain, IssueCode, ValidationFailure};

pub mod reconstruct;
pub use reconstruct::{parse_form_any, ReconstructError, Reconstructor};

pub mod registry;
pub use registry::{Listener, ListenerId, ListenerRegistry, RegistryError};

pub mod schema;
pub use schema::{parse_form, safe_parse_form, SafeParse, Schema};

pub mod shape;
pub use shape::{DateCheck, NumberCheck, Shape, StringCheck};

pub mod value;
pub use value::{entries_from_lines, entries_from_urlencoded, FileBlob, FlatEntry, FormValue};
