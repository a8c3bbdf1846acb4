//! Custom issue creation, for errors found outside the schema (for example a
//! server reporting that a username is taken).

use std::cell::RefCell;

use form_path::{Path, PathStep};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::chain::{ChainError, Cursor, Navigate};
use crate::issues::Issue;
use crate::shape::Shape;

/// Collects `custom` issues created through [`IssueBuilder`] chains.
///
/// ```
/// use form_chain::{CustomIssues, Navigate};
///
/// let custom = CustomIssues::new();
/// custom.chain().at("username")?.issue("Username is already taken");
///
/// assert!(custom.has_issues());
/// assert_eq!(
///     serde_json::to_string(&custom).unwrap(),
///     r#"[{"code":"custom","path":["username"],"message":"Username is already taken","params":{}}]"#
/// );
/// # Ok::<(), form_chain::ChainError>(())
/// ```
#[derive(Debug, Default)]
pub struct CustomIssues<'s> {
    shape: Option<&'s Shape>,
    issues: RefCell<Vec<Issue>>,
}

impl<'s> CustomIssues<'s> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shape(shape: &'s Shape) -> Self {
        Self {
            shape: Some(shape),
            issues: RefCell::default(),
        }
    }

    pub fn chain(&self) -> IssueBuilder<'_, 's> {
        let cursor = match self.shape {
            Some(shape) => Cursor::typed(shape),
            None => Cursor::untyped(),
        };
        IssueBuilder {
            owner: self,
            cursor,
        }
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_issues()
    }

    pub fn to_vec(&self) -> Vec<Issue> {
        self.issues.borrow().clone()
    }

    pub fn into_vec(self) -> Vec<Issue> {
        self.issues.into_inner()
    }

    fn push(&self, issue: Issue) -> Issue {
        debug!(path = %issue.path, message = %issue.message, "custom issue recorded");
        self.issues.borrow_mut().push(issue.clone());
        issue
    }
}

impl Serialize for CustomIssues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.issues.borrow().serialize(serializer)
    }
}

/// A chain position that records a custom issue when terminated.
#[derive(Debug, Clone)]
pub struct IssueBuilder<'c, 's> {
    owner: &'c CustomIssues<'s>,
    cursor: Cursor<'s>,
}

impl IssueBuilder<'_, '_> {
    pub fn path(&self) -> &Path {
        self.cursor.path()
    }

    /// Record a custom issue at this path and return it.
    pub fn issue(&self, message: impl Into<String>) -> Issue {
        self.owner
            .push(Issue::custom(self.cursor.path().clone(), message))
    }

    /// Record a custom issue carrying extra parameters.
    pub fn issue_with(&self, message: impl Into<String>, params: Map<String, Value>) -> Issue {
        self.owner.push(
            Issue::custom(self.cursor.path().clone(), message).with_params(params),
        )
    }
}

impl Navigate for IssueBuilder<'_, '_> {
    fn step(&self, step: PathStep) -> Result<Self, ChainError> {
        Ok(Self {
            owner: self.owner,
            cursor: self.cursor.step(step)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issues::IssueCode;
    use form_path::path;
    use serde_json::json;

    fn shape() -> Shape {
        Shape::object([(
            "field",
            Shape::object([
                ("nested", Shape::string()),
                ("array", Shape::array(Shape::string())),
                (
                    "nestedArray",
                    Shape::array(Shape::object([("deep", Shape::string())])),
                ),
            ]),
        )])
    }

    #[test]
    fn test_single_field() {
        let custom = CustomIssues::new();
        let issue = custom.chain().at("field").unwrap().issue("custom server error");
        assert_eq!(
            issue,
            Issue {
                code: IssueCode::Custom,
                path: path!["field"],
                message: "custom server error".to_string(),
                params: Some(Map::new()),
            }
        );
    }

    #[test]
    fn test_mutates_inner_state() {
        let custom = CustomIssues::new();
        assert!(custom.to_vec().is_empty());
        assert!(!custom.has_issues());

        custom.chain().at("field").unwrap().issue("custom server error");

        assert!(custom.has_issues());
        assert_eq!(custom.len(), 1);
        assert_eq!(custom.to_vec()[0].path, path!["field"]);
    }

    #[test]
    fn test_nested_paths() {
        let shape = shape();
        let custom = CustomIssues::with_shape(&shape);
        let field = custom.chain().at("field").unwrap();

        assert_eq!(field.issue("on object").path, path!["field"]);
        assert_eq!(
            field.at("nestedArray").unwrap().issue("on array").path,
            path!["field", "nestedArray"]
        );
        assert_eq!(
            field.at("array").unwrap().index(3).unwrap().issue("item").path,
            path!["field", "array", 3usize]
        );
        assert_eq!(
            field
                .walk(&path!["nestedArray", 3usize, "deep"])
                .unwrap()
                .issue("deep")
                .path,
            path!["field", "nestedArray", 3usize, "deep"]
        );
        assert_eq!(custom.len(), 4);
    }

    #[test]
    fn test_typed_builder_rejects_unknown_fields() {
        let shape = shape();
        let custom = CustomIssues::with_shape(&shape);
        assert!(custom.chain().at("bad").is_err());
        assert!(custom.is_empty());
    }

    #[test]
    fn test_params() {
        let custom = CustomIssues::new();
        let mut params = Map::new();
        params.insert("retryAfter".to_string(), json!(30));
        let issue = custom.chain().at("code").unwrap().issue_with("Slow down", params);
        assert_eq!(issue.params.unwrap()["retryAfter"], json!(30));
    }

    #[test]
    fn test_serialize_multiple() {
        let custom = CustomIssues::new();
        custom.chain().at("field").unwrap().issue("error1");
        custom
            .chain()
            .at("field")
            .and_then(|c| c.at("nested"))
            .unwrap()
            .issue("error2");

        assert_eq!(
            serde_json::to_value(&custom).unwrap(),
            json!([
                {"code": "custom", "path": ["field"], "message": "error1", "params": {}},
                {"code": "custom", "path": ["field", "nested"], "message": "error2", "params": {}}
            ])
        );
        assert_eq!(custom.into_vec().len(), 2);
    }
}
