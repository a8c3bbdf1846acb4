#![allow(dead_code)]

use form_chain::{
    FormValue, Issue, IssueCode, SafeParse, Schema, Shape, StringCheck, ValidationFailure,
};
use form_path::{path, Path};

#[derive(Debug, Clone, PartialEq)]
pub struct TodoList {
    pub title: String,
    pub tasks: Vec<String>,
}

/// `{ title: string(min 1), todos: [{ task: string(min 3), done?: boolean }] }`
pub struct TodoSchema {
    shape: Shape,
}

impl TodoSchema {
    pub fn new() -> Self {
        Self {
            shape: Shape::object([
                (
                    "title",
                    Shape::string_with(vec![StringCheck::Min { value: 1 }]),
                ),
                (
                    "todos",
                    Shape::array(Shape::object([
                        (
                            "task",
                            Shape::string_with(vec![StringCheck::Min { value: 3 }]),
                        ),
                        ("done", Shape::Boolean.optional()),
                    ])),
                ),
            ]),
        }
    }
}

impl Schema for TodoSchema {
    type Output = TodoList;

    fn safe_parse(&self, value: &FormValue) -> SafeParse<TodoList> {
        let mut issues = Vec::new();

        let title = text_at(value, &path!["title"]).unwrap_or_default();
        if title.is_empty() {
            issues.push(Issue::new(IssueCode::TooSmall, path!["title"], "Title is required"));
        }

        let mut tasks = Vec::new();
        let todos = value
            .get(path!["todos"].steps())
            .and_then(FormValue::as_list)
            .unwrap_or_default();
        for (idx, todo) in todos.iter().enumerate() {
            if todo.is_empty_slot() {
                issues.push(Issue::new(
                    IssueCode::InvalidType,
                    path!["todos", idx],
                    "Required",
                ));
                continue;
            }
            let task_path = path!["todos", idx, "task"];
            let task = text_at(value, &task_path).unwrap_or_default();
            if task.chars().count() < 3 {
                issues.push(Issue::new(IssueCode::TooSmall, task_path, "Too short"));
            } else {
                tasks.push(task.to_string());
            }
        }

        if issues.is_empty() {
            Ok(TodoList {
                title: title.to_string(),
                tasks,
            })
        } else {
            Err(ValidationFailure::new(issues))
        }
    }

    fn shape(&self) -> Option<&Shape> {
        Some(&self.shape)
    }
}

fn text_at<'v>(value: &'v FormValue, path: &Path) -> Option<&'v str> {
    value.get(path.steps()).and_then(FormValue::as_text)
}
