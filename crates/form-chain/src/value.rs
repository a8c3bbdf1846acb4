//! Submitted values: flat entries in, nested trees out.

use std::sync::Arc;

use form_path::{format_path, Path, PathStep};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{json, Map, Value};

/// An uploaded file, passed through reconstruction untouched.
///
/// Cloning shares the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlob {
    pub name: String,
    pub content_type: String,
    pub bytes: Arc<[u8]>,
}

impl FileBlob {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Whether both blobs share the same byte buffer.
    pub fn same_bytes(&self, other: &FileBlob) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }
}

/// A node of a reconstructed tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormValue {
    /// An array slot no entry wrote to.
    #[default]
    Empty,
    Text(String),
    File(FileBlob),
    List(Vec<FormValue>),
    Map(IndexMap<String, FormValue>),
}

impl FormValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            FormValue::Empty => "empty slot",
            FormValue::Text(_) => "text value",
            FormValue::File(_) => "file value",
            FormValue::List(_) => "array",
            FormValue::Map(_) => "object",
        }
    }

    pub fn is_empty_slot(&self) -> bool {
        matches!(self, FormValue::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileBlob> {
        match self {
            FormValue::File(file) => Some(file),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FormValue]> {
        match self {
            FormValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, FormValue>> {
        match self {
            FormValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Get a value by path.
    ///
    /// Returns `None` if the path does not exist or crosses a leaf.
    pub fn get(&self, path: &[PathStep]) -> Option<&FormValue> {
        let mut current = self;
        for step in path {
            current = match (current, step) {
                (FormValue::List(items), PathStep::Index(idx)) => items.get(*idx)?,
                (FormValue::Map(map), PathStep::Key(key)) => map.get(key)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Every text/file leaf with its path, in tree order. Empty slots are
    /// skipped.
    pub fn leaves(&self) -> Vec<(Path, &FormValue)> {
        let mut out = Vec::new();
        collect_leaves(self, Path::root(), &mut out);
        out
    }

    /// Flatten back into submission entries, one per leaf.
    pub fn to_entries(&self) -> Vec<FlatEntry> {
        self.leaves()
            .into_iter()
            .map(|(path, value)| FlatEntry::new(format_path(path.steps()), value.clone()))
            .collect()
    }

    /// JSON view of the tree. Empty slots become `null`, files become
    /// `{"name", "type", "size"}`.
    pub fn to_json(&self) -> Value {
        match self {
            FormValue::Empty => Value::Null,
            FormValue::Text(text) => Value::String(text.clone()),
            FormValue::File(file) => json!({
                "name": file.name,
                "type": file.content_type,
                "size": file.size(),
            }),
            FormValue::List(items) => Value::Array(items.iter().map(FormValue::to_json).collect()),
            FormValue::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

fn collect_leaves<'v>(value: &'v FormValue, path: Path, out: &mut Vec<(Path, &'v FormValue)>) {
    match value {
        FormValue::Empty => {}
        FormValue::Text(_) | FormValue::File(_) => out.push((path, value)),
        FormValue::List(items) => {
            for (idx, item) in items.iter().enumerate() {
                collect_leaves(item, path.child(idx), out);
            }
        }
        FormValue::Map(map) => {
            for (key, item) in map {
                collect_leaves(item, path.child(key), out);
            }
        }
    }
}

impl Serialize for FormValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<&str> for FormValue {
    fn from(text: &str) -> Self {
        FormValue::Text(text.to_string())
    }
}

impl From<String> for FormValue {
    fn from(text: String) -> Self {
        FormValue::Text(text)
    }
}

impl From<FileBlob> for FormValue {
    fn from(file: FileBlob) -> Self {
        FormValue::File(file)
    }
}

/// One `(name, value)` pair of a raw submission.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatEntry {
    pub name: String,
    pub value: FormValue,
}

impl FlatEntry {
    pub fn new(name: impl Into<String>, value: impl Into<FormValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, FormValue::Text(value.into()))
    }

    pub fn file(name: impl Into<String>, file: FileBlob) -> Self {
        Self::new(name, FormValue::File(file))
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for FlatEntry {
    fn from((name, value): (N, V)) -> Self {
        FlatEntry::text(name, value)
    }
}

/// Decode an `application/x-www-form-urlencoded` body.
///
/// ```
/// use form_chain::entries_from_urlencoded;
///
/// let entries = entries_from_urlencoded(b"todos%5B0%5D.task=Buy+milk");
/// assert_eq!(entries[0].name, "todos[0].task");
/// assert_eq!(entries[0].value.as_text(), Some("Buy milk"));
/// ```
pub fn entries_from_urlencoded(body: &[u8]) -> Vec<FlatEntry> {
    url::form_urlencoded::parse(body)
        .map(|(name, value)| FlatEntry::text(name, value))
        .collect()
}

/// Read `name=value` lines; blank lines are skipped and a line without `=`
/// is a name with an empty value.
pub fn entries_from_lines(text: &str) -> Vec<FlatEntry> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once('=') {
            Some((name, value)) => FlatEntry::text(name, value),
            None => FlatEntry::text(line, ""),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_path::path;

    fn tree() -> FormValue {
        FormValue::Map(IndexMap::from([
            (
                "todos".to_string(),
                FormValue::List(vec![
                    FormValue::Empty,
                    FormValue::Map(IndexMap::from([(
                        "task".to_string(),
                        FormValue::from("Buy milk"),
                    )])),
                ]),
            ),
            ("title".to_string(), FormValue::from("Chores")),
        ]))
    }

    #[test]
    fn test_get() {
        let tree = tree();
        assert_eq!(
            tree.get(path!["todos", 1usize, "task"].steps()),
            Some(&FormValue::from("Buy milk"))
        );
        assert_eq!(
            tree.get(path!["todos", 0usize].steps()),
            Some(&FormValue::Empty)
        );
        assert_eq!(tree.get(path!["todos", "task"].steps()), None);
        assert_eq!(tree.get(path!["title", "x"].steps()), None);
        assert_eq!(tree.get(&[]), Some(&tree));
    }

    #[test]
    fn test_leaves_skip_empty_slots() {
        let tree = tree();
        let names: Vec<String> = tree.to_entries().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["todos[1].task", "title"]);
    }

    #[test]
    fn test_to_json() {
        let mut tree = tree();
        if let FormValue::Map(map) = &mut tree {
            map.insert(
                "avatar".to_string(),
                FormValue::File(FileBlob::new("me.png", "image/png", vec![1u8, 2, 3])),
            );
        }
        assert_eq!(
            tree.to_json(),
            json!({
                "todos": [null, {"task": "Buy milk"}],
                "title": "Chores",
                "avatar": {"name": "me.png", "type": "image/png", "size": 3}
            })
        );
    }

    #[test]
    fn test_file_clone_shares_bytes() {
        let file = FileBlob::new("chucknorris.txt", "text/plain", b"(-_-)".to_vec());
        let value = FormValue::from(file.clone());
        assert!(value.as_file().unwrap().same_bytes(&file));
    }

    #[test]
    fn test_urlencoded() {
        let entries = entries_from_urlencoded(b"a=1&b%5B0%5D=x+y&%5B%27c.d%27%5D=%C3%A9");
        assert_eq!(
            entries,
            vec![
                FlatEntry::text("a", "1"),
                FlatEntry::text("b[0]", "x y"),
                FlatEntry::text("['c.d']", "é"),
            ]
        );
    }

    #[test]
    fn test_lines() {
        let entries = entries_from_lines("ding=dong\n\nflag\nurl=a=b\n");
        assert_eq!(
            entries,
            vec![
                FlatEntry::text("ding", "dong"),
                FlatEntry::text("flag", ""),
                FlatEntry::text("url", "a=b"),
            ]
        );
    }
}
