mod common;

use common::{TodoList, TodoSchema};
use form_chain::{
    entries_from_urlencoded, parse_form, parse_form_any, safe_parse_form, FieldChain, FileBlob,
    FlatEntry, FormError, FormValue, Navigate, ReconstructError, Reconstructor,
};
use form_path::{path, Limits, ValidationError, INDEX_CEILING};
use serde_json::json;

fn rebuild(entries: &[(&str, &str)]) -> Result<FormValue, ReconstructError> {
    parse_form_any(entries.iter().map(|&(name, value)| FlatEntry::text(name, value)))
}

#[test]
fn reconstruction_matrix() {
    let cases = [
        (vec![("ding", "dong")], json!({"ding": "dong"})),
        (vec![("ding.dong", "value")], json!({"ding": {"dong": "value"}})),
        (
            vec![("todos[0].task", "Buy milk")],
            json!({"todos": [{"task": "Buy milk"}]}),
        ),
        (
            vec![("things[1].ding", "dong")],
            json!({"things": [null, {"ding": "dong"}]}),
        ),
        (vec![("['ding.dong']", "value")], json!({"ding.dong": "value"})),
        (
            vec![("a.['b.c'].d", "1"), ("a['b.c'].e", "2")],
            json!({"a": {"b.c": {"d": "1", "e": "2"}}}),
        ),
        (
            vec![("m[0][1]", "x"), ("m[1][0]", "y")],
            json!({"m": [[null, "x"], ["y"]]}),
        ),
        (vec![("a.0", "key"), ("a.1", "other")], json!({"a": {"0": "key", "1": "other"}})),
        (vec![], json!({})),
    ];

    for (entries, expected) in cases {
        let tree = rebuild(&entries).expect("reconstruct ok");
        assert_eq!(tree.to_json(), expected, "entries {entries:?}");
    }
}

#[test]
fn conflict_matrix() {
    let cases = [
        (vec![("x.y", "1"), ("x[0]", "2")], path!["x"]),
        (vec![("x[0]", "1"), ("x.y", "2")], path!["x"]),
        (vec![("x", "1"), ("x.y", "2")], path!["x"]),
        (vec![("x.y", "1"), ("x", "2")], path!["x"]),
        (vec![("x[0].y", "1"), ("x[0][0]", "2")], path!["x", 0]),
        (vec![("x.0", "1"), ("x[0]", "2")], path!["x"]),
    ];

    for (entries, at) in cases {
        match rebuild(&entries) {
            Err(ReconstructError::StructuralConflict { path, .. }) => {
                assert_eq!(path, at, "entries {entries:?}")
            }
            other => panic!("expected conflict for {entries:?}, got {other:?}"),
        }
    }
}

#[test]
fn generated_names_reconstruct_at_their_path() {
    let fields = FieldChain::new("form");
    let cases = [
        path!["title"],
        path!["todos", 0, "task"],
        path!["meta", "a b", "c.d"],
        path!["grid", 2, 3],
    ];

    for case in cases {
        let name = fields.walk(&case).unwrap().name();
        let tree = parse_form_any(vec![FlatEntry::text(name.clone(), "v")]).unwrap();
        assert_eq!(
            tree.get(case.steps()).and_then(FormValue::as_text),
            Some("v"),
            "name {name}"
        );
    }
}

#[test]
fn files_pass_through() {
    let file = FileBlob::new("chucknorris.txt", "text/plain", b"(-_-)".to_vec());
    let tree = parse_form_any(vec![
        FlatEntry::file("upload.file", file.clone()),
        FlatEntry::text("upload.note", "kick"),
    ])
    .unwrap();

    let stored = tree
        .get(path!["upload", "file"].steps())
        .and_then(FormValue::as_file)
        .unwrap();
    assert!(stored.same_bytes(&file));
    assert_eq!(stored.size(), 5);
    assert_eq!(
        tree.to_json(),
        json!({
            "upload": {
                "file": {"name": "chucknorris.txt", "type": "text/plain", "size": 5},
                "note": "kick"
            }
        })
    );
}

#[test]
fn urlencoded_bodies() {
    let body = b"title=Chores&todos%5B0%5D.task=Buy+milk&todos%5B1%5D.task=Walk+dog";
    let tree = parse_form_any(entries_from_urlencoded(body)).unwrap();
    assert_eq!(
        tree.to_json(),
        json!({"title": "Chores", "todos": [{"task": "Buy milk"}, {"task": "Walk dog"}]})
    );
}

#[test]
fn entries_round_trip_through_the_tree() {
    let tree = rebuild(&[
        ("b.x", "1"),
        ("a[1]", "2"),
        ("['c d']", "3"),
    ])
    .unwrap();
    let names: Vec<String> = tree.to_entries().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["b.x", "a[1]", "['c d']"]);
    assert_eq!(parse_form_any(tree.to_entries()).unwrap(), tree);
}

#[test]
fn limits_are_configurable() {
    let limits: Limits = serde_json::from_value(json!({"max_depth": 2})).unwrap();
    let reconstructor = Reconstructor::new(limits);
    assert!(reconstructor
        .reconstruct(vec![FlatEntry::text("a.b", "ok")])
        .is_ok());
    assert!(matches!(
        reconstructor.reconstruct(vec![FlatEntry::text("a.b.c", "deep")]),
        Err(ReconstructError::LimitExceeded { .. })
    ));

    let open = Reconstructor::new(Limits::unbounded());
    assert!(open
        .reconstruct(vec![FlatEntry::text("a[20000]", "far")])
        .is_ok());
}

#[test]
fn largest_index_is_rejected_even_without_limits() {
    let name = format!("a[{}]", usize::MAX);
    for limits in [
        Limits::unbounded(),
        Limits {
            max_index: usize::MAX,
            ..Limits::default()
        },
    ] {
        let result = Reconstructor::new(limits).reconstruct(vec![FlatEntry::text(name.clone(), "x")]);
        match result {
            Err(ReconstructError::LimitExceeded { name: rejected, source }) => {
                assert_eq!(rejected, name);
                assert_eq!(
                    source,
                    ValidationError::IndexTooLarge {
                        index: usize::MAX,
                        max: INDEX_CEILING,
                    }
                );
            }
            other => panic!("expected a limit error, got {other:?}"),
        }
    }
}

#[test]
fn parse_form_validates_tree() {
    let schema = TodoSchema::new();
    let parsed = parse_form(
        &schema,
        entries_from_urlencoded(b"title=Chores&todos%5B0%5D.task=Buy+milk"),
    )
    .unwrap();
    assert_eq!(
        parsed,
        TodoList {
            title: "Chores".to_string(),
            tasks: vec!["Buy milk".to_string()],
        }
    );

    let failure = safe_parse_form(
        &schema,
        vec![
            FlatEntry::text("title", "Chores"),
            FlatEntry::text("todos[1].task", "ab"),
        ],
    )
    .unwrap()
    .unwrap_err();
    let paths: Vec<String> = failure.issues.iter().map(|i| i.path.to_string()).collect();
    assert_eq!(paths, vec!["todos[0]", "todos[1].task"]);

    assert!(matches!(
        parse_form(&schema, vec![FlatEntry::text("title", "")]),
        Err(FormError::Validation(_))
    ));
}
