use colog_framework::{
    ColorPair, ColorTag, EntryPostProcessor, HighlightRule, Layout, LogEntry, LogStore,
    StoreError, Value,
    field::{FieldSpec, Kwargs, RecordPattern, TagSpec},
    highlight::highlight_color,
    segmenter::BoundaryRule,
};
use pretty_assertions::assert_eq;
use std::{fs, path::Path};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn pattern(dir: &TempDir, glob: &str) -> String {
    dir.path().join(glob).to_string_lossy().into_owned()
}

fn dated_layout() -> Layout {
    let mut layout = Layout {
        line_start: BoundaryRule::new(r"\d{4}-\d{2}-\d{2} ").unwrap(),
        line_format: RecordPattern::new(r"(?P<date>\S+) (?P<level>\w+) (?s:(?P<message>.*))")
            .unwrap(),
        ..Layout::default()
    };
    layout.tags.insert(
        "failure".to_string(),
        TagSpec::new(r"(?P<level>ERROR|FATAL)")
            .unwrap()
            .with_constraint("level", ["ERROR", "FATAL"]),
    );
    layout
}

#[test]
fn test_open_reads_files_in_natural_order() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "app_10.log", "2024-01-03 INFO third\n");
    write(dir.path(), "app_2.log", "2024-01-01 INFO first\n");
    write(
        dir.path(),
        "app_03.log",
        "2024-01-02 ERROR second\n  at frame one\n  at frame two\n",
    );

    let store = LogStore::open(&[pattern(&dir, "app_*.log")], &dated_layout(), &[]).unwrap();

    let names: Vec<String> = store
        .files()
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["app_2.log", "app_03.log", "app_10.log"]);

    assert_eq!(store.total(), 3);
    let second = store.entry(1).unwrap();
    assert_eq!(second.raw(), "2024-01-02 ERROR second\n  at frame one\n  at frame two");
    assert_eq!(second.attribute("level"), Some(&Value::from("ERROR")));
    assert_eq!(
        second.attribute("message"),
        Some(&Value::from("second\n  at frame one\n  at frame two"))
    );
    assert!(second.has_tag("failure"));
    assert!(!store.entry(0).unwrap().has_tag("failure"));
}

#[test]
fn test_open_normalizes_crlf_line_endings() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "win.log", "1 alpha\r\n  cont\r\n2 beta\r\n");

    let layout = Layout {
        line_start: BoundaryRule::new(r"\d ").unwrap(),
        line_format: RecordPattern::new(r"(?P<n>\d) (?P<rest>.*)").unwrap(),
        ..Layout::default()
    };
    let store = LogStore::open(&[pattern(&dir, "win.log")], &layout, &[]).unwrap();

    assert_eq!(store.total(), 2);
    let first = store.entry(0).unwrap();
    assert_eq!(first.raw(), "1 alpha\n  cont");
    assert_eq!(first.attribute("rest"), Some(&Value::from("alpha")));
    assert_eq!(store.entry(1).unwrap().raw(), "2 beta");

    let rules = [HighlightRule::field("rest", "alpha", ColorPair::new(1, -1))];
    assert_eq!(
        highlight_color(&rules, first),
        ColorTag::Pair(ColorPair::new(1, -1))
    );
}

#[test]
fn test_open_unions_multiple_patterns() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.log", "2024-01-01 INFO a\n");
    write(dir.path(), "b.txt", "2024-01-02 INFO b\n");

    let patterns = [pattern(&dir, "*.log"), pattern(&dir, "*.txt")];
    let store = LogStore::open(&patterns, &dated_layout(), &[]).unwrap();
    assert_eq!(store.total(), 2);
    assert_eq!(store.files().len(), 2);
}

#[test]
fn test_open_without_matches_yields_one_empty_entry() {
    let dir = TempDir::new().unwrap();
    let store = LogStore::open(&[pattern(&dir, "*.log")], &dated_layout(), &[]).unwrap();

    assert!(store.files().is_empty());
    assert_eq!(store.total(), 1);
    assert_eq!(store.entry(0).unwrap().raw(), "");
}

#[test]
fn test_open_empty_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "empty.log", "");
    let store = LogStore::open(&[pattern(&dir, "empty.log")], &Layout::default(), &[]).unwrap();
    assert_eq!(store.total(), 1);
    assert_eq!(store.entry(0).unwrap().raw(), "");
}

#[test]
fn test_open_rejects_invalid_pattern() {
    let err = LogStore::open(&["[unclosed"], &Layout::default(), &[]).unwrap_err();
    assert!(matches!(err, StoreError::Pattern { .. }));
}

#[test]
fn test_field_failure_names_field_and_entry() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.log", "2024-01-01 LOUD shouting\n");

    let mut layout = dated_layout();
    layout.fields.insert(
        "level".to_string(),
        FieldSpec::new(
            |kwargs: &Kwargs| match kwargs.get("value").and_then(Value::as_str) {
                Some("INFO" | "ERROR") => Ok(kwargs["value"].clone()),
                _ => Err("unknown level".into()),
            },
            "value",
        ),
    );

    let err = LogStore::open(&[pattern(&dir, "bad.log")], &layout, &[]).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("2024-01-01 LOUD shouting"), "{}", message);
    assert!(message.contains("'level'"), "{}", message);
}

struct Interpret;

impl EntryPostProcessor for Interpret {
    fn name(&self) -> &str {
        "interpret"
    }

    fn post_construct(&self, entry: &mut LogEntry, _layout: &Layout) {
        if let Some(level) = entry.attribute("level") {
            let text = format!("[{}]", level);
            entry.set_interpreted(text);
        }
    }
}

#[test]
fn test_processors_run_for_every_entry() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "app.log",
        "2024-01-01 INFO one\n2024-01-02 WARN two\n",
    );

    let processors: Vec<Box<dyn EntryPostProcessor>> = vec![Box::new(Interpret)];
    let store = LogStore::open(&[pattern(&dir, "app.log")], &dated_layout(), &processors).unwrap();

    let interpreted: Vec<Option<&str>> = store
        .entries(0, store.total())
        .iter()
        .map(LogEntry::interpreted)
        .collect();
    assert_eq!(interpreted, vec![Some("[INFO]"), Some("[WARN]")]);
}
