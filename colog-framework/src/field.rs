use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::{
    collections::{BTreeMap, BTreeSet},
    error::Error,
    fmt,
    sync::Arc,
};
use thiserror::Error;

lazy_static! {
    static ref MATCH_EVERYTHING: Regex = Regex::new(r"\A").unwrap();
}

/// typed value of an extracted attribute or of a fixed callback argument
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Timestamp(NaiveDateTime),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&NaiveDateTime> {
        match self {
            Value::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// typed equality, falling back to comparing the rendered text
    /// (a layout saying `is: 404` should still match a captured "404")
    pub fn loosely_eq(&self, other: &Value) -> bool {
        self == other || self.to_string() == other.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Timestamp(ts) => write!(f, "{}", ts),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Timestamp(value)
    }
}

/// keyword arguments handed to a field callback
pub type Kwargs = BTreeMap<String, Value>;
pub type CallbackError = Box<dyn Error + Send + Sync + 'static>;
pub type CallbackResult = Result<Value, CallbackError>;
pub type Callback = Arc<dyn Fn(&Kwargs) -> CallbackResult + Send + Sync>;

/// post-processing applied to one captured field
#[derive(Clone)]
pub struct FieldSpec {
    callback: Callback,
    kwargs: Kwargs,
    argument: String,
}

impl FieldSpec {
    /// `argument` names the keyword that receives the captured text
    pub fn new<F>(callback: F, argument: impl Into<String>) -> Self
    where
        F: Fn(&Kwargs) -> CallbackResult + Send + Sync + 'static,
    {
        Self::from_callback(Arc::new(callback), argument)
    }

    pub fn from_callback(callback: Callback, argument: impl Into<String>) -> Self {
        Self {
            callback,
            kwargs: Kwargs::new(),
            argument: argument.into(),
        }
    }

    pub fn with_kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(name.into(), value.into());
        self
    }

    pub fn argument(&self) -> &str {
        &self.argument
    }

    pub fn kwargs(&self) -> &Kwargs {
        &self.kwargs
    }

    pub fn apply(&self, captured: &str) -> CallbackResult {
        let mut kwargs = self.kwargs.clone();
        kwargs.insert(self.argument.clone(), Value::Text(captured.to_string()));
        (self.callback)(&kwargs)
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("kwargs", &self.kwargs)
            .field("argument", &self.argument)
            .finish_non_exhaustive()
    }
}

/// record pattern, always matched at the start of the entry text
#[derive(Debug, Clone)]
pub struct RecordPattern {
    source: String,
    regex: Regex,
}

impl RecordPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(r"\A(?:{})", pattern))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn match_everything() -> Self {
        Self {
            source: String::new(),
            regex: MATCH_EVERYTHING.clone(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn captures<'h>(&self, raw: &'h str) -> Option<Captures<'h>> {
        self.regex.captures(raw)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.regex.capture_names().flatten()
    }
}

impl Default for RecordPattern {
    fn default() -> Self {
        Self::match_everything()
    }
}

/// search pattern plus optional "where" constraints on its named groups
#[derive(Debug, Clone)]
pub struct TagSpec {
    pattern: Regex,
    constraints: BTreeMap<String, BTreeSet<String>>,
}

impl TagSpec {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            constraints: BTreeMap::new(),
        })
    }

    pub fn with_constraint<I, S>(mut self, group: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints
            .entry(group.into())
            .or_default()
            .extend(allowed.into_iter().map(Into::into));
        self
    }

    pub fn matches(&self, raw: &str) -> bool {
        let Some(caps) = self.pattern.captures(raw) else {
            return false;
        };

        self.constraints.iter().all(|(group, allowed)| {
            caps.name(group)
                .is_some_and(|m| allowed.contains(m.as_str()))
        })
    }
}

#[derive(Debug, Error)]
#[error("failed to post-process field '{field}': {source}")]
pub struct FieldError {
    pub field: String,
    #[source]
    pub source: CallbackError,
}

/// extracted attributes, kept in capture-group order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    items: Vec<(String, Value)>,
}

impl Attributes {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.items
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.items.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// apply the record pattern to `raw` and post-process every captured group
///
/// a non-matching record yields no attributes; groups that did not take part
/// in the match are left out
pub fn extract(
    raw: &str,
    record: &RecordPattern,
    fields: &BTreeMap<String, FieldSpec>,
) -> Result<Attributes, FieldError> {
    let Some(caps) = record.captures(raw) else {
        return Ok(Attributes::default());
    };

    let mut items = Vec::new();
    for name in record.group_names() {
        let Some(captured) = caps.name(name) else {
            continue;
        };

        let value = match fields.get(name) {
            Some(spec) => spec
                .apply(captured.as_str())
                .map_err(|source| FieldError {
                    field: name.to_string(),
                    source,
                })?,
            None => Value::Text(captured.as_str().to_string()),
        };
        items.push((name.to_string(), value));
    }

    Ok(Attributes { items })
}

pub fn extract_tags(raw: &str, tags: &BTreeMap<String, TagSpec>) -> BTreeSet<String> {
    tags.iter()
        .filter(|(_, spec)| spec.matches(raw))
        .map(|(name, _)| name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LINE: &str = "Space separated log line";
    const PATTERN: &str = r"^(?P<a>\w+)\s\w+\s(?P<b>\w+)\s(?P<c>\w+)";

    fn reverse(kwargs: &Kwargs) -> CallbackResult {
        let s = kwargs.get("s").and_then(Value::as_str).ok_or("missing 's'")?;
        Ok(Value::Text(s.chars().rev().collect()))
    }

    #[test]
    fn test_extract_named_groups() {
        let record = RecordPattern::new(PATTERN).unwrap();
        let attributes = extract(LINE, &record, &BTreeMap::new()).unwrap();

        let expected: Attributes = [("a", "Space"), ("b", "log"), ("c", "line")]
            .into_iter()
            .collect();
        assert_eq!(attributes, expected);
    }

    #[test]
    fn test_extract_no_match_is_empty() {
        let record = RecordPattern::new(r"(?P<date>\d{4}-\d{2}-\d{2})").unwrap();
        let attributes = extract(LINE, &record, &BTreeMap::new()).unwrap();
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_record_pattern_is_anchored() {
        let record = RecordPattern::new(r"(?P<word>log)").unwrap();
        assert!(extract(LINE, &record, &BTreeMap::new()).unwrap().is_empty());
    }

    #[test]
    fn test_extract_skips_missing_optional_group() {
        let record = RecordPattern::new(r"(?P<a>\w+)(?:-(?P<b>\w+))?").unwrap();
        let attributes = extract("alpha beta", &record, &BTreeMap::new()).unwrap();
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes.get("b"), None);
    }

    #[test]
    fn test_extract_applies_field_callback() {
        let record = RecordPattern::new(PATTERN).unwrap();
        let mut fields = BTreeMap::new();
        fields.insert("a".to_string(), FieldSpec::new(reverse, "s"));

        let attributes = extract(LINE, &record, &fields).unwrap();
        assert_eq!(attributes.get("a"), Some(&Value::from("ecapS")));
        assert_eq!(attributes.get("b"), Some(&Value::from("log")));
    }

    #[test]
    fn test_extract_passes_fixed_kwargs() {
        let record = RecordPattern::new(r"^\w+\s(?P<a>\w+)").unwrap();
        let repeat = FieldSpec::new(
            |kwargs: &Kwargs| {
                let times = kwargs.get("times").and_then(Value::as_i64).ok_or("times")?;
                let value = kwargs.get("value").and_then(Value::as_str).ok_or("value")?;
                Ok(Value::Text(value.repeat(times as usize)))
            },
            "value",
        )
        .with_kwarg("times", 2i64);
        let fields = BTreeMap::from([("a".to_string(), repeat)]);

        let attributes = extract(LINE, &record, &fields).unwrap();
        assert_eq!(
            attributes.get("a"),
            Some(&Value::from("separatedseparated"))
        );
    }

    #[test]
    fn test_extract_propagates_callback_failure() {
        let record = RecordPattern::new(PATTERN).unwrap();
        let failing = FieldSpec::new(|_: &Kwargs| Err("boom".into()), "value");
        let fields = BTreeMap::from([("b".to_string(), failing)]);

        let err = extract(LINE, &record, &fields).unwrap_err();
        assert_eq!(err.field, "b");
        assert_eq!(err.to_string(), "failed to post-process field 'b': boom");
    }

    #[test]
    fn test_tag_without_constraints() {
        let tags = BTreeMap::from([
            ("log".to_string(), TagSpec::new(r"\blog\b").unwrap()),
            ("error".to_string(), TagSpec::new("ERROR").unwrap()),
        ]);
        let matched = extract_tags(LINE, &tags);
        assert_eq!(matched, BTreeSet::from(["log".to_string()]));
    }

    #[test]
    fn test_tag_where_constraint() {
        let spec = TagSpec::new(r"status=(?P<status>\d+)")
            .unwrap()
            .with_constraint("status", ["500", "503"]);

        assert!(spec.matches("GET / status=503 took 3ms"));
        assert!(!spec.matches("GET / status=200 took 1ms"));
        assert!(!spec.matches("GET / took 1ms"));
    }

    #[test]
    fn test_tag_constraint_on_missing_group_fails() {
        let spec = TagSpec::new(r"(?P<level>WARN)|(?P<other>ERROR)")
            .unwrap()
            .with_constraint("level", ["WARN"]);
        assert!(!spec.matches("ERROR disk full"));
    }

    #[test]
    fn test_value_loosely_eq() {
        assert!(Value::from("404").loosely_eq(&Value::Integer(404)));
        assert!(!Value::from("404").loosely_eq(&Value::Integer(500)));
    }
}
