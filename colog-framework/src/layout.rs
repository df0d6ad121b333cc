use crate::{
    field::{FieldSpec, RecordPattern, TagSpec, Value},
    highlight::HighlightRule,
    segmenter::BoundaryRule,
};
use std::collections::BTreeMap;

/// parsed layout definition shared by the store, the plugins and the pager
///
/// `Layout::default()` treats every line as an entry and extracts nothing
#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// first line of an entry
    pub line_start: BoundaryRule,
    /// record pattern whose named groups become attributes
    pub line_format: RecordPattern,
    pub fields: BTreeMap<String, FieldSpec>,
    pub tags: BTreeMap<String, TagSpec>,
    pub highlight: Vec<HighlightRule>,
    /// plugin identifiers, in registration order
    pub plugins: Vec<String>,
    /// free-form settings read by plugins at mount time
    pub options: BTreeMap<String, Value>,
}

impl Layout {
    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }
}
