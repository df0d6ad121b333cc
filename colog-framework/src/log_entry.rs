use crate::{
    field::{self, Attributes, FieldError, Value},
    layout::Layout,
};
use std::{collections::BTreeSet, fmt};
use thiserror::Error;

/// placeholder shown instead of line breaks in single-row previews
pub const NEW_LINE_CHAR: char = '\u{B6}';
const ELLIPSIS: &str = "...";

#[derive(Debug, Error)]
#[error("cannot build log entry {raw:?}: {source}")]
pub struct EntryError {
    pub raw: String,
    #[source]
    pub source: FieldError,
}

/// one logical, possibly multi-line, log message
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    raw: String,
    attributes: Attributes,
    tags: BTreeSet<String>,
    interpreted: Option<String>,
}

impl LogEntry {
    /// extract attributes and tags from `raw` using the layout's record pattern,
    /// field callbacks and tag table
    pub fn new(raw: impl Into<String>, layout: &Layout) -> Result<Self, EntryError> {
        let raw = raw.into();
        let attributes = match field::extract(&raw, &layout.line_format, &layout.fields) {
            Ok(attributes) => attributes,
            Err(source) => return Err(EntryError { raw, source }),
        };
        let tags = field::extract_tags(&raw, &layout.tags);

        Ok(Self {
            raw,
            attributes,
            tags,
            interpreted: None,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn interpreted(&self) -> Option<&str> {
        self.interpreted.as_deref()
    }

    pub fn set_interpreted(&mut self, text: impl Into<String>) {
        self.interpreted = Some(text.into());
    }

    pub fn truncate(&self, width: usize) -> String {
        truncate_text(&self.raw, width)
    }

    /// like [`LogEntry::truncate`], preferring the interpreted text when a plugin set one
    pub fn interpreted_truncate(&self, width: usize) -> String {
        match &self.interpreted {
            Some(text) => truncate_text(text, width),
            None => self.truncate(width),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn truncate_text(text: &str, width: usize) -> String {
    let msg: Vec<char> = text
        .chars()
        .map(|c| if c == '\n' { NEW_LINE_CHAR } else { c })
        .collect();

    if msg.len() <= width {
        return msg.into_iter().collect();
    }
    if width < ELLIPSIS.len() {
        return ELLIPSIS[..width].to_string();
    }

    let mut truncated: String = msg[..width - ELLIPSIS.len()].iter().collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
