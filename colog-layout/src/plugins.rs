use crate::error::LayoutError;
use anyhow::{Result, anyhow};
use colog_framework::{EntryPostProcessor, Layout, LogEntry, Value};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref PLACEHOLDER_RE: Regex = Regex::new(r"\{(\w+)\}").unwrap();
}

const FIRST_LINE: &str = "first_line";
const TEMPLATE: &str = "template";
const KNOWN: &[&str] = &[FIRST_LINE, TEMPLATE];

pub fn is_known(name: &str) -> bool {
    KNOWN.contains(&name)
}

/// instantiate the named plugins in order
pub fn load<S: AsRef<str>>(names: &[S]) -> Result<Vec<Box<dyn EntryPostProcessor>>, LayoutError> {
    names
        .iter()
        .map(|name| -> Result<Box<dyn EntryPostProcessor>, LayoutError> {
            match name.as_ref() {
                FIRST_LINE => Ok(Box::new(FirstLine)),
                TEMPLATE => Ok(Box::new(Template::default())),
                other => Err(LayoutError::UnknownPlugin(other.to_string())),
            }
        })
        .collect()
}

/// interpreted text is the first non-blank line of the entry
pub struct FirstLine;

impl EntryPostProcessor for FirstLine {
    fn name(&self) -> &str {
        FIRST_LINE
    }

    fn post_construct(&self, entry: &mut LogEntry, _layout: &Layout) {
        let first = entry
            .raw()
            .lines()
            .map(str::trim_end)
            .find(|line| !line.trim().is_empty())
            .map(str::to_string);
        if let Some(line) = first {
            entry.set_interpreted(line);
        }
    }
}

/// interpreted text rendered from `options.template`, e.g. `{level} {message}`
///
/// entries missing any referenced attribute keep their previous text
#[derive(Default)]
pub struct Template {
    template: String,
}

impl Template {
    fn render(&self, entry: &LogEntry) -> Option<String> {
        let mut complete = true;
        let rendered = PLACEHOLDER_RE.replace_all(&self.template, |caps: &Captures| {
            match entry.attribute(&caps[1]) {
                Some(value) => value.to_string(),
                None => {
                    complete = false;
                    String::new()
                }
            }
        });
        complete.then(|| rendered.into_owned())
    }
}

impl EntryPostProcessor for Template {
    fn name(&self) -> &str {
        TEMPLATE
    }

    fn mount(&mut self, layout: &mut Layout) -> Result<()> {
        match layout.option("template") {
            Some(Value::Text(template)) => {
                self.template = template.clone();
                Ok(())
            }
            Some(other) => Err(anyhow!("option 'template' must be text, got {}", other)),
            None => Err(anyhow!("missing option 'template'")),
        }
    }

    fn post_construct(&self, entry: &mut LogEntry, _layout: &Layout) {
        if let Some(text) = self.render(entry) {
            entry.set_interpreted(text);
        }
    }
}
