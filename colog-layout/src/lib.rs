//! Loads log layouts from YAML documents.
//!
//! ```yaml
//! line_start: '\d{4}-\d{2}-\d{2} '
//! line_format: '(?P<date>\S+ \S+) (?P<level>\w+) (?s:(?P<message>.*))'
//! fields:
//!   date: { callback: strptime, kwargs: { format: '%Y-%m-%d %H:%M:%S' } }
//! tags:
//!   failure: { pattern: '(?P<level>ERROR|FATAL)', where: { level: [ERROR, FATAL] } }
//! highlight:
//!   - { match: field, field: level, is: ERROR, color: [1, -1] }
//!   - { match: tag, field: failure, color: [3, -1] }
//! plugins: [first_line]
//! ```

pub mod callbacks;
mod error;
pub mod plugins;
mod raw;

pub use error::LayoutError;

use colog_framework::Layout;
use lazy_static::lazy_static;
use raw::RawLayout;
use regex::Regex;
use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};

lazy_static! {
    // `!!python/strptime` resolves in the yaml.org namespace, which serde_yaml drops
    static ref PYTHON_TAG_RE: Regex = Regex::new(r"(^|[\s\[{,])!!python/").unwrap();
}

const APP_DIR: &str = "colog";
const LAYOUT_FILE_NAME: &str = "layout.yaml";

/// rewrite `!!python/name` tags to local `!name` tags
fn localize_python_tags(text: &str) -> Cow<'_, str> {
    PYTHON_TAG_RE.replace_all(text, "${1}!")
}

/// parse a layout document; an empty document is the default layout
pub fn load_from_str(text: &str) -> Result<Layout, LayoutError> {
    if text.trim().is_empty() {
        return Ok(Layout::default());
    }
    let text = localize_python_tags(text);
    // comment-only documents are null
    let document: serde_yaml::Value = serde_yaml::from_str(&text)?;
    if document.is_null() {
        return Ok(Layout::default());
    }
    let raw: RawLayout = serde_yaml::from_str(&text)?;
    raw.into_layout()
}

pub fn load_from_path(path: &Path) -> Result<Layout, LayoutError> {
    let text = fs::read_to_string(path).map_err(|source| LayoutError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let layout = load_from_str(&text)?;
    log::debug!("Loaded layout from {}", path.display());
    Ok(layout)
}

/// `<config dir>/colog/layout.yaml`
pub fn default_layout_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(LAYOUT_FILE_NAME))
}

/// the explicit layout if given, else the user's layout file if present, else the default layout
pub fn resolve(explicit: Option<&Path>) -> Result<Layout, LayoutError> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }

    match default_layout_path() {
        Some(path) if path.is_file() => load_from_path(&path),
        _ => {
            log::info!("No layout file found, every line is an entry");
            Ok(Layout::default())
        }
    }
}
