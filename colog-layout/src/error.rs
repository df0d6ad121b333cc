use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    //-------------------------------------------------------------------------
    // IO / Parsing
    //-------------------------------------------------------------------------
    #[error("failed to read layout file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid layout document: {0}")]
    Parse(#[from] serde_yaml::Error),

    //-------------------------------------------------------------------------
    // Content
    //-------------------------------------------------------------------------
    #[error("invalid pattern in {context}: {source}")]
    Pattern {
        context: String,
        #[source]
        source: regex::Error,
    },

    #[error("unknown callback '{callback}' for field '{field}'")]
    UnknownCallback { field: String, callback: String },

    #[error("unknown plugin '{0}'")]
    UnknownPlugin(String),

    #[error("invalid color in highlight rule {rule}: {reason}")]
    InvalidColor { rule: usize, reason: String },

    #[error("unsupported value for {context}: {reason}")]
    UnsupportedValue { context: String, reason: String },
}

impl LayoutError {
    pub(crate) fn pattern(context: impl Into<String>) -> impl FnOnce(regex::Error) -> Self {
        let context = context.into();
        move |source| Self::Pattern { context, source }
    }

    pub(crate) fn unsupported(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            context: context.into(),
            reason: reason.into(),
        }
    }
}
