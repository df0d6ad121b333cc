//! # colog-framework
//!
//! Core of a terminal pager for multi-line, structured log files.
//!
//! ## Overview
//!
//! Log files are read once, split into logical entries and turned into
//! [`LogEntry`] values carrying extracted attributes and tags. A small paging
//! loop then walks the entries one row or one page at a time, colors rows
//! according to highlight rules and shows a detail view for single entries.
//!
//! ## Core Concepts
//!
//! ### Layout
//!
//! A [`Layout`] describes one log format:
//!
//! - **boundary rule**: a line matching it starts a new entry, other lines are
//!   continuations of the current one
//! - **record pattern**: named capture groups become attributes
//! - **fields**: per-attribute post-processing callbacks (parse a timestamp,
//!   convert to an integer, ...)
//! - **tags**: named patterns, optionally constrained on their groups
//! - **highlight rules**: first match decides the row color
//!
//! ### Store and viewport
//!
//! [`LogStore`] owns every entry of a run and is immutable after
//! construction. [`Viewport`] is the visible window `[start, stop)` and keeps
//! it inside the store for every scroll operation.
//!
//! ### Rendering
//!
//! The pager only talks to a [`RenderDriver`]. [`TerminalDriver`] paints
//! through ratatui and reads keys from crossterm.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use colog_framework::{Layout, LogStore, field::RecordPattern, segmenter::BoundaryRule};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     use ratatui::{Terminal, backend::CrosstermBackend};
//!     use std::io;
//!
//!     let layout = Layout {
//!         line_start: BoundaryRule::new(r"\d{4}-\d{2}-\d{2} ")?,
//!         line_format: RecordPattern::new(r"(?P<date>\S+ \S+) (?P<level>\w+)")?,
//!         ..Layout::default()
//!     };
//!     let store = LogStore::open(&["app.log"], &layout, &[])?;
//!
//!     let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
//!     colog_framework::start(&mut terminal, &store, &layout)?;
//!     Ok(())
//! }
//! ```

pub mod driver;
pub mod field;
pub mod highlight;
pub mod layout;
pub mod log_entry;
pub mod log_store;
pub mod plugin;
pub mod segmenter;
pub mod terminal;
pub mod viewport;

// internal modules (not part of public API but needed for app)
pub(crate) mod app;
pub(crate) mod content_line_maker;
pub(crate) mod status_bar;
pub(crate) mod theme;

// re-export commonly used types
pub use driver::{ColorTag, EntryRow, Key, RenderDriver};
pub use field::{Attributes, FieldError, FieldSpec, Value};
pub use highlight::{ColorPair, HighlightRule};
pub use layout::Layout;
pub use log_entry::{EntryError, LogEntry};
pub use log_store::{LogStore, StoreError};
pub use plugin::EntryPostProcessor;
pub use terminal::TerminalDriver;
pub use viewport::Viewport;

// public API for running the pager
pub use app::{App, AppDesc, RESERVED_ROWS, install_error_hooks, start, start_with_desc};
