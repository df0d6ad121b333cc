//! Extension points for code that enriches entries after they are built.
//!
//! A plugin is mounted once, before the store reads any file, and may adjust
//! the [`Layout`] it is given. Afterwards [`EntryPostProcessor::post_construct`]
//! runs once per constructed entry, in registration order, typically to set
//! the entry's interpreted text.

use crate::{layout::Layout, log_entry::LogEntry};
use anyhow::{Context, Result};

pub trait EntryPostProcessor {
    /// identifier used in layout files and log output
    fn name(&self) -> &str;

    fn mount(&mut self, _layout: &mut Layout) -> Result<()> {
        Ok(())
    }

    fn post_construct(&self, entry: &mut LogEntry, layout: &Layout);
}

/// mount every processor in registration order
pub fn mount_all(
    processors: &mut [Box<dyn EntryPostProcessor>],
    layout: &mut Layout,
) -> Result<()> {
    for processor in processors.iter_mut() {
        log::debug!("Mounting plugin {}", processor.name());
        processor
            .mount(layout)
            .with_context(|| format!("failed to mount plugin '{}'", processor.name()))?;
    }
    Ok(())
}

pub(crate) fn post_construct_all(
    processors: &[Box<dyn EntryPostProcessor>],
    entry: &mut LogEntry,
    layout: &Layout,
) {
    for processor in processors {
        processor.post_construct(entry, layout);
    }
}
