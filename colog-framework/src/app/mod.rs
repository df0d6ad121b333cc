use crate::{
    driver::RenderDriver, highlight::HighlightRule, layout::Layout, log_store::LogStore,
    terminal::TerminalDriver, viewport::Viewport,
};
use anyhow::{Result, anyhow};
use ratatui::{Terminal, backend::Backend};

mod details;
mod events;
mod render;
mod scrolling;

/// notice row and status row
pub const RESERVED_ROWS: usize = 2;

#[derive(Debug, Clone)]
pub struct AppDesc {
    /// rows kept free below the entry list
    pub reserved_rows: usize,
    /// apply the layout's highlight rules when the driver supports color
    pub highlight: bool,
}

impl AppDesc {
    pub fn new() -> Self {
        Self {
            reserved_rows: RESERVED_ROWS,
            highlight: true,
        }
    }
}

impl Default for AppDesc {
    fn default() -> Self {
        Self::new()
    }
}

/// install color_eyre's panic and error report hooks
///
/// call before installing any panic hook that should run first, color_eyre
/// replaces the current one
pub fn install_error_hooks() -> Result<()> {
    color_eyre::install().or(Err(anyhow!("Error installing color_eyre")))
}

/// Start the pager with default configuration
pub fn start<B: Backend>(terminal: &mut Terminal<B>, store: &LogStore, layout: &Layout) -> Result<()> {
    start_with_desc(terminal, store, layout, AppDesc::new())
}

/// Start the pager with custom configuration
pub fn start_with_desc<B: Backend>(
    terminal: &mut Terminal<B>,
    store: &LogStore,
    layout: &Layout,
    desc: AppDesc,
) -> Result<()> {
    let driver = TerminalDriver::new(terminal)?;
    App::new(driver, store, &layout.highlight, desc).run()
}

/// paging control loop over a [`LogStore`]
pub struct App<'s, D> {
    driver: D,
    store: &'s LogStore,
    highlight: &'s [HighlightRule],
    highlight_enabled: bool,
    viewport: Viewport,
    reserved_rows: usize,
    is_exiting: bool,
}

// ============================================================================
// Initialization
// ============================================================================
impl<'s, D: RenderDriver> App<'s, D> {
    pub fn new(driver: D, store: &'s LogStore, highlight: &'s [HighlightRule], desc: AppDesc) -> Self {
        let highlight_enabled = desc.highlight && driver.supports_color();
        if desc.highlight && !driver.supports_color() && !highlight.is_empty() {
            log::info!("Color unsupported, highlighting disabled");
        }

        let (rows, _) = driver.dimensions();
        let viewport = Viewport::new(store.total(), rows.saturating_sub(desc.reserved_rows));

        Self {
            driver,
            store,
            highlight,
            highlight_enabled,
            viewport,
            reserved_rows: desc.reserved_rows,
            is_exiting: false,
        }
    }
}

// ============================================================================
// Lifecycle
// ============================================================================
impl<D: RenderDriver> App<'_, D> {
    /// paint the first page, then process keys until quit
    pub fn run(&mut self) -> Result<()> {
        self.repaint()?;
        while !self.is_exiting {
            let key = self.driver.next_key()?;
            self.handle_key(key)?;
        }
        log::debug!("Leaving pager at {:?}", self.viewport.range());
        Ok(())
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }
}

// ============================================================================
// Utility methods
// ============================================================================
impl<D: RenderDriver> App<'_, D> {
    /// digits of the largest entry number
    fn index_width(&self) -> usize {
        self.store.total().to_string().len()
    }

    fn page_capacity(&self) -> usize {
        let (rows, _) = self.driver.dimensions();
        rows.saturating_sub(self.reserved_rows)
    }

    fn notice_row(&self) -> usize {
        let (rows, _) = self.driver.dimensions();
        rows.saturating_sub(2)
    }
}
