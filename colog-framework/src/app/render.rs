use super::App;
use crate::{
    driver::{ColorTag, EntryRow, Key, RenderDriver},
    highlight::highlight_color,
};
use anyhow::Result;

impl<D: RenderDriver> App<'_, D> {
    /// recompute the page size, then clear and paint the window and the status row
    pub(super) fn repaint(&mut self) -> Result<()> {
        let capacity = self.page_capacity();
        if capacity != self.viewport.capacity() {
            log::debug!(
                "Page capacity {} -> {}",
                self.viewport.capacity(),
                capacity
            );
            self.viewport.resize(capacity);
        }

        self.driver.clear();
        self.paint_window();
        self.paint_status();
        self.driver.present()
    }

    /// paint every visible entry, top row first
    pub(super) fn paint_window(&mut self) {
        let store = self.store;
        let highlight = self.highlight;
        let (_, cols) = self.driver.dimensions();
        let index_width = self.index_width();
        let text_width = cols.saturating_sub(2 + index_width);
        let start = self.viewport.start();

        for (offset, entry) in store
            .entries(start, self.viewport.stop())
            .iter()
            .enumerate()
        {
            let text = entry.interpreted_truncate(text_width);
            let color = if self.highlight_enabled {
                highlight_color(highlight, entry)
            } else {
                ColorTag::Default
            };
            self.driver.paint_entry(
                offset,
                &EntryRow {
                    index: start + offset + 1,
                    index_width,
                    text: &text,
                    color,
                },
            );
        }
    }

    pub(super) fn paint_status(&mut self) {
        let status = format!(
            "{} .. {} / {}",
            self.viewport.start() + 1,
            self.viewport.stop(),
            self.viewport.total()
        );
        self.driver.paint_status(&status);
    }

    /// show `text` on the notice row over the current screen and wait for any key
    pub(super) fn show_notice(&mut self, text: &str) -> Result<()> {
        let row = self.notice_row();
        self.driver.paint_notice(row, text);
        self.driver.present()?;
        self.acknowledge()
    }

    /// block for any key; ctrl-c also leaves the pager
    pub(super) fn acknowledge(&mut self) -> Result<()> {
        if self.driver.next_key()? == Key::Interrupt {
            log::debug!("Interrupted while waiting for a key");
            self.is_exiting = true;
        }
        Ok(())
    }
}
