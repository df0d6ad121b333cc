use super::App;
use crate::driver::RenderDriver;
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PageMove {
    First,
    Last,
    Next,
    Previous,
}

impl<D: RenderDriver> App<'_, D> {
    /// move one entry; the screen is only touched when the window moved
    pub(super) fn handle_line_scrolling(&mut self, move_down: bool) -> Result<()> {
        let moved = if move_down {
            self.viewport.next_line()
        } else {
            self.viewport.previous_line()
        };
        if !moved {
            return Ok(());
        }

        // every row shifts by one, so repaint them in place without clearing
        self.paint_window();
        self.paint_status();
        self.driver.present()
    }

    pub(super) fn handle_page_scrolling(&mut self, page_move: PageMove) -> Result<()> {
        match page_move {
            PageMove::First => self.viewport.first_page(),
            PageMove::Last => self.viewport.last_page(),
            PageMove::Next => self.viewport.next_page(),
            PageMove::Previous => self.viewport.previous_page(),
        }
        self.repaint()
    }
}
