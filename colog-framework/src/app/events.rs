use super::{App, scrolling::PageMove};
use crate::driver::{Key, RenderDriver};
use anyhow::Result;

impl<D: RenderDriver> App<'_, D> {
    pub(super) fn handle_key(&mut self, key: Key) -> Result<()> {
        match key {
            Key::Char('q') | Key::Interrupt => {
                log::debug!("Quit key pressed");
                self.is_exiting = true;
                Ok(())
            }
            Key::Char('j') | Key::Down => self.handle_line_scrolling(true),
            Key::Char('k') | Key::Up => self.handle_line_scrolling(false),
            Key::Home => self.handle_page_scrolling(PageMove::First),
            Key::End => self.handle_page_scrolling(PageMove::Last),
            Key::PageUp => self.handle_page_scrolling(PageMove::Previous),
            Key::PageDown | Key::Char(' ') => self.handle_page_scrolling(PageMove::Next),
            Key::Char('d') => {
                self.show_details()?;
                if self.is_exiting {
                    return Ok(());
                }
                self.repaint()
            }
            Key::Resize { rows, cols } => {
                log::debug!("Resized to {} rows, {} cols", rows, cols);
                self.repaint()
            }
            other => {
                log::debug!("Unknown command {}", other);
                self.show_notice(&format!("Unknown command {}", other))?;
                if self.is_exiting {
                    return Ok(());
                }
                self.repaint()
            }
        }
    }
}
