use super::App;
use crate::{
    content_line_maker::labeled_lines,
    driver::{ColorTag, EntryRow, Key, RenderDriver},
    log_entry::LogEntry,
};
use anyhow::Result;
use itertools::Itertools;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DetailRow {
    Text(String),
    /// horizontal rule starting at the given column
    Rule(usize),
    Blank,
}

/// header, rule, then one labeled block per attribute followed by tags and
/// interpreted text when present
pub(crate) fn detail_rows(
    entry: &LogEntry,
    number: usize,
    index_width: usize,
    cols: usize,
) -> Vec<DetailRow> {
    let header = EntryRow {
        index: number,
        index_width,
        text: &entry.truncate(cols.saturating_sub(2 + index_width)),
        color: ColorTag::Default,
    };

    let mut rows = vec![
        DetailRow::Text(header.to_plain_string()),
        DetailRow::Blank,
        DetailRow::Rule(index_width + 2),
        DetailRow::Blank,
    ];

    for (name, value) in entry.attributes().iter() {
        rows.extend(
            labeled_lines(name, &value.to_string())
                .into_iter()
                .map(DetailRow::Text),
        );
    }
    if !entry.tags().is_empty() {
        let tags = entry.tags().iter().join(", ");
        rows.extend(labeled_lines("tags", &tags).into_iter().map(DetailRow::Text));
    }
    if let Some(text) = entry.interpreted() {
        rows.extend(
            labeled_lines("interpreted", text)
                .into_iter()
                .map(DetailRow::Text),
        );
    }
    rows
}

impl<D: RenderDriver> App<'_, D> {
    /// prompt for a 1-based entry number and show that entry's details until a key is pressed
    pub(super) fn show_details(&mut self) -> Result<()> {
        let Some(number) = self.read_entry_number()? else {
            return Ok(());
        };

        let store = self.store;
        let found = match number.parse::<usize>() {
            Ok(n) if n > 0 => match store.entry(n - 1) {
                Ok(entry) => Some((n, entry)),
                Err(e) => {
                    log::debug!("{}", e);
                    None
                }
            },
            _ => None,
        };

        self.driver.clear();
        match found {
            Some((index, entry)) => {
                let (rows, cols) = self.driver.dimensions();
                for (row, detail) in detail_rows(entry, index, self.index_width(), cols)
                    .into_iter()
                    .take(rows)
                    .enumerate()
                {
                    match detail {
                        DetailRow::Text(text) => self.driver.paint_text(row, 0, &text),
                        DetailRow::Rule(col) => self.driver.paint_rule(row, col),
                        DetailRow::Blank => {}
                    }
                }
            }
            None => self
                .driver
                .paint_text(0, 0, &format!("Unknown log entry {}", number)),
        }

        self.driver.present()?;
        self.acknowledge()
    }

    /// digits typed after `d`; `None` when cancelled
    fn read_entry_number(&mut self) -> Result<Option<String>> {
        let mut number = String::new();
        loop {
            let (rows, _) = self.driver.dimensions();
            self.driver
                .paint_text(rows.saturating_sub(1), 0, &format!("d: {}", number));
            self.driver.present()?;

            match self.driver.next_key()? {
                Key::Char(c) if c.is_ascii_digit() => number.push(c),
                Key::Enter => return Ok(Some(number)),
                Key::Backspace => {
                    number.pop();
                }
                Key::Char('q') | Key::Esc => return Ok(None),
                Key::Interrupt => {
                    self.is_exiting = true;
                    return Ok(None);
                }
                Key::Resize { .. } => self.repaint()?,
                other => {
                    let row = self.notice_row();
                    self.driver
                        .paint_notice(row, &format!("Unhandled details key {}", other));
                }
            }
        }
    }
}
