use crate::{
    content_line_maker::{fit_to_width, sanitize_control_chars},
    driver::{EntryRow, Key, RenderDriver},
    status_bar::{StatusBar, StatusGravity},
    theme,
};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::Paragraph};
use std::{collections::BTreeMap, env};

const STATUS_INDENT: usize = 3;
const KEY_HINT: &str = "j/k:line  space/PgUp:page  d:details  q:quit ";

enum PaintedRow {
    Entry {
        gutter: String,
        text: String,
        style: Style,
    },
    Text {
        col: usize,
        text: String,
    },
    Rule {
        col: usize,
    },
    Notice(String),
    Status(String),
}

impl PaintedRow {
    fn to_line(&self, cols: usize) -> Line<'_> {
        match self {
            PaintedRow::Entry {
                gutter,
                text,
                style,
            } => Line::from(vec![
                Span::styled(gutter.as_str(), theme::GUTTER_STYLE),
                Span::styled(text.as_str(), *style),
            ]),
            PaintedRow::Text { col, text } => Line::from(format!("{}{}", " ".repeat(*col), text)),
            PaintedRow::Rule { col } => Line::from(vec![
                Span::raw(" ".repeat(*col)),
                Span::styled("─".repeat(cols.saturating_sub(*col)), theme::RULE_STYLE),
            ]),
            PaintedRow::Notice(text) => {
                Line::from(Span::styled(text.as_str(), theme::NOTICE_STYLE))
            }
            // rendered through the status bar widget
            PaintedRow::Status(_) => Line::default(),
        }
    }
}

/// [`RenderDriver`] on top of a ratatui terminal, reading keys from crossterm
pub struct TerminalDriver<'t, B: Backend> {
    terminal: &'t mut Terminal<B>,
    rows: usize,
    cols: usize,
    color: bool,
    painted: BTreeMap<usize, PaintedRow>,
}

impl<'t, B: Backend> TerminalDriver<'t, B> {
    /// highlighting is off when `NO_COLOR` is set
    pub fn new(terminal: &'t mut Terminal<B>) -> Result<Self> {
        let size = terminal.size()?;
        let color = env::var_os("NO_COLOR").is_none();
        if !color {
            log::info!("NO_COLOR is set, highlighting disabled");
        }
        Ok(Self {
            terminal,
            rows: size.height as usize,
            cols: size.width as usize,
            color,
            painted: BTreeMap::new(),
        })
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

impl<B: Backend> RenderDriver for TerminalDriver<'_, B> {
    fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn supports_color(&self) -> bool {
        self.color
    }

    fn clear(&mut self) {
        self.painted.clear();
    }

    fn paint_entry(&mut self, row: usize, entry: &EntryRow<'_>) {
        let gutter = format!("{:>width$}: ", entry.index, width = entry.index_width);
        let width = self.cols.saturating_sub(gutter.chars().count());
        let text = fit_to_width(&sanitize_control_chars(entry.text), width);
        let style = if self.color {
            theme::entry_style(entry.color)
        } else {
            Style::default()
        };
        self.painted.insert(
            row,
            PaintedRow::Entry {
                gutter,
                text,
                style,
            },
        );
    }

    fn paint_text(&mut self, row: usize, col: usize, text: &str) {
        let text = fit_to_width(
            &sanitize_control_chars(text).replace('\n', " "),
            self.cols.saturating_sub(col),
        );
        self.painted.insert(row, PaintedRow::Text { col, text });
    }

    fn paint_notice(&mut self, row: usize, text: &str) {
        let text = fit_to_width(&sanitize_control_chars(text).replace('\n', " "), self.cols);
        self.painted.insert(row, PaintedRow::Notice(text));
    }

    fn paint_rule(&mut self, row: usize, col: usize) {
        self.painted.insert(row, PaintedRow::Rule { col });
    }

    fn paint_status(&mut self, text: &str) {
        let row = self.rows.saturating_sub(1);
        self.painted.insert(row, PaintedRow::Status(text.to_string()));
    }

    fn present(&mut self) -> Result<()> {
        let painted = &self.painted;
        let cols = self.cols;
        self.terminal.draw(|frame| {
            let area = frame.area();
            for (&row, painted_row) in painted {
                if row >= area.height as usize {
                    continue;
                }
                let rect = Rect::new(area.x, area.y + row as u16, area.width, 1);
                match painted_row {
                    PaintedRow::Status(text) => {
                        let bar = StatusBar::new()
                            .set_indent(STATUS_INDENT)
                            .add_status_plain(StatusGravity::Left, text)
                            .add_status_plain(StatusGravity::Right, KEY_HINT)
                            .set_style(theme::STATUS_STYLE);
                        frame.render_widget(bar, rect);
                    }
                    other => frame.render_widget(Paragraph::new(other.to_line(cols)), rect),
                }
            }
        })?;
        Ok(())
    }

    fn next_key(&mut self) -> Result<Key> {
        loop {
            match event::read()? {
                Event::Resize(cols, rows) => {
                    log::debug!("Terminal resized to {}x{}", cols, rows);
                    self.rows = rows as usize;
                    self.cols = cols as usize;
                    return Ok(Key::Resize {
                        rows: self.rows,
                        cols: self.cols,
                    });
                }
                Event::Key(key) => {
                    if let Some(key) = key_from_event(key) {
                        return Ok(key);
                    }
                }
                _ => {}
            }
        }
    }
}

/// map a crossterm key press; releases and repeats are dropped
pub fn key_from_event(key: KeyEvent) -> Option<Key> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let key = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Esc,
        other => Key::Other(format!("{:?}", other)),
    };
    Some(key)
}
