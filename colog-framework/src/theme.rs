use crate::{driver::ColorTag, highlight::ColorPair};
use ratatui::prelude::*;

pub const TEXT_FG_COLOR: Color = Color::Gray;

pub const GUTTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const RULE_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const STATUS_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

pub const NOTICE_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

/// -1 is the terminal default, anything else a 256-color palette index
fn palette_color(index: i16) -> Color {
    match u8::try_from(index) {
        Ok(index) => Color::Indexed(index),
        Err(_) => Color::Reset,
    }
}

pub fn pair_style(pair: ColorPair) -> Style {
    Style::new().fg(palette_color(pair.fg)).bg(palette_color(pair.bg))
}

pub fn entry_style(color: ColorTag) -> Style {
    match color {
        ColorTag::Default => Style::new().fg(TEXT_FG_COLOR),
        ColorTag::Pair(pair) => pair_style(pair),
    }
}
