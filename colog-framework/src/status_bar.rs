use ratatui::{
    prelude::*,
    widgets::{Paragraph, Widget},
};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum StatusGravity {
    Left,
    Right,
}

struct StatusSegment {
    text: String,
    style: Style,
}

/// single-row bar with left- and right-aligned segments
#[derive(Default)]
pub struct StatusBar {
    left_segments: Vec<StatusSegment>,
    right_segments: Vec<StatusSegment>,
    indent: usize,
    style: Option<Style>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_status(mut self, gravity: StatusGravity, text: String, style: Style) -> Self {
        let segment = StatusSegment { text, style };
        match gravity {
            StatusGravity::Left => self.left_segments.push(segment),
            StatusGravity::Right => self.right_segments.push(segment),
        }
        self
    }

    pub fn add_status_plain(self, gravity: StatusGravity, text: &str) -> Self {
        self.add_status(gravity, text.to_string(), Style::default())
    }

    /// blank columns before the left segments
    pub fn set_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn set_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    fn build_gravity_spans<'a>(
        segments: &'a [StatusSegment],
        sep: &'a str,
    ) -> (Vec<Span<'a>>, usize) {
        let mut spans = Vec::new();
        let mut total_len = 0;
        for (i, seg) in segments.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(sep));
                total_len += sep.chars().count();
            }
            spans.push(Span::styled(seg.text.as_str(), seg.style));
            total_len += seg.text.chars().count();
        }
        (spans, total_len)
    }
}

impl Widget for StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let total_width = area.width as usize;
        let sep = " | ";

        let (left_spans, left_len) = Self::build_gravity_spans(&self.left_segments, sep);
        let (right_spans, right_len) = Self::build_gravity_spans(&self.right_segments, sep);

        let left_end = self.indent + left_len;
        let right_start = total_width.saturating_sub(right_len);
        let padding = right_start.saturating_sub(left_end);

        let mut spans = vec![Span::raw(" ".repeat(self.indent))];
        spans.extend(left_spans);
        spans.push(Span::raw(" ".repeat(padding)));
        spans.extend(right_spans);

        let paragraph = Paragraph::new(Line::from(spans)).style(self.style.unwrap_or_default());
        paragraph.render(area, buf);
    }
}
