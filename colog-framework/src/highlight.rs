use crate::{driver::ColorTag, field::Value, log_entry::LogEntry};

/// foreground/background palette indices, -1 being the terminal default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorPair {
    pub fg: i16,
    pub bg: i16,
}

impl ColorPair {
    pub fn new(fg: i16, bg: i16) -> Self {
        Self { fg, bg }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HighlightMatch {
    /// attribute `field` equals `is`
    Field { field: String, is: Value },
    /// entry carries `tag`
    Tag { tag: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HighlightRule {
    pub matcher: HighlightMatch,
    pub color: Option<ColorPair>,
}

impl HighlightRule {
    pub fn field(field: impl Into<String>, is: impl Into<Value>, color: ColorPair) -> Self {
        Self {
            matcher: HighlightMatch::Field {
                field: field.into(),
                is: is.into(),
            },
            color: Some(color),
        }
    }

    pub fn tag(tag: impl Into<String>, color: ColorPair) -> Self {
        Self {
            matcher: HighlightMatch::Tag { tag: tag.into() },
            color: Some(color),
        }
    }

    pub fn matches(&self, entry: &LogEntry) -> bool {
        match &self.matcher {
            HighlightMatch::Field { field, is } => entry
                .attribute(field)
                .is_some_and(|value| value.loosely_eq(is)),
            HighlightMatch::Tag { tag } => entry.has_tag(tag),
        }
    }
}

/// color of the first matching rule; a matching rule without color stops the search
pub fn highlight_color(rules: &[HighlightRule], entry: &LogEntry) -> ColorTag {
    rules
        .iter()
        .find(|rule| rule.matches(entry))
        .and_then(|rule| rule.color)
        .map_or(ColorTag::Default, ColorTag::Pair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{field::RecordPattern, field::TagSpec, layout::Layout};

    fn layout() -> Layout {
        let mut layout = Layout {
            line_format: RecordPattern::new(r"(?P<level>\w+) (?P<code>\d+)").unwrap(),
            ..Layout::default()
        };
        layout
            .tags
            .insert("disk".to_string(), TagSpec::new("disk").unwrap());
        layout
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let rules = vec![
            HighlightRule::field("level", "ERROR", ColorPair::new(1, -1)),
            HighlightRule::tag("disk", ColorPair::new(3, -1)),
        ];
        let entry = LogEntry::new("ERROR 500 disk full", &layout()).unwrap();
        assert_eq!(
            highlight_color(&rules, &entry),
            ColorTag::Pair(ColorPair::new(1, -1))
        );

        let entry = LogEntry::new("WARN 300 disk almost full", &layout()).unwrap();
        assert_eq!(
            highlight_color(&rules, &entry),
            ColorTag::Pair(ColorPair::new(3, -1))
        );
    }

    #[test]
    fn test_no_match_is_default() {
        let rules = vec![HighlightRule::field("level", "ERROR", ColorPair::new(1, -1))];
        let entry = LogEntry::new("INFO 200 fine", &layout()).unwrap();
        assert_eq!(highlight_color(&rules, &entry), ColorTag::Default);
    }

    #[test]
    fn test_numeric_expectation_matches_text_capture() {
        let rules = vec![HighlightRule::field("code", 500i64, ColorPair::new(9, 0))];
        let entry = LogEntry::new("ERROR 500 boom", &layout()).unwrap();
        assert_eq!(
            highlight_color(&rules, &entry),
            ColorTag::Pair(ColorPair::new(9, 0))
        );
    }

    #[test]
    fn test_rule_without_color_stops_search() {
        let rules = vec![
            HighlightRule {
                matcher: HighlightMatch::Tag {
                    tag: "disk".to_string(),
                },
                color: None,
            },
            HighlightRule::field("level", "ERROR", ColorPair::new(1, -1)),
        ];
        let entry = LogEntry::new("ERROR 500 disk full", &layout()).unwrap();
        assert_eq!(highlight_color(&rules, &entry), ColorTag::Default);
    }
}
