use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EVERY_LINE: Regex = Regex::new(r"\A").unwrap();
}

/// pattern marking the first line of a log entry, matched at the line start
#[derive(Debug, Clone)]
pub struct BoundaryRule {
    source: String,
    regex: Regex,
}

impl BoundaryRule {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(r"\A(?:{})", pattern))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// every line starts a new entry
    pub fn every_line() -> Self {
        Self {
            source: String::new(),
            regex: EVERY_LINE.clone(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

impl Default for BoundaryRule {
    fn default() -> Self {
        Self::every_line()
    }
}

/// split lines (terminators included) into trimmed entry texts
///
/// lines before the first boundary belong to the first entry, and the final
/// entry is always emitted, so even empty input yields one (empty) entry
pub fn segment<I, S>(lines: I, boundary: &BoundaryRule) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut entries = Vec::new();
    let mut current = String::new();
    let mut first = true;

    for line in lines {
        let line = line.as_ref();
        if !boundary.is_match(line) {
            current.push_str(line);
            continue;
        }

        // leading non-boundary lines stay with the first entry
        if !first {
            entries.push(current.trim().to_string());
            current.clear();
        }
        first = false;
        current.push_str(line);
    }
    entries.push(current.trim().to_string());

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date_boundary() -> BoundaryRule {
        BoundaryRule::new(r"\d{4}-\d{2}-\d{2}").unwrap()
    }

    #[test]
    fn test_every_line_is_an_entry_by_default() {
        let entries = segment(["a\n", "b\n", "c"], &BoundaryRule::default());
        assert_eq!(entries, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_continuation_lines_are_appended() {
        let lines = [
            "2024-01-01 first\n",
            "  at frame one\n",
            "  at frame two\n",
            "2024-01-02 second\n",
        ];
        let entries = segment(lines, &date_boundary());
        assert_eq!(
            entries,
            vec![
                "2024-01-01 first\n  at frame one\n  at frame two",
                "2024-01-02 second"
            ]
        );
    }

    #[test]
    fn test_leading_lines_join_first_entry() {
        let lines = ["preamble\n", "2024-01-01 first\n", "2024-01-02 second\n"];
        let entries = segment(lines, &date_boundary());
        assert_eq!(entries, vec!["preamble\n2024-01-01 first", "2024-01-02 second"]);
    }

    #[test]
    fn test_entry_count_equals_boundary_matches() {
        let lines = [
            "2024-01-01 a\n",
            "x\n",
            "2024-01-02 b\n",
            "2024-01-03 c\n",
            "y\n",
        ];
        assert_eq!(segment(lines, &date_boundary()).len(), 3);
    }

    #[test]
    fn test_no_boundary_match_yields_one_entry() {
        let entries = segment(["x\n", "y\n", "z\n"], &date_boundary());
        assert_eq!(entries, vec!["x\ny\nz"]);
    }

    #[test]
    fn test_empty_input_yields_one_empty_entry() {
        let entries = segment(Vec::<String>::new(), &date_boundary());
        assert_eq!(entries, vec![String::new()]);
    }

    #[test]
    fn test_boundary_is_anchored() {
        let rule = BoundaryRule::new("ERROR").unwrap();
        assert!(rule.is_match("ERROR at start"));
        assert!(!rule.is_match("an ERROR later"));
    }
}
