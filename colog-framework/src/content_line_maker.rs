use unicode_width::UnicodeWidthChar;

/// width of the right-aligned label column in the detail view
pub const LABEL_WIDTH: usize = 20;
const LABEL_SEPARATOR: &str = ": ";

/// drop ANSI escape sequences and control characters other than newlines
pub fn sanitize_control_chars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_alphabetic() {
                        chars.next();
                        break;
                    }
                    chars.next();
                }
            }
            continue;
        }
        if c.is_control() && c != '\n' {
            continue;
        }
        result.push(c);
    }

    result
}

/// clip `content` to at most `width` terminal columns
pub fn fit_to_width(content: &str, width: usize) -> String {
    let mut used = 0;
    let mut fitted = String::with_capacity(content.len().min(width));
    for c in content.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        fitted.push(c);
    }
    fitted
}

/// `label` right-aligned in the label column followed by `value`; continuation
/// lines of `value` are indented to line up under its first line
pub fn labeled_lines(label: &str, value: &str) -> Vec<String> {
    let indent = " ".repeat(LABEL_WIDTH + LABEL_SEPARATOR.len());
    let mut lines = value.split('\n');
    let first = lines.next().unwrap_or_default();

    let mut result = vec![format!(
        "{:>width$}{}{}",
        label,
        LABEL_SEPARATOR,
        first,
        width = LABEL_WIDTH
    )];
    result.extend(lines.map(|line| format!("{}{}", indent, line)));
    result
}
