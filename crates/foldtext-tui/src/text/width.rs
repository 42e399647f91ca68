//! Text width in terminal cells.

use ratatui::text::Line;
use unicode_width::UnicodeWidthStr;

/// Get the visual width of a string in terminal cells.
///
/// Accounts for wide characters (CJK, emoji) that take 2 cells.
pub fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Visual width of a styled line.
pub fn line_width(line: &Line<'_>) -> usize {
    line.spans.iter().map(|span| visual_width(&span.content)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::text::Span;

    #[test]
    fn test_visual_width_ascii() {
        assert_eq!(visual_width("hello"), 5);
        assert_eq!(visual_width(""), 0);
    }

    #[test]
    fn test_visual_width_wide_chars() {
        assert_eq!(visual_width("你好"), 4);
        assert_eq!(visual_width("hello你好"), 9);
    }

    #[test]
    fn test_line_width_sums_spans() {
        let line = Line::from(vec![Span::raw("ab"), Span::raw("你")]);
        assert_eq!(line_width(&line), 4);
        assert_eq!(line_width(&Line::default()), 0);
    }
}
