//! Word wrapping for styled ratatui Lines.

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use textwrap::{Options, WrapAlgorithm};

use super::width::line_width;

/// Wrap every line to `width` cells, preserving span styles.
///
/// Lines are filled greedily so the result only depends on what came
/// before each break. Empty lines stay as single empty lines. A width of
/// zero returns the input unchanged.
pub fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return lines;
    }
    lines
        .into_iter()
        .flat_map(|line| wrap_line(line, width))
        .collect()
}

fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if line_width(&line) <= width {
        return vec![line];
    }

    let styled: Vec<(char, Style)> = line
        .spans
        .iter()
        .flat_map(|span| span.content.chars().map(move |ch| (ch, span.style)))
        .collect();
    let plain: String = styled.iter().map(|(ch, _)| ch).collect();

    // textwrap only drops whitespace at break points, so each row is a
    // contiguous run of the source once that whitespace is skipped.
    let mut cursor = 0;
    let mut rows = Vec::new();
    let options = Options::new(width).wrap_algorithm(WrapAlgorithm::FirstFit);
    for row in textwrap::wrap(&plain, options) {
        let mut chars = row.chars().peekable();
        while let Some(&(ch, _)) = styled.get(cursor) {
            if ch.is_whitespace() && chars.peek() != Some(&ch) {
                cursor += 1;
            } else {
                break;
            }
        }

        let mut spans: Vec<Span<'static>> = Vec::new();
        for expected in chars {
            let (ch, style) = styled.get(cursor).copied().unwrap_or((expected, Style::default()));
            cursor += 1;
            match spans.last_mut() {
                Some(last) if last.style == style => last.content.to_mut().push(ch),
                _ => spans.push(Span::styled(ch.to_string(), style)),
            }
        }
        rows.push(Line::from(spans));
    }

    if rows.is_empty() {
        rows.push(Line::default());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::visual_width;
    use ratatui::style::Color;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_short_line_untouched() {
        let wrapped = wrap_lines(vec![Line::from("Short")], 20);
        assert_eq!(plain(&wrapped), vec!["Short"]);
    }

    #[test]
    fn test_wraps_at_word_boundaries() {
        let wrapped = wrap_lines(vec![Line::from("the quick brown fox jumps")], 10);
        assert_eq!(plain(&wrapped), vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_blank_lines_survive() {
        let wrapped = wrap_lines(vec![Line::from("a"), Line::default(), Line::from("b")], 10);
        assert_eq!(wrapped.len(), 3);
        assert_eq!(plain(&wrapped)[1], "");
    }

    #[test]
    fn test_style_preserved_across_break() {
        let line = Line::from(vec![
            Span::styled("Hello ", Style::default().fg(Color::Red)),
            Span::styled("wonderful world", Style::default().fg(Color::Blue)),
        ]);
        let wrapped = wrap_lines(vec![line], 10);
        assert_eq!(plain(&wrapped), vec!["Hello", "wonderful", "world"]);
        assert_eq!(wrapped[0].spans[0].style.fg, Some(Color::Red));
        assert_eq!(wrapped[1].spans[0].style.fg, Some(Color::Blue));
        assert_eq!(wrapped[2].spans[0].style.fg, Some(Color::Blue));
    }

    #[test]
    fn test_wide_chars_respect_cell_width() {
        let wrapped = wrap_lines(vec![Line::from("你好 世界 你好 世界")], 6);
        assert!(wrapped.len() > 1);
        for line in &wrapped {
            let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
            assert!(visual_width(&text) <= 6, "{text:?}");
        }
    }

    #[test]
    fn test_zero_width_is_noop() {
        let lines = vec![Line::from("anything at all")];
        assert_eq!(wrap_lines(lines.clone(), 0), lines);
    }
}
