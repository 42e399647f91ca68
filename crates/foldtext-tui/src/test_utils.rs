//! Test utilities for foldtext-tui snapshot and behavior tests.

use ratatui::{buffer::Buffer, layout::Rect, widgets::StatefulWidget};
use std::time::Instant;

use crate::widget::{ExpandableText, ExpandableTextState};

/// Convert a buffer to a string representation for snapshot testing.
///
/// Trailing whitespace is trimmed from every row.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut rows = Vec::with_capacity(usize::from(area.height));
    for y in area.top()..area.bottom() {
        let row: String = (area.left()..area.right())
            .map(|x| buffer[(x, y)].symbol())
            .collect();
        rows.push(row.trim_end().to_string());
    }
    rows.join("\n")
}

/// Settle `widget` at `width` as of `now`, render it at its desired height
/// and return the buffer.
pub fn render_widget(
    widget: &ExpandableText<'_>,
    width: u16,
    state: &mut ExpandableTextState,
    now: Instant,
) -> Buffer {
    let height = widget.desired_height(width, state, now);
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    widget.clone().render(area, &mut buffer, state);
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", Style::default());
        buffer.set_string(0, 1, "World", Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld\n");
    }
}
