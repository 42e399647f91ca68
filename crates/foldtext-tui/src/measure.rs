//! Off-screen text measurement for the terminal.

use foldtext_core::{Constraints, Measurer, Size};
use ratatui::{style::Style, text::Line};

use crate::text::{line_width, render_markup, wrap_lines};

/// Lay `content` out at `width` cells: markup, then word wrap.
pub fn layout_lines(content: &str, base: Style, width: u16) -> Vec<Line<'static>> {
    if content.is_empty() || width == 0 {
        return Vec::new();
    }
    wrap_lines(render_markup(content, base), usize::from(width))
}

/// Size of a laid-out block: widest line by line count.
pub fn block_size(lines: &[Line<'_>]) -> Size {
    let width = lines.iter().map(line_width).max().unwrap_or(0);
    Size::new(clamp_u16(width), clamp_u16(lines.len()))
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// [`Measurer`] backed by the same layout used for drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextMeasurer {
    base: Style,
}

impl TextMeasurer {
    pub fn new(base: Style) -> Self {
        Self { base }
    }
}

impl Measurer for TextMeasurer {
    fn measure(&self, content: &str, constraints: Constraints) -> Size {
        let mut lines = layout_lines(content, self.base, constraints.max_width);
        if let Some(max) = constraints.max_lines {
            lines.truncate(max);
        }
        block_size(&lines)
    }
}
