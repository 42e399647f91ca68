//! Measurable, drawable building blocks.

use foldtext_core::Size;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Paragraph, Widget},
};

use crate::measure::block_size;

/// Something that reports a size for a width and draws into an area.
pub trait Node {
    /// Size this node occupies when given `width` cells.
    fn layout(&self, width: u16) -> Size;

    fn render(&self, area: Rect, buf: &mut Buffer);
}

/// Pre-laid-out lines of text.
#[derive(Debug, Clone, Default)]
pub struct TextBlock {
    lines: Vec<Line<'static>>,
    alignment: Alignment,
}

impl TextBlock {
    pub fn new(lines: Vec<Line<'static>>) -> Self {
        Self {
            lines,
            alignment: Alignment::Left,
        }
    }

    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl Node for TextBlock {
    fn layout(&self, _width: u16) -> Size {
        block_size(&self.lines)
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines.clone())
            .alignment(self.alignment)
            .render(area, buf);
    }
}
