//! Reports a node's laid-out size to a callback.

use foldtext_core::Size;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use tracing::trace;

use crate::node::Node;

/// Wraps a [`Node`] and hands its size to `on_size` whenever it is laid
/// out. Rendering is otherwise unchanged.
///
/// As a [`Widget`] it reports the part of the node that fits in the area
/// it is drawn into.
pub struct SizeReporter<N, F> {
    node: N,
    on_size: F,
}

impl<N: Node, F: Fn(Size)> SizeReporter<N, F> {
    pub fn new(node: N, on_size: F) -> Self {
        Self { node, on_size }
    }
}

impl<N: Node, F: Fn(Size)> Node for SizeReporter<N, F> {
    fn layout(&self, width: u16) -> Size {
        let size = self.node.layout(width);
        trace!(%size, width, "reporting size");
        (self.on_size)(size);
        size
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        self.node.render(area, buf);
    }
}

impl<N: Node, F: Fn(Size)> Widget for SizeReporter<N, F> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let size = self.node.layout(area.width);
        let drawn = Size::new(size.width.min(area.width), size.height.min(area.height));
        trace!(%size, %drawn, "reporting drawn size");
        (self.on_size)(drawn);
        self.node.render(area, buf);
    }
}
