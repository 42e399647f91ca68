//! Fades the trailing edge of truncated text to make room for the control.

use foldtext_core::{MaskGeometry, MaskRect, MaskRegion, Size, TextDirection};
use ratatui::{
    buffer::{Buffer, Cell},
    layout::Rect,
    style::{Color, Modifier},
};

use crate::node::Node;
use crate::theme::blend;

/// Below this opacity, cells that can't be blended are dimmed.
const DIM_BELOW: f32 = 0.5;

/// Masks a [`Node`] with the gradient described by [`MaskGeometry`].
///
/// When disabled the node is drawn untouched.
pub struct TruncationMask<N> {
    node: N,
    band: Size,
    enabled: bool,
    direction: TextDirection,
    background: Color,
}

impl<N: Node> TruncationMask<N> {
    /// Mask `node`, reserving `band` (the control's size) at the trailing
    /// edge of the last line.
    pub fn new(node: N, band: Size, enabled: bool) -> Self {
        Self {
            node,
            band,
            enabled,
            direction: TextDirection::default(),
            background: Color::Reset,
        }
    }

    #[must_use]
    pub fn direction(mut self, direction: TextDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Color faded cells blend toward.
    #[must_use]
    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

impl<N: Node> Node for TruncationMask<N> {
    fn layout(&self, width: u16) -> Size {
        self.node.layout(width)
    }

    fn render(&self, area: Rect, buf: &mut Buffer) {
        self.node.render(area, buf);
        if !self.enabled || area.is_empty() {
            return;
        }

        let geometry = MaskGeometry::new(Size::new(area.width, area.height), self.band, self.direction);
        for region in geometry.regions() {
            match region {
                MaskRegion::Opaque(_) => {}
                MaskRegion::Gradient(rect, _) => {
                    self.paint(area, buf, rect, |x, y| geometry.opacity(x, y));
                }
                MaskRegion::Clear(rect) => self.paint(area, buf, rect, |_, _| 0.0),
            }
        }
    }
}

impl<N> TruncationMask<N> {
    /// Fade every cell of `rect`, given in coordinates local to `area`.
    fn paint(&self, area: Rect, buf: &mut Buffer, rect: MaskRect, opacity: impl Fn(u16, u16) -> f32) {
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                    fade(cell, opacity(x, y), self.background);
                }
            }
        }
    }
}

fn fade(cell: &mut Cell, opacity: f32, background: Color) {
    if opacity >= 1.0 {
        return;
    }
    if opacity <= 0.0 {
        cell.set_symbol(" ");
        cell.modifier = Modifier::empty();
        return;
    }
    match blend(background, cell.fg, opacity) {
        Some(color) => {
            cell.set_fg(color);
        }
        None if opacity < DIM_BELOW => {
            cell.modifier.insert(Modifier::DIM);
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::TextBlock;
    use crate::test_utils::buffer_to_string;
    use ratatui::{style::Style, text::Line};

    const FG: Color = Color::Rgb(200, 200, 200);
    const BG: Color = Color::Rgb(0, 0, 0);

    fn block() -> TextBlock {
        TextBlock::new(vec![
            Line::styled("abcdefghijklmnopqrst", Style::default().fg(FG)),
            Line::styled("ABCDEFGHIJKLMNOPQRST", Style::default().fg(FG)),
        ])
    }

    fn render(mask: &TruncationMask<TextBlock>) -> Buffer {
        let area = Rect::new(0, 0, 20, 2);
        let mut buf = Buffer::empty(area);
        mask.render(area, &mut buf);
        buf
    }

    #[test]
    fn test_disabled_mask_is_passthrough() {
        let buf = render(&TruncationMask::new(block(), Size::new(4, 1), false));
        assert_eq!(
            buffer_to_string(&buf),
            "abcdefghijklmnopqrst\nABCDEFGHIJKLMNOPQRST"
        );
    }

    #[test]
    fn test_layout_is_unchanged() {
        let mask = TruncationMask::new(block(), Size::new(4, 1), true);
        assert_eq!(mask.layout(20), Size::new(20, 2));
    }

    #[test]
    fn test_enabled_mask_clears_control_band() {
        let buf = render(&TruncationMask::new(block(), Size::new(4, 1), true).background(BG));
        assert_eq!(
            buffer_to_string(&buf),
            "abcdefghijklmnopqrst\nABCDEFGHIJKLMNOP"
        );
        // Rows above the band keep their color.
        assert_eq!(buf[(15, 0)].fg, FG);
        // Leading part of the last line is untouched.
        assert_eq!(buf[(11, 1)].fg, FG);
    }

    #[test]
    fn test_gradient_blends_toward_background() {
        let buf = render(&TruncationMask::new(block(), Size::new(4, 1), true).background(BG));
        let shades: Vec<u8> = (12..16)
            .map(|x| match buf[(x, 1)].fg {
                Color::Rgb(r, _, _) => r,
                other => panic!("unexpected color {other:?}"),
            })
            .collect();
        assert!(shades.windows(2).all(|w| w[0] > w[1]), "{shades:?}");
        assert!(shades[0] < 200);
    }

    #[test]
    fn test_named_colors_fall_back_to_dim() {
        let named = TextBlock::new(vec![Line::styled(
            "abcdefghijklmnopqrst",
            Style::default().fg(Color::White),
        )]);
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        TruncationMask::new(named, Size::new(4, 1), true).render(area, &mut buf);

        assert!(!buf[(12, 0)].modifier.contains(Modifier::DIM));
        assert!(buf[(15, 0)].modifier.contains(Modifier::DIM));
        assert_eq!(buf[(15, 0)].fg, Color::White);
    }

    #[test]
    fn test_only_band_rows_are_touched() {
        let tall = TextBlock::new(vec![
            Line::styled("abcdefghijklmnopqrst", Style::default().fg(FG)),
            Line::styled("abcdefghijklmnopqrst", Style::default().fg(FG)),
            Line::styled("ABCDEFGHIJKLMNOPQRST", Style::default().fg(FG)),
        ]);
        let area = Rect::new(2, 1, 20, 3);
        let mut buf = Buffer::empty(Rect::new(0, 0, 24, 5));
        TruncationMask::new(tall, Size::new(4, 1), true)
            .background(BG)
            .render(area, &mut buf);

        for x in 2..22 {
            assert_eq!(buf[(x, 1)].fg, FG, "x={x}");
            assert_eq!(buf[(x, 2)].fg, FG, "x={x}");
        }
        assert_eq!(buf[(17, 3)].symbol(), "P");
        assert_eq!(buf[(18, 3)].symbol(), " ");
        assert_eq!(buf[(23, 3)].symbol(), " ");
    }

    #[test]
    fn test_rtl_clears_leading_cells() {
        let buf = render(
            &TruncationMask::new(block(), Size::new(4, 1), true)
                .direction(TextDirection::RightToLeft)
                .background(BG),
        );
        let last_row: String = (0..20).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert_eq!(last_row, "    EFGHIJKLMNOPQRST");
    }
}
