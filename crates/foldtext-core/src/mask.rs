//! Geometry of the truncation fade.
//!
//! The mask covers a block of text. Every row above the last-line band is
//! fully opaque. Inside the band, reading from the leading edge: an opaque
//! block, a gradient as wide as the control that fades to clear, and a clear
//! block as wide as the control where the control is drawn. Right-to-left
//! text mirrors the whole band so the control always sits at the trailing
//! edge and the fade always runs toward it.

use crate::geometry::{Size, TextDirection};

/// Fraction of the gradient width at which it becomes fully clear.
pub const GRADIENT_CLEAR_STOP: f32 = 0.9;

/// A rectangle in mask-local cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl MaskRect {
    const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One piece of the mask composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskRegion {
    Opaque(MaskRect),
    /// Fades from opaque on its leading side to clear on its trailing side.
    Gradient(MaskRect, TextDirection),
    Clear(MaskRect),
}

/// Mask layout for a block of a given size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskGeometry {
    area: Size,
    band_width: u16,
    band_height: u16,
    direction: TextDirection,
}

impl MaskGeometry {
    /// Lay out a mask over `area` reserving `band` for the control.
    ///
    /// The band is clamped to the area: at most its full height, and at most
    /// half its width (gradient plus control).
    pub fn new(area: Size, band: Size, direction: TextDirection) -> Self {
        Self {
            area,
            band_width: band.width.min(area.width / 2),
            band_height: band.height.min(area.height),
            direction,
        }
    }

    fn band_top(&self) -> u16 {
        self.area.height - self.band_height
    }

    /// The composition, top to bottom then leading to trailing.
    pub fn regions(&self) -> Vec<MaskRegion> {
        let Size { width, height } = self.area;
        let mut regions = Vec::with_capacity(4);
        if width == 0 || height == 0 {
            return regions;
        }

        let top = self.band_top();
        if top > 0 {
            regions.push(MaskRegion::Opaque(MaskRect::new(0, 0, width, top)));
        }
        if self.band_height == 0 {
            return regions;
        }

        let bw = self.band_width;
        let opaque_width = width - 2 * bw;
        let h = self.band_height;
        match self.direction {
            TextDirection::LeftToRight => {
                regions.push(MaskRegion::Opaque(MaskRect::new(0, top, opaque_width, h)));
                regions.push(MaskRegion::Gradient(
                    MaskRect::new(opaque_width, top, bw, h),
                    self.direction,
                ));
                regions.push(MaskRegion::Clear(MaskRect::new(width - bw, top, bw, h)));
            }
            TextDirection::RightToLeft => {
                regions.push(MaskRegion::Opaque(MaskRect::new(2 * bw, top, opaque_width, h)));
                regions.push(MaskRegion::Gradient(
                    MaskRect::new(bw, top, bw, h),
                    self.direction,
                ));
                regions.push(MaskRegion::Clear(MaskRect::new(0, top, bw, h)));
            }
        }
        regions.retain(|region| match region {
            MaskRegion::Opaque(r) | MaskRegion::Gradient(r, _) | MaskRegion::Clear(r) => {
                r.width > 0 && r.height > 0
            }
        });
        regions
    }

    /// Opacity in `[0, 1]` of the cell at `(x, y)`, sampled at its centre.
    pub fn opacity(&self, x: u16, y: u16) -> f32 {
        let Size { width, height } = self.area;
        if x >= width || y >= height {
            return 0.0;
        }
        if y < self.band_top() || self.band_width == 0 {
            return 1.0;
        }

        let bw = self.band_width;
        // Distance from the gradient's opaque side, in cells.
        let distance = match self.direction {
            TextDirection::LeftToRight => {
                let start = width - 2 * bw;
                if x < start {
                    return 1.0;
                }
                if x >= width - bw {
                    return 0.0;
                }
                f32::from(x - start) + 0.5
            }
            TextDirection::RightToLeft => {
                if x >= 2 * bw {
                    return 1.0;
                }
                if x < bw {
                    return 0.0;
                }
                f32::from(2 * bw - x) - 0.5
            }
        };
        gradient_opacity(distance / f32::from(bw))
    }
}

/// Opaque at 0, clear from [`GRADIENT_CLEAR_STOP`] onward.
fn gradient_opacity(t: f32) -> f32 {
    (1.0 - t / GRADIENT_CLEAR_STOP).clamp(0.0, 1.0)
}
