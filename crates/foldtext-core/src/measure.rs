//! The measurement oracle and truncation derivation.
//!
//! Truncation itself is delegated to whatever line-limited renderer the host
//! provides. This module only compares what that renderer produced with and
//! without a line limit.

use crate::geometry::Size;

/// Layout constraints for one measurement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    /// Available width in cells.
    pub max_width: u16,
    /// Maximum number of lines, or `None` for no limit.
    pub max_lines: Option<usize>,
}

impl Constraints {
    /// Fixed width, unlimited height: measures the intrinsic size.
    pub const fn unbounded(max_width: u16) -> Self {
        Self {
            max_width,
            max_lines: None,
        }
    }

    /// Fixed width and line limit.
    pub const fn limited(max_width: u16, max_lines: usize) -> Self {
        Self {
            max_width,
            max_lines: Some(max_lines),
        }
    }
}

/// Something that can lay out text off-screen and report its size.
pub trait Measurer {
    fn measure(&self, content: &str, constraints: Constraints) -> Size;
}

impl<M: Measurer + ?Sized> Measurer for &M {
    fn measure(&self, content: &str, constraints: Constraints) -> Size {
        (**self).measure(content, constraints)
    }
}

/// Whether the constrained rendering lost content relative to the intrinsic one.
///
/// Unmeasured (empty) sizes and a constrained size at least as tall as the
/// intrinsic one all resolve to `false`.
pub fn derive_truncation(intrinsic: Size, constrained: Size) -> bool {
    if intrinsic.is_empty() || constrained.is_empty() {
        return false;
    }
    intrinsic != constrained && intrinsic.height > constrained.height
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Measures one line per `max_width` characters, ignoring words.
    struct CharGrid;

    impl Measurer for CharGrid {
        fn measure(&self, content: &str, constraints: Constraints) -> Size {
            if content.is_empty() || constraints.max_width == 0 {
                return Size::ZERO;
            }
            let width = usize::from(constraints.max_width);
            let lines = content.chars().count().div_ceil(width);
            let lines = constraints.max_lines.map_or(lines, |max| lines.min(max));
            Size::new(constraints.max_width, lines as u16)
        }
    }

    #[test]
    fn test_derive_truncation_detects_clipped_height() {
        assert!(derive_truncation(Size::new(20, 5), Size::new(20, 3)));
    }

    #[test]
    fn test_derive_truncation_equal_sizes() {
        assert!(!derive_truncation(Size::new(20, 3), Size::new(20, 3)));
    }

    #[test]
    fn test_derive_truncation_degenerate_inputs() {
        assert!(!derive_truncation(Size::ZERO, Size::ZERO));
        assert!(!derive_truncation(Size::new(20, 5), Size::ZERO));
        assert!(!derive_truncation(Size::ZERO, Size::new(20, 3)));
        // Constrained taller than intrinsic can't be truncation.
        assert!(!derive_truncation(Size::new(20, 2), Size::new(20, 3)));
    }

    #[test]
    fn test_derive_truncation_is_idempotent() {
        let intrinsic = Size::new(30, 8);
        let constrained = Size::new(30, 3);
        let first = derive_truncation(intrinsic, constrained);
        for _ in 0..5 {
            assert_eq!(derive_truncation(intrinsic, constrained), first);
        }
    }

    fn measure_owned<M: Measurer>(measurer: M, content: &str, constraints: Constraints) -> Size {
        measurer.measure(content, constraints)
    }

    #[test]
    fn test_measurer_through_reference() {
        let grid = CharGrid;
        let by_ref: &dyn Measurer = &grid;
        let size = measure_owned(by_ref, "abcdefghij", Constraints::limited(4, 2));
        assert_eq!(size, Size::new(4, 2));
        assert_eq!(
            grid.measure("abcdefghij", Constraints::unbounded(4)),
            Size::new(4, 3)
        );
    }
}
