//! Theme components for the TUI.
//!
//! This module provides:
//! - [`Theme`] - Color palette (Catppuccin Mocha/Latte/High Contrast)
//! - [`blend`] - Color interpolation used by the truncation fade

mod blend;
mod colors;

pub use blend::blend;
pub use colors::Theme;
