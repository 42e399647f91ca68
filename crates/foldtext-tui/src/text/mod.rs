//! Text layout utilities.
//!
//! - [`render_markup`] - Inline markup to styled ratatui Lines
//! - [`MarkupStyles`] - Styles for inline markup elements
//! - [`wrap_lines`] - Style-preserving word wrap
//! - [`visual_width`], [`line_width`] - Width in terminal cells

mod markup;
mod styles;
mod width;
mod wrap;

pub use markup::render_markup;
pub use styles::MarkupStyles;
pub use width::{line_width, visual_width};
pub use wrap::wrap_lines;
