//! foldtext-core: Headless truncation detection for expandable text
//!
//! This crate holds everything that does not depend on a renderer:
//! - Configuration and content normalization
//! - Truncation derivation from two measurements
//! - The expand/collapse state machine and its deferred timers
//! - Mask geometry for the truncation fade
//! - Height animation curves

pub mod animation;
pub mod config;
pub mod content;
pub mod controller;
pub mod geometry;
pub mod mask;
pub mod measure;
pub mod state;
pub mod timers;

// Re-export commonly used types
pub use animation::{Easing, HeightAnimation, Transition};
pub use config::{ConfigError, FoldConfig};
pub use content::{trim_double_newlines, TextContent};
pub use controller::{FoldController, MeasurementReport, Measurements, PassPlan, MAX_LAYOUT_PASSES};
pub use geometry::{Size, TextDirection};
pub use mask::{MaskGeometry, MaskRect, MaskRegion, GRADIENT_CLEAR_STOP};
pub use measure::{derive_truncation, Constraints, Measurer};
pub use state::{reduce, Control, Effect, FoldEvent, FoldState, Phase, Reduction, TapTarget};
pub use timers::DeferredQueue;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
