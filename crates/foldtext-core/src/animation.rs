//! Expand/collapse transition curves.
//!
//! A [`Transition`] is configuration (serializable); a [`HeightAnimation`]
//! is a running instance that eases the displayed height of a block from
//! where it was when the user toggled it toward its current natural height.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Easing curves applied to a linear time fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
    FastOutSlowIn,
}

impl Easing {
    /// Map a fraction in `[0, 1]` onto the curve.
    pub fn transform(self, fraction: f32) -> f32 {
        match self {
            Self::Linear => fraction.clamp(0.0, 1.0),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Self::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// Solve a CSS-style cubic bezier for `y` at the given `x` fraction.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    fn sample(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    // Newton-Raphson first, bisection if it stalls.
    let mut t = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            converged = true;
            break;
        }
        let dx = derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !converged {
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        t = fraction;
        for _ in 0..16 {
            let delta = sample(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    sample(ay, by, cy, t)
}

/// How the block animates when it expands or collapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Total duration in milliseconds. Zero disables animation.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default)]
    pub easing: Easing,
}

fn default_duration_ms() -> u64 {
    350
}

impl Default for Transition {
    fn default() -> Self {
        Self::ease_in_out(default_duration_ms())
    }
}

impl Transition {
    /// Jump straight to the new height.
    pub const fn none() -> Self {
        Self {
            duration_ms: 0,
            easing: Easing::Linear,
        }
    }

    pub const fn linear(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            easing: Easing::Linear,
        }
    }

    pub const fn ease_in_out(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            easing: Easing::EaseInOut,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn is_instant(&self) -> bool {
        self.duration_ms == 0
    }

    /// Eased progress in `[0, 1]` after `elapsed`.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.is_instant() {
            return 1.0;
        }
        let fraction = elapsed.as_secs_f32() / self.duration().as_secs_f32();
        self.easing.transform(fraction.clamp(0.0, 1.0))
    }
}

/// A running height transition.
///
/// The target is not stored: it is the block's natural height at the time
/// of each frame, which is only known once the new layout is measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightAnimation {
    pub from: u16,
    pub started_at: Instant,
    pub transition: Transition,
}

impl HeightAnimation {
    pub fn new(from: u16, started_at: Instant, transition: Transition) -> Self {
        Self {
            from,
            started_at,
            transition,
        }
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.transition.duration()
    }

    /// The height to display for `target` at `now`.
    pub fn value(&self, target: u16, now: Instant) -> u16 {
        let t = self
            .transition
            .progress(now.saturating_duration_since(self.started_at));
        let from = f32::from(self.from);
        let to = f32::from(target);
        let value = (from + (to - from) * t).round();
        value.clamp(0.0, f32::from(u16::MAX)) as u16
    }
}
