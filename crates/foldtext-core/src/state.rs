//! Expand/collapse state machine.
//!
//! [`FoldState`] is plain data; [`reduce`] is the only way it changes.
//! Measurement passes, user taps, content replacement and the delayed
//! collapse-arm timer are all [`FoldEvent`]s. Side effects the host must
//! carry out (animate, schedule a timer) come back as [`Effect`]s.

use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::animation::Transition;
use crate::config::FoldConfig;
use crate::geometry::Size;
use crate::measure::derive_truncation;

/// Which control a label measurement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    More,
    Less,
}

/// What the user tapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapTarget {
    /// Anywhere on the text body.
    Body,
    /// The visible more/less control.
    Control,
}

/// Inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldEvent {
    /// Size of the visible, possibly line-limited rendering.
    TruncatedMeasured(Size),
    /// Size of the hidden rendering without a line limit.
    IntrinsicMeasured(Size),
    /// Size of a hidden control label.
    LabelMeasured { control: Control, size: Size },
    Tap(TapTarget),
    /// The text content was replaced.
    ContentChanged,
    /// A previously scheduled collapse-arm delay elapsed.
    CollapseArmElapsed { generation: u64 },
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Animate the height change using this transition.
    Animate(Transition),
    /// Deliver `CollapseArmElapsed { generation }` after `delay`.
    ScheduleCollapseArm { generation: u64, delay: Duration },
}

/// Coarse phase, for display and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Collapsed,
    Expanded,
    /// Expanded and the collapse control may be shown.
    CollapseArmed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collapsed => write!(f, "collapsed"),
            Self::Expanded => write!(f, "expanded"),
            Self::CollapseArmed => write!(f, "collapse armed"),
        }
    }
}

/// Per-instance measurement and expansion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FoldState {
    intrinsic: Size,
    truncated: Size,
    more_label: Size,
    less_label: Size,
    is_truncated: bool,
    is_expanded: bool,
    show_less: bool,
    arm_generation: u64,
}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    pub state: FoldState,
    pub effects: Vec<Effect>,
}

impl FoldState {
    /// Fresh state: nothing measured, collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intrinsic_size(&self) -> Size {
        self.intrinsic
    }

    pub fn truncated_size(&self) -> Size {
        self.truncated
    }

    /// Size of the expand control's label, which sizes the mask band.
    pub fn more_label_size(&self) -> Size {
        self.more_label
    }

    pub fn less_label_size(&self) -> Size {
        self.less_label
    }

    pub fn is_truncated(&self) -> bool {
        self.is_truncated
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    /// Whether the collapse-arm delay has elapsed.
    pub fn is_collapse_armed(&self) -> bool {
        self.show_less
    }

    pub fn arm_generation(&self) -> u64 {
        self.arm_generation
    }

    /// Collapsed and truncated: the expand control is visible.
    pub fn should_show_more(&self) -> bool {
        !self.is_expanded && self.is_truncated
    }

    /// The collapse control occupies its slot (it may still be waiting to arm).
    pub fn less_slot_visible(&self) -> bool {
        self.is_expanded && !self.is_truncated
    }

    /// The collapse control is visible.
    pub fn should_show_less(&self) -> bool {
        self.less_slot_visible() && self.show_less
    }

    pub fn phase(&self) -> Phase {
        match (self.is_expanded, self.show_less) {
            (false, _) => Phase::Collapsed,
            (true, false) => Phase::Expanded,
            (true, true) => Phase::CollapseArmed,
        }
    }

    fn recompute_truncation(&mut self) {
        self.is_truncated = derive_truncation(self.intrinsic, self.truncated);
    }

    fn toggle(&mut self, config: &FoldConfig, effects: &mut Vec<Effect>) {
        self.is_expanded = !self.is_expanded;
        self.show_less = false;
        effects.push(Effect::Animate(config.expand_transition));
    }
}

/// Apply `event` to `state`.
pub fn reduce(state: FoldState, event: FoldEvent, config: &FoldConfig) -> Reduction {
    let before = state;
    let mut next = state;
    let mut effects = Vec::new();

    match event {
        FoldEvent::TruncatedMeasured(size) => {
            next.truncated = size;
            next.recompute_truncation();
        }
        FoldEvent::IntrinsicMeasured(size) => {
            next.intrinsic = size;
            next.recompute_truncation();
        }
        FoldEvent::LabelMeasured { control, size } => match control {
            Control::More => next.more_label = size,
            Control::Less => next.less_label = size,
        },
        FoldEvent::Tap(target) => {
            let on_control = target == TapTarget::Control
                && (next.should_show_more() || next.should_show_less());
            if on_control || next.should_show_more() || (next.is_expanded && config.collapse_enabled)
            {
                next.toggle(config, &mut effects);
            }
        }
        FoldEvent::ContentChanged => {
            next.is_expanded = false;
            next.show_less = false;
        }
        FoldEvent::CollapseArmElapsed { generation } => {
            if generation == next.arm_generation && next.less_slot_visible() {
                next.show_less = true;
            } else {
                debug!(
                    generation,
                    current = next.arm_generation,
                    "ignoring stale collapse arm"
                );
            }
        }
    }

    // Entering or leaving the less slot restarts the arm delay.
    match (before.less_slot_visible(), next.less_slot_visible()) {
        (false, true) => {
            next.arm_generation += 1;
            next.show_less = false;
            effects.push(Effect::ScheduleCollapseArm {
                generation: next.arm_generation,
                delay: config.collapse_arm_delay(),
            });
        }
        (true, false) => {
            next.arm_generation += 1;
            next.show_less = false;
        }
        _ => {}
    }

    if before.phase() != next.phase() || before.is_truncated != next.is_truncated {
        debug!(
            from = %before.phase(),
            to = %next.phase(),
            truncated = next.is_truncated,
            "fold state changed"
        );
    }

    Reduction {
        state: next,
        effects,
    }
}
