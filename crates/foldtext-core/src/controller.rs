//! Drives a [`FoldState`] from a host's frame loop.
//!
//! The controller owns everything an expandable block needs between frames:
//! the reduced state, pending collapse-arm deadlines, the running height
//! animation and the last content it saw. Hosts call [`FoldController::settle`]
//! (or run [`FoldController::plan`] themselves) before drawing, and
//! [`FoldController::tick`] on every timer tick.

use serde::Serialize;
use std::borrow::Cow;
use std::time::Instant;
use tracing::debug;

use crate::animation::HeightAnimation;
use crate::config::FoldConfig;
use crate::content::TextContent;
use crate::geometry::Size;
use crate::measure::{Constraints, Measurer};
use crate::state::{reduce, Control, Effect, FoldEvent, FoldState, Phase};
use crate::timers::DeferredQueue;

/// Upper bound on measurement rounds per frame.
///
/// One round to measure, one for the truncation flag to change what is
/// rendered (trimming, mask), one to confirm.
pub const MAX_LAYOUT_PASSES: usize = 3;

/// What to measure in one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassPlan<'a> {
    /// Text of the visible rendering, trimmed if the expand control is shown.
    pub constrained_text: Cow<'a, str>,
    /// Line limit applies unless expanded.
    pub constrained: Constraints,
    /// Text of the hidden full rendering; never trimmed.
    pub intrinsic_text: &'a str,
    pub intrinsic: Constraints,
    pub more_label: &'a str,
    pub less_label: &'a str,
    pub label: Constraints,
}

/// Sizes produced by one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurements {
    pub constrained: Size,
    pub intrinsic: Size,
    pub more_label: Size,
    pub less_label: Size,
}

/// Serializable snapshot of a block's measurement state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeasurementReport {
    pub intrinsic: Size,
    pub truncated: Size,
    pub more_label: Size,
    pub less_label: Size,
    pub is_truncated: bool,
    pub is_expanded: bool,
    pub collapse_armed: bool,
    pub show_more: bool,
    pub show_less: bool,
    pub phase: Phase,
}

/// Per-instance owner of fold state.
#[derive(Debug, Clone, Default)]
pub struct FoldController {
    state: FoldState,
    arms: DeferredQueue<u64>,
    animation: Option<HeightAnimation>,
    displayed_height: u16,
    last_content: Option<TextContent>,
}

impl FoldController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FoldState {
        &self.state
    }

    /// Apply one event and carry out its effects.
    ///
    /// Returns `true` if the state changed.
    pub fn dispatch(&mut self, event: FoldEvent, config: &FoldConfig, now: Instant) -> bool {
        let reduction = reduce(self.state, event, config);
        let changed = reduction.state != self.state;
        self.state = reduction.state;

        for effect in reduction.effects {
            match effect {
                Effect::Animate(transition) => {
                    self.animation = (!transition.is_instant())
                        .then(|| HeightAnimation::new(self.displayed_height, now, transition));
                }
                Effect::ScheduleCollapseArm { generation, delay } => {
                    self.arms.schedule(now + delay, generation);
                }
            }
        }
        changed
    }

    /// Fire due timers and retire a finished animation.
    ///
    /// Returns `true` if anything visible changed.
    pub fn tick(&mut self, config: &FoldConfig, now: Instant) -> bool {
        let mut changed = false;
        for generation in self.arms.drain_due(now) {
            changed |= self.dispatch(FoldEvent::CollapseArmElapsed { generation }, config, now);
        }
        if let Some(animation) = self.animation {
            if animation.is_finished(now) {
                self.animation = None;
                changed = true;
            }
        }
        changed
    }

    /// Record the content about to be laid out, collapsing if it changed.
    pub fn observe_content(&mut self, content: &TextContent, config: &FoldConfig, now: Instant) {
        match &self.last_content {
            Some(previous) if previous == content => {}
            Some(_) => {
                debug!("content replaced, forcing collapse");
                self.dispatch(FoldEvent::ContentChanged, config, now);
                self.last_content = Some(content.clone());
            }
            None => self.last_content = Some(content.clone()),
        }
    }

    /// Describe the next measurement round for the current state.
    pub fn plan<'a>(
        &self,
        content: &'a TextContent,
        config: &'a FoldConfig,
        width: u16,
    ) -> PassPlan<'a> {
        let constrained = match config.effective_line_limit() {
            Some(limit) if !self.state.is_expanded() => Constraints::limited(width, limit),
            _ => Constraints::unbounded(width),
        };
        PassPlan {
            constrained_text: content
                .display_text(config.trim_multiple_newlines, self.state.should_show_more()),
            constrained,
            intrinsic_text: content.as_str(),
            intrinsic: Constraints::unbounded(width),
            more_label: &config.more_label,
            less_label: &config.less_label,
            label: Constraints::limited(width, 1),
        }
    }

    /// Feed one round of measurements into the state machine.
    ///
    /// Returns `true` if the state changed.
    pub fn apply_measurements(
        &mut self,
        measurements: Measurements,
        config: &FoldConfig,
        now: Instant,
    ) -> bool {
        let events = [
            FoldEvent::TruncatedMeasured(measurements.constrained),
            FoldEvent::IntrinsicMeasured(measurements.intrinsic),
            FoldEvent::LabelMeasured {
                control: Control::More,
                size: measurements.more_label,
            },
            FoldEvent::LabelMeasured {
                control: Control::Less,
                size: measurements.less_label,
            },
        ];
        let mut changed = false;
        for event in events {
            changed |= self.dispatch(event, config, now);
        }
        changed
    }

    /// Measure with `measurer` until nothing changes, at most
    /// [`MAX_LAYOUT_PASSES`] rounds. Returns the number of rounds run.
    pub fn settle<M: Measurer>(
        &mut self,
        content: &TextContent,
        config: &FoldConfig,
        width: u16,
        measurer: &M,
        now: Instant,
    ) -> usize {
        self.observe_content(content, config, now);
        for pass in 1..=MAX_LAYOUT_PASSES {
            let plan = self.plan(content, config, width);
            let measurements = Measurements {
                constrained: measurer.measure(&plan.constrained_text, plan.constrained),
                intrinsic: measurer.measure(plan.intrinsic_text, plan.intrinsic),
                more_label: measurer.measure(plan.more_label, plan.label),
                less_label: measurer.measure(plan.less_label, plan.label),
            };
            if !self.apply_measurements(measurements, config, now) {
                return pass;
            }
        }
        debug!(passes = MAX_LAYOUT_PASSES, "layout did not settle, keeping last pass");
        MAX_LAYOUT_PASSES
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.animation.is_some_and(|animation| !animation.is_finished(now))
    }

    /// Height to draw this frame given the block's natural height.
    pub fn displayed_height(&mut self, natural: u16, now: Instant) -> u16 {
        let height = match self.animation {
            Some(animation) if !animation.is_finished(now) => animation.value(natural, now),
            _ => natural,
        };
        self.displayed_height = height;
        height
    }

    /// Earliest instant at which [`FoldController::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.arms.next_deadline()
    }

    pub fn report(&self) -> MeasurementReport {
        let state = &self.state;
        MeasurementReport {
            intrinsic: state.intrinsic_size(),
            truncated: state.truncated_size(),
            more_label: state.more_label_size(),
            less_label: state.less_label_size(),
            is_truncated: state.is_truncated(),
            is_expanded: state.is_expanded(),
            collapse_armed: state.is_collapse_armed(),
            show_more: state.should_show_more(),
            show_less: state.should_show_less(),
            phase: state.phase(),
        }
    }
}
