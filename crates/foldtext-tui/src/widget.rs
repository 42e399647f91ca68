//! The expandable text widget.
//!
//! [`ExpandableText`] is a short-lived description, rebuilt every frame like
//! any ratatui widget. Everything that must survive between frames lives in
//! [`ExpandableTextState`].
//!
//! Each frame runs the same pipeline:
//! 1. Replaced content forces a collapse.
//! 2. The visible rendering (line-limited unless expanded), the full
//!    rendering and both control labels are measured until the fold state
//!    stops changing.
//! 3. The visible rendering is drawn through a [`TruncationMask`] and a
//!    [`SizeReporter`], which records how much of it fit on screen.
//! 4. The more or less control is overlaid at the trailing edge of the last
//!    visible line. The less control waits for the height animation to end.

use foldtext_core::{
    FoldConfig, FoldController, FoldEvent, MeasurementReport, Phase, Size, TapTarget,
    TextContent, TextDirection, Transition,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{StatefulWidget, Widget},
};
use std::cell::Cell;
use std::time::Instant;
use tracing::debug;

use crate::mask::TruncationMask;
use crate::measure::{layout_lines, TextMeasurer};
use crate::node::TextBlock;
use crate::size_reporter::SizeReporter;
use crate::text::line_width;
use crate::theme::Theme;

/// Control color when neither a color nor a theme is given.
const DEFAULT_BUTTON_COLOR: Color = Color::Blue;

/// Text limited to a number of lines with a control to reveal the rest.
#[derive(Debug, Clone)]
pub struct ExpandableText<'a> {
    content: TextContent,
    config: FoldConfig,
    font: Modifier,
    foreground: Option<Color>,
    button_font: Modifier,
    button_color: Option<Color>,
    direction: TextDirection,
    background: Option<Color>,
    theme: Option<&'a Theme>,
}

impl<'a> ExpandableText<'a> {
    /// Create the widget with the default configuration.
    ///
    /// Leading and trailing whitespace is trimmed from `text`.
    pub fn new(text: impl Into<TextContent>) -> Self {
        Self {
            content: text.into(),
            config: FoldConfig::default(),
            font: Modifier::empty(),
            foreground: None,
            button_font: Modifier::empty(),
            button_color: None,
            direction: TextDirection::default(),
            background: None,
            theme: None,
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: FoldConfig) -> Self {
        self.config = config;
        self
    }

    /// Text attributes (bold, italic, ...).
    #[must_use]
    pub fn font(mut self, font: Modifier) -> Self {
        self.font = font;
        self
    }

    #[must_use]
    pub fn foreground_color(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    /// Lines shown while collapsed. Zero disables truncation.
    #[must_use]
    pub fn line_limit(mut self, limit: usize) -> Self {
        self.config.line_limit = limit;
        self
    }

    #[must_use]
    pub fn more_button_text(mut self, label: impl Into<String>) -> Self {
        self.config.more_label = label.into();
        self
    }

    #[must_use]
    pub fn less_button_text(mut self, label: impl Into<String>) -> Self {
        self.config.less_label = label.into();
        self
    }

    /// Attributes of the more/less control.
    #[must_use]
    pub fn more_button_font(mut self, font: Modifier) -> Self {
        self.button_font = font;
        self
    }

    #[must_use]
    pub fn more_button_color(mut self, color: Color) -> Self {
        self.button_color = Some(color);
        self
    }

    #[must_use]
    pub fn expand_animation(mut self, transition: Transition) -> Self {
        self.config.expand_transition = transition;
        self
    }

    /// Allow tapping the expanded body to collapse it.
    #[must_use]
    pub fn enable_collapse(mut self, enabled: bool) -> Self {
        self.config.collapse_enabled = enabled;
        self
    }

    #[must_use]
    pub fn trim_multiple_newlines_when_truncated(mut self, enabled: bool) -> Self {
        self.config.trim_multiple_newlines = enabled;
        self
    }

    #[must_use]
    pub fn direction(mut self, direction: TextDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Color the truncation fade blends toward.
    #[must_use]
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Palette used for any color not set explicitly.
    #[must_use]
    pub fn theme(mut self, theme: &'a Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn content(&self) -> &TextContent {
        &self.content
    }

    pub fn fold_config(&self) -> &FoldConfig {
        &self.config
    }

    fn base_style(&self) -> Style {
        let style = Style::default().add_modifier(self.font);
        match self.foreground.or(self.theme.map(|theme| theme.text)) {
            Some(color) => style.fg(color),
            None => style,
        }
    }

    fn button_style(&self) -> Style {
        let color = self
            .button_color
            .or(self.theme.map(|theme| theme.accent))
            .unwrap_or(DEFAULT_BUTTON_COLOR);
        Style::default().fg(color).add_modifier(self.button_font)
    }

    fn background_color(&self) -> Color {
        self.background
            .or(self.theme.map(|theme| theme.base))
            .unwrap_or(Color::Reset)
    }

    fn alignment(&self) -> Alignment {
        if self.direction.is_rtl() {
            Alignment::Right
        } else {
            Alignment::Left
        }
    }

    /// Settle measurement for `width`.
    fn prepare(&self, width: u16, state: &mut ExpandableTextState, now: Instant) {
        state.config.clone_from(&self.config);
        let measurer = TextMeasurer::new(self.base_style());
        state
            .controller
            .settle(&self.content, &self.config, width, &measurer, now);
    }

    /// Lines of the visible rendering for the current state.
    fn visible_lines(&self, width: u16, state: &ExpandableTextState) -> Vec<Line<'static>> {
        let plan = state.controller.plan(&self.content, &self.config, width);
        let mut lines = layout_lines(&plan.constrained_text, self.base_style(), width);
        if let Some(max) = plan.constrained.max_lines {
            lines.truncate(max);
        }
        lines
    }

    /// Whether the less control can share the last line of text.
    fn less_fits_beside(last_line: Option<&Line<'_>>, label: Size, width: u16) -> bool {
        let used = last_line.map_or(0, line_width);
        used + 1 + usize::from(label.width) <= usize::from(width)
    }

    /// Height needed at `width` with no animation in progress.
    fn natural_height(&self, width: u16, state: &ExpandableTextState) -> u16 {
        let fold = state.controller.state();
        let text_height = fold.truncated_size().height;
        if !fold.less_slot_visible() || fold.less_label_size().is_empty() {
            return text_height;
        }
        let lines = self.visible_lines(width, state);
        if Self::less_fits_beside(lines.last(), fold.less_label_size(), width) {
            text_height
        } else {
            text_height.saturating_add(1)
        }
    }

    /// Settle measurement and return the height to allocate this frame,
    /// including any height animation in progress.
    ///
    /// The next render draws as of the same `now`.
    pub fn desired_height(&self, width: u16, state: &mut ExpandableTextState, now: Instant) -> u16 {
        state.frame_time = Some(now);
        self.prepare(width, state, now);
        let natural = self.natural_height(width, state);
        state.controller.displayed_height(natural, now)
    }
}

impl StatefulWidget for ExpandableText<'_> {
    type State = ExpandableTextState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let now = state.frame_time.take().unwrap_or_else(Instant::now);
        self.prepare(area.width, state, now);
        state.body_area = None;
        state.control_area = None;
        state.visible_size = Size::ZERO;
        if area.is_empty() {
            return;
        }

        let fold = *state.controller.state();
        let lines = self.visible_lines(area.width, state);
        let last_line_fits_less =
            Self::less_fits_beside(lines.last(), fold.less_label_size(), area.width);
        let text_rows = u16::try_from(lines.len()).unwrap_or(u16::MAX).min(area.height);
        let text_area = Rect {
            height: text_rows,
            ..area
        };
        state.body_area = Some(area);

        let reported = Cell::new(None);
        let block = TextBlock::new(lines).alignment(self.alignment());
        let masked = TruncationMask::new(block, fold.more_label_size(), fold.should_show_more())
            .direction(self.direction)
            .background(self.background_color());
        SizeReporter::new(masked, |size| reported.set(Some(size))).render(text_area, buf);

        if let Some(size) = reported.get() {
            state.visible_size = size;
        }

        // Mid-animation the last visible row is not the last line of text.
        let animating = state.controller.is_animating(now);
        let control = if fold.should_show_more() {
            Some((self.config.more_label.as_str(), fold.more_label_size(), true))
        } else if fold.should_show_less() && !animating {
            Some((
                self.config.less_label.as_str(),
                fold.less_label_size(),
                last_line_fits_less,
            ))
        } else {
            None
        };
        let Some((label, size, on_last_line)) = control else {
            return;
        };
        if text_rows == 0 || size.width == 0 {
            return;
        }

        let label_width = size.width.min(area.width);
        let row = if on_last_line {
            text_area.bottom() - 1
        } else {
            text_area.bottom()
        };
        if row >= area.bottom() {
            return;
        }
        let column = if self.direction.is_rtl() {
            area.left()
        } else {
            area.right() - label_width
        };
        let control_area = Rect::new(column, row, label_width, 1);
        buf.set_stringn(
            column,
            row,
            label,
            usize::from(label_width),
            self.button_style(),
        );
        state.control_area = Some(control_area);
    }
}

/// Per-instance state of an [`ExpandableText`].
#[derive(Debug, Clone, Default)]
pub struct ExpandableTextState {
    controller: FoldController,
    config: FoldConfig,
    body_area: Option<Rect>,
    control_area: Option<Rect>,
    visible_size: Size,
    /// Instant of the frame being laid out, consumed by the next render.
    frame_time: Option<Instant>,
}

impl ExpandableTextState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a click at `(column, row)` to the control or the body.
    ///
    /// Returns `true` if the fold state changed.
    pub fn handle_click(&mut self, column: u16, row: u16, now: Instant) -> bool {
        let position = Position::new(column, row);
        let target = if self.control_area.is_some_and(|area| area.contains(position)) {
            TapTarget::Control
        } else if self.body_area.is_some_and(|area| area.contains(position)) {
            TapTarget::Body
        } else {
            return false;
        };
        debug!(column, row, ?target, "tap");
        self.controller
            .dispatch(FoldEvent::Tap(target), &self.config, now)
    }

    /// Activate the visible control, as if it were clicked.
    pub fn activate(&mut self, now: Instant) -> bool {
        self.controller
            .dispatch(FoldEvent::Tap(TapTarget::Control), &self.config, now)
    }

    /// Fire due timers. Returns `true` if a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.controller.tick(&self.config, now)
    }

    pub fn is_expanded(&self) -> bool {
        self.controller.state().is_expanded()
    }

    pub fn is_truncated(&self) -> bool {
        self.controller.state().is_truncated()
    }

    pub fn phase(&self) -> Phase {
        self.controller.state().phase()
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.controller.is_animating(now)
    }

    /// Where the control was drawn last frame.
    pub fn control_area(&self) -> Option<Rect> {
        self.control_area
    }

    /// Area the widget occupied last frame.
    pub fn body_area(&self) -> Option<Rect> {
        self.body_area
    }

    /// Size of the text actually drawn last frame, after clipping to the
    /// animated height.
    pub fn visible_size(&self) -> Size {
        self.visible_size
    }

    pub fn report(&self) -> MeasurementReport {
        self.controller.report()
    }
}

/// Render `widget` off-screen at `width` as of `now` and return its rows
/// with trailing whitespace removed.
pub fn render_to_lines(
    widget: &ExpandableText<'_>,
    width: u16,
    state: &mut ExpandableTextState,
    now: Instant,
) -> Vec<String> {
    let height = widget.desired_height(width, state, now);
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    widget.clone().render(area, &mut buf, state);
    (area.top()..area.bottom())
        .map(|y| {
            let row: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_to_string, render_widget};
    use insta::assert_snapshot;
    use std::time::Duration;

    const TWELVE: &str = "one two three four five six seven eight nine ten eleven twelve";

    fn rows(widget: &ExpandableText<'_>, state: &mut ExpandableTextState, now: Instant) -> String {
        buffer_to_string(&render_widget(widget, 20, state, now))
    }

    #[test]
    fn test_short_text_renders_without_control() {
        let widget = ExpandableText::new("just a line");
        let mut state = ExpandableTextState::new();
        assert_eq!(rows(&widget, &mut state, Instant::now()), "just a line");
        assert!(!state.is_truncated());
        assert_eq!(state.control_area(), None);
    }

    #[test]
    fn test_collapsed_render() {
        let widget = ExpandableText::new(TWELVE);
        let mut state = ExpandableTextState::new();
        let output = rows(&widget, &mut state, Instant::now());
        assert_snapshot!(output, @r"
        one two three four
        five six seven eight
        nine ten eleven more
        ");
        assert!(state.is_truncated());
        assert_eq!(state.control_area(), Some(Rect::new(16, 2, 4, 1)));
    }

    #[test]
    fn test_expand_arm_and_collapse() {
        let widget = ExpandableText::new(TWELVE);
        let mut state = ExpandableTextState::new();
        let start = Instant::now();
        rows(&widget, &mut state, start);

        assert!(state.handle_click(17, 2, start));
        assert!(state.is_expanded());

        let settled = start + Duration::from_secs(1);
        assert_eq!(
            rows(&widget, &mut state, settled),
            "one two three four\nfive six seven eight\nnine ten eleven\ntwelve"
        );
        assert_eq!(state.phase(), Phase::Expanded);
        assert_eq!(state.control_area(), None);

        assert!(state.tick(settled + Duration::from_millis(250)));
        assert_eq!(state.phase(), Phase::CollapseArmed);
        let expanded = rows(&widget, &mut state, settled + Duration::from_millis(250));
        assert_eq!(expanded.lines().last(), Some("twelve          less"));
        assert_eq!(state.control_area(), Some(Rect::new(16, 3, 4, 1)));

        assert!(state.handle_click(16, 3, settled + Duration::from_secs(1)));
        let later = settled + Duration::from_secs(5);
        assert_eq!(rows(&widget, &mut state, later).lines().count(), 3);
        assert!(!state.is_expanded());
        assert!(state.is_truncated());
    }

    #[test]
    fn test_body_click_expands_but_does_not_collapse_by_default() {
        let widget = ExpandableText::new(TWELVE);
        let mut state = ExpandableTextState::new();
        let start = Instant::now();
        rows(&widget, &mut state, start);

        assert!(state.handle_click(0, 0, start));
        let settled = start + Duration::from_secs(1);
        rows(&widget, &mut state, settled);
        assert!(state.is_expanded());

        assert!(!state.handle_click(0, 0, settled));
        assert!(state.is_expanded());
    }

    #[test]
    fn test_collapse_enabled_body_click() {
        let widget = ExpandableText::new(TWELVE).enable_collapse(true);
        let mut state = ExpandableTextState::new();
        let start = Instant::now();
        rows(&widget, &mut state, start);
        state.activate(start);
        rows(&widget, &mut state, start + Duration::from_secs(1));

        assert!(state.handle_click(3, 1, start + Duration::from_secs(1)));
        assert!(!state.is_expanded());
    }

    #[test]
    fn test_click_outside_is_ignored() {
        let widget = ExpandableText::new(TWELVE);
        let mut state = ExpandableTextState::new();
        rows(&widget, &mut state, Instant::now());
        assert!(!state.handle_click(5, 10, Instant::now()));
    }

    #[test]
    fn test_less_gets_own_row_when_last_line_is_full() {
        let widget = ExpandableText::new("one two three four five six seven eight").line_limit(1);
        let mut state = ExpandableTextState::new();
        let start = Instant::now();
        assert_eq!(widget.desired_height(20, &mut state, start), 1);

        state.activate(start);
        let settled = start + Duration::from_secs(1);
        assert_eq!(widget.desired_height(20, &mut state, settled), 3);

        state.tick(settled + Duration::from_millis(250));
        let output = rows(&widget, &mut state, settled + Duration::from_millis(250));
        assert_eq!(
            output,
            "one two three four\nfive six seven eight\n                less"
        );
    }

    #[test]
    fn test_content_change_collapses() {
        let mut state = ExpandableTextState::new();
        let start = Instant::now();
        let first = ExpandableText::new(TWELVE);
        rows(&first, &mut state, start);
        state.activate(start);
        rows(&first, &mut state, start + Duration::from_secs(1));
        assert!(state.is_expanded());

        let second = ExpandableText::new(format!("{TWELVE} thirteen fourteen"));
        rows(&second, &mut state, start + Duration::from_secs(2));
        assert!(!state.is_expanded());
        assert!(state.is_truncated());
    }

    #[test]
    fn test_blank_lines_trimmed_only_while_truncated() {
        let text = "A\n\n\nB\nC\nD";
        let mut state = ExpandableTextState::new();
        let trimmed = rows(&ExpandableText::new(text), &mut state, Instant::now());
        assert_eq!(trimmed, "A\nB\nC               more");

        let mut state = ExpandableTextState::new();
        let verbatim = rows(
            &ExpandableText::new(text).trim_multiple_newlines_when_truncated(false),
            &mut state,
            Instant::now(),
        );
        assert_eq!(verbatim, "A\n\n                more");
    }

    #[test]
    fn test_right_to_left_puts_control_on_the_left() {
        let widget = ExpandableText::new(TWELVE).direction(TextDirection::RightToLeft);
        let mut state = ExpandableTextState::new();
        let output = rows(&widget, &mut state, Instant::now());
        assert_eq!(
            output,
            "  one two three four\nfive six seven eight\nmore nine ten eleven"
        );
        assert_eq!(state.control_area(), Some(Rect::new(0, 2, 4, 1)));
    }

    #[test]
    fn test_custom_labels_and_limit() {
        let widget = ExpandableText::new(TWELVE)
            .line_limit(2)
            .more_button_text("read more")
            .more_button_color(Color::Red)
            .more_button_font(Modifier::BOLD);
        let mut state = ExpandableTextState::new();
        let buf = render_widget(&widget, 20, &mut state, Instant::now());
        assert_eq!(
            buffer_to_string(&buf),
            "one two three four\nfive six s read more"
        );
        // The gradient runs over x = 2..11 and is clear from 90% of its width.
        assert_eq!(buf[(10, 1)].symbol(), " ");
        assert!(buf[(9, 1)].modifier.contains(Modifier::DIM));
        let cell = &buf[(11, 1)];
        assert_eq!(cell.symbol(), "r");
        assert_eq!(cell.fg, Color::Red);
        assert!(cell.modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_zero_line_limit_never_truncates() {
        let widget = ExpandableText::new(TWELVE).line_limit(0);
        let mut state = ExpandableTextState::new();
        assert_eq!(rows(&widget, &mut state, Instant::now()).lines().count(), 4);
        assert!(!state.is_truncated());
    }

    #[test]
    fn test_empty_text_has_no_height() {
        let widget = ExpandableText::new("   ");
        let mut state = ExpandableTextState::new();
        assert_eq!(widget.desired_height(20, &mut state, Instant::now()), 0);
        assert!(!state.is_truncated());
    }

    #[test]
    fn test_expand_height_animates() {
        let widget = ExpandableText::new(TWELVE)
            .line_limit(1)
            .expand_animation(Transition::linear(100));
        let mut state = ExpandableTextState::new();
        let start = Instant::now();
        assert_eq!(widget.desired_height(20, &mut state, start), 1);

        state.activate(start);
        let midway = start + Duration::from_millis(50);
        assert_eq!(widget.desired_height(20, &mut state, midway), 3);
        assert!(state.is_animating(midway));
        assert_eq!(
            widget.desired_height(20, &mut state, start + Duration::from_millis(100)),
            4
        );
    }

    #[test]
    fn test_less_waits_for_expand_animation() {
        let widget = ExpandableText::new(TWELVE)
            .line_limit(1)
            .expand_animation(Transition::linear(1000));
        let mut state = ExpandableTextState::new();
        let start = Instant::now();
        rows(&widget, &mut state, start);
        state.activate(start);
        rows(&widget, &mut state, start);

        let midway = start + Duration::from_millis(400);
        assert!(state.tick(midway));
        assert_eq!(state.phase(), Phase::CollapseArmed);
        assert_eq!(
            rows(&widget, &mut state, midway),
            "one two three four\nfive six seven eight"
        );
        assert_eq!(state.control_area(), None);
        assert_eq!(state.visible_size().height, 2);
        assert_eq!(state.report().truncated.height, 4);

        let done = start + Duration::from_millis(1100);
        let output = rows(&widget, &mut state, done);
        assert_eq!(output.lines().last(), Some("twelve          less"));
        assert_eq!(state.control_area(), Some(Rect::new(16, 3, 4, 1)));
        assert_eq!(state.visible_size().height, 4);
    }

    #[test]
    fn test_render_uses_frame_time_from_desired_height() {
        let widget = ExpandableText::new(TWELVE).expand_animation(Transition::linear(60_000));
        let mut state = ExpandableTextState::new();
        let start = Instant::now();
        rows(&widget, &mut state, start);
        state.activate(start);
        rows(&widget, &mut state, start);

        // Armed while the animation still runs, so it is not retired.
        assert!(state.tick(start + Duration::from_millis(300)));
        assert_eq!(state.phase(), Phase::CollapseArmed);

        // Past the animation for this frame, inside it by the wall clock.
        let later = start + Duration::from_secs(120);
        let output = rows(&widget, &mut state, later);
        assert_eq!(output.lines().last(), Some("twelve          less"));
        assert!(state.control_area().is_some());
    }

    #[test]
    fn test_render_to_lines() {
        let widget = ExpandableText::new(TWELVE);
        let mut state = ExpandableTextState::new();
        let lines = render_to_lines(&widget, 20, &mut state, Instant::now());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "nine ten eleven more");
    }
}
