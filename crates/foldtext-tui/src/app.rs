//! Demo gallery state and rendering.

use foldtext_core::{FoldConfig, TextDirection, Transition};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, StatefulWidget, Widget},
};
use std::time::Instant;
use tracing::debug;

use crate::event::Action;
use crate::theme::Theme;
use crate::widget::{ExpandableText, ExpandableTextState};

pub const LOREM_IPSUM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud \
exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in \
reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint \
occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.";

const RELEASE_NOTES: &str = "Version 2.4 is out.\n\n\
Tap this text once to read everything, and tap it again to fold it back.\n\n\
Blank lines between paragraphs are squeezed out while the text is folded, \
so more of it fits in the preview.\n\n\
Changing the text resets the fold.";

/// Options for [`crate::run_demo`].
#[derive(Debug, Clone, Default)]
pub struct DemoOptions {
    /// Extra sample shown after the built-in ones.
    pub text: Option<String>,
    /// Configuration shared by every sample.
    pub config: FoldConfig,
    pub theme: Theme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SampleKind {
    Plain,
    /// Bold secondary text, four lines, a red "read more" and a slow animation.
    Styled,
    /// Body taps collapse as well as expand.
    Collapsible,
}

/// One entry in the gallery.
#[derive(Debug, Clone)]
pub struct Sample {
    pub title: String,
    pub text: String,
    pub direction: TextDirection,
    kind: SampleKind,
}

impl Sample {
    fn new(title: &str, text: &str, kind: SampleKind) -> Self {
        Self {
            title: title.to_string(),
            text: text.to_string(),
            direction: TextDirection::LeftToRight,
            kind,
        }
    }

    fn widget<'a>(&self, theme: &'a Theme, config: &FoldConfig) -> ExpandableText<'a> {
        let widget = ExpandableText::new(self.text.as_str())
            .config(config.clone())
            .theme(theme)
            .direction(self.direction);
        match self.kind {
            SampleKind::Plain => widget,
            SampleKind::Styled => widget
                .font(Modifier::BOLD)
                .foreground_color(theme.subtext)
                .line_limit(4)
                .more_button_text("read more")
                .more_button_font(Modifier::BOLD)
                .more_button_color(theme.alert)
                .expand_animation(Transition::ease_in_out(2000))
                .trim_multiple_newlines_when_truncated(false),
            SampleKind::Collapsible => widget.enable_collapse(true),
        }
    }
}

fn default_samples() -> Vec<Sample> {
    let mut rtl = Sample::new("right to left", LOREM_IPSUM, SampleKind::Plain);
    rtl.direction = TextDirection::RightToLeft;
    vec![
        Sample::new("default", LOREM_IPSUM, SampleKind::Plain),
        rtl,
        Sample::new("styled", LOREM_IPSUM, SampleKind::Styled),
        Sample::new("markup", "**Markdown** is _supported_", SampleKind::Plain),
        Sample::new("tap to collapse", RELEASE_NOTES, SampleKind::Collapsible),
    ]
}

/// The demo gallery.
pub struct DemoApp {
    /// Whether the app should quit.
    pub should_quit: bool,
    pub theme: Theme,
    config: FoldConfig,
    samples: Vec<Sample>,
    states: Vec<ExpandableTextState>,
    focus: usize,
    /// Index of the first sample drawn.
    scroll: usize,
    /// Samples drawn last frame.
    visible: Vec<usize>,
}

impl DemoApp {
    pub fn new(options: DemoOptions) -> Self {
        let mut samples = default_samples();
        if let Some(text) = options.text {
            samples.push(Sample::new("your text", &text, SampleKind::Plain));
        }
        let states = vec![ExpandableTextState::new(); samples.len()];
        Self {
            should_quit: false,
            theme: options.theme,
            config: options.config,
            samples,
            states,
            focus: 0,
            scroll: 0,
            visible: Vec::new(),
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn state(&self, index: usize) -> Option<&ExpandableTextState> {
        self.states.get(index)
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        let count = self.samples.len();
        match action {
            Action::Quit => self.should_quit = true,
            Action::NextFocus if count > 0 => self.set_focus((self.focus + 1) % count),
            Action::PrevFocus if count > 0 => self.set_focus((self.focus + count - 1) % count),
            Action::Activate => {
                if let Some(state) = self.states.get_mut(self.focus) {
                    state.activate(now);
                }
            }
            Action::ToggleDirection => {
                if let Some(sample) = self.samples.get_mut(self.focus) {
                    sample.direction = sample.direction.toggled();
                    debug!(sample = %sample.title, direction = %sample.direction, "direction toggled");
                }
            }
            Action::CycleTheme => {
                self.theme = self.theme.next();
                debug!(theme = self.theme.name, "theme changed");
            }
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::ScrollDown => self.scroll = (self.scroll + 1).min(count.saturating_sub(1)),
            Action::Click { column, row } => self.click(column, row, now),
            _ => {}
        }
    }

    fn set_focus(&mut self, index: usize) {
        self.focus = index;
        if index < self.scroll || !self.visible.contains(&index) {
            self.scroll = index;
        }
    }

    fn click(&mut self, column: u16, row: u16, now: Instant) {
        let position = Position::new(column, row);
        for &index in &self.visible {
            let state = &mut self.states[index];
            if state.body_area().is_some_and(|area| area.contains(position)) {
                self.focus = index;
                state.handle_click(column, row, now);
                return;
            }
        }
    }

    /// Drive timers. Returns `true` if a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for state in &mut self.states {
            changed |= state.tick(now);
            changed |= state.is_animating(now);
        }
        changed
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, now: Instant) {
        let theme = &self.theme;
        Block::default()
            .style(Style::default().bg(theme.base).fg(theme.text))
            .render(area, buf);
        if area.height < 3 || area.width < 3 {
            return;
        }

        let header = Line::from(vec![
            Span::styled("foldtext", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}  ", theme.name), Style::default().fg(theme.subtext)),
            Span::styled(
                "tab focus · enter toggle · r direction · t theme · q quit",
                Style::default().fg(theme.muted),
            ),
        ]);
        buf.set_line(area.x, area.y, &header, area.width);

        self.visible.clear();
        let inner_width = area.width - 2;
        let mut y = area.y + 2;
        for index in self.scroll..self.samples.len() {
            if y >= area.bottom() {
                break;
            }
            let sample = &self.samples[index];
            let widget = sample.widget(theme, &self.config);
            let text_height = widget.desired_height(inner_width, &mut self.states[index], now);
            let pane_height = text_height.saturating_add(2).min(area.bottom() - y);

            let border = if index == self.focus {
                theme.border_focused
            } else {
                theme.border
            };
            let block = Block::bordered()
                .title(format!(" {} ", sample.title))
                .border_style(Style::default().fg(border));
            let pane = Rect::new(area.x, y, area.width, pane_height);
            let inner = block.inner(pane);
            block.render(pane, buf);
            widget.render(inner, buf, &mut self.states[index]);

            self.visible.push(index);
            y = y.saturating_add(pane_height + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use std::time::Duration;

    fn app() -> DemoApp {
        DemoApp::new(DemoOptions::default())
    }

    fn draw(app: &mut DemoApp, now: Instant) -> String {
        let area = Rect::new(0, 0, 60, 40);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf, now);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_default_gallery() {
        let app = app();
        let titles: Vec<&str> = app.samples().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["default", "right to left", "styled", "markup", "tap to collapse"]
        );
        assert_eq!(app.samples()[1].direction, TextDirection::RightToLeft);
    }

    #[test]
    fn test_user_text_is_appended() {
        let app = DemoApp::new(DemoOptions {
            text: Some("hello".to_string()),
            ..DemoOptions::default()
        });
        assert_eq!(app.samples().len(), 6);
        assert_eq!(app.samples()[5].text, "hello");
    }

    #[test]
    fn test_render_shows_samples_and_controls() {
        let mut app = app();
        let output = draw(&mut app, Instant::now());
        assert!(output.contains("foldtext"));
        assert!(output.contains("Lorem ipsum"));
        assert!(output.contains("more"));
        assert!(output.contains("read more"));
        assert!(output.contains("Markdown is supported"));
        assert!(app.state(0).is_some_and(ExpandableTextState::is_truncated));
        assert!(app.state(3).is_some_and(|s| !s.is_truncated()));
    }

    #[test]
    fn test_focus_wraps() {
        let mut app = app();
        let now = Instant::now();
        app.handle_action(Action::PrevFocus, now);
        assert_eq!(app.focus(), 4);
        app.handle_action(Action::NextFocus, now);
        assert_eq!(app.focus(), 0);
    }

    #[test]
    fn test_activate_expands_focused_sample() {
        let mut app = app();
        let now = Instant::now();
        draw(&mut app, now);
        app.handle_action(Action::Activate, now);
        assert!(app.state(0).is_some_and(ExpandableTextState::is_expanded));
        assert!(app.state(1).is_some_and(|s| !s.is_expanded()));
    }

    #[test]
    fn test_click_focuses_and_taps() {
        let mut app = app();
        let now = Instant::now();
        draw(&mut app, now);

        let second = app.state(1).and_then(ExpandableTextState::body_area);
        let area = second.expect("second sample drawn");
        app.handle_action(
            Action::Click {
                column: area.x + 2,
                row: area.y,
            },
            now,
        );
        assert_eq!(app.focus(), 1);
        assert!(app.state(1).is_some_and(ExpandableTextState::is_expanded));
    }

    #[test]
    fn test_toggle_direction_and_theme() {
        let mut app = app();
        let now = Instant::now();
        app.handle_action(Action::ToggleDirection, now);
        assert_eq!(app.samples()[0].direction, TextDirection::RightToLeft);
        app.handle_action(Action::CycleTheme, now);
        assert_eq!(app.theme.name, "latte");
    }

    #[test]
    fn test_tick_reports_arming() {
        let mut app = app();
        let start = Instant::now();
        draw(&mut app, start);
        app.handle_action(Action::Activate, start);
        draw(&mut app, start + Duration::from_secs(1));
        assert!(app.tick(start + Duration::from_secs(2)));
        assert!(!app.tick(start + Duration::from_secs(3)));
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.handle_action(Action::Quit, Instant::now());
        assert!(app.should_quit);
    }
}
