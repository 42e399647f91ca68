//! foldtext-tui: Terminal rendering of expandable, line-limited text
//!
//! This crate provides the ratatui layer for foldtext, including:
//! - [`ExpandableText`], a stateful widget with a more/less control
//! - Off-screen measurement, the truncation mask and size reporting
//! - A demo gallery driven by crossterm events

mod app;
mod event;
pub mod mask;
pub mod measure;
pub mod node;
pub mod size_reporter;
#[cfg(test)]
pub mod test_utils;
pub mod text;
pub mod theme;
pub mod widget;

pub use app::{DemoApp, DemoOptions, Sample, LOREM_IPSUM};
pub use event::{key_to_action, mouse_to_action, Action, Event, EventHandler, TICK_RATE_MS};
pub use foldtext_core;
pub use mask::TruncationMask;
pub use measure::TextMeasurer;
pub use node::{Node, TextBlock};
pub use size_reporter::SizeReporter;
pub use theme::Theme;
pub use widget::{render_to_lines, ExpandableText, ExpandableTextState};

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::Instant;
use tracing::info;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the demo gallery until the user quits.
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// exit.
pub async fn run_demo(options: DemoOptions) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = DemoApp::new(options);
    let mut events = EventHandler::new(TICK_RATE_MS);
    info!(samples = app.samples().len(), theme = app.theme.name, "demo started");

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    terminal.show_cursor()?;
    info!("demo finished");
    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut DemoApp,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| {
                let area = frame.area();
                app.render(area, frame.buffer_mut(), Instant::now());
            })?;
            dirty = false;
        }

        let Some(event) = events.next().await else {
            break;
        };
        let now = Instant::now();
        match event {
            Event::Key(key) => {
                app.handle_action(key_to_action(key), now);
                dirty = true;
            }
            Event::Mouse(mouse) => {
                let action = mouse_to_action(mouse);
                if action != Action::None {
                    app.handle_action(action, now);
                    dirty = true;
                }
            }
            Event::Tick => dirty |= app.tick(now),
            Event::Resize(_, _) => dirty = true,
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Returns the TUI crate version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
