//! foldtext CLI: expandable, line-limited text for the terminal

use clap::{Args, Parser, Subcommand};
use foldtext_core::{
    FoldConfig, FoldController, FoldEvent, TapTarget, TextContent, TextDirection,
};
use foldtext_tui::{
    render_to_lines, DemoOptions, ExpandableText, ExpandableTextState, TextMeasurer, Theme,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "FOLDTEXT_LOG";
const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_CONFIG_PATH: &str = "foldtext.json";
const DEMO_LOG_FILE: &str = "foldtext.log";

/// Text truncated to a few lines with a control to reveal the rest
#[derive(Parser)]
#[command(name = "foldtext")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive gallery (default when no command specified)
    Demo {
        #[command(flatten)]
        source: Source,

        #[command(flatten)]
        options: FoldOptions,

        /// Color theme: mocha, latte or high-contrast
        #[arg(long, default_value = "mocha")]
        theme: String,

        /// Write logs here instead of the temp directory
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Print the text as it would be drawn
    Render {
        #[command(flatten)]
        source: Source,

        #[command(flatten)]
        options: FoldOptions,

        /// Available width in cells
        #[arg(long, default_value = "80")]
        width: u16,

        /// Render after expanding, with the collapse control armed
        #[arg(long)]
        expanded: bool,

        /// Lay the text out right to left
        #[arg(long)]
        rtl: bool,
    },

    /// Print the measurements that decide truncation
    Measure {
        #[command(flatten)]
        source: Source,

        #[command(flatten)]
        options: FoldOptions,

        /// Available width in cells
        #[arg(long, default_value = "80")]
        width: u16,

        /// Measure after expanding
        #[arg(long)]
        expanded: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the default configuration file
    InitConfig {
        /// Destination (default: foldtext.json)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Where the text comes from.
#[derive(Args, Debug, Default)]
struct Source {
    /// Text to show
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,

    /// Read the text from a file
    #[arg(long)]
    file: Option<PathBuf>,
}

impl Source {
    fn read(&self) -> Result<Option<String>, std::io::Error> {
        match (&self.text, &self.file) {
            (Some(text), _) => Ok(Some(text.clone())),
            (None, Some(path)) => std::fs::read_to_string(path).map(Some),
            (None, None) => Ok(None),
        }
    }
}

/// Configuration file plus per-field overrides.
#[derive(Args, Debug, Default)]
struct FoldOptions {
    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lines shown while collapsed (0 disables truncation)
    #[arg(long)]
    line_limit: Option<usize>,

    /// Label of the expand control
    #[arg(long)]
    more_label: Option<String>,

    /// Label of the collapse control
    #[arg(long)]
    less_label: Option<String>,

    /// Keep blank lines while truncated
    #[arg(long)]
    no_trim: bool,

    /// Let taps on the expanded text collapse it
    #[arg(long)]
    collapse: bool,
}

impl FoldOptions {
    fn resolve(&self) -> Result<FoldConfig, foldtext_core::ConfigError> {
        let mut config = match &self.config {
            Some(path) => FoldConfig::load(path)?,
            None => FoldConfig::default(),
        };
        if let Some(limit) = self.line_limit {
            config.line_limit = limit;
        }
        if let Some(label) = &self.more_label {
            config.more_label.clone_from(label);
        }
        if let Some(label) = &self.less_label {
            config.less_label.clone_from(label);
        }
        if self.no_trim {
            config.trim_multiple_newlines = false;
        }
        if self.collapse {
            config.collapse_enabled = true;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None => cmd_demo(&Source::default(), &FoldOptions::default(), "mocha", None),
        Some(Commands::Demo {
            source,
            options,
            theme,
            log_file,
        }) => cmd_demo(&source, &options, &theme, log_file),
        Some(Commands::Render {
            source,
            options,
            width,
            expanded,
            rtl,
        }) => cmd_render(&source, &options, width, expanded, rtl),
        Some(Commands::Measure {
            source,
            options,
            width,
            expanded,
            json,
        }) => cmd_measure(&source, &options, width, expanded, json),
        Some(Commands::InitConfig { path, force }) => cmd_init_config(path, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_LEVEL))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Log to stderr.
fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log to a file; the terminal belongs to the UI.
///
/// The returned guard flushes pending lines when dropped.
fn init_file_logging(path: &Path) -> WorkerGuard {
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let file_name = path
        .file_name()
        .map_or_else(|| DEMO_LOG_FILE.into(), ToOwned::to_owned);
    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    guard
}

fn text_or_sample(source: &Source) -> Result<String, Box<dyn Error>> {
    Ok(source
        .read()?
        .unwrap_or_else(|| foldtext_tui::LOREM_IPSUM.to_string()))
}

fn cmd_demo(
    source: &Source,
    options: &FoldOptions,
    theme: &str,
    log_file: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let log_path = log_file.unwrap_or_else(|| std::env::temp_dir().join(DEMO_LOG_FILE));
    let _guard = init_file_logging(&log_path);

    let theme = Theme::by_name(theme).unwrap_or_else(|| {
        warn!(theme, "unknown theme, using mocha");
        Theme::default()
    });
    let demo = DemoOptions {
        text: source.read()?,
        config: options.resolve()?,
        theme,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(foldtext_tui::run_demo(demo))
}

fn cmd_render(
    source: &Source,
    options: &FoldOptions,
    width: u16,
    expanded: bool,
    rtl: bool,
) -> Result<(), Box<dyn Error>> {
    init_stderr_logging();
    let config = options.resolve()?;
    let text = text_or_sample(source)?;
    let direction = if rtl {
        TextDirection::RightToLeft
    } else {
        TextDirection::LeftToRight
    };
    let widget = ExpandableText::new(text)
        .config(config.clone())
        .direction(direction);

    let mut state = ExpandableTextState::new();
    let start = Instant::now();
    let mut lines = render_to_lines(&widget, width, &mut state, start);
    if expanded && state.activate(start) {
        // Past the animation, then past the arm delay.
        let settled = start + config.expand_transition.duration() + Duration::from_millis(1);
        render_to_lines(&widget, width, &mut state, settled);
        let armed = settled + config.collapse_arm_delay();
        state.tick(armed);
        lines = render_to_lines(&widget, width, &mut state, armed);
    }
    debug!(phase = %state.phase(), rows = lines.len(), "rendered");

    for line in lines {
        println!("{line}");
    }
    Ok(())
}

fn cmd_measure(
    source: &Source,
    options: &FoldOptions,
    width: u16,
    expanded: bool,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    init_stderr_logging();
    let config = options.resolve()?;
    let content = TextContent::new(text_or_sample(source)?);
    let measurer = TextMeasurer::default();

    let mut controller = FoldController::new();
    let now = Instant::now();
    let mut passes = controller.settle(&content, &config, width, &measurer, now);
    if expanded && controller.dispatch(FoldEvent::Tap(TapTarget::Control), &config, now) {
        passes = controller.settle(&content, &config, width, &measurer, now);
    }
    let report = controller.report();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Phase: {}", report.phase);
    println!("Truncated: {}", if report.is_truncated { "yes" } else { "no" });
    println!("Full size: {}", report.intrinsic);
    println!("Visible size: {}", report.truncated);
    println!("More label: {}", report.more_label);
    println!("Less label: {}", report.less_label);
    println!("Layout passes: {passes}");
    Ok(())
}

fn cmd_init_config(path: Option<PathBuf>, force: bool) -> Result<(), Box<dyn Error>> {
    init_stderr_logging();
    let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    if path.exists() && !force {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }
    FoldConfig::default().save(&path)?;
    println!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_render_arguments() {
        let cli = Cli::parse_from([
            "foldtext", "render", "--width", "40", "--text", "hi", "--line-limit", "2", "--rtl",
        ]);
        match cli.command {
            Some(Commands::Render {
                source,
                options,
                width,
                rtl,
                expanded,
            }) => {
                assert_eq!(width, 40);
                assert!(rtl);
                assert!(!expanded);
                assert_eq!(source.text.as_deref(), Some("hi"));
                assert_eq!(options.line_limit, Some(2));
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_text_and_file_conflict() {
        let result = Cli::try_parse_from([
            "foldtext", "measure", "--text", "a", "--file", "b.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_apply_on_defaults() {
        let options = FoldOptions {
            line_limit: Some(5),
            more_label: Some("expand".to_string()),
            no_trim: true,
            collapse: true,
            ..FoldOptions::default()
        };
        let config = options.resolve().expect("valid overrides");
        assert_eq!(config.line_limit, 5);
        assert_eq!(config.more_label, "expand");
        assert!(!config.trim_multiple_newlines);
        assert!(config.collapse_enabled);
        assert_eq!(config.less_label, "less");
    }

    #[test]
    fn test_invalid_label_is_rejected() {
        let options = FoldOptions {
            less_label: Some("two\nlines".to_string()),
            ..FoldOptions::default()
        };
        assert!(options.resolve().is_err());
    }
}
