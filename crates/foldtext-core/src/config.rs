//! Behavioral configuration for an expandable text block.
//!
//! Styling (fonts, colours) belongs to the rendering host; this record only
//! carries what the state machine and measurement passes need. Every field
//! has a serde default so partial JSON files are accepted.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::animation::Transition;

/// Configuration for one expandable text block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldConfig {
    /// Lines shown while collapsed. Zero disables truncation.
    #[serde(default = "default_line_limit")]
    pub line_limit: usize,

    /// Label of the expand control.
    #[serde(default = "default_more_label")]
    pub more_label: String,

    /// Label of the collapse control.
    #[serde(default = "default_less_label")]
    pub less_label: String,

    /// Whether tapping the body while expanded collapses it.
    #[serde(default)]
    pub collapse_enabled: bool,

    /// Collapse blank-line runs in the truncated rendering.
    #[serde(default = "default_trim_multiple_newlines")]
    pub trim_multiple_newlines: bool,

    /// Transition used for both expanding and collapsing.
    #[serde(default)]
    pub expand_transition: Transition,

    /// Delay between expanding and offering the collapse control.
    #[serde(default = "default_collapse_arm_delay_ms")]
    pub collapse_arm_delay_ms: u64,
}

fn default_line_limit() -> usize {
    3
}

fn default_more_label() -> String {
    "more".into()
}

fn default_less_label() -> String {
    "less".into()
}

fn default_trim_multiple_newlines() -> bool {
    true
}

fn default_collapse_arm_delay_ms() -> u64 {
    250
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            line_limit: default_line_limit(),
            more_label: default_more_label(),
            less_label: default_less_label(),
            collapse_enabled: false,
            trim_multiple_newlines: default_trim_multiple_newlines(),
            expand_transition: Transition::default(),
            collapse_arm_delay_ms: default_collapse_arm_delay_ms(),
        }
    }
}

impl FoldConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, label) in [("more_label", &self.more_label), ("less_label", &self.less_label)] {
            if label.contains('\n') {
                return Err(ConfigError::Invalid(format!(
                    "{name} must fit on one line, got {label:?}"
                )));
            }
        }
        Ok(())
    }

    /// The line limit to apply while collapsed, if any.
    pub fn effective_line_limit(&self) -> Option<usize> {
        (self.line_limit > 0).then_some(self.line_limit)
    }

    pub fn collapse_arm_delay(&self) -> Duration {
        Duration::from_millis(self.collapse_arm_delay_ms)
    }

    #[must_use]
    pub fn line_limit(mut self, limit: usize) -> Self {
        self.line_limit = limit;
        self
    }

    #[must_use]
    pub fn more_label(mut self, label: impl Into<String>) -> Self {
        self.more_label = label.into();
        self
    }

    #[must_use]
    pub fn less_label(mut self, label: impl Into<String>) -> Self {
        self.less_label = label.into();
        self
    }

    #[must_use]
    pub fn collapse_enabled(mut self, enabled: bool) -> Self {
        self.collapse_enabled = enabled;
        self
    }

    #[must_use]
    pub fn trim_multiple_newlines(mut self, enabled: bool) -> Self {
        self.trim_multiple_newlines = enabled;
        self
    }

    #[must_use]
    pub fn expand_transition(mut self, transition: Transition) -> Self {
        self.expand_transition = transition;
        self
    }

    #[must_use]
    pub fn collapse_arm_delay_ms(mut self, delay_ms: u64) -> Self {
        self.collapse_arm_delay_ms = delay_ms;
        self
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Config parsed but violates an invariant.
    #[error("Invalid config: {0}")]
    Invalid(String),
}
