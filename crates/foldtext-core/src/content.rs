//! Text content shown by an expandable block.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// A newline, any run of whitespace (newlines included), and another newline.
static BLANK_LINE_RUN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\n\s*\n").ok());

/// Immutable, trimmed text content.
///
/// Leading and trailing whitespace (newlines included) is removed at
/// construction. Replacing the content means building a new value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TextContent(String);

impl TextContent {
    /// Create content from raw text, trimming surrounding whitespace.
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(text.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The string to display in the line-limited rendering.
    ///
    /// Runs of blank lines are collapsed only while the expand control is
    /// shown and trimming is enabled; every other rendering is verbatim.
    pub fn display_text(&self, trim_enabled: bool, more_shown: bool) -> Cow<'_, str> {
        if trim_enabled && more_shown {
            trim_double_newlines(&self.0)
        } else {
            Cow::Borrowed(&self.0)
        }
    }
}

impl From<&str> for TextContent {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TextContent {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl std::fmt::Display for TextContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collapse every newline-whitespace-newline run into a single newline.
pub fn trim_double_newlines(text: &str) -> Cow<'_, str> {
    match BLANK_LINE_RUN.as_ref() {
        Some(re) => re.replace_all(text, "\n"),
        None => Cow::Borrowed(text),
    }
}
