//! Inline markup styling.

use ratatui::style::{Modifier, Style};

/// Styles layered on top of the base text style for inline markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupStyles {
    /// Normal text style.
    pub text: Style,
    /// `**strong**`
    pub strong: Style,
    /// `*emphasis*`
    pub emphasis: Style,
    /// `~~strikethrough~~`
    pub strikethrough: Style,
    /// `` `code` ``
    pub code: Style,
    /// `[link](url)` text.
    pub link: Style,
}

impl MarkupStyles {
    /// Derive markup styles from the block's base style.
    pub fn from_base(base: Style) -> Self {
        Self {
            text: base,
            strong: Style::default().add_modifier(Modifier::BOLD),
            emphasis: Style::default().add_modifier(Modifier::ITALIC),
            strikethrough: Style::default().add_modifier(Modifier::CROSSED_OUT),
            code: Style::default().add_modifier(Modifier::REVERSED),
            link: Style::default().add_modifier(Modifier::UNDERLINED),
        }
    }
}

impl Default for MarkupStyles {
    fn default() -> Self {
        Self::from_base(Style::default())
    }
}
