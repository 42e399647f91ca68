//! Catppuccin-based color palettes.

use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,

    /// Background the truncation fade blends toward.
    pub base: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    /// Default color of the more/less control.
    pub accent: Color,
    /// Used by the styled sample's button.
    pub alert: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Names accepted by [`Theme::by_name`], in cycling order.
    pub const NAMES: [&'static str; 3] = ["mocha", "latte", "high-contrast"];

    /// Catppuccin Mocha (default dark theme).
    pub fn mocha() -> Self {
        Self {
            name: "mocha",
            base: Color::Rgb(30, 30, 46),       // #1e1e2e
            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086
            accent: Color::Rgb(137, 180, 250),  // #89b4fa (blue)
            alert: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
            border: Color::Rgb(69, 71, 90),     // #45475a
            border_focused: Color::Rgb(180, 190, 254), // #b4befe (lavender)
        }
    }

    /// Catppuccin Latte (light theme).
    pub fn latte() -> Self {
        Self {
            name: "latte",
            base: Color::Rgb(239, 241, 245),    // #eff1f5
            text: Color::Rgb(76, 79, 105),      // #4c4f69
            subtext: Color::Rgb(92, 95, 119),   // #5c5f77
            muted: Color::Rgb(140, 143, 161),   // #8c8fa1
            accent: Color::Rgb(30, 102, 245),   // #1e66f5 (blue)
            alert: Color::Rgb(210, 15, 57),     // #d20f39 (red)
            border: Color::Rgb(188, 192, 204),  // #bcc0cc
            border_focused: Color::Rgb(114, 135, 253), // #7287fd (lavender)
        }
    }

    /// High contrast theme using named terminal colors.
    ///
    /// Named colors can't be blended, so the truncation fade falls back to
    /// dimming.
    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast",
            base: Color::Black,
            text: Color::White,
            subtext: Color::Rgb(200, 200, 200),
            muted: Color::Rgb(150, 150, 150),
            accent: Color::Cyan,
            alert: Color::Red,
            border: Color::White,
            border_focused: Color::Cyan,
        }
    }

    /// Look a palette up by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "mocha" => Some(Self::mocha()),
            "latte" => Some(Self::latte()),
            "high-contrast" | "high_contrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }

    /// The palette after this one in [`Theme::NAMES`].
    #[must_use]
    pub fn next(&self) -> Self {
        let index = Self::NAMES
            .iter()
            .position(|name| *name == self.name)
            .unwrap_or(0);
        let next = Self::NAMES[(index + 1) % Self::NAMES.len()];
        Self::by_name(next).unwrap_or_default()
    }
}
