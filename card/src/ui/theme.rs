//! Color theme and styling for the card TUI.
//!
//! Terminal rendition of the original palette: spirit teal, ancient
//! gold, cursed rose over a void-black background.

use ratatui::style::{Color, Modifier, Style};

/// Card UI color theme.
#[derive(Debug, Clone)]
pub struct CardTheme {
    pub spirit_teal: Color,
    pub ancient_gold: Color,
    pub cursed_rose: Color,

    pub text: Color,
    pub dim: Color,
    pub border: Color,
}

impl Default for CardTheme {
    fn default() -> Self {
        Self {
            spirit_teal: Color::Cyan,
            ancient_gold: Color::Yellow,
            cursed_rose: Color::LightMagenta,

            text: Color::White,
            dim: Color::DarkGray,
            border: Color::DarkGray,
        }
    }
}

impl CardTheme {
    /// Style for prominent headings.
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.ancient_gold)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for spirit glyphs and accents.
    pub fn spirit_style(&self) -> Style {
        Style::default().fg(self.spirit_teal)
    }

    /// Style for secondary, de-emphasized text.
    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    /// Style for error content.
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.cursed_rose)
    }

    /// Border style for framed blocks.
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }
}
