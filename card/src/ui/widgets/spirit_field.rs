//! The hunting playing field.

use card_core::Spirit;
use ratatui::{buffer::Buffer, layout::Rect, style::Modifier, widgets::Widget};

use crate::ui::layout::spirit_cell;
use crate::ui::theme::CardTheme;

/// Renders the remaining spirits at their percentage positions.
///
/// Each spirit shows a pulsing wisp glyph plus its hotkey digit, so the
/// field works with both the mouse and the keyboard.
pub struct SpiritFieldWidget<'a> {
    spirits: &'a [Spirit],
    theme: &'a CardTheme,
    frame: u8,
}

impl<'a> SpiritFieldWidget<'a> {
    pub fn new(spirits: &'a [Spirit], theme: &'a CardTheme) -> Self {
        Self {
            spirits,
            theme,
            frame: 0,
        }
    }

    /// Animation frame, for the pulse effect.
    pub fn frame(mut self, frame: u8) -> Self {
        self.frame = frame;
        self
    }
}

impl Widget for SpiritFieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 2 {
            return;
        }

        for spirit in self.spirits {
            let (x, y) = spirit_cell(area, spirit);

            // Alternate glyphs per frame, offset per spirit so the field
            // doesn't pulse in lockstep.
            let glyph = if (self.frame / 2).wrapping_add(spirit.id) % 2 == 0 {
                "◉"
            } else {
                "○"
            };
            buf.set_string(x, y, glyph, self.theme.spirit_style());

            // Hotkey label (ids are 0-based, keys are 1-based).
            if x + 1 < area.right() {
                buf.set_string(
                    x + 1,
                    y,
                    format!("{}", spirit.id + 1),
                    self.theme.dim_style().add_modifier(Modifier::DIM),
                );
            }
        }
    }
}
