//! Layout calculations shared by rendering and mouse hit testing.

use card_core::Spirit;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout for the hunting screen: counter header, playing field, hint.
pub struct HuntLayout {
    pub header: Rect,
    pub field: Rect,
    pub footer: Rect,
}

impl HuntLayout {
    pub fn calculate(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: chunks[0],
            field: chunks[1],
            footer: chunks[2],
        }
    }
}

/// Layout for the reveal screen: title, message, poem, footer.
pub struct RevealLayout {
    pub title: Rect,
    pub message: Rect,
    pub poem: Rect,
    pub footer: Rect,
}

impl RevealLayout {
    pub fn calculate(area: Rect) -> Self {
        let content = centered_rect_fixed(area.width.min(80), area.height, area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(6),
                Constraint::Length(7),
                Constraint::Length(2),
            ])
            .split(content);

        Self {
            title: chunks[0],
            message: chunks[1],
            poem: chunks[2],
            footer: chunks[3],
        }
    }
}

/// Map a spirit's percentage position to a buffer cell inside the field.
pub fn spirit_cell(field: Rect, spirit: &Spirit) -> (u16, u16) {
    let max_x = field.width.saturating_sub(1) as f32;
    let max_y = field.height.saturating_sub(1) as f32;

    let x = field.x + (spirit.x / 100.0 * max_x).round() as u16;
    let y = field.y + (spirit.y / 100.0 * max_y).round() as u16;

    (
        x.min(field.right().saturating_sub(1)),
        y.min(field.bottom().saturating_sub(1)),
    )
}

/// A fixed-size rect centered in the given area.
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
