//! Event handling for the card TUI.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use card_core::Phase;
use ratatui::layout::Rect;

use crate::app::App;
use crate::ui::layout::{spirit_cell, HuntLayout};

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event.
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a key event.
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }
    if key.code == KeyCode::Char('q') {
        return EventResult::Quit;
    }

    match app.experience.phase() {
        Phase::Intro => handle_intro_key(app, key),
        Phase::Hunting(_) => handle_hunting_key(app, key),
        Phase::Generating => EventResult::Continue,
        Phase::Reveal { .. } => handle_reveal_key(app, key),
        Phase::Error { .. } => handle_error_key(app, key),
    }
}

fn handle_intro_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.begin_hunt();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_hunting_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        // Hotkey fallback for catching spirits (1-based on screen)
        KeyCode::Char(c @ '1'..='9') => {
            let id = c.to_digit(10).unwrap() as u8 - 1;
            app.click_spirit(id);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_reveal_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        // "Reiniciar Ritual"
        KeyCode::Enter | KeyCode::Char('r') => {
            app.reset();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_error_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        // "Tentar Novamente"
        KeyCode::Enter | KeyCode::Char('r') => {
            app.retry_generation();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Handle a mouse event. Only the hunting phase cares about clicks.
fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return EventResult::Continue;
    }

    let Some(hunt) = app.experience.hunt() else {
        return EventResult::Continue;
    };

    // Recompute the same layout the renderer used for hit testing.
    let Ok((cols, rows)) = crossterm::terminal::size() else {
        return EventResult::Continue;
    };
    let layout = HuntLayout::calculate(Rect::new(0, 0, cols, rows));

    if let Some(id) = spirit_at(hunt.spirits(), layout.field, mouse.column, mouse.row) {
        app.click_spirit(id);
        return EventResult::NeedsRedraw;
    }

    EventResult::Continue
}

/// Find the spirit whose rendered cell is close enough to the click.
fn spirit_at(
    spirits: &[card_core::Spirit],
    field: Rect,
    column: u16,
    row: u16,
) -> Option<u8> {
    spirits.iter().find_map(|spirit| {
        let (x, y) = spirit_cell(field, spirit);
        let dx = column.abs_diff(x);
        let dy = row.abs_diff(y);
        // Spirits render as a glyph plus an id label, so allow a small
        // horizontal tolerance.
        (dx <= 2 && dy <= 1).then_some(spirit.id)
    })
}
