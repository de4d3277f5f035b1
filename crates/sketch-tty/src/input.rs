#![forbid(unsafe_code)]

//! Translation of terminal events into sketch inputs.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use sketch_core::{Control, Input};

use crate::header::{Button, Header};
use crate::layout::Layout;

/// What the runner should do with one terminal event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Feed this input to the sketch.
    Sketch(Input),
    /// The terminal now has `cols × rows` cells.
    Resize { cols: u16, rows: u16 },
    Quit,
    Ignore,
}

/// Map `event` using the current geometry and header.
///
/// `auto_animate` is the current flag, so the toggle key and button can
/// request the opposite state.
pub fn map_event(event: &Event, layout: &Layout, header: &Header, auto_animate: bool) -> Action {
    match event {
        Event::Key(key) => map_key(key, auto_animate),
        Event::Mouse(mouse) => map_mouse(mouse, layout, header, auto_animate),
        Event::Resize(cols, rows) => Action::Resize {
            cols: *cols,
            rows: *rows,
        },
        _ => Action::Ignore,
    }
}

fn map_key(key: &KeyEvent, auto_animate: bool) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::Ignore;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'C') => Action::Quit,
            _ => Action::Ignore,
        };
    }
    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
            'm' => button_action(Button::Mode, auto_animate),
            'c' => button_action(Button::Colors, auto_animate),
            'x' => button_action(Button::Clear, auto_animate),
            'a' => button_action(Button::Auto, auto_animate),
            'q' => button_action(Button::Quit, auto_animate),
            _ => Action::Ignore,
        },
        _ => Action::Ignore,
    }
}

fn map_mouse(mouse: &MouseEvent, layout: &Layout, header: &Header, auto_animate: bool) -> Action {
    let on_canvas = layout.cell_to_surface(mouse.column, mouse.row);
    match (mouse.kind, on_canvas) {
        (MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left), Some((x, y))) => {
            Action::Sketch(Input::PointerMove { x, y })
        }
        (MouseEventKind::Down(MouseButton::Left), Some((x, y))) => {
            Action::Sketch(Input::Click { x, y })
        }
        (MouseEventKind::Down(MouseButton::Left), None) if mouse.row == 0 => header
            .hit(mouse.column)
            .map_or(Action::Ignore, |button| button_action(button, auto_animate)),
        _ => Action::Ignore,
    }
}

/// The action a header button (or its shortcut key) triggers.
pub fn button_action(button: Button, auto_animate: bool) -> Action {
    match button {
        Button::Mode => Action::Sketch(Input::Control(Control::NextMode)),
        Button::Colors => Action::Sketch(Input::Control(Control::NextPalette)),
        Button::Clear => Action::Sketch(Input::Control(Control::Clear)),
        Button::Auto => Action::Sketch(Input::Control(Control::SetAutoAnimate(!auto_animate))),
        Button::Quit => Action::Quit,
    }
}
