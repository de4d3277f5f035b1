//! Scenarios driving the front-end with synthetic terminal events, without
//! a real terminal.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use sketch_core::Pattern;
use sketch_core::schedule::TaskId;
use sketch_tty::cli::Opts;
use sketch_tty::header::{Button, Header};
use sketch_tty::layout::CellMode;
use sketch_tty::runner::App;

fn app(cols: u16, rows: u16) -> App {
    let opts = Opts {
        seed: Some(21),
        greeting: false,
        ..Opts::default()
    };
    App::new(&opts, cols, rows)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn key(ch: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
}

fn output(app: &mut App) -> String {
    let mut out = Vec::new();
    app.present(&mut out).unwrap();
    String::from_utf8_lossy(&out).into_owned()
}

fn button_col(app: &App, button: Button) -> u16 {
    Header::new(app.sketch().status(), app.sketch().auto_animate())
        .segments()
        .iter()
        .find(|s| s.button == Some(button))
        .map(|s| s.start)
        .unwrap()
}

#[test]
fn moving_the_mouse_draws_rings() {
    let mut a = app(80, 24);
    output(&mut a);
    a.handle_event(&mouse(MouseEventKind::Moved, 40, 12));
    a.frame();
    let out = output(&mut a);
    assert!(out.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c)));
    assert!(!a.sketch().surface().is_blank());
}

#[test]
fn click_spawns_particles_and_updates_header() {
    let mut a = app(80, 24);
    a.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 10));
    assert_eq!(a.sketch().particles().len(), 100);
    a.frame();
    assert!(output(&mut a).contains("Particles: 100"));
}

#[test]
fn header_buttons_work_like_keys() {
    let mut a = app(120, 24);
    let col = button_col(&a, Button::Mode);
    a.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), col, 0));
    assert_eq!(a.sketch().mode(), Pattern::Spiral);

    let col = button_col(&a, Button::Auto);
    a.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), col, 0));
    assert!(a.sketch().auto_animate());
    assert!(a.sketch().is_task_armed(TaskId::AutoPattern));
    assert!(output(&mut a).contains("Auto: on"));

    let col = button_col(&a, Button::Quit);
    assert!(!a.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), col, 0)));
}

#[test]
fn clear_key_empties_canvas() {
    let mut a = app(80, 24);
    a.handle_event(&mouse(MouseEventKind::Moved, 20, 5));
    a.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 20, 5));
    a.handle_event(&key('x'));
    assert!(a.sketch().surface().is_blank());
    assert!(a.sketch().particles().is_empty());
}

#[test]
fn halfblock_mode_renders_blocks() {
    let opts = Opts {
        seed: Some(4),
        cells: CellMode::HalfBlock,
        scale: 2,
        greeting: false,
        ..Opts::default()
    };
    let mut a = App::new(&opts, 80, 24);
    a.handle_event(&key('m'));
    a.handle_event(&key('m'));
    a.handle_event(&key('m'));
    assert_eq!(a.sketch().mode(), Pattern::Waves);
    a.handle_event(&mouse(MouseEventKind::Moved, 30, 10));
    let out = output(&mut a);
    assert!(out.contains('▀') || out.contains('▄'));
}

#[test]
fn drawing_survives_terminal_growth() {
    let mut a = app(40, 12);
    a.handle_event(&mouse(MouseEventKind::Moved, 10, 5));
    let before: Vec<_> = (0..a.sketch().surface().height_px())
        .map(|y| a.sketch().surface().row(y).to_vec())
        .collect();
    a.handle_event(&Event::Resize(80, 30));
    for (y, row) in before.iter().enumerate() {
        let now = a.sketch().surface().row(y as u32);
        assert_eq!(&now[..row.len()], &row[..]);
    }
}
