#![forbid(unsafe_code)]

//! The frame loop.
//!
//! Each iteration waits for terminal events until the frame deadline,
//! handling every event to completion as it arrives, then runs exactly one
//! sketch frame and presents the result.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use sketch_core::{Input, Raster, Sketch, SketchConfig};
use tracing::{debug, info};

use crate::cli::Opts;
use crate::header::Header;
use crate::input::{Action, map_event};
use crate::layout::Layout;
use crate::present::{Presenter, compose};
use crate::session::{SessionOptions, TerminalSession};

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The user quit.
    Quit,
    /// `--exit-after-ms` elapsed.
    Timeout,
}

/// Sketch state plus everything needed to show it.
#[derive(Debug)]
pub struct App {
    sketch: Sketch<Raster>,
    layout: Layout,
    presenter: Presenter,
}

impl App {
    /// Build the sketch for a `cols × rows` terminal.
    pub fn new(opts: &Opts, cols: u16, rows: u16) -> Self {
        let layout = Layout::new(cols, rows, opts.cells, opts.scale);
        let (width, height) = layout.surface_size();
        let config = SketchConfig {
            seed: opts.seed,
            auto_animate: opts.auto_animate,
            greeting: opts.greeting,
        };
        Self {
            sketch: Sketch::new(Raster::new(width, height), &config),
            layout,
            presenter: Presenter::new(),
        }
    }

    pub fn sketch(&self) -> &Sketch<Raster> {
        &self.sketch
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    fn header(&self) -> Header {
        Header::new(self.sketch.status(), self.sketch.auto_animate())
    }

    /// Apply one mapped action. Returns `false` when the user asked to quit.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Sketch(input) => self.sketch.handle(input),
            Action::Resize { cols, rows } => self.resize(cols, rows),
            Action::Quit => return false,
            Action::Ignore => {}
        }
        true
    }

    /// Map and apply a terminal event.
    pub fn handle_event(&mut self, event: &crossterm::event::Event) -> bool {
        let header = self.header();
        let action = map_event(event, &self.layout, &header, self.sketch.auto_animate());
        self.apply(action)
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.layout = Layout::new(cols, rows, self.layout.mode(), self.layout.scale());
        let (width, height) = self.layout.surface_size();
        info!(cols, rows, width, height, "terminal resized");
        self.sketch.handle(Input::Resize {
            width: width as f64,
            height: height as f64,
        });
        self.presenter.invalidate();
    }

    /// Run one sketch frame.
    pub fn frame(&mut self) {
        self.sketch.frame();
    }

    /// Write the current state to `out`. Returns the number of cells written.
    pub fn present<W: Write>(&mut self, out: &mut W) -> io::Result<usize> {
        let grid = compose(self.sketch.surface(), &self.layout, &self.header());
        self.presenter.present(grid, out)
    }
}

/// Enter the terminal modes the sketch needs.
pub fn open_session() -> io::Result<TerminalSession> {
    TerminalSession::new(&SessionOptions::fullscreen())
}

/// Run on `session` until the user quits or the exit timer fires.
///
/// # Errors
///
/// Returns terminal I/O errors. The terminal is restored when `session` is
/// dropped, which happens before this returns.
pub fn run(session: TerminalSession, opts: &Opts) -> io::Result<Exit> {
    let (cols, rows) = session.size()?;
    let mut app = App::new(opts, cols, rows);
    info!(cols, rows, fps = opts.fps, cells = %opts.cells, "sketch started");

    let frame_time = Duration::from_secs(1) / opts.fps.max(1);
    let exit_after = (opts.exit_after_ms > 0).then(|| Duration::from_millis(opts.exit_after_ms));
    let started = Instant::now();
    let mut stdout = io::stdout().lock();

    let exit = 'frames: loop {
        let deadline = Instant::now() + frame_time;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !session.poll_event(timeout)? {
                break;
            }
            let event = session.read_event()?;
            if !app.handle_event(&event) {
                break 'frames Exit::Quit;
            }
            if Instant::now() >= deadline {
                break;
            }
        }

        app.frame();
        let written = app.present(&mut stdout)?;
        if written > 0 {
            debug!(written, "frame presented");
        }

        if exit_after.is_some_and(|limit| started.elapsed() >= limit) {
            break Exit::Timeout;
        }
    };

    info!(?exit, elapsed_ms = started.elapsed().as_millis() as u64, "sketch finished");
    drop(stdout);
    drop(session);
    Ok(exit)
}
