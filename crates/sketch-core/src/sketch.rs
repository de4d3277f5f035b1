#![forbid(unsafe_code)]

//! The sketch state and its input/frame entry points.
//!
//! [`Sketch`] owns everything that changes while the program runs: the
//! surface, the palette and mode selections, the particle field, the
//! auto-animate flag and the frame scheduler. A front-end feeds it
//! [`Input`]s as they arrive and calls [`Sketch::frame`] once per display
//! frame.
//!
//! # Frame tasks
//!
//! Two tasks run on the [`FrameScheduler`]:
//!
//! - the particle task is armed at construction and never stops. It only does
//!   work while the mode is [`Pattern::Particles`] or particles remain;
//! - the auto-pattern task is armed whenever auto-animate is switched on. It
//!   stops the first frame it sees the flag off.

use fastrand::Rng;
use tracing::{debug, info, trace_span};

use crate::color::Rgba;
use crate::palette::{Palette, PaletteRegistry};
use crate::particle::ParticleField;
use crate::pattern::{self, BURST_SIZE, CLICK_BURSTS, Pattern};
use crate::schedule::{FrameScheduler, Rearm, TaskId};
use crate::selector::Selector;
use crate::status::StatusLine;
use crate::surface::{Surface, TextAlign};

/// Text drawn in the middle of a fresh sketch.
pub const GREETING: &str = "Move the mouse to create art!";
/// Colour of [`GREETING`].
pub const GREETING_COLOR: Rgba = Rgba::hex(0x667EEA);
/// The auto-pattern task draws on every Nth invocation.
pub const AUTO_DRAW_INTERVAL: u64 = 5;

/// Start-up options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SketchConfig {
    /// Seed for reproducible sessions; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Start with auto-animate on.
    pub auto_animate: bool,
    /// Draw [`GREETING`] on the fresh surface.
    pub greeting: bool,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            seed: None,
            auto_animate: false,
            greeting: true,
        }
    }
}

/// Discrete user controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    NextMode,
    NextPalette,
    /// Wipe the surface and drop every particle.
    Clear,
    SetAutoAnimate(bool),
}

/// Input events in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Pointer moved to `(x, y)`.
    PointerMove { x: f64, y: f64 },
    /// Pointer clicked at `(x, y)`.
    Click { x: f64, y: f64 },
    Control(Control),
    /// The surface bounds changed.
    Resize { width: f64, height: f64 },
}

/// All mutable sketch state.
#[derive(Debug)]
pub struct Sketch<S: Surface> {
    surface: S,
    palettes: PaletteRegistry,
    palette: Selector,
    mode: Selector,
    particles: ParticleField,
    auto_animate: bool,
    auto_frames: u64,
    scheduler: FrameScheduler,
    status: StatusLine,
    rng: Rng,
}

impl<S: Surface> Sketch<S> {
    /// Create a sketch drawing onto `surface`.
    pub fn new(surface: S, config: &SketchConfig) -> Self {
        let palettes = PaletteRegistry::builtin();
        let rng = config.seed.map_or_else(Rng::new, Rng::with_seed);
        let mut sketch = Self {
            surface,
            palette: Selector::new(palettes.len()),
            palettes,
            mode: Selector::new(Pattern::ALL.len()),
            particles: ParticleField::new(),
            auto_animate: false,
            auto_frames: 0,
            scheduler: FrameScheduler::new(),
            status: StatusLine::new(Pattern::Rings),
            rng,
        };
        sketch.scheduler.arm(TaskId::ParticleAdvance);
        if config.auto_animate {
            sketch.set_auto_animate(true);
        }
        if config.greeting {
            sketch.draw_greeting();
        }
        sketch
    }

    /// Apply one input event.
    pub fn handle(&mut self, input: Input) {
        match input {
            Input::PointerMove { x, y } => self.draw_pattern(x, y),
            Input::Click { x, y } => self.click(x, y),
            Input::Control(Control::NextMode) => self.next_mode(),
            Input::Control(Control::NextPalette) => self.next_palette(),
            Input::Control(Control::Clear) => self.clear(),
            Input::Control(Control::SetAutoAnimate(on)) => self.set_auto_animate(on),
            Input::Resize { width, height } => {
                debug!(width, height, "surface resized");
                self.surface.resize(width, height);
            }
        }
    }

    /// Draw the current pattern at `(x, y)`.
    ///
    /// In particle mode this spawns one burst instead.
    pub fn draw_pattern(&mut self, x: f64, y: f64) {
        let palette = *self.active_palette();
        match self.mode() {
            Pattern::Rings => pattern::draw_rings(&mut self.surface, x, y, &palette),
            Pattern::Spiral => {
                pattern::draw_spiral(&mut self.surface, x, y, &palette, &mut self.rng);
            }
            Pattern::Particles => {
                self.particles.spawn(x, y, BURST_SIZE, &palette, &mut self.rng);
            }
            Pattern::Waves => pattern::draw_wave(&mut self.surface, x, y, &palette, &mut self.rng),
        }
    }

    /// Fire the click burst at `(x, y)`, whatever the mode.
    pub fn click(&mut self, x: f64, y: f64) {
        let palette = *self.active_palette();
        for _ in 0..CLICK_BURSTS {
            self.particles.spawn(x, y, BURST_SIZE, &palette, &mut self.rng);
        }
    }

    /// Select the next mode and update the mode label.
    pub fn next_mode(&mut self) {
        self.mode.advance();
        let mode = self.mode();
        self.status.set_mode(mode);
        debug!(mode = mode.name(), "mode changed");
    }

    /// Select the next palette.
    pub fn next_palette(&mut self) {
        self.palette.advance();
        debug!(palette = self.active_palette().name(), "palette changed");
    }

    /// Wipe the whole surface, drop every particle and reset the count label.
    pub fn clear(&mut self) {
        let (width, height) = (self.surface.width(), self.surface.height());
        self.surface.clear_rect(0.0, 0.0, width, height);
        self.particles.clear();
        self.status.set_particle_count(0);
        info!("sketch cleared");
    }

    /// Switch auto-animate on or off.
    ///
    /// Switching on arms the auto-pattern task. Switching off takes effect
    /// the next time that task runs.
    pub fn set_auto_animate(&mut self, on: bool) {
        self.auto_animate = on;
        if on {
            self.scheduler.arm(TaskId::AutoPattern);
        }
        info!(on, "auto-animate toggled");
    }

    /// Run one display frame of every armed task.
    pub fn frame(&mut self) {
        let _span = trace_span!("frame", n = self.scheduler.frame() + 1).entered();
        let mut scheduler = std::mem::take(&mut self.scheduler);
        scheduler.run_frame(|task| match task {
            TaskId::ParticleAdvance => self.particle_step(),
            TaskId::AutoPattern => self.auto_step(),
        });
        self.scheduler = scheduler;
    }

    fn particle_step(&mut self) -> Rearm {
        if self.mode() == Pattern::Particles || !self.particles.is_empty() {
            let count = self.particles.advance_all(&mut self.surface);
            self.status.set_particle_count(count);
        }
        Rearm::Continue
    }

    fn auto_step(&mut self) -> Rearm {
        if !self.auto_animate {
            return Rearm::Stop;
        }
        self.auto_frames += 1;
        if self.auto_frames % AUTO_DRAW_INTERVAL == 0 {
            let x = self.rng.f64() * self.surface.width();
            let y = self.rng.f64() * self.surface.height();
            self.draw_pattern(x, y);
        }
        Rearm::Continue
    }

    fn draw_greeting(&mut self) {
        let (x, y) = (self.surface.width() / 2.0, self.surface.height() / 2.0);
        self.surface.set_fill_color(GREETING_COLOR);
        self.surface.fill_text(GREETING, x, y, TextAlign::Center);
    }

    /// The current mode.
    pub fn mode(&self) -> Pattern {
        Pattern::from_index(self.mode.index())
    }

    /// Index of the selected palette.
    pub fn palette_index(&self) -> usize {
        self.palette.index()
    }

    /// The selected palette.
    pub fn active_palette(&self) -> &Palette {
        self.palettes.get(self.palette.index())
    }

    /// Whether auto-animate is on.
    pub fn auto_animate(&self) -> bool {
        self.auto_animate
    }

    /// Invocations of the auto-pattern task that found the flag on.
    pub fn auto_frames(&self) -> u64 {
        self.auto_frames
    }

    /// True if `task` will run next frame.
    pub fn is_task_armed(&self, task: TaskId) -> bool {
        self.scheduler.is_armed(task)
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
