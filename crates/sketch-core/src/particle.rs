#![forbid(unsafe_code)]

//! Decaying point sprites and the field that owns them.
//!
//! Each particle lives for [`Particle::INITIAL_LIFE`] frames, drifting with a
//! constant velocity while its radius shrinks and its opacity fades with the
//! remaining life.
//!
//! # Update ordering
//!
//! [`ParticleField::advance_all`] prunes dead particles *before* advancing the
//! survivors. A particle whose life reaches zero during a pass is therefore
//! still present (and drawn at zero opacity) until the next pass removes it.

use std::f64::consts::TAU;

use fastrand::Rng;
use tracing::trace;

use crate::color::Rgba;
use crate::palette::Palette;
use crate::surface::Surface;

/// A single decaying point sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Radius in surface pixels.
    pub size: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub color: Rgba,
    /// Remaining frames; the particle is dead once this reaches zero.
    pub life: i32,
}

impl Particle {
    /// Life of a freshly spawned particle.
    pub const INITIAL_LIFE: i32 = 100;
    /// Shrinking stops once the radius is at or below this.
    pub const MIN_SHRINK_SIZE: f64 = 0.2;
    /// Radius lost per frame while shrinking.
    pub const SHRINK_STEP: f64 = 0.05;

    /// Spawn at `(x, y)` with a random radius in `[2, 7)`, a random velocity in
    /// `[-1.5, 1.5)` per axis and a random colour from `palette`.
    pub fn new(x: f64, y: f64, palette: &Palette, rng: &mut Rng) -> Self {
        Self {
            x,
            y,
            size: rng.f64() * 5.0 + 2.0,
            speed_x: rng.f64() * 3.0 - 1.5,
            speed_y: rng.f64() * 3.0 - 1.5,
            color: palette.pick(rng),
            life: Self::INITIAL_LIFE,
        }
    }

    /// Step one frame: move, age and shrink.
    pub fn advance(&mut self) {
        self.x += self.speed_x;
        self.y += self.speed_y;
        self.life -= 1;
        if self.size > Self::MIN_SHRINK_SIZE {
            self.size -= Self::SHRINK_STEP;
        }
    }

    /// True while the particle has life left.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Opacity derived from the remaining life, in `[0, 1]`.
    #[inline]
    pub fn opacity(&self) -> f64 {
        (self.life as f64 / Self::INITIAL_LIFE as f64).clamp(0.0, 1.0)
    }

    /// Draw as a filled circle, restoring full opacity afterwards.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_fill_color(self.color);
        surface.set_global_alpha(self.opacity());
        surface.begin_path();
        surface.arc(self.x, self.y, self.size, 0.0, TAU);
        surface.fill();
        surface.set_global_alpha(1.0);
    }
}

/// The live particle collection.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Create an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `count` new particles at `(x, y)`.
    pub fn spawn(&mut self, x: f64, y: f64, count: usize, palette: &Palette, rng: &mut Rng) {
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle::new(x, y, palette, rng));
        }
        trace!(x, y, count, total = self.particles.len(), "particles spawned");
    }

    /// Prune dead particles, then advance and draw each survivor.
    ///
    /// Returns the number of particles kept by the prune, which is what the
    /// particle-count label shows.
    pub fn advance_all<S: Surface + ?Sized>(&mut self, surface: &mut S) -> usize {
        self.particles.retain(Particle::is_alive);
        for particle in &mut self.particles {
            particle.advance();
            particle.render(surface);
        }
        self.particles.len()
    }

    /// Remove every particle. The surface is not touched.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Number of stored particles (including ones that died this frame).
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True when no particles are stored.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Iterate over the stored particles.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}
