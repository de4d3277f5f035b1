#![forbid(unsafe_code)]

//! The four drawing modes and their renderers.
//!
//! Renderers are stateless functions of the focal point and the active
//! palette. The particle mode has no renderer of its own: it spawns into the
//! [`ParticleField`](crate::particle::ParticleField), which the frame loop
//! advances and draws.

use std::f64::consts::{PI, TAU};

use fastrand::Rng;

use crate::palette::Palette;
use crate::surface::Surface;

/// Particles spawned per pointer trigger in particle mode.
pub const BURST_SIZE: usize = 5;
/// Bursts fired by one click. A click therefore adds `CLICK_BURSTS * BURST_SIZE`
/// particles.
pub const CLICK_BURSTS: usize = 20;

const RING_COUNT: usize = 5;
const RING_SPACING: f64 = 20.0;
const RING_LINE_WIDTH: f64 = 3.0;

const SPIRAL_TURNS_END: f64 = PI * 4.0;
const SPIRAL_STEP: f64 = 0.1;
const SPIRAL_GROWTH: f64 = 5.0;
const SPIRAL_LINE_WIDTH: f64 = 2.0;

const WAVE_SAMPLE_SPACING: usize = 10;
const WAVE_FREQUENCY: f64 = 0.05;
const WAVE_AMPLITUDE: f64 = 30.0;
const WAVE_LINE_WIDTH: f64 = 3.0;

/// A drawing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Five concentric circles.
    Rings,
    /// An Archimedean spiral.
    Spiral,
    /// Particle bursts.
    Particles,
    /// A full-width sine wave.
    Waves,
}

impl Pattern {
    /// All modes in cycling order.
    pub const ALL: [Self; 4] = [Self::Rings, Self::Spiral, Self::Particles, Self::Waves];

    /// Mode at `index`, wrapping.
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Display name shown in the mode label.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rings => "Concentric Circles",
            Self::Spiral => "Cosmic Spiral",
            Self::Particles => "Magic Particles",
            Self::Waves => "Psychedelic Waves",
        }
    }
}

/// Five rings of radius 20..=100 around `(x, y)`, colours cycling through
/// the palette.
pub fn draw_rings<S: Surface + ?Sized>(surface: &mut S, x: f64, y: f64, palette: &Palette) {
    for i in 0..RING_COUNT {
        surface.set_stroke_color(palette.color(i));
        surface.set_line_width(RING_LINE_WIDTH);
        surface.begin_path();
        surface.arc(x, y, (i + 1) as f64 * RING_SPACING, 0.0, TAU);
        surface.stroke();
    }
}

/// Two turns of a spiral whose radius grows five pixels per radian.
pub fn draw_spiral<S: Surface + ?Sized>(
    surface: &mut S,
    x: f64,
    y: f64,
    palette: &Palette,
    rng: &mut Rng,
) {
    surface.set_stroke_color(palette.pick(rng));
    surface.set_line_width(SPIRAL_LINE_WIDTH);
    surface.begin_path();

    let mut angle = 0.0_f64;
    let mut first = true;
    while angle < SPIRAL_TURNS_END {
        let radius = angle * SPIRAL_GROWTH;
        let px = x + angle.cos() * radius;
        let py = y + angle.sin() * radius;
        if first {
            surface.move_to(px, py);
            first = false;
        } else {
            surface.line_to(px, py);
        }
        angle += SPIRAL_STEP;
    }
    surface.stroke();
}

/// A sine wave across the full surface width, phase-shifted by `x` and
/// centred vertically on `y`.
pub fn draw_wave<S: Surface + ?Sized>(
    surface: &mut S,
    x: f64,
    y: f64,
    palette: &Palette,
    rng: &mut Rng,
) {
    surface.set_stroke_color(palette.pick(rng));
    surface.set_line_width(WAVE_LINE_WIDTH);
    surface.begin_path();

    let width = surface.width();
    let mut i = 0usize;
    while (i as f64) < width {
        let sample = i as f64;
        let wave_y = y + ((sample + x) * WAVE_FREQUENCY).sin() * WAVE_AMPLITUDE;
        if i == 0 {
            surface.move_to(sample, wave_y);
        } else {
            surface.line_to(sample, wave_y);
        }
        i += WAVE_SAMPLE_SPACING;
    }
    surface.stroke();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteRegistry;
    use crate::recording::{DrawOp, RecordingSurface};

    fn points(path: &[DrawOp]) -> Vec<(f64, f64)> {
        path.iter()
            .map(|op| match *op {
                DrawOp::MoveTo(x, y) | DrawOp::LineTo(x, y) => (x, y),
                ref other => panic!("unexpected op {other:?}"),
            })
            .collect()
    }

    #[test]
    fn from_index_wraps() {
        assert_eq!(Pattern::from_index(4), Pattern::Rings);
        assert_eq!(Pattern::from_index(7), Pattern::Waves);
    }

    #[test]
    fn from_index_follows_cycling_order() {
        for (i, p) in Pattern::ALL.into_iter().enumerate() {
            assert_eq!(Pattern::from_index(i), p);
        }
    }

    #[test]
    fn spiral_is_one_polyline_up_to_four_pi() {
        let palette = *PaletteRegistry::builtin().get(0);
        let mut s = RecordingSurface::new(400.0, 400.0);
        draw_spiral(&mut s, 200.0, 200.0, &palette, &mut Rng::with_seed(1));
        let strokes = s.strokes();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].line_width, 2.0);
        assert!(palette.colors().contains(&strokes[0].color));
        let path = &strokes[0].path;
        assert_eq!(path[0], DrawOp::MoveTo(200.0, 200.0));
        assert_eq!(path.len(), 126);
        assert!(path[1..].iter().all(|op| matches!(op, DrawOp::LineTo(..))));
    }

    #[test]
    fn wave_samples_every_ten_pixels() {
        let palette = *PaletteRegistry::builtin().get(3);
        let mut s = RecordingSurface::new(95.0, 50.0);
        draw_wave(&mut s, 0.0, 25.0, &palette, &mut Rng::with_seed(4));
        let strokes = s.strokes();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].line_width, 3.0);
        let xs: Vec<f64> = strokes[0]
            .path
            .iter()
            .map(|op| match op {
                DrawOp::MoveTo(x, _) | DrawOp::LineTo(x, _) => *x,
                other => panic!("unexpected op {other:?}"),
            })
            .collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0]);
        assert_eq!(strokes[0].path[0], DrawOp::MoveTo(0.0, 25.0));
    }

    #[test]
    fn spiral_points_follow_growing_radius() {
        let palette = *PaletteRegistry::builtin().get(1);
        let mut s = RecordingSurface::new(400.0, 400.0);
        let (cx, cy) = (130.0, -45.0);
        draw_spiral(&mut s, cx, cy, &palette, &mut Rng::with_seed(9));
        let pts = points(&s.strokes()[0].path);
        assert_eq!(pts.len(), 126);
        for (k, &(px, py)) in pts.iter().enumerate() {
            let a = k as f64 * 0.1;
            let r = 5.0 * a;
            assert!((px - (cx + a.cos() * r)).abs() < 1e-9, "point {k}: x={px}");
            assert!((py - (cy + a.sin() * r)).abs() < 1e-9, "point {k}: y={py}");
        }
        let (lx, ly) = pts[125];
        let last_r = ((lx - cx).powi(2) + (ly - cy).powi(2)).sqrt();
        assert!((last_r - 62.5).abs() < 1e-6);
    }

    #[test]
    fn wave_is_phase_shifted_by_pointer_x() {
        let palette = *PaletteRegistry::builtin().get(2);
        let mut s = RecordingSurface::new(200.0, 100.0);
        let (x, y) = (37.0, 60.0);
        draw_wave(&mut s, x, y, &palette, &mut Rng::with_seed(2));
        let pts = points(&s.strokes()[0].path);
        assert_eq!(pts.len(), 20);
        for (k, &(px, py)) in pts.iter().enumerate() {
            let i = (k * 10) as f64;
            assert_eq!(px, i);
            let expected = y + ((i + x) * 0.05).sin() * 30.0;
            assert!((py - expected).abs() < 1e-9, "sample {i}: y={py} want {expected}");
        }
        assert!(pts.iter().any(|&(_, py)| (py - y).abs() > 20.0));
    }

    #[test]
    fn wave_on_zero_width_surface_strokes_empty_path() {
        let palette = *PaletteRegistry::builtin().get(0);
        let mut s = RecordingSurface::new(0.0, 50.0);
        draw_wave(&mut s, 3.0, 4.0, &palette, &mut Rng::with_seed(4));
        let strokes = s.strokes();
        assert_eq!(strokes.len(), 1);
        assert!(strokes[0].path.is_empty());
    }
}
