#![forbid(unsafe_code)]

//! Flattened path storage shared by pixel surfaces.
//!
//! Arcs are flattened into line segments on insertion so stroking and
//! filling only ever deal with polylines.

use std::f64::consts::TAU;

/// Maximum length of one flattened arc segment, in pixels.
const ARC_SEGMENT_LEN: f64 = 1.5;
const ARC_MIN_SEGMENTS: usize = 8;
const ARC_MAX_SEGMENTS: usize = 2048;

/// A path made of polyline sub-paths.
#[derive(Debug, Clone, Default)]
pub struct Path {
    subpaths: Vec<Vec<(f64, f64)>>,
}

impl Path {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every sub-path.
    pub fn clear(&mut self) {
        self.subpaths.clear();
    }

    /// True when no points have been added.
    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(Vec::is_empty)
    }

    /// Start a new sub-path.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.subpaths.push(vec![(x, y)]);
    }

    /// Extend the current sub-path; acts as `move_to` on an empty path.
    pub fn line_to(&mut self, x: f64, y: f64) {
        match self.subpaths.last_mut() {
            Some(sub) if !sub.is_empty() => sub.push((x, y)),
            _ => self.move_to(x, y),
        }
    }

    /// Append a clockwise arc, connected to the current point by a line.
    ///
    /// Sweeps larger than a full turn are capped at one turn. A negative or
    /// non-finite radius adds nothing.
    pub fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        if !(radius.is_finite() && radius >= 0.0 && start.is_finite() && end.is_finite()) {
            return;
        }
        let sweep = (end - start).clamp(-TAU, TAU);
        let segments = ((sweep.abs() * radius) / ARC_SEGMENT_LEN)
            .ceil()
            .clamp(ARC_MIN_SEGMENTS as f64, ARC_MAX_SEGMENTS as f64) as usize;

        for i in 0..=segments {
            let angle = start + sweep * (i as f64 / segments as f64);
            self.line_to(cx + angle.cos() * radius, cy + angle.sin() * radius);
        }
    }

    /// The flattened sub-paths.
    pub fn subpaths(&self) -> &[Vec<(f64, f64)>] {
        &self.subpaths
    }

    /// Axis-aligned bounds `(min_x, min_y, max_x, max_y)`, if any point exists.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points = self.subpaths.iter().flatten();
        let &(x0, y0) = points.next()?;
        Some(points.fold((x0, y0, x0, y0), |(ax, ay, bx, by), &(x, y)| {
            (ax.min(x), ay.min(y), bx.max(x), by.max(y))
        }))
    }

    /// Absolute enclosed area, summing each implicitly closed sub-path.
    pub fn area(&self) -> f64 {
        self.subpaths
            .iter()
            .map(|sub| {
                let n = sub.len();
                if n < 3 {
                    return 0.0;
                }
                let twice: f64 = (0..n)
                    .map(|i| {
                        let (x0, y0) = sub[i];
                        let (x1, y1) = sub[(i + 1) % n];
                        x0 * y1 - x1 * y0
                    })
                    .sum();
                (twice / 2.0).abs()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_to_on_empty_path_starts_subpath() {
        let mut p = Path::new();
        p.line_to(1.0, 2.0);
        assert_eq!(p.subpaths(), &[vec![(1.0, 2.0)]]);
    }

    #[test]
    fn move_to_splits_subpaths() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.line_to(1.0, 0.0);
        p.move_to(5.0, 5.0);
        assert_eq!(p.subpaths().len(), 2);
    }

    #[test]
    fn full_arc_is_closed_circle() {
        let mut p = Path::new();
        p.arc(10.0, 10.0, 5.0, 0.0, TAU);
        let sub = &p.subpaths()[0];
        let first = sub[0];
        let last = *sub.last().unwrap();
        assert!((first.0 - last.0).abs() < 1e-9 && (first.1 - last.1).abs() < 1e-9);
        for &(x, y) in sub {
            let d = ((x - 10.0).powi(2) + (y - 10.0).powi(2)).sqrt();
            assert!((d - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn circle_area_is_close_to_pi_r_squared() {
        let mut p = Path::new();
        p.arc(0.0, 0.0, 50.0, 0.0, TAU);
        let expected = std::f64::consts::PI * 2500.0;
        assert!((p.area() - expected).abs() / expected < 0.01);
    }

    #[test]
    fn negative_radius_adds_nothing() {
        let mut p = Path::new();
        p.arc(0.0, 0.0, -1.0, 0.0, TAU);
        assert!(p.is_empty());
    }

    #[test]
    fn bounds_cover_all_points() {
        let mut p = Path::new();
        p.move_to(3.0, -1.0);
        p.line_to(-2.0, 4.0);
        assert_eq!(p.bounds(), Some((-2.0, -1.0, 3.0, 4.0)));
        assert_eq!(Path::new().bounds(), None);
    }
}
