#![forbid(unsafe_code)]

//! The drawing surface the sketch renders onto.
//!
//! The trait mirrors a 2D canvas context: state setters (stroke/fill colour,
//! line width, global alpha), path construction (`begin_path`, `move_to`,
//! `line_to`, `arc`), path rendering (`stroke`, `fill`), plus `clear_rect`,
//! `fill_text` and geometry queries. Pattern renderers only ever call these
//! primitives; they own no pixel data.
//!
//! Two implementations ship with the crate:
//!
//! | Surface                                        | Use                        |
//! |------------------------------------------------|----------------------------|
//! | [`Raster`](crate::raster::Raster)              | pixel buffer shown on screen |
//! | [`RecordingSurface`](crate::recording::RecordingSurface) | call log for assertions |

use crate::color::Rgba;

/// Horizontal anchoring of [`Surface::fill_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Text starts at `x`.
    #[default]
    Left,
    /// Text is centred on `x`.
    Center,
    /// Text ends at `x`.
    Right,
}

/// A 2D drawing surface with canvas-style primitives.
///
/// Coordinates are surface pixels with the origin at the top-left corner.
/// Out-of-range coordinates are legal and simply draw nothing visible.
pub trait Surface {
    /// Surface width in pixels.
    fn width(&self) -> f64;

    /// Surface height in pixels.
    fn height(&self) -> f64;

    /// Colour used by subsequent [`stroke`](Self::stroke) calls.
    fn set_stroke_color(&mut self, color: Rgba);

    /// Colour used by subsequent [`fill`](Self::fill) and
    /// [`fill_text`](Self::fill_text) calls.
    fn set_fill_color(&mut self, color: Rgba);

    /// Stroke width in pixels.
    fn set_line_width(&mut self, width: f64);

    /// Opacity in `[0, 1]` applied to everything drawn until changed.
    fn set_global_alpha(&mut self, alpha: f64);

    /// Discard the current path and start a new one.
    fn begin_path(&mut self);

    /// Start a new sub-path at `(x, y)`.
    fn move_to(&mut self, x: f64, y: f64);

    /// Add a straight segment to `(x, y)`.
    fn line_to(&mut self, x: f64, y: f64);

    /// Add a clockwise arc around `(cx, cy)` from `start` to `end` radians.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64);

    /// Outline the current path.
    fn stroke(&mut self);

    /// Fill the current path (non-zero winding, sub-paths implicitly closed).
    fn fill(&mut self);

    /// Reset a rectangle to blank, including any text inside it.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Draw a line of text anchored at `(x, y)` in the fill colour.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, align: TextAlign);

    /// Change the surface bounds, keeping the overlapping content.
    ///
    /// Content outside the new bounds is discarded; newly exposed area is
    /// blank.
    fn resize(&mut self, width: f64, height: f64);
}
