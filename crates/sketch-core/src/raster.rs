#![forbid(unsafe_code)]

//! Software pixel surface.
//!
//! [`Raster`] keeps a row-major RGBA buffer and implements [`Surface`] by
//! flattening paths and compositing with SourceOver. Text is not rasterised:
//! it is kept as [`TextStamp`]s anchored in surface coordinates so a cell
//! based presenter can print real glyphs on top of the pixels.
//!
//! Strokes are built by stamping discs along every segment. A generation
//! mask guarantees each pixel is blended at most once per `stroke`/`fill`
//! call, so translucent shapes do not darken where stamps overlap.

use crate::color::Rgba;
use crate::path::Path;
use crate::surface::{Surface, TextAlign};

/// Distance between disc stamps along a stroked segment, in pixels.
const STROKE_STEP: f64 = 0.5;
/// Smallest stamp radius, so hairlines still light the pixels they cross.
const MIN_STROKE_RADIUS: f64 = 0.75;

/// A line of text placed on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStamp {
    /// The text itself.
    pub text: String,
    /// Anchor x in surface pixels.
    pub x: f64,
    /// Anchor y (baseline row) in surface pixels.
    pub y: f64,
    /// How the text hangs off the anchor.
    pub align: TextAlign,
    /// Fill colour at the time of drawing, alpha included.
    pub color: Rgba,
}

/// Row-major RGBA pixel buffer implementing [`Surface`].
#[derive(Debug, Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    texts: Vec<TextStamp>,
    stroke_color: Rgba,
    fill_color: Rgba,
    line_width: f64,
    global_alpha: f64,
    path: Path,
    /// Per-pixel generation of the last paint operation that touched it.
    mask: Vec<u32>,
    mask_gen: u32,
}

impl Raster {
    /// Create a blank raster.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; len],
            texts: Vec::new(),
            stroke_color: Rgba::BLACK,
            fill_color: Rgba::BLACK,
            line_width: 1.0,
            global_alpha: 1.0,
            path: Path::new(),
            mask: vec![0; len],
            mask_gen: 0,
        }
    }

    /// Width in whole pixels.
    #[inline]
    pub fn width_px(&self) -> u32 {
        self.width
    }

    /// Height in whole pixels.
    #[inline]
    pub fn height_px(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`; transparent outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        if x >= self.width || y >= self.height {
            return Rgba::TRANSPARENT;
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// One row of pixels; empty outside the raster.
    pub fn row(&self, y: u32) -> &[Rgba] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Text stamps in drawing order.
    pub fn texts(&self) -> &[TextStamp] {
        &self.texts
    }

    /// True when no pixel is painted and no text is placed.
    pub fn is_blank(&self) -> bool {
        self.texts.is_empty() && self.pixels.iter().all(|p| p.is_transparent())
    }

    /// Resize to whole-pixel bounds, keeping the overlapping region.
    pub fn resize_px(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        let mut pixels = vec![Rgba::TRANSPARENT; width as usize * height as usize];
        let keep_w = self.width.min(width) as usize;
        for y in 0..self.height.min(height) as usize {
            let src = y * self.width as usize;
            let dst = y * width as usize;
            pixels[dst..dst + keep_w].copy_from_slice(&self.pixels[src..src + keep_w]);
        }
        self.pixels = pixels;
        self.mask = vec![0; self.pixels.len()];
        self.mask_gen = 0;
        self.width = width;
        self.height = height;

        let (w, h) = (width as f64, height as f64);
        self.texts
            .retain(|t| t.x >= 0.0 && t.x < w && t.y >= 0.0 && t.y < h);
    }

    fn next_mask_gen(&mut self) -> u32 {
        if self.mask_gen == u32::MAX {
            self.mask.fill(0);
            self.mask_gen = 0;
        }
        self.mask_gen += 1;
        self.mask_gen
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Blend `color` at `(x, y)` unless already painted in generation `generation`.
    fn paint(&mut self, x: i64, y: i64, generation: u32, color: Rgba) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        if self.mask[idx] == generation {
            return false;
        }
        self.mask[idx] = generation;
        self.pixels[idx] = color.over(self.pixels[idx]);
        true
    }

    fn stamp_disc(&mut self, cx: f64, cy: f64, radius: f64, generation: u32, color: Rgba) {
        let r2 = radius * radius;
        let x0 = (cx - radius).floor() as i64;
        let x1 = (cx + radius).ceil() as i64;
        let y0 = (cy - radius).floor() as i64;
        let y1 = (cy + radius).ceil() as i64;
        for py in y0..=y1 {
            let dy = py as f64 + 0.5 - cy;
            for px in x0..=x1 {
                let dx = px as f64 + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    self.paint(px, py, generation, color);
                }
            }
        }
    }

    fn stroke_path(&mut self, path: &Path, color: Rgba) {
        let radius = (self.line_width / 2.0).max(MIN_STROKE_RADIUS);
        let generation = self.next_mask_gen();
        for sub in path.subpaths() {
            for seg in sub.windows(2) {
                let ((ax, ay), (bx, by)) = (seg[0], seg[1]);
                let len = ((bx - ax).powi(2) + (by - ay).powi(2)).sqrt();
                let steps = (len / STROKE_STEP).ceil().max(1.0) as usize;
                for s in 0..=steps {
                    let t = s as f64 / steps as f64;
                    self.stamp_disc(ax + (bx - ax) * t, ay + (by - ay) * t, radius, generation, color);
                }
            }
        }
    }

    fn fill_path(&mut self, path: &Path, color: Rgba) {
        let Some((min_x, min_y, max_x, max_y)) = path.bounds() else {
            return;
        };

        let mut edges = Vec::new();
        for sub in path.subpaths() {
            let n = sub.len();
            if n < 3 {
                continue;
            }
            for i in 0..n {
                let (x0, y0) = sub[i];
                let (x1, y1) = sub[(i + 1) % n];
                if y0 != y1 {
                    edges.push((x0, y0, x1, y1));
                }
            }
        }

        let generation = self.next_mask_gen();
        let mut covered = 0usize;
        let row_start = (min_y.floor() as i64).max(0);
        let row_end = (max_y.ceil() as i64).min(self.height as i64 - 1);
        let mut crossings: Vec<(f64, i32)> = Vec::new();

        for py in row_start..=row_end {
            let yc = py as f64 + 0.5;
            crossings.clear();
            for &(x0, y0, x1, y1) in &edges {
                let dir = if y0 <= yc && y1 > yc {
                    1
                } else if y1 <= yc && y0 > yc {
                    -1
                } else {
                    continue;
                };
                crossings.push((x0 + (yc - y0) * (x1 - x0) / (y1 - y0), dir));
            }
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            for k in 0..crossings.len().saturating_sub(1) {
                winding += crossings[k].1;
                if winding == 0 {
                    continue;
                }
                let first = (crossings[k].0 - 0.5).ceil() as i64;
                let last = (crossings[k + 1].0 - 0.5).ceil() as i64;
                for px in first.max(0)..last.min(self.width as i64) {
                    if self.paint(px, py, generation, color) {
                        covered += 1;
                    }
                }
            }
        }

        // Shapes smaller than a pixel centre still leave a faint dot.
        if covered == 0 {
            let cx = ((min_x + max_x) / 2.0).floor() as i64;
            let cy = ((min_y + max_y) / 2.0).floor() as i64;
            let coverage = path.area().min(1.0);
            if coverage > 0.0 {
                self.paint(cx, cy, generation, color.with_opacity(coverage));
            }
        }
    }
}

impl Surface for Raster {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.fill_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        if alpha.is_finite() {
            self.global_alpha = alpha.clamp(0.0, 1.0);
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.line_to(x, y);
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        self.path.arc(cx, cy, radius, start, end);
    }

    fn stroke(&mut self) {
        let color = self.stroke_color.with_opacity(self.global_alpha);
        if color.is_transparent() || self.path.is_empty() {
            return;
        }
        let path = std::mem::take(&mut self.path);
        self.stroke_path(&path, color);
        self.path = path;
    }

    fn fill(&mut self) {
        let color = self.fill_color.with_opacity(self.global_alpha);
        if color.is_transparent() || self.path.is_empty() {
            return;
        }
        let path = std::mem::take(&mut self.path);
        self.fill_path(&path, color);
        self.path = path;
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (x, width) = if width < 0.0 { (x + width, -width) } else { (x, width) };
        let (y, height) = if height < 0.0 { (y + height, -height) } else { (y, height) };

        let x0 = x.floor().max(0.0) as u32;
        let y0 = y.floor().max(0.0) as u32;
        let x1 = ((x + width).ceil().max(0.0) as u32).min(self.width);
        let y1 = ((y + height).ceil().max(0.0) as u32).min(self.height);
        for py in y0..y1 {
            let start = py as usize * self.width as usize;
            if x0 < x1 {
                self.pixels[start + x0 as usize..start + x1 as usize].fill(Rgba::TRANSPARENT);
            }
        }

        self.texts.retain(|t| {
            !(t.x >= x && t.x < x + width && t.y >= y && t.y < y + height)
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, align: TextAlign) {
        let color = self.fill_color.with_opacity(self.global_alpha);
        if text.is_empty() || color.is_transparent() {
            return;
        }
        self.texts.push(TextStamp {
            text: text.to_string(),
            x,
            y,
            align,
            color,
        });
    }

    fn resize(&mut self, width: f64, height: f64) {
        let to_px = |v: f64| if v.is_finite() { v.round().max(0.0) as u32 } else { 0 };
        self.resize_px(to_px(width), to_px(height));
    }
}
