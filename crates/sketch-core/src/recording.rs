#![forbid(unsafe_code)]

//! A surface that records every primitive call instead of drawing.
//!
//! Used by tests to assert exactly which strokes, fills and colours a
//! renderer produced, independent of rasterisation.

use crate::color::Rgba;
use crate::surface::{Surface, TextAlign};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    SetStrokeColor(Rgba),
    SetFillColor(Rgba),
    SetLineWidth(f64),
    SetGlobalAlpha(f64),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
    },
    Stroke,
    Fill,
    ClearRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        align: TextAlign,
    },
    Resize {
        width: f64,
        height: f64,
    },
}

/// A stroke or fill together with the state it was drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintRecord {
    /// Stroke colour for strokes, fill colour for fills.
    pub color: Rgba,
    /// Line width in effect (strokes only matter).
    pub line_width: f64,
    /// Global alpha in effect.
    pub alpha: f64,
    /// Path construction calls since the last `begin_path`.
    pub path: Vec<DrawOp>,
}

/// A [`Surface`] that logs calls.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// Create a recorder reporting the given bounds.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// Every call in order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Forget recorded calls (bounds are kept).
    pub fn reset(&mut self) {
        self.ops.clear();
    }

    /// Replay the log and return each stroke with its state.
    pub fn strokes(&self) -> Vec<PaintRecord> {
        self.paints(|op| matches!(op, DrawOp::Stroke))
    }

    /// Replay the log and return each fill with its state.
    pub fn fills(&self) -> Vec<PaintRecord> {
        self.paints(|op| matches!(op, DrawOp::Fill))
    }

    fn paints(&self, want: impl Fn(&DrawOp) -> bool) -> Vec<PaintRecord> {
        let mut stroke = Rgba::BLACK;
        let mut fill = Rgba::BLACK;
        let mut line_width = 1.0;
        let mut alpha = 1.0;
        let mut path = Vec::new();
        let mut out = Vec::new();

        for op in &self.ops {
            match op {
                DrawOp::SetStrokeColor(c) => stroke = *c,
                DrawOp::SetFillColor(c) => fill = *c,
                DrawOp::SetLineWidth(w) => line_width = *w,
                DrawOp::SetGlobalAlpha(a) => alpha = *a,
                DrawOp::BeginPath => path.clear(),
                DrawOp::MoveTo(..) | DrawOp::LineTo(..) | DrawOp::Arc { .. } => {
                    path.push(op.clone());
                }
                DrawOp::Stroke | DrawOp::Fill if want(op) => out.push(PaintRecord {
                    color: if matches!(op, DrawOp::Stroke) { stroke } else { fill },
                    line_width,
                    alpha,
                    path: path.clone(),
                }),
                _ => {}
            }
        }
        out
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.ops.push(DrawOp::SetStrokeColor(color));
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.ops.push(DrawOp::SetFillColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(DrawOp::SetLineWidth(width));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ops.push(DrawOp::SetGlobalAlpha(alpha));
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::LineTo(x, y));
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        self.ops.push(DrawOp::Arc {
            cx,
            cy,
            radius,
            start,
            end,
        });
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke);
    }

    fn fill(&mut self) {
        self.ops.push(DrawOp::Fill);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, align: TextAlign) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
            align,
        });
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.ops.push(DrawOp::Resize { width, height });
    }
}
