#![forbid(unsafe_code)]

//! Mapping between terminal cells and surface pixels.
//!
//! Row 0 holds the header; every row below it is canvas. Each canvas cell
//! covers a grid of sub-pixels whose shape depends on the [`CellMode`], and
//! every sub-pixel covers `scale × scale` surface pixels:
//!
//! | Mode        | Sub-pixels per cell | Chars used       |
//! |-------------|--------------------:|------------------|
//! | `Braille`   | 2 × 4 = 8          | U+2800..U+28FF   |
//! | `HalfBlock` | 1 × 2 = 2          | Upper/lower half |

use std::fmt;
use std::str::FromStr;

/// Rows reserved above the canvas.
pub const HEADER_ROWS: u16 = 1;

/// How canvas cells are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellMode {
    /// 2×4 dots per cell, one colour per cell.
    #[default]
    Braille,
    /// 1×2 halves per cell, one colour per half.
    HalfBlock,
}

impl CellMode {
    /// Sub-pixel columns per terminal cell.
    #[inline]
    pub const fn cols_per_cell(self) -> u32 {
        match self {
            Self::Braille => 2,
            Self::HalfBlock => 1,
        }
    }

    /// Sub-pixel rows per terminal cell.
    #[inline]
    pub const fn rows_per_cell(self) -> u32 {
        match self {
            Self::Braille => 4,
            Self::HalfBlock => 2,
        }
    }

    /// Name accepted by `--cells`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Braille => "braille",
            Self::HalfBlock => "halfblock",
        }
    }
}

impl fmt::Display for CellMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognised cell mode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCellMode(pub String);

impl fmt::Display for UnknownCellMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown cell mode '{}' (expected braille or halfblock)", self.0)
    }
}

impl std::error::Error for UnknownCellMode {}

impl FromStr for CellMode {
    type Err = UnknownCellMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "braille" => Ok(Self::Braille),
            "halfblock" | "half-block" | "half" => Ok(Self::HalfBlock),
            _ => Err(UnknownCellMode(s.to_string())),
        }
    }
}

/// Terminal geometry and its surface mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    cols: u16,
    rows: u16,
    mode: CellMode,
    scale: u32,
}

impl Layout {
    /// Layout for a `cols × rows` terminal. A scale of zero is treated as one.
    pub fn new(cols: u16, rows: u16, mode: CellMode, scale: u32) -> Self {
        Self {
            cols,
            rows,
            mode,
            scale: scale.max(1),
        }
    }

    /// Terminal columns.
    pub const fn cols(&self) -> u16 {
        self.cols
    }

    /// Terminal rows, header included.
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    pub const fn mode(&self) -> CellMode {
        self.mode
    }

    /// Surface pixels per sub-pixel edge.
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// Rows available to the canvas.
    pub const fn canvas_rows(&self) -> u16 {
        self.rows.saturating_sub(HEADER_ROWS)
    }

    /// Surface pixels covered by one cell, `(width, height)`.
    pub const fn cell_px(&self) -> (u32, u32) {
        (
            self.mode.cols_per_cell() * self.scale,
            self.mode.rows_per_cell() * self.scale,
        )
    }

    /// Surface size in pixels.
    pub const fn surface_size(&self) -> (u32, u32) {
        let (cw, ch) = self.cell_px();
        (self.cols as u32 * cw, self.canvas_rows() as u32 * ch)
    }

    /// True if `(col, row)` is a canvas cell.
    pub const fn is_canvas(&self, col: u16, row: u16) -> bool {
        col < self.cols && row >= HEADER_ROWS && row < self.rows
    }

    /// Centre of cell `(col, row)` in surface coordinates, or `None` for the
    /// header and for cells outside the terminal.
    pub fn cell_to_surface(&self, col: u16, row: u16) -> Option<(f64, f64)> {
        if !self.is_canvas(col, row) {
            return None;
        }
        let (cw, ch) = self.cell_px();
        let x = col as f64 * cw as f64 + cw as f64 / 2.0;
        let y = (row - HEADER_ROWS) as f64 * ch as f64 + ch as f64 / 2.0;
        Some((x, y))
    }
}
