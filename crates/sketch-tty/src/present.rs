#![forbid(unsafe_code)]

//! Downsampling the raster into terminal cells and writing them out.
//!
//! [`compose`] turns the sketch surface plus the header into a [`Grid`] of
//! cells. [`Presenter`] keeps the last grid it wrote and emits only the
//! cells that changed, so a frame where nothing moved costs no output.
//!
//! The terminal background is assumed dark: translucent colours are
//! flattened onto black before being sent.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;
use sketch_core::{Raster, Rgba, TextAlign};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::header::Header;
use crate::layout::{CellMode, HEADER_ROWS, Layout};

/// Colour of header buttons.
pub const ACCENT: Rgba = Rgba::hex(0x667EEA);

/// Placeholder for the right half of a double-width glyph.
const CONTINUATION: char = '\0';

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    /// `None` keeps the terminal default.
    pub fg: Option<Rgba>,
    /// `None` keeps the terminal default.
    pub bg: Option<Rgba>,
}

impl Cell {
    pub const BLANK: Self = Self {
        ch: ' ',
        fg: None,
        bg: None,
    };
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// A full screen of cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Grid {
    /// A blank grid.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::BLANK; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        (col < self.cols && row < self.rows)
            .then(|| row as usize * self.cols as usize + col as usize)
    }

    /// Cell at `(col, row)`; `None` outside the grid.
    pub fn get(&self, col: u16, row: u16) -> Option<&Cell> {
        self.index(col, row).map(|i| &self.cells[i])
    }

    /// Overwrite one cell; ignored outside the grid.
    pub fn set(&mut self, col: u16, row: u16, cell: Cell) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = cell;
        }
    }

    /// Write `text` starting at column `col` (may be negative), clipped to
    /// the row. Background colours underneath are kept.
    pub fn put_str(&mut self, col: i32, row: u16, text: &str, fg: Option<Rgba>) {
        let mut x = col;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0) as i32;
            if width == 0 {
                continue;
            }
            if x >= 0 && x + width <= self.cols as i32 {
                let bg = self.get(x as u16, row).and_then(|c| c.bg);
                self.set(x as u16, row, Cell { ch, fg, bg });
                for extra in 1..width {
                    self.set(
                        (x + extra) as u16,
                        row,
                        Cell {
                            ch: CONTINUATION,
                            fg,
                            bg,
                        },
                    );
                }
            }
            x += width;
        }
    }

    /// Characters of `row` as a string, continuation cells skipped.
    #[cfg(test)]
    pub(crate) fn row_text(&self, row: u16) -> String {
        (0..self.cols)
            .filter_map(|col| self.get(col, row))
            .map(|c| c.ch)
            .filter(|&ch| ch != CONTINUATION)
            .collect()
    }
}

/// Average of the pixels in sub-pixel `(sx, sy)`, weighted by alpha.
///
/// The returned alpha is the mean coverage of the block. `None` when every
/// pixel is transparent.
fn sample(raster: &Raster, scale: u32, sx: u32, sy: u32) -> Option<Rgba> {
    let (mut r, mut g, mut b, mut a) = (0u64, 0u64, 0u64, 0u64);
    let x0 = (sx * scale) as usize;
    for y in sy * scale..(sy + 1) * scale {
        let row = raster.row(y);
        let Some(block) = row.get(x0..(x0 + scale as usize).min(row.len())) else {
            continue;
        };
        for px in block {
            let pa = px.a() as u64;
            r += px.r() as u64 * pa;
            g += px.g() as u64 * pa;
            b += px.b() as u64 * pa;
            a += pa;
        }
    }
    if a == 0 {
        return None;
    }
    let count = (scale * scale) as u64;
    Some(Rgba::rgba(
        (r / a) as u8,
        (g / a) as u8,
        (b / a) as u8,
        (a / count).max(1) as u8,
    ))
}

/// Alpha-weighted average colour of `samples`, with the strongest alpha.
fn mix(samples: &[Rgba]) -> Option<Rgba> {
    let total: u64 = samples.iter().map(|c| c.a() as u64).sum();
    if total == 0 {
        return None;
    }
    let channel = |f: fn(Rgba) -> u8| {
        (samples
            .iter()
            .map(|&c| f(c) as u64 * c.a() as u64)
            .sum::<u64>()
            / total) as u8
    };
    let alpha = samples.iter().map(|c| c.a()).max().unwrap_or(0);
    Some(Rgba::rgba(
        channel(Rgba::r),
        channel(Rgba::g),
        channel(Rgba::b),
        alpha,
    ))
}

/// Flatten onto the dark terminal background.
fn opaque(color: Rgba) -> Rgba {
    color.over(Rgba::BLACK)
}

fn braille_cell(raster: &Raster, scale: u32, col: u32, row: u32) -> Cell {
    // Braille dot numbering to bit mapping:
    // dot 1 (0,0) = bit 0    dot 4 (1,0) = bit 3
    // dot 2 (0,1) = bit 1    dot 5 (1,1) = bit 4
    // dot 3 (0,2) = bit 2    dot 6 (1,2) = bit 5
    // dot 7 (0,3) = bit 6    dot 8 (1,3) = bit 7
    const DOT_BITS: [[u8; 4]; 2] = [[0, 1, 2, 6], [3, 4, 5, 7]];

    let mut bits = 0u8;
    let mut lit = [Rgba::TRANSPARENT; 8];
    let mut n = 0;
    for (dx, column) in DOT_BITS.iter().enumerate() {
        for (dy, bit) in column.iter().enumerate() {
            if let Some(c) = sample(raster, scale, col * 2 + dx as u32, row * 4 + dy as u32) {
                bits |= 1 << bit;
                lit[n] = c;
                n += 1;
            }
        }
    }
    if bits == 0 {
        return Cell::BLANK;
    }
    Cell {
        ch: char::from_u32(0x2800 + bits as u32).unwrap_or(' '),
        fg: mix(&lit[..n]).map(opaque),
        bg: None,
    }
}

fn halfblock_cell(raster: &Raster, scale: u32, col: u32, row: u32) -> Cell {
    let top = sample(raster, scale, col, row * 2).map(opaque);
    let bottom = sample(raster, scale, col, row * 2 + 1).map(opaque);
    match (top, bottom) {
        (None, None) => Cell::BLANK,
        (Some(t), None) => Cell {
            ch: '▀',
            fg: Some(t),
            bg: None,
        },
        (None, Some(b)) => Cell {
            ch: '▄',
            fg: Some(b),
            bg: None,
        },
        (Some(t), Some(b)) => Cell {
            ch: '▀',
            fg: Some(t),
            bg: Some(b),
        },
    }
}

/// Build the screen for one frame: header, canvas cells and text overlay.
pub fn compose(raster: &Raster, layout: &Layout, header: &Header) -> Grid {
    let mut grid = Grid::new(layout.cols(), layout.rows());

    for seg in header.segments() {
        let fg = seg.button.map(|_| ACCENT);
        grid.put_str(seg.start as i32, 0, &seg.text, fg);
    }

    let scale = layout.scale();
    for row in 0..layout.canvas_rows() {
        for col in 0..layout.cols() {
            let cell = match layout.mode() {
                CellMode::Braille => braille_cell(raster, scale, col as u32, row as u32),
                CellMode::HalfBlock => halfblock_cell(raster, scale, col as u32, row as u32),
            };
            grid.set(col, row + HEADER_ROWS, cell);
        }
    }

    let (cw, ch) = layout.cell_px();
    for stamp in raster.texts() {
        if !(stamp.x.is_finite() && stamp.y.is_finite()) || stamp.y < 0.0 {
            continue;
        }
        let row = (stamp.y / ch as f64).floor() + HEADER_ROWS as f64;
        if row >= layout.rows() as f64 {
            continue;
        }
        let anchor = stamp.x / cw as f64;
        let width = stamp.text.width() as f64;
        let start = match stamp.align {
            TextAlign::Left => anchor.floor(),
            TextAlign::Center => (anchor - width / 2.0).round(),
            TextAlign::Right => anchor.round() - width,
        };
        grid.put_str(start as i32, row as u16, &stamp.text, Some(opaque(stamp.color)));
    }

    grid
}

fn to_color(color: Option<Rgba>) -> Color {
    match color {
        Some(c) => Color::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        },
        None => Color::Reset,
    }
}

/// Writes grids to the terminal, sending only changed cells.
#[derive(Debug, Default)]
pub struct Presenter {
    previous: Option<Grid>,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget what is on screen; the next frame is a full repaint.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Write `grid` to `out` and remember it.
    ///
    /// Returns the number of cells written.
    pub fn present<W: Write>(&mut self, grid: Grid, out: &mut W) -> io::Result<usize> {
        let full = self
            .previous
            .as_ref()
            .is_none_or(|prev| prev.cols != grid.cols || prev.rows != grid.rows);
        if full {
            queue!(out, ResetColor, Clear(ClearType::All))?;
        }

        let mut written = 0usize;
        let mut cursor: Option<(u16, u16)> = None;
        let mut pen: Option<(Option<Rgba>, Option<Rgba>)> = None;

        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let Some(cell) = grid.get(col, row) else {
                    continue;
                };
                if cell.ch == CONTINUATION {
                    continue;
                }
                if !full && self.previous.as_ref().and_then(|p| p.get(col, row)) == Some(cell) {
                    continue;
                }
                if cursor != Some((col, row)) {
                    queue!(out, MoveTo(col, row))?;
                }
                if pen != Some((cell.fg, cell.bg)) {
                    queue!(
                        out,
                        SetForegroundColor(to_color(cell.fg)),
                        SetBackgroundColor(to_color(cell.bg))
                    )?;
                    pen = Some((cell.fg, cell.bg));
                }
                queue!(out, Print(cell.ch))?;
                let width = cell.ch.width().unwrap_or(1).max(1) as u16;
                cursor = Some((col.saturating_add(width), row));
                written += 1;
            }
        }

        if full || written > 0 {
            queue!(out, ResetColor)?;
            out.flush()?;
        }
        self.previous = Some(grid);
        Ok(written)
    }
}
