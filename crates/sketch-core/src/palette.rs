#![forbid(unsafe_code)]

//! Built-in colour palettes.
//!
//! The registry is a fixed, ordered list built once at start-up. Patterns
//! only ever read the palette currently selected by the sketch.

use fastrand::Rng;

use crate::color::Rgba;

/// Number of colours in every palette.
pub const PALETTE_LEN: usize = 4;

/// An ordered set of four colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    name: &'static str,
    colors: [Rgba; PALETTE_LEN],
}

impl Palette {
    /// Create a palette from four colours.
    pub const fn new(name: &'static str, colors: [Rgba; PALETTE_LEN]) -> Self {
        Self { name, colors }
    }

    /// Human-readable palette name (used for logging).
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of colours (always [`PALETTE_LEN`]).
    pub const fn len(&self) -> usize {
        PALETTE_LEN
    }

    /// Palettes are never empty.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Colour at `index`, cycling modulo the palette length.
    #[inline]
    pub fn color(&self, index: usize) -> Rgba {
        self.colors[index % PALETTE_LEN]
    }

    /// All colours in order.
    pub fn colors(&self) -> &[Rgba; PALETTE_LEN] {
        &self.colors
    }

    /// A uniformly chosen colour.
    pub fn pick(&self, rng: &mut Rng) -> Rgba {
        self.colors[rng.usize(..PALETTE_LEN)]
    }
}

const BUILTIN: [Palette; 4] = [
    Palette::new(
        "Coral Reef",
        [
            Rgba::hex(0xFF6B6B),
            Rgba::hex(0x4ECDC4),
            Rgba::hex(0x45B7D1),
            Rgba::hex(0xFFA07A),
        ],
    ),
    Palette::new(
        "Neon",
        [
            Rgba::hex(0x00D9FF),
            Rgba::hex(0x7000FF),
            Rgba::hex(0xFF00E5),
            Rgba::hex(0x00FFA3),
        ],
    ),
    Palette::new(
        "Tropical",
        [
            Rgba::hex(0xFFD93D),
            Rgba::hex(0xFF6B35),
            Rgba::hex(0x6BCB77),
            Rgba::hex(0x4D96FF),
        ],
    ),
    Palette::new(
        "Nebula",
        [
            Rgba::hex(0xF72585),
            Rgba::hex(0x7209B7),
            Rgba::hex(0x3A0CA3),
            Rgba::hex(0x4361EE),
        ],
    ),
];

/// Fixed ordered list of palettes.
#[derive(Debug, Clone)]
pub struct PaletteRegistry {
    palettes: Vec<Palette>,
}

impl PaletteRegistry {
    /// The four built-in palettes.
    pub fn builtin() -> Self {
        Self {
            palettes: BUILTIN.to_vec(),
        }
    }

    /// Number of palettes.
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// True if the registry holds no palettes (never for the built-ins).
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Palette at `index`, wrapping.
    pub fn get(&self, index: usize) -> &Palette {
        &self.palettes[index % self.palettes.len()]
    }
}

impl Default for PaletteRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
