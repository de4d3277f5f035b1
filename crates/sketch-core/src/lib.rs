#![forbid(unsafe_code)]

//! Core: drawing surface, pattern renderers, particle field and frame scheduler.

pub mod color;
pub mod palette;
pub mod particle;
pub mod path;
pub mod pattern;
pub mod raster;
pub mod recording;
pub mod schedule;
pub mod selector;
pub mod sketch;
pub mod status;
pub mod surface;

pub use color::Rgba;
pub use palette::{Palette, PaletteRegistry};
pub use particle::{Particle, ParticleField};
pub use pattern::Pattern;
pub use raster::{Raster, TextStamp};
pub use recording::{DrawOp, RecordingSurface};
pub use sketch::{Control, Input, Sketch, SketchConfig};
pub use status::StatusLine;
pub use surface::{Surface, TextAlign};
