#![forbid(unsafe_code)]

//! Packed RGBA colour used by palettes, surfaces and the terminal presenter.
//!
//! Storage is **straight alpha** (channels are not pre-multiplied) and
//! compositing is Porter-Duff **SourceOver**, so a raster can blend
//! semi-transparent particles onto earlier strokes exactly.

use std::fmt;

/// A colour packed as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct Rgba(pub u32);

impl Rgba {
    /// Fully transparent (alpha = 0). Also the "blank" raster pixel.
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque RGB colour (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA colour with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Create an opaque colour from a `0xRRGGBB` literal.
    #[inline]
    pub const fn hex(rgb: u32) -> Self {
        Self((rgb << 8) | 0xFF)
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// True when nothing would be drawn with this colour.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a() == 0
    }

    #[inline]
    const fn div_round_u8(numer: u64, denom: u64) -> u8 {
        debug_assert!(denom != 0);
        let v = (numer + (denom / 2)) / denom;
        if v > 255 { 255 } else { v as u8 }
    }

    /// Porter-Duff SourceOver: `self over dst`.
    ///
    /// Computed in exact rational form and rounded once at the end.
    #[inline]
    pub fn over(self, dst: Self) -> Self {
        let s_a = self.a() as u64;
        if s_a == 255 {
            return self;
        }
        if s_a == 0 {
            return dst;
        }

        let d_a = dst.a() as u64;
        let inv_s_a = 255 - s_a;

        // numer_a = 255*s_a + d_a*(255 - s_a), i.e. out_a scaled by 255.
        let numer_a = 255 * s_a + d_a * inv_s_a;
        if numer_a == 0 {
            return Self::TRANSPARENT;
        }

        let out_a = Self::div_round_u8(numer_a, 255);
        let channel = |s: u8, d: u8| {
            Self::div_round_u8(
                (s as u64) * s_a * 255 + (d as u64) * d_a * inv_s_a,
                numer_a,
            )
        };

        Self::rgba(
            channel(self.r(), dst.r()),
            channel(self.g(), dst.g()),
            channel(self.b(), dst.b()),
            out_a,
        )
    }

    /// Apply uniform opacity in `[0.0, 1.0]` by scaling alpha.
    #[inline]
    pub fn with_opacity(self, opacity: f64) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        let a = ((self.a() as f64) * opacity).round().clamp(0.0, 255.0) as u8;
        Self::rgba(self.r(), self.g(), self.b(), a)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a() == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r(), self.g(), self.b())
        } else {
            write!(
                f,
                "#{:02X}{:02X}{:02X}{:02X}",
                self.r(),
                self.g(),
                self.b(),
                self.a()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_literal_matches_rgb() {
        assert_eq!(Rgba::hex(0xFF6B6B), Rgba::rgb(0xFF, 0x6B, 0x6B));
        assert_eq!(Rgba::hex(0x4ECDC4).a(), 255);
    }

    #[test]
    fn channels_round_trip() {
        let c = Rgba::rgba(1, 2, 3, 4);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));
    }

    #[test]
    fn opaque_source_replaces_destination() {
        let red = Rgba::rgb(255, 0, 0);
        assert_eq!(red.over(Rgba::WHITE), red);
    }

    #[test]
    fn transparent_source_keeps_destination() {
        assert_eq!(Rgba::TRANSPARENT.over(Rgba::WHITE), Rgba::WHITE);
    }

    #[test]
    fn half_alpha_over_blank_keeps_colour() {
        let c = Rgba::rgb(200, 100, 50).with_opacity(0.5);
        let out = c.over(Rgba::TRANSPARENT);
        assert_eq!((out.r(), out.g(), out.b()), (200, 100, 50));
        assert_eq!(out.a(), 128);
    }

    #[test]
    fn half_alpha_over_black_darkens() {
        let out = Rgba::WHITE.with_opacity(0.5).over(Rgba::BLACK);
        assert_eq!(out.a(), 255);
        assert!((127..=129).contains(&out.r()));
    }

    #[test]
    fn opacity_is_clamped() {
        assert_eq!(Rgba::WHITE.with_opacity(2.0).a(), 255);
        assert_eq!(Rgba::WHITE.with_opacity(-1.0).a(), 0);
    }

    #[test]
    fn display_is_css_hex() {
        assert_eq!(Rgba::hex(0x667EEA).to_string(), "#667EEA");
        assert_eq!(Rgba::rgba(0, 0, 0, 0x80).to_string(), "#00000080");
    }
}
