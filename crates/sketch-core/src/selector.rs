#![forbid(unsafe_code)]

//! Wrapping index used for the mode and palette selections.

/// An index in `[0, len)` that only moves forward, wrapping to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    index: usize,
    len: usize,
}

impl Selector {
    /// Create a selector over `len` entries, starting at 0.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn new(len: usize) -> Self {
        assert!(len > 0, "selector needs at least one entry");
        Self { index: 0, len }
    }

    /// Current index.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Move to `(index + 1) mod len` and return the new index.
    pub fn advance(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }
}
