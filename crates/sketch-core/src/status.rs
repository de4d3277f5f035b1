#![forbid(unsafe_code)]

//! Text shown to the user about the current mode and particle count.

use crate::pattern::Pattern;

/// The two status labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    mode_label: String,
    count_label: String,
}

impl StatusLine {
    /// Labels for `mode` with zero particles.
    pub fn new(mode: Pattern) -> Self {
        let mut line = Self {
            mode_label: String::new(),
            count_label: String::new(),
        };
        line.set_mode(mode);
        line.set_particle_count(0);
        line
    }

    /// Show `mode`'s name.
    pub fn set_mode(&mut self, mode: Pattern) {
        self.mode_label = format!("Mode: {}", mode.name());
    }

    /// Show the particle count.
    pub fn set_particle_count(&mut self, count: usize) {
        self.count_label = format!("Particles: {count}");
    }

    /// `"Mode: <name>"`.
    pub fn mode_label(&self) -> &str {
        &self.mode_label
    }

    /// `"Particles: <n>"`.
    pub fn count_label(&self) -> &str {
        &self.count_label
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new(Pattern::Rings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_labels() {
        let s = StatusLine::default();
        assert_eq!(s.mode_label(), "Mode: Concentric Circles");
        assert_eq!(s.count_label(), "Particles: 0");
    }

    #[test]
    fn updates() {
        let mut s = StatusLine::default();
        s.set_mode(Pattern::Waves);
        s.set_particle_count(42);
        assert_eq!(s.mode_label(), "Mode: Psychedelic Waves");
        assert_eq!(s.count_label(), "Particles: 42");
    }
}
