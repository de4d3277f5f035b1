#![forbid(unsafe_code)]

//! The header row: status labels followed by clickable control buttons.

use sketch_core::StatusLine;
use unicode_width::UnicodeWidthStr;

const SEPARATOR: &str = " │ ";
const BUTTON_GAP: &str = " ";

/// A clickable header control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Mode,
    Colors,
    Clear,
    Auto,
    Quit,
}

impl Button {
    /// Buttons in display order.
    pub const ALL: [Self; 5] = [Self::Mode, Self::Colors, Self::Clear, Self::Auto, Self::Quit];

    /// Keyboard shortcut shown on the button.
    pub const fn key(self) -> char {
        match self {
            Self::Mode => 'm',
            Self::Colors => 'c',
            Self::Clear => 'x',
            Self::Auto => 'a',
            Self::Quit => 'q',
        }
    }

    fn label(self, auto_animate: bool) -> String {
        let name = match self {
            Self::Mode => "Mode",
            Self::Colors => "Colors",
            Self::Clear => "Clear",
            Self::Auto if auto_animate => "Auto: on",
            Self::Auto => "Auto: off",
            Self::Quit => "Quit",
        };
        format!("[{}] {name}", self.key())
    }
}

/// A run of header text, optionally belonging to a button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// First column.
    pub start: u16,
    pub text: String,
    pub button: Option<Button>,
}

impl Segment {
    /// Column just past the segment.
    pub fn end(&self) -> u16 {
        self.start
            .saturating_add(u16::try_from(self.text.width()).unwrap_or(u16::MAX))
    }
}

/// The laid-out header row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    segments: Vec<Segment>,
}

impl Header {
    /// Lay out labels and buttons from column 0.
    pub fn new(status: &StatusLine, auto_animate: bool) -> Self {
        let mut header = Self::default();
        let mut col = 0u16;
        let mut push = |text: String, button: Option<Button>, header: &mut Self| {
            let seg = Segment {
                start: col,
                text,
                button,
            };
            col = seg.end();
            header.segments.push(seg);
        };

        push(format!(" {}", status.mode_label()), None, &mut header);
        push(SEPARATOR.to_string(), None, &mut header);
        push(status.count_label().to_string(), None, &mut header);
        push(SEPARATOR.to_string(), None, &mut header);
        for (i, button) in Button::ALL.into_iter().enumerate() {
            if i > 0 {
                push(BUTTON_GAP.to_string(), None, &mut header);
            }
            push(button.label(auto_animate), Some(button), &mut header);
        }
        header
    }

    /// Segments in column order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The button under column `col`, if any.
    pub fn hit(&self, col: u16) -> Option<Button> {
        self.segments
            .iter()
            .find(|seg| seg.start <= col && col < seg.end())
            .and_then(|seg| seg.button)
    }

    /// The whole row as plain text.
    #[cfg(test)]
    pub(crate) fn text(&self) -> String {
        self.segments.iter().map(|seg| seg.text.as_str()).collect()
    }
}
