// Presentation model and the deck builder.
// The model is format-neutral; `pptx` turns it into a package.

pub mod builder;

use serde::Serialize;

use crate::layout::geometry::{Frame, SlideGeometry};
use crate::layout::FitOutcome;

pub use builder::{build_deck, DeckStyle};

// ────────────────────────────────────────────────────────────────────────────
// Styling
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);

    /// Upper-case `RRGGBB`, the form `a:srgbClr` expects.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    Left,
    Center,
}

/// Vertical anchoring of text inside its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Anchor {
    Top,
    Middle,
}

/// Character formatting applied to every run of a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    pub bold: bool,
    pub color: Rgb,
    pub font: String,
    pub size_pt: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Slides
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    /// May contain `'\n'`, rendered as line breaks inside the paragraph.
    pub text: String,
    pub align: Align,
    pub style: TextStyle,
    /// 0-based index of the slide this paragraph jumps to when clicked.
    pub link: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBox {
    pub frame: Frame,
    pub word_wrap: bool,
    pub anchor: Anchor,
    pub paragraphs: Vec<Paragraph>,
}

/// What a slide was generated from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SlideKind {
    Contents,
    Title {
        source: usize,
    },
    Content {
        source: usize,
        paragraph: usize,
        fit: FitOutcome,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slide {
    pub kind: SlideKind,
    pub background: Rgb,
    pub text_box: TextBox,
}

impl Slide {
    /// Slide indices this slide links to, in paragraph order, deduplicated.
    pub fn link_targets(&self) -> Vec<usize> {
        let mut targets: Vec<usize> = Vec::new();
        for target in self.text_box.paragraphs.iter().filter_map(|p| p.link) {
            if !targets.contains(&target) {
                targets.push(target);
            }
        }
        targets
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deck {
    pub geometry: SlideGeometry,
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_hex() {
        assert_eq!(Rgb::YELLOW.hex(), "FFFF00");
        assert_eq!(Rgb::BLACK.hex(), "000000");
        assert_eq!(Rgb(10, 171, 255).hex(), "0AABFF");
    }
}
