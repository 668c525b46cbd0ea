//! Deck builder: lays out the table of contents, title and content slides.
//!
//! # Slide order
//! 1. Table of contents (always slide 1)
//! 2. Per source file, in the given order: a title slide, then one content
//!    slide per paragraph
//!
//! TOC entries read `"{file}  (p.{n})"` where `n` is the 1-based number of the
//! file's title slide, and each entry links to that slide. The entries are
//! filled in last, once every title slide's position is known.

use tracing::{debug, info};

use crate::deck::{Align, Anchor, Deck, Paragraph, Rgb, Slide, SlideKind, TextBox, TextStyle};
use crate::layout::geometry::SlideGeometry;
use crate::layout::{fit_text, FitParams};
use crate::source::SourceDocument;

pub const DEFAULT_FONT: &str = "a시네마m";
pub const TITLE_SIZE_PT: u32 = 66;
pub const TOC_SIZE_PT: u32 = 20;

/// Fixed styling shared by every slide.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckStyle {
    pub font: String,
    pub text_color: Rgb,
    pub background: Rgb,
    pub title_size_pt: u32,
    pub toc_size_pt: u32,
}

impl Default for DeckStyle {
    fn default() -> Self {
        Self {
            font: DEFAULT_FONT.to_string(),
            text_color: Rgb::YELLOW,
            background: Rgb::BLACK,
            title_size_pt: TITLE_SIZE_PT,
            toc_size_pt: TOC_SIZE_PT,
        }
    }
}

impl DeckStyle {
    fn text_style(&self, size_pt: u32) -> TextStyle {
        TextStyle {
            bold: true,
            color: self.text_color,
            font: self.font.clone(),
            size_pt,
        }
    }

    fn slide(&self, kind: SlideKind, text_box: TextBox) -> Slide {
        Slide {
            kind,
            background: self.background,
            text_box,
        }
    }
}

/// Builds the whole deck from loaded sources.
pub fn build_deck(
    sources: &[SourceDocument],
    geometry: SlideGeometry,
    fit: &FitParams,
    style: &DeckStyle,
) -> Deck {
    let frame = geometry.text_box();
    let fit_box = geometry.fit_box();

    let mut slides = vec![style.slide(
        SlideKind::Contents,
        TextBox {
            frame,
            word_wrap: true,
            anchor: Anchor::Top,
            paragraphs: Vec::new(),
        },
    )];
    let mut title_indices: Vec<usize> = Vec::with_capacity(sources.len());

    for (source_idx, doc) in sources.iter().enumerate() {
        title_indices.push(slides.len());
        slides.push(style.slide(
            SlideKind::Title { source: source_idx },
            TextBox {
                frame,
                word_wrap: true,
                anchor: Anchor::Middle,
                paragraphs: vec![Paragraph {
                    text: doc.name.clone(),
                    align: Align::Center,
                    style: style.text_style(style.title_size_pt),
                    link: None,
                }],
            },
        ));

        for (para_idx, text) in doc.paragraphs.iter().enumerate() {
            let outcome = fit_text(text, fit_box, fit);
            if !outcome.fitted {
                debug!(
                    file = %doc.name,
                    paragraph = para_idx,
                    size = outcome.font_size,
                    "Paragraph does not fit at the minimum size; using the floor"
                );
            }

            slides.push(style.slide(
                SlideKind::Content {
                    source: source_idx,
                    paragraph: para_idx,
                    fit: outcome,
                },
                TextBox {
                    frame,
                    word_wrap: false,
                    anchor: Anchor::Middle,
                    paragraphs: vec![Paragraph {
                        text: text.clone(),
                        align: Align::Center,
                        style: style.text_style(outcome.font_size),
                        link: None,
                    }],
                },
            ));
        }

        info!(
            file = %doc.name,
            paragraphs = doc.paragraphs.len(),
            title_slide = title_indices[source_idx] + 1,
            "Added section"
        );
    }

    slides[0].text_box.paragraphs = sources
        .iter()
        .zip(&title_indices)
        .map(|(doc, &slide_idx)| Paragraph {
            text: toc_entry(&doc.name, slide_idx + 1),
            align: Align::Left,
            style: style.text_style(style.toc_size_pt),
            link: Some(slide_idx),
        })
        .collect();

    Deck { geometry, slides }
}

/// One table-of-contents line.
pub fn toc_entry(name: &str, page: usize) -> String {
    format!("{name}  (p.{page})")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
