//! JSON build report: which slide came from where, and what size each
//! paragraph was given.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::deck::{Deck, SlideKind};
use crate::errors::Result;
use crate::source::SourceDocument;

#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub output: PathBuf,
    pub slide_count: usize,
    pub sections: Vec<SectionReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionReport {
    pub file: String,
    /// 1-based slide number of the title slide.
    pub title_slide: usize,
    pub paragraphs: Vec<ParagraphReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParagraphReport {
    pub slide: usize,
    pub line_count: usize,
    pub effective_length: f64,
    pub font_size: u32,
    /// True when nothing in range fit and the floor size was used.
    pub overflow: bool,
}

impl BuildReport {
    pub fn from_deck(deck: &Deck, sources: &[SourceDocument], output: &Path) -> Self {
        let mut sections: Vec<SectionReport> = sources
            .iter()
            .map(|doc| SectionReport {
                file: doc.name.clone(),
                title_slide: 0,
                paragraphs: Vec::new(),
            })
            .collect();

        for (idx, slide) in deck.slides.iter().enumerate() {
            match &slide.kind {
                SlideKind::Contents => {}
                SlideKind::Title { source } => {
                    if let Some(section) = sections.get_mut(*source) {
                        section.title_slide = idx + 1;
                    }
                }
                SlideKind::Content { source, fit, .. } => {
                    if let Some(section) = sections.get_mut(*source) {
                        section.paragraphs.push(ParagraphReport {
                            slide: idx + 1,
                            line_count: fit.measure.line_count,
                            effective_length: fit.measure.max_line_len,
                            font_size: fit.font_size,
                            overflow: !fit.fitted,
                        });
                    }
                }
            }
        }

        Self {
            output: output.to_path_buf(),
            slide_count: deck.slide_count(),
            sections,
        }
    }

    pub fn overflow_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.paragraphs)
            .filter(|p| p.overflow)
            .count()
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
