// Text layout: glyph width classes, page geometry, and the font-size fit estimator.
// Everything here is pure; no I/O.

pub mod geometry;
pub mod glyph;
pub mod text_fit;

pub use text_fit::{fit_text, FitOutcome, FitParams, MAX_FONT_PT};
