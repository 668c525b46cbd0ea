//! Glyph classification for width estimation.
//!
//! Characters are sorted into two width classes by a static code-point range
//! test. There is no font or locale awareness: Hangul renders roughly twice as
//! wide as Latin at the same point size, and that is all the estimator needs.
//! Widths are in em units (relative to font size), the same convention as a
//! per-character metric table.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Glyph class
// ────────────────────────────────────────────────────────────────────────────

/// Width class of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlyphClass {
    /// Double-width script glyph (Hangul).
    Wide,
    /// Everything else.
    Narrow,
}

impl GlyphClass {
    /// Classifies `c` by code point.
    ///
    /// WIDE ranges:
    /// - U+AC00..=U+D7AF  Hangul Syllables
    /// - U+1100..=U+11FF  Hangul Jamo
    /// - U+3130..=U+318F  Hangul Compatibility Jamo
    pub fn of(c: char) -> Self {
        match c as u32 {
            0xAC00..=0xD7AF | 0x1100..=0x11FF | 0x3130..=0x318F => GlyphClass::Wide,
            _ => GlyphClass::Narrow,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

/// Per-class advance width in em units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphWeights {
    pub wide: f64,
    pub narrow: f64,
}

impl Default for GlyphWeights {
    fn default() -> Self {
        Self {
            wide: 1.2,
            narrow: 0.6,
        }
    }
}

impl GlyphWeights {
    pub fn weight(&self, class: GlyphClass) -> f64 {
        match class {
            GlyphClass::Wide => self.wide,
            GlyphClass::Narrow => self.narrow,
        }
    }

    /// Effective length of a single line: the sum of per-character weights.
    ///
    /// Callers are expected to pass one line; a `'\n'` is weighted like any
    /// other narrow character.
    pub fn effective_len(&self, line: &str) -> f64 {
        line.chars().map(|c| self.weight(GlyphClass::of(c))).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hangul_syllables_are_wide() {
        assert_eq!(GlyphClass::of('가'), GlyphClass::Wide); // U+AC00
        assert_eq!(GlyphClass::of('한'), GlyphClass::Wide);
        assert_eq!(GlyphClass::of('\u{D7AF}'), GlyphClass::Wide);
    }

    #[test]
    fn test_jamo_ranges_are_wide() {
        assert_eq!(GlyphClass::of('\u{1100}'), GlyphClass::Wide);
        assert_eq!(GlyphClass::of('\u{11FF}'), GlyphClass::Wide);
        assert_eq!(GlyphClass::of('ㄱ'), GlyphClass::Wide); // U+3131
        assert_eq!(GlyphClass::of('\u{318F}'), GlyphClass::Wide);
    }

    #[test]
    fn test_range_boundaries_are_exclusive_outside() {
        assert_eq!(GlyphClass::of('\u{ABFF}'), GlyphClass::Narrow);
        assert_eq!(GlyphClass::of('\u{D7B0}'), GlyphClass::Narrow);
        assert_eq!(GlyphClass::of('\u{10FF}'), GlyphClass::Narrow);
        assert_eq!(GlyphClass::of('\u{1200}'), GlyphClass::Narrow);
        assert_eq!(GlyphClass::of('\u{312F}'), GlyphClass::Narrow);
        assert_eq!(GlyphClass::of('\u{3190}'), GlyphClass::Narrow);
    }

    #[test]
    fn test_latin_and_other_cjk_are_narrow() {
        assert_eq!(GlyphClass::of('A'), GlyphClass::Narrow);
        assert_eq!(GlyphClass::of(' '), GlyphClass::Narrow);
        // Han ideographs are outside the fixed ranges.
        assert_eq!(GlyphClass::of('漢'), GlyphClass::Narrow);
        assert_eq!(GlyphClass::of('あ'), GlyphClass::Narrow);
    }

    #[test]
    fn test_effective_len_empty_is_zero() {
        assert_eq!(GlyphWeights::default().effective_len(""), 0.0);
    }

    #[test]
    fn test_effective_len_mixed_line() {
        // "가A" = 1.2 + 0.6
        let len = GlyphWeights::default().effective_len("가A");
        assert!((len - 1.8).abs() < 1e-9, "expected 1.8, got {len}");
    }

    #[test]
    fn test_custom_weights_are_used() {
        let weights = GlyphWeights {
            wide: 2.0,
            narrow: 0.5,
        };
        assert_eq!(weights.effective_len("가가ab"), 5.0);
    }
}
