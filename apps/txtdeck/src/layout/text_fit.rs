//! Text-fit estimation: the largest font size at which a text block fits a box.
#![allow(dead_code)]
//!
//! The estimate is an approximation by construction. Width is the longest
//! line's effective length (see [`GlyphWeights::effective_len`]) times the font
//! size; height is the line count times the font size times the line spacing.
//! No wrapping is simulated, each `'\n'` is a hard line.
//!
//! The search walks sizes from `max_size` down to `min_size` and takes the
//! first one that fits. When nothing fits the floor is returned anyway, so the
//! caller always gets a usable size and overflow is possible.

use serde::{Deserialize, Serialize};

use crate::layout::glyph::GlyphWeights;

/// Largest font size a DrawingML run can carry (`sz` tops out at 400000).
pub const MAX_FONT_PT: u32 = 4000;

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// Box the text must fit into, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub width_pt: f64,
    pub height_pt: f64,
}

impl BoundingBox {
    pub fn new(width_pt: f64, height_pt: f64) -> Self {
        Self {
            width_pt,
            height_pt,
        }
    }
}

/// Search range and measurement constants for the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitParams {
    /// Floor, also the no-fit fallback.
    pub min_size: u32,
    pub max_size: u32,
    /// Line height as a multiple of the font size.
    pub line_spacing: f64,
    pub weights: GlyphWeights,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            min_size: 60,
            max_size: 100,
            line_spacing: 1.5,
            weights: GlyphWeights::default(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Measurement
// ────────────────────────────────────────────────────────────────────────────

/// Size-independent measurement of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockMeasure {
    pub line_count: usize,
    /// Effective length of the longest line, in em.
    pub max_line_len: f64,
}

impl BlockMeasure {
    /// Splits on `'\n'`; an empty string is a single empty line.
    pub fn of(text: &str, weights: &GlyphWeights) -> Self {
        let mut line_count = 0usize;
        let mut max_line_len = 0.0_f64;
        for line in text.split('\n') {
            line_count += 1;
            max_line_len = max_line_len.max(weights.effective_len(line));
        }
        Self {
            line_count,
            max_line_len,
        }
    }

    /// Fit predicate. Non-increasing in `size`.
    pub fn fits(&self, size: u32, bbox: BoundingBox, line_spacing: f64) -> bool {
        let size = f64::from(size);
        let width_needed = self.max_line_len * size;
        let height_needed = self.line_count as f64 * size * line_spacing;
        width_needed <= bbox.width_pt && height_needed <= bbox.height_pt
    }
}

/// Estimator result with enough detail for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitOutcome {
    pub font_size: u32,
    /// False when no size in range fit and `font_size` is the floor fallback.
    pub fitted: bool,
    pub measure: BlockMeasure,
}

// ────────────────────────────────────────────────────────────────────────────
// Estimator
// ────────────────────────────────────────────────────────────────────────────

/// Runs the size search and reports whether a fitting size was found.
pub fn fit_text(text: &str, bbox: BoundingBox, params: &FitParams) -> FitOutcome {
    let measure = BlockMeasure::of(text, &params.weights);

    let found = (params.min_size..=params.max_size)
        .rev()
        .find(|&size| measure.fits(size, bbox, params.line_spacing));

    FitOutcome {
        font_size: found.unwrap_or(params.min_size),
        fitted: found.is_some(),
        measure,
    }
}

/// Largest font size in `[min_size, max_size]` at which `text` fits `bbox`,
/// or `min_size` when it never does.
pub fn estimate_font_size(text: &str, bbox: BoundingBox, params: &FitParams) -> u32 {
    fit_text(text, bbox, params).font_size
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(text: &str, width: f64, height: f64) -> u32 {
        estimate_font_size(text, BoundingBox::new(width, height), &FitParams::default())
    }

    #[test]
    fn test_empty_text_returns_max() {
        assert_eq!(estimate("", 1.0, 200.0), 100);
        assert_eq!(estimate("", 705.0, 540.0), 100);
    }

    #[test]
    fn test_empty_text_is_one_empty_line() {
        let measure = BlockMeasure::of("", &GlyphWeights::default());
        assert_eq!(measure.line_count, 1);
        assert_eq!(measure.max_line_len, 0.0);
    }

    #[test]
    fn test_two_short_lines_fit_at_max() {
        // max_line_len = 1.2 → width 120 at 100pt; height = 2 * 100 * 1.5 = 300
        let measure = BlockMeasure::of("AB\nCD", &GlyphWeights::default());
        assert_eq!(measure.line_count, 2);
        assert!((measure.max_line_len - 1.2).abs() < 1e-9);
        assert_eq!(estimate("AB\nCD", 1000.0, 1000.0), 100);
    }

    #[test]
    fn test_long_wide_line_falls_back_to_floor() {
        // 50 × 1.2 = 60em; even 60pt needs 3600pt of width.
        let text = "가".repeat(50);
        let outcome = fit_text(&text, BoundingBox::new(100.0, 1000.0), &FitParams::default());
        assert_eq!(outcome.font_size, 60);
        assert!(!outcome.fitted, "floor fallback must be reported as not fitted");
        assert!((outcome.measure.max_line_len - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_line_over_floor_returns_min() {
        // 20 narrow chars = 12em; at 60pt that's 720pt > 705pt.
        let text = "x".repeat(20);
        assert_eq!(estimate(&text, 705.0, 540.0), 60);
    }

    #[test]
    fn test_picks_largest_size_that_fits_width() {
        // 10 narrow chars = 6em; 6 × 80 = 480 ≤ 480, 6 × 81 = 486 > 480.
        assert_eq!(estimate("abcdefghij", 480.0, 1000.0), 80);
    }

    #[test]
    fn test_picks_largest_size_that_fits_height() {
        // 4 lines × 1.5 = 6 × size ≤ 450 → 75.
        assert_eq!(estimate("a\nb\nc\nd", 1000.0, 450.0), 75);
    }

    #[test]
    fn test_result_always_in_range() {
        let samples = [
            "",
            "a",
            "한국어 문장",
            "line one\nline two\nline three",
            "아주 긴 한 줄의 텍스트가 여기에 들어갑니다 그리고 계속 이어집니다",
        ];
        for text in samples {
            for (w, h) in [(1.0, 1.0), (100.0, 100.0), (705.0, 540.0), (5000.0, 5000.0)] {
                let size = estimate(text, w, h);
                assert!(
                    (60..=100).contains(&size),
                    "size {size} out of range for {text:?} in {w}×{h}"
                );
            }
        }
    }

    #[test]
    fn test_shrinking_width_never_increases_size() {
        let text = "첫 번째 줄\nsecond line here";
        let mut previous = u32::MAX;
        let mut width = 2000.0;
        while width > 0.0 {
            let size = estimate(text, width, 540.0);
            assert!(size <= previous, "size grew from {previous} to {size} at width {width}");
            previous = size;
            width -= 25.0;
        }
    }

    #[test]
    fn test_shrinking_height_never_increases_size() {
        let text = "a\nb\nc";
        let mut previous = u32::MAX;
        let mut height = 1000.0;
        while height > 0.0 {
            let size = estimate(text, 705.0, height);
            assert!(size <= previous, "size grew from {previous} to {size} at height {height}");
            previous = size;
            height -= 10.0;
        }
    }

    #[test]
    fn test_wide_line_is_exactly_double_narrow() {
        let weights = GlyphWeights::default();
        for n in [1usize, 2, 7, 13, 40] {
            let wide = BlockMeasure::of(&"가".repeat(n), &weights);
            let narrow = BlockMeasure::of(&"a".repeat(n), &weights);
            assert_eq!(wide.max_line_len, 2.0 * narrow.max_line_len, "n = {n}");
        }
    }

    #[test]
    fn test_wide_text_never_gets_larger_size_than_narrow() {
        for n in [1usize, 5, 8, 10, 12, 20] {
            for width in [300.0, 500.0, 705.0, 1200.0] {
                let wide = estimate(&"가".repeat(n), width, 540.0);
                let narrow = estimate(&"a".repeat(n), width, 540.0);
                assert!(wide <= narrow, "n = {n}, width = {width}: {wide} > {narrow}");
            }
        }
    }

    #[test]
    fn test_non_positive_box_returns_min() {
        assert_eq!(estimate("abc", 0.0, 540.0), 60);
        assert_eq!(estimate("abc", 705.0, -1.0), 60);
        // Even empty text needs a positive height for one line.
        assert_eq!(estimate("", 705.0, 0.0), 60);
    }

    #[test]
    fn test_inverted_range_returns_min() {
        let params = FitParams {
            min_size: 80,
            max_size: 40,
            ..FitParams::default()
        };
        let outcome = fit_text("", BoundingBox::new(705.0, 540.0), &params);
        assert_eq!(outcome.font_size, 80);
        assert!(!outcome.fitted);
    }

    #[test]
    fn test_custom_line_spacing_changes_height_budget() {
        let params = FitParams {
            line_spacing: 1.0,
            ..FitParams::default()
        };
        // 6 lines × 1.0 × size ≤ 540 → 90
        let size = estimate_font_size("1\n2\n3\n4\n5\n6", BoundingBox::new(705.0, 540.0), &params);
        assert_eq!(size, 90);
    }
}
