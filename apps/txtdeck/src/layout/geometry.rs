//! Page geometry and unit conversion.
//!
//! Office Open XML positions everything in EMU (English Metric Units):
//! 914 400 per inch, 12 700 per point, 9 525 per 96-dpi pixel.

use serde::{Deserialize, Serialize};

use crate::layout::text_fit::BoundingBox;

pub const EMU_PER_INCH: i64 = 914_400;
pub const EMU_PER_POINT: i64 = 12_700;
pub const PIXELS_PER_INCH: i64 = 96;

/// Pixel to EMU, truncating toward zero.
pub fn px_to_emu(px: u32) -> i64 {
    i64::from(px) * EMU_PER_INCH / PIXELS_PER_INCH
}

pub fn emu_to_pt(emu: i64) -> f64 {
    emu as f64 / EMU_PER_POINT as f64
}

/// A rectangle in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

/// Slide size plus the horizontal padding applied to every text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideGeometry {
    pub slide_width: i64,
    pub slide_height: i64,
    /// Left and right padding, in device pixels.
    pub padding_px: u32,
}

impl Default for SlideGeometry {
    /// 10" × 7.5" (4:3) with 10px padding.
    fn default() -> Self {
        Self {
            slide_width: 9_144_000,
            slide_height: 6_858_000,
            padding_px: 10,
        }
    }
}

impl SlideGeometry {
    pub fn with_padding(padding_px: u32) -> Self {
        Self {
            padding_px,
            ..Self::default()
        }
    }

    /// Full-height text box inset horizontally by the padding on both sides.
    pub fn text_box(&self) -> Frame {
        let left = px_to_emu(self.padding_px);
        Frame {
            x: left,
            y: 0,
            cx: (self.slide_width - 2 * left).max(0),
            cy: self.slide_height,
        }
    }

    /// The text box extent in points, as consumed by the fit estimator.
    pub fn fit_box(&self) -> BoundingBox {
        let frame = self.text_box();
        BoundingBox::new(emu_to_pt(frame.cx), emu_to_pt(frame.cy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_to_emu() {
        assert_eq!(px_to_emu(96), EMU_PER_INCH);
        assert_eq!(px_to_emu(10), 95_250);
        assert_eq!(px_to_emu(0), 0);
    }

    #[test]
    fn test_point_conversions() {
        assert_eq!(emu_to_pt(12_700), 1.0);
        assert_eq!(emu_to_pt(838_200), 66.0);
    }

    #[test]
    fn test_default_text_box() {
        let frame = SlideGeometry::default().text_box();
        assert_eq!(frame.x, 95_250);
        assert_eq!(frame.y, 0);
        assert_eq!(frame.cx, 8_953_500);
        assert_eq!(frame.cy, 6_858_000);
    }

    #[test]
    fn test_default_fit_box_in_points() {
        let bbox = SlideGeometry::default().fit_box();
        assert!((bbox.width_pt - 705.0).abs() < 1e-9, "got {}", bbox.width_pt);
        assert!((bbox.height_pt - 540.0).abs() < 1e-9, "got {}", bbox.height_pt);
    }

    #[test]
    fn test_oversized_padding_clamps_width() {
        let frame = SlideGeometry::with_padding(10_000).text_box();
        assert_eq!(frame.cx, 0);
        assert_eq!(SlideGeometry::with_padding(10_000).fit_box().width_pt, 0.0);
    }
}
