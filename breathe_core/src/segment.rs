// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Three-region progress bar.
//!
//! An alternative to the continuous border: overall progress is split into a
//! bottom slice, a side slice, and a top slice, each filled independently.

/// Slice boundaries in overall percent.
///
/// The bottom slice covers `[0, bottom_end]`, the sides
/// `[bottom_end, side_end]`, and the top `[side_end, 100]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentLayout {
    /// End of the bottom slice.
    pub bottom_end: f64,
    /// End of the side slice.
    pub side_end: f64,
}

impl SegmentLayout {
    /// 0–10 %, 10–80 %, 80–100 %.
    pub const DEFAULT: Self = Self {
        bottom_end: 10.0,
        side_end: 80.0,
    };

    /// Splits `overall` progress into per-slice fill percentages.
    #[must_use]
    pub fn segment(&self, overall: f64) -> SegmentFill {
        if !overall.is_finite() {
            return SegmentFill::EMPTY;
        }
        SegmentFill {
            bottom: slice(overall, 0.0, self.bottom_end),
            side: slice(overall, self.bottom_end, self.side_end),
            top: slice(overall, self.side_end, 100.0),
        }
    }
}

impl Default for SegmentLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Per-slice fill, each in `[0, 100]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SegmentFill {
    /// Bottom slice fill.
    pub bottom: f64,
    /// Side slice fill (both sides grow together).
    pub side: f64,
    /// Top slice fill.
    pub top: f64,
}

impl SegmentFill {
    /// Nothing filled.
    pub const EMPTY: Self = Self {
        bottom: 0.0,
        side: 0.0,
        top: 0.0,
    };
}

/// Splits `overall` progress with the default layout.
#[must_use]
pub fn segment(overall: f64) -> SegmentFill {
    SegmentLayout::DEFAULT.segment(overall)
}

fn slice(overall: f64, start: f64, end: f64) -> f64 {
    let span = end - start;
    if overall <= start || span <= 0.0 {
        return 0.0;
    }
    ((overall - start) / span * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn zero_is_empty() {
        assert_eq!(segment(0.0), SegmentFill::EMPTY);
    }

    #[test]
    fn bottom_fills_first() {
        let f = segment(5.0);
        assert!(close(f.bottom, 50.0), "{f:?}");
        assert_eq!(f.side, 0.0);
        assert_eq!(f.top, 0.0);
    }

    #[test]
    fn side_starts_after_bottom() {
        let f = segment(10.0);
        assert_eq!(f.bottom, 100.0);
        assert_eq!(f.side, 0.0, "side is zero until overall enters its slice");

        let f = segment(45.0);
        assert_eq!(f.bottom, 100.0);
        assert!(close(f.side, 50.0), "{f:?}");
        assert_eq!(f.top, 0.0);
    }

    #[test]
    fn full_progress_fills_everything() {
        let f = segment(100.0);
        assert_eq!(
            f,
            SegmentFill {
                bottom: 100.0,
                side: 100.0,
                top: 100.0
            }
        );
        assert!(close(segment(90.0).top, 50.0));
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(segment(-5.0), SegmentFill::EMPTY);
        assert_eq!(segment(140.0).top, 100.0);
        assert_eq!(segment(f64::NAN), SegmentFill::EMPTY);
    }

    #[test]
    fn custom_layout() {
        let layout = SegmentLayout {
            bottom_end: 25.0,
            side_end: 75.0,
        };
        let f = layout.segment(50.0);
        assert_eq!(f.bottom, 100.0);
        assert!(close(f.side, 50.0));
    }
}
