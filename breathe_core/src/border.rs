// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rounded-border progress geometry.
//!
//! The continuous indicator traces the outline of the video frame. It is
//! drawn as two mirrored open paths that both start at the bottom centre and
//! meet at the top centre, so progress grows up both sides at once:
//!
//! ```text
//!        ┌──────◄ end ►──────┐
//!        │                   │
//!   left │                   │ right
//!        │                   │
//!        └──────◄start►──────┘
//! ```
//!
//! Each half is revealed with a dash pattern: `stroke-dasharray` set to the
//! half's length and `stroke-dashoffset` shrinking from the full length (empty)
//! to zero (complete).

use kurbo::{BezPath, Point, Shape, Size};

/// Accuracy passed to kurbo's arc-length computation, in view-box units.
const LENGTH_ACCURACY: f64 = 1e-3;

/// The two halves of the rounded-border indicator.
#[derive(Clone, Debug)]
pub struct BorderPath {
    size: Size,
    corner_radius: f64,
    left: BezPath,
    right: BezPath,
    length: f64,
}

impl BorderPath {
    /// View-box size of the video frame.
    pub const DEFAULT_SIZE: Size = Size::new(350.0, 525.0);
    /// Corner radius of the video frame.
    pub const DEFAULT_CORNER_RADIUS: f64 = 18.0;

    /// Builds both halves for a frame of `size` with rounded corners.
    ///
    /// The radius is clamped to `[0, min(width, height) / 2]`. Negative or
    /// non-finite sizes are treated as empty.
    #[must_use]
    pub fn new(size: Size, corner_radius: f64) -> Self {
        let size = Size::new(sanitize(size.width), sanitize(size.height));
        let max_radius = size.width.min(size.height) / 2.0;
        let corner_radius = sanitize(corner_radius).min(max_radius);

        let right = half(size, corner_radius, |x| x);
        let left = half(size, corner_radius, |x| size.width - x);
        let length = right.perimeter(LENGTH_ACCURACY);

        Self {
            size,
            corner_radius,
            left,
            right,
            length,
        }
    }

    /// Returns the frame size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the effective (clamped) corner radius.
    #[must_use]
    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    /// Returns the left half, bottom centre to top centre.
    #[must_use]
    pub fn left(&self) -> &BezPath {
        &self.left
    }

    /// Returns the right half, bottom centre to top centre.
    #[must_use]
    pub fn right(&self) -> &BezPath {
        &self.right
    }

    /// Returns the arc length of one half. Both halves have the same length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns the `stroke-dashoffset` that reveals `progress` percent of each
    /// half.
    ///
    /// Progress is clamped to `[0, 100]`; non-finite progress shows nothing.
    #[must_use]
    pub fn dash_offset(&self, progress: f64) -> f64 {
        if !progress.is_finite() {
            return self.length;
        }
        self.length * (1.0 - progress.clamp(0.0, 100.0) / 100.0)
    }

    /// Returns SVG path data for the `(left, right)` halves.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn svg_data(&self) -> (alloc::string::String, alloc::string::String) {
        (self.left.to_svg(), self.right.to_svg())
    }
}

impl Default for BorderPath {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE, Self::DEFAULT_CORNER_RADIUS)
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Builds the right half and maps its x coordinates through `mirror`.
fn half(size: Size, r: f64, mirror: impl Fn(f64) -> f64) -> BezPath {
    let Size {
        width: w,
        height: h,
    } = size;
    let p = |x: f64, y: f64| Point::new(mirror(x), y);

    let mut path = BezPath::new();
    path.move_to(p(w / 2.0, h));
    path.line_to(p(w - r, h));
    // Degenerate quads have no defined arc length.
    if r > 0.0 {
        path.quad_to(p(w, h), p(w, h - r));
    }
    path.line_to(p(w, r));
    if r > 0.0 {
        path.quad_to(p(w, 0.0), p(w - r, 0.0));
    }
    path.line_to(p(w / 2.0, 0.0));
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::ParamCurve;

    #[test]
    fn square_corners_length_is_half_perimeter() {
        let b = BorderPath::new(Size::new(350.0, 525.0), 0.0);
        assert!(
            (b.length() - (350.0 + 525.0)).abs() < 1e-6,
            "length {}",
            b.length()
        );
    }

    #[test]
    fn rounded_length_within_corner_bounds() {
        let b = BorderPath::default();
        let straight = 350.0 + 525.0 - 4.0 * 18.0;
        // Each quadratic corner is longer than its chord and shorter than its
        // control polygon.
        let chord = 18.0 * core::f64::consts::SQRT_2;
        let len = b.length();
        assert!(len > straight + 2.0 * chord, "length {len}");
        assert!(len < straight + 4.0 * 18.0, "length {len}");
    }

    #[test]
    fn halves_mirror_each_other() {
        let b = BorderPath::default();
        let left = b.left().perimeter(LENGTH_ACCURACY);
        assert!((left - b.length()).abs() < 1e-6);

        let lb = b.left().bounding_box();
        let rb = b.right().bounding_box();
        assert_eq!(lb.x0, 0.0);
        assert_eq!(lb.x1, 175.0);
        assert_eq!(rb.x0, 175.0);
        assert_eq!(rb.x1, 350.0);
    }

    #[test]
    fn both_halves_start_bottom_centre() {
        let b = BorderPath::default();
        for half in [b.left(), b.right()] {
            let start = half.segments().next().map(|s| s.start());
            assert_eq!(start, Some(Point::new(175.0, 525.0)));
            let end = half.segments().last().map(|s| s.end());
            assert_eq!(end, Some(Point::new(175.0, 0.0)));
        }
    }

    #[test]
    fn dash_offset_runs_from_full_to_zero() {
        let b = BorderPath::default();
        assert_eq!(b.dash_offset(0.0), b.length());
        assert_eq!(b.dash_offset(100.0), 0.0);
        assert!((b.dash_offset(50.0) - b.length() / 2.0).abs() < 1e-9);
        assert_eq!(b.dash_offset(-10.0), b.length());
        assert_eq!(b.dash_offset(f64::NAN), b.length());
    }

    #[test]
    fn radius_is_clamped() {
        let b = BorderPath::new(Size::new(100.0, 40.0), 500.0);
        assert_eq!(b.corner_radius(), 20.0);
        let b = BorderPath::new(Size::new(100.0, 40.0), -3.0);
        assert_eq!(b.corner_radius(), 0.0);
    }

    #[cfg(feature = "std")]
    #[test]
    fn svg_data_starts_with_move() {
        let (left, right) = BorderPath::default().svg_data();
        assert!(left.starts_with("M175"), "{left}");
        assert!(right.starts_with("M175"), "{right}");
    }
}
