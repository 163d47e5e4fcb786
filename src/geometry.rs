//! Axis-aligned rectangle primitives.
//!
//! Intersection, subtraction (rect minus rect → up to four remainders),
//! clamping, and overlap ratios. Pure functions over `f64` canvas pixels,
//! no rotation and no non-axis-aligned shapes.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Pieces narrower or shorter than this are dropped by [`Rect::subtract`].
const DEGENERATE_EDGE: f64 = 1.0;

/// Axis-aligned rectangle in canvas pixel space.
///
/// `(x, y)` is the top-left corner; `width`/`height` extend right and down.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A square with its top-left corner at `(x, y)`.
    pub const fn square(x: f64, y: f64, size: f64) -> Self {
        Self::new(x, y, size, size)
    }

    /// A square of `size` centered on `(cx, cy)`.
    pub fn square_centered(cx: f64, cy: f64, size: f64) -> Self {
        Self::new(cx - size / 2.0, cy - size / 2.0, size, size)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Center point `(cx, cy)`.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Length of the shorter side.
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Whether all four coordinates are finite and both extents positive.
    pub fn is_usable(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Intersection with `other`, or `None` when they don't overlap.
    ///
    /// Uses strict comparison: rects that only share an edge do not intersect.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if left < right && top < bottom {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    /// Area shared with `other` (0 when disjoint or touching).
    pub fn overlap_area(&self, other: &Rect) -> f64 {
        self.intersect(other).map_or(0.0, |r| r.area())
    }

    /// Overlap area relative to the smaller of the two rects.
    ///
    /// A small rect fully inside a large one yields 1.0 regardless of
    /// argument order. Returns 0 when either rect has no area.
    pub fn overlap_ratio(&self, other: &Rect) -> f64 {
        let smaller = self.area().min(other.area());
        if smaller <= 0.0 {
            return 0.0;
        }
        self.overlap_area(other) / smaller
    }

    /// `self \ cut` as up to four disjoint rects.
    ///
    /// Pieces are ordered top, bottom, left, right of the intersection band.
    /// The top and bottom pieces span the full source width; left and right
    /// span only the band's height. Pieces ≤ 1px on either axis are dropped.
    /// A `cut` that misses the source returns the source unchanged.
    pub fn subtract(&self, cut: &Rect) -> Vec<Rect> {
        let Some(band) = self.intersect(cut) else {
            return Vec::from([*self]);
        };

        let pieces = [
            // Top
            Rect::new(self.x, self.y, self.width, band.y - self.y),
            // Bottom
            Rect::new(
                self.x,
                band.bottom(),
                self.width,
                self.bottom() - band.bottom(),
            ),
            // Left
            Rect::new(self.x, band.y, band.x - self.x, band.height),
            // Right
            Rect::new(band.right(), band.y, self.right() - band.right(), band.height),
        ];

        pieces
            .into_iter()
            .filter(|r| r.width > DEGENERATE_EDGE && r.height > DEGENERATE_EDGE)
            .collect()
    }

    /// Grow outward by `pad` on every side.
    pub fn expand(&self, pad: f64) -> Rect {
        Rect::new(
            self.x - pad,
            self.y - pad,
            self.width + 2.0 * pad,
            self.height + 2.0 * pad,
        )
    }

    /// Shrink inward by `margin` on every side, or `None` if nothing is left.
    pub fn inset(&self, margin: f64) -> Option<Rect> {
        let width = self.width - 2.0 * margin;
        let height = self.height - 2.0 * margin;
        if width > 0.0 && height > 0.0 {
            Some(Rect::new(self.x + margin, self.y + margin, width, height))
        } else {
            None
        }
    }

    /// Translate so the rect lies within `(0, 0, max_w, max_h)`.
    ///
    /// The size is kept; a rect larger than the bounds is pinned to the
    /// top-left edge on that axis.
    pub fn clamp_within(&self, max_w: f64, max_h: f64) -> Rect {
        Rect::new(
            clamp(self.x, 0.0, max_w - self.width),
            clamp(self.y, 0.0, max_h - self.height),
            self.width,
            self.height,
        )
    }

    /// Whether `other` lies entirely inside `self` (edges may touch).
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Clamp `v` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics: when `max < min` the result is
/// `min`.
pub fn clamp(v: f64, min: f64, max: f64) -> f64 {
    if max < min {
        return min;
    }
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}

/// Subtract `cut` from every rect in `rects`.
pub fn subtract_all(rects: &[Rect], cut: &Rect) -> Vec<Rect> {
    rects.iter().flat_map(|r| r.subtract(cut)).collect()
}

/// Sum of the areas of `rects`.
pub fn total_area(rects: &[Rect]) -> f64 {
    rects.iter().map(Rect::area).sum()
}
