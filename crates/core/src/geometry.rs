//! Axis-aligned rectangle geometry.
//!
//! Sheets are laid out with their length along the x axis and their width
//! along the y axis, origin at the sheet corner. All values are millimetres.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tolerance used when comparing millimetre coordinates.
pub const EPSILON: f64 = 1e-9;

/// An axis-aligned rectangle on a sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Minimum x coordinate.
    pub x: f64,
    /// Minimum y coordinate.
    pub y: f64,
    /// Extent along x.
    pub length: f64,
    /// Extent along y.
    pub width: f64,
}

impl Rect {
    /// Creates a new rectangle from its corner and extents.
    pub fn new(x: f64, y: f64, length: f64, width: f64) -> Self {
        Self {
            x,
            y,
            length,
            width,
        }
    }

    /// Creates a rectangle anchored at the origin.
    pub fn sized(length: f64, width: f64) -> Self {
        Self::new(0.0, 0.0, length, width)
    }

    /// Returns the maximum x coordinate.
    pub fn max_x(&self) -> f64 {
        self.x + self.length
    }

    /// Returns the maximum y coordinate.
    pub fn max_y(&self) -> f64 {
        self.y + self.width
    }

    /// Returns the area of the rectangle.
    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Returns true if either extent is zero or negative.
    pub fn is_empty(&self) -> bool {
        self.length <= EPSILON || self.width <= EPSILON
    }

    /// Returns the same rectangle turned by 90°, keeping its corner.
    pub fn rotated(&self) -> Self {
        Self::new(self.x, self.y, self.width, self.length)
    }

    /// Checks whether the interiors of two rectangles overlap.
    ///
    /// Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.max_x() - EPSILON
            && other.x < self.max_x() - EPSILON
            && self.y < other.max_y() - EPSILON
            && other.y < self.max_y() - EPSILON
    }

    /// Checks whether `other` lies entirely within this rectangle.
    pub fn contains(&self, other: &Self) -> bool {
        other.x >= self.x - EPSILON
            && other.y >= self.y - EPSILON
            && other.max_x() <= self.max_x() + EPSILON
            && other.max_y() <= self.max_y() + EPSILON
    }

    /// Returns the overlapping region of two rectangles, if any.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Some(Self::new(
            x,
            y,
            self.max_x().min(other.max_x()) - x,
            self.max_y().min(other.max_y()) - y,
        ))
    }

    /// Returns the bounding box of two rectangles.
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self::new(
            x,
            y,
            self.max_x().max(other.max_x()) - x,
            self.max_y().max(other.max_y()) - y,
        )
    }

    /// Returns true if an item of the given extents fits inside this rectangle.
    pub fn fits(&self, length: f64, width: f64) -> bool {
        length <= self.length + EPSILON && width <= self.width + EPSILON
    }
}

/// Area covered by a set of rectangles, counting overlapping parts once.
pub fn union_area(rects: &[Rect]) -> f64 {
    let mut xs: Vec<f64> = rects
        .iter()
        .filter(|r| !r.is_empty())
        .flat_map(|r| [r.x, r.max_x()])
        .collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();

    let mut area = 0.0;
    for slab in xs.windows(2) {
        let (x0, x1) = (slab[0], slab[1]);
        let mut spans: Vec<(f64, f64)> = rects
            .iter()
            .filter(|r| !r.is_empty() && r.x <= x0 && r.max_x() >= x1)
            .map(|r| (r.y, r.max_y()))
            .collect();
        spans.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut covered = 0.0;
        let mut open: Option<(f64, f64)> = None;
        for (y0, y1) in spans {
            open = match open {
                Some((start, end)) if y0 <= end => Some((start, end.max(y1))),
                Some((start, end)) => {
                    covered += end - start;
                    Some((y0, y1))
                }
                None => Some((y0, y1)),
            };
        }
        if let Some((start, end)) = open {
            covered += end - start;
        }
        area += covered * (x1 - x0);
    }
    area
}
