//! Row-based shelf free-space model.
//!
//! Items are laid left to right along the sheet length. When the current
//! row is full a new row starts above the tallest item of the previous one.
//! Fast and predictable, but leaves gaps above short items in a row.

use crate::packer::{orientations, Candidate, FitScore, FreeSpace};
use panelnest_core::geometry::EPSILON;
use panelnest_core::{FitHeuristic, Rect};

/// A bin filled row by row.
#[derive(Debug, Clone)]
pub struct ShelfBin {
    bounds: Rect,
    current_x: f64,
    current_y: f64,
    row_height: f64,
    used: Vec<Rect>,
}

impl ShelfBin {
    /// Returns the y coordinate of the open row.
    pub fn row_y(&self) -> f64 {
        self.current_y
    }
}

impl FreeSpace for ShelfBin {
    fn with_heuristic(length: f64, width: f64, _heuristic: FitHeuristic) -> Self {
        Self {
            bounds: Rect::sized(length, width),
            current_x: 0.0,
            current_y: 0.0,
            row_height: 0.0,
            used: Vec::new(),
        }
    }

    fn find_position(&self, length: f64, width: f64, can_rotate: bool) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;

        for (l, w, rotated) in orientations(length, width, can_rotate) {
            // Skip if the piece doesn't fit the sheet at all
            if !self.bounds.fits(l, w) {
                continue;
            }

            let mut place_x = self.current_x;
            let mut place_y = self.current_y;
            let mut row_height = self.row_height;

            // Move to the next row when the current one is full
            if place_x + l > self.bounds.max_x() + EPSILON {
                place_x = self.bounds.x;
                place_y += self.row_height;
                row_height = 0.0;
            }

            if place_y + w > self.bounds.max_y() + EPSILON {
                continue;
            }

            // Prefer the open row, then the unturned piece, then the lowest row
            let candidate = Candidate {
                rect: Rect::new(place_x, place_y, l, w),
                rotated,
                score: FitScore::new(place_y, row_height.max(w)),
            };
            if best.map_or(true, |b| candidate.better_than(&b)) {
                best = Some(candidate);
            }
        }

        best
    }

    fn place(&mut self, candidate: &Candidate) {
        let rect = candidate.rect;
        if rect.y > self.current_y + EPSILON {
            self.current_y = rect.y;
            self.row_height = 0.0;
        }
        self.current_x = rect.max_x();
        self.row_height = self.row_height.max(rect.width);
        self.used.push(rect);
    }

    fn used(&self) -> &[Rect] {
        &self.used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(bin: &mut ShelfBin, l: f64, w: f64, can_rotate: bool) -> Candidate {
        let c = bin.find_position(l, w, can_rotate).unwrap();
        bin.place(&c);
        c
    }

    #[test]
    fn test_fills_row_then_wraps() {
        let mut bin = ShelfBin::with_heuristic(100.0, 100.0, FitHeuristic::BottomLeft);
        let a = place(&mut bin, 60.0, 30.0, false);
        let b = place(&mut bin, 30.0, 20.0, false);
        let c = place(&mut bin, 50.0, 10.0, false);

        assert_eq!((a.rect.x, a.rect.y), (0.0, 0.0));
        assert_eq!((b.rect.x, b.rect.y), (60.0, 0.0));
        // Row is 90 long; next item wraps above the 30 high row.
        assert_eq!((c.rect.x, c.rect.y), (0.0, 30.0));
        assert_eq!(bin.row_y(), 30.0);
    }

    #[test]
    fn test_rotation_keeps_item_in_row() {
        let mut bin = ShelfBin::with_heuristic(100.0, 100.0, FitHeuristic::BottomLeft);
        place(&mut bin, 70.0, 40.0, false);
        // 40 long does not fit the remaining 30; turned it is 30 long.
        let c = place(&mut bin, 40.0, 30.0, true);
        assert!(c.rotated);
        assert_eq!(c.rect.y, 0.0);
    }

    #[test]
    fn test_full_height_rejects() {
        let mut bin = ShelfBin::with_heuristic(100.0, 50.0, FitHeuristic::BottomLeft);
        place(&mut bin, 100.0, 40.0, false);
        assert!(bin.find_position(100.0, 20.0, false).is_none());
    }
}
