//! Guillotine free-space model.
//!
//! Free space is a set of disjoint rectangles. An item is placed in the
//! corner of one of them and the remainder is cut in two by a single
//! edge-to-edge cut, so every layout can be reproduced on a panel saw.

use crate::packer::{orientations, Candidate, FitScore, FreeSpace};
use panelnest_core::{FitHeuristic, Rect};

/// A bin tracked by disjoint guillotine free rectangles.
#[derive(Debug, Clone)]
pub struct GuillotineBin {
    heuristic: FitHeuristic,
    free: Vec<Rect>,
    used: Vec<Rect>,
}

impl GuillotineBin {
    /// Returns the current free rectangles.
    pub fn free_rects(&self) -> &[Rect] {
        &self.free
    }

    /// Splits `free` around an item placed in its corner.
    ///
    /// The cut runs along the axis that leaves the single largest remainder.
    fn split(free: &Rect, placed: &Rect) -> [Rect; 2] {
        let rest_x = free.length - placed.length;
        let rest_y = free.width - placed.width;

        // Cut across x first: right part spans the full free width.
        let vertical = [
            Rect::new(placed.max_x(), free.y, rest_x, free.width),
            Rect::new(free.x, placed.max_y(), placed.length, rest_y),
        ];
        // Cut across y first: top part spans the full free length.
        let horizontal = [
            Rect::new(free.x, placed.max_y(), free.length, rest_y),
            Rect::new(placed.max_x(), free.y, rest_x, placed.width),
        ];

        let largest = |parts: &[Rect; 2]| parts[0].area().max(parts[1].area());
        if largest(&horizontal) > largest(&vertical) {
            horizontal
        } else {
            vertical
        }
    }
}

impl FreeSpace for GuillotineBin {
    fn with_heuristic(length: f64, width: f64, heuristic: FitHeuristic) -> Self {
        Self {
            heuristic,
            free: vec![Rect::sized(length, width)],
            used: Vec::new(),
        }
    }

    fn find_position(&self, length: f64, width: f64, can_rotate: bool) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for free in &self.free {
            for (l, w, rotated) in orientations(length, width, can_rotate) {
                if !free.fits(l, w) {
                    continue;
                }
                let candidate = Candidate {
                    rect: Rect::new(free.x, free.y, l, w),
                    rotated,
                    score: FitScore::for_heuristic(self.heuristic, free, l, w),
                };
                if best.map_or(true, |b| candidate.better_than(&b)) {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    fn place(&mut self, candidate: &Candidate) {
        let placed = candidate.rect;
        // Candidates always sit at the corner of a free rectangle.
        if let Some(idx) = self
            .free
            .iter()
            .position(|f| f.x == placed.x && f.y == placed.y && f.contains(&placed))
        {
            let free = self.free.remove(idx);
            for part in Self::split(&free, &placed) {
                if !part.is_empty() {
                    self.free.push(part);
                }
            }
        }
        self.used.push(placed);
    }

    fn used(&self) -> &[Rect] {
        &self.used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_largest_remainder() {
        let mut bin = GuillotineBin::with_heuristic(100.0, 100.0, FitHeuristic::BestAreaFit);
        let c = bin.find_position(80.0, 20.0, false).unwrap();
        bin.place(&c);

        let free = bin.free_rects();
        assert_eq!(free.len(), 2);
        // Horizontal cut leaves a full-length 100 x 80 strip on top.
        assert!(free.contains(&Rect::new(0.0, 20.0, 100.0, 80.0)));
        assert!(free.contains(&Rect::new(80.0, 0.0, 20.0, 20.0)));
    }

    #[test]
    fn test_free_rects_stay_disjoint() {
        let mut bin = GuillotineBin::with_heuristic(500.0, 300.0, FitHeuristic::BestShortSideFit);
        for (l, w) in [(120.0, 80.0), (200.0, 100.0), (90.0, 90.0), (60.0, 150.0)] {
            let c = bin.find_position(l, w, true).unwrap();
            bin.place(&c);
        }
        let free = bin.free_rects();
        for (i, a) in free.iter().enumerate() {
            for b in &free[i + 1..] {
                assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
            }
            for u in bin.used() {
                assert!(!a.overlaps(u));
            }
        }
    }

    #[test]
    fn test_exact_fit_consumes_free_rect() {
        let mut bin = GuillotineBin::with_heuristic(50.0, 50.0, FitHeuristic::BottomLeft);
        let c = bin.find_position(50.0, 50.0, true).unwrap();
        bin.place(&c);
        assert!(bin.free_rects().is_empty());
    }
}
