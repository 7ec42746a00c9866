//! Maximal-rectangles free-space model.
//!
//! The bin keeps every maximal empty rectangle. Placing an item splits each
//! free rectangle it touches into up to four remainders, then drops any
//! remainder contained in another one. Free rectangles overlap each other,
//! which lets the model find positions a guillotine split would miss.

use crate::packer::{orientations, Candidate, FitScore, FreeSpace};
use panelnest_core::geometry::EPSILON;
use panelnest_core::{FitHeuristic, Rect};

/// A bin tracked by its maximal free rectangles.
#[derive(Debug, Clone)]
pub struct MaxRectsBin {
    heuristic: FitHeuristic,
    free: Vec<Rect>,
    used: Vec<Rect>,
}

impl MaxRectsBin {
    /// Returns the current maximal free rectangles.
    pub fn free_rects(&self) -> &[Rect] {
        &self.free
    }
}

impl FreeSpace for MaxRectsBin {
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
        subtract_rect(&mut self.free, &candidate.rect);
        prune_contained(&mut self.free);
        self.used.push(candidate.rect);
    }

    fn used(&self) -> &[Rect] {
        &self.used
    }
}

/// Removes `used` from a set of free rectangles, keeping the maximal remainders.
pub fn subtract_rect(free: &mut Vec<Rect>, used: &Rect) {
    let mut next = Vec::with_capacity(free.len() + 4);
    for f in free.drain(..) {
        if !f.overlaps(used) {
            next.push(f);
            continue;
        }
        if used.x > f.x + EPSILON {
            next.push(Rect::new(f.x, f.y, used.x - f.x, f.width));
        }
        if used.max_x() < f.max_x() - EPSILON {
            next.push(Rect::new(
                used.max_x(),
                f.y,
                f.max_x() - used.max_x(),
                f.width,
            ));
        }
        if used.y > f.y + EPSILON {
            next.push(Rect::new(f.x, f.y, f.length, used.y - f.y));
        }
        if used.max_y() < f.max_y() - EPSILON {
            next.push(Rect::new(
                f.x,
                used.max_y(),
                f.length,
                f.max_y() - used.max_y(),
            ));
        }
    }
    *free = next;
}

/// Drops free rectangles contained in another one; of two equal rectangles the first is kept.
pub fn prune_contained(free: &mut Vec<Rect>) {
    let mut keep = vec![true; free.len()];
    for i in 0..free.len() {
        if !keep[i] {
            continue;
        }
        for j in 0..free.len() {
            if i == j || !keep[j] {
                continue;
            }
            if free[i].contains(&free[j]) {
                keep[j] = false;
            }
        }
    }
    let mut flags = keep.into_iter();
    free.retain(|_| flags.next().unwrap_or(false));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_item_goes_to_corner() {
        let bin = MaxRectsBin::with_heuristic(2440.0, 1220.0, FitHeuristic::BestAreaFit);
        let c = bin.find_position(604.0, 404.0, true).unwrap();
        assert_eq!(c.rect.x, 0.0);
        assert_eq!(c.rect.y, 0.0);
    }

    #[test]
    fn test_area_tie_keeps_orientation() {
        // Both orientations leave the same area in an empty sheet
        let bin = MaxRectsBin::with_heuristic(2440.0, 1220.0, FitHeuristic::BestAreaFit);
        let c = bin.find_position(604.0, 404.0, true).unwrap();
        assert!(!c.rotated);
        assert_eq!((c.rect.length, c.rect.width), (604.0, 404.0));
    }

    #[test]
    fn test_split_produces_two_maximal_rects() {
        let mut bin = MaxRectsBin::with_heuristic(100.0, 100.0, FitHeuristic::BestAreaFit);
        let c = bin.find_position(40.0, 30.0, false).unwrap();
        bin.place(&c);
        let free = bin.free_rects();
        assert_eq!(free.len(), 2);
        assert!(free.contains(&Rect::new(40.0, 0.0, 60.0, 100.0)));
        assert!(free.contains(&Rect::new(0.0, 30.0, 100.0, 70.0)));
        assert_eq!(bin.used().len(), 1);
    }

    #[test]
    fn test_rotation_used_when_needed() {
        let bin = MaxRectsBin::with_heuristic(100.0, 50.0, FitHeuristic::BestShortSideFit);
        let c = bin.find_position(40.0, 90.0, true).unwrap();
        assert!(c.rotated);
        assert_eq!(c.rect.length, 90.0);
        assert!(bin.find_position(40.0, 90.0, false).is_none());
    }

    #[test]
    fn test_full_bin_rejects() {
        let mut bin = MaxRectsBin::with_heuristic(100.0, 100.0, FitHeuristic::BestAreaFit);
        let c = bin.find_position(100.0, 100.0, false).unwrap();
        bin.place(&c);
        assert!(bin.free_rects().is_empty());
        assert!(bin.find_position(1.0, 1.0, true).is_none());
    }

    #[test]
    fn test_prune_keeps_one_of_duplicates() {
        let mut free = vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(2.0, 2.0, 3.0, 3.0),
        ];
        prune_contained(&mut free);
        assert_eq!(free, vec![Rect::new(0.0, 0.0, 10.0, 10.0)]);
    }
}
