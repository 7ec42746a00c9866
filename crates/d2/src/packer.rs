//! Pluggable rectangle packing.
//!
//! A [`RectPacker`] assigns rectangles to identical bins. The engine hands it
//! kerf-inflated piece sizes and the sheet size; it never looks at panels.
//! [`GreedyPacker`] is the built-in multi-bin driver: it walks the items in
//! area-descending order and asks every open bin (a [`FreeSpace`] model) for
//! its best position, opening a new bin when none can host the item.

use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::guillotine::GuillotineBin;
use crate::maxrects::MaxRectsBin;
use crate::shelf::ShelfBin;
use panelnest_core::geometry::EPSILON;
use panelnest_core::{Error, FitHeuristic, PackingStrategy, Rect, Result};

/// A rectangle to pack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackItem {
    /// Caller-side index, echoed back in [`PackedItem::id`].
    pub id: usize,
    /// Extent along the bin length when not rotated.
    pub length: f64,
    /// Extent along the bin width when not rotated.
    pub width: f64,
    /// Whether the packer may turn the item 90°.
    pub can_rotate: bool,
}

impl PackItem {
    /// Returns the item area.
    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Returns true if the item fits an empty bin in an allowed orientation.
    pub fn fits_in(&self, bin: &Rect) -> bool {
        bin.fits(self.length, self.width) || (self.can_rotate && bin.fits(self.width, self.length))
    }
}

/// Where an item ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackedItem {
    /// The [`PackItem::id`] of the item.
    pub id: usize,
    /// Bin index (0-based).
    pub bin: usize,
    /// Corner x within the bin.
    pub x: f64,
    /// Corner y within the bin.
    pub y: f64,
    /// Whether the item was turned 90°.
    pub rotated: bool,
}

/// Output of a packing run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackOutcome {
    /// Number of bins opened.
    pub bins_used: usize,
    /// Placements in insertion order.
    pub items: Vec<PackedItem>,
}

/// A 2D bin packing algorithm.
///
/// Implementations must never overlap two items in the same bin and must
/// place every item that fits an empty bin, using at most `max_bins` bins.
pub trait RectPacker: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Packs `items` into bins of `bin_length` × `bin_width`.
    fn pack(
        &self,
        bin_length: f64,
        bin_width: f64,
        items: &[PackItem],
        max_bins: usize,
    ) -> Result<PackOutcome>;
}

/// Lexicographic placement score; lower is better.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitScore {
    /// Primary criterion.
    pub primary: f64,
    /// Tie breaker.
    pub secondary: f64,
}

impl FitScore {
    /// Creates a new score.
    pub fn new(primary: f64, secondary: f64) -> Self {
        Self { primary, secondary }
    }

    /// Returns true if this score is strictly better than `other`.
    pub fn better_than(&self, other: &Self) -> bool {
        if self.primary < other.primary - EPSILON {
            return true;
        }
        (self.primary - other.primary).abs() <= EPSILON
            && self.secondary < other.secondary - EPSILON
    }

    /// Scores an item of `length` × `width` placed at the corner of `free`.
    pub fn for_heuristic(heuristic: FitHeuristic, free: &Rect, length: f64, width: f64) -> Self {
        let leftover_x = free.length - length;
        let leftover_y = free.width - width;
        let short = leftover_x.min(leftover_y);
        let long = leftover_x.max(leftover_y);
        match heuristic {
            FitHeuristic::BestAreaFit => Self::new(free.area() - length * width, short),
            FitHeuristic::BestShortSideFit => Self::new(short, long),
            FitHeuristic::BestLongSideFit => Self::new(long, short),
            FitHeuristic::BottomLeft => Self::new(free.y + width, free.x),
        }
    }
}

/// A candidate position inside one bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// The occupied rectangle (already in placed orientation).
    pub rect: Rect,
    /// Whether the item is turned.
    pub rotated: bool,
    /// Score of the position.
    pub score: FitScore,
}

impl Candidate {
    /// Returns true if this candidate should replace `other`.
    ///
    /// The item is only turned when that strictly improves the primary
    /// score; on a primary tie the unrotated orientation wins before the
    /// secondary score is consulted.
    pub fn better_than(&self, other: &Self) -> bool {
        let (a, b) = (&self.score, &other.score);
        if a.primary < b.primary - EPSILON {
            return true;
        }
        if a.primary > b.primary + EPSILON {
            return false;
        }
        if self.rotated != other.rotated {
            return !self.rotated;
        }
        a.secondary < b.secondary - EPSILON
    }
}

/// Free-space model of a single bin.
pub trait FreeSpace {
    /// Creates an empty bin.
    fn with_heuristic(length: f64, width: f64, heuristic: FitHeuristic) -> Self;

    /// Finds the best position for an item, if it fits.
    fn find_position(&self, length: f64, width: f64, can_rotate: bool) -> Option<Candidate>;

    /// Commits a candidate returned by [`FreeSpace::find_position`].
    fn place(&mut self, candidate: &Candidate);

    /// Rectangles occupied so far.
    fn used(&self) -> &[Rect];
}

/// Returns the orientations to try for an item: `(length, width, rotated)`.
pub(crate) fn orientations(length: f64, width: f64, can_rotate: bool) -> Vec<(f64, f64, bool)> {
    let mut out = vec![(length, width, false)];
    if can_rotate && (length - width).abs() > EPSILON {
        out.push((width, length, true));
    }
    out
}

/// Multi-bin driver around a [`FreeSpace`] model.
pub struct GreedyPacker<F> {
    heuristic: FitHeuristic,
    name: &'static str,
    _bin: PhantomData<fn() -> F>,
}

impl<F: FreeSpace> GreedyPacker<F> {
    /// Creates a packer using the given fit heuristic.
    pub fn new(name: &'static str, heuristic: FitHeuristic) -> Self {
        Self {
            heuristic,
            name,
            _bin: PhantomData,
        }
    }

    /// Returns item indices sorted by area, largest first; ties keep input order.
    fn insertion_order(items: &[PackItem]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..items.len()).collect();
        order.sort_by(|&a, &b| {
            items[b]
                .area()
                .partial_cmp(&items[a].area())
                .unwrap_or(Ordering::Equal)
        });
        order
    }
}

impl<F: FreeSpace> RectPacker for GreedyPacker<F> {
    fn name(&self) -> &str {
        self.name
    }

    fn pack(
        &self,
        bin_length: f64,
        bin_width: f64,
        items: &[PackItem],
        max_bins: usize,
    ) -> Result<PackOutcome> {
        let mut bins: Vec<F> = Vec::new();
        let mut placed = Vec::with_capacity(items.len());

        for idx in Self::insertion_order(items) {
            let item = &items[idx];

            let mut best: Option<(usize, Candidate)> = None;
            for (bin_idx, bin) in bins.iter().enumerate() {
                if let Some(candidate) = bin.find_position(item.length, item.width, item.can_rotate)
                {
                    let is_better = match &best {
                        None => true,
                        Some((_, current)) => candidate.better_than(current),
                    };
                    if is_better {
                        best = Some((bin_idx, candidate));
                    }
                }
            }

            let (bin_idx, candidate) = match best {
                Some(found) => found,
                None => {
                    if bins.len() >= max_bins {
                        return Err(Error::Internal(format!(
                            "{} packer exceeded {} bins at item {}",
                            self.name, max_bins, item.id
                        )));
                    }
                    let bin = F::with_heuristic(bin_length, bin_width, self.heuristic);
                    let candidate = bin
                        .find_position(item.length, item.width, item.can_rotate)
                        .ok_or_else(|| {
                            Error::Internal(format!(
                                "item {} ({} x {}) does not fit an empty {} x {} bin",
                                item.id, item.length, item.width, bin_length, bin_width
                            ))
                        })?;
                    bins.push(bin);
                    (bins.len() - 1, candidate)
                }
            };

            bins[bin_idx].place(&candidate);
            placed.push(PackedItem {
                id: item.id,
                bin: bin_idx,
                x: candidate.rect.x,
                y: candidate.rect.y,
                rotated: candidate.rotated,
            });
        }

        Ok(PackOutcome {
            bins_used: bins.len(),
            items: placed,
        })
    }
}

/// Builds the packer for a configured strategy.
pub fn packer_for(strategy: PackingStrategy) -> Box<dyn RectPacker> {
    match strategy {
        PackingStrategy::MaxRects(heuristic) => {
            Box::new(GreedyPacker::<MaxRectsBin>::new("maxrects", heuristic))
        }
        PackingStrategy::Guillotine(heuristic) => {
            Box::new(GreedyPacker::<GuillotineBin>::new("guillotine", heuristic))
        }
        PackingStrategy::Shelf => Box::new(GreedyPacker::<ShelfBin>::new(
            "shelf",
            FitHeuristic::BottomLeft,
        )),
    }
}
