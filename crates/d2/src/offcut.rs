//! Leftover stock detection.
//!
//! Offcuts are inventory hints, not a cutting plan. Two finders are
//! provided: [`EdgeStripOffcuts`] reports the strip to the right of the used
//! extent and the strip above it; [`MaximalRectOffcuts`] reports every
//! maximal empty rectangle left between the pieces.

use crate::maxrects::{prune_contained, subtract_rect};
use panelnest_core::{NestingConfig, Offcut, OffcutStrategy, PlacedPanel, Rect, SheetSize};

/// Locates leftover regions on one packed sheet.
pub trait OffcutFinder: Send + Sync {
    /// Returns the offcuts of a sheet, given its kerf-inflated placements.
    fn find_offcuts(
        &self,
        sheet_index: usize,
        sheet: SheetSize,
        placements: &[PlacedPanel],
        kerf_mm: f64,
    ) -> Vec<Offcut>;
}

/// Minimum dimensions for an offcut to be worth keeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReuseThreshold {
    /// Minimum extent along the sheet length.
    pub min_length_mm: f64,
    /// Minimum extent along the sheet width.
    pub min_width_mm: f64,
}

impl ReuseThreshold {
    /// Takes the thresholds from a configuration.
    pub fn from_config(config: &NestingConfig) -> Self {
        Self {
            min_length_mm: config.min_offcut_length_mm,
            min_width_mm: config.min_offcut_width_mm,
        }
    }

    fn offcut(&self, sheet_index: usize, rect: Rect) -> Offcut {
        Offcut::from_rect(sheet_index, rect, self.min_length_mm, self.min_width_mm)
    }
}

/// An unused sheet is one reusable offcut.
fn whole_sheet(sheet_index: usize, sheet: SheetSize) -> Vec<Offcut> {
    let mut offcut = Offcut::from_rect(sheet_index, sheet.rect(), 0.0, 0.0);
    offcut.reusable = true;
    vec![offcut]
}

/// Right strip and top strip beyond the used extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStripOffcuts {
    threshold: ReuseThreshold,
}

impl EdgeStripOffcuts {
    /// Creates the finder.
    pub fn new(threshold: ReuseThreshold) -> Self {
        Self { threshold }
    }
}

impl OffcutFinder for EdgeStripOffcuts {
    fn find_offcuts(
        &self,
        sheet_index: usize,
        sheet: SheetSize,
        placements: &[PlacedPanel],
        kerf_mm: f64,
    ) -> Vec<Offcut> {
        if placements.is_empty() {
            return whole_sheet(sheet_index, sheet);
        }

        let (max_x, max_y) = placements
            .iter()
            .map(|p| p.footprint(kerf_mm))
            .fold((0.0_f64, 0.0_f64), |(mx, my), r| {
                (mx.max(r.max_x()), my.max(r.max_y()))
            });
        let max_x = max_x.min(sheet.length_mm);
        let max_y = max_y.min(sheet.width_mm);

        // The right strip takes the full sheet width; the top strip stops at
        // the used extent so the corner is not counted twice.
        let right = Rect::new(max_x, 0.0, sheet.length_mm - max_x, sheet.width_mm);
        let top = Rect::new(0.0, max_y, max_x, sheet.width_mm - max_y);

        [right, top]
            .into_iter()
            .filter(|r| !r.is_empty())
            .map(|r| self.threshold.offcut(sheet_index, r))
            .collect()
    }
}

/// Every maximal empty rectangle on the sheet.
///
/// The regions overlap one another, so their areas must not be summed;
/// [`panelnest_core::union_area`] gives the area they cover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaximalRectOffcuts {
    threshold: ReuseThreshold,
}

impl MaximalRectOffcuts {
    /// Creates the finder.
    pub fn new(threshold: ReuseThreshold) -> Self {
        Self { threshold }
    }
}

impl OffcutFinder for MaximalRectOffcuts {
    fn find_offcuts(
        &self,
        sheet_index: usize,
        sheet: SheetSize,
        placements: &[PlacedPanel],
        kerf_mm: f64,
    ) -> Vec<Offcut> {
        if placements.is_empty() {
            return whole_sheet(sheet_index, sheet);
        }

        let bounds = sheet.rect();
        let mut free = vec![bounds];
        for p in placements {
            let footprint = p.footprint(kerf_mm);
            // Clip the clearance strip at the sheet edge
            if let Some(clipped) = footprint.intersection(&bounds) {
                subtract_rect(&mut free, &clipped);
            }
        }
        prune_contained(&mut free);

        free.sort_by(|a, b| {
            b.area()
                .total_cmp(&a.area())
                .then(a.y.total_cmp(&b.y))
                .then(a.x.total_cmp(&b.x))
        });
        free.into_iter()
            .filter(|r| !r.is_empty())
            .map(|r| self.threshold.offcut(sheet_index, r))
            .collect()
    }
}

/// Builds the finder for a configuration.
pub fn offcut_finder(config: &NestingConfig) -> Box<dyn OffcutFinder> {
    let threshold = ReuseThreshold::from_config(config);
    match config.offcut_strategy {
        OffcutStrategy::EdgeStrips => Box::new(EdgeStripOffcuts::new(threshold)),
        OffcutStrategy::MaximalRectangles => Box::new(MaximalRectOffcuts::new(threshold)),
    }
}
