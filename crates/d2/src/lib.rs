//! # Panelnest 2D
//!
//! Kerf-aware sheet nesting for rectangular furniture panels.
//!
//! Panels are expanded into one piece per unit of quantity, bucketed by
//! material and thickness, and each bucket is packed onto stock sheets of a
//! registered size. Every piece is inflated by the saw kerf before packing,
//! so the layouts leave room for the blade. Leftover regions are reported as
//! offcuts, and the reusable ones are collected on the result.
//!
//! ## Pipeline
//!
//! 1. [`expand_panels`]: one [`PlacementUnit`] per physical piece
//! 2. [`partition_groups`]: one [`PanelGroup`] per (material, thickness)
//! 3. [`RectPacker`]: pieces to sheets, per group (in parallel)
//! 4. [`OffcutFinder`]: leftover stock per sheet
//! 5. [`aggregate`]: totals and waste across all sheets
//!
//! ## Quick Start
//!
//! ```rust
//! use panelnest_d2::{GrainDirection, NestingConfig, Panel, SheetNester};
//!
//! let panels = vec![
//!     Panel::new("SIDE", 720.0, 560.0, 18.0, "BWP plywood")
//!         .with_name("Carcass side")
//!         .with_quantity(2)
//!         .with_grain(GrainDirection::Length),
//!     Panel::new("SHELF", 764.0, 540.0, 18.0, "BWP plywood").with_quantity(3),
//! ];
//!
//! let nester = SheetNester::new(NestingConfig::new().with_sheet_size("8x4"));
//! let result = nester.nest(&panels, Some("wardrobe-01")).unwrap();
//!
//! assert_eq!(result.placed_count(), 5);
//! println!(
//!     "{} sheets, waste {}, {} reusable offcuts",
//!     result.total_sheets,
//!     result.waste_percent_string(),
//!     result.reusable_offcuts.len()
//! );
//! ```
//!
//! ## Strategies
//!
//! | Strategy | Layouts | Notes |
//! |----------|---------|-------|
//! | `MaxRects` | Dense, may need non-through cuts | Default, best-area-fit |
//! | `Guillotine` | Edge-to-edge cuts only | Panel-saw friendly |
//! | `Shelf` | Rows | Fastest, most waste |
//!
//! A custom algorithm plugs in through [`RectPacker`] and
//! [`SheetNester::with_packer`].

pub mod aggregate;
pub mod expand;
pub mod guillotine;
pub mod maxrects;
pub mod nester;
pub mod offcut;
pub mod packer;
pub mod shelf;

// Re-exports
pub use aggregate::aggregate;
pub use expand::{expand_panels, partition_groups, GroupKey, PanelGroup, PlacementUnit};
pub use guillotine::GuillotineBin;
pub use maxrects::MaxRectsBin;
pub use nester::{nest_panels, SheetNester};
pub use offcut::{offcut_finder, EdgeStripOffcuts, MaximalRectOffcuts, OffcutFinder, ReuseThreshold};
pub use packer::{
    packer_for, Candidate, FitScore, FreeSpace, GreedyPacker, PackItem, PackOutcome, PackedItem,
    RectPacker,
};
pub use panelnest_core::{
    EdgeBanding, Error, FitHeuristic, GrainDirection, GrainPolicy, GroupSummary, NestingConfig,
    NestingResult, NestingSummary, Offcut, OffcutStrategy, PackingStrategy, Panel, PanelId,
    PlacedPanel, Rect, Result, SheetLayout, SheetRegistry, SheetSize,
};
pub use shelf::ShelfBin;
