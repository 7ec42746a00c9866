//! # Panelnest Core
//!
//! Core types shared by the panel nesting engine.
//!
//! This crate holds the data model (panels, placements, offcuts, sheet
//! layouts, results), the sheet-size registry, configuration and errors.
//! The packing algorithms live in `panelnest-d2`.
//!
//! ## Core Components
//!
//! - **Input**: [`Panel`], [`GrainDirection`], [`EdgeBanding`]
//! - **Stock**: [`SheetRegistry`], [`SheetSize`]
//! - **Configuration**: [`NestingConfig`], [`GrainPolicy`], [`PackingStrategy`]
//! - **Output**: [`NestingResult`], [`SheetLayout`], [`PlacedPanel`], [`Offcut`]
//!
//! ## Standard Sheets
//!
//! | Name  | Length × width (mm) |
//! |-------|---------------------|
//! | `8x4` | 2440 × 1220         |
//! | `7x4` | 2135 × 1220         |
//! | `6x4` | 1830 × 1220         |
//! | `8x3` | 2440 × 915          |
//!
//! ## Configuration
//!
//! ```rust
//! use panelnest_core::{GrainPolicy, NestingConfig};
//!
//! let config = NestingConfig::new()
//!     .with_sheet_size("7x4")
//!     .with_kerf(3.2)
//!     .with_grain_policy(GrainPolicy::Enforce);
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod config;
pub mod error;
pub mod geometry;
pub mod panel;
pub mod result;
pub mod sheet;

// Re-exports
pub use config::{FitHeuristic, GrainPolicy, NestingConfig, OffcutStrategy, PackingStrategy};
pub use error::{Error, Result};
pub use geometry::{union_area, Rect};
pub use panel::{EdgeBanding, GrainDirection, Panel, PanelId};
pub use result::{GroupSummary, NestingResult, NestingSummary, Offcut, PlacedPanel, SheetLayout};
pub use sheet::{
    SheetRegistry, SheetSize, DEFAULT_KERF_MM, DEFAULT_MIN_OFFCUT_MM, DEFAULT_SHEET_SIZE,
};
