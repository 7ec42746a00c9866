//! Nesting configuration.

use crate::error::{Error, Result};
use crate::sheet::{DEFAULT_KERF_MM, DEFAULT_MIN_OFFCUT_MM, DEFAULT_SHEET_SIZE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How grain direction constrains rotation during packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GrainPolicy {
    /// Any piece may be turned 90°; turned grain pieces are flagged in the result.
    #[default]
    Report,
    /// Only pieces without a grain requirement may be turned.
    Enforce,
}

impl GrainPolicy {
    /// Returns whether a piece with the given grain requirement may be turned.
    pub fn allows_rotation(self, grain_constrained: bool) -> bool {
        match self {
            Self::Report => true,
            Self::Enforce => !grain_constrained,
        }
    }
}

/// Scoring rule used to choose among candidate free spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FitHeuristic {
    /// Smallest leftover area, ties broken on the short side.
    #[default]
    BestAreaFit,
    /// Smallest leftover on the shorter side.
    BestShortSideFit,
    /// Smallest leftover on the longer side.
    BestLongSideFit,
    /// Lowest top edge, then leftmost.
    BottomLeft,
}

/// Rectangle packing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PackingStrategy {
    /// Maximal free rectangles (good density, non-guillotine layouts possible).
    MaxRects(FitHeuristic),
    /// Guillotine splits (every layout can be cut edge-to-edge).
    Guillotine(FitHeuristic),
    /// Row-by-row shelf filling (fast, lower density).
    Shelf,
}

impl Default for PackingStrategy {
    fn default() -> Self {
        Self::MaxRects(FitHeuristic::BestAreaFit)
    }
}

impl PackingStrategy {
    /// Short name for logs and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MaxRects(_) => "maxrects",
            Self::Guillotine(_) => "guillotine",
            Self::Shelf => "shelf",
        }
    }
}

/// How leftover stock is located on a packed sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OffcutStrategy {
    /// A right strip and a top strip beyond the used extent.
    #[default]
    EdgeStrips,
    /// Every maximal empty rectangle left on the sheet (regions may overlap).
    MaximalRectangles,
}

/// Configuration for a nesting run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NestingConfig {
    /// Registry name of the stock sheet.
    pub sheet_size: String,

    /// Saw kerf added to both dimensions of every piece.
    pub kerf_mm: f64,

    /// Minimum offcut length (x extent) to count as reusable.
    pub min_offcut_length_mm: f64,

    /// Minimum offcut width (y extent) to count as reusable.
    pub min_offcut_width_mm: f64,

    /// Grain rotation policy.
    pub grain_policy: GrainPolicy,

    /// Packing strategy.
    pub strategy: PackingStrategy,

    /// Offcut detection strategy.
    pub offcut_strategy: OffcutStrategy,

    /// Pack independent material groups on the rayon pool.
    pub parallel: bool,
}

impl Default for NestingConfig {
    fn default() -> Self {
        Self {
            sheet_size: DEFAULT_SHEET_SIZE.to_string(),
            kerf_mm: DEFAULT_KERF_MM,
            min_offcut_length_mm: DEFAULT_MIN_OFFCUT_MM,
            min_offcut_width_mm: DEFAULT_MIN_OFFCUT_MM,
            grain_policy: GrainPolicy::default(),
            strategy: PackingStrategy::default(),
            offcut_strategy: OffcutStrategy::default(),
            parallel: true,
        }
    }
}

impl NestingConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sheet size name.
    pub fn with_sheet_size(mut self, name: impl Into<String>) -> Self {
        self.sheet_size = name.into();
        self
    }

    /// Sets the saw kerf.
    pub fn with_kerf(mut self, kerf_mm: f64) -> Self {
        self.kerf_mm = kerf_mm;
        self
    }

    /// Sets both minimum reusable offcut dimensions.
    pub fn with_min_offcut(mut self, length_mm: f64, width_mm: f64) -> Self {
        self.min_offcut_length_mm = length_mm;
        self.min_offcut_width_mm = width_mm;
        self
    }

    /// Sets the grain policy.
    pub fn with_grain_policy(mut self, policy: GrainPolicy) -> Self {
        self.grain_policy = policy;
        self
    }

    /// Sets the packing strategy.
    pub fn with_strategy(mut self, strategy: PackingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the offcut strategy.
    pub fn with_offcut_strategy(mut self, strategy: OffcutStrategy) -> Self {
        self.offcut_strategy = strategy;
        self
    }

    /// Enables or disables parallel group packing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks numeric settings.
    pub fn validate(&self) -> Result<()> {
        if !self.kerf_mm.is_finite() || self.kerf_mm < 0.0 {
            return Err(Error::ConfigError(format!(
                "kerf must be a non-negative number, got {}",
                self.kerf_mm
            )));
        }
        for (label, value) in [
            ("minimum offcut length", self.min_offcut_length_mm),
            ("minimum offcut width", self.min_offcut_width_mm),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::ConfigError(format!(
                    "{} must be a non-negative number, got {}",
                    label, value
                )));
            }
        }
        Ok(())
    }
}
