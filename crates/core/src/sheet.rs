//! Raw-material sheet sizes.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::geometry::Rect;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Saw blade clearance reserved around every piece, in millimetres.
pub const DEFAULT_KERF_MM: f64 = 4.0;

/// Smallest leftover dimension still worth keeping as stock, in millimetres.
pub const DEFAULT_MIN_OFFCUT_MM: f64 = 200.0;

/// Sheet size used when a request does not name one.
pub const DEFAULT_SHEET_SIZE: &str = "8x4";

/// Dimensions of one raw-material sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SheetSize {
    /// Length in millimetres (x axis).
    pub length_mm: f64,
    /// Width in millimetres (y axis).
    pub width_mm: f64,
}

impl SheetSize {
    /// Creates a sheet size without validation.
    pub const fn new(length_mm: f64, width_mm: f64) -> Self {
        Self {
            length_mm,
            width_mm,
        }
    }

    /// Returns the sheet area.
    pub fn area(&self) -> f64 {
        self.length_mm * self.width_mm
    }

    /// Returns the sheet as a rectangle anchored at the origin.
    pub fn rect(&self) -> Rect {
        Rect::sized(self.length_mm, self.width_mm)
    }

    fn is_valid(&self) -> bool {
        self.length_mm.is_finite()
            && self.width_mm.is_finite()
            && self.length_mm > 0.0
            && self.width_mm > 0.0
    }
}

/// Named sheet sizes available to the nesting engine.
///
/// The registry is a plain value handed to the engine, so runs with
/// different stock can coexist.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SheetRegistry {
    sizes: BTreeMap<String, SheetSize>,
}

impl SheetRegistry {
    /// Creates an empty registry.
    pub fn empty() -> Self {
        Self {
            sizes: BTreeMap::new(),
        }
    }

    /// Creates the registry of standard board sizes.
    ///
    /// | Name  | Length × width (mm) |
    /// |-------|---------------------|
    /// | `8x4` | 2440 × 1220         |
    /// | `7x4` | 2135 × 1220         |
    /// | `6x4` | 1830 × 1220         |
    /// | `8x3` | 2440 × 915          |
    pub fn standard() -> Self {
        let sizes = [
            ("8x4", SheetSize::new(2440.0, 1220.0)),
            ("7x4", SheetSize::new(2135.0, 1220.0)),
            ("6x4", SheetSize::new(1830.0, 1220.0)),
            ("8x3", SheetSize::new(2440.0, 915.0)),
        ];
        Self {
            sizes: sizes
                .into_iter()
                .map(|(name, size)| (name.to_string(), size))
                .collect(),
        }
    }

    /// Adds or replaces a named sheet size.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        length_mm: f64,
        width_mm: f64,
    ) -> Result<&mut Self> {
        let name = name.into();
        let size = SheetSize::new(length_mm, width_mm);
        if !size.is_valid() {
            return Err(Error::InvalidSheetSize {
                name,
                length_mm,
                width_mm,
            });
        }
        self.sizes.insert(name, size);
        Ok(self)
    }

    /// Looks up a sheet size by name.
    pub fn get(&self, name: &str) -> Result<SheetSize> {
        self.sizes
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownSheetSize {
                name: name.to_string(),
            })
    }

    /// Returns true if the name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.sizes.contains_key(name)
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sizes.keys().map(String::as_str)
    }

    /// Returns the number of registered sizes.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

impl Default for SheetRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_sizes() {
        let registry = SheetRegistry::standard();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get("8x4").unwrap(), SheetSize::new(2440.0, 1220.0));
        assert_eq!(registry.get("7x4").unwrap(), SheetSize::new(2135.0, 1220.0));
        assert_eq!(registry.get("6x4").unwrap(), SheetSize::new(1830.0, 1220.0));
        assert_eq!(registry.get("8x3").unwrap(), SheetSize::new(2440.0, 915.0));
    }

    #[test]
    fn test_unknown_size_fails() {
        let registry = SheetRegistry::standard();
        match registry.get("9x5") {
            Err(Error::UnknownSheetSize { name }) => assert_eq!(name, "9x5"),
            other => panic!("expected UnknownSheetSize, got {:?}", other),
        }
    }

    #[test]
    fn test_register_custom() {
        let mut registry = SheetRegistry::empty();
        registry.register("10x4", 3050.0, 1220.0).unwrap();
        assert!(registry.contains("10x4"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["10x4"]);
        assert!((registry.get("10x4").unwrap().area() - 3_721_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_register_rejects_non_positive() {
        let mut registry = SheetRegistry::empty();
        assert!(matches!(
            registry.register("bad", 0.0, 1220.0),
            Err(Error::InvalidSheetSize { .. })
        ));
        assert!(registry.register("nan", f64::NAN, 1220.0).is_err());
        assert!(registry.is_empty());
    }
}
