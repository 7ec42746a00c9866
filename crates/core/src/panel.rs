//! Panel specifications submitted for nesting.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for a panel specification.
pub type PanelId = String;

/// Direction the wood grain must run along a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GrainDirection {
    /// Grain runs along the panel length.
    Length,
    /// Grain runs along the panel width.
    Width,
    /// No grain requirement (plain board, solid colour laminate).
    #[default]
    None,
}

impl GrainDirection {
    /// Returns true if the panel carries a grain requirement.
    pub fn is_constrained(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Returns the grain label once the panel has been turned by 90°.
    pub fn turned(self) -> Self {
        match self {
            Self::Length => Self::Width,
            Self::Width => Self::Length,
            Self::None => Self::None,
        }
    }

    /// Returns the grain label as realized on the sheet.
    pub fn realized(self, rotated: bool) -> Self {
        if rotated {
            self.turned()
        } else {
            self
        }
    }
}

/// Which edges of a panel receive edge banding tape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeBanding {
    /// Number of banded edges running along the length (0..=2).
    pub length_edges: u8,
    /// Number of banded edges running along the width (0..=2).
    pub width_edges: u8,
}

impl EdgeBanding {
    /// Creates an edge banding spec; edge counts are capped at two per axis.
    pub fn new(length_edges: u8, width_edges: u8) -> Self {
        Self {
            length_edges: length_edges.min(2),
            width_edges: width_edges.min(2),
        }
    }

    /// Bands all four edges.
    pub fn all_round() -> Self {
        Self::new(2, 2)
    }

    /// Length of tape needed for one piece of the given size.
    pub fn banded_length_mm(&self, length_mm: f64, width_mm: f64) -> f64 {
        f64::from(self.length_edges) * length_mm + f64::from(self.width_edges) * width_mm
    }
}

/// A rectangular furniture panel with its cutting requirements.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Panel {
    /// Panel identifier, unique within a cutlist.
    pub id: PanelId,
    /// Human readable part name ("Carcass side", "Shelf").
    pub name: String,
    /// Length in millimetres (grain axis for `GrainDirection::Length`).
    pub length_mm: f64,
    /// Width in millimetres.
    pub width_mm: f64,
    /// Board thickness in millimetres.
    pub thickness_mm: f64,
    /// Board material identifier ("BWP plywood", "MDF").
    pub material: String,
    /// Required grain direction.
    #[cfg_attr(feature = "serde", serde(default))]
    pub grain_direction: GrainDirection,
    /// Number of identical pieces to cut.
    pub quantity: i32,
    /// Optional face laminate tag.
    #[cfg_attr(feature = "serde", serde(default))]
    pub face_laminate: Option<String>,
    /// Optional edge banding spec.
    #[cfg_attr(feature = "serde", serde(default))]
    pub edge_banding: Option<EdgeBanding>,
}

impl Panel {
    /// Creates a single-quantity panel with no grain requirement.
    pub fn new(
        id: impl Into<PanelId>,
        length_mm: f64,
        width_mm: f64,
        thickness_mm: f64,
        material: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            length_mm,
            width_mm,
            thickness_mm,
            material: material.into(),
            grain_direction: GrainDirection::None,
            quantity: 1,
            face_laminate: None,
            edge_banding: None,
        }
    }

    /// Sets the part name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the quantity.
    pub fn with_quantity(mut self, quantity: i32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the grain direction.
    pub fn with_grain(mut self, grain: GrainDirection) -> Self {
        self.grain_direction = grain;
        self
    }

    /// Sets the face laminate tag.
    pub fn with_laminate(mut self, laminate: impl Into<String>) -> Self {
        self.face_laminate = Some(laminate.into());
        self
    }

    /// Sets the edge banding spec.
    pub fn with_edge_banding(mut self, banding: EdgeBanding) -> Self {
        self.edge_banding = Some(banding);
        self
    }

    /// Returns the area of one piece.
    pub fn area(&self) -> f64 {
        self.length_mm * self.width_mm
    }

    /// Number of physical pieces this panel contributes.
    ///
    /// Malformed panels (non-positive quantity, non-positive or non-finite
    /// dimensions or thickness) contribute nothing.
    pub fn piece_count(&self) -> usize {
        if self.is_well_formed() {
            self.quantity as usize
        } else {
            0
        }
    }

    /// Returns true if the panel can be nested at all.
    pub fn is_well_formed(&self) -> bool {
        self.quantity > 0
            && self.length_mm.is_finite()
            && self.width_mm.is_finite()
            && self.length_mm > 0.0
            && self.width_mm > 0.0
            && self.thickness_mm.is_finite()
            && self.thickness_mm > 0.0
    }
}
