//! Nesting result representation.

use crate::geometry::{union_area, Rect};
use crate::panel::{EdgeBanding, GrainDirection, PanelId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One physical piece placed on a sheet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacedPanel {
    /// ID of the source panel.
    pub panel_id: PanelId,
    /// Part name of the source panel.
    pub part_name: String,
    /// Copy index (0-based) among the panel's quantity.
    pub copy_index: usize,
    /// Insertion point x (lower-left corner of the kerf footprint).
    pub x_mm: f64,
    /// Insertion point y.
    pub y_mm: f64,
    /// Native panel length.
    pub length_mm: f64,
    /// Native panel width.
    pub width_mm: f64,
    /// Whether the piece was turned 90° on the sheet.
    pub rotated: bool,
    /// Grain requirement of the source panel.
    pub required_grain: GrainDirection,
    /// Grain direction as it lies on the sheet.
    pub grain_direction: GrainDirection,
    /// Face laminate tag carried from the panel.
    pub face_laminate: Option<String>,
    /// Edge banding carried from the panel.
    pub edge_banding: Option<EdgeBanding>,
}

impl PlacedPanel {
    /// Extent of the piece along the sheet length.
    pub fn placed_length_mm(&self) -> f64 {
        if self.rotated {
            self.width_mm
        } else {
            self.length_mm
        }
    }

    /// Extent of the piece along the sheet width.
    pub fn placed_width_mm(&self) -> f64 {
        if self.rotated {
            self.length_mm
        } else {
            self.width_mm
        }
    }

    /// Native piece area (kerf excluded).
    pub fn area(&self) -> f64 {
        self.length_mm * self.width_mm
    }

    /// The piece rectangle on the sheet, kerf excluded.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.x_mm,
            self.y_mm,
            self.placed_length_mm(),
            self.placed_width_mm(),
        )
    }

    /// The space reserved for the piece including blade clearance.
    pub fn footprint(&self, kerf_mm: f64) -> Rect {
        Rect::new(
            self.x_mm,
            self.y_mm,
            self.placed_length_mm() + kerf_mm,
            self.placed_width_mm() + kerf_mm,
        )
    }

    /// True when a grain-constrained piece was turned.
    pub fn grain_conflict(&self) -> bool {
        self.rotated && self.required_grain.is_constrained()
    }

    /// Edge banding tape needed for this piece.
    pub fn banded_length_mm(&self) -> f64 {
        self.edge_banding
            .map(|b| b.banded_length_mm(self.length_mm, self.width_mm))
            .unwrap_or(0.0)
    }
}

/// Leftover region of a sheet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Offcut {
    /// Index of the sheet the offcut lies on.
    pub sheet_index: usize,
    /// Corner x.
    pub x_mm: f64,
    /// Corner y.
    pub y_mm: f64,
    /// Extent along the sheet length.
    pub length_mm: f64,
    /// Extent along the sheet width.
    pub width_mm: f64,
    /// Offcut area.
    pub area_mm2: f64,
    /// Whether both dimensions meet the reusable minimums.
    pub reusable: bool,
}

impl Offcut {
    /// Creates an offcut from a region, judging reusability against the minimums.
    pub fn from_rect(sheet_index: usize, rect: Rect, min_length: f64, min_width: f64) -> Self {
        Self {
            sheet_index,
            x_mm: rect.x,
            y_mm: rect.y,
            length_mm: rect.length,
            width_mm: rect.width,
            area_mm2: rect.area(),
            reusable: rect.length >= min_length && rect.width >= min_width,
        }
    }

    /// Returns the offcut region.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x_mm, self.y_mm, self.length_mm, self.width_mm)
    }
}

/// Layout of one packed sheet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SheetLayout {
    /// Global sheet index within the result.
    pub sheet_index: usize,
    /// Sheet length.
    pub sheet_length_mm: f64,
    /// Sheet width.
    pub sheet_width_mm: f64,
    /// Material of every piece on this sheet.
    pub material: String,
    /// Thickness of every piece on this sheet.
    pub thickness_mm: f64,
    /// Pieces in placement order.
    pub placements: Vec<PlacedPanel>,
    /// Leftover regions.
    pub offcuts: Vec<Offcut>,
    /// Native piece area over sheet area, in percent.
    pub utilization_percent: f64,
}

impl SheetLayout {
    /// Returns the sheet area.
    pub fn sheet_area(&self) -> f64 {
        self.sheet_length_mm * self.sheet_width_mm
    }

    /// Returns the summed native area of the placed pieces.
    pub fn used_area(&self) -> f64 {
        self.placements.iter().map(PlacedPanel::area).sum()
    }

    /// Returns the sheet area not covered by native piece area.
    pub fn waste_area(&self) -> f64 {
        self.sheet_area() - self.used_area()
    }

    /// Recomputes the utilization from the current placements.
    pub fn compute_utilization(&self) -> f64 {
        let sheet_area = self.sheet_area();
        if sheet_area > 0.0 {
            self.used_area() / sheet_area * 100.0
        } else {
            0.0
        }
    }

    /// Checks that no two kerf footprints intersect.
    pub fn is_overlap_free(&self, kerf_mm: f64) -> bool {
        let footprints: Vec<Rect> = self
            .placements
            .iter()
            .map(|p| p.footprint(kerf_mm))
            .collect();
        footprints
            .iter()
            .enumerate()
            .all(|(i, a)| footprints[i + 1..].iter().all(|b| !a.overlaps(b)))
    }
}

/// Result of a nesting run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NestingResult {
    /// Caller supplied cutlist identifier.
    pub cutlist_id: Option<String>,
    /// Packed sheets, grouped by material and thickness.
    pub sheets: Vec<SheetLayout>,
    /// Number of sheets used.
    pub total_sheets: usize,
    /// Summed sheet area.
    pub total_sheet_area_mm2: f64,
    /// Summed native piece area.
    pub total_panel_area_mm2: f64,
    /// Sheet area not covered by pieces (kerf and leftovers).
    pub total_waste_area_mm2: f64,
    /// Waste over sheet area, in percent.
    pub waste_percentage: f64,
    /// Every reusable offcut across all sheets.
    ///
    /// With maximal-rectangle offcuts the regions of one sheet may overlap;
    /// use [`NestingResult::reusable_offcut_area_mm2`] for the covered area.
    pub reusable_offcuts: Vec<Offcut>,
    /// Registry name of the sheet size used.
    pub sheet_size: String,
    /// Kerf the layouts were computed with.
    pub kerf_mm: f64,
    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl NestingResult {
    /// Creates an empty result (no pieces, no sheets).
    pub fn empty(cutlist_id: Option<String>, sheet_size: impl Into<String>, kerf_mm: f64) -> Self {
        Self {
            cutlist_id,
            sheets: Vec::new(),
            total_sheets: 0,
            total_sheet_area_mm2: 0.0,
            total_panel_area_mm2: 0.0,
            total_waste_area_mm2: 0.0,
            waste_percentage: 0.0,
            reusable_offcuts: Vec::new(),
            sheet_size: sheet_size.into(),
            kerf_mm,
            computation_time_ms: 0,
        }
    }

    /// Returns the number of placed pieces.
    pub fn placed_count(&self) -> usize {
        self.sheets.iter().map(|s| s.placements.len()).sum()
    }

    /// Iterates over every placed piece.
    pub fn placements(&self) -> impl Iterator<Item = &PlacedPanel> {
        self.sheets.iter().flat_map(|s| s.placements.iter())
    }

    /// Returns the sheets cut from the given material and thickness.
    pub fn sheets_for<'a>(
        &'a self,
        material: &'a str,
        thickness_mm: f64,
    ) -> impl Iterator<Item = &'a SheetLayout> + 'a {
        self.sheets
            .iter()
            .filter(move |s| s.material == material && s.thickness_mm == thickness_mm)
    }

    /// Returns grain-constrained pieces that were turned on the sheet.
    pub fn grain_conflicts(&self) -> Vec<&PlacedPanel> {
        self.placements().filter(|p| p.grain_conflict()).collect()
    }

    /// Stock area covered by reusable offcuts, overlaps counted once.
    pub fn reusable_offcut_area_mm2(&self) -> f64 {
        self.sheets
            .iter()
            .map(|sheet| {
                let rects: Vec<Rect> = sheet
                    .offcuts
                    .iter()
                    .filter(|o| o.reusable)
                    .map(Offcut::rect)
                    .collect();
                union_area(&rects)
            })
            .sum()
    }

    /// Returns waste as a percentage string.
    pub fn waste_percent_string(&self) -> String {
        format!("{:.1}%", self.waste_percentage)
    }

    /// Computes summary statistics.
    pub fn summary(&self) -> NestingSummary {
        NestingSummary::from(self)
    }
}

/// Per material/thickness statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupSummary {
    /// Material identifier.
    pub material: String,
    /// Board thickness.
    pub thickness_mm: f64,
    /// Sheets used by the group.
    pub sheets: usize,
    /// Pieces placed for the group.
    pub pieces: usize,
    /// Native piece area over the group's sheet area, in percent.
    pub utilization_percent: f64,
}

/// Summary statistics for a nesting result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NestingSummary {
    /// Sheets used.
    pub total_sheets: usize,
    /// Pieces placed.
    pub total_pieces: usize,
    /// Waste percentage.
    pub waste_percentage: f64,
    /// Number of reusable offcuts.
    pub reusable_offcuts: usize,
    /// Stock area covered by reusable offcuts.
    pub reusable_offcut_area_mm2: f64,
    /// Pieces turned 90°.
    pub rotated_pieces: usize,
    /// Grain-constrained pieces turned 90°.
    pub grain_conflicts: usize,
    /// Edge banding tape required, in millimetres.
    pub edge_banding_mm: f64,
    /// Per-group breakdown in sheet order.
    pub groups: Vec<GroupSummary>,
}

impl From<&NestingResult> for NestingSummary {
    fn from(result: &NestingResult) -> Self {
        let mut groups: Vec<(GroupSummary, f64, f64)> = Vec::new();
        for sheet in &result.sheets {
            let idx = match groups.iter().position(|(g, _, _)| {
                g.material == sheet.material && g.thickness_mm == sheet.thickness_mm
            }) {
                Some(idx) => idx,
                None => {
                    groups.push((
                        GroupSummary {
                            material: sheet.material.clone(),
                            thickness_mm: sheet.thickness_mm,
                            sheets: 0,
                            pieces: 0,
                            utilization_percent: 0.0,
                        },
                        0.0,
                        0.0,
                    ));
                    groups.len() - 1
                }
            };
            let (group, used, total) = &mut groups[idx];
            group.sheets += 1;
            group.pieces += sheet.placements.len();
            *used += sheet.used_area();
            *total += sheet.sheet_area();
        }

        let placements: Vec<&PlacedPanel> = result.placements().collect();
        Self {
            total_sheets: result.total_sheets,
            total_pieces: placements.len(),
            waste_percentage: result.waste_percentage,
            reusable_offcuts: result.reusable_offcuts.len(),
            reusable_offcut_area_mm2: result.reusable_offcut_area_mm2(),
            rotated_pieces: placements.iter().filter(|p| p.rotated).count(),
            grain_conflicts: placements.iter().filter(|p| p.grain_conflict()).count(),
            edge_banding_mm: placements.iter().map(|p| p.banded_length_mm()).sum(),
            groups: groups
                .into_iter()
                .map(|(mut group, used, total)| {
                    if total > 0.0 {
                        group.utilization_percent = used / total * 100.0;
                    }
                    group
                })
                .collect(),
        }
    }
}
