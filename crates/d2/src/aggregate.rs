//! Result assembly across material groups.

use panelnest_core::{NestingResult, SheetLayout};

/// Merges the sheets of every group into one result.
///
/// Waste covers both blade clearance and leftover stock: it is the sheet
/// area not covered by native piece area.
pub fn aggregate(
    cutlist_id: Option<String>,
    sheet_size: &str,
    kerf_mm: f64,
    sheets: Vec<SheetLayout>,
) -> NestingResult {
    let mut result = NestingResult::empty(cutlist_id, sheet_size, kerf_mm);
    if sheets.is_empty() {
        return result;
    }

    let total_sheet_area: f64 = sheets.iter().map(SheetLayout::sheet_area).sum();
    let total_panel_area: f64 = sheets.iter().map(SheetLayout::used_area).sum();
    let total_waste_area = total_sheet_area - total_panel_area;

    result.reusable_offcuts = sheets
        .iter()
        .flat_map(|s| s.offcuts.iter())
        .filter(|o| o.reusable)
        .cloned()
        .collect();
    result.total_sheets = sheets.len();
    result.total_sheet_area_mm2 = total_sheet_area;
    result.total_panel_area_mm2 = total_panel_area;
    result.total_waste_area_mm2 = total_waste_area;
    result.waste_percentage = if total_sheet_area > 0.0 {
        total_waste_area / total_sheet_area * 100.0
    } else {
        0.0
    };
    result.sheets = sheets;
    result
}
