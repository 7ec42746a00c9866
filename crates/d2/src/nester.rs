//! Sheet nesting engine.

use crate::aggregate::aggregate;
use crate::expand::{expand_panels, partition_groups, PanelGroup};
use crate::offcut::{offcut_finder, OffcutFinder};
use crate::packer::{packer_for, PackItem, PackOutcome, RectPacker};
use panelnest_core::{
    Error, GrainPolicy, NestingConfig, NestingResult, Panel, PlacedPanel, Result, SheetLayout,
    SheetRegistry, SheetSize,
};

use rayon::prelude::*;
use std::time::Instant;

/// Pieces assigned to the sheets of one group, one vector per sheet.
type GroupSheets<'a> = (&'a PanelGroup<'a>, Vec<Vec<PlacedPanel>>);

/// Nests panels onto stock sheets.
///
/// Each material/thickness group is packed on its own; groups run on the
/// rayon pool when [`NestingConfig::parallel`] is set.
pub struct SheetNester {
    config: NestingConfig,
    registry: SheetRegistry,
    packer: Box<dyn RectPacker>,
    offcuts: Box<dyn OffcutFinder>,
}

impl SheetNester {
    /// Creates a nester over the standard sheet registry.
    pub fn new(config: NestingConfig) -> Self {
        Self::with_registry(config, SheetRegistry::standard())
    }

    /// Creates a nester with default configuration.
    pub fn default_config() -> Self {
        Self::new(NestingConfig::default())
    }

    /// Creates a nester over a custom sheet registry.
    pub fn with_registry(config: NestingConfig, registry: SheetRegistry) -> Self {
        let packer = packer_for(config.strategy);
        let offcuts = offcut_finder(&config);
        Self {
            config,
            registry,
            packer,
            offcuts,
        }
    }

    /// Replaces the packing algorithm.
    pub fn with_packer(mut self, packer: Box<dyn RectPacker>) -> Self {
        self.packer = packer;
        self
    }

    /// Replaces the offcut finder.
    pub fn with_offcut_finder(mut self, finder: Box<dyn OffcutFinder>) -> Self {
        self.offcuts = finder;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &NestingConfig {
        &self.config
    }

    /// Returns the sheet registry.
    pub fn registry(&self) -> &SheetRegistry {
        &self.registry
    }

    /// Nests `panels` onto sheets of the configured size.
    ///
    /// Fails with [`Error::UnknownSheetSize`] before any work if the sheet is
    /// not registered, and with [`Error::Unplaceable`] if a piece does not
    /// fit the sheet in any permitted orientation.
    pub fn nest(&self, panels: &[Panel], cutlist_id: Option<&str>) -> Result<NestingResult> {
        let start = Instant::now();
        self.config.validate()?;
        let sheet = self.registry.get(&self.config.sheet_size)?;
        let cutlist_id = cutlist_id.map(str::to_string);

        let units = expand_panels(panels);
        if units.is_empty() {
            return Ok(NestingResult::empty(
                cutlist_id,
                self.config.sheet_size.clone(),
                self.config.kerf_mm,
            ));
        }
        let unit_count = units.len();
        let groups = partition_groups(units);

        let packed: Vec<GroupSheets<'_>> = if self.config.parallel && groups.len() > 1 {
            groups
                .par_iter()
                .map(|group| self.pack_group(group, sheet).map(|sheets| (group, sheets)))
                .collect::<Result<Vec<_>>>()?
        } else {
            groups
                .iter()
                .map(|group| self.pack_group(group, sheet).map(|sheets| (group, sheets)))
                .collect::<Result<Vec<_>>>()?
        };

        let mut layouts = Vec::new();
        for (group, sheets) in packed {
            for placements in sheets {
                let sheet_index = layouts.len();
                let offcuts = self
                    .offcuts
                    .find_offcuts(sheet_index, sheet, &placements, self.config.kerf_mm);
                let mut layout = SheetLayout {
                    sheet_index,
                    sheet_length_mm: sheet.length_mm,
                    sheet_width_mm: sheet.width_mm,
                    material: group.key.material.clone(),
                    thickness_mm: group.key.thickness_mm,
                    placements,
                    offcuts,
                    utilization_percent: 0.0,
                };
                layout.utilization_percent = layout.compute_utilization();
                layouts.push(layout);
            }
        }

        let mut result = aggregate(
            cutlist_id,
            &self.config.sheet_size,
            self.config.kerf_mm,
            layouts,
        );
        result.computation_time_ms = start.elapsed().as_millis() as u64;

        log::info!(
            "Nested {} pieces in {} groups onto {} {} sheets, waste {}",
            unit_count,
            groups.len(),
            result.total_sheets,
            self.config.sheet_size,
            result.waste_percent_string()
        );

        Ok(result)
    }

    /// Packs one material group, returning the pieces of each sheet.
    fn pack_group(
        &self,
        group: &PanelGroup<'_>,
        sheet: SheetSize,
    ) -> Result<Vec<Vec<PlacedPanel>>> {
        let kerf = self.config.kerf_mm;
        let bounds = sheet.rect();

        let items: Vec<PackItem> = group
            .units
            .iter()
            .enumerate()
            .map(|(id, unit)| PackItem {
                id,
                length: unit.panel.length_mm + kerf,
                width: unit.panel.width_mm + kerf,
                can_rotate: self
                    .config
                    .grain_policy
                    .allows_rotation(unit.panel.grain_direction.is_constrained()),
            })
            .collect();

        // A piece that fits no empty sheet would make the packer open sheets forever
        if let Some((_, unit)) = items
            .iter()
            .zip(&group.units)
            .find(|(item, _)| !item.fits_in(&bounds))
        {
            return Err(Error::Unplaceable {
                panel_id: unit.panel.id.clone(),
                length_mm: unit.panel.length_mm,
                width_mm: unit.panel.width_mm,
                sheet: self.config.sheet_size.clone(),
            });
        }

        let outcome = self
            .packer
            .pack(sheet.length_mm, sheet.width_mm, &items, items.len() + 1)?;
        check_outcome(&outcome, items.len(), self.packer.name())?;

        let mut sheets: Vec<Vec<PlacedPanel>> = vec![Vec::new(); outcome.bins_used];
        for packed in &outcome.items {
            let unit = &group.units[packed.id];
            let panel = unit.panel;
            let placed = PlacedPanel {
                panel_id: panel.id.clone(),
                part_name: panel.name.clone(),
                copy_index: unit.copy_index,
                x_mm: packed.x,
                y_mm: packed.y,
                length_mm: panel.length_mm,
                width_mm: panel.width_mm,
                rotated: packed.rotated,
                required_grain: panel.grain_direction,
                grain_direction: panel.grain_direction.realized(packed.rotated),
                face_laminate: panel.face_laminate.clone(),
                edge_banding: panel.edge_banding,
            };
            if placed.grain_conflict() && self.config.grain_policy == GrainPolicy::Report {
                log::warn!(
                    "Panel {:?} copy {} turned against its {:?} grain",
                    placed.panel_id,
                    placed.copy_index,
                    placed.required_grain
                );
            }
            sheets[packed.bin].push(placed);
        }

        log::debug!(
            "Group {} {}mm: {} pieces on {} sheets ({})",
            group.key.material,
            group.key.thickness_mm,
            items.len(),
            sheets.len(),
            self.packer.name()
        );

        Ok(sheets)
    }
}

/// Checks that a packer placed every item exactly once into an opened bin.
fn check_outcome(outcome: &PackOutcome, item_count: usize, packer: &str) -> Result<()> {
    let mut seen = vec![false; item_count];
    for packed in &outcome.items {
        if packed.id >= item_count || packed.bin >= outcome.bins_used {
            return Err(Error::Internal(format!(
                "{} packer returned item {} in bin {} of {}",
                packer, packed.id, packed.bin, outcome.bins_used
            )));
        }
        if std::mem::replace(&mut seen[packed.id], true) {
            return Err(Error::Internal(format!(
                "{} packer placed item {} twice",
                packer, packed.id
            )));
        }
    }
    if let Some(missing) = seen.iter().position(|s| !s) {
        return Err(Error::Internal(format!(
            "{} packer dropped item {}",
            packer, missing
        )));
    }
    Ok(())
}

/// Nests panels with the default configuration on the named sheet size.
pub fn nest_panels(panels: &[Panel], sheet_size: &str) -> Result<NestingResult> {
    SheetNester::new(NestingConfig::new().with_sheet_size(sheet_size)).nest(panels, None)
}
