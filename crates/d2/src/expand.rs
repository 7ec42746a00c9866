//! Panel expansion and material grouping.

use panelnest_core::Panel;

/// One physical piece of a panel.
#[derive(Debug, Clone, Copy)]
pub struct PlacementUnit<'a> {
    /// The source panel.
    pub panel: &'a Panel,
    /// Copy index (0-based) among the panel's quantity.
    pub copy_index: usize,
}

/// Stock pool key: pieces of different material or thickness never share a sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupKey {
    /// Material identifier.
    pub material: String,
    /// Board thickness.
    pub thickness_mm: f64,
}

impl GroupKey {
    /// Returns the key of a panel.
    pub fn of(panel: &Panel) -> Self {
        Self {
            material: panel.material.clone(),
            thickness_mm: panel.thickness_mm,
        }
    }

    /// Returns true if the panel belongs to this group.
    pub fn matches(&self, panel: &Panel) -> bool {
        self.material == panel.material && self.thickness_mm == panel.thickness_mm
    }
}

/// Pieces that draw from the same stock pool.
#[derive(Debug, Clone)]
pub struct PanelGroup<'a> {
    /// Material and thickness shared by every unit.
    pub key: GroupKey,
    /// Units in expansion order.
    pub units: Vec<PlacementUnit<'a>>,
}

/// Expands every panel into one unit per physical piece.
///
/// Panels with a non-positive quantity, dimension or thickness contribute nothing.
pub fn expand_panels(panels: &[Panel]) -> Vec<PlacementUnit<'_>> {
    let mut units = Vec::with_capacity(panels.iter().map(Panel::piece_count).sum());
    for panel in panels {
        let count = panel.piece_count();
        if count == 0 {
            log::warn!(
                "Skipping panel {:?}: quantity {}, size {} x {} x {} mm",
                panel.id,
                panel.quantity,
                panel.length_mm,
                panel.width_mm,
                panel.thickness_mm
            );
            continue;
        }
        units.extend((0..count).map(|copy_index| PlacementUnit { panel, copy_index }));
    }
    units
}

/// Buckets units by material and thickness, in order of first appearance.
pub fn partition_groups(units: Vec<PlacementUnit<'_>>) -> Vec<PanelGroup<'_>> {
    let mut groups: Vec<PanelGroup<'_>> = Vec::new();
    for unit in units {
        match groups.iter_mut().find(|g| g.key.matches(unit.panel)) {
            Some(group) => group.units.push(unit),
            None => groups.push(PanelGroup {
                key: GroupKey::of(unit.panel),
                units: vec![unit],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_by_quantity() {
        let panels = vec![
            Panel::new("A", 600.0, 400.0, 18.0, "MDF").with_quantity(3),
            Panel::new("B", 300.0, 200.0, 18.0, "MDF"),
        ];
        let units = expand_panels(&panels);
        assert_eq!(units.len(), 4);
        assert_eq!(units[0].panel.id, "A");
        assert_eq!(units[2].copy_index, 2);
        assert_eq!(units[3].panel.id, "B");
        assert_eq!(units[3].copy_index, 0);
    }

    #[test]
    fn test_malformed_quantity_contributes_nothing() {
        let panels = vec![
            Panel::new("A", 600.0, 400.0, 18.0, "MDF").with_quantity(0),
            Panel::new("B", 600.0, 400.0, 18.0, "MDF").with_quantity(-4),
        ];
        assert!(expand_panels(&panels).is_empty());
    }

    #[test]
    fn test_invalid_thickness_contributes_nothing() {
        let panels = vec![
            Panel::new("A", 300.0, 300.0, f64::NAN, "MDF").with_quantity(4),
            Panel::new("B", 300.0, 300.0, -18.0, "MDF"),
            Panel::new("C", 300.0, 300.0, 18.0, "MDF").with_quantity(2),
        ];
        let groups = partition_groups(expand_panels(&panels));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].units.len(), 2);
        assert!(groups[0].units.iter().all(|u| u.panel.id == "C"));
    }

    #[test]
    fn test_partition_by_material_and_thickness() {
        let panels = vec![
            Panel::new("A", 600.0, 400.0, 18.0, "MDF"),
            Panel::new("B", 600.0, 400.0, 18.0, "Ply"),
            Panel::new("C", 600.0, 400.0, 9.0, "MDF"),
            Panel::new("D", 300.0, 300.0, 18.0, "MDF").with_quantity(2),
        ];
        let groups = partition_groups(expand_panels(&panels));
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].key.material, "MDF");
        assert_eq!(groups[0].key.thickness_mm, 18.0);
        assert_eq!(groups[0].units.len(), 3);
        assert_eq!(groups[1].key.material, "Ply");
        assert_eq!(groups[2].key.thickness_mm, 9.0);
        for group in &groups {
            assert!(group.units.iter().all(|u| group.key.matches(u.panel)));
        }
    }
}
