//! Integration tests for panelnest-core.

use panelnest_core::{
    EdgeBanding, Error, GrainDirection, NestingConfig, NestingResult, Offcut, Panel, PlacedPanel,
    Rect, SheetLayout, SheetRegistry,
};

mod registry_tests {
    use super::*;

    #[test]
    fn test_default_registry_is_standard() {
        let registry = SheetRegistry::default();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["6x4", "7x4", "8x3", "8x4"]);
    }

    #[test]
    fn test_config_names_resolve() {
        let registry = SheetRegistry::standard();
        let config = NestingConfig::default();
        let size = registry.get(&config.sheet_size).unwrap();
        assert_eq!(size.rect(), Rect::sized(2440.0, 1220.0));
    }

    #[test]
    fn test_unknown_name_is_configuration_error() {
        let registry = SheetRegistry::standard();
        let err = registry.get("9x5").unwrap_err();
        assert!(err.is_configuration());
        assert!(matches!(err, Error::UnknownSheetSize { .. }));
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = SheetRegistry::standard();
        registry
            .register("8x4", 2450.0, 1225.0)
            .unwrap()
            .register("half", 1220.0, 1220.0)
            .unwrap();
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get("8x4").unwrap().length_mm, 2450.0);
    }
}

mod panel_tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let panel = Panel::new("SIDE", 720.0, 560.0, 18.0, "BWP")
            .with_name("Carcass side")
            .with_quantity(2)
            .with_grain(GrainDirection::Length)
            .with_laminate("Walnut 1mm")
            .with_edge_banding(EdgeBanding::new(1, 0));

        assert_eq!(panel.name, "Carcass side");
        assert_eq!(panel.piece_count(), 2);
        assert!(panel.grain_direction.is_constrained());
        assert_eq!(panel.face_laminate.as_deref(), Some("Walnut 1mm"));
        assert!((panel.area() - 403_200.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_panel_contributes_nothing() {
        let mut panel = Panel::new("BAD", 600.0, 400.0, 18.0, "MDF");
        panel.length_mm = f64::INFINITY;
        assert!(!panel.is_well_formed());
        assert_eq!(panel.piece_count(), 0);
    }
}

mod result_tests {
    use super::*;

    fn piece(x: f64, banding: Option<EdgeBanding>) -> PlacedPanel {
        PlacedPanel {
            panel_id: "SHELF".to_string(),
            part_name: "Shelf".to_string(),
            copy_index: 0,
            x_mm: x,
            y_mm: 0.0,
            length_mm: 800.0,
            width_mm: 300.0,
            rotated: false,
            required_grain: GrainDirection::Length,
            grain_direction: GrainDirection::Length,
            face_laminate: None,
            edge_banding: banding,
        }
    }

    #[test]
    fn test_summary_edge_banding_total() {
        let layout = SheetLayout {
            sheet_index: 0,
            sheet_length_mm: 2440.0,
            sheet_width_mm: 1220.0,
            material: "BWP".to_string(),
            thickness_mm: 18.0,
            placements: vec![
                piece(0.0, Some(EdgeBanding::new(1, 0))),
                piece(804.0, Some(EdgeBanding::all_round())),
                piece(1608.0, None),
            ],
            offcuts: vec![Offcut::from_rect(
                0,
                Rect::new(0.0, 304.0, 2440.0, 916.0),
                200.0,
                200.0,
            )],
            utilization_percent: 0.0,
        };

        let mut result = NestingResult::empty(None, "8x4", 4.0);
        result.total_sheets = 1;
        result.reusable_offcuts = layout.offcuts.clone();
        result.sheets.push(layout);

        let summary = result.summary();
        // 800 + (2 * 800 + 2 * 300)
        assert!((summary.edge_banding_mm - 3000.0).abs() < 1e-9);
        assert_eq!(summary.reusable_offcuts, 1);
        assert!((summary.reusable_offcut_area_mm2 - 2440.0 * 916.0).abs() < 1e-6);
        assert_eq!(summary.groups[0].pieces, 3);
        assert!(result.sheets[0].is_overlap_free(4.0));
    }
}
