//! Property tests for nesting invariants.

use panelnest_d2::{
    FitHeuristic, GrainDirection, GrainPolicy, NestingConfig, PackingStrategy, Panel,
    SheetNester,
};
use proptest::prelude::*;
use std::collections::HashMap;

const MATERIALS: [&str; 3] = ["MDF", "BWP plywood", "Particle board"];
const THICKNESSES: [f64; 3] = [6.0, 12.0, 18.0];

fn grain_strategy() -> impl Strategy<Value = GrainDirection> {
    prop_oneof![
        Just(GrainDirection::None),
        Just(GrainDirection::Length),
        Just(GrainDirection::Width),
    ]
}

fn panel_strategy() -> impl Strategy<Value = (f64, f64, usize, usize, GrainDirection, i32)> {
    (
        50.0..1200.0_f64,
        50.0..1200.0_f64,
        0..MATERIALS.len(),
        0..THICKNESSES.len(),
        grain_strategy(),
        -1..5_i32,
    )
}

fn build_panels(specs: Vec<(f64, f64, usize, usize, GrainDirection, i32)>) -> Vec<Panel> {
    specs
        .into_iter()
        .enumerate()
        .map(|(i, (length, width, material, thickness, grain, quantity))| {
            Panel::new(
                format!("P{}", i),
                length.round(),
                width.round(),
                THICKNESSES[thickness],
                MATERIALS[material],
            )
            .with_grain(grain)
            .with_quantity(quantity)
        })
        .collect()
}

fn strategy_choice() -> impl Strategy<Value = PackingStrategy> {
    prop_oneof![
        Just(PackingStrategy::MaxRects(FitHeuristic::BestAreaFit)),
        Just(PackingStrategy::MaxRects(FitHeuristic::BottomLeft)),
        Just(PackingStrategy::Guillotine(FitHeuristic::BestShortSideFit)),
        Just(PackingStrategy::Shelf),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn nesting_invariants_hold(
        specs in prop::collection::vec(panel_strategy(), 0..12),
        strategy in strategy_choice(),
        enforce in any::<bool>(),
    ) {
        let panels = build_panels(specs);
        let policy = if enforce { GrainPolicy::Enforce } else { GrainPolicy::Report };
        let config = NestingConfig::new()
            .with_strategy(strategy)
            .with_grain_policy(policy);
        let result = SheetNester::new(config).nest(&panels, None).unwrap();

        // Conservation
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for p in result.placements() {
            *counts.entry(p.panel_id.as_str()).or_insert(0) += 1;
        }
        for panel in &panels {
            let placed = counts.get(panel.id.as_str()).copied().unwrap_or(0);
            prop_assert_eq!(placed, panel.piece_count());
        }

        let sheet_rect = panelnest_d2::Rect::sized(2440.0, 1220.0);
        for sheet in &result.sheets {
            // Non-overlap and containment
            prop_assert!(sheet.is_overlap_free(result.kerf_mm));
            for p in &sheet.placements {
                prop_assert!(sheet_rect.contains(&p.footprint(result.kerf_mm)));
                if enforce && p.required_grain != GrainDirection::None {
                    prop_assert!(!p.rotated);
                }
            }

            // Group isolation
            for p in &sheet.placements {
                let source = panels.iter().find(|s| s.id == p.panel_id).unwrap();
                prop_assert_eq!(&source.material, &sheet.material);
                prop_assert_eq!(source.thickness_mm, sheet.thickness_mm);
            }
        }

        // Area bound and waste range
        prop_assert!(result.total_panel_area_mm2 <= result.total_sheet_area_mm2 + 1e-6);
        prop_assert!(result.total_waste_area_mm2 >= -1e-6);
        if result.total_sheets == 0 {
            prop_assert_eq!(result.waste_percentage, 0.0);
        } else {
            prop_assert!(result.waste_percentage >= 0.0 && result.waste_percentage <= 100.0);
        }
    }

    #[test]
    fn nesting_is_idempotent(specs in prop::collection::vec(panel_strategy(), 0..10)) {
        let panels = build_panels(specs);
        let nester = SheetNester::default_config();
        let first = nester.nest(&panels, None).unwrap();
        let second = nester.nest(&panels, None).unwrap();

        prop_assert_eq!(first.total_sheets, second.total_sheets);
        prop_assert_eq!(first.waste_percentage, second.waste_percentage);
        prop_assert_eq!(first.reusable_offcuts.len(), second.reusable_offcuts.len());
    }
}
