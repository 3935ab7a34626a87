//! # Parapets, Overhangs, and Rooftop Equipment
//!
//! Optional building sub-results. An absent block or a zero dimension means
//! the item does not exist and gives "not applicable" silently; a block that
//! is present but unusable gives "not applicable" with a warning.
//!
//! | Item               | Coefficient                         | Pressure / force        |
//! |--------------------|-------------------------------------|-------------------------|
//! | Parapet            | GCpn +1.5 windward, −1.0 leeward    | p = qp·GCpn             |
//! | Overhang           | Cp 0.8 on the bottom surface        | p = qh·G·Cp             |
//! | Rooftop equipment  | GCr on unit L/h and W/h             | F = qh·GCr·A            |
//! | Open scaffold      | open-frame Cf at its solidity       | F = qz·G·Cf·Af          |

use once_cell::sync::Lazy;

use crate::calculations::building::BuildingGeometry;
use crate::calculations::{signs, RunContext};
use crate::input::{
    EquipmentDimensions, EquipmentKind, EquipmentLocation, MemberShape, ParapetGeometry, RooftopEquipment,
};
use crate::interpolation::{Axis, Grid};
use crate::pressure::{PressurePair, PressureResult};
use crate::references::asce_ref;
use crate::results::{
    Applicability, CoefficientEntry, CoefficientKind, ForceEntry, ForceResult, ParapetResult, ZoneListResult,
    ZoneResult,
};

pub const PARAPET_WINDWARD_GCPN: f64 = 1.5;
pub const PARAPET_LEEWARD_GCPN: f64 = -1.0;
pub const OVERHANG_BOTTOM_CP: f64 = 0.8;

const EQUIPMENT_RATIOS: [f64; 4] = [0.5, 1.0, 2.0, 4.0];

// rows: length/height, columns: width/height
#[rustfmt::skip]
static GCR_HORIZONTAL: Lazy<Grid> = Lazy::new(|| {
    Grid::new(
        vec![Axis::linear(&EQUIPMENT_RATIOS), Axis::linear(&EQUIPMENT_RATIOS)],
        vec![
            1.9, 1.8, 1.6,  1.4,
            1.8, 1.7, 1.5,  1.3,
            1.6, 1.5, 1.35, 1.15,
            1.4, 1.3, 1.15, 1.0,
        ],
    )
});

#[rustfmt::skip]
static GCR_VERTICAL: Lazy<Grid> = Lazy::new(|| {
    Grid::new(
        vec![Axis::linear(&EQUIPMENT_RATIOS), Axis::linear(&EQUIPMENT_RATIOS)],
        vec![
            1.5,  1.45, 1.35, 1.25,
            1.45, 1.4,  1.3,  1.2,
            1.35, 1.3,  1.2,  1.1,
            1.25, 1.2,  1.1,  1.0,
        ],
    )
});

fn single_value_zone(name: &str, kind: CoefficientKind, coefficient: f64, pressure: f64, citation: &str) -> ZoneResult {
    ZoneResult {
        coefficient: CoefficientEntry::new(name, kind, vec![coefficient], citation),
        pressure: PressureResult::from_lrfd(name, PressurePair::new(pressure, pressure), citation),
    }
}

// ============================================================================
// Parapet
// ============================================================================

/// Parapet net pressures at qp, the velocity pressure at the parapet top
pub fn parapet_pressures(ctx: &RunContext, parapet: &ParapetGeometry, roof_height: f64) -> ParapetResult {
    let qp = ctx.velocity.qz(roof_height + parapet.height);
    let citation = ctx.cite(asce_ref::PARAPET);
    let zones = vec![
        single_value_zone(
            "Windward parapet",
            CoefficientKind::Parapet,
            PARAPET_WINDWARD_GCPN,
            qp.value * PARAPET_WINDWARD_GCPN,
            &citation,
        ),
        single_value_zone(
            "Leeward parapet",
            CoefficientKind::Parapet,
            PARAPET_LEEWARD_GCPN,
            qp.value * PARAPET_LEEWARD_GCPN,
            &citation,
        ),
    ];
    ParapetResult { qp, zones }
}

pub fn parapet(ctx: &mut RunContext, geometry: &BuildingGeometry) -> Applicability<ParapetResult> {
    let Some(parapet) = ctx.input.parapet else {
        return Applicability::not_applicable("No parapet");
    };
    if parapet.height == 0.0 {
        return Applicability::not_applicable("No parapet");
    }
    if !(parapet.height.is_finite() && parapet.height > 0.0) {
        let reason = format!("Parapet height {} is not a positive number", parapet.height);
        ctx.warn(reason.clone());
        return Applicability::not_applicable(reason);
    }
    Applicability::Computed(parapet_pressures(ctx, &parapet, geometry.height))
}

// ============================================================================
// Overhang
// ============================================================================

pub fn overhang(ctx: &mut RunContext) -> Applicability<ZoneListResult> {
    let Some(overhang) = ctx.input.overhang else {
        return Applicability::not_applicable("No roof overhang");
    };
    if overhang.length == 0.0 {
        return Applicability::not_applicable("No roof overhang");
    }
    if !(overhang.length.is_finite() && overhang.length > 0.0) {
        let reason = format!("Overhang length {} is not a positive number", overhang.length);
        ctx.warn(reason.clone());
        return Applicability::not_applicable(reason);
    }
    let citation = ctx.cite(asce_ref::OVERHANG);
    let p = ctx.qh.value * ctx.gust.value * OVERHANG_BOTTOM_CP;
    Applicability::Computed(ZoneListResult {
        zones: vec![single_value_zone(
            "Overhang bottom surface",
            CoefficientKind::ExternalPressure,
            OVERHANG_BOTTOM_CP,
            p,
            &citation,
        )],
    })
}

// ============================================================================
// Rooftop equipment
// ============================================================================

/// Horizontal GCr for a unit with length/height and width/height ratios
pub fn gcr_horizontal(length_ratio: f64, width_ratio: f64) -> f64 {
    GCR_HORIZONTAL.lookup(&[length_ratio, width_ratio])
}

/// Vertical (uplift) GCr for a unit with length/height and width/height ratios
pub fn gcr_vertical(length_ratio: f64, width_ratio: f64) -> f64 {
    GCR_VERTICAL.lookup(&[length_ratio, width_ratio])
}

fn usable_dimensions(dims: Option<EquipmentDimensions>) -> Option<EquipmentDimensions> {
    dims.filter(|d| is_usable(d.length) && is_usable(d.width) && is_usable(d.height))
}

fn is_absent(value: f64) -> bool {
    value == 0.0
}

fn is_usable(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

pub fn rooftop(ctx: &mut RunContext, geometry: &BuildingGeometry) -> Applicability<ForceResult> {
    let Some(equipment) = ctx.input.rooftop_equipment else {
        return Applicability::not_applicable("No rooftop equipment");
    };
    if is_absent(equipment.frontal_area) && is_absent(equipment.plan_area) && equipment.dimensions.is_none() {
        return Applicability::not_applicable("No rooftop equipment");
    }
    match equipment.kind {
        EquipmentKind::Solid => solid_equipment(ctx, &equipment),
        EquipmentKind::OpenScaffold => open_scaffold(ctx, geometry, &equipment),
    }
}

fn solid_equipment(ctx: &mut RunContext, equipment: &RooftopEquipment) -> Applicability<ForceResult> {
    if equipment.location == EquipmentLocation::Ground {
        let reason = "GCr applies to rooftop equipment only; ground-mounted solid equipment not evaluated";
        ctx.warn(reason);
        return Applicability::not_applicable(reason);
    }
    let Some(dims) = usable_dimensions(equipment.dimensions) else {
        let reason = "Solid rooftop equipment needs positive length, width, and height";
        ctx.warn(reason);
        return Applicability::not_applicable(reason);
    };
    let length_ratio = dims.length / dims.height;
    let width_ratio = dims.width / dims.height;
    let citation = format!(
        "{} (L/h = {:.2}, W/h = {:.2})",
        ctx.cite(asce_ref::ROOFTOP_EQUIPMENT),
        length_ratio,
        width_ratio
    );
    let or_default = |given: f64, derived: f64| if is_usable(given) { given } else { derived };
    let frontal = or_default(equipment.frontal_area, dims.width * dims.height);
    let plan = or_default(equipment.plan_area, dims.length * dims.width);
    let qh = ctx.qh.value;

    let entries = vec![
        ForceEntry::new(
            CoefficientEntry::new(
                "Equipment horizontal",
                CoefficientKind::Rooftop,
                vec![gcr_horizontal(length_ratio, width_ratio)],
                citation.clone(),
            ),
            qh,
            1.0,
            Some(frontal),
        ),
        ForceEntry::new(
            CoefficientEntry::new(
                "Equipment vertical uplift",
                CoefficientKind::Rooftop,
                vec![gcr_vertical(length_ratio, width_ratio)],
                citation,
            ),
            qh,
            1.0,
            Some(plan),
        ),
    ];
    Applicability::Computed(ForceResult { entries })
}

fn open_scaffold(
    ctx: &mut RunContext,
    geometry: &BuildingGeometry,
    equipment: &RooftopEquipment,
) -> Applicability<ForceResult> {
    let solidity = match equipment.solidity_ratio {
        Some(e) if e.is_finite() && e > 0.0 && e <= 1.0 => e,
        _ => {
            let reason = "Open scaffold needs a solidity ratio in (0, 1]";
            ctx.warn(reason);
            return Applicability::not_applicable(reason);
        }
    };
    if !is_usable(equipment.frontal_area) {
        let reason = "Open scaffold frontal area is not a positive number";
        ctx.warn(reason);
        return Applicability::not_applicable(reason);
    }
    let height = match equipment.location {
        EquipmentLocation::Rooftop => geometry.height,
        EquipmentLocation::Ground => equipment.height.filter(|h| is_usable(*h)).unwrap_or(geometry.height),
    };
    let qz = ctx.qz(height);
    let cf = signs::open_frame_cf(solidity, MemberShape::Flat, None, ctx.site.units);
    let entry = ForceEntry::new(
        CoefficientEntry::new(
            "Open scaffold",
            CoefficientKind::Force,
            vec![cf],
            format!("{} (ε = {:.2})", ctx.cite(asce_ref::OPEN_SIGN), solidity),
        ),
        qz,
        ctx.gust.value,
        Some(equipment.frontal_area * solidity),
    );
    Applicability::Computed(ForceResult { entries: vec![entry] })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::calculate as run;
    use crate::input::{OverhangGeometry, WindInput};

    #[test]
    fn test_gcr_ratios() {
        assert_eq!(gcr_horizontal(0.2, 0.2), 1.9);
        assert_eq!(gcr_horizontal(8.0, 8.0), 1.0);
        assert_eq!(gcr_vertical(1.0, 1.0), 1.4);
        // between samples on both axes
        assert!((gcr_horizontal(1.5, 1.5) - 1.5125).abs() < 1e-12);
        assert!((gcr_vertical(1.5, 1.5) - 1.3).abs() < 1e-12);
        // one axis off-sample
        assert!((gcr_horizontal(3.0, 2.0) - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_parapet_uses_qp_at_top() {
        let input = WindInput {
            parapet: Some(ParapetGeometry { height: 4.0 }),
            ..WindInput::default()
        };
        let result = run(&input).unwrap();
        let parapet = result.building().unwrap().parapet.computed().unwrap();
        assert!(parapet.qp.value > result.factors.qh.value);
        let windward = &parapet.zones[0].pressure.lrfd;
        assert!((windward.positive - 1.5 * parapet.qp.value).abs() < 1e-9);
        assert_eq!(windward.positive, windward.negative);
    }

    #[test]
    fn test_zero_parapet_is_silent() {
        let input = WindInput {
            parapet: Some(ParapetGeometry { height: 0.0 }),
            overhang: Some(OverhangGeometry { length: 0.0 }),
            ..WindInput::default()
        };
        let result = run(&input).unwrap();
        let building = result.building().unwrap();
        assert!(!building.parapet.is_computed());
        assert!(!building.overhang.is_computed());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_overhang_bottom_surface() {
        let input = WindInput {
            overhang: Some(OverhangGeometry { length: 2.0 }),
            ..WindInput::default()
        };
        let result = run(&input).unwrap();
        let overhang = result.building().unwrap().overhang.computed().unwrap();
        let p = overhang.zones[0].pressure.lrfd.positive;
        assert!((p - result.factors.qh.value * 0.85 * 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_rooftop_unit_forces() {
        let input = WindInput {
            rooftop_equipment: Some(RooftopEquipment {
                kind: EquipmentKind::Solid,
                frontal_area: 0.0,
                plan_area: 0.0,
                dimensions: Some(EquipmentDimensions {
                    length: 6.0,
                    width: 6.0,
                    height: 4.0,
                }),
                solidity_ratio: None,
                location: EquipmentLocation::Rooftop,
                height: None,
            }),
            ..WindInput::default()
        };
        let result = run(&input).unwrap();
        let rooftop = result.building().unwrap().rooftop.computed().unwrap();
        assert_eq!(rooftop.entries.len(), 2);
        // L/h = W/h = 1.5; areas come from the box
        let horizontal = &rooftop.entries[0];
        assert!((horizontal.coefficient.values[0] - 1.5125).abs() < 1e-12);
        assert_eq!(horizontal.area, Some(24.0));
        let f = horizontal.force_lrfd.unwrap();
        assert!((f - result.factors.qh.value * 1.5125 * 24.0).abs() < 1e-9);
        let uplift = &rooftop.entries[1];
        assert!((uplift.coefficient.values[0] - 1.3).abs() < 1e-12);
        assert_eq!(uplift.area, Some(36.0));
    }

    #[test]
    fn test_solid_unit_without_dimensions_warns() {
        let input = WindInput {
            rooftop_equipment: Some(RooftopEquipment {
                kind: EquipmentKind::Solid,
                frontal_area: 18.0,
                plan_area: 60.0,
                dimensions: None,
                solidity_ratio: None,
                location: EquipmentLocation::Rooftop,
                height: None,
            }),
            ..WindInput::default()
        };
        let result = run(&input).unwrap();
        assert!(!result.building().unwrap().rooftop.is_computed());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_scaffold_without_solidity_warns() {
        let input = WindInput {
            rooftop_equipment: Some(RooftopEquipment {
                kind: EquipmentKind::OpenScaffold,
                frontal_area: 100.0,
                plan_area: 0.0,
                dimensions: None,
                solidity_ratio: None,
                location: EquipmentLocation::Ground,
                height: Some(20.0),
            }),
            ..WindInput::default()
        };
        let result = run(&input).unwrap();
        assert!(!result.building().unwrap().rooftop.is_computed());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_scaffold_force() {
        let input = WindInput {
            rooftop_equipment: Some(RooftopEquipment {
                kind: EquipmentKind::OpenScaffold,
                frontal_area: 100.0,
                plan_area: 0.0,
                dimensions: None,
                solidity_ratio: Some(0.3),
                location: EquipmentLocation::Ground,
                height: Some(20.0),
            }),
            ..WindInput::default()
        };
        let result = run(&input).unwrap();
        let rooftop = result.building().unwrap().rooftop.computed().unwrap();
        let entry = &rooftop.entries[0];
        assert!((entry.coefficient.values[0] - 1.8).abs() < 1e-12);
        assert_eq!(entry.area, Some(30.0));
    }
}
