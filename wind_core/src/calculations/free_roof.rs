//! # Open Buildings with Free Roofs
//!
//! Net pressure coefficients CNW (windward half) and CNL (leeward half) of
//! Figure 27.3-4 for monoslope free roofs, tabulated on roof slope from 0° to
//! 45° for clear and obstructed flow. Each coefficient has a positive and a
//! negative load case.
//!
//! The roof is reported in three strips: the windward quarter carries CNW,
//! the leeward quarter CNL, and the middle half their average. Net
//! coefficients already combine both faces, so there is no internal pressure:
//!
//! ```text
//! p = qh · G · CN
//! ```

use crate::calculations::{BuildingGeometry, RunContext};
use crate::input::{FlowCondition, FreeRoofGeometry};
use crate::interpolation::interpolate;
use crate::references::asce_ref;
use crate::results::{CoefficientKind, ZoneListResult};

pub const FREE_ROOF_SLOPES: [f64; 7] = [0.0, 7.5, 15.0, 22.5, 30.0, 37.5, 45.0];

/// One flow condition: positive and negative rows for CNW and CNL
struct FlowTable {
    cnw_positive: [f64; 7],
    cnw_negative: [f64; 7],
    cnl_positive: [f64; 7],
    cnl_negative: [f64; 7],
}

const CLEAR_FLOW: FlowTable = FlowTable {
    cnw_positive: [1.2, 0.9, 1.3, 1.7, 2.1, 2.1, 2.2],
    cnw_negative: [-1.1, -1.4, -1.9, -2.4, -2.5, -2.4, -2.3],
    cnl_positive: [0.3, 1.5, 1.6, 1.8, 2.1, 2.2, 2.5],
    cnl_negative: [-0.1, -1.2, -1.3, -1.6, -1.8, -1.8, -1.8],
};

const OBSTRUCTED_FLOW: FlowTable = FlowTable {
    cnw_positive: [0.5, 0.3, 0.6, 0.8, 1.0, 1.0, 1.1],
    cnw_negative: [-1.1, -1.7, -2.1, -2.3, -2.3, -2.2, -1.9],
    cnl_positive: [0.0, 0.6, 0.7, 0.9, 1.1, 1.1, 1.3],
    cnl_negative: [-1.2, -1.5, -1.5, -1.7, -1.8, -1.8, -1.8],
};

/// Net coefficient pair `[positive, negative]` for one half of the roof
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetCoefficients {
    pub windward: [f64; 2],
    pub leeward: [f64; 2],
}

impl NetCoefficients {
    pub fn middle(&self) -> [f64; 2] {
        [
            (self.windward[0] + self.leeward[0]) / 2.0,
            (self.windward[1] + self.leeward[1]) / 2.0,
        ]
    }
}

pub fn net_coefficients(slope_deg: f64, flow: FlowCondition) -> NetCoefficients {
    let table = match flow {
        FlowCondition::Clear => &CLEAR_FLOW,
        FlowCondition::Obstructed => &OBSTRUCTED_FLOW,
    };
    let at = |row: &[f64; 7]| interpolate(slope_deg, &FREE_ROOF_SLOPES, row);
    NetCoefficients {
        windward: [at(&table.cnw_positive), at(&table.cnw_negative)],
        leeward: [at(&table.cnl_positive), at(&table.cnl_negative)],
    }
}

pub fn calculate(ctx: &mut RunContext, geometry: &BuildingGeometry, roof: &FreeRoofGeometry) -> ZoneListResult {
    if geometry.slope_deg > FREE_ROOF_SLOPES[FREE_ROOF_SLOPES.len() - 1] {
        ctx.warn(format!(
            "Free roof slope {:.1}° exceeds 45°; coefficients at 45° are used",
            geometry.slope_deg
        ));
    }
    let cn = net_coefficients(geometry.slope_deg, roof.flow);
    let qh = ctx.qh.value;
    let citation = format!(
        "{} (θ = {:.1}°, {} flow)",
        ctx.cite(asce_ref::FREE_ROOF),
        geometry.slope_deg,
        match roof.flow {
            FlowCondition::Clear => "clear",
            FlowCondition::Obstructed => "obstructed",
        }
    );

    let strips = [
        ("Windward quarter", cn.windward),
        ("Middle half", cn.middle()),
        ("Leeward quarter", cn.leeward),
    ];
    let zones = strips
        .iter()
        .map(|(name, values)| ctx.zone(name, CoefficientKind::NetPressure, values.to_vec(), citation.clone(), qh))
        .collect();
    ZoneListResult { zones }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::calculate as run;
    use crate::factors::EnclosureClassification;
    use crate::input::{RoofType, StructureType, WindInput};
    use crate::results::StructureResult;

    #[test]
    fn test_flat_roof_uses_zero_slope() {
        let cn = net_coefficients(0.0, FlowCondition::Clear);
        assert_eq!(cn.windward, [1.2, -1.1]);
        assert_eq!(cn.leeward, [0.3, -0.1]);
        let middle = cn.middle();
        assert!((middle[0] - 0.75).abs() < 1e-12);
        assert!((middle[1] - (-0.6)).abs() < 1e-12);
    }

    #[test]
    fn test_slope_interpolation_and_flow() {
        // halfway between 15° and 22.5°
        let cn = net_coefficients(18.75, FlowCondition::Obstructed);
        assert!((cn.windward[0] - 0.7).abs() < 1e-12);
        assert!((cn.leeward[1] - (-1.6)).abs() < 1e-12);
        // clamped above 45°
        assert_eq!(net_coefficients(60.0, FlowCondition::Clear).leeward, [2.5, -1.8]);
    }

    #[test]
    fn test_open_building_run() {
        let input = WindInput {
            structure_type: StructureType::OpenBuilding,
            enclosure: EnclosureClassification::Open,
            roof_type: RoofType::Monoslope,
            roof_slope_deg: 15.0,
            ..WindInput::default()
        };
        let result = run(&input).unwrap();
        let StructureResult::OpenBuilding(roof) = &result.structure else {
            panic!("expected open building result");
        };
        assert_eq!(roof.zones.len(), 3);
        assert_eq!(result.factors.gcpi.value, 0.0);
        let qh = result.factors.qh.value;
        let gust = result.factors.gust.value;
        let windward = &roof.zones[0].pressure.lrfd;
        assert!((windward.positive - qh * gust * 1.3).abs() < 1e-9);
        assert!((windward.negative - qh * gust * -1.9).abs() < 1e-9);
    }
}
