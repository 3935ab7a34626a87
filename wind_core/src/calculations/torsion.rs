//! # Torsional Load Cases
//!
//! Figure 27.3-8 cases for enclosed and partially enclosed buildings. Wall
//! forces come from the windward and leeward external pressures acting on
//! the full wall face (internal pressure cancels across the building):
//!
//! ```text
//! Fw = qh·G·0.8·(B·h)        Fl = qh·G·|Cp,leeward|·(B·h)
//! Case 2:  M = 0.75·(Fw + Fl) · 0.15·B           (each principal axis)
//! Case 4:  M = 0.563·(Fw,x + Fl,x)·0.15·Bx + 0.563·(Fw,y + Fl,y)·0.15·By
//! ```
//!
//! Low-rise buildings get the per-axis cases; taller buildings also get the
//! combined case.

use crate::calculations::building::{leeward_wall_cp, BuildingGeometry, WINDWARD_WALL_CP};
use crate::calculations::RunContext;
use crate::references::asce_ref;
use crate::results::{Applicability, HeightClass, TorsionCase, TorsionResult};

/// Reduction on wall pressures for the single-axis torsional case
pub const SINGLE_AXIS_FACTOR: f64 = 0.75;
/// Reduction for the combined two-axis case (0.75 × 0.75)
pub const COMBINED_FACTOR: f64 = 0.563;
/// Eccentricity as a fraction of the face width
pub const ECCENTRICITY_RATIO: f64 = 0.15;

/// Unreduced windward and leeward wall forces for wind normal to `width`
pub fn wall_forces(q: f64, gust: f64, geometry: &BuildingGeometry) -> (f64, f64) {
    let face = geometry.width * geometry.height;
    let windward = (q * gust * WINDWARD_WALL_CP * face).abs();
    let leeward = (q * gust * leeward_wall_cp(geometry.l_over_b()) * face).abs();
    (windward, leeward)
}

fn axis_case(name: &str, q: f64, gust: f64, geometry: &BuildingGeometry, citation: &str) -> TorsionCase {
    let (fw, fl) = wall_forces(q, gust, geometry);
    let windward = SINGLE_AXIS_FACTOR * fw;
    let leeward = SINGLE_AXIS_FACTOR * fl;
    let e = ECCENTRICITY_RATIO * geometry.width;
    TorsionCase::new(name, windward, leeward, e, (windward + leeward) * e, citation)
}

pub fn calculate(ctx: &mut RunContext, geometry: &BuildingGeometry) -> Applicability<TorsionResult> {
    if !geometry.enclosure.has_torsion_cases() {
        return Applicability::not_applicable(format!(
            "Torsional cases do not apply to {} buildings",
            geometry.enclosure.display_name().to_lowercase()
        ));
    }
    let q = ctx.qh.value;
    let gust = ctx.gust.value;
    let citation = ctx.cite(asce_ref::TORSION);
    let turned = geometry.transposed();

    let mut cases = vec![
        axis_case("Case 2, wind normal to B", q, gust, geometry, &citation),
        axis_case("Case 2, wind normal to L", q, gust, &turned, &citation),
    ];

    if ctx.height_class == HeightClass::HighRise {
        let (fwx, flx) = wall_forces(q, gust, geometry);
        let (fwy, fly) = wall_forces(q, gust, &turned);
        let ex = ECCENTRICITY_RATIO * geometry.width;
        let ey = ECCENTRICITY_RATIO * turned.width;
        let windward = COMBINED_FACTOR * (fwx + fwy);
        let leeward = COMBINED_FACTOR * (flx + fly);
        let moment = COMBINED_FACTOR * (fwx + flx) * ex + COMBINED_FACTOR * (fwy + fly) * ey;
        cases.push(TorsionCase::new("Case 4, combined", windward, leeward, ex.max(ey), moment, citation));
    }

    Applicability::Computed(TorsionResult { cases })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::calculate as run;
    use crate::factors::EnclosureClassification;
    use crate::input::{RoofType, WindInput};

    fn geometry() -> BuildingGeometry {
        BuildingGeometry {
            height: 30.0,
            length: 100.0,
            width: 50.0,
            roof_type: RoofType::Flat,
            slope_deg: 0.0,
            enclosure: EnclosureClassification::Enclosed,
        }
    }

    #[test]
    fn test_wall_forces() {
        // L/B = 2 → leeward −0.3
        let (fw, fl) = wall_forces(20.0, 0.85, &geometry());
        assert!((fw - 20.0 * 0.85 * 0.8 * 1500.0).abs() < 1e-9);
        assert!((fl - 20.0 * 0.85 * 0.3 * 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_case_moment() {
        let case = axis_case("x", 20.0, 0.85, &geometry(), "ref");
        let (fw, fl) = wall_forces(20.0, 0.85, &geometry());
        assert!((case.moment_lrfd - 0.75 * (fw + fl) * 7.5).abs() < 1e-9);
        assert_eq!(case.moment_asd, case.moment_lrfd * 0.6);
    }

    #[test]
    fn test_low_rise_two_cases() {
        let result = run(&WindInput::default()).unwrap();
        let torsion = result.building().unwrap().torsion.computed().unwrap();
        assert_eq!(torsion.cases.len(), 2);
        // eccentricities use the face width of each direction
        assert!((torsion.cases[0].eccentricity - 9.0).abs() < 1e-12);
        assert!((torsion.cases[1].eccentricity - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_tall_building_adds_combined_case() {
        let input = WindInput {
            mean_roof_height: 90.0,
            fundamental_period_s: Some(1.0),
            ..WindInput::default()
        };
        let result = run(&input).unwrap();
        let torsion = result.building().unwrap().torsion.computed().unwrap();
        assert_eq!(torsion.cases.len(), 3);
        assert!(torsion.cases[2].name.contains("combined"));
    }

    #[test]
    fn test_open_building_not_applicable() {
        let input = WindInput {
            enclosure: EnclosureClassification::Open,
            ..WindInput::default()
        };
        let result = run(&input).unwrap();
        assert!(!result.building().unwrap().torsion.is_computed());
        assert!(result.warnings.is_empty());
    }
}
