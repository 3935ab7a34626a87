//! # Chimneys, Tanks, and Similar Structures
//!
//! Force coefficients of Figure 29.4-1, read on the aspect ratio h/D at
//! 1, 7, and 25 (linear between, clamped outside):
//!
//! | Section                         | h/D = 1 | 7   | 25  |
//! |---------------------------------|---------|-----|-----|
//! | Square, normal, sharp corners   | 1.3     | 1.4 | 2.0 |
//! | Square, normal, r/D ≥ 0.05      | 0.7     | 0.8 | 1.2 |
//! | Square, diagonal                | 1.0     | 1.1 | 1.5 |
//! | Hexagonal or octagonal          | 1.0     | 1.2 | 1.4 |
//! | Round, D√qz ≤ 2.5               | 0.7     | 0.8 | 1.2 |
//! | Round, D√qz > 2.5, mod. smooth  | 0.5     | 0.6 | 0.7 |
//! | Round, D√qz > 2.5, rough        | 0.7     | 0.8 | 0.9 |
//! | Round, D√qz > 2.5, very rough   | 0.8     | 1.0 | 1.2 |
//!
//! Square sections take the rounded-corner row once r/D reaches 0.05 and the
//! sharp-corner row below it. The force acts on the projected area D·h at qh.

use crate::calculations::signs::round_member_threshold;
use crate::calculations::RunContext;
use crate::input::{ChimneyGeometry, ChimneySection, SurfaceRoughness};
use crate::interpolation::interpolate;
use crate::references::asce_ref;
use crate::results::{CoefficientEntry, CoefficientKind, ForceEntry, ForceResult};
use crate::units::UnitSystem;

const ASPECT_RATIOS: [f64; 3] = [1.0, 7.0, 25.0];

const SQUARE_DIAGONAL_CF: [f64; 3] = [1.0, 1.1, 1.5];
const POLYGONAL_CF: [f64; 3] = [1.0, 1.2, 1.4];
const ROUND_SUBCRITICAL_CF: [f64; 3] = [0.7, 0.8, 1.2];
const ROUND_SMOOTH_CF: [f64; 3] = [0.5, 0.6, 0.7];
const ROUND_ROUGH_CF: [f64; 3] = [0.7, 0.8, 0.9];
const ROUND_VERY_ROUGH_CF: [f64; 3] = [0.8, 1.0, 1.2];

const SQUARE_SHARP_CF: [f64; 3] = [1.3, 1.4, 2.0];
const SQUARE_ROUNDED_CF: [f64; 3] = [0.7, 0.8, 1.2];

/// Corner radius ratio r/D from which a square section counts as rounded
pub const ROUNDED_CORNER_RATIO: f64 = 0.05;

/// Cf for a chimney or tank.
///
/// `d_sqrt_qz` is D·√qz in the run's units and only matters for round
/// sections.
pub fn force_coefficient(geometry: &ChimneyGeometry, d_sqrt_qz: f64, units: UnitSystem) -> f64 {
    let aspect = geometry.height / geometry.diameter;
    match geometry.cross_section {
        ChimneySection::Square => {
            let row = if geometry.corner_radius / geometry.diameter >= ROUNDED_CORNER_RATIO {
                &SQUARE_ROUNDED_CF
            } else {
                &SQUARE_SHARP_CF
            };
            interpolate(aspect, &ASPECT_RATIOS, row)
        }
        ChimneySection::SquareDiagonal => interpolate(aspect, &ASPECT_RATIOS, &SQUARE_DIAGONAL_CF),
        ChimneySection::Hexagonal | ChimneySection::Octagonal => interpolate(aspect, &ASPECT_RATIOS, &POLYGONAL_CF),
        ChimneySection::Round => {
            let row = if d_sqrt_qz > round_member_threshold(units) {
                match geometry.roughness {
                    SurfaceRoughness::ModeratelySmooth => &ROUND_SMOOTH_CF,
                    SurfaceRoughness::Rough => &ROUND_ROUGH_CF,
                    SurfaceRoughness::VeryRough => &ROUND_VERY_ROUGH_CF,
                }
            } else {
                &ROUND_SUBCRITICAL_CF
            };
            interpolate(aspect, &ASPECT_RATIOS, row)
        }
    }
}

fn section_name(section: ChimneySection) -> &'static str {
    match section {
        ChimneySection::Square => "Square, wind normal to face",
        ChimneySection::SquareDiagonal => "Square, wind along diagonal",
        ChimneySection::Hexagonal => "Hexagonal",
        ChimneySection::Octagonal => "Octagonal",
        ChimneySection::Round => "Round",
    }
}

pub fn calculate(ctx: &mut RunContext, geometry: &ChimneyGeometry) -> ForceResult {
    let units = ctx.site.units;
    let qh = ctx.qh.value;
    let d_sqrt_qz = geometry.diameter * qh.sqrt();
    let cf = force_coefficient(geometry, d_sqrt_qz, units);

    let mut citation = format!(
        "{} (h/D = {:.2}",
        ctx.cite(asce_ref::CHIMNEY_TANK),
        geometry.height / geometry.diameter
    );
    match geometry.cross_section {
        ChimneySection::Square => citation.push_str(&format!(", r/D = {:.3}", geometry.corner_radius / geometry.diameter)),
        ChimneySection::Round => citation.push_str(&format!(", D√qz = {:.2}", d_sqrt_qz)),
        _ => {}
    }
    citation.push(')');
    log::debug!("chimney Cf = {:.3}", cf);

    ForceResult {
        entries: vec![ForceEntry::new(
            CoefficientEntry::new(section_name(geometry.cross_section), CoefficientKind::Force, vec![cf], citation),
            qh,
            ctx.gust.value,
            Some(geometry.diameter * geometry.height),
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::calculate as run;
    use crate::input::{StructureType, WindInput};
    use crate::results::StructureResult;

    fn chimney(section: ChimneySection, diameter: f64, height: f64) -> ChimneyGeometry {
        ChimneyGeometry {
            cross_section: section,
            diameter,
            height,
            corner_radius: 0.0,
            roughness: SurfaceRoughness::ModeratelySmooth,
        }
    }

    #[test]
    fn test_square_sharp_and_rounded() {
        let sharp = chimney(ChimneySection::Square, 10.0, 70.0);
        assert_eq!(force_coefficient(&sharp, 0.0, UnitSystem::Imperial), 1.4);

        let rounded = ChimneyGeometry {
            corner_radius: 0.5,
            ..sharp
        };
        assert!((force_coefficient(&rounded, 0.0, UnitSystem::Imperial) - 0.8).abs() < 1e-12);

        // r/D = 0.025 is still sharp
        let partial = ChimneyGeometry {
            corner_radius: 0.25,
            ..sharp
        };
        assert_eq!(force_coefficient(&partial, 0.0, UnitSystem::Imperial), 1.4);

        // r/D above 0.05 stays on the rounded row
        let very_round = ChimneyGeometry {
            corner_radius: 2.0,
            ..sharp
        };
        assert!((force_coefficient(&very_round, 0.0, UnitSystem::Imperial) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_aspect_ratio_interpolation() {
        // h/D = 16 is halfway between 7 and 25
        let hex = chimney(ChimneySection::Hexagonal, 5.0, 80.0);
        assert!((force_coefficient(&hex, 0.0, UnitSystem::Imperial) - 1.3).abs() < 1e-12);
        // clamped below h/D = 1
        let squat = chimney(ChimneySection::SquareDiagonal, 20.0, 10.0);
        assert_eq!(force_coefficient(&squat, 0.0, UnitSystem::Imperial), 1.0);
    }

    #[test]
    fn test_round_regimes() {
        let round = chimney(ChimneySection::Round, 10.0, 70.0);
        assert_eq!(force_coefficient(&round, 2.0, UnitSystem::Imperial), 0.8);
        assert_eq!(force_coefficient(&round, 50.0, UnitSystem::Imperial), 0.6);
        let very_rough = ChimneyGeometry {
            roughness: SurfaceRoughness::VeryRough,
            ..round
        };
        assert_eq!(force_coefficient(&very_rough, 50.0, UnitSystem::Imperial), 1.0);
        // metric threshold is 5.3
        assert_eq!(force_coefficient(&round, 5.0, UnitSystem::Metric), 0.8);
    }

    #[test]
    fn test_chimney_run_force() {
        let input = WindInput {
            structure_type: StructureType::ChimneyTank,
            chimney: Some(chimney(ChimneySection::Round, 10.0, 70.0)),
            ..WindInput::default()
        };
        let result = run(&input).unwrap();
        let StructureResult::ChimneyTank(force) = &result.structure else {
            panic!("expected chimney result");
        };
        let entry = &force.entries[0];
        // D√qz is far above 2.5 at this size
        assert_eq!(entry.coefficient.values, vec![0.6]);
        assert_eq!(entry.area, Some(700.0));
        assert!((entry.q - result.factors.qh.value).abs() < 1e-12);
        let expected = entry.q * entry.gust * 0.6 * 700.0;
        assert!((entry.force_lrfd.unwrap() - expected).abs() < 1e-9);
    }
}
