//! # Signs and Open Frames
//!
//! Force coefficients for single-plane open signs and lattice frames
//! (Figure 29.4-2) and solid freestanding signs and walls (Figure 29.3-1).
//!
//! ```text
//! F = qz · G · Cf · As
//! ```
//!
//! ## Open frames
//!
//! | ε        | 0.1 | 0.3 | 0.7 |
//! |----------|-----|-----|-----|
//! | Flat     | 2.0 | 1.8 | 1.6 |
//! | Round, D√qz ≤ 2.5 | 1.2 | 1.3 | 1.5 |
//! | Round, D√qz > 2.5 | 0.8 | 0.9 | 1.1 |
//!
//! The round-member threshold is 5.3 for D in m and qz in N/m².
//!
//! ## Solid signs
//!
//! Cf is read on the aspect ratio B/s for the two clearance bands s/h = 1
//! and s/h ≤ 0.16, then blended linearly on s/h.

use once_cell::sync::Lazy;

use crate::calculations::RunContext;
use crate::input::{MemberShape, OpenSignGeometry, SolidSignGeometry};
use crate::interpolation::{interpolate, Axis, Grid};
use crate::references::asce_ref;
use crate::results::{CoefficientEntry, CoefficientKind, ForceEntry, ForceResult};
use crate::units::UnitSystem;

const SOLIDITY: [f64; 3] = [0.1, 0.3, 0.7];
const FLAT_MEMBER_CF: [f64; 3] = [2.0, 1.8, 1.6];
const ROUND_SUBCRITICAL_CF: [f64; 3] = [1.2, 1.3, 1.5];
const ROUND_SUPERCRITICAL_CF: [f64; 3] = [0.8, 0.9, 1.1];

const ASPECT_RATIOS: [f64; 12] = [0.05, 0.1, 0.2, 0.5, 1.0, 2.0, 4.0, 5.0, 10.0, 20.0, 30.0, 45.0];

#[rustfmt::skip]
static SOLID_SIGN_CF: Lazy<Grid> = Lazy::new(|| {
    Grid::new(
        vec![Axis::linear(&[0.16, 1.0]), Axis::linear(&ASPECT_RATIOS)],
        vec![
            // s/h ≤ 0.16
            1.95, 1.90, 1.85, 1.85, 1.80, 1.80, 1.85, 1.85, 1.85, 1.90, 1.90, 1.95,
            // s/h = 1
            1.80, 1.70, 1.65, 1.55, 1.45, 1.40, 1.35, 1.35, 1.30, 1.30, 1.30, 1.30,
        ],
    )
});

/// D√qz above which round members are in the supercritical regime
pub fn round_member_threshold(units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Imperial => 2.5,
        UnitSystem::Metric => 5.3,
    }
}

/// Open frame Cf at solidity ε.
///
/// `d_sqrt_qz` selects the round-member regime; without it round members use
/// the subcritical (larger) values.
pub fn open_frame_cf(solidity: f64, shape: MemberShape, d_sqrt_qz: Option<f64>, units: UnitSystem) -> f64 {
    let row: &[f64; 3] = match shape {
        MemberShape::Flat => &FLAT_MEMBER_CF,
        MemberShape::Round => match d_sqrt_qz {
            Some(d) if d > round_member_threshold(units) => &ROUND_SUPERCRITICAL_CF,
            _ => &ROUND_SUBCRITICAL_CF,
        },
    };
    interpolate(solidity, &SOLIDITY, row)
}

/// Solid sign Cf for aspect ratio B/s and clearance ratio s/h
pub fn solid_sign_cf(aspect_ratio: f64, clearance_ratio: f64) -> f64 {
    SOLID_SIGN_CF.lookup(&[clearance_ratio, aspect_ratio])
}

pub fn open_sign(ctx: &mut RunContext, geometry: &OpenSignGeometry, height: f64) -> ForceResult {
    let units = ctx.site.units;
    let qz = ctx.qz(height);
    let d_sqrt_qz = geometry.member_diameter.map(|d| d * qz.sqrt());
    let cf = open_frame_cf(geometry.solidity_ratio, geometry.member_shape, d_sqrt_qz, units);
    let mut citation = format!("{} (ε = {:.2}", ctx.cite(asce_ref::OPEN_SIGN), geometry.solidity_ratio);
    if let (MemberShape::Round, Some(d)) = (geometry.member_shape, d_sqrt_qz) {
        citation.push_str(&format!(", D√qz = {:.2}", d));
    }
    citation.push(')');

    let area = geometry
        .gross_area
        .filter(|a| a.is_finite() && *a > 0.0)
        .map(|a| a * geometry.solidity_ratio);
    let name = match geometry.member_shape {
        MemberShape::Flat => "Open frame (flat members)",
        MemberShape::Round => "Open frame (round members)",
    };
    log::debug!("open sign Cf = {:.3}", cf);
    ForceResult {
        entries: vec![ForceEntry::new(
            CoefficientEntry::new(name, CoefficientKind::Force, vec![cf], citation),
            qz,
            ctx.gust.value,
            area,
        )],
    }
}

pub fn solid_sign(ctx: &mut RunContext, geometry: &SolidSignGeometry) -> ForceResult {
    let aspect = geometry.width / geometry.depth;
    let clearance = geometry.depth / geometry.top_height;
    let cf = solid_sign_cf(aspect, clearance);
    let citation = format!(
        "{} (B/s = {:.2}, s/h = {:.2})",
        ctx.cite(asce_ref::SOLID_SIGN),
        aspect,
        clearance
    );
    ForceResult {
        entries: vec![ForceEntry::new(
            CoefficientEntry::new("Sign face (Cases A and B)", CoefficientKind::Force, vec![cf], citation),
            ctx.qh.value,
            ctx.gust.value,
            Some(geometry.width * geometry.depth),
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::calculate;
    use crate::input::{StructureType, WindInput};
    use crate::results::StructureResult;

    #[test]
    fn test_open_sign_flat_members() {
        let cf = open_frame_cf(0.3, MemberShape::Flat, None, UnitSystem::Imperial);
        assert!((cf - 1.8).abs() < 1e-12);
        assert!((open_frame_cf(0.2, MemberShape::Flat, None, UnitSystem::Imperial) - 1.9).abs() < 1e-12);
        assert_eq!(open_frame_cf(0.05, MemberShape::Flat, None, UnitSystem::Imperial), 2.0);
        assert_eq!(open_frame_cf(0.9, MemberShape::Flat, None, UnitSystem::Imperial), 1.6);
    }

    #[test]
    fn test_round_member_regime() {
        let sub = open_frame_cf(0.3, MemberShape::Round, Some(2.0), UnitSystem::Imperial);
        let sup = open_frame_cf(0.3, MemberShape::Round, Some(3.0), UnitSystem::Imperial);
        assert!((sub - 1.3).abs() < 1e-12);
        assert!((sup - 0.9).abs() < 1e-12);
        // metric threshold
        let metric = open_frame_cf(0.3, MemberShape::Round, Some(5.0), UnitSystem::Metric);
        assert!((metric - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_solid_sign_bands() {
        assert_eq!(solid_sign_cf(1.0, 1.0), 1.45);
        assert_eq!(solid_sign_cf(1.0, 0.1), 1.80);
        assert_eq!(solid_sign_cf(100.0, 1.0), 1.30);
        // blended between the two bands
        let mid = solid_sign_cf(2.0, 0.58);
        assert!((mid - 1.60).abs() < 1e-12);
    }

    #[test]
    fn test_open_sign_run_reports_force() {
        let input = WindInput {
            structure_type: StructureType::OpenSign,
            open_sign: Some(OpenSignGeometry {
                solidity_ratio: 0.3,
                member_shape: MemberShape::Flat,
                member_diameter: None,
                gross_area: Some(200.0),
                height: Some(20.0),
            }),
            ..WindInput::default()
        };
        let result = calculate(&input).unwrap();
        let StructureResult::OpenSign(force) = &result.structure else {
            panic!("expected open sign result");
        };
        let entry = &force.entries[0];
        assert!((entry.coefficient.values[0] - 1.8).abs() < 1e-12);
        assert_eq!(entry.area, Some(60.0));
        let expected = entry.q * 0.85 * 1.8 * 60.0;
        assert!((entry.force_lrfd.unwrap() - expected).abs() < 1e-9);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_solid_sign_run() {
        let input = WindInput {
            structure_type: StructureType::SolidSign,
            solid_sign: Some(SolidSignGeometry {
                width: 20.0,
                depth: 10.0,
                top_height: 10.0,
            }),
            ..WindInput::default()
        };
        let result = calculate(&input).unwrap();
        let StructureResult::SolidSign(force) = &result.structure else {
            panic!("expected solid sign result");
        };
        assert_eq!(force.entries[0].coefficient.values, vec![1.40]);
        assert_eq!(force.entries[0].area, Some(200.0));
    }
}
