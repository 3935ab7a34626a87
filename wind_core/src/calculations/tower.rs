//! # Trussed Towers
//!
//! Figure 29.4-3 force coefficients as quadratics in the solidity ratio ε:
//!
//! ```text
//! square:      Cf = 4.0ε² − 5.9ε + 4.0
//! triangular:  Cf = 3.4ε² − 4.7ε + 3.4
//! ```
//!
//! Round members scale Cf by `0.51ε² + 0.57` (at most 1.0). Wind along the
//! diagonal of a square tower scales it by `1 + 0.75ε` (at most 1.2).

use crate::calculations::RunContext;
use crate::input::{MemberShape, TowerGeometry, TowerSection};
use crate::references::asce_ref;
use crate::results::{CoefficientEntry, CoefficientKind, ForceEntry, ForceResult};

/// Cf for flat members with wind normal to a face
pub fn base_coefficient(section: TowerSection, solidity: f64) -> f64 {
    match section {
        TowerSection::Square => 4.0 * solidity.powi(2) - 5.9 * solidity + 4.0,
        TowerSection::Triangular => 3.4 * solidity.powi(2) - 4.7 * solidity + 3.4,
    }
}

pub fn round_member_factor(solidity: f64) -> f64 {
    (0.51 * solidity.powi(2) + 0.57).min(1.0)
}

pub fn diagonal_wind_factor(solidity: f64) -> f64 {
    (1.0 + 0.75 * solidity).min(1.2)
}

pub fn force_coefficient(geometry: &TowerGeometry) -> f64 {
    let eps = geometry.solidity_ratio;
    let mut cf = base_coefficient(geometry.cross_section, eps);
    if geometry.member_shape == MemberShape::Round {
        cf *= round_member_factor(eps);
    }
    if geometry.diagonal_wind && geometry.cross_section == TowerSection::Square {
        cf *= diagonal_wind_factor(eps);
    }
    cf
}

pub fn calculate(ctx: &mut RunContext, geometry: &TowerGeometry) -> ForceResult {
    if geometry.diagonal_wind && geometry.cross_section == TowerSection::Triangular {
        ctx.warn("Diagonal wind factor applies to square towers only; ignored for a triangular tower");
    }
    let cf = force_coefficient(geometry);
    let name = match geometry.cross_section {
        TowerSection::Square if geometry.diagonal_wind => "Square tower, diagonal wind",
        TowerSection::Square => "Square tower",
        TowerSection::Triangular => "Triangular tower",
    };
    let citation = format!(
        "{} (ε = {:.2}, {} members)",
        ctx.cite(asce_ref::TRUSSED_TOWER),
        geometry.solidity_ratio,
        match geometry.member_shape {
            MemberShape::Flat => "flat",
            MemberShape::Round => "round",
        }
    );
    let area = geometry.face_area.filter(|a| a.is_finite() && *a > 0.0);

    ForceResult {
        entries: vec![ForceEntry::new(
            CoefficientEntry::new(name, CoefficientKind::Force, vec![cf], citation),
            ctx.qh.value,
            ctx.gust.value,
            area,
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::calculate as run;
    use crate::input::{StructureType, WindInput};
    use crate::results::StructureResult;

    fn tower(section: TowerSection, shape: MemberShape, solidity: f64) -> TowerGeometry {
        TowerGeometry {
            cross_section: section,
            member_shape: shape,
            solidity_ratio: solidity,
            height: 50.0,
            face_area: None,
            diagonal_wind: false,
        }
    }

    #[test]
    fn test_base_coefficients() {
        // 4(0.04) − 5.9(0.2) + 4 = 2.98
        assert!((base_coefficient(TowerSection::Square, 0.2) - 2.98).abs() < 1e-12);
        // 3.4(0.04) − 4.7(0.2) + 3.4 = 2.596
        assert!((base_coefficient(TowerSection::Triangular, 0.2) - 2.596).abs() < 1e-12);
    }

    #[test]
    fn test_member_and_diagonal_factors() {
        assert!((round_member_factor(0.2) - 0.5904).abs() < 1e-12);
        assert!((round_member_factor(0.9) - 0.9831).abs() < 1e-12);
        assert_eq!(round_member_factor(1.0), 1.0);
        assert!((diagonal_wind_factor(0.2) - 1.15).abs() < 1e-12);
        assert_eq!(diagonal_wind_factor(0.5), 1.2);

        let round = tower(TowerSection::Square, MemberShape::Round, 0.2);
        assert!((force_coefficient(&round) - 2.98 * 0.5904).abs() < 1e-12);
        let diagonal = TowerGeometry {
            diagonal_wind: true,
            ..tower(TowerSection::Square, MemberShape::Flat, 0.2)
        };
        assert!((force_coefficient(&diagonal) - 2.98 * 1.15).abs() < 1e-12);
    }

    #[test]
    fn test_tower_run() {
        let input = WindInput {
            structure_type: StructureType::TrussedTower,
            tower: Some(TowerGeometry {
                face_area: Some(120.0),
                ..tower(TowerSection::Triangular, MemberShape::Flat, 0.2)
            }),
            ..WindInput::default()
        };
        let result = run(&input).unwrap();
        let StructureResult::TrussedTower(force) = &result.structure else {
            panic!("expected tower result");
        };
        let entry = &force.entries[0];
        assert!((entry.coefficient.values[0] - 2.596).abs() < 1e-12);
        assert_eq!(entry.area, Some(120.0));
        assert!(entry.force_lrfd.is_some());
        // square and triangular towers share Kd = 0.85
        assert_eq!(result.factors.kd.value, 0.85);
    }

    #[test]
    fn test_diagonal_wind_on_triangular_tower_warns() {
        let input = WindInput {
            structure_type: StructureType::TrussedTower,
            tower: Some(TowerGeometry {
                diagonal_wind: true,
                ..tower(TowerSection::Triangular, MemberShape::Flat, 0.2)
            }),
            ..WindInput::default()
        };
        let result = run(&input).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("square towers only")));
    }
}
