//! # Wind Factor Tables
//!
//! Category-keyed constants used by the velocity pressure and gust pipelines.
//!
//! | Factor | Description                     | Source                     |
//! |--------|---------------------------------|----------------------------|
//! | α, zg  | Terrain power-law constants     | Table 26.11-1              |
//! | Ke     | Ground elevation factor         | Table 26.9-1               |
//! | Kd     | Wind directionality factor      | Table 26.6-1               |
//! | Iw     | Importance factor               | Table 1.5-2                |
//! | GCpi   | Internal pressure coefficient   | Table 26.13-1              |
//!
//! Lookups are plain `match` tables on small enums.

use serde::{Deserialize, Serialize};

use crate::interpolation::interpolate;
use crate::references::StandardEdition;
use crate::units::UnitSystem;

// ============================================================================
// Exposure
// ============================================================================

/// Surface roughness exposure category (Section 26.7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExposureCategory {
    /// Urban and suburban areas, wooded terrain
    B,
    /// Open terrain with scattered obstructions
    #[default]
    C,
    /// Flat, unobstructed areas and water surfaces
    D,
}

impl ExposureCategory {
    pub const ALL: [ExposureCategory; 3] = [ExposureCategory::B, ExposureCategory::C, ExposureCategory::D];

    /// Terrain exposure constants of Table 26.11-1 in the given unit system
    pub fn constants(&self, units: UnitSystem) -> ExposureConstants {
        let (alpha, zg_ft, a_hat, b_hat, alpha_bar, b_bar, c, ell_ft, epsilon_bar, z_min_ft) = match self {
            ExposureCategory::B => (7.0, 1200.0, 1.0 / 7.0, 0.84, 1.0 / 4.0, 0.45, 0.30, 320.0, 1.0 / 3.0, 30.0),
            ExposureCategory::C => (9.5, 900.0, 1.0 / 9.5, 1.00, 1.0 / 6.5, 0.65, 0.20, 500.0, 1.0 / 5.0, 15.0),
            ExposureCategory::D => (11.5, 700.0, 1.0 / 11.5, 1.07, 1.0 / 9.0, 0.80, 0.15, 650.0, 1.0 / 8.0, 7.0),
        };
        let (zg, ell, z_min, kz_floor) = match units {
            UnitSystem::Imperial => (zg_ft, ell_ft, z_min_ft, 15.0),
            UnitSystem::Metric => {
                let m = |ft: f64| (ft * 0.3048 * 100.0).round() / 100.0;
                (m(zg_ft), m(ell_ft), m(z_min_ft), 4.57)
            }
        };
        ExposureConstants {
            alpha,
            zg,
            a_hat,
            b_hat,
            alpha_bar,
            b_bar,
            c,
            ell,
            epsilon_bar,
            z_min,
            kz_floor,
        }
    }
}

impl std::fmt::Display for ExposureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExposureCategory::B => write!(f, "B"),
            ExposureCategory::C => write!(f, "C"),
            ExposureCategory::D => write!(f, "D"),
        }
    }
}

/// Terrain exposure constants (Table 26.11-1). Lengths are in the unit system
/// they were requested for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureConstants {
    /// 3-s gust speed power law exponent α
    pub alpha: f64,
    /// Nominal height of the atmospheric boundary layer zg
    pub zg: f64,
    /// 3-s gust speed factor exponent â
    pub a_hat: f64,
    /// 3-s gust speed factor b̂
    pub b_hat: f64,
    /// Mean hourly wind speed exponent ᾱ
    pub alpha_bar: f64,
    /// Mean hourly wind speed factor b̄
    pub b_bar: f64,
    /// Turbulence intensity factor c
    pub c: f64,
    /// Integral length scale factor ℓ
    pub ell: f64,
    /// Integral length scale power law exponent ε̄
    pub epsilon_bar: f64,
    /// Minimum equivalent height for the gust calculation
    pub z_min: f64,
    /// Height below which Kz is held constant (15 ft / 4.57 m)
    pub kz_floor: f64,
}

// ============================================================================
// Risk category / importance
// ============================================================================

/// Risk category per ASCE 7 Table 1.5-1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RiskCategory {
    I,
    #[default]
    II,
    III,
    IV,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 4] = [RiskCategory::I, RiskCategory::II, RiskCategory::III, RiskCategory::IV];

    /// Wind importance factor Iw.
    ///
    /// ASCE 7-16 folds risk category into the mapped basic wind speed, so its
    /// table is uniformly 1.0 and is reported for traceability only. Under
    /// ASCE 7-22 the factor multiplies the velocity pressure.
    pub fn importance_factor(&self, edition: StandardEdition) -> f64 {
        match edition {
            StandardEdition::Asce716 => 1.0,
            StandardEdition::Asce722 => match self {
                RiskCategory::I => 0.87,
                RiskCategory::II => 1.00,
                RiskCategory::III => 1.15,
                RiskCategory::IV => 1.15,
            },
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let roman = match self {
            RiskCategory::I => "I",
            RiskCategory::II => "II",
            RiskCategory::III => "III",
            RiskCategory::IV => "IV",
        };
        write!(f, "{}", roman)
    }
}

// ============================================================================
// Enclosure / internal pressure
// ============================================================================

/// Enclosure classification (Section 26.12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnclosureClassification {
    #[default]
    Enclosed,
    PartiallyEnclosed,
    PartiallyOpen,
    Open,
}

impl EnclosureClassification {
    /// Internal pressure coefficient magnitude GCpi (applied as ±)
    pub fn gcpi(&self) -> f64 {
        match self {
            EnclosureClassification::Enclosed => 0.18,
            EnclosureClassification::PartiallyEnclosed => 0.55,
            EnclosureClassification::PartiallyOpen => 0.18,
            EnclosureClassification::Open => 0.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EnclosureClassification::Enclosed => "Enclosed",
            EnclosureClassification::PartiallyEnclosed => "Partially Enclosed",
            EnclosureClassification::PartiallyOpen => "Partially Open",
            EnclosureClassification::Open => "Open",
        }
    }

    /// Torsional load cases apply only to enclosed and partially enclosed buildings
    pub fn has_torsion_cases(&self) -> bool {
        matches!(
            self,
            EnclosureClassification::Enclosed | EnclosureClassification::PartiallyEnclosed
        )
    }
}

// ============================================================================
// Directionality
// ============================================================================

/// Structure type rows of the directionality table (Table 26.6-1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectionalityCase {
    Building,
    ArchedRoof,
    ChimneySquare,
    ChimneyHexagonal,
    ChimneyOctagonal,
    ChimneyRound,
    SolidSign,
    OpenSign,
    TrussedTowerSquareOrTriangular,
}

impl DirectionalityCase {
    /// Directionality factor Kd
    pub fn kd(&self, edition: StandardEdition) -> f64 {
        match self {
            DirectionalityCase::Building => 0.85,
            DirectionalityCase::ArchedRoof => 0.85,
            DirectionalityCase::ChimneySquare => 0.90,
            DirectionalityCase::ChimneyHexagonal => 0.95,
            DirectionalityCase::ChimneyOctagonal => 1.00,
            DirectionalityCase::ChimneyRound => 0.95,
            DirectionalityCase::SolidSign => 0.85,
            DirectionalityCase::OpenSign => {
                if edition.is_newer() {
                    1.00
                } else {
                    0.85
                }
            }
            DirectionalityCase::TrussedTowerSquareOrTriangular => 0.85,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DirectionalityCase::Building => "Buildings (MWFRS and C&C)",
            DirectionalityCase::ArchedRoof => "Arched roofs",
            DirectionalityCase::ChimneySquare => "Chimneys, tanks: square",
            DirectionalityCase::ChimneyHexagonal => "Chimneys, tanks: hexagonal",
            DirectionalityCase::ChimneyOctagonal => "Chimneys, tanks: octagonal",
            DirectionalityCase::ChimneyRound => "Chimneys, tanks: round",
            DirectionalityCase::SolidSign => "Solid freestanding signs and walls",
            DirectionalityCase::OpenSign => "Open signs and single-plane open frames",
            DirectionalityCase::TrussedTowerSquareOrTriangular => "Trussed towers: triangular, square, rectangular",
        }
    }
}

// ============================================================================
// Ground elevation
// ============================================================================

const ELEVATION_FT: [f64; 7] = [0.0, 1000.0, 2000.0, 3000.0, 4000.0, 5000.0, 6000.0];
const KE_VALUES: [f64; 7] = [1.00, 0.96, 0.93, 0.90, 0.86, 0.83, 0.80];

/// Ground elevation factor Ke for an elevation in feet above sea level.
///
/// Fixed at 1.0 under ASCE 7-22.
pub fn elevation_factor(elevation_ft: f64, edition: StandardEdition) -> f64 {
    if edition.is_newer() {
        return 1.0;
    }
    interpolate(elevation_ft, &ELEVATION_FT, &KE_VALUES)
}
