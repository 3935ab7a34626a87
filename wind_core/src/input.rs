//! # Wind Input Record
//!
//! [`WindInput`] is the flat, JSON-friendly snapshot of everything one run
//! needs. It is produced by a form or file, checked by [`WindInput::validate`],
//! and then converted into validated value types ([`SiteConditions`] and the
//! per-family geometry in [`crate::calculations::Structure`]) so the
//! generators never see non-finite or non-positive primary inputs.
//!
//! ## JSON Example
//!
//! Every field has a default, so sparse files work:
//!
//! ```json
//! {
//!   "label": "Warehouse",
//!   "basic_wind_speed": 115.0,
//!   "exposure": "C",
//!   "mean_roof_height": 30.0,
//!   "building_length": 120.0,
//!   "building_width": 80.0,
//!   "roof_type": "Gable",
//!   "roof_slope_deg": 18.4
//! }
//! ```
//!
//! ```rust
//! use wind_core::input::WindInput;
//!
//! let input: WindInput = serde_json::from_str(r#"{ "mean_roof_height": 45.0 }"#).unwrap();
//! assert!(input.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::factors::{EnclosureClassification, ExposureCategory, RiskCategory};
use crate::loads::DesignMethod;
use crate::references::StandardEdition;
use crate::units::{Positive, UnitSystem};

/// Longest fundamental period accepted, in seconds
pub const MAX_FUNDAMENTAL_PERIOD_S: f64 = 60.0;

// ============================================================================
// Selections
// ============================================================================

/// Structure family; selects exactly one computation path per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StructureType {
    #[default]
    Building,
    OpenSign,
    SolidSign,
    ChimneyTank,
    TrussedTower,
    ArchedRoof,
    /// Open building with a free roof (canopy, carport)
    OpenBuilding,
    ParapetOnly,
}

impl StructureType {
    pub const ALL: [StructureType; 8] = [
        StructureType::Building,
        StructureType::OpenSign,
        StructureType::SolidSign,
        StructureType::ChimneyTank,
        StructureType::TrussedTower,
        StructureType::ArchedRoof,
        StructureType::OpenBuilding,
        StructureType::ParapetOnly,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            StructureType::Building => "Building",
            StructureType::OpenSign => "Open sign / lattice frame",
            StructureType::SolidSign => "Solid freestanding sign or wall",
            StructureType::ChimneyTank => "Chimney / tank",
            StructureType::TrussedTower => "Trussed tower",
            StructureType::ArchedRoof => "Arched roof",
            StructureType::OpenBuilding => "Open building (free roof)",
            StructureType::ParapetOnly => "Parapet",
        }
    }

    /// Families whose plan dimensions and roof slope are primary inputs
    pub fn uses_building_geometry(&self) -> bool {
        matches!(self, StructureType::Building | StructureType::OpenBuilding)
    }
}

/// Roof geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoofType {
    #[default]
    Flat,
    Gable,
    Hip,
    Monoslope,
}

/// MWFRS procedure selection for buildings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MwfrsMethod {
    /// Directional procedure, low-rise tables (Chapter 27 Part 1)
    #[default]
    Directional,
    /// Directional procedure without roof zoning, valid for all heights
    Analytical,
    /// Envelope procedure for low-rise buildings (Chapter 28)
    Envelope,
}

impl MwfrsMethod {
    pub fn display_name(&self) -> &'static str {
        match self {
            MwfrsMethod::Directional => "Directional (low-rise)",
            MwfrsMethod::Analytical => "Directional (all heights)",
            MwfrsMethod::Envelope => "Envelope",
        }
    }
}

/// Member cross-section for open frames and towers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MemberShape {
    #[default]
    Flat,
    Round,
}

// ============================================================================
// Family geometry
// ============================================================================

/// Open sign or single-plane lattice frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpenSignGeometry {
    /// Solid area / gross area, ε
    pub solidity_ratio: f64,
    #[serde(default)]
    pub member_shape: MemberShape,
    /// Member diameter, required for round members
    #[serde(default)]
    pub member_diameter: Option<f64>,
    /// Gross (enclosed) area; when present the force is reported
    #[serde(default)]
    pub gross_area: Option<f64>,
    /// Height of the area centroid; defaults to the mean roof height field
    #[serde(default)]
    pub height: Option<f64>,
}

/// Solid freestanding sign or wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolidSignGeometry {
    /// Horizontal dimension B
    pub width: f64,
    /// Vertical dimension s
    pub depth: f64,
    /// Height to the top of the sign h
    pub top_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChimneySection {
    /// Square, wind normal to a face
    #[default]
    Square,
    /// Square, wind along the diagonal
    SquareDiagonal,
    Hexagonal,
    Octagonal,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SurfaceRoughness {
    #[default]
    ModeratelySmooth,
    /// D'/D = 0.02
    Rough,
    /// D'/D = 0.08
    VeryRough,
}

/// Chimney, tank, or similar solid structure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChimneyGeometry {
    #[serde(default)]
    pub cross_section: ChimneySection,
    /// Least horizontal dimension D
    pub diameter: f64,
    /// Structure height h
    pub height: f64,
    /// Corner radius r for square sections
    #[serde(default)]
    pub corner_radius: f64,
    #[serde(default)]
    pub roughness: SurfaceRoughness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TowerSection {
    #[default]
    Square,
    Triangular,
}

/// Trussed (lattice) tower
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerGeometry {
    #[serde(default)]
    pub cross_section: TowerSection,
    #[serde(default)]
    pub member_shape: MemberShape,
    /// Solid area of one face / gross face area, ε
    pub solidity_ratio: f64,
    pub height: f64,
    /// Solid area of one face; when present the force is reported
    #[serde(default)]
    pub face_area: Option<f64>,
    /// Wind along the diagonal of a square tower
    #[serde(default)]
    pub diagonal_wind: bool,
}

/// Arched roof
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArchedRoofGeometry {
    pub rise: f64,
    pub span: f64,
    /// Height of the spring line above grade (0 for arches springing from ground)
    #[serde(default)]
    pub eave_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlowCondition {
    /// Clear (unobstructed) wind flow under the roof
    #[default]
    Clear,
    /// Obstructed flow (goods or materials stored under the roof)
    Obstructed,
}

/// Free roof of an open building
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FreeRoofGeometry {
    #[serde(default)]
    pub flow: FlowCondition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EquipmentKind {
    /// Solid rooftop units (HVAC, enclosures)
    #[default]
    Solid,
    /// Open scaffold or lattice framing
    OpenScaffold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EquipmentLocation {
    #[default]
    Rooftop,
    /// Standing at grade next to the building; uses qz at its own height
    Ground,
}

/// Box dimensions of a solid unit: length along the wind, width across it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquipmentDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// Rooftop equipment or scaffold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RooftopEquipment {
    #[serde(default)]
    pub kind: EquipmentKind,
    /// Vertical projected area Af; 0 takes width·height for solid units
    #[serde(default)]
    pub frontal_area: f64,
    /// Horizontal projected area Ar; 0 takes length·width for solid units
    #[serde(default)]
    pub plan_area: f64,
    /// Required for solid units
    #[serde(default)]
    pub dimensions: Option<EquipmentDimensions>,
    /// Solidity ratio for open scaffolds
    #[serde(default)]
    pub solidity_ratio: Option<f64>,
    #[serde(default)]
    pub location: EquipmentLocation,
    /// Height of the equipment centroid when at grade
    #[serde(default)]
    pub height: Option<f64>,
}

/// Parapet height above the roof
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParapetGeometry {
    pub height: f64,
}

/// Roof overhang projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverhangGeometry {
    pub length: f64,
}

// ============================================================================
// Input record
// ============================================================================

/// Input parameters for one wind load calculation.
///
/// `building_length` is the plan dimension parallel to the wind (L) and
/// `building_width` the dimension normal to it (B).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindInput {
    pub label: String,
    pub unit_system: UnitSystem,
    pub edition: StandardEdition,
    pub risk_category: RiskCategory,
    pub design_method: DesignMethod,
    /// Basic wind speed V (mph or m/s)
    pub basic_wind_speed: f64,
    pub exposure: ExposureCategory,
    pub mean_roof_height: f64,
    pub building_length: f64,
    pub building_width: f64,
    pub enclosure: EnclosureClassification,
    pub roof_type: RoofType,
    pub roof_slope_deg: f64,
    pub structure_type: StructureType,
    pub mwfrs_method: MwfrsMethod,
    /// Declared dynamically sensitive
    pub flexible: bool,
    /// Fundamental period T (s); natural frequency n1 = 1/T
    pub fundamental_period_s: Option<f64>,
    /// Topographic factor Kzt
    pub topographic_factor: f64,
    /// Ground elevation above sea level
    pub ground_elevation: f64,
    /// Effective wind area for C&C
    pub effective_wind_area: Option<f64>,
    pub open_sign: Option<OpenSignGeometry>,
    pub solid_sign: Option<SolidSignGeometry>,
    pub chimney: Option<ChimneyGeometry>,
    pub tower: Option<TowerGeometry>,
    pub arched_roof: Option<ArchedRoofGeometry>,
    pub free_roof: Option<FreeRoofGeometry>,
    pub rooftop_equipment: Option<RooftopEquipment>,
    pub parapet: Option<ParapetGeometry>,
    pub overhang: Option<OverhangGeometry>,
}

impl Default for WindInput {
    fn default() -> Self {
        WindInput {
            label: "Wind".to_string(),
            unit_system: UnitSystem::Imperial,
            edition: StandardEdition::Asce716,
            risk_category: RiskCategory::II,
            design_method: DesignMethod::Lrfd,
            basic_wind_speed: 115.0,
            exposure: ExposureCategory::C,
            mean_roof_height: 30.0,
            building_length: 100.0,
            building_width: 60.0,
            enclosure: EnclosureClassification::Enclosed,
            roof_type: RoofType::Flat,
            roof_slope_deg: 0.0,
            structure_type: StructureType::Building,
            mwfrs_method: MwfrsMethod::Directional,
            flexible: false,
            fundamental_period_s: None,
            topographic_factor: 1.0,
            ground_elevation: 0.0,
            effective_wind_area: None,
            open_sign: None,
            solid_sign: None,
            chimney: None,
            tower: None,
            arched_roof: None,
            free_roof: None,
            rooftop_equipment: None,
            parapet: None,
            overhang: None,
        }
    }
}

/// Upstream validation outcome. Any error refuses the run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, field: &str, value: f64, reason: &str) {
        self.errors.push(format!("{} = {}: {}", field, value, reason));
    }

    /// Convert into a `CalcResult`, keeping the warnings on success
    pub fn into_result(self) -> CalcResult<Vec<String>> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(CalcError::ValidationFailed { messages: self.errors })
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl WindInput {
    /// Check primary inputs. Family geometry problems are not errors here;
    /// they degrade to a "not applicable" result during the run.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        let units = self.unit_system;

        let max_speed = match units {
            UnitSystem::Imperial => 300.0,
            UnitSystem::Metric => 134.0,
        };
        if !is_positive(self.basic_wind_speed) {
            report.error("basic_wind_speed", self.basic_wind_speed, "Wind speed must be positive");
        } else if self.basic_wind_speed > max_speed {
            report.error(
                "basic_wind_speed",
                self.basic_wind_speed,
                &format!("Exceeds {} {}", max_speed, units.speed_label()),
            );
        }

        if !is_positive(self.mean_roof_height) {
            report.error("mean_roof_height", self.mean_roof_height, "Height must be positive");
        } else if units.to_feet(self.mean_roof_height) > 500.0 {
            report.warnings.push(format!(
                "Mean roof height {:.1} {} exceeds 500 ft; a wind tunnel study may be warranted",
                self.mean_roof_height,
                units.length_label()
            ));
        }

        if self.structure_type.uses_building_geometry() {
            if !is_positive(self.building_length) {
                report.error("building_length", self.building_length, "Length must be positive");
            }
            if !is_positive(self.building_width) {
                report.error("building_width", self.building_width, "Width must be positive");
            }
            if !self.roof_slope_deg.is_finite() || self.roof_slope_deg < 0.0 || self.roof_slope_deg >= 90.0 {
                report.error("roof_slope_deg", self.roof_slope_deg, "Slope must be in [0, 90) degrees");
            }
        }

        if !is_positive(self.topographic_factor) {
            report.error("topographic_factor", self.topographic_factor, "Kzt must be positive");
        } else if self.topographic_factor < 1.0 {
            report
                .warnings
                .push(format!("Kzt = {} is less than 1.0 (Section 26.8.2)", self.topographic_factor));
        }

        if !self.ground_elevation.is_finite() {
            report.error("ground_elevation", self.ground_elevation, "Elevation must be finite");
        }

        if let Some(period) = self.fundamental_period_s {
            if !is_positive(period) {
                report.error("fundamental_period_s", period, "Period must be positive");
            } else if period > MAX_FUNDAMENTAL_PERIOD_S {
                report.error(
                    "fundamental_period_s",
                    period,
                    &format!("Period must not exceed {} s", MAX_FUNDAMENTAL_PERIOD_S),
                );
            }
        }

        if let Some(area) = self.effective_wind_area {
            if !is_positive(area) {
                report.error("effective_wind_area", area, "Effective wind area must be positive");
            }
        }

        if self.structure_type == StructureType::Building
            && self.mwfrs_method == MwfrsMethod::Envelope
            && is_positive(self.building_length)
            && is_positive(self.building_width)
            && self.mean_roof_height > self.building_length.min(self.building_width)
        {
            report.warnings.push(
                "Envelope procedure requires mean roof height not exceeding the least horizontal dimension".to_string(),
            );
        }

        report
    }

    /// Validated site-wide values. Call after [`WindInput::validate`] passes.
    pub fn site(&self) -> CalcResult<SiteConditions> {
        Ok(SiteConditions {
            units: self.unit_system,
            edition: self.edition,
            risk_category: self.risk_category,
            exposure: self.exposure,
            basic_wind_speed: Positive::try_new("basic_wind_speed", self.basic_wind_speed)?,
            mean_roof_height: Positive::try_new("mean_roof_height", self.mean_roof_height)?,
            topographic_factor: Positive::try_new("topographic_factor", self.topographic_factor)?,
            ground_elevation_ft: self.unit_system.to_feet(self.ground_elevation),
        })
    }

    /// Natural frequency n1 from the declared period, if any
    pub fn natural_frequency(&self) -> Option<Positive> {
        self.fundamental_period_s
            .and_then(Positive::new)
            .and_then(|t| Positive::new(1.0 / t.get()))
    }
}

/// Site values shared by every structure family, already validated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteConditions {
    pub units: UnitSystem,
    pub edition: StandardEdition,
    pub risk_category: RiskCategory,
    pub exposure: ExposureCategory,
    pub basic_wind_speed: Positive,
    pub mean_roof_height: Positive,
    pub topographic_factor: Positive,
    pub ground_elevation_ft: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_input_is_valid() {
        let report = WindInput::default().validate();
        assert!(report.is_ok(), "{:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_negative_speed_is_error() {
        let input = WindInput {
            basic_wind_speed: -10.0,
            ..WindInput::default()
        };
        let report = input.validate();
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("basic_wind_speed"));
        assert!(report.into_result().is_err());
    }

    #[test]
    fn test_nan_height_is_error() {
        let input = WindInput {
            mean_roof_height: f64::NAN,
            ..WindInput::default()
        };
        assert!(!input.validate().is_ok());
        assert!(input.site().is_err());
    }

    #[test]
    fn test_plan_dimensions_ignored_for_signs() {
        let input = WindInput {
            structure_type: StructureType::OpenSign,
            building_length: 0.0,
            building_width: 0.0,
            ..WindInput::default()
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_low_kzt_warns() {
        let input = WindInput {
            topographic_factor: 0.9,
            ..WindInput::default()
        };
        let report = input.validate();
        assert!(report.is_ok());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_natural_frequency() {
        let input = WindInput {
            fundamental_period_s: Some(2.0),
            ..WindInput::default()
        };
        assert_eq!(input.natural_frequency().map(Positive::get), Some(0.5));
        assert!(WindInput::default().natural_frequency().is_none());
    }

    #[test]
    fn test_period_upper_bound() {
        let input = WindInput {
            flexible: true,
            fundamental_period_s: Some(5000.0),
            ..WindInput::default()
        };
        let report = input.validate();
        assert!(!report.is_ok());
        assert!(report.errors.iter().any(|e| e.starts_with("fundamental_period_s")));

        let at_limit = WindInput {
            fundamental_period_s: Some(MAX_FUNDAMENTAL_PERIOD_S),
            ..WindInput::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_sparse_json() {
        let input: WindInput = serde_json::from_str(
            r#"{ "structure_type": "ChimneyTank", "chimney": { "diameter": 6.0, "height": 80.0 } }"#,
        )
        .unwrap();
        assert_eq!(input.structure_type, StructureType::ChimneyTank);
        let chimney = input.chimney.unwrap();
        assert_eq!(chimney.cross_section, ChimneySection::Square);
        assert_eq!(chimney.corner_radius, 0.0);
        assert_eq!(input.basic_wind_speed, 115.0);
    }
}
