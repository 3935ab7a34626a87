//! # Result Records
//!
//! Everything a run hands to the report renderer. Every numeric leaf carries
//! the citation it was computed under, verbatim, so the report can show the
//! audit trail without knowing anything about the engine.
//!
//! ```text
//! WindResult
//! ├── input (echoed WindInput)
//! ├── factors: IntermediateFactors (Kz, Kzt, Ke, Kd, Iw, qh, G, GCpi)
//! ├── structure: StructureResult (one variant per structure family)
//! │   └── Building
//! │       ├── mwfrs: MwfrsResult (zones, qz profile, roof profile)
//! │       ├── components / torsion / parapet / overhang / rooftop
//! │       │   each Applicability::Computed(..) or NotApplicable { reason }
//! ├── warnings
//! └── errors
//! ```

use serde::{Deserialize, Serialize};

use crate::factors::ExposureConstants;
use crate::gust::GustDetails;
use crate::input::{MwfrsMethod, WindInput};
use crate::pressure::{PressurePair, PressureResult, ASD_FACTOR};

/// A single derived value with its citation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub value: f64,
    pub citation: String,
    /// Set when a fallback replaced an invalid intermediate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Factor {
    pub fn new(value: f64, citation: impl Into<String>) -> Self {
        Factor {
            value,
            citation: citation.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Outcome of an optional or family-specific sub-computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value")]
pub enum Applicability<T> {
    Computed(T),
    NotApplicable { reason: String },
}

impl<T> Applicability<T> {
    pub fn not_applicable(reason: impl Into<String>) -> Self {
        Applicability::NotApplicable { reason: reason.into() }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Applicability::Computed(_))
    }

    pub fn computed(&self) -> Option<&T> {
        match self {
            Applicability::Computed(value) => Some(value),
            Applicability::NotApplicable { .. } => None,
        }
    }
}

/// Mean roof height class (60 ft / 18.3 m threshold)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeightClass {
    LowRise,
    HighRise,
}

impl HeightClass {
    pub fn display_name(&self) -> &'static str {
        match self {
            HeightClass::LowRise => "Low-rise (h ≤ 60 ft / 18.3 m)",
            HeightClass::HighRise => "High-rise (h > 60 ft / 18.3 m)",
        }
    }
}

/// Meaning of the numbers in a [`CoefficientEntry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoefficientKind {
    /// External pressure coefficient Cp
    ExternalPressure,
    /// Net coefficient (CN, or GCpf already combined with GCpi)
    NetPressure,
    /// Combined gust/external coefficient GCp for C&C
    GustPressure,
    /// Force coefficient Cf
    Force,
    /// Parapet net coefficient GCpn
    Parapet,
    /// Rooftop equipment coefficient GCr
    Rooftop,
}

impl CoefficientKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            CoefficientKind::ExternalPressure => "Cp",
            CoefficientKind::NetPressure => "CN",
            CoefficientKind::GustPressure => "GCp",
            CoefficientKind::Force => "Cf",
            CoefficientKind::Parapet => "GCpn",
            CoefficientKind::Rooftop => "GCr",
        }
    }
}

/// A named zone or surface and its coefficient(s)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientEntry {
    pub zone: String,
    pub kind: CoefficientKind,
    pub values: Vec<f64>,
    pub citation: String,
}

impl CoefficientEntry {
    pub fn new(zone: impl Into<String>, kind: CoefficientKind, values: Vec<f64>, citation: impl Into<String>) -> Self {
        CoefficientEntry {
            zone: zone.into(),
            kind,
            values,
            citation: citation.into(),
        }
    }
}

/// Coefficient and resulting pressures for one zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneResult {
    pub coefficient: CoefficientEntry,
    pub pressure: PressureResult,
}

/// Plain list of zones (arched roofs, free roofs, overhangs)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneListResult {
    pub zones: Vec<ZoneResult>,
}

/// One sample of the velocity pressure profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    pub height: f64,
    pub kz: f64,
    pub qz: f64,
    /// Windward wall pressure at this height, LRFD (±GCpi envelope)
    pub windward_lrfd: PressurePair,
}

/// One sample of the along-wind roof pressure series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoofProfilePoint {
    /// Horizontal distance from the windward edge
    pub distance: f64,
    pub cp: f64,
    pub lrfd: PressurePair,
}

/// Main wind-force resisting system result for a building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MwfrsResult {
    pub method: MwfrsMethod,
    pub zones: Vec<ZoneResult>,
    pub velocity_profile: Vec<ProfilePoint>,
    pub roof_profile: Vec<RoofProfilePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_distance: Option<Factor>,
}

/// Components and cladding zone pressures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentsResult {
    pub effective_area: f64,
    pub edge_distance: Factor,
    pub zones: Vec<ZoneResult>,
}

/// One torsional load case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorsionCase {
    pub name: String,
    /// Reduced windward wall force (0.75 × |Fw| or 0.563 × |Fw|)
    pub windward_force: f64,
    /// Reduced leeward wall force
    pub leeward_force: f64,
    pub eccentricity: f64,
    pub moment_lrfd: f64,
    pub moment_asd: f64,
    pub citation: String,
}

impl TorsionCase {
    pub fn new(
        name: impl Into<String>,
        windward_force: f64,
        leeward_force: f64,
        eccentricity: f64,
        moment_lrfd: f64,
        citation: impl Into<String>,
    ) -> Self {
        TorsionCase {
            name: name.into(),
            windward_force,
            leeward_force,
            eccentricity,
            moment_lrfd,
            moment_asd: moment_lrfd * ASD_FACTOR,
            citation: citation.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorsionResult {
    pub cases: Vec<TorsionCase>,
}

/// Force coefficient result for one member, face, or direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceEntry {
    pub coefficient: CoefficientEntry,
    /// Velocity pressure used (qz at the relevant height)
    pub q: f64,
    pub gust: f64,
    /// q × G × C, LRFD
    pub pressure_lrfd: f64,
    pub pressure_asd: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_lrfd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_asd: Option<f64>,
}

impl ForceEntry {
    /// Build from a coefficient; area is optional and only drives the force.
    pub fn new(coefficient: CoefficientEntry, q: f64, gust: f64, area: Option<f64>) -> Self {
        let c = coefficient.values.first().copied().unwrap_or(0.0);
        let pressure_lrfd = q * gust * c;
        let force_lrfd = area.map(|a| pressure_lrfd * a);
        ForceEntry {
            coefficient,
            q,
            gust,
            pressure_lrfd,
            pressure_asd: pressure_lrfd * ASD_FACTOR,
            area,
            force_lrfd,
            force_asd: force_lrfd.map(|f| f * ASD_FACTOR),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForceResult {
    pub entries: Vec<ForceEntry>,
}

/// Parapet pressures at qp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParapetResult {
    pub qp: Factor,
    pub zones: Vec<ZoneResult>,
}

/// All sub-results of the building family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingResult {
    pub height_class: HeightClass,
    pub mwfrs: MwfrsResult,
    pub components: Applicability<ComponentsResult>,
    pub torsion: Applicability<TorsionResult>,
    pub parapet: Applicability<ParapetResult>,
    pub overhang: Applicability<ZoneListResult>,
    pub rooftop: Applicability<ForceResult>,
}

/// Family-specific result; exactly one variant per run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family")]
pub enum StructureResult {
    Building(BuildingResult),
    OpenSign(ForceResult),
    SolidSign(ForceResult),
    ChimneyTank(ForceResult),
    TrussedTower(ForceResult),
    ArchedRoof(ZoneListResult),
    OpenBuilding(ZoneListResult),
    ParapetOnly(ParapetResult),
    NotApplicable { reason: String },
}

/// Shared intermediates computed once per run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntermediateFactors {
    pub exposure: ExposureConstants,
    pub exposure_citation: String,
    /// Kz at the reference height (mean roof height or structure height)
    pub kz: Factor,
    pub kzt: Factor,
    pub ke: Factor,
    pub kd: Factor,
    pub iw: Factor,
    /// Velocity pressure at the reference height
    pub qh: Factor,
    pub gust: Factor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gust_details: Option<GustDetails>,
    pub gcpi: Factor,
}

/// Aggregate result of one calculation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindResult {
    pub input: WindInput,
    pub height_class: HeightClass,
    pub factors: IntermediateFactors,
    pub structure: StructureResult,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl WindResult {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Building sub-results, if this run was a building
    pub fn building(&self) -> Option<&BuildingResult> {
        match &self.structure {
            StructureResult::Building(b) => Some(b),
            _ => None,
        }
    }

    /// Every zone pressure in the result, across all sub-results
    pub fn all_zone_pressures(&self) -> Vec<&PressureResult> {
        let zones: Vec<&ZoneResult> = match &self.structure {
            StructureResult::Building(b) => {
                let mut all: Vec<&ZoneResult> = b.mwfrs.zones.iter().collect();
                if let Some(cc) = b.components.computed() {
                    all.extend(cc.zones.iter());
                }
                if let Some(p) = b.parapet.computed() {
                    all.extend(p.zones.iter());
                }
                if let Some(o) = b.overhang.computed() {
                    all.extend(o.zones.iter());
                }
                all
            }
            StructureResult::ArchedRoof(z) | StructureResult::OpenBuilding(z) => z.zones.iter().collect(),
            StructureResult::ParapetOnly(p) => p.zones.iter().collect(),
            _ => Vec::new(),
        };
        zones.into_iter().map(|z| &z.pressure).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applicability_serialization() {
        let na: Applicability<TorsionResult> = Applicability::not_applicable("open building");
        let json = serde_json::to_string(&na).unwrap();
        assert!(json.contains("NotApplicable"));
        assert!(json.contains("open building"));
        let roundtrip: Applicability<TorsionResult> = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, na);
        assert!(!na.is_computed());
    }

    #[test]
    fn test_force_entry_asd() {
        let cf = CoefficientEntry::new("Sign", CoefficientKind::Force, vec![1.8], "ref");
        let entry = ForceEntry::new(cf, 30.0, 0.85, Some(100.0));
        assert!((entry.pressure_lrfd - 45.9).abs() < 1e-9);
        assert_eq!(entry.pressure_asd, entry.pressure_lrfd * 0.6);
        assert_eq!(entry.force_asd, entry.force_lrfd.map(|f| f * 0.6));
    }

    #[test]
    fn test_factor_note() {
        let f = Factor::new(1.0, "ref").with_note("fallback");
        assert_eq!(f.note.as_deref(), Some("fallback"));
        let json = serde_json::to_string(&Factor::new(0.85, "ref")).unwrap();
        assert!(!json.contains("note"));
    }
}
