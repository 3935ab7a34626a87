//! # Code References
//!
//! Every numeric leaf the engine produces carries a citation string so the
//! calculation report can show where each value came from. Section numbers are
//! kept here as constants and combined with the active edition through
//! [`StandardEdition::cite`].
//!
//! ```rust
//! use wind_core::references::{asce_ref, StandardEdition};
//!
//! let citation = StandardEdition::Asce716.cite(asce_ref::VELOCITY_PRESSURE);
//! assert_eq!(citation, "ASCE 7-16 Eq. 26.10-1");
//! ```

use serde::{Deserialize, Serialize};

/// Edition of the wind-loading standard.
///
/// The two editions differ in where the importance factor enters (see
/// [`crate::velocity_pressure::velocity_pressure`]), in the ground elevation
/// factor, in the directionality factor for open signs, and in the flat-roof
/// MWFRS zoning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StandardEdition {
    #[serde(rename = "ASCE 7-16")]
    #[default]
    Asce716,
    #[serde(rename = "ASCE 7-22")]
    Asce722,
}

impl StandardEdition {
    pub const ALL: [StandardEdition; 2] = [StandardEdition::Asce716, StandardEdition::Asce722];

    pub fn year(&self) -> u16 {
        match self {
            StandardEdition::Asce716 => 2016,
            StandardEdition::Asce722 => 2022,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StandardEdition::Asce716 => "ASCE 7-16",
            StandardEdition::Asce722 => "ASCE 7-22",
        }
    }

    /// True for the newer edition
    pub fn is_newer(&self) -> bool {
        matches!(self, StandardEdition::Asce722)
    }

    /// Format a section reference for this edition
    pub fn cite(&self, section: &str) -> String {
        format!("{} {}", self.label(), section)
    }
}

impl std::fmt::Display for StandardEdition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Section, table, and figure references within ASCE 7 Chapters 26-30.
pub mod asce_ref {
    // Velocity pressure
    pub const EXPOSURE_COEFFICIENT: &str = "Table 26.10-1";
    pub const EXPOSURE_CONSTANTS: &str = "Table 26.11-1";
    pub const ELEVATION_FACTOR: &str = "Table 26.9-1";
    pub const DIRECTIONALITY: &str = "Table 26.6-1";
    pub const IMPORTANCE: &str = "Table 1.5-2";
    pub const TOPOGRAPHIC: &str = "Section 26.8";
    pub const VELOCITY_PRESSURE: &str = "Eq. 26.10-1";
    pub const INTERNAL_PRESSURE: &str = "Table 26.13-1";

    // Gust effect
    pub const GUST_RIGID: &str = "Section 26.11.4";
    pub const GUST_FLEXIBLE: &str = "Eq. 26.11-10";
    pub const EQUIVALENT_HEIGHT: &str = "Section 26.11.4";
    pub const TURBULENCE_INTENSITY: &str = "Eq. 26.11-7";
    pub const INTEGRAL_LENGTH_SCALE: &str = "Eq. 26.11-9";
    pub const BACKGROUND_RESPONSE: &str = "Eq. 26.11-8";
    pub const RESONANT_PEAK_FACTOR: &str = "Eq. 26.11-11";
    pub const RESONANT_RESPONSE: &str = "Eq. 26.11-12";
    pub const MEAN_HOURLY_SPEED: &str = "Eq. 26.11-16";
    pub const APPROXIMATE_FREQUENCY: &str = "Eq. 26.11-5";

    // Buildings, MWFRS
    pub const WALL_PRESSURE_COEFFICIENTS: &str = "Figure 27.3-1";
    pub const ROOF_PRESSURE_COEFFICIENTS: &str = "Figure 27.3-1";
    pub const MWFRS_DESIGN_PRESSURE: &str = "Eq. 27.3-1";
    pub const ARCHED_ROOF: &str = "Table 27.3-3";
    pub const FREE_ROOF: &str = "Figure 27.3-4";
    pub const OVERHANG: &str = "Section 27.3.3";
    pub const PARAPET: &str = "Section 27.3.4";
    pub const TORSION: &str = "Figure 27.3-8";
    pub const ENVELOPE_COEFFICIENTS: &str = "Figure 28.3-1";
    pub const ENVELOPE_PRESSURE: &str = "Eq. 28.3-1";
    pub const EDGE_DISTANCE: &str = "Figure 28.3-1, Note 9";

    // Other structures
    pub const SOLID_SIGN: &str = "Figure 29.3-1";
    pub const SIGN_FORCE: &str = "Eq. 29.3-1";
    pub const CHIMNEY_TANK: &str = "Figure 29.4-1";
    pub const OPEN_SIGN: &str = "Figure 29.4-2";
    pub const TRUSSED_TOWER: &str = "Figure 29.4-3";
    pub const OTHER_STRUCTURE_FORCE: &str = "Eq. 29.4-1";
    pub const ROOFTOP_EQUIPMENT: &str = "Section 29.4.1";

    // Components and cladding
    pub const CC_LOW_RISE_WALL: &str = "Figure 30.3-1";
    pub const CC_LOW_RISE_ROOF: &str = "Figure 30.3-2A";
    pub const CC_LOW_RISE_STEEP_ROOF: &str = "Figure 30.3-2C";
    pub const CC_LOW_RISE_PRESSURE: &str = "Eq. 30.3-1";
    pub const CC_HIGH_RISE: &str = "Figure 30.5-1";
    pub const CC_HIGH_RISE_PRESSURE: &str = "Eq. 30.5-1";

    // Load combinations
    pub const ASD_FACTOR: &str = "Section 2.4.1 (0.6W)";
}
