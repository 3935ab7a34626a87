//! # Unit Types
//!
//! Unit system selection plus lightweight newtype wrappers for the handful of
//! quantities the wind engine converts between. Calculations run in the unit
//! system of the input record; tables tabulated in US customary units
//! (elevation, C&C effective area) convert through these wrappers.
//!
//! ## Example
//!
//! ```rust
//! use wind_core::units::{Feet, Meters, SqFt, SqM, Positive};
//!
//! let h: Feet = Meters(10.0).into();
//! assert!((h.0 - 32.808).abs() < 0.001);
//!
//! let area: SqFt = SqM(9.290304).into();
//! assert!((area.0 - 100.0).abs() < 1e-9);
//!
//! assert!(Positive::new(-1.0).is_none());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Feet per meter conversion constant
pub const FT_PER_M: f64 = 1.0 / 0.3048;

// ============================================================================
// Unit System
// ============================================================================

/// Unit system of an input record. All lengths, speeds, and pressures in a
/// [`crate::input::WindInput`] are expressed in this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    /// ft, mph, psf, lb
    #[default]
    Imperial,
    /// m, m/s, Pa, N
    Metric,
}

impl UnitSystem {
    pub fn length_label(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "ft",
            UnitSystem::Metric => "m",
        }
    }

    pub fn area_label(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "ft²",
            UnitSystem::Metric => "m²",
        }
    }

    pub fn speed_label(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "mph",
            UnitSystem::Metric => "m/s",
        }
    }

    pub fn pressure_label(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "psf",
            UnitSystem::Metric => "Pa",
        }
    }

    pub fn force_label(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "lb",
            UnitSystem::Metric => "N",
        }
    }

    /// Convert a length in this system to feet
    pub fn to_feet(&self, length: f64) -> f64 {
        match self {
            UnitSystem::Imperial => length,
            UnitSystem::Metric => Feet::from(Meters(length)).0,
        }
    }

    /// Convert an area in this system to square feet
    pub fn to_sq_feet(&self, area: f64) -> f64 {
        match self {
            UnitSystem::Imperial => area,
            UnitSystem::Metric => SqFt::from(SqM(area)).0,
        }
    }

    /// Reference height for the boundary-layer power laws (33 ft / 10 m)
    pub fn reference_height(&self) -> f64 {
        match self {
            UnitSystem::Imperial => 33.0,
            UnitSystem::Metric => 10.0,
        }
    }

    /// Mean roof height separating low-rise from tall buildings (60 ft / 18.3 m)
    pub fn low_rise_limit(&self) -> f64 {
        match self {
            UnitSystem::Imperial => 60.0,
            UnitSystem::Metric => 18.3,
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitSystem::Imperial => write!(f, "Imperial"),
            UnitSystem::Metric => write!(f, "Metric"),
        }
    }
}

// ============================================================================
// Validated values
// ============================================================================

/// A finite, strictly positive number.
///
/// Built once at the input boundary so downstream formulas can divide, take
/// logarithms, and raise to fractional powers without re-checking.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Positive(f64);

impl Positive {
    /// Returns `None` unless `value` is finite and > 0
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Positive(value))
    }

    /// Like [`Positive::new`] but reports the offending field
    pub fn try_new(field: &str, value: f64) -> CalcResult<Self> {
        Positive::new(value).ok_or_else(|| {
            CalcError::invalid_input(field, value.to_string(), "Must be a finite positive number")
        })
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Positive {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Positive::new(value)
            .ok_or_else(|| serde::de::Error::custom(format!("expected a finite positive number, got {}", value)))
    }
}

// ============================================================================
// Length / Area Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Meters> for Feet {
    fn from(m: Meters) -> Self {
        Feet(m.0 * FT_PER_M)
    }
}

impl From<Feet> for Meters {
    fn from(ft: Feet) -> Self {
        Meters(ft.0 / FT_PER_M)
    }
}

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqM(pub f64);

impl From<SqM> for SqFt {
    fn from(sqm: SqM) -> Self {
        SqFt(sqm.0 * FT_PER_M * FT_PER_M)
    }
}

impl From<SqFt> for SqM {
    fn from(sqft: SqFt) -> Self {
        SqM(sqft.0 / (FT_PER_M * FT_PER_M))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_to_feet() {
        let ft: Feet = Meters(18.3).into();
        assert!((ft.0 - 60.04).abs() < 0.01);
    }

    #[test]
    fn test_area_conversion() {
        let sqm: SqM = SqFt(10.0).into();
        assert!((sqm.0 - 0.929).abs() < 0.001);
    }

    #[test]
    fn test_positive_rejects_bad_values() {
        assert!(Positive::new(0.0).is_none());
        assert!(Positive::new(f64::NAN).is_none());
        assert!(Positive::new(f64::INFINITY).is_none());
        assert_eq!(Positive::new(2.5).map(Positive::get), Some(2.5));
        assert!(Positive::try_new("height", -1.0).is_err());
    }

    #[test]
    fn test_positive_deserialization() {
        let p: Positive = serde_json::from_str("3.0").unwrap();
        assert_eq!(p.get(), 3.0);
        assert!(serde_json::from_str::<Positive>("-3.0").is_err());
    }
}
