//! # Design Pressure Combinator
//!
//! ```text
//! p = q_ext × G × C − q_int × (±GCpi)
//! ```
//!
//! `q_ext` is qz for the windward wall and qh for every other surface;
//! `q_int` is always qh. Velocity pressures computed from the strength-level
//! basic wind speed give LRFD pressures; ASD pressures are always derived as
//! `0.6 × LRFD` and never recomputed from coefficients.

use serde::{Deserialize, Serialize};

use crate::loads::DesignMethod;

/// ASD scaling applied to strength-level wind pressures (0.6W)
pub const ASD_FACTOR: f64 = 0.6;

/// Governing (most positive, most negative) pressure pair for one surface.
///
/// `positive` is the algebraically largest case and `negative` the smallest;
/// for a surface that is always in suction both values are negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PressurePair {
    pub positive: f64,
    pub negative: f64,
}

impl PressurePair {
    /// Order two values into a pair
    pub fn new(a: f64, b: f64) -> Self {
        PressurePair {
            positive: a.max(b),
            negative: a.min(b),
        }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        PressurePair {
            positive: self.positive * factor,
            negative: self.negative * factor,
        }
    }

    /// Largest magnitude of the two cases
    pub fn max_magnitude(&self) -> f64 {
        self.positive.abs().max(self.negative.abs())
    }
}

/// Net design pressure for one coefficient and one internal pressure sign.
pub fn design_pressure(q_ext: f64, gust: f64, coefficient: f64, q_int: f64, gcpi: f64) -> f64 {
    q_ext * gust * coefficient - q_int * gcpi
}

/// The two internal-pressure cases for one coefficient: `[+GCpi, −GCpi]`.
pub fn internal_pressure_cases(q_ext: f64, gust: f64, coefficient: f64, q_int: f64, gcpi: f64) -> [f64; 2] {
    [
        design_pressure(q_ext, gust, coefficient, q_int, gcpi),
        design_pressure(q_ext, gust, coefficient, q_int, -gcpi),
    ]
}

/// Envelope over every coefficient × (±GCpi) combination.
///
/// An empty coefficient list gives a zero pair.
pub fn envelope(q_ext: f64, gust: f64, coefficients: &[f64], q_int: f64, gcpi: f64) -> PressurePair {
    let mut cases = coefficients
        .iter()
        .flat_map(|&c| internal_pressure_cases(q_ext, gust, c, q_int, gcpi));
    let Some(first) = cases.next() else {
        return PressurePair::default();
    };
    cases.fold(PressurePair::new(first, first), |pair, p| PressurePair {
        positive: pair.positive.max(p),
        negative: pair.negative.min(p),
    })
}

/// LRFD and ASD pressure pair for one named zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureResult {
    pub zone: String,
    pub lrfd: PressurePair,
    pub asd: PressurePair,
    pub citation: String,
}

impl PressureResult {
    /// Build from the LRFD pair; the ASD pair is `ASD_FACTOR × lrfd`.
    pub fn from_lrfd(zone: impl Into<String>, lrfd: PressurePair, citation: impl Into<String>) -> Self {
        PressureResult {
            zone: zone.into(),
            lrfd,
            asd: lrfd.scaled(ASD_FACTOR),
            citation: citation.into(),
        }
    }

    /// The pair matching the selected design method
    pub fn for_method(&self, method: DesignMethod) -> PressurePair {
        match method {
            DesignMethod::Lrfd => self.lrfd,
            DesignMethod::Asd => self.asd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_pressure_formula() {
        // 28 psf × 0.85 × 0.8 − 28 × 0.18
        let p = design_pressure(28.0, 0.85, 0.8, 28.0, 0.18);
        assert!((p - (19.04 - 5.04)).abs() < 1e-12);
    }

    #[test]
    fn test_gcpi_sign_swap_keeps_unordered_pair() {
        let plus = internal_pressure_cases(25.0, 0.85, -0.7, 25.0, 0.18);
        let minus = internal_pressure_cases(25.0, 0.85, -0.7, 25.0, -0.18);
        assert_eq!(plus[0], minus[1]);
        assert_eq!(plus[1], minus[0]);

        let a = PressurePair::new(plus[0], plus[1]);
        let b = PressurePair::new(minus[0], minus[1]);
        assert_eq!(a, b);
        // the larger-magnitude case moves to the other GCpi sign
        assert!(plus[0].abs() > plus[1].abs());
        assert!(minus[1].abs() > minus[0].abs());
    }

    #[test]
    fn test_envelope_four_combinations() {
        let pair = envelope(20.0, 1.0, &[0.5, -1.0], 20.0, 0.18);
        // max: 20×0.5 + 3.6 = 13.6 ; min: −20 − 3.6 = −23.6
        assert!((pair.positive - 13.6).abs() < 1e-12);
        assert!((pair.negative - (-23.6)).abs() < 1e-12);
    }

    #[test]
    fn test_envelope_empty() {
        assert_eq!(envelope(20.0, 1.0, &[], 20.0, 0.18), PressurePair::default());
    }

    #[test]
    fn test_asd_is_exactly_six_tenths() {
        let lrfd = PressurePair::new(17.3, -31.9);
        let result = PressureResult::from_lrfd("Zone 2", lrfd, "ref");
        assert_eq!(result.asd.positive, 0.6 * result.lrfd.positive);
        assert_eq!(result.asd.negative, 0.6 * result.lrfd.negative);
        assert_eq!(result.for_method(DesignMethod::Asd), result.asd);
    }
}
