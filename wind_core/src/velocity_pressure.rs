//! # Velocity Pressure Pipeline
//!
//! ```text
//! Kz = 2.01 (max(z, 15 ft) / zg)^(2/α)          Table 26.10-1
//! q  = C · Kz · Kzt · Kd · Ke · V²  [· Iw]       Eq. 26.10-1
//! ```
//!
//! `C` is 0.00256 for psf/mph and 0.613 for Pa/(m/s). The importance factor
//! multiplies q only under ASCE 7-22; under ASCE 7-16 it is reported as 1.0.
//!
//! Invalid intermediates never propagate: Kz falls back to 1.0 and q to
//! 16 psf / 770 Pa, each with a note on the returned [`Factor`].
//!
//! ## Example
//!
//! ```rust
//! use wind_core::factors::ExposureCategory;
//! use wind_core::units::UnitSystem;
//! use wind_core::velocity_pressure::exposure_coefficient;
//!
//! let c = ExposureCategory::C.constants(UnitSystem::Imperial);
//! let kz = exposure_coefficient(30.0, &c).unwrap();
//! assert!((kz - 0.982).abs() < 0.001);
//! ```

use serde::{Deserialize, Serialize};

use crate::factors::{elevation_factor, DirectionalityCase, ExposureConstants};
use crate::input::SiteConditions;
use crate::references::{asce_ref, StandardEdition};
use crate::results::Factor;
use crate::units::UnitSystem;

/// Kz fallback when the inputs cannot produce a finite value
pub const KZ_FALLBACK: f64 = 1.0;

const PROFILE_HEIGHTS_FT: [f64; 22] = [
    15.0, 20.0, 25.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 120.0, 140.0, 160.0, 180.0, 200.0,
    250.0, 300.0, 350.0, 400.0, 450.0, 500.0,
];
const PROFILE_HEIGHTS_M: [f64; 22] = [
    4.57, 6.0, 7.5, 9.0, 12.0, 15.0, 18.0, 21.0, 24.0, 27.0, 30.0, 36.0, 42.0, 48.0, 54.0, 60.0, 75.0, 90.0,
    105.0, 120.0, 135.0, 150.0,
];

/// Velocity pressure constant C of Eq. 26.10-1
pub fn velocity_pressure_constant(units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Imperial => 0.00256,
        UnitSystem::Metric => 0.613,
    }
}

/// Fallback velocity pressure (16 psf / 770 Pa)
pub fn velocity_pressure_fallback(units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Imperial => 16.0,
        UnitSystem::Metric => 770.0,
    }
}

/// Velocity pressure exposure coefficient Kz at height `z`.
///
/// Heights below the floor use the floor. Returns `None` when `z` is not
/// finite or the exposure constants are not positive.
pub fn exposure_coefficient(z: f64, exposure: &ExposureConstants) -> Option<f64> {
    if !z.is_finite() || !(exposure.alpha > 0.0) || !(exposure.zg > 0.0) {
        return None;
    }
    let z = z.max(exposure.kz_floor);
    let kz = 2.01 * (z / exposure.zg).powf(2.0 / exposure.alpha);
    kz.is_finite().then_some(kz)
}

/// Velocity pressure from its multiplicands.
///
/// Returns `None` for a non-finite or negative product.
#[allow(clippy::too_many_arguments)]
pub fn velocity_pressure(
    kz: f64,
    kzt: f64,
    kd: f64,
    ke: f64,
    iw: f64,
    v: f64,
    units: UnitSystem,
    edition: StandardEdition,
) -> Option<f64> {
    let importance = if edition.is_newer() { iw } else { 1.0 };
    let q = velocity_pressure_constant(units) * kz * kzt * kd * ke * importance * v * v;
    (q.is_finite() && q >= 0.0).then_some(q)
}

/// One sample of the velocity pressure profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocitySample {
    pub height: f64,
    pub kz: f64,
    pub qz: f64,
}

/// Site-level velocity pressure state, computed once per run and evaluated
/// at any height.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityPressureModel {
    pub units: UnitSystem,
    pub edition: StandardEdition,
    pub exposure: ExposureConstants,
    pub kzt: Factor,
    pub kd: Factor,
    pub ke: Factor,
    pub iw: Factor,
    pub basic_wind_speed: f64,
}

impl VelocityPressureModel {
    pub fn new(site: &SiteConditions, directionality: DirectionalityCase) -> Self {
        let edition = site.edition;
        let ke_citation = if edition.is_newer() {
            edition.cite("Section 26.9 (Ke = 1.0)")
        } else {
            edition.cite(asce_ref::ELEVATION_FACTOR)
        };
        let iw_citation = if edition.is_newer() {
            edition.cite(asce_ref::IMPORTANCE)
        } else {
            edition.cite("Table 1.5-2 (reported only; risk category mapped into V)")
        };
        VelocityPressureModel {
            units: site.units,
            edition,
            exposure: site.exposure.constants(site.units),
            kzt: Factor::new(site.topographic_factor.get(), edition.cite(asce_ref::TOPOGRAPHIC)),
            kd: Factor::new(
                directionality.kd(edition),
                format!("{} ({})", edition.cite(asce_ref::DIRECTIONALITY), directionality.display_name()),
            ),
            ke: Factor::new(elevation_factor(site.ground_elevation_ft, edition), ke_citation),
            iw: Factor::new(site.risk_category.importance_factor(edition), iw_citation),
            basic_wind_speed: site.basic_wind_speed.get(),
        }
    }

    /// Kz at height `z`, with the 1.0 fallback
    pub fn kz(&self, z: f64) -> Factor {
        let citation = self.edition.cite(asce_ref::EXPOSURE_COEFFICIENT);
        match exposure_coefficient(z, &self.exposure) {
            Some(kz) => Factor::new(kz, citation),
            None => {
                log::debug!("Kz fallback at z = {}", z);
                Factor::new(KZ_FALLBACK, citation)
                    .with_note(format!("Kz could not be evaluated at z = {}; 1.0 used", z))
            }
        }
    }

    /// Velocity pressure qz at height `z`, with the fixed fallback
    pub fn qz(&self, z: f64) -> Factor {
        let kz = self.kz(z);
        let citation = self.edition.cite(asce_ref::VELOCITY_PRESSURE);
        let q = velocity_pressure(
            kz.value,
            self.kzt.value,
            self.kd.value,
            self.ke.value,
            self.iw.value,
            self.basic_wind_speed,
            self.units,
            self.edition,
        );
        let factor = match q {
            Some(q) => Factor::new(q, citation),
            None => {
                let fallback = velocity_pressure_fallback(self.units);
                log::debug!("velocity pressure fallback at z = {}", z);
                Factor::new(fallback, citation).with_note(format!(
                    "Velocity pressure was not finite and non-negative; {} {} used",
                    fallback,
                    self.units.pressure_label()
                ))
            }
        };
        match (kz.note, factor.note.is_none()) {
            (Some(note), true) => factor.with_note(note),
            _ => factor,
        }
    }

    /// Bounded (height, Kz, qz) series at standard heights up to `h`, ending at `h`
    pub fn profile(&self, h: f64) -> Vec<VelocitySample> {
        let heights: &[f64] = match self.units {
            UnitSystem::Imperial => &PROFILE_HEIGHTS_FT,
            UnitSystem::Metric => &PROFILE_HEIGHTS_M,
        };
        let mut samples: Vec<f64> = heights.iter().copied().filter(|&z| z < h).collect();
        if h.is_finite() && h > 0.0 {
            samples.push(h);
        }
        samples
            .into_iter()
            .map(|z| VelocitySample {
                height: z,
                kz: self.kz(z).value,
                qz: self.qz(z).value,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::{ExposureCategory, RiskCategory};
    use crate::input::WindInput;

    fn model(input: &WindInput) -> VelocityPressureModel {
        VelocityPressureModel::new(&input.site().unwrap(), DirectionalityCase::Building)
    }

    #[test]
    fn test_kz_exposure_c_30ft() {
        let c = ExposureCategory::C.constants(UnitSystem::Imperial);
        let kz = exposure_coefficient(30.0, &c).unwrap();
        assert!((kz - 0.9823).abs() < 1e-3);
    }

    #[test]
    fn test_kz_floor() {
        for exposure in ExposureCategory::ALL {
            let c = exposure.constants(UnitSystem::Imperial);
            let at_floor = exposure_coefficient(15.0, &c).unwrap();
            assert_eq!(exposure_coefficient(0.0, &c).unwrap(), at_floor);
            assert_eq!(exposure_coefficient(10.0, &c).unwrap(), at_floor);
        }
    }

    #[test]
    fn test_kz_monotone() {
        for exposure in ExposureCategory::ALL {
            let c = exposure.constants(UnitSystem::Imperial);
            let mut prev = 0.0;
            for i in 0..100 {
                let kz = exposure_coefficient(i as f64 * 10.0, &c).unwrap();
                assert!(kz >= prev);
                prev = kz;
            }
        }
    }

    #[test]
    fn test_kz_invalid_falls_back() {
        let input = WindInput::default();
        let m = model(&input);
        let kz = m.kz(f64::NAN);
        assert_eq!(kz.value, 1.0);
        assert!(kz.note.is_some());
    }

    #[test]
    fn test_scenario_exposure_c_115mph() {
        let input = WindInput {
            mean_roof_height: 30.0,
            basic_wind_speed: 115.0,
            exposure: ExposureCategory::C,
            ..WindInput::default()
        };
        let q = model(&input).qz(30.0);
        assert!((q.value - 28.27).abs() < 0.05, "q = {}", q.value);
        assert!(q.note.is_none());
    }

    #[test]
    fn test_q_proportional_to_v_squared() {
        let q1 = velocity_pressure(0.98, 1.0, 0.85, 1.0, 1.0, 100.0, UnitSystem::Imperial, StandardEdition::Asce716)
            .unwrap();
        let q2 = velocity_pressure(0.98, 1.0, 0.85, 1.0, 1.0, 200.0, UnitSystem::Imperial, StandardEdition::Asce716)
            .unwrap();
        assert!((q2 / q1 - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_importance_only_under_newer_edition() {
        let older = velocity_pressure(1.0, 1.0, 0.85, 1.0, 1.15, 100.0, UnitSystem::Imperial, StandardEdition::Asce716)
            .unwrap();
        let newer = velocity_pressure(1.0, 1.0, 0.85, 1.0, 1.15, 100.0, UnitSystem::Imperial, StandardEdition::Asce722)
            .unwrap();
        assert!((newer / older - 1.15).abs() < 1e-12);

        let input = WindInput {
            edition: StandardEdition::Asce722,
            risk_category: RiskCategory::IV,
            ..WindInput::default()
        };
        assert_eq!(model(&input).iw.value, 1.15);
    }

    #[test]
    fn test_negative_q_is_rejected() {
        assert!(velocity_pressure(-1.0, 1.0, 0.85, 1.0, 1.0, 100.0, UnitSystem::Imperial, StandardEdition::Asce716)
            .is_none());
        assert_eq!(velocity_pressure_fallback(UnitSystem::Metric), 770.0);
    }

    #[test]
    fn test_metric_pressure() {
        let input = WindInput {
            unit_system: UnitSystem::Metric,
            basic_wind_speed: 50.0,
            mean_roof_height: 10.0,
            ..WindInput::default()
        };
        let m = model(&input);
        let q = m.qz(10.0).value;
        let expected = 0.613 * m.kz(10.0).value * 0.85 * 2500.0;
        assert!((q - expected).abs() < 1e-9);
    }

    #[test]
    fn test_profile_bounded_and_ends_at_h() {
        let input = WindInput {
            mean_roof_height: 45.0,
            ..WindInput::default()
        };
        let profile = model(&input).profile(45.0);
        assert_eq!(profile.first().map(|s| s.height), Some(15.0));
        assert_eq!(profile.last().map(|s| s.height), Some(45.0));
        assert!(profile.len() <= 23);
        assert!(profile.windows(2).all(|w| w[1].qz >= w[0].qz));
    }
}
