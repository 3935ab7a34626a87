//! # Gust Effect Factor
//!
//! Rigid structures use G = 0.85 (Section 26.11.1). Flexible or dynamically
//! sensitive structures use the resonant model of Section 26.11.5:
//!
//! ```text
//! Gf = 0.925 · (1 + 1.7·Iz̄·√(gQ²Q² + gR²R²)) / (1 + 1.7·gv·Iz̄)
//! ```
//!
//! Every sub-quantity is its own function so it can be checked against a
//! hand calculation. Lengths and speeds are in the unit system of the run;
//! the reference height is 33 ft or 10 m and the mph → ft/s conversion applies
//! only to imperial input.
//!
//! A structure is treated as flexible when it is declared flexible with a
//! fundamental period, or when its reference height exceeds 60 ft / 18.3 m.
//! A tall structure without a declared period has its natural frequency
//! approximated as 75/h (ft) or 22.86/h (m). When the resonant model has no
//! real value (3600·n1 ≤ 1) or gives Gf above [`MAX_FLEXIBLE_GUST_FACTOR`],
//! G = 0.85 is used and the factor carries a note.

use serde::{Deserialize, Serialize};

use crate::factors::ExposureConstants;
use crate::references::{asce_ref, StandardEdition};
use crate::results::Factor;
use crate::units::{Positive, UnitSystem};

/// Gust effect factor for rigid structures
pub const RIGID_GUST_FACTOR: f64 = 0.85;
/// Peak factor for background response and wind speed, gQ = gv
pub const PEAK_FACTOR: f64 = 3.4;
/// Damping ratio, percent of critical
pub const DAMPING_RATIO: f64 = 0.01;
/// Largest resonant Gf accepted before the rigid value is substituted
pub const MAX_FLEXIBLE_GUST_FACTOR: f64 = 3.0;

/// Dimensions the resonant model needs: height, width normal to the wind,
/// length along the wind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GustGeometry {
    pub height: f64,
    pub width: f64,
    pub length: f64,
}

/// Every intermediate of the flexible gust calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GustDetails {
    pub natural_frequency: f64,
    /// True when n1 was approximated from the height
    pub frequency_estimated: bool,
    pub equivalent_height: f64,
    pub turbulence_intensity: f64,
    pub integral_length_scale: f64,
    pub background_response: f64,
    pub mean_hourly_speed: f64,
    pub reduced_frequency: f64,
    pub rn: f64,
    pub rh: f64,
    pub rb: f64,
    pub rl: f64,
    pub resonant_response: f64,
    pub resonant_peak_factor: f64,
    pub damping_ratio: f64,
}

fn reference_height(units: UnitSystem) -> f64 {
    units.reference_height()
}

/// Equivalent height z̄ = max(0.6h, zmin)
pub fn equivalent_height(h: f64, exposure: &ExposureConstants) -> f64 {
    (0.6 * h).max(exposure.z_min)
}

/// Turbulence intensity Iz̄ = c (33/z̄)^(1/6)
pub fn turbulence_intensity(z_bar: f64, exposure: &ExposureConstants, units: UnitSystem) -> f64 {
    exposure.c * (reference_height(units) / z_bar).powf(1.0 / 6.0)
}

/// Integral length scale Lz̄ = ℓ (z̄/33)^ε̄
pub fn integral_length_scale(z_bar: f64, exposure: &ExposureConstants, units: UnitSystem) -> f64 {
    exposure.ell * (z_bar / reference_height(units)).powf(exposure.epsilon_bar)
}

/// Background response Q, using the larger of width and height as the
/// governing dimension
pub fn background_response(width: f64, height: f64, length_scale: f64) -> f64 {
    let dim = width.max(height);
    (1.0 / (1.0 + 0.63 * (dim / length_scale).powf(0.63))).sqrt()
}

/// Mean hourly wind speed at z̄, in length units per second
pub fn mean_hourly_speed(z_bar: f64, v: f64, exposure: &ExposureConstants, units: UnitSystem) -> f64 {
    let to_per_second = match units {
        UnitSystem::Imperial => 88.0 / 60.0,
        UnitSystem::Metric => 1.0,
    };
    exposure.b_bar * (z_bar / reference_height(units)).powf(exposure.alpha_bar) * to_per_second * v
}

/// Reduced frequency N1 = n1 Lz̄ / V̄z̄
pub fn reduced_frequency(n1: f64, length_scale: f64, mean_speed: f64) -> f64 {
    n1 * length_scale / mean_speed
}

/// Rn = 7.47 N1 / (1 + 10.3 N1)^(5/3)
pub fn spectrum_factor(reduced_frequency: f64) -> f64 {
    7.47 * reduced_frequency / (1.0 + 10.3 * reduced_frequency).powf(5.0 / 3.0)
}

/// Size effect Rℓ = 1/η − (1 − e^(−2η)) / (2η²); 1.0 at η = 0
pub fn size_effect(eta: f64) -> f64 {
    if eta <= 0.0 {
        return 1.0;
    }
    1.0 / eta - (1.0 - (-2.0 * eta).exp()) / (2.0 * eta * eta)
}

/// Resonant peak factor gR = √(2 ln 3600n1) + 0.577 / √(2 ln 3600n1)
///
/// `NaN` when 3600·n1 ≤ 1, where the expression has no real value.
pub fn resonant_peak_factor(n1: f64) -> f64 {
    let log_term = 2.0 * (3600.0 * n1).ln();
    if log_term.is_nan() || log_term <= 0.0 {
        return f64::NAN;
    }
    let root = log_term.sqrt();
    root + 0.577 / root
}

/// Approximate natural frequency for a structure of height `h`
pub fn approximate_frequency(h: f64, units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Imperial => 75.0 / h,
        UnitSystem::Metric => 22.86 / h,
    }
}

/// Gust effect factor for flexible structures
pub fn flexible_gust_factor(intensity: f64, background: f64, resonant: f64, g_r: f64) -> f64 {
    let gq = PEAK_FACTOR;
    let gv = PEAK_FACTOR;
    let peak = (gq * gq * background * background + g_r * g_r * resonant * resonant).sqrt();
    0.925 * (1.0 + 1.7 * intensity * peak) / (1.0 + 1.7 * gv * intensity)
}

/// Full resonant-model evaluation
pub fn flexible_details(
    geometry: &GustGeometry,
    n1: f64,
    frequency_estimated: bool,
    v: f64,
    exposure: &ExposureConstants,
    units: UnitSystem,
) -> (f64, GustDetails) {
    let z_bar = equivalent_height(geometry.height, exposure);
    let iz = turbulence_intensity(z_bar, exposure, units);
    let lz = integral_length_scale(z_bar, exposure, units);
    let q = background_response(geometry.width, geometry.height, lz);
    let vz = mean_hourly_speed(z_bar, v, exposure, units);
    let n_reduced = reduced_frequency(n1, lz, vz);
    let rn = spectrum_factor(n_reduced);
    let rh = size_effect(4.6 * n1 * geometry.height / vz);
    let rb = size_effect(4.6 * n1 * geometry.width / vz);
    let rl = size_effect(15.4 * n1 * geometry.length / vz);
    let r = (rn * rh * rb * (0.53 + 0.47 * rl) / DAMPING_RATIO).max(0.0).sqrt();
    let g_r = resonant_peak_factor(n1);
    let gf = flexible_gust_factor(iz, q, r, g_r);

    let details = GustDetails {
        natural_frequency: n1,
        frequency_estimated,
        equivalent_height: z_bar,
        turbulence_intensity: iz,
        integral_length_scale: lz,
        background_response: q,
        mean_hourly_speed: vz,
        reduced_frequency: n_reduced,
        rn,
        rh,
        rb,
        rl,
        resonant_response: r,
        resonant_peak_factor: g_r,
        damping_ratio: DAMPING_RATIO,
    };
    (gf, details)
}

/// Outcome of the gust selection
#[derive(Debug, Clone, PartialEq)]
pub struct GustOutcome {
    pub factor: Factor,
    pub details: Option<GustDetails>,
    pub warnings: Vec<String>,
}

/// Select and evaluate the gust path for one structure.
///
/// `declared_frequency` is n1 from the input period, if any.
pub fn gust_effect(
    geometry: &GustGeometry,
    declared_flexible: bool,
    declared_frequency: Option<Positive>,
    v: f64,
    exposure: &ExposureConstants,
    units: UnitSystem,
    edition: StandardEdition,
) -> GustOutcome {
    let tall = geometry.height > units.low_rise_limit();
    let mut warnings = Vec::new();
    if !tall && !(declared_flexible && declared_frequency.is_some()) {
        if declared_flexible {
            warnings.push(
                "Structure declared flexible without a fundamental period; rigid gust factor used".to_string(),
            );
        }
        log::debug!("gust: rigid, G = {}", RIGID_GUST_FACTOR);
        return GustOutcome {
            factor: Factor::new(RIGID_GUST_FACTOR, edition.cite(asce_ref::GUST_RIGID)),
            details: None,
            warnings,
        };
    }

    let (n1, estimated) = match declared_frequency {
        Some(n1) => (n1.get(), false),
        None => {
            let n1 = approximate_frequency(geometry.height, units);
            warnings.push(format!(
                "No fundamental period given for a flexible structure; n1 approximated as {:.3} Hz ({})",
                n1,
                edition.cite(asce_ref::APPROXIMATE_FREQUENCY)
            ));
            (n1, true)
        }
    };

    let (gf, details) = flexible_details(geometry, n1, estimated, v, exposure, units);
    log::debug!("gust: flexible, n1 = {:.3} Hz, Gf = {:.3}", n1, gf);
    let citation = edition.cite(asce_ref::GUST_FLEXIBLE);
    let factor = if gf.is_finite() && gf > 0.0 && gf <= MAX_FLEXIBLE_GUST_FACTOR {
        Factor::new(gf, citation)
    } else {
        warnings.push("Flexible gust factor could not be evaluated; G = 0.85 used".to_string());
        Factor::new(RIGID_GUST_FACTOR, citation)
            .with_note(format!("Flexible gust factor not valid for n1 = {:.4} Hz; G = 0.85 used", n1))
    };
    GustOutcome {
        factor,
        details: Some(details),
        warnings,
    }
}
