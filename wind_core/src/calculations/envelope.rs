//! # Building MWFRS (Envelope Procedure)
//!
//! Low-rise buildings only. Pseudo-external coefficients GCpf of Figure
//! 28.3-1 already include the gust factor, so
//!
//! ```text
//! p = qh · [(GCpf) − (±GCpi)]
//! ```
//!
//! Zones 1–4 are the interior surfaces (windward wall, windward roof, leeward
//! roof, leeward wall); 1E–4E are the end zones of width 2a.

use crate::calculations::building::{edge_distance_factor, velocity_profile, BuildingGeometry};
use crate::calculations::RunContext;
use crate::input::MwfrsMethod;
use crate::interpolation::interpolate;
use crate::pressure::{PressurePair, PressureResult};
use crate::references::asce_ref;
use crate::results::{CoefficientEntry, CoefficientKind, MwfrsResult, ZoneResult};

pub const ENVELOPE_ZONES: [&str; 8] = ["1", "2", "3", "4", "1E", "2E", "3E", "4E"];

const ENVELOPE_SLOPES: [f64; 6] = [0.0, 5.0, 20.0, 30.0, 45.0, 90.0];

/// GCpf on [`ENVELOPE_SLOPES`], one row per entry of [`ENVELOPE_ZONES`]
#[rustfmt::skip]
const ENVELOPE_GCPF: [[f64; 6]; 8] = [
    //  0°     5°     20°    30°    45°    90°
    [ 0.40,  0.40,  0.53,  0.56,  0.56,  0.56], // 1
    [-0.69, -0.69, -0.69,  0.21,  0.21,  0.56], // 2
    [-0.37, -0.37, -0.48, -0.43, -0.43, -0.37], // 3
    [-0.29, -0.29, -0.43, -0.37, -0.37, -0.37], // 4
    [ 0.61,  0.61,  0.80,  0.69,  0.69,  0.69], // 1E
    [-1.07, -1.07, -1.07,  0.27,  0.27,  0.69], // 2E
    [-0.53, -0.53, -0.69, -0.53, -0.53, -0.48], // 3E
    [-0.43, -0.43, -0.64, -0.48, -0.48, -0.48], // 4E
];

/// GCpf for one zone (index into [`ENVELOPE_ZONES`]) at a roof slope;
/// `NaN` for an unknown zone
pub fn gcpf(zone_index: usize, slope_deg: f64) -> f64 {
    ENVELOPE_GCPF
        .get(zone_index)
        .map_or(f64::NAN, |row| interpolate(slope_deg, &ENVELOPE_SLOPES, row))
}

/// Net coefficients for both internal pressure signs: `[GCpf − GCpi, GCpf + GCpi]`
pub fn net_coefficients(gcpf: f64, gcpi: f64) -> [f64; 2] {
    [gcpf - gcpi, gcpf + gcpi]
}

pub fn mwfrs(ctx: &mut RunContext, geometry: &BuildingGeometry) -> MwfrsResult {
    let qh = ctx.qh.value;
    let gcpi = ctx.gcpi.value;
    let citation = format!("{} (θ = {:.1}°)", ctx.cite(asce_ref::ENVELOPE_COEFFICIENTS), geometry.slope_deg);
    let pressure_citation = ctx.cite(asce_ref::ENVELOPE_PRESSURE);

    let zones = ENVELOPE_ZONES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let net = net_coefficients(gcpf(i, geometry.slope_deg), gcpi);
            let label = format!("Zone {}", name);
            ZoneResult {
                pressure: PressureResult::from_lrfd(
                    label.clone(),
                    PressurePair::new(qh * net[0], qh * net[1]),
                    pressure_citation.clone(),
                ),
                coefficient: CoefficientEntry::new(label, CoefficientKind::NetPressure, net.to_vec(), citation.clone()),
            }
        })
        .collect();

    MwfrsResult {
        method: MwfrsMethod::Envelope,
        zones,
        velocity_profile: velocity_profile(ctx, geometry.height),
        roof_profile: Vec::new(),
        edge_distance: Some(edge_distance_factor(ctx, geometry)),
    }
}
