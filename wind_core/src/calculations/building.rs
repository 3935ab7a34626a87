//! # Building MWFRS (Directional Procedure)
//!
//! External pressure coefficients of Figure 27.3-1 combined as
//!
//! ```text
//! p = q·G·Cp − qh·(±GCpi)
//! ```
//!
//! ## Walls
//!
//! | Surface  | Cp                                   |
//! |----------|--------------------------------------|
//! | Windward | 0.8 (with qz)                        |
//! | Leeward  | L/B: 0, 1, 2, ≥4 → −0.5, −0.5, −0.3, −0.2 |
//! | Side     | −0.7                                 |
//!
//! ## Roofs
//!
//! Low-slope roofs (flat, or slope below 10°) are zoned by distance from the
//! windward edge in multiples of h under ASCE 7-16, and by an edge strip of
//! width 2a under ASCE 7-22. Sloped roofs read the windward and leeward
//! tables on slope and h/L. Buildings taller than 60 ft use the same
//! coefficients without roof zoning.

use once_cell::sync::Lazy;

use crate::calculations::{envelope, RunContext};
use crate::factors::EnclosureClassification;
use crate::input::{MwfrsMethod, RoofType, WindInput};
use crate::interpolation::{interpolate, Axis, Grid};
use crate::pressure::envelope as pressure_envelope;
use crate::references::asce_ref;
use crate::results::{CoefficientKind, Factor, HeightClass, MwfrsResult, ProfilePoint, RoofProfilePoint, ZoneResult};
use crate::units::{Positive, UnitSystem};

/// Windward wall external pressure coefficient
pub const WINDWARD_WALL_CP: f64 = 0.8;
/// Side wall external pressure coefficient
pub const SIDE_WALL_CP: f64 = -0.7;
/// Companion (least suction) coefficient for low-slope and shallow windward roofs
pub const ROOF_COMPANION_CP: f64 = -0.18;
/// Roof slope below which the roof is zoned as flat
pub const LOW_SLOPE_LIMIT_DEG: f64 = 10.0;

const LEEWARD_WALL_L_OVER_B: [f64; 4] = [0.0, 1.0, 2.0, 4.0];
const LEEWARD_WALL_CP: [f64; 4] = [-0.5, -0.5, -0.3, -0.2];

const ROOF_H_OVER_L: [f64; 3] = [0.25, 0.5, 1.0];
const WINDWARD_SLOPES: [f64; 8] = [10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 45.0, 60.0];
const LEEWARD_SLOPES: [f64; 3] = [10.0, 15.0, 20.0];

#[rustfmt::skip]
static WINDWARD_ROOF_NEGATIVE: Lazy<Grid> = Lazy::new(|| {
    Grid::new(
        vec![Axis::linear(&ROOF_H_OVER_L), Axis::linear(&WINDWARD_SLOPES)],
        vec![
            -0.7, -0.5, -0.3, -0.2, -0.2,  0.0, 0.0, 0.6,
            -0.9, -0.7, -0.4, -0.3, -0.2, -0.2, 0.0, 0.6,
            -1.3, -1.0, -0.7, -0.5, -0.3, -0.2, 0.0, 0.6,
        ],
    )
});

#[rustfmt::skip]
static WINDWARD_ROOF_POSITIVE: Lazy<Grid> = Lazy::new(|| {
    Grid::new(
        vec![Axis::linear(&ROOF_H_OVER_L), Axis::linear(&WINDWARD_SLOPES)],
        vec![
            -0.18,  0.0,   0.2,  0.3, 0.3, 0.4, 0.4, 0.6,
            -0.18, -0.18,  0.0,  0.2, 0.2, 0.3, 0.4, 0.6,
            -0.18, -0.18, -0.18, 0.0, 0.2, 0.2, 0.3, 0.6,
        ],
    )
});

#[rustfmt::skip]
static LEEWARD_ROOF: Lazy<Grid> = Lazy::new(|| {
    Grid::new(
        vec![Axis::linear(&ROOF_H_OVER_L), Axis::linear(&LEEWARD_SLOPES)],
        vec![
            -0.3, -0.5, -0.6,
            -0.5, -0.5, -0.6,
            -0.7, -0.6, -0.6,
        ],
    )
});

/// Low-slope roof distance zones under ASCE 7-16: (start, end) in multiples
/// of h, and Cp at h/L ≤ 0.5 and h/L ≥ 1.0.
const FLAT_ROOF_ZONES: [(f64, Option<f64>, f64, f64); 4] = [
    (0.0, Some(0.5), -0.9, -1.3),
    (0.5, Some(1.0), -0.9, -0.7),
    (1.0, Some(2.0), -0.5, -0.7),
    (2.0, None, -0.3, -0.7),
];

/// Low-slope roof edge-strip zones under ASCE 7-22: Cp at h/L ≤ 0.5 and ≥ 1.0
const EDGE_STRIP_CP: (f64, f64) = (-0.9, -1.3);
const ROOF_INTERIOR_CP: (f64, f64) = (-0.5, -0.7);

const ROOF_PROFILE_SAMPLES: usize = 20;

// ============================================================================
// Geometry
// ============================================================================

/// Validated building geometry. `length` is parallel to the wind (L) and
/// `width` normal to it (B).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingGeometry {
    pub height: f64,
    pub length: f64,
    pub width: f64,
    pub roof_type: RoofType,
    pub slope_deg: f64,
    pub enclosure: EnclosureClassification,
}

impl BuildingGeometry {
    pub fn from_input(input: &WindInput) -> Result<Self, String> {
        let positive = |field: &str, value: f64| {
            Positive::try_new(field, value)
                .map(Positive::get)
                .map_err(|e| e.to_string())
        };
        Ok(BuildingGeometry {
            height: positive("mean_roof_height", input.mean_roof_height)?,
            length: positive("building_length", input.building_length)?,
            width: positive("building_width", input.building_width)?,
            roof_type: input.roof_type,
            slope_deg: if input.roof_type == RoofType::Flat {
                0.0
            } else {
                input.roof_slope_deg
            },
            enclosure: input.enclosure,
        })
    }

    pub fn h_over_l(&self) -> f64 {
        self.height / self.length
    }

    pub fn l_over_b(&self) -> f64 {
        self.length / self.width
    }

    pub fn least_dimension(&self) -> f64 {
        self.length.min(self.width)
    }

    /// Zoned as a flat roof
    pub fn is_low_slope(&self) -> bool {
        self.roof_type == RoofType::Flat || self.slope_deg < LOW_SLOPE_LIMIT_DEG
    }

    /// Same building with the wind turned 90°
    pub fn transposed(&self) -> Self {
        BuildingGeometry {
            length: self.width,
            width: self.length,
            ..*self
        }
    }

    pub fn is_low_rise(&self, units: UnitSystem) -> bool {
        self.height <= units.low_rise_limit()
    }
}

/// Edge distance a = min(0.1·least, 0.4h), not less than 0.04·least or 3 ft (0.9 m)
pub fn edge_distance(least_dimension: f64, height: f64, units: UnitSystem) -> f64 {
    let absolute_min = match units {
        UnitSystem::Imperial => 3.0,
        UnitSystem::Metric => 0.9,
    };
    (0.1 * least_dimension)
        .min(0.4 * height)
        .max(0.04 * least_dimension)
        .max(absolute_min)
}

pub fn edge_distance_factor(ctx: &RunContext, geometry: &BuildingGeometry) -> Factor {
    Factor::new(
        edge_distance(geometry.least_dimension(), geometry.height, ctx.site.units),
        ctx.cite(asce_ref::EDGE_DISTANCE),
    )
}

// ============================================================================
// Coefficient lookups
// ============================================================================

/// Leeward wall Cp for a plan aspect ratio L/B
pub fn leeward_wall_cp(l_over_b: f64) -> f64 {
    interpolate(l_over_b, &LEEWARD_WALL_L_OVER_B, &LEEWARD_WALL_CP)
}

/// Windward roof Cp pair (most negative, least negative/positive)
pub fn windward_roof_cp(slope_deg: f64, h_over_l: f64) -> (f64, f64) {
    if slope_deg >= 60.0 {
        let cp = 0.01 * slope_deg;
        return (cp, cp);
    }
    (
        WINDWARD_ROOF_NEGATIVE.lookup(&[h_over_l, slope_deg]),
        WINDWARD_ROOF_POSITIVE.lookup(&[h_over_l, slope_deg]),
    )
}

pub fn leeward_roof_cp(slope_deg: f64, h_over_l: f64) -> f64 {
    LEEWARD_ROOF.lookup(&[h_over_l, slope_deg])
}

fn blend_on_h_over_l(h_over_l: f64, (shallow, deep): (f64, f64)) -> f64 {
    interpolate(h_over_l, &[0.5, 1.0], &[shallow, deep])
}

/// One roof zone by distance from the windward edge
#[derive(Debug, Clone, PartialEq)]
struct RoofZone {
    name: String,
    start: f64,
    end: Option<f64>,
    cp: f64,
    companion: Option<f64>,
}

impl RoofZone {
    fn contains(&self, x: f64) -> bool {
        x >= self.start && self.end.map_or(true, |end| x < end)
    }

    fn values(&self) -> Vec<f64> {
        match self.companion {
            Some(c) => vec![self.cp, c],
            None => vec![self.cp],
        }
    }
}

fn flat_roof_zones_by_height(geometry: &BuildingGeometry) -> Vec<RoofZone> {
    let h = geometry.height;
    let labels = ["0 to h/2", "h/2 to h", "h to 2h", "beyond 2h"];
    FLAT_ROOF_ZONES
        .iter()
        .zip(labels)
        .map(|(&(start, end, shallow, deep), label)| RoofZone {
            name: format!("Roof {}", label),
            start: start * h,
            end: end.map(|e| e * h),
            cp: blend_on_h_over_l(geometry.h_over_l(), (shallow, deep)),
            companion: Some(ROOF_COMPANION_CP),
        })
        .filter(|zone| zone.start < geometry.length)
        .collect()
}

fn flat_roof_zones_by_edge_strip(geometry: &BuildingGeometry, a: f64) -> Vec<RoofZone> {
    let strip = 2.0 * a;
    let mut zones = vec![RoofZone {
        name: "Roof edge strip (0 to 2a)".to_string(),
        start: 0.0,
        end: Some(strip),
        cp: blend_on_h_over_l(geometry.h_over_l(), EDGE_STRIP_CP),
        companion: Some(ROOF_COMPANION_CP),
    }];
    if strip < geometry.length {
        zones.push(RoofZone {
            name: "Roof interior (beyond 2a)".to_string(),
            start: strip,
            end: None,
            cp: blend_on_h_over_l(geometry.h_over_l(), ROOF_INTERIOR_CP),
            companion: Some(ROOF_COMPANION_CP),
        });
    }
    zones
}

fn sloped_roof_zones(geometry: &BuildingGeometry) -> Vec<RoofZone> {
    let half = 0.5 * geometry.length;
    let (negative, positive) = windward_roof_cp(geometry.slope_deg, geometry.h_over_l());
    let leeward = leeward_roof_cp(geometry.slope_deg, geometry.h_over_l());
    let (windward_name, leeward_name) = match geometry.roof_type {
        RoofType::Monoslope => ("Roof (wind on low eave)", "Roof (wind on high eave)"),
        _ => ("Windward roof", "Leeward roof"),
    };
    vec![
        RoofZone {
            name: windward_name.to_string(),
            start: 0.0,
            end: Some(half),
            cp: negative,
            companion: Some(positive),
        },
        RoofZone {
            name: leeward_name.to_string(),
            start: half,
            end: None,
            cp: leeward,
            companion: None,
        },
    ]
}

/// Hip end surfaces, read with the wind parallel to the ridge
fn hip_end_zones(geometry: &BuildingGeometry) -> Vec<RoofZone> {
    if geometry.roof_type != RoofType::Hip || geometry.slope_deg <= LOW_SLOPE_LIMIT_DEG {
        return Vec::new();
    }
    let turned = geometry.transposed();
    let (negative, positive) = windward_roof_cp(turned.slope_deg, turned.h_over_l());
    vec![
        RoofZone {
            name: "Hip end (windward)".to_string(),
            start: 0.0,
            end: None,
            cp: negative,
            companion: Some(positive),
        },
        RoofZone {
            name: "Hip end (leeward)".to_string(),
            start: 0.0,
            end: None,
            cp: leeward_roof_cp(turned.slope_deg, turned.h_over_l()),
            companion: None,
        },
    ]
}

// ============================================================================
// Generator
// ============================================================================

/// Procedure actually used: tall buildings always take the all-heights path
pub fn resolve_method(ctx: &mut RunContext, requested: MwfrsMethod) -> MwfrsMethod {
    if ctx.height_class == HeightClass::LowRise {
        return requested;
    }
    if requested == MwfrsMethod::Envelope {
        ctx.warn("Envelope procedure is limited to low-rise buildings; directional procedure for all heights used");
    }
    MwfrsMethod::Analytical
}

/// MWFRS pressures for a building
pub fn mwfrs(ctx: &mut RunContext, geometry: &BuildingGeometry) -> MwfrsResult {
    let requested = ctx.input.mwfrs_method;
    let method = resolve_method(ctx, requested);
    log::debug!("MWFRS method: {}", method.display_name());
    match method {
        MwfrsMethod::Envelope => envelope::mwfrs(ctx, geometry),
        MwfrsMethod::Directional | MwfrsMethod::Analytical => directional(ctx, geometry, method),
    }
}

/// Windward wall pressure samples up the height of the building
pub fn velocity_profile(ctx: &RunContext, height: f64) -> Vec<ProfilePoint> {
    ctx.velocity
        .profile(height)
        .into_iter()
        .map(|s| ProfilePoint {
            height: s.height,
            kz: s.kz,
            qz: s.qz,
            windward_lrfd: pressure_envelope(s.qz, ctx.gust.value, &[WINDWARD_WALL_CP], ctx.qh.value, ctx.gcpi.value),
        })
        .collect()
}

pub fn wall_zones(ctx: &RunContext, geometry: &BuildingGeometry) -> Vec<ZoneResult> {
    let citation = ctx.cite(asce_ref::WALL_PRESSURE_COEFFICIENTS);
    let qh = ctx.qh.value;
    vec![
        // height-varying qz values are in the velocity profile
        ctx.zone(
            "Windward wall (at h)",
            CoefficientKind::ExternalPressure,
            vec![WINDWARD_WALL_CP],
            format!("{}, qz = qh", citation),
            qh,
        ),
        ctx.zone(
            "Leeward wall",
            CoefficientKind::ExternalPressure,
            vec![leeward_wall_cp(geometry.l_over_b())],
            format!("{} (L/B = {:.2})", citation, geometry.l_over_b()),
            qh,
        ),
        ctx.zone("Side walls", CoefficientKind::ExternalPressure, vec![SIDE_WALL_CP], citation, qh),
    ]
}

fn directional(ctx: &mut RunContext, geometry: &BuildingGeometry, method: MwfrsMethod) -> MwfrsResult {
    let units = ctx.site.units;
    let mut edge = None;

    let mut roof = if geometry.is_low_slope() {
        if ctx.site.edition.is_newer() && method == MwfrsMethod::Directional {
            let a = edge_distance_factor(ctx, geometry);
            let zones = flat_roof_zones_by_edge_strip(geometry, a.value);
            edge = Some(a);
            zones
        } else {
            flat_roof_zones_by_height(geometry)
        }
    } else {
        sloped_roof_zones(geometry)
    };
    if method == MwfrsMethod::Analytical && geometry.is_low_slope() {
        // unzoned: the windward-edge value governs the whole roof
        roof.truncate(1);
        if let Some(zone) = roof.first_mut() {
            zone.name = "Roof".to_string();
            zone.end = None;
        }
    }

    let roof_profile = roof_profile(ctx, geometry, &roof);
    let roof_citation = format!(
        "{} (θ = {:.1}°, h/L = {:.2})",
        ctx.cite(asce_ref::ROOF_PRESSURE_COEFFICIENTS),
        geometry.slope_deg,
        geometry.h_over_l()
    );
    let mut zones = wall_zones(ctx, geometry);
    for zone in roof.iter().chain(hip_end_zones(geometry).iter()) {
        zones.push(ctx.zone(
            &zone.name,
            CoefficientKind::ExternalPressure,
            zone.values(),
            roof_citation.clone(),
            ctx.qh.value,
        ));
    }
    log::debug!("{} MWFRS zones, units {}", zones.len(), units);

    MwfrsResult {
        method,
        zones,
        velocity_profile: velocity_profile(ctx, geometry.height),
        roof_profile,
        edge_distance: edge,
    }
}

fn roof_profile(ctx: &RunContext, geometry: &BuildingGeometry, zones: &[RoofZone]) -> Vec<RoofProfilePoint> {
    let step = geometry.length / ROOF_PROFILE_SAMPLES as f64;
    (0..=ROOF_PROFILE_SAMPLES)
        .filter_map(|i| {
            let x = step * i as f64;
            let zone = zones.iter().rev().find(|z| z.contains(x))?;
            Some(RoofProfilePoint {
                distance: x,
                cp: zone.cp,
                lrfd: pressure_envelope(ctx.qh.value, ctx.gust.value, &zone.values(), ctx.qh.value, ctx.gcpi.value),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::calculate;
    use crate::references::StandardEdition;

    fn geometry(h: f64, l: f64, b: f64, roof_type: RoofType, slope: f64) -> BuildingGeometry {
        BuildingGeometry {
            height: h,
            length: l,
            width: b,
            roof_type,
            slope_deg: slope,
            enclosure: EnclosureClassification::Enclosed,
        }
    }

    #[test]
    fn test_leeward_wall_aspect_ratio() {
        assert_eq!(leeward_wall_cp(2.0), -0.3);
        assert_eq!(leeward_wall_cp(0.5), -0.5);
        assert!((leeward_wall_cp(3.0) - (-0.25)).abs() < 1e-12);
        assert_eq!(leeward_wall_cp(10.0), -0.2);
    }

    #[test]
    fn test_windward_roof_table() {
        let (neg, pos) = windward_roof_cp(20.0, 0.25);
        assert!((neg - (-0.3)).abs() < 1e-12);
        assert!((pos - 0.2).abs() < 1e-12);
        let (neg, _) = windward_roof_cp(12.5, 0.25);
        assert!((neg - (-0.6)).abs() < 1e-12);
        let (neg, pos) = windward_roof_cp(75.0, 0.5);
        assert_eq!((neg, pos), (0.75, 0.75));
    }

    #[test]
    fn test_leeward_roof_table() {
        assert!((leeward_roof_cp(10.0, 1.0) - (-0.7)).abs() < 1e-12);
        assert!((leeward_roof_cp(30.0, 0.25) - (-0.6)).abs() < 1e-12);
    }

    #[test]
    fn test_edge_distance() {
        // 0.1 × 60 = 6, 0.4 × 30 = 12
        assert_eq!(edge_distance(60.0, 30.0, UnitSystem::Imperial), 6.0);
        // floor of 3 ft
        assert_eq!(edge_distance(20.0, 10.0, UnitSystem::Imperial), 3.0);
        // 0.4h governs, 0.04 × 500 = 20 floor applies
        assert_eq!(edge_distance(500.0, 40.0, UnitSystem::Imperial), 20.0);
    }

    #[test]
    fn test_flat_roof_zones_stop_at_building_length() {
        let g = geometry(30.0, 40.0, 60.0, RoofType::Flat, 0.0);
        let zones = flat_roof_zones_by_height(&g);
        // zones start at 0, 15, 30 (60 is beyond L = 40)
        assert_eq!(zones.len(), 3);
        let g = geometry(30.0, 200.0, 60.0, RoofType::Flat, 0.0);
        let zones = flat_roof_zones_by_height(&g);
        assert_eq!(zones.len(), 4);
        assert_eq!(zones[0].cp, -0.9);
        assert_eq!(zones[3].cp, -0.3);
    }

    #[test]
    fn test_flat_roof_high_aspect() {
        let g = geometry(40.0, 40.0, 60.0, RoofType::Flat, 0.0);
        let zones = flat_roof_zones_by_height(&g);
        assert_eq!(zones[0].cp, -1.3);
        assert_eq!(zones[1].cp, -0.7);
    }

    #[test]
    fn test_hip_end_zones_only_above_ten_degrees() {
        assert!(hip_end_zones(&geometry(30.0, 100.0, 60.0, RoofType::Hip, 10.0)).is_empty());
        assert_eq!(hip_end_zones(&geometry(30.0, 100.0, 60.0, RoofType::Hip, 20.0)).len(), 2);
        assert!(hip_end_zones(&geometry(30.0, 100.0, 60.0, RoofType::Gable, 20.0)).is_empty());
    }

    #[test]
    fn test_low_rise_gable_run() {
        let input = WindInput {
            roof_type: RoofType::Gable,
            roof_slope_deg: 20.0,
            building_length: 120.0,
            building_width: 60.0,
            ..WindInput::default()
        };
        let result = calculate(&input).unwrap();
        let mwfrs = &result.building().unwrap().mwfrs;
        assert_eq!(mwfrs.method, MwfrsMethod::Directional);
        let names: Vec<&str> = mwfrs.zones.iter().map(|z| z.coefficient.zone.as_str()).collect();
        assert_eq!(names, ["Windward wall (at h)", "Leeward wall", "Side walls", "Windward roof", "Leeward roof"]);
        // leeward wall at L/B = 2
        assert_eq!(mwfrs.zones[1].coefficient.values, vec![-0.3]);

        // windward wall: qh·G·0.8 ± qh·0.18
        let qh = result.factors.qh.value;
        let p = &mwfrs.zones[0].pressure.lrfd;
        assert!((p.positive - (qh * 0.85 * 0.8 + qh * 0.18)).abs() < 1e-9);
        assert!((p.negative - (qh * 0.85 * 0.8 - qh * 0.18)).abs() < 1e-9);
        assert!(mwfrs.zones[0].coefficient.citation.ends_with("qz = qh"));
        assert!(mwfrs.roof_profile.len() <= ROOF_PROFILE_SAMPLES + 1);
    }

    #[test]
    fn test_newer_edition_flat_roof_edge_strip() {
        let input = WindInput {
            edition: StandardEdition::Asce722,
            ..WindInput::default()
        };
        let result = calculate(&input).unwrap();
        let mwfrs = &result.building().unwrap().mwfrs;
        assert!(mwfrs.edge_distance.is_some());
        assert!(mwfrs.zones.iter().any(|z| z.coefficient.zone == "Roof edge strip (0 to 2a)"));
    }

    #[test]
    fn test_tall_building_forced_to_all_heights_path() {
        let input = WindInput {
            mean_roof_height: 120.0,
            mwfrs_method: MwfrsMethod::Envelope,
            fundamental_period_s: Some(1.0),
            ..WindInput::default()
        };
        let result = calculate(&input).unwrap();
        let mwfrs = &result.building().unwrap().mwfrs;
        assert_eq!(mwfrs.method, MwfrsMethod::Analytical);
        assert!(mwfrs.zones.iter().any(|z| z.coefficient.zone == "Roof"));
        assert!(result.warnings.iter().any(|w| w.contains("Envelope")));
        // windward profile reaches h
        assert_eq!(mwfrs.velocity_profile.last().map(|p| p.height), Some(120.0));
    }
}
