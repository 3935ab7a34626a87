//! # Components and Cladding
//!
//! Combined gust/external coefficients GCp read on a log10 effective-area
//! axis, then combined with internal pressure:
//!
//! ```text
//! p = qh · [(GCp) − (±GCpi)]
//! ```
//!
//! The governing pair is the max/min over all four sign combinations.
//!
//! ## Low-rise (h ≤ 60 ft)
//!
//! Walls use zones 4 and 5. Roofs use the flat-roof curves up to 7°, the
//! steep-roof curves from 27° to 45°, and a linear blend of the two between.
//!
//! ## High-rise (h > 60 ft)
//!
//! Each zone family is one two-axis grid: mean roof height (60 ft holds the
//! low-rise curves, 90 ft and above the high-rise curves) by effective area.
//! Monoslope roofs steeper than 10° have no tabulated values.
//!
//! Effective areas are tabulated in ft²; metric input is converted first.

use once_cell::sync::Lazy;

use crate::calculations::building::{edge_distance_factor, BuildingGeometry, LOW_SLOPE_LIMIT_DEG};
use crate::calculations::RunContext;
use crate::input::RoofType;
use crate::interpolation::{interpolate_log, Axis, Grid};
use crate::pressure::{envelope, PressureResult};
use crate::references::asce_ref;
use crate::results::{Applicability, CoefficientEntry, CoefficientKind, ComponentsResult, HeightClass, ZoneResult};

/// Two-point GCp curve on a log-area axis (ft²)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaCurve {
    pub areas: [f64; 2],
    pub values: [f64; 2],
}

impl AreaCurve {
    const fn new(a0: f64, a1: f64, v0: f64, v1: f64) -> Self {
        AreaCurve {
            areas: [a0, a1],
            values: [v0, v1],
        }
    }

    pub fn at(&self, area_sf: f64) -> f64 {
        interpolate_log(area_sf, &self.areas, &self.values)
    }
}

/// Positive and negative curves for one C&C zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneCurves {
    pub name: &'static str,
    pub positive: AreaCurve,
    pub negative: AreaCurve,
}

impl ZoneCurves {
    const fn new(name: &'static str, positive: AreaCurve, negative: AreaCurve) -> Self {
        ZoneCurves {
            name,
            positive,
            negative,
        }
    }

    /// (positive, negative) GCp at an area
    pub fn at(&self, area_sf: f64) -> (f64, f64) {
        (self.positive.at(area_sf), self.negative.at(area_sf))
    }
}

const LOW_RISE_WALL: [ZoneCurves; 2] = [
    ZoneCurves::new("Wall zone 4", AreaCurve::new(10.0, 500.0, 1.0, 0.7), AreaCurve::new(10.0, 500.0, -1.1, -0.8)),
    ZoneCurves::new("Wall zone 5", AreaCurve::new(10.0, 500.0, 1.0, 0.7), AreaCurve::new(10.0, 500.0, -1.4, -0.8)),
];

const LOW_RISE_FLAT_ROOF: [ZoneCurves; 3] = [
    ZoneCurves::new("Roof zone 1", AreaCurve::new(10.0, 100.0, 0.3, 0.2), AreaCurve::new(10.0, 100.0, -1.0, -0.9)),
    ZoneCurves::new("Roof zone 2", AreaCurve::new(10.0, 100.0, 0.3, 0.2), AreaCurve::new(10.0, 100.0, -1.8, -1.1)),
    ZoneCurves::new("Roof zone 3", AreaCurve::new(10.0, 100.0, 0.3, 0.2), AreaCurve::new(10.0, 100.0, -2.8, -1.1)),
];

const LOW_RISE_STEEP_ROOF: [ZoneCurves; 3] = [
    ZoneCurves::new("Roof zone 1", AreaCurve::new(10.0, 100.0, 0.9, 0.8), AreaCurve::new(10.0, 100.0, -1.0, -0.8)),
    ZoneCurves::new("Roof zone 2", AreaCurve::new(10.0, 100.0, 0.9, 0.8), AreaCurve::new(10.0, 100.0, -1.2, -1.0)),
    ZoneCurves::new("Roof zone 3", AreaCurve::new(10.0, 100.0, 0.9, 0.8), AreaCurve::new(10.0, 100.0, -1.2, -1.0)),
];

/// 7°–27° gable/hip curves, used for sloped roofs of tall buildings
const SLOPED_ROOF: [ZoneCurves; 3] = [
    ZoneCurves::new("Roof zone 1", AreaCurve::new(10.0, 100.0, 0.5, 0.3), AreaCurve::new(10.0, 100.0, -0.9, -0.8)),
    ZoneCurves::new("Roof zone 2", AreaCurve::new(10.0, 100.0, 0.5, 0.3), AreaCurve::new(10.0, 100.0, -2.1, -1.4)),
    ZoneCurves::new("Roof zone 3", AreaCurve::new(10.0, 100.0, 0.5, 0.3), AreaCurve::new(10.0, 100.0, -2.1, -1.4)),
];

const HIGH_RISE_WALL: [ZoneCurves; 2] = [
    ZoneCurves::new("Wall zone 4", AreaCurve::new(20.0, 500.0, 0.9, 0.6), AreaCurve::new(20.0, 500.0, -0.9, -0.7)),
    ZoneCurves::new("Wall zone 5", AreaCurve::new(20.0, 500.0, 0.9, 0.6), AreaCurve::new(20.0, 500.0, -1.8, -1.0)),
];

const HIGH_RISE_FLAT_ROOF: [ZoneCurves; 3] = [
    ZoneCurves::new("Roof zone 1", AreaCurve::new(10.0, 500.0, 0.0, 0.0), AreaCurve::new(10.0, 500.0, -1.4, -0.9)),
    ZoneCurves::new("Roof zone 2", AreaCurve::new(10.0, 500.0, 0.0, 0.0), AreaCurve::new(10.0, 500.0, -2.3, -1.6)),
    ZoneCurves::new("Roof zone 3", AreaCurve::new(10.0, 500.0, 0.0, 0.0), AreaCurve::new(10.0, 500.0, -3.2, -2.3)),
];

const SHALLOW_LIMIT_DEG: f64 = 7.0;
const STEEP_LIMIT_DEG: f64 = 27.0;
const STEEP_MAX_DEG: f64 = 45.0;

/// Height axis of the high-rise grids (ft)
const GRID_HEIGHTS: [f64; 2] = [60.0, 90.0];
/// Area axis of the high-rise grids (ft²); covers every curve breakpoint
const GRID_AREAS: [f64; 4] = [10.0, 20.0, 100.0, 500.0];

/// Height × log-area grids for one zone family: (name, positive, negative)
type ZoneGrids = Vec<(&'static str, Grid, Grid)>;

fn zone_grid(low: &ZoneCurves, high: &ZoneCurves, pick: fn(&ZoneCurves) -> AreaCurve) -> Grid {
    let values = [low, high]
        .iter()
        .flat_map(|zone| GRID_AREAS.iter().map(move |&a| pick(zone).at(a)))
        .collect();
    Grid::new(vec![Axis::linear(&GRID_HEIGHTS), Axis::log10(&GRID_AREAS)], values)
}

fn height_grids(low: &[ZoneCurves], high: &[ZoneCurves]) -> ZoneGrids {
    low.iter()
        .zip(high)
        .map(|(l, h)| (l.name, zone_grid(l, h, |z| z.positive), zone_grid(l, h, |z| z.negative)))
        .collect()
}

static HIGH_RISE_WALL_GRIDS: Lazy<ZoneGrids> = Lazy::new(|| height_grids(&LOW_RISE_WALL, &HIGH_RISE_WALL));
static HIGH_RISE_FLAT_ROOF_GRIDS: Lazy<ZoneGrids> =
    Lazy::new(|| height_grids(&LOW_RISE_FLAT_ROOF, &HIGH_RISE_FLAT_ROOF));
static HIGH_RISE_SLOPED_ROOF_GRIDS: Lazy<ZoneGrids> = Lazy::new(|| height_grids(&SLOPED_ROOF, &SLOPED_ROOF));

/// (zone, positive GCp, negative GCp)
pub type ZoneCoefficients = Vec<(&'static str, f64, f64)>;

fn read_curves(curves: &[ZoneCurves], area_sf: f64) -> ZoneCoefficients {
    curves
        .iter()
        .map(|z| {
            let (p, n) = z.at(area_sf);
            (z.name, p, n)
        })
        .collect()
}

fn read_grids(grids: &ZoneGrids, height_ft: f64, area_sf: f64) -> ZoneCoefficients {
    grids
        .iter()
        .map(|(name, p, n)| (*name, p.lookup(&[height_ft, area_sf]), n.lookup(&[height_ft, area_sf])))
        .collect()
}

/// Low-rise wall GCp
pub fn low_rise_wall(area_sf: f64) -> ZoneCoefficients {
    read_curves(&LOW_RISE_WALL, area_sf)
}

/// Low-rise roof GCp; slopes between 7° and 27° blend the flat and steep curves
pub fn low_rise_roof(slope_deg: f64, area_sf: f64) -> ZoneCoefficients {
    let flat = read_curves(&LOW_RISE_FLAT_ROOF, area_sf);
    let steep = read_curves(&LOW_RISE_STEEP_ROOF, area_sf);
    if slope_deg <= SHALLOW_LIMIT_DEG {
        return flat;
    }
    if slope_deg >= STEEP_LIMIT_DEG {
        return steep;
    }
    let t = (slope_deg - SHALLOW_LIMIT_DEG) / (STEEP_LIMIT_DEG - SHALLOW_LIMIT_DEG);
    flat.iter()
        .zip(&steep)
        .map(|(&(name, fp, fn_), &(_, sp, sn))| (name, fp + t * (sp - fp), fn_ + t * (sn - fn_)))
        .collect()
}

/// High-rise wall GCp at a mean roof height in ft
pub fn high_rise_wall(height_ft: f64, area_sf: f64) -> ZoneCoefficients {
    read_grids(&HIGH_RISE_WALL_GRIDS, height_ft, area_sf)
}

/// High-rise roof GCp; `None` for roof geometries without tabulated values
pub fn high_rise_roof(roof_type: RoofType, slope_deg: f64, height_ft: f64, area_sf: f64) -> Option<ZoneCoefficients> {
    if roof_type == RoofType::Flat || slope_deg <= LOW_SLOPE_LIMIT_DEG {
        return Some(read_grids(&HIGH_RISE_FLAT_ROOF_GRIDS, height_ft, area_sf));
    }
    match roof_type {
        RoofType::Gable | RoofType::Hip => Some(read_grids(&HIGH_RISE_SLOPED_ROOF_GRIDS, height_ft, area_sf)),
        RoofType::Monoslope | RoofType::Flat => None,
    }
}

/// C&C zone pressures, or "not applicable" when no effective area is given
pub fn calculate(ctx: &mut RunContext, geometry: &BuildingGeometry) -> Applicability<ComponentsResult> {
    let area = match ctx.input.effective_wind_area {
        Some(a) if a > 0.0 => a,
        _ => return Applicability::not_applicable("No effective wind area given"),
    };
    let units = ctx.site.units;
    let area_sf = units.to_sq_feet(area);
    let height_ft = units.to_feet(geometry.height);

    let mut groups: Vec<(ZoneCoefficients, String, &str)> = Vec::new();
    match ctx.height_class {
        HeightClass::LowRise => {
            let pressure = asce_ref::CC_LOW_RISE_PRESSURE;
            groups.push((low_rise_wall(area_sf), ctx.cite(asce_ref::CC_LOW_RISE_WALL), pressure));
            if geometry.slope_deg > STEEP_MAX_DEG {
                ctx.warn(format!(
                    "Roof slope {:.1}° exceeds 45°; C&C roof coefficients for 27°–45° used",
                    geometry.slope_deg
                ));
            }
            let roof_citation = if geometry.slope_deg <= SHALLOW_LIMIT_DEG {
                ctx.cite(asce_ref::CC_LOW_RISE_ROOF)
            } else if geometry.slope_deg >= STEEP_LIMIT_DEG {
                ctx.cite(asce_ref::CC_LOW_RISE_STEEP_ROOF)
            } else {
                format!(
                    "{} / {} (interpolated at θ = {:.1}°)",
                    ctx.cite(asce_ref::CC_LOW_RISE_ROOF),
                    ctx.cite(asce_ref::CC_LOW_RISE_STEEP_ROOF),
                    geometry.slope_deg
                )
            };
            groups.push((low_rise_roof(geometry.slope_deg, area_sf), roof_citation, pressure));
        }
        HeightClass::HighRise => {
            let pressure = asce_ref::CC_HIGH_RISE_PRESSURE;
            let citation = ctx.cite(asce_ref::CC_HIGH_RISE);
            groups.push((high_rise_wall(height_ft, area_sf), citation.clone(), pressure));
            match high_rise_roof(geometry.roof_type, geometry.slope_deg, height_ft, area_sf) {
                Some(roof) => groups.push((roof, citation, pressure)),
                None => ctx.warn(format!(
                    "C&C roof coefficients are not tabulated for a {:.1}° monoslope roof above 60 ft; roof zones not applicable",
                    geometry.slope_deg
                )),
            }
        }
    }

    let qh = ctx.qh.value;
    let gcpi = ctx.gcpi.value;
    let zones = groups
        .into_iter()
        .flat_map(|(coefficients, citation, pressure)| {
            let pressure_citation = ctx.cite(pressure);
            coefficients.into_iter().map(move |(name, positive, negative)| {
                let values = vec![positive, negative];
                let lrfd = envelope(qh, 1.0, &values, qh, gcpi);
                ZoneResult {
                    pressure: PressureResult::from_lrfd(name, lrfd, pressure_citation.clone()),
                    coefficient: CoefficientEntry::new(name, CoefficientKind::GustPressure, values, citation.clone()),
                }
            })
        })
        .collect();

    Applicability::Computed(ComponentsResult {
        effective_area: area,
        edge_distance: edge_distance_factor(ctx, geometry),
        zones,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::calculate as run;
    use crate::input::WindInput;

    fn find(coefficients: &ZoneCoefficients, name: &str) -> (f64, f64) {
        coefficients
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|&(_, p, n)| (p, n))
            .unwrap()
    }

    #[test]
    fn test_wall_area_endpoints() {
        assert_eq!(find(&low_rise_wall(10.0), "Wall zone 5"), (1.0, -1.4));
        assert_eq!(find(&low_rise_wall(500.0), "Wall zone 5"), (0.7, -0.8));
        // flat below 10 ft²
        assert_eq!(find(&low_rise_wall(1.0), "Wall zone 4"), (1.0, -1.1));
    }

    #[test]
    fn test_log_area_interpolation() {
        // √(10 × 100) ≈ 31.6 ft² sits halfway on the log axis
        let (_, n) = find(&low_rise_roof(0.0, 1000f64.sqrt()), "Roof zone 3");
        assert!((n - (-1.95)).abs() < 1e-9);
    }

    #[test]
    fn test_sloped_roof_blend() {
        let flat = find(&low_rise_roof(7.0, 10.0), "Roof zone 2");
        let steep = find(&low_rise_roof(27.0, 10.0), "Roof zone 2");
        let mid = find(&low_rise_roof(17.0, 10.0), "Roof zone 2");
        assert_eq!(flat, (0.3, -1.8));
        assert_eq!(steep, (0.9, -1.2));
        assert!((mid.0 - 0.6).abs() < 1e-12);
        assert!((mid.1 - (-1.5)).abs() < 1e-12);
    }

    #[test]
    fn test_high_rise_height_axis() {
        // 60 ft holds the low-rise curves, 90 ft the high-rise ones
        assert_eq!(find(&high_rise_wall(60.0, 10.0), "Wall zone 5"), (1.0, -1.4));
        assert_eq!(find(&high_rise_wall(90.0, 20.0), "Wall zone 5"), (0.9, -1.8));
        assert_eq!(find(&high_rise_wall(300.0, 500.0), "Wall zone 5"), (0.6, -1.0));
        let (_, n) = find(&high_rise_wall(75.0, 500.0), "Wall zone 5");
        assert!((n - (-0.9)).abs() < 1e-9);
    }

    #[test]
    fn test_high_rise_monoslope_unsupported() {
        assert!(high_rise_roof(RoofType::Monoslope, 20.0, 100.0, 10.0).is_none());
        assert!(high_rise_roof(RoofType::Monoslope, 5.0, 100.0, 10.0).is_some());
        let (_, n) = find(&high_rise_roof(RoofType::Flat, 0.0, 120.0, 10.0).unwrap(), "Roof zone 3");
        assert_eq!(n, -3.2);
    }

    #[test]
    fn test_four_sign_combinations() {
        let input = WindInput {
            effective_wind_area: Some(10.0),
            ..WindInput::default()
        };
        let result = run(&input).unwrap();
        let cc = result.building().unwrap().components.computed().unwrap();
        let qh = result.factors.qh.value;
        let zone3 = cc.zones.iter().find(|z| z.coefficient.zone == "Roof zone 3").unwrap();
        assert!((zone3.pressure.lrfd.negative - qh * (-2.8 - 0.18)).abs() < 1e-9);
        assert!((zone3.pressure.lrfd.positive - qh * (0.3 + 0.18)).abs() < 1e-9);
        assert_eq!(cc.zones.len(), 5);
    }

    #[test]
    fn test_tall_monoslope_warns() {
        let input = WindInput {
            mean_roof_height: 100.0,
            roof_type: RoofType::Monoslope,
            roof_slope_deg: 20.0,
            fundamental_period_s: Some(1.0),
            effective_wind_area: Some(10.0),
            ..WindInput::default()
        };
        let result = run(&input).unwrap();
        let cc = result.building().unwrap().components.computed().unwrap();
        assert_eq!(cc.zones.len(), 2);
        assert!(result.warnings.iter().any(|w| w.contains("monoslope")));
    }
}
