//! # Arched Roofs
//!
//! Table 27.3-3 external pressure coefficients on the rise-to-span ratio
//! r = rise / span:
//!
//! | Condition           | r range        | Windward quarter | Center half | Leeward quarter |
//! |---------------------|----------------|------------------|-------------|-----------------|
//! | Elevated structure  | 0 < r < 0.2    | −0.9             | −0.7 − r    | −0.5            |
//! |                     | 0.2 ≤ r < 0.3  | 1.5r − 0.3       | −0.7 − r    | −0.5            |
//! |                     | 0.3 ≤ r ≤ 0.6  | 2.75r − 0.7      | −0.7 − r    | −0.5            |
//! | Springing from grade| 0 < r ≤ 0.6    | 1.4r             | −0.7 − r    | −0.5            |
//!
//! The windward quarter is read from a grid over eave-height/span and r: the
//! grade row at eave/span = 0, the elevated row from
//! [`ELEVATED_EAVE_RATIO`] up, linear between. Arches with r above 0.6 are
//! outside the table.

use once_cell::sync::Lazy;

use crate::calculations::RunContext;
use crate::input::ArchedRoofGeometry;
use crate::interpolation::{Axis, Grid};
use crate::references::asce_ref;
use crate::results::{Applicability, CoefficientKind, ZoneListResult};

pub const MAX_RISE_RATIO: f64 = 0.6;
pub const LEEWARD_QUARTER_CP: f64 = -0.5;
/// Eave-height/span ratio at which the arch counts as fully elevated
pub const ELEVATED_EAVE_RATIO: f64 = 0.1;

// band edges repeat so each step applies from its lower bound
const RISE_RATIOS: [f64; 6] = [0.0, 0.2, 0.2, 0.3, 0.3, 0.6];

#[rustfmt::skip]
static WINDWARD_QUARTER: Lazy<Grid> = Lazy::new(|| {
    Grid::new(
        vec![Axis::linear(&[0.0, ELEVATED_EAVE_RATIO]), Axis::linear(&RISE_RATIOS)],
        vec![
            0.0,  0.28, 0.28, 0.42,  0.42,  0.84, // springing from grade, 1.4r
           -0.9, -0.9,  0.0,  0.15,  0.125, 0.95, // elevated
        ],
    )
});

/// Height at which qh is evaluated: eave plus half the rise
pub fn mean_height(geometry: &ArchedRoofGeometry) -> f64 {
    geometry.eave_height + geometry.rise / 2.0
}

pub fn rise_ratio(geometry: &ArchedRoofGeometry) -> f64 {
    geometry.rise / geometry.span
}

pub fn eave_ratio(geometry: &ArchedRoofGeometry) -> f64 {
    geometry.eave_height / geometry.span
}

pub fn windward_quarter_cp(r: f64, eave_ratio: f64) -> f64 {
    WINDWARD_QUARTER.lookup(&[eave_ratio, r])
}

pub fn center_half_cp(r: f64) -> f64 {
    -0.7 - r
}

pub fn calculate(ctx: &mut RunContext, geometry: &ArchedRoofGeometry) -> Applicability<ZoneListResult> {
    let r = rise_ratio(geometry);
    if r > MAX_RISE_RATIO {
        let reason = format!(
            "Arched roof rise/span ratio {:.3} exceeds {} and is outside the tabulated range",
            r, MAX_RISE_RATIO
        );
        ctx.warn(reason.clone());
        return Applicability::not_applicable(reason);
    }
    let eave = eave_ratio(geometry);
    let qh = ctx.qh.value;
    let citation = format!(
        "{} (r = {:.3}, eave/span = {:.3})",
        ctx.cite(asce_ref::ARCHED_ROOF),
        r,
        eave
    );

    let zones = vec![
        ctx.zone(
            "Windward quarter",
            CoefficientKind::ExternalPressure,
            vec![windward_quarter_cp(r, eave)],
            citation.clone(),
            qh,
        ),
        ctx.zone(
            "Center half",
            CoefficientKind::ExternalPressure,
            vec![center_half_cp(r)],
            citation.clone(),
            qh,
        ),
        ctx.zone(
            "Leeward quarter",
            CoefficientKind::ExternalPressure,
            vec![LEEWARD_QUARTER_CP],
            citation,
            qh,
        ),
    ];
    Applicability::Computed(ZoneListResult { zones })
}
