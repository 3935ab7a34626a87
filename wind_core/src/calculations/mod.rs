//! # Wind Load Calculations
//!
//! One run follows the same pattern for every structure family:
//!
//! - [`WindInput`] - input parameters (JSON-serializable)
//! - [`WindResult`] - calculation results (JSON-serializable)
//! - [`calculate`] - pure calculation function
//!
//! The dispatcher validates the input, converts it into a [`Structure`]
//! (exactly one family per run), computes the shared intermediates once
//! (Kz, Ke, Kd, Iw, qh, G, GCpi) and hands a [`RunContext`] to the one
//! family generator that applies.
//!
//! ## Available Generators
//!
//! - [`building`] - MWFRS by the directional procedure (low-rise and all heights)
//! - [`envelope`] - MWFRS by the envelope procedure
//! - [`components`] - components and cladding
//! - [`torsion`] - torsional load cases
//! - [`appurtenances`] - parapets, overhangs, rooftop equipment
//! - [`signs`] - open and solid signs
//! - [`chimney`] - chimneys and tanks
//! - [`tower`] - trussed towers
//! - [`arched_roof`] - arched roofs
//! - [`free_roof`] - open buildings with free roofs
//!
//! ## Example
//!
//! ```rust
//! use wind_core::calculations::calculate;
//! use wind_core::input::WindInput;
//!
//! let result = calculate(&WindInput::default()).unwrap();
//! let building = result.building().unwrap();
//! assert!(!building.mwfrs.zones.is_empty());
//! ```

pub mod appurtenances;
pub mod arched_roof;
pub mod building;
pub mod chimney;
pub mod components;
pub mod envelope;
pub mod free_roof;
pub mod signs;
pub mod torsion;
pub mod tower;

use crate::errors::CalcResult;
use crate::factors::{DirectionalityCase, EnclosureClassification};
use crate::gust::{gust_effect, GustGeometry};
use crate::input::{
    ArchedRoofGeometry, ChimneyGeometry, ChimneySection, FreeRoofGeometry, OpenSignGeometry, ParapetGeometry,
    SiteConditions, SolidSignGeometry, StructureType, TowerGeometry, WindInput,
};
use crate::pressure::{envelope as pressure_envelope, PressureResult};
use crate::references::asce_ref;
use crate::results::{
    Applicability, BuildingResult, CoefficientEntry, CoefficientKind, Factor, HeightClass, IntermediateFactors,
    StructureResult, WindResult, ZoneResult,
};
use crate::velocity_pressure::VelocityPressureModel;

pub use building::BuildingGeometry;

// ============================================================================
// Structure
// ============================================================================

/// Validated structure family with its geometry.
///
/// Built from a [`WindInput`]; missing or inconsistent family geometry gives
/// [`Structure::Incomplete`] rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Structure {
    Building(BuildingGeometry),
    OpenSign(OpenSignGeometry),
    SolidSign(SolidSignGeometry),
    ChimneyTank(ChimneyGeometry),
    TrussedTower(TowerGeometry),
    ArchedRoof(ArchedRoofGeometry),
    OpenBuilding(BuildingGeometry, FreeRoofGeometry),
    ParapetOnly(ParapetGeometry),
    Incomplete { family: StructureType, reason: String },
}

fn require<T: Copy>(block: Option<T>, name: &str) -> Result<T, String> {
    block.ok_or_else(|| format!("{} geometry was not provided", name))
}

fn check_positive(name: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be a finite positive number (got {})", name, value))
    }
}

fn check_ratio(name: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(format!("{} must be in (0, 1] (got {})", name, value))
    }
}

impl Structure {
    pub fn from_input(input: &WindInput) -> Structure {
        let family = input.structure_type;
        let built = match family {
            StructureType::Building => BuildingGeometry::from_input(input).map(Structure::Building),
            StructureType::OpenBuilding => BuildingGeometry::from_input(input)
                .map(|b| Structure::OpenBuilding(b, input.free_roof.unwrap_or_default())),
            StructureType::OpenSign => require(input.open_sign, "Open sign").and_then(|g| {
                check_ratio("Solidity ratio", g.solidity_ratio)?;
                if g.member_shape == crate::input::MemberShape::Round {
                    check_positive("Member diameter", g.member_diameter.unwrap_or(0.0))?;
                }
                if let Some(h) = g.height {
                    check_positive("Sign height", h)?;
                }
                Ok(Structure::OpenSign(g))
            }),
            StructureType::SolidSign => require(input.solid_sign, "Solid sign").and_then(|g| {
                check_positive("Sign width", g.width)?;
                check_positive("Sign depth", g.depth)?;
                check_positive("Sign top height", g.top_height)?;
                if g.depth > g.top_height {
                    return Err("Sign depth exceeds the height to the top of the sign".to_string());
                }
                Ok(Structure::SolidSign(g))
            }),
            StructureType::ChimneyTank => require(input.chimney, "Chimney/tank").and_then(|g| {
                check_positive("Diameter", g.diameter)?;
                check_positive("Height", g.height)?;
                if !g.corner_radius.is_finite() || g.corner_radius < 0.0 {
                    return Err(format!("Corner radius must be non-negative (got {})", g.corner_radius));
                }
                Ok(Structure::ChimneyTank(g))
            }),
            StructureType::TrussedTower => require(input.tower, "Trussed tower").and_then(|g| {
                check_ratio("Solidity ratio", g.solidity_ratio)?;
                check_positive("Tower height", g.height)?;
                Ok(Structure::TrussedTower(g))
            }),
            StructureType::ArchedRoof => require(input.arched_roof, "Arched roof").and_then(|g| {
                check_positive("Rise", g.rise)?;
                check_positive("Span", g.span)?;
                if !g.eave_height.is_finite() || g.eave_height < 0.0 {
                    return Err(format!("Eave height must be non-negative (got {})", g.eave_height));
                }
                Ok(Structure::ArchedRoof(g))
            }),
            StructureType::ParapetOnly => require(input.parapet, "Parapet").and_then(|g| {
                check_positive("Parapet height", g.height)?;
                Ok(Structure::ParapetOnly(g))
            }),
        };
        built.unwrap_or_else(|reason| Structure::Incomplete { family, reason })
    }

    pub fn family(&self) -> StructureType {
        match self {
            Structure::Building(_) => StructureType::Building,
            Structure::OpenSign(_) => StructureType::OpenSign,
            Structure::SolidSign(_) => StructureType::SolidSign,
            Structure::ChimneyTank(_) => StructureType::ChimneyTank,
            Structure::TrussedTower(_) => StructureType::TrussedTower,
            Structure::ArchedRoof(_) => StructureType::ArchedRoof,
            Structure::OpenBuilding(..) => StructureType::OpenBuilding,
            Structure::ParapetOnly(_) => StructureType::ParapetOnly,
            Structure::Incomplete { family, .. } => *family,
        }
    }

    /// Row of the directionality table
    pub fn directionality(&self) -> DirectionalityCase {
        match self {
            Structure::ChimneyTank(g) => match g.cross_section {
                ChimneySection::Square | ChimneySection::SquareDiagonal => DirectionalityCase::ChimneySquare,
                ChimneySection::Hexagonal => DirectionalityCase::ChimneyHexagonal,
                ChimneySection::Octagonal => DirectionalityCase::ChimneyOctagonal,
                ChimneySection::Round => DirectionalityCase::ChimneyRound,
            },
            _ => match self.family() {
                StructureType::OpenSign => DirectionalityCase::OpenSign,
                StructureType::SolidSign => DirectionalityCase::SolidSign,
                StructureType::ChimneyTank => DirectionalityCase::ChimneySquare,
                StructureType::TrussedTower => DirectionalityCase::TrussedTowerSquareOrTriangular,
                StructureType::ArchedRoof => DirectionalityCase::ArchedRoof,
                StructureType::Building | StructureType::OpenBuilding | StructureType::ParapetOnly => {
                    DirectionalityCase::Building
                }
            },
        }
    }

    /// Height at which Kz and the reference velocity pressure are evaluated
    pub fn reference_height(&self, input: &WindInput) -> f64 {
        match self {
            Structure::Building(b) | Structure::OpenBuilding(b, _) => b.height,
            Structure::OpenSign(g) => g.height.unwrap_or(input.mean_roof_height),
            Structure::SolidSign(g) => g.top_height,
            Structure::ChimneyTank(g) => g.height,
            Structure::TrussedTower(g) => g.height,
            Structure::ArchedRoof(g) => arched_roof::mean_height(g),
            Structure::ParapetOnly(_) | Structure::Incomplete { .. } => input.mean_roof_height,
        }
    }

    /// Dimensions used by the resonant gust model
    pub fn gust_geometry(&self, input: &WindInput) -> GustGeometry {
        let height = self.reference_height(input);
        let (width, length) = match self {
            Structure::Building(b) | Structure::OpenBuilding(b, _) => (b.width, b.length),
            Structure::SolidSign(g) => (g.width, 0.0),
            Structure::ChimneyTank(g) => (g.diameter, g.diameter),
            Structure::ArchedRoof(g) => (g.span, g.span),
            Structure::ParapetOnly(_) => (input.building_width, input.building_length),
            Structure::OpenSign(_) | Structure::TrussedTower(_) | Structure::Incomplete { .. } => (0.0, 0.0),
        };
        GustGeometry {
            height,
            width: width.max(0.0),
            length: length.max(0.0),
        }
    }

    /// Internal pressure coefficient; force-coefficient families have none
    pub fn internal_pressure(&self, enclosure: EnclosureClassification) -> f64 {
        match self {
            Structure::Building(_) | Structure::ArchedRoof(_) => enclosure.gcpi(),
            _ => 0.0,
        }
    }
}

// ============================================================================
// Run context
// ============================================================================

/// Shared intermediates handed to every generator
#[derive(Debug, Clone)]
pub struct RunContext<'a> {
    pub input: &'a WindInput,
    pub site: SiteConditions,
    pub velocity: VelocityPressureModel,
    pub height_class: HeightClass,
    pub qh: Factor,
    pub gust: Factor,
    pub gcpi: Factor,
    pub warnings: Vec<String>,
}

impl RunContext<'_> {
    /// Record an engineering caveat
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        self.warnings.push(message);
    }

    /// Citation in the edition of this run
    pub fn cite(&self, section: &str) -> String {
        self.site.edition.cite(section)
    }

    /// Velocity pressure value at height `z`
    pub fn qz(&self, z: f64) -> f64 {
        self.velocity.qz(z).value
    }

    /// Zone built with the combinator: envelope of every coefficient × (±GCpi),
    /// external pressure at `q_ext`, internal pressure at qh.
    pub fn zone(
        &self,
        name: &str,
        kind: CoefficientKind,
        values: Vec<f64>,
        citation: String,
        q_ext: f64,
    ) -> ZoneResult {
        let lrfd = pressure_envelope(q_ext, self.gust.value, &values, self.qh.value, self.gcpi.value);
        ZoneResult {
            pressure: PressureResult::from_lrfd(name, lrfd, self.cite(asce_ref::MWFRS_DESIGN_PRESSURE)),
            coefficient: CoefficientEntry::new(name, kind, values, citation),
        }
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Run one wind load calculation.
///
/// Refuses to run when [`WindInput::validate`] reports errors; everything
/// after that point degrades to warnings and "not applicable" sub-results.
pub fn calculate(input: &WindInput) -> CalcResult<WindResult> {
    let mut warnings = input.validate().into_result()?;
    for warning in &warnings {
        log::warn!("{}", warning);
    }
    let site = input.site()?;
    let units = site.units;

    let structure = Structure::from_input(input);
    log::debug!("structure family: {}", structure.family().display_name());

    let velocity = VelocityPressureModel::new(&site, structure.directionality());
    let reference_height = structure.reference_height(input);
    let height_class = if reference_height > units.low_rise_limit() {
        HeightClass::HighRise
    } else {
        HeightClass::LowRise
    };
    log::debug!("reference height {} {}: {:?}", reference_height, units.length_label(), height_class);

    let kz = velocity.kz(reference_height);
    let qh = velocity.qz(reference_height);
    let mut errors: Vec<String> = [&kz, &qh].iter().filter_map(|f| f.note.clone()).collect();
    errors.dedup();

    let gust = gust_effect(
        &structure.gust_geometry(input),
        input.flexible,
        input.natural_frequency(),
        site.basic_wind_speed.get(),
        &velocity.exposure,
        units,
        site.edition,
    );
    warnings.extend(gust.warnings.iter().cloned());
    if let Some(note) = &gust.factor.note {
        errors.push(note.clone());
    }

    let gcpi = Factor::new(
        structure.internal_pressure(input.enclosure),
        format!("{} ({})", site.edition.cite(asce_ref::INTERNAL_PRESSURE), input.enclosure.display_name()),
    );

    let mut ctx = RunContext {
        input,
        site,
        velocity,
        height_class,
        qh,
        gust: gust.factor,
        gcpi,
        warnings,
    };

    let result = match &structure {
        Structure::Building(geometry) => StructureResult::Building(building_result(&mut ctx, geometry)),
        Structure::OpenBuilding(geometry, roof) => {
            StructureResult::OpenBuilding(free_roof::calculate(&mut ctx, geometry, roof))
        }
        Structure::OpenSign(g) => StructureResult::OpenSign(signs::open_sign(&mut ctx, g, reference_height)),
        Structure::SolidSign(g) => StructureResult::SolidSign(signs::solid_sign(&mut ctx, g)),
        Structure::ChimneyTank(g) => StructureResult::ChimneyTank(chimney::calculate(&mut ctx, g)),
        Structure::TrussedTower(g) => StructureResult::TrussedTower(tower::calculate(&mut ctx, g)),
        Structure::ArchedRoof(g) => match arched_roof::calculate(&mut ctx, g) {
            Applicability::Computed(zones) => StructureResult::ArchedRoof(zones),
            Applicability::NotApplicable { reason } => StructureResult::NotApplicable { reason },
        },
        Structure::ParapetOnly(g) => {
            let h = ctx.site.mean_roof_height.get();
            StructureResult::ParapetOnly(appurtenances::parapet_pressures(&ctx, g, h))
        }
        Structure::Incomplete { family, reason } => {
            let reason = format!("{}: {}", family.display_name(), reason);
            ctx.warn(reason.clone());
            StructureResult::NotApplicable { reason }
        }
    };

    let factors = IntermediateFactors {
        exposure: ctx.velocity.exposure,
        exposure_citation: ctx.cite(asce_ref::EXPOSURE_CONSTANTS),
        kz,
        kzt: ctx.velocity.kzt.clone(),
        ke: ctx.velocity.ke.clone(),
        kd: ctx.velocity.kd.clone(),
        iw: ctx.velocity.iw.clone(),
        qh: ctx.qh.clone(),
        gust: ctx.gust.clone(),
        gust_details: gust.details,
        gcpi: ctx.gcpi.clone(),
    };

    Ok(WindResult {
        input: input.clone(),
        height_class,
        factors,
        structure: result,
        warnings: ctx.warnings,
        errors,
    })
}

/// Building family: MWFRS plus every optional building sub-result
fn building_result(ctx: &mut RunContext, geometry: &BuildingGeometry) -> BuildingResult {
    let mwfrs = building::mwfrs(ctx, geometry);
    let components = components::calculate(ctx, geometry);
    let torsion = torsion::calculate(ctx, geometry);
    let parapet = appurtenances::parapet(ctx, geometry);
    let overhang = appurtenances::overhang(ctx);
    let rooftop = appurtenances::rooftop(ctx, geometry);
    BuildingResult {
        height_class: ctx.height_class,
        mwfrs,
        components,
        torsion,
        parapet,
        overhang,
        rooftop,
    }
}
