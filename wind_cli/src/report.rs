//! Plain-text summary of a [`WindResult`]

use std::fmt::Write;

use wind_core::results::{Applicability, ForceResult, StructureResult, WindResult, ZoneResult};
use wind_core::units::UnitSystem;

fn zone_lines(out: &mut String, title: &str, zones: &[ZoneResult], result: &WindResult) {
    let units = result.input.unit_system;
    let method = result.input.design_method;
    let _ = writeln!(out, "  {} ({}, {}):", title, method.code(), units.pressure_label());
    for zone in zones {
        let p = zone.pressure.for_method(method);
        let _ = writeln!(
            out,
            "    {:<28} {:>9.2} {:>9.2}   [{}]",
            zone.pressure.zone,
            p.positive,
            p.negative,
            zone.coefficient.values.iter().map(|c| format!("{:.3}", c)).collect::<Vec<_>>().join(", ")
        );
    }
}

fn force_lines(out: &mut String, title: &str, forces: &ForceResult, units: UnitSystem, asd: bool) {
    let _ = writeln!(out, "  {}:", title);
    for entry in &forces.entries {
        let (pressure, force) = if asd {
            (entry.pressure_asd, entry.force_asd)
        } else {
            (entry.pressure_lrfd, entry.force_lrfd)
        };
        let _ = write!(
            out,
            "    {:<28} Cf = {:.3}  p = {:.2} {}",
            entry.coefficient.zone,
            entry.coefficient.values.first().copied().unwrap_or(0.0),
            pressure,
            units.pressure_label()
        );
        match force {
            Some(f) => {
                let _ = writeln!(out, "  F = {:.0} {}", f, units.force_label());
            }
            None => {
                let _ = writeln!(out);
            }
        }
    }
}

fn not_applicable(out: &mut String, title: &str, reason: &str) {
    let _ = writeln!(out, "  {}: not applicable ({})", title, reason);
}

pub fn summary(result: &WindResult) -> String {
    let mut out = String::new();
    let input = &result.input;
    let units = input.unit_system;
    let f = &result.factors;
    let asd = input.design_method == wind_core::loads::DesignMethod::Asd;

    if !input.label.is_empty() {
        let _ = writeln!(out, "{}", input.label);
    }
    let _ = writeln!(
        out,
        "{} | {} | V = {} {} | Exposure {:?} | Risk Category {:?}",
        input.edition.label(),
        input.structure_type.display_name(),
        input.basic_wind_speed,
        units.speed_label(),
        input.exposure,
        input.risk_category
    );
    let _ = writeln!(out, "{}", result.height_class.display_name());
    let _ = writeln!(
        out,
        "  Kz = {:.3}  Kzt = {:.2}  Ke = {:.3}  Kd = {:.2}  Iw = {:.2}",
        f.kz.value, f.kzt.value, f.ke.value, f.kd.value, f.iw.value
    );
    let _ = writeln!(
        out,
        "  qh = {:.2} {}  G = {:.3}  GCpi = ±{:.2}",
        f.qh.value,
        units.pressure_label(),
        f.gust.value,
        f.gcpi.value
    );

    match &result.structure {
        StructureResult::Building(b) => {
            zone_lines(&mut out, &format!("MWFRS, {}", b.mwfrs.method.display_name()), &b.mwfrs.zones, result);
            match &b.components {
                Applicability::Computed(cc) => zone_lines(
                    &mut out,
                    &format!("Components and cladding, A = {} {}", cc.effective_area, units.area_label()),
                    &cc.zones,
                    result,
                ),
                Applicability::NotApplicable { reason } => not_applicable(&mut out, "Components and cladding", reason),
            }
            match &b.torsion {
                Applicability::Computed(t) => {
                    let _ = writeln!(out, "  Torsion:");
                    for case in &t.cases {
                        let moment = if asd { case.moment_asd } else { case.moment_lrfd };
                        let _ = writeln!(
                            out,
                            "    {:<28} Mt = {:.0} {}·{}",
                            case.name,
                            moment,
                            units.force_label(),
                            units.length_label()
                        );
                    }
                }
                Applicability::NotApplicable { reason } => not_applicable(&mut out, "Torsion", reason),
            }
            if let Some(p) = b.parapet.computed() {
                zone_lines(&mut out, "Parapet", &p.zones, result);
            }
            if let Some(o) = b.overhang.computed() {
                zone_lines(&mut out, "Overhang", &o.zones, result);
            }
            if let Some(r) = b.rooftop.computed() {
                force_lines(&mut out, "Rooftop equipment", r, units, asd);
            }
        }
        StructureResult::OpenSign(r)
        | StructureResult::SolidSign(r)
        | StructureResult::ChimneyTank(r)
        | StructureResult::TrussedTower(r) => force_lines(&mut out, "Forces", r, units, asd),
        StructureResult::ArchedRoof(z) | StructureResult::OpenBuilding(z) => {
            zone_lines(&mut out, "Roof", &z.zones, result)
        }
        StructureResult::ParapetOnly(p) => zone_lines(&mut out, "Parapet", &p.zones, result),
        StructureResult::NotApplicable { reason } => {
            let _ = writeln!(out, "  Not applicable: {}", reason);
        }
    }

    for warning in &result.warnings {
        let _ = writeln!(out, "warning: {}", warning);
    }
    for error in &result.errors {
        let _ = writeln!(out, "note: {}", error);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wind_core::{calculate, WindInput};

    #[test]
    fn test_summary_lists_factors_and_zones() {
        let result = calculate(&WindInput::default()).unwrap();
        let text = summary(&result);
        assert!(text.contains("qh = 28.27"));
        assert!(text.contains("MWFRS"));
        assert!(text.contains("Components and cladding: not applicable"));
    }
}
