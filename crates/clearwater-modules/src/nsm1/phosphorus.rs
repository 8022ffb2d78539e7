//! Phosphorus cycle
//!
//! Total inorganic phosphorus is partitioned between a dissolved fraction,
//! available to algae, and a fraction sorbed to suspended solids which settles.

use crate::shared::{arrhenius_correction, static_variables, StaticDefinition};
use clearwater_core::process;
use clearwater_core::variable::VariableDescriptor;

const STATICS: &[StaticDefinition] = &[
    ("kop_20", "Organic phosphorus decay rate at 20 °C", "1/d"),
    ("rpo4_20", "Sediment release rate of DIP at 20 °C", "mg-P/m^2/d"),
    ("kop_theta", "Organic phosphorus decay temperature coefficient", "unitless"),
    ("rpo4_theta", "DIP release temperature coefficient", "unitless"),
    ("kdpo4", "Solid partition coefficient of phosphate", "L/kg"),
];

/// Dissolved fraction of inorganic phosphorus
///
/// `kdpo4` is in L/kg and `solid` in mg/L.
pub fn dissolved_fraction(kdpo4: f64, solid: f64) -> f64 {
    1.0 / (1.0 + kdpo4 * solid * 1e-6)
}

pub(crate) fn variables() -> Vec<VariableDescriptor> {
    let mut variables = vec![
        VariableDescriptor::state("TIP", process!(|TIP, dTIPdt, dt| TIP + dTIPdt * dt))
            .with_long_name("Total inorganic phosphorus")
            .with_units("mg-P/L"),
        VariableDescriptor::state("OrgP", process!(|OrgP, dOrgPdt, dt| OrgP + dOrgPdt * dt))
            .with_long_name("Total organic phosphorus")
            .with_units("mg-P/L"),
        VariableDescriptor::dynamic("fdp", process!(|kdpo4, Solid| dissolved_fraction(kdpo4, Solid)))
            .with_long_name("Dissolved fraction of inorganic phosphorus")
            .with_units("unitless"),
        VariableDescriptor::dynamic("DIP", process!(|fdp, TIP| fdp * TIP))
            .with_long_name("Dissolved inorganic phosphorus")
            .with_units("mg-P/L"),
        // Organic phosphorus
        VariableDescriptor::dynamic(
            "kop_tc",
            process!(|TwaterC, kop_20, kop_theta| arrhenius_correction(TwaterC, kop_20, kop_theta)),
        )
        .with_long_name("Organic phosphorus decay rate")
        .with_units("1/d")
        .enabled_by("use_OrgP"),
        VariableDescriptor::dynamic("OrgP_DIP_decay", process!(|kop_tc, OrgP| kop_tc * OrgP))
            .with_long_name("Organic phosphorus decay to DIP")
            .with_units("mg-P/L/d")
            .enabled_by("use_OrgP")
            .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "OrgP_Settling",
            process!(|vsop, depth, OrgP| vsop / depth * OrgP),
        )
        .with_long_name("Organic phosphorus settling")
        .with_units("mg-P/L/d")
        .enabled_by("use_OrgP")
        .with_fallback(0.0),
        VariableDescriptor::dynamic("ApDeath_OrgP", process!(|rpa, ApDeath| rpa * ApDeath))
            .with_long_name("Algal death into organic phosphorus")
            .with_units("mg-P/L/d")
            .enabled_by("use_OrgP")
            .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "AbDeath_OrgP",
            process!(|rpb, Fw, Fb, AbDeath, depth| rpb * Fw * Fb * AbDeath / depth),
        )
        .with_long_name("Benthic algae death into organic phosphorus")
        .with_units("mg-P/L/d")
        .enabled_by("use_OrgP")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "dOrgPdt",
            process!(|ApDeath_OrgP, AbDeath_OrgP, OrgP_DIP_decay, OrgP_Settling| {
                ApDeath_OrgP + AbDeath_OrgP - OrgP_DIP_decay - OrgP_Settling
            }),
        )
        .with_long_name("Change in organic phosphorus concentration")
        .with_units("mg-P/L/d")
        .enabled_by("use_OrgP")
        .with_fallback(0.0),
        // Inorganic phosphorus
        VariableDescriptor::dynamic(
            "rpo4_tc",
            process!(|TwaterC, rpo4_20, rpo4_theta| {
                arrhenius_correction(TwaterC, rpo4_20, rpo4_theta)
            }),
        )
        .with_long_name("Sediment release rate of DIP")
        .with_units("mg-P/m^2/d")
        .enabled_by("use_TIP"),
        VariableDescriptor::dynamic(
            "DIPfromBed_SedFlux",
            process!(|use_SedFlux, JDIP, depth| use_SedFlux * JDIP / depth),
        )
        .with_long_name("DIP released from the bed by the sediment flux model")
        .with_units("mg-P/L/d")
        .enabled_by("use_TIP")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "DIPfromBed_NoSedFlux",
            process!(|use_SedFlux, rpo4_tc, depth| (1.0 - use_SedFlux) * rpo4_tc / depth),
        )
        .with_long_name("DIP released from the bed at the release rate")
        .with_units("mg-P/L/d")
        .enabled_by("use_TIP")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "TIP_Settling",
            process!(|vs, depth, fdp, TIP| vs / depth * (1.0 - fdp) * TIP),
        )
        .with_long_name("Settling of sorbed inorganic phosphorus")
        .with_units("mg-P/L/d")
        .enabled_by("use_TIP")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "DIP_ApRespiration",
            process!(|rpa, ApRespiration| rpa * ApRespiration),
        )
        .with_long_name("DIP released by algal respiration")
        .with_units("mg-P/L/d")
        .enabled_by("use_TIP")
        .with_fallback(0.0),
        VariableDescriptor::dynamic("DIP_ApGrowth", process!(|rpa, ApGrowth| rpa * ApGrowth))
            .with_long_name("DIP taken up by algal growth")
            .with_units("mg-P/L/d")
            .enabled_by("use_TIP")
            .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "DIP_AbRespiration",
            process!(|rpb, Fb, AbRespiration, depth| rpb * Fb * AbRespiration / depth),
        )
        .with_long_name("DIP released by benthic algae respiration")
        .with_units("mg-P/L/d")
        .enabled_by("use_TIP")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "DIP_AbGrowth",
            process!(|rpb, Fb, AbGrowth, depth| rpb * Fb * AbGrowth / depth),
        )
        .with_long_name("DIP taken up by benthic algae growth")
        .with_units("mg-P/L/d")
        .enabled_by("use_TIP")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "dTIPdt",
            process!(|OrgP_DIP_decay, TIP_Settling, DIPfromBed_SedFlux, DIPfromBed_NoSedFlux, DIP_ApRespiration, DIP_ApGrowth, DIP_AbRespiration, DIP_AbGrowth| {
                OrgP_DIP_decay - TIP_Settling + DIPfromBed_SedFlux + DIPfromBed_NoSedFlux
                    + DIP_ApRespiration
                    - DIP_ApGrowth
                    + DIP_AbRespiration
                    - DIP_AbGrowth
            }),
        )
        .with_long_name("Change in total inorganic phosphorus concentration")
        .with_units("mg-P/L/d")
        .enabled_by("use_TIP")
        .with_fallback(0.0),
        // Totals
        VariableDescriptor::dynamic(
            "TOP",
            process!(|use_OrgP, OrgP, use_Algae, rpa, Ap| use_OrgP * OrgP + use_Algae * rpa * Ap),
        )
        .with_long_name("Total organic phosphorus")
        .with_units("mg-P/L"),
        VariableDescriptor::dynamic("TP", process!(|use_TIP, TIP, TOP| use_TIP * TIP + TOP))
            .with_long_name("Total phosphorus")
            .with_units("mg-P/L"),
    ];
    variables.extend(static_variables(STATICS));
    variables
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mostly_dissolved_at_low_solids() {
        assert_relative_eq!(dissolved_fraction(100.0, 1.0), 1.0 / 1.0001, epsilon = 1e-12);
        assert_eq!(dissolved_fraction(100.0, 0.0), 1.0);
        assert!(dissolved_fraction(1e6, 100.0) < 0.01);
    }
}
