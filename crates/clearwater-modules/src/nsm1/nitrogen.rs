//! Nitrogen cycle
//!
//! Organic nitrogen decays to ammonium, ammonium is nitrified to nitrate and
//! nitrate is lost to denitrification in the water column and at the bed.
//! Algae take up both inorganic species according to their ammonium preference.

use crate::shared::{arrhenius_correction, half_saturation, static_variables, StaticDefinition};
use clearwater_core::process;
use clearwater_core::variable::VariableDescriptor;

const STATICS: &[StaticDefinition] = &[
    ("KNR", "Oxygen inhibition factor for nitrification", "L/mg-O2"),
    ("knit_20", "Nitrification rate at 20 °C", "1/d"),
    ("kon_20", "Organic nitrogen decay rate at 20 °C", "1/d"),
    ("kdnit_20", "Denitrification rate at 20 °C", "1/d"),
    ("rnh4_20", "Sediment release rate of ammonium at 20 °C", "mg-N/m^2/d"),
    ("vno3_20", "Sediment denitrification velocity at 20 °C", "m/d"),
    ("knit_theta", "Nitrification temperature coefficient", "unitless"),
    ("kon_theta", "Organic nitrogen decay temperature coefficient", "unitless"),
    ("kdnit_theta", "Denitrification temperature coefficient", "unitless"),
    ("rnh4_theta", "Ammonium release temperature coefficient", "unitless"),
    ("vno3_theta", "Sediment denitrification temperature coefficient", "unitless"),
    ("KsOxdn", "Oxygen half saturation for denitrification", "mg-O2/L"),
    ("PN", "Algal ammonium preference", "mg-N/L"),
    ("PNb", "Benthic algae ammonium preference", "mg-N/L"),
];

/// Fraction of nitrogen uptake taken as ammonium
///
/// Only ammonium is taken up when nitrate is not modelled and none when ammonium is not.
pub fn ammonium_uptake_fraction(
    use_nh4: bool,
    use_no3: bool,
    nh4: f64,
    no3: f64,
    preference: f64,
) -> f64 {
    if !use_nh4 {
        return 0.0;
    }
    if !use_no3 {
        return 1.0;
    }
    let ratio = |numerator: f64, denominator: f64| match denominator {
        d if d == 0.0 => 0.0,
        d => numerator / d,
    };
    ratio(nh4 * no3, (preference + nh4) * (preference + no3))
        + ratio(nh4 * preference, (nh4 + no3) * (preference + no3))
}

pub(crate) fn variables() -> Vec<VariableDescriptor> {
    let mut variables = vec![
        VariableDescriptor::state("NH4", process!(|NH4, dNH4dt, dt| NH4 + dNH4dt * dt))
            .with_long_name("Ammonium concentration")
            .with_units("mg-N/L"),
        VariableDescriptor::state("NO3", process!(|NO3, dNO3dt, dt| NO3 + dNO3dt * dt))
            .with_long_name("Nitrate concentration")
            .with_units("mg-N/L"),
        VariableDescriptor::state("OrgN", process!(|OrgN, dOrgNdt, dt| OrgN + dOrgNdt * dt))
            .with_long_name("Organic nitrogen concentration")
            .with_units("mg-N/L"),
        // Rates
        VariableDescriptor::dynamic(
            "knit_tc",
            process!(|TwaterC, knit_20, knit_theta| {
                arrhenius_correction(TwaterC, knit_20, knit_theta)
            }),
        )
        .with_long_name("Nitrification rate")
        .with_units("1/d"),
        VariableDescriptor::dynamic(
            "kon_tc",
            process!(|TwaterC, kon_20, kon_theta| arrhenius_correction(TwaterC, kon_20, kon_theta)),
        )
        .with_long_name("Organic nitrogen decay rate")
        .with_units("1/d"),
        VariableDescriptor::dynamic(
            "kdnit_tc",
            process!(|TwaterC, kdnit_20, kdnit_theta| {
                arrhenius_correction(TwaterC, kdnit_20, kdnit_theta)
            }),
        )
        .with_long_name("Denitrification rate")
        .with_units("1/d"),
        VariableDescriptor::dynamic(
            "rnh4_tc",
            process!(|TwaterC, rnh4_20, rnh4_theta| {
                arrhenius_correction(TwaterC, rnh4_20, rnh4_theta)
            }),
        )
        .with_long_name("Sediment release rate of ammonium")
        .with_units("mg-N/m^2/d"),
        VariableDescriptor::dynamic(
            "vno3_tc",
            process!(|TwaterC, vno3_20, vno3_theta| {
                arrhenius_correction(TwaterC, vno3_20, vno3_theta)
            }),
        )
        .with_long_name("Sediment denitrification velocity")
        .with_units("m/d"),
        // Uptake preference
        VariableDescriptor::dynamic(
            "ApUptakeFr_NH4",
            process!(|use_NH4, use_NO3, NH4, NO3, PN| {
                ammonium_uptake_fraction(use_NH4 != 0.0, use_NO3 != 0.0, NH4, NO3, PN)
            }),
        )
        .with_long_name("Fraction of algal nitrogen uptake from ammonium")
        .with_units("unitless"),
        VariableDescriptor::dynamic(
            "ApUptakeFr_NO3",
            process!(|use_NO3, ApUptakeFr_NH4| use_NO3 * (1.0 - ApUptakeFr_NH4)),
        )
        .with_long_name("Fraction of algal nitrogen uptake from nitrate")
        .with_units("unitless"),
        VariableDescriptor::dynamic(
            "AbUptakeFr_NH4",
            process!(|use_NH4, use_NO3, NH4, NO3, PNb| {
                ammonium_uptake_fraction(use_NH4 != 0.0, use_NO3 != 0.0, NH4, NO3, PNb)
            }),
        )
        .with_long_name("Fraction of benthic algae nitrogen uptake from ammonium")
        .with_units("unitless"),
        VariableDescriptor::dynamic(
            "AbUptakeFr_NO3",
            process!(|use_NO3, AbUptakeFr_NH4| use_NO3 * (1.0 - AbUptakeFr_NH4)),
        )
        .with_long_name("Fraction of benthic algae nitrogen uptake from nitrate")
        .with_units("unitless"),
        // Organic nitrogen
        VariableDescriptor::dynamic("OrgN_NH4_Decay", process!(|kon_tc, OrgN| kon_tc * OrgN))
            .with_long_name("Organic nitrogen decay to ammonium")
            .with_units("mg-N/L/d")
            .enabled_by("use_OrgN")
            .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "OrgN_Settling",
            process!(|vson, depth, OrgN| vson / depth * OrgN),
        )
        .with_long_name("Organic nitrogen settling")
        .with_units("mg-N/L/d")
        .enabled_by("use_OrgN")
        .with_fallback(0.0),
        VariableDescriptor::dynamic("ApDeath_OrgN", process!(|rna, ApDeath| rna * ApDeath))
            .with_long_name("Algal death into organic nitrogen")
            .with_units("mg-N/L/d")
            .enabled_by("use_OrgN")
            .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "AbDeath_OrgN",
            process!(|rnb, Fw, Fb, AbDeath, depth| rnb * Fw * Fb * AbDeath / depth),
        )
        .with_long_name("Benthic algae death into organic nitrogen")
        .with_units("mg-N/L/d")
        .enabled_by("use_OrgN")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "dOrgNdt",
            process!(|ApDeath_OrgN, AbDeath_OrgN, OrgN_NH4_Decay, OrgN_Settling| {
                ApDeath_OrgN + AbDeath_OrgN - OrgN_NH4_Decay - OrgN_Settling
            }),
        )
        .with_long_name("Change in organic nitrogen concentration")
        .with_units("mg-N/L/d")
        .enabled_by("use_OrgN")
        .with_fallback(0.0),
        // Ammonium
        VariableDescriptor::dynamic(
            "NH4_Nitrification",
            process!(|use_DOX, KNR, DOX, knit_tc, NH4| {
                let oxygen_limitation = if use_DOX != 0.0 {
                    1.0 - (-KNR * DOX).exp()
                } else {
                    1.0
                };
                knit_tc * NH4 * oxygen_limitation
            }),
        )
        .with_long_name("Nitrification of ammonium to nitrate")
        .with_units("mg-N/L/d")
        .enabled_by("use_NH4")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "NH4fromBed",
            process!(|use_SedFlux, JNH4, rnh4_tc, depth| {
                if use_SedFlux != 0.0 {
                    JNH4 / depth
                } else {
                    rnh4_tc / depth
                }
            }),
        )
        .with_long_name("Ammonium released from the bed")
        .with_units("mg-N/L/d")
        .enabled_by("use_NH4")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "NH4_ApRespiration",
            process!(|rna, ApRespiration| rna * ApRespiration),
        )
        .with_long_name("Ammonium released by algal respiration")
        .with_units("mg-N/L/d")
        .enabled_by("use_NH4")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "NH4_ApGrowth",
            process!(|ApUptakeFr_NH4, rna, ApGrowth| ApUptakeFr_NH4 * rna * ApGrowth),
        )
        .with_long_name("Ammonium taken up by algal growth")
        .with_units("mg-N/L/d")
        .enabled_by("use_NH4")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "NH4_AbRespiration",
            process!(|rnb, Fb, AbRespiration, depth| rnb * Fb * AbRespiration / depth),
        )
        .with_long_name("Ammonium released by benthic algae respiration")
        .with_units("mg-N/L/d")
        .enabled_by("use_NH4")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "NH4_AbGrowth",
            process!(|AbUptakeFr_NH4, rnb, Fb, AbGrowth, depth| {
                AbUptakeFr_NH4 * rnb * Fb * AbGrowth / depth
            }),
        )
        .with_long_name("Ammonium taken up by benthic algae growth")
        .with_units("mg-N/L/d")
        .enabled_by("use_NH4")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "dNH4dt",
            process!(|OrgN_NH4_Decay, NH4_Nitrification, NH4fromBed, NH4_ApRespiration, NH4_ApGrowth, NH4_AbRespiration, NH4_AbGrowth| {
                OrgN_NH4_Decay - NH4_Nitrification + NH4fromBed + NH4_ApRespiration - NH4_ApGrowth
                    + NH4_AbRespiration
                    - NH4_AbGrowth
            }),
        )
        .with_long_name("Change in ammonium concentration")
        .with_units("mg-N/L/d")
        .enabled_by("use_NH4")
        .with_fallback(0.0),
        // Nitrate
        VariableDescriptor::dynamic(
            "NO3_Denit",
            process!(|use_DOX, DOX, KsOxdn, kdnit_tc, NO3| {
                let oxygen_inhibition = if use_DOX != 0.0 {
                    1.0 - half_saturation(DOX, KsOxdn)
                } else {
                    1.0
                };
                kdnit_tc * NO3 * oxygen_inhibition
            }),
        )
        .with_long_name("Denitrification of nitrate")
        .with_units("mg-N/L/d")
        .enabled_by("use_NO3")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "NO3_BedDenit",
            process!(|use_SedFlux, JNO3, vno3_tc, NO3, depth| {
                if use_SedFlux != 0.0 {
                    -JNO3 / depth
                } else {
                    vno3_tc * NO3 / depth
                }
            }),
        )
        .with_long_name("Nitrate lost to sediment denitrification")
        .with_units("mg-N/L/d")
        .enabled_by("use_NO3")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "NO3_ApGrowth",
            process!(|ApUptakeFr_NO3, rna, ApGrowth| ApUptakeFr_NO3 * rna * ApGrowth),
        )
        .with_long_name("Nitrate taken up by algal growth")
        .with_units("mg-N/L/d")
        .enabled_by("use_NO3")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "NO3_AbGrowth",
            process!(|AbUptakeFr_NO3, rnb, Fb, AbGrowth, depth| {
                AbUptakeFr_NO3 * rnb * Fb * AbGrowth / depth
            }),
        )
        .with_long_name("Nitrate taken up by benthic algae growth")
        .with_units("mg-N/L/d")
        .enabled_by("use_NO3")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "dNO3dt",
            process!(|NH4_Nitrification, NO3_Denit, NO3_BedDenit, NO3_ApGrowth, NO3_AbGrowth| {
                NH4_Nitrification - NO3_Denit - NO3_BedDenit - NO3_ApGrowth - NO3_AbGrowth
            }),
        )
        .with_long_name("Change in nitrate concentration")
        .with_units("mg-N/L/d")
        .enabled_by("use_NO3")
        .with_fallback(0.0),
        // Totals
        VariableDescriptor::dynamic(
            "DIN",
            process!(|use_NH4, NH4, use_NO3, NO3| use_NH4 * NH4 + use_NO3 * NO3),
        )
        .with_long_name("Dissolved inorganic nitrogen")
        .with_units("mg-N/L"),
        VariableDescriptor::dynamic(
            "TON",
            process!(|use_OrgN, OrgN, use_Algae, rna, Ap| use_OrgN * OrgN + use_Algae * rna * Ap),
        )
        .with_long_name("Total organic nitrogen")
        .with_units("mg-N/L"),
        VariableDescriptor::dynamic("TKN", process!(|use_NH4, NH4, TON| use_NH4 * NH4 + TON))
            .with_long_name("Total Kjeldahl nitrogen")
            .with_units("mg-N/L"),
        VariableDescriptor::dynamic("TN", process!(|DIN, TON| DIN + TON))
            .with_long_name("Total nitrogen")
            .with_units("mg-N/L"),
    ];
    variables.extend(static_variables(STATICS));
    variables
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn uptake_prefers_ammonium_by_concentration() {
        let fraction = ammonium_uptake_fraction(true, true, 0.063, 5.54, 0.5);
        assert_relative_eq!(fraction, 0.10357, epsilon = 1e-5);
        assert!(fraction > 0.0 && fraction < 1.0);
    }

    #[test]
    fn uptake_follows_enabled_species() {
        assert_eq!(ammonium_uptake_fraction(false, true, 1.0, 1.0, 0.5), 0.0);
        assert_eq!(ammonium_uptake_fraction(true, false, 1.0, 1.0, 0.5), 1.0);
        assert_eq!(ammonium_uptake_fraction(true, true, 0.0, 0.0, 0.0), 0.0);
    }
}
