//! Organic and inorganic carbon
//!
//! Particulate organic carbon hydrolyses into dissolved organic carbon,
//! which is oxidised into dissolved inorganic carbon.
//! Inorganic carbon also exchanges CO2 with the atmosphere and is cycled by algae.

use crate::shared::{arrhenius_correction, half_saturation, static_variables, StaticDefinition};
use clearwater_core::process;
use clearwater_core::variable::VariableDescriptor;

const STATICS: &[StaticDefinition] = &[
    ("f_pocp", "Fraction of algal mortality into POC", "unitless"),
    ("kdoc_20", "DOC oxidation rate at 20 °C", "1/d"),
    ("kdoc_theta", "DOC oxidation temperature coefficient", "unitless"),
    ("f_pocb", "Fraction of benthic algae mortality into POC", "unitless"),
    ("kpoc_20", "POC hydrolysis rate at 20 °C", "1/d"),
    ("kpoc_theta", "POC hydrolysis temperature coefficient", "unitless"),
    ("KsOxmc", "Oxygen half saturation for DOC oxidation", "mg-O2/L"),
    ("pCO2", "Atmospheric partial pressure of CO2", "ppm"),
    ("FCO2", "Fraction of DIC present as CO2", "unitless"),
    ("roc", "Oxygen to carbon ratio", "mg-O2/mg-C"),
];

/// Henry's law constant of CO2 [mol/L/atm]
pub fn co2_henry_constant(t_water_k: f64) -> f64 {
    10.0_f64.powf(2385.73 / t_water_k - 14.0184 + 0.0152642 * t_water_k)
}

/// CO2 concentration in equilibrium with the atmosphere [mg-C/L]
pub fn co2_saturation(henry_constant: f64, p_co2: f64) -> f64 {
    henry_constant * p_co2 * 1e-6 * 12_000.0
}

pub(crate) fn variables() -> Vec<VariableDescriptor> {
    let mut variables = vec![
        VariableDescriptor::state("POC", process!(|POC, dPOCdt, dt| POC + dPOCdt * dt))
            .with_long_name("Particulate organic carbon")
            .with_units("mg-C/L"),
        VariableDescriptor::state("DOC", process!(|DOC, dDOCdt, dt| DOC + dDOCdt * dt))
            .with_long_name("Dissolved organic carbon")
            .with_units("mg-C/L"),
        VariableDescriptor::state("DIC", process!(|DIC, dDICdt, dt| DIC + dDICdt * dt))
            .with_long_name("Dissolved inorganic carbon")
            .with_units("mg-C/L"),
        VariableDescriptor::dynamic(
            "kpoc_tc",
            process!(|TwaterC, kpoc_20, kpoc_theta| {
                arrhenius_correction(TwaterC, kpoc_20, kpoc_theta)
            }),
        )
        .with_long_name("POC hydrolysis rate")
        .with_units("1/d"),
        VariableDescriptor::dynamic(
            "kdoc_tc",
            process!(|TwaterC, kdoc_20, kdoc_theta| {
                arrhenius_correction(TwaterC, kdoc_20, kdoc_theta)
            }),
        )
        .with_long_name("DOC oxidation rate")
        .with_units("1/d"),
        // Particulate organic carbon
        VariableDescriptor::dynamic(
            "POC_settling",
            process!(|vsoc, depth, POC| vsoc / depth * POC),
        )
        .with_long_name("POC settling")
        .with_units("mg-C/L/d")
        .enabled_by("use_POC")
        .with_fallback(0.0),
        VariableDescriptor::dynamic("POC_hydrolysis", process!(|kpoc_tc, POC| kpoc_tc * POC))
            .with_long_name("POC hydrolysis into DOC")
            .with_units("mg-C/L/d")
            .enabled_by("use_POC")
            .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "POC_algal_mortality",
            process!(|f_pocp, rca, ApDeath| f_pocp * rca * ApDeath),
        )
        .with_long_name("Algal mortality into POC")
        .with_units("mg-C/L/d")
        .enabled_by("use_POC")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "POC_benthic_algae_mortality",
            process!(|f_pocb, rcb, Fw, Fb, AbDeath, depth| {
                f_pocb * rcb * Fw * Fb * AbDeath / depth
            }),
        )
        .with_long_name("Benthic algae mortality into POC")
        .with_units("mg-C/L/d")
        .enabled_by("use_POC")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "dPOCdt",
            process!(|POC_algal_mortality, POC_benthic_algae_mortality, POC_settling, POC_hydrolysis| {
                POC_algal_mortality + POC_benthic_algae_mortality - POC_settling - POC_hydrolysis
            }),
        )
        .with_long_name("Change in POC concentration")
        .with_units("mg-C/L/d")
        .enabled_by("use_POC")
        .with_fallback(0.0),
        // Dissolved organic carbon
        VariableDescriptor::dynamic(
            "DOC_algal_mortality",
            process!(|f_pocp, rca, ApDeath| (1.0 - f_pocp) * rca * ApDeath),
        )
        .with_long_name("Algal mortality into DOC")
        .with_units("mg-C/L/d")
        .enabled_by("use_DOC")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "DOC_benthic_algae_mortality",
            process!(|f_pocb, rcb, Fw, Fb, AbDeath, depth| {
                (1.0 - f_pocb) * rcb * Fw * Fb * AbDeath / depth
            }),
        )
        .with_long_name("Benthic algae mortality into DOC")
        .with_units("mg-C/L/d")
        .enabled_by("use_DOC")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "DOC_oxidation",
            process!(|use_DOX, DOX, KsOxmc, kdoc_tc, DOC| {
                let oxygen_limitation = if use_DOX != 0.0 {
                    half_saturation(DOX, KsOxmc)
                } else {
                    1.0
                };
                oxygen_limitation * kdoc_tc * DOC
            }),
        )
        .with_long_name("DOC oxidation")
        .with_units("mg-C/L/d")
        .enabled_by("use_DOC")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "dDOCdt",
            process!(|POC_hydrolysis, DOC_algal_mortality, DOC_benthic_algae_mortality, DOC_oxidation| {
                POC_hydrolysis + DOC_algal_mortality + DOC_benthic_algae_mortality - DOC_oxidation
            }),
        )
        .with_long_name("Change in DOC concentration")
        .with_units("mg-C/L/d")
        .enabled_by("use_DOC")
        .with_fallback(0.0),
        // Dissolved inorganic carbon
        VariableDescriptor::dynamic("KHCO2", process!(|TwaterK| co2_henry_constant(TwaterK)))
            .with_long_name("Henry's law constant of CO2")
            .with_units("mol/L/atm")
            .enabled_by("use_DIC"),
        VariableDescriptor::dynamic(
            "CO2sat",
            process!(|KHCO2, pCO2| co2_saturation(KHCO2, pCO2)),
        )
        .with_long_name("CO2 saturation")
        .with_units("mg-C/L")
        .enabled_by("use_DIC"),
        VariableDescriptor::dynamic(
            "Atm_CO2_reaeration",
            process!(|ka_tc, CO2sat, FCO2, DIC| 0.923 * ka_tc * (CO2sat - FCO2 * DIC)),
        )
        .with_long_name("Atmospheric CO2 exchange")
        .with_units("mg-C/L/d")
        .enabled_by("use_DIC"),
        VariableDescriptor::dynamic(
            "DIC_algal_respiration",
            process!(|rca, ApRespiration| rca * ApRespiration),
        )
        .with_long_name("DIC released by algal respiration")
        .with_units("mg-C/L/d")
        .enabled_by("use_DIC"),
        VariableDescriptor::dynamic(
            "DIC_algal_photosynthesis",
            process!(|rca, ApGrowth| rca * ApGrowth),
        )
        .with_long_name("DIC taken up by algal photosynthesis")
        .with_units("mg-C/L/d")
        .enabled_by("use_DIC"),
        VariableDescriptor::dynamic(
            "DIC_benthic_algae_respiration",
            process!(|rcb, Fb, AbRespiration, depth| rcb * Fb * AbRespiration / depth),
        )
        .with_long_name("DIC released by benthic algae respiration")
        .with_units("mg-C/L/d")
        .enabled_by("use_DIC"),
        VariableDescriptor::dynamic(
            "DIC_benthic_algae_photosynthesis",
            process!(|rcb, Fb, AbGrowth, depth| rcb * Fb * AbGrowth / depth),
        )
        .with_long_name("DIC taken up by benthic algae photosynthesis")
        .with_units("mg-C/L/d")
        .enabled_by("use_DIC"),
        VariableDescriptor::dynamic(
            "DIC_CBOD_oxidation",
            process!(|CBOD_oxidation, roc| CBOD_oxidation / roc),
        )
        .with_long_name("DIC produced by CBOD oxidation")
        .with_units("mg-C/L/d")
        .enabled_by("use_DIC"),
        VariableDescriptor::dynamic(
            "DIC_sed_release",
            process!(|use_SedFlux, JDIC, SOD_tc, roc, depth| {
                if use_SedFlux != 0.0 {
                    JDIC / depth
                } else {
                    SOD_tc / (roc * depth)
                }
            }),
        )
        .with_long_name("DIC released from the bed")
        .with_units("mg-C/L/d")
        .enabled_by("use_DIC"),
        VariableDescriptor::dynamic(
            "dDICdt",
            process!(|Atm_CO2_reaeration, DIC_algal_respiration, DIC_algal_photosynthesis, DIC_benthic_algae_respiration, DIC_benthic_algae_photosynthesis, DOC_oxidation, DIC_CBOD_oxidation, DIC_sed_release| {
                Atm_CO2_reaeration + DIC_algal_respiration - DIC_algal_photosynthesis
                    + DIC_benthic_algae_respiration
                    - DIC_benthic_algae_photosynthesis
                    + DOC_oxidation
                    + DIC_CBOD_oxidation
                    + DIC_sed_release
            }),
        )
        .with_long_name("Change in DIC concentration")
        .with_units("mg-C/L/d")
        .enabled_by("use_DIC")
        .with_fallback(0.0),
    ];
    variables.extend(static_variables(STATICS));
    variables
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn co2_saturation_at_25c() {
        let henry = co2_henry_constant(298.16);
        assert_relative_eq!(henry, 0.03422, epsilon = 1e-5);
        assert_relative_eq!(co2_saturation(henry, 383.0), 0.15728, epsilon = 1e-5);
    }
}
