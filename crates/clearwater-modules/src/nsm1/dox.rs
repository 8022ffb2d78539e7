//! Dissolved oxygen
//!
//! Oxygen is gained from reaeration and photosynthesis and consumed by respiration,
//! nitrification, oxidation of organic matter and sediment oxygen demand.

use crate::shared::{arrhenius_correction, half_saturation, static_variables, StaticDefinition};
use clearwater_core::process;
use clearwater_core::variable::VariableDescriptor;

const STATICS: &[StaticDefinition] = &[
    ("ron", "Oxygen consumed by nitrification", "mg-O2/mg-N"),
    ("KsSOD", "Oxygen half saturation for sediment oxygen demand", "mg-O2/L"),
];

pub(crate) fn variables() -> Vec<VariableDescriptor> {
    let mut variables = vec![
        VariableDescriptor::state("DOX", process!(|DOX, dDOXdt, dt| DOX + dDOXdt * dt))
            .with_long_name("Dissolved oxygen")
            .with_units("mg-O2/L"),
        VariableDescriptor::dynamic(
            "SOD_tc",
            process!(|TwaterC, SOD_20, SOD_theta| arrhenius_correction(TwaterC, SOD_20, SOD_theta)),
        )
        .with_long_name("Sediment oxygen demand")
        .with_units("g-O2/m^2/d"),
        VariableDescriptor::dynamic(
            "DOX_SOD",
            process!(|use_SedFlux, JSOD, SOD_tc, KsSOD, DOX, depth| {
                if use_SedFlux != 0.0 {
                    JSOD / depth
                } else {
                    SOD_tc * half_saturation(DOX, KsSOD) / depth
                }
            }),
        )
        .with_long_name("Oxygen consumed by the bed")
        .with_units("mg-O2/L/d")
        .enabled_by("use_DOX"),
        VariableDescriptor::dynamic(
            "DOX_reaeration",
            process!(|ka_tc, DOX_sat, DOX| ka_tc * (DOX_sat - DOX)),
        )
        .with_long_name("Oxygen reaeration")
        .with_units("mg-O2/L/d")
        .enabled_by("use_DOX"),
        VariableDescriptor::dynamic(
            "DOX_ApGrowth",
            process!(|roc, rca, ApGrowth| roc * rca * ApGrowth),
        )
        .with_long_name("Oxygen produced by algal photosynthesis")
        .with_units("mg-O2/L/d")
        .enabled_by("use_DOX"),
        VariableDescriptor::dynamic(
            "DOX_ApRespiration",
            process!(|roc, rca, ApRespiration| roc * rca * ApRespiration),
        )
        .with_long_name("Oxygen consumed by algal respiration")
        .with_units("mg-O2/L/d")
        .enabled_by("use_DOX"),
        VariableDescriptor::dynamic(
            "DOX_AbGrowth",
            process!(|roc, rcb, Fb, AbGrowth, depth| roc * rcb * Fb * AbGrowth / depth),
        )
        .with_long_name("Oxygen produced by benthic algae photosynthesis")
        .with_units("mg-O2/L/d")
        .enabled_by("use_DOX"),
        VariableDescriptor::dynamic(
            "DOX_AbRespiration",
            process!(|roc, rcb, Fb, AbRespiration, depth| roc * rcb * Fb * AbRespiration / depth),
        )
        .with_long_name("Oxygen consumed by benthic algae respiration")
        .with_units("mg-O2/L/d")
        .enabled_by("use_DOX"),
        VariableDescriptor::dynamic(
            "DOX_Nitrification",
            process!(|ron, NH4_Nitrification| ron * NH4_Nitrification),
        )
        .with_long_name("Oxygen consumed by nitrification")
        .with_units("mg-O2/L/d")
        .enabled_by("use_DOX"),
        VariableDescriptor::dynamic(
            "DOX_DOC_oxidation",
            process!(|roc, DOC_oxidation| roc * DOC_oxidation),
        )
        .with_long_name("Oxygen consumed by DOC oxidation")
        .with_units("mg-O2/L/d")
        .enabled_by("use_DOX"),
        VariableDescriptor::dynamic(
            "dDOXdt",
            process!(|DOX_reaeration, DOX_ApGrowth, DOX_ApRespiration, DOX_AbGrowth, DOX_AbRespiration, DOX_Nitrification, DOX_DOC_oxidation, CBOD_oxidation, DOX_SOD| {
                DOX_reaeration + DOX_ApGrowth - DOX_ApRespiration + DOX_AbGrowth
                    - DOX_AbRespiration
                    - DOX_Nitrification
                    - DOX_DOC_oxidation
                    - CBOD_oxidation
                    - DOX_SOD
            }),
        )
        .with_long_name("Change in dissolved oxygen concentration")
        .with_units("mg-O2/L/d")
        .enabled_by("use_DOX")
        .with_fallback(0.0),
    ];
    variables.extend(static_variables(STATICS));
    variables
}
