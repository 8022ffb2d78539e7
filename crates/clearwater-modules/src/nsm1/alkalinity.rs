//! Alkalinity
//!
//! Stoichiometric ratios are in equivalents per mg of the converted constituent,
//! budget terms are converted to mg-CaCO3.

use crate::shared::{static_variables, StaticDefinition};
use clearwater_core::process;
use clearwater_core::variable::VariableDescriptor;

/// Mass of CaCO3 per equivalent of alkalinity [mg/eq]
pub const CACO3_PER_EQUIVALENT: f64 = 50_000.0;

const STATICS: &[StaticDefinition] = &[
    ("r_alkaa", "Alkalinity consumed by algal growth on ammonium", "eq/mg-C"),
    ("r_alkan", "Alkalinity produced by algal growth on nitrate", "eq/mg-C"),
    ("r_alkn", "Alkalinity consumed by nitrification", "eq/mg-N"),
    ("r_alkden", "Alkalinity produced by denitrification", "eq/mg-N"),
    ("r_alkba", "Alkalinity consumed by benthic algae growth on ammonium", "eq/mg-C"),
    ("r_alkbn", "Alkalinity produced by benthic algae growth on nitrate", "eq/mg-C"),
];

pub(crate) fn variables() -> Vec<VariableDescriptor> {
    let mut variables = vec![
        VariableDescriptor::state("Alk", process!(|Alk, dAlkdt, dt| Alk + dAlkdt * dt))
            .with_long_name("Alkalinity")
            .with_units("mg-CaCO3/L"),
        VariableDescriptor::dynamic(
            "Alk_nitrification",
            process!(|r_alkn, NH4_Nitrification| {
                CACO3_PER_EQUIVALENT * r_alkn * NH4_Nitrification
            }),
        )
        .with_long_name("Alkalinity consumed by nitrification")
        .with_units("mg-CaCO3/L/d")
        .enabled_by("use_Alk"),
        VariableDescriptor::dynamic(
            "Alk_denitrification",
            process!(|r_alkden, NO3_Denit| CACO3_PER_EQUIVALENT * r_alkden * NO3_Denit),
        )
        .with_long_name("Alkalinity produced by denitrification")
        .with_units("mg-CaCO3/L/d")
        .enabled_by("use_Alk"),
        VariableDescriptor::dynamic(
            "Alk_algal_growth",
            process!(|r_alkaa, r_alkan, ApUptakeFr_NH4, ApUptakeFr_NO3, rca, ApGrowth| {
                CACO3_PER_EQUIVALENT
                    * rca
                    * ApGrowth
                    * (r_alkaa * ApUptakeFr_NH4 - r_alkan * ApUptakeFr_NO3)
            }),
        )
        .with_long_name("Alkalinity change due to algal growth")
        .with_units("mg-CaCO3/L/d")
        .enabled_by("use_Alk"),
        VariableDescriptor::dynamic(
            "Alk_algal_respiration",
            process!(|r_alkaa, rca, ApRespiration| {
                CACO3_PER_EQUIVALENT * r_alkaa * rca * ApRespiration
            }),
        )
        .with_long_name("Alkalinity change due to algal respiration")
        .with_units("mg-CaCO3/L/d")
        .enabled_by("use_Alk"),
        VariableDescriptor::dynamic(
            "Alk_benthic_algae_growth",
            process!(|r_alkba, r_alkbn, AbUptakeFr_NH4, AbUptakeFr_NO3, rcb, Fb, AbGrowth, depth| {
                CACO3_PER_EQUIVALENT * rcb * Fb * AbGrowth / depth
                    * (r_alkba * AbUptakeFr_NH4 - r_alkbn * AbUptakeFr_NO3)
            }),
        )
        .with_long_name("Alkalinity change due to benthic algae growth")
        .with_units("mg-CaCO3/L/d")
        .enabled_by("use_Alk"),
        VariableDescriptor::dynamic(
            "Alk_benthic_algae_respiration",
            process!(|r_alkba, rcb, Fb, AbRespiration, depth| {
                CACO3_PER_EQUIVALENT * r_alkba * rcb * Fb * AbRespiration / depth
            }),
        )
        .with_long_name("Alkalinity change due to benthic algae respiration")
        .with_units("mg-CaCO3/L/d")
        .enabled_by("use_Alk"),
        VariableDescriptor::dynamic(
            "dAlkdt",
            process!(|Alk_nitrification, Alk_denitrification, Alk_algal_growth, Alk_algal_respiration, Alk_benthic_algae_growth, Alk_benthic_algae_respiration| {
                -Alk_nitrification + Alk_denitrification - Alk_algal_growth + Alk_algal_respiration
                    - Alk_benthic_algae_growth
                    + Alk_benthic_algae_respiration
            }),
        )
        .with_long_name("Change in alkalinity")
        .with_units("mg-CaCO3/L/d")
        .enabled_by("use_Alk")
        .with_fallback(0.0),
    ];
    variables.extend(static_variables(STATICS));
    variables
}
