//! Benthic algae
//!
//! Benthic algae live on the bed, so their biomass is an areal density.
//! Fluxes exchanged with the water column are divided by the depth
//! and scaled by the fraction of the bed covered by algae.

use crate::nsm1::algae::{nitrogen_limitation, phosphorus_limitation};
use crate::shared::{
    arrhenius_correction, half_saturation, option, static_variables, StaticDefinition,
};
use clearwater_core::process;
use clearwater_core::variable::VariableDescriptor;

const STATICS: &[StaticDefinition] = &[
    ("BWd", "Benthic algae dry weight", "mg-D"),
    ("BWc", "Benthic algae carbon", "mg-C"),
    ("BWn", "Benthic algae nitrogen", "mg-N"),
    ("BWp", "Benthic algae phosphorus", "mg-P"),
    ("BWa", "Benthic algae chlorophyll-a", "ug-Chla"),
    ("KLb", "Benthic light limitation constant", "W/m^2"),
    ("KsNb", "Benthic nitrogen half saturation", "mg-N/L"),
    ("KsPb", "Benthic phosphorus half saturation", "mg-P/L"),
    ("Ksb", "Benthic density half saturation", "g-D/m^2"),
    ("mub_max_20", "Maximum benthic algae growth rate at 20 °C", "1/d"),
    ("krb_20", "Benthic algae respiration rate at 20 °C", "1/d"),
    ("kdb_20", "Benthic algae death rate at 20 °C", "1/d"),
    ("mub_max_theta", "Benthic growth rate temperature coefficient", "unitless"),
    ("krb_theta", "Benthic respiration rate temperature coefficient", "unitless"),
    ("kdb_theta", "Benthic death rate temperature coefficient", "unitless"),
    ("b_growth_rate_option", "Benthic algae growth rate option", "unitless"),
    ("b_light_limitation_option", "Benthic algae light limitation option", "unitless"),
    ("Fw", "Fraction of benthic algae mortality into the water column", "unitless"),
    ("Fb", "Fraction of the bottom area available for benthic algae", "unitless"),
];

/// Light limitation at the bed from the light reaching the bottom
///
/// | option | formulation     |
/// |--------|-----------------|
/// | 1      | half saturation |
/// | 2      | Smith           |
/// | 3      | Steele          |
pub fn bottom_light_limitation(limitation_option: f64, bottom_light: f64, klb: f64) -> f64 {
    let ib = bottom_light;
    match option(limitation_option) {
        1 => half_saturation(ib, klb),
        2 => ib / (klb.powi(2) + ib.powi(2)).sqrt(),
        3 => ib / klb * (1.0 - ib / klb).exp(),
        _ => f64::NAN,
    }
}

/// Benthic algae growth rate from the light, nutrient and density limitations
///
/// | option | formulation        |
/// |--------|--------------------|
/// | 1      | multiplicative     |
/// | 2      | limiting nutrient  |
pub fn benthic_growth_rate(
    growth_option: f64,
    mub_max: f64,
    light: f64,
    nitrogen: f64,
    phosphorus: f64,
    density: f64,
) -> f64 {
    match option(growth_option) {
        1 => mub_max * light * nitrogen * phosphorus * density,
        2 => mub_max * light * density * nitrogen.min(phosphorus),
        _ => f64::NAN,
    }
}

pub(crate) fn variables() -> Vec<VariableDescriptor> {
    let mut variables = vec![
        VariableDescriptor::state("Ab", process!(|Ab, dAbdt, dt| Ab + dAbdt * dt))
            .with_long_name("Benthic algae concentration")
            .with_units("g-D/m^2"),
        VariableDescriptor::dynamic("rnb", process!(|BWn, BWd| BWn / BWd))
            .with_long_name("Benthic algae N : D ratio")
            .with_units("mg-N/mg-D"),
        VariableDescriptor::dynamic("rpb", process!(|BWp, BWd| BWp / BWd))
            .with_long_name("Benthic algae P : D ratio")
            .with_units("mg-P/mg-D"),
        VariableDescriptor::dynamic("rcb", process!(|BWc, BWd| BWc / BWd))
            .with_long_name("Benthic algae C : D ratio")
            .with_units("mg-C/mg-D"),
        VariableDescriptor::dynamic("rab", process!(|BWa, BWd| BWa / BWd))
            .with_long_name("Benthic algae Chla : D ratio")
            .with_units("ug-Chla/mg-D"),
        VariableDescriptor::dynamic(
            "mub_max_tc",
            process!(|TwaterC, mub_max_20, mub_max_theta| {
                arrhenius_correction(TwaterC, mub_max_20, mub_max_theta)
            }),
        )
        .with_long_name("Maximum benthic algae growth rate")
        .with_units("1/d"),
        VariableDescriptor::dynamic(
            "krb_tc",
            process!(|TwaterC, krb_20, krb_theta| arrhenius_correction(TwaterC, krb_20, krb_theta)),
        )
        .with_long_name("Benthic algae respiration rate")
        .with_units("1/d"),
        VariableDescriptor::dynamic(
            "kdb_tc",
            process!(|TwaterC, kdb_20, kdb_theta| arrhenius_correction(TwaterC, kdb_20, kdb_theta)),
        )
        .with_long_name("Benthic algae death rate")
        .with_units("1/d"),
        VariableDescriptor::dynamic(
            "IB",
            process!(|PAR, L, depth| PAR * (-L * depth).exp()),
        )
        .with_long_name("Light intensity at the bottom")
        .with_units("W/m^2"),
        VariableDescriptor::dynamic(
            "FLb",
            process!(|b_light_limitation_option, IB, KLb| {
                bottom_light_limitation(b_light_limitation_option, IB, KLb)
            }),
        )
        .with_long_name("Benthic algae light limitation")
        .with_units("unitless"),
        VariableDescriptor::dynamic(
            "FNb",
            process!(|use_NH4, use_NO3, NH4, NO3, KsNb| {
                nitrogen_limitation(use_NH4 != 0.0, use_NO3 != 0.0, NH4, NO3, KsNb)
            }),
        )
        .with_long_name("Benthic algae nitrogen limitation")
        .with_units("unitless"),
        VariableDescriptor::dynamic(
            "FPb",
            process!(|use_TIP, DIP, KsPb| phosphorus_limitation(use_TIP != 0.0, DIP, KsPb)),
        )
        .with_long_name("Benthic algae phosphorus limitation")
        .with_units("unitless"),
        VariableDescriptor::dynamic("FSb", process!(|Ksb, Ab| half_saturation(Ksb, Ab)))
            .with_long_name("Benthic algae density limitation")
            .with_units("unitless"),
        VariableDescriptor::dynamic(
            "mub",
            process!(|b_growth_rate_option, mub_max_tc, FLb, FNb, FPb, FSb| {
                benthic_growth_rate(b_growth_rate_option, mub_max_tc, FLb, FNb, FPb, FSb)
            }),
        )
        .with_long_name("Benthic algae growth rate")
        .with_units("1/d"),
        VariableDescriptor::dynamic("AbGrowth", process!(|mub, Ab| mub * Ab))
            .with_long_name("Benthic algae growth")
            .with_units("g-D/m^2/d")
            .enabled_by("use_Balgae")
            .with_fallback(0.0),
        VariableDescriptor::dynamic("AbRespiration", process!(|krb_tc, Ab| krb_tc * Ab))
            .with_long_name("Benthic algae respiration")
            .with_units("g-D/m^2/d")
            .enabled_by("use_Balgae")
            .with_fallback(0.0),
        VariableDescriptor::dynamic("AbDeath", process!(|kdb_tc, Ab| kdb_tc * Ab))
            .with_long_name("Benthic algae death")
            .with_units("g-D/m^2/d")
            .enabled_by("use_Balgae")
            .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "dAbdt",
            process!(|AbGrowth, AbRespiration, AbDeath| AbGrowth - AbRespiration - AbDeath),
        )
        .with_long_name("Change in benthic algae concentration")
        .with_units("g-D/m^2/d")
        .enabled_by("use_Balgae")
        .with_fallback(0.0),
        VariableDescriptor::dynamic("Chlb", process!(|rab, Ab| rab * Ab))
            .with_long_name("Benthic chlorophyll-a")
            .with_units("mg-Chla/m^2"),
    ];
    variables.extend(static_variables(STATICS));
    variables
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bottom_light_formulations() {
        assert_relative_eq!(bottom_light_limitation(1.0, 10.0, 10.0), 0.5);
        assert_relative_eq!(bottom_light_limitation(2.0, 10.0, 10.0), 1.0 / 2.0_f64.sqrt());
        // Steele peaks at the saturating intensity
        assert_relative_eq!(bottom_light_limitation(3.0, 10.0, 10.0), 1.0);
        assert!(bottom_light_limitation(3.0, 20.0, 10.0) < 1.0);
    }

    #[test]
    fn limiting_nutrient_growth() {
        assert_relative_eq!(benthic_growth_rate(1.0, 0.4, 0.5, 0.5, 0.5, 0.5), 0.025);
        assert_relative_eq!(benthic_growth_rate(2.0, 0.4, 0.5, 0.5, 0.25, 0.5), 0.025);
        assert!(benthic_growth_rate(4.0, 0.4, 0.5, 0.5, 0.25, 0.5).is_nan());
    }
}
