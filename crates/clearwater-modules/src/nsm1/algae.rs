//! Algae (phytoplankton)
//!
//! Algal biomass is tracked as chlorophyll-a.
//! Growth is limited by light, nitrogen and phosphorus,
//! and biomass is lost to respiration, death and settling.
//! The stoichiometric ratios defined here convert algal fluxes into
//! nitrogen, phosphorus, carbon and dry weight fluxes of the other subsystems.

use crate::shared::{
    arrhenius_correction, half_saturation, option, static_variables, StaticDefinition,
};
use clearwater_core::process;
use clearwater_core::variable::VariableDescriptor;

const STATICS: &[StaticDefinition] = &[
    ("AWd", "Algal dry weight", "mg-D"),
    ("AWc", "Algal carbon", "mg-C"),
    ("AWn", "Algal nitrogen", "mg-N"),
    ("AWp", "Algal phosphorus", "mg-P"),
    ("AWa", "Algal chlorophyll-a", "ug-Chla"),
    ("KL", "Light limitation constant", "W/m^2"),
    ("KsN", "Nitrogen half saturation", "mg-N/L"),
    ("KsP", "Phosphorus half saturation", "mg-P/L"),
    ("mu_max_20", "Maximum algal growth rate at 20 °C", "1/d"),
    ("kdp_20", "Algal death rate at 20 °C", "1/d"),
    ("krp_20", "Algal respiration rate at 20 °C", "1/d"),
    ("mu_max_theta", "Algal growth rate temperature coefficient", "unitless"),
    ("kdp_theta", "Algal death rate temperature coefficient", "unitless"),
    ("krp_theta", "Algal respiration rate temperature coefficient", "unitless"),
    ("vsap", "Algal settling velocity", "m/d"),
    ("growth_rate_option", "Algal growth rate option", "unitless"),
    ("light_limitation_option", "Algal light limitation option", "unitless"),
];

/// Depth averaged light limitation of algal growth
///
/// `extinction_depth` is the product of the light extinction coefficient and the water depth.
///
/// | option | formulation     |
/// |--------|-----------------|
/// | 1      | half saturation |
/// | 2      | Smith           |
/// | 3      | Steele          |
///
/// A water column without any extinction is not light limited.
pub fn light_limitation(limitation_option: f64, par: f64, kl: f64, extinction_depth: f64) -> f64 {
    let lh = extinction_depth;
    if lh <= 0.0 {
        return 1.0;
    }
    let attenuation = (-lh).exp();
    match option(limitation_option) {
        1 => (1.0 / lh) * ((kl + par) / (kl + par * attenuation)).ln(),
        2 => {
            let surface = par / kl;
            let bottom = par * attenuation / kl;
            (1.0 / lh)
                * ((surface + (1.0 + surface.powi(2)).sqrt())
                    / (bottom + (1.0 + bottom.powi(2)).sqrt()))
                .ln()
        }
        3 => {
            (std::f64::consts::E / lh)
                * ((-par * attenuation / kl).exp() - (-par / kl).exp())
        }
        _ => f64::NAN,
    }
}

/// Combine the light and nutrient limitations into a growth rate
///
/// | option | formulation                            |
/// |--------|----------------------------------------|
/// | 1      | multiplicative                         |
/// | 2      | limiting nutrient                      |
/// | 3      | harmonic mean of the nutrient limits   |
pub fn growth_rate(
    growth_option: f64,
    mu_max: f64,
    light: f64,
    nitrogen: f64,
    phosphorus: f64,
) -> f64 {
    match option(growth_option) {
        1 => mu_max * light * nitrogen * phosphorus,
        2 => mu_max * light * nitrogen.min(phosphorus),
        3 if nitrogen == 0.0 || phosphorus == 0.0 => 0.0,
        3 => mu_max * light * 2.0 / (1.0 / nitrogen + 1.0 / phosphorus),
        _ => f64::NAN,
    }
}

/// Nitrogen limitation over the enabled inorganic nitrogen species
///
/// Not limited when neither species is modelled.
pub fn nitrogen_limitation(use_nh4: bool, use_no3: bool, nh4: f64, no3: f64, ks: f64) -> f64 {
    if !use_nh4 && !use_no3 {
        return 1.0;
    }
    let available: f64 = [(use_nh4, nh4), (use_no3, no3)]
        .iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, concentration)| concentration)
        .sum();
    half_saturation(available, ks)
}

/// Phosphorus limitation, not limited when inorganic phosphorus is not modelled
pub fn phosphorus_limitation(use_tip: bool, dip: f64, ks: f64) -> f64 {
    if use_tip {
        half_saturation(dip, ks)
    } else {
        1.0
    }
}

pub(crate) fn variables() -> Vec<VariableDescriptor> {
    let mut variables = vec![
        VariableDescriptor::state("Ap", process!(|Ap, dApdt, dt| Ap + dApdt * dt))
            .with_long_name("Algae concentration")
            .with_units("ug-Chla/L"),
        // Stoichiometry
        VariableDescriptor::dynamic("rna", process!(|AWn, AWa| AWn / AWa))
            .with_long_name("Algal N : Chla ratio")
            .with_units("mg-N/ug-Chla"),
        VariableDescriptor::dynamic("rpa", process!(|AWp, AWa| AWp / AWa))
            .with_long_name("Algal P : Chla ratio")
            .with_units("mg-P/ug-Chla"),
        VariableDescriptor::dynamic("rca", process!(|AWc, AWa| AWc / AWa))
            .with_long_name("Algal C : Chla ratio")
            .with_units("mg-C/ug-Chla"),
        VariableDescriptor::dynamic("rda", process!(|AWd, AWa| AWd / AWa))
            .with_long_name("Algal D : Chla ratio")
            .with_units("mg-D/ug-Chla"),
        // Rates
        VariableDescriptor::dynamic(
            "mu_max_tc",
            process!(|TwaterC, mu_max_20, mu_max_theta| {
                arrhenius_correction(TwaterC, mu_max_20, mu_max_theta)
            }),
        )
        .with_long_name("Maximum algal growth rate")
        .with_units("1/d"),
        VariableDescriptor::dynamic(
            "krp_tc",
            process!(|TwaterC, krp_20, krp_theta| arrhenius_correction(TwaterC, krp_20, krp_theta)),
        )
        .with_long_name("Algal respiration rate")
        .with_units("1/d"),
        VariableDescriptor::dynamic(
            "kdp_tc",
            process!(|TwaterC, kdp_20, kdp_theta| arrhenius_correction(TwaterC, kdp_20, kdp_theta)),
        )
        .with_long_name("Algal death rate")
        .with_units("1/d"),
        // Limitations
        VariableDescriptor::dynamic(
            "FL",
            process!(|light_limitation_option, PAR, KL, L, depth| {
                light_limitation(light_limitation_option, PAR, KL, L * depth)
            }),
        )
        .with_long_name("Algal light limitation")
        .with_units("unitless"),
        VariableDescriptor::dynamic(
            "FN",
            process!(|use_NH4, use_NO3, NH4, NO3, KsN| {
                nitrogen_limitation(use_NH4 != 0.0, use_NO3 != 0.0, NH4, NO3, KsN)
            }),
        )
        .with_long_name("Algal nitrogen limitation")
        .with_units("unitless"),
        VariableDescriptor::dynamic(
            "FP",
            process!(|use_TIP, DIP, KsP| phosphorus_limitation(use_TIP != 0.0, DIP, KsP)),
        )
        .with_long_name("Algal phosphorus limitation")
        .with_units("unitless"),
        VariableDescriptor::dynamic(
            "mu",
            process!(|growth_rate_option, mu_max_tc, FL, FN, FP| {
                growth_rate(growth_rate_option, mu_max_tc, FL, FN, FP)
            }),
        )
        .with_long_name("Algal growth rate")
        .with_units("1/d"),
        // Fluxes
        VariableDescriptor::dynamic("ApGrowth", process!(|mu, Ap| mu * Ap))
            .with_long_name("Algal growth")
            .with_units("ug-Chla/L/d")
            .enabled_by("use_Algae")
            .with_fallback(0.0),
        VariableDescriptor::dynamic("ApRespiration", process!(|krp_tc, Ap| krp_tc * Ap))
            .with_long_name("Algal respiration")
            .with_units("ug-Chla/L/d")
            .enabled_by("use_Algae")
            .with_fallback(0.0),
        VariableDescriptor::dynamic("ApDeath", process!(|kdp_tc, Ap| kdp_tc * Ap))
            .with_long_name("Algal death")
            .with_units("ug-Chla/L/d")
            .enabled_by("use_Algae")
            .with_fallback(0.0),
        VariableDescriptor::dynamic("ApSettling", process!(|vsap, depth, Ap| vsap / depth * Ap))
            .with_long_name("Algal settling")
            .with_units("ug-Chla/L/d")
            .enabled_by("use_Algae")
            .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "dApdt",
            process!(|ApGrowth, ApRespiration, ApDeath, ApSettling| {
                ApGrowth - ApRespiration - ApDeath - ApSettling
            }),
        )
        .with_long_name("Change in algae concentration")
        .with_units("ug-Chla/L/d")
        .enabled_by("use_Algae")
        .with_fallback(0.0),
    ];
    variables.extend(static_variables(STATICS));
    variables
}
