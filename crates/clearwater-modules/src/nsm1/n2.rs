//! Dissolved nitrogen gas and total dissolved gas

use crate::nsm1::environment::water_vapour_pressure;
use clearwater_core::process;
use clearwater_core::variable::VariableDescriptor;

/// Henry's law constant of N2 [mol/L/atm]
pub fn n2_henry_constant(t_water_k: f64) -> f64 {
    0.00065 * (1300.0 * (1.0 / t_water_k - 1.0 / 298.15)).exp()
}

/// N2 concentration in equilibrium with the atmosphere [mg-N/L]
///
/// `pressure_atm` and `p_wv` are both in atmospheres.
pub fn n2_saturation(henry_constant: f64, pressure_atm: f64, p_wv: f64) -> f64 {
    2.8e4 * henry_constant * 0.79 * (pressure_atm - p_wv)
}

pub(crate) fn variables() -> Vec<VariableDescriptor> {
    vec![
        VariableDescriptor::state("N2", process!(|N2, dN2dt, dt| N2 + dN2dt * dt))
            .with_long_name("Dissolved nitrogen gas")
            .with_units("mg-N/L"),
        VariableDescriptor::dynamic("KHN2_tc", process!(|TwaterK| n2_henry_constant(TwaterK)))
            .with_long_name("Henry's law constant of N2")
            .with_units("mol/L/atm")
            .enabled_by("use_N2"),
        VariableDescriptor::dynamic("P_wv", process!(|TwaterK| water_vapour_pressure(TwaterK)))
            .with_long_name("Partial pressure of water vapour")
            .with_units("atm")
            .enabled_by("use_N2"),
        VariableDescriptor::dynamic(
            "N2sat",
            process!(|KHN2_tc, pressure_atm, P_wv| {
                n2_saturation(KHN2_tc, pressure_atm / 1013.25, P_wv)
            }),
        )
        .with_long_name("N2 saturation")
        .with_units("mg-N/L")
        .enabled_by("use_N2"),
        VariableDescriptor::dynamic(
            "dN2dt",
            process!(|ka_tc, N2sat, N2| 1.034 * ka_tc * (N2sat - N2)),
        )
        .with_long_name("Change in N2 concentration")
        .with_units("mg-N/L/d")
        .enabled_by("use_N2")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "TDG",
            process!(|N2, N2sat, DOX, DOX_sat| 79.0 * N2 / N2sat + 21.0 * DOX / DOX_sat),
        )
        .with_long_name("Total dissolved gas")
        .with_units("%")
        .enabled_by("use_N2"),
    ]
}
