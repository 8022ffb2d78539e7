//! Heat fluxes across the water surface and the bed

use crate::shared::{static_variables, StaticDefinition, KELVIN_OFFSET, SECONDS_PER_DAY};
use clearwater_core::process;
use clearwater_core::variable::VariableDescriptor;

const STATICS: &[StaticDefinition] = &[
    ("air_temp_c", "Air temperature", "degC"),
    ("q_solar", "Net shortwave radiation", "W/m^2"),
    ("sed_temp_c", "Sediment temperature", "degC"),
    ("eair_mb", "Vapour pressure of the air", "mb"),
    ("pressure_mb", "Air pressure", "mb"),
    ("cloudiness", "Cloud cover fraction", "unitless"),
    ("wind_speed", "Wind speed", "m/s"),
    ("wind_a", "Wind function constant", "1e-6 m/s/mb"),
    ("wind_b", "Wind function coefficient", "1e-6 1/mb"),
    ("wind_c", "Wind function exponent", "unitless"),
    ("wind_kh_kw", "Ratio of heat and vapour diffusivities", "unitless"),
    ("stefan_boltzmann", "Stefan-Boltzmann constant", "W/m^2/K^4"),
    ("cp_air", "Specific heat of air", "J/kg/K"),
    ("emissivity_water", "Emissivity of water", "unitless"),
    ("pb", "Bulk density of the sediment", "kg/m^3"),
    ("cps", "Specific heat of the sediment", "J/kg/K"),
    ("h2", "Active sediment layer thickness", "m"),
    ("alphas", "Sediment thermal diffusivity", "m^2/d"),
];

/// Density of water [kg/m^3]
pub fn water_density(t_water_c: f64) -> f64 {
    let t = t_water_c;
    999.973 * (1.0 - (t - 3.9863).powi(2) * (t + 288.9414) / (508929.2 * (t + 68.12963)))
}

/// Specific heat of water [J/kg/K]
pub fn water_specific_heat(t_water_c: f64) -> f64 {
    let t = t_water_c;
    4217.4 - 3.720283 * t + 0.1412855 * t.powi(2) - 2.654387e-3 * t.powi(3)
        + 2.093236e-5 * t.powi(4)
}

/// Saturation vapour pressure at the water surface [mb]
pub fn saturation_vapour_pressure(t_water_c: f64) -> f64 {
    6.1094 * (17.625 * t_water_c / (t_water_c + 243.04)).exp()
}

/// Emissivity of the atmosphere under partial cloud cover
pub fn air_emissivity(air_temp_k: f64, cloudiness: f64) -> f64 {
    9.37e-6 * air_temp_k.powi(2) * (1.0 + 0.17 * cloudiness.powi(2))
}

/// Wind function of the latent and sensible heat fluxes [m/s/mb]
pub fn wind_function(wind_a: f64, wind_b: f64, wind_c: f64, wind_speed: f64) -> f64 {
    wind_a / 1.0e6 + wind_b / 1.0e6 * wind_speed.powf(wind_c)
}

/// Latent heat of vaporisation [J/kg]
pub fn latent_heat(t_water_c: f64) -> f64 {
    1000.0 * (2500.9 - 2.361 * t_water_c)
}

/// Conductive heat flux from the sediment into the water [W/m^2]
pub fn sediment_heat_flux(
    pb: f64,
    cps: f64,
    alphas: f64,
    h2: f64,
    sed_temp_c: f64,
    t_water_c: f64,
) -> f64 {
    pb * cps * alphas / (0.5 * h2) * (sed_temp_c - t_water_c) / SECONDS_PER_DAY
}

pub(crate) fn variables() -> Vec<VariableDescriptor> {
    let mut variables = vec![
        VariableDescriptor::state(
            "t_water_c",
            process!(|t_water_c, q_net, rho_water, cp_water, depth, dt| {
                t_water_c + q_net / (rho_water * cp_water * depth) * dt * SECONDS_PER_DAY
            }),
        )
        .with_long_name("Water temperature")
        .with_units("degC")
        .with_description("Water temperature integrated from the net heat flux"),
        VariableDescriptor::state("surface_area", process!(|surface_area| surface_area))
            .with_long_name("Surface area")
            .with_units("m^2"),
        VariableDescriptor::state("volume", process!(|volume| volume))
            .with_long_name("Volume")
            .with_units("m^3"),
        VariableDescriptor::dynamic("depth", process!(|volume, surface_area| volume / surface_area))
            .with_long_name("Average depth")
            .with_units("m"),
        VariableDescriptor::dynamic("t_water_k", process!(|t_water_c| t_water_c + KELVIN_OFFSET))
            .with_long_name("Water temperature")
            .with_units("K"),
        VariableDescriptor::dynamic("air_temp_k", process!(|air_temp_c| air_temp_c + KELVIN_OFFSET))
            .with_long_name("Air temperature")
            .with_units("K"),
        VariableDescriptor::dynamic("rho_water", process!(|t_water_c| water_density(t_water_c)))
            .with_long_name("Density of water")
            .with_units("kg/m^3"),
        VariableDescriptor::dynamic(
            "cp_water",
            process!(|t_water_c| water_specific_heat(t_water_c)),
        )
        .with_long_name("Specific heat of water")
        .with_units("J/kg/K"),
        VariableDescriptor::dynamic(
            "esat_mb",
            process!(|t_water_c| saturation_vapour_pressure(t_water_c)),
        )
        .with_long_name("Saturation vapour pressure at the water surface")
        .with_units("mb"),
        VariableDescriptor::dynamic(
            "emissivity_air",
            process!(|air_temp_k, cloudiness| air_emissivity(air_temp_k, cloudiness)),
        )
        .with_long_name("Emissivity of the air")
        .with_units("unitless"),
        VariableDescriptor::dynamic(
            "wind_function",
            process!(|wind_a, wind_b, wind_c, wind_speed| {
                wind_function(wind_a, wind_b, wind_c, wind_speed)
            }),
        )
        .with_long_name("Wind function")
        .with_units("m/s/mb"),
        VariableDescriptor::dynamic("lv", process!(|t_water_c| latent_heat(t_water_c)))
            .with_long_name("Latent heat of vaporisation")
            .with_units("J/kg"),
        VariableDescriptor::dynamic(
            "q_longwave_down",
            process!(|emissivity_air, stefan_boltzmann, air_temp_k| {
                0.97 * emissivity_air * stefan_boltzmann * air_temp_k.powi(4)
            }),
        )
        .with_long_name("Downwelling longwave radiation")
        .with_units("W/m^2")
        .with_description("Atmospheric radiation absorbed by the water surface"),
        VariableDescriptor::dynamic(
            "q_longwave_up",
            process!(|emissivity_water, stefan_boltzmann, t_water_k| {
                emissivity_water * stefan_boltzmann * t_water_k.powi(4)
            }),
        )
        .with_long_name("Upwelling longwave radiation")
        .with_units("W/m^2"),
        VariableDescriptor::dynamic(
            "q_latent",
            process!(|pressure_mb, lv, rho_water, wind_function, esat_mb, eair_mb| {
                0.622 / pressure_mb * lv * rho_water * wind_function * (esat_mb - eair_mb)
            }),
        )
        .with_long_name("Latent heat flux")
        .with_units("W/m^2")
        .with_description("Heat lost to evaporation"),
        VariableDescriptor::dynamic(
            "q_sensible",
            process!(|wind_kh_kw, cp_air, rho_water, wind_function, air_temp_c, t_water_c| {
                wind_kh_kw * cp_air * rho_water * wind_function * (air_temp_c - t_water_c)
            }),
        )
        .with_long_name("Sensible heat flux")
        .with_units("W/m^2"),
        VariableDescriptor::dynamic(
            "q_sediment",
            process!(|pb, cps, alphas, h2, sed_temp_c, t_water_c| {
                sediment_heat_flux(pb, cps, alphas, h2, sed_temp_c, t_water_c)
            }),
        )
        .with_long_name("Sediment heat flux")
        .with_units("W/m^2")
        .enabled_by("use_SedTemp")
        .with_fallback(0.0),
        VariableDescriptor::dynamic(
            "q_net",
            process!(|q_solar, q_longwave_down, q_longwave_up, q_latent, q_sensible, q_sediment| {
                q_solar + q_longwave_down - q_longwave_up - q_latent + q_sensible + q_sediment
            }),
        )
        .with_long_name("Net heat flux")
        .with_units("W/m^2"),
    ];
    variables.extend(static_variables(STATICS));
    variables
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn water_properties_at_25c() {
        assert_relative_eq!(water_density(25.0), 997.048, epsilon = 1e-3);
        assert_relative_eq!(water_density(3.9863), 999.973, epsilon = 1e-9);
        assert_relative_eq!(water_specific_heat(25.0), 4179.398, epsilon = 1e-3);
        assert_relative_eq!(saturation_vapour_pressure(25.0), 31.617, epsilon = 1e-3);
        assert_relative_eq!(latent_heat(25.0), 2_441_875.0, epsilon = 1e-6);
    }

    #[test]
    fn sediment_warms_colder_water() {
        assert!(sediment_heat_flux(1600.0, 1673.0, 0.0432, 0.1, 15.0, 5.0) > 0.0);
        assert_relative_eq!(
            sediment_heat_flux(1600.0, 1673.0, 0.0432, 0.1, 5.0, 25.0),
            -535.36,
            epsilon = 1e-2
        );
    }

    #[test]
    fn wind_function_is_linear_by_default() {
        assert_relative_eq!(wind_function(0.3, 1.5, 1.0, 3.0), 4.8e-6, epsilon = 1e-15);
    }
}
