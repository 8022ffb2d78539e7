//! Physical conditions shared by every subsystem of the nutrient budget
//!
//! Water temperature in Kelvin, light extinction and available light,
//! reaeration rates and dissolved oxygen saturation.
//! None of these variables can be disabled.

use crate::shared::{arrhenius_correction, option, KELVIN_OFFSET};
use clearwater_core::process;
use clearwater_core::variable::VariableDescriptor;

/// Light extinction coefficient of the water column
///
/// Background extinction plus the contributions of suspended solids,
/// particulate organic matter and algal self shading.
/// The organic matter and algae terms are only included when the matching subsystem is enabled.
#[allow(clippy::too_many_arguments)]
pub fn light_extinction(
    lambda0: f64,
    lambdas: f64,
    solid: f64,
    use_pom: bool,
    lambdam: f64,
    pom: f64,
    use_algae: bool,
    lambda1: f64,
    lambda2: f64,
    ap: f64,
) -> f64 {
    let mut extinction = lambda0 + lambdas * solid;
    if use_pom {
        extinction += lambdam * pom;
    }
    if use_algae {
        extinction += lambda1 * ap + lambda2 * ap.max(0.0).powf(2.0 / 3.0);
    }
    extinction
}

/// Hydraulic reaeration rate at 20 °C [1/d]
///
/// | option | formula             |
/// |--------|---------------------|
/// | 1      | user defined        |
/// | 2      | O'Connor-Dobbins    |
/// | 3      | Churchill           |
/// | 4      | Owens-Gibbs         |
/// | 5      | Tsivoglou-Wallace   |
///
/// Unknown options produce NaN.
pub fn hydraulic_reaeration(
    reaeration_option: f64,
    user: f64,
    velocity: f64,
    depth: f64,
    flow: f64,
    slope: f64,
) -> f64 {
    match option(reaeration_option) {
        1 => user,
        2 => 3.93 * velocity.powf(0.5) / depth.powf(1.5),
        3 => 5.32 * velocity.powf(0.67) / depth.powf(1.85),
        4 => 21.7 * velocity.powf(0.67) / depth.powf(1.85),
        5 if flow < 0.556 => 517.0 * (velocity * slope).powf(0.524) * flow.powf(-0.242),
        5 => 596.0 * (velocity * slope).powf(0.528) * flow.powf(-0.136),
        _ => f64::NAN,
    }
}

/// Wind driven reaeration velocity at 20 °C [m/d]
///
/// | option | formula          |
/// |--------|------------------|
/// | 1      | user defined     |
/// | 2      | Banks-Herrera    |
/// | 3      | Wanninkhof       |
///
/// The wind speed is measured at 2 m and scaled to 10 m above the surface.
pub fn wind_reaeration(reaeration_option: f64, user: f64, wind_speed: f64) -> f64 {
    let uw10 = wind_speed * (10.0_f64 / 2.0).powf(0.143);
    match option(reaeration_option) {
        1 => user,
        2 => 0.728 * uw10.powf(0.5) - 0.317 * uw10 + 0.0372 * uw10.powi(2),
        3 => 0.0986 * uw10.powf(1.64),
        _ => f64::NAN,
    }
}

/// Saturation vapour pressure of water [atm]
pub fn water_vapour_pressure(t_water_k: f64) -> f64 {
    (11.8571 - 3840.70 / t_water_k - 216961.0 / t_water_k.powi(2)).exp()
}

/// Dissolved oxygen saturation concentration [mg-O2/L]
///
/// Freshwater saturation at one atmosphere corrected to the local pressure.
pub fn dox_saturation(t_water_k: f64, pressure_mb: f64) -> f64 {
    let t = t_water_k;
    let ln_saturation = -139.34411 + 1.575701e5 / t - 6.642308e7 / t.powi(2)
        + 1.2438e10 / t.powi(3)
        - 8.621949e11 / t.powi(4);
    let saturation = ln_saturation.exp();

    let pressure = pressure_mb / 1013.25;
    let t_c = t - KELVIN_OFFSET;
    let p_wv = water_vapour_pressure(t);
    let theta = 0.000975 - 1.426e-5 * t_c + 6.436e-8 * t_c.powi(2);

    saturation * pressure * ((1.0 - p_wv / pressure) * (1.0 - theta * pressure))
        / ((1.0 - p_wv) * (1.0 - theta))
}

pub(crate) fn variables() -> Vec<VariableDescriptor> {
    vec![
        VariableDescriptor::dynamic("TwaterK", process!(|TwaterC| TwaterC + KELVIN_OFFSET))
            .with_long_name("Water temperature")
            .with_units("K"),
        VariableDescriptor::dynamic(
            "L",
            process!(|lambda0, lambdas, Solid, use_POM, lambdam, POM, use_Algae, lambda1, lambda2, Ap| {
                light_extinction(
                    lambda0,
                    lambdas,
                    Solid,
                    use_POM != 0.0,
                    lambdam,
                    POM,
                    use_Algae != 0.0,
                    lambda1,
                    lambda2,
                    Ap,
                )
            }),
        )
        .with_long_name("Light extinction coefficient")
        .with_units("1/m"),
        VariableDescriptor::dynamic("PAR", process!(|q_solar, Fr_PAR| q_solar * Fr_PAR))
            .with_long_name("Surface light intensity")
            .with_units("W/m^2")
            .with_description("Photosynthetically active part of the incoming solar radiation"),
        VariableDescriptor::dynamic(
            "kah_20",
            process!(|hydraulic_reaeration_option, kah_20_user, velocity, depth, flow, slope| {
                hydraulic_reaeration(
                    hydraulic_reaeration_option,
                    kah_20_user,
                    velocity,
                    depth,
                    flow,
                    slope,
                )
            }),
        )
        .with_long_name("Hydraulic reaeration rate at 20 °C")
        .with_units("1/d"),
        VariableDescriptor::dynamic(
            "kah_tc",
            process!(|TwaterC, kah_20, kah_theta| arrhenius_correction(TwaterC, kah_20, kah_theta)),
        )
        .with_long_name("Hydraulic reaeration rate")
        .with_units("1/d"),
        VariableDescriptor::dynamic(
            "kaw_20",
            process!(|wind_reaeration_option, kaw_20_user, wind_speed| {
                wind_reaeration(wind_reaeration_option, kaw_20_user, wind_speed)
            }),
        )
        .with_long_name("Wind reaeration velocity at 20 °C")
        .with_units("m/d"),
        VariableDescriptor::dynamic(
            "kaw_tc",
            process!(|TwaterC, kaw_20, kaw_theta| arrhenius_correction(TwaterC, kaw_20, kaw_theta)),
        )
        .with_long_name("Wind reaeration velocity")
        .with_units("m/d"),
        VariableDescriptor::dynamic(
            "ka_tc",
            process!(|kah_tc, kaw_tc, depth| kah_tc + kaw_tc / depth),
        )
        .with_long_name("Oxygen reaeration rate")
        .with_units("1/d"),
        VariableDescriptor::dynamic(
            "DOX_sat",
            process!(|TwaterK, pressure_atm| dox_saturation(TwaterK, pressure_atm)),
        )
        .with_long_name("Dissolved oxygen saturation")
        .with_units("mg-O2/L"),
    ]
}
