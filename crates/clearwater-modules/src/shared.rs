//! Helpers shared by the process functions of every module.

use clearwater_core::errors::ClearwaterResult;
use clearwater_core::registry::Registry;
use clearwater_core::variable::VariableDescriptor;

/// Offset between degrees Celsius and Kelvin
pub const KELVIN_OFFSET: f64 = 273.16;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Correct a rate at 20 °C to the water temperature
///
/// $$k_T = k_{20} \theta^{T - 20}$$
pub fn arrhenius_correction(t_water_c: f64, rate_20: f64, theta: f64) -> f64 {
    rate_20 * theta.powf(t_water_c - 20.0)
}

/// Monod style half saturation term `x / (ks + x)`
///
/// Returns 0 when both terms are zero.
pub fn half_saturation(x: f64, ks: f64) -> f64 {
    match ks + x {
        total if total == 0.0 => 0.0,
        total => x / total,
    }
}

/// Interpret a numeric switch as an option index
pub fn option(value: f64) -> i64 {
    value.round() as i64
}

/// Description of a static variable: name, long name and units
pub(crate) type StaticDefinition = (&'static str, &'static str, &'static str);

/// Build static descriptors from a table of definitions
pub(crate) fn static_variables(definitions: &[StaticDefinition]) -> Vec<VariableDescriptor> {
    definitions
        .iter()
        .map(|(name, long_name, units)| {
            VariableDescriptor::new_static(*name)
                .with_long_name(*long_name)
                .with_units(*units)
        })
        .collect()
}

/// Register a set of descriptors for a model type
pub(crate) fn register_all(
    registry: &Registry,
    model_type: &str,
    descriptors: impl IntoIterator<Item = VariableDescriptor>,
) -> ClearwaterResult<()> {
    for descriptor in descriptors {
        registry.register(model_type, descriptor)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn arrhenius_is_identity_at_20c() {
        assert_relative_eq!(arrhenius_correction(20.0, 0.12, 1.047), 0.12);
        assert_relative_eq!(
            arrhenius_correction(25.0, 0.12, 1.047),
            0.150_98,
            epsilon = 1e-5
        );
    }

    #[test]
    fn half_saturation_handles_zero() {
        assert_eq!(half_saturation(0.0, 0.0), 0.0);
        assert_relative_eq!(half_saturation(8.0, 0.5), 8.0 / 8.5);
    }

    #[test]
    fn options_round() {
        assert_eq!(option(1.0), 1);
        assert_eq!(option(2.9999), 3);
    }
}
