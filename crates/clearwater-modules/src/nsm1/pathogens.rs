//! Pathogens
//!
//! Pathogens die off, are inactivated by light and settle.

use crate::shared::{arrhenius_correction, static_variables, StaticDefinition};
use clearwater_core::process;
use clearwater_core::variable::VariableDescriptor;

const STATICS: &[StaticDefinition] = &[
    ("kdx_20", "Pathogen death rate at 20 °C", "1/d"),
    ("kdx_theta", "Pathogen death temperature coefficient", "unitless"),
    ("apx", "Light efficiency factor for pathogen decay", "unitless"),
    ("vx", "Pathogen settling velocity", "m/d"),
];

/// Depth averaged light available for inactivation [W/m^2]
pub fn depth_averaged_light(par: f64, extinction_depth: f64) -> f64 {
    if extinction_depth <= 0.0 {
        par
    } else {
        par / extinction_depth * (1.0 - (-extinction_depth).exp())
    }
}

pub(crate) fn variables() -> Vec<VariableDescriptor> {
    let mut variables = vec![
        VariableDescriptor::state("PX", process!(|PX, dPXdt, dt| PX + dPXdt * dt))
            .with_long_name("Pathogen concentration")
            .with_units("cfu/100mL"),
        VariableDescriptor::dynamic(
            "kdx_tc",
            process!(|TwaterC, kdx_20, kdx_theta| arrhenius_correction(TwaterC, kdx_20, kdx_theta)),
        )
        .with_long_name("Pathogen death rate")
        .with_units("1/d")
        .enabled_by("use_Pathogen"),
        VariableDescriptor::dynamic("PX_death", process!(|kdx_tc, PX| kdx_tc * PX))
            .with_long_name("Pathogen natural death")
            .with_units("cfu/100mL/d")
            .enabled_by("use_Pathogen"),
        VariableDescriptor::dynamic(
            "PX_solar",
            process!(|apx, PAR, L, depth, PX| apx * depth_averaged_light(PAR, L * depth) * PX),
        )
        .with_long_name("Pathogen inactivation by light")
        .with_units("cfu/100mL/d")
        .enabled_by("use_Pathogen"),
        VariableDescriptor::dynamic("PX_settling", process!(|vx, depth, PX| vx / depth * PX))
            .with_long_name("Pathogen settling")
            .with_units("cfu/100mL/d")
            .enabled_by("use_Pathogen"),
        VariableDescriptor::dynamic(
            "dPXdt",
            process!(|PX_death, PX_solar, PX_settling| -PX_death - PX_solar - PX_settling),
        )
        .with_long_name("Change in pathogen concentration")
        .with_units("cfu/100mL/d")
        .enabled_by("use_Pathogen")
        .with_fallback(0.0),
    ];
    variables.extend(static_variables(STATICS));
    variables
}
