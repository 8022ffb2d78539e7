//! Particulate organic matter in the bed sediment

use crate::shared::{arrhenius_correction, static_variables, StaticDefinition};
use clearwater_core::process;
use clearwater_core::variable::VariableDescriptor;

const STATICS: &[StaticDefinition] = &[
    ("kpom_20", "POM dissolution rate at 20 °C", "1/d"),
    ("kpom_theta", "POM dissolution temperature coefficient", "unitless"),
];

pub(crate) fn variables() -> Vec<VariableDescriptor> {
    let mut variables = vec![
        VariableDescriptor::state("POM", process!(|POM, dPOMdt, dt| POM + dPOMdt * dt))
            .with_long_name("Particulate organic matter")
            .with_units("mg-D/L"),
        VariableDescriptor::dynamic(
            "kpom_tc",
            process!(|TwaterC, kpom_20, kpom_theta| {
                arrhenius_correction(TwaterC, kpom_20, kpom_theta)
            }),
        )
        .with_long_name("POM dissolution rate")
        .with_units("1/d")
        .enabled_by("use_POM"),
        VariableDescriptor::dynamic(
            "POM_algal_settling",
            process!(|rda, ApSettling| rda * ApSettling),
        )
        .with_long_name("POM from settling algae")
        .with_units("mg-D/L/d")
        .enabled_by("use_POM"),
        VariableDescriptor::dynamic("POM_dissolution", process!(|kpom_tc, POM| kpom_tc * POM))
            .with_long_name("POM dissolution")
            .with_units("mg-D/L/d")
            .enabled_by("use_POM"),
        VariableDescriptor::dynamic(
            "POM_POC_settling",
            process!(|POC_settling, fcom| POC_settling / fcom),
        )
        .with_long_name("POM from settling POC")
        .with_units("mg-D/L/d")
        .enabled_by("use_POM"),
        VariableDescriptor::dynamic(
            "POM_benthic_algae_mortality",
            process!(|Fw, Fb, AbDeath, depth| Fw * Fb * AbDeath / depth),
        )
        .with_long_name("POM from benthic algae mortality")
        .with_units("mg-D/L/d")
        .enabled_by("use_POM"),
        VariableDescriptor::dynamic(
            "POM_burial",
            process!(|vb, POM, depth| vb / 365.0 * POM / depth),
        )
        .with_long_name("POM burial")
        .with_units("mg-D/L/d")
        .with_description("The burial velocity is given per year")
        .enabled_by("use_POM"),
        VariableDescriptor::dynamic(
            "dPOMdt",
            process!(|POM_algal_settling, POM_dissolution, POM_POC_settling, POM_benthic_algae_mortality, POM_burial| {
                POM_algal_settling - POM_dissolution + POM_POC_settling + POM_benthic_algae_mortality
                    - POM_burial
            }),
        )
        .with_long_name("Change in POM concentration")
        .with_units("mg-D/L/d")
        .enabled_by("use_POM")
        .with_fallback(0.0),
    ];
    variables.extend(static_variables(STATICS));
    variables
}
