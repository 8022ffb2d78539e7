//! Carbonaceous biochemical oxygen demand

use crate::shared::{arrhenius_correction, half_saturation, static_variables, StaticDefinition};
use clearwater_core::process;
use clearwater_core::variable::VariableDescriptor;

const STATICS: &[StaticDefinition] = &[
    ("KsOxbod", "Oxygen half saturation for CBOD oxidation", "mg-O2/L"),
    ("kbod_20", "CBOD oxidation rate at 20 °C", "1/d"),
    ("ksbod_20", "CBOD sedimentation rate at 20 °C", "1/d"),
    ("kbod_theta", "CBOD oxidation temperature coefficient", "unitless"),
    ("ksbod_theta", "CBOD sedimentation temperature coefficient", "unitless"),
];

pub(crate) fn variables() -> Vec<VariableDescriptor> {
    let mut variables = vec![
        VariableDescriptor::state("CBOD", process!(|CBOD, dCBODdt, dt| CBOD + dCBODdt * dt))
            .with_long_name("Carbonaceous biochemical oxygen demand")
            .with_units("mg-O2/L"),
        VariableDescriptor::dynamic(
            "kbod_tc",
            process!(|TwaterC, kbod_20, kbod_theta| {
                arrhenius_correction(TwaterC, kbod_20, kbod_theta)
            }),
        )
        .with_long_name("CBOD oxidation rate")
        .with_units("1/d"),
        VariableDescriptor::dynamic(
            "ksbod_tc",
            process!(|TwaterC, ksbod_20, ksbod_theta| {
                arrhenius_correction(TwaterC, ksbod_20, ksbod_theta)
            }),
        )
        .with_long_name("CBOD sedimentation rate")
        .with_units("1/d"),
        VariableDescriptor::dynamic(
            "CBOD_oxidation",
            process!(|use_DOX, DOX, KsOxbod, kbod_tc, CBOD| {
                if use_DOX != 0.0 {
                    half_saturation(DOX, KsOxbod) * kbod_tc * CBOD
                } else {
                    kbod_tc * CBOD
                }
            }),
        )
        .with_long_name("CBOD oxidation")
        .with_units("mg-O2/L/d")
        .with_description("Oxygen limited when dissolved oxygen is modelled"),
        VariableDescriptor::dynamic(
            "CBOD_sedimentation",
            process!(|ksbod_tc, CBOD| ksbod_tc * CBOD),
        )
        .with_long_name("CBOD sedimentation")
        .with_units("mg-O2/L/d"),
        VariableDescriptor::dynamic(
            "dCBODdt",
            process!(|CBOD_oxidation, CBOD_sedimentation| -CBOD_oxidation - CBOD_sedimentation),
        )
        .with_long_name("Change in CBOD concentration")
        .with_units("mg-O2/L/d"),
    ];
    variables.extend(static_variables(STATICS));
    variables
}
