//! Integration tests for the model module.
//!
//! These tests build small models from explicit descriptors
//! and check the complete build and timestep workflow.

#[cfg(test)]
mod toggles;

use crate::process;
use crate::variable::VariableDescriptor;
use std::sync::Arc;

/// First order decay of a concentration `C` with a temperature corrected rate
///
/// Declared with consumers before their producers.
pub(super) fn decay_descriptors() -> Vec<Arc<VariableDescriptor>> {
    vec![
        Arc::new(
            VariableDescriptor::state("C", process!(|C, dCdt, dt| C + dCdt * dt))
                .with_long_name("Concentration")
                .with_units("mg/L"),
        ),
        Arc::new(VariableDescriptor::dynamic("dCdt", process!(|loss| -loss))),
        Arc::new(VariableDescriptor::dynamic(
            "loss",
            process!(|k_tc, C| k_tc * C),
        )),
        Arc::new(
            VariableDescriptor::dynamic(
                "k_tc",
                process!(|k, theta, TwaterC| k * theta.powf(TwaterC - 20.0)),
            )
            .with_units("1/d"),
        ),
        Arc::new(VariableDescriptor::new_static("k").with_units("1/d")),
        Arc::new(VariableDescriptor::new_static("theta")),
    ]
}
