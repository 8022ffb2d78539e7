//! Optional variables enabled by boolean parameters.

use super::decay_descriptors;
use crate::errors::ClearwaterError;
use crate::model::{Model, ModelBuilder};
use crate::process;
use crate::variable::{Usage, VariableDescriptor};
use approx::assert_relative_eq;
use std::sync::Arc;

/// Decay with an optional settling loss
fn settling_descriptors(fallback: bool) -> Vec<Arc<VariableDescriptor>> {
    let settling = VariableDescriptor::dynamic("settling", process!(|vs, C, depth| vs * C / depth))
        .enabled_by("use_settling");
    let settling = match fallback {
        true => settling.with_fallback(0.0),
        false => settling,
    };

    vec![
        Arc::new(VariableDescriptor::state(
            "C",
            process!(|C, loss, settling, dt| C - (loss + settling) * dt),
        )),
        Arc::new(VariableDescriptor::dynamic(
            "loss",
            process!(|k, C| k * C),
        )),
        Arc::new(settling),
        Arc::new(VariableDescriptor::new_static("k")),
        Arc::new(VariableDescriptor::new_static("vs")),
    ]
}

fn build(descriptors: Vec<Arc<VariableDescriptor>>, use_settling: bool) -> Result<Model, ClearwaterError> {
    ModelBuilder::new(descriptors)
        .with_planned_timesteps(3)
        .with_initial_value("C", 1.0)
        .with_static_value("k", 0.1)
        .with_static_value("vs", 0.3)
        .with_parameter("depth", 1.5)
        .with_parameter("dt", 1.0)
        .with_parameter("use_settling", use_settling)
        .build()
}

#[test]
fn enabled_variable_is_computed() {
    let mut model = build(settling_descriptors(true), true).unwrap();
    model.increment_timestep().unwrap();

    assert!(model.is_active("settling"));
    assert_relative_eq!(model.latest("settling").unwrap()[0], 0.2, epsilon = 1e-12);
    assert_relative_eq!(model.latest("C").unwrap()[0], 0.7, epsilon = 1e-12);
}

#[test]
fn disabled_variable_uses_fallback() {
    let mut model = build(settling_descriptors(true), false).unwrap();
    model.run().unwrap();

    assert!(!model.is_active("settling"));
    assert_eq!(model.usage("settling"), Some(Usage::Static));
    assert!(model.history("settling").unwrap().iter().all(|&v| v == 0.0));
    assert_relative_eq!(model.latest("C").unwrap()[0], 0.9_f64.powi(3), epsilon = 1e-12);
}

#[test]
fn disabled_variable_without_fallback_breaks_consumers() {
    let err = build(settling_descriptors(false), false).unwrap_err();
    assert_eq!(
        err,
        ClearwaterError::InactiveDependency {
            variable: "C".to_string(),
            input: "settling".to_string(),
            toggle: "use_settling".to_string()
        }
    );
}

#[test]
fn pruned_model_matches_model_without_the_variable() {
    let mut descriptors = decay_descriptors();
    descriptors.push(Arc::new(
        VariableDescriptor::dynamic("report", process!(|loss| 2.0 * loss)).enabled_by("use_report"),
    ));

    let build = |descriptors: Vec<Arc<VariableDescriptor>>| {
        let mut model = ModelBuilder::new(descriptors)
            .with_planned_timesteps(4)
            .with_initial_value("C", 1.0)
            .with_static_value("k", 0.1)
            .with_static_value("theta", 1.047)
            .with_parameter("TwaterC", 22.0)
            .with_parameter("dt", 1.0)
            .with_parameter("use_report", false)
            .build()
            .unwrap();
        model.run().unwrap();
        model
    };

    let pruned = build(descriptors);
    let reference = build(decay_descriptors());

    assert_eq!(pruned.pruned(), &["report".to_string()]);
    assert!(!pruned.dataset().contains("report"));
    assert_eq!(pruned.computation_order(), reference.computation_order());
    assert_eq!(pruned.history("C").unwrap(), reference.history("C").unwrap());
}

#[test]
fn unknown_toggle() {
    let err = ModelBuilder::new(settling_descriptors(true))
        .with_initial_value("C", 1.0)
        .with_static_value("k", 0.1)
        .with_static_value("vs", 0.3)
        .with_parameter("depth", 1.5)
        .with_parameter("dt", 1.0)
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        ClearwaterError::UnknownToggle {
            variable: "settling".to_string(),
            toggle: "use_settling".to_string()
        }
    );
}

#[test]
fn process_sees_flags_as_numbers() {
    let descriptors = vec![Arc::new(VariableDescriptor::state(
        "C",
        process!(|C, use_decay, dt| C - use_decay * 0.5 * C * dt),
    ))];

    for (flag, expected) in [(true, 0.5), (false, 1.0)] {
        let mut model = ModelBuilder::new(descriptors.clone())
            .with_initial_value("C", 1.0)
            .with_parameter("use_decay", flag)
            .with_parameter("dt", 1.0)
            .build()
            .unwrap();
        model.increment_timestep().unwrap();
        assert_eq!(model.latest("C").unwrap()[0], expected);
    }
}
