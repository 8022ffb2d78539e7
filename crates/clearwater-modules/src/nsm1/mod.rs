//! NSM1 nutrient budget
//!
//! Water column budgets of algae, benthic algae, nitrogen, phosphorus, carbon,
//! CBOD, dissolved oxygen, nitrogen gas, particulate organic matter, pathogens and alkalinity.
//!
//! The variables of every subsystem are declared in the process-wide registry under
//! [`MODEL_TYPE`] the first time a [`NutrientBudget`] is built.
//! Optional subsystems are switched on and off through [`GlobalParameters`].
//! Budget terms that are read by other subsystems fall back to zero while their subsystem is disabled.
//!
//! ```rust
//! use clearwater_modules::nsm1::{Nsm1Config, NutrientBudget, DEFAULT_INITIAL_STATE};
//!
//! let mut config = Nsm1Config::default();
//! config.global_parameters.use_pathogen = false;
//!
//! let mut budget = NutrientBudget::new(&config, DEFAULT_INITIAL_STATE, 2).unwrap();
//! budget.run().unwrap();
//! assert_eq!(budget.current_timestep(), 2);
//! assert!(!budget.is_active("PX_death"));
//! ```

mod algae;
mod alkalinity;
mod balgae;
mod carbon;
mod cbod;
mod dox;
mod environment;
mod n2;
mod nitrogen;
pub mod parameters;
mod pathogens;
mod phosphorus;
mod pom;

pub use algae::{growth_rate, light_limitation, nitrogen_limitation, phosphorus_limitation};
pub use balgae::{benthic_growth_rate, bottom_light_limitation};
pub use carbon::{co2_henry_constant, co2_saturation};
pub use environment::{
    dox_saturation, hydraulic_reaeration, light_extinction, water_vapour_pressure,
    wind_reaeration,
};
pub use n2::{n2_henry_constant, n2_saturation};
pub use nitrogen::ammonium_uptake_fraction;
pub use parameters::*;
pub use phosphorus::dissolved_fraction;

use crate::shared::register_all;
use clearwater_core::dataset::Value;
use clearwater_core::errors::ClearwaterResult;
use clearwater_core::model::{Model, ModelBuilder};
use clearwater_core::registry::{Registry, REGISTRY};
use clearwater_core::variable::VariableDescriptor;
use std::ops::{Deref, DerefMut};
use tracing::debug;

/// Model type of the nutrient budget in the registry
pub const MODEL_TYPE: &str = "nsm1";

/// Reference initial state of every state variable
pub const DEFAULT_INITIAL_STATE: [(&str, f64); 16] = [
    ("Ap", 36.77),
    ("Ab", 24.0),
    ("NH4", 0.063),
    ("NO3", 5.54),
    ("OrgN", 1.726),
    ("N2", 1.0),
    ("TIP", 0.071),
    ("OrgP", 0.24),
    ("POC", 4.356),
    ("DOC", 1.0),
    ("DIC", 1.0),
    ("POM", 1.0),
    ("CBOD", 1.0),
    ("DOX", 8.0),
    ("PX", 1.0),
    ("Alk", 1.0),
];

/// Every variable of the nutrient budget in declaration order
pub fn variables() -> Vec<VariableDescriptor> {
    [
        environment::variables(),
        algae::variables(),
        balgae::variables(),
        nitrogen::variables(),
        phosphorus::variables(),
        carbon::variables(),
        cbod::variables(),
        dox::variables(),
        n2::variables(),
        pom::variables(),
        pathogens::variables(),
        alkalinity::variables(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Register the variables of the nutrient budget
///
/// Only the first call for a registry declares anything.
pub fn declare(registry: &Registry) -> ClearwaterResult<()> {
    registry.declare_once(MODEL_TYPE, |registry| {
        register_all(registry, MODEL_TYPE, variables())
    })
}

/// Nutrient budget model
///
/// A thin wrapper around a [`Model`] built from the registered NSM1 variables.
/// All of the [`Model`] methods are available through `Deref`.
#[derive(Debug)]
pub struct NutrientBudget {
    model: Model,
}

impl NutrientBudget {
    /// Build a nutrient budget
    ///
    /// `initial_state` supplies the starting value of every state variable.
    /// The number of locations is taken from the longest array in the initial state,
    /// scalar values are shared by every location.
    /// `time_steps` is the number of timesteps taken by [`Model::run`].
    pub fn new<K, V>(
        config: &Nsm1Config,
        initial_state: impl IntoIterator<Item = (K, V)>,
        time_steps: usize,
    ) -> ClearwaterResult<Self>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::with_registry(&REGISTRY, config, initial_state, time_steps)
    }

    /// Build a nutrient budget from the variables declared in `registry`
    pub fn with_registry<K, V>(
        registry: &Registry,
        config: &Nsm1Config,
        initial_state: impl IntoIterator<Item = (K, V)>,
        time_steps: usize,
    ) -> ClearwaterResult<Self>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        declare(registry)?;

        let initial_state: Vec<(String, Value)> = initial_state
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        let locations = initial_state
            .iter()
            .filter_map(|(_, value)| match value {
                Value::Array(values) => Some(values.len()),
                Value::Scalar(_) => None,
            })
            .max()
            .unwrap_or(1);
        debug!(locations, time_steps, "Creating nutrient budget");

        let model = ModelBuilder::from_registry(registry, MODEL_TYPE)
            .with_locations(locations)
            .with_planned_timesteps(time_steps)
            .with_initial_values(initial_state)
            .with_static_values(&config.algae)
            .with_static_values(&config.alkalinity)
            .with_static_values(&config.balgae)
            .with_static_values(&config.nitrogen)
            .with_static_values(&config.carbon)
            .with_static_values(&config.cbod)
            .with_static_values(&config.dox)
            .with_static_values(&config.n2)
            .with_static_values(&config.pom)
            .with_static_values(&config.pathogen)
            .with_static_values(&config.phosphorus)
            .with_parameters(&config.global_parameters)
            .with_parameters(&config.global_vars)
            .build()?;

        Ok(Self { model })
    }

    pub fn into_model(self) -> Model {
        self.model
    }
}

impl Deref for NutrientBudget {
    type Target = Model;

    fn deref(&self) -> &Self::Target {
        &self.model
    }
}

impl DerefMut for NutrientBudget {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearwater_core::parameters::ParameterSet;
    use clearwater_core::variable::Usage;
    use std::collections::HashSet;

    #[test]
    fn variable_names_are_unique() {
        let variables = variables();
        let names: HashSet<_> = variables.iter().map(|v| v.name().to_string()).collect();
        assert_eq!(names.len(), variables.len());
    }

    #[test]
    fn every_static_has_a_configured_value() {
        let config = Nsm1Config::default();
        let mut configured: HashSet<&str> = HashSet::new();
        for values in [
            config.algae.parameter_values(),
            config.alkalinity.parameter_values(),
            config.balgae.parameter_values(),
            config.nitrogen.parameter_values(),
            config.carbon.parameter_values(),
            config.cbod.parameter_values(),
            config.dox.parameter_values(),
            config.n2.parameter_values(),
            config.pom.parameter_values(),
            config.pathogen.parameter_values(),
            config.phosphorus.parameter_values(),
        ] {
            configured.extend(values.into_iter().map(|(name, _)| name));
        }

        let statics: HashSet<String> = variables()
            .iter()
            .filter(|v| v.usage() == Usage::Static)
            .map(|v| v.name().to_string())
            .collect();
        let configured: HashSet<String> = configured.into_iter().map(String::from).collect();
        assert_eq!(statics, configured);
    }

    #[test]
    fn every_state_has_a_default() {
        let states: HashSet<String> = variables()
            .iter()
            .filter(|v| v.usage() == Usage::State)
            .map(|v| v.name().to_string())
            .collect();
        let defaults: HashSet<String> = DEFAULT_INITIAL_STATE
            .iter()
            .map(|(name, _)| name.to_string())
            .collect();
        assert_eq!(states, defaults);
    }

    #[test]
    fn declare_is_idempotent() {
        let registry = Registry::new();
        declare(&registry).unwrap();
        let count = registry.get_all(MODEL_TYPE).len();
        declare(&registry).unwrap();
        assert_eq!(registry.get_all(MODEL_TYPE).len(), count);
        assert_eq!(count, variables().len());
    }
}
