//! TSM energy budget
//!
//! Water temperature driven by the net heat flux through the water surface and the bed.
//! Surface area and volume are carried as states and held constant from step to step,
//! the average depth follows from their ratio.
//!
//! Heat exchange with the sediment is switched by `use_SedTemp`.
//!
//! ```rust
//! use clearwater_modules::tsm::{EnergyBudget, TsmConfig, DEFAULT_INITIAL_STATE};
//!
//! let mut budget = EnergyBudget::new(&TsmConfig::default(), DEFAULT_INITIAL_STATE, 1).unwrap();
//! budget.run().unwrap();
//! assert!(budget.latest("t_water_c").unwrap()[0] < 25.0);
//! ```

pub mod parameters;
mod variables;

pub use parameters::*;
pub use variables::{
    air_emissivity, latent_heat, saturation_vapour_pressure, sediment_heat_flux, water_density,
    water_specific_heat, wind_function,
};

use crate::shared::register_all;
use clearwater_core::dataset::Value;
use clearwater_core::errors::ClearwaterResult;
use clearwater_core::model::{Model, ModelBuilder};
use clearwater_core::registry::{Registry, REGISTRY};
use clearwater_core::variable::VariableDescriptor;
use std::ops::{Deref, DerefMut};
use tracing::debug;

/// Model type of the energy budget in the registry
pub const MODEL_TYPE: &str = "tsm";

/// Reference initial state of every state variable
pub const DEFAULT_INITIAL_STATE: [(&str, f64); 3] = [
    ("t_water_c", 25.0),
    ("surface_area", 1.0),
    ("volume", 1.0),
];

/// Every variable of the energy budget in declaration order
pub fn variables() -> Vec<VariableDescriptor> {
    variables::variables()
}

/// Register the variables of the energy budget
pub fn declare(registry: &Registry) -> ClearwaterResult<()> {
    registry.declare_once(MODEL_TYPE, |registry| {
        register_all(registry, MODEL_TYPE, variables())
    })
}

/// Energy budget model
///
/// Derefs to the underlying [`Model`].
#[derive(Debug)]
pub struct EnergyBudget {
    model: Model,
}

impl EnergyBudget {
    pub fn new<K, V>(
        config: &TsmConfig,
        initial_state: impl IntoIterator<Item = (K, V)>,
        time_steps: usize,
    ) -> ClearwaterResult<Self>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self::with_registry(&REGISTRY, config, initial_state, time_steps)
    }

    pub fn with_registry<K, V>(
        registry: &Registry,
        config: &TsmConfig,
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
        debug!(locations, time_steps, "Creating energy budget");

        let model = ModelBuilder::from_registry(registry, MODEL_TYPE)
            .with_locations(locations)
            .with_planned_timesteps(time_steps)
            .with_initial_values(initial_state)
            .with_static_values(&config.meteorological)
            .with_static_values(&config.temperature)
            .with_parameters(&config.global_parameters)
            .build()?;

        Ok(Self { model })
    }

    pub fn into_model(self) -> Model {
        self.model
    }
}

impl Deref for EnergyBudget {
    type Target = Model;

    fn deref(&self) -> &Self::Target {
        &self.model
    }
}

impl DerefMut for EnergyBudget {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.model
    }
}
