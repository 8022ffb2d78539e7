//! Model builder for constructing models from variable descriptors.

use crate::dataset::{Dataset, TimestepSlice, Value};
use crate::errors::{ClearwaterError, ClearwaterResult};
use crate::parameters::{ParameterSet, ParameterValue, Parameters};
use crate::registry::Registry;
use crate::resolver::resolve;
use crate::variable::{Usage, VariableDescriptor};
use indexmap::IndexMap;
use ndarray::Array1;
use std::sync::Arc;
use tracing::{debug, info};

use super::runtime::Model;

/// Build a new model from a set of variable descriptors.
///
/// The builder resolves which variables take part in the model and the order they are computed in,
/// then creates the first timestep of the model from the supplied values.
///
/// Values are supplied by name:
///
/// - initial values for every active state variable,
/// - values for every active static variable,
/// - external parameters, including the boolean `use_*` toggles of optional subsystems.
///
/// Values for names which are not part of the model are ignored.
pub struct ModelBuilder {
    model_type: String,
    descriptors: Vec<Arc<VariableDescriptor>>,
    locations: usize,
    time_dim: String,
    planned_timesteps: usize,
    initial_values: IndexMap<String, Value>,
    static_values: IndexMap<String, Value>,
    parameters: Parameters,
}

impl ModelBuilder {
    /// Create a builder for an explicit set of descriptors
    pub fn new(descriptors: impl IntoIterator<Item = Arc<VariableDescriptor>>) -> Self {
        Self {
            model_type: "custom".to_string(),
            descriptors: descriptors.into_iter().collect(),
            locations: 1,
            time_dim: "time_step".to_string(),
            planned_timesteps: 1,
            initial_values: IndexMap::new(),
            static_values: IndexMap::new(),
            parameters: Parameters::new(),
        }
    }

    /// Create a builder for every variable registered for a model type
    pub fn from_registry(registry: &Registry, model_type: &str) -> Self {
        let mut builder = Self::new(registry.get_all(model_type));
        builder.model_type = model_type.to_string();
        builder.time_dim = format!("{model_type}_time_step");
        builder
    }

    /// Number of locations (cells) modelled in parallel
    pub fn with_locations(&mut self, locations: usize) -> &mut Self {
        self.locations = locations;
        self
    }

    /// Label of the time dimension of the resulting dataset
    pub fn with_time_dim(&mut self, time_dim: impl Into<String>) -> &mut Self {
        self.time_dim = time_dim.into();
        self
    }

    /// Number of timesteps taken by [`Model::run`]
    pub fn with_planned_timesteps(&mut self, timesteps: usize) -> &mut Self {
        self.planned_timesteps = timesteps;
        self
    }

    /// Initial values of state variables
    ///
    /// Values for static variables are also accepted here.
    pub fn with_initial_values<K, V>(&mut self, values: impl IntoIterator<Item = (K, V)>) -> &mut Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        for (name, value) in values {
            self.initial_values.insert(name.into(), value.into());
        }
        self
    }

    pub fn with_initial_value(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.initial_values.insert(name.to_string(), value.into());
        self
    }

    /// Values of static variables
    pub fn with_static_values(&mut self, values: &impl ParameterSet) -> &mut Self {
        for (name, value) in values.parameter_values() {
            self.static_values
                .insert(name.to_string(), Value::Scalar(value.as_f64()));
        }
        self
    }

    /// Value of a single static variable, either shared or one per location
    pub fn with_static_value(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.static_values.insert(name.to_string(), value.into());
        self
    }

    /// External parameters
    pub fn with_parameters(&mut self, parameters: &impl ParameterSet) -> &mut Self {
        self.parameters.extend_from(parameters);
        self
    }

    /// Every entry of an existing parameter namespace
    pub fn with_parameter_namespace(&mut self, parameters: &Parameters) -> &mut Self {
        self.parameters.merge(parameters);
        self
    }

    pub fn with_parameter(
        &mut self,
        name: &str,
        value: impl Into<ParameterValue>,
    ) -> &mut Self {
        self.parameters.insert(name, value);
        self
    }

    fn static_value(&self, name: &str) -> Option<&Value> {
        self.static_values
            .get(name)
            .or_else(|| self.initial_values.get(name))
    }

    /// Resolve the model and create its first timestep
    ///
    /// # Errors
    ///
    /// Any dependency resolution error, [`ClearwaterError::MissingInitialValue`]
    /// or [`ClearwaterError::MissingStaticValue`] when a required value was not supplied,
    /// and [`ClearwaterError::ShapeMismatch`] when a supplied array does not match the locations.
    pub fn build(&self) -> ClearwaterResult<Model> {
        let resolution = resolve(&self.model_type, &self.descriptors, &self.parameters)?;
        if resolution.order().is_empty() {
            return Err(ClearwaterError::InvalidConfiguration(format!(
                "model type '{}' has no active variables",
                self.model_type
            )));
        }

        let mut initial = TimestepSlice::new();
        for variable in resolution.order() {
            let name = variable.name();
            let values = match (variable.usage(), variable.fallback()) {
                (Usage::Static, Some(fallback)) => Array1::from_elem(self.locations, fallback),
                (Usage::Static, None) => self
                    .static_value(name)
                    .cloned()
                    .ok_or_else(|| ClearwaterError::MissingStaticValue(name.to_string()))?
                    .broadcast(name, self.locations)?,
                (Usage::State, _) => self
                    .initial_values
                    .get(name)
                    .cloned()
                    .ok_or_else(|| ClearwaterError::MissingInitialValue(name.to_string()))?
                    .broadcast(name, self.locations)?,
                // No timestep has been computed yet
                (Usage::Dynamic, _) => Array1::from_elem(self.locations, f64::NAN),
            };
            initial.insert(name, values);
        }

        for name in self.initial_values.keys().chain(self.static_values.keys()) {
            if !initial.contains(name) {
                debug!(
                    variable = %name,
                    model_type = %self.model_type,
                    "Ignoring value supplied for a variable which is not part of the model"
                );
            }
        }

        let dataset = Dataset::initialize(self.time_dim.clone(), self.locations, initial)?;
        let pruned: Vec<String> = resolution
            .pruned()
            .map(|(name, _)| name.to_string())
            .collect();

        info!(
            model_type = %self.model_type,
            variables = resolution.order().len(),
            pruned = pruned.len(),
            locations = self.locations,
            "Built model"
        );

        let (order, graph) = resolution.into_parts();
        Ok(Model::new(
            self.model_type.clone(),
            order,
            graph,
            pruned,
            self.parameters.clone(),
            dataset,
            self.planned_timesteps,
        ))
    }
}
