//! Model struct and runtime execution.

use crate::dataset::{Dataset, TimestepSlice};
use crate::errors::{ClearwaterError, ClearwaterResult};
use crate::parameters::Parameters;
use crate::resolver::{DependencyGraph, InputRef, ResolvedVariable};
use crate::variable::{ProcessInputs, Usage, VariableDescriptor};
use ndarray::{Array1, ArrayView1, ArrayView2, CowArray, Ix1};
use petgraph::dot::{Config, Dot};
use std::sync::Arc;
use tracing::trace;

/// A set of variables which are integrated together over discrete timesteps.
///
/// Every timestep is computed from the previous one.
/// Static variables are carried forward unchanged,
/// dynamic variables are evaluated in dependency order from the current dynamics
/// and the previous states, and finally each state variable computes its next value.
///
/// A timestep is committed to the [`Dataset`] only once every variable has been computed.
/// If any variable fails, the model is left at the last successful timestep.
#[derive(Debug)]
pub struct Model {
    model_type: String,
    /// Participating variables in computation order
    order: Vec<ResolvedVariable>,
    /// Same-timestep dependencies between the variables
    graph: DependencyGraph,
    /// Variables disabled by a toggle without a fallback
    pruned: Vec<String>,
    parameters: Parameters,
    dataset: Dataset,
    planned_timesteps: usize,
}

impl Model {
    pub(crate) fn new(
        model_type: String,
        order: Vec<ResolvedVariable>,
        graph: DependencyGraph,
        pruned: Vec<String>,
        parameters: Parameters,
        dataset: Dataset,
        planned_timesteps: usize,
    ) -> Self {
        Self {
            model_type,
            order,
            graph,
            pruned,
            parameters,
            dataset,
            planned_timesteps,
        }
    }

    pub fn model_type(&self) -> &str {
        &self.model_type
    }

    /// Names of the participating variables in the order they are computed
    pub fn computation_order(&self) -> Vec<&str> {
        self.order.iter().map(|variable| variable.name()).collect()
    }

    /// Index of the most recent timestep
    pub fn current_timestep(&self) -> usize {
        self.dataset.timesteps().saturating_sub(1)
    }

    pub fn planned_timesteps(&self) -> usize {
        self.planned_timesteps
    }

    /// Compute and commit the next timestep
    ///
    /// # Errors
    ///
    /// [`ClearwaterError::NumericEvaluation`] if a process fails or produces a non-finite value and
    /// [`ClearwaterError::ShapeMismatch`] if a process returns the wrong number of locations.
    /// Nothing is committed when an error is returned.
    pub fn increment_timestep(&mut self) -> ClearwaterResult<()> {
        let timestep = self.dataset.timesteps();
        let mut pending = TimestepSlice::new();

        for variable in &self.order {
            let values = match variable.usage() {
                Usage::Static => self.dataset.latest(variable.name())?.to_owned(),
                Usage::Dynamic | Usage::State => self.evaluate(variable, &pending, timestep)?,
            };
            pending.insert(variable.name(), values);
        }

        self.dataset.commit(pending)?;
        trace!(
            model_type = %self.model_type,
            timestep,
            "Committed timestep"
        );
        Ok(())
    }

    fn evaluate(
        &self,
        variable: &ResolvedVariable,
        pending: &TimestepSlice,
        timestep: usize,
    ) -> ClearwaterResult<Array1<f64>> {
        let name = variable.name();
        let locations = self.dataset.locations();
        let process = variable.descriptor().process().ok_or_else(|| {
            ClearwaterError::InvalidConfiguration(format!("variable '{name}' has no process"))
        })?;

        let mut values: Vec<CowArray<'_, f64, Ix1>> = Vec::with_capacity(variable.inputs().len());
        for input in variable.inputs() {
            let value = match input {
                InputRef::Current(input) => pending
                    .get(input)
                    .map(|values| CowArray::from(values.view()))
                    .ok_or_else(|| ClearwaterError::UnknownVariable(input.clone()))?,
                InputRef::Previous(input) => CowArray::from(self.dataset.latest(input)?),
                InputRef::External { value, .. } => {
                    CowArray::from(Array1::from_elem(locations, *value))
                }
            };
            values.push(value);
        }

        let inputs = ProcessInputs::new(process.inputs(), values, locations);
        let result = process
            .evaluate(&inputs)
            .map_err(|err| match err {
                ClearwaterError::ShapeMismatch { .. } => err,
                err => ClearwaterError::NumericEvaluation {
                    variable: name.to_string(),
                    timestep,
                    details: err.to_string(),
                },
            })?
            .broadcast(name, locations)?;

        if let Some((location, value)) = result
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(ClearwaterError::NumericEvaluation {
                variable: name.to_string(),
                timestep,
                details: format!("non-finite value {value} at location {location}"),
            });
        }
        Ok(result)
    }

    /// Steps the model until the planned number of timesteps has been taken.
    pub fn run(&mut self) -> ClearwaterResult<()> {
        while !self.finished() {
            self.increment_timestep()?;
        }
        Ok(())
    }

    /// Returns true once the planned number of timesteps has been taken.
    pub fn finished(&self) -> bool {
        self.current_timestep() >= self.planned_timesteps
    }

    /// The complete time history of the model
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    pub fn read(&self, name: &str, timestep: usize) -> ClearwaterResult<ArrayView1<'_, f64>> {
        self.dataset.read(name, timestep)
    }

    pub fn latest(&self, name: &str) -> ClearwaterResult<ArrayView1<'_, f64>> {
        self.dataset.latest(name)
    }

    pub fn history(&self, name: &str) -> ClearwaterResult<ArrayView2<'_, f64>> {
        self.dataset.history(name)
    }

    fn resolved(&self, name: &str) -> Option<&ResolvedVariable> {
        self.order.iter().find(|variable| variable.name() == name)
    }

    /// Whether a variable is enabled in this model
    ///
    /// Variables replaced by their fallback value and pruned variables are not active.
    pub fn is_active(&self, name: &str) -> bool {
        self.resolved(name).is_some_and(|variable| variable.is_active())
    }

    /// Names of the variables removed by a disabled toggle
    pub fn pruned(&self) -> &[String] {
        &self.pruned
    }

    /// Descriptor of a participating variable
    pub fn descriptor(&self, name: &str) -> Option<&Arc<VariableDescriptor>> {
        self.resolved(name).map(|variable| variable.descriptor())
    }

    /// Usage of a participating variable within this model
    pub fn usage(&self, name: &str) -> Option<Usage> {
        self.resolved(name).map(|variable| variable.usage())
    }

    /// External parameters the model was built with
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Create a diagram of the same-timestep dependencies between variables.
    ///
    /// Useful for debugging.
    pub fn as_dot(&self) -> Dot<'_, &DependencyGraph> {
        Dot::with_attr_getters(
            &self.graph,
            &[Config::EdgeNoLabel],
            &|_, edge| format!("label = {:?}", edge.weight()),
            &|_, _| String::new(),
        )
    }
}
