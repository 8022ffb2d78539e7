//! A model consists of a set of variables which are computed together over discrete timesteps.
//!
//! The variables of a model are declared ahead of time as [`VariableDescriptor`](crate::variable::VariableDescriptor)s,
//! usually in the [`Registry`](crate::registry::Registry).
//! When a model is built the dependencies between the variables are resolved into a fixed
//! computation order and the supplied initial values become timestep 0.
//! Every call to [`Model::increment_timestep`] then appends one timestep to the model's
//! [`Dataset`](crate::dataset::Dataset).
//! Earlier timesteps are preserved as model output.
//!
//! Optional subsystems are switched on and off with boolean external parameters.
//! Disabled variables are either replaced by a constant fallback value or removed from the model.

mod builder;
mod runtime;

#[cfg(test)]
mod tests;

// Public re-exports
pub use builder::ModelBuilder;
pub use runtime::Model;
