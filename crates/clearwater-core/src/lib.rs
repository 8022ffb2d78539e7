pub mod dataset;
pub mod model;
pub mod parameters;
pub mod registry;
pub mod resolver;
pub mod variable;

pub mod errors;

pub use dataset::{Dataset, TimestepSlice, Value};
pub use errors::{ClearwaterError, ClearwaterResult};
pub use model::{Model, ModelBuilder};
pub use parameters::{ParameterSet, ParameterValue, Parameters};
pub use registry::{Registry, REGISTRY};
pub use variable::{Args, Process, ProcessInputs, Usage, VariableDescriptor};
