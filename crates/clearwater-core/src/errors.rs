use thiserror::Error;

/// Error type for declaring, building and stepping models.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClearwaterError {
    #[error("Variable '{name}' is already registered for model type '{model_type}'")]
    DuplicateName { model_type: String, name: String },

    #[error("Variable '{variable}' requires '{input}', which is neither a variable nor a parameter of the model")]
    UnresolvedDependency { variable: String, input: String },

    #[error("Variable '{variable}' requires '{input}', which is disabled by toggle '{toggle}' and has no fallback value")]
    InactiveDependency {
        variable: String,
        input: String,
        toggle: String,
    },

    #[error("Cyclic dependency between variables: {}", .variables.join(", "))]
    CyclicDependency { variables: Vec<String> },

    #[error("Variable '{variable}' is enabled by '{toggle}', but no boolean parameter with that name was supplied")]
    UnknownToggle { variable: String, toggle: String },

    #[error("No initial value supplied for state variable '{0}'")]
    MissingInitialValue(String),

    #[error("No value supplied for static variable '{0}'")]
    MissingStaticValue(String),

    #[error("Evaluation of '{variable}' failed at timestep {timestep}: {details}")]
    NumericEvaluation {
        variable: String,
        timestep: usize,
        details: String,
    },

    #[error("Value for '{variable}' has {got} locations, expected {expected}")]
    ShapeMismatch {
        variable: String,
        expected: usize,
        got: usize,
    },

    #[error("Timestep {timestep} of '{variable}' does not exist ({available} timesteps stored)")]
    TimestepOutOfRange {
        variable: String,
        timestep: usize,
        available: usize,
    },

    #[error("Cannot write '{variable}' at timestep {timestep}: the next writable timestep is {expected}")]
    InvalidWrite {
        variable: String,
        timestep: usize,
        expected: usize,
    },

    #[error("Unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Convenience type for `Result<T, ClearwaterError>`.
pub type ClearwaterResult<T> = Result<T, ClearwaterError>;
