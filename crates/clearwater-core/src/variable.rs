//! Variable descriptors and process functions.
//!
//! Every physical quantity of a model is declared once as a [`VariableDescriptor`].
//! A descriptor carries display metadata, a [`Usage`] class and,
//! for non-static variables, the [`Process`] used to compute it.
//!
//! # Usage classes
//!
//! - [`Usage::Static`]: a constant input parameter. Supplied once when the model is built
//!   and carried forward unchanged every timestep.
//! - [`Usage::Dynamic`]: a derived quantity recomputed every timestep from other variables.
//! - [`Usage::State`]: an integrated quantity. Its process computes the value at the next
//!   timestep from the current dynamics and its own previous value.
//!
//! # Process inputs
//!
//! A process declares the names of its inputs explicitly.
//! These names are the contract used to infer dependencies:
//! each name must match a variable of the same model or an external parameter exactly.
//!
//! How an input is read depends on what it refers to:
//!
//! - a dynamic variable is read from the timestep currently being computed,
//!   so it must be evaluated first;
//! - a state variable (including the variable itself) is read at the previous timestep;
//! - static variables and external parameters are constant.
//!
//! The [`process!`](crate::process) macro builds an elementwise process where the input names
//! are the names of the closure bindings, so the two can never drift apart:
//!
//! ```rust
//! use clearwater_core::process;
//! use clearwater_core::variable::{Usage, VariableDescriptor};
//!
//! let cbod = VariableDescriptor::state(
//!     "CBOD",
//!     process!(|CBOD, dCBODdt, dt| CBOD + dCBODdt * dt),
//! )
//! .with_long_name("Carbonaceous Biochemical Oxygen Demand")
//! .with_units("mg-O2/L");
//!
//! assert_eq!(cbod.usage(), Usage::State);
//! assert_eq!(cbod.inputs(), &["CBOD", "dCBODdt", "dt"]);
//! ```

use crate::dataset::Value;
use crate::errors::{ClearwaterError, ClearwaterResult};
use ndarray::{Array1, ArrayView1, CowArray, Ix1};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// How a variable participates in a model run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Usage {
    /// Constant for the lifetime of a run
    Static,
    /// Recomputed every timestep
    Dynamic,
    /// Integrated forward in time from its previous value
    State,
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Usage::Static => write!(f, "static"),
            Usage::Dynamic => write!(f, "dynamic"),
            Usage::State => write!(f, "state"),
        }
    }
}

/// Input values of an elementwise process at a single location
///
/// Values are in the order the inputs were declared.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    values: &'a [f64],
}

impl<'a> Args<'a> {
    pub fn new(values: &'a [f64]) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &'a [f64] {
        self.values
    }

    /// Interpret the input at `index` as a boolean parameter
    pub fn flag(&self, index: usize) -> bool {
        self.values[index] != 0.0
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Index<usize> for Args<'_> {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

/// Input arrays of an array process
///
/// Every input has one value per location.
/// External parameters are broadcast to the location dimension.
#[derive(Debug)]
pub struct ProcessInputs<'a> {
    names: &'a [&'static str],
    values: Vec<CowArray<'a, f64, Ix1>>,
    locations: usize,
}

impl<'a> ProcessInputs<'a> {
    pub fn new(
        names: &'a [&'static str],
        values: Vec<CowArray<'a, f64, Ix1>>,
        locations: usize,
    ) -> Self {
        debug_assert_eq!(names.len(), values.len());
        Self {
            names,
            values,
            locations,
        }
    }

    pub fn locations(&self) -> usize {
        self.locations
    }

    /// Values of a named input
    pub fn get(&self, name: &str) -> ClearwaterResult<ArrayView1<'_, f64>> {
        self.names
            .iter()
            .position(|candidate| *candidate == name)
            .map(|index| self.values[index].view())
            .ok_or_else(|| ClearwaterError::UnknownVariable(name.to_string()))
    }

    /// Values of the input at a declared position
    pub fn at(&self, index: usize) -> ArrayView1<'_, f64> {
        self.values[index].view()
    }
}

/// Process evaluated independently at every location
pub type ElementwiseFn = fn(&Args<'_>) -> f64;

/// Process evaluated once per timestep across all locations
pub type ArrayFn = fn(&ProcessInputs<'_>) -> ClearwaterResult<Value>;

#[derive(Clone, Copy)]
enum ProcessKind {
    Elementwise(ElementwiseFn),
    Array(ArrayFn),
}

/// A pure function computing a variable from its named inputs
#[derive(Clone, Copy)]
pub struct Process {
    inputs: &'static [&'static str],
    kind: ProcessKind,
}

impl Process {
    /// A process applied at each location to the input values in declared order
    pub fn elementwise(inputs: &'static [&'static str], function: ElementwiseFn) -> Self {
        Self {
            inputs,
            kind: ProcessKind::Elementwise(function),
        }
    }

    /// A process applied to whole location arrays
    ///
    /// The function may return a [`Value::Scalar`], which is broadcast to every location.
    pub fn array(inputs: &'static [&'static str], function: ArrayFn) -> Self {
        Self {
            inputs,
            kind: ProcessKind::Array(function),
        }
    }

    pub fn inputs(&self) -> &'static [&'static str] {
        self.inputs
    }

    /// Evaluate the process
    ///
    /// Non-finite results are not checked here, the caller decides how to report them.
    pub fn evaluate(&self, inputs: &ProcessInputs<'_>) -> ClearwaterResult<Value> {
        match self.kind {
            ProcessKind::Elementwise(function) => {
                let mut row = Vec::with_capacity(self.inputs.len());
                let values = Array1::from_shape_fn(inputs.locations(), |location| {
                    row.clear();
                    row.extend(inputs.values.iter().map(|input| input[location]));
                    function(&Args::new(&row))
                });
                Ok(Value::Array(values))
            }
            ProcessKind::Array(function) => function(inputs),
        }
    }
}

impl fmt::Debug for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ProcessKind::Elementwise(_) => "elementwise",
            ProcessKind::Array(_) => "array",
        };
        f.debug_struct("Process")
            .field("inputs", &self.inputs)
            .field("kind", &kind)
            .finish()
    }
}

/// Immutable description of a model variable
#[derive(Debug, Clone)]
pub struct VariableDescriptor {
    name: String,
    long_name: String,
    units: String,
    description: String,
    usage: Usage,
    process: Option<Process>,
    toggle: Option<String>,
    fallback: Option<f64>,
}

impl VariableDescriptor {
    fn new(name: impl Into<String>, usage: Usage, process: Option<Process>) -> Self {
        Self {
            name: name.into(),
            long_name: String::new(),
            units: String::new(),
            description: String::new(),
            usage,
            process,
            toggle: None,
            fallback: None,
        }
    }

    /// A constant input parameter
    pub fn new_static(name: impl Into<String>) -> Self {
        Self::new(name, Usage::Static, None)
    }

    /// A quantity derived from other variables every timestep
    pub fn dynamic(name: impl Into<String>, process: Process) -> Self {
        Self::new(name, Usage::Dynamic, Some(process))
    }

    /// An integrated quantity
    ///
    /// The process computes the value at the next timestep.
    pub fn state(name: impl Into<String>, process: Process) -> Self {
        Self::new(name, Usage::State, Some(process))
    }

    pub fn with_long_name(mut self, long_name: impl Into<String>) -> Self {
        self.long_name = long_name.into();
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Only include the variable when the boolean parameter `toggle` is true
    pub fn enabled_by(mut self, toggle: impl Into<String>) -> Self {
        self.toggle = Some(toggle.into());
        self
    }

    /// Constant used in place of the variable while its toggle is disabled
    ///
    /// Without a fallback a disabled variable is removed from the model entirely
    /// and any variable reading it fails to build.
    pub fn with_fallback(mut self, value: f64) -> Self {
        self.fallback = Some(value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn usage(&self) -> Usage {
        self.usage
    }

    pub fn process(&self) -> Option<&Process> {
        self.process.as_ref()
    }

    /// Names read by the process, empty for static variables
    pub fn inputs(&self) -> &'static [&'static str] {
        self.process.map(|process| process.inputs()).unwrap_or(&[])
    }

    pub fn toggle(&self) -> Option<&str> {
        self.toggle.as_deref()
    }

    pub fn fallback(&self) -> Option<f64> {
        self.fallback
    }
}

/// Build an elementwise [`Process`] from a closure-like expression.
///
/// The binding names are used as the input names of the process and
/// are bound to the input values at the current location.
/// Boolean parameters arrive as `1.0` or `0.0`.
///
/// ```rust
/// use clearwater_core::process;
///
/// let process = process!(|TwaterC, kbod_20, kbod_theta| kbod_20 * kbod_theta.powf(TwaterC - 20.0));
/// assert_eq!(process.inputs(), &["TwaterC", "kbod_20", "kbod_theta"]);
/// ```
#[macro_export]
macro_rules! process {
    (|$($input:ident),* $(,)?| $body:expr) => {
        $crate::variable::Process::elementwise(
            &[$(stringify!($input)),*],
            |args: &$crate::variable::Args<'_>| -> f64 {
                #[allow(non_snake_case, unused_variables)]
                let &[$($input),*] = args.values() else {
                    return f64::NAN;
                };
                $body
            },
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sum_process(inputs: &ProcessInputs<'_>) -> ClearwaterResult<Value> {
        Ok(Value::Scalar(inputs.get("a")?.sum() + inputs.get("b")?.sum()))
    }

    #[test]
    fn elementwise_process_evaluates_each_location() {
        let process = crate::process!(|a, b| a * b + 1.0);
        let a = array![1.0, 2.0, 3.0];
        let inputs = ProcessInputs::new(
            process.inputs(),
            vec![CowArray::from(a.view()), CowArray::from(array![2.0, 2.0, 2.0])],
            3,
        );

        let result = process.evaluate(&inputs).unwrap();
        assert_eq!(result, Value::Array(array![3.0, 5.0, 7.0]));
    }

    #[test]
    fn array_process_can_return_scalars() {
        let process = Process::array(&["a", "b"], sum_process);
        let inputs = ProcessInputs::new(
            process.inputs(),
            vec![
                CowArray::from(array![1.0, 2.0]),
                CowArray::from(array![3.0, 4.0]),
            ],
            2,
        );

        assert_eq!(process.evaluate(&inputs).unwrap(), Value::Scalar(10.0));
        assert!(matches!(
            inputs.get("c"),
            Err(ClearwaterError::UnknownVariable(_))
        ));
    }

    #[test]
    fn descriptor_metadata() {
        let descriptor = VariableDescriptor::dynamic(
            "kbod_tc",
            crate::process!(|TwaterC, kbod_20, kbod_theta| kbod_20
                * kbod_theta.powf(TwaterC - 20.0)),
        )
        .with_long_name("CBOD decay rate")
        .with_units("1/d")
        .with_description("Temperature corrected CBOD decay rate")
        .enabled_by("use_CBOD")
        .with_fallback(0.0);

        assert_eq!(descriptor.name(), "kbod_tc");
        assert_eq!(descriptor.usage(), Usage::Dynamic);
        assert_eq!(descriptor.units(), "1/d");
        assert_eq!(descriptor.long_name(), "CBOD decay rate");
        assert_eq!(descriptor.toggle(), Some("use_CBOD"));
        assert_eq!(descriptor.fallback(), Some(0.0));
        assert_eq!(descriptor.inputs(), &["TwaterC", "kbod_20", "kbod_theta"]);
    }

    #[test]
    fn static_descriptors_have_no_inputs() {
        let descriptor = VariableDescriptor::new_static("kbod_20");
        assert_eq!(descriptor.usage(), Usage::Static);
        assert!(descriptor.process().is_none());
        assert!(descriptor.inputs().is_empty());
    }

    #[test]
    fn args_flags() {
        let values = [1.0, 0.0, 3.5];
        let args = Args::new(&values);
        assert!(args.flag(0));
        assert!(!args.flag(1));
        assert_eq!(args[2], 3.5);
        assert_eq!(args.len(), 3);
    }
}
