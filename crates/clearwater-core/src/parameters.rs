//! External parameter namespace of a model.
//!
//! Parameters are scalar inputs which are not modelled as variables,
//! such as the timestep length, water depth or meteorological forcings.
//! Boolean parameters named `use_<Subsystem>` double as feature toggles
//! which enable or disable the variables of optional subsystems.
//!
//! Configuration structs expose their values through [`ParameterSet`],
//! usually implemented with the [`parameter_set!`](crate::parameter_set) macro.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single external parameter value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParameterValue {
    Float(f64),
    Flag(bool),
}

impl ParameterValue {
    /// Numeric view of the value as seen by process functions
    ///
    /// Flags are presented as `1.0` (true) or `0.0` (false).
    pub fn as_f64(&self) -> f64 {
        match self {
            ParameterValue::Float(v) => *v,
            ParameterValue::Flag(true) => 1.0,
            ParameterValue::Flag(false) => 0.0,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ParameterValue::Flag(v) => Some(*v),
            ParameterValue::Float(_) => None,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Float(v) => write!(f, "{v}"),
            ParameterValue::Flag(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Float(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Flag(value)
    }
}

/// A group of named values supplied to a model at construction
pub trait ParameterSet {
    /// The values keyed by the exact name used in process function inputs
    fn parameter_values(&self) -> Vec<(&'static str, ParameterValue)>;
}

/// Ordered collection of external parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    values: IndexMap<String, ParameterValue>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParameterValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Insert every value of a parameter set, replacing existing entries
    pub fn extend_from(&mut self, set: &impl ParameterSet) {
        for (name, value) in set.parameter_values() {
            self.insert(name, value);
        }
    }

    /// Insert every entry of another namespace, replacing existing entries
    pub fn merge(&mut self, other: &Parameters) {
        for (name, value) in other.iter() {
            self.insert(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<ParameterValue> {
        self.values.get(name).copied()
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(|value| value.as_flag())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ParameterValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// Implement [`ParameterSet`] for a configuration struct.
///
/// Each struct field is mapped to the name used by process functions.
/// Fields must be `f64` or `bool`.
///
/// ```rust
/// use clearwater_core::parameter_set;
/// use clearwater_core::parameters::ParameterSet;
///
/// struct CbodParameters {
///     ks_ox_bod: f64,
///     kbod_20: f64,
/// }
///
/// parameter_set!(CbodParameters {
///     ks_ox_bod => "KsOxbod",
///     kbod_20 => "kbod_20",
/// });
///
/// let values = CbodParameters { ks_ox_bod: 0.5, kbod_20: 0.12 }.parameter_values();
/// assert_eq!(values[0].0, "KsOxbod");
/// ```
#[macro_export]
macro_rules! parameter_set {
    ($ty:ty { $($field:ident => $name:literal),* $(,)? }) => {
        impl $crate::parameters::ParameterSet for $ty {
            fn parameter_values(
                &self,
            ) -> Vec<(&'static str, $crate::parameters::ParameterValue)> {
                vec![
                    $(($name, $crate::parameters::ParameterValue::from(self.$field))),*
                ]
            }
        }
    };
}
