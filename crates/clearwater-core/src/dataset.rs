//! Labeled storage for the full time history of every model variable.
//!
//! Each variable is held as a two dimensional array indexed by `[location, timestep]`.
//! The location dimension is fixed when the dataset is initialised,
//! while the timestep dimension grows by one slice per committed model step.
//!
//! Slices are append-only.
//! Once a `(variable, timestep)` slice has been written it can no longer be modified
//! and timestep indices are always contiguous starting at 0.
//!
//! # Broadcasting
//!
//! Values are supplied as a [`Value`].
//! A [`Value::Scalar`] is broadcast to every location,
//! whereas a [`Value::Array`] must have exactly one entry per location.
//! Arrays of any other length are rejected with [`ClearwaterError::ShapeMismatch`]
//! rather than being reshaped.

use crate::errors::{ClearwaterError, ClearwaterResult};
use indexmap::IndexMap;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ShapeBuilder};
use serde::{Deserialize, Serialize};

/// A value supplied for a variable at a single timestep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A single value shared by every location
    Scalar(f64),
    /// One value per location
    Array(Array1<f64>),
}

impl Value {
    /// Expand the value to one entry per location.
    ///
    /// `variable` is only used to label a [`ClearwaterError::ShapeMismatch`].
    pub fn broadcast(self, variable: &str, locations: usize) -> ClearwaterResult<Array1<f64>> {
        match self {
            Value::Scalar(v) => Ok(Array1::from_elem(locations, v)),
            Value::Array(values) => {
                if values.len() != locations {
                    return Err(ClearwaterError::ShapeMismatch {
                        variable: variable.to_string(),
                        expected: locations,
                        got: values.len(),
                    });
                }
                Ok(values)
            }
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(value)
    }
}

impl From<Array1<f64>> for Value {
    fn from(value: Array1<f64>) -> Self {
        Value::Array(value)
    }
}

impl From<Vec<f64>> for Value {
    fn from(value: Vec<f64>) -> Self {
        Value::Array(Array1::from_vec(value))
    }
}

/// The values of a set of variables at one timestep
///
/// Used to stage a complete timestep before it is committed to a [`Dataset`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimestepSlice {
    values: IndexMap<String, Array1<f64>>,
}

impl TimestepSlice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Array1<f64>) {
        self.values.insert(name.into(), values);
    }

    pub fn get(&self, name: &str) -> Option<&Array1<f64>> {
        self.values.get(name)
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

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Array1<f64>)> {
        self.values.iter()
    }
}

/// Time history of all variables of a model instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Label of the growing time dimension (e.g. `nsm1_time_step`)
    time_dim: String,
    /// Number of modelled locations
    locations: usize,
    /// Variable name -> values with shape `[locations, timesteps]`
    variables: IndexMap<String, Array2<f64>>,
}

impl Dataset {
    /// Create a dataset whose timestep 0 is the given slice
    ///
    /// Every variable in `initial` becomes a variable of the dataset.
    /// No other variables can be added afterwards.
    pub fn initialize(
        time_dim: impl Into<String>,
        locations: usize,
        initial: TimestepSlice,
    ) -> ClearwaterResult<Self> {
        if locations == 0 {
            return Err(ClearwaterError::InvalidConfiguration(
                "a dataset requires at least one location".to_string(),
            ));
        }

        let mut variables = IndexMap::with_capacity(initial.len());
        for (name, values) in initial.values {
            check_locations(&name, &values, locations)?;
            // Column-major storage keeps appending a timestep cheap
            let mut series = Array2::zeros((locations, 0).f());
            push_column(&name, &mut series, values.view())?;
            variables.insert(name, series);
        }

        Ok(Self {
            time_dim: time_dim.into(),
            locations,
            variables,
        })
    }

    pub fn time_dim(&self) -> &str {
        &self.time_dim
    }

    pub fn locations(&self) -> usize {
        self.locations
    }

    /// Number of complete timesteps held for every variable
    pub fn timesteps(&self) -> usize {
        self.variables
            .values()
            .map(|series| series.ncols())
            .min()
            .unwrap_or(0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Variable names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(|name| name.as_str())
    }

    fn series(&self, name: &str) -> ClearwaterResult<&Array2<f64>> {
        self.variables
            .get(name)
            .ok_or_else(|| ClearwaterError::UnknownVariable(name.to_string()))
    }

    /// Append the next timestep of a single variable
    ///
    /// Only the slice directly after the most recent one can be written.
    pub fn write(
        &mut self,
        name: &str,
        timestep: usize,
        value: impl Into<Value>,
    ) -> ClearwaterResult<()> {
        let locations = self.locations;
        let series = self
            .variables
            .get_mut(name)
            .ok_or_else(|| ClearwaterError::UnknownVariable(name.to_string()))?;

        let expected = series.ncols();
        if timestep != expected {
            return Err(ClearwaterError::InvalidWrite {
                variable: name.to_string(),
                timestep,
                expected,
            });
        }

        let values = value.into().broadcast(name, locations)?;
        push_column(name, series, values.view())
    }

    /// Append a complete timestep
    ///
    /// The slice must provide a value for every variable in the dataset and nothing else.
    /// All checks are performed before anything is written,
    /// so a rejected slice leaves the dataset untouched.
    pub fn commit(&mut self, slice: TimestepSlice) -> ClearwaterResult<()> {
        if let Some(unknown) = slice.values.keys().find(|name| !self.contains(name)) {
            return Err(ClearwaterError::UnknownVariable(unknown.clone()));
        }

        let timestep = self.timesteps();
        for (name, series) in &self.variables {
            let values = slice.get(name).ok_or_else(|| {
                ClearwaterError::InvalidConfiguration(format!(
                    "timestep {timestep} is missing a value for '{name}'"
                ))
            })?;
            check_locations(name, values, self.locations)?;
            if series.ncols() != timestep {
                return Err(ClearwaterError::InvalidWrite {
                    variable: name.clone(),
                    timestep,
                    expected: series.ncols(),
                });
            }
        }

        let mut slice = slice;
        for (name, series) in self.variables.iter_mut() {
            if let Some(values) = slice.values.swap_remove(name) {
                push_column(name, series, values.view())?;
            }
        }
        Ok(())
    }

    /// Values of a variable at a given timestep
    pub fn read(&self, name: &str, timestep: usize) -> ClearwaterResult<ArrayView1<'_, f64>> {
        let series = self.series(name)?;
        if timestep >= series.ncols() {
            return Err(ClearwaterError::TimestepOutOfRange {
                variable: name.to_string(),
                timestep,
                available: series.ncols(),
            });
        }
        Ok(series.column(timestep))
    }

    /// Values of a variable at the most recent timestep
    pub fn latest(&self, name: &str) -> ClearwaterResult<ArrayView1<'_, f64>> {
        let series = self.series(name)?;
        match series.ncols() {
            0 => Err(ClearwaterError::TimestepOutOfRange {
                variable: name.to_string(),
                timestep: 0,
                available: 0,
            }),
            n => Ok(series.column(n - 1)),
        }
    }

    /// Full history of a variable with shape `[locations, timesteps]`
    pub fn history(&self, name: &str) -> ClearwaterResult<ArrayView2<'_, f64>> {
        self.series(name).map(|series| series.view())
    }

    /// All variables at a given timestep
    pub fn slice(&self, timestep: usize) -> ClearwaterResult<TimestepSlice> {
        let mut slice = TimestepSlice::new();
        for name in self.variables.keys() {
            slice.insert(name.clone(), self.read(name, timestep)?.to_owned());
        }
        Ok(slice)
    }
}

fn check_locations(name: &str, values: &Array1<f64>, locations: usize) -> ClearwaterResult<()> {
    if values.len() != locations {
        return Err(ClearwaterError::ShapeMismatch {
            variable: name.to_string(),
            expected: locations,
            got: values.len(),
        });
    }
    Ok(())
}

fn push_column(
    name: &str,
    series: &mut Array2<f64>,
    values: ArrayView1<'_, f64>,
) -> ClearwaterResult<()> {
    let expected = series.nrows();
    series
        .push_column(values)
        .map_err(|_| ClearwaterError::ShapeMismatch {
            variable: name.to_string(),
            expected,
            got: values.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn initial() -> TimestepSlice {
        let mut slice = TimestepSlice::new();
        slice.insert("CBOD", array![1.0, 2.0]);
        slice.insert("kbod_20", array![0.12, 0.12]);
        slice
    }

    #[test]
    fn initialize_creates_first_timestep() {
        let dataset = Dataset::initialize("nsm1_time_step", 2, initial()).unwrap();

        assert_eq!(dataset.time_dim(), "nsm1_time_step");
        assert_eq!(dataset.locations(), 2);
        assert_eq!(dataset.timesteps(), 1);
        assert_eq!(dataset.read("CBOD", 0).unwrap(), array![1.0, 2.0]);
        assert_eq!(
            dataset.names().collect::<Vec<_>>(),
            vec!["CBOD", "kbod_20"]
        );
    }

    #[test]
    fn initialize_requires_a_location() {
        let result = Dataset::initialize("t", 0, TimestepSlice::new());
        assert!(matches!(
            result,
            Err(ClearwaterError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn write_broadcasts_scalars() {
        let mut dataset = Dataset::initialize("t", 2, initial()).unwrap();
        dataset.write("kbod_20", 1, 0.5).unwrap();

        assert_eq!(dataset.read("kbod_20", 1).unwrap(), array![0.5, 0.5]);
        assert_eq!(dataset.latest("kbod_20").unwrap(), array![0.5, 0.5]);
        // CBOD has not been written yet so the dataset only has one complete timestep
        assert_eq!(dataset.timesteps(), 1);
    }

    #[test]
    fn write_rejects_wrong_shape() {
        let mut dataset = Dataset::initialize("t", 2, initial()).unwrap();
        let err = dataset
            .write("CBOD", 1, vec![1.0, 2.0, 3.0])
            .unwrap_err();

        assert_eq!(
            err,
            ClearwaterError::ShapeMismatch {
                variable: "CBOD".to_string(),
                expected: 2,
                got: 3
            }
        );
        assert_eq!(dataset.history("CBOD").unwrap().ncols(), 1);
    }

    #[test]
    fn written_slices_are_immutable() {
        let mut dataset = Dataset::initialize("t", 2, initial()).unwrap();
        let err = dataset.write("CBOD", 0, 5.0).unwrap_err();
        assert!(matches!(
            err,
            ClearwaterError::InvalidWrite {
                timestep: 0,
                expected: 1,
                ..
            }
        ));
        assert_eq!(dataset.read("CBOD", 0).unwrap(), array![1.0, 2.0]);
    }

    #[test]
    fn timesteps_must_be_contiguous() {
        let mut dataset = Dataset::initialize("t", 2, initial()).unwrap();
        let err = dataset.write("CBOD", 3, 5.0).unwrap_err();
        assert!(matches!(err, ClearwaterError::InvalidWrite { .. }));
    }

    #[test]
    fn read_out_of_range() {
        let dataset = Dataset::initialize("t", 2, initial()).unwrap();
        let err = dataset.read("CBOD", 1).unwrap_err();
        assert_eq!(
            err,
            ClearwaterError::TimestepOutOfRange {
                variable: "CBOD".to_string(),
                timestep: 1,
                available: 1
            }
        );
        assert!(matches!(
            dataset.read("missing", 0),
            Err(ClearwaterError::UnknownVariable(_))
        ));
    }

    #[test]
    fn commit_appends_every_variable() {
        let mut dataset = Dataset::initialize("t", 2, initial()).unwrap();
        let mut next = TimestepSlice::new();
        next.insert("kbod_20", array![0.12, 0.12]);
        next.insert("CBOD", array![0.9, 1.8]);
        dataset.commit(next).unwrap();

        assert_eq!(dataset.timesteps(), 2);
        let history = dataset.history("CBOD").unwrap();
        assert_eq!(history, array![[1.0, 0.9], [2.0, 1.8]]);
    }

    #[test]
    fn rejected_commit_leaves_dataset_untouched() {
        let mut dataset = Dataset::initialize("t", 2, initial()).unwrap();

        let mut incomplete = TimestepSlice::new();
        incomplete.insert("CBOD", array![0.9, 1.8]);
        assert!(dataset.commit(incomplete).is_err());

        let mut wrong_shape = TimestepSlice::new();
        wrong_shape.insert("CBOD", array![0.9, 1.8]);
        wrong_shape.insert("kbod_20", array![0.12]);
        assert!(matches!(
            dataset.commit(wrong_shape),
            Err(ClearwaterError::ShapeMismatch { .. })
        ));

        let mut unknown = initial();
        unknown.insert("DOX", array![8.0, 8.0]);
        assert!(matches!(
            dataset.commit(unknown),
            Err(ClearwaterError::UnknownVariable(_))
        ));

        assert_eq!(dataset.timesteps(), 1);
        assert_eq!(dataset.history("CBOD").unwrap().ncols(), 1);
        assert_eq!(dataset.history("kbod_20").unwrap().ncols(), 1);
    }

    #[test]
    fn slice_collects_all_variables() {
        let dataset = Dataset::initialize("t", 2, initial()).unwrap();
        let slice = dataset.slice(0).unwrap();
        assert_eq!(slice.len(), 2);
        assert_eq!(slice.get("CBOD").unwrap(), &array![1.0, 2.0]);
    }

    #[test]
    fn serialise_and_deserialise() {
        let mut dataset = Dataset::initialize("nsm1_time_step", 2, initial()).unwrap();
        dataset.write("CBOD", 1, 0.5).unwrap();
        dataset.write("kbod_20", 1, 0.12).unwrap();

        let serialised = serde_json::to_string(&dataset).unwrap();
        let restored: Dataset = serde_json::from_str(&serialised).unwrap();

        assert_eq!(restored.time_dim(), "nsm1_time_step");
        assert_eq!(restored.timesteps(), 2);
        assert_eq!(restored.read("CBOD", 1).unwrap(), array![0.5, 0.5]);
    }
}
