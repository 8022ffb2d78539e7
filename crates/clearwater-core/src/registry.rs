//! Registry of variable descriptors grouped by model type.
//!
//! Model types are identified by a string key such as `"nsm1"` or `"tsm"`.
//! Each model type owns an ordered set of uniquely named [`VariableDescriptor`]s.
//! Declaration order is preserved and used to break ties when ordering computations.
//!
//! # Lifecycle
//!
//! Variables of a model type are declared once per process.
//! Modules wrap their declarations in [`Registry::declare_once`],
//! which runs the declaration routine the first time it is requested and is a no-op afterwards.
//! Declaring directly with [`Registry::register`] twice fails with
//! [`ClearwaterError::DuplicateName`].
//!
//! After declaration the registry is read-only in practice and can be shared between threads.
//! The process-wide instance is [`REGISTRY`].
//!
//! ```rust
//! use clearwater_core::process;
//! use clearwater_core::registry::Registry;
//! use clearwater_core::variable::VariableDescriptor;
//!
//! let registry = Registry::new();
//! registry
//!     .declare_once("decay", |registry| {
//!         registry.register("decay", VariableDescriptor::new_static("k"))?;
//!         registry.register(
//!             "decay",
//!             VariableDescriptor::state("C", process!(|C, k, dt| C - k * C * dt)),
//!         )
//!     })
//!     .unwrap();
//!
//! assert_eq!(registry.get_all("decay").len(), 2);
//! ```

use crate::errors::{ClearwaterError, ClearwaterResult};
use crate::variable::VariableDescriptor;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::sync::{Arc, LazyLock, Mutex, PoisonError, RwLock};
use tracing::debug;

type Descriptors = IndexMap<String, Arc<VariableDescriptor>>;

/// Thread-safe collection of variable descriptors keyed by model type
#[derive(Debug, Default)]
pub struct Registry {
    models: RwLock<IndexMap<String, Descriptors>>,
    /// Model types whose declaration routine has completed successfully
    declared: Mutex<HashSet<String>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor to a model type
    ///
    /// # Errors
    ///
    /// [`ClearwaterError::DuplicateName`] if the model type already has a variable with the same name.
    pub fn register(&self, model_type: &str, descriptor: VariableDescriptor) -> ClearwaterResult<()> {
        let mut models = self.models.write().unwrap_or_else(PoisonError::into_inner);
        let descriptors = models.entry(model_type.to_string()).or_default();

        if descriptors.contains_key(descriptor.name()) {
            return Err(ClearwaterError::DuplicateName {
                model_type: model_type.to_string(),
                name: descriptor.name().to_string(),
            });
        }

        descriptors.insert(descriptor.name().to_string(), Arc::new(descriptor));
        Ok(())
    }

    /// Run `declare` the first time a model type is requested
    ///
    /// Declarations are serialised, so concurrent callers never register the same model twice.
    /// If `declare` fails, everything it registered is removed again
    /// and the next call will retry the declaration.
    pub fn declare_once<F>(&self, model_type: &str, declare: F) -> ClearwaterResult<()>
    where
        F: FnOnce(&Registry) -> ClearwaterResult<()>,
    {
        let mut declared = self.declared.lock().unwrap_or_else(PoisonError::into_inner);
        if declared.contains(model_type) {
            return Ok(());
        }

        match declare(self) {
            Ok(()) => {
                debug!(
                    model_type,
                    variables = self.get_all(model_type).len(),
                    "Declared model variables"
                );
                declared.insert(model_type.to_string());
                Ok(())
            }
            Err(err) => {
                self.models
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .shift_remove(model_type);
                Err(err)
            }
        }
    }

    /// Whether the declaration routine of a model type has completed
    pub fn is_declared(&self, model_type: &str) -> bool {
        self.declared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(model_type)
    }

    /// Every descriptor of a model type in declaration order
    ///
    /// Unknown model types have no descriptors.
    pub fn get_all(&self, model_type: &str) -> Vec<Arc<VariableDescriptor>> {
        let models = self.models.read().unwrap_or_else(PoisonError::into_inner);
        models
            .get(model_type)
            .map(|descriptors| descriptors.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn get(&self, model_type: &str, name: &str) -> Option<Arc<VariableDescriptor>> {
        let models = self.models.read().unwrap_or_else(PoisonError::into_inner);
        models
            .get(model_type)
            .and_then(|descriptors| descriptors.get(name))
            .cloned()
    }

    pub fn contains(&self, model_type: &str, name: &str) -> bool {
        self.get(model_type, name).is_some()
    }

    /// Registered model types in the order they were first used
    pub fn model_types(&self) -> Vec<String> {
        let models = self.models.read().unwrap_or_else(PoisonError::into_inner);
        models.keys().cloned().collect()
    }
}

/// Process-wide registry used by the bundled models
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process;
    use crate::variable::Usage;
    use std::cell::Cell;

    fn declare_decay(registry: &Registry) -> ClearwaterResult<()> {
        registry.register("decay", VariableDescriptor::new_static("k"))?;
        registry.register(
            "decay",
            VariableDescriptor::dynamic("loss", process!(|k, C| k * C)),
        )?;
        registry.register(
            "decay",
            VariableDescriptor::state("C", process!(|C, loss, dt| C - loss * dt)),
        )
    }

    #[test]
    fn register_preserves_declaration_order() {
        let registry = Registry::new();
        declare_decay(&registry).unwrap();

        let names: Vec<_> = registry
            .get_all("decay")
            .iter()
            .map(|descriptor| descriptor.name().to_string())
            .collect();
        assert_eq!(names, vec!["k", "loss", "C"]);
        assert_eq!(registry.get("decay", "C").unwrap().usage(), Usage::State);
        assert!(registry.contains("decay", "loss"));
        assert!(!registry.contains("other", "loss"));
        assert!(registry.get_all("other").is_empty());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let registry = Registry::new();
        registry
            .register("decay", VariableDescriptor::new_static("k"))
            .unwrap();
        let err = registry
            .register("decay", VariableDescriptor::new_static("k"))
            .unwrap_err();

        assert_eq!(
            err,
            ClearwaterError::DuplicateName {
                model_type: "decay".to_string(),
                name: "k".to_string()
            }
        );
        // The same name is fine in another model type
        registry
            .register("growth", VariableDescriptor::new_static("k"))
            .unwrap();
        assert_eq!(registry.model_types(), vec!["decay", "growth"]);
    }

    #[test]
    fn declare_once_runs_a_single_time() {
        let registry = Registry::new();
        let calls = Cell::new(0);

        for _ in 0..3 {
            registry
                .declare_once("decay", |registry| {
                    calls.set(calls.get() + 1);
                    declare_decay(registry)
                })
                .unwrap();
        }

        assert_eq!(calls.get(), 1);
        assert!(registry.is_declared("decay"));
        assert_eq!(registry.get_all("decay").len(), 3);
    }

    #[test]
    fn failed_declaration_is_rolled_back() {
        let registry = Registry::new();
        let err = registry
            .declare_once("decay", |registry| {
                registry.register("decay", VariableDescriptor::new_static("k"))?;
                registry.register("decay", VariableDescriptor::new_static("k"))
            })
            .unwrap_err();

        assert!(matches!(err, ClearwaterError::DuplicateName { .. }));
        assert!(!registry.is_declared("decay"));
        assert!(registry.get_all("decay").is_empty());

        registry.declare_once("decay", declare_decay).unwrap();
        assert_eq!(registry.get_all("decay").len(), 3);
    }

    #[test]
    fn registry_is_shared_between_threads() {
        let registry = Arc::new(Registry::new());
        registry.declare_once("decay", declare_decay).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.get_all("decay").len())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 3);
        }
    }
}
