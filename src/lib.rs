//! Water-quality models built from a registry of variables
//!
//! Re-exports the engine from `clearwater-core` and the process modules from `clearwater-modules`.
//!
//! ```rust
//! use clearwater::nsm1::{Nsm1Config, NutrientBudget, DEFAULT_INITIAL_STATE};
//!
//! let config = Nsm1Config::from_toml_str("[cbod]\nkbod_20 = 0.2").unwrap();
//! let mut budget = NutrientBudget::new(&config, DEFAULT_INITIAL_STATE, 1).unwrap();
//! budget.run().unwrap();
//! assert!(budget.latest("CBOD").unwrap()[0] < 1.0);
//! ```

pub use clearwater_core::*;
pub use clearwater_modules::{nsm1, shared, tsm};
