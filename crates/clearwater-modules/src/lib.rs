//! Process modules for the Clearwater engine
//!
//! Each module declares its variables in the registry under its own model type
//! and provides a thin wrapper that builds a [`clearwater_core::Model`] from a TOML-loadable configuration.
//!
//! - [`nsm1`]: nutrient budget
//! - [`tsm`]: water temperature

pub mod nsm1;
pub mod shared;
pub mod tsm;
