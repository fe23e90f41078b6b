//! Shift policy configuration for the payroll engine.
//!
//! This module provides the validated [`Policy`] type, the
//! [`STANDARD_POLICY`] constant and a YAML loader for site-specific policies.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::PolicyLoader;
//!
//! let policies = PolicyLoader::load_dir("./config/policies").unwrap();
//! println!("Loaded {} policies", policies.len());
//! ```

mod loader;
mod policy;

pub use loader::PolicyLoader;
pub use policy::{
    DifferentialApplication, Policy, PolicySettings, STANDARD_POLICY, ShiftDifferentials,
};
