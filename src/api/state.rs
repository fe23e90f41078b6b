//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::config::{Policy, PolicyLoader, STANDARD_POLICY};
use crate::error::EngineResult;

/// Name under which [`STANDARD_POLICY`] is always available.
pub const STANDARD_POLICY_NAME: &str = "standard";

/// Shared application state.
///
/// Holds the named policies a request can select. A request that names no
/// policy is calculated under the default policy.
#[derive(Clone)]
pub struct AppState {
    policies: Arc<BTreeMap<String, Policy>>,
    default_policy: String,
}

impl AppState {
    /// Creates a state from named policies.
    ///
    /// [`STANDARD_POLICY`] is registered as `"standard"` unless the map
    /// already has an entry under that name, and is the default.
    pub fn new(mut policies: BTreeMap<String, Policy>) -> Self {
        policies
            .entry(STANDARD_POLICY_NAME.to_string())
            .or_insert(STANDARD_POLICY);
        Self {
            policies: Arc::new(policies),
            default_policy: STANDARD_POLICY_NAME.to_string(),
        }
    }

    /// Loads every policy file in `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> EngineResult<Self> {
        Ok(Self::new(PolicyLoader::load_dir(dir)?))
    }

    /// Makes `name` the policy used when a request names none.
    ///
    /// Returns `None` if no policy is registered under `name`.
    pub fn with_default_policy(mut self, name: &str) -> Option<Self> {
        if !self.policies.contains_key(name) {
            return None;
        }
        self.default_policy = name.to_string();
        Some(self)
    }

    /// Looks up a policy by name, or the default policy when `name` is `None`.
    pub fn policy(&self, name: Option<&str>) -> Option<&Policy> {
        self.policies.get(name.unwrap_or(&self.default_policy))
    }

    /// The names of all registered policies.
    pub fn policy_names(&self) -> impl Iterator<Item = &str> {
        self.policies.keys().map(String::as_str)
    }
}
