//! Policy loading functionality.
//!
//! This module provides the [`PolicyLoader`] type for loading shift policies
//! from YAML files. Loading is the only place policies touch the filesystem;
//! the calculators only ever see an already-validated [`Policy`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::policy::{Policy, PolicySettings};

/// Loads validated policies from YAML files.
///
/// # Directory Structure
///
/// A policy directory holds one file per named policy:
/// ```text
/// config/policies/
/// ├── standard.yaml       # loaded as "standard"
/// └── night_premium.yaml  # loaded as "night_premium"
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::PolicyLoader;
///
/// let policy = PolicyLoader::load("./config/policies/standard.yaml").unwrap();
/// println!("Round to {} minutes", policy.round_to_nearest_minutes());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyLoader;

impl PolicyLoader {
    /// Loads and validates a single policy file.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if the file cannot be read
    /// - [`EngineError::ConfigParseError`] if the file is not valid policy YAML
    /// - [`EngineError::InvalidPolicy`] if the settings fail validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Policy> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let policy = Self::parse(&content, &path_str)?;
        debug!(path = %path_str, "Loaded shift policy");
        Ok(policy)
    }

    /// Parses and validates a policy from YAML text.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::PolicyLoader;
    ///
    /// let yaml = r#"
    /// standard_hours_per_day: 8
    /// standard_hours_per_week: 40
    /// overtime_after_hours_per_day: 8
    /// overtime_after_hours_per_week: 40
    /// double_time_after_hours_per_day: 12
    /// minimum_shift_hours: 2
    /// break_deduction_after_hours: 4
    /// break_duration_minutes: 30
    /// round_to_nearest_minutes: 15
    /// "#;
    ///
    /// let policy = PolicyLoader::from_yaml_str(yaml).unwrap();
    /// assert_eq!(policy.break_duration_minutes(), 30);
    /// ```
    pub fn from_yaml_str(content: &str) -> EngineResult<Policy> {
        Self::parse(content, "<inline>")
    }

    /// Loads every `*.yaml` file in a directory, keyed by file stem.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] if the directory is missing or
    /// holds no policy files, and propagates any per-file error.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> EngineResult<BTreeMap<String, Policy>> {
        let dir = dir.as_ref();
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut policies = BTreeMap::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "yaml") {
                continue;
            }
            if let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) {
                policies.insert(name.to_string(), Self::load(&path)?);
            }
        }

        if policies.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no policy files found)", dir_str),
            });
        }

        Ok(policies)
    }

    fn parse(content: &str, source: &str) -> EngineResult<Policy> {
        let settings: PolicySettings =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;
        Policy::new(settings)
    }
}
