//! Declarative limit sets
//!
//! An [`RlimitConfig`] names the limits a process wants and applies them in
//! one pass, typically early in `main` or in a child after fork.

use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info};
use rlimit_core::{LimitPair, LimitRequest, ResourceCategory, Result, RlimitError};

use crate::accessor::ResourceLimitAccessor;

/// Resource limits to apply to the current process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RlimitConfig {
    /// Requested limits, applied in key order
    pub limits: BTreeMap<ResourceCategory, LimitRequest>,
}

impl RlimitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the request for `category`
    pub fn with(mut self, category: ResourceCategory, request: impl Into<LimitRequest>) -> Self {
        self.limits.insert(category, request.into());
        self
    }

    /// Parse a JSON object keyed by category name.
    ///
    /// Two keys naming the same category (`nofile` and `RLIMIT_NOFILE`) are
    /// rejected.
    ///
    /// ```json
    /// { "nofile": { "soft": 256, "hard": 1024 }, "core": { "soft": 0 } }
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, LimitRequest> = serde_json::from_str(json)
            .map_err(|e| RlimitError::InvalidConfig(format!("rlimit config: {}", e)))?;

        let mut limits = BTreeMap::new();
        for (name, request) in raw {
            let category = ResourceCategory::from_name(&name)?;
            if limits.insert(category, request).is_some() {
                return Err(RlimitError::InvalidConfig(format!(
                    "rlimit config: {} given more than once",
                    category
                )));
            }
        }
        Ok(Self { limits })
    }

    /// Load a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading rlimit config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serialize back to the JSON shape accepted by [`RlimitConfig::from_json_str`]
    pub fn to_json_string(&self) -> Result<String> {
        let raw: BTreeMap<&str, &LimitRequest> = self
            .limits
            .iter()
            .map(|(category, request)| (category.name(), request))
            .collect();
        serde_json::to_string_pretty(&raw)
            .map_err(|e| RlimitError::InvalidConfig(format!("rlimit config: {}", e)))
    }

    /// Check every fully specified request for `soft <= hard`.
    ///
    /// Partial requests can only be checked against live values, which
    /// happens when they are applied.
    pub fn validate(&self) -> Result<()> {
        for (category, request) in &self.limits {
            if let Some(limits) = request.as_pair()
                && !limits.is_ordered()
            {
                return Err(RlimitError::InvalidLimitPair {
                    category: *category,
                    limits,
                });
            }
        }
        Ok(())
    }

    /// Apply every request to the current process.
    ///
    /// Stops at the first failure; categories applied before it keep their
    /// new values.
    pub fn apply(
        &self,
        accessor: &ResourceLimitAccessor,
    ) -> Result<Vec<(ResourceCategory, LimitPair)>> {
        self.validate()?;

        let mut applied = Vec::with_capacity(self.limits.len());
        for (category, request) in &self.limits {
            let limits = accessor.update(*category, *request)?;
            applied.push((*category, limits));
        }

        info!("Applied {} resource limit(s)", applied.len());
        Ok(applied)
    }
}
