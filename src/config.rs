//! Planner configuration.
//!
//! Loaded from TOML; every field is optional:
//!
//! ```toml
//! catalog = "data/courses.csv"
//! max_credits = 18
//! equivalence_groups = [["MATH211", "MATH273"], ["CIS212", "COSC236"]]
//!
//! [prerequisite_overrides]
//! CIS350 = ["CIS212", "MATH211"]
//! CIS101 = []
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equivalence::{EquivalenceGroups, DEFAULT_GROUPS};
use crate::error::{ConfigError, ConfigResult};
use crate::prereq::PrerequisiteResolver;
use crate::scheduler::DEFAULT_MAX_CREDITS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PlannerConfig {
    /// Catalog file; the command line takes precedence.
    pub catalog: Option<PathBuf>,
    /// Per-term credit limit.
    pub max_credits: u32,
    /// Groups of interchangeable courses.
    pub equivalence_groups: Vec<Vec<String>>,
    /// Curated prerequisite lists, used verbatim instead of the catalog's.
    pub prerequisite_overrides: BTreeMap<String, Vec<String>>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            max_credits: DEFAULT_MAX_CREDITS,
            equivalence_groups: DEFAULT_GROUPS
                .iter()
                .map(|group| group.iter().map(|id| id.to_string()).collect())
                .collect(),
            prerequisite_overrides: BTreeMap::new(),
        }
    }
}

impl PlannerConfig {
    /// Parses a configuration document. `path` is only used in errors.
    pub fn from_toml_str(content: &str, path: impl AsRef<Path>) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            source,
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn equivalence_groups(&self) -> EquivalenceGroups {
        EquivalenceGroups::new(self.equivalence_groups.iter().cloned())
    }

    pub fn resolver(&self) -> PrerequisiteResolver {
        PrerequisiteResolver::new(self.prerequisite_overrides.clone())
    }
}

pub fn load_planner_config<P: AsRef<Path>>(path: P) -> ConfigResult<PlannerConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    let config = PlannerConfig::from_toml_str(&content, path)?;
    debug!(
        path = %path.display(),
        max_credits = config.max_credits,
        groups = config.equivalence_groups.len(),
        overrides = config.prerequisite_overrides.len(),
        "planner config loaded"
    );
    Ok(config)
}
