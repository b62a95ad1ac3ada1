//! Loading scenario parameter files.
//!
//! Scenario files are flat TOML tables mapping parameter names to values:
//!
//! ```toml
//! scenario_name = "merapi"
//! Meteorological_model = "profile"
//! mass_eruption_rate = 1.0e6
//! eruption_start = 1
//! ```

use crate::errors::{TephraError, TephraResult};
use crate::parameters::ParameterSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a scenario file into a fresh Parameter Set.
pub fn load_parameter_file(path: &Path) -> TephraResult<ParameterSet> {
    let content = fs::read_to_string(path).map_err(|e| TephraError::io(path, e))?;
    toml::from_str(&content).map_err(|e| TephraError::Scenario {
        path: path.to_path_buf(),
        details: e.to_string(),
    })
}

/// Provides the meteorological domain description of a scenario.
///
/// Only consulted for gridded (`ncep`) meteorology.
pub trait MeteorologicalDomainSource {
    fn meteorological_domain(&self, scenario_name: &str) -> TephraResult<ParameterSet>;
}

/// Scenario files stored together in one directory.
///
/// The meteorological domain of scenario `name` lives in
/// `<dir>/<name>_meteorological_domain.toml`.
#[derive(Debug, Clone)]
pub struct ScenarioDirectory {
    root: PathBuf,
}

impl ScenarioDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn meteorological_domain_path(&self, scenario_name: &str) -> PathBuf {
        self.root
            .join(format!("{scenario_name}_meteorological_domain.toml"))
    }
}

impl MeteorologicalDomainSource for ScenarioDirectory {
    fn meteorological_domain(&self, scenario_name: &str) -> TephraResult<ParameterSet> {
        load_parameter_file(&self.meteorological_domain_path(scenario_name))
    }
}

impl MeteorologicalDomainSource for ParameterSet {
    fn meteorological_domain(&self, _scenario_name: &str) -> TephraResult<ParameterSet> {
        Ok(self.clone())
    }
}
