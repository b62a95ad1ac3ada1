//! Coordinate reference system of the topography grid.

use crate::errors::{TephraError, TephraResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

/// Projection descriptor supplied alongside the topography grid.
///
/// ```toml
/// proj = "utm"
/// zone = 49
/// hemisphere = "S"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    /// Projection name, e.g. `utm`
    pub proj: String,
    /// Numeric zone. Accepted as either a string or an integer.
    #[serde(deserialize_with = "zone_from_string_or_integer")]
    pub zone: String,
    /// Hemisphere letter, `N` or `S`
    pub hemisphere: String,
}

impl Projection {
    pub fn new(
        proj: impl Into<String>,
        zone: impl Into<String>,
        hemisphere: impl Into<String>,
    ) -> Self {
        Self {
            proj: proj.into(),
            zone: zone.into(),
            hemisphere: hemisphere.into(),
        }
    }

    /// Read a projection descriptor from a TOML file.
    pub fn from_file(path: &Path) -> TephraResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| TephraError::io(path, e))?;
        toml::from_str(&content).map_err(|e| TephraError::Scenario {
            path: path.to_path_buf(),
            details: e.to_string(),
        })
    }

    /// Zone and hemisphere combined, e.g. `51S`.
    pub fn utm_zone(&self) -> String {
        format!("{}{}", self.zone, self.hemisphere)
    }

    /// Label written to `Coordinates` when the grid coordinates are projected.
    pub fn coordinate_label(&self) -> String {
        self.proj.to_uppercase()
    }
}

fn zone_from_string_or_integer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Zone {
        Integer(i64),
        Text(String),
    }

    Ok(match Zone::deserialize(deserializer)? {
        Zone::Integer(zone) => zone.to_string(),
        Zone::Text(zone) => zone,
    })
}
