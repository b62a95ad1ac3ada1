//! The Parameter Set shared by the derivation steps and the range checker.
//!
//! A scenario is described by a flat mapping from parameter name to value.
//! Names follow the Fall3d input conventions (for example `X_coordinate_minimum`)
//! because the completed set is handed to the simulation engine verbatim.
//!
//! Values are kept typed ([`ParameterValue`]) for the whole run.
//! They are only turned into text at the boundary to the engine,
//! see [`ParameterSet::engine_values`].

use crate::errors::{TephraError, TephraResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Names of the parameters read or written by this crate.
pub mod keys {
    // Supplied by the scenario
    pub const SCENARIO_NAME: &str = "scenario_name";
    pub const METEOROLOGICAL_MODEL: &str = "Meteorological_model";
    pub const WIND_PROFILE: &str = "wind_profile";
    pub const MASS_ERUPTION_RATE: &str = "mass_eruption_rate";
    pub const MASS_ERUPTION_RATE_LEGACY: &str = "Mass_eruption_rate";
    pub const X_COORDINATE_OF_VENT: &str = "x_coordinate_of_vent";
    pub const Y_COORDINATE_OF_VENT: &str = "y_coordinate_of_vent";
    pub const ERUPTION_START: &str = "eruption_start";
    pub const ERUPTION_DURATION: &str = "eruption_duration";
    pub const POST_ERUPTIVE_SETTLING_DURATION: &str = "post_eruptive_settling_duration";

    // Spatial
    pub const NUMBER_CELLS_X: &str = "Number_cells_X_direction";
    pub const NUMBER_CELLS_Y: &str = "Number_cells_Y_direction";
    pub const X_COORDINATE_MINIMUM: &str = "X_coordinate_minimum";
    pub const Y_COORDINATE_MINIMUM: &str = "Y_coordinate_minimum";
    pub const X_COORDINATE_MAXIMUM: &str = "X_coordinate_maximum";
    pub const Y_COORDINATE_MAXIMUM: &str = "Y_coordinate_maximum";
    pub const CELL_SIZE: &str = "Cell_size";
    pub const COORDINATES: &str = "Coordinates";
    pub const UTMZONE: &str = "UTMZONE";
    pub const LONGITUDE_MINIMUM: &str = "Longitude_minimum";
    pub const LONGITUDE_MAXIMUM: &str = "Longitude_maximum";
    pub const LATITUDE_MINIMUM: &str = "Latitude_minimum";
    pub const LATITUDE_MAXIMUM: &str = "Latitude_maximum";
    pub const LONGITUDE_OF_VENT: &str = "Longitude_of_vent";
    pub const LATITUDE_OF_VENT: &str = "Latitude_of_vent";

    // Temporal
    pub const ERUPTION_YEAR: &str = "Eruption_Year";
    pub const ERUPTION_MONTH: &str = "Eruption_Month";
    pub const ERUPTION_DAY: &str = "Eruption_Day";
    pub const START_TIME_OF_METEO_DATA: &str = "Start_time_of_meteo_data";
    pub const END_TIME_OF_METEO_DATA: &str = "End_time_of_meteo_data";
    pub const METEO_TIME_STEP: &str = "Meteo_time_step";
    pub const START_TIME_OF_ERUPTION: &str = "Start_time_of_eruption";
    pub const END_TIME_OF_ERUPTION: &str = "End_time_of_eruption";
    pub const END_TIME_OF_RUN: &str = "End_time_of_run";
}

/// A single parameter value.
///
/// Deserialization is untagged so scenario files and Python dicts map onto it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<f64>),
}

impl ParameterValue {
    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterValue::Integer(v) => Some(*v as f64),
            ParameterValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Render the value the way the simulation engine reads it.
    ///
    /// Lists are written as space separated numbers.
    pub fn engine_value(&self) -> String {
        match self {
            ParameterValue::Integer(v) => v.to_string(),
            ParameterValue::Float(v) => v.to_string(),
            ParameterValue::Text(v) => v.clone(),
            ParameterValue::List(values) => values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Text(v) => write!(f, "\"{v}\""),
            ParameterValue::List(values) => write!(f, "{values:?}"),
            other => write!(f, "{}", other.engine_value()),
        }
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        ParameterValue::Integer(value as i64)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Float(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Text(value)
    }
}

impl From<Vec<f64>> for ParameterValue {
    fn from(value: Vec<f64>) -> Self {
        ParameterValue::List(value)
    }
}

/// The three accepted forms of the mass eruption rate.
#[derive(Debug, Clone, PartialEq)]
pub enum MassEruptionRate {
    /// A single rate in kg/s
    Rate(f64),
    /// One rate per eruption phase
    Series(Vec<f64>),
    /// Let the engine estimate the rate from the column height
    Estimate,
}

impl MassEruptionRate {
    pub const ESTIMATE_TOKEN: &'static str = "estimate";

    /// Interpret a raw parameter value.
    ///
    /// Text that parses as a number is treated as a number.
    /// The sign of the rate is not checked here.
    pub fn from_value(value: &ParameterValue) -> TephraResult<Self> {
        match value {
            ParameterValue::Integer(rate) => Ok(MassEruptionRate::Rate(*rate as f64)),
            ParameterValue::Float(rate) => Ok(MassEruptionRate::Rate(*rate)),
            ParameterValue::Text(text) => {
                let trimmed = text.trim();
                if let Ok(rate) = trimmed.parse::<f64>() {
                    Ok(MassEruptionRate::Rate(rate))
                } else if trimmed.eq_ignore_ascii_case(Self::ESTIMATE_TOKEN) {
                    Ok(MassEruptionRate::Estimate)
                } else {
                    Err(TephraError::InvalidMassEruptionRate(value.to_string()))
                }
            }
            ParameterValue::List(values) if !values.is_empty() => {
                Ok(MassEruptionRate::Series(values.clone()))
            }
            ParameterValue::List(_) => Err(TephraError::InvalidMassEruptionRate(value.to_string())),
        }
    }
}

/// Mutable mapping from parameter name to value for a single scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, ParameterValue>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParameterValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<ParameterValue> {
        self.values.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParameterValue)> {
        self.values.iter()
    }

    fn require(&self, name: &str) -> TephraResult<&ParameterValue> {
        self.values
            .get(name)
            .ok_or_else(|| TephraError::MissingParameter(name.to_string()))
    }

    /// Get a numeric parameter. Integers are widened.
    pub fn float(&self, name: &str) -> TephraResult<f64> {
        let value = self.require(name)?;
        value
            .as_f64()
            .ok_or_else(|| TephraError::InvalidParameterType {
                name: name.to_string(),
                expected: "a number".to_string(),
                found: value.to_string(),
            })
    }

    pub fn integer(&self, name: &str) -> TephraResult<i64> {
        match self.require(name)? {
            ParameterValue::Integer(v) => Ok(*v),
            other => Err(TephraError::InvalidParameterType {
                name: name.to_string(),
                expected: "an integer".to_string(),
                found: other.to_string(),
            }),
        }
    }

    pub fn text(&self, name: &str) -> TephraResult<&str> {
        match self.require(name)? {
            ParameterValue::Text(v) => Ok(v),
            other => Err(TephraError::InvalidParameterType {
                name: name.to_string(),
                expected: "text".to_string(),
                found: other.to_string(),
            }),
        }
    }

    /// Name under which the mass eruption rate was supplied.
    ///
    /// `mass_eruption_rate` takes precedence over the capitalised legacy name.
    pub fn mass_eruption_rate_key(&self) -> TephraResult<&'static str> {
        [keys::MASS_ERUPTION_RATE, keys::MASS_ERUPTION_RATE_LEGACY]
            .into_iter()
            .find(|key| self.contains(key))
            .ok_or_else(|| TephraError::MissingParameter(keys::MASS_ERUPTION_RATE.to_string()))
    }

    pub fn mass_eruption_rate(&self) -> TephraResult<MassEruptionRate> {
        let key = self.mass_eruption_rate_key()?;
        MassEruptionRate::from_value(self.require(key)?)
    }

    /// Copy every entry of `other` whose name satisfies `predicate`.
    pub fn extend_matching<F>(&mut self, other: &ParameterSet, predicate: F) -> usize
    where
        F: Fn(&str) -> bool,
    {
        let mut copied = 0;
        for (name, value) in other.iter().filter(|(name, _)| predicate(name)) {
            self.values.insert(name.clone(), value.clone());
            copied += 1;
        }
        copied
    }

    /// All parameters rendered as the text the simulation engine expects.
    pub fn engine_values(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), value.engine_value()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
    K: Into<String>,
    V: Into<ParameterValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_widens_integers() {
        let mut params = ParameterSet::new();
        params.insert(keys::X_COORDINATE_MINIMUM, 430001);
        params.insert(keys::CELL_SIZE, 0.5);

        assert_eq!(params.float(keys::X_COORDINATE_MINIMUM).unwrap(), 430001.0);
        assert_eq!(params.float(keys::CELL_SIZE).unwrap(), 0.5);
    }

    #[test]
    fn test_missing_and_mistyped_parameters() {
        let mut params = ParameterSet::new();
        params.insert(keys::SCENARIO_NAME, "merapi");

        let err = params.float(keys::ERUPTION_START).unwrap_err();
        assert!(matches!(err, TephraError::MissingParameter(ref name) if name == "eruption_start"));

        let err = params.float(keys::SCENARIO_NAME).unwrap_err();
        assert!(err.to_string().contains("merapi"));

        let err = params.integer(keys::SCENARIO_NAME).unwrap_err();
        assert!(matches!(err, TephraError::InvalidParameterType { .. }));
    }

    #[test]
    fn test_mass_eruption_rate_forms() {
        assert_eq!(
            MassEruptionRate::from_value(&ParameterValue::Float(1.0e6)).unwrap(),
            MassEruptionRate::Rate(1.0e6)
        );
        assert_eq!(
            MassEruptionRate::from_value(&ParameterValue::from("1e5")).unwrap(),
            MassEruptionRate::Rate(1.0e5)
        );
        assert_eq!(
            MassEruptionRate::from_value(&ParameterValue::from("EsTiMaTe")).unwrap(),
            MassEruptionRate::Estimate
        );
        assert_eq!(
            MassEruptionRate::from_value(&ParameterValue::List(vec![1.0e6, 2.0e6])).unwrap(),
            MassEruptionRate::Series(vec![1.0e6, 2.0e6])
        );
        assert!(MassEruptionRate::from_value(&ParameterValue::from("lots")).is_err());
        assert!(MassEruptionRate::from_value(&ParameterValue::List(vec![])).is_err());
    }

    #[test]
    fn test_mass_eruption_rate_key_precedence() {
        let mut params = ParameterSet::new();
        params.insert(keys::MASS_ERUPTION_RATE_LEGACY, 1.0e5);
        assert_eq!(
            params.mass_eruption_rate_key().unwrap(),
            keys::MASS_ERUPTION_RATE_LEGACY
        );

        params.insert(keys::MASS_ERUPTION_RATE, "estimate");
        assert_eq!(
            params.mass_eruption_rate().unwrap(),
            MassEruptionRate::Estimate
        );
    }

    #[test]
    fn test_engine_values() {
        let params: ParameterSet = [
            (keys::MASS_ERUPTION_RATE, ParameterValue::List(vec![1.0e6, 2.5])),
            (keys::CELL_SIZE, ParameterValue::Float(0.5)),
            (keys::UTMZONE, ParameterValue::from("51S")),
            (keys::NUMBER_CELLS_X, ParameterValue::Integer(100)),
        ]
        .into_iter()
        .collect();

        let rendered = params.engine_values();
        assert_eq!(rendered[keys::MASS_ERUPTION_RATE], "1000000 2.5");
        assert_eq!(rendered[keys::CELL_SIZE], "0.5");
        assert_eq!(rendered[keys::UTMZONE], "51S");
        assert_eq!(rendered[keys::NUMBER_CELLS_X], "100");
    }

    #[test]
    fn test_untagged_deserialization() {
        let params: ParameterSet = serde_json::from_str(
            r#"{"scenario_name": "merapi", "eruption_start": 1, "Cell_size": 0.5, "mass_eruption_rate": [1.0, 2]}"#,
        )
        .unwrap();

        assert_eq!(params.integer(keys::ERUPTION_START).unwrap(), 1);
        assert_eq!(params.float(keys::CELL_SIZE).unwrap(), 0.5);
        assert_eq!(params.text(keys::SCENARIO_NAME).unwrap(), "merapi");
        assert_eq!(
            params.get(keys::MASS_ERUPTION_RATE),
            Some(&ParameterValue::List(vec![1.0, 2.0]))
        );
    }

    #[test]
    fn test_extend_matching() {
        let mut params = ParameterSet::new();
        let domain: ParameterSet = [
            ("Lon_min", 110.0),
            ("Latitude_maximum", -7.0),
            ("Height", 1000.0),
        ]
        .into_iter()
        .collect();

        let copied = params.extend_matching(&domain, |name| name.starts_with("Lat"));
        assert_eq!(copied, 1);
        assert!(params.contains("Latitude_maximum"));
        assert!(!params.contains("Height"));
    }
}
