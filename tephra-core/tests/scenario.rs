//! End-to-end scenario tests.
//!
//! These write a topography grid, a wind profile and a scenario file to disk,
//! run the full derivation and then the range checks.

use is_close::is_close;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tephra_core::checking::check_parameter_ranges;
use tephra_core::derivation::derive_implied_parameters;
use tephra_core::errors::TephraError;
use tephra_core::parameters::{keys, ParameterValue};
use tephra_core::projection::Projection;
use tephra_core::scenario::{load_parameter_file, ScenarioDirectory};

const GRID: &str = "\
ncols        100
nrows        80
xllcorner    430000.4
yllcorner    4100000.6
cellsize     500
NODATA_value -9999
";

/// A scenario directory holding every input of one run.
struct Scenario {
    dir: TempDir,
}

impl Scenario {
    fn new(model: &str, rate: &str, vent: (i64, i64)) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("merapi.asc"), GRID).unwrap();

        let mut profile = String::from("440000 4120000\n20101026\n");
        for hour in 0..72 {
            profile.push_str(&format!(
                "{} {}\n2\n0 5.0 270.0 288.0\n1000 7.5 265.0 281.0\n",
                hour * 3600,
                (hour + 1) * 3600
            ));
        }
        let wind_profile = dir.path().join("merapi.profile");
        fs::write(&wind_profile, profile).unwrap();

        let scenario = format!(
            "scenario_name = \"merapi\"\n\
             Meteorological_model = \"{model}\"\n\
             wind_profile = {wind_profile:?}\n\
             mass_eruption_rate = {rate}\n\
             x_coordinate_of_vent = {}\n\
             y_coordinate_of_vent = {}\n\
             eruption_start = 1\n\
             eruption_duration = 2.0\n\
             post_eruptive_settling_duration = 0.5\n",
            vent.0, vent.1
        );
        fs::write(dir.path().join("merapi.toml"), scenario).unwrap();

        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }
}

fn projection() -> Projection {
    Projection::new("utm", "49", "S")
}

#[test]
fn test_derive_then_check_profile_scenario() {
    let scenario = Scenario::new("profile", "1.0e6", (440000, 4120000));
    let mut params = load_parameter_file(&scenario.path("merapi.toml")).unwrap();

    derive_implied_parameters(
        &scenario.path("merapi.asc"),
        &projection(),
        &ScenarioDirectory::new(scenario.root()),
        &mut params,
    )
    .unwrap();
    check_parameter_ranges(&params).unwrap();

    assert_eq!(params.integer(keys::X_COORDINATE_MAXIMUM).unwrap(), 480001);
    assert_eq!(params.integer(keys::Y_COORDINATE_MAXIMUM).unwrap(), 4140001);
    assert_eq!(params.text(keys::COORDINATES).unwrap(), "UTM");
    assert_eq!(params.text(keys::UTMZONE).unwrap(), "49S");
    assert_eq!(params.integer(keys::ERUPTION_YEAR).unwrap(), 2010);
    assert!(is_close!(params.float(keys::END_TIME_OF_METEO_DATA).unwrap(), 72.0));
    assert!(is_close!(params.float(keys::END_TIME_OF_RUN).unwrap(), 3.5));
    assert_eq!(params.text("load_units").unwrap(), "kg/m2");
}

#[test]
fn test_derive_then_check_ncep_scenario() {
    let scenario = Scenario::new("ncep", "\"Estimate\"", (440000, 4120000));
    fs::write(
        scenario.path("merapi_meteorological_domain.toml"),
        "Longitude_minimum = 109.0\nLongitude_maximum = 111.0\n\
         Latitude_minimum = -8.5\nLatitude_maximum = -6.5\nNumber_of_levels = 17\n",
    )
    .unwrap();
    let mut params = load_parameter_file(&scenario.path("merapi.toml")).unwrap();

    derive_implied_parameters(
        &scenario.path("merapi.asc"),
        &projection(),
        &ScenarioDirectory::new(scenario.root()),
        &mut params,
    )
    .unwrap();
    check_parameter_ranges(&params).unwrap();

    assert_eq!(params.text(keys::COORDINATES).unwrap(), "LON-LAT");
    assert_eq!(params.float(keys::LATITUDE_MAXIMUM).unwrap(), -6.5);
    assert!(!params.contains("Number_of_levels"));
    assert_eq!(
        params.get(keys::MASS_ERUPTION_RATE),
        Some(&ParameterValue::from("Estimate"))
    );
}

#[test]
fn test_ncep_scenario_without_domain_file_fails() {
    let scenario = Scenario::new("ncep", "1.0e6", (440000, 4120000));
    let mut params = load_parameter_file(&scenario.path("merapi.toml")).unwrap();

    let err = derive_implied_parameters(
        &scenario.path("merapi.asc"),
        &projection(),
        &ScenarioDirectory::new(scenario.root()),
        &mut params,
    )
    .unwrap_err();

    match err {
        TephraError::Io { path, .. } => {
            assert!(path.ends_with("merapi_meteorological_domain.toml"))
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_rate_series_serialised_for_engine() {
    let scenario = Scenario::new("profile", "[1.0e6, 2.0e6]", (440000, 4120000));
    let mut params = load_parameter_file(&scenario.path("merapi.toml")).unwrap();

    derive_implied_parameters(
        &scenario.path("merapi.asc"),
        &projection(),
        &ScenarioDirectory::new(scenario.root()),
        &mut params,
    )
    .unwrap();
    check_parameter_ranges(&params).unwrap();

    assert_eq!(
        params.engine_values()[keys::MASS_ERUPTION_RATE],
        "1000000 2000000"
    );
}

#[test]
fn test_vent_outside_domain_rejected_after_derivation() {
    let scenario = Scenario::new("profile", "1.0e6", (500000, 4120000));
    let mut params = load_parameter_file(&scenario.path("merapi.toml")).unwrap();

    derive_implied_parameters(
        &scenario.path("merapi.asc"),
        &projection(),
        &ScenarioDirectory::new(scenario.root()),
        &mut params,
    )
    .unwrap();
    let err = check_parameter_ranges(&params).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Vent location 500000 not within easting range [430001, 480001]"
    );
}

#[test]
fn test_missing_wind_profile_fails() {
    let scenario = Scenario::new("profile", "1.0e6", (440000, 4120000));
    fs::remove_file(scenario.path("merapi.profile")).unwrap();
    let mut params = load_parameter_file(&scenario.path("merapi.toml")).unwrap();

    let err = derive_implied_parameters(
        &scenario.path("merapi.asc"),
        &projection(),
        &ScenarioDirectory::new(scenario.root()),
        &mut params,
    )
    .unwrap_err();

    assert!(matches!(err, TephraError::Io { .. }));
}
