use std::path::PathBuf;
use thiserror::Error;

/// Error type for invalid scenario parameters and unreadable inputs.
///
/// Messages embed the offending values so they can be reported to the user verbatim.
#[derive(Error, Debug)]
pub enum TephraError {
    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not parse scenario file {}: {details}", .path.display())]
    Scenario { path: PathBuf, details: String },
    #[error("Topography grid {} line {line}: expected '{expected}', got '{found}'", .path.display())]
    GridHeader {
        path: PathBuf,
        line: usize,
        expected: String,
        found: String,
    },
    #[error("Topography grid {} line {line}: {details}", .path.display())]
    GridFormat {
        path: PathBuf,
        line: usize,
        details: String,
    },
    #[error("Wind field {source_name}: {details}")]
    WindField { source_name: String, details: String },
    #[error("Unknown choice of met data: {0}. Expect either \"profile\" or \"ncep\".")]
    UnsupportedMeteorologicalModel(String),
    #[error("Required parameter {0} is missing")]
    MissingParameter(String),
    #[error("Parameter {name} must be {expected}, got {found}")]
    InvalidParameterType {
        name: String,
        expected: String,
        found: String,
    },
    #[error("Mass eruption rate must be greater than zero.\nA value of {0:e} was specified")]
    NonPositiveMassEruptionRate(f64),
    #[error("The variable mass_eruption_rate must be either a number, a list or the word \"estimate\", got {0}")]
    InvalidMassEruptionRate(String),
    #[error("Vent location {value} not within {axis} range [{lower}, {upper}]")]
    VentOutsideDomain {
        axis: &'static str,
        value: f64,
        lower: f64,
        upper: f64,
    },
    #[error("Parameter {name} must be {requirement}, got {value}")]
    InvalidTiming {
        name: &'static str,
        requirement: &'static str,
        value: f64,
    },
    #[error("The sum of parameters eruption_start, eruption_duration and post_eruptive_settling_duration must not cause the end of meteorological data to be exceeded. The sum is {end_of_run}, but the met data ends at {end_of_meteo_data}")]
    MeteoWindowExceeded {
        end_of_run: f64,
        end_of_meteo_data: f64,
    },
    #[error("End time of meteorological data must be greater than or equal to end time of run. I got\nEnd_time_meteo_data = {end_of_meteo_data} and End_time_of_run = {end_of_run}.")]
    MeteoDataEndsBeforeRun {
        end_of_meteo_data: f64,
        end_of_run: f64,
    },
}

impl TephraError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience type for `Result<T, TephraError>`.
pub type TephraResult<T> = Result<T, TephraError>;
