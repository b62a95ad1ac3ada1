//! Range and consistency checks on a completed Parameter Set.
//!
//! These run after derivation and reject physically or logically inconsistent
//! scenarios before the simulation engine is started. Every failure is final
//! for the scenario. The Parameter Set is never modified: a rate series is
//! already held as a typed list and only becomes text in
//! [`ParameterSet::engine_values`].

use crate::errors::{TephraError, TephraResult};
use crate::parameters::{keys, MassEruptionRate, ParameterSet};
use tracing::debug;

/// Check a fully derived Parameter Set.
///
/// Checks, in order:
/// - the mass eruption rate is a positive number, a list of rates or `estimate`
/// - the vent lies inside the domain (bounds inclusive)
/// - the meteorological data lasts at least until the end of the run
pub fn check_parameter_ranges(params: &ParameterSet) -> TephraResult<()> {
    check_mass_eruption_rate(params)?;
    check_vent_location(params)?;
    check_time_consistency(params)?;

    debug!(
        scenario = params.text(keys::SCENARIO_NAME).unwrap_or("<unnamed>"),
        "Parameter ranges are consistent"
    );
    Ok(())
}

fn check_mass_eruption_rate(params: &ParameterSet) -> TephraResult<()> {
    if let MassEruptionRate::Rate(value) = params.mass_eruption_rate()? {
        if value.is_nan() || value <= 0.0 {
            return Err(TephraError::NonPositiveMassEruptionRate(value));
        }
    }
    Ok(())
}

fn check_vent_location(params: &ParameterSet) -> TephraResult<()> {
    check_within(
        "easting",
        params.float(keys::X_COORDINATE_OF_VENT)?,
        params.float(keys::X_COORDINATE_MINIMUM)?,
        params.float(keys::X_COORDINATE_MAXIMUM)?,
    )?;
    check_within(
        "northing",
        params.float(keys::Y_COORDINATE_OF_VENT)?,
        params.float(keys::Y_COORDINATE_MINIMUM)?,
        params.float(keys::Y_COORDINATE_MAXIMUM)?,
    )
}

fn check_within(axis: &'static str, value: f64, lower: f64, upper: f64) -> TephraResult<()> {
    if (lower..=upper).contains(&value) {
        Ok(())
    } else {
        Err(TephraError::VentOutsideDomain {
            axis,
            value,
            lower,
            upper,
        })
    }
}

fn check_time_consistency(params: &ParameterSet) -> TephraResult<()> {
    let end_of_meteo_data = params.float(keys::END_TIME_OF_METEO_DATA)?;
    let end_of_run = params.float(keys::END_TIME_OF_RUN)?;
    if end_of_meteo_data.is_nan() || end_of_run.is_nan() || end_of_meteo_data < end_of_run {
        return Err(TephraError::MeteoDataEndsBeforeRun {
            end_of_meteo_data,
            end_of_run,
        });
    }
    Ok(())
}
