//! Temporal derivation: meteorological data window and eruption timing.
//!
//! All eruption times are hours relative to midnight of the wind field date.

use crate::errors::{TephraError, TephraResult};
use crate::parameters::{keys, ParameterSet};
use crate::windfield::WindFieldSource;
use tracing::debug;

const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Populate the meteorological data window and the eruption window.
///
/// Requires `eruption_start`, `eruption_duration` and
/// `post_eruptive_settling_duration` in hours. The eruption and the settling
/// period that follows it must end within the wind data.
pub fn derive_temporal_parameters(
    wind_field: &dyn WindFieldSource,
    params: &mut ParameterSet,
) -> TephraResult<()> {
    let times = wind_field.temporal_extent()?;

    params.insert(keys::ERUPTION_YEAR, times.year);
    params.insert(keys::ERUPTION_MONTH, times.month);
    params.insert(keys::ERUPTION_DAY, times.day);

    let meteo_start = times.start_time / SECONDS_PER_HOUR;
    let meteo_end = times.end_time / SECONDS_PER_HOUR;
    params.insert(keys::START_TIME_OF_METEO_DATA, meteo_start);
    params.insert(keys::END_TIME_OF_METEO_DATA, meteo_end);
    // The engine expects the step in minutes
    params.insert(keys::METEO_TIME_STEP, times.time_step / SECONDS_PER_MINUTE);

    let eruption_start = params.float(keys::ERUPTION_START)?;
    let eruption_duration = params.float(keys::ERUPTION_DURATION)?;
    let settling_duration = params.float(keys::POST_ERUPTIVE_SETTLING_DURATION)?;

    require_non_negative(keys::ERUPTION_START, eruption_start)?;
    if eruption_duration.is_nan() || eruption_duration <= 0.0 {
        return Err(TephraError::InvalidTiming {
            name: keys::ERUPTION_DURATION,
            requirement: "greater than 0",
            value: eruption_duration,
        });
    }
    require_non_negative(keys::POST_ERUPTIVE_SETTLING_DURATION, settling_duration)?;

    let start_of_eruption = meteo_start + eruption_start;
    let end_of_eruption = start_of_eruption + eruption_duration;
    let end_of_run = end_of_eruption + settling_duration;
    if end_of_run.is_nan() || meteo_end.is_nan() || end_of_run > meteo_end {
        return Err(TephraError::MeteoWindowExceeded {
            end_of_run,
            end_of_meteo_data: meteo_end,
        });
    }

    params.insert(keys::START_TIME_OF_ERUPTION, start_of_eruption);
    params.insert(keys::END_TIME_OF_ERUPTION, end_of_eruption);
    params.insert(keys::END_TIME_OF_RUN, end_of_run);

    debug!(
        wind_field = %wind_field.name(),
        meteo_start,
        meteo_end,
        start_of_eruption,
        end_of_run,
        "Derived temporal parameters"
    );
    Ok(())
}

fn require_non_negative(name: &'static str, value: f64) -> TephraResult<()> {
    if value.is_nan() || value < 0.0 {
        return Err(TephraError::InvalidTiming {
            name,
            requirement: "greater than or equal to 0",
            value,
        });
    }
    Ok(())
}
