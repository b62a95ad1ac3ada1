//! Spatial derivation: domain extent, resolution and coordinate system.

use crate::errors::{TephraError, TephraResult};
use crate::parameters::{keys, ParameterSet};
use crate::projection::Projection;
use crate::scenario::MeteorologicalDomainSource;
use crate::topography::{GridFormat, TopographyGrid};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Label written to `Coordinates` for gridded meteorology.
pub const GEOGRAPHIC_COORDINATES: &str = "LON-LAT";

/// Geographic fields that are zeroed when running from a wind profile.
const GEOGRAPHIC_FIELDS: [&str; 6] = [
    keys::LONGITUDE_MINIMUM,
    keys::LONGITUDE_MAXIMUM,
    keys::LATITUDE_MINIMUM,
    keys::LATITUDE_MAXIMUM,
    keys::LONGITUDE_OF_VENT,
    keys::LATITUDE_OF_VENT,
];

/// Source of the meteorological data driving the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeteorologicalModel {
    /// A single wind profile at the vent, projected coordinates
    Profile,
    /// Gridded reanalysis data, geographic coordinates
    Ncep,
}

impl FromStr for MeteorologicalModel {
    type Err = TephraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "profile" => Ok(MeteorologicalModel::Profile),
            "ncep" => Ok(MeteorologicalModel::Ncep),
            _ => Err(TephraError::UnsupportedMeteorologicalModel(s.to_string())),
        }
    }
}

impl fmt::Display for MeteorologicalModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeteorologicalModel::Profile => write!(f, "profile"),
            MeteorologicalModel::Ncep => write!(f, "ncep"),
        }
    }
}

/// Populate the domain extent, cell size, coordinate system and UTM zone.
///
/// Requires `scenario_name` and `Meteorological_model`.
/// When only the legacy native grid is available the extent and cell size are
/// written and derivation stops there: `Coordinates` and `UTMZONE` stay unset.
pub fn derive_spatial_parameters(
    topography_grid: &Path,
    projection: &Projection,
    domain: &dyn MeteorologicalDomainSource,
    params: &mut ParameterSet,
) -> TephraResult<TopographyGrid> {
    let scenario_name = params.text(keys::SCENARIO_NAME)?.to_string();
    let grid = TopographyGrid::locate(topography_grid, &scenario_name)?;
    apply_grid(&grid, params);

    if grid.format == GridFormat::LegacyNative {
        return Ok(grid);
    }

    let model: MeteorologicalModel = params.text(keys::METEOROLOGICAL_MODEL)?.parse()?;
    match model {
        MeteorologicalModel::Profile => {
            params.insert(keys::COORDINATES, projection.coordinate_label());
            for field in GEOGRAPHIC_FIELDS {
                params.insert(field, 0);
            }
        }
        MeteorologicalModel::Ncep => {
            params.insert(keys::COORDINATES, GEOGRAPHIC_COORDINATES);
            let met_domain = domain.meteorological_domain(&scenario_name)?;
            let copied = params.extend_matching(&met_domain, |name| {
                name.starts_with("Lat") || name.starts_with("Lon")
            });
            debug!(copied, "Copied geographic bounds from the meteorological domain");
        }
    }

    params.insert(keys::UTMZONE, projection.utm_zone());

    debug!(
        scenario = %scenario_name,
        %model,
        ncols = grid.ncols,
        nrows = grid.nrows,
        cell_size_km = grid.cell_size_km(),
        "Derived spatial parameters"
    );
    Ok(grid)
}

fn apply_grid(grid: &TopographyGrid, params: &mut ParameterSet) {
    params.insert(keys::NUMBER_CELLS_X, grid.ncols as i64);
    params.insert(keys::NUMBER_CELLS_Y, grid.nrows as i64);
    params.insert(keys::CELL_SIZE, grid.cell_size_km());

    match grid.format {
        // Whole metres after rounding, so written as integers
        GridFormat::Standard => {
            params.insert(keys::X_COORDINATE_MINIMUM, grid.x_minimum as i64);
            params.insert(keys::Y_COORDINATE_MINIMUM, grid.y_minimum as i64);
            params.insert(keys::X_COORDINATE_MAXIMUM, grid.x_maximum as i64);
            params.insert(keys::Y_COORDINATE_MAXIMUM, grid.y_maximum as i64);
        }
        GridFormat::LegacyNative => {
            params.insert(keys::X_COORDINATE_MINIMUM, grid.x_minimum);
            params.insert(keys::Y_COORDINATE_MINIMUM, grid.y_minimum);
            params.insert(keys::X_COORDINATE_MAXIMUM, grid.x_maximum);
            params.insert(keys::Y_COORDINATE_MAXIMUM, grid.y_maximum);
        }
    }
}
