//! Derivation of the parameters implied by the topography grid and wind field.
//!
//! Three steps share and progressively enrich one [`ParameterSet`]:
//!
//! 1. [`derive_spatial_parameters`]: domain extent and coordinate system from the grid
//! 2. [`derive_temporal_parameters`]: meteorological and eruption windows from the wind field
//! 3. [`derive_modelling_parameters`]: fixed output units and post-processing switches
//!
//! Derivation must complete before [`check_parameter_ranges`](crate::checking::check_parameter_ranges)
//! is called, since the checks rely on the derived bounds and times.

mod modelling;
mod spatial;
mod temporal;

pub use modelling::{derive_modelling_parameters, ModellingConstant, MODELLING_CONSTANTS};
pub use spatial::{derive_spatial_parameters, MeteorologicalModel, GEOGRAPHIC_COORDINATES};
pub use temporal::derive_temporal_parameters;

use crate::errors::TephraResult;
use crate::parameters::{keys, ParameterSet};
use crate::projection::Projection;
use crate::scenario::MeteorologicalDomainSource;
use crate::windfield::ProfileWindField;
use std::path::Path;
use tracing::info;

/// Run all three derivation steps.
///
/// The wind field is read from the profile named by the `wind_profile` parameter.
pub fn derive_implied_parameters(
    topography_grid: &Path,
    projection: &Projection,
    domain: &dyn MeteorologicalDomainSource,
    params: &mut ParameterSet,
) -> TephraResult<()> {
    let grid = derive_spatial_parameters(topography_grid, projection, domain, params)?;

    let wind_field = ProfileWindField::new(params.text(keys::WIND_PROFILE)?);
    derive_temporal_parameters(&wind_field, params)?;

    derive_modelling_parameters(params);

    info!(
        grid = %topography_grid.display(),
        format = ?grid.format,
        wind_profile = %wind_field.path().display(),
        parameters = params.len(),
        "Derived implied parameters"
    );
    Ok(())
}
