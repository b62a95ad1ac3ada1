//! Pre-flight validation and derivation of volcanic ash dispersion scenarios.
//!
//! A scenario arrives as a [`ParameterSet`](parameters::ParameterSet) of user supplied
//! values. Before the dispersion engine runs, the set is
//!
//! 1. completed with the values implied by the topography grid and the wind field
//!    ([`derivation::derive_implied_parameters`]), then
//! 2. checked for physically or logically inconsistent values
//!    ([`checking::check_parameter_ranges`]).
//!
//! ```no_run
//! use std::path::Path;
//! use tephra_core::checking::check_parameter_ranges;
//! use tephra_core::derivation::derive_implied_parameters;
//! use tephra_core::projection::Projection;
//! use tephra_core::scenario::{load_parameter_file, ScenarioDirectory};
//!
//! let mut params = load_parameter_file(Path::new("scenarios/merapi.toml"))?;
//! let projection = Projection::new("utm", "49", "S");
//! derive_implied_parameters(
//!     Path::new("scenarios/merapi_topography.asc"),
//!     &projection,
//!     &ScenarioDirectory::new("scenarios"),
//!     &mut params,
//! )?;
//! check_parameter_ranges(&params)?;
//! # Ok::<(), tephra_core::errors::TephraError>(())
//! ```

pub mod checking;
pub mod derivation;
pub mod errors;
pub mod parameters;
pub mod projection;
pub mod scenario;
pub mod topography;
pub mod windfield;
