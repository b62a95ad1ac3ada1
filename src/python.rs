use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::path::{Path, PathBuf};
use tephra_core::checking::check_parameter_ranges;
use tephra_core::derivation::derive_implied_parameters;
use tephra_core::errors::TephraError;
use tephra_core::parameters::ParameterSet;
use tephra_core::projection::Projection;
use tephra_core::scenario::ScenarioDirectory;

fn to_py_err(error: TephraError) -> PyErr {
    PyValueError::new_err(error.to_string())
}

fn from_python<T: serde::de::DeserializeOwned>(value: Bound<'_, PyAny>, what: &str) -> PyResult<T> {
    pythonize::depythonize_bound::<T>(value)
        .map_err(|e| PyValueError::new_err(format!("Invalid {what}: {e}")))
}

fn to_python(py: Python<'_>, params: &ParameterSet) -> PyResult<PyObject> {
    pythonize::pythonize(py, params).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Check a derived parameter dict.
///
/// Raises ValueError naming the offending values if a check fails.
#[pyfunction]
#[pyo3(name = "check_parameter_ranges")]
fn py_check_parameter_ranges(params: Bound<'_, PyAny>) -> PyResult<()> {
    let params: ParameterSet = from_python(params, "parameters")?;
    check_parameter_ranges(&params).map_err(to_py_err)
}

/// Derive the parameters implied by the topography grid and the wind profile.
///
/// `projection` is a dict with `proj`, `zone` and `hemisphere`.
/// The meteorological domain of `ncep` scenarios is looked up in `scenario_dir`,
/// which defaults to the directory of the topography grid.
#[pyfunction]
#[pyo3(
    name = "derive_implied_parameters",
    signature = (topography_grid, projection, params, scenario_dir=None)
)]
fn py_derive_implied_parameters(
    py: Python<'_>,
    topography_grid: PathBuf,
    projection: Bound<'_, PyAny>,
    params: Bound<'_, PyAny>,
    scenario_dir: Option<PathBuf>,
) -> PyResult<PyObject> {
    let projection: Projection = from_python(projection, "projection")?;
    let mut params: ParameterSet = from_python(params, "parameters")?;
    let scenario_dir = scenario_dir.unwrap_or_else(|| {
        topography_grid
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    });

    derive_implied_parameters(
        &topography_grid,
        &projection,
        &ScenarioDirectory::new(scenario_dir),
        &mut params,
    )
    .map_err(to_py_err)?;
    to_python(py, &params)
}

#[pymodule]
#[pyo3(name = "_lib")]
fn tephra(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_function(wrap_pyfunction!(py_check_parameter_ranges, m)?)?;
    m.add_function(wrap_pyfunction!(py_derive_implied_parameters, m)?)?;
    Ok(())
}
