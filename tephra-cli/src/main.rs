//! Tephra scenario pre-flight
//!
//! Loads a scenario file, derives the parameters implied by the topography
//! grid and wind profile, checks the result and writes the completed
//! parameter set as TOML.
//!
//! # Usage
//!
//! ```bash
//! tephra-cli --scenario scenarios/merapi.toml \
//!   --topography scenarios/merapi.asc \
//!   --projection scenarios/projection.toml \
//!   --output merapi_complete.toml
//! ```

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tephra_core::checking::check_parameter_ranges;
use tephra_core::derivation::derive_implied_parameters;
use tephra_core::parameters::ParameterSet;
use tephra_core::projection::Projection;
use tephra_core::scenario::{load_parameter_file, ScenarioDirectory};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Derive and check the parameters of an ash dispersion scenario
#[derive(Parser, Debug)]
#[command(name = "tephra-cli")]
#[command(about = "Derive and check the parameters of an ash dispersion scenario")]
struct Args {
    /// Scenario parameter file (TOML)
    #[arg(short, long)]
    scenario: PathBuf,

    /// Topography grid with a standard ASCII grid header
    #[arg(short, long)]
    topography: PathBuf,

    /// Projection descriptor (TOML with proj, zone and hemisphere)
    #[arg(short, long)]
    projection: PathBuf,

    /// Directory holding `<scenario>_meteorological_domain.toml`.
    /// Defaults to the directory of the scenario file.
    #[arg(long)]
    scenario_dir: Option<PathBuf>,

    /// Where to write the completed parameters (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tephra=info,tephra_core=info,tephra_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    info!("Loading scenario from {}", args.scenario.display());
    let mut params = load_parameter_file(&args.scenario)?;
    let projection = Projection::from_file(&args.projection)?;

    let scenario_dir = args.scenario_dir.clone().unwrap_or_else(|| {
        args.scenario
            .parent()
            .map(|dir| dir.to_path_buf())
            .unwrap_or_default()
    });

    derive_implied_parameters(
        &args.topography,
        &projection,
        &ScenarioDirectory::new(scenario_dir),
        &mut params,
    )?;
    check_parameter_ranges(&params)?;

    write_parameters(&params, args.output.as_ref())
}

fn write_parameters(
    params: &ParameterSet,
    output: Option<&PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let rendered = toml::to_string(params)?;
    match output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!("Wrote {} parameters to {}", params.len(), path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
