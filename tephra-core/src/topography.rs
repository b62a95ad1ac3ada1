//! Topography grid headers.
//!
//! Two on-disk formats describe the same rectangular grid:
//!
//! - the standard ASCII grid header, whose first five lines are
//!
//!   ```text
//!   ncols        100
//!   nrows        80
//!   xllcorner    430000.4
//!   yllcorner    4100000.6
//!   cellsize     500
//!   ```
//!
//! - the legacy native (Surfer `DSAA`) grid written next to the scenario as
//!   `<scenario_name>.top`:
//!
//!   ```text
//!   DSAA
//!   171  171
//!   430000.0  600000.0
//!   4100000.0 4270000.0
//!   0.0    3129.5
//!   ```
//!
//! Only the header is read. Elevations are left to the simulation engine.

use crate::errors::{TephraError, TephraResult};
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::warn;

const STANDARD_HEADER: [&str; 5] = ["ncols", "nrows", "xllcorner", "yllcorner", "cellsize"];
const NATIVE_MAGIC: &str = "DSAA";
/// Magic, cell counts, X range and Y range
const NATIVE_HEADER_LINES: usize = 4;

/// Which of the two grid formats a descriptor was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridFormat {
    Standard,
    LegacyNative,
}

/// Extent and resolution of a topography grid.
///
/// Coordinates are in metres in the projection of the grid.
/// The maxima always satisfy `maximum = minimum + cell_size * cell_count`.
#[derive(Debug, Clone, PartialEq)]
pub struct TopographyGrid {
    pub format: GridFormat,
    pub ncols: usize,
    pub nrows: usize,
    pub x_minimum: f64,
    pub y_minimum: f64,
    /// Cell size in metres
    pub cell_size: f64,
    pub x_maximum: f64,
    pub y_maximum: f64,
}

impl TopographyGrid {
    /// Read the grid at `path`, falling back to the legacy native grid
    /// `<scenario_name>.top` in the same directory when `path` does not exist.
    ///
    /// Any other failure to read `path` is reported against `path` itself.
    pub fn locate(path: &Path, scenario_name: &str) -> TephraResult<Self> {
        match read_header(path, STANDARD_HEADER.len()) {
            Ok(header) => Self::parse_standard(&header, path),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let native = native_grid_path(path, scenario_name);
                warn!(
                    grid = %path.display(),
                    fallback = %native.display(),
                    "Topography grid not found; assuming a legacy native grid"
                );
                let header = read_header(&native, NATIVE_HEADER_LINES)
                    .map_err(|e| TephraError::io(&native, e))?;
                Self::parse_native(&header, &native)
            }
            Err(e) => Err(TephraError::io(path, e)),
        }
    }

    /// Parse the five line standard header.
    ///
    /// The lower-left corner is rounded up to the next whole metre and the maxima
    /// are truncated, so the domain handed to the engine never extends past the data.
    pub fn parse_standard(content: &str, path: &Path) -> TephraResult<Self> {
        let mut values = [0.0; 5];
        let mut lines = content.lines();

        for (index, expected) in STANDARD_HEADER.iter().enumerate() {
            let line_number = index + 1;
            let line = lines.next().ok_or_else(|| TephraError::GridFormat {
                path: path.to_path_buf(),
                line: line_number,
                details: format!("missing '{expected}' header line"),
            })?;
            let mut fields = line.split_whitespace();
            let key = fields.next().unwrap_or("");
            if key != *expected {
                return Err(TephraError::GridHeader {
                    path: path.to_path_buf(),
                    line: line_number,
                    expected: expected.to_string(),
                    found: key.to_string(),
                });
            }
            values[index] = parse_number(fields.next(), path, line_number, expected)?;
        }

        let [ncols, nrows, xllcorner, yllcorner, cellsize] = values;
        let ncols = parse_count(ncols, path, 1, "ncols")?;
        let nrows = parse_count(nrows, path, 2, "nrows")?;
        let cell_size = parse_cell_size(cellsize, path, 5)?;

        let x_minimum = xllcorner.ceil();
        let y_minimum = yllcorner.ceil();

        Ok(Self {
            format: GridFormat::Standard,
            ncols,
            nrows,
            x_minimum,
            y_minimum,
            cell_size,
            x_maximum: (x_minimum + cell_size * ncols as f64).trunc(),
            y_maximum: (y_minimum + cell_size * nrows as f64).trunc(),
        })
    }

    /// Parse the header of a legacy native `DSAA` grid.
    ///
    /// The cell size is derived from the X range.
    pub fn parse_native(content: &str, path: &Path) -> TephraResult<Self> {
        let lines: Vec<&str> = content.lines().take(4).collect();

        let magic = lines.first().map(|line| line.trim()).unwrap_or("");
        if magic != NATIVE_MAGIC {
            return Err(TephraError::GridHeader {
                path: path.to_path_buf(),
                line: 1,
                expected: NATIVE_MAGIC.to_string(),
                found: magic.to_string(),
            });
        }

        let pair = |index: usize, what: &str| -> TephraResult<(f64, f64)> {
            let line_number = index + 1;
            let mut fields = lines.get(index).copied().unwrap_or("").split_whitespace();
            let first = parse_number(fields.next(), path, line_number, what)?;
            let second = parse_number(fields.next(), path, line_number, what)?;
            Ok((first, second))
        };

        let (nx, ny) = pair(1, "cell counts")?;
        let (x_minimum, x_range_end) = pair(2, "X range")?;
        let (y_minimum, _) = pair(3, "Y range")?;

        let ncols = parse_count(nx, path, 2, "cell count X")?;
        let nrows = parse_count(ny, path, 2, "cell count Y")?;
        let cell_size = parse_cell_size((x_range_end - x_minimum) / ncols as f64, path, 3)?;

        Ok(Self {
            format: GridFormat::LegacyNative,
            ncols,
            nrows,
            x_minimum,
            y_minimum,
            cell_size,
            x_maximum: x_minimum + cell_size * ncols as f64,
            y_maximum: y_minimum + cell_size * nrows as f64,
        })
    }

    /// Cell size in kilometres, as expected by the engine.
    pub fn cell_size_km(&self) -> f64 {
        self.cell_size / 1000.0
    }
}

/// First `lines` lines of a grid file. The elevation body is never read.
fn read_header(path: &Path, lines: usize) -> io::Result<String> {
    let reader = BufReader::new(File::open(path)?);
    let header = reader.lines().take(lines).collect::<io::Result<Vec<_>>>()?;
    Ok(header.join("\n"))
}

fn native_grid_path(path: &Path, scenario_name: &str) -> PathBuf {
    let file_name = format!("{scenario_name}.top");
    match path.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

fn parse_number(field: Option<&str>, path: &Path, line: usize, what: &str) -> TephraResult<f64> {
    let field = field.ok_or_else(|| TephraError::GridFormat {
        path: path.to_path_buf(),
        line,
        details: format!("missing value for {what}"),
    })?;
    field.parse::<f64>().map_err(|_| TephraError::GridFormat {
        path: path.to_path_buf(),
        line,
        details: format!("could not parse '{field}' as a number for {what}"),
    })
}

fn parse_count(value: f64, path: &Path, line: usize, what: &str) -> TephraResult<usize> {
    // Counts written as floats are truncated
    if value.is_finite() && value >= 1.0 {
        Ok(value.trunc() as usize)
    } else {
        Err(TephraError::GridFormat {
            path: path.to_path_buf(),
            line,
            details: format!("{what} must be at least 1, got {value}"),
        })
    }
}

fn parse_cell_size(value: f64, path: &Path, line: usize) -> TephraResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(TephraError::GridFormat {
            path: path.to_path_buf(),
            line,
            details: format!("cell size must be positive, got {value}"),
        })
    }
}
