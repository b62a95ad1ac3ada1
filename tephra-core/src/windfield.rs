//! Wind field time series.
//!
//! Temporal derivation only needs the date and the time span covered by the
//! wind data. [`WindFieldSource`] is the seam for anything able to provide that;
//! [`ProfileWindField`] reads a Fall3d style wind profile from disk.

use crate::errors::{TephraError, TephraResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Date and time span of a wind field.
///
/// Times are in seconds relative to midnight of the given date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindFieldTimes {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub start_time: f64,
    pub end_time: f64,
    pub time_step: f64,
}

/// Anything that can report the temporal extent of its wind data.
pub trait WindFieldSource {
    /// Human readable name used in error messages.
    fn name(&self) -> String;

    fn temporal_extent(&self) -> TephraResult<WindFieldTimes>;
}

impl WindFieldSource for WindFieldTimes {
    fn name(&self) -> String {
        "in-memory wind field".to_string()
    }

    fn temporal_extent(&self) -> TephraResult<WindFieldTimes> {
        Ok(*self)
    }
}

/// Fall3d style wind profile.
///
/// ```text
/// 430000 4120000      vent easting and northing
/// 20100331            date, YYYYMMDD
/// 0 3600              block start and end, seconds
/// 2                   number of levels in the block
/// 0 5.0 270.0 288.0   one row per level
/// 1000 7.5 265.0 281.0
/// 3600 7200
/// ...
/// ```
///
/// Blocks must be contiguous and of equal length; that length is the time step.
#[derive(Debug, Clone)]
pub struct ProfileWindField {
    path: PathBuf,
}

impl ProfileWindField {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse profile content. `source_name` only appears in error messages.
    pub fn parse(content: &str, source_name: &str) -> TephraResult<WindFieldTimes> {
        let fail = |details: String| TephraError::WindField {
            source_name: source_name.to_string(),
            details,
        };

        let mut lines = content
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (number, _vent) = lines
            .next()
            .ok_or_else(|| fail("file is empty".to_string()))?;
        let (number, date) = lines
            .next()
            .ok_or_else(|| fail(format!("missing date after line {number}")))?;
        let (year, month, day) = parse_date(date).ok_or_else(|| {
            fail(format!(
                "line {number}: expected a date as YYYYMMDD, got '{date}'"
            ))
        })?;

        let mut blocks: Vec<(f64, f64)> = Vec::new();
        while let Some((number, header)) = lines.next() {
            let times: Vec<f64> = header
                .split_whitespace()
                .map(str::parse::<f64>)
                .collect::<Result<_, _>>()
                .map_err(|_| {
                    fail(format!(
                        "line {number}: expected block start and end times, got '{header}'"
                    ))
                })?;
            let &[start, end] = times.as_slice() else {
                return Err(fail(format!(
                    "line {number}: expected block start and end times, got '{header}'"
                )));
            };
            if !start.is_finite() || !end.is_finite() {
                return Err(fail(format!(
                    "line {number}: block times must be finite, got '{header}'"
                )));
            }
            if end <= start {
                return Err(fail(format!(
                    "line {number}: block ends at {end} before it starts at {start}"
                )));
            }

            let (number, levels) = lines
                .next()
                .ok_or_else(|| fail(format!("missing level count after line {number}")))?;
            let levels: usize = levels.parse().map_err(|_| {
                fail(format!(
                    "line {number}: expected the number of levels, got '{levels}'"
                ))
            })?;
            for _ in 0..levels {
                lines.next().ok_or_else(|| {
                    fail(format!(
                        "block starting at {start} s has fewer than {levels} levels"
                    ))
                })?;
            }

            if let Some(&(previous_start, previous_end)) = blocks.last() {
                if start != previous_end {
                    return Err(fail(format!(
                        "block starting at {start} s does not follow the block ending at {previous_end} s"
                    )));
                }
                if end - start != previous_end - previous_start {
                    return Err(fail(format!(
                        "block {start}-{end} s differs in length from block {previous_start}-{previous_end} s"
                    )));
                }
            }
            blocks.push((start, end));
        }

        let (Some(&(start_time, first_end)), Some(&(_, end_time))) = (blocks.first(), blocks.last())
        else {
            return Err(fail("no wind data blocks found".to_string()));
        };

        Ok(WindFieldTimes {
            year,
            month,
            day,
            start_time,
            end_time,
            time_step: first_end - start_time,
        })
    }
}

impl WindFieldSource for ProfileWindField {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn temporal_extent(&self) -> TephraResult<WindFieldTimes> {
        let content = fs::read_to_string(&self.path).map_err(|e| TephraError::io(&self.path, e))?;
        Self::parse(&content, &self.name())
    }
}

fn parse_date(date: &str) -> Option<(i64, i64, i64)> {
    if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = date[0..4].parse().ok()?;
    let month = date[4..6].parse().ok()?;
    let day = date[6..8].parse().ok()?;
    ((1..=12).contains(&month) && (1..=31).contains(&day)).then_some((year, month, day))
}
