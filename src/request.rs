//! Validated request types for one observation export.

use std::fmt;

use clap::ValueEnum;

use crate::calendar::ObsDate;
use crate::error::ObsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
/// Sampling frequency of the exported records.
pub enum Frequency {
    /// Every reading the archive holds
    Hourly,
    /// One noon reading per day
    Daily,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Hourly => write!(f, "hourly"),
            Frequency::Daily => write!(f, "daily"),
        }
    }
}

/// The requested time window, in one of three shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSpec {
    SingleYear { year: u16 },
    YearRange { start_year: u16, end_year: u16 },
    ExactRange { start: ObsDate, end: ObsDate },
}

impl DateSpec {
    /// Renders the window for status and error messages.
    pub fn describe(&self) -> String {
        match self {
            DateSpec::SingleYear { year } => year.to_string(),
            DateSpec::YearRange {
                start_year,
                end_year,
            } => format!("{}-{}", start_year, end_year),
            DateSpec::ExactRange { start, end } => format!("{} to {}", start, end),
        }
    }
}

/// Station selector, matched exactly against the STATION_CODE field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationCode(String);

impl StationCode {
    pub fn new(raw: &str) -> Result<Self, ObsError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ObsError::EmptyStation);
        }

        Ok(StationCode(trimmed.to_string()))
    }

    pub fn matches(&self, code: &str) -> bool {
        self.0 == code
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fully validated request.
///
/// Construction is the validation gate: ordering and station checks happen
/// here, so no fetch can start from a malformed request.
#[derive(Debug, Clone)]
pub struct ObsRequest {
    pub station: StationCode,
    pub dates: DateSpec,
    pub frequency: Frequency,
}

impl ObsRequest {
    pub fn new(station: &str, dates: DateSpec, frequency: Frequency) -> Result<Self, ObsError> {
        let station = StationCode::new(station)?;

        match dates {
            DateSpec::YearRange {
                start_year,
                end_year,
            } if start_year > end_year => {
                return Err(ObsError::YearOrder {
                    start: start_year,
                    end: end_year,
                });
            }
            DateSpec::ExactRange { start, end } if start > end => {
                return Err(ObsError::DateOrder { start, end });
            }
            _ => {}
        }

        Ok(ObsRequest {
            station,
            dates,
            frequency,
        })
    }
}

/// Parses a date argument, folding any failure into a validation error.
pub fn parse_date(raw: &str) -> Result<ObsDate, ObsError> {
    raw.trim()
        .parse()
        .map_err(|_| ObsError::InvalidDate(raw.trim().to_string()))
}

// -- Tests -------------------------------------------------------------------
