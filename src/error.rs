use thiserror::Error;

use crate::calendar::ObsDate;

/// Everything that can end a request without producing an export.
///
/// Validation variants fire before any fetch begins; the no-data variants
/// distinguish an empty archive from a filter that removed everything.
#[derive(Debug, Error)]
pub enum ObsError {
    #[error("station code must not be empty")]
    EmptyStation,

    #[error("start year {start} is after end year {end}")]
    YearOrder { start: u16, end: u16 },

    #[error("start date {start} is after end date {end}")]
    DateOrder { start: ObsDate, end: ObsDate },

    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("fetch cancelled")]
    Cancelled,

    #[error("no data found for station {station} over {span}")]
    NoObservations { station: String, span: String },

    #[error("no noon observations for station {station} in {count} hourly records")]
    NoNoonObservations { station: String, count: usize },
}
