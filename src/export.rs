//! Artifact naming and CSV writing.

use std::path::Path;

use anyhow::Result;

use crate::dataset::Dataset;
use crate::request::{DateSpec, Frequency};

/// Absent cells render as this in exported files.
const ABSENT: &str = "NA";

/// Deterministic artifact name for a station, window, and frequency.
pub fn artifact_name(station_name: &str, dates: DateSpec, frequency: Frequency) -> String {
    let suffix = match frequency {
        Frequency::Hourly => "",
        Frequency::Daily => "_dailies",
    };

    match dates {
        DateSpec::SingleYear { year } => {
            format!("{}_{}_BCWS_WX_OBS{}.csv", station_name, year, suffix)
        }
        DateSpec::YearRange {
            start_year,
            end_year,
        } => format!(
            "{}_{}-{}_BCWS_WX_OBS{}.csv",
            station_name, start_year, end_year, suffix
        ),
        DateSpec::ExactRange { start, end } => format!(
            "{}_{}_to_{}_BCWS_WX_OBS{}.csv",
            station_name, start, end, suffix
        ),
    }
}

/// Writes the dataset under its reconciled header, filling absent cells.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(dataset.columns())?;
    for r in 0..dataset.len() {
        writer.write_record(dataset.row(r).into_iter().map(|cell| cell.unwrap_or(ABSENT)))?;
    }
    writer.flush()?;

    Ok(())
}

// -- Tests -------------------------------------------------------------------
