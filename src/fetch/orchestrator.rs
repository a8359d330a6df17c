//! Resolves a date window into fetch operations across both tiers.

use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::calendar::ObsDate;
use crate::dataset::Dataset;
use crate::request::{DateSpec, StationCode};

use super::daily::{fetch_range, RangeFetch};
use super::yearly::YearlyArchive;
use super::{DailyArchive, FetchOutcome, UnitFailure};

/// Everything a resolved window produced.
///
/// The dataset holds records in fetch order: ascending year, ascending day
/// within each year. On cancellation it is left empty rather than partial.
#[derive(Debug, Default)]
pub struct Resolution {
    pub dataset: Dataset,
    pub days_attempted: usize,
    pub files_read: usize,
    pub failures: Vec<UnitFailure>,
    pub cancelled: bool,
}

impl Resolution {
    fn absorb(&mut self, range: RangeFetch) {
        self.days_attempted += range.days_attempted;
        self.files_read += range.files_read;
        self.failures.extend(range.failures);
        self.cancelled |= range.cancelled;

        if let FetchOutcome::Rows(rows) = range.outcome {
            self.dataset.merge(rows);
        }
    }
}

/// Fetches the window, preferring the consolidated tier per year and
/// falling back to per-day files whenever it yields nothing.
pub async fn resolve(
    yearly: &impl YearlyArchive,
    daily: &impl DailyArchive,
    dates: DateSpec,
    station: &StationCode,
    cancel: &CancellationToken,
) -> Resolution {
    match dates {
        DateSpec::ExactRange { start, end } => {
            let mut resolution = Resolution::default();
            resolution.absorb(fetch_range(daily, start, end, station, cancel).await);
            resolution
        }
        DateSpec::SingleYear { year } => {
            resolve_years(yearly, daily, year, year, station, cancel).await
        }
        DateSpec::YearRange {
            start_year,
            end_year,
        } => resolve_years(yearly, daily, start_year, end_year, station, cancel).await,
    }
}

async fn resolve_years(
    yearly: &impl YearlyArchive,
    daily: &impl DailyArchive,
    start_year: u16,
    end_year: u16,
    station: &StationCode,
    cancel: &CancellationToken,
) -> Resolution {
    let mut resolution = Resolution::default();

    for year in start_year..=end_year {
        if cancel.is_cancelled() {
            resolution.cancelled = true;
            break;
        }

        match yearly.fetch_year(year, station).await {
            FetchOutcome::Rows(rows) if !rows.is_empty() => {
                info!("using consolidated file for {}", year);
                resolution.files_read += 1;
                resolution.dataset.merge(rows);
                continue;
            }
            FetchOutcome::Rows(_) | FetchOutcome::Empty => {}
            FetchOutcome::Failed(reason) => {
                warn!("consolidated fetch for {} failed: {}", year, reason);
                resolution.failures.push(UnitFailure {
                    unit: year.to_string(),
                    reason,
                });
            }
        }

        info!("fetching {} day by day", year);
        let range = fetch_range(
            daily,
            ObsDate::first_of(year),
            ObsDate::last_of(year),
            station,
            cancel,
        )
        .await;
        resolution.absorb(range);

        if resolution.cancelled {
            break;
        }
    }

    if resolution.cancelled {
        resolution.dataset = Dataset::new();
    }

    resolution
}

// -- Tests -------------------------------------------------------------------
