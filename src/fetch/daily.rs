//! Per-day fetch over an inclusive date range.

use futures::{stream, StreamExt};
use log::warn;
use tokio_util::sync::CancellationToken;

use crate::calendar::{enumerate_days, ObsDate};
use crate::dataset::Dataset;
use crate::reading::parse_day_file;
use crate::request::StationCode;

use super::{DailyArchive, FetchOutcome, UnitFailure};

/// How many day files may be in flight at once.
const MAX_IN_FLIGHT: usize = 8;

/// What one pass over a date range produced.
#[derive(Debug)]
pub struct RangeFetch {
    pub outcome: FetchOutcome,
    pub days_attempted: usize,
    pub files_read: usize,
    pub failures: Vec<UnitFailure>,
    pub cancelled: bool,
}

impl RangeFetch {
    fn record_failure(&mut self, date: ObsDate, reason: String) {
        warn!("skipping {}: {}", date, reason);
        self.failures.push(UnitFailure {
            unit: date.to_string(),
            reason,
        });
    }
}

/// Fetches every day from `start` to `end` inclusive and accumulates the
/// rows matching `station`, in day order.
///
/// Day files download up to `MAX_IN_FLIGHT` at a time but land in the
/// aggregate in calendar order, so output does not depend on fetch timing.
/// A day that cannot be fetched or parsed is recorded and skipped; the
/// rest of the range still runs. Cancellation is honoured between days and
/// drops whatever had accumulated.
pub async fn fetch_range(
    archive: &impl DailyArchive,
    start: ObsDate,
    end: ObsDate,
    station: &StationCode,
    cancel: &CancellationToken,
) -> RangeFetch {
    let days = enumerate_days(start, end);

    let mut fetch = RangeFetch {
        outcome: FetchOutcome::Empty,
        days_attempted: 0,
        files_read: 0,
        failures: Vec::new(),
        cancelled: false,
    };
    let mut aggregate = Dataset::new();

    let mut fetches = stream::iter(days)
        .map(|date| async move { (date, archive.fetch_day(date).await) })
        .buffered(MAX_IN_FLIGHT);

    loop {
        if cancel.is_cancelled() {
            fetch.cancelled = true;
            return fetch;
        }

        let Some((date, fetched)) = fetches.next().await else {
            break;
        };

        fetch.days_attempted += 1;
        match fetched {
            Ok(text) => match parse_day_file(&text, station) {
                Ok(rows) => {
                    fetch.files_read += 1;
                    aggregate.merge(rows);
                }
                Err(e) => fetch.record_failure(date, e.to_string()),
            },
            Err(e) => fetch.record_failure(date, e.to_string()),
        }
    }

    if !aggregate.is_empty() {
        fetch.outcome = FetchOutcome::Rows(aggregate);
    }

    fetch
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;
    use crate::fetch::testing::MapArchive;

    fn date(day: u8) -> ObsDate {
        ObsDate::new(2023, 1, day).unwrap()
    }

    fn day_text(day: u8) -> String {
        format!(
            "DATE_TIME,STATION_CODE,STATION_NAME,HOURLY_TEMPERATURE\n\
             202301{:02}12,A,ALPHA,1.0\n\
             202301{:02}12,B,BRAVO,2.0\n",
            day, day
        )
    }

    fn station(code: &str) -> StationCode {
        StationCode::new(code).unwrap()
    }

    #[tokio::test]
    async fn should_accumulate_matching_rows_in_day_order() {
        let archive = MapArchive::new()
            .with_day(date(1), &day_text(1))
            .with_day(date(2), &day_text(2))
            .with_day(date(3), &day_text(3));

        let fetch = fetch_range(
            &archive,
            date(1),
            date(3),
            &station("A"),
            &CancellationToken::new(),
        )
        .await;

        assert_eq!(fetch.days_attempted, 3);
        assert_eq!(fetch.files_read, 3);
        assert!(fetch.failures.is_empty());

        let FetchOutcome::Rows(dataset) = fetch.outcome else {
            panic!("expected rows");
        };
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.get(0, "DATE_TIME"), Some("2023010112"));
        assert_eq!(dataset.get(1, "DATE_TIME"), Some("2023010212"));
        assert_eq!(dataset.get(2, "DATE_TIME"), Some("2023010312"));
    }

    #[tokio::test]
    async fn should_attempt_every_day_despite_failures() {
        let archive = MapArchive::new()
            .with_day(date(1), &day_text(1))
            .with_day(date(3), &day_text(3))
            .with_day(date(5), &day_text(5));

        let fetch = fetch_range(
            &archive,
            date(1),
            date(5),
            &station("A"),
            &CancellationToken::new(),
        )
        .await;

        assert_eq!(archive.calls(), 5);
        assert_eq!(fetch.days_attempted, 5);
        assert_eq!(fetch.files_read, 3);
        assert_eq!(fetch.failures.len(), 2);
        assert_eq!(fetch.failures[0].unit, "2023-01-02");
        assert_eq!(fetch.failures[1].unit, "2023-01-04");

        let FetchOutcome::Rows(dataset) = fetch.outcome else {
            panic!("expected rows");
        };
        assert_eq!(dataset.len(), 3);
    }

    #[tokio::test]
    async fn should_report_empty_when_nothing_matches() {
        let archive = MapArchive::new()
            .with_day(date(1), &day_text(1))
            .with_day(date(2), &day_text(2));

        let fetch = fetch_range(
            &archive,
            date(1),
            date(2),
            &station("ZZ"),
            &CancellationToken::new(),
        )
        .await;

        assert!(matches!(fetch.outcome, FetchOutcome::Empty));
        assert_eq!(fetch.days_attempted, 2);
        assert_eq!(fetch.files_read, 2);
    }

    #[tokio::test]
    async fn should_report_empty_when_every_day_fails() {
        let archive = MapArchive::new();

        let fetch = fetch_range(
            &archive,
            date(1),
            date(3),
            &station("A"),
            &CancellationToken::new(),
        )
        .await;

        assert!(matches!(fetch.outcome, FetchOutcome::Empty));
        assert_eq!(fetch.days_attempted, 3);
        assert_eq!(fetch.files_read, 0);
        assert_eq!(fetch.failures.len(), 3);
    }

    #[tokio::test]
    async fn should_stop_before_fetching_when_cancelled() {
        let archive = MapArchive::new().with_day(date(1), &day_text(1));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let fetch = fetch_range(&archive, date(1), date(3), &station("A"), &cancel).await;

        assert!(fetch.cancelled);
        assert!(matches!(fetch.outcome, FetchOutcome::Empty));
        assert_eq!(archive.calls(), 0);
        assert_eq!(fetch.days_attempted, 0);
    }
}
