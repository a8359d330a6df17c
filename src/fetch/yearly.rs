//! Consolidated yearly tier.

use crate::request::StationCode;

use super::FetchOutcome;

/// A source of consolidated whole-year observation sets.
///
/// Implementations report per-year trouble through `FetchOutcome::Failed`
/// rather than raising; the orchestrator treats anything but a non-empty
/// `Rows` as cause to fall back to the daily tier.
pub trait YearlyArchive {
    async fn fetch_year(&self, year: u16, station: &StationCode) -> FetchOutcome;
}

/// Stands in while the archive publishes no consolidated yearly resource.
///
/// Every request reports `Empty`, which routes the orchestrator down the
/// per-day path for the whole year.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableYearlyArchive;

impl YearlyArchive for UnavailableYearlyArchive {
    async fn fetch_year(&self, _year: u16, _station: &StationCode) -> FetchOutcome {
        FetchOutcome::Empty
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    #[tokio::test]
    async fn should_always_report_empty() {
        let archive = UnavailableYearlyArchive;
        let station = StationCode::new("119").unwrap();

        assert!(matches!(
            archive.fetch_year(2023, &station).await,
            FetchOutcome::Empty
        ));
    }
}
