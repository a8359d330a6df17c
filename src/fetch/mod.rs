//! Archive access: per-unit outcomes, transport errors, and the HTTP
//! daily tier.

pub mod daily;
pub mod orchestrator;
pub mod yearly;

use thiserror::Error;

use crate::calendar::ObsDate;
use crate::dataset::Dataset;

/// Archive root serving the per-day observation files.
pub const DEFAULT_BASE_URL: &str =
    "https://www.for.gov.bc.ca/ftp/HPR/external/!publish/BCWS_DATA_MART";

/// Result of fetching one unit, a day file or a consolidated year.
///
/// `Failed` and `Empty` are both non-fatal: the run records them and
/// carries on.
#[derive(Debug)]
pub enum FetchOutcome {
    Rows(Dataset),
    Empty,
    Failed(String),
}

/// One unit that contributed nothing, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct UnitFailure {
    pub unit: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("archive returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
}

/// A source of per-day observation files.
pub trait DailyArchive {
    async fn fetch_day(&self, date: ObsDate) -> Result<String, ArchiveError>;
}

/// Production daily tier backed by the BCWS data mart.
pub struct HttpDailyArchive {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDailyArchive {
    pub fn new(base_url: &str) -> Result<Self, ArchiveError> {
        let client = reqwest::Client::builder().user_agent("bcws-obs").build()?;

        Ok(HttpDailyArchive {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resource address of one day file: `{base}/{year}/{date}.csv`.
    pub fn day_url(&self, date: ObsDate) -> String {
        format!("{}/{}/{}.csv", self.base_url, date.year, date)
    }
}

impl DailyArchive for HttpDailyArchive {
    async fn fetch_day(&self, date: ObsDate) -> Result<String, ArchiveError> {
        let url = self.day_url(date);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ArchiveError::Status {
                status: response.status(),
                url,
            });
        }

        Ok(response.text().await?)
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
pub mod testing {
    //! Canned archives shared by the strategy and pipeline tests.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{ArchiveError, DailyArchive};
    use crate::calendar::ObsDate;

    /// Serves canned text per day; unknown days either return a fallback
    /// text or a 404, and every call is counted.
    pub struct MapArchive {
        days: HashMap<ObsDate, String>,
        fallback: Option<String>,
        calls: AtomicUsize,
    }

    impl MapArchive {
        pub fn new() -> Self {
            MapArchive {
                days: HashMap::new(),
                fallback: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_day(mut self, date: ObsDate, text: &str) -> Self {
            self.days.insert(date, text.to_string());
            self
        }

        pub fn with_fallback(mut self, text: &str) -> Self {
            self.fallback = Some(text.to_string());
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DailyArchive for MapArchive {
        async fn fetch_day(&self, date: ObsDate) -> Result<String, ArchiveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(text) = self.days.get(&date) {
                return Ok(text.clone());
            }
            match &self.fallback {
                Some(text) => Ok(text.clone()),
                None => Err(ArchiveError::Status {
                    status: reqwest::StatusCode::NOT_FOUND,
                    url: date.to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn should_build_day_url() {
        let archive = HttpDailyArchive::new("https://example.org/mart/").unwrap();
        let date = ObsDate::new(2023, 1, 9).unwrap();

        assert_eq!(
            archive.day_url(date),
            "https://example.org/mart/2023/2023-01-09.csv"
        );
    }
}
