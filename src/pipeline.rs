//! Runs one request from fetch through filtering to artifact naming.

use log::{info, warn};
use tokio_util::sync::CancellationToken;

use crate::dataset::{Dataset, DATE_TIME, STATION_NAME};
use crate::error::ObsError;
use crate::export::artifact_name;
use crate::fetch::orchestrator::resolve;
use crate::fetch::yearly::YearlyArchive;
use crate::fetch::DailyArchive;
use crate::reading::{is_noon, normalise_compact};
use crate::request::{Frequency, ObsRequest, StationCode};

/// A completed request: the reconciled records and their artifact name.
#[derive(Debug)]
pub struct ObsExport {
    pub dataset: Dataset,
    pub file_name: String,
}

/// Fetches, normalises, filters, and names one validated request.
///
/// Fetch trouble never surfaces here; only a cancelled run or a dataset
/// with nothing left in it ends without an export.
pub async fn run(
    request: &ObsRequest,
    yearly: &impl YearlyArchive,
    daily: &impl DailyArchive,
    cancel: &CancellationToken,
) -> Result<ObsExport, ObsError> {
    info!(
        "fetching station {} over {}",
        request.station,
        request.dates.describe()
    );

    let resolution = resolve(yearly, daily, request.dates, &request.station, cancel).await;

    if resolution.cancelled {
        return Err(ObsError::Cancelled);
    }

    info!(
        "read {} of {} files, {} matching records, {} failed units",
        resolution.files_read,
        resolution.days_attempted,
        resolution.dataset.len(),
        resolution.failures.len()
    );

    if resolution.dataset.is_empty() {
        return Err(ObsError::NoObservations {
            station: request.station.to_string(),
            span: request.dates.describe(),
        });
    }

    let mut dataset = resolution.dataset;
    dataset.rewrite_column(DATE_TIME, normalise_compact);

    if request.frequency == Frequency::Daily {
        let before = dataset.len();
        dataset.retain_where(DATE_TIME, is_noon);

        if dataset.is_empty() {
            return Err(ObsError::NoNoonObservations {
                station: request.station.to_string(),
                count: before,
            });
        }
        info!("retained {} noon records of {}", dataset.len(), before);
    }

    let station_name = station_label(&dataset, &request.station);
    let file_name = artifact_name(&station_name, request.dates, request.frequency);
    info!("export ready as {}", file_name);

    Ok(ObsExport { dataset, file_name })
}

/// First distinct station name in the aggregate, else the requested code.
fn station_label(dataset: &Dataset, station: &StationCode) -> String {
    let names = dataset.distinct_values(STATION_NAME);
    if names.len() > 1 {
        warn!("multiple station names in result: {}", names.join(", "));
    }

    names
        .into_iter()
        .next()
        .unwrap_or_else(|| station.to_string())
}

// -- Tests -------------------------------------------------------------------
