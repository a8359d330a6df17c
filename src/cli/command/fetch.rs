use anyhow::{anyhow, Result};
use tokio_util::sync::CancellationToken;

use crate::{
    cli::{create_spinner, FetchArgs},
    export,
    fetch::{yearly::UnavailableYearlyArchive, HttpDailyArchive},
    pipeline,
    request::{parse_date, DateSpec, ObsRequest},
};

use super::output_path;

pub async fn fetch(args: FetchArgs, cancel: CancellationToken) -> Result<String> {
    let request = build_request(&args)?;

    let daily = HttpDailyArchive::new(&args.base_url)?;
    let yearly = UnavailableYearlyArchive;

    let bar = create_spinner(format!(
        "Fetching observations for station {}...",
        request.station
    ));
    let result = pipeline::run(&request, &yearly, &daily, &cancel).await?;
    bar.finish_with_message(format!("{} records fetched", result.dataset.len()));

    let path = output_path(args.out_dir, &result.file_name);
    export::write_csv(&result.dataset, &path)?;

    Ok(path.to_string_lossy().to_string())
}

fn build_request(args: &FetchArgs) -> Result<ObsRequest> {
    let dates = match (args.year, args.start.as_deref(), args.end.as_deref()) {
        (Some(year), None, None) => match args.end_year {
            Some(end_year) => DateSpec::YearRange {
                start_year: year,
                end_year,
            },
            None => DateSpec::SingleYear { year },
        },
        (None, Some(start), Some(end)) => DateSpec::ExactRange {
            start: parse_date(start)?,
            end: parse_date(end)?,
        },
        _ => return Err(anyhow!("specify either --year or both --start and --end")),
    };

    Ok(ObsRequest::new(&args.station, dates, args.frequency)?)
}

// -- Tests -------------------------------------------------------------------
