use anyhow::Result;
use chrono::{Datelike, Duration, Local};

use crate::{
    calendar::ObsDate,
    cli::{create_spinner, StationsArgs},
    fetch::{DailyArchive, HttpDailyArchive},
    reading::station_listing,
};

/// Prints the station code and name pairs reporting in one day file.
pub async fn stations(args: StationsArgs) -> Result<String> {
    let date = match &args.date {
        Some(raw) => raw.trim().parse()?,
        None => yesterday(),
    };

    let archive = HttpDailyArchive::new(&args.base_url)?;

    let bar = create_spinner(format!("Fetching station list for {}...", date));
    let text = archive.fetch_day(date).await?;
    let listing = station_listing(&text)?;
    bar.finish_with_message("Station list fetched");

    for (code, name) in &listing {
        println!("{:>8}  {}", code, name);
    }

    Ok(format!("{} stations reporting on {}", listing.len(), date))
}

// The archive publishes a day's file once the day completes, so the most
// recent complete file is yesterday's.
fn yesterday() -> ObsDate {
    let date = Local::now() - Duration::days(1);

    ObsDate {
        year: date.year() as u16,
        month: date.month() as u8,
        day: date.day() as u8,
    }
}
