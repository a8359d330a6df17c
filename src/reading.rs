//! Day-file parsing and timestamp handling.

use anyhow::Result;
use csv::StringRecord;

use crate::dataset::{Dataset, STATION_CODE, STATION_NAME};
use crate::request::StationCode;

/// Parses one day file and collects the rows whose STATION_CODE matches.
///
/// Every file carries its own header; the returned dataset uses that
/// header, leaving cross-file reconciliation to the caller's merge.
pub fn parse_day_file(text: &str, station: &StationCode) -> Result<Dataset> {
    let mut reader = csv_reader(text);
    let headers = reader.headers()?.clone();
    let code_col = position(&headers, STATION_CODE);

    let mut dataset = Dataset::new();
    for record in reader.records() {
        let record = record?;
        let code = code_col.and_then(|i| record.get(i)).unwrap_or("");
        if station.matches(code) {
            dataset.push_record(record_fields(&record, &headers));
        }
    }

    Ok(dataset)
}

/// Distinct station code and name pairs in a day file, in file order.
pub fn station_listing(text: &str) -> Result<Vec<(String, String)>> {
    let mut reader = csv_reader(text);
    let headers = reader.headers()?.clone();
    let code_col = position(&headers, STATION_CODE);
    let name_col = position(&headers, STATION_NAME);

    let mut listing: Vec<(String, String)> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let code = code_col.and_then(|i| record.get(i)).unwrap_or("");
        let name = name_col.and_then(|i| record.get(i)).unwrap_or("");

        if code.is_empty() {
            continue;
        }
        if !listing.iter().any(|(seen, _)| seen == code) {
            listing.push((code.to_string(), name.to_string()));
        }
    }

    Ok(listing)
}

/// Rewrites a compact `YYYYMMDDHH` stamp as `YYYY-MM-DD HH:00`.
///
/// The split is fixed-width with no calendar check; anything that is not
/// exactly ten ASCII digits passes through as found.
pub fn normalise_compact(raw: &str) -> String {
    if raw.len() == 10 && raw.bytes().all(|b| b.is_ascii_digit()) {
        format!(
            "{}-{}-{} {}:00",
            &raw[0..4],
            &raw[4..6],
            &raw[6..8],
            &raw[8..10]
        )
    } else {
        raw.to_string()
    }
}

/// True for normalised stamps taken at noon.
pub fn is_noon(stamp: &str) -> bool {
    stamp.ends_with(" 12:00")
}

fn csv_reader(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes())
}

fn position(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|header| header == name)
}

/// Pairs a record's cells with its file's header names.
fn record_fields(record: &StringRecord, headers: &StringRecord) -> Vec<(String, String)> {
    let mut fields = Vec::new();

    for (i, value) in record.iter().enumerate() {
        if let Some(header) = headers.get(i) {
            if !header.is_empty() {
                fields.push((header.to_string(), value.to_string()));
            }
        }
    }

    fields
}

// -- Tests -------------------------------------------------------------------
