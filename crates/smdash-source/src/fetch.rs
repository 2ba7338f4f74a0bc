//! Fetching and parsing the published CSV export.

use chrono::NaiveDate;
use smdash_core::MetricRecord;

use crate::SourceError;

/// Fetch the export and parse it into a record table.
///
/// The export is expected to carry eight positional columns: date, network,
/// impressions, reach, engagements, reactions, interactions, new followers.
/// A non-2xx status is a load failure; a body that parses to zero rows is
/// still a successful (empty) load.
///
/// # Errors
///
/// Returns [`SourceError::Http`] on network failure or a non-success status.
pub async fn fetch_export(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<MetricRecord>, SourceError> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(parse_export(&body))
}

/// Parse a CSV export body into records.
///
/// Total over any input: malformed rows are dropped, never fatal. The header
/// row is skipped; dates are day-first (`%d/%m/%Y`, falling back to
/// `%d-%m-%Y`); a row with an unparseable date or a missing network is
/// dropped whole; any missing or unparseable numeric field becomes zero.
/// Ragged rows are tolerated via the flexible reader.
#[must_use]
pub fn parse_export(body: &str) -> Vec<MetricRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut records = Vec::new();
    let mut dropped = 0_usize;

    for result in reader.records() {
        let Ok(row) = result else {
            dropped += 1;
            continue;
        };
        match parse_row(&row) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, kept = records.len(), "dropped unparseable export rows");
    }

    records
}

fn parse_row(row: &csv::StringRecord) -> Option<MetricRecord> {
    let date = parse_day_first(row.get(0)?.trim())?;
    let network = row.get(1)?.trim();
    if network.is_empty() {
        return None;
    }

    Some(MetricRecord {
        date,
        network: network.to_string(),
        impressions: metric_field(row, 2),
        reach: metric_field(row, 3),
        engagements: metric_field(row, 4),
        reactions: metric_field(row, 5),
        interactions: metric_field(row, 6),
        new_followers: metric_field(row, 7),
    })
}

fn parse_day_first(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d-%m-%Y"))
        .ok()
}

/// Numeric cell at `idx`, defaulting to zero when missing or unparseable.
///
/// Sheets export whole counts as `123` or `123.0` depending on the column's
/// history, so a float fallback truncates rather than dropping the row.
fn metric_field(row: &csv::StringRecord, idx: usize) -> u64 {
    let Some(raw) = row.get(idx) else {
        return 0;
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    if let Ok(v) = raw.parse::<u64>() {
        return v;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    raw.parse::<f64>()
        .map_or(0, |v| if v < 0.0 { 0 } else { v as u64 })
}
