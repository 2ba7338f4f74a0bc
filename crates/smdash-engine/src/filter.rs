use smdash_core::{MetricRecord, RecordFilter};

/// Select the records matching the filter's date range and network set,
/// sorted ascending by date.
///
/// The sort is stable, so records sharing a date keep their original relative
/// order. A reversed range (start > end) matches nothing and yields an empty
/// vec rather than an error. Filtering an already-filtered slice with the
/// same filter returns an identical slice.
#[must_use]
pub fn filter_records(records: &[MetricRecord], filter: &RecordFilter) -> Vec<MetricRecord> {
    let mut matched: Vec<MetricRecord> = records
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect();
    matched.sort_by_key(|r| r.date);
    matched
}
