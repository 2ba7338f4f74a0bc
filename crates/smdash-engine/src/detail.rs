use serde::Serialize;
use smdash_core::MetricRecord;

/// A filtered record paired with its own per-row engagement rate.
#[derive(Debug, Clone, Serialize)]
pub struct DetailRow {
    #[serde(flatten)]
    pub record: MetricRecord,
    /// Engagements over impressions for this row alone, percent; 0.0 when
    /// the row has no impressions.
    pub engagement_rate: f64,
}

/// The day-by-day detail table: every record of the slice, in slice order,
/// with its per-row rate.
#[must_use]
pub fn detail_rows(records: &[MetricRecord]) -> Vec<DetailRow> {
    records
        .iter()
        .map(|r| DetailRow {
            engagement_rate: r.engagement_rate(),
            record: r.clone(),
        })
        .collect()
}
