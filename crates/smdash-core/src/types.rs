use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// One observation: a single network's metrics for a single calendar day.
///
/// Rows whose date fails to parse never make it into a table; numeric fields
/// missing in the source default to zero. The same (date, network) pair may
/// appear more than once — duplicates are summed wherever aggregation
/// happens, never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub date: NaiveDate,
    pub network: String,
    pub impressions: u64,
    pub reach: u64,
    pub engagements: u64,
    pub reactions: u64,
    pub interactions: u64,
    pub new_followers: u64,
}

impl MetricRecord {
    /// Value of the named metric for this record.
    #[must_use]
    pub fn metric(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Impressions => self.impressions,
            Metric::Reach => self.reach,
            Metric::Engagements => self.engagements,
            Metric::Reactions => self.reactions,
            Metric::Interactions => self.interactions,
            Metric::NewFollowers => self.new_followers,
        }
    }

    /// Per-row engagement rate in percent; 0.0 when impressions are zero.
    #[must_use]
    pub fn engagement_rate(&self) -> f64 {
        engagement_rate(self.engagements, self.impressions)
    }
}

/// The six summable metric columns of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Impressions,
    Reach,
    Engagements,
    Reactions,
    Interactions,
    NewFollowers,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Impressions,
        Metric::Reach,
        Metric::Engagements,
        Metric::Reactions,
        Metric::Interactions,
        Metric::NewFollowers,
    ];

    /// Human-readable label used in text output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Metric::Impressions => "impressions",
            Metric::Reach => "reach",
            Metric::Engagements => "engagements",
            Metric::Reactions => "reactions",
            Metric::Interactions => "interactions",
            Metric::NewFollowers => "new followers",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive calendar-day range with `start <= end` expected from callers.
///
/// A reversed range is not an error anywhere in the engine — it simply
/// matches no records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Signed day count `end - start` (inclusive length minus one).
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// The adjacent, equal-length window ending the day before `start`.
    ///
    /// No validation of the result: a window predating the earliest record is
    /// expected and filters to an empty comparison slice.
    #[must_use]
    pub fn previous(&self) -> DateRange {
        let duration = self.duration_days();
        DateRange {
            start: self.start - Duration::days(duration + 1),
            end: self.start - Duration::days(1),
        }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A date range plus the set of allowed networks (exact string match).
#[derive(Debug, Clone)]
pub struct RecordFilter {
    pub range: DateRange,
    pub networks: HashSet<String>,
}

impl RecordFilter {
    #[must_use]
    pub fn new(range: DateRange, networks: impl IntoIterator<Item = String>) -> Self {
        Self {
            range,
            networks: networks.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn matches(&self, record: &MetricRecord) -> bool {
        self.range.contains(record.date) && self.networks.contains(&record.network)
    }
}

/// Summed metrics over some slice of records, with the derived engagement
/// rate (ratio of sums, percent). All fields are zero for an empty slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricTotals {
    pub impressions: u64,
    pub reach: u64,
    pub engagements: u64,
    pub reactions: u64,
    pub interactions: u64,
    pub new_followers: u64,
    pub engagement_rate: f64,
}

impl MetricTotals {
    /// Value of the named summed metric.
    #[must_use]
    pub fn metric(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Impressions => self.impressions,
            Metric::Reach => self.reach,
            Metric::Engagements => self.engagements,
            Metric::Reactions => self.reactions,
            Metric::Interactions => self.interactions,
            Metric::NewFollowers => self.new_followers,
        }
    }
}

/// Engagements over impressions in percent, defined as 0.0 when impressions
/// are zero. Shared by per-row, per-group, and overall rate calculations.
#[must_use]
pub fn engagement_rate(engagements: u64, impressions: u64) -> f64 {
    if impressions == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let rate = engagements as f64 / impressions as f64 * 100.0;
    rate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn record(date: NaiveDate, network: &str) -> MetricRecord {
        MetricRecord {
            date,
            network: network.to_string(),
            impressions: 0,
            reach: 0,
            engagements: 0,
            reactions: 0,
            interactions: 0,
            new_followers: 0,
        }
    }

    #[test]
    fn previous_of_september_is_all_of_august() {
        let range = DateRange::new(day(2025, 9, 1), day(2025, 9, 30));
        let prev = range.previous();
        assert_eq!(prev.start, day(2025, 8, 1));
        assert_eq!(prev.end, day(2025, 8, 31));
    }

    #[test]
    fn previous_of_single_day_is_the_day_before() {
        let range = DateRange::new(day(2025, 9, 15), day(2025, 9, 15));
        let prev = range.previous();
        assert_eq!(prev.start, day(2025, 9, 14));
        assert_eq!(prev.end, day(2025, 9, 14));
    }

    #[test]
    fn previous_window_is_adjacent_and_equal_length() {
        let range = DateRange::new(day(2025, 10, 10), day(2025, 11, 2));
        let prev = range.previous();
        assert_eq!(prev.duration_days(), range.duration_days());
        assert_eq!(prev.end + Duration::days(1), range.start);
    }

    #[test]
    fn engagement_rate_zero_impressions_is_zero() {
        assert_eq!(engagement_rate(50, 0), 0.0);
    }

    #[test]
    fn engagement_rate_is_ratio_of_sums_in_percent() {
        let rate = engagement_rate(20, 300);
        assert!((rate - 6.67).abs() < 0.01, "got {rate}");
    }

    #[test]
    fn filter_matches_on_range_and_network() {
        let filter = RecordFilter::new(
            DateRange::new(day(2025, 9, 1), day(2025, 9, 30)),
            ["LinkedIn".to_string()],
        );
        assert!(filter.matches(&record(day(2025, 9, 1), "LinkedIn")));
        assert!(filter.matches(&record(day(2025, 9, 30), "LinkedIn")));
        assert!(!filter.matches(&record(day(2025, 10, 1), "LinkedIn")));
        assert!(!filter.matches(&record(day(2025, 9, 15), "Instagram")));
    }

    #[test]
    fn network_match_is_exact_string_equality() {
        let filter = RecordFilter::new(
            DateRange::new(day(2025, 9, 1), day(2025, 9, 30)),
            ["LinkedIn".to_string()],
        );
        assert!(!filter.matches(&record(day(2025, 9, 15), "linkedin")));
    }

    #[test]
    fn metric_accessor_covers_all_columns() {
        let mut rec = record(day(2025, 9, 1), "X");
        rec.impressions = 1;
        rec.reach = 2;
        rec.engagements = 3;
        rec.reactions = 4;
        rec.interactions = 5;
        rec.new_followers = 6;
        let values: Vec<u64> = Metric::ALL.iter().map(|&m| rec.metric(m)).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn metric_serializes_snake_case() {
        let json = serde_json::to_string(&Metric::NewFollowers).expect("serialize");
        assert_eq!(json, "\"new_followers\"");
    }
}
