//! Chart-oriented projections of the filtered slice: per-network daily and
//! cumulative series, and per-network share of an overall total.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use smdash_core::{Metric, MetricRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: u64,
}

/// One network's points, date-ascending (inherited from the filtered slice).
#[derive(Debug, Clone, Serialize)]
pub struct NetworkSeries {
    pub network: String,
    pub points: Vec<SeriesPoint>,
}

/// A network's summed metric and its share of the overall total in percent.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkShare {
    pub network: String,
    pub total: u64,
    pub share_pct: f64,
}

/// Point-in-time series of `metric` per network.
///
/// Expects the slice date-sorted as produced by the period filter; points
/// keep that order. Networks are returned alphabetically. Duplicate
/// (date, network) rows stay separate points — the model never deduplicates.
#[must_use]
pub fn daily_series(records: &[MetricRecord], metric: Metric) -> Vec<NetworkSeries> {
    let mut by_network: BTreeMap<&str, Vec<SeriesPoint>> = BTreeMap::new();
    for r in records {
        by_network
            .entry(r.network.as_str())
            .or_default()
            .push(SeriesPoint {
                date: r.date,
                value: r.metric(metric),
            });
    }
    collect_series(by_network)
}

/// Running-sum series of `metric` per network, in date order.
///
/// This is the cumulative-growth view: each point carries the network's
/// running total up to and including that record.
#[must_use]
pub fn cumulative_series(records: &[MetricRecord], metric: Metric) -> Vec<NetworkSeries> {
    let mut by_network: BTreeMap<&str, Vec<SeriesPoint>> = BTreeMap::new();
    let mut running: BTreeMap<&str, u64> = BTreeMap::new();
    for r in records {
        let sum = running.entry(r.network.as_str()).or_insert(0);
        *sum += r.metric(metric);
        by_network
            .entry(r.network.as_str())
            .or_default()
            .push(SeriesPoint {
                date: r.date,
                value: *sum,
            });
    }
    collect_series(by_network)
}

/// Per-network totals of `metric` with each network's share of the overall
/// total in percent; every share is 0.0 when the overall total is zero.
#[must_use]
pub fn network_share(records: &[MetricRecord], metric: Metric) -> Vec<NetworkShare> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.network.as_str()).or_insert(0) += r.metric(metric);
    }
    let overall: u64 = totals.values().sum();

    totals
        .into_iter()
        .map(|(network, total)| {
            let share_pct = if overall == 0 {
                0.0
            } else {
                #[allow(clippy::cast_precision_loss)]
                let pct = total as f64 / overall as f64 * 100.0;
                pct
            };
            NetworkShare {
                network: network.to_string(),
                total,
                share_pct,
            }
        })
        .collect()
}

fn collect_series(by_network: BTreeMap<&str, Vec<SeriesPoint>>) -> Vec<NetworkSeries> {
    by_network
        .into_iter()
        .map(|(network, points)| NetworkSeries {
            network: network.to_string(),
            points,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{day, record};

    fn sample() -> Vec<MetricRecord> {
        vec![
            record(day(2025, 9, 1), "Instagram", 200, 20),
            record(day(2025, 9, 1), "LinkedIn", 100, 10),
            record(day(2025, 9, 2), "LinkedIn", 300, 30),
        ]
    }

    #[test]
    fn daily_series_groups_per_network_alphabetically() {
        let series = daily_series(&sample(), Metric::Impressions);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].network, "Instagram");
        assert_eq!(series[1].network, "LinkedIn");
        assert_eq!(
            series[1].points,
            vec![
                SeriesPoint { date: day(2025, 9, 1), value: 100 },
                SeriesPoint { date: day(2025, 9, 2), value: 300 },
            ]
        );
    }

    #[test]
    fn cumulative_series_accumulates_per_network() {
        let series = cumulative_series(&sample(), Metric::Impressions);
        let linkedin = series
            .iter()
            .find(|s| s.network == "LinkedIn")
            .expect("LinkedIn series");
        let values: Vec<u64> = linkedin.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![100, 400]);
        let instagram = series
            .iter()
            .find(|s| s.network == "Instagram")
            .expect("Instagram series");
        assert_eq!(instagram.points.len(), 1);
        assert_eq!(instagram.points[0].value, 200);
    }

    #[test]
    fn shares_sum_to_one_hundred_percent() {
        let shares = network_share(&sample(), Metric::Impressions);
        let total_pct: f64 = shares.iter().map(|s| s.share_pct).sum();
        assert!((total_pct - 100.0).abs() < 1e-9, "got {total_pct}");
        let linkedin = shares.iter().find(|s| s.network == "LinkedIn").unwrap();
        assert_eq!(linkedin.total, 400);
        assert!((linkedin.share_pct - 400.0 / 600.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn all_zero_metric_gives_zero_shares() {
        let records = vec![
            record(day(2025, 9, 1), "LinkedIn", 0, 0),
            record(day(2025, 9, 2), "Instagram", 0, 0),
        ];
        let shares = network_share(&records, Metric::Impressions);
        assert_eq!(shares.len(), 2);
        assert!(shares.iter().all(|s| s.share_pct == 0.0 && s.total == 0));
    }

    #[test]
    fn empty_slice_gives_empty_series_and_shares() {
        assert!(daily_series(&[], Metric::Reach).is_empty());
        assert!(cumulative_series(&[], Metric::Reach).is_empty());
        assert!(network_share(&[], Metric::Reach).is_empty());
    }
}
