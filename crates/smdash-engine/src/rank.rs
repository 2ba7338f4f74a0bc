use serde::Serialize;
use smdash_core::{Metric, MetricRecord};

/// A record with its 1-based position in a top-N ranking.
#[derive(Debug, Clone, Serialize)]
pub struct RankedRecord {
    pub rank: usize,
    pub record: MetricRecord,
}

/// The `min(n, len)` records with the largest value of `metric`, descending.
///
/// The sort is stable: records with equal values keep their relative order
/// from the input, so repeated calls over an unchanged slice return identical
/// output. Ranks are assigned by output position, which gives exact
/// duplicates distinct consecutive ranks.
#[must_use]
pub fn top_by(records: &[MetricRecord], metric: Metric, n: usize) -> Vec<RankedRecord> {
    let mut sorted: Vec<MetricRecord> = records.to_vec();
    sorted.sort_by(|a, b| b.metric(metric).cmp(&a.metric(metric)));
    sorted.truncate(n);
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, record)| RankedRecord {
            rank: i + 1,
            record,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{day, record};

    #[test]
    fn ranks_descending_by_metric() {
        let records = vec![
            record(day(2025, 9, 1), "LinkedIn", 10, 5),
            record(day(2025, 9, 2), "LinkedIn", 30, 15),
            record(day(2025, 9, 3), "LinkedIn", 20, 10),
        ];
        let top = top_by(&records, Metric::Engagements, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[0].record.engagements, 15);
        assert_eq!(top[1].rank, 2);
        assert_eq!(top[1].record.engagements, 10);
    }

    #[test]
    fn n_larger_than_slice_returns_everything_ranked() {
        let records = vec![
            record(day(2025, 9, 1), "LinkedIn", 10, 5),
            record(day(2025, 9, 2), "Instagram", 20, 8),
        ];
        let top = top_by(&records, Metric::Engagements, 3);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[0].record.engagements, 8);
        assert_eq!(top[1].rank, 2);
        assert_eq!(top[1].record.engagements, 5);
    }

    #[test]
    fn ties_keep_input_order_and_get_distinct_ranks() {
        let records = vec![
            record(day(2025, 9, 1), "LinkedIn", 10, 7),
            record(day(2025, 9, 2), "Instagram", 20, 7),
            record(day(2025, 9, 3), "X", 30, 7),
        ];
        let top = top_by(&records, Metric::Engagements, 3);
        let networks: Vec<_> = top.iter().map(|r| r.record.network.as_str()).collect();
        assert_eq!(networks, vec!["LinkedIn", "Instagram", "X"]);
        let ranks: Vec<_> = top.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let records = vec![
            record(day(2025, 9, 1), "LinkedIn", 10, 7),
            record(day(2025, 9, 2), "Instagram", 20, 7),
            record(day(2025, 9, 3), "X", 5, 9),
        ];
        let first = top_by(&records, Metric::Engagements, 3);
        let second = top_by(&records, Metric::Engagements, 3);
        let a: Vec<_> = first.iter().map(|r| (&r.record.network, r.rank)).collect();
        let b: Vec<_> = second.iter().map(|r| (&r.record.network, r.rank)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_slice_returns_empty() {
        assert!(top_by(&[], Metric::Impressions, 5).is_empty());
    }

    #[test]
    fn zero_n_returns_empty() {
        let records = vec![record(day(2025, 9, 1), "LinkedIn", 10, 5)];
        assert!(top_by(&records, Metric::Impressions, 0).is_empty());
    }
}
