//! Month×network rollup of the filtered slice.

use std::collections::BTreeMap;

use serde::Serialize;
use smdash_core::{engagement_rate, MetricRecord, MetricTotals};

/// One rollup group: all records of a network within one calendar month.
#[derive(Debug, Clone, Serialize)]
pub struct RollupRow {
    /// `YYYY-MM` bucket key.
    pub month: String,
    pub network: String,
    pub totals: MetricTotals,
}

/// Re-aggregate the slice into (calendar month, network) buckets.
///
/// Exhaustive: every input record lands in exactly one group, so per-metric
/// group sums equal the ungrouped sums. The per-group engagement rate is the
/// ratio of the group's summed engagements to its summed impressions, not an
/// average of daily rates. Output is sorted ascending by (month, network) —
/// chronological then alphabetical — independent of input order.
#[must_use]
pub fn monthly_rollup(records: &[MetricRecord]) -> Vec<RollupRow> {
    let mut groups: BTreeMap<(String, String), MetricTotals> = BTreeMap::new();

    for r in records {
        let key = (r.date.format("%Y-%m").to_string(), r.network.clone());
        let totals = groups.entry(key).or_default();
        totals.impressions += r.impressions;
        totals.reach += r.reach;
        totals.engagements += r.engagements;
        totals.reactions += r.reactions;
        totals.interactions += r.interactions;
        totals.new_followers += r.new_followers;
    }

    groups
        .into_iter()
        .map(|((month, network), mut totals)| {
            totals.engagement_rate = engagement_rate(totals.engagements, totals.impressions);
            RollupRow {
                month,
                network,
                totals,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::testutil::{day, record};
    use smdash_core::Metric;

    #[test]
    fn groups_by_month_and_network() {
        let records = vec![
            record(day(2025, 9, 1), "LinkedIn", 100, 10),
            record(day(2025, 9, 15), "LinkedIn", 100, 10),
            record(day(2025, 10, 1), "LinkedIn", 50, 5),
            record(day(2025, 9, 2), "Instagram", 200, 20),
        ];
        let rollup = monthly_rollup(&records);
        let keys: Vec<_> = rollup
            .iter()
            .map(|r| (r.month.as_str(), r.network.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("2025-09", "Instagram"),
                ("2025-09", "LinkedIn"),
                ("2025-10", "LinkedIn"),
            ]
        );
        assert_eq!(rollup[1].totals.impressions, 200);
        assert_eq!(rollup[1].totals.engagements, 20);
    }

    #[test]
    fn rollup_conserves_every_metric() {
        let records = vec![
            record(day(2025, 9, 1), "LinkedIn", 100, 10),
            record(day(2025, 9, 30), "Instagram", 250, 25),
            record(day(2025, 10, 3), "X", 75, 2),
            record(day(2025, 11, 12), "Facebook", 60, 6),
        ];
        let rollup = monthly_rollup(&records);
        let whole = aggregate(&records);
        for metric in Metric::ALL {
            let grouped: u64 = rollup.iter().map(|r| r.totals.metric(metric)).sum();
            assert_eq!(grouped, whole.metric(metric), "metric {metric} not conserved");
        }
    }

    #[test]
    fn group_rate_is_ratio_of_sums_not_mean_of_ratios() {
        // Daily rates are 10% and 1%; mean would be 5.5%, ratio of sums is 2.8%.
        let records = vec![
            record(day(2025, 9, 1), "LinkedIn", 100, 10),
            record(day(2025, 9, 2), "LinkedIn", 400, 4),
        ];
        let rollup = monthly_rollup(&records);
        assert_eq!(rollup.len(), 1);
        assert!(
            (rollup[0].totals.engagement_rate - 2.8).abs() < 0.01,
            "got {}",
            rollup[0].totals.engagement_rate
        );
    }

    #[test]
    fn ordering_is_independent_of_input_order() {
        let mut records = vec![
            record(day(2025, 10, 1), "X", 10, 1),
            record(day(2025, 9, 1), "LinkedIn", 10, 1),
            record(day(2025, 9, 1), "Facebook", 10, 1),
        ];
        let forward = monthly_rollup(&records);
        records.reverse();
        let backward = monthly_rollup(&records);
        let fk: Vec<_> = forward.iter().map(|r| (&r.month, &r.network)).collect();
        let bk: Vec<_> = backward.iter().map(|r| (&r.month, &r.network)).collect();
        assert_eq!(fk, bk);
    }

    #[test]
    fn empty_slice_rolls_up_to_nothing() {
        assert!(monthly_rollup(&[]).is_empty());
    }
}
