//! KPI aggregation and period-over-period deltas.

use serde::Serialize;
use smdash_core::{engagement_rate, MetricRecord, MetricTotals};

/// Sum every metric column over the slice and derive the engagement rate.
///
/// Exact `u64` accumulation, order-independent; an empty slice gives all-zero
/// totals with a 0.0 rate.
#[must_use]
pub fn aggregate(records: &[MetricRecord]) -> MetricTotals {
    let mut totals = MetricTotals::default();
    for r in records {
        totals.impressions += r.impressions;
        totals.reach += r.reach;
        totals.engagements += r.engagements;
        totals.reactions += r.reactions;
        totals.interactions += r.interactions;
        totals.new_followers += r.new_followers;
    }
    totals.engagement_rate = engagement_rate(totals.engagements, totals.impressions);
    totals
}

/// Percentage change from `previous` to `current`.
///
/// Defined as 0.0 when the baseline is zero — "no data in the prior period"
/// and "the prior period really was zero" are deliberately collapsed into the
/// same no-baseline answer.
#[must_use]
pub fn pct_delta(current: u64, previous: u64) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let delta = (current as f64 - previous as f64) / previous as f64 * 100.0;
    delta
}

/// Deltas for the five KPI cards.
///
/// All values are percentages except `engagement_rate_points`, which is the
/// raw point difference between the two periods' rates (a percentage of a
/// percentage would be misleading on a ratio metric).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct KpiDeltas {
    pub impressions: f64,
    pub reach: f64,
    pub engagements: f64,
    pub new_followers: f64,
    pub engagement_rate_points: f64,
}

/// Current and previous period totals plus the card deltas.
#[derive(Debug, Clone, Serialize)]
pub struct KpiOverview {
    pub current: MetricTotals,
    pub previous: MetricTotals,
    pub deltas: KpiDeltas,
}

/// Build the KPI card overview from two already-aggregated periods.
#[must_use]
pub fn kpi_overview(current: MetricTotals, previous: MetricTotals) -> KpiOverview {
    let deltas = KpiDeltas {
        impressions: pct_delta(current.impressions, previous.impressions),
        reach: pct_delta(current.reach, previous.reach),
        engagements: pct_delta(current.engagements, previous.engagements),
        new_followers: pct_delta(current.new_followers, previous.new_followers),
        engagement_rate_points: current.engagement_rate - previous.engagement_rate,
    };
    KpiOverview {
        current,
        previous,
        deltas,
    }
}
