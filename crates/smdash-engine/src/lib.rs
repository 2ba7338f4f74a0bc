//! Pure analytics engine for smdash.
//!
//! Every function here is a total, side-effect-free computation over an
//! immutable slice of [`smdash_core::MetricRecord`]s: filtering by period and
//! network, KPI aggregation with period-over-period deltas, top-N ranking,
//! month×network rollups, chart series, plain-text export, and the keyword
//! chat answerer. Derived values are recomputed from scratch on every call;
//! nothing is mutated in place.

pub mod aggregate;
pub mod chat;
pub mod detail;
pub mod export;
pub mod filter;
pub mod rank;
pub mod rollup;
pub mod series;

pub use aggregate::{aggregate, kpi_overview, pct_delta, KpiDeltas, KpiOverview};
pub use chat::answer;
pub use detail::{detail_rows, DetailRow};
pub use export::export_delimited;
pub use filter::filter_records;
pub use rank::{top_by, RankedRecord};
pub use rollup::{monthly_rollup, RollupRow};
pub use series::{cumulative_series, daily_series, network_share, NetworkSeries, NetworkShare, SeriesPoint};
