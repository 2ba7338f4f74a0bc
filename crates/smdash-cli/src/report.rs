//! Reporting command handlers for the CLI.
//!
//! Each command fetches the export directly — no running server needed — and
//! prints engine output to stdout. Fetch failures abort the invocation; there
//! is no partial report.

use std::time::Duration;

use chrono::NaiveDate;
use smdash_core::{AppConfig, DateRange, MetricRecord, NetworksFile, RecordFilter};
use smdash_engine::{
    aggregate, answer, export_delimited, filter_records, kpi_overview, monthly_rollup,
    KpiOverview, RollupRow,
};
use smdash_source::fetch_export;

/// Resolved period selection from the command line.
pub(crate) struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub networks: Option<Vec<String>>,
}

impl Period {
    fn range(&self) -> DateRange {
        DateRange::new(self.start, self.end)
    }

    fn filter(&self, networks_file: &NetworksFile) -> RecordFilter {
        let networks = self
            .networks
            .clone()
            .unwrap_or_else(|| networks_file.names());
        RecordFilter::new(self.range(), networks)
    }
}

async fn load_table(config: &AppConfig) -> anyhow::Result<Vec<MetricRecord>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .user_agent(config.fetch_user_agent.clone())
        .build()?;
    let records = fetch_export(&client, &config.export_url).await?;
    tracing::info!(rows = records.len(), "export loaded");
    Ok(records)
}

/// Print the KPI overview and the month×network rollup for the period.
pub(crate) async fn run_report(
    config: &AppConfig,
    networks_file: &NetworksFile,
    period: &Period,
) -> anyhow::Result<()> {
    let table = load_table(config).await?;
    let filter = period.filter(networks_file);
    let comparison = filter.range.previous();

    let current_slice = filter_records(&table, &filter);
    let previous_slice = filter_records(
        &table,
        &RecordFilter::new(comparison, filter.networks.iter().cloned()),
    );

    let overview = kpi_overview(aggregate(&current_slice), aggregate(&previous_slice));
    println!("{}", render_overview(filter.range, comparison, &overview));

    let rollup = monthly_rollup(&current_slice);
    if !rollup.is_empty() {
        println!();
        println!("{}", render_rollup(&rollup));
    }

    Ok(())
}

/// Print one keyword answer over the period's filtered slice.
pub(crate) async fn run_ask(
    config: &AppConfig,
    networks_file: &NetworksFile,
    period: &Period,
    question: &str,
) -> anyhow::Result<()> {
    let table = load_table(config).await?;
    let slice = filter_records(&table, &period.filter(networks_file));
    println!("{}", answer(question, &slice, &networks_file.networks));
    Ok(())
}

/// Write the period's filtered slice as delimited text to stdout.
pub(crate) async fn run_export(
    config: &AppConfig,
    networks_file: &NetworksFile,
    period: &Period,
) -> anyhow::Result<()> {
    let table = load_table(config).await?;
    let slice = filter_records(&table, &period.filter(networks_file));
    print!("{}", export_delimited(&slice));
    Ok(())
}

fn render_overview(period: DateRange, comparison: DateRange, overview: &KpiOverview) -> String {
    let mut out = format!(
        "Period {} → {} (vs {} → {})\n",
        period.start, period.end, comparison.start, comparison.end
    );
    out.push_str(&format!(
        "{:<16} {:>12} {:>10}\n",
        "KPI", "Value", "Delta"
    ));
    for (label, value, delta) in [
        (
            "Impressions",
            overview.current.impressions,
            overview.deltas.impressions,
        ),
        ("Reach", overview.current.reach, overview.deltas.reach),
        (
            "Engagements",
            overview.current.engagements,
            overview.deltas.engagements,
        ),
        (
            "New followers",
            overview.current.new_followers,
            overview.deltas.new_followers,
        ),
    ] {
        out.push_str(&format!(
            "{label:<16} {value:>12} {:>10}\n",
            format!("{delta:+.1}%")
        ));
    }
    out.push_str(&format!(
        "{:<16} {:>11.2}% {:>10}",
        "Engagement rate",
        overview.current.engagement_rate,
        format!("{:+.2} pts", overview.deltas.engagement_rate_points)
    ));
    out
}

fn render_rollup(rows: &[RollupRow]) -> String {
    let mut out = format!(
        "{:<8} {:<12} {:>12} {:>12} {:>12} {:>8}\n",
        "Month", "Network", "Impressions", "Engagements", "Followers", "Rate"
    );
    for row in rows {
        out.push_str(&format!(
            "{:<8} {:<12} {:>12} {:>12} {:>12} {:>7.2}%\n",
            row.month,
            row.network,
            row.totals.impressions,
            row.totals.engagements,
            row.totals.new_followers,
            row.totals.engagement_rate
        ));
    }
    out.pop();
    out
}
