//! Keyword chat answerer over the currently filtered slice.
//!
//! Pure function of the question text and the slice the dashboard currently
//! shows — it answers "in the current view", never globally. Matching is
//! plain lowercase substring containment; there is no fuzzy matching and no
//! conversational state (history is the caller's concern).

use smdash_core::{Metric, MetricRecord, NetworkConfig};

const HELP: &str = "I can answer questions about impressions, engagements, \
followers, reach, or your best day — for example \"how many impressions on LinkedIn\".";

const NO_DATA: &str = "Not enough data in the selected period to answer that.";

#[derive(Debug, Clone, Copy)]
enum Intent {
    Sum(Metric),
    BestDay,
}

/// Intent keyword sets, tested in this order: the first set containing a
/// matching keyword wins when a question mixes several topics. Keywords keep
/// the source report's wording alongside the English ones so either phrasing
/// lands on the same intent.
const INTENTS: &[(Intent, &[&str])] = &[
    (Intent::Sum(Metric::Impressions), &["impression", "vue", "views"]),
    (Intent::Sum(Metric::Engagements), &["engagement", "reaction", "like"]),
    (
        Intent::Sum(Metric::NewFollowers),
        &["abonn", "follower", "subscriber"],
    ),
    (Intent::BestDay, &["record", "best", "top", "meilleur"]),
    (Intent::Sum(Metric::Reach), &["portee", "portée", "reach"]),
];

/// Answer a free-text question against the filtered slice.
///
/// Two passes over the lowercased question:
/// 1. Network pass — the first configured network whose name or alias is a
///    substring narrows the slice to that network. Configuration order is
///    the priority order; the one-letter "x" alias matching inside unrelated
///    words is a known limitation of substring matching, kept on purpose.
/// 2. Intent pass — first matching [`INTENTS`] entry wins. Sum intents
///    report the scoped total with space-grouped thousands; the best-day
///    intent reports the top-engagement record (first in slice order on
///    ties). No intent match returns the fixed help text.
#[must_use]
pub fn answer(question: &str, records: &[MetricRecord], networks: &[NetworkConfig]) -> String {
    let q = question.to_lowercase();

    let matched = networks.iter().find(|n| {
        q.contains(&n.name.to_lowercase()) || n.aliases.iter().any(|a| q.contains(a.as_str()))
    });

    let scoped: Vec<&MetricRecord> = match matched {
        Some(n) => records.iter().filter(|r| r.network == n.name).collect(),
        None => records.iter().collect(),
    };
    let scope_label = matched.map_or("all networks", |n| n.name.as_str());

    for (intent, keywords) in INTENTS {
        if keywords.iter().any(|k| q.contains(k)) {
            return match intent {
                Intent::Sum(metric) => {
                    let total: u64 = scoped.iter().map(|r| r.metric(*metric)).sum();
                    format!(
                        "Total {} for {} over the selected period: {}.",
                        metric.label(),
                        scope_label,
                        format_grouped(total)
                    )
                }
                Intent::BestDay => best_day(&scoped),
            };
        }
    }

    HELP.to_string()
}

/// The record with the most engagements; the first one in slice order wins
/// ties, matching table order.
fn best_day(records: &[&MetricRecord]) -> String {
    let mut best: Option<&MetricRecord> = None;
    for r in records {
        if best.is_none_or(|b| r.engagements > b.engagements) {
            best = Some(r);
        }
    }
    match best {
        Some(r) => format!(
            "Your best day was {} on {} with {} engagements.",
            r.date.format("%Y-%m-%d"),
            r.network,
            format_grouped(r.engagements)
        ),
        None => NO_DATA.to_string(),
    }
}

/// Integer with space-grouped thousands: `4500` becomes `"4 500"`.
fn format_grouped(value: u64) -> String {
    let digits: Vec<char> = value.to_string().chars().collect();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(*c);
    }
    out
}
