use smdash_core::MetricRecord;

const HEADER: &str = "date;network;impressions;reach;engagements;reactions;interactions;new_followers";

/// Render the filtered slice as semicolon-delimited text with a header row.
///
/// Dates are `YYYY-MM-DD`; rows follow slice order. An empty slice yields
/// just the header line.
#[must_use]
pub fn export_delimited(records: &[MetricRecord]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for r in records {
        out.push_str(&format!(
            "{};{};{};{};{};{};{};{}\n",
            r.date.format("%Y-%m-%d"),
            r.network,
            r.impressions,
            r.reach,
            r.engagements,
            r.reactions,
            r.interactions,
            r.new_followers,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{day, record};

    #[test]
    fn empty_slice_exports_header_only() {
        let out = export_delimited(&[]);
        assert_eq!(out, format!("{HEADER}\n"));
    }

    #[test]
    fn rows_are_semicolon_delimited_in_slice_order() {
        let records = vec![
            record(day(2025, 9, 1), "LinkedIn", 100, 10),
            record(day(2025, 9, 2), "Instagram", 200, 20),
        ];
        let out = export_delimited(&records);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "2025-09-01;LinkedIn;100;0;10;0;0;0");
        assert_eq!(lines[2], "2025-09-02;Instagram;200;0;20;0;0;0");
    }

    #[test]
    fn header_names_all_eight_columns() {
        let out = export_delimited(&[]);
        assert_eq!(out.lines().next().unwrap().split(';').count(), 8);
    }
}
