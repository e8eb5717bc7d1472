use crate::models::{ActivityRecord, WorkoutSummary};
use chrono::{Datelike, NaiveDate};

/// Rolls records up per year (`YYYY`) and per month (`YYYY-MM`).
///
/// Rows with fewer than four fields, or whose period does not parse with
/// `date_format`, are left out of every bucket, including the overall totals.
pub fn summarize(records: &[ActivityRecord], date_format: &str) -> WorkoutSummary {
    let mut summary = WorkoutSummary::default();

    for record in records {
        if !record.is_complete() {
            continue;
        }
        let Ok(date) = NaiveDate::parse_from_str(record.period.trim(), date_format) else {
            continue;
        };
        let values = record.values();

        summary.totals.add(values);
        summary
            .yearly
            .entry(date.year().to_string())
            .or_default()
            .add(values);
        summary
            .monthly
            .entry(date.format("%Y-%m").to_string())
            .or_default()
            .add(values);
    }

    summary
}
