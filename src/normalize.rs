use crate::labels::LabelFormat;
use crate::models::{Activity, ActivityRecord, ActivityReport, ActivitySeries, ActivityTotals};
use serde_json::Value;

pub const DELIMITER: char = ';';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    Monthly,
    Yearly,
}

impl Grouping {
    pub fn key(self) -> &'static str {
        match self {
            Grouping::Monthly => "monthly",
            Grouping::Yearly => "yearly",
        }
    }
}

/// Parses a distance field, accepting `,` as the decimal separator.
pub fn parse_number(field: &str) -> Option<f64> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    field
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

pub fn parse_records(raw: &str) -> Vec<ActivityRecord> {
    raw.trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> ActivityRecord {
    let field_count = line.split(DELIMITER).count();
    let mut fields = line.split(DELIMITER);
    let period = fields.next().unwrap_or_default().trim().to_string();
    let mut next_value = || fields.next().and_then(parse_number);
    let walked = next_value();
    let ran = next_value();
    let cycled = next_value();

    ActivityRecord {
        period,
        fields: field_count,
        walked,
        ran,
        cycled,
    }
}

pub fn normalize_records(records: &[ActivityRecord], format: &LabelFormat) -> ActivitySeries {
    let mut series = ActivitySeries::with_capacity(records.len());
    for record in records {
        series.push(format.format(&record.period), record.values());
    }
    series
}

pub fn normalize(raw: &str, format: &LabelFormat) -> ActivitySeries {
    normalize_records(&parse_records(raw), format)
}

pub fn aggregate(records: &[ActivityRecord]) -> ActivityTotals {
    let mut totals = ActivityTotals::default();
    for record in records {
        totals.add(record.values());
    }
    totals
}

pub fn report_from_text(raw: &str, format: &LabelFormat) -> ActivityReport {
    let records = parse_records(raw);
    ActivityReport {
        timeline: normalize_records(&records, format),
        yearly: None,
        totals: Some(aggregate(&records)),
    }
}

/// Flat form: `{ labels: [...], walked: [...], ran: [...], cycled: [...] }`.
pub fn normalize_flat(doc: &Value) -> ActivitySeries {
    let Some(labels) = doc.get("labels").and_then(Value::as_array) else {
        return ActivitySeries::default();
    };

    let columns = Activity::ALL.map(|activity| {
        doc.get(activity.key())
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    });

    let mut series = ActivitySeries::with_capacity(labels.len());
    for (index, label) in labels.iter().enumerate() {
        let values = columns.map(|column| column.get(index).and_then(json_number));
        series.push(json_label(label), values);
    }
    series
}

/// Grouped form: `{ monthly: { "<period>": {walked, ran, cycled} }, yearly: {...} }`.
pub fn normalize_grouped(doc: &Value, grouping: Grouping) -> ActivitySeries {
    let Some(groups) = doc.get(grouping.key()).and_then(Value::as_object) else {
        return ActivitySeries::default();
    };

    let mut series = ActivitySeries::with_capacity(groups.len());
    for (period, entry) in groups {
        series.push(period.as_str(), entry_values(entry));
    }
    series
}

pub fn report_from_json(doc: &Value) -> ActivityReport {
    if doc.get("labels").is_some() {
        let timeline = normalize_flat(doc);
        let totals = timeline.totals();
        return ActivityReport {
            timeline,
            yearly: None,
            totals: Some(totals),
        };
    }

    let timeline = normalize_grouped(doc, Grouping::Monthly);
    let yearly = doc
        .get(Grouping::Yearly.key())
        .map(|_| normalize_grouped(doc, Grouping::Yearly));

    let totals = match doc.get("totals").filter(|value| value.is_object()) {
        Some(totals) => {
            let mut parsed = ActivityTotals::default();
            parsed.add(entry_values(totals));
            parsed
        }
        None => match &yearly {
            Some(yearly) if !yearly.is_empty() => yearly.totals(),
            _ => timeline.totals(),
        },
    };

    ActivityReport {
        timeline,
        yearly,
        totals: Some(totals),
    }
}

fn entry_values(entry: &Value) -> [Option<f64>; 3] {
    Activity::ALL.map(|activity| entry.get(activity.key()).and_then(json_number))
}

fn json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number
            .as_f64()
            .filter(|value| value.is_finite() && *value >= 0.0),
        Value::String(text) => parse_number(text),
        _ => None,
    }
}

fn json_label(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    }
}
