use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use std::fmt::Write;

pub const DEFAULT_INPUT_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_OUTPUT_FORMAT: &str = "%b %Y";

/// How the first column of a delimited row becomes a chart label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelFormat {
    Raw,
    Date { input: String, output: String },
}

impl Default for LabelFormat {
    fn default() -> Self {
        Self::Date {
            input: DEFAULT_INPUT_FORMAT.to_string(),
            output: DEFAULT_OUTPUT_FORMAT.to_string(),
        }
    }
}

impl LabelFormat {
    /// Accepts `raw`, `date`, or `date:<input>|<output>`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("raw") {
            return Some(Self::Raw);
        }
        if value.eq_ignore_ascii_case("date") {
            return Some(Self::default());
        }

        let formats = value.strip_prefix("date:")?;
        let (input, output) = formats.split_once('|')?;
        if !is_valid_format(input) || !is_valid_format(output) {
            return None;
        }
        Some(Self::Date {
            input: input.to_string(),
            output: output.to_string(),
        })
    }

    pub fn format(&self, period: &str) -> String {
        let period = period.trim();
        match self {
            Self::Raw => period.to_string(),
            Self::Date { input, output } => {
                let Ok(date) = NaiveDate::parse_from_str(period, input) else {
                    return period.to_string();
                };
                let mut label = String::new();
                match write!(label, "{}", date.format(output)) {
                    Ok(()) => label,
                    Err(_) => period.to_string(),
                }
            }
        }
    }
}

fn is_valid_format(format: &str) -> bool {
    !format.is_empty() && StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}
