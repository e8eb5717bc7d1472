use crate::labels::LabelFormat;
use std::{env, path::PathBuf};
use tracing::warn;

pub const DEFAULT_DATA_PATH: &str = "data/data.csv";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub port: u16,
    pub label_format: LabelFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            port: DEFAULT_PORT,
            label_format: LabelFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let data_path = lookup("ACTIVITY_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let label_format = match lookup("ACTIVITY_LABEL_FORMAT") {
            Some(value) => LabelFormat::parse(&value).unwrap_or_else(|| {
                warn!("ignoring unknown ACTIVITY_LABEL_FORMAT {value:?}");
                defaults.label_format
            }),
            None => defaults.label_format,
        };

        Self {
            data_path,
            port,
            label_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.label_format, LabelFormat::default());
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ACTIVITY_DATA_PATH", "/srv/workouts.json"),
            ("PORT", "9000"),
            ("ACTIVITY_LABEL_FORMAT", "raw"),
        ]));
        assert_eq!(config.data_path, PathBuf::from("/srv/workouts.json"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.label_format, LabelFormat::Raw);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "not-a-port"),
            ("ACTIVITY_LABEL_FORMAT", "weekly"),
        ]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.label_format, LabelFormat::default());
    }

    #[test]
    fn invalid_chrono_label_format_falls_back() {
        let config = AppConfig::from_lookup(lookup(&[(
            "ACTIVITY_LABEL_FORMAT",
            "date:%Y-%m-%d|%Q",
        )]));
        assert_eq!(config.label_format, LabelFormat::default());
    }
}
