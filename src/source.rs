use crate::labels::LabelFormat;
use crate::models::{ActivityRecord, ActivityReport};
use crate::normalize::{parse_records, report_from_json, report_from_text};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("activity data unavailable at {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("activity data at {path} is not valid JSON: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Delimited,
    Json,
}

impl SourceFormat {
    pub fn detect(path: &Path, body: &[u8]) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Self::Json,
            Some("csv" | "txt" | "tsv") => Self::Delimited,
            _ => match body.iter().find(|byte| !byte.is_ascii_whitespace()) {
                Some(b'{' | b'[') => Self::Json,
                _ => Self::Delimited,
            },
        }
    }
}

/// Raw file contents together with the format they were detected as.
#[derive(Debug, Clone)]
pub struct RawSource {
    pub path: PathBuf,
    pub format: SourceFormat,
    pub body: String,
}

impl RawSource {
    pub fn records(&self) -> Option<Vec<ActivityRecord>> {
        match self.format {
            SourceFormat::Delimited => Some(parse_records(&self.body)),
            SourceFormat::Json => None,
        }
    }

    pub fn into_report(self, labels: &LabelFormat) -> Result<ActivityReport, LoadError> {
        match self.format {
            SourceFormat::Delimited => Ok(report_from_text(&self.body, labels)),
            SourceFormat::Json => {
                let doc: Value =
                    serde_json::from_str(&self.body).map_err(|source| LoadError::Decode {
                        path: self.path.clone(),
                        source,
                    })?;
                Ok(report_from_json(&doc))
            }
        }
    }
}

pub async fn read_source(path: &Path) -> Result<RawSource, LoadError> {
    let bytes = fs::read(path).await.map_err(|source| LoadError::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let format = SourceFormat::detect(path, &bytes);
    let body = String::from_utf8_lossy(&bytes).into_owned();
    debug!(path = %path.display(), ?format, bytes = bytes.len(), "read activity data");

    Ok(RawSource {
        path: path.to_path_buf(),
        format,
        body,
    })
}

pub async fn load_activity(path: &Path, labels: &LabelFormat) -> Result<ActivityReport, LoadError> {
    let report = read_source(path).await?.into_report(labels)?;
    debug!(periods = report.timeline.len(), "normalized activity data");
    Ok(report)
}
