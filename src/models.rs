use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Walked,
    Ran,
    Cycled,
}

impl Activity {
    pub const ALL: [Activity; 3] = [Activity::Walked, Activity::Ran, Activity::Cycled];

    pub fn key(self) -> &'static str {
        match self {
            Activity::Walked => "walked",
            Activity::Ran => "ran",
            Activity::Cycled => "cycled",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Activity::Walked => "Walked",
            Activity::Ran => "Ran",
            Activity::Cycled => "Cycled",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Activity::Walked => "#3B82F6",
            Activity::Ran => "#EF4444",
            Activity::Cycled => "#10B981",
        }
    }
}

/// One observation period as read from the delimited log.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivityRecord {
    pub period: String,
    /// Number of delimited fields on the source line.
    pub fields: usize,
    pub walked: Option<f64>,
    pub ran: Option<f64>,
    pub cycled: Option<f64>,
}

impl ActivityRecord {
    pub fn values(&self) -> [Option<f64>; 3] {
        [self.walked, self.ran, self.cycled]
    }

    pub fn is_complete(&self) -> bool {
        self.fields >= 4
    }
}

/// Period labels with one index-aligned value sequence per activity.
///
/// Only [`ActivitySeries::push`] grows the series, so every activity sequence
/// always has the same length as `labels`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ActivitySeries {
    labels: Vec<String>,
    walked: Vec<Option<f64>>,
    ran: Vec<Option<f64>>,
    cycled: Vec<Option<f64>>,
}

impl ActivitySeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            labels: Vec::with_capacity(capacity),
            walked: Vec::with_capacity(capacity),
            ran: Vec::with_capacity(capacity),
            cycled: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, values: [Option<f64>; 3]) {
        let [walked, ran, cycled] = values;
        self.labels.push(label.into());
        self.walked.push(walked);
        self.ran.push(ran);
        self.cycled.push(cycled);
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self, activity: Activity) -> &[Option<f64>] {
        match activity {
            Activity::Walked => &self.walked,
            Activity::Ran => &self.ran,
            Activity::Cycled => &self.cycled,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn totals(&self) -> ActivityTotals {
        let mut totals = ActivityTotals::default();
        for index in 0..self.len() {
            totals.add([self.walked[index], self.ran[index], self.cycled[index]]);
        }
        totals
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ActivityTotals {
    pub walked: f64,
    pub ran: f64,
    pub cycled: f64,
}

impl ActivityTotals {
    pub fn add(&mut self, values: [Option<f64>; 3]) {
        let [walked, ran, cycled] = values;
        self.walked += walked.unwrap_or(0.0);
        self.ran += ran.unwrap_or(0.0);
        self.cycled += cycled.unwrap_or(0.0);
    }

    pub fn get(&self, activity: Activity) -> f64 {
        match activity {
            Activity::Walked => self.walked,
            Activity::Ran => self.ran,
            Activity::Cycled => self.cycled,
        }
    }
}

/// Everything the dashboard draws for one load of the data file.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ActivityReport {
    pub timeline: ActivitySeries,
    pub yearly: Option<ActivitySeries>,
    pub totals: Option<ActivityTotals>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkoutSummary {
    pub totals: ActivityTotals,
    pub yearly: BTreeMap<String, ActivityTotals>,
    pub monthly: BTreeMap<String, ActivityTotals>,
}
