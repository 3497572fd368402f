use serde::{Deserialize, Serialize};

/// Per-student row of the class statistics table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentStat {
    pub student_id: String,
    pub name: String,
    pub grade: String,
    pub class_name: String,

    /// Number of experiments not submitted
    pub missing_count: usize,

    /// Missing experiment names joined with ", "
    pub missing_list: String,
}

/// Per-experiment row of the class statistics table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentStat {
    pub experiment_name: String,

    /// Submitted / class roster size * 100, 0 for an empty roster
    pub submission_rate: f64,

    /// Missing students as `name(id)` joined with ", "
    pub missing_students: String,
}

/// Submission rates ordered by experiment number, for charting
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RateSeries {
    pub names: Vec<String>,
    pub rates: Vec<f64>,
}

impl RateSeries {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Pairs of (experiment name, rate)
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.names.iter().map(String::as_str).zip(self.rates.iter().copied())
    }
}

/// Summary of one class
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassOverview {
    pub course: String,
    pub class_name: String,

    /// Roster students in the class
    pub students: usize,

    /// Experiments recorded under the class
    pub experiments: usize,

    /// Mean submission rate over the class's experiments, 0 when none
    pub average_rate: f64,

    /// Students who submitted every experiment
    pub fully_submitted_students: usize,
}
