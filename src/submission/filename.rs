use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;

// 实验<N>_<student id>-<student name>.<ext>
static SUBMISSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^实验(\d+)_(\d+)-(\w+)\.([A-Za-z0-9]+)$").expect("submission pattern is valid")
});

static FIRST_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("number pattern is valid"));

/// Fields encoded in a submission file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFileName {
    /// Experiment number as written, e.g. "1" or "03"
    pub experiment_number: String,

    pub student_id: String,

    pub student_name: String,

    /// Extension as written
    pub extension: String,
}

impl SubmissionFileName {
    /// Parse `file_name`, accepting only the given extensions (exact match)
    pub fn parse(file_name: &str, extensions: &[String]) -> Option<Self> {
        let captures = SUBMISSION_RE.captures(file_name)?;
        let extension = &captures[4];

        if !extensions.iter().any(|valid| valid == extension) {
            return None;
        }

        Some(Self {
            experiment_number: captures[1].to_string(),
            student_id: captures[2].to_string(),
            student_name: captures[3].to_string(),
            extension: extension.to_string(),
        })
    }
}

/// Numeric sort key of the first integer in an experiment name.
/// Names without digits get the key of 0.
///
/// Digits are compared as text after stripping leading zeros, so the key
/// has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExperimentNumber {
    digits: String,
}

impl ExperimentNumber {
    /// Significant digits, "0" for zero
    pub fn digits(&self) -> &str {
        if self.digits.is_empty() { "0" } else { &self.digits }
    }

    /// Value when it fits in a `u64`
    pub fn value(&self) -> Option<u64> {
        self.digits().parse().ok()
    }
}

impl Ord for ExperimentNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.digits
            .chars()
            .count()
            .cmp(&other.digits.chars().count())
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl PartialOrd for ExperimentNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// First integer appearing in `name`, zero when there is none
pub fn experiment_number(name: &str) -> ExperimentNumber {
    let digits = FIRST_NUMBER_RE
        .find(name)
        .map(|m| m.as_str().trim_start_matches('0').to_string())
        .unwrap_or_default();
    ExperimentNumber { digits }
}
