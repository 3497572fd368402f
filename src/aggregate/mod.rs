//! Read-only statistics over a roster and a scanned submission tree.
//!
//! Unknown courses or classes yield empty results rather than errors.

pub mod types;

use log::trace;

use crate::roster::{RosterStore, StudentRecord};
use crate::submission::{ExperimentRecord, SubmissionTree, experiment_number};

pub use types::{ClassOverview, ExperimentStat, RateSeries, StudentStat};

/// Statistics view borrowing the roster and the last scan
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    roster: &'a RosterStore,
    tree: &'a SubmissionTree,
}

impl<'a> Aggregator<'a> {
    pub fn new(roster: &'a RosterStore, tree: &'a SubmissionTree) -> Self {
        Self { roster, tree }
    }

    pub fn course_names(&self) -> Vec<String> {
        self.tree.course_names()
    }

    pub fn class_names(&self, course: &str) -> Vec<String> {
        self.tree.class_names(course)
    }

    /// One row per roster student of the class, in roster order
    pub fn student_stats(&self, course: &str, class_name: &str) -> Vec<StudentStat> {
        if !self.tree.contains_class(course, class_name) {
            return Vec::new();
        }

        self.roster
            .students_by_class(class_name)
            .into_iter()
            .map(|student| StudentStat {
                student_id: student.student_id.clone(),
                name: student.name.clone(),
                grade: student.grade.clone(),
                class_name: student.class_name.clone(),
                missing_count: student.missing_experiments.len(),
                missing_list: student.missing_experiments.join(", "),
            })
            .collect()
    }

    /// One row per experiment recorded under the class
    pub fn experiment_stats(&self, course: &str, class_name: &str) -> Vec<ExperimentStat> {
        if !self.tree.contains_class(course, class_name) {
            return Vec::new();
        }

        let students = self.roster.students_by_class(class_name);

        self.tree
            .experiments(course, class_name)
            .into_iter()
            .map(|experiment| {
                let missing_students = missing_students(experiment, &students)
                    .map(|student| format!("{}({})", student.name, student.student_id))
                    .collect::<Vec<_>>()
                    .join(", ");

                ExperimentStat {
                    experiment_name: experiment.name.clone(),
                    submission_rate: experiment.submission_rate(students.len()),
                    missing_students,
                }
            })
            .collect()
    }

    /// Experiment names and rates sorted by the first number in each name
    pub fn submission_rate_series(&self, course: &str, class_name: &str) -> RateSeries {
        let mut experiments = self.tree.experiments(course, class_name);
        experiments.sort_by_key(|experiment| experiment_number(&experiment.name));

        let class_size = self.roster.class_size(class_name);
        let series = RateSeries {
            names: experiments.iter().map(|e| e.name.clone()).collect(),
            rates: experiments.iter().map(|e| e.submission_rate(class_size)).collect(),
        };

        trace!("Rate series for {}/{}: {:?}", course, class_name, series);
        series
    }

    /// Class summary; experiments and full submissions count this course only
    pub fn class_overview(&self, course: &str, class_name: &str) -> Option<ClassOverview> {
        if !self.tree.contains_class(course, class_name) {
            return None;
        }

        let students = self.roster.students_by_class(class_name);
        let experiments = self.tree.experiments(course, class_name);

        let average_rate = if experiments.is_empty() {
            0.0
        } else {
            experiments
                .iter()
                .map(|e| e.submission_rate(students.len()))
                .sum::<f64>()
                / experiments.len() as f64
        };

        let fully_submitted_students = students
            .iter()
            .filter(|student| experiments.iter().all(|e| e.has_submitted(&student.student_id)))
            .count();

        Some(ClassOverview {
            course: course.to_string(),
            class_name: class_name.to_string(),
            students: students.len(),
            experiments: experiments.len(),
            average_rate,
            fully_submitted_students,
        })
    }
}

fn missing_students<'s>(
    experiment: &'s ExperimentRecord,
    students: &'s [&'s StudentRecord],
) -> impl Iterator<Item = &'s StudentRecord> + 's {
    students
        .iter()
        .copied()
        .filter(|student| !experiment.has_submitted(&student.student_id))
}
