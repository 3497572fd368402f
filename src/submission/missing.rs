use std::collections::HashMap;

use crate::roster::RosterStore;

use super::types::SubmissionTree;

/// Student ID -> experiments the student has not submitted
pub type MissingIndex = HashMap<String, Vec<String>>;

/// Compute every student's missing experiments from scratch.
///
/// A roster student of class `K` misses experiment `E` when `E` is recorded
/// under class `K` (in any course) and the student's ID is absent from its
/// submitted set. Lists follow tree order (course, class, experiment) and
/// hold each experiment name once.
pub fn compute_missing(roster: &RosterStore, tree: &SubmissionTree) -> MissingIndex {
    let mut missing = MissingIndex::new();

    for (key, experiment) in tree.iter() {
        for student in roster.students_by_class(&key.class_name) {
            if experiment.has_submitted(&student.student_id) {
                continue;
            }
            // Same class and experiment name under two courses count once
            let list = missing.entry(student.student_id.clone()).or_default();
            if !list.contains(&experiment.name) {
                list.push(experiment.name.clone());
            }
        }
    }

    missing
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::diagnostics::NullSink;

    #[test]
    fn test_missing_is_set_difference_per_class() {
        let mut roster = RosterStore::new(Rc::new(NullSink));
        roster.add_student("1", "Alice", "", "A");
        roster.add_student("2", "Bob", "", "A");
        roster.add_student("3", "Carol", "", "B");

        let mut tree = SubmissionTree::new();
        tree.add_experiment("Course", "A", "Exp1").add_submission("1");
        tree.add_experiment("Course", "A", "Exp2");
        tree.add_experiment("Course", "B", "Exp1").add_submission("3");

        let missing = compute_missing(&roster, &tree);
        assert_eq!(missing.get("1"), Some(&vec!["Exp2".to_string()]));
        assert_eq!(missing.get("2"), Some(&vec!["Exp1".to_string(), "Exp2".to_string()]));
        assert_eq!(missing.get("3"), None);
    }

    #[test]
    fn test_shared_class_across_courses_counts_once() {
        let mut roster = RosterStore::new(Rc::new(NullSink));
        roster.add_student("1", "Alice", "", "A");

        let mut tree = SubmissionTree::new();
        tree.add_experiment("Physics", "A", "Exp1");
        tree.add_experiment("Chemistry", "A", "Exp1");
        tree.add_experiment("Chemistry", "A", "Exp2");

        let missing = compute_missing(&roster, &tree);
        // Chemistry sorts before Physics
        assert_eq!(missing.get("1"), Some(&vec!["Exp1".to_string(), "Exp2".to_string()]));
    }
}
