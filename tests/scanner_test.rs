#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::rc::Rc;

    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use tempfile::{TempDir, tempdir};

    use report_tracker::{
        Aggregator, DiagnosticLog, RosterStore, ScanOptions, SubmissionScanner, TrackerError,
    };

    // Helper to create an empty submission file below the root
    fn touch(root: &Path, relative: &str) -> Result<()> {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, b"report")?;
        Ok(())
    }

    struct Fixture {
        dir: TempDir,
        log: Rc<DiagnosticLog>,
        roster: RosterStore,
        scanner: SubmissionScanner,
    }

    impl Fixture {
        fn new() -> Result<Self> {
            let log = Rc::new(DiagnosticLog::new());
            Ok(Self {
                dir: tempdir()?,
                roster: RosterStore::new(log.clone()),
                scanner: SubmissionScanner::with_defaults(log.clone()),
                log,
            })
        }

        fn root(&self) -> &Path {
            self.dir.path()
        }

        fn scan(&mut self) -> Result<report_tracker::ScanStats, TrackerError> {
            let root = self.dir.path().to_path_buf();
            self.scanner.scan(root, &mut self.roster)
        }

        fn aggregator(&self) -> Aggregator<'_> {
            Aggregator::new(&self.roster, self.scanner.tree())
        }
    }

    #[test]
    fn test_single_submission_is_recorded() -> Result<()> {
        let mut fx = Fixture::new()?;
        fx.roster.add_student("1001", "Alice", "2023", "ClassX");
        touch(fx.root(), "CourseA/ClassX/Exp1/实验1_1001-Alice.pdf")?;

        let stats = fx.scan()?;
        assert_eq!(stats.recorded, 1);
        assert_eq!((stats.courses, stats.classes, stats.experiments), (1, 1, 1));

        let experiment = fx.scanner.tree().experiment("CourseA", "ClassX", "Exp1").unwrap();
        assert!(experiment.has_submitted("1001"));
        assert_eq!(experiment.submitted_count(), 1);
        assert!(fx.roster.get_student("1001").unwrap().missing_experiments.is_empty());

        let experiments = fx.aggregator().experiment_stats("CourseA", "ClassX");
        assert_eq!(experiments.len(), 1);
        assert_eq!(experiments[0].submission_rate, 100.0);
        assert_eq!(experiments[0].missing_students, "");
        Ok(())
    }

    #[test]
    fn test_unknown_student_is_skipped() -> Result<()> {
        let mut fx = Fixture::new()?;
        fx.roster.add_student("1001", "Alice", "2023", "ClassX");
        touch(fx.root(), "CourseA/ClassX/Exp1/实验1_1002-Bob.pdf")?;

        let stats = fx.scan()?;
        assert_eq!(stats.unknown_students, 1);
        assert_eq!(stats.recorded, 0);

        let experiment = fx.scanner.tree().experiment("CourseA", "ClassX", "Exp1").unwrap();
        assert_eq!(experiment.submitted_count(), 0);
        assert!(fx.log.contains("student not on roster: Bob(1002)"));
        assert_eq!(fx.roster.get_student("1001").unwrap().missing_experiments, vec!["Exp1"]);
        Ok(())
    }

    #[test]
    fn test_uppercase_extension_is_malformed() -> Result<()> {
        let mut fx = Fixture::new()?;
        fx.roster.add_student("1", "A", "", "K");
        touch(fx.root(), "C/K/E1/实验1_1-A.PDF")?;

        let stats = fx.scan()?;
        assert_eq!((stats.recorded, stats.malformed), (0, 1));
        assert!(fx.log.contains("malformed file name: 实验1_1-A.PDF"));
        assert_eq!(fx.roster.get_student("1").unwrap().missing_experiments, vec!["E1"]);
        assert_eq!(fx.aggregator().experiment_stats("C", "K")[0].submission_rate, 0.0);
        Ok(())
    }

    #[test]
    fn test_shared_class_name_across_courses_counts_once() -> Result<()> {
        let mut fx = Fixture::new()?;
        fx.roster.add_student("1", "A", "", "K");
        fs::create_dir_all(fx.root().join("Physics/K/Exp1"))?;
        fs::create_dir_all(fx.root().join("Chemistry/K/Exp1"))?;

        fx.scan()?;

        assert_eq!(fx.roster.get_student("1").unwrap().missing_experiments, vec!["Exp1"]);
        let students = fx.aggregator().student_stats("Physics", "K");
        assert_eq!(students[0].missing_count, 1);
        assert_eq!(students[0].missing_list, "Exp1");
        Ok(())
    }

    #[test]
    fn test_rate_series_orders_oversized_numbers_last() -> Result<()> {
        let mut fx = Fixture::new()?;
        fx.roster.add_student("1", "A", "", "K");
        for experiment in ["实验99999999999999999999", "实验10", "intro", "实验2"] {
            fs::create_dir_all(fx.root().join("C/K").join(experiment))?;
        }

        fx.scan()?;

        let series = fx.aggregator().submission_rate_series("C", "K");
        assert_eq!(series.names, vec!["intro", "实验2", "实验10", "实验99999999999999999999"]);
        Ok(())
    }

    #[test]
    fn test_half_the_class_submitted() -> Result<()> {
        let mut fx = Fixture::new()?;
        fx.roster.add_student("1001", "Alice", "2023", "ClassX");
        fx.roster.add_student("1002", "Bob", "2023", "ClassX");
        touch(fx.root(), "CourseA/ClassX/Exp1/实验1_1001-Alice.pdf")?;

        fx.scan()?;

        let experiments = fx.aggregator().experiment_stats("CourseA", "ClassX");
        assert_eq!(experiments[0].submission_rate, 50.0);
        assert_eq!(experiments[0].missing_students, "Bob(1002)");

        let students = fx.aggregator().student_stats("CourseA", "ClassX");
        assert_eq!(students[0].missing_count, 0);
        assert_eq!(students[1].missing_count, 1);
        assert_eq!(students[1].missing_list, "Exp1");
        Ok(())
    }

    #[test]
    fn test_name_mismatch_is_recorded_under_id() -> Result<()> {
        let mut fx = Fixture::new()?;
        fx.roster.add_student("1001", "Alice", "2023", "ClassX");
        touch(fx.root(), "CourseA/ClassX/Exp1/实验1_1001-Bob.pdf")?;

        let stats = fx.scan()?;
        assert_eq!(stats.name_mismatches, 1);
        assert_eq!(stats.recorded, 1);

        let experiment = fx.scanner.tree().experiment("CourseA", "ClassX", "Exp1").unwrap();
        assert!(experiment.has_submitted("1001"));
        assert!(fx.log.contains("student name mismatch: file has Bob, roster has Alice(1001)"));
        Ok(())
    }

    #[test]
    fn test_missing_root_fails_without_touching_roster() -> Result<()> {
        let mut fx = Fixture::new()?;
        fx.roster.add_student("1001", "Alice", "2023", "ClassX");
        let missing_root = fx.root().join("does-not-exist");

        let err = fx.scanner.scan(&missing_root, &mut fx.roster).unwrap_err();
        assert!(matches!(err, TrackerError::PathNotFound(_)));
        assert_eq!(fx.roster.len(), 1);
        assert_eq!(fx.log.len(), 1);
        assert!(fx.log.contains("directory does not exist"));
        assert!(fx.scanner.tree().is_empty());
        Ok(())
    }

    #[test]
    fn test_file_as_root_fails() -> Result<()> {
        let mut fx = Fixture::new()?;
        let file_root = fx.root().join("root.txt");
        fs::write(&file_root, "")?;

        let err = fx.scanner.scan(&file_root, &mut fx.roster).unwrap_err();
        assert!(matches!(err, TrackerError::NotADirectory(_)));
        Ok(())
    }

    #[test]
    fn test_rescan_is_idempotent() -> Result<()> {
        let mut fx = Fixture::new()?;
        fx.roster.add_student("1", "Alice", "", "ClassX");
        fx.roster.add_student("2", "Bob", "", "ClassX");
        touch(fx.root(), "CourseA/ClassX/实验1/实验1_1-Alice.pdf")?;
        touch(fx.root(), "CourseA/ClassX/实验1/实验1_1-Alice.docx")?;
        touch(fx.root(), "CourseA/ClassX/实验2/实验2_2-Bob.txt")?;

        fx.scan()?;
        let first_students = fx.aggregator().student_stats("CourseA", "ClassX");
        let first_experiments = fx.aggregator().experiment_stats("CourseA", "ClassX");

        fx.scan()?;
        assert_eq!(fx.aggregator().student_stats("CourseA", "ClassX"), first_students);
        assert_eq!(fx.aggregator().experiment_stats("CourseA", "ClassX"), first_experiments);
        assert_eq!(fx.roster.get_student("1").unwrap().missing_experiments, vec!["实验2"]);
        Ok(())
    }

    #[test]
    fn test_rescan_drops_removed_experiments() -> Result<()> {
        let mut fx = Fixture::new()?;
        fx.roster.add_student("1", "Alice", "", "ClassX");
        fs::create_dir_all(fx.root().join("CourseA/ClassX/Exp1"))?;
        fs::create_dir_all(fx.root().join("CourseA/ClassX/Exp2"))?;

        fx.scan()?;
        assert_eq!(fx.roster.get_student("1").unwrap().missing_experiments, vec!["Exp1", "Exp2"]);

        fs::remove_dir(fx.root().join("CourseA/ClassX/Exp2"))?;
        fx.scan()?;
        assert_eq!(fx.roster.get_student("1").unwrap().missing_experiments, vec!["Exp1"]);
        Ok(())
    }

    #[test]
    fn test_missing_iff_not_submitted() -> Result<()> {
        let mut fx = Fixture::new()?;
        for (id, name) in [("1", "A"), ("2", "B"), ("3", "C"), ("4", "D")] {
            fx.roster.add_student(id, name, "", "K");
        }
        touch(fx.root(), "Course/K/Exp1/实验1_1-A.pdf")?;
        touch(fx.root(), "Course/K/Exp1/实验1_3-C.pdf")?;
        touch(fx.root(), "Course/K/Exp2/实验2_2-B.pdf")?;
        touch(fx.root(), "Course/K/Exp3/实验3_1-A.pdf")?;
        touch(fx.root(), "Course/K/Exp3/实验3_2-B.pdf")?;
        touch(fx.root(), "Course/K/Exp3/实验3_3-C.pdf")?;
        touch(fx.root(), "Course/K/Exp3/实验3_4-D.pdf")?;

        fx.scan()?;

        for (_, experiment) in fx.scanner.tree().iter() {
            for student in fx.roster.students_by_class("K") {
                let missing = student.missing_experiments.contains(&experiment.name);
                assert_eq!(missing, !experiment.has_submitted(&student.student_id));
            }
        }

        for stat in fx.aggregator().experiment_stats("Course", "K") {
            assert!((0.0..=100.0).contains(&stat.submission_rate));
        }
        Ok(())
    }

    #[test]
    fn test_layout_edge_cases() -> Result<()> {
        let mut fx = Fixture::new()?;
        fx.roster.add_student("1", "Alice", "", "ClassX");
        fs::write(fx.root().join("stray.pdf"), "")?;
        touch(fx.root(), "CourseA/ClassX/Exp1/实验1_1-Alice.pdf")?;
        touch(fx.root(), "CourseA/ClassX/Exp1/notes.pdf")?;
        touch(fx.root(), "CourseA/ClassX/Exp1/old/实验1_1-Alice.pdf")?;
        touch(fx.root(), "CourseA/ClassX/readme.txt")?;
        fs::create_dir_all(fx.root().join("CourseA/EmptyClass"))?;

        let stats = fx.scan()?;
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.recorded, 1);
        assert_eq!(stats.malformed, 1);
        // stray.pdf, readme.txt, and the old/ directory
        assert_eq!(stats.skipped_entries, 3);
        assert!(fx.log.contains("malformed file name: notes.pdf"));

        assert_eq!(fx.aggregator().class_names("CourseA"), vec!["ClassX", "EmptyClass"]);
        assert!(fx.aggregator().experiment_stats("CourseA", "EmptyClass").is_empty());
        Ok(())
    }

    #[test]
    fn test_custom_extensions() -> Result<()> {
        let log = Rc::new(DiagnosticLog::new());
        let dir = tempdir()?;
        let mut roster = RosterStore::new(log.clone());
        roster.add_student("1", "Alice", "", "ClassX");
        touch(dir.path(), "CourseA/ClassX/Exp1/实验1_1-Alice.zip")?;

        let options = ScanOptions {
            extensions: vec!["zip".to_string()],
            ..ScanOptions::default()
        };
        let mut scanner = SubmissionScanner::new(log.clone(), options);
        let stats = scanner.scan(dir.path(), &mut roster)?;

        assert_eq!(stats.recorded, 1);
        Ok(())
    }
}
