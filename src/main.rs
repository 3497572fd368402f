use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{debug, info};
use serde_json::json;

use report_tracker::{
    Aggregator, DiagnosticLog, RosterStore, SharedSink, StatsExporter, SubmissionScanner, TrackerConfig,
};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
/// Experiment report submission statistics
struct Args {
    /// Roster file (.csv, .xlsx or .xls) with 学号, 姓名, 年级 and 班级 columns
    #[arg(long)]
    roster: PathBuf,

    /// Root of the course/class/experiment submission tree
    #[arg(long)]
    root: PathBuf,

    /// Only report this course
    #[arg(long)]
    course: Option<String>,

    /// Only report this class (requires --course)
    #[arg(long, requires = "course")]
    class: Option<String>,

    /// Write student statistics of the selected class to this file (.xlsx or CSV)
    #[arg(long, requires = "class")]
    export_students: Option<PathBuf>,

    /// Write experiment statistics of the selected class to this file (.xlsx or CSV)
    #[arg(long, requires = "class")]
    export_experiments: Option<PathBuf>,

    /// Print statistics as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the diagnostic log after the report
    #[arg(long)]
    show_log: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = TrackerConfig::load_or_default(args.config.as_deref()).context("Failed to load configuration")?;
    debug!("Configuration: {:?}", config);

    let log = Rc::new(DiagnosticLog::new());
    let sink: SharedSink = log.clone();

    let mut roster = RosterStore::new(sink.clone());
    let summary = roster
        .import_from_file(&args.roster)
        .context("Failed to import roster")?;
    info!(
        "Roster: {} imported, {} duplicates, {} skipped",
        summary.imported, summary.duplicates, summary.skipped
    );

    let mut scanner = SubmissionScanner::new(sink.clone(), config.scan.clone());
    let stats = scanner
        .scan(&args.root, &mut roster)
        .context("Failed to scan submission directory")?;
    debug!("Scan stats: {:?}", stats);

    let aggregator = Aggregator::new(&roster, scanner.tree());
    let targets = select_targets(&aggregator, args.course.as_deref(), args.class.as_deref())?;

    for (course, class_name) in &targets {
        if args.json {
            print_json(&aggregator, course, class_name)?;
        } else {
            print_tables(&aggregator, course, class_name);
        }
    }

    let exporter = StatsExporter::new(sink, config.export.clone());
    if let (Some(course), Some(class_name)) = (args.course.as_deref(), args.class.as_deref()) {
        if let Some(path) = &args.export_students {
            let rows = exporter.export_student_stats(&aggregator.student_stats(course, class_name), path)?;
            println!("Exported {} student rows to {}", rows, path.display());
        }
        if let Some(path) = &args.export_experiments {
            let rows = exporter.export_experiment_stats(&aggregator.experiment_stats(course, class_name), path)?;
            println!("Exported {} experiment rows to {}", rows, path.display());
        }
    }

    if args.show_log {
        println!("\nDiagnostic log ({} entries):", log.len());
        for entry in log.entries() {
            println!("{}", entry);
        }
    }

    Ok(())
}

/// Course/class pairs to report
fn select_targets(
    aggregator: &Aggregator<'_>,
    course: Option<&str>,
    class_name: Option<&str>,
) -> Result<Vec<(String, String)>> {
    let courses = match course {
        Some(course) => {
            if !aggregator.course_names().iter().any(|c| c == course) {
                bail!("course not found in submission tree: {}", course);
            }
            vec![course.to_string()]
        }
        None => aggregator.course_names(),
    };

    let mut targets = Vec::new();
    for course in courses {
        for class in aggregator.class_names(&course) {
            if class_name.is_none_or(|wanted| wanted == class) {
                targets.push((course.clone(), class));
            }
        }
    }

    if let (Some(course), Some(class_name)) = (course, class_name) {
        if targets.is_empty() {
            bail!("class {} not found in course {}", class_name, course);
        }
    }

    Ok(targets)
}

fn print_tables(aggregator: &Aggregator<'_>, course: &str, class_name: &str) {
    if let Some(overview) = aggregator.class_overview(course, class_name) {
        println!(
            "\n== {} / {}: {} students, {} experiments, average submission rate {:.1}%, {} fully submitted",
            overview.course,
            overview.class_name,
            overview.students,
            overview.experiments,
            overview.average_rate,
            overview.fully_submitted_students
        );
    }

    println!("\n{:<14} {:<12} {:<8} {:<12} {:>7}  missing", "student_id", "name", "grade", "class", "count");
    for stat in aggregator.student_stats(course, class_name) {
        println!(
            "{:<14} {:<12} {:<8} {:<12} {:>7}  {}",
            stat.student_id, stat.name, stat.grade, stat.class_name, stat.missing_count, stat.missing_list
        );
    }

    println!("\n{:<20} {:>8}  missing students", "experiment", "rate");
    for stat in aggregator.experiment_stats(course, class_name) {
        println!(
            "{:<20} {:>7.1}%  {}",
            stat.experiment_name, stat.submission_rate, stat.missing_students
        );
    }

    let series = aggregator.submission_rate_series(course, class_name);
    if !series.is_empty() {
        println!("\nSubmission rate by experiment:");
        for (name, rate) in series.iter() {
            let bar = "#".repeat((rate / 5.0).round() as usize);
            println!("{:<20} {:>6.1}% {}", name, rate, bar);
        }
    }
}

fn print_json(aggregator: &Aggregator<'_>, course: &str, class_name: &str) -> Result<()> {
    let students = aggregator.student_stats(course, class_name);
    let experiments = aggregator.experiment_stats(course, class_name);
    let series = aggregator.submission_rate_series(course, class_name);

    let report = json!({
        "course": course,
        "class": class_name,
        "overview": aggregator.class_overview(course, class_name),
        "students": students,
        "experiments": experiments,
        "rate_series": series,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
