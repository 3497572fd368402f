use std::path::{Path, PathBuf};

use log::{debug, trace};
use walkdir::WalkDir;

/// Depth of submission files below the scan root:
/// course / class / experiment / file
const FILE_DEPTH: usize = 4;

/// One entry of the course / class / experiment layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectedEntry {
    Course {
        course: String,
    },
    Class {
        course: String,
        class_name: String,
    },
    Experiment {
        course: String,
        class_name: String,
        experiment: String,
    },
    File {
        course: String,
        class_name: String,
        experiment: String,
        file_name: String,
    },
    /// Entry of the wrong kind for its level
    Skipped {
        path: PathBuf,
    },
    /// Entry that could not be read
    Unreadable {
        path: Option<PathBuf>,
        reason: String,
    },
}

/// Walks exactly three directory levels below a root
#[derive(Debug, Clone)]
pub struct FileCollector {
    follow_links: bool,
}

impl Default for FileCollector {
    fn default() -> Self {
        Self::new(true)
    }
}

impl FileCollector {
    pub fn new(follow_links: bool) -> Self {
        Self { follow_links }
    }

    /// Collect the layout below `root` in a stable, name-sorted order.
    /// Parents always precede their children.
    pub fn collect(&self, root: impl AsRef<Path>) -> Vec<CollectedEntry> {
        let root = root.as_ref();
        debug!("Collecting submissions from directory: {}", root.display());

        let mut entries = Vec::new();

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(FILE_DEPTH)
            .follow_links(self.follow_links)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    entries.push(CollectedEntry::Unreadable {
                        path: e.path().map(Path::to_path_buf),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let names: Vec<String> = match entry.path().strip_prefix(root) {
                Ok(relative) => relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect(),
                Err(e) => {
                    entries.push(CollectedEntry::Unreadable {
                        path: Some(entry.path().to_path_buf()),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let file_type = entry.file_type();
            let collected = match (names.as_slice(), file_type.is_dir()) {
                ([course], true) => CollectedEntry::Course { course: course.clone() },
                ([course, class_name], true) => CollectedEntry::Class {
                    course: course.clone(),
                    class_name: class_name.clone(),
                },
                ([course, class_name, experiment], true) => CollectedEntry::Experiment {
                    course: course.clone(),
                    class_name: class_name.clone(),
                    experiment: experiment.clone(),
                },
                ([course, class_name, experiment, file_name], false) if file_type.is_file() => {
                    CollectedEntry::File {
                        course: course.clone(),
                        class_name: class_name.clone(),
                        experiment: experiment.clone(),
                        file_name: file_name.clone(),
                    }
                }
                _ => CollectedEntry::Skipped { path: entry.path().to_path_buf() },
            };

            trace!("Collected {:?}", collected);
            entries.push(collected);
        }

        debug!("Collected {} entries", entries.len());
        entries
    }
}
