//! Run provenance attached to every persisted artifact.

use serde::Serialize;
use std::path::Path;

/// Size and file-count stats for one scanned directory.
#[derive(Debug, Clone, Serialize)]
pub struct DirStats {
    /// Directory name as given on the command line.
    pub name: String,
    /// Total size of all files, in bytes.
    pub size_bytes: u64,
    /// Number of files.
    pub files: u64,
}

/// Provenance block serialized as `_metadata` in JSON snapshots.
#[derive(Debug, Clone, Serialize)]
pub struct RunMetadata {
    /// Implementations covered by the run, in execution order.
    pub languages: Vec<String>,
    /// Requested repetition count.
    pub repetitions: u32,
    /// Stats of the directories the checksum programs scanned.
    pub directories: Vec<DirStats>,
    /// Remaining argument tail beyond the two directories.
    pub options: Vec<String>,
    /// The command that produced the artifact.
    pub operation: String,
}

impl RunMetadata {
    /// Collect metadata for one reporting run.
    ///
    /// The first two run arguments are the directories the checksum
    /// programs scan; everything after them is recorded as options.
    /// Missing or unreadable directories simply stat to zero.
    pub fn collect(
        operation: &str,
        languages: Vec<String>,
        repetitions: u32,
        run_args: &[String],
    ) -> Self {
        let directories = run_args
            .iter()
            .take(2)
            .map(|name| collect_dir_stats(name))
            .collect();
        let options = run_args.iter().skip(2).cloned().collect();

        Self {
            languages,
            repetitions,
            directories,
            options,
            operation: operation.to_string(),
        }
    }
}

/// Walk a directory, summing file sizes and counts. Unreadable entries
/// are skipped rather than failing the whole report.
pub fn collect_dir_stats(name: &str) -> DirStats {
    let mut stats = DirStats {
        name: name.to_string(),
        size_bytes: 0,
        files: 0,
    };
    walk(Path::new(name), &mut stats);
    stats
}

fn walk(dir: &Path, stats: &mut DirStats) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, stats);
        } else if let Ok(meta) = entry.metadata() {
            stats.files += 1;
            stats.size_bytes += meta.len();
        }
    }
}

/// Humanize a byte count with base-1000 units ("3.1 KB", "1.2 MB").
pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in ["", "K", "M", "G", "T", "P", "E", "Z"] {
        if value.abs() < 1000.0 {
            return format!("{:.1} {}B", value, unit);
        }
        value /= 1000.0;
    }
    format!("{:.1} YB", value)
}

/// Auxiliary chart-title text: repetitions plus the combined size of the
/// two scanned directories, falling back to a generic caption when the
/// directories cannot be statted.
pub fn title_info(repetitions: u32, run_args: &[String]) -> String {
    let dirs: Vec<&String> = run_args.iter().take(2).collect();
    if dirs.len() < 2 || !dirs.iter().all(|d| Path::new(d.as_str()).is_dir()) {
        return "in seconds, lower is better".to_string();
    }

    let repetitions_text = if repetitions == 1 {
        "single repetition".to_string()
    } else {
        format!("{} repetitions", repetitions)
    };

    let mut total_files = 0;
    let mut total_size = 0;
    for dir in dirs {
        let stats = collect_dir_stats(dir);
        total_files += stats.files;
        total_size += stats.size_bytes;
    }

    format!(
        "{}, {} files, {}",
        repetitions_text,
        total_files,
        human_size(total_size)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_size_uses_base_1000() {
        assert_eq!(human_size(0), "0.0 B");
        assert_eq!(human_size(999), "999.0 B");
        assert_eq!(human_size(1500), "1.5 KB");
        assert_eq!(human_size(2_000_000), "2.0 MB");
    }

    #[test]
    fn dir_stats_tolerate_missing_directories() {
        let stats = collect_dir_stats("no/such/dir");
        assert_eq!(stats.files, 0);
        assert_eq!(stats.size_bytes, 0);
    }

    #[test]
    fn dir_stats_count_nested_files() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("sub")).unwrap();
        std::fs::write(tmp.path().join("a.txt"), "12345").unwrap();
        std::fs::write(tmp.path().join("sub/b.txt"), "123").unwrap();

        let stats = collect_dir_stats(tmp.path().to_str().unwrap());
        assert_eq!(stats.files, 2);
        assert_eq!(stats.size_bytes, 8);
    }

    #[test]
    fn title_falls_back_without_directories() {
        let text = title_info(5, &["only-one".to_string()]);
        assert_eq!(text, "in seconds, lower is better");
    }

    #[test]
    fn metadata_splits_directories_from_options() {
        let args = vec![
            "dir_a".to_string(),
            "dir_b".to_string(),
            "--md5".to_string(),
        ];
        let meta = RunMetadata::collect("table", vec!["c".to_string()], 5, &args);

        assert_eq!(meta.repetitions, 5);
        assert_eq!(meta.directories.len(), 2);
        assert_eq!(meta.options, vec!["--md5"]);
        assert_eq!(meta.operation, "table");
    }
}
