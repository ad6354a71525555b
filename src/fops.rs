//! File operation helpers: raw report discovery and temporary files removal.
//! Only files of the current run are ever looked at, so concurrent runs
//! on other days or systems sharing the same directory are left untouched.
use std::path::{Path, PathBuf};

use regex::Regex;
use walkdir::WalkDir;

use crate::{day::Day, runner::raw_stem, segment::Segment, Result};

/// Regex matching the raw report(s) of one system, 24h database and day.
/// The external tool names them `<system><24h database>_RAW[...]_<jjj>`.
pub fn raw_report_regex(system: &str, segment: &Segment, day: &Day) -> Result<Regex> {
    let pattern = format!(
        "^{}.*_{}$",
        regex::escape(&raw_stem(system, segment)),
        day.julian_day()
    );
    Ok(Regex::new(&pattern)?)
}

/// Lists the files of `dir` (not recursively) whose name matches `re`,
/// sorted by name.
fn matching_files(dir: &Path, re: &Regex) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if re.is_match(&entry.file_name().to_string_lossy()) {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Returns the raw report(s) generated for given system and 24h database
pub fn raw_reports(dir: &Path, system: &str, segment: &Segment, day: &Day) -> Result<Vec<PathBuf>> {
    matching_files(dir, &raw_report_regex(system, segment, day)?)
}

/// Removes given files, tolerating files that were never created.
/// Returns the number of files actually removed.
pub fn remove_files<P: AsRef<Path>>(paths: &[P]) -> usize {
    let mut removed = 0;
    for path in paths {
        let path = path.as_ref();
        match std::fs::remove_file(path) {
            Ok(_) => {
                debug!("\"{}\" removed", path.display());
                removed += 1;
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
            Err(e) => warn!("failed to remove \"{}\": {}", path.display(), e),
        }
    }
    removed
}

/// Removes every raw report of given systems and 24h databases, for `day`.
pub fn remove_raw_reports(dir: &Path, systems: &[&str], segments: &[Segment], day: &Day) -> usize {
    let mut files = Vec::new();
    for system in systems {
        for segment in segments {
            match raw_reports(dir, system, segment, day) {
                Ok(found) => files.extend(found),
                Err(e) => warn!("failed to list raw reports of {}: {}", system, e),
            }
        }
    }
    remove_files(&files)
}
