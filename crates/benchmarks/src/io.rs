//! I/O operations for benchmark results.
//!
//! This module writes result sets to the results directory and finds the
//! most recent one again for the visualizer.

use crate::error::{BenchError, Result};
use crate::markdown;
use crate::result::{Language, ResultSet};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default results directory path.
pub const RESULTS_DIR: &str = "results";

/// File name prefix shared by all persisted records.
pub const RECORD_PREFIX: &str = "benchmark_";

/// Extension of persisted records.
pub const RECORD_EXTENSION: &str = "json";

/// File name of the record with the given timestamp.
pub fn record_file_name(timestamp: &str) -> String {
    format!("{RECORD_PREFIX}{timestamp}.{RECORD_EXTENSION}")
}

/// Whether `name` looks like a persisted record (`benchmark_*.json`).
pub fn is_record_file_name(name: &str) -> bool {
    name.strip_prefix(RECORD_PREFIX)
        .and_then(|rest| rest.strip_suffix(&format!(".{RECORD_EXTENSION}")))
        .is_some()
}

/// Ensure the results directory exists.
pub fn ensure_results_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| BenchError::io(dir, e))
}

/// Write a result set as pretty JSON into `dir`.
///
/// Returns the path of the written record.
pub fn write_result_set(dir: impl AsRef<Path>, set: &ResultSet) -> Result<PathBuf> {
    let dir = dir.as_ref();
    ensure_results_dir(dir)?;

    let path = dir.join(record_file_name(set.timestamp()));
    let json = serde_json::to_string_pretty(set)?;
    write_new(&path, json.as_bytes())?;
    debug!(path = %path.display(), "wrote result set");
    Ok(path)
}

/// Create `path` with `contents`.
///
/// Records are named by second, so a second run within the same second
/// lands on an existing file; it is replaced with a warning.
fn write_new(path: &Path, contents: &[u8]) -> Result<()> {
    let file = OpenOptions::new().write(true).create_new(true).open(path);
    let mut file = match file {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            warn!(path = %path.display(), "record from the same second exists, overwriting");
            fs::File::create(path).map_err(|e| BenchError::io(path, e))?
        }
        Err(e) => return Err(BenchError::io(path, e)),
    };
    file.write_all(contents).map_err(|e| BenchError::io(path, e))
}

/// Write the markdown summary of a result set next to its record.
///
/// `languages` gives the column order; the first one is the baseline.
pub fn write_summary(
    dir: impl AsRef<Path>,
    set: &ResultSet,
    languages: &[Language],
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    ensure_results_dir(dir)?;

    let path = dir.join(format!("{RECORD_PREFIX}{}.md", set.timestamp()));
    let summary = markdown::generate_summary_for(set, languages);
    fs::write(&path, summary).map_err(|e| BenchError::io(&path, e))?;
    Ok(path)
}

/// Read a result set from a JSON file.
pub fn read_result_set(path: impl AsRef<Path>) -> Result<ResultSet> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| BenchError::io(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

/// Path of the most recent record in `dir`.
///
/// Records are compared by file name, which sorts chronologically because
/// of the timestamp format. A missing directory is treated as empty.
pub fn latest_result_file(dir: impl AsRef<Path>) -> Result<Option<PathBuf>> {
    let dir = dir.as_ref();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(BenchError::io(dir, e)),
    };

    let mut latest: Option<String> = None;
    for entry in entries {
        let entry = entry.map_err(|e| BenchError::io(dir, e))?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if !is_record_file_name(&name) {
            continue;
        }
        if latest.as_deref().map_or(true, |current| name.as_str() > current) {
            latest = Some(name);
        }
    }

    Ok(latest.map(|name| dir.join(name)))
}
