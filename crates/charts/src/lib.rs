//! Charts for language benchmark results.
//!
//! This crate loads the most recent persisted [`ResultSet`] and renders
//! two charts from it:
//!
//! - `performance_comparison.png` - one subplot per test with absolute
//!   durations on a logarithmic axis
//! - `relative_performance.png` - all tests relative to the baseline
//!   language
//!
//! # Example
//!
//! ```no_run
//! use langbench_charts::{visualize_latest, PlottersRenderer, Visualization};
//! use langbench_benchmarks::Language;
//!
//! match visualize_latest("results", &Language::ALL, &PlottersRenderer::default())? {
//!     Visualization::NoResults => println!("No result files found"),
//!     Visualization::Rendered { charts, .. } => println!("Wrote {} charts", charts.len()),
//! }
//! # Ok::<(), langbench_charts::ChartError>(())
//! ```

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod data;
pub mod error;
pub mod render;

pub use data::{absolute_chart, relative_chart, Bar, BarGroup, ChartData};
pub use error::{ChartError, Result};
pub use render::{ChartRenderer, PlottersRenderer};

use langbench_benchmarks::{io, Language, ResultSet};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the absolute-duration chart.
pub const ABSOLUTE_CHART_FILE: &str = "performance_comparison.png";

/// File name of the relative-performance chart.
pub const RELATIVE_CHART_FILE: &str = "relative_performance.png";

/// Outcome of a visualization request.
#[derive(Debug, Clone)]
pub enum Visualization {
    /// No persisted result set exists; nothing was written.
    NoResults,
    /// Charts were rendered from the latest result set.
    Rendered {
        /// Record the charts were drawn from.
        record: PathBuf,
        /// The loaded result set.
        result_set: ResultSet,
        /// Written chart files.
        charts: Vec<PathBuf>,
    },
}

/// Render charts for the most recent result set in `results_dir`.
///
/// `languages` sets the bar order; the first one is the baseline of the
/// relative chart. Existing chart files are overwritten.
///
/// # Errors
///
/// Returns an error if the latest record cannot be read or a chart cannot
/// be written. A missing record is not an error.
pub fn visualize_latest(
    results_dir: impl AsRef<Path>,
    languages: &[Language],
    renderer: &dyn ChartRenderer,
) -> Result<Visualization> {
    let results_dir = results_dir.as_ref();
    let Some((record, result_set)) = load_latest(results_dir)? else {
        return Ok(Visualization::NoResults);
    };
    let charts = render_charts(&result_set, results_dir, languages, renderer)?;

    Ok(Visualization::Rendered {
        record,
        result_set,
        charts,
    })
}

/// Load the most recent result set in `results_dir` with its path.
///
/// Returns `None` without touching the filesystem further when there is
/// no record.
pub fn load_latest(results_dir: impl AsRef<Path>) -> Result<Option<(PathBuf, ResultSet)>> {
    let results_dir = results_dir.as_ref();
    let Some(record) = io::latest_result_file(results_dir)? else {
        info!(dir = %results_dir.display(), "no result files found");
        return Ok(None);
    };

    info!(path = %record.display(), "loading result set");
    let result_set = io::read_result_set(&record)?;
    Ok(Some((record, result_set)))
}

/// Render both charts for `set` into `dir`.
pub fn render_charts(
    set: &ResultSet,
    dir: &Path,
    languages: &[Language],
    renderer: &dyn ChartRenderer,
) -> Result<Vec<PathBuf>> {
    io::ensure_results_dir(dir)?;

    let absolute_path = dir.join(ABSOLUTE_CHART_FILE);
    renderer.render_absolute(&absolute_chart(set, languages), &absolute_path)?;
    info!(path = %absolute_path.display(), "chart saved");

    let relative_path = dir.join(RELATIVE_CHART_FILE);
    renderer.render_relative(&relative_chart(set, languages), &relative_path)?;
    info!(path = %relative_path.display(), "chart saved");

    Ok(vec![absolute_path, relative_path])
}

/// Short textual summary of a result set: timestamp and platform.
pub fn summary(set: &ResultSet) -> String {
    let platform = set.platform();
    let rule = "=".repeat(60);
    let mut out = String::new();
    writeln!(out, "{rule}").unwrap();
    writeln!(out, "BENCHMARK SUMMARY").unwrap();
    writeln!(out, "{rule}").unwrap();
    writeln!(out, "Timestamp: {}", set.timestamp()).unwrap();
    writeln!(out, "Platform: {} {}", platform.system, platform.release).unwrap();
    writeln!(out, "Machine: {} {}", platform.machine, platform.processor).unwrap();
    writeln!(out, "Python: {}", platform.python_version).unwrap();
    writeln!(out, "{rule}").unwrap();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use langbench_benchmarks::{LanguageResults, PlatformInfo};
    use std::cell::RefCell;
    use std::fs;

    /// Records render calls and writes a placeholder file per chart.
    #[derive(Default)]
    struct RecordingRenderer {
        calls: RefCell<Vec<(String, PathBuf, usize)>>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn render_absolute(&self, chart: &ChartData, path: &Path) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(("absolute".to_string(), path.to_path_buf(), chart.groups.len()));
            fs::write(path, b"absolute").map_err(|e| ChartError::Render {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }

        fn render_relative(&self, chart: &ChartData, path: &Path) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(("relative".to_string(), path.to_path_buf(), chart.groups.len()));
            fs::write(path, b"relative").map_err(|e| ChartError::Render {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
    }

    fn result_set(timestamp: &str, test: &str) -> ResultSet {
        let mut results = LanguageResults::new();
        results.insert(Language::Cpp, [(test, 2.0)].into_iter().collect());
        results.insert(Language::Rust, [(test, 3.0)].into_iter().collect());
        ResultSet::with_timestamp(
            timestamp,
            PlatformInfo {
                system: "Linux".to_string(),
                release: "6.8.0".to_string(),
                ..PlatformInfo::default()
            },
            results,
        )
    }

    #[test]
    fn test_no_results_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = RecordingRenderer::default();

        let outcome = visualize_latest(dir.path(), &Language::ALL, &renderer).unwrap();

        assert!(matches!(outcome, Visualization::NoResults));
        assert!(renderer.calls.borrow().is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_results_dir_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let results_dir = dir.path().join("results");
        let renderer = RecordingRenderer::default();

        let outcome = visualize_latest(&results_dir, &Language::ALL, &renderer).unwrap();

        assert!(matches!(outcome, Visualization::NoResults));
        assert!(!results_dir.exists());
    }

    #[test]
    fn test_renders_latest_record() {
        let dir = tempfile::tempdir().unwrap();
        io::write_result_set(dir.path(), &result_set("20240101_000000", "Old")).unwrap();
        io::write_result_set(dir.path(), &result_set("20240102_000000", "New")).unwrap();
        let renderer = RecordingRenderer::default();

        let outcome = visualize_latest(dir.path(), &Language::ALL, &renderer).unwrap();

        let Visualization::Rendered {
            record,
            result_set,
            charts,
        } = outcome
        else {
            panic!("expected charts to be rendered");
        };
        assert_eq!(record, dir.path().join("benchmark_20240102_000000.json"));
        assert_eq!(result_set.timestamp(), "20240102_000000");
        assert_eq!(
            charts,
            vec![
                dir.path().join(ABSOLUTE_CHART_FILE),
                dir.path().join(RELATIVE_CHART_FILE)
            ]
        );
        let calls = renderer.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "absolute");
        assert_eq!(calls[1].0, "relative");
        assert!(calls.iter().all(|(_, _, groups)| *groups == 1));
    }

    #[test]
    fn test_load_latest_without_rendering() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_latest(dir.path()).unwrap().is_none());

        io::write_result_set(dir.path(), &result_set("20240102_000000", "X")).unwrap();
        let (record, set) = load_latest(dir.path()).unwrap().unwrap();
        assert_eq!(record, dir.path().join("benchmark_20240102_000000.json"));
        assert_eq!(set.timestamp(), "20240102_000000");
        assert!(!dir.path().join(ABSOLUTE_CHART_FILE).exists());
    }

    #[test]
    fn test_existing_charts_are_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        io::write_result_set(dir.path(), &result_set("20240101_000000", "X")).unwrap();
        fs::write(dir.path().join(ABSOLUTE_CHART_FILE), b"stale").unwrap();

        visualize_latest(dir.path(), &Language::ALL, &RecordingRenderer::default()).unwrap();

        assert_eq!(
            fs::read(dir.path().join(ABSOLUTE_CHART_FILE)).unwrap(),
            b"absolute"
        );
    }

    #[test]
    fn test_corrupt_latest_record_is_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("benchmark_20240101_000000.json"), "[]").unwrap();

        let result = visualize_latest(dir.path(), &Language::ALL, &RecordingRenderer::default());
        assert!(matches!(result, Err(ChartError::Bench(_))));
    }

    #[test]
    fn test_summary_lists_timestamp_and_platform() {
        let text = summary(&result_set("20240102_000000", "X"));
        assert!(text.contains("Timestamp: 20240102_000000"));
        assert!(text.contains("Platform: Linux 6.8.0"));
    }
}
