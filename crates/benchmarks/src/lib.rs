//! Cross-language benchmark harness.
//!
//! This crate builds and runs equivalent benchmark kernels written in
//! several languages, parses their timing output and persists the combined
//! results as a timestamped JSON record.
//!
//! # Quick Start
//!
//! ```no_run
//! use langbench_benchmarks::{run_and_write_all, HarnessConfig, SystemRunner};
//!
//! let config = HarnessConfig::load(None)?;
//! let run = run_and_write_all(&config, &SystemRunner)?;
//! println!("{}", run.comparison().render_absolute());
//! # Ok::<(), langbench_benchmarks::BenchError>(())
//! ```
//!
//! # Modules
//!
//! - [`result`] - The persisted data model
//! - [`parser`] - Kernel output parsing
//! - [`orchestrator`] - Sequential build-and-run across languages
//! - [`compare`] - Comparison tables and baseline ratios
//! - [`io`] - Reading and writing result sets
//! - [`markdown`] - Markdown report generation
//! - [`process`] - External process abstraction
//! - [`platform`] - Host metadata
//! - [`settings`] - Layered configuration

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod compare;
pub mod error;
pub mod io;
pub mod markdown;
pub mod orchestrator;
pub mod parser;
pub mod platform;
pub mod process;
pub mod result;
pub mod settings;

pub use compare::Comparison;
pub use error::{BenchError, Result};
pub use orchestrator::{LanguageOutcome, Orchestrator, RunReport};
pub use process::{CommandSpec, ProcessOutput, ProcessRunner, SystemRunner};
pub use result::{BenchmarkRecord, Language, LanguageResults, PlatformInfo, ResultSet};
pub use settings::{HarnessConfig, LanguageConfig};

use std::path::PathBuf;
use tracing::info;

/// Everything produced by one benchmark run.
#[derive(Debug, Clone)]
pub struct BenchmarkRun {
    /// The persisted result set.
    pub result_set: ResultSet,
    /// Per-language outcomes.
    pub report: RunReport,
    /// Column order used for tables; the first language is the baseline.
    pub languages: Vec<Language>,
    /// Path of the JSON record, once written.
    pub record_path: Option<PathBuf>,
    /// Path of the markdown summary, once written.
    pub summary_path: Option<PathBuf>,
}

impl BenchmarkRun {
    /// Comparison table over this run's results.
    pub fn comparison(&self) -> Comparison<'_> {
        Comparison::new(self.result_set.results(), &self.languages)
    }
}

/// Run all configured benchmarks and return results.
///
/// This executes each language's build and run steps in order and stamps
/// the collected results with the current time and host description.
pub fn run_all_benchmarks(config: &HarnessConfig, runner: &dyn ProcessRunner) -> BenchmarkRun {
    let platform = PlatformInfo::detect(runner, config.python_interpreter());
    info!(system = %platform.system, release = %platform.release, "starting benchmark run");

    let report = Orchestrator::new(runner, &config.languages).run();
    let result_set = ResultSet::new(platform, report.results.clone());

    BenchmarkRun {
        result_set,
        report,
        languages: config.language_order(),
        record_path: None,
        summary_path: None,
    }
}

/// Run all benchmarks and write outputs to the results directory.
///
/// This function runs all benchmarks and writes:
/// - `<results_dir>/benchmark_<timestamp>.json` - The result set
/// - `<results_dir>/benchmark_<timestamp>.md` - Markdown summary
///
/// # Errors
///
/// Returns an error if the results directory or files cannot be written.
pub fn run_and_write_all(config: &HarnessConfig, runner: &dyn ProcessRunner) -> Result<BenchmarkRun> {
    let mut run = run_all_benchmarks(config, runner);

    let record_path = io::write_result_set(&config.results_dir, &run.result_set)?;
    let summary_path = io::write_summary(&config.results_dir, &run.result_set, &run.languages)?;

    info!(path = %record_path.display(), "results saved");
    run.record_path = Some(record_path);
    run.summary_path = Some(summary_path);
    Ok(run)
}
