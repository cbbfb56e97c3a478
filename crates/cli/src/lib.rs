//! CLI for the language benchmark harness.
//!
//! This crate backs two binaries:
//! - `run-benchmark` - build and run every kernel, print the comparison
//!   tables and persist the result set
//! - `visualize-results` - chart the most recent persisted result set

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use langbench_benchmarks::{
    run_and_write_all, BenchmarkRun, HarnessConfig, Language, LanguageOutcome, SystemRunner,
};
use langbench_charts::{load_latest, render_charts, summary, ChartRenderer, PlottersRenderer};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn,langbench_benchmarks=info,langbench_charts=info";

/// Filter used with `--verbose` when `RUST_LOG` is unset.
const VERBOSE_FILTER: &str = "warn,langbench_benchmarks=debug,langbench_charts=debug";

/// Options shared by both binaries.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file (defaults to `langbench.toml` when present).
    #[arg(short, long, env = "LANGBENCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Results directory override.
    #[arg(short, long)]
    pub results_dir: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Load the harness configuration and apply command-line overrides.
    pub fn harness_config(&self) -> anyhow::Result<HarnessConfig> {
        let mut config = HarnessConfig::load(self.config.as_deref())
            .context("failed to load configuration")?;
        if let Some(dir) = &self.results_dir {
            config.results_dir = dir.clone();
        }
        debug!(?config, "configuration loaded");
        Ok(config)
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence over the built-in filters.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
                ),
        )
        .try_init();
}

fn setup(args: &Args) -> anyhow::Result<HarnessConfig> {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();
    init_logging(args.verbose);
    args.harness_config()
}

/// Entry point of `run-benchmark`.
///
/// # Returns
///
/// Returns `Ok(())` once results are printed and saved, even when some
/// languages failed; errors are reserved for configuration and I/O.
pub fn run_benchmark(args: Args) -> anyhow::Result<()> {
    let config = setup(&args)?;
    let rule = "=".repeat(80);

    println!("{rule}");
    println!("CROSS-LANGUAGE PERFORMANCE BENCHMARK");
    println!("{rule}");

    let run = run_and_write_all(&config, &SystemRunner).with_context(|| {
        format!("failed to write results to {}", config.results_dir.display())
    })?;

    print_platform(&run);
    print_outcomes(&run);

    let comparison = run.comparison();
    println!();
    print!("{}", comparison.render_absolute());
    if comparison.has_baseline_results() {
        println!();
        print!("{}", comparison.render_relative());
    } else if let Some(baseline) = comparison.baseline() {
        println!("\nNo {} results; relative performance not available.", baseline.label());
    }

    if let Some(path) = &run.record_path {
        println!("\nResults saved to: {}", path.display());
    }
    if let Some(path) = &run.summary_path {
        println!("Summary saved to: {}", path.display());
    }

    Ok(())
}

fn print_platform(run: &BenchmarkRun) {
    let platform = run.result_set.platform();
    println!("\nSystem Information:");
    println!("  Platform: {} {}", platform.system, platform.release);
    println!("  Machine: {}", platform.machine);
    println!("  Processor: {}", platform.processor);
    println!("  Python: {}", platform.python_version);
}

fn print_outcomes(run: &BenchmarkRun) {
    println!();
    for (language, outcome) in &run.report.outcomes {
        let status = match outcome {
            LanguageOutcome::Completed { tests } => format!("{tests} tests"),
            LanguageOutcome::BuildFailed { reason } => format!("build failed ({reason})"),
            LanguageOutcome::RunFailed { reason } => format!("run failed ({reason})"),
            LanguageOutcome::NoResults => "no results".to_string(),
        };
        println!("  {:<10} {}", language.label(), status);
    }
}

/// Entry point of `visualize-results`.
///
/// A missing result set is reported on stdout and is not an error.
pub fn visualize_results(args: Args) -> anyhow::Result<()> {
    let config = setup(&args)?;
    let stdout = std::io::stdout();
    visualize_to(
        &mut stdout.lock(),
        &config.results_dir,
        &config.language_order(),
        &PlottersRenderer::default(),
    )
}

/// Load the latest result set, print its summary, then render the charts.
///
/// The summary is written before any rendering starts, so it is shown
/// even when a chart fails.
pub fn visualize_to(
    out: &mut dyn Write,
    dir: &Path,
    languages: &[Language],
    renderer: &dyn ChartRenderer,
) -> anyhow::Result<()> {
    writeln!(out, "Loading benchmark results...")?;
    let Some((record, result_set)) = load_latest(dir).context("failed to load results")? else {
        writeln!(out, "No result files found in {}/ directory", dir.display())?;
        writeln!(out, "Please run run-benchmark first to generate results.")?;
        return Ok(());
    };

    writeln!(out, "Loaded: {}", record.display())?;
    write!(out, "\n{}", summary(&result_set))?;
    out.flush()?;

    let charts = render_charts(&result_set, dir, languages, renderer)
        .context("failed to render charts")?;
    for chart in &charts {
        writeln!(out, "Chart saved to: {}", chart.display())?;
    }
    writeln!(out, "\nVisualization complete!")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use langbench_benchmarks::{io, LanguageResults, PlatformInfo, ResultSet};
    use langbench_charts::{ChartData, ChartError};

    /// Renderer whose every chart fails, as with a missing font.
    struct FailingRenderer;

    impl ChartRenderer for FailingRenderer {
        fn render_absolute(&self, _chart: &ChartData, path: &Path) -> langbench_charts::Result<()> {
            Err(ChartError::Render {
                path: path.to_path_buf(),
                message: "no fonts".to_string(),
            })
        }

        fn render_relative(&self, chart: &ChartData, path: &Path) -> langbench_charts::Result<()> {
            self.render_absolute(chart, path)
        }
    }

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_need_no_flags() {
        let args = Args::try_parse_from(["run-benchmark"]).unwrap();
        assert!(args.results_dir.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_results_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args::try_parse_from([
            "visualize-results",
            "--results-dir",
            dir.path().to_str().unwrap(),
            "-v",
        ])
        .unwrap();
        assert!(args.verbose);

        let config = args.harness_config().unwrap();
        assert_eq!(config.results_dir, dir.path());
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            config: Some(dir.path().join("absent.toml")),
            ..Args::default()
        };
        assert!(args.harness_config().is_err());
    }

    #[test]
    fn test_visualize_without_results_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let results_dir = dir.path().join("results");
        let args = Args {
            results_dir: Some(results_dir.clone()),
            ..Args::default()
        };

        visualize_results(args).unwrap();
        assert!(!results_dir.exists());
    }

    #[test]
    fn test_summary_printed_before_render_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut results = LanguageResults::new();
        results.insert(Language::Cpp, [("X", 2.0)].into_iter().collect());
        let set = ResultSet::with_timestamp("20240102_000000", PlatformInfo::default(), results);
        io::write_result_set(dir.path(), &set).unwrap();

        let mut out = Vec::new();
        let result = visualize_to(&mut out, dir.path(), &Language::ALL, &FailingRenderer);

        assert!(result.is_err());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Timestamp: 20240102_000000"));
        assert!(!printed.contains("Chart saved to"));
    }

    #[test]
    fn test_visualize_to_reports_absence() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();

        visualize_to(&mut out, dir.path(), &Language::ALL, &FailingRenderer).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("No result files found"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
