// Copyright 2025 Language Benchmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! Sequential build-and-run orchestration across languages.
//!
//! Each configured language is built (when it has a build step) and then
//! run, one after another. Failures never abort the run: the language is
//! left out of the [`LanguageResults`] and reported as a
//! [`LanguageOutcome`].

use crate::parser::parse_output;
use crate::process::{ProcessOutput, ProcessRunner};
use crate::result::{BenchmarkRecord, Language, LanguageResults};
use crate::settings::LanguageConfig;
use tracing::{debug, info, warn};

/// What happened to one language during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageOutcome {
    /// Kernel ran and produced this many timings.
    Completed {
        /// Number of parsed tests.
        tests: usize,
    },
    /// Build step failed or could not be started; the kernel was not run.
    BuildFailed {
        /// Diagnostic from the build.
        reason: String,
    },
    /// Kernel failed or could not be started.
    RunFailed {
        /// Diagnostic from the run.
        reason: String,
    },
    /// Kernel succeeded but printed no parseable timings.
    NoResults,
}

impl LanguageOutcome {
    /// Whether the language contributed results.
    pub fn is_completed(&self) -> bool {
        matches!(self, LanguageOutcome::Completed { .. })
    }
}

/// Results of one orchestration run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Records of the languages that completed.
    pub results: LanguageResults,
    /// Outcome per configured language, in run order.
    pub outcomes: Vec<(Language, LanguageOutcome)>,
}

impl RunReport {
    /// Outcome recorded for `language`.
    pub fn outcome(&self, language: Language) -> Option<&LanguageOutcome> {
        self.outcomes
            .iter()
            .find(|(lang, _)| *lang == language)
            .map(|(_, outcome)| outcome)
    }
}

/// Runs each language's kernel through a [`ProcessRunner`].
pub struct Orchestrator<'a> {
    runner: &'a dyn ProcessRunner,
    languages: &'a [LanguageConfig],
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator over the configured languages.
    pub fn new(runner: &'a dyn ProcessRunner, languages: &'a [LanguageConfig]) -> Self {
        Self { runner, languages }
    }

    /// Build and run every language in order.
    pub fn run(&self) -> RunReport {
        let mut report = RunReport::default();

        for entry in self.languages {
            let outcome = match self.run_language(entry) {
                Ok(record) if record.is_empty() => {
                    warn!(language = entry.language.id(), "no timings in benchmark output");
                    LanguageOutcome::NoResults
                }
                Ok(record) => {
                    let tests = record.len();
                    info!(language = entry.language.id(), tests, "benchmark completed");
                    report.results.insert(entry.language, record);
                    LanguageOutcome::Completed { tests }
                }
                Err(outcome) => outcome,
            };
            report.outcomes.push((entry.language, outcome));
        }

        report
    }

    fn run_language(
        &self,
        entry: &LanguageConfig,
    ) -> Result<BenchmarkRecord, LanguageOutcome> {
        let language = entry.language;

        if let Some(build) = &entry.build {
            info!(language = language.id(), command = %build, "compiling");
            if let Err(reason) = check(self.runner.run(build)) {
                warn!(language = language.id(), %reason, "build failed, skipping language");
                return Err(LanguageOutcome::BuildFailed { reason });
            }
        }

        info!(language = language.id(), command = %entry.run, "running benchmark");
        match check(self.runner.run(&entry.run)) {
            Ok(output) => {
                if !output.stderr.trim().is_empty() {
                    debug!(language = language.id(), stderr = %output.stderr.trim(), "benchmark stderr");
                }
                Ok(parse_output(&output.stdout))
            }
            Err(reason) => {
                warn!(language = language.id(), %reason, "benchmark failed, skipping language");
                Err(LanguageOutcome::RunFailed { reason })
            }
        }
    }
}

/// Turn a spawn error or a non-zero exit into a diagnostic string.
fn check(result: crate::error::Result<ProcessOutput>) -> Result<ProcessOutput, String> {
    match result {
        Ok(output) if output.success => Ok(output),
        Ok(output) => {
            let status = output
                .exit_code
                .map_or_else(|| "terminated by signal".to_string(), |code| format!("exit status {code}"));
            let stderr = output.stderr.trim();
            if stderr.is_empty() {
                Err(status)
            } else {
                Err(format!("{status}: {stderr}"))
            }
        }
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BenchError;
    use crate::process::{CommandSpec, MockProcessRunner};
    use mockall::predicate::eq;
    use mockall::Sequence;

    fn compiled(language: Language, build: &str, run: &str) -> LanguageConfig {
        LanguageConfig {
            language,
            build: Some(CommandSpec::new(build)),
            run: CommandSpec::new(run),
        }
    }

    fn interpreted(language: Language, run: &str) -> LanguageConfig {
        LanguageConfig {
            language,
            build: None,
            run: CommandSpec::new(run),
        }
    }

    #[test]
    fn test_all_languages_complete() {
        let languages = vec![
            compiled(Language::Cpp, "g++", "cpp-bench"),
            interpreted(Language::Python, "py-bench"),
        ];
        let mut runner = MockProcessRunner::new();
        let mut seq = Sequence::new();
        runner
            .expect_run()
            .with(eq(CommandSpec::new("g++")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ProcessOutput::succeeded("")));
        runner
            .expect_run()
            .with(eq(CommandSpec::new("cpp-bench")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ProcessOutput::succeeded("C++ Benchmark\nX: 2.0 ms\nY: 1.0 ms\n")));
        runner
            .expect_run()
            .with(eq(CommandSpec::new("py-bench")))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ProcessOutput::succeeded("X: 80.5 ms\n")));

        let report = Orchestrator::new(&runner, &languages).run();

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results.duration(Language::Cpp, "Y"), Some(1.0));
        assert_eq!(report.results.duration(Language::Python, "X"), Some(80.5));
        assert_eq!(
            report.outcome(Language::Cpp),
            Some(&LanguageOutcome::Completed { tests: 2 })
        );
    }

    #[test]
    fn test_build_failure_skips_run_and_continues() {
        let languages = vec![
            compiled(Language::Cpp, "g++", "cpp-bench"),
            compiled(Language::Rust, "cargo", "rust-bench"),
        ];
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .with(eq(CommandSpec::new("g++")))
            .times(1)
            .returning(|_| Ok(ProcessOutput::failed(1, "error: expected ';'")));
        runner
            .expect_run()
            .with(eq(CommandSpec::new("cpp-bench")))
            .never();
        runner
            .expect_run()
            .with(eq(CommandSpec::new("cargo")))
            .times(1)
            .returning(|_| Ok(ProcessOutput::succeeded("")));
        runner
            .expect_run()
            .with(eq(CommandSpec::new("rust-bench")))
            .times(1)
            .returning(|_| Ok(ProcessOutput::succeeded("X: 2.5 ms\n")));

        let report = Orchestrator::new(&runner, &languages).run();

        assert!(report.results.get(Language::Cpp).is_none());
        assert_eq!(report.results.duration(Language::Rust, "X"), Some(2.5));
        match report.outcome(Language::Cpp) {
            Some(LanguageOutcome::BuildFailed { reason }) => {
                assert_eq!(reason, "exit status 1: error: expected ';'");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_build_spawn_error_is_build_failure() {
        let languages = vec![compiled(Language::Cpp, "g++", "cpp-bench")];
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .with(eq(CommandSpec::new("g++")))
            .returning(|cmd| {
                Err(BenchError::Spawn {
                    program: cmd.program.clone(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                })
            });
        runner.expect_run().with(eq(CommandSpec::new("cpp-bench"))).never();

        let report = Orchestrator::new(&runner, &languages).run();

        assert!(report.results.is_empty());
        assert!(matches!(
            report.outcome(Language::Cpp),
            Some(LanguageOutcome::BuildFailed { .. })
        ));
    }

    #[test]
    fn test_run_failure_is_distinct_from_build_failure() {
        let languages = vec![
            interpreted(Language::Python, "py-bench"),
            interpreted(Language::Rust, "rust-bench"),
        ];
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .with(eq(CommandSpec::new("py-bench")))
            .returning(|_| {
                Ok(ProcessOutput {
                    stdout: "X: 1.0 ms\n".to_string(),
                    ..ProcessOutput::failed(2, "Traceback")
                })
            });
        runner
            .expect_run()
            .with(eq(CommandSpec::new("rust-bench")))
            .returning(|_| Ok(ProcessOutput::succeeded("X: 3.0 ms\n")));

        let report = Orchestrator::new(&runner, &languages).run();

        assert!(report.results.get(Language::Python).is_none());
        assert!(matches!(
            report.outcome(Language::Python),
            Some(LanguageOutcome::RunFailed { .. })
        ));
        assert!(report.outcome(Language::Rust).unwrap().is_completed());
    }

    #[test]
    fn test_unparseable_output_omits_language() {
        let languages = vec![interpreted(Language::Python, "py-bench")];
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .returning(|_| Ok(ProcessOutput::succeeded("Python Benchmark\n================\n")));

        let report = Orchestrator::new(&runner, &languages).run();

        assert!(report.results.is_empty());
        assert_eq!(report.outcome(Language::Python), Some(&LanguageOutcome::NoResults));
    }

    #[test]
    fn test_outcomes_follow_configured_order() {
        let languages = vec![
            interpreted(Language::Python, "py-bench"),
            interpreted(Language::Cpp, "cpp-bench"),
        ];
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .returning(|_| Ok(ProcessOutput::succeeded("X: 1.0 ms\n")));

        let report = Orchestrator::new(&runner, &languages).run();
        let order: Vec<Language> = report.outcomes.iter().map(|(lang, _)| *lang).collect();
        assert_eq!(order, vec![Language::Python, Language::Cpp]);
    }

    #[test]
    fn test_check_signal_termination() {
        let output = ProcessOutput {
            exit_code: None,
            ..ProcessOutput::failed(0, "")
        };
        assert_eq!(check(Ok(output)), Err("terminated by signal".to_string()));
    }
}
