// Copyright 2025 Language Benchmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! Harness configuration.
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional `langbench.toml` (or an explicit file), then `LANGBENCH__*`
//! environment variables.
//!
//! # Example
//!
//! ```toml
//! results_dir = "results"
//!
//! [[languages]]
//! language = "cpp"
//! build = { program = "g++", args = ["-O3", "kernels/cpp/benchmark.cpp", "-o", "kernels/cpp/benchmark"] }
//! run = { program = "./kernels/cpp/benchmark" }
//!
//! [[languages]]
//! language = "python"
//! run = { program = "python3", args = ["kernels/python/benchmark.py"] }
//! ```

use crate::error::{BenchError, Result};
use crate::io::RESULTS_DIR;
use crate::process::CommandSpec;
use crate::result::Language;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "langbench";

/// Interpreter queried for the version when Python is not configured.
pub const DEFAULT_PYTHON: &str = "python3";

/// Prefix for environment overrides, e.g. `LANGBENCH__RESULTS_DIR`.
pub const ENV_PREFIX: &str = "LANGBENCH";

/// How to build and run one language's kernel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Language implemented by the kernel.
    pub language: Language,
    /// Build step; interpreted languages have none.
    #[serde(default)]
    pub build: Option<CommandSpec>,
    /// Command that runs the kernel and prints its timings.
    pub run: CommandSpec,
}

/// Top-level harness settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Directory receiving records and charts.
    pub results_dir: PathBuf,
    /// Languages in column order; the first one is the baseline.
    pub languages: Vec<LanguageConfig>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from(RESULTS_DIR),
            languages: vec![
                LanguageConfig {
                    language: Language::Cpp,
                    build: Some(CommandSpec::new("g++").args([
                        "-O3",
                        "-std=c++17",
                        "kernels/cpp/benchmark.cpp",
                        "-o",
                        "kernels/cpp/benchmark",
                    ])),
                    run: CommandSpec::new("./kernels/cpp/benchmark"),
                },
                LanguageConfig {
                    language: Language::Rust,
                    build: Some(
                        CommandSpec::new("cargo")
                            .args(["build", "--release"])
                            .current_dir("crates/kernel"),
                    ),
                    run: CommandSpec::new("cargo")
                        .args(["run", "--release", "--quiet"])
                        .current_dir("crates/kernel"),
                },
                LanguageConfig {
                    language: Language::Python,
                    build: None,
                    run: CommandSpec::new(DEFAULT_PYTHON).args(["kernels/python/benchmark.py"]),
                },
            ],
        }
    }
}

impl HarnessConfig {
    /// Load settings from defaults, an optional file and the environment.
    ///
    /// With `path = None`, `langbench.toml` in the working directory is used
    /// if it exists. An explicit path must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or parsed, or if the
    /// resulting settings fail [`HarnessConfig::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&HarnessConfig::default())?);

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let settings: HarnessConfig = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings describe a runnable benchmark.
    pub fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            return Err(BenchError::InvalidConfig(
                "at least one language must be configured".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.languages {
            if !seen.insert(entry.language) {
                return Err(BenchError::InvalidConfig(format!(
                    "language `{}` is configured more than once",
                    entry.language.id()
                )));
            }
            let commands = std::iter::once(&entry.run).chain(entry.build.as_ref());
            for command in commands {
                if command.program.trim().is_empty() {
                    return Err(BenchError::InvalidConfig(format!(
                        "language `{}` has an empty program",
                        entry.language.id()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Reference language for relative comparisons.
    pub fn baseline(&self) -> Option<Language> {
        self.languages.first().map(|entry| entry.language)
    }

    /// Interpreter that runs the Python kernel.
    ///
    /// This is the program of the Python entry's run step, so the recorded
    /// version always describes the interpreter that produced the timings.
    pub fn python_interpreter(&self) -> &str {
        self.languages
            .iter()
            .find(|entry| entry.language == Language::Python)
            .map_or(DEFAULT_PYTHON, |entry| entry.run.program.as_str())
    }

    /// Configured languages in column order.
    pub fn language_order(&self) -> Vec<Language> {
        self.languages.iter().map(|entry| entry.language).collect()
    }
}
