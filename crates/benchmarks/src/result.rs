//! Benchmark result types.
//!
//! This module provides the data model shared by the runner and the
//! visualizer: per-program [`BenchmarkRecord`]s, the per-language
//! [`LanguageResults`] aggregate and the persisted [`ResultSet`].

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Timestamp format used in records and file names (second resolution).
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A benchmarked language implementation.
///
/// The derived ordering is the canonical column order: C++, Rust, Python.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// C++ kernel, compiled with a native toolchain.
    Cpp,
    /// Rust kernel, built with cargo.
    Rust,
    /// Python kernel, run by the interpreter.
    Python,
}

impl Language {
    /// All languages in canonical order.
    pub const ALL: [Language; 3] = [Language::Cpp, Language::Rust, Language::Python];

    /// Identifier used in persisted records and configuration.
    pub fn id(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::Rust => "rust",
            Language::Python => "python",
        }
    }

    /// Human-readable label for tables and charts.
    pub fn label(&self) -> &'static str {
        match self {
            Language::Cpp => "C++",
            Language::Rust => "Rust",
            Language::Python => "Python",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown language: {s}"))
    }
}

/// Durations in milliseconds keyed by test name, from one program's output.
///
/// Every stored value is finite and non-negative. Test names are unique
/// and iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct BenchmarkRecord(BTreeMap<String, f64>);

impl BenchmarkRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `value` may be stored as a duration.
    pub fn is_valid_duration(value: f64) -> bool {
        value.is_finite() && value >= 0.0
    }

    /// Insert a duration, replacing any previous value for the same test.
    ///
    /// Returns `false` and leaves the record untouched when the value is
    /// negative, NaN or infinite. Negative zero is stored as zero.
    pub fn insert(&mut self, test: impl Into<String>, millis: f64) -> bool {
        if !Self::is_valid_duration(millis) {
            return false;
        }
        self.0.insert(test.into(), normalize_zero(millis));
        true
    }

    /// Duration recorded for `test`.
    pub fn get(&self, test: &str) -> Option<f64> {
        self.0.get(test).copied()
    }

    /// Number of tests in the record.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record holds no tests.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(test, millis)` pairs in test-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, millis)| (name.as_str(), *millis))
    }

    /// Test names in sorted order.
    pub fn tests(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl TryFrom<BTreeMap<String, f64>> for BenchmarkRecord {
    type Error = String;

    fn try_from(mut map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        if let Some((test, millis)) = map.iter().find(|(_, v)| !Self::is_valid_duration(**v)) {
            return Err(format!("invalid duration {millis} for test `{test}`"));
        }
        map.values_mut().for_each(|millis| *millis = normalize_zero(*millis));
        Ok(Self(map))
    }
}

/// `-0.0` compares equal to zero but prints with a sign.
pub(crate) fn normalize_zero(millis: f64) -> f64 {
    millis + 0.0
}

impl From<BenchmarkRecord> for BTreeMap<String, f64> {
    fn from(record: BenchmarkRecord) -> Self {
        record.0
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for BenchmarkRecord {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut record = BenchmarkRecord::new();
        for (test, millis) in iter {
            record.insert(test, millis);
        }
        record
    }
}

/// Per-language records collected during one run.
///
/// A language is absent when its build or run failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageResults(BTreeMap<Language, BenchmarkRecord>);

impl LanguageResults {
    /// Create an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the record for a language, replacing any previous one.
    pub fn insert(&mut self, language: Language, record: BenchmarkRecord) {
        self.0.insert(language, record);
    }

    /// Record for a language, if it produced one.
    pub fn get(&self, language: Language) -> Option<&BenchmarkRecord> {
        self.0.get(&language)
    }

    /// Duration of `test` for `language`.
    pub fn duration(&self, language: Language, test: &str) -> Option<f64> {
        self.get(language).and_then(|record| record.get(test))
    }

    /// Languages that produced results.
    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.0.keys().copied()
    }

    /// Sorted union of test names across all languages.
    pub fn test_names(&self) -> Vec<String> {
        self.0
            .values()
            .flat_map(BenchmarkRecord::tests)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    /// Number of languages with results.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no language produced results.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(language, record)` pairs.
    pub fn iter(&self) -> btree_map::Iter<'_, Language, BenchmarkRecord> {
        self.0.iter()
    }
}

/// Host description stored alongside every result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    /// Operating system family, e.g. `Linux`.
    pub system: String,
    /// Operating system release (kernel version).
    pub release: String,
    /// Machine architecture, e.g. `x86_64`.
    pub machine: String,
    /// Processor brand string.
    pub processor: String,
    /// Version of the Python interpreter used for the Python kernel.
    pub python_version: String,
}

/// The complete outcome of one benchmark run.
///
/// Created once per run, persisted once, and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    timestamp: String,
    platform: PlatformInfo,
    results: LanguageResults,
}

impl ResultSet {
    /// Create a result set stamped with the current local time.
    pub fn new(platform: PlatformInfo, results: LanguageResults) -> Self {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::with_timestamp(timestamp, platform, results)
    }

    /// Create a result set with an explicit timestamp.
    pub fn with_timestamp(
        timestamp: impl Into<String>,
        platform: PlatformInfo,
        results: LanguageResults,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            platform,
            results,
        }
    }

    /// Creation timestamp as `YYYYMMDD_HHMMSS`.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Host the run was performed on.
    pub fn platform(&self) -> &PlatformInfo {
        &self.platform
    }

    /// Per-language results.
    pub fn results(&self) -> &LanguageResults {
        &self.results
    }
}
