//! Cross-language comparison of benchmark results.
//!
//! A [`Comparison`] lines up every observed test against the configured
//! languages and derives ratios against the baseline (first) language.

use crate::result::{Language, LanguageResults};
use std::fmt::Write;

/// Placeholder shown for missing values.
pub const PLACEHOLDER: &str = "N/A";

const TEST_WIDTH: usize = 40;
const VALUE_WIDTH: usize = 15;
const RULE_WIDTH: usize = 80;

/// Table view over one run's results.
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    results: &'a LanguageResults,
    languages: Vec<Language>,
    tests: Vec<String>,
}

impl<'a> Comparison<'a> {
    /// Compare `results` across `languages`; the first language is the baseline.
    pub fn new(results: &'a LanguageResults, languages: &[Language]) -> Self {
        Self {
            results,
            languages: languages.to_vec(),
            tests: results.test_names(),
        }
    }

    /// Distinct test names across all languages, sorted.
    pub fn tests(&self) -> &[String] {
        &self.tests
    }

    /// Column languages in order.
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Reference language, if any language is configured.
    pub fn baseline(&self) -> Option<Language> {
        self.languages.first().copied()
    }

    /// Whether the baseline language produced any results.
    ///
    /// Without them every ratio is undefined and the relative table is
    /// not worth showing.
    pub fn has_baseline_results(&self) -> bool {
        self.baseline()
            .and_then(|language| self.results.get(language))
            .is_some_and(|record| !record.is_empty())
    }

    /// Absolute duration of `test` for `language`.
    pub fn duration(&self, test: &str, language: Language) -> Option<f64> {
        self.results.duration(language, test)
    }

    /// Duration of `test` for `language` divided by the baseline's.
    ///
    /// Defined only when both values exist and the baseline is strictly
    /// positive.
    pub fn relative(&self, test: &str, language: Language) -> Option<f64> {
        let baseline = self.duration(test, self.baseline()?)?;
        if baseline <= 0.0 {
            return None;
        }
        Some(self.duration(test, language)? / baseline)
    }

    /// Fixed-width table of absolute durations in milliseconds.
    pub fn render_absolute(&self) -> String {
        let mut out = String::new();
        writeln!(out, "{}", "=".repeat(RULE_WIDTH)).unwrap();
        writeln!(out, "BENCHMARK RESULTS (time in milliseconds)").unwrap();
        writeln!(out, "{}", "=".repeat(RULE_WIDTH)).unwrap();
        self.write_header(&mut out);
        writeln!(out, "{}", "-".repeat(RULE_WIDTH)).unwrap();

        for test in &self.tests {
            write!(out, "{test:<TEST_WIDTH$}").unwrap();
            for language in &self.languages {
                let cell = format_millis(self.duration(test, *language));
                write!(out, " {cell:<VALUE_WIDTH$}").unwrap();
            }
            out.push('\n');
        }

        writeln!(out, "{}", "=".repeat(RULE_WIDTH)).unwrap();
        out
    }

    /// Fixed-width table of ratios against the baseline language.
    pub fn render_relative(&self) -> String {
        let mut out = String::new();
        let baseline = self.baseline().map_or(PLACEHOLDER, |lang| lang.label());
        writeln!(out, "RELATIVE PERFORMANCE (compared to {baseline})").unwrap();
        writeln!(out, "{}", "=".repeat(RULE_WIDTH)).unwrap();
        self.write_header(&mut out);
        writeln!(out, "{}", "-".repeat(RULE_WIDTH)).unwrap();

        for test in &self.tests {
            write!(out, "{test:<TEST_WIDTH$}").unwrap();
            for language in &self.languages {
                let cell = format_ratio(self.relative(test, *language));
                write!(out, " {cell:<VALUE_WIDTH$}").unwrap();
            }
            out.push('\n');
        }

        writeln!(out, "{}", "=".repeat(RULE_WIDTH)).unwrap();
        out
    }

    fn write_header(&self, out: &mut String) {
        write!(out, "{:<TEST_WIDTH$}", "Test").unwrap();
        for language in &self.languages {
            write!(out, " {:<VALUE_WIDTH$}", language.label()).unwrap();
        }
        out.push('\n');
    }
}

/// Format a duration with two decimals, or the placeholder.
pub fn format_millis(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v:.2}"))
}

/// Format a ratio as `1.23x`, or the placeholder.
pub fn format_ratio(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v:.2}x"))
}
