//! Chart data preparation.
//!
//! Turns a [`ResultSet`] into renderer-neutral bar groups. Missing values
//! stay `None` and are left out of the drawing; no fallback is substituted.

use langbench_benchmarks::{Comparison, Language, ResultSet};

/// Title of the absolute-duration chart.
pub const ABSOLUTE_TITLE: &str = "Language Performance Comparison";

/// One bar: a language and its value, if known.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Language the bar belongs to.
    pub language: Language,
    /// Bar height; `None` when there is no data.
    pub value: Option<f64>,
}

/// Bars for one test, one per language.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    /// Test name.
    pub test: String,
    /// Bars in language order.
    pub bars: Vec<Bar>,
}

impl BarGroup {
    /// Values that can be drawn on a logarithmic axis.
    pub fn drawable_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.bars
            .iter()
            .filter_map(|bar| bar.value)
            .filter(|value| *value > 0.0)
    }
}

/// A complete grouped-bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// Chart title.
    pub title: String,
    /// Vertical axis description.
    pub y_desc: String,
    /// Suffix for value annotations, e.g. `x` for ratios.
    pub value_suffix: String,
    /// Decimal places in value annotations.
    pub precision: usize,
    /// Reference language, highlighted in the legend.
    pub baseline: Option<Language>,
    /// Languages in bar order.
    pub languages: Vec<Language>,
    /// One group per test, sorted by test name.
    pub groups: Vec<BarGroup>,
}

impl ChartData {
    /// Annotation text for a bar value.
    pub fn annotation(&self, value: f64) -> String {
        format!("{value:.prec$}{}", self.value_suffix, prec = self.precision)
    }

    /// Whether any bar can be drawn.
    pub fn has_drawable_values(&self) -> bool {
        self.groups.iter().any(|group| group.drawable_values().next().is_some())
    }
}

/// Absolute durations per test and language.
pub fn absolute_chart(set: &ResultSet, languages: &[Language]) -> ChartData {
    let comparison = Comparison::new(set.results(), languages);
    let groups = comparison
        .tests()
        .iter()
        .map(|test| BarGroup {
            test: test.clone(),
            bars: languages
                .iter()
                .map(|language| Bar {
                    language: *language,
                    value: comparison.duration(test, *language),
                })
                .collect(),
        })
        .collect();

    ChartData {
        title: ABSOLUTE_TITLE.to_string(),
        y_desc: "Time (ms)".to_string(),
        value_suffix: String::new(),
        precision: 1,
        baseline: comparison.baseline(),
        languages: languages.to_vec(),
        groups,
    }
}

/// Durations relative to the baseline (first) language.
///
/// The baseline bar is 1.0 wherever the ratio is defined. A test without a
/// positive baseline value has no bars at all.
pub fn relative_chart(set: &ResultSet, languages: &[Language]) -> ChartData {
    let comparison = Comparison::new(set.results(), languages);
    let groups = comparison
        .tests()
        .iter()
        .map(|test| BarGroup {
            test: test.clone(),
            bars: languages
                .iter()
                .map(|language| Bar {
                    language: *language,
                    value: comparison.relative(test, *language),
                })
                .collect(),
        })
        .collect();

    let baseline = comparison.baseline();
    ChartData {
        title: format!(
            "Performance Relative to {}",
            baseline.map_or("baseline", |lang| lang.label())
        ),
        y_desc: "Relative Performance (lower is better)".to_string(),
        value_suffix: "x".to_string(),
        precision: 1,
        baseline,
        languages: languages.to_vec(),
        groups,
    }
}

/// Vertical bounds for a logarithmic axis over `values`.
///
/// Non-positive values are ignored. The range leaves room below the
/// smallest bar and above the tallest annotation. Returns `None` when
/// nothing is drawable.
pub fn log_bounds(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .into_iter()
        .filter(|value| value.is_finite() && *value > 0.0)
        .fold((f64::INFINITY, 0.0_f64), |(lo, hi), value| {
            (lo.min(value), hi.max(value))
        });
    (hi > 0.0).then(|| (lo / 2.0, hi * 4.0))
}

/// Rows and columns for `panels` subplots, at most two columns wide.
pub fn grid_shape(panels: usize) -> (usize, usize) {
    match panels {
        0 | 1 => (1, 1),
        n => ((n + 1) / 2, 2),
    }
}
