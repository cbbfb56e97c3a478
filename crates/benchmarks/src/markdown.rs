//! Markdown output generation for benchmark results.
//!
//! This module renders a [`ResultSet`] as a markdown report that is written
//! next to the JSON record.

use crate::compare::{format_millis, format_ratio, Comparison};
use crate::result::{Language, ResultSet};
use std::fmt::Write;

/// Generate a markdown summary for a result set.
///
/// Columns follow the canonical language order with C++ as the baseline.
pub fn generate_summary(set: &ResultSet) -> String {
    generate_summary_for(set, &Language::ALL)
}

/// Generate a markdown summary with an explicit column order.
pub fn generate_summary_for(set: &ResultSet, languages: &[Language]) -> String {
    let mut output = String::new();
    let platform = set.platform();
    let comparison = Comparison::new(set.results(), languages);

    writeln!(output, "# Benchmark Summary").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Timestamp: {}", set.timestamp()).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "## Platform").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "- System: {} {}", platform.system, platform.release).unwrap();
    writeln!(output, "- Machine: {}", platform.machine).unwrap();
    writeln!(output, "- Processor: {}", platform.processor).unwrap();
    writeln!(output, "- Python: {}", platform.python_version).unwrap();
    writeln!(output).unwrap();

    writeln!(output, "## Results (ms)").unwrap();
    writeln!(output).unwrap();
    write_header(&mut output, languages);
    for test in comparison.tests() {
        write!(output, "| {test} |").unwrap();
        for language in languages {
            write!(output, " {} |", format_millis(comparison.duration(test, *language))).unwrap();
        }
        writeln!(output).unwrap();
    }
    writeln!(output).unwrap();

    if let Some(baseline) = comparison.baseline().filter(|_| comparison.has_baseline_results()) {
        writeln!(output, "## Relative to {}", baseline.label()).unwrap();
        writeln!(output).unwrap();
        write_header(&mut output, languages);
        for test in comparison.tests() {
            write!(output, "| {test} |").unwrap();
            for language in languages {
                write!(output, " {} |", format_ratio(comparison.relative(test, *language))).unwrap();
            }
            writeln!(output).unwrap();
        }
        writeln!(output).unwrap();
    }

    writeln!(output, "---").unwrap();
    writeln!(
        output,
        "Languages with results: {} of {}",
        set.results().len(),
        languages.len()
    )
    .unwrap();

    output
}

fn write_header(output: &mut String, languages: &[Language]) {
    write!(output, "| Test |").unwrap();
    for language in languages {
        write!(output, " {} |", language.label()).unwrap();
    }
    writeln!(output).unwrap();
    write!(output, "|------|").unwrap();
    for _ in languages {
        write!(output, "------|").unwrap();
    }
    writeln!(output).unwrap();
}
