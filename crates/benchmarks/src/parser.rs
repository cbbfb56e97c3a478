//! Parsing of benchmark program output.
//!
//! Kernels print one line per test in the shape `<TestName>: <number> ms`.
//! Anything else (banners, separators, malformed numbers) is skipped so a
//! noisy program still yields whatever timings it did print.

use crate::result::{normalize_zero, BenchmarkRecord};

const SEPARATOR: &str = ": ";
const UNIT_SUFFIX: &str = " ms";

/// Parse a single output line into a `(test, millis)` pair.
///
/// Returns `None` when the line does not have the timing shape, when the
/// number does not parse, or when it is not a valid duration.
pub fn parse_line(line: &str) -> Option<(String, f64)> {
    let line = line.trim();
    if !line.contains(SEPARATOR) || !line.contains(UNIT_SUFFIX) {
        return None;
    }

    let (label, remainder) = line.split_once(SEPARATOR)?;
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    let number = remainder.trim().strip_suffix(UNIT_SUFFIX)?.trim();
    let millis: f64 = number.parse().ok()?;
    if !BenchmarkRecord::is_valid_duration(millis) {
        return None;
    }

    Some((label.to_string(), normalize_zero(millis)))
}

/// Parse the complete stdout of a benchmark run.
///
/// Later lines win when a test name repeats.
pub fn parse_output(output: &str) -> BenchmarkRecord {
    output.lines().filter_map(parse_line).collect()
}
