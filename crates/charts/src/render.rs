// Copyright 2025 Language Benchmark Contributors
// SPDX-License-Identifier: Apache-2.0

//! Chart rendering.
//!
//! [`ChartRenderer`] is the seam between chart data and image files.
//! [`PlottersRenderer`] draws grouped bar charts on a logarithmic axis and
//! encodes them as PNG.

use crate::data::{grid_shape, log_bounds, BarGroup, ChartData};
use crate::error::{ChartError, Result};
use langbench_benchmarks::Language;
use plotters::coord::ranged1d::SegmentValue;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::Path;
use tracing::debug;

const FONT: &str = "sans-serif";

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// Writes charts to image files.
pub trait ChartRenderer {
    /// Render one subplot per test with absolute values.
    fn render_absolute(&self, chart: &ChartData, path: &Path) -> Result<()>;

    /// Render all tests in one grouped chart with a legend.
    fn render_relative(&self, chart: &ChartData, path: &Path) -> Result<()>;
}

/// Bar color for a language.
pub fn language_color(language: Language) -> RGBColor {
    match language {
        Language::Cpp => RGBColor(31, 119, 180),
        Language::Rust => RGBColor(255, 127, 14),
        Language::Python => RGBColor(44, 160, 44),
    }
}

/// PNG renderer backed by plotters' bitmap backend.
#[derive(Debug, Clone, Copy)]
pub struct PlottersRenderer {
    /// Pixel size of the absolute chart.
    pub absolute_size: (u32, u32),
    /// Pixel size of the relative chart.
    pub relative_size: (u32, u32),
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self {
            absolute_size: (1600, 1400),
            relative_size: (1500, 900),
        }
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render_absolute(&self, chart: &ChartData, path: &Path) -> Result<()> {
        debug!(path = %path.display(), groups = chart.groups.len(), "rendering absolute chart");
        draw_absolute(chart, path, self.absolute_size).map_err(|e| render_error(path, e))
    }

    fn render_relative(&self, chart: &ChartData, path: &Path) -> Result<()> {
        debug!(path = %path.display(), groups = chart.groups.len(), "rendering relative chart");
        draw_relative(chart, path, self.relative_size).map_err(|e| render_error(path, e))
    }
}

fn render_error(path: &Path, error: Box<dyn std::error::Error>) -> ChartError {
    ChartError::Render {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

fn draw_absolute(chart: &ChartData, path: &Path, size: (u32, u32)) -> DrawResult {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(&chart.title, (FONT, 32.0))?;

    let panels = root.split_evenly(grid_shape(chart.groups.len()));
    for (panel, group) in panels.iter().zip(&chart.groups) {
        draw_panel(panel, chart, group)?;
    }

    root.present()?;
    Ok(())
}

/// One subplot: a bar per language, labelled by language.
fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    chart: &ChartData,
    group: &BarGroup,
) -> DrawResult {
    let Some((lo, hi)) = log_bounds(group.drawable_values()) else {
        area.titled(&group.test, (FONT, 20.0))?;
        return Ok(());
    };

    let slots = group.bars.len() as i32;
    let labels: Vec<String> = group
        .bars
        .iter()
        .map(|bar| bar.language.label().to_string())
        .collect();
    let x_label = |v: &SegmentValue<i32>| slot_label(v, &labels);

    let mut ctx = ChartBuilder::on(area)
        .caption(&group.test, (FONT, 20.0))
        .margin(12)
        .x_label_area_size(30)
        .y_label_area_size(70)
        .build_cartesian_2d(slot_axis(slots).into_segmented(), (lo..hi).log_scale())?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(slots as usize)
        .x_label_formatter(&x_label)
        .y_desc(chart.y_desc.as_str())
        .label_style((FONT, 14.0))
        .draw()?;

    for (slot, bar) in group.bars.iter().enumerate() {
        let Some(value) = bar.value.filter(|v| *v > 0.0) else {
            continue;
        };
        let slot = slot as i32;
        let color = language_color(bar.language);
        ctx.draw_series(std::iter::once(bar_rect(slot, lo, value, color)))?;
        ctx.draw_series(std::iter::once(annotation(chart, slot, value)))?;
    }

    Ok(())
}

fn draw_relative(chart: &ChartData, path: &Path, size: (u32, u32)) -> DrawResult {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let values = chart.groups.iter().flat_map(BarGroup::drawable_values);
    let Some((lo, hi)) = log_bounds(values) else {
        root.titled(&chart.title, (FONT, 28.0))?;
        root.present()?;
        return Ok(());
    };

    // Each test gets one slot per language plus a spacer slot; the last
    // group needs no spacer.
    let per_group = chart.languages.len() as i32 + 1;
    let slots = per_group * chart.groups.len() as i32 - 1;
    let mut labels = vec![String::new(); slots as usize];
    for (index, group) in chart.groups.iter().enumerate() {
        let center = index as i32 * per_group + (per_group - 1) / 2;
        labels[center as usize] = group.test.clone();
    }
    let x_label = |v: &SegmentValue<i32>| slot_label(v, &labels);

    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, (FONT, 28.0))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(slot_axis(slots).into_segmented(), (lo..hi).log_scale())?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(slots as usize)
        .x_label_formatter(&x_label)
        .y_desc(chart.y_desc.as_str())
        .label_style((FONT, 14.0))
        .draw()?;

    for (position, language) in chart.languages.iter().enumerate() {
        let color = language_color(*language);
        let bars: Vec<(i32, f64)> = chart
            .groups
            .iter()
            .enumerate()
            .filter_map(|(index, group)| {
                let value = group.bars.get(position)?.value.filter(|v| *v > 0.0)?;
                Some((index as i32 * per_group + position as i32, value))
            })
            .collect();

        let label = if chart.baseline == Some(*language) {
            format!("{} (baseline)", language.label())
        } else {
            language.label().to_string()
        };

        ctx.draw_series(bars.iter().map(|(slot, value)| bar_rect(*slot, lo, *value, color)))?
            .label(label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled()));
        ctx.draw_series(bars.iter().map(|(slot, value)| annotation(chart, *slot, *value)))?;
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font((FONT, 14.0))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Discrete range whose segmented axis has exactly `slots` segments.
///
/// A segmented `a..b` range has one segment per value including `b`. A
/// single slot still gets two segments since a zero-width range cannot be
/// mapped.
fn slot_axis(slots: i32) -> Range<i32> {
    0..(slots - 1).max(1)
}

fn slot_label(value: &SegmentValue<i32>, labels: &[String]) -> String {
    match value {
        SegmentValue::CenterOf(slot) if *slot >= 0 => {
            labels.get(*slot as usize).cloned().unwrap_or_default()
        }
        _ => String::new(),
    }
}

fn bar_rect(
    slot: i32,
    floor: f64,
    value: f64,
    color: RGBColor,
) -> Rectangle<(SegmentValue<i32>, f64)> {
    let mut rect = Rectangle::new(
        [(SegmentValue::Exact(slot), floor), (SegmentValue::Exact(slot + 1), value)],
        color.filled(),
    );
    rect.set_margin(0, 0, 3, 3);
    rect
}

fn annotation(
    chart: &ChartData,
    slot: i32,
    value: f64,
) -> Text<'static, (SegmentValue<i32>, f64), String> {
    let style =
        TextStyle::from((FONT, 13.0).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
    Text::new(chart.annotation(value), (SegmentValue::CenterOf(slot), value), style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{absolute_chart, relative_chart};
    use langbench_benchmarks::{LanguageResults, PlatformInfo, ResultSet};

    #[test]
    fn test_slot_label_only_on_centers() {
        let labels = vec!["C++".to_string(), "Rust".to_string()];
        assert_eq!(slot_label(&SegmentValue::CenterOf(1), &labels), "Rust");
        assert_eq!(slot_label(&SegmentValue::CenterOf(5), &labels), "");
        assert_eq!(slot_label(&SegmentValue::Exact(0), &labels), "");
        assert_eq!(slot_label(&SegmentValue::Last, &labels), "");
    }

    #[test]
    fn test_slot_axis_has_one_segment_per_slot() {
        assert_eq!(slot_axis(3), 0..2);
        assert_eq!(slot_axis(7), 0..6);
        assert_eq!(slot_axis(1), 0..1);
    }

    #[test]
    fn test_plotters_renderer_writes_png_files() {
        let mut results = LanguageResults::new();
        results.insert(Language::Cpp, [("A", 2.0), ("B", 10.0)].into_iter().collect());
        results.insert(Language::Rust, [("A", 3.0), ("B", 0.0)].into_iter().collect());
        results.insert(Language::Python, [("A", 150.0)].into_iter().collect());
        let set = ResultSet::with_timestamp("20240101_000000", PlatformInfo::default(), results);

        let dir = tempfile::tempdir().unwrap();
        let absolute = dir.path().join("absolute.png");
        let relative = dir.path().join("relative.png");
        let renderer = PlottersRenderer {
            absolute_size: (640, 480),
            relative_size: (640, 480),
        };

        renderer
            .render_absolute(&absolute_chart(&set, &Language::ALL), &absolute)
            .unwrap();
        renderer
            .render_relative(&relative_chart(&set, &Language::ALL), &relative)
            .unwrap();

        for path in [absolute, relative] {
            let bytes = std::fs::read(&path).unwrap();
            assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "{} is not a PNG", path.display());
        }
    }

    #[test]
    fn test_language_colors_are_distinct() {
        let colors: Vec<(u8, u8, u8)> = Language::ALL
            .into_iter()
            .map(|lang| {
                let RGBColor(r, g, b) = language_color(lang);
                (r, g, b)
            })
            .collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }
}
