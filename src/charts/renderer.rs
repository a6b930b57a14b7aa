//! Static Chart Renderer
//! Renders the prepared series to PNG files using plotters.
//!
//! Four stateless operations: line, dual-axis line, scatter and bar. Each
//! call writes one image and returns nothing a later step consumes.

use plotters::prelude::*;
use plotters::style::FontTransform;
use std::path::Path;
use thiserror::Error;

use crate::analysis::YearSeries;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to render chart: {0}")]
    Render(String),
    #[error("Mismatched categories and values: {0} vs {1}")]
    LengthMismatch(usize, usize),
}

impl ChartError {
    fn draw<E: std::fmt::Display>(err: E) -> Self {
        ChartError::Render(err.to_string())
    }
}

/// Default figure size for the single-axis charts.
const DEFAULT_SIZE: (u32, u32) = (1000, 600);

/// Creates static chart images with plotters.
pub struct ChartRenderer;

impl ChartRenderer {
    /// Single line over a year-keyed series.
    pub fn line_chart(
        series: &YearSeries,
        title: &str,
        x_label: &str,
        y_label: &str,
        out: &Path,
    ) -> Result<(), ChartError> {
        let root = BitMapBackend::new(out, DEFAULT_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::draw)?;

        let (x_min, x_max) = year_bounds(series);
        let (y_min, y_max) = value_bounds(&series.values());

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(ChartError::draw)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(x_label)
            .y_desc(y_label)
            .axis_desc_style(("sans-serif", 16))
            .draw()
            .map_err(ChartError::draw)?;

        chart
            .draw_series(LineSeries::new(series.iter(), BLUE.stroke_width(2)))
            .map_err(ChartError::draw)?;

        root.present().map_err(ChartError::draw)?;
        Ok(())
    }

    /// Two series over a shared x-axis with independent y-scales, series A
    /// against the left axis and series B against the right.
    #[allow(clippy::too_many_arguments)]
    pub fn dual_axis_line_chart(
        series_a: &YearSeries,
        series_b: &YearSeries,
        title: &str,
        x_label: &str,
        label_a: &str,
        label_b: &str,
        color_a: RGBColor,
        color_b: RGBColor,
        out: &Path,
    ) -> Result<(), ChartError> {
        let root = BitMapBackend::new(out, DEFAULT_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::draw)?;

        let (a_min, a_max) = year_bounds(series_a);
        let (b_min, b_max) = year_bounds(series_b);
        let x_range = a_min.min(b_min)..a_max.max(b_max);
        let (_, y_max_a) = value_bounds(&series_a.values());
        let (_, y_max_b) = value_bounds(&series_b.values());

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .right_y_label_area_size(55)
            .build_cartesian_2d(x_range.clone(), 0f64..y_max_a)
            .map_err(ChartError::draw)?
            .set_secondary_coord(x_range, 0f64..y_max_b);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(x_label)
            .y_desc(label_a)
            .axis_desc_style(("sans-serif", 16).into_font().color(&color_a))
            .draw()
            .map_err(ChartError::draw)?;

        chart
            .configure_secondary_axes()
            .y_desc(label_b)
            .axis_desc_style(("sans-serif", 16).into_font().color(&color_b))
            .draw()
            .map_err(ChartError::draw)?;

        chart
            .draw_series(LineSeries::new(series_a.iter(), color_a.stroke_width(2)))
            .map_err(ChartError::draw)?;
        chart
            .draw_secondary_series(LineSeries::new(series_b.iter(), color_b.stroke_width(2)))
            .map_err(ChartError::draw)?;

        root.present().map_err(ChartError::draw)?;
        Ok(())
    }

    /// One filled circle per `(year, value)` point.
    pub fn scatter_chart(
        series: &YearSeries,
        title: &str,
        x_label: &str,
        y_label: &str,
        out: &Path,
    ) -> Result<(), ChartError> {
        let root = BitMapBackend::new(out, DEFAULT_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::draw)?;

        let (x_min, x_max) = year_bounds(series);
        let (y_min, y_max) = value_bounds(&series.values());

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(ChartError::draw)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(x_label)
            .y_desc(y_label)
            .axis_desc_style(("sans-serif", 16))
            .draw()
            .map_err(ChartError::draw)?;

        chart
            .draw_series(
                series
                    .iter()
                    .map(|(year, value)| Circle::new((year, value), 4, BLUE.filled())),
            )
            .map_err(ChartError::draw)?;

        root.present().map_err(ChartError::draw)?;
        Ok(())
    }

    /// One bar per category with rotated tick labels.
    #[allow(clippy::too_many_arguments)]
    pub fn bar_chart(
        categories: &[String],
        values: &[f64],
        title: &str,
        x_label: &str,
        y_label: &str,
        color: RGBColor,
        size: (u32, u32),
        tick_rotation_deg: i32,
        out: &Path,
    ) -> Result<(), ChartError> {
        if categories.len() != values.len() {
            return Err(ChartError::LengthMismatch(categories.len(), values.len()));
        }

        let root = BitMapBackend::new(out, size).into_drawing_area();
        root.fill(&WHITE).map_err(ChartError::draw)?;

        let (_, y_max) = value_bounds(values);
        let n = categories.len().max(1);

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(130)
            .y_label_area_size(70)
            .build_cartesian_2d((0..n).into_segmented(), 0f64..y_max)
            .map_err(ChartError::draw)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(n)
            .x_label_formatter(&|segment| match segment {
                SegmentValue::CenterOf(idx) => categories.get(*idx).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .x_label_style(
                ("sans-serif", 14)
                    .into_font()
                    .transform(font_transform_for(tick_rotation_deg)),
            )
            .x_desc(x_label)
            .y_desc(y_label)
            .axis_desc_style(("sans-serif", 16))
            .draw()
            .map_err(ChartError::draw)?;

        chart
            .draw_series(values.iter().enumerate().map(|(idx, &value)| {
                Rectangle::new(
                    [
                        (SegmentValue::Exact(idx), 0.0),
                        (SegmentValue::Exact(idx + 1), value),
                    ],
                    color.filled(),
                )
            }))
            .map_err(ChartError::draw)?;

        root.present().map_err(ChartError::draw)?;
        Ok(())
    }
}

/// Inclusive year range of a series, widened so the axis never degenerates.
fn year_bounds(series: &YearSeries) -> (i32, i32) {
    let mut min = i32::MAX;
    let mut max = i32::MIN;
    for (year, _) in series.iter() {
        min = min.min(year);
        max = max.max(year);
    }
    if series.is_empty() {
        return (0, 1);
    }
    (min, max.max(min + 1))
}

/// Zero-based y range with headroom above the largest value.
fn value_bounds(values: &[f64]) -> (f64, f64) {
    let max = values.iter().cloned().fold(0.0f64, f64::max);
    if max <= 0.0 {
        return (0.0, 1.0);
    }
    (0.0, max * 1.05)
}

/// Plotters rasterizes text in quarter turns only; snap to the nearest.
fn font_transform_for(degrees: i32) -> FontTransform {
    match ((degrees.rem_euclid(360) + 45) / 90) % 4 {
        1 => FontTransform::Rotate90,
        2 => FontTransform::Rotate180,
        3 => FontTransform::Rotate270,
        _ => FontTransform::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_bounds_widen_degenerate_ranges() {
        let single = YearSeries::new(vec![(1949, 5.0)]);
        assert_eq!(year_bounds(&single), (1949, 1950));

        let empty = YearSeries::new(vec![]);
        assert_eq!(year_bounds(&empty), (0, 1));

        let series = YearSeries::new(vec![(1949, 5.0), (2019, 80.0)]);
        assert_eq!(year_bounds(&series), (1949, 2019));
    }

    #[test]
    fn value_bounds_start_at_zero_with_headroom() {
        let (lo, hi) = value_bounds(&[10.0, 40.0, 20.0]);
        assert_eq!(lo, 0.0);
        assert_eq!(hi, 42.0);

        assert_eq!(value_bounds(&[]), (0.0, 1.0));
    }

    #[test]
    fn tick_rotation_snaps_to_quarter_turns() {
        assert!(matches!(font_transform_for(0), FontTransform::None));
        assert!(matches!(font_transform_for(45), FontTransform::Rotate90));
        assert!(matches!(font_transform_for(90), FontTransform::Rotate90));
        assert!(matches!(font_transform_for(180), FontTransform::Rotate180));
        assert!(matches!(font_transform_for(315), FontTransform::None));
    }

    #[test]
    fn bar_chart_rejects_mismatched_inputs() {
        let err = ChartRenderer::bar_chart(
            &["Technic".to_string()],
            &[1.0, 2.0],
            "title",
            "x",
            "y",
            RED,
            (100, 100),
            0,
            Path::new("unused.png"),
        )
        .unwrap_err();
        assert!(matches!(err, ChartError::LengthMismatch(1, 2)));
    }
}
