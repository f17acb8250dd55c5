//! Chart drawing with plotters.
//!
//! The chart is rendered into an in-memory SVG document; persisting it is
//! the caller's business. Layout follows the page's dark theme: category
//! x axis over the day labels, temperature on the left axis, humidity on a
//! right axis that only appears when a humidity dataset exists.

pub mod datasets;
pub mod style;

use crate::viz::datasets::{AxisSlot, DatasetSpec, gap_segments};
use crate::viz::style::{CHART_BG, DASH_PATTERN, LineDash, Rgb8};
use anyhow::{Result, anyhow};
use plotters::chart::DualCoordChartContext;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::{AreaSeries, DashedLineSeries, LineSeries};
use plotters_svg::SVGBackend;

type PrimaryChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;
type DualChart<'a, DB> = DualCoordChartContext<
    'a,
    DB,
    Cartesian2d<RangedCoordf64, RangedCoordf64>,
    Cartesian2d<RangedCoordf64, RangedCoordf64>,
>;

/// Render a forecast chart as an SVG document.
///
/// `times` supplies the x axis labels; every dataset's values are indexed
/// against it. Fails when there is nothing to draw at all (no labels or no
/// datasets); a dataset whose values are all gaps still renders as empty
/// axes.
pub fn render_svg(
    times: &[String],
    datasets: &[DatasetSpec],
    width: u32,
    height: u32,
    title: &str,
) -> Result<String> {
    if times.is_empty() {
        return Err(anyhow!("no labels to plot"));
    }
    if datasets.is_empty() {
        return Err(anyhow!("no datasets to plot"));
    }

    let (x_lo, x_hi) = x_domain(times.len());
    let (y_lo, y_hi) = value_range(datasets, AxisSlot::Primary).unwrap_or((0.0, 1.0));
    let has_secondary = datasets.iter().any(|d| d.axis == AxisSlot::Secondary);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&rgb(CHART_BG)).map_err(|e| anyhow!("{:?}", e))?;

        let mut builder = ChartBuilder::on(&root);
        builder
            .margin(16)
            .caption(title, ("sans-serif", 20).into_font().color(&WHITE))
            .set_label_area_size(LabelAreaPosition::Left, 56)
            .set_label_area_size(LabelAreaPosition::Bottom, 44);

        if has_secondary {
            builder.set_label_area_size(LabelAreaPosition::Right, 56);
            let mut chart = builder
                .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
                .map_err(|e| anyhow!("{:?}", e))?
                .set_secondary_coord(x_lo..x_hi, humidity_range(datasets));
            draw_mesh(&mut chart, times)?;
            chart
                .configure_secondary_axes()
                .y_desc("Humidity (%)")
                .label_style(("sans-serif", 12).into_font().color(&WHITE))
                .axis_desc_style(("sans-serif", 16).into_font().color(&WHITE))
                .axis_style(WHITE.mix(0.8))
                .draw()
                .map_err(|e| anyhow!("{:?}", e))?;
            let mut labeled = draw_primary(&mut chart, datasets, y_lo)?;
            for ds in datasets.iter().filter(|d| d.axis == AxisSlot::Secondary) {
                labeled |= draw_secondary(&mut chart, ds)?;
            }
            if labeled {
                draw_legend(&mut chart)?;
            }
        } else {
            let mut chart = builder
                .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
                .map_err(|e| anyhow!("{:?}", e))?;
            draw_mesh(&mut chart, times)?;
            if draw_primary(&mut chart, datasets, y_lo)? {
                draw_legend(&mut chart)?;
            }
        }

        root.present().map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(svg)
}

/// Axis grid, tick labels, and axis descriptions on the primary coord.
fn draw_mesh<DB: DrawingBackend>(chart: &mut PrimaryChart<'_, DB>, times: &[String]) -> Result<()> {
    let x_fmt = |x: &f64| {
        let i = x.round();
        if i < 0.0 {
            return String::new();
        }
        times.get(i as usize).cloned().unwrap_or_default()
    };
    let y_fmt = |v: &f64| format!("{v:.0}");
    let x_label_count = times.len().min(12);

    chart
        .configure_mesh()
        .y_desc("Temperature (°C)")
        .x_labels(x_label_count)
        .y_labels(8)
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .label_style(("sans-serif", 12).into_font().color(&WHITE))
        .axis_desc_style(("sans-serif", 16).into_font().color(&WHITE))
        .axis_style(WHITE.mix(0.8))
        .bold_line_style(WHITE.mix(0.2))
        .light_line_style(WHITE.mix(0.06))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Draw all primary-axis datasets: fills first, then strokes, then markers.
/// Returns whether any dataset was attached to the legend.
fn draw_primary<DB: DrawingBackend>(
    chart: &mut PrimaryChart<'_, DB>,
    datasets: &[DatasetSpec],
    baseline: f64,
) -> Result<bool> {
    let mut any_labeled = false;
    for ds in datasets.iter().filter(|d| d.axis == AxisSlot::Primary) {
        let color = rgb(ds.style.color);
        let segments = gap_segments(&ds.values, ds.span_gaps);

        if ds.style.fill_alpha > 0.0 {
            for seg in &segments {
                chart
                    .draw_series(AreaSeries::new(
                        seg.iter().copied(),
                        baseline,
                        color.mix(ds.style.fill_alpha),
                    ))
                    .map_err(|e| anyhow!("{:?}", e))?;
            }
        }

        let stroke = ShapeStyle {
            color: color.to_rgba(),
            filled: false,
            stroke_width: ds.style.stroke_width,
        };
        let mut labeled = false;
        for seg in &segments {
            if seg.len() < 2 {
                continue; // lone points are covered by their marker
            }
            let anno = match ds.style.dash {
                LineDash::Solid => chart
                    .draw_series(LineSeries::new(seg.iter().copied(), stroke))
                    .map_err(|e| anyhow!("{:?}", e))?,
                LineDash::Dashed => chart
                    .draw_series(DashedLineSeries::new(
                        seg.iter().copied(),
                        DASH_PATTERN.0,
                        DASH_PATTERN.1,
                        stroke,
                    ))
                    .map_err(|e| anyhow!("{:?}", e))?,
            };
            if !labeled {
                anno.label(ds.label)
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], color));
                labeled = true;
            }
        }

        let anno = chart
            .draw_series(
                present_points(&ds.values)
                    .map(|(x, y)| Circle::new((x, y), ds.style.point_radius, color.filled())),
            )
            .map_err(|e| anyhow!("{:?}", e))?;
        if !labeled && present_points(&ds.values).next().is_some() {
            anno.label(ds.label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], color));
            labeled = true;
        }
        any_labeled |= labeled;
    }
    Ok(any_labeled)
}

/// Draw one secondary-axis dataset (line plus markers) against the right
/// axis. Returns whether it was attached to the legend.
fn draw_secondary<DB: DrawingBackend>(
    chart: &mut DualChart<'_, DB>,
    ds: &DatasetSpec,
) -> Result<bool> {
    let color = rgb(ds.style.color);
    let stroke = ShapeStyle {
        color: color.to_rgba(),
        filled: false,
        stroke_width: ds.style.stroke_width,
    };
    let mut labeled = false;
    for seg in gap_segments(&ds.values, ds.span_gaps) {
        if seg.len() < 2 {
            continue;
        }
        let anno = chart
            .draw_secondary_series(LineSeries::new(seg.into_iter(), stroke))
            .map_err(|e| anyhow!("{:?}", e))?;
        if !labeled {
            anno.label(ds.label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], color));
            labeled = true;
        }
    }
    let anno = chart
        .draw_secondary_series(
            present_points(&ds.values)
                .map(|(x, y)| Circle::new((x, y), ds.style.point_radius, color.filled())),
        )
        .map_err(|e| anyhow!("{:?}", e))?;
    if !labeled && present_points(&ds.values).next().is_some() {
        anno.label(ds.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], color));
        labeled = true;
    }
    Ok(labeled)
}

fn draw_legend<'a, DB: DrawingBackend + 'a>(chart: &mut PrimaryChart<'a, DB>) -> Result<()> {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(rgb(CHART_BG).mix(0.85))
        .border_style(WHITE.mix(0.4))
        .label_font(("sans-serif", 14).into_font().color(&WHITE))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Present values of a series as `(index, value)` points.
fn present_points(values: &[Option<f64>]) -> impl Iterator<Item = (f64, f64)> + '_ {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|y| (i as f64, y)))
}

fn rgb(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

fn x_domain(n: usize) -> (f64, f64) {
    // A single entry has no extent; widen so the lone point sits centered.
    if n <= 1 { (-1.0, 1.0) } else { (0.0, (n - 1) as f64) }
}

/// Min/max over the present values of all datasets on an axis, widened when
/// degenerate. `None` when every value is a gap.
fn value_range(datasets: &[DatasetSpec], axis: AxisSlot) -> Option<(f64, f64)> {
    let values: Vec<f64> = datasets
        .iter()
        .filter(|d| d.axis == axis)
        .flat_map(|d| d.values.iter().flatten().copied())
        .collect();
    if values.is_empty() {
        return None;
    }
    let mut lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 1.0;
        hi += 1.0;
    }
    Some((lo, hi))
}

/// Humidity axis: pinned to 0..100 percent, stretched by out-of-range data.
fn humidity_range(datasets: &[DatasetSpec]) -> std::ops::Range<f64> {
    match value_range(datasets, AxisSlot::Secondary) {
        Some((lo, hi)) => lo.min(0.0)..hi.max(100.0),
        None => 0.0..100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::style;

    fn spec(values: Vec<Option<f64>>, axis: AxisSlot) -> DatasetSpec {
        DatasetSpec {
            label: "test",
            values,
            style: style::LEGACY_TEMP,
            axis,
            span_gaps: false,
        }
    }

    #[test]
    fn x_domain_widens_single_entry() {
        assert_eq!(x_domain(1), (-1.0, 1.0));
        assert_eq!(x_domain(4), (0.0, 3.0));
    }

    #[test]
    fn value_range_ignores_gaps_and_other_axes() {
        let ds = vec![
            spec(vec![Some(10.0), None, Some(20.0)], AxisSlot::Primary),
            spec(vec![Some(999.0)], AxisSlot::Secondary),
        ];
        assert_eq!(value_range(&ds, AxisSlot::Primary), Some((10.0, 20.0)));
    }

    #[test]
    fn value_range_widens_flat_series() {
        let ds = vec![spec(vec![Some(5.0), Some(5.0)], AxisSlot::Primary)];
        assert_eq!(value_range(&ds, AxisSlot::Primary), Some((4.0, 6.0)));
    }

    #[test]
    fn value_range_is_none_for_all_gaps() {
        let ds = vec![spec(vec![None, None], AxisSlot::Primary)];
        assert_eq!(value_range(&ds, AxisSlot::Primary), None);
    }

    #[test]
    fn humidity_axis_covers_full_percent_scale() {
        let ds = vec![spec(vec![Some(40.0), Some(70.0)], AxisSlot::Secondary)];
        assert_eq!(humidity_range(&ds), 0.0..100.0);
    }
}
