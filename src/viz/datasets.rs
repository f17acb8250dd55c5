//! Dataset assembly: the per-render choice of which extracted series become
//! chart datasets, and the gap-preserving line geometry they share.

use crate::models::ForecastSeries;
use crate::viz::style::{self, SeriesStyle};

/// Which y axis a dataset binds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisSlot {
    /// Left axis, temperature in °C.
    Primary,
    /// Right axis, humidity in percent. Only drawn when such a dataset exists.
    Secondary,
}

/// One dataset of the chart. Derived per render from the extracted series,
/// never stored beyond the chart instance it belongs to.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetSpec {
    pub label: &'static str,
    /// Values aligned to the label series; `None` is a gap.
    pub values: Vec<Option<f64>>,
    pub style: SeriesStyle,
    pub axis: AxisSlot,
    /// Bridge gaps with a continuous line instead of breaking the stroke.
    pub span_gaps: bool,
}

/// The three dataset-construction strategies. One is selected per render,
/// driven by which optional series actually carry values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatasetPlan {
    /// Actual and/or predicted temperature datasets.
    Split,
    /// Single combined temperature dataset.
    Legacy,
    /// Combined temperature plus a humidity overlay on the secondary axis.
    Humidity,
}

impl DatasetPlan {
    /// Pick the strategy for a series.
    ///
    /// The split series win over humidity: a page that exposes observed or
    /// predicted temperatures gets the comparison chart and its humidity
    /// data, if any, is not rendered.
    pub fn select(series: &ForecastSeries) -> Self {
        if has_values(&series.actual_temps) || has_values(&series.pred_temps) {
            DatasetPlan::Split
        } else if has_values(&series.hums) {
            DatasetPlan::Humidity
        } else {
            DatasetPlan::Legacy
        }
    }
}

fn has_values(series: &[Option<f64>]) -> bool {
    series.iter().any(|v| v.is_some())
}

/// Build the chart datasets for a plan.
///
/// Gaps are carried into the dataset values untouched. The humidity overlay
/// is added only when its length matches the temperature series; on a
/// mismatch it is silently omitted rather than rendered misaligned.
pub fn build_datasets(series: &ForecastSeries, plan: DatasetPlan) -> Vec<DatasetSpec> {
    let mut out = Vec::new();
    match plan {
        DatasetPlan::Split => {
            if has_values(&series.actual_temps) {
                out.push(DatasetSpec {
                    label: "Actual Temp (°C)",
                    values: series.actual_temps.clone(),
                    style: style::ACTUAL_TEMP,
                    axis: AxisSlot::Primary,
                    span_gaps: true,
                });
            }
            if has_values(&series.pred_temps) {
                out.push(DatasetSpec {
                    label: "Predicted Temp (°C)",
                    values: series.pred_temps.clone(),
                    style: style::PRED_TEMP,
                    axis: AxisSlot::Primary,
                    span_gaps: true,
                });
            }
        }
        DatasetPlan::Legacy => {
            out.push(DatasetSpec {
                label: "Temperature (°C)",
                values: series.temps.clone(),
                style: style::LEGACY_TEMP,
                axis: AxisSlot::Primary,
                span_gaps: false,
            });
        }
        DatasetPlan::Humidity => {
            out.push(DatasetSpec {
                label: "Temperature (°C)",
                values: series.temps.clone(),
                style: style::LEGACY_TEMP,
                axis: AxisSlot::Primary,
                span_gaps: false,
            });
            if series.hums.len() == series.temps.len() && has_values(&series.hums) {
                out.push(DatasetSpec {
                    label: "Humidity (%)",
                    values: series.hums.clone(),
                    style: style::HUMIDITY,
                    axis: AxisSlot::Secondary,
                    span_gaps: false,
                });
            }
        }
    }
    out
}

/// Split a series into polyline segments in `(index, value)` coordinates.
///
/// With `span_gaps` all present points form one segment and the line bridges
/// the gaps; without it the line breaks into contiguous runs. A gap never
/// contributes a point in either mode.
pub fn gap_segments(values: &[Option<f64>], span_gaps: bool) -> Vec<Vec<(f64, f64)>> {
    if span_gaps {
        let seg: Vec<(f64, f64)> = values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|y| (i as f64, y)))
            .collect();
        return if seg.is_empty() { Vec::new() } else { vec![seg] };
    }
    let mut segments = Vec::new();
    let mut run: Vec<(f64, f64)> = Vec::new();
    for (i, v) in values.iter().enumerate() {
        match v {
            Some(y) => run.push((i as f64, *y)),
            None => {
                if !run.is_empty() {
                    segments.push(std::mem::take(&mut run));
                }
            }
        }
    }
    if !run.is_empty() {
        segments.push(run);
    }
    segments
}
