use serde::{Deserialize, Serialize};

/// Forecast data extracted from a page (one week of entries).
///
/// `times` holds the ordered day labels; every other field is a value series
/// aligned to it by index. `None` marks a gap: an index where the series has
/// no value. Gaps are preserved all the way into the chart and are never
/// substituted with zero.
///
/// Invariant: a populated temperature series (`temps`, `actual_temps`,
/// `pred_temps`) has the same length as `times`, or is empty. The attribute
/// decode in [`crate::page`] enforces this. `hums` may have a differing
/// length; dataset assembly drops it in that case instead of rendering
/// misaligned values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    /// Day labels for the x axis, e.g. `"Monday 04 Oct"`.
    pub times: Vec<String>,
    /// Combined temperature series (legacy pages expose only this one).
    pub temps: Vec<Option<f64>>,
    /// Observed temperatures; gaps where no observation exists yet.
    pub actual_temps: Vec<Option<f64>>,
    /// Predicted temperatures; gaps where no prediction was made.
    pub pred_temps: Vec<Option<f64>>,
    /// Humidity percentages.
    pub hums: Vec<Option<f64>>,
}

impl ForecastSeries {
    /// Number of entries (length of the label series).
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True when no labels were extracted at all.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// True when at least one temperature series is populated.
    ///
    /// A chart needs labels plus something to plot on the primary axis;
    /// humidity alone does not qualify.
    pub fn has_temperatures(&self) -> bool {
        !self.temps.is_empty() || !self.actual_temps.is_empty() || !self.pred_temps.is_empty()
    }

    /// True when the series can be charted: labels plus temperatures.
    pub fn is_chartable(&self) -> bool {
        !self.is_empty() && self.has_temperatures()
    }
}
