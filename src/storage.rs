//! Persistence of extracted forecast data as CSV or JSON.

use crate::models::ForecastSeries;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save a series as CSV with a header row and one row per day.
///
/// Gaps serialize as empty cells so downstream tooling can tell "missing"
/// from zero.
pub fn save_csv<P: AsRef<Path>>(series: &ForecastSeries, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("day", "temp", "actual_temp", "pred_temp", "humidity"))?;
    for i in 0..series.len() {
        wtr.serialize((
            &series.times[i],
            series.temps.get(i).copied().flatten(),
            series.actual_temps.get(i).copied().flatten(),
            series.pred_temps.get(i).copied().flatten(),
            series.hums.get(i).copied().flatten(),
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a series as pretty-printed JSON.
pub fn save_json<P: AsRef<Path>>(series: &ForecastSeries, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(series)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
