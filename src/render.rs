//! The forecast chart renderer: owns one chart at a time and replaces it,
//! disposing the predecessor, on every successful render.

use crate::page;
use crate::viz;
use crate::viz::datasets::{self, DatasetPlan, DatasetSpec};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Renderer configuration. Plain data; fields may be adjusted between
/// renders (retargeting `out` is how a replacement chart lands elsewhere).
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Id of the surface element that marks the page as chart-enabled.
    pub surface_id: String,
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Where to persist the rendered SVG; `None` keeps it in memory only.
    pub out: Option<PathBuf>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            surface_id: "chart".into(),
            width: 1000,
            height: 600,
            title: "Weather Forecast".into(),
            out: None,
        }
    }
}

/// A live chart: the rendered SVG, where it was persisted, and what it
/// shows.
#[derive(Debug, Clone)]
pub struct ChartInstance {
    svg: String,
    path: Option<PathBuf>,
    times: Vec<String>,
    datasets: Vec<DatasetSpec>,
    plan: DatasetPlan,
    generation: u64,
}

impl ChartInstance {
    /// The rendered SVG document.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Where the SVG was written, if persistence was configured.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The label series the chart was drawn over.
    pub fn times(&self) -> &[String] {
        &self.times
    }

    /// The datasets the chart was drawn from.
    pub fn datasets(&self) -> &[DatasetSpec] {
        &self.datasets
    }

    /// Which dataset-construction strategy produced this chart.
    pub fn plan(&self) -> DatasetPlan {
        self.plan
    }

    /// 1 for the first chart a renderer produces, then counting up.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Best-effort removal of the persisted artifact.
    fn dispose(&mut self) -> io::Result<()> {
        match self.path.take() {
            Some(p) => fs::remove_file(p),
            None => Ok(()),
        }
    }
}

/// Renders the forecast chart for a page and owns the resulting chart.
///
/// Every failure mode is logged and leaves the caller without a new chart;
/// nothing panics and no error escapes [`render`](Self::render). Rendering
/// again replaces the previous chart after disposing it, so a renderer
/// holds at most one live chart.
#[derive(Debug, Default)]
pub struct ForecastChartRenderer {
    pub config: RendererConfig,
    chart: Option<ChartInstance>,
    generation: u64,
}

impl ForecastChartRenderer {
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            chart: None,
            generation: 0,
        }
    }

    /// The live chart, if the last render succeeded.
    pub fn chart(&self) -> Option<&ChartInstance> {
        self.chart.as_ref()
    }

    /// Extract forecast data from `page` and render it.
    ///
    /// Pipeline: surface lookup, data extraction (structured attributes
    /// with list-scrape fallback), validation, disposal of the previous
    /// chart, dataset assembly, drawing, persistence. On success the new
    /// chart replaces the old one and a reference to it is returned.
    ///
    /// Failures are logged and yield `None`:
    /// - missing surface or empty extraction: the previous chart stays;
    /// - draw or persist failure: the previous chart was already disposed
    ///   and the slot is left empty (never a partial chart).
    pub fn render(&mut self, page: &str) -> Option<&ChartInstance> {
        let Some(series) = page::extract_series(page, &self.config.surface_id) else {
            log::error!(
                "chart surface `#{}` not found in page",
                self.config.surface_id
            );
            return None;
        };
        if !series.is_chartable() {
            log::error!("no forecast data found");
            return None;
        }

        // Replace-only lifecycle: the previous chart goes away before the
        // new one is drawn. Disposal is best-effort and never fatal.
        if let Some(mut old) = self.chart.take() {
            let _ = old.dispose();
        }

        let plan = DatasetPlan::select(&series);
        let specs = datasets::build_datasets(&series, plan);
        let svg = match viz::render_svg(
            &series.times,
            &specs,
            self.config.width,
            self.config.height,
            &self.config.title,
        ) {
            Ok(svg) => svg,
            Err(e) => {
                log::error!("chart rendering failed: {e:#}");
                return None;
            }
        };
        if let Some(path) = &self.config.out {
            if let Err(e) = fs::write(path, &svg) {
                log::error!("failed to write chart to {}: {e}", path.display());
                return None;
            }
        }

        self.generation += 1;
        log::debug!(
            "rendered {} dataset(s) over {} entries (generation {})",
            specs.len(),
            series.len(),
            self.generation
        );
        self.chart = Some(ChartInstance {
            svg,
            path: self.config.out.clone(),
            times: series.times,
            datasets: specs,
            plan,
            generation: self.generation,
        });
        self.chart.as_ref()
    }
}
