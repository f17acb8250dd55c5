//! wxchart
//!
//! A lightweight Rust library for extracting weekly weather forecast data
//! from rendered HTML pages and charting it as an SVG line chart. Pairs
//! with the `wxchart` CLI.
//!
//! ### Features
//! - Locate the chart surface in a page and decode its `data-*` attributes
//! - Fall back to scraping the forecast list when the attributes are broken
//! - Pick the right dataset layout (actual vs. predicted, legacy combined,
//!   or temperature with a humidity overlay) from the data itself
//! - Keep gaps as gaps: missing days break or bridge a line, never drop to zero
//! - Save extracted data as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use wxchart::{ForecastChartRenderer, RendererConfig};
//!
//! let page = std::fs::read_to_string("forecast.html")?;
//! let mut renderer = ForecastChartRenderer::new(RendererConfig {
//!     out: Some("forecast.svg".into()),
//!     ..RendererConfig::default()
//! });
//! if let Some(chart) = renderer.render(&page) {
//!     println!("{} datasets over {} days", chart.datasets().len(), chart.times().len());
//! }
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod fetch;
pub mod models;
pub mod page;
pub mod render;
pub mod storage;
pub mod viz;

pub use fetch::PageClient;
pub use models::ForecastSeries;
pub use render::{ChartInstance, ForecastChartRenderer, RendererConfig};
