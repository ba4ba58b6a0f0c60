//! # Forecast Air
//!
//! `forecast_air` is a Rust library for forecasting satellite-derived air
//! quality series and deriving headline trend metrics. It sits on top of
//! [`air_data`], which handles observation extraction and cleaning, and
//! adds:
//!
//! - A narrow forecasting seam ([`TrendModel`] / fitted counterpart) so
//!   any model producing point predictions with an interval can be
//!   plugged in
//! - One concrete model, trend plus weekly/yearly seasonality with a
//!   residual-based prediction interval
//! - A forecast adapter that covers the historical range plus a fixed
//!   daily horizon (two years by default)
//! - Headline metrics: current level, end-of-horizon level, percentage
//!   delta and a qualitative trend bucket
//! - CSV export of the forecast for audit and download parity
//! - A composed pipeline running extraction, trimming, forecasting and
//!   metrics behind one call
//!
//! ## Usage Example
//!
//! ```
//! use air_data::synthetic::SyntheticSource;
//! use air_data::{DateRange, GeoPoint, Query, Variable};
//! use forecast_air::models::seasonal_trend::SeasonalTrendModel;
//! use forecast_air::pipeline::AnalysisPipeline;
//!
//! let source = SyntheticSource::new(42).with_trend(2e-8);
//! let pipeline = AnalysisPipeline::new(source, SeasonalTrendModel::new());
//!
//! let query = Query::new(
//!     GeoPoint::new(-23.5505, -46.6333).unwrap(),
//!     Variable::No2,
//!     DateRange::default_window(),
//! );
//! let report = pipeline.run(&query).unwrap();
//! assert_eq!(
//!     report.forecast.len(),
//!     report.series.len() + pipeline.horizon_days()
//! );
//! println!("{}", report.metrics);
//! ```

pub mod adapter;
pub mod error;
pub mod export;
pub mod metrics;
pub mod models;
pub mod pipeline;

// Re-export commonly used types
pub use crate::adapter::{ForecastAdapter, DEFAULT_HORIZON_DAYS};
pub use crate::error::ForecastError;
pub use crate::export::ForecastRecord;
pub use crate::metrics::{classify_trend, headline_metrics, HeadlineMetrics, Trend};
pub use crate::models::{FittedTrendModel, ForecastPoint, ForecastSeries, TrendModel};
pub use crate::pipeline::{AnalysisPipeline, AnalysisReport};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
