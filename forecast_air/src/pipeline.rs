//! The composed analysis pipeline: extract, trim, forecast, summarize
//!
//! One synchronous run per query. Fetched series go through the TTL
//! cache, so repeated queries for the same point and variable within the
//! expiry reuse one remote call. The forecaster only runs once enough
//! usable samples survive cleaning.

use std::path::Path;
use std::time::Duration;

use air_data::cache::SeriesCache;
use air_data::{trim_outliers, AirSeries, DataSource, Query, SeriesExtractor};
use tracing::info;

use crate::adapter::ForecastAdapter;
use crate::error::{ForecastError, Result};
use crate::export::write_forecast_csv_path;
use crate::metrics::{headline_metrics, HeadlineMetrics};
use crate::models::{ForecastSeries, TrendModel};

/// Fewest usable samples worth forecasting; below this the run reports
/// insufficient data instead of fitting a model
pub const MIN_USABLE_SAMPLES: usize = 5;

/// Everything one query produces
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Cleaned historical series the model was fitted on
    pub series: AirSeries,
    /// Augmented forecast over history plus horizon
    pub forecast: ForecastSeries,
    /// Headline numbers derived from the forecast
    pub metrics: HeadlineMetrics,
}

/// Extraction, cleaning, forecasting and metrics behind one entry point
#[derive(Debug)]
pub struct AnalysisPipeline<S, M> {
    extractor: SeriesExtractor<S>,
    cache: SeriesCache,
    adapter: ForecastAdapter,
    model: M,
}

impl<S: DataSource, M: TrendModel> AnalysisPipeline<S, M> {
    /// Pipeline over `source` and `model` with the default two-year
    /// horizon and one-hour cache expiry
    pub fn new(source: S, model: M) -> Self {
        Self {
            extractor: SeriesExtractor::new(source),
            cache: SeriesCache::new(),
            adapter: ForecastAdapter::new(),
            model,
        }
    }

    /// Same pipeline with a custom forecast horizon
    pub fn with_horizon(mut self, horizon_days: usize) -> Result<Self> {
        self.adapter = ForecastAdapter::with_horizon(horizon_days)?;
        Ok(self)
    }

    /// Same pipeline with a custom cache expiry
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = SeriesCache::with_ttl(ttl);
        self
    }

    /// The configured forecast horizon, in days
    pub fn horizon_days(&self) -> usize {
        self.adapter.horizon_days()
    }

    /// Run the full pipeline for one query
    ///
    /// Fetches through the cache, trims outliers, checks that at least
    /// [`MIN_USABLE_SAMPLES`] samples survived, then fits and predicts.
    /// Too few samples is the distinguishable
    /// [`ForecastError::InsufficientData`], reported before the model is
    /// ever fitted.
    pub fn run(&self, query: &Query) -> Result<AnalysisReport> {
        let raw = self
            .cache
            .get_or_fetch(query, || self.extractor.extract(query))?;
        let series = trim_outliers(&raw);

        if series.len() < MIN_USABLE_SAMPLES {
            return Err(ForecastError::InsufficientData {
                found: series.len(),
                required: MIN_USABLE_SAMPLES,
            });
        }

        let forecast = self.adapter.run(&self.model, &series)?;
        let metrics = headline_metrics(&forecast)?;

        info!(
            variable = query.variable.label(),
            history = series.len(),
            horizon = self.adapter.horizon_days(),
            delta_pct = metrics.delta_pct,
            trend = %metrics.trend,
            "analysis complete"
        );
        Ok(AnalysisReport {
            series,
            forecast,
            metrics,
        })
    }

    /// Run the pipeline and export the forecast as the audit CSV
    ///
    /// The file is written only after the whole run, metrics included,
    /// has succeeded; a failed run leaves no partial artifact behind.
    pub fn run_to_csv<P: AsRef<Path>>(&self, query: &Query, path: P) -> Result<AnalysisReport> {
        let report = self.run(query)?;
        write_forecast_csv_path(path, &report.forecast)?;
        Ok(report)
    }

    /// Drop expired cache entries, returning how many were removed
    pub fn evict_expired(&self) -> usize {
        self.cache.evict_expired()
    }
}
