//! Forecast adapter: a black-box model over history plus a fixed horizon

use air_data::AirSeries;
use chrono::Duration;
use tracing::debug;

use crate::error::{ForecastError, Result};
use crate::models::{FittedTrendModel, ForecastSeries, TrendModel};

/// Default forecast horizon: two years of daily predictions
pub const DEFAULT_HORIZON_DAYS: usize = 365 * 2;

/// Runs a forecasting model over the historical range plus a horizon
#[derive(Debug, Clone, Copy)]
pub struct ForecastAdapter {
    horizon_days: usize,
}

impl ForecastAdapter {
    /// Adapter with the default two-year horizon
    pub fn new() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }

    /// Adapter with a custom horizon
    pub fn with_horizon(horizon_days: usize) -> Result<Self> {
        if horizon_days == 0 {
            return Err(ForecastError::InvalidParameter(
                "horizon must be at least one day".to_string(),
            ));
        }
        Ok(Self { horizon_days })
    }

    /// The configured horizon, in days
    pub fn horizon_days(&self) -> usize {
        self.horizon_days
    }

    /// Fit `model` on `series` and predict history plus horizon
    ///
    /// The output covers every historical date followed by `horizon_days`
    /// consecutive daily dates continuing from the last observation.
    /// Model failures on degenerate input propagate unchanged; there is
    /// no fallback model and no retry.
    pub fn run<M: TrendModel>(&self, model: &M, series: &AirSeries) -> Result<ForecastSeries> {
        if series.len() < 2 {
            return Err(ForecastError::Model(format!(
                "forecasting needs at least 2 observations, got {}",
                series.len()
            )));
        }

        let fitted = model.fit(series)?;

        let mut dates = series.dates();
        let last = *dates.last().unwrap();
        for day in 1..=self.horizon_days {
            dates.push(last + Duration::days(day as i64));
        }

        let points = fitted.predict(&dates)?;
        debug!(
            model = model.name(),
            history = series.len(),
            horizon = self.horizon_days,
            "forecast complete"
        );
        ForecastSeries::new(points, series.len(), self.horizon_days)
    }
}

impl Default for ForecastAdapter {
    fn default() -> Self {
        Self::new()
    }
}
